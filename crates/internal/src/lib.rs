//! Internal utilities for the pqe hybrid cryptosystem
//!
//! Not part of the public API; the layer crates use these helpers to keep
//! secret-dependent comparisons and selections branch-free.

pub mod constant_time;
