//! Process-wide randomness source
//!
//! The convenience API draws from a single shared source so that tests and
//! the validation harness can swap in a deterministic generator. The default
//! is the operating system RNG. Access is serialized through a mutex; callers
//! that want to avoid the lock pass their own RNG to the trait APIs instead.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use pqe_api::{Error, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Object-safe bundle of the bounds a process-wide source must meet
trait Source: RngCore + CryptoRng + Send {}

impl<T: RngCore + CryptoRng + Send> Source for T {}

type DynSource = Box<dyn Source>;

static SOURCE: Lazy<Mutex<DynSource>> = Lazy::new(|| Mutex::new(Box::new(OsRng)));

/// Replace the process-wide randomness source
///
/// Affects every later call through [`GlobalRng`], including calls from
/// other threads.
pub fn install<R>(source: R)
where
    R: RngCore + CryptoRng + Send + 'static,
{
    match SOURCE.lock() {
        Ok(mut guard) => *guard = Box::new(source),
        Err(poisoned) => *poisoned.into_inner() = Box::new(source),
    }
    log::debug!("process-wide randomness source replaced");
}

/// Restore the operating system RNG as the process-wide source
pub fn reset() {
    install(OsRng);
}

/// Handle to the process-wide randomness source
///
/// Zero-sized; every call locks the shared source for the duration of the
/// fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRng;

impl RngCore for GlobalRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// # Panics
    /// If the underlying source fails. Use `try_fill_bytes` (or
    /// [`fill_random`]) to observe the failure instead.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("process-wide randomness source failed: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        let mut guard = SOURCE
            .lock()
            .map_err(|_| rand::Error::new(PoisonedSource))?;
        guard.try_fill_bytes(dest)
    }
}

impl CryptoRng for GlobalRng {}

#[derive(Debug)]
struct PoisonedSource;

impl core::fmt::Display for PoisonedSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("randomness source lock poisoned")
    }
}

impl std::error::Error for PoisonedSource {}

/// Fill `buf` from `rng`, mapping failure to `Error::InsufficientRandomness`
///
/// All layers draw their randomness through this helper so that a failing
/// source aborts the operation instead of panicking.
pub fn fill_random<R>(rng: &mut R, buf: &mut [u8]) -> Result<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    rng.try_fill_bytes(buf)
        .map_err(|e| Error::InsufficientRandomness {
            context: "fill_random",
            message: e.to_string(),
        })
}
