use std::time::Instant;

/// Current instant as seen by the tokio runtime.
///
/// Record expiry is always computed against this clock so a paused test
/// runtime (`tokio::time::pause`) can drive TTLs deterministically.
#[inline]
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
