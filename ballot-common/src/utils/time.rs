use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current UNIX timestamp in seconds.
///
/// This represents the number of seconds since 1970-01-01 UTC.
/// The engine stamps proposal creation and deadlines with it; tests
/// pass explicit timestamps instead so expiry can be simulated.
///
/// # Panics
///
/// Panics if the system clock is set before the UNIX epoch.
pub fn current_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before UNIX EPOCH")
        .as_secs()
}
