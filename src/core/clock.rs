//! Wall-clock helpers backing decay timestamps and the daily-visit check.
use std::time::{SystemTime, UNIX_EPOCH};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Milliseconds since the Unix epoch. Returns 0 if the system clock sits
/// before the epoch rather than failing.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Whole days since the Unix epoch (UTC boundary) for a millisecond stamp.
pub fn epoch_day(millis: i64) -> i64 {
    millis.div_euclid(MILLIS_PER_DAY)
}
