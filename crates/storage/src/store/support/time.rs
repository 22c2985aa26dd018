#![forbid(unsafe_code)]

pub(in crate::store) fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}

/// Every mutation moves `updated_at` strictly forward, even when the wall clock
/// stalls or steps back.
pub(in crate::store) fn next_updated_at_ms(previous_ms: i64, now_ms: i64) -> i64 {
    now_ms.max(previous_ms.saturating_add(1))
}
