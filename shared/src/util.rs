//! Shared utility functions

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current time as Unix seconds
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
