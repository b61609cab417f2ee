use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Discord relative timestamp markup (`<t:..:R>`).
pub fn relative_timestamp(unix_secs: u64) -> String {
    format!("<t:{unix_secs}:R>")
}

/// Discord short date-time markup (`<t:..:f>`).
pub fn short_timestamp(unix_secs: u64) -> String {
    format!("<t:{unix_secs}:f>")
}
