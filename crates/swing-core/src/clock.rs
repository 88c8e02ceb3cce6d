//! Market clock.
//!
//! The dashboard stores every timestamp at the fixed Indian market offset
//! (UTC+05:30), whatever the timezone of the host running the refresh.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// UTC+05:30 in seconds.
pub const MARKET_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Layout of the portfolio `last_updated` field.
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// The fixed market offset.
pub fn market_offset() -> FixedOffset {
    FixedOffset::east_opt(MARKET_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time at the market offset.
pub fn market_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&market_offset())
}

/// Convert any instant to the market offset.
pub fn to_market_time<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<FixedOffset> {
    at.with_timezone(&market_offset())
}

/// Format an instant as `YYYY-MM-DDTHH:MM:SS+05:30`.
pub fn format_last_updated<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    to_market_time(at).format(LAST_UPDATED_FORMAT).to_string()
}
