use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::DateFormatter;

/// Pattern used for machine-readable datetimes (`2024-01-01T10:00:00`).
pub const STORAGE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// [`DateFormatter`] backed by chrono, rendering in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ChronoDateFormatter {
    offset: FixedOffset,
}

impl ChronoDateFormatter {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Render in a fixed offset east of UTC.
    ///
    /// Returns `None` if the offset is out of range (more than a day).
    pub fn with_offset_seconds(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format(&self, timestamp: DateTime<Utc>, pattern: &str) -> String {
        timestamp
            .with_timezone(&self.offset)
            .format(pattern)
            .to_string()
    }
}
