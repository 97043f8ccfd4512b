//! Source of the current calendar month for the season calendar signal.

use chrono::{Datelike, FixedOffset, Offset, Utc};

/// Supplies the current month (1–12).
///
/// Injected into [`classify_document`](super::classify_document) so tests can
/// pin the date.
pub trait Clock: Send + Sync {
    fn current_month(&self) -> u32;
}

/// Wall clock, shifted by a fixed UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    utc_offset_hours: i32,
}

impl SystemClock {
    pub fn new(utc_offset_hours: i32) -> Self {
        Self { utc_offset_hours }
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}

impl Clock for SystemClock {
    fn current_month(&self) -> u32 {
        Utc::now().with_timezone(&self.offset()).month()
    }
}

/// Clock pinned to a single month.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_month(&self) -> u32 {
        self.0
    }
}
