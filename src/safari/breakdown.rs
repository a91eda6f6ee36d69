//! Age buckets for reading-list entries.

use super::entry::ReadingListEntry;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

/// Counts per age bucket; `this_week + this_month + older == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBreakdown {
    pub total: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub older: usize,
}

/// Bucket entries by `date_added` relative to `now`.
///
/// Both boundaries belong to the newer bucket: exactly seven days old is
/// this week, exactly thirty days old is this month. Entries dated in the
/// future count as this week.
pub fn compute_breakdown(entries: &[ReadingListEntry], now: DateTime<Utc>) -> TimeBreakdown {
    let week_ago = now - Duration::days(WEEK_DAYS);
    let month_ago = now - Duration::days(MONTH_DAYS);

    let mut breakdown = TimeBreakdown {
        total: entries.len(),
        ..TimeBreakdown::default()
    };
    for entry in entries {
        if entry.date_added >= week_ago {
            breakdown.this_week += 1;
        } else if entry.date_added >= month_ago {
            breakdown.this_month += 1;
        } else {
            breakdown.older += 1;
        }
    }
    breakdown
}
