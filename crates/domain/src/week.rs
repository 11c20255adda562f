// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Week-bucketed delivery windows.
//!
//! A delivery period covers one calendar week in a declared timezone:
//!
//! - The week starts on Sunday at 00:00:00.000 local time
//! - The week ends on Saturday at 23:59:59.999 local time
//! - The stored window is padded by one minute on each side
//!   (`start - 1 minute`, `end + 1 minute`)
//!
//! The padding is asymmetric on purpose and its intent is undocumented.
//! Do not change it without product sign-off.
//!
//! ## Example
//!
//! ```text
//! now      = Wednesday 2026-03-04 15:00 America/Chicago
//! start    = Saturday  2026-02-28 23:59:00.000 America/Chicago
//! end      = Sunday    2026-03-08 00:00:59.999 America/Chicago
//! title    = "Week of March 1, 2026"
//! ```

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use time::{Duration, OffsetDateTime};

/// Padding applied to both ends of a computed week.
const WINDOW_PADDING_MINUTES: i64 = 1;

/// Longest DST gap searched when a local time does not exist.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// The padded window of the calendar week containing a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
    week_start: NaiveDate,
}

impl PeriodWindow {
    /// The padded start of the window (UTC).
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// The padded end of the window (UTC).
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// The local calendar date of the week's Sunday.
    #[must_use]
    pub const fn week_start_date(&self) -> NaiveDate {
        self.week_start
    }

    /// The human-readable period title, e.g. `Week of March 1, 2026`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Week of {}", self.week_start.format("%B %-d, %Y"))
    }

    /// Returns whether `instant` falls inside the padded window.
    #[must_use]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Computes the padded delivery window for the week containing `now`.
///
/// # Arguments
///
/// * `now` - The reference instant
/// * `tz` - The timezone whose calendar defines week boundaries
///
/// # Errors
///
/// Returns an error if:
/// - `now` cannot be represented as a `chrono` timestamp
/// - The local week boundaries cannot be resolved in `tz`
/// - Padding the window overflows
pub fn week_window(now: OffsetDateTime, tz: Tz) -> Result<PeriodWindow, DomainError> {
    let utc_now: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond())
        .ok_or_else(|| DomainError::InvalidPeriodWindow {
            reason: format!("Instant {now} is out of range"),
        })?;

    let local_date: NaiveDate = utc_now.with_timezone(&tz).date_naive();
    let days_since_sunday: u64 = u64::from(local_date.weekday().num_days_from_sunday());

    let week_start: NaiveDate = local_date
        .checked_sub_days(Days::new(days_since_sunday))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("finding the Sunday before {local_date}"),
        })?;
    let week_end: NaiveDate = week_start.checked_add_days(Days::new(6)).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("finding the Saturday after {week_start}"),
        }
    })?;

    let last_instant: NaiveTime = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).ok_or_else(|| {
        DomainError::InvalidPeriodWindow {
            reason: String::from("Could not construct end-of-day time"),
        }
    })?;

    let local_start: OffsetDateTime =
        resolve_local(tz, week_start.and_time(NaiveTime::MIN), Boundary::Earliest)?;
    let local_end: OffsetDateTime =
        resolve_local(tz, week_end.and_time(last_instant), Boundary::Latest)?;

    let padding: Duration = Duration::minutes(WINDOW_PADDING_MINUTES);
    let start: OffsetDateTime =
        local_start
            .checked_sub(padding)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("padding the week start"),
            })?;
    let end: OffsetDateTime =
        local_end
            .checked_add(padding)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("padding the week end"),
            })?;

    Ok(PeriodWindow {
        start,
        end,
        week_start,
    })
}

/// Which instant to pick when a local time is ambiguous.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Earliest,
    Latest,
}

/// Resolves a wall-clock time in `tz` to a UTC instant.
///
/// Local times skipped by a DST gap resolve to the earliest valid instant
/// after the gap: the first whole wall-clock minute past `local` that exists
/// in `tz`. For a skipped midnight this is the transition instant itself.
fn resolve_local(
    tz: Tz,
    local: NaiveDateTime,
    boundary: Boundary,
) -> Result<OffsetDateTime, DomainError> {
    let mapped = tz.from_local_datetime(&local);
    let resolved = match boundary {
        Boundary::Earliest => mapped.earliest(),
        Boundary::Latest => mapped.latest(),
    }
    .or_else(|| {
        (1..=MAX_GAP_MINUTES).find_map(|minutes| {
            let shifted: NaiveDateTime =
                local.checked_add_signed(chrono::Duration::minutes(minutes))?;
            tz.from_local_datetime(&shifted).earliest()
        })
    })
    .ok_or_else(|| DomainError::InvalidPeriodWindow {
        reason: format!("Local time {local} does not exist in timezone {tz}"),
    })?;

    let nanos: i64 =
        resolved
            .timestamp_nanos_opt()
            .ok_or_else(|| DomainError::InvalidPeriodWindow {
                reason: format!("Local time {local} is out of range"),
            })?;

    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos)).map_err(|e| {
        DomainError::InvalidPeriodWindow {
            reason: e.to_string(),
        }
    })
}
