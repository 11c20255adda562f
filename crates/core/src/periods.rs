// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period resolution.
//!
//! Guarantees that at least one delivery period flagged current exists and
//! returns every such period. Several periods may be flagged current at
//! once; all of them scope location queries.

use chrono_tz::Tz;
use larder_domain::{DeliveryPeriod, PeriodWindow, week_window};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::gateway::{DeliveryGateway, NewDeliveryPeriod};

/// Orders periods newest first, breaking ties by descending id.
pub(crate) fn sort_newest_first(periods: &mut [DeliveryPeriod]) {
    periods.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

/// Resolves the current delivery periods, creating one for this week if none exist.
///
/// When the gateway reports no current period, exactly one is inserted:
/// its window is the padded calendar week containing `now` in `tz`, its
/// title is `Week of {Month} {day}, {year}`, and it is flagged current.
/// When one or more exist they are returned unmodified and nothing is written.
///
/// # Arguments
///
/// * `gateway` - The persistence gateway
/// * `now` - The reference instant
/// * `tz` - The timezone whose calendar defines the week
///
/// # Errors
///
/// Returns an error if:
/// - The gateway query or insert fails
/// - The week window cannot be computed
pub fn resolve_current_periods<G: DeliveryGateway>(
    gateway: &mut G,
    now: OffsetDateTime,
    tz: Tz,
) -> Result<Vec<DeliveryPeriod>, CoreError> {
    let mut periods: Vec<DeliveryPeriod> =
        gateway.current_periods().map_err(CoreError::gateway)?;

    if !periods.is_empty() {
        sort_newest_first(&mut periods);
        debug!(count = periods.len(), "Found current delivery periods");
        return Ok(periods);
    }

    let window: PeriodWindow = week_window(now, tz)?;
    let new_period: NewDeliveryPeriod = NewDeliveryPeriod {
        start: window.start(),
        end: window.end(),
        title: Some(window.title()),
        is_current: true,
    };

    let created: DeliveryPeriod = gateway
        .insert_period(&new_period)
        .map_err(CoreError::gateway)?;

    info!(
        period_id = %created.id,
        start = %created.start,
        end = %created.end,
        "Created current delivery period"
    );

    Ok(vec![created])
}
