// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder::NewDeliveryPeriod;
use larder_domain::DeliveryPeriod;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{format_timestamp, now_timestamp};
use crate::diesel_schema::delivery_period;
use crate::error::PersistenceError;
use crate::queries::periods::period_by_id;

/// Inserts a delivery period and returns the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_period(
    conn: &mut SqliteConnection,
    period: &NewDeliveryPeriod,
) -> Result<DeliveryPeriod, PersistenceError> {
    diesel::insert_into(delivery_period::table)
        .values((
            delivery_period::start_at.eq(format_timestamp(period.start)?),
            delivery_period::end_at.eq(format_timestamp(period.end)?),
            delivery_period::title.eq(period.title.as_deref()),
            delivery_period::created_at.eq(now_timestamp()?),
            delivery_period::is_current.eq(i32::from(period.is_current)),
        ))
        .execute(conn)?;

    let period_id: i64 = conn.get_last_insert_rowid()?;
    debug!(period_id, "Inserted delivery period");

    period_by_id(conn, period_id)
}
