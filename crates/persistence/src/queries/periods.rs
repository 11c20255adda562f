// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::DeliveryPeriod;
use tracing::debug;

use crate::data_models::PeriodRow;
use crate::diesel_schema::delivery_period;
use crate::error::PersistenceError;

/// Retrieves every period flagged current, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn current_periods(conn: &mut SqliteConnection) -> Result<Vec<DeliveryPeriod>, PersistenceError> {
    let rows: Vec<PeriodRow> = delivery_period::table
        .filter(delivery_period::is_current.eq(1))
        .order((delivery_period::created_at.desc(), delivery_period::id.desc()))
        .select(PeriodRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded current delivery periods");
    rows.into_iter().map(DeliveryPeriod::try_from).collect()
}

/// Retrieves one period by id.
///
/// # Errors
///
/// Returns `NotFound` if no such period exists, or a database error.
pub fn period_by_id(conn: &mut SqliteConnection, id: i64) -> Result<DeliveryPeriod, PersistenceError> {
    let row: PeriodRow = delivery_period::table
        .find(id)
        .select(PeriodRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("delivery period {id}")))?;
    DeliveryPeriod::try_from(row)
}
