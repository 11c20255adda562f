// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Location queries.
//!
//! Every location is loaded joined with its address. Attached sites are
//! a separate query; see `queries::sites`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::{DeliveryLocation, LocationId, PeriodId};
use tracing::debug;

use crate::data_models::{AddressRow, LocationRow};
use crate::diesel_schema::{address, delivery_location};
use crate::error::PersistenceError;

/// Retrieves the locations attached to any of `period_ids`, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn locations_for_periods(
    conn: &mut SqliteConnection,
    period_ids: &[PeriodId],
) -> Result<Vec<DeliveryLocation>, PersistenceError> {
    let ids: Vec<i64> = period_ids.iter().map(PeriodId::value).collect();

    let rows: Vec<(LocationRow, AddressRow)> = delivery_location::table
        .inner_join(address::table)
        .filter(delivery_location::delivery_period_id.eq_any(ids))
        .order((
            delivery_location::created_at.desc(),
            delivery_location::id.desc(),
        ))
        .select((LocationRow::as_select(), AddressRow::as_select()))
        .load(conn)?;

    debug!(
        periods = period_ids.len(),
        count = rows.len(),
        "Loaded delivery locations"
    );
    rows.into_iter()
        .map(|(location, address)| location.into_location(address))
        .collect()
}

/// Retrieves one location by id.
///
/// # Errors
///
/// Returns an error if the query fails. A missing location is `Ok(None)`.
pub fn location_by_id(
    conn: &mut SqliteConnection,
    id: LocationId,
) -> Result<Option<DeliveryLocation>, PersistenceError> {
    let row: Option<(LocationRow, AddressRow)> = delivery_location::table
        .inner_join(address::table)
        .filter(delivery_location::id.eq(id.value()))
        .select((LocationRow::as_select(), AddressRow::as_select()))
        .first(conn)
        .optional()?;

    row.map(|(location, address)| location.into_location(address))
        .transpose()
}
