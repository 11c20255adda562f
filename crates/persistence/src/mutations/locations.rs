// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder::{LocationFieldsPatch, NewDeliveryLocation};
use larder_domain::{DeliveryLocation, LocationId, PeriodId};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{LocationChangeset, now_timestamp};
use crate::diesel_schema::{delivery_location, site_delivery_location};
use crate::error::PersistenceError;
use crate::queries::locations::location_by_id;

/// Inserts a location row and returns it joined with its address.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the address,
/// provider, or period it references does not exist.
pub fn insert_location(
    conn: &mut SqliteConnection,
    location: &NewDeliveryLocation,
) -> Result<DeliveryLocation, PersistenceError> {
    diesel::insert_into(delivery_location::table)
        .values((
            delivery_location::name.eq(&location.name),
            delivery_location::address_id.eq(location.address_id.value()),
            delivery_location::open_time.eq(location.open_time.as_deref()),
            delivery_location::close_time.eq(location.close_time.as_deref()),
            delivery_location::provider_id.eq(location.provider_id.value()),
            delivery_location::delivery_period_id
                .eq(location.delivery_period_id.map(|id| id.value())),
            delivery_location::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    let location_id: LocationId = LocationId::new(conn.get_last_insert_rowid()?);
    debug!(location_id = %location_id, "Inserted delivery location");

    location_by_id(conn, location_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("delivery location {location_id} after insert"))
    })
}

/// Writes the present fields of `patch` to a location row.
///
/// An empty patch only checks that the location exists.
///
/// # Errors
///
/// Returns `NotFound` if the location does not exist, or a database error.
pub fn update_location(
    conn: &mut SqliteConnection,
    id: LocationId,
    patch: &LocationFieldsPatch,
) -> Result<(), PersistenceError> {
    let not_found = || PersistenceError::NotFound(format!("delivery location {id}"));

    if patch.is_empty() {
        return location_by_id(conn, id)?.map(|_| ()).ok_or_else(not_found);
    }

    let changeset: LocationChangeset<'_> = LocationChangeset {
        name: patch.name.as_deref(),
        open_time: patch.open_time.as_ref().map(Option::as_deref),
        close_time: patch.close_time.as_ref().map(Option::as_deref),
        provider_id: patch.provider_id.map(|id| id.value()),
        delivery_period_id: patch
            .delivery_period_id
            .map(|period| period.map(|id: PeriodId| id.value())),
    };

    let updated: usize = diesel::update(delivery_location::table.find(id.value()))
        .set(changeset)
        .execute(conn)?;
    if updated == 0 {
        return Err(not_found());
    }

    debug!(location_id = %id, "Updated delivery location");
    Ok(())
}

/// Deletes a location row and its association rows in one transaction.
///
/// # Errors
///
/// Returns `NotFound` if the location does not exist, or a database error.
pub fn delete_location(conn: &mut SqliteConnection, id: LocationId) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let unlinked: usize = diesel::delete(
            site_delivery_location::table
                .filter(site_delivery_location::delivery_location_id.eq(id.value())),
        )
        .execute(conn)?;

        let deleted: usize =
            diesel::delete(delivery_location::table.find(id.value())).execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "delivery location {id}"
            )));
        }

        debug!(location_id = %id, unlinked, "Deleted delivery location");
        Ok(())
    })
}
