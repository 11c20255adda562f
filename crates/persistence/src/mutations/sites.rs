// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::{LocationId, SiteDeliveryLocationLink, SiteId};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::now_timestamp;
use crate::diesel_schema::site_delivery_location;
use crate::error::PersistenceError;
use crate::queries::sites::link_by_id;

/// Inserts one site/location association row.
///
/// The table has no uniqueness constraint, so repeated calls store
/// repeated rows.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the site or the
/// location does not exist.
pub fn insert_site_link(
    conn: &mut SqliteConnection,
    site_id: SiteId,
    location_id: LocationId,
) -> Result<SiteDeliveryLocationLink, PersistenceError> {
    diesel::insert_into(site_delivery_location::table)
        .values((
            site_delivery_location::site_id.eq(site_id.value()),
            site_delivery_location::delivery_location_id.eq(location_id.value()),
            site_delivery_location::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    let link_id: i64 = conn.get_last_insert_rowid()?;
    debug!(link_id, site_id = %site_id, location_id = %location_id, "Inserted site association");

    link_by_id(conn, link_id)
}

/// Deletes every association row matching both keys.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_site_links(
    conn: &mut SqliteConnection,
    site_id: SiteId,
    location_id: LocationId,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(
        site_delivery_location::table
            .filter(site_delivery_location::site_id.eq(site_id.value()))
            .filter(site_delivery_location::delivery_location_id.eq(location_id.value())),
    )
    .execute(conn)?;

    debug!(site_id = %site_id, location_id = %location_id, removed, "Deleted site associations");
    Ok(removed)
}
