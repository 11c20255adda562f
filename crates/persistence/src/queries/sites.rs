// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site association queries.
//!
//! Sites, site types and addresses are read-only here. A location's sites
//! are assembled from four flat queries rather than one wide join.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::{Address, LocationId, Site, SiteDeliveryLocationLink, SiteId, SiteType};
use tracing::debug;

use crate::data_models::{AddressRow, LinkRow, SiteRow, SiteTypeRow};
use crate::diesel_schema::{address, site, site_delivery_location, site_type};
use crate::error::PersistenceError;

/// Retrieves one association row by id.
///
/// # Errors
///
/// Returns `NotFound` if no such row exists, or a database error.
pub fn link_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<SiteDeliveryLocationLink, PersistenceError> {
    let row: LinkRow = site_delivery_location::table
        .find(id)
        .select(LinkRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("site association {id}")))?;
    SiteDeliveryLocationLink::try_from(row)
}

/// Retrieves one site by id with its type and address expanded.
///
/// # Errors
///
/// Returns `NotFound` if no such site exists, or a database error.
pub fn site_by_id(conn: &mut SqliteConnection, id: SiteId) -> Result<Site, PersistenceError> {
    let mut sites: Vec<Site> = load_sites(conn, &[id.value()])?;
    sites
        .pop()
        .ok_or_else(|| PersistenceError::NotFound(format!("site {id}")))
}

/// Retrieves the sites linked to a location.
///
/// One entry is returned per association row, in association order, so a
/// site linked twice appears twice.
///
/// # Errors
///
/// Returns an error if any of the underlying queries fail.
pub fn sites_for_location(
    conn: &mut SqliteConnection,
    location_id: LocationId,
) -> Result<Vec<Site>, PersistenceError> {
    let linked: Vec<i64> = site_delivery_location::table
        .filter(site_delivery_location::delivery_location_id.eq(location_id.value()))
        .order(site_delivery_location::id.asc())
        .select(site_delivery_location::site_id)
        .load(conn)?;

    if linked.is_empty() {
        return Ok(Vec::new());
    }

    let by_id: HashMap<SiteId, Site> = load_sites(conn, &linked)?
        .into_iter()
        .map(|site| (site.id, site))
        .collect();

    let sites: Vec<Site> = linked
        .into_iter()
        .filter_map(|site_id| by_id.get(&SiteId::new(site_id)).cloned())
        .collect();

    debug!(
        location_id = %location_id,
        count = sites.len(),
        "Loaded sites for delivery location"
    );
    Ok(sites)
}

fn load_sites(conn: &mut SqliteConnection, ids: &[i64]) -> Result<Vec<Site>, PersistenceError> {
    let rows: Vec<SiteRow> = site::table
        .filter(site::id.eq_any(ids))
        .order(site::id.asc())
        .select(SiteRow::as_select())
        .load(conn)?;

    let type_ids: Vec<i64> = rows.iter().filter_map(|row| row.site_type_id).collect();
    let address_ids: Vec<i64> = rows.iter().filter_map(|row| row.address_id).collect();

    let types: HashMap<i64, SiteType> = site_type::table
        .filter(site_type::id.eq_any(&type_ids))
        .select(SiteTypeRow::as_select())
        .load::<SiteTypeRow>(conn)?
        .into_iter()
        .map(|row| (row.id, SiteType::from(row)))
        .collect();

    let addresses: HashMap<i64, Address> = address::table
        .filter(address::id.eq_any(&address_ids))
        .select(AddressRow::as_select())
        .load::<AddressRow>(conn)?
        .into_iter()
        .map(|row| (row.id, Address::from(row)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| Site {
            id: SiteId::new(row.id),
            name: row.name,
            site_type: row.site_type_id.and_then(|id| types.get(&id).cloned()),
            address: row.address_id.and_then(|id| addresses.get(&id).cloned()),
        })
        .collect())
}
