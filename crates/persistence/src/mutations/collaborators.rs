// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seeding for records this service references but does not manage.
//!
//! Providers, site types and sites are owned elsewhere. These inserts exist
//! so tests and demo databases have something to point at.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::{AddressFields, ProviderId, Site, SiteId, SiteTypeId};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{provider, site, site_type};
use crate::error::PersistenceError;
use crate::mutations::addresses::insert_address;
use crate::queries::sites::site_by_id;

/// Inserts a provider.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_provider(conn: &mut SqliteConnection, name: &str) -> Result<ProviderId, PersistenceError> {
    diesel::insert_into(provider::table)
        .values(provider::name.eq(name))
        .execute(conn)?;

    let provider_id: ProviderId = ProviderId::new(conn.get_last_insert_rowid()?);
    info!(provider_id = %provider_id, name, "Created provider");
    Ok(provider_id)
}

/// Inserts a site type.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_site_type(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<SiteTypeId, PersistenceError> {
    diesel::insert_into(site_type::table)
        .values(site_type::name.eq(name))
        .execute(conn)?;

    let site_type_id: SiteTypeId = SiteTypeId::new(conn.get_last_insert_rowid()?);
    info!(site_type_id = %site_type_id, name, "Created site type");
    Ok(site_type_id)
}

/// Inserts a site, creating its address first when one is given.
///
/// # Errors
///
/// Returns an error if either insert fails or the site type does not exist.
pub fn create_site(
    conn: &mut SqliteConnection,
    name: &str,
    site_type_id: Option<SiteTypeId>,
    address: Option<&AddressFields>,
) -> Result<Site, PersistenceError> {
    let address_id: Option<i64> = match address {
        Some(fields) => Some(insert_address(conn, fields)?.id.value()),
        None => None,
    };

    diesel::insert_into(site::table)
        .values((
            site::name.eq(name),
            site::site_type_id.eq(site_type_id.map(|id| id.value())),
            site::address_id.eq(address_id),
        ))
        .execute(conn)?;

    let site_id: SiteId = SiteId::new(conn.get_last_insert_rowid()?);
    info!(site_id = %site_id, name, "Created site");
    site_by_id(conn, site_id)
}
