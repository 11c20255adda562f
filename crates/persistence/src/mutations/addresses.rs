// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::{Address, AddressFields, AddressId, AddressPatch};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{AddressChangeset, NewAddressRow};
use crate::diesel_schema::address;
use crate::error::PersistenceError;
use crate::queries::addresses::address_by_id;

/// Inserts an address and returns the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_address(
    conn: &mut SqliteConnection,
    fields: &AddressFields,
) -> Result<Address, PersistenceError> {
    diesel::insert_into(address::table)
        .values(NewAddressRow::from(fields))
        .execute(conn)?;

    let address_id: i64 = conn.get_last_insert_rowid()?;
    debug!(address_id, "Inserted address");

    address_by_id(conn, address_id)
}

/// Writes the present fields of `patch` and returns the stored row.
///
/// An empty patch writes nothing.
///
/// # Errors
///
/// Returns `NotFound` if the address does not exist, or a database error.
pub fn update_address(
    conn: &mut SqliteConnection,
    id: AddressId,
    patch: &AddressPatch,
) -> Result<Address, PersistenceError> {
    if !patch.is_empty() {
        let updated: usize = diesel::update(address::table.find(id.value()))
            .set(AddressChangeset::from(patch))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("address {id}")));
        }
        debug!(address_id = %id, "Updated address");
    }

    address_by_id(conn, id.value())
}

/// Deletes an address row.
///
/// Fails with a foreign key error while a location still references it.
///
/// # Errors
///
/// Returns `NotFound` if the address does not exist, or a database error.
pub fn delete_address(conn: &mut SqliteConnection, id: AddressId) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(address::table.find(id.value())).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("address {id}")));
    }
    debug!(address_id = %id, "Deleted address");
    Ok(())
}
