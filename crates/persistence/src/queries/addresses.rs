// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use larder_domain::Address;

use crate::data_models::AddressRow;
use crate::diesel_schema::address;
use crate::error::PersistenceError;

/// Retrieves one address by id.
///
/// # Errors
///
/// Returns `NotFound` if no such address exists, or a database error.
pub fn address_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Address, PersistenceError> {
    address::table
        .find(id)
        .select(AddressRow::as_select())
        .first::<AddressRow>(conn)
        .optional()?
        .map(Address::from)
        .ok_or_else(|| PersistenceError::NotFound(format!("address {id}")))
}
