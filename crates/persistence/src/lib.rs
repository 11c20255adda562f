// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the Larder delivery scheduler.
//!
//! `Persistence` owns one Diesel `SqliteConnection` and implements the
//! core's `DeliveryGateway` over it. The schema is created by embedded
//! migrations when the connection is opened.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use larder_domain::{AddressFields, ProviderId, Site, SiteTypeId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod gateway;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A Diesel-backed delivery gateway.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:larder_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Inserts a provider that locations can reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_provider(&mut self, name: &str) -> Result<ProviderId, PersistenceError> {
        mutations::collaborators::create_provider(&mut self.conn, name)
    }

    /// Inserts a site type that sites can reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_site_type(&mut self, name: &str) -> Result<SiteTypeId, PersistenceError> {
        mutations::collaborators::create_site_type(&mut self.conn, name)
    }

    /// Inserts a site that locations can be linked to.
    ///
    /// # Arguments
    ///
    /// * `name` - The site name
    /// * `site_type_id` - An existing site type, if any
    /// * `address` - The site's address, inserted first, if any
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails or the site type does not exist.
    pub fn create_site(
        &mut self,
        name: &str,
        site_type_id: Option<SiteTypeId>,
        address: Option<&AddressFields>,
    ) -> Result<Site, PersistenceError> {
        mutations::collaborators::create_site(&mut self.conn, name, site_type_id, address)
    }
}
