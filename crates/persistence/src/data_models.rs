// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversions to domain types.
//!
//! Timestamps are stored as fixed-width UTC text
//! (`2026-03-01T05:59:00.000000Z`) so that ordering by the column is
//! ordering by instant.

use diesel::prelude::*;
use larder_domain::{
    Address, AddressFields, AddressId, AddressPatch, DeliveryLocation, DeliveryPeriod, LinkId,
    LocationId, PeriodId, ProviderId, SiteDeliveryLocationLink, SiteId, SiteType, SiteTypeId,
};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::diesel_schema::{
    address, delivery_location, delivery_period, site, site_delivery_location, site_type,
};
use crate::error::PersistenceError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// Formats an instant as stored column text.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(instant.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT)?)
}

/// Parses stored column text back into an instant.
///
/// # Errors
///
/// Returns an error if the text is not in the stored format.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT)?.assume_utc())
}

/// The current instant as stored column text.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = address)]
pub struct AddressRow {
    pub id: i64,
    pub name: Option<String>,
    pub street: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            fields: AddressFields {
                name: row.name,
                address: row.street,
                address1: row.street2,
                city: row.city,
                state: row.state,
                zip: row.zip,
                latitude: row.latitude,
                longitude: row.longitude,
            },
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = address)]
pub struct NewAddressRow<'a> {
    pub name: Option<&'a str>,
    pub street: &'a str,
    pub street2: Option<&'a str>,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl<'a> From<&'a AddressFields> for NewAddressRow<'a> {
    fn from(fields: &'a AddressFields) -> Self {
        Self {
            name: fields.name.as_deref(),
            street: &fields.address,
            street2: fields.address1.as_deref(),
            city: &fields.city,
            state: &fields.state,
            zip: &fields.zip,
            latitude: fields.latitude,
            longitude: fields.longitude,
        }
    }
}

/// Present fields are written; `Some(None)` writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = address)]
pub struct AddressChangeset<'a> {
    pub name: Option<Option<&'a str>>,
    pub street: Option<&'a str>,
    pub street2: Option<Option<&'a str>>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip: Option<&'a str>,
    pub latitude: Option<Option<f64>>,
    pub longitude: Option<Option<f64>>,
}

impl<'a> From<&'a AddressPatch> for AddressChangeset<'a> {
    fn from(patch: &'a AddressPatch) -> Self {
        Self {
            name: patch.name.as_ref().map(Option::as_deref),
            street: patch.address.as_deref(),
            street2: patch.address1.as_ref().map(Option::as_deref),
            city: patch.city.as_deref(),
            state: patch.state.as_deref(),
            zip: patch.zip.as_deref(),
            latitude: patch.latitude,
            longitude: patch.longitude,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = delivery_period)]
pub struct PeriodRow {
    pub id: i64,
    pub start_at: String,
    pub end_at: String,
    pub title: Option<String>,
    pub created_at: String,
    pub is_current: i32,
}

impl TryFrom<PeriodRow> for DeliveryPeriod {
    type Error = PersistenceError;

    fn try_from(row: PeriodRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PeriodId::new(row.id),
            start: parse_timestamp(&row.start_at)?,
            end: parse_timestamp(&row.end_at)?,
            title: row.title,
            created_at: parse_timestamp(&row.created_at)?,
            is_current: row.is_current != 0,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = delivery_location)]
pub struct LocationRow {
    pub id: i64,
    pub name: String,
    pub address_id: i64,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub provider_id: i64,
    pub delivery_period_id: Option<i64>,
    pub created_at: String,
}

impl LocationRow {
    /// Builds the domain location from this row and its joined address.
    ///
    /// Attached sites are left empty.
    ///
    /// # Errors
    ///
    /// Returns an error if `created_at` cannot be parsed.
    pub fn into_location(self, address: AddressRow) -> Result<DeliveryLocation, PersistenceError> {
        Ok(DeliveryLocation {
            id: LocationId::new(self.id),
            name: self.name,
            address: Address::from(address),
            open_time: self.open_time,
            close_time: self.close_time,
            provider_id: ProviderId::new(self.provider_id),
            delivery_period_id: self.delivery_period_id.map(PeriodId::new),
            created_at: parse_timestamp(&self.created_at)?,
            sites: Vec::new(),
        })
    }
}

/// Present fields are written; `Some(None)` writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = delivery_location)]
pub struct LocationChangeset<'a> {
    pub name: Option<&'a str>,
    pub open_time: Option<Option<&'a str>>,
    pub close_time: Option<Option<&'a str>>,
    pub provider_id: Option<i64>,
    pub delivery_period_id: Option<Option<i64>>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = site_delivery_location)]
pub struct LinkRow {
    pub id: i64,
    pub site_id: i64,
    pub delivery_location_id: i64,
    pub created_at: String,
}

impl TryFrom<LinkRow> for SiteDeliveryLocationLink {
    type Error = PersistenceError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LinkId::new(row.id),
            site_id: SiteId::new(row.site_id),
            delivery_location_id: LocationId::new(row.delivery_location_id),
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = site)]
pub struct SiteRow {
    pub id: i64,
    pub name: String,
    pub site_type_id: Option<i64>,
    pub address_id: Option<i64>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = site_type)]
pub struct SiteTypeRow {
    pub id: i64,
    pub name: String,
}

impl From<SiteTypeRow> for SiteType {
    fn from(row: SiteTypeRow) -> Self {
        Self {
            id: SiteTypeId::new(row.id),
            name: row.name,
        }
    }
}
