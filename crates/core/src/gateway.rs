// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence seam consumed by the scheduling core.
//!
//! The gateway is a typed rendition of row-level select/insert/update/delete
//! over the `address`, `delivery_period`, `delivery_location`, and
//! `site_delivery_location` tables, plus read-only joins into `site` and
//! `site_type`. It makes no transactional promises: every call stands
//! alone, and multi-step writes are sequenced by the caller.

use larder_domain::{
    Address, AddressFields, AddressId, AddressPatch, DeliveryLocation, DeliveryPeriod,
    LocationId, LocationPatch, PeriodId, ProviderId, Site, SiteDeliveryLocationLink, SiteId,
};
use time::OffsetDateTime;

/// A delivery period to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeliveryPeriod {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub title: Option<String>,
    pub is_current: bool,
}

/// A delivery location row to be inserted, referencing an existing address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeliveryLocation {
    pub name: String,
    pub address_id: AddressId,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub provider_id: ProviderId,
    pub delivery_period_id: Option<PeriodId>,
}

/// The location's own columns from a `LocationPatch`, without the address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFieldsPatch {
    pub name: Option<String>,
    pub open_time: Option<Option<String>>,
    pub close_time: Option<Option<String>>,
    pub provider_id: Option<ProviderId>,
    pub delivery_period_id: Option<Option<PeriodId>>,
}

impl LocationFieldsPatch {
    /// Returns `true` when the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.open_time.is_none()
            && self.close_time.is_none()
            && self.provider_id.is_none()
            && self.delivery_period_id.is_none()
    }
}

impl From<&LocationPatch> for LocationFieldsPatch {
    fn from(patch: &LocationPatch) -> Self {
        Self {
            name: patch.name.clone(),
            open_time: patch.open_time.clone(),
            close_time: patch.close_time.clone(),
            provider_id: patch.provider_id,
            delivery_period_id: patch.delivery_period_id,
        }
    }
}

/// Row-level access to delivery scheduling records.
pub trait DeliveryGateway {
    /// The gateway's own error type.
    type Error: std::error::Error;

    /// All periods flagged current, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn current_periods(&mut self) -> Result<Vec<DeliveryPeriod>, Self::Error>;

    /// Inserts a period and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_period(
        &mut self,
        period: &NewDeliveryPeriod,
    ) -> Result<DeliveryPeriod, Self::Error>;

    /// Inserts an address and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_address(&mut self, fields: &AddressFields) -> Result<Address, Self::Error>;

    /// Applies a partial update to an address and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not exist or the update fails.
    fn update_address(
        &mut self,
        id: AddressId,
        patch: &AddressPatch,
    ) -> Result<Address, Self::Error>;

    /// Deletes an address row.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not exist, is still referenced,
    /// or the delete fails.
    fn delete_address(&mut self, id: AddressId) -> Result<(), Self::Error>;

    /// Locations whose period is one of `period_ids`, joined with their
    /// address, newest first. Attached sites are left empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn locations_for_periods(
        &mut self,
        period_ids: &[PeriodId],
    ) -> Result<Vec<DeliveryLocation>, Self::Error>;

    /// A single location joined with its address.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing row is `Ok(None)`.
    fn location_by_id(&mut self, id: LocationId) -> Result<Option<DeliveryLocation>, Self::Error>;

    /// Inserts a location and returns it joined with its address.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, e.g. on a dangling foreign key.
    fn insert_location(
        &mut self,
        location: &NewDeliveryLocation,
    ) -> Result<DeliveryLocation, Self::Error>;

    /// Applies a partial update to a location's own columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist or the update fails.
    fn update_location(
        &mut self,
        id: LocationId,
        patch: &LocationFieldsPatch,
    ) -> Result<(), Self::Error>;

    /// Deletes a location row together with its association rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist or the delete fails.
    fn delete_location(&mut self, id: LocationId) -> Result<(), Self::Error>;

    /// Inserts one site/location association row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_site_link(
        &mut self,
        site_id: SiteId,
        location_id: LocationId,
    ) -> Result<SiteDeliveryLocationLink, Self::Error>;

    /// Deletes every association row matching both keys.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_site_links(
        &mut self,
        site_id: SiteId,
        location_id: LocationId,
    ) -> Result<usize, Self::Error>;

    /// Sites linked to a location, one entry per association row, with
    /// site type and address expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn sites_for_location(&mut self, location_id: LocationId) -> Result<Vec<Site>, Self::Error>;
}
