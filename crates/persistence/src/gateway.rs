// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder::{DeliveryGateway, LocationFieldsPatch, NewDeliveryLocation, NewDeliveryPeriod};
use larder_domain::{
    Address, AddressFields, AddressId, AddressPatch, DeliveryLocation, DeliveryPeriod,
    LocationId, PeriodId, Site, SiteDeliveryLocationLink, SiteId,
};

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};

impl DeliveryGateway for Persistence {
    type Error = PersistenceError;

    fn current_periods(&mut self) -> Result<Vec<DeliveryPeriod>, Self::Error> {
        queries::periods::current_periods(&mut self.conn)
    }

    fn insert_period(
        &mut self,
        period: &NewDeliveryPeriod,
    ) -> Result<DeliveryPeriod, Self::Error> {
        mutations::periods::insert_period(&mut self.conn, period)
    }

    fn insert_address(&mut self, fields: &AddressFields) -> Result<Address, Self::Error> {
        mutations::addresses::insert_address(&mut self.conn, fields)
    }

    fn update_address(
        &mut self,
        id: AddressId,
        patch: &AddressPatch,
    ) -> Result<Address, Self::Error> {
        mutations::addresses::update_address(&mut self.conn, id, patch)
    }

    fn delete_address(&mut self, id: AddressId) -> Result<(), Self::Error> {
        mutations::addresses::delete_address(&mut self.conn, id)
    }

    fn locations_for_periods(
        &mut self,
        period_ids: &[PeriodId],
    ) -> Result<Vec<DeliveryLocation>, Self::Error> {
        queries::locations::locations_for_periods(&mut self.conn, period_ids)
    }

    fn location_by_id(&mut self, id: LocationId) -> Result<Option<DeliveryLocation>, Self::Error> {
        queries::locations::location_by_id(&mut self.conn, id)
    }

    fn insert_location(
        &mut self,
        location: &NewDeliveryLocation,
    ) -> Result<DeliveryLocation, Self::Error> {
        mutations::locations::insert_location(&mut self.conn, location)
    }

    fn update_location(
        &mut self,
        id: LocationId,
        patch: &LocationFieldsPatch,
    ) -> Result<(), Self::Error> {
        mutations::locations::update_location(&mut self.conn, id, patch)
    }

    fn delete_location(&mut self, id: LocationId) -> Result<(), Self::Error> {
        mutations::locations::delete_location(&mut self.conn, id)
    }

    fn insert_site_link(
        &mut self,
        site_id: SiteId,
        location_id: LocationId,
    ) -> Result<SiteDeliveryLocationLink, Self::Error> {
        mutations::sites::insert_site_link(&mut self.conn, site_id, location_id)
    }

    fn delete_site_links(
        &mut self,
        site_id: SiteId,
        location_id: LocationId,
    ) -> Result<usize, Self::Error> {
        mutations::sites::delete_site_links(&mut self.conn, site_id, location_id)
    }

    fn sites_for_location(&mut self, location_id: LocationId) -> Result<Vec<Site>, Self::Error> {
        queries::sites::sites_for_location(&mut self.conn, location_id)
    }
}
