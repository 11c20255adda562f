// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-memory `DeliveryGateway`.
//!
//! Mirrors the relational gateway closely enough to exercise the core
//! without a database: addresses referenced by a location cannot be
//! deleted, deleting a location cascades to its association rows, and
//! rows are timestamped from a deterministic clock that advances one
//! second per insert.
//!
//! Individual operations can be forced to fail with `inject_failure`,
//! which is how partial multi-step writes are exercised.

use std::collections::{BTreeMap, HashSet};

use larder_domain::{
    Address, AddressFields, AddressId, AddressPatch, DeliveryLocation, DeliveryPeriod, LinkId,
    LocationId, PeriodId, ProviderId, Site, SiteDeliveryLocationLink, SiteId, SiteType,
    SiteTypeId,
};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::gateway::{DeliveryGateway, LocationFieldsPatch, NewDeliveryLocation, NewDeliveryPeriod};

/// The gateway operations, used to inject failures and record calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    CurrentPeriods,
    InsertPeriod,
    InsertAddress,
    UpdateAddress,
    DeleteAddress,
    LocationsForPeriods,
    LocationById,
    InsertLocation,
    UpdateLocation,
    DeleteLocation,
    InsertSiteLink,
    DeleteSiteLinks,
    SitesForLocation,
}

/// Errors raised by `MemoryGateway`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryGatewayError {
    /// The operation was configured to fail.
    Injected(GatewayOp),
    /// The referenced row does not exist.
    NotFound(String),
    /// The row is still referenced by another row.
    Referenced(String),
}

impl std::fmt::Display for MemoryGatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Injected(op) => write!(f, "Injected failure in {op:?}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Referenced(msg) => write!(f, "Still referenced: {msg}"),
        }
    }
}

impl std::error::Error for MemoryGatewayError {}

/// A location row as stored, referencing its address by id.
#[derive(Debug, Clone)]
struct LocationRow {
    id: LocationId,
    name: String,
    address_id: AddressId,
    open_time: Option<String>,
    close_time: Option<String>,
    provider_id: ProviderId,
    delivery_period_id: Option<PeriodId>,
    created_at: OffsetDateTime,
}

/// An in-memory delivery gateway.
#[derive(Debug, Clone)]
pub struct MemoryGateway {
    addresses: BTreeMap<AddressId, Address>,
    periods: Vec<DeliveryPeriod>,
    locations: BTreeMap<LocationId, LocationRow>,
    links: Vec<SiteDeliveryLocationLink>,
    sites: BTreeMap<SiteId, Site>,
    next_id: i64,
    clock: OffsetDateTime,
    failures: HashSet<GatewayOp>,
    calls: Vec<GatewayOp>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    /// Creates an empty gateway whose clock starts at 2026-01-01 00:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(datetime!(2026-01-01 00:00 UTC))
    }

    /// Creates an empty gateway whose clock starts at `start`.
    #[must_use]
    pub fn with_clock(start: OffsetDateTime) -> Self {
        Self {
            addresses: BTreeMap::new(),
            periods: Vec::new(),
            locations: BTreeMap::new(),
            links: Vec::new(),
            sites: BTreeMap::new(),
            next_id: 1,
            clock: start,
            failures: HashSet::new(),
            calls: Vec::new(),
        }
    }

    /// Makes every subsequent call of `op` fail until cleared.
    pub fn inject_failure(&mut self, op: GatewayOp) {
        self.failures.insert(op);
    }

    /// Stops failing calls of `op`.
    pub fn clear_failure(&mut self, op: GatewayOp) {
        self.failures.remove(&op);
    }

    /// Every operation invoked so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[GatewayOp] {
        &self.calls
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of stored address rows.
    #[must_use]
    pub fn address_count(&self) -> usize {
        self.addresses.len()
    }

    /// Number of stored period rows.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Every stored association row.
    #[must_use]
    pub fn links(&self) -> &[SiteDeliveryLocationLink] {
        &self.links
    }

    /// Adds a site that locations can be linked to.
    pub fn insert_site(
        &mut self,
        name: &str,
        site_type: Option<&str>,
        address: Option<AddressFields>,
    ) -> Site {
        let site_type: Option<SiteType> = site_type.map(|type_name| SiteType {
            id: SiteTypeId::new(self.allocate_id()),
            name: type_name.to_string(),
        });
        let address: Option<Address> = address.map(|fields| Address {
            id: AddressId::new(self.allocate_id()),
            fields,
        });
        let site: Site = Site {
            id: SiteId::new(self.allocate_id()),
            name: name.to_string(),
            site_type,
            address,
        };
        self.sites.insert(site.id, site.clone());
        site
    }

    /// Flags a stored period as no longer current.
    pub fn retire_period(&mut self, id: PeriodId) {
        if let Some(period) = self.periods.iter_mut().find(|period| period.id == id) {
            period.is_current = false;
        }
    }

    const fn allocate_id(&mut self) -> i64 {
        let id: i64 = self.next_id;
        self.next_id += 1;
        id
    }

    fn tick(&mut self) -> OffsetDateTime {
        let now: OffsetDateTime = self.clock;
        self.clock += Duration::seconds(1);
        now
    }

    fn check(&mut self, op: GatewayOp) -> Result<(), MemoryGatewayError> {
        self.calls.push(op);
        if self.failures.contains(&op) {
            return Err(MemoryGatewayError::Injected(op));
        }
        Ok(())
    }

    fn hydrate(&self, row: &LocationRow) -> Option<DeliveryLocation> {
        let address: Address = self.addresses.get(&row.address_id)?.clone();
        Some(DeliveryLocation {
            id: row.id,
            name: row.name.clone(),
            address,
            open_time: row.open_time.clone(),
            close_time: row.close_time.clone(),
            provider_id: row.provider_id,
            delivery_period_id: row.delivery_period_id,
            created_at: row.created_at,
            sites: Vec::new(),
        })
    }
}

impl DeliveryGateway for MemoryGateway {
    type Error = MemoryGatewayError;

    fn current_periods(&mut self) -> Result<Vec<DeliveryPeriod>, Self::Error> {
        self.check(GatewayOp::CurrentPeriods)?;
        let mut periods: Vec<DeliveryPeriod> = self
            .periods
            .iter()
            .filter(|period| period.is_current)
            .cloned()
            .collect();
        periods.reverse();
        Ok(periods)
    }

    fn insert_period(
        &mut self,
        period: &NewDeliveryPeriod,
    ) -> Result<DeliveryPeriod, Self::Error> {
        self.check(GatewayOp::InsertPeriod)?;
        let stored: DeliveryPeriod = DeliveryPeriod {
            id: PeriodId::new(self.allocate_id()),
            start: period.start,
            end: period.end,
            title: period.title.clone(),
            created_at: self.tick(),
            is_current: period.is_current,
        };
        self.periods.push(stored.clone());
        Ok(stored)
    }

    fn insert_address(&mut self, fields: &AddressFields) -> Result<Address, Self::Error> {
        self.check(GatewayOp::InsertAddress)?;
        let address: Address = Address {
            id: AddressId::new(self.allocate_id()),
            fields: fields.clone(),
        };
        self.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    fn update_address(
        &mut self,
        id: AddressId,
        patch: &AddressPatch,
    ) -> Result<Address, Self::Error> {
        self.check(GatewayOp::UpdateAddress)?;
        let address: &mut Address = self
            .addresses
            .get_mut(&id)
            .ok_or_else(|| MemoryGatewayError::NotFound(format!("address {id}")))?;
        patch.apply_to(&mut address.fields);
        Ok(address.clone())
    }

    fn delete_address(&mut self, id: AddressId) -> Result<(), Self::Error> {
        self.check(GatewayOp::DeleteAddress)?;
        if self.locations.values().any(|row| row.address_id == id) {
            return Err(MemoryGatewayError::Referenced(format!("address {id}")));
        }
        self.addresses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| MemoryGatewayError::NotFound(format!("address {id}")))
    }

    fn locations_for_periods(
        &mut self,
        period_ids: &[PeriodId],
    ) -> Result<Vec<DeliveryLocation>, Self::Error> {
        self.check(GatewayOp::LocationsForPeriods)?;
        let mut locations: Vec<DeliveryLocation> = self
            .locations
            .values()
            .filter(|row| {
                row.delivery_period_id
                    .is_some_and(|period_id| period_ids.contains(&period_id))
            })
            .filter_map(|row| self.hydrate(row))
            .collect();
        locations.reverse();
        Ok(locations)
    }

    fn location_by_id(&mut self, id: LocationId) -> Result<Option<DeliveryLocation>, Self::Error> {
        self.check(GatewayOp::LocationById)?;
        Ok(self.locations.get(&id).and_then(|row| self.hydrate(row)))
    }

    fn insert_location(
        &mut self,
        location: &NewDeliveryLocation,
    ) -> Result<DeliveryLocation, Self::Error> {
        self.check(GatewayOp::InsertLocation)?;
        if !self.addresses.contains_key(&location.address_id) {
            return Err(MemoryGatewayError::NotFound(format!(
                "address {}",
                location.address_id
            )));
        }
        let row: LocationRow = LocationRow {
            id: LocationId::new(self.allocate_id()),
            name: location.name.clone(),
            address_id: location.address_id,
            open_time: location.open_time.clone(),
            close_time: location.close_time.clone(),
            provider_id: location.provider_id,
            delivery_period_id: location.delivery_period_id,
            created_at: self.tick(),
        };
        let hydrated: Option<DeliveryLocation> = self.hydrate(&row);
        self.locations.insert(row.id, row);
        hydrated.ok_or_else(|| MemoryGatewayError::NotFound(String::from("inserted location")))
    }

    fn update_location(
        &mut self,
        id: LocationId,
        patch: &LocationFieldsPatch,
    ) -> Result<(), Self::Error> {
        self.check(GatewayOp::UpdateLocation)?;
        let row: &mut LocationRow = self
            .locations
            .get_mut(&id)
            .ok_or_else(|| MemoryGatewayError::NotFound(format!("location {id}")))?;
        if let Some(name) = &patch.name {
            row.name.clone_from(name);
        }
        if let Some(open_time) = &patch.open_time {
            row.open_time.clone_from(open_time);
        }
        if let Some(close_time) = &patch.close_time {
            row.close_time.clone_from(close_time);
        }
        if let Some(provider_id) = patch.provider_id {
            row.provider_id = provider_id;
        }
        if let Some(delivery_period_id) = patch.delivery_period_id {
            row.delivery_period_id = delivery_period_id;
        }
        Ok(())
    }

    fn delete_location(&mut self, id: LocationId) -> Result<(), Self::Error> {
        self.check(GatewayOp::DeleteLocation)?;
        self.locations
            .remove(&id)
            .ok_or_else(|| MemoryGatewayError::NotFound(format!("location {id}")))?;
        self.links.retain(|link| link.delivery_location_id != id);
        Ok(())
    }

    fn insert_site_link(
        &mut self,
        site_id: SiteId,
        location_id: LocationId,
    ) -> Result<SiteDeliveryLocationLink, Self::Error> {
        self.check(GatewayOp::InsertSiteLink)?;
        if !self.sites.contains_key(&site_id) {
            return Err(MemoryGatewayError::NotFound(format!("site {site_id}")));
        }
        if !self.locations.contains_key(&location_id) {
            return Err(MemoryGatewayError::NotFound(format!(
                "location {location_id}"
            )));
        }
        let link: SiteDeliveryLocationLink = SiteDeliveryLocationLink {
            id: LinkId::new(self.allocate_id()),
            site_id,
            delivery_location_id: location_id,
            created_at: self.tick(),
        };
        self.links.push(link.clone());
        Ok(link)
    }

    fn delete_site_links(
        &mut self,
        site_id: SiteId,
        location_id: LocationId,
    ) -> Result<usize, Self::Error> {
        self.check(GatewayOp::DeleteSiteLinks)?;
        let before: usize = self.links.len();
        self.links
            .retain(|link| !(link.site_id == site_id && link.delivery_location_id == location_id));
        Ok(before - self.links.len())
    }

    fn sites_for_location(&mut self, location_id: LocationId) -> Result<Vec<Site>, Self::Error> {
        self.check(GatewayOp::SitesForLocation)?;
        Ok(self
            .links
            .iter()
            .filter(|link| link.delivery_location_id == location_id)
            .filter_map(|link| self.sites.get(&link.site_id).cloned())
            .collect())
    }
}
