// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The UI-facing delivery store.
//!
//! A `DeliveryStore` is an explicit context object holding the loaded
//! periods and locations, the selection cursor, and the last error. Every
//! operation clears the stored error first. Failures never escape: they
//! are translated to an `ApiError`, stored, logged, and reported through a
//! sentinel return value (`None`, `false`, or an empty list).
//!
//! On failure, previously loaded state is left untouched.

use chrono_tz::Tz;
use larder::{
    CoreError, DeleteOutcome, DeliveryGateway, Selection, add_site, create_location,
    delete_location, list_locations, list_sites_for, remove_site, resolve_current_periods,
    update_location,
};
use larder_domain::{
    DeliveryLocation, DeliveryPeriod, LocationDraft, LocationId, LocationPatch, PeriodId, Site,
    SiteId,
};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::error::{ApiError, translate_core_error};

/// Supplies the instant used to compute the current delivery week.
pub type Clock = fn() -> OffsetDateTime;

/// Loaded delivery state plus the operations that change it.
pub struct DeliveryStore<G: DeliveryGateway> {
    gateway: G,
    timezone: Tz,
    clock: Clock,
    periods: Vec<DeliveryPeriod>,
    known_periods: Vec<DeliveryPeriod>,
    locations: Vec<DeliveryLocation>,
    selection: Selection,
    error: Option<ApiError>,
}

impl<G: DeliveryGateway> DeliveryStore<G> {
    /// Creates an empty store over `gateway`.
    ///
    /// Nothing is loaded until `fetch_locations` is called.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The persistence gateway
    /// * `timezone` - The timezone whose calendar defines delivery weeks
    pub fn new(gateway: G, timezone: Tz) -> Self {
        Self {
            gateway,
            timezone,
            clock: OffsetDateTime::now_utc,
            periods: Vec::new(),
            known_periods: Vec::new(),
            locations: Vec::new(),
            selection: Selection::new(),
            error: None,
        }
    }

    /// Replaces the wall clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Resolves the current periods and loads their locations.
    ///
    /// On success the loaded state is replaced and the selection is
    /// reconciled against it. On failure the error is stored and the
    /// previously loaded state is kept.
    pub fn fetch_locations(&mut self) {
        self.error = None;

        let now: OffsetDateTime = (self.clock)();
        let periods: Vec<DeliveryPeriod> =
            match resolve_current_periods(&mut self.gateway, now, self.timezone) {
                Ok(periods) => periods,
                Err(err) => return self.fail("resolve delivery periods", err),
            };

        let period_ids: Vec<PeriodId> = periods.iter().map(|period| period.id).collect();
        let locations: Vec<DeliveryLocation> =
            match list_locations(&mut self.gateway, &period_ids) {
                Ok(locations) => locations,
                Err(err) => return self.fail("load delivery locations", err),
            };

        for period in &periods {
            if !self.known_periods.iter().any(|known| known.id == period.id) {
                self.known_periods.push(period.clone());
            }
        }
        self.periods = periods;
        self.locations = locations;
        self.selection.reconcile(&self.periods, &self.locations);

        debug!(
            periods = self.periods.len(),
            locations = self.locations.len(),
            "Fetched delivery locations"
        );
    }

    /// Creates a location, falling back to the selected period when the
    /// draft names none.
    ///
    /// A location in a loaded period is prepended to the loaded list.
    ///
    /// Returns `None` and stores the error on failure.
    pub fn add_location(&mut self, draft: &LocationDraft) -> Option<DeliveryLocation> {
        self.error = None;

        match create_location(&mut self.gateway, draft, self.selection.period_id()) {
            Ok(location) => {
                if self.is_loaded_period(location.delivery_period_id) {
                    self.locations.insert(0, location.clone());
                }
                Some(location)
            }
            Err(err) => {
                self.fail("add delivery location", err);
                None
            }
        }
    }

    /// Applies a partial update to a location.
    ///
    /// The loaded entry is replaced, or dropped if the location moved out
    /// of the loaded periods.
    ///
    /// Returns `None` and stores the error on failure.
    pub fn update_location(
        &mut self,
        id: LocationId,
        patch: &LocationPatch,
    ) -> Option<DeliveryLocation> {
        self.error = None;

        match update_location(&mut self.gateway, id, patch) {
            Ok(location) => {
                let in_scope: bool = self.is_loaded_period(location.delivery_period_id);
                match self.locations.iter().position(|loaded| loaded.id == id) {
                    Some(index) if in_scope => self.locations[index] = location.clone(),
                    Some(index) => {
                        self.locations.remove(index);
                    }
                    None if in_scope => self.locations.insert(0, location.clone()),
                    None => {}
                }
                self.selection.reconcile(&self.periods, &self.locations);
                Some(location)
            }
            Err(err) => {
                self.fail("update delivery location", err);
                None
            }
        }
    }

    /// Deletes a location and its address.
    ///
    /// An address that could not be removed is logged but does not fail
    /// the delete.
    ///
    /// Returns `false` and stores the error on failure.
    pub fn delete_location(&mut self, id: LocationId) -> bool {
        self.error = None;

        match delete_location(&mut self.gateway, id) {
            Ok(DeleteOutcome {
                orphaned_address, ..
            }) => {
                if let Some(address_id) = orphaned_address {
                    warn!(
                        location_id = %id,
                        address_id = %address_id,
                        "Delivery location deleted with an orphaned address"
                    );
                }
                self.locations.retain(|location| location.id != id);
                self.selection.reconcile(&self.periods, &self.locations);
                true
            }
            Err(err) => {
                self.fail("delete delivery location", err);
                false
            }
        }
    }

    /// Links a site to a location, then re-reads that location's sites.
    ///
    /// Returns `false` and stores the error on failure.
    pub fn add_site_to_location(&mut self, site_id: SiteId, location_id: LocationId) -> bool {
        self.error = None;

        match add_site(&mut self.gateway, site_id, location_id) {
            Ok(_) => {
                self.refresh_sites(location_id);
                true
            }
            Err(err) => {
                self.fail("link site to delivery location", err);
                false
            }
        }
    }

    /// Unlinks a site from a location, then re-reads that location's sites.
    ///
    /// Removing a link that does not exist succeeds.
    ///
    /// Returns `false` and stores the error on failure.
    pub fn remove_site_from_location(&mut self, site_id: SiteId, location_id: LocationId) -> bool {
        self.error = None;

        match remove_site(&mut self.gateway, site_id, location_id) {
            Ok(_) => {
                self.refresh_sites(location_id);
                true
            }
            Err(err) => {
                self.fail("unlink site from delivery location", err);
                false
            }
        }
    }

    /// The sites linked to a location, read fresh from the gateway.
    ///
    /// Read failures yield an empty list.
    pub fn get_location_sites(&mut self, location_id: LocationId) -> Vec<Site> {
        self.error = None;
        self.refresh_sites(location_id)
    }

    /// Selects a period from the loaded periods, or any previously loaded one.
    ///
    /// The location falls back to the first location of that period. An
    /// unknown period leaves the selection unchanged and stores a
    /// not-found error.
    pub fn select_delivery_period(&mut self, period_id: PeriodId) {
        self.error = None;

        let selected: bool = self.selection.select_period(
            period_id,
            &self.periods,
            &self.known_periods,
            &self.locations,
        );
        if selected {
            debug!(period_id = %period_id, "Selected delivery period");
        } else {
            self.error = Some(ApiError::ResourceNotFound {
                resource_type: String::from("Delivery period"),
                message: format!("Delivery period {period_id} has not been loaded"),
            });
            debug!(period_id = %period_id, "Ignored selection of unknown delivery period");
        }
    }

    /// Sets the selected location without checking that it exists.
    pub fn select_location(&mut self, location_id: Option<LocationId>) {
        self.error = None;
        self.selection.select_location(location_id);
    }

    /// The loaded locations, newest first.
    #[must_use]
    pub fn locations(&self) -> &[DeliveryLocation] {
        &self.locations
    }

    /// The current delivery periods from the last successful fetch.
    #[must_use]
    pub fn delivery_periods(&self) -> &[DeliveryPeriod] {
        &self.periods
    }

    /// The selection cursor.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// The selected period, if it has been loaded.
    #[must_use]
    pub fn selected_period(&self) -> Option<&DeliveryPeriod> {
        let period_id: PeriodId = self.selection.period_id()?;
        self.periods
            .iter()
            .chain(self.known_periods.iter())
            .find(|period| period.id == period_id)
    }

    /// The selected location, if it is loaded.
    #[must_use]
    pub fn selected_location(&self) -> Option<&DeliveryLocation> {
        let location_id: LocationId = self.selection.location_id()?;
        self.locations
            .iter()
            .find(|location| location.id == location_id)
    }

    /// The loaded locations belonging to the selected period.
    #[must_use]
    pub fn locations_for_selected_period(&self) -> Vec<&DeliveryLocation> {
        let Some(period_id) = self.selection.period_id() else {
            return Vec::new();
        };
        self.locations
            .iter()
            .filter(|location| location.delivery_period_id == Some(period_id))
            .collect()
    }

    /// The error stored by the last operation, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Takes the stored error, leaving none.
    pub const fn take_error(&mut self) -> Option<ApiError> {
        self.error.take()
    }

    /// The underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Mutable access to the underlying gateway.
    pub const fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    fn is_loaded_period(&self, period_id: Option<PeriodId>) -> bool {
        period_id.is_some_and(|id| self.periods.iter().any(|period| period.id == id))
    }

    fn refresh_sites(&mut self, location_id: LocationId) -> Vec<Site> {
        let sites: Vec<Site> = list_sites_for(&mut self.gateway, location_id);
        if let Some(location) = self
            .locations
            .iter_mut()
            .find(|location| location.id == location_id)
        {
            location.sites.clone_from(&sites);
        }
        sites
    }

    fn fail(&mut self, operation: &str, err: CoreError) {
        let api_error: ApiError = translate_core_error(err);
        warn!(operation, error = %api_error, "Delivery store operation failed");
        self.error = Some(api_error);
    }
}
