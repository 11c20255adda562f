// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod location_tests;
mod site_tests;

use larder::{DeliveryGateway, NewDeliveryLocation};
use larder_domain::{
    AddressFields, AddressId, DeliveryLocation, LocationId, PeriodId, ProviderId,
};

use crate::Persistence;

pub fn create_test_address() -> AddressFields {
    AddressFields::new("1 Main St", "Springfield", "IL", "62701")
}

/// An in-memory database with one provider already inserted.
pub fn create_test_persistence() -> (Persistence, ProviderId) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let provider_id: ProviderId = persistence.create_provider("County Food Bank").unwrap();
    (persistence, provider_id)
}

/// Inserts an address and a location row referencing it.
pub fn insert_test_location(
    persistence: &mut Persistence,
    name: &str,
    provider_id: ProviderId,
    period_id: Option<PeriodId>,
) -> DeliveryLocation {
    let address_id: AddressId = persistence
        .insert_address(&create_test_address())
        .unwrap()
        .id;
    persistence
        .insert_location(&NewDeliveryLocation {
            name: name.to_string(),
            address_id,
            open_time: None,
            close_time: None,
            provider_id,
            delivery_period_id: period_id,
        })
        .unwrap()
}

pub fn location_ids(locations: &[DeliveryLocation]) -> Vec<LocationId> {
    locations.iter().map(|location| location.id).collect()
}
