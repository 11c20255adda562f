// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono_tz::Tz;
use larder::MemoryGateway;
use larder_domain::{AddressFields, DeliveryLocation, LocationDraft, ProviderId};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::DeliveryStore;

/// Wednesday 2026-03-04, 15:00 in Chicago.
pub fn fixed_now() -> OffsetDateTime {
    datetime!(2026-03-04 21:00 UTC)
}

pub fn create_test_address() -> AddressFields {
    AddressFields::new("1 Main St", "X", "Y", "00000")
}

pub fn create_test_draft(name: &str) -> LocationDraft {
    LocationDraft::new(name, create_test_address(), ProviderId::new(1))
}

/// A store over an empty in-memory gateway with a fixed clock.
pub fn create_test_store() -> DeliveryStore<MemoryGateway> {
    DeliveryStore::new(MemoryGateway::new(), Tz::America__Chicago).with_clock(fixed_now)
}

/// A fetched store holding one location per name, in creation order.
pub fn create_store_with_locations(
    names: &[&str],
) -> (DeliveryStore<MemoryGateway>, Vec<DeliveryLocation>) {
    let mut store: DeliveryStore<MemoryGateway> = create_test_store();
    store.fetch_locations();
    let locations: Vec<DeliveryLocation> = names
        .iter()
        .map(|name| store.add_location(&create_test_draft(name)).unwrap())
        .collect();
    (store, locations)
}
