// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono_tz::Tz;
use larder_domain::{
    AddressFields, DeliveryLocation, DeliveryPeriod, LocationDraft, LocationId, PeriodId,
    ProviderId,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{MemoryGateway, create_location, resolve_current_periods};

/// Wednesday, mid-week in every timezone used by the tests.
pub const NOW: OffsetDateTime = datetime!(2026-03-04 21:00 UTC);

pub fn create_test_address() -> AddressFields {
    AddressFields::new("1 Main St", "Springfield", "IL", "62701")
}

pub fn create_test_draft(name: &str) -> LocationDraft {
    LocationDraft::new(name, create_test_address(), ProviderId::new(7))
}

/// A gateway holding one resolved current period.
pub fn gateway_with_period() -> (MemoryGateway, DeliveryPeriod) {
    let mut gateway: MemoryGateway = MemoryGateway::new();
    let periods: Vec<DeliveryPeriod> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();
    let period: DeliveryPeriod = periods.into_iter().next().unwrap();
    (gateway, period)
}

pub fn create_test_location(
    gateway: &mut MemoryGateway,
    name: &str,
    period_id: PeriodId,
) -> DeliveryLocation {
    create_location(gateway, &create_test_draft(name), Some(period_id)).unwrap()
}

pub fn location_ids(locations: &[DeliveryLocation]) -> Vec<LocationId> {
    locations.iter().map(|location| location.id).collect()
}
