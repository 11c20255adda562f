// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod types;
mod validation;
mod week;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    Address, AddressFields, AddressId, AddressPatch, DeliveryLocation, DeliveryPeriod, LinkId,
    LocationDraft, LocationId, LocationPatch, PeriodId, ProviderId, Site,
    SiteDeliveryLocationLink, SiteId, SiteType, SiteTypeId,
};
pub use validation::{
    validate_address_fields, validate_address_patch, validate_location_draft,
    validate_location_patch,
};
pub use week::{PeriodWindow, week_window};
