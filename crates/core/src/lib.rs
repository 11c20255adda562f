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

//! Delivery scheduling core.
//!
//! Resolves the current delivery periods, owns the create/update/delete
//! sequencing of locations and their addresses, manages site associations,
//! and tracks the active period/location selection. All persistence goes
//! through a `DeliveryGateway`.

mod error;
mod gateway;
mod locations;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod periods;
mod selection;
mod sites;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use gateway::{DeliveryGateway, LocationFieldsPatch, NewDeliveryLocation, NewDeliveryPeriod};
pub use locations::{
    DeleteOutcome, create_location, delete_location, list_locations, update_location,
};
#[cfg(any(test, feature = "test-support"))]
pub use memory::{GatewayOp, MemoryGateway, MemoryGatewayError};
pub use periods::resolve_current_periods;
pub use selection::Selection;
pub use sites::{add_site, list_sites_for, remove_site};
