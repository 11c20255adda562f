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
    clippy::unwrap_used,
    clippy::expect_used
)]

//! API boundary for the Larder delivery scheduler.
//!
//! `DeliveryStore` is the only interface presented upward. Its operations
//! never return `Result`: they report failure through sentinel values and
//! keep the translated `ApiError` for the caller to inspect.

mod error;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use request_response::{
    DeleteLocationResponse, LinkSiteRequest, LocationSitesResponse, LocationsResponse,
    SelectLocationRequest, SelectPeriodRequest, SelectionResponse,
};
pub use store::{Clock, DeliveryStore};
