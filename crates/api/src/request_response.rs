// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Location drafts and patches are accepted as-is from `larder_domain`;
//! the types here cover everything else crossing the boundary.

use larder::Selection;
use larder_domain::{DeliveryLocation, DeliveryPeriod, LocationId, PeriodId, Site, SiteId};
use serde::{Deserialize, Serialize};

/// API request to link a site to a delivery location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSiteRequest {
    /// The site to link.
    pub site_id: SiteId,
}

/// API request to select a delivery period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectPeriodRequest {
    /// The period to select.
    pub period_id: PeriodId,
}

/// API request to select a delivery location, or clear the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectLocationRequest {
    /// The location to select; `null` clears the selection.
    pub location_id: Option<LocationId>,
}

/// The current selection with its records resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResponse {
    /// The selected period id, if any.
    pub period_id: Option<PeriodId>,
    /// The selected location id, if any.
    pub location_id: Option<LocationId>,
    /// The selected period, if it is loaded.
    pub period: Option<DeliveryPeriod>,
    /// The selected location, if it is loaded.
    pub location: Option<DeliveryLocation>,
}

/// API response listing loaded periods and locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationsResponse {
    /// The current delivery periods, newest first.
    pub periods: Vec<DeliveryPeriod>,
    /// Locations in any current period, newest first.
    pub locations: Vec<DeliveryLocation>,
    /// The selection after reconciliation.
    pub selection: Selection,
}

/// API response for a location's linked sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSitesResponse {
    /// The location.
    pub location_id: LocationId,
    /// One entry per association row.
    pub sites: Vec<Site>,
}

/// API response for a successful location delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLocationResponse {
    /// The deleted location.
    pub location_id: LocationId,
    /// A success message.
    pub message: String,
}
