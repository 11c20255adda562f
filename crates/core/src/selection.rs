// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The active period/location cursor.
//!
//! Selection holds identifiers only and never owns records. It moves
//! between three states:
//!
//! - No period selected
//! - Period selected, no location selected
//! - Period selected, location selected
//!
//! There is no terminal state.

use larder_domain::{DeliveryLocation, DeliveryPeriod, LocationId, PeriodId};
use serde::{Deserialize, Serialize};

/// The currently selected delivery period and location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    period_id: Option<PeriodId>,
    location_id: Option<LocationId>,
}

/// The first location belonging to `period_id`, in list order.
fn first_location_of(
    period_id: Option<PeriodId>,
    locations: &[DeliveryLocation],
) -> Option<LocationId> {
    let period_id: PeriodId = period_id?;
    locations
        .iter()
        .find(|location| location.delivery_period_id == Some(period_id))
        .map(|location| location.id)
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            period_id: None,
            location_id: None,
        }
    }

    /// The selected period, if any.
    #[must_use]
    pub const fn period_id(&self) -> Option<PeriodId> {
        self.period_id
    }

    /// The selected location, if any.
    #[must_use]
    pub const fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    /// Reconciles the selection against freshly loaded periods and locations.
    ///
    /// A period that is still present is kept; otherwise the first period is
    /// selected, or none. A location that is still present is kept;
    /// otherwise the first location of the selected period is chosen, or none.
    pub fn reconcile(&mut self, periods: &[DeliveryPeriod], locations: &[DeliveryLocation]) {
        self.period_id = match self.period_id {
            Some(id) if periods.iter().any(|period| period.id == id) => Some(id),
            _ => periods.first().map(|period| period.id),
        };

        self.location_id = match self.location_id {
            Some(id) if locations.iter().any(|location| location.id == id) => Some(id),
            _ => first_location_of(self.period_id, locations),
        };
    }

    /// Selects a period by id.
    ///
    /// The period is looked up among `resolved` first and then among
    /// previously `known` periods. When found, it becomes the selected
    /// period and the location falls back to the first location of that
    /// period, or none.
    ///
    /// Returns `false` and leaves the selection unchanged when the period
    /// is unknown.
    pub fn select_period(
        &mut self,
        period_id: PeriodId,
        resolved: &[DeliveryPeriod],
        known: &[DeliveryPeriod],
        locations: &[DeliveryLocation],
    ) -> bool {
        let found: bool = resolved
            .iter()
            .chain(known.iter())
            .any(|period| period.id == period_id);
        if !found {
            return false;
        }

        self.period_id = Some(period_id);
        self.location_id = first_location_of(self.period_id, locations);
        true
    }

    /// Sets the selected location without validating it.
    pub const fn select_location(&mut self, location_id: Option<LocationId>) {
        self.location_id = location_id;
    }
}
