// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery location registry.
//!
//! Sole writer of `delivery_location` rows and the `address` row each one
//! owns. The two rows are written in strict sequence without a surrounding
//! transaction:
//!
//! - Create: address, then location. A failed location insert triggers a
//!   compensating delete of the new address.
//! - Delete: location, then address. A failed address delete leaves an
//!   orphaned address, which is reported in the outcome but does not fail
//!   the operation.

use larder_domain::{
    Address, AddressId, DeliveryLocation, LocationDraft, LocationId, LocationPatch,
    PeriodId, validate_location_draft, validate_location_patch,
};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::gateway::{DeliveryGateway, LocationFieldsPatch, NewDeliveryLocation};
use crate::sites::list_sites_for;

/// The result of deleting a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// The deleted location.
    pub location_id: LocationId,
    /// The location's address, if its delete failed and it is now unowned.
    pub orphaned_address: Option<AddressId>,
}

/// Lists locations scoped to the given periods, newest first.
///
/// Each location carries its address and its linked sites. An empty
/// `period_ids` yields an empty list without touching the gateway.
///
/// # Errors
///
/// Returns an error if the location query fails. Site lookups are lenient
/// and never fail the listing.
pub fn list_locations<G: DeliveryGateway>(
    gateway: &mut G,
    period_ids: &[PeriodId],
) -> Result<Vec<DeliveryLocation>, CoreError> {
    if period_ids.is_empty() {
        debug!("No delivery periods resolved; skipping location query");
        return Ok(Vec::new());
    }

    let mut locations: Vec<DeliveryLocation> = gateway
        .locations_for_periods(period_ids)
        .map_err(CoreError::gateway)?;

    locations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    for location in &mut locations {
        location.sites = list_sites_for(gateway, location.id);
    }

    debug!(
        periods = period_ids.len(),
        count = locations.len(),
        "Loaded delivery locations"
    );
    Ok(locations)
}

/// Creates a location together with its address.
///
/// The location is attached to the draft's period, or to `fallback_period`
/// when the draft names none.
///
/// # Arguments
///
/// * `gateway` - The persistence gateway
/// * `draft` - The location and address fields
/// * `fallback_period` - The period to use when the draft has none
///
/// # Errors
///
/// Returns an error if:
/// - The draft fails validation (nothing is written)
/// - The address insert fails
/// - The location insert fails (the new address is deleted again)
pub fn create_location<G: DeliveryGateway>(
    gateway: &mut G,
    draft: &LocationDraft,
    fallback_period: Option<PeriodId>,
) -> Result<DeliveryLocation, CoreError> {
    validate_location_draft(draft)?;

    let address: Address = gateway
        .insert_address(&draft.address)
        .map_err(CoreError::gateway)?;

    let new_location: NewDeliveryLocation = NewDeliveryLocation {
        name: draft.name.clone(),
        address_id: address.id,
        open_time: draft.open_time.clone(),
        close_time: draft.close_time.clone(),
        provider_id: draft.provider_id,
        delivery_period_id: draft.delivery_period_id.or(fallback_period),
    };

    match gateway.insert_location(&new_location) {
        Ok(location) => {
            info!(
                location_id = %location.id,
                address_id = %address.id,
                name = %location.name,
                "Created delivery location"
            );
            Ok(location)
        }
        Err(insert_err) => {
            if let Err(undo_err) = gateway.delete_address(address.id) {
                warn!(
                    address_id = %address.id,
                    error = %undo_err,
                    "Failed to remove address after location insert failed; address is orphaned"
                );
            }
            Err(CoreError::gateway(insert_err))
        }
    }
}

/// Applies a partial update to a location and, if present, its address.
///
/// Absent fields are left untouched. The address row is updated before the
/// location row.
///
/// # Errors
///
/// Returns an error if:
/// - The patch fails validation (nothing is written)
/// - The location does not exist
/// - Either update fails
pub fn update_location<G: DeliveryGateway>(
    gateway: &mut G,
    id: LocationId,
    patch: &LocationPatch,
) -> Result<DeliveryLocation, CoreError> {
    validate_location_patch(patch)?;

    let existing: DeliveryLocation = gateway
        .location_by_id(id)
        .map_err(CoreError::gateway)?
        .ok_or(CoreError::LocationNotFound(id))?;

    if let Some(address_patch) = patch.address_changes() {
        gateway
            .update_address(existing.address.id, address_patch)
            .map_err(CoreError::gateway)?;
        debug!(address_id = %existing.address.id, "Updated delivery location address");
    }

    let fields: LocationFieldsPatch = LocationFieldsPatch::from(patch);
    if !fields.is_empty() {
        gateway
            .update_location(id, &fields)
            .map_err(CoreError::gateway)?;
    }

    let mut updated: DeliveryLocation = gateway
        .location_by_id(id)
        .map_err(CoreError::gateway)?
        .ok_or(CoreError::LocationNotFound(id))?;
    updated.sites = list_sites_for(gateway, id);

    info!(location_id = %id, "Updated delivery location");
    Ok(updated)
}

/// Deletes a location and then its address.
///
/// # Errors
///
/// Returns an error if the location does not exist or its delete fails.
/// A failed address delete is reported through `DeleteOutcome` instead.
pub fn delete_location<G: DeliveryGateway>(
    gateway: &mut G,
    id: LocationId,
) -> Result<DeleteOutcome, CoreError> {
    let existing: DeliveryLocation = gateway
        .location_by_id(id)
        .map_err(CoreError::gateway)?
        .ok_or(CoreError::LocationNotFound(id))?;
    let address_id: AddressId = existing.address.id;

    gateway.delete_location(id).map_err(CoreError::gateway)?;

    let orphaned_address: Option<AddressId> = match gateway.delete_address(address_id) {
        Ok(()) => None,
        Err(err) => {
            warn!(
                location_id = %id,
                address_id = %address_id,
                error = %err,
                "Deleted delivery location but its address could not be removed"
            );
            Some(address_id)
        }
    };

    info!(location_id = %id, "Deleted delivery location");
    Ok(DeleteOutcome {
        location_id: id,
        orphaned_address,
    })
}
