// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site association management.
//!
//! Sole writer of the many-to-many `site_delivery_location` rows. No
//! idempotence check is made: linking the same pair twice stores two rows,
//! and unlinking removes every matching row.

use larder_domain::{LocationId, Site, SiteDeliveryLocationLink, SiteId};
use tracing::{debug, error, info};

use crate::error::CoreError;
use crate::gateway::DeliveryGateway;

/// Lists the sites linked to a location.
///
/// This read path is lenient: a gateway failure is logged and reported as
/// an empty list rather than an error.
pub fn list_sites_for<G: DeliveryGateway>(gateway: &mut G, location_id: LocationId) -> Vec<Site> {
    match gateway.sites_for_location(location_id) {
        Ok(sites) => {
            debug!(
                location_id = %location_id,
                count = sites.len(),
                "Loaded sites for delivery location"
            );
            sites
        }
        Err(err) => {
            error!(
                location_id = %location_id,
                error = %err,
                "Failed to load sites for delivery location"
            );
            Vec::new()
        }
    }
}

/// Links a site to a delivery location.
///
/// # Errors
///
/// Returns an error if the gateway insert fails.
pub fn add_site<G: DeliveryGateway>(
    gateway: &mut G,
    site_id: SiteId,
    location_id: LocationId,
) -> Result<SiteDeliveryLocationLink, CoreError> {
    let link: SiteDeliveryLocationLink = gateway
        .insert_site_link(site_id, location_id)
        .map_err(CoreError::gateway)?;

    info!(
        link_id = %link.id,
        site_id = %site_id,
        location_id = %location_id,
        "Linked site to delivery location"
    );
    Ok(link)
}

/// Unlinks a site from a delivery location.
///
/// Returns the number of association rows removed; zero is not an error.
///
/// # Errors
///
/// Returns an error if the gateway delete fails.
pub fn remove_site<G: DeliveryGateway>(
    gateway: &mut G,
    site_id: SiteId,
    location_id: LocationId,
) -> Result<usize, CoreError> {
    let removed: usize = gateway
        .delete_site_links(site_id, location_id)
        .map_err(CoreError::gateway)?;

    info!(
        site_id = %site_id,
        location_id = %location_id,
        removed,
        "Unlinked site from delivery location"
    );
    Ok(removed)
}
