// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder::{GatewayOp, MemoryGateway};
use larder_domain::{AddressFields, DeliveryLocation, Site, SiteId};

use super::helpers::create_store_with_locations;
use crate::{ApiError, DeliveryStore};

fn store_with_site() -> (DeliveryStore<MemoryGateway>, DeliveryLocation, Site) {
    let (mut store, created) = create_store_with_locations(&["Church Hall"]);
    let site: Site = store.gateway_mut().insert_site(
        "Fellowship Pantry",
        Some("Pantry"),
        Some(AddressFields::new("9 Elm St", "X", "Y", "00000")),
    );
    let location: DeliveryLocation = created.into_iter().next().unwrap();
    (store, location, site)
}

#[test]
fn test_linked_site_is_returned() {
    let (mut store, location, site) = store_with_site();

    assert!(store.add_site_to_location(site.id, location.id));

    let sites: Vec<Site> = store.get_location_sites(location.id);
    assert_eq!(sites, vec![site]);
}

#[test]
fn test_linking_refreshes_loaded_location() {
    let (mut store, location, site) = store_with_site();

    assert!(store.add_site_to_location(site.id, location.id));

    let loaded: &DeliveryLocation = store
        .locations()
        .iter()
        .find(|loaded| loaded.id == location.id)
        .unwrap();
    assert_eq!(loaded.sites, vec![site]);
}

#[test]
fn test_duplicate_link_creates_second_row() {
    let (mut store, location, site) = store_with_site();

    assert!(store.add_site_to_location(site.id, location.id));
    assert!(store.add_site_to_location(site.id, location.id));

    assert_eq!(store.gateway().links().len(), 2);
    assert_eq!(store.get_location_sites(location.id).len(), 2);
}

#[test]
fn test_remove_site_clears_every_duplicate() {
    let (mut store, location, site) = store_with_site();
    store.add_site_to_location(site.id, location.id);
    store.add_site_to_location(site.id, location.id);

    assert!(store.remove_site_from_location(site.id, location.id));

    assert!(store.get_location_sites(location.id).is_empty());
    assert!(store.locations()[0].sites.is_empty());
}

#[test]
fn test_remove_missing_link_succeeds() {
    let (mut store, location, site) = store_with_site();

    assert!(store.remove_site_from_location(site.id, location.id));
    assert!(store.error().is_none());
}

#[test]
fn test_link_failure_returns_false() {
    let (mut store, location, site) = store_with_site();
    store.gateway_mut().inject_failure(GatewayOp::InsertSiteLink);

    assert!(!store.add_site_to_location(site.id, location.id));
    assert!(matches!(store.error(), Some(ApiError::Internal { .. })));
    assert!(store.gateway().links().is_empty());
}

#[test]
fn test_link_to_unknown_site_returns_false() {
    let (mut store, location, _) = store_with_site();

    assert!(!store.add_site_to_location(SiteId::new(404), location.id));
    assert!(store.error().is_some());
}

#[test]
fn test_unlink_failure_returns_false() {
    let (mut store, location, site) = store_with_site();
    store.add_site_to_location(site.id, location.id);
    store.gateway_mut().inject_failure(GatewayOp::DeleteSiteLinks);

    assert!(!store.remove_site_from_location(site.id, location.id));
    assert_eq!(store.gateway().links().len(), 1);
}

#[test]
fn test_site_read_failure_yields_empty_list() {
    let (mut store, location, site) = store_with_site();
    store.add_site_to_location(site.id, location.id);
    store
        .gateway_mut()
        .inject_failure(GatewayOp::SitesForLocation);

    assert!(store.get_location_sites(location.id).is_empty());
    assert!(store.error().is_none());
}
