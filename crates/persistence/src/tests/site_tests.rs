// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder::DeliveryGateway;
use larder_domain::{
    AddressFields, DeliveryLocation, LocationId, Site, SiteDeliveryLocationLink, SiteId,
    SiteTypeId,
};

use super::{create_test_persistence, insert_test_location};
use crate::error::PersistenceError;

#[test]
fn test_create_site_expands_type_and_address() {
    let (mut persistence, _) = create_test_persistence();
    let pantry: SiteTypeId = persistence.create_site_type("Pantry").unwrap();
    let fields: AddressFields = AddressFields::new("9 Elm St", "Springfield", "IL", "62702");

    let site: Site = persistence
        .create_site("North Pantry", Some(pantry), Some(&fields))
        .unwrap();

    assert_eq!(site.name, "North Pantry");
    assert_eq!(site.site_type.as_ref().map(|t| t.id), Some(pantry));
    assert_eq!(site.site_type.as_ref().map(|t| t.name.as_str()), Some("Pantry"));
    assert_eq!(site.address.map(|a| a.fields), Some(fields));
}

#[test]
fn test_create_site_with_unknown_type_fails() {
    let (mut persistence, _) = create_test_persistence();

    let result: Result<Site, PersistenceError> =
        persistence.create_site("North Pantry", Some(SiteTypeId::new(404)), None);

    assert!(result.is_err());
}

#[test]
fn test_link_and_list_sites() {
    let (mut persistence, provider_id) = create_test_persistence();
    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, None);
    let north: Site = persistence.create_site("North Pantry", None, None).unwrap();
    let south: Site = persistence.create_site("South Pantry", None, None).unwrap();

    let link: SiteDeliveryLocationLink =
        persistence.insert_site_link(south.id, location.id).unwrap();
    persistence.insert_site_link(north.id, location.id).unwrap();

    assert_eq!(link.site_id, south.id);
    assert_eq!(link.delivery_location_id, location.id);
    let sites: Vec<Site> = persistence.sites_for_location(location.id).unwrap();
    assert_eq!(sites, vec![south, north]);
}

#[test]
fn test_duplicate_links_are_stored_and_removed_together() {
    let (mut persistence, provider_id) = create_test_persistence();
    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, None);
    let site: Site = persistence.create_site("North Pantry", None, None).unwrap();

    persistence.insert_site_link(site.id, location.id).unwrap();
    persistence.insert_site_link(site.id, location.id).unwrap();
    assert_eq!(persistence.sites_for_location(location.id).unwrap().len(), 2);

    let removed: usize = persistence.delete_site_links(site.id, location.id).unwrap();

    assert_eq!(removed, 2);
    assert!(persistence.sites_for_location(location.id).unwrap().is_empty());
}

#[test]
fn test_delete_site_links_leaves_other_pairs() {
    let (mut persistence, provider_id) = create_test_persistence();
    let hall: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, None);
    let gym: DeliveryLocation =
        insert_test_location(&mut persistence, "School Gym", provider_id, None);
    let site: Site = persistence.create_site("North Pantry", None, None).unwrap();
    persistence.insert_site_link(site.id, hall.id).unwrap();
    persistence.insert_site_link(site.id, gym.id).unwrap();

    persistence.delete_site_links(site.id, hall.id).unwrap();

    assert!(persistence.sites_for_location(hall.id).unwrap().is_empty());
    assert_eq!(persistence.sites_for_location(gym.id).unwrap(), vec![site]);
}

#[test]
fn test_delete_missing_links_removes_nothing() {
    let (mut persistence, _) = create_test_persistence();

    let removed: usize = persistence
        .delete_site_links(SiteId::new(404), LocationId::new(404))
        .unwrap();

    assert_eq!(removed, 0);
}

#[test]
fn test_link_to_unknown_location_fails() {
    let (mut persistence, _) = create_test_persistence();
    let site: Site = persistence.create_site("North Pantry", None, None).unwrap();

    let result: Result<SiteDeliveryLocationLink, PersistenceError> =
        persistence.insert_site_link(site.id, LocationId::new(404));

    assert!(result.is_err());
}

#[test]
fn test_delete_location_removes_its_links() {
    let (mut persistence, provider_id) = create_test_persistence();
    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, None);
    let site: Site = persistence.create_site("North Pantry", None, None).unwrap();
    persistence.insert_site_link(site.id, location.id).unwrap();

    persistence.delete_location(location.id).unwrap();

    assert!(persistence.sites_for_location(location.id).unwrap().is_empty());
}
