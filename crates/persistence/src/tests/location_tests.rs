// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder::{DeliveryGateway, LocationFieldsPatch, NewDeliveryLocation, NewDeliveryPeriod};
use larder_domain::{
    Address, AddressFields, AddressId, AddressPatch, DeliveryLocation, DeliveryPeriod,
    LocationId, PeriodId, ProviderId,
};
use time::macros::datetime;

use super::{create_test_address, create_test_persistence, insert_test_location, location_ids};
use crate::Persistence;
use crate::error::PersistenceError;

fn insert_current_period(persistence: &mut Persistence) -> DeliveryPeriod {
    persistence
        .insert_period(&NewDeliveryPeriod {
            start: datetime!(2026-02-28 23:59 UTC),
            end: datetime!(2026-03-08 00:00:59.999 UTC),
            title: None,
            is_current: true,
        })
        .unwrap()
}

#[test]
fn test_insert_address_round_trips_every_field() {
    let (mut persistence, _) = create_test_persistence();
    let mut fields: AddressFields = create_test_address().with_coordinates(39.78, -89.65);
    fields.name = Some(String::from("Parish Office"));
    fields.address1 = Some(String::from("Rear entrance"));

    let address: Address = persistence.insert_address(&fields).unwrap();

    assert_eq!(address.fields, fields);
}

#[test]
fn test_update_address_writes_present_fields_and_clears_nulls() {
    let (mut persistence, _) = create_test_persistence();
    let mut fields: AddressFields = create_test_address();
    fields.address1 = Some(String::from("Rear entrance"));
    let address: Address = persistence.insert_address(&fields).unwrap();

    let patch: AddressPatch = AddressPatch {
        city: Some(String::from("Shelbyville")),
        address1: Some(None),
        ..AddressPatch::default()
    };
    let updated: Address = persistence.update_address(address.id, &patch).unwrap();

    assert_eq!(updated.fields.city, "Shelbyville");
    assert_eq!(updated.fields.address1, None);
    assert_eq!(updated.fields.address, "1 Main St");
}

#[test]
fn test_update_missing_address_is_not_found() {
    let (mut persistence, _) = create_test_persistence();

    let result: Result<Address, PersistenceError> = persistence.update_address(
        AddressId::new(404),
        &AddressPatch {
            zip: Some(String::from("00000")),
            ..AddressPatch::default()
        },
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_insert_location_joins_address() {
    let (mut persistence, provider_id) = create_test_persistence();
    let period: DeliveryPeriod = insert_current_period(&mut persistence);

    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, Some(period.id));

    assert_eq!(location.name, "Church Hall");
    assert_eq!(location.provider_id, provider_id);
    assert_eq!(location.delivery_period_id, Some(period.id));
    assert_eq!(location.address.fields, create_test_address());
    assert!(location.sites.is_empty());
}

#[test]
fn test_insert_location_with_unknown_provider_fails() {
    let (mut persistence, _) = create_test_persistence();
    let address: Address = persistence.insert_address(&create_test_address()).unwrap();

    let result: Result<DeliveryLocation, PersistenceError> =
        persistence.insert_location(&NewDeliveryLocation {
            name: String::from("Church Hall"),
            address_id: address.id,
            open_time: None,
            close_time: None,
            provider_id: ProviderId::new(404),
            delivery_period_id: None,
        });

    assert!(matches!(result, Err(PersistenceError::ReferenceViolation(_))));
}

#[test]
fn test_locations_for_periods_scoped_and_newest_first() {
    let (mut persistence, provider_id) = create_test_persistence();
    let period: DeliveryPeriod = insert_current_period(&mut persistence);
    let other: DeliveryPeriod = insert_current_period(&mut persistence);
    let first: DeliveryLocation =
        insert_test_location(&mut persistence, "First", provider_id, Some(period.id));
    insert_test_location(&mut persistence, "Other", provider_id, Some(other.id));
    insert_test_location(&mut persistence, "Unscoped", provider_id, None);
    let second: DeliveryLocation =
        insert_test_location(&mut persistence, "Second", provider_id, Some(period.id));

    let locations: Vec<DeliveryLocation> =
        persistence.locations_for_periods(&[period.id]).unwrap();

    assert_eq!(location_ids(&locations), vec![second.id, first.id]);
}

#[test]
fn test_locations_for_several_periods() {
    let (mut persistence, provider_id) = create_test_persistence();
    let a: DeliveryPeriod = insert_current_period(&mut persistence);
    let b: DeliveryPeriod = insert_current_period(&mut persistence);
    insert_test_location(&mut persistence, "A", provider_id, Some(a.id));
    insert_test_location(&mut persistence, "B", provider_id, Some(b.id));

    let locations: Vec<DeliveryLocation> =
        persistence.locations_for_periods(&[a.id, b.id]).unwrap();

    assert_eq!(locations.len(), 2);
}

#[test]
fn test_location_by_id_missing_is_none() {
    let (mut persistence, _) = create_test_persistence();
    assert_eq!(persistence.location_by_id(LocationId::new(404)).unwrap(), None);
}

#[test]
fn test_update_location_fields() {
    let (mut persistence, provider_id) = create_test_persistence();
    let period: DeliveryPeriod = insert_current_period(&mut persistence);
    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, Some(period.id));

    persistence
        .update_location(
            location.id,
            &LocationFieldsPatch {
                name: Some(String::from("Parish Hall")),
                open_time: Some(Some(String::from("09:00"))),
                delivery_period_id: Some(None),
                ..LocationFieldsPatch::default()
            },
        )
        .unwrap();

    let updated: DeliveryLocation = persistence.location_by_id(location.id).unwrap().unwrap();
    assert_eq!(updated.name, "Parish Hall");
    assert_eq!(updated.open_time.as_deref(), Some("09:00"));
    assert_eq!(updated.close_time, None);
    assert_eq!(updated.delivery_period_id, None);
    assert_eq!(updated.created_at, location.created_at);
}

#[test]
fn test_update_missing_location_is_not_found() {
    let (mut persistence, _) = create_test_persistence();

    let result: Result<(), PersistenceError> = persistence.update_location(
        LocationId::new(404),
        &LocationFieldsPatch {
            name: Some(String::from("Nowhere")),
            ..LocationFieldsPatch::default()
        },
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_address_cannot_be_deleted_while_referenced() {
    let (mut persistence, provider_id) = create_test_persistence();
    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, None);

    let result: Result<(), PersistenceError> = persistence.delete_address(location.address.id);

    assert!(matches!(result, Err(PersistenceError::ReferenceViolation(_))));
    assert!(persistence.location_by_id(location.id).unwrap().is_some());
}

#[test]
fn test_delete_location_then_address() {
    let (mut persistence, provider_id) = create_test_persistence();
    let location: DeliveryLocation =
        insert_test_location(&mut persistence, "Church Hall", provider_id, None);

    persistence.delete_location(location.id).unwrap();
    persistence.delete_address(location.address.id).unwrap();

    assert_eq!(persistence.location_by_id(location.id).unwrap(), None);
}

#[test]
fn test_delete_missing_location_is_not_found() {
    let (mut persistence, _) = create_test_persistence();

    let result: Result<(), PersistenceError> = persistence.delete_location(LocationId::new(404));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_insert_location_with_unknown_period_fails() {
    let (mut persistence, provider_id) = create_test_persistence();
    let address: Address = persistence.insert_address(&create_test_address()).unwrap();

    let result: Result<DeliveryLocation, PersistenceError> =
        persistence.insert_location(&NewDeliveryLocation {
            name: String::from("Church Hall"),
            address_id: address.id,
            open_time: None,
            close_time: None,
            provider_id,
            delivery_period_id: Some(PeriodId::new(404)),
        });

    assert!(result.is_err());
}
