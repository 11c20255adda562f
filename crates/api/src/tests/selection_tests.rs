// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder::{DeliveryGateway, MemoryGateway, Selection};
use larder_domain::{DeliveryLocation, LocationId, PeriodId};

use super::helpers::{create_store_with_locations, create_test_store};
use crate::{ApiError, DeliveryStore};

#[test]
fn test_fetch_selects_first_location_of_period() {
    let (mut store, created) = create_store_with_locations(&["First", "Second"]);

    store.fetch_locations();

    assert_eq!(store.selection().location_id(), Some(created[1].id));
    assert_eq!(
        store.selected_location().map(|location| location.id),
        Some(created[1].id)
    );
}

#[test]
fn test_vanished_location_falls_back_to_first() {
    let (mut store, created) = create_store_with_locations(&["First", "Second", "Third"]);
    store.select_location(Some(created[0].id));
    store.fetch_locations();
    assert_eq!(store.selection().location_id(), Some(created[0].id));

    store.gateway_mut().delete_location(created[0].id).unwrap();
    store.fetch_locations();

    assert_eq!(store.selection().location_id(), Some(created[2].id));
}

#[test]
fn test_last_vanished_location_clears_selection() {
    let (mut store, created) = create_store_with_locations(&["Only"]);
    store.fetch_locations();

    store.gateway_mut().delete_location(created[0].id).unwrap();
    store.fetch_locations();

    assert_eq!(store.selection().location_id(), None);
    assert!(store.selection().period_id().is_some());
}

#[test]
fn test_select_loaded_period() {
    let (mut store, created) = create_store_with_locations(&["First", "Second"]);
    let period_id: PeriodId = store.delivery_periods()[0].id;
    store.select_location(None);

    store.select_delivery_period(period_id);

    assert!(store.error().is_none());
    assert_eq!(store.selection().period_id(), Some(period_id));
    assert_eq!(store.selection().location_id(), Some(created[1].id));
    assert_eq!(
        store.selected_period().map(|period| period.id),
        Some(period_id)
    );
}

#[test]
fn test_select_unknown_period_keeps_selection() {
    let mut store: DeliveryStore<MemoryGateway> = create_test_store();
    store.fetch_locations();
    let before: Selection = store.selection();

    store.select_delivery_period(PeriodId::new(999));

    assert_eq!(store.selection(), before);
    assert!(matches!(
        store.error(),
        Some(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Delivery period"
    ));
}

#[test]
fn test_select_previously_loaded_period() {
    let mut store: DeliveryStore<MemoryGateway> = create_test_store();
    store.fetch_locations();
    let old_period: PeriodId = store.delivery_periods()[0].id;
    store.gateway_mut().retire_period(old_period);
    store.fetch_locations();
    assert_ne!(store.delivery_periods()[0].id, old_period);

    store.select_delivery_period(old_period);

    assert!(store.error().is_none());
    assert_eq!(store.selection().period_id(), Some(old_period));
    assert_eq!(store.selection().location_id(), None);
    assert_eq!(
        store.selected_period().map(|period| period.id),
        Some(old_period)
    );
}

#[test]
fn test_select_location_is_not_validated() {
    let mut store: DeliveryStore<MemoryGateway> = create_test_store();
    store.fetch_locations();

    store.select_location(Some(LocationId::new(404)));

    assert_eq!(store.selection().location_id(), Some(LocationId::new(404)));
    assert!(store.selected_location().is_none());
}

#[test]
fn test_locations_for_selected_period() {
    let (store, created) = create_store_with_locations(&["First", "Second"]);

    let scoped: Vec<&DeliveryLocation> = store.locations_for_selected_period();

    let ids: Vec<LocationId> = scoped.iter().map(|location| location.id).collect();
    assert_eq!(ids, vec![created[1].id, created[0].id]);
}

#[test]
fn test_nothing_selected_before_fetch() {
    let store: DeliveryStore<MemoryGateway> = create_test_store();

    assert_eq!(store.selection().period_id(), None);
    assert!(store.locations_for_selected_period().is_empty());
    assert!(store.selected_period().is_none());
}
