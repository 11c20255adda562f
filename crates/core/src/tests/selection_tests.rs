// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder_domain::{DeliveryLocation, DeliveryPeriod, LocationId, PeriodId};
use time::macros::datetime;

use super::helpers::{create_test_location, gateway_with_period};
use crate::{DeliveryGateway, MemoryGateway, NewDeliveryPeriod, Selection};

fn insert_period(gateway: &mut MemoryGateway) -> DeliveryPeriod {
    gateway
        .insert_period(&NewDeliveryPeriod {
            start: datetime!(2026-03-01 00:00 UTC),
            end: datetime!(2026-03-08 00:00 UTC),
            title: None,
            is_current: true,
        })
        .unwrap()
}

#[test]
fn test_new_selection_is_empty() {
    let selection: Selection = Selection::new();

    assert_eq!(selection.period_id(), None);
    assert_eq!(selection.location_id(), None);
    assert_eq!(selection, Selection::default());
}

#[test]
fn test_reconcile_selects_first_period_and_its_first_location() {
    let (mut gateway, period) = gateway_with_period();
    let location: DeliveryLocation = create_test_location(&mut gateway, "Church Hall", period.id);
    let mut selection: Selection = Selection::new();

    selection.reconcile(&[period.clone()], &[location.clone()]);

    assert_eq!(selection.period_id(), Some(period.id));
    assert_eq!(selection.location_id(), Some(location.id));
}

#[test]
fn test_reconcile_with_nothing_loaded_clears_selection() {
    let mut selection: Selection = Selection::new();
    selection.select_location(Some(LocationId::new(3)));

    selection.reconcile(&[], &[]);

    assert_eq!(selection.period_id(), None);
    assert_eq!(selection.location_id(), None);
}

#[test]
fn test_reconcile_keeps_present_selection() {
    let (mut gateway, first) = gateway_with_period();
    let second: DeliveryPeriod = insert_period(&mut gateway);
    let a: DeliveryLocation = create_test_location(&mut gateway, "A", first.id);
    let b: DeliveryLocation = create_test_location(&mut gateway, "B", second.id);
    let periods: Vec<DeliveryPeriod> = vec![first, second.clone()];
    let locations: Vec<DeliveryLocation> = vec![a, b.clone()];

    let mut selection: Selection = Selection::new();
    assert!(selection.select_period(second.id, &periods, &[], &locations));
    selection.reconcile(&periods, &locations);

    assert_eq!(selection.period_id(), Some(second.id));
    assert_eq!(selection.location_id(), Some(b.id));
}

#[test]
fn test_reconcile_replaces_vanished_location() {
    let (mut gateway, period) = gateway_with_period();
    let kept: DeliveryLocation = create_test_location(&mut gateway, "Kept", period.id);
    let mut selection: Selection = Selection::new();
    selection.select_location(Some(LocationId::new(404)));

    selection.reconcile(&[period], &[kept.clone()]);

    assert_eq!(selection.location_id(), Some(kept.id));
}

#[test]
fn test_select_period_resets_location_to_first_of_period() {
    let (mut gateway, first) = gateway_with_period();
    let second: DeliveryPeriod = insert_period(&mut gateway);
    let a: DeliveryLocation = create_test_location(&mut gateway, "A", first.id);
    let b: DeliveryLocation = create_test_location(&mut gateway, "B", second.id);
    let periods: Vec<DeliveryPeriod> = vec![first.clone(), second];
    let locations: Vec<DeliveryLocation> = vec![b, a.clone()];
    let mut selection: Selection = Selection::new();
    selection.reconcile(&periods, &locations);

    assert!(selection.select_period(first.id, &periods, &[], &locations));

    assert_eq!(selection.period_id(), Some(first.id));
    assert_eq!(selection.location_id(), Some(a.id));
}

#[test]
fn test_select_period_without_locations_clears_location() {
    let (mut gateway, first) = gateway_with_period();
    let second: DeliveryPeriod = insert_period(&mut gateway);
    let a: DeliveryLocation = create_test_location(&mut gateway, "A", first.id);
    let periods: Vec<DeliveryPeriod> = vec![first, second.clone()];
    let locations: Vec<DeliveryLocation> = vec![a];
    let mut selection: Selection = Selection::new();
    selection.reconcile(&periods, &locations);

    assert!(selection.select_period(second.id, &periods, &[], &locations));

    assert_eq!(selection.period_id(), Some(second.id));
    assert_eq!(selection.location_id(), None);
}

#[test]
fn test_select_period_falls_back_to_known_periods() {
    let (_gateway, period) = gateway_with_period();
    let mut selection: Selection = Selection::new();

    assert!(selection.select_period(period.id, &[], &[period.clone()], &[]));

    assert_eq!(selection.period_id(), Some(period.id));
}

#[test]
fn test_select_unknown_period_is_a_no_op() {
    let (mut gateway, period) = gateway_with_period();
    let location: DeliveryLocation = create_test_location(&mut gateway, "A", period.id);
    let mut selection: Selection = Selection::new();
    selection.reconcile(&[period.clone()], &[location.clone()]);
    let before: Selection = selection;

    assert!(!selection.select_period(
        PeriodId::new(404),
        &[period],
        &[],
        &[location]
    ));

    assert_eq!(selection, before);
}

#[test]
fn test_select_location_is_unvalidated() {
    let mut selection: Selection = Selection::new();

    selection.select_location(Some(LocationId::new(404)));
    assert_eq!(selection.location_id(), Some(LocationId::new(404)));

    selection.select_location(None);
    assert_eq!(selection.location_id(), None);
}
