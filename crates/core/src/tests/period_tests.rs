// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono_tz::Tz;
use larder_domain::DeliveryPeriod;
use time::macros::datetime;

use super::helpers::NOW;
use crate::{
    CoreError, DeliveryGateway, GatewayOp, MemoryGateway, NewDeliveryPeriod,
    resolve_current_periods,
};

#[test]
fn test_resolve_creates_period_when_none_exist() {
    let mut gateway: MemoryGateway = MemoryGateway::new();

    let periods: Vec<DeliveryPeriod> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();

    assert_eq!(periods.len(), 1);
    assert_eq!(gateway.period_count(), 1);
    let period: &DeliveryPeriod = &periods[0];
    assert!(period.is_current);
    assert_eq!(period.title.as_deref(), Some("Week of March 1, 2026"));
    assert_eq!(period.start, datetime!(2026-02-28 23:59 UTC));
    assert_eq!(period.end, datetime!(2026-03-08 00:00:59.999 UTC));
    assert!(period.contains(NOW));
}

#[test]
fn test_resolve_uses_declared_timezone() {
    let mut gateway: MemoryGateway = MemoryGateway::new();

    let periods: Vec<DeliveryPeriod> =
        resolve_current_periods(&mut gateway, NOW, Tz::America__Chicago).unwrap();

    // Sunday 00:00 CST is 06:00 UTC.
    assert_eq!(periods[0].start, datetime!(2026-03-01 05:59 UTC));
}

#[test]
fn test_resolve_is_idempotent() {
    let mut gateway: MemoryGateway = MemoryGateway::new();

    let first: Vec<DeliveryPeriod> = resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();
    let second: Vec<DeliveryPeriod> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();

    assert_eq!(first, second);
    assert_eq!(gateway.period_count(), 1);
}

#[test]
fn test_resolve_does_not_write_when_periods_exist() {
    let mut gateway: MemoryGateway = MemoryGateway::new();
    resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();
    gateway.clear_calls();

    resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();

    assert_eq!(gateway.calls(), &[GatewayOp::CurrentPeriods]);
}

#[test]
fn test_resolve_returns_every_current_period_newest_first() {
    let mut gateway: MemoryGateway = MemoryGateway::new();
    let template: NewDeliveryPeriod = NewDeliveryPeriod {
        start: datetime!(2026-03-01 00:00 UTC),
        end: datetime!(2026-03-08 00:00 UTC),
        title: None,
        is_current: true,
    };
    let older: DeliveryPeriod = gateway.insert_period(&template).unwrap();
    let newer: DeliveryPeriod = gateway.insert_period(&template).unwrap();

    let periods: Vec<DeliveryPeriod> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();

    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].id, newer.id);
    assert_eq!(periods[1].id, older.id);
    assert_eq!(gateway.period_count(), 2);
}

#[test]
fn test_resolve_ignores_retired_periods() {
    let mut gateway: MemoryGateway = MemoryGateway::new();
    let first: Vec<DeliveryPeriod> = resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();
    gateway.retire_period(first[0].id);

    let second: Vec<DeliveryPeriod> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC).unwrap();

    assert_eq!(second.len(), 1);
    assert_ne!(second[0].id, first[0].id);
    assert_eq!(gateway.period_count(), 2);
}

#[test]
fn test_resolve_propagates_query_failure() {
    let mut gateway: MemoryGateway = MemoryGateway::new();
    gateway.inject_failure(GatewayOp::CurrentPeriods);

    let result: Result<Vec<DeliveryPeriod>, CoreError> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC);

    assert!(matches!(result, Err(CoreError::Gateway(_))));
    assert_eq!(gateway.period_count(), 0);
}

#[test]
fn test_resolve_propagates_insert_failure() {
    let mut gateway: MemoryGateway = MemoryGateway::new();
    gateway.inject_failure(GatewayOp::InsertPeriod);

    let result: Result<Vec<DeliveryPeriod>, CoreError> =
        resolve_current_periods(&mut gateway, NOW, Tz::UTC);

    assert!(matches!(result, Err(CoreError::Gateway(_))));
}
