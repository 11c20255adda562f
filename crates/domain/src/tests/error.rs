// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");

    let err: DomainError = DomainError::InvalidAddress {
        field: "city",
        reason: String::from("Field cannot be empty"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid address field 'city': Field cannot be empty"
    );

    let err: DomainError = DomainError::InvalidCoordinate {
        field: "latitude",
        value: 91.5,
    };
    assert_eq!(format!("{err}"), "Invalid latitude: 91.5 is out of range");

    let err: DomainError = DomainError::InvalidTimeOfDay { field: "open_time" };
    assert_eq!(format!("{err}"), "Invalid open_time: value cannot be blank");

    let err: DomainError = DomainError::InvalidPeriodWindow {
        reason: String::from("bad"),
    };
    assert_eq!(format!("{err}"), "Invalid delivery period window: bad");

    let err: DomainError = DomainError::DateArithmeticOverflow {
        operation: String::from("padding"),
    };
    assert_eq!(format!("{err}"), "Date arithmetic overflow while padding");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidName(String::from("x")));
    assert_eq!(err.to_string(), "Invalid name: x");
}
