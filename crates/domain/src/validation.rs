// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AddressFields, AddressPatch, LocationDraft, LocationPatch};

/// Validates a required, non-blank address field.
fn require_field(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidAddress {
            field,
            reason: String::from("Field cannot be empty"),
        });
    }
    Ok(())
}

fn validate_latitude(latitude: Option<f64>) -> Result<(), DomainError> {
    match latitude {
        Some(value) if !(-90.0..=90.0).contains(&value) => Err(DomainError::InvalidCoordinate {
            field: "latitude",
            value,
        }),
        _ => Ok(()),
    }
}

fn validate_longitude(longitude: Option<f64>) -> Result<(), DomainError> {
    match longitude {
        Some(value) if !(-180.0..=180.0).contains(&value) => {
            Err(DomainError::InvalidCoordinate {
                field: "longitude",
                value,
            })
        }
        _ => Ok(()),
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Location name cannot be empty",
        )));
    }
    Ok(())
}

fn validate_time_of_day(field: &'static str, value: Option<&str>) -> Result<(), DomainError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(DomainError::InvalidTimeOfDay { field }),
        _ => Ok(()),
    }
}

/// Validates a complete set of address fields.
///
/// # Errors
///
/// Returns an error if:
/// - The street line, city, state, or zip is empty
/// - A coordinate is outside its valid range
pub fn validate_address_fields(fields: &AddressFields) -> Result<(), DomainError> {
    require_field("address", &fields.address)?;
    require_field("city", &fields.city)?;
    require_field("state", &fields.state)?;
    require_field("zip", &fields.zip)?;
    validate_latitude(fields.latitude)?;
    validate_longitude(fields.longitude)?;
    Ok(())
}

/// Validates the fields an address patch would write.
///
/// Only present fields are checked; a required field may not be blanked.
///
/// # Errors
///
/// Returns an error if a present required field is empty or a present
/// coordinate is out of range.
pub fn validate_address_patch(patch: &AddressPatch) -> Result<(), DomainError> {
    if let Some(address) = &patch.address {
        require_field("address", address)?;
    }
    if let Some(city) = &patch.city {
        require_field("city", city)?;
    }
    if let Some(state) = &patch.state {
        require_field("state", state)?;
    }
    if let Some(zip) = &patch.zip {
        require_field("zip", zip)?;
    }
    if let Some(latitude) = patch.latitude {
        validate_latitude(latitude)?;
    }
    if let Some(longitude) = patch.longitude {
        validate_longitude(longitude)?;
    }
    Ok(())
}

/// Validates a location draft before anything is written.
///
/// # Errors
///
/// Returns an error if the name is empty, an opening/closing time is blank,
/// or the address is invalid.
pub fn validate_location_draft(draft: &LocationDraft) -> Result<(), DomainError> {
    validate_name(&draft.name)?;
    validate_time_of_day("open_time", draft.open_time.as_deref())?;
    validate_time_of_day("close_time", draft.close_time.as_deref())?;
    validate_address_fields(&draft.address)
}

/// Validates a location patch before anything is written.
///
/// # Errors
///
/// Returns an error if a present field would violate the same rules as
/// `validate_location_draft`.
pub fn validate_location_patch(patch: &LocationPatch) -> Result<(), DomainError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(open_time) = &patch.open_time {
        validate_time_of_day("open_time", open_time.as_deref())?;
    }
    if let Some(close_time) = &patch.close_time {
        validate_time_of_day("close_time", close_time.as_deref())?;
    }
    if let Some(address) = &patch.address {
        validate_address_patch(address)?;
    }
    Ok(())
}
