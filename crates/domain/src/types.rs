// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Declares an opaque, database-assigned identifier.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of an `Address` row.
    AddressId
);
id_type!(
    /// Identifier of a `DeliveryPeriod` row.
    PeriodId
);
id_type!(
    /// Identifier of a `DeliveryLocation` row.
    LocationId
);
id_type!(
    /// Identifier of a site/location association row.
    LinkId
);
id_type!(
    /// Identifier of a `Site`.
    SiteId
);
id_type!(
    /// Identifier of a `SiteType`.
    SiteTypeId
);
id_type!(
    /// Identifier of the provider fulfilling deliveries to a location.
    ProviderId
);

/// Deserializes a field that distinguishes "absent" from "explicitly null".
///
/// Used together with `#[serde(default)]`: a missing key stays `None`,
/// `null` becomes `Some(None)`, and a value becomes `Some(Some(value))`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The writable fields of a physical address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressFields {
    /// Optional display name for the address.
    #[serde(default)]
    pub name: Option<String>,
    /// Street line.
    pub address: String,
    /// Optional second street line.
    #[serde(default)]
    pub address1: Option<String>,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Latitude, `None` until geocoded.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude, `None` until geocoded.
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl AddressFields {
    /// Creates address fields from the required street/city/state/zip values.
    #[must_use]
    pub fn new(address: &str, city: &str, state: &str, zip: &str) -> Self {
        Self {
            name: None,
            address: address.to_string(),
            address1: None,
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
            latitude: None,
            longitude: None,
        }
    }

    /// Sets the geocoded coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// A persisted address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// The address identifier.
    pub id: AddressId,
    /// The address fields.
    #[serde(flatten)]
    pub fields: AddressFields,
}

/// A partial update to an address.
///
/// Nullable fields use a double option: `None` leaves the column untouched,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressPatch {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub address1: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<Option<f64>>,
}

impl AddressPatch {
    /// Returns `true` when the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.address1.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// Applies the patch to a set of address fields.
    pub fn apply_to(&self, fields: &mut AddressFields) {
        if let Some(name) = &self.name {
            fields.name.clone_from(name);
        }
        if let Some(address) = &self.address {
            fields.address.clone_from(address);
        }
        if let Some(address1) = &self.address1 {
            fields.address1.clone_from(address1);
        }
        if let Some(city) = &self.city {
            fields.city.clone_from(city);
        }
        if let Some(state) = &self.state {
            fields.state.clone_from(state);
        }
        if let Some(zip) = &self.zip {
            fields.zip.clone_from(zip);
        }
        if let Some(latitude) = self.latitude {
            fields.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            fields.longitude = longitude;
        }
    }
}

impl From<AddressFields> for AddressPatch {
    fn from(fields: AddressFields) -> Self {
        Self {
            name: Some(fields.name),
            address: Some(fields.address),
            address1: Some(fields.address1),
            city: Some(fields.city),
            state: Some(fields.state),
            zip: Some(fields.zip),
            latitude: Some(fields.latitude),
            longitude: Some(fields.longitude),
        }
    }
}

/// A calendar window used to scope which delivery locations are orderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPeriod {
    /// The period identifier.
    pub id: PeriodId,
    /// Start of the window.
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    /// End of the window.
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    /// Optional human-readable title, e.g. `Week of March 1, 2026`.
    pub title: Option<String>,
    /// When the period row was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Whether the period is flagged as current.
    pub is_current: bool,
}

impl DeliveryPeriod {
    /// Returns whether `instant` falls inside the window (bounds inclusive).
    #[must_use]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// The kind of a site, e.g. "Fire Station".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteType {
    pub id: SiteTypeId,
    pub name: String,
}

/// A physical place whose users may place orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// The site identifier.
    pub id: SiteId,
    /// Display name.
    pub name: String,
    /// The site's type, when one is assigned.
    pub site_type: Option<SiteType>,
    /// The site's address, when one is recorded.
    pub address: Option<Address>,
}

/// An association between a site and a delivery location.
///
/// No uniqueness is enforced on `(site_id, delivery_location_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDeliveryLocationLink {
    pub id: LinkId,
    pub site_id: SiteId,
    pub delivery_location_id: LocationId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A place where orders may be delivered during a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    /// The location identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// The address owned by this location.
    pub address: Address,
    /// Optional opening time, free-form (e.g. `11:00`).
    pub open_time: Option<String>,
    /// Optional closing time, free-form (e.g. `14:00`).
    pub close_time: Option<String>,
    /// The provider fulfilling deliveries here.
    pub provider_id: ProviderId,
    /// The owning delivery period, if any.
    pub delivery_period_id: Option<PeriodId>,
    /// When the location row was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Sites linked to this location through the association table.
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// Input for creating a delivery location together with its address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDraft {
    pub name: String,
    pub address: AddressFields,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    pub provider_id: ProviderId,
    /// Explicit period; when absent the currently selected period is used.
    #[serde(default)]
    pub delivery_period_id: Option<PeriodId>,
}

impl LocationDraft {
    /// Creates a draft with no opening hours and no explicit period.
    #[must_use]
    pub fn new(name: &str, address: AddressFields, provider_id: ProviderId) -> Self {
        Self {
            name: name.to_string(),
            address,
            open_time: None,
            close_time: None,
            provider_id,
            delivery_period_id: None,
        }
    }
}

/// A partial update to a delivery location and, optionally, its address.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressPatch>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub open_time: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub close_time: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<ProviderId>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_period_id: Option<Option<PeriodId>>,
}

impl LocationPatch {
    /// Returns `true` when none of the location's own columns are touched.
    #[must_use]
    pub const fn location_fields_empty(&self) -> bool {
        self.name.is_none()
            && self.open_time.is_none()
            && self.close_time.is_none()
            && self.provider_id.is_none()
            && self.delivery_period_id.is_none()
    }

    /// Returns the address patch, if it changes anything.
    #[must_use]
    pub fn address_changes(&self) -> Option<&AddressPatch> {
        self.address.as_ref().filter(|patch| !patch.is_empty())
    }
}
