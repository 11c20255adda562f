// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod error;

use crate::{AddressFields, LocationDraft, ProviderId};

pub fn create_test_address() -> AddressFields {
    AddressFields::new("1 Main St", "Springfield", "IL", "62701")
}

pub fn create_test_draft() -> LocationDraft {
    LocationDraft::new("Church Hall", create_test_address(), ProviderId::new(1))
}
