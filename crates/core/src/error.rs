// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use larder_domain::{DomainError, LocationId};

/// Errors raised by the delivery scheduling core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The persistence gateway rejected a call.
    #[error("Gateway failure: {0}")]
    Gateway(String),
    /// A location required as a prerequisite does not exist.
    #[error("Delivery location {0} not found")]
    LocationNotFound(LocationId),
}

impl CoreError {
    /// Wraps a gateway error, keeping only its message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn gateway<E: std::error::Error>(err: E) -> Self {
        Self::Gateway(err.to_string())
    }
}
