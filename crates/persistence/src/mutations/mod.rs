// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes.
//!
//! Each function is one statement or, where noted, one short transaction.
//! Multi-row workflows such as "create an address, then its location" are
//! sequenced by the caller.

pub mod addresses;
pub mod collaborators;
pub mod locations;
pub mod periods;
pub mod sites;
