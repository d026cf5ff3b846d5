// WNet: Typed IP-over-WDM Network Model
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing all error types

use crate::model::{ConsistencyError, ModelError};
use crate::substrate::SubstrateError;
use crate::topology_zoo::TopologyZooError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the typed model
    #[error("Model Error: {0}")]
    ModelError(#[from] ModelError),
    /// Error propagated from the substrate
    #[error("Substrate Error: {0}")]
    SubstrateError(#[from] SubstrateError),
    /// A node violates a cross-layer invariant
    #[error("Consistency Error: {0}")]
    ConsistencyError(#[from] ConsistencyError),
    /// Topology Zoo Error
    #[error("Topology Zoo Error: {0}")]
    TopologyZooError(#[from] TopologyZooError),
}
