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

//! Module that contains definitions of the import errors

use thiserror::Error;

use super::gml_parser::GmlError;
use crate::model::ModelError;

/// Error for the Topology Zoo import
#[derive(Debug, Error)]
pub enum TopologyZooError {
    /// Gml Parse Error
    #[error("Cannot parse GML file: {0}")]
    GmlParseError(#[from] GmlError),
    /// The network cannot be built from the graph
    #[error("Cannot build the network: {0}")]
    ModelError(#[from] ModelError),
    /// The graph contains no node
    #[error("The topology contains no node")]
    EmptyTopology,
}
