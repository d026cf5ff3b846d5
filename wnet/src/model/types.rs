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

//! Module containing the error types and reserved names of the typed model

use crate::model::kind::ElementKind;
use crate::substrate::{NodeId, SubstrateError};
use thiserror::Error;

/// Character separating list entries inside attributes. It is therefore not allowed in node
/// names or VNF types.
pub const LIST_SEPARATOR: char = '#';

/// Tag of the virtual node acting as the common origin of all service chain requests
pub(crate) const TAG_ANYCAST_ORIGIN: &str = "#AnycastOrigin";
/// Tag of the virtual node acting as the common destination of all service chain requests
pub(crate) const TAG_ANYCAST_DESTINATION: &str = "#AnycastDestination";

/// Errors of the typed network model
#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    /// Malformed or colliding input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The attributes or resources stored in the substrate are corrupted
    #[error("Format error: {0}")]
    FormatError(String),
    /// A dependent element that must exist was not found
    #[error("Unexpected state: {0}")]
    UnexpectedState(String),
    /// The id does not refer to a regular node of the network
    #[error("Not a regular node of the network: {0:?}")]
    NotARegularNode(NodeId),
    /// An element of the substrate has a different kind than expected
    #[error("Element kind mismatch: expected {expected:?}, found {found:?}")]
    WrongKind {
        /// Kind which was expected
        expected: ElementKind,
        /// Kind which was found (`None` if the element is untyped)
        found: Option<ElementKind>,
    },
    /// Error propagated from the substrate
    #[error("Substrate Error: {0}")]
    SubstrateError(#[from] SubstrateError),
}

/// Violation of a cross-layer invariant of a node. Such an error signals a defect in the code
/// that mutated the network, it cannot be handled at runtime.
#[derive(Error, Debug, PartialEq)]
pub enum ConsistencyError {
    /// An element listed as incoming does not end at the node
    #[error("{kind:?} {element} is incoming to {node:?}, but does not end there")]
    IncomingEndpoint {
        /// Node that was checked
        node: NodeId,
        /// Kind of the element
        kind: ElementKind,
        /// The offending element
        element: String,
    },
    /// An element listed as outgoing does not start at the node
    #[error("{kind:?} {element} is outgoing from {node:?}, but does not start there")]
    OutgoingEndpoint {
        /// Node that was checked
        node: NodeId,
        /// Kind of the element
        kind: ElementKind,
        /// The offending element
        element: String,
    },
    /// An element listed as traversing the node does not traverse it
    #[error("{kind:?} {element} is associated to {node:?}, but does not traverse it")]
    NotTraversed {
        /// Node that was checked
        node: NodeId,
        /// Kind of the element
        kind: ElementKind,
        /// The offending element
        element: String,
    },
    /// A service chain request is listed at a node which is not one of its candidate end points
    #[error("Service chain request {element} is listed at {node:?}, but {node:?} is no candidate")]
    ServiceChainRequestCandidate {
        /// Node that was checked
        node: NodeId,
        /// The offending request
        element: String,
    },
    /// The neighbor relation via incoming and outgoing fibers is not symmetric
    #[error("Neighbor relation between {node:?} and {neighbor:?} is not mutual")]
    NeighborNotMutual {
        /// Node that was checked
        node: NodeId,
        /// The neighbor which does not list the node
        neighbor: NodeId,
    },
    /// A VNF instance listed at the node is hosted elsewhere
    #[error("VNF instance {element} is listed at {node:?}, but hosted elsewhere")]
    VnfHost {
        /// Node that was checked
        node: NodeId,
        /// The offending VNF instance
        element: String,
    },
    /// Two regular nodes share the same name
    #[error("Node name {0} is used by multiple nodes")]
    DuplicateName(String),
    /// The relationship could not be derived at all
    #[error("Cannot derive the relationships: {0}")]
    Model(String),
}

impl From<ModelError> for ConsistencyError {
    fn from(cause: ModelError) -> Self {
        Self::Model(cause.to_string())
    }
}
