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

//! Module containing all type definitions of the substrate

use crate::substrate::attributes::Attributes;
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

type IndexType = u32;
/// Node Identification (and index into the graph)
pub type NodeId = NodeIndex<IndexType>;
/// Link Identification (and index into the graph)
pub type LinkId = EdgeIndex<IndexType>;
/// Demand Identification
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct DemandId(pub u32);
/// Route Identification
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct RouteId(pub u32);
/// Resource Identification
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ResourceId(pub u32);
/// Shared Risk Group Identification
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct SrgId(pub u32);

/// Multi-layer graph. Every edge is labelled with the layer it belongs to.
pub type LayerGraph = StableGraph<(), Layer, Directed, IndexType>;

/// Network layer of a link, demand or route.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Layer {
    /// Optical (WDM) layer, carrying fibers, lightpaths and lightpath requests
    Wdm,
    /// IP layer, carrying IP links, service chains, unicast demands and tunnels
    Ip,
}

/// Node stored in the substrate
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Name of the node
    pub name: String,
    /// `(x, y)` position
    pub position: (f64, f64),
    /// Population of the node
    pub population: f64,
    /// Failure state: `false` means the node has failed
    pub up: bool,
    /// Free-form tags
    pub tags: BTreeSet<String>,
    /// Attribute bag
    pub attributes: Attributes,
}

/// Link stored in the substrate
#[derive(Debug, Clone)]
pub struct LinkData {
    /// Layer of the link
    pub layer: Layer,
    /// Origin node
    pub origin: NodeId,
    /// Destination node
    pub destination: NodeId,
    /// Capacity of the link (the unit depends on the layer)
    pub capacity: f64,
    /// Failure state of the link itself. The link is only usable if both end nodes are up as
    /// well.
    pub up: bool,
    /// Link in opposite direction, if the link is declared bidirectional
    pub bidirectional_pair: Option<LinkId>,
    /// Attribute bag
    pub attributes: Attributes,
}

/// Demand stored in the substrate
#[derive(Debug, Clone)]
pub struct DemandData {
    /// Layer of the demand
    pub layer: Layer,
    /// Origin node
    pub origin: NodeId,
    /// Destination node
    pub destination: NodeId,
    /// Offered traffic
    pub offered: f64,
    /// Link of an upper layer whose capacity is provided by this demand
    pub coupled_link: Option<LinkId>,
    /// Attribute bag
    pub attributes: Attributes,
}

/// Single hop of a route. Routes on the IP layer may traverse resources (like VNF instances)
/// in between links.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum RouteHop {
    /// Traverse a link
    Link(LinkId),
    /// Traverse a resource, hosted at the node where the route currently is
    Resource(ResourceId),
}

/// Route stored in the substrate
#[derive(Debug, Clone)]
pub struct RouteData {
    /// Layer of the route
    pub layer: Layer,
    /// Demand carried by the route
    pub demand: DemandId,
    /// First node of the route
    pub ingress: NodeId,
    /// Last node of the route
    pub egress: NodeId,
    /// Sequence of traversed links and resources
    pub path: Vec<RouteHop>,
    /// Currently carried traffic
    pub carried: f64,
    /// Attribute bag
    pub attributes: Attributes,
}

/// Resource stored in the substrate
#[derive(Debug, Clone)]
pub struct ResourceData {
    /// Type of the resource
    pub resource_type: String,
    /// Name of the resource
    pub name: String,
    /// Node hosting the resource
    pub host: NodeId,
    /// Capacity of the resource
    pub capacity: f64,
    /// Capacity occupied in other (base) resources of the same host
    pub base_occupation: BTreeMap<ResourceId, f64>,
    /// Attribute bag
    pub attributes: Attributes,
}

/// Shared risk group stored in the substrate
#[derive(Debug, Clone, Default)]
pub struct SrgData {
    /// Nodes failing together
    pub nodes: BTreeSet<NodeId>,
    /// Links failing together
    pub links: BTreeSet<LinkId>,
}

/// Substrate Errors
#[derive(Error, Debug, PartialEq)]
pub enum SubstrateError {
    /// Node is not present in the substrate
    #[error("Node was not found in the substrate: {0:?}")]
    NodeNotFound(NodeId),
    /// Link is not present in the substrate
    #[error("Link was not found in the substrate: {0:?}")]
    LinkNotFound(LinkId),
    /// Demand is not present in the substrate
    #[error("Demand was not found in the substrate: {0:?}")]
    DemandNotFound(DemandId),
    /// Route is not present in the substrate
    #[error("Route was not found in the substrate: {0:?}")]
    RouteNotFound(RouteId),
    /// Resource is not present in the substrate
    #[error("Resource was not found in the substrate: {0:?}")]
    ResourceNotFound(ResourceId),
    /// SRG is not present in the substrate
    #[error("Shared risk group was not found in the substrate: {0:?}")]
    SrgNotFound(SrgId),
    /// Two links cannot be paired, because they are not opposite to each other
    #[error("Links {0:?} and {1:?} are not in opposite direction")]
    NotOppositeLinks(LinkId, LinkId),
    /// Layer of an element does not match the expected one
    #[error("Element is on layer {found:?}, but layer {expected:?} was expected")]
    LayerMismatch {
        /// Layer which was expected
        expected: Layer,
        /// Layer which was found
        found: Layer,
    },
    /// The hops of a route do not form a continuous path
    #[error("Route is not continuous at hop {0}")]
    DiscontinuousRoute(usize),
    /// Base resource is not hosted at the same node
    #[error("Base resource {0:?} is hosted at a different node")]
    ForeignBaseResource(ResourceId),
}
