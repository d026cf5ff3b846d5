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

//! # Topology Zoo
//!
//! Import of topologies downloaded from [TopologyZoo](http://www.topology-zoo.org/dataset.html)
//! (as `GML` files). Every GML node becomes a regular node placed at `(longitude, latitude)`, and
//! every GML edge becomes a pair of fibers in opposite directions, declared as bidirectional pair.
//!
//! ```rust
//! use wnet::model::OpticalSwitchType;
//! use wnet::topology_zoo;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = format!("{}/test_files/abilene.gml", env!("CARGO_MANIFEST_DIR"));
//!     let net = topology_zoo::from_gml(path, OpticalSwitchType::Roadm)?;
//!     assert_eq!(net.nodes().len(), 11);
//!     assert_eq!(net.fibers().len(), 28);
//!     Ok(())
//! }
//! ```

mod error;
mod gml_parser;

pub use error::TopologyZooError;
pub use gml_parser::{parse_gml_graph, parse_gml_str, GmlError, GmlGraph, GmlNode};

use crate::model::{OpticalSwitchType, WNet};
use crate::substrate::NodeId;

use log::*;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Build the network from a parsed GML graph. All nodes use the given switching architecture.
pub fn build_network(
    graph: &GmlGraph,
    switch_type: OpticalSwitchType,
) -> Result<WNet, TopologyZooError> {
    if graph.node_count() == 0 {
        return Err(TopologyZooError::EmptyTopology);
    }
    let mut net = WNet::new();
    let mut lookup: HashMap<petgraph::graph::NodeIndex<u32>, NodeId> = HashMap::new();
    for idx in graph.node_indices() {
        let node = &graph[idx];
        let id = net.add_node(node.name.clone(), (node.longitude, node.latitude))?;
        net.node_mut(id)?.set_switch_type(switch_type);
        lookup.insert(idx, id);
    }
    for edge in graph.edge_references() {
        // all node indices were inserted above
        if let (Some(a), Some(b)) = (lookup.get(&edge.source()), lookup.get(&edge.target())) {
            net.add_fiber(*a, *b, true)?;
        }
    }
    info!(
        "Built network with {} nodes and {} fibers ({})",
        net.nodes().len(),
        net.fibers().len(),
        switch_type
    );
    Ok(net)
}

/// Parse the GML file and build the network. See [`build_network`].
pub fn from_gml(
    filename: impl AsRef<str>,
    switch_type: OpticalSwitchType,
) -> Result<WNet, TopologyZooError> {
    build_network(&parse_gml_graph(filename)?, switch_type)
}
