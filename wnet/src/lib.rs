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

#![deny(missing_docs)]

//! # WNet: Typed IP-over-WDM Network Model
//! This is a library modelling the nodes of a multilayer (IP-over-WDM) network: the optical
//! switching behavior of each node, the computing resources it offers to virtual network
//! functions, the cascade of failures when a node goes down, and the invariants tying the
//! optical and the IP layer together.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Substrate`](substrate)**: Generic multi-layer graph storing untyped nodes, links, demands,
//!   routes, resources and shared risk groups, each carrying string attributes. See the main
//!   structure [`Substrate`](substrate::Substrate).
//!
//! - **[`Model`](model)**: Typed view on the substrate. The main structure is the
//!   [`WNet`](model::WNet), which hands out the read view [`WNode`](model::WNode) and the write
//!   view [`WNodeMut`](model::WNodeMut) of each node. Switching architectures implement
//!   [`OpticalSwitchingPolicy`](model::OpticalSwitchingPolicy), and the failure cascade
//!   re-evaluates every [`Reevaluatable`](model::Reevaluatable) element depending on a node.
//!
//! - **[`TopologyZoo`](topology_zoo)**: Functions to generate a network from a topology
//!   downloaded from [TopologyZoo](http://www.topology-zoo.org/dataset.html) (as `GML` files).
//!
//! ## Usage
//!
//! ```
//! use wnet::model::{OpticalSwitchType, WNet};
//! use wnet::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let mut net = WNet::new();
//!     let a = net.add_node("A", (0.0, 0.0))?;
//!     let b = net.add_node("B", (1.0, 1.0))?;
//!     let (ab, ba) = net.add_fiber(a, b, true)?;
//!
//!     // ROADMs drop channels without leaking them
//!     assert!(net.node(b)?.drop_propagation(ab).is_empty());
//!
//!     // the return fiber is excluded from the broadcast of a filterless node
//!     net.node_mut(b)?.set_switch_type(OpticalSwitchType::FilterlessDropAndWasteNotDirectionless);
//!     assert!(net.node(b)?.drop_propagation(ab).is_empty());
//!     assert_eq!(ba, Some(net.node(b)?.outgoing_fibers().into_iter().next().unwrap()));
//!
//!     net.check_consistency()?;
//!     Ok(())
//! }
//! ```

// test modules
mod test;
pub mod topology_zoo;

mod error;
pub mod model;
pub mod substrate;

pub use error::Error;
