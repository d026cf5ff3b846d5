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

#![deny(missing_docs, missing_debug_implementations)]

//! # Typed IP-over-WDM model
//!
//! Typed view on top of the generic [substrate](crate::substrate). Links, demands, routes and
//! resources of the substrate are interpreted as fibers, IP links, lightpaths, service chains,
//! VNF instances and so on, depending on the [kind](kind::ElementKind) stored in their
//! attributes. The main structure is the [`WNet`], which hands out views on the individual
//! [nodes](node::WNode).
//!
//! Each node has
//!
//! - a switching architecture ([`OpticalSwitchType`]), deciding on which fibers a channel ends up
//!   when it is added, dropped or expressed at the node,
//! - a resource ledger ([`ResourceKind`]) with the CPU, RAM and HD capacity available to VNF
//!   instances,
//! - an up/down state. Changing it [cascades](cascade) to every lightpath request with a
//!   lightpath on a fiber incident to the node,
//! - and a set of cross-layer [invariants](consistency).
//!
//! ## Example usage
//!
//! The following example builds a chain of three nodes `A`, `B` and `C` connected by
//! bidirectional fibers. A lightpath from `A` to `C` provides the capacity of the IP link between
//! `A` and `C`. When `B` fails, the IP link loses its capacity.
//!
//! ```rust
//! use wnet::model::{WNet, OpticalSwitchType, ResourceKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut net = WNet::new();
//!     let a = net.add_node("A", (0.0, 0.0))?;
//!     let b = net.add_node("B", (1.0, 0.0))?;
//!     let c = net.add_node("C", (2.0, 0.0))?;
//!     let (ab, _) = net.add_fiber(a, b, true)?;
//!     let (bc, _) = net.add_fiber(b, c, true)?;
//!
//!     let (ip, _) = net.add_ip_link(a, c, 0.0, false)?;
//!     let lpr = net.add_lightpath_request(a, c, 100.0)?;
//!     net.add_lightpath(lpr, vec![ab, bc])?;
//!     net.couple_lightpath_request(lpr, ip)?;
//!     assert_eq!(ip.capacity_gbps(&net)?, 100.0);
//!
//!     // fail node B
//!     let report = net.node_mut(b)?.set_as_down()?;
//!     assert!(report.affected.contains(&lpr));
//!     assert_eq!(ip.capacity_gbps(&net)?, 0.0);
//!
//!     // nodes start with an empty resource ledger
//!     net.node_mut(a)?.set_capacity(ResourceKind::Cpu, 16.0)?;
//!     assert_eq!(net.node(a)?.capacity(ResourceKind::Cpu), 16.0);
//!     assert_eq!(net.node(c)?.capacity(ResourceKind::Cpu), 0.0);
//!
//!     // a filterless node broadcasts dropped channels to all other fibers
//!     net.node_mut(b)?.set_switch_type(OpticalSwitchType::FilterlessDropAndWasteNotDirectionless);
//!     assert_eq!(net.node(b)?.drop_propagation(ab).into_iter().collect::<Vec<_>>(), vec![bc]);
//!
//!     net.check_consistency()?;
//!     Ok(())
//! }
//! ```

pub mod cascade;
pub mod consistency;
pub mod elements;
pub mod kind;
pub(crate) mod net;
pub mod node;
pub mod node_config;
pub mod printer;
pub(crate) mod resources;
pub mod switching;
pub(crate) mod types;

pub use cascade::{CascadeReport, Reevaluatable};
pub use elements::{
    Endpoints, Fiber, IpLink, IpUnicastDemand, Lightpath, LightpathRequest, MplsTeTunnel,
    ServiceChain, ServiceChainRequest, SharedRiskGroup, VnfInstance,
};
pub use kind::ElementKind;
pub use net::{ServiceChainHop, WNet};
pub use node::{WNode, WNodeMut};
pub use node_config::{NodeConfig, OpticalParams, SwitchingOperation};
pub use resources::ResourceKind;
pub use switching::{FilterlessDropAndWaste, OpticalSwitchType, OpticalSwitchingPolicy, Roadm};
pub use types::{ConsistencyError, ModelError, LIST_SEPARATOR};
