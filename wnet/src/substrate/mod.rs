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

//! # Substrate
//!
//! Generic multi-layer network substrate. It stores untyped nodes, links, demands, routes,
//! resources and shared risk groups, each element carrying a bag of string
//! [attributes](attributes::Attributes). The substrate does not interpret any of these elements;
//! the typed view on top of it lives in [`crate::model`].
//!
//! ```rust
//! use wnet::substrate::{Layer, Substrate, RouteHop};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut s = Substrate::new();
//!     let a = s.add_node("A");
//!     let b = s.add_node("B");
//!     let ab = s.add_link(Layer::Wdm, a, b, 0.0)?;
//!     let d = s.add_demand(Layer::Wdm, a, b, 100.0)?;
//!     let r = s.add_route(d, a, vec![RouteHop::Link(ab)], 100.0)?;
//!     assert_eq!(s.route_nodes(r)?, vec![a, b]);
//!
//!     // removing a node removes everything depending on it
//!     s.remove_node(b)?;
//!     assert!(s.route(r).is_err());
//!     assert!(s.link(ab).is_err());
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub(crate) mod graph;
pub(crate) mod types;

pub use attributes::Attributes;
pub use graph::Substrate;
pub use types::{
    DemandData, DemandId, Layer, LayerGraph, LinkData, LinkId, NodeData, NodeId, ResourceData,
    ResourceId, RouteData, RouteHop, RouteId, SrgData, SrgId, SubstrateError,
};
