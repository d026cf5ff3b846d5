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

//! # Consistency checker
//!
//! Cross-layer invariants every regular node must satisfy. A violation means that some code
//! mutating the network is broken. [`verify`] reports the first violation it finds, [`check`]
//! additionally fails hard in debug builds.

use crate::model::elements::Endpoints;
use crate::model::kind::ElementKind;
use crate::model::net::WNet;
use crate::model::node::WNode;
use crate::model::printer;
use crate::model::types::ConsistencyError;
use crate::substrate::NodeId;

use log::*;
use std::fmt::Debug;

fn ends_at<T, I>(node: &WNode<'_>, kind: ElementKind, elements: I) -> Result<(), ConsistencyError>
where
    T: Endpoints + Debug,
    I: IntoIterator<Item = T>,
{
    for e in elements {
        if e.b(node.net())? != node.id() {
            return Err(ConsistencyError::IncomingEndpoint {
                node: node.id(),
                kind,
                element: format!("{:?}", e),
            });
        }
    }
    Ok(())
}

fn starts_at<T, I>(node: &WNode<'_>, kind: ElementKind, elements: I) -> Result<(), ConsistencyError>
where
    T: Endpoints + Debug,
    I: IntoIterator<Item = T>,
{
    for e in elements {
        if e.a(node.net())? != node.id() {
            return Err(ConsistencyError::OutgoingEndpoint {
                node: node.id(),
                kind,
                element: format!("{:?}", e),
            });
        }
    }
    Ok(())
}

/// Verify all invariants of the node. A node which is not (or no longer) part of the network
/// is trivially consistent.
pub fn verify(net: &WNet, id: NodeId) -> Result<(), ConsistencyError> {
    let node = match net.node(id) {
        Ok(node) => node,
        Err(_) => return Ok(()),
    };
    let nid = node.id();

    // end points
    ends_at(&node, ElementKind::Fiber, node.incoming_fibers())?;
    starts_at(&node, ElementKind::Fiber, node.outgoing_fibers())?;
    ends_at(&node, ElementKind::IpLink, node.incoming_ip_links())?;
    starts_at(&node, ElementKind::IpLink, node.outgoing_ip_links())?;
    ends_at(&node, ElementKind::MplsTeTunnel, node.incoming_ip_connections())?;
    starts_at(&node, ElementKind::MplsTeTunnel, node.outgoing_ip_connections())?;
    ends_at(&node, ElementKind::LightpathRequest, node.incoming_lightpath_requests())?;
    starts_at(&node, ElementKind::LightpathRequest, node.outgoing_lightpath_requests())?;
    ends_at(&node, ElementKind::Lightpath, node.incoming_lightpaths())?;
    starts_at(&node, ElementKind::Lightpath, node.outgoing_lightpaths())?;
    ends_at(&node, ElementKind::ServiceChain, node.incoming_service_chains())?;
    starts_at(&node, ElementKind::ServiceChain, node.outgoing_service_chains())?;

    // service chain request candidates
    for scr in node.incoming_service_chain_requests() {
        if !scr.potentially_valid_destinations(net)?.contains(&nid) {
            return Err(ConsistencyError::ServiceChainRequestCandidate {
                node: nid,
                element: format!("{:?}", scr),
            });
        }
    }
    for scr in node.outgoing_service_chain_requests() {
        if !scr.potentially_valid_origins(net)?.contains(&nid) {
            return Err(ConsistencyError::ServiceChainRequestCandidate {
                node: nid,
                element: format!("{:?}", scr),
            });
        }
    }

    // traversal
    for lp in node.in_out_or_traversing_lightpaths() {
        if !lp.seq_nodes(net)?.contains(&nid) {
            return Err(ConsistencyError::NotTraversed {
                node: nid,
                kind: ElementKind::Lightpath,
                element: format!("{:?}", lp),
            });
        }
    }
    for sc in node.in_out_or_traversing_service_chains() {
        if !sc.sequence_of_traversed_ip_nodes(net)?.contains(&nid) {
            return Err(ConsistencyError::NotTraversed {
                node: nid,
                kind: ElementKind::ServiceChain,
                element: format!("{:?}", sc),
            });
        }
    }

    // neighbors
    for neighbor in node.neighbors_via_outgoing_fibers() {
        if !net.node(neighbor)?.neighbors_via_incoming_fibers().contains(&nid) {
            return Err(ConsistencyError::NeighborNotMutual { node: nid, neighbor });
        }
    }
    for neighbor in node.neighbors_via_incoming_fibers() {
        if !net.node(neighbor)?.neighbors_via_outgoing_fibers().contains(&nid) {
            return Err(ConsistencyError::NeighborNotMutual { node: nid, neighbor });
        }
    }

    // hosted VNF instances
    for vnf in node.vnf_instances() {
        if vnf.hosting_node(net)? != nid {
            return Err(ConsistencyError::VnfHost { node: nid, element: format!("{:?}", vnf) });
        }
    }

    // unique name
    let name = node.name();
    let same_name = net
        .nodes()
        .into_iter()
        .filter(|n| net.node(*n).map(|x| x.name() == name).unwrap_or(false))
        .count();
    if same_name > 1 {
        return Err(ConsistencyError::DuplicateName(name.to_string()));
    }

    Ok(())
}

/// Verify all invariants of the node. A violation is logged and panics in debug builds. Release
/// builds only log it and return `Ok(())`; use [`verify`] to inspect the violation.
pub fn check(net: &WNet, id: NodeId) -> Result<(), ConsistencyError> {
    let result = verify(net, id);
    if let Err(e) = result.as_ref() {
        error!(
            "Inconsistent node {}: {}",
            printer::node(net, id).unwrap_or_else(|_| format!("{:?}", id)),
            e
        );
    }
    debug_assert!(result.is_ok(), "Inconsistent node {:?}: {:?}", id, result);
    Ok(())
}
