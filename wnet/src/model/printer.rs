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

//! # Helper (printer) functions for the network
//! Module containing helper functions to get formatted strings of network elements, with the
//! node names inserted.

use crate::model::elements::*;
use crate::model::net::WNet;
use crate::model::resources::ResourceKind;
use crate::model::types::ModelError;
use crate::substrate::NodeId;

use itertools::Itertools;
use std::collections::BTreeSet;

/// Returns the name of the node
pub fn node(net: &WNet, id: NodeId) -> Result<String, ModelError> {
    Ok(net.substrate().node(id)?.name.clone())
}

fn arrow<T: Endpoints>(net: &WNet, element: &T) -> Result<String, ModelError> {
    Ok(format!("{} -> {}", node(net, element.a(net)?)?, node(net, element.b(net)?)?))
}

/// Returns the formatted fiber, like `Fiber 3 [A -> B]`
pub fn fiber(net: &WNet, f: Fiber) -> Result<String, ModelError> {
    Ok(format!("Fiber {} [{}]", f.link_id().index(), arrow(net, &f)?))
}

/// Returns the formatted set of fibers
pub fn fiber_set(net: &WNet, fibers: &BTreeSet<Fiber>) -> Result<String, ModelError> {
    Ok(format!(
        "{{{}}}",
        fibers.iter().map(|f| arrow(net, f)).collect::<Result<Vec<_>, _>>()?.iter().join(", ")
    ))
}

/// Returns the formatted IP link, including its current capacity
pub fn ip_link(net: &WNet, l: IpLink) -> Result<String, ModelError> {
    Ok(format!(
        "IP link {} [{}] ({} Gbps)",
        l.link_id().index(),
        arrow(net, &l)?,
        l.capacity_gbps(net)?
    ))
}

/// Returns the formatted lightpath request, including its carried traffic
pub fn lightpath_request(net: &WNet, r: LightpathRequest) -> Result<String, ModelError> {
    Ok(format!(
        "Lightpath request {} [{}] ({} of {} Gbps)",
        r.demand_id().0,
        arrow(net, &r)?,
        r.carried_gbps(net),
        r.line_rate_gbps(net)?
    ))
}

/// Returns the formatted lightpath with the sequence of traversed nodes
pub fn lightpath(net: &WNet, lp: Lightpath) -> Result<String, ModelError> {
    let names: Vec<String> =
        lp.seq_nodes(net)?.into_iter().map(|n| node(net, n)).collect::<Result<_, _>>()?;
    Ok(format!(
        "Lightpath {} [{}] ({} Gbps)",
        lp.route_id().0,
        names.join(" -> "),
        lp.carried_gbps(net)?
    ))
}

/// Returns a one-line summary of the node, with the occupation of each resource kind
pub fn node_summary(net: &WNet, id: NodeId) -> Result<String, ModelError> {
    let n = net.node(id)?;
    let ledger = ResourceKind::ALL
        .iter()
        .map(|k| {
            Ok(format!(
                "{} {}/{} {}",
                &k.tag()[1..],
                n.occupied(*k)?,
                n.capacity(*k),
                k.unit()
            ))
        })
        .collect::<Result<Vec<String>, ModelError>>()?;
    Ok(format!(
        "{} ({}, {}): {}",
        n.name(),
        n.switch_type(),
        if n.is_up() { "up" } else { "down" },
        ledger.iter().join(", ")
    ))
}
