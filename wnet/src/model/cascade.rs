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

//! # Failure cascade
//!
//! When a node changes its state, the lightpaths traversing it may stop (or resume) carrying
//! traffic. Every lightpath request with at least one lightpath on an incoming or outgoing fiber
//! of the node is re-evaluated. Re-evaluating a request updates the traffic carried by its
//! lightpaths, and the capacity of the IP link coupled to it.
//!
//! The cascade fails forward: every affected element is re-evaluated, even if re-evaluating
//! another one failed. All failures are collected in the [`CascadeReport`].

use crate::model::elements::{Endpoints, LightpathRequest};
use crate::model::net::WNet;
use crate::model::printer;
use crate::model::types::ModelError;
use crate::substrate::NodeId;

use log::*;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Element whose state is derived from the state of the elements it depends on.
pub trait Reevaluatable {
    /// Recompute the derived state. Calling this multiple times without any change in between
    /// has the same effect as calling it once.
    fn reevaluate(&self, net: &mut WNet) -> Result<(), ModelError>;
}

impl Reevaluatable for LightpathRequest {
    fn reevaluate(&self, net: &mut WNet) -> Result<(), ModelError> {
        let line_rate = self.line_rate_gbps(net)?;
        let mut total = 0.0;
        for lp in self.lightpaths(net) {
            let carried = if lp.is_up(net)? { line_rate } else { 0.0 };
            net.substrate_mut().route_mut(lp.route_id())?.carried = carried;
            total += carried;
        }
        if let Some(link) = self.coupled_ip_link(net)? {
            net.substrate_mut().link_mut(link.link_id())?.capacity = total;
        }
        trace!(
            "Re-evaluated lightpath request {}: carrying {} Gbps",
            printer::lightpath_request(net, *self)?,
            total
        );
        Ok(())
    }
}

/// Outcome of a cascade
#[derive(Debug, PartialEq)]
pub struct CascadeReport<R: Ord> {
    /// All elements which were re-evaluated
    pub affected: BTreeSet<R>,
    /// Elements whose re-evaluation failed, together with the error
    pub failures: Vec<(R, ModelError)>,
}

impl<R: Ord> Default for CascadeReport<R> {
    fn default() -> Self {
        Self { affected: BTreeSet::new(), failures: Vec::new() }
    }
}

impl<R: Ord> CascadeReport<R> {
    /// Returns true if every affected element was re-evaluated successfully
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Returns all lightpath requests with at least one lightpath traversing an incoming or outgoing
/// fiber of the node.
pub fn affected_lightpath_requests(net: &WNet, node: NodeId) -> BTreeSet<LightpathRequest> {
    net.outgoing_fibers(node)
        .into_iter()
        .chain(net.incoming_fibers(node).into_iter())
        .flat_map(|f| f.traversing_lp_requests_in_at_least_one_lp(net))
        .collect()
}

/// Re-evaluate all elements. Failures are logged and collected, but do not stop the cascade.
pub fn propagate<R>(net: &mut WNet, affected: BTreeSet<R>) -> CascadeReport<R>
where
    R: Reevaluatable + Ord + Copy + Debug,
{
    let mut failures = Vec::new();
    for element in affected.iter() {
        if let Err(e) = element.reevaluate(net) {
            warn!("Cannot re-evaluate {:?}: {}", element, e);
            failures.push((*element, e));
        }
    }
    CascadeReport { affected, failures }
}

/// Set the state of the node and re-evaluate all affected lightpath requests. The cascade is
/// executed even if the node already was in the requested state.
pub fn set_node_state(
    net: &mut WNet,
    node: NodeId,
    up: bool,
) -> Result<CascadeReport<LightpathRequest>, ModelError> {
    net.node(node)?;
    debug!("Set node {} {}", printer::node(net, node)?, if up { "up" } else { "down" });
    net.substrate_mut().set_node_up(node, up)?;
    let affected = affected_lightpath_requests(net, node);
    let report = propagate(net, affected);
    if !report.affected.is_empty() {
        info!(
            "{} lightpath requests affected by {} going {}",
            report.affected.len(),
            printer::node(net, node)?,
            if up { "up" } else { "down" }
        );
    }
    Ok(report)
}

/// Returns the lightpath requests among `requests` whose end nodes are both up, but which do
/// not carry any traffic.
pub fn blocked_lightpath_requests(
    net: &WNet,
    requests: &BTreeSet<LightpathRequest>,
) -> BTreeSet<LightpathRequest> {
    requests
        .iter()
        .filter(|r| {
            let ends_up = match (r.a(net), r.b(net)) {
                (Ok(a), Ok(b)) => net.substrate().is_node_up(a) && net.substrate().is_node_up(b),
                _ => false,
            };
            ends_up && !r.is_up(net)
        })
        .cloned()
        .collect()
}
