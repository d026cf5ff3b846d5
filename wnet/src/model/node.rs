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

//! # Network node
//!
//! Read view [`WNode`] and write view [`WNodeMut`] of a regular node in a [`WNet`]. The read view
//! exposes the node's own state, all elements related to the node, the resource ledger and the
//! switching functions of its architecture. The write view changes the state, and triggers the
//! failure cascade when the node goes up or down.

use crate::model::cascade::{self, CascadeReport};
use crate::model::consistency;
use crate::model::elements::*;
use crate::model::kind::ElementKind;
use crate::model::net::WNet;
use crate::model::node_config::{NodeConfig, OpticalParams, SwitchingOperation};
use crate::model::resources::{self, ResourceKind};
use crate::model::switching::OpticalSwitchType;
use crate::model::types::{ConsistencyError, ModelError, LIST_SEPARATOR};
use crate::substrate::{DemandId, Layer, LinkId, NodeId, RouteId};

use log::*;
use std::collections::BTreeSet;

/// Read view of a regular node
#[derive(Debug, Clone, Copy)]
pub struct WNode<'a> {
    net: &'a WNet,
    id: NodeId,
    config: &'a NodeConfig,
}

impl<'a> WNode<'a> {
    pub(crate) fn new(net: &'a WNet, id: NodeId, config: &'a NodeConfig) -> Self {
        Self { net, id, config }
    }

    /// Returns the id of the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the network the node belongs to
    pub fn net(&self) -> &'a WNet {
        self.net
    }

    /// Returns the typed configuration of the node
    pub fn config(&self) -> &'a NodeConfig {
        self.config
    }

    /// Returns the unique name of the node
    pub fn name(&self) -> &'a str {
        self.net.substrate().node(self.id).map(|n| n.name.as_str()).unwrap_or("")
    }

    /// Returns the position `(x, y)` of the node
    pub fn position(&self) -> (f64, f64) {
        self.net.substrate().node(self.id).map(|n| n.position).unwrap_or((0.0, 0.0))
    }

    /// Returns the population of the area served by the node
    pub fn population(&self) -> f64 {
        self.net.substrate().node(self.id).map(|n| n.population).unwrap_or(0.0)
    }

    /// Returns the user-defined type of the node, or `""` if not set.
    pub fn node_type(&self) -> &'a str {
        &self.config.node_type
    }

    /// Returns the free-text parameter, or `""` if not set.
    pub fn arbitrary_param_string(&self) -> &'a str {
        &self.config.arbitrary_param_string
    }

    /// Returns true if the node is attached to the network core
    pub fn is_connected_to_network_core(&self) -> bool {
        self.config.connected_to_network_core
    }

    /// Returns true if the node is up (not failed)
    pub fn is_up(&self) -> bool {
        self.net.substrate().is_node_up(self.id)
    }

    /// Returns true if the node is down (failed)
    pub fn is_down(&self) -> bool {
        !self.is_up()
    }

    /// Returns the optical parameters of the switching operation
    pub fn optical_params(&self, op: SwitchingOperation) -> &'a OpticalParams {
        self.config.params(op)
    }

    /// Returns the switching architecture
    pub fn switch_type(&self) -> OpticalSwitchType {
        self.config.switch_type
    }

    /// Returns the target power spectral density (mW/GHz) of the output spectrum, or `None` if
    /// the node does not equalize it.
    pub fn equalization_target(&self) -> Option<f64> {
        self.config.equalization_target
    }

    /// Returns true if the node equalizes its output spectrum
    pub fn is_equalizing(&self) -> bool {
        self.config.equalization_target.is_some()
    }

    // *************
    // * Switching *
    // *************

    /// Fibers carrying a channel added at this node and sent to `output`
    pub fn add_propagation(&self, output: Fiber) -> BTreeSet<Fiber> {
        self.switch_type().policy().add_propagation(self.net, output)
    }

    /// Fibers still carrying a channel dropped at this node after arriving on `input`
    pub fn drop_propagation(&self, input: Fiber) -> BTreeSet<Fiber> {
        self.switch_type().policy().drop_propagation(self.net, input)
    }

    /// Fibers carrying a channel arriving on `input` and expressed towards `output`
    pub fn express_propagation(&self, input: Fiber, output: Fiber) -> BTreeSet<Fiber> {
        self.switch_type().policy().express_propagation(self.net, input, output)
    }

    /// Fibers necessarily carrying energy arriving on `input`, whatever the node is configured to
    /// do with it
    pub fn unavoidable_propagation(&self, input: Fiber) -> BTreeSet<Fiber> {
        self.switch_type().policy().unavoidable_propagation(self.net, input)
    }

    // *************
    // * Resources *
    // *************

    /// Total capacity of the resource kind (0 if there is no record)
    pub fn capacity(&self, kind: ResourceKind) -> f64 {
        resources::capacity(self.net.substrate(), self.id, kind)
    }

    /// Capacity of the resource kind occupied by the hosted VNF instances
    pub fn occupied(&self, kind: ResourceKind) -> Result<f64, ModelError> {
        resources::occupied(self.net.substrate(), self.id, kind)
    }

    /// Returns all VNF instances hosted at the node
    pub fn vnf_instances(&self) -> BTreeSet<VnfInstance> {
        let s = self.net.substrate();
        s.resources_at(self.id)
            .into_iter()
            .filter(|r| resource_has_kind(s, *r, ElementKind::VnfInstance))
            .map(VnfInstance)
            .collect()
    }

    /// Returns all VNF instances of the type hosted at the node. The type must not contain the
    /// list separator.
    pub fn vnf_instances_of_type(
        &self,
        vnf_type: &str,
    ) -> Result<BTreeSet<VnfInstance>, ModelError> {
        if vnf_type.contains(LIST_SEPARATOR) {
            return Err(ModelError::InvalidArgument(format!(
                "VNF type {} contains the character {}",
                vnf_type, LIST_SEPARATOR
            )));
        }
        Ok(self
            .vnf_instances()
            .into_iter()
            .filter(|v| v.vnf_type(self.net).map(|t| t == vnf_type).unwrap_or(false))
            .collect())
    }

    // ***********
    // * Anycast *
    // ***********

    /// Returns the IP link from the anycast origin to this node
    pub fn incoming_link_from_anycast_origin(&self) -> Result<LinkId, ModelError> {
        self.net
            .substrate()
            .node_pair_links(self.net.anycast_origin(), self.id, Layer::Ip)
            .first()
            .cloned()
            .ok_or_else(|| {
                ModelError::UnexpectedState(format!(
                    "{} has no link from the anycast origin",
                    self.name()
                ))
            })
    }

    /// Returns the IP link from this node to the anycast destination
    pub fn outgoing_link_to_anycast_destination(&self) -> Result<LinkId, ModelError> {
        self.net
            .substrate()
            .node_pair_links(self.id, self.net.anycast_destination(), Layer::Ip)
            .first()
            .cloned()
            .ok_or_else(|| {
                ModelError::UnexpectedState(format!(
                    "{} has no link to the anycast destination",
                    self.name()
                ))
            })
    }

    // **********************
    // * Physical relations *
    // **********************

    /// Fibers starting at the node
    pub fn outgoing_fibers(&self) -> BTreeSet<Fiber> {
        self.net.outgoing_fibers(self.id).into_iter().collect()
    }

    /// Fibers ending at the node
    pub fn incoming_fibers(&self) -> BTreeSet<Fiber> {
        self.net.incoming_fibers(self.id).into_iter().collect()
    }

    /// Nodes at the end of an outgoing fiber
    pub fn neighbors_via_outgoing_fibers(&self) -> BTreeSet<NodeId> {
        self.outgoing_fibers().iter().filter_map(|f| f.b(self.net).ok()).collect()
    }

    /// Nodes at the start of an incoming fiber
    pub fn neighbors_via_incoming_fibers(&self) -> BTreeSet<NodeId> {
        self.incoming_fibers().iter().filter_map(|f| f.a(self.net).ok()).collect()
    }

    /// Shared risk groups the node belongs to
    pub fn srgs(&self) -> BTreeSet<SharedRiskGroup> {
        self.net.substrate().srgs_of_node(self.id).into_iter().map(SharedRiskGroup).collect()
    }

    // *************
    // * WDM layer *
    // *************

    fn lightpath_requests(&self, ids: Vec<DemandId>) -> BTreeSet<LightpathRequest> {
        let s = self.net.substrate();
        ids.into_iter()
            .filter(|d| demand_has_kind(s, *d, ElementKind::LightpathRequest))
            .map(LightpathRequest)
            .collect()
    }

    fn lightpaths(&self, ids: Vec<RouteId>) -> BTreeSet<Lightpath> {
        let s = self.net.substrate();
        ids.into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::Lightpath))
            .map(Lightpath)
            .collect()
    }

    /// Lightpath requests starting at the node
    pub fn outgoing_lightpath_requests(&self) -> BTreeSet<LightpathRequest> {
        self.lightpath_requests(self.net.substrate().outgoing_demands(self.id, Layer::Wdm))
    }

    /// Lightpath requests ending at the node
    pub fn incoming_lightpath_requests(&self) -> BTreeSet<LightpathRequest> {
        self.lightpath_requests(self.net.substrate().incoming_demands(self.id, Layer::Wdm))
    }

    /// Lightpaths starting at the node
    pub fn outgoing_lightpaths(&self) -> BTreeSet<Lightpath> {
        self.lightpaths(self.net.substrate().outgoing_routes(self.id, Layer::Wdm))
    }

    /// Lightpaths ending at the node
    pub fn incoming_lightpaths(&self) -> BTreeSet<Lightpath> {
        self.lightpaths(self.net.substrate().incoming_routes(self.id, Layer::Wdm))
    }

    /// Lightpaths starting at, ending at or traversing the node
    pub fn in_out_or_traversing_lightpaths(&self) -> BTreeSet<Lightpath> {
        self.lightpaths(self.net.substrate().associated_routes(self.id, Layer::Wdm))
    }

    /// Lightpaths optically switched at the node, without being added or dropped there
    pub fn express_switched_lightpaths(&self) -> BTreeSet<Lightpath> {
        self.in_out_or_traversing_lightpaths()
            .into_iter()
            .filter(|lp| {
                lp.nodes_where_express_switched(self.net)
                    .map(|nodes| nodes.contains(&self.id))
                    .unwrap_or(false)
            })
            .collect()
    }

    // ************
    // * IP layer *
    // ************

    /// IP links starting at the node
    pub fn outgoing_ip_links(&self) -> BTreeSet<IpLink> {
        self.net.outgoing_ip_links(self.id).into_iter().collect()
    }

    /// IP links ending at the node
    pub fn incoming_ip_links(&self) -> BTreeSet<IpLink> {
        self.net.incoming_ip_links(self.id).into_iter().collect()
    }

    /// MPLS-TE tunnels starting at the node
    pub fn outgoing_ip_connections(&self) -> BTreeSet<MplsTeTunnel> {
        let s = self.net.substrate();
        s.outgoing_routes(self.id, Layer::Ip)
            .into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::MplsTeTunnel))
            .map(MplsTeTunnel)
            .collect()
    }

    /// MPLS-TE tunnels ending at the node
    pub fn incoming_ip_connections(&self) -> BTreeSet<MplsTeTunnel> {
        let s = self.net.substrate();
        s.incoming_routes(self.id, Layer::Ip)
            .into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::MplsTeTunnel))
            .map(MplsTeTunnel)
            .collect()
    }

    /// IP unicast demands starting at the node
    pub fn outgoing_ip_unicast_demands(&self) -> BTreeSet<IpUnicastDemand> {
        let s = self.net.substrate();
        s.outgoing_demands(self.id, Layer::Ip)
            .into_iter()
            .filter(|d| demand_has_kind(s, *d, ElementKind::IpUnicastDemand))
            .map(IpUnicastDemand)
            .collect()
    }

    /// IP unicast demands ending at the node
    pub fn incoming_ip_unicast_demands(&self) -> BTreeSet<IpUnicastDemand> {
        let s = self.net.substrate();
        s.incoming_demands(self.id, Layer::Ip)
            .into_iter()
            .filter(|d| demand_has_kind(s, *d, ElementKind::IpUnicastDemand))
            .map(IpUnicastDemand)
            .collect()
    }

    /// Service chain requests that may start at the node
    pub fn outgoing_service_chain_requests(&self) -> BTreeSet<ServiceChainRequest> {
        self.net
            .service_chain_requests()
            .into_iter()
            .filter(|scr| {
                scr.potentially_valid_origins(self.net)
                    .map(|o| o.contains(&self.id))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Service chain requests that may end at the node
    pub fn incoming_service_chain_requests(&self) -> BTreeSet<ServiceChainRequest> {
        self.net
            .service_chain_requests()
            .into_iter()
            .filter(|scr| {
                scr.potentially_valid_destinations(self.net)
                    .map(|d| d.contains(&self.id))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Service chains starting at the node
    pub fn outgoing_service_chains(&self) -> BTreeSet<ServiceChain> {
        self.net
            .service_chains()
            .into_iter()
            .filter(|sc| sc.a(self.net).map(|a| a == self.id).unwrap_or(false))
            .collect()
    }

    /// Service chains ending at the node
    pub fn incoming_service_chains(&self) -> BTreeSet<ServiceChain> {
        self.net
            .service_chains()
            .into_iter()
            .filter(|sc| sc.b(self.net).map(|b| b == self.id).unwrap_or(false))
            .collect()
    }

    /// Service chains starting at, ending at or traversing the node
    pub fn in_out_or_traversing_service_chains(&self) -> BTreeSet<ServiceChain> {
        self.net
            .service_chains()
            .into_iter()
            .filter(|sc| {
                sc.sequence_of_traversed_ip_nodes(self.net)
                    .map(|seq| seq.contains(&self.id))
                    .unwrap_or(false)
            })
            .collect()
    }
}

/// Write view of a regular node
#[derive(Debug)]
pub struct WNodeMut<'a> {
    net: &'a mut WNet,
    id: NodeId,
}

impl<'a> WNodeMut<'a> {
    pub(crate) fn new(net: &'a mut WNet, id: NodeId) -> Self {
        Self { net, id }
    }

    /// Returns the id of the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the read view of the node
    pub fn view(&self) -> Result<WNode<'_>, ModelError> {
        self.net.node(self.id)
    }

    fn config_mut(&mut self) -> &mut NodeConfig {
        self.net.configs.entry(self.id).or_default()
    }

    /// Rename the node. Fails if the name is empty, contains whitespace or the list separator,
    /// or if any regular node (including this one) already has this name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        let name = name.into();
        self.net.check_name(&name)?;
        debug!("Rename {} to {}", self.view()?.name(), name);
        self.net.sub.node_mut(self.id)?.name = name;
        Ok(())
    }

    /// Move the node to `(x, y)`
    pub fn set_position(&mut self, position: (f64, f64)) -> Result<(), ModelError> {
        self.net.sub.node_mut(self.id)?.position = position;
        Ok(())
    }

    /// Set the population of the area served by the node
    pub fn set_population(&mut self, population: f64) -> Result<(), ModelError> {
        self.net.sub.node_mut(self.id)?.population = population;
        Ok(())
    }

    /// Set the user-defined type
    pub fn set_node_type(&mut self, node_type: impl Into<String>) {
        self.config_mut().node_type = node_type.into();
    }

    /// Set the free-text parameter
    pub fn set_arbitrary_param_string(&mut self, value: impl Into<String>) {
        self.config_mut().arbitrary_param_string = value.into();
    }

    /// Set whether the node is attached to the network core
    pub fn set_connected_to_network_core(&mut self, connected: bool) {
        self.config_mut().connected_to_network_core = connected;
    }

    /// Set the noise figure (dB) of the switching operation
    pub fn set_noise_figure_db(&mut self, op: SwitchingOperation, value: f64) {
        self.config_mut().params_mut(op).noise_figure_db = value;
    }

    /// Set the gain (dB) of the switching operation
    pub fn set_gain_db(&mut self, op: SwitchingOperation, value: f64) {
        self.config_mut().params_mut(op).gain_db = value;
    }

    /// Set the PMD (ps) of the switching operation
    pub fn set_pmd_ps(&mut self, op: SwitchingOperation, value: f64) {
        self.config_mut().params_mut(op).pmd_ps = value;
    }

    /// Change the switching architecture. Lightpaths are not re-evaluated, since the architecture
    /// only changes where wasted energy goes.
    pub fn set_switch_type(&mut self, switch_type: OpticalSwitchType) {
        self.config_mut().switch_type = switch_type;
    }

    /// Enable output spectrum equalization to the target (mW/GHz), or disable it with `None`.
    pub fn set_equalization_target(&mut self, target: Option<f64>) {
        self.config_mut().equalization_target = target;
    }

    /// Set the capacity of the resource kind. The occupation by hosted VNF instances is kept.
    pub fn set_capacity(&mut self, kind: ResourceKind, value: f64) -> Result<(), ModelError> {
        resources::set_capacity(&mut self.net.sub, self.id, kind, value)?;
        Ok(())
    }

    /// Bring the node up, and re-evaluate every lightpath request with a lightpath on an
    /// incident fiber.
    pub fn set_as_up(&mut self) -> Result<CascadeReport<LightpathRequest>, ModelError> {
        cascade::set_node_state(self.net, self.id, true)
    }

    /// Fail the node, and re-evaluate every lightpath request with a lightpath on an incident
    /// fiber.
    pub fn set_as_down(&mut self) -> Result<CascadeReport<LightpathRequest>, ModelError> {
        cascade::set_node_state(self.net, self.id, false)
    }

    /// Remove the node. The node is first set down, such that the dependent lightpath requests
    /// release their capacity. Then, the node is removed together with all incident links,
    /// demands starting or ending at it, routes traversing it, hosted VNF instances and resource
    /// records, and its shared risk group memberships.
    pub fn remove(mut self) -> Result<CascadeReport<LightpathRequest>, ModelError> {
        let report = self.set_as_down()?;
        let name = self.view()?.name().to_string();
        self.net.forget_service_chain_endpoint(self.id)?;
        self.net.sub.remove_node(self.id)?;
        self.net.configs.remove(&self.id);
        info!("Removed node {}", name);
        Ok(report)
    }

    /// Check the invariants of the node. See [`consistency::check`].
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        consistency::check(self.net, self.id)
    }
}
