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

//! # Typed IP-over-WDM network
//!
//! [`WNet`] owns the substrate and the typed configuration of every regular node. It creates all
//! typed elements, and hands out the read view [`WNode`] and the write view [`WNodeMut`] of each
//! node.

use crate::model::cascade::Reevaluatable;
use crate::model::consistency;
use crate::model::elements::*;
use crate::model::kind::ElementKind;
use crate::model::node::{WNode, WNodeMut};
use crate::model::node_config::NodeConfig;
use crate::model::resources::{self, ResourceKind};
use crate::model::types::{
    ConsistencyError, ModelError, LIST_SEPARATOR, TAG_ANYCAST_DESTINATION, TAG_ANYCAST_ORIGIN,
};
use crate::substrate::{Layer, LinkId, NodeId, ResourceId, RouteHop, Substrate};

use itertools::Itertools;
use log::*;
use std::collections::{BTreeMap, BTreeSet};

/// Hop of a service chain: either an IP link, or a VNF instance hosted at the current node.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum ServiceChainHop {
    /// Traverse an IP link
    Link(IpLink),
    /// Traverse a VNF instance
    Vnf(VnfInstance),
}

/// # Typed IP-over-WDM network
///
/// The network consists of regular nodes, and two virtual anycast nodes. Every regular node has
/// an (untyped) IP link from the anycast origin and towards the anycast destination. Service
/// chain requests are demands between these two anycast nodes, such that a service chain may
/// start at any of the potentially valid origins.
#[derive(Debug, Clone)]
pub struct WNet {
    pub(crate) sub: Substrate,
    pub(crate) configs: BTreeMap<NodeId, NodeConfig>,
    anycast_origin: NodeId,
    anycast_destination: NodeId,
}

impl Default for WNet {
    fn default() -> Self {
        Self::new()
    }
}

impl WNet {
    /// Generate an empty network, containing only the two anycast nodes.
    pub fn new() -> Self {
        let mut sub = Substrate::new();
        let anycast_origin = Self::create_anycast_node(&mut sub, TAG_ANYCAST_ORIGIN);
        let anycast_destination = Self::create_anycast_node(&mut sub, TAG_ANYCAST_DESTINATION);
        Self { sub, configs: BTreeMap::new(), anycast_origin, anycast_destination }
    }

    fn create_anycast_node(sub: &mut Substrate, tag: &str) -> NodeId {
        let id = sub.add_node(tag);
        // the node exists, since it was just added
        if let Ok(n) = sub.node_mut(id) {
            n.tags.insert(tag.to_string());
        }
        id
    }

    /// Adopt an existing substrate. The anycast nodes are found by their tag (and created if
    /// they are missing), the configuration of every other node is read from its attributes, and
    /// missing resource records and anycast links are created.
    pub fn from_substrate(mut sub: Substrate) -> Result<Self, ModelError> {
        let find = |sub: &Substrate, tag: &str| -> Result<Option<NodeId>, ModelError> {
            let found: Vec<NodeId> = sub
                .node_ids()
                .filter(|n| sub.node(*n).map(|d| d.tags.contains(tag)).unwrap_or(false))
                .collect();
            match found.as_slice() {
                [] => Ok(None),
                [n] => Ok(Some(*n)),
                _ => Err(ModelError::FormatError(format!("Multiple nodes tagged {}", tag))),
            }
        };
        let anycast_origin = match find(&sub, TAG_ANYCAST_ORIGIN)? {
            Some(n) => n,
            None => Self::create_anycast_node(&mut sub, TAG_ANYCAST_ORIGIN),
        };
        let anycast_destination = match find(&sub, TAG_ANYCAST_DESTINATION)? {
            Some(n) => n,
            None => Self::create_anycast_node(&mut sub, TAG_ANYCAST_DESTINATION),
        };

        let mut net = Self { sub, configs: BTreeMap::new(), anycast_origin, anycast_destination };
        let regular: Vec<NodeId> = net
            .sub
            .node_ids()
            .filter(|n| *n != anycast_origin && *n != anycast_destination)
            .collect();
        for id in regular {
            let config = NodeConfig::from_attributes(&net.sub.node(id)?.attributes);
            net.configs.insert(id, config);
            net.materialize_node(id)?;
        }
        info!("Adopted substrate with {} regular nodes", net.configs.len());
        Ok(net)
    }

    /// Write the typed configuration of every node back into the node attributes.
    pub fn sync_attributes(&mut self) -> Result<(), ModelError> {
        for (id, config) in self.configs.iter() {
            config.write_attributes(&mut self.sub.node_mut(*id)?.attributes);
        }
        Ok(())
    }

    /// Consume the network, and return the substrate with all attributes written.
    pub fn into_substrate(mut self) -> Result<Substrate, ModelError> {
        self.sync_attributes()?;
        Ok(self.sub)
    }

    /// Returns a reference to the substrate
    pub fn substrate(&self) -> &Substrate {
        &self.sub
    }

    pub(crate) fn substrate_mut(&mut self) -> &mut Substrate {
        &mut self.sub
    }

    /// Virtual node where all service chain requests start
    pub fn anycast_origin(&self) -> NodeId {
        self.anycast_origin
    }

    /// Virtual node where all service chain requests end
    pub fn anycast_destination(&self) -> NodeId {
        self.anycast_destination
    }

    /// Returns true if the node is one of the two anycast nodes
    pub fn is_virtual_node(&self, id: NodeId) -> bool {
        id == self.anycast_origin || id == self.anycast_destination
    }

    // *********
    // * Nodes *
    // *********

    /// Returns all regular nodes, ordered by their id
    pub fn nodes(&self) -> Vec<NodeId> {
        self.configs.keys().cloned().collect()
    }

    /// Returns the read view of a regular node
    pub fn node(&self, id: NodeId) -> Result<WNode<'_>, ModelError> {
        match self.configs.get(&id) {
            Some(config) => Ok(WNode::new(self, id, config)),
            None => Err(ModelError::NotARegularNode(id)),
        }
    }

    /// Returns the write view of a regular node
    pub fn node_mut(&mut self, id: NodeId) -> Result<WNodeMut<'_>, ModelError> {
        if self.configs.contains_key(&id) {
            Ok(WNodeMut::new(self, id))
        } else {
            Err(ModelError::NotARegularNode(id))
        }
    }

    /// Returns the regular node with the given name
    pub fn node_by_name(&self, name: impl AsRef<str>) -> Option<WNode<'_>> {
        let name = name.as_ref();
        self.configs
            .keys()
            .find(|id| self.sub.node(**id).map(|n| n.name == name).unwrap_or(false))
            .and_then(|id| self.node(*id).ok())
    }

    /// Check if the name can be given to a regular node. The name must not be empty, must not
    /// contain whitespace or the list separator, and must not be used by any regular node yet
    /// (including the node which is renamed).
    pub(crate) fn check_name(&self, name: &str) -> Result<(), ModelError> {
        if name.is_empty() {
            return Err(ModelError::InvalidArgument("Node name is empty".to_string()));
        }
        if name.contains(LIST_SEPARATOR) {
            return Err(ModelError::InvalidArgument(format!(
                "Node name {} contains the character {}",
                name, LIST_SEPARATOR
            )));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidArgument(format!(
                "Node name \"{}\" contains whitespace",
                name
            )));
        }
        if self.node_by_name(name).is_some() {
            return Err(ModelError::InvalidArgument(format!("Node name {} is already used", name)));
        }
        Ok(())
    }

    /// Add a new regular node. The node is up, uses the default configuration, has empty CPU,
    /// RAM and HD records, and is connected to both anycast nodes.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        position: (f64, f64),
    ) -> Result<NodeId, ModelError> {
        let name = name.into();
        self.check_name(&name)?;
        let id = self.sub.add_node(name);
        self.sub.node_mut(id)?.position = position;
        self.configs.insert(id, NodeConfig::default());
        self.materialize_node(id)?;
        debug!("Added node {}", self.sub.node(id)?.name);
        Ok(id)
    }

    /// Create the resource records and the anycast links of a regular node, if they are missing.
    fn materialize_node(&mut self, id: NodeId) -> Result<(), ModelError> {
        resources::ensure_records(&mut self.sub, id)?;
        if self.sub.node_pair_links(self.anycast_origin, id, Layer::Ip).is_empty() {
            self.sub.add_link(Layer::Ip, self.anycast_origin, id, 0.0)?;
        }
        if self.sub.node_pair_links(id, self.anycast_destination, Layer::Ip).is_empty() {
            self.sub.add_link(Layer::Ip, id, self.anycast_destination, 0.0)?;
        }
        Ok(())
    }

    fn expect_regular(&self, id: NodeId) -> Result<(), ModelError> {
        if self.configs.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::NotARegularNode(id))
        }
    }

    /// Outgoing fibers of the node, ordered by their id
    pub fn outgoing_fibers(&self, node: NodeId) -> Vec<Fiber> {
        self.typed_links(self.sub.outgoing_links(node, Layer::Wdm), ElementKind::Fiber)
            .map(Fiber)
            .collect()
    }

    /// Incoming fibers of the node, ordered by their id
    pub fn incoming_fibers(&self, node: NodeId) -> Vec<Fiber> {
        self.typed_links(self.sub.incoming_links(node, Layer::Wdm), ElementKind::Fiber)
            .map(Fiber)
            .collect()
    }

    /// Outgoing IP links of the node. Links towards the anycast destination are untyped and
    /// therefore not included.
    pub fn outgoing_ip_links(&self, node: NodeId) -> Vec<IpLink> {
        self.typed_links(self.sub.outgoing_links(node, Layer::Ip), ElementKind::IpLink)
            .map(IpLink)
            .collect()
    }

    /// Incoming IP links of the node. Links from the anycast origin are untyped and therefore not
    /// included.
    pub fn incoming_ip_links(&self, node: NodeId) -> Vec<IpLink> {
        self.typed_links(self.sub.incoming_links(node, Layer::Ip), ElementKind::IpLink)
            .map(IpLink)
            .collect()
    }

    fn typed_links(
        &self,
        links: Vec<LinkId>,
        kind: ElementKind,
    ) -> impl Iterator<Item = LinkId> + '_ {
        links.into_iter().filter(move |l| link_has_kind(&self.sub, *l, kind))
    }

    // ******************
    // * Typed elements *
    // ******************

    /// Add a fiber from `a` to `b`. If `bidirectional` is set, the fiber in opposite direction is
    /// created as well, and both are declared as bidirectional pair.
    pub fn add_fiber(
        &mut self,
        a: NodeId,
        b: NodeId,
        bidirectional: bool,
    ) -> Result<(Fiber, Option<Fiber>), ModelError> {
        let (ab, ba) =
            self.add_typed_link(Layer::Wdm, ElementKind::Fiber, a, b, 0.0, bidirectional)?;
        Ok((Fiber(ab), ba.map(Fiber)))
    }

    /// Add an IP link from `a` to `b` with the given capacity in Gbps. If `bidirectional` is set,
    /// the link in opposite direction is created as well.
    pub fn add_ip_link(
        &mut self,
        a: NodeId,
        b: NodeId,
        capacity_gbps: f64,
        bidirectional: bool,
    ) -> Result<(IpLink, Option<IpLink>), ModelError> {
        let (ab, ba) =
            self.add_typed_link(Layer::Ip, ElementKind::IpLink, a, b, capacity_gbps, bidirectional)?;
        Ok((IpLink(ab), ba.map(IpLink)))
    }

    fn add_typed_link(
        &mut self,
        layer: Layer,
        kind: ElementKind,
        a: NodeId,
        b: NodeId,
        capacity: f64,
        bidirectional: bool,
    ) -> Result<(LinkId, Option<LinkId>), ModelError> {
        self.expect_regular(a)?;
        self.expect_regular(b)?;
        if a == b {
            return Err(ModelError::InvalidArgument(format!("Self loop at {:?}", a)));
        }
        let ab = self.sub.add_link(layer, a, b, capacity)?;
        kind.tag(&mut self.sub.link_mut(ab)?.attributes);
        let ba = if bidirectional {
            let ba = self.sub.add_link(layer, b, a, capacity)?;
            kind.tag(&mut self.sub.link_mut(ba)?.attributes);
            self.sub.set_bidirectional_pair(ab, ba)?;
            Some(ba)
        } else {
            None
        };
        trace!("Added {:?} {:?} -> {:?}", kind, a, b);
        Ok((ab, ba))
    }

    /// Add a lightpath request from `a` to `b`, with the line rate in Gbps.
    pub fn add_lightpath_request(
        &mut self,
        a: NodeId,
        b: NodeId,
        line_rate_gbps: f64,
    ) -> Result<LightpathRequest, ModelError> {
        self.expect_regular(a)?;
        self.expect_regular(b)?;
        let d = self.sub.add_demand(Layer::Wdm, a, b, line_rate_gbps)?;
        ElementKind::LightpathRequest.tag(&mut self.sub.demand_mut(d)?.attributes);
        Ok(LightpathRequest(d))
    }

    /// Couple the lightpath request to an IP link with the same end nodes. From now on, the
    /// capacity of the IP link is the traffic carried by the lightpaths of the request.
    pub fn couple_lightpath_request(
        &mut self,
        request: LightpathRequest,
        link: IpLink,
    ) -> Result<(), ModelError> {
        LightpathRequest::from_demand(self, request.0)?;
        IpLink::from_link(self, link.0)?;
        if request.a(self)? != link.a(self)? || request.b(self)? != link.b(self)? {
            return Err(ModelError::InvalidArgument(
                "Lightpath request and IP link have different end nodes".to_string(),
            ));
        }
        self.sub.demand_mut(request.0)?.coupled_link = Some(link.0);
        request.reevaluate(self)
    }

    /// Add a lightpath realizing the request over the sequence of fibers. The lightpath carries
    /// the line rate of the request if all fibers and nodes are up, and nothing otherwise.
    pub fn add_lightpath(
        &mut self,
        request: LightpathRequest,
        fibers: Vec<Fiber>,
    ) -> Result<Lightpath, ModelError> {
        LightpathRequest::from_demand(self, request.0)?;
        for f in fibers.iter() {
            Fiber::from_link(self, f.0)?;
        }
        let (a, b) = (request.a(self)?, request.b(self)?);
        let connects = match (fibers.first(), fibers.last()) {
            (Some(first), Some(last)) => first.a(self)? == a && last.b(self)? == b,
            _ => false,
        };
        if !connects {
            return Err(ModelError::InvalidArgument(
                "Lightpath does not connect the end nodes of the request".to_string(),
            ));
        }
        let path = fibers.iter().map(|f| RouteHop::Link(f.0)).collect();
        let r = self.sub.add_route(request.0, a, path, 0.0)?;
        ElementKind::Lightpath.tag(&mut self.sub.route_mut(r)?.attributes);
        request.reevaluate(self)?;
        Ok(Lightpath(r))
    }

    /// Add an IP unicast demand from `a` to `b`, with the offered traffic in Gbps.
    pub fn add_ip_unicast_demand(
        &mut self,
        a: NodeId,
        b: NodeId,
        offered_gbps: f64,
    ) -> Result<IpUnicastDemand, ModelError> {
        self.expect_regular(a)?;
        self.expect_regular(b)?;
        let d = self.sub.add_demand(Layer::Ip, a, b, offered_gbps)?;
        ElementKind::IpUnicastDemand.tag(&mut self.sub.demand_mut(d)?.attributes);
        Ok(IpUnicastDemand(d))
    }

    /// Add an MPLS-TE tunnel carrying the demand over the sequence of IP links.
    pub fn add_mpls_te_tunnel(
        &mut self,
        demand: IpUnicastDemand,
        links: Vec<IpLink>,
        carried_gbps: f64,
    ) -> Result<MplsTeTunnel, ModelError> {
        if !demand_has_kind(&self.sub, demand.0, ElementKind::IpUnicastDemand) {
            return Err(ModelError::InvalidArgument(format!("{:?} is no IP unicast demand", demand)));
        }
        for l in links.iter() {
            IpLink::from_link(self, l.0)?;
        }
        let (a, b) = (demand.a(self)?, demand.b(self)?);
        let path: Vec<RouteHop> = links.iter().map(|l| RouteHop::Link(l.0)).collect();
        let r = self.sub.add_route(demand.0, a, path, carried_gbps)?;
        if self.sub.route(r)?.egress != b {
            self.sub.remove_route(r)?;
            return Err(ModelError::InvalidArgument(
                "Tunnel does not end at the destination of the demand".to_string(),
            ));
        }
        ElementKind::MplsTeTunnel.tag(&mut self.sub.route_mut(r)?.attributes);
        Ok(MplsTeTunnel(r))
    }

    /// Add a service chain request. The traffic may enter at any of the `origins`, must traverse
    /// instances of the VNF types in the given order, and may leave at any of the `destinations`.
    pub fn add_service_chain_request(
        &mut self,
        origins: BTreeSet<NodeId>,
        destinations: BTreeSet<NodeId>,
        vnf_types: Vec<String>,
        offered_gbps: f64,
    ) -> Result<ServiceChainRequest, ModelError> {
        for n in origins.iter().chain(destinations.iter()) {
            self.expect_regular(*n)?;
        }
        if let Some(t) = vnf_types.iter().find(|t| t.contains(LIST_SEPARATOR)) {
            return Err(ModelError::InvalidArgument(format!(
                "VNF type {} contains the character {}",
                t, LIST_SEPARATOR
            )));
        }
        let d = self.sub.add_demand(
            Layer::Ip,
            self.anycast_origin,
            self.anycast_destination,
            offered_gbps,
        )?;
        let attributes = &mut self.sub.demand_mut(d)?.attributes;
        ElementKind::ServiceChainRequest.tag(attributes);
        attributes.set(ATTNAME_SCR_VALIDORIGINS, encode_node_list(&origins));
        attributes.set(ATTNAME_SCR_VALIDDESTINATIONS, encode_node_list(&destinations));
        attributes.set(ATTNAME_SCR_VNFTYPES, vnf_types.iter().join(&LIST_SEPARATOR.to_string()));
        Ok(ServiceChainRequest(d))
    }

    /// Add a service chain realizing the request. The chain must start at one of the potentially
    /// valid origins of the request, and end at one of its potentially valid destinations.
    pub fn add_service_chain(
        &mut self,
        request: ServiceChainRequest,
        hops: Vec<ServiceChainHop>,
        carried_gbps: f64,
    ) -> Result<ServiceChain, ModelError> {
        if !demand_has_kind(&self.sub, request.0, ElementKind::ServiceChainRequest) {
            return Err(ModelError::InvalidArgument(format!(
                "{:?} is no service chain request",
                request
            )));
        }
        let hop_start = |net: &Self, hop: &ServiceChainHop| match hop {
            ServiceChainHop::Link(l) => l.a(net),
            ServiceChainHop::Vnf(v) => v.hosting_node(net),
        };
        let hop_end = |net: &Self, hop: &ServiceChainHop| match hop {
            ServiceChainHop::Link(l) => l.b(net),
            ServiceChainHop::Vnf(v) => v.hosting_node(net),
        };
        let (first, last) = match (hops.first(), hops.last()) {
            (Some(f), Some(l)) => (hop_start(self, f)?, hop_end(self, l)?),
            _ => return Err(ModelError::InvalidArgument("Empty service chain".to_string())),
        };
        if !request.potentially_valid_origins(self)?.contains(&first) {
            return Err(ModelError::InvalidArgument(format!(
                "{:?} is no valid origin of the request",
                first
            )));
        }
        if !request.potentially_valid_destinations(self)?.contains(&last) {
            return Err(ModelError::InvalidArgument(format!(
                "{:?} is no valid destination of the request",
                last
            )));
        }

        let entry = self.node(first)?.incoming_link_from_anycast_origin()?;
        let exit = self.node(last)?.outgoing_link_to_anycast_destination()?;
        let mut path = vec![RouteHop::Link(entry)];
        for hop in hops.iter() {
            path.push(match hop {
                ServiceChainHop::Link(l) => RouteHop::Link(IpLink::from_link(self, l.0)?.0),
                ServiceChainHop::Vnf(v) => {
                    if !resource_has_kind(&self.sub, v.0, ElementKind::VnfInstance) {
                        return Err(ModelError::InvalidArgument(format!(
                            "{:?} is no VNF instance",
                            v
                        )));
                    }
                    RouteHop::Resource(v.0)
                }
            });
        }
        path.push(RouteHop::Link(exit));
        let r = self.sub.add_route(request.0, self.anycast_origin, path, carried_gbps)?;
        ElementKind::ServiceChain.tag(&mut self.sub.route_mut(r)?.attributes);
        Ok(ServiceChain(r))
    }

    /// Instantiate a VNF at the host node. The instance occupies the given amount of the node's
    /// CPU, RAM and HD.
    pub fn add_vnf_instance(
        &mut self,
        host: NodeId,
        vnf_type: impl Into<String>,
        name: impl Into<String>,
        capacity_gbps: f64,
        occupation: BTreeMap<ResourceKind, f64>,
    ) -> Result<VnfInstance, ModelError> {
        self.expect_regular(host)?;
        let vnf_type = vnf_type.into();
        if vnf_type.contains(LIST_SEPARATOR) {
            return Err(ModelError::InvalidArgument(format!(
                "VNF type {} contains the character {}",
                vnf_type, LIST_SEPARATOR
            )));
        }
        let mut base_occupation: BTreeMap<ResourceId, f64> = BTreeMap::new();
        for (kind, amount) in occupation.into_iter() {
            let record = resources::record(&self.sub, host, kind)?.ok_or_else(|| {
                ModelError::UnexpectedState(format!("Node {:?} has no {:?} record", host, kind))
            })?;
            base_occupation.insert(record, amount);
        }
        let r = self.sub.add_resource(vnf_type, name, host, capacity_gbps, base_occupation)?;
        ElementKind::VnfInstance.tag(&mut self.sub.resource_mut(r)?.attributes);
        Ok(VnfInstance(r))
    }

    /// Remove the VNF instance, releasing the occupied resources of its host. Service chains
    /// traversing it are removed as well.
    pub fn remove_vnf_instance(&mut self, vnf: VnfInstance) -> Result<(), ModelError> {
        if !resource_has_kind(&self.sub, vnf.0, ElementKind::VnfInstance) {
            return Err(ModelError::InvalidArgument(format!("{:?} is no VNF instance", vnf)));
        }
        Ok(self.sub.remove_resource(vnf.0)?)
    }

    /// Add a shared risk group of nodes and fibers failing together
    pub fn add_srg(
        &mut self,
        nodes: BTreeSet<NodeId>,
        fibers: BTreeSet<Fiber>,
    ) -> Result<SharedRiskGroup, ModelError> {
        for n in nodes.iter() {
            self.expect_regular(*n)?;
        }
        let links = fibers.iter().map(|f| f.0).collect();
        Ok(SharedRiskGroup(self.sub.add_srg(nodes, links)?))
    }

    /// Remove the node from the potentially valid origins and destinations of every service
    /// chain request.
    pub(crate) fn forget_service_chain_endpoint(&mut self, node: NodeId) -> Result<(), ModelError> {
        for scr in self.service_chain_requests() {
            let mut origins = scr.potentially_valid_origins(self)?;
            let mut destinations = scr.potentially_valid_destinations(self)?;
            if origins.remove(&node) | destinations.remove(&node) {
                let attributes = &mut self.sub.demand_mut(scr.0)?.attributes;
                attributes.set(ATTNAME_SCR_VALIDORIGINS, encode_node_list(&origins));
                attributes.set(ATTNAME_SCR_VALIDDESTINATIONS, encode_node_list(&destinations));
            }
        }
        Ok(())
    }

    // ***********
    // * Listing *
    // ***********

    /// All fibers of the network
    pub fn fibers(&self) -> Vec<Fiber> {
        self.sub
            .link_ids(Layer::Wdm)
            .filter(|l| link_has_kind(&self.sub, *l, ElementKind::Fiber))
            .map(Fiber)
            .collect()
    }

    /// All IP links of the network (excluding the links towards the anycast nodes)
    pub fn ip_links(&self) -> Vec<IpLink> {
        self.sub
            .link_ids(Layer::Ip)
            .filter(|l| link_has_kind(&self.sub, *l, ElementKind::IpLink))
            .map(IpLink)
            .collect()
    }

    /// All lightpath requests of the network
    pub fn lightpath_requests(&self) -> Vec<LightpathRequest> {
        self.sub
            .demand_ids(Layer::Wdm)
            .filter(|d| demand_has_kind(&self.sub, *d, ElementKind::LightpathRequest))
            .map(LightpathRequest)
            .collect()
    }

    /// All lightpaths of the network
    pub fn lightpaths(&self) -> Vec<Lightpath> {
        self.sub
            .route_ids(Layer::Wdm)
            .filter(|r| route_has_kind(&self.sub, *r, ElementKind::Lightpath))
            .map(Lightpath)
            .collect()
    }

    /// All IP unicast demands of the network
    pub fn ip_unicast_demands(&self) -> Vec<IpUnicastDemand> {
        self.sub
            .demand_ids(Layer::Ip)
            .filter(|d| demand_has_kind(&self.sub, *d, ElementKind::IpUnicastDemand))
            .map(IpUnicastDemand)
            .collect()
    }

    /// All MPLS-TE tunnels of the network
    pub fn mpls_te_tunnels(&self) -> Vec<MplsTeTunnel> {
        self.sub
            .route_ids(Layer::Ip)
            .filter(|r| route_has_kind(&self.sub, *r, ElementKind::MplsTeTunnel))
            .map(MplsTeTunnel)
            .collect()
    }

    /// All service chain requests of the network
    pub fn service_chain_requests(&self) -> Vec<ServiceChainRequest> {
        self.sub
            .demand_ids(Layer::Ip)
            .filter(|d| demand_has_kind(&self.sub, *d, ElementKind::ServiceChainRequest))
            .map(ServiceChainRequest)
            .collect()
    }

    /// All service chains of the network
    pub fn service_chains(&self) -> Vec<ServiceChain> {
        self.sub
            .route_ids(Layer::Ip)
            .filter(|r| route_has_kind(&self.sub, *r, ElementKind::ServiceChain))
            .map(ServiceChain)
            .collect()
    }

    /// Check the invariants of every regular node. See [`consistency::check`].
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for id in self.configs.keys() {
            consistency::check(self, *id)?;
        }
        Ok(())
    }
}
