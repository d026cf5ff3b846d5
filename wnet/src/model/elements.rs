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

//! # Typed network elements
//!
//! Each element is a thin, copyable handle around the id of the substrate element that backs it.
//! All accessors take the [`WNet`] the element belongs to, similar to how a `RouterId` is
//! resolved through the network that owns the router.

use crate::model::kind::ElementKind;
use crate::model::net::WNet;
use crate::model::resources::ResourceKind;
use crate::model::types::{ModelError, LIST_SEPARATOR};
use crate::substrate::{DemandId, LinkId, NodeId, ResourceId, RouteHop, RouteId, SrgId, Substrate};

use itertools::Itertools;
use std::collections::BTreeSet;

pub(crate) const ATTNAME_SCR_VALIDORIGINS: &str = "scr_validOrigins";
pub(crate) const ATTNAME_SCR_VALIDDESTINATIONS: &str = "scr_validDestinations";
pub(crate) const ATTNAME_SCR_VNFTYPES: &str = "scr_vnfTypes";

/// Origin and destination of a typed element
pub trait Endpoints {
    /// Node where the element starts
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError>;
    /// Node where the element ends
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError>;
}

pub(crate) fn link_has_kind(s: &Substrate, id: LinkId, kind: ElementKind) -> bool {
    s.link(id).map(|l| ElementKind::of(&l.attributes) == Some(kind)).unwrap_or(false)
}

pub(crate) fn demand_has_kind(s: &Substrate, id: DemandId, kind: ElementKind) -> bool {
    s.demand(id).map(|d| ElementKind::of(&d.attributes) == Some(kind)).unwrap_or(false)
}

pub(crate) fn route_has_kind(s: &Substrate, id: RouteId, kind: ElementKind) -> bool {
    s.route(id).map(|r| ElementKind::of(&r.attributes) == Some(kind)).unwrap_or(false)
}

pub(crate) fn resource_has_kind(s: &Substrate, id: ResourceId, kind: ElementKind) -> bool {
    s.resource(id).map(|r| ElementKind::of(&r.attributes) == Some(kind)).unwrap_or(false)
}

fn expect_kind(found: Option<ElementKind>, expected: ElementKind) -> Result<(), ModelError> {
    if found == Some(expected) {
        Ok(())
    } else {
        Err(ModelError::WrongKind { expected, found })
    }
}

fn link_endpoints(net: &WNet, id: LinkId) -> Result<(NodeId, NodeId), ModelError> {
    let l = net.substrate().link(id)?;
    Ok((l.origin, l.destination))
}

fn demand_endpoints(net: &WNet, id: DemandId) -> Result<(NodeId, NodeId), ModelError> {
    let d = net.substrate().demand(id)?;
    Ok((d.origin, d.destination))
}

fn route_endpoints(net: &WNet, id: RouteId) -> Result<(NodeId, NodeId), ModelError> {
    let r = net.substrate().route(id)?;
    Ok((r.ingress, r.egress))
}

/// Encode a set of nodes as attribute value
pub(crate) fn encode_node_list(nodes: &BTreeSet<NodeId>) -> String {
    nodes.iter().map(|n| n.index()).join(&LIST_SEPARATOR.to_string())
}

/// Decode a set of nodes stored as attribute value
pub(crate) fn decode_node_list(value: &str) -> Result<BTreeSet<NodeId>, ModelError> {
    value
        .split(LIST_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map(NodeId::from)
                .map_err(|_| ModelError::FormatError(format!("Invalid node index: {}", s)))
        })
        .collect()
}

// *********
// * Fiber *
// *********

/// Optical fiber between two nodes, on the WDM layer
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Fiber(pub(crate) LinkId);

impl Fiber {
    /// Wrap a substrate link, which must be tagged as fiber.
    pub fn from_link(net: &WNet, id: LinkId) -> Result<Self, ModelError> {
        expect_kind(ElementKind::of(&net.substrate().link(id)?.attributes), ElementKind::Fiber)?;
        Ok(Self(id))
    }

    /// Returns the id of the underlying substrate link
    pub fn link_id(&self) -> LinkId {
        self.0
    }

    /// Returns true if the fiber and both its end nodes are up.
    pub fn is_up(&self, net: &WNet) -> bool {
        net.substrate().is_link_up(self.0)
    }

    /// Returns the fiber in opposite direction, if this fiber is bidirectional.
    pub fn bidirectional_pair(&self, net: &WNet) -> Result<Option<Fiber>, ModelError> {
        Ok(net.substrate().link(self.0)?.bidirectional_pair.map(Fiber))
    }

    /// Returns true if the fiber has a bidirectional pair
    pub fn is_bidirectional(&self, net: &WNet) -> Result<bool, ModelError> {
        Ok(self.bidirectional_pair(net)?.is_some())
    }

    /// Returns all lightpaths traversing this fiber
    pub fn traversing_lightpaths(&self, net: &WNet) -> BTreeSet<Lightpath> {
        let s = net.substrate();
        s.routes_traversing_link(self.0)
            .into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::Lightpath))
            .map(Lightpath)
            .collect()
    }

    /// Returns all lightpath requests that have at least one lightpath traversing this fiber.
    pub fn traversing_lp_requests_in_at_least_one_lp(
        &self,
        net: &WNet,
    ) -> BTreeSet<LightpathRequest> {
        self.traversing_lightpaths(net)
            .into_iter()
            .filter_map(|lp| lp.request(net).ok())
            .collect()
    }

    /// Returns the shared risk groups this fiber belongs to
    pub fn srgs(&self, net: &WNet) -> BTreeSet<SharedRiskGroup> {
        net.substrate().srgs_of_link(self.0).into_iter().map(SharedRiskGroup).collect()
    }
}

impl Endpoints for Fiber {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(link_endpoints(net, self.0)?.0)
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(link_endpoints(net, self.0)?.1)
    }
}

// ***********
// * IP Link *
// ***********

/// IP link between two nodes
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct IpLink(pub(crate) LinkId);

impl IpLink {
    /// Wrap a substrate link, which must be tagged as IP link.
    pub fn from_link(net: &WNet, id: LinkId) -> Result<Self, ModelError> {
        expect_kind(ElementKind::of(&net.substrate().link(id)?.attributes), ElementKind::IpLink)?;
        Ok(Self(id))
    }

    /// Returns the id of the underlying substrate link
    pub fn link_id(&self) -> LinkId {
        self.0
    }

    /// Current capacity of the IP link in Gbps. For links coupled to lightpath requests, this is
    /// the sum of the line rates of the lightpaths currently carrying traffic.
    pub fn capacity_gbps(&self, net: &WNet) -> Result<f64, ModelError> {
        Ok(net.substrate().link(self.0)?.capacity)
    }

    /// Returns true if the link and both its end nodes are up, and the link has capacity.
    pub fn is_up(&self, net: &WNet) -> bool {
        net.substrate().is_link_up(self.0) && self.capacity_gbps(net).unwrap_or(0.0) > 0.0
    }

    /// Returns the IP link in opposite direction, if this link is bidirectional.
    pub fn bidirectional_pair(&self, net: &WNet) -> Result<Option<IpLink>, ModelError> {
        Ok(net.substrate().link(self.0)?.bidirectional_pair.map(IpLink))
    }

    /// Returns the lightpath requests providing the capacity of this IP link
    pub fn coupled_lightpath_requests(&self, net: &WNet) -> BTreeSet<LightpathRequest> {
        let s = net.substrate();
        s.demand_ids(crate::substrate::Layer::Wdm)
            .filter(|d| demand_has_kind(s, *d, ElementKind::LightpathRequest))
            .filter(|d| s.demand(*d).map(|x| x.coupled_link == Some(self.0)).unwrap_or(false))
            .map(LightpathRequest)
            .collect()
    }
}

impl Endpoints for IpLink {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(link_endpoints(net, self.0)?.0)
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(link_endpoints(net, self.0)?.1)
    }
}

// *********************
// * Lightpath Request *
// *********************

/// Request for an optical connection between two nodes, realized by one or more lightpaths.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct LightpathRequest(pub(crate) DemandId);

impl LightpathRequest {
    /// Wrap a substrate demand, which must be tagged as lightpath request.
    pub fn from_demand(net: &WNet, id: DemandId) -> Result<Self, ModelError> {
        expect_kind(
            ElementKind::of(&net.substrate().demand(id)?.attributes),
            ElementKind::LightpathRequest,
        )?;
        Ok(Self(id))
    }

    /// Returns the id of the underlying substrate demand
    pub fn demand_id(&self) -> DemandId {
        self.0
    }

    /// Line rate of the lightpaths realizing this request, in Gbps
    pub fn line_rate_gbps(&self, net: &WNet) -> Result<f64, ModelError> {
        Ok(net.substrate().demand(self.0)?.offered)
    }

    /// Returns all lightpaths realizing this request
    pub fn lightpaths(&self, net: &WNet) -> BTreeSet<Lightpath> {
        let s = net.substrate();
        s.routes_of_demand(self.0)
            .into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::Lightpath))
            .map(Lightpath)
            .collect()
    }

    /// Returns the IP link whose capacity is provided by this request
    pub fn coupled_ip_link(&self, net: &WNet) -> Result<Option<IpLink>, ModelError> {
        Ok(net.substrate().demand(self.0)?.coupled_link.map(IpLink))
    }

    /// Total traffic currently carried by the lightpaths of this request, in Gbps
    pub fn carried_gbps(&self, net: &WNet) -> f64 {
        self.lightpaths(net)
            .iter()
            .filter_map(|lp| lp.carried_gbps(net).ok())
            .fold(0.0, |acc, x| acc + x)
    }

    /// Returns true if at least one lightpath currently carries traffic.
    pub fn is_up(&self, net: &WNet) -> bool {
        self.carried_gbps(net) > 0.0
    }
}

impl Endpoints for LightpathRequest {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(demand_endpoints(net, self.0)?.0)
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(demand_endpoints(net, self.0)?.1)
    }
}

// *************
// * Lightpath *
// *************

/// Optical connection routed over a sequence of fibers
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Lightpath(pub(crate) RouteId);

impl Lightpath {
    /// Returns the id of the underlying substrate route
    pub fn route_id(&self) -> RouteId {
        self.0
    }

    /// Returns the request realized by this lightpath
    pub fn request(&self, net: &WNet) -> Result<LightpathRequest, ModelError> {
        Ok(LightpathRequest(net.substrate().route(self.0)?.demand))
    }

    /// Returns the sequence of traversed fibers
    pub fn fibers(&self, net: &WNet) -> Result<Vec<Fiber>, ModelError> {
        Ok(net
            .substrate()
            .route(self.0)?
            .path
            .iter()
            .filter_map(|hop| match hop {
                RouteHop::Link(l) => Some(Fiber(*l)),
                RouteHop::Resource(_) => None,
            })
            .collect())
    }

    /// Returns the sequence of traversed nodes, including the end nodes.
    pub fn seq_nodes(&self, net: &WNet) -> Result<Vec<NodeId>, ModelError> {
        Ok(net.substrate().route_nodes(self.0)?)
    }

    /// Returns the nodes where this lightpath is optically switched without being terminated.
    pub fn nodes_where_express_switched(&self, net: &WNet) -> Result<BTreeSet<NodeId>, ModelError> {
        let seq = self.seq_nodes(net)?;
        Ok(seq.iter().skip(1).take(seq.len().saturating_sub(2)).cloned().collect())
    }

    /// Returns true if all traversed fibers and nodes are up.
    pub fn is_up(&self, net: &WNet) -> Result<bool, ModelError> {
        Ok(net.substrate().is_route_up(self.0)?)
    }

    /// Traffic currently carried by the lightpath, in Gbps
    pub fn carried_gbps(&self, net: &WNet) -> Result<f64, ModelError> {
        Ok(net.substrate().route(self.0)?.carried)
    }
}

impl Endpoints for Lightpath {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(route_endpoints(net, self.0)?.0)
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(route_endpoints(net, self.0)?.1)
    }
}

// *********************
// * IP Unicast Demand *
// *********************

/// Unicast IP traffic demand between two nodes
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct IpUnicastDemand(pub(crate) DemandId);

impl IpUnicastDemand {
    /// Offered traffic in Gbps
    pub fn offered_gbps(&self, net: &WNet) -> Result<f64, ModelError> {
        Ok(net.substrate().demand(self.0)?.offered)
    }

    /// Returns the tunnels carrying this demand
    pub fn tunnels(&self, net: &WNet) -> BTreeSet<MplsTeTunnel> {
        let s = net.substrate();
        s.routes_of_demand(self.0)
            .into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::MplsTeTunnel))
            .map(MplsTeTunnel)
            .collect()
    }
}

impl Endpoints for IpUnicastDemand {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(demand_endpoints(net, self.0)?.0)
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(demand_endpoints(net, self.0)?.1)
    }
}

// *******************
// * MPLS-TE Tunnel *
// *******************

/// IP connection carrying an IP unicast demand over a sequence of IP links
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct MplsTeTunnel(pub(crate) RouteId);

impl MplsTeTunnel {
    /// Returns the demand carried by this tunnel
    pub fn demand(&self, net: &WNet) -> Result<IpUnicastDemand, ModelError> {
        Ok(IpUnicastDemand(net.substrate().route(self.0)?.demand))
    }

    /// Returns the sequence of traversed IP links
    pub fn ip_links(&self, net: &WNet) -> Result<Vec<IpLink>, ModelError> {
        Ok(net
            .substrate()
            .route(self.0)?
            .path
            .iter()
            .filter_map(|hop| match hop {
                RouteHop::Link(l) => Some(IpLink(*l)),
                RouteHop::Resource(_) => None,
            })
            .collect())
    }

    /// Returns the sequence of traversed nodes
    pub fn seq_nodes(&self, net: &WNet) -> Result<Vec<NodeId>, ModelError> {
        Ok(net.substrate().route_nodes(self.0)?)
    }
}

impl Endpoints for MplsTeTunnel {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(route_endpoints(net, self.0)?.0)
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(route_endpoints(net, self.0)?.1)
    }
}

// *************************
// * Service Chain Request *
// *************************

/// Request for traffic that must traverse a sequence of VNF types. The request may start at any
/// of its potentially valid origins, and end at any of its potentially valid destinations.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ServiceChainRequest(pub(crate) DemandId);

impl ServiceChainRequest {
    /// Nodes where the service chain may be injected
    pub fn potentially_valid_origins(&self, net: &WNet) -> Result<BTreeSet<NodeId>, ModelError> {
        let d = net.substrate().demand(self.0)?;
        decode_node_list(d.attributes.get_str(ATTNAME_SCR_VALIDORIGINS, ""))
    }

    /// Nodes where the service chain may end
    pub fn potentially_valid_destinations(
        &self,
        net: &WNet,
    ) -> Result<BTreeSet<NodeId>, ModelError> {
        let d = net.substrate().demand(self.0)?;
        decode_node_list(d.attributes.get_str(ATTNAME_SCR_VALIDDESTINATIONS, ""))
    }

    /// Sequence of VNF types the traffic must traverse
    pub fn vnf_types(&self, net: &WNet) -> Result<Vec<String>, ModelError> {
        let d = net.substrate().demand(self.0)?;
        Ok(d.attributes
            .get_str(ATTNAME_SCR_VNFTYPES, "")
            .split(LIST_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    /// Returns the service chains realizing this request
    pub fn service_chains(&self, net: &WNet) -> BTreeSet<ServiceChain> {
        let s = net.substrate();
        s.routes_of_demand(self.0)
            .into_iter()
            .filter(|r| route_has_kind(s, *r, ElementKind::ServiceChain))
            .map(ServiceChain)
            .collect()
    }
}

// *****************
// * Service Chain *
// *****************

/// Realization of a service chain request: a sequence of IP links and VNF instances. In the
/// substrate, the route starts at the anycast origin and ends at the anycast destination.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ServiceChain(pub(crate) RouteId);

impl ServiceChain {
    /// Returns the request realized by this service chain
    pub fn request(&self, net: &WNet) -> Result<ServiceChainRequest, ModelError> {
        Ok(ServiceChainRequest(net.substrate().route(self.0)?.demand))
    }

    /// Sequence of traversed regular IP nodes, without consecutive repetitions. The anycast
    /// nodes are not part of it.
    pub fn sequence_of_traversed_ip_nodes(&self, net: &WNet) -> Result<Vec<NodeId>, ModelError> {
        let seq = net.substrate().route_nodes(self.0)?;
        if seq.len() < 3 {
            return Err(ModelError::UnexpectedState(format!(
                "Service chain {:?} does not traverse any regular node",
                self.0
            )));
        }
        Ok(seq[1..seq.len() - 1].to_vec())
    }

    /// Returns the traversed IP links, excluding the links towards the anycast nodes.
    pub fn ip_links(&self, net: &WNet) -> Result<Vec<IpLink>, ModelError> {
        let s = net.substrate();
        Ok(s.route(self.0)?
            .path
            .iter()
            .filter_map(|hop| match hop {
                RouteHop::Link(l) if link_has_kind(s, *l, ElementKind::IpLink) => Some(IpLink(*l)),
                _ => None,
            })
            .collect())
    }

    /// Returns the traversed VNF instances
    pub fn vnf_instances(&self, net: &WNet) -> Result<Vec<VnfInstance>, ModelError> {
        Ok(net
            .substrate()
            .route(self.0)?
            .path
            .iter()
            .filter_map(|hop| match hop {
                RouteHop::Resource(r) => Some(VnfInstance(*r)),
                RouteHop::Link(_) => None,
            })
            .collect())
    }
}

impl Endpoints for ServiceChain {
    fn a(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(self.sequence_of_traversed_ip_nodes(net)?[0])
    }
    fn b(&self, net: &WNet) -> Result<NodeId, ModelError> {
        let seq = self.sequence_of_traversed_ip_nodes(net)?;
        Ok(seq[seq.len() - 1])
    }
}

// ****************
// * VNF Instance *
// ****************

/// Instance of a virtual network function, occupying CPU, RAM and HD of its host node
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct VnfInstance(pub(crate) ResourceId);

impl VnfInstance {
    /// Returns the id of the underlying substrate resource
    pub fn resource_id(&self) -> ResourceId {
        self.0
    }

    /// Node hosting the instance
    pub fn hosting_node(&self, net: &WNet) -> Result<NodeId, ModelError> {
        Ok(net.substrate().resource(self.0)?.host)
    }

    /// User-defined VNF type
    pub fn vnf_type<'a>(&self, net: &'a WNet) -> Result<&'a str, ModelError> {
        Ok(net.substrate().resource(self.0)?.resource_type.as_str())
    }

    /// Name of the instance
    pub fn name<'a>(&self, net: &'a WNet) -> Result<&'a str, ModelError> {
        Ok(net.substrate().resource(self.0)?.name.as_str())
    }

    /// Processing capacity of the instance, in Gbps
    pub fn capacity_gbps(&self, net: &WNet) -> Result<f64, ModelError> {
        Ok(net.substrate().resource(self.0)?.capacity)
    }

    /// Amount of the host's resource of the given kind occupied by this instance
    pub fn occupation(&self, net: &WNet, kind: ResourceKind) -> Result<f64, ModelError> {
        let s = net.substrate();
        let r = s.resource(self.0)?;
        Ok(s.resources_at_of_type(r.host, kind.tag())
            .iter()
            .filter_map(|base| r.base_occupation.get(base))
            .fold(0.0, |acc, x| acc + x))
    }
}

// *********************
// * Shared Risk Group *
// *********************

/// Set of nodes and fibers that fail together
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct SharedRiskGroup(pub(crate) SrgId);

impl SharedRiskGroup {
    /// Nodes of the group
    pub fn nodes(&self, net: &WNet) -> Result<BTreeSet<NodeId>, ModelError> {
        Ok(net.substrate().srg(self.0)?.nodes.clone())
    }

    /// Fibers of the group
    pub fn fibers(&self, net: &WNet) -> Result<BTreeSet<Fiber>, ModelError> {
        Ok(net.substrate().srg(self.0)?.links.iter().cloned().map(Fiber).collect())
    }
}
