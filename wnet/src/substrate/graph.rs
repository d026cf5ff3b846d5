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

//! # Generic multi-layer substrate
//!
//! The substrate stores untyped nodes, links, demands, routes, resources and shared risk groups.
//! It knows nothing about fibers or lightpaths. The typed model in [`crate::model`] is layered on
//! top of it.

use crate::substrate::attributes::Attributes;
use crate::substrate::types::*;

use log::*;
use petgraph::prelude::*;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet};

/// # Substrate
/// Owns every element of the network. Links are stored as edges of a [`LayerGraph`], such that
/// incident links can be enumerated efficiently. All other elements are stored in ordered maps,
/// which makes every enumeration deterministic.
#[derive(Debug, Clone, Default)]
pub struct Substrate {
    graph: LayerGraph,
    nodes: BTreeMap<NodeId, NodeData>,
    links: BTreeMap<LinkId, LinkData>,
    demands: BTreeMap<DemandId, DemandData>,
    routes: BTreeMap<RouteId, RouteData>,
    resources: BTreeMap<ResourceId, ResourceData>,
    srgs: BTreeMap<SrgId, SrgData>,
    next_demand: u32,
    next_route: u32,
    next_resource: u32,
    next_srg: u32,
}

impl Substrate {
    /// Generate an empty substrate
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the multi-layer graph
    pub fn graph(&self) -> &LayerGraph {
        &self.graph
    }

    // *********
    // * Nodes *
    // *********

    /// Add a new node. The node is up, placed at `(0, 0)` and has no attributes.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.graph.add_node(());
        self.nodes.insert(
            id,
            NodeData {
                name: name.into(),
                position: (0.0, 0.0),
                population: 0.0,
                up: true,
                tags: BTreeSet::new(),
                attributes: Attributes::new(),
            },
        );
        id
    }

    /// Returns true if the node exists
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns a reference to the node data
    pub fn node(&self, id: NodeId) -> Result<&NodeData, SubstrateError> {
        self.nodes.get(&id).ok_or(SubstrateError::NodeNotFound(id))
    }

    /// Returns a mutable reference to the node data
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, SubstrateError> {
        self.nodes.get_mut(&id).ok_or(SubstrateError::NodeNotFound(id))
    }

    /// Iterate over all node ids
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().cloned()
    }

    /// Change the failure state of a node. This does not touch any other element.
    pub fn set_node_up(&mut self, id: NodeId, up: bool) -> Result<(), SubstrateError> {
        self.node_mut(id)?.up = up;
        Ok(())
    }

    /// Returns true if the node is up. Unknown nodes are reported as down.
    pub fn is_node_up(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map(|n| n.up).unwrap_or(false)
    }

    /// Remove a node together with all elements depending on it: incident links, demands
    /// starting or ending at the node, routes traversing it, hosted resources and its shared risk
    /// group memberships.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SubstrateError> {
        if !self.contains_node(id) {
            return Err(SubstrateError::NodeNotFound(id));
        }

        let routes: Vec<RouteId> = self
            .routes
            .keys()
            .cloned()
            .filter(|r| self.route_nodes(*r).map(|seq| seq.contains(&id)).unwrap_or(false))
            .collect();
        for r in routes {
            self.remove_route(r)?;
        }

        let demands: Vec<DemandId> = self
            .demands
            .iter()
            .filter(|(_, d)| d.origin == id || d.destination == id)
            .map(|(k, _)| *k)
            .collect();
        for d in demands {
            self.remove_demand(d)?;
        }

        let links: Vec<LinkId> = self
            .graph
            .edges_directed(id, Outgoing)
            .chain(self.graph.edges_directed(id, Incoming))
            .map(|e| e.id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for l in links {
            self.remove_link(l)?;
        }

        for r in self.resources_at(id) {
            self.remove_resource(r)?;
        }

        for srg in self.srgs.values_mut() {
            srg.nodes.remove(&id);
        }

        self.graph.remove_node(id);
        self.nodes.remove(&id);
        trace!("Removed node {:?} from the substrate", id);
        Ok(())
    }

    // *********
    // * Links *
    // *********

    /// Add a new directed link between two existing nodes.
    pub fn add_link(
        &mut self,
        layer: Layer,
        origin: NodeId,
        destination: NodeId,
        capacity: f64,
    ) -> Result<LinkId, SubstrateError> {
        self.node(origin)?;
        self.node(destination)?;
        let id = self.graph.add_edge(origin, destination, layer);
        self.links.insert(
            id,
            LinkData {
                layer,
                origin,
                destination,
                capacity,
                up: true,
                bidirectional_pair: None,
                attributes: Attributes::new(),
            },
        );
        Ok(id)
    }

    /// Declare two opposite links as the two directions of the same bidirectional link.
    pub fn set_bidirectional_pair(&mut self, a: LinkId, b: LinkId) -> Result<(), SubstrateError> {
        let la = self.link(a)?;
        let lb = self.link(b)?;
        if la.origin != lb.destination || la.destination != lb.origin || a == b {
            return Err(SubstrateError::NotOppositeLinks(a, b));
        }
        if la.layer != lb.layer {
            return Err(SubstrateError::LayerMismatch { expected: la.layer, found: lb.layer });
        }
        self.link_mut(a)?.bidirectional_pair = Some(b);
        self.link_mut(b)?.bidirectional_pair = Some(a);
        Ok(())
    }

    /// Returns true if the link exists
    pub fn contains_link(&self, id: LinkId) -> bool {
        self.links.contains_key(&id)
    }

    /// Returns a reference to the link data
    pub fn link(&self, id: LinkId) -> Result<&LinkData, SubstrateError> {
        self.links.get(&id).ok_or(SubstrateError::LinkNotFound(id))
    }

    /// Returns a mutable reference to the link data
    pub fn link_mut(&mut self, id: LinkId) -> Result<&mut LinkData, SubstrateError> {
        self.links.get_mut(&id).ok_or(SubstrateError::LinkNotFound(id))
    }

    /// Iterate over all link ids of the given layer
    pub fn link_ids(&self, layer: Layer) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().filter(move |(_, l)| l.layer == layer).map(|(k, _)| *k)
    }

    /// Returns true if the link is usable: the link itself and both end nodes are up.
    pub fn is_link_up(&self, id: LinkId) -> bool {
        match self.links.get(&id) {
            Some(l) => l.up && self.is_node_up(l.origin) && self.is_node_up(l.destination),
            None => false,
        }
    }

    /// Returns all links of the layer starting at the node
    pub fn outgoing_links(&self, node: NodeId, layer: Layer) -> Vec<LinkId> {
        self.incident_links(node, layer, Outgoing)
    }

    /// Returns all links of the layer ending at the node
    pub fn incoming_links(&self, node: NodeId, layer: Layer) -> Vec<LinkId> {
        self.incident_links(node, layer, Incoming)
    }

    /// Returns all links of the layer from `origin` to `destination`
    pub fn node_pair_links(&self, origin: NodeId, destination: NodeId, layer: Layer) -> Vec<LinkId> {
        self.outgoing_links(origin, layer)
            .into_iter()
            .filter(|l| self.links[l].destination == destination)
            .collect()
    }

    fn incident_links(&self, node: NodeId, layer: Layer, dir: Direction) -> Vec<LinkId> {
        if !self.contains_node(node) {
            return Vec::new();
        }
        let mut links: Vec<LinkId> = self
            .graph
            .edges_directed(node, dir)
            .filter(|e| *e.weight() == layer)
            .map(|e| e.id())
            .collect();
        links.sort();
        links
    }

    /// Remove a link, together with all routes traversing it.
    pub fn remove_link(&mut self, id: LinkId) -> Result<(), SubstrateError> {
        let link = self.links.remove(&id).ok_or(SubstrateError::LinkNotFound(id))?;
        if let Some(pair) = link.bidirectional_pair {
            if let Some(p) = self.links.get_mut(&pair) {
                p.bidirectional_pair = None;
            }
        }
        for r in self.routes_traversing_link(id) {
            self.remove_route(r)?;
        }
        for d in self.demands.values_mut() {
            if d.coupled_link == Some(id) {
                d.coupled_link = None;
            }
        }
        for srg in self.srgs.values_mut() {
            srg.links.remove(&id);
        }
        self.graph.remove_edge(id);
        Ok(())
    }

    // ***********
    // * Demands *
    // ***********

    /// Add a new demand between two existing nodes.
    pub fn add_demand(
        &mut self,
        layer: Layer,
        origin: NodeId,
        destination: NodeId,
        offered: f64,
    ) -> Result<DemandId, SubstrateError> {
        self.node(origin)?;
        self.node(destination)?;
        let id = DemandId(self.next_demand);
        self.next_demand += 1;
        self.demands.insert(
            id,
            DemandData {
                layer,
                origin,
                destination,
                offered,
                coupled_link: None,
                attributes: Attributes::new(),
            },
        );
        Ok(id)
    }

    /// Returns a reference to the demand data
    pub fn demand(&self, id: DemandId) -> Result<&DemandData, SubstrateError> {
        self.demands.get(&id).ok_or(SubstrateError::DemandNotFound(id))
    }

    /// Returns a mutable reference to the demand data
    pub fn demand_mut(&mut self, id: DemandId) -> Result<&mut DemandData, SubstrateError> {
        self.demands.get_mut(&id).ok_or(SubstrateError::DemandNotFound(id))
    }

    /// Iterate over all demand ids of the given layer
    pub fn demand_ids(&self, layer: Layer) -> impl Iterator<Item = DemandId> + '_ {
        self.demands.iter().filter(move |(_, d)| d.layer == layer).map(|(k, _)| *k)
    }

    /// Returns all demands of the layer starting at the node
    pub fn outgoing_demands(&self, node: NodeId, layer: Layer) -> Vec<DemandId> {
        self.demands
            .iter()
            .filter(|(_, d)| d.layer == layer && d.origin == node)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Returns all demands of the layer ending at the node
    pub fn incoming_demands(&self, node: NodeId, layer: Layer) -> Vec<DemandId> {
        self.demands
            .iter()
            .filter(|(_, d)| d.layer == layer && d.destination == node)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Remove a demand together with all its routes.
    pub fn remove_demand(&mut self, id: DemandId) -> Result<(), SubstrateError> {
        self.demands.remove(&id).ok_or(SubstrateError::DemandNotFound(id))?;
        for r in self.routes_of_demand(id) {
            self.remove_route(r)?;
        }
        Ok(())
    }

    // **********
    // * Routes *
    // **********

    /// Add a route for a demand. The route starts at `ingress` and must form a continuous path:
    /// every link must start where the previous hop ended, and every resource must be hosted at
    /// the node where the route currently is. All links must be on the layer of the demand.
    pub fn add_route(
        &mut self,
        demand: DemandId,
        ingress: NodeId,
        path: Vec<RouteHop>,
        carried: f64,
    ) -> Result<RouteId, SubstrateError> {
        let layer = self.demand(demand)?.layer;
        self.node(ingress)?;
        let mut current = ingress;
        for (i, hop) in path.iter().enumerate() {
            match hop {
                RouteHop::Link(l) => {
                    let link = self.link(*l)?;
                    if link.layer != layer {
                        return Err(SubstrateError::LayerMismatch {
                            expected: layer,
                            found: link.layer,
                        });
                    }
                    if link.origin != current {
                        return Err(SubstrateError::DiscontinuousRoute(i));
                    }
                    current = link.destination;
                }
                RouteHop::Resource(r) => {
                    if self.resource(*r)?.host != current {
                        return Err(SubstrateError::DiscontinuousRoute(i));
                    }
                }
            }
        }
        let id = RouteId(self.next_route);
        self.next_route += 1;
        self.routes.insert(
            id,
            RouteData {
                layer,
                demand,
                ingress,
                egress: current,
                path,
                carried,
                attributes: Attributes::new(),
            },
        );
        Ok(id)
    }

    /// Returns a reference to the route data
    pub fn route(&self, id: RouteId) -> Result<&RouteData, SubstrateError> {
        self.routes.get(&id).ok_or(SubstrateError::RouteNotFound(id))
    }

    /// Returns a mutable reference to the route data
    pub fn route_mut(&mut self, id: RouteId) -> Result<&mut RouteData, SubstrateError> {
        self.routes.get_mut(&id).ok_or(SubstrateError::RouteNotFound(id))
    }

    /// Iterate over all route ids of the given layer
    pub fn route_ids(&self, layer: Layer) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.iter().filter(move |(_, r)| r.layer == layer).map(|(k, _)| *k)
    }

    /// Remove a single route
    pub fn remove_route(&mut self, id: RouteId) -> Result<(), SubstrateError> {
        self.routes.remove(&id).map(|_| ()).ok_or(SubstrateError::RouteNotFound(id))
    }

    /// Returns all routes carrying the demand
    pub fn routes_of_demand(&self, demand: DemandId) -> Vec<RouteId> {
        self.routes.iter().filter(|(_, r)| r.demand == demand).map(|(k, _)| *k).collect()
    }

    /// Returns all routes traversing the link
    pub fn routes_traversing_link(&self, link: LinkId) -> Vec<RouteId> {
        self.routes
            .iter()
            .filter(|(_, r)| r.path.contains(&RouteHop::Link(link)))
            .map(|(k, _)| *k)
            .collect()
    }

    /// Returns all routes traversing the resource
    pub fn routes_traversing_resource(&self, resource: ResourceId) -> Vec<RouteId> {
        self.routes
            .iter()
            .filter(|(_, r)| r.path.contains(&RouteHop::Resource(resource)))
            .map(|(k, _)| *k)
            .collect()
    }

    /// Returns all routes of the layer starting at the node
    pub fn outgoing_routes(&self, node: NodeId, layer: Layer) -> Vec<RouteId> {
        self.routes
            .iter()
            .filter(|(_, r)| r.layer == layer && r.ingress == node)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Returns all routes of the layer ending at the node
    pub fn incoming_routes(&self, node: NodeId, layer: Layer) -> Vec<RouteId> {
        self.routes
            .iter()
            .filter(|(_, r)| r.layer == layer && r.egress == node)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Returns all routes of the layer starting at, ending at or traversing the node
    pub fn associated_routes(&self, node: NodeId, layer: Layer) -> Vec<RouteId> {
        self.routes
            .iter()
            .filter(|(_, r)| r.layer == layer)
            .map(|(k, _)| *k)
            .filter(|k| self.route_nodes(*k).map(|seq| seq.contains(&node)).unwrap_or(false))
            .collect()
    }

    /// Returns the sequence of nodes visited by the route, starting at the ingress node. A node
    /// hosting a traversed resource is only listed once.
    pub fn route_nodes(&self, id: RouteId) -> Result<Vec<NodeId>, SubstrateError> {
        let route = self.route(id)?;
        let mut result = vec![route.ingress];
        for hop in route.path.iter() {
            let next = match hop {
                RouteHop::Link(l) => self.link(*l)?.destination,
                RouteHop::Resource(r) => self.resource(*r)?.host,
            };
            if result.last() != Some(&next) {
                result.push(next);
            }
        }
        Ok(result)
    }

    /// Returns true if every traversed link and every traversed node is up.
    pub fn is_route_up(&self, id: RouteId) -> Result<bool, SubstrateError> {
        let route = self.route(id)?;
        let links_up = route.path.iter().all(|hop| match hop {
            RouteHop::Link(l) => self.is_link_up(*l),
            RouteHop::Resource(_) => true,
        });
        Ok(links_up && self.route_nodes(id)?.iter().all(|n| self.is_node_up(*n)))
    }

    // *************
    // * Resources *
    // *************

    /// Add a resource hosted at a node. The resource may occupy capacity in other resources of
    /// the same node (its base resources).
    pub fn add_resource(
        &mut self,
        resource_type: impl Into<String>,
        name: impl Into<String>,
        host: NodeId,
        capacity: f64,
        base_occupation: BTreeMap<ResourceId, f64>,
    ) -> Result<ResourceId, SubstrateError> {
        self.node(host)?;
        for base in base_occupation.keys() {
            if self.resource(*base)?.host != host {
                return Err(SubstrateError::ForeignBaseResource(*base));
            }
        }
        let id = ResourceId(self.next_resource);
        self.next_resource += 1;
        self.resources.insert(
            id,
            ResourceData {
                resource_type: resource_type.into(),
                name: name.into(),
                host,
                capacity,
                base_occupation,
                attributes: Attributes::new(),
            },
        );
        Ok(id)
    }

    /// Returns a reference to the resource data
    pub fn resource(&self, id: ResourceId) -> Result<&ResourceData, SubstrateError> {
        self.resources.get(&id).ok_or(SubstrateError::ResourceNotFound(id))
    }

    /// Returns a mutable reference to the resource data
    pub fn resource_mut(&mut self, id: ResourceId) -> Result<&mut ResourceData, SubstrateError> {
        self.resources.get_mut(&id).ok_or(SubstrateError::ResourceNotFound(id))
    }

    /// Returns all resources hosted at the node
    pub fn resources_at(&self, node: NodeId) -> Vec<ResourceId> {
        self.resources.iter().filter(|(_, r)| r.host == node).map(|(k, _)| *k).collect()
    }

    /// Returns all resources of the given type hosted at the node
    pub fn resources_at_of_type(&self, node: NodeId, resource_type: &str) -> Vec<ResourceId> {
        self.resources
            .iter()
            .filter(|(_, r)| r.host == node && r.resource_type == resource_type)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Returns the capacity of the resource occupied by other resources using it as a base
    /// resource.
    pub fn occupied_capacity(&self, id: ResourceId) -> f64 {
        self.resources
            .values()
            .filter_map(|r| r.base_occupation.get(&id))
            .fold(0.0, |acc, x| acc + x)
    }

    /// Remove a resource together with all routes traversing it. Resources using it as a base
    /// resource no longer occupy it.
    pub fn remove_resource(&mut self, id: ResourceId) -> Result<(), SubstrateError> {
        self.resources.remove(&id).ok_or(SubstrateError::ResourceNotFound(id))?;
        for r in self.routes_traversing_resource(id) {
            self.remove_route(r)?;
        }
        for r in self.resources.values_mut() {
            r.base_occupation.remove(&id);
        }
        Ok(())
    }

    // ***********************
    // * Shared Risk Groups *
    // ***********************

    /// Add a shared risk group
    pub fn add_srg(
        &mut self,
        nodes: BTreeSet<NodeId>,
        links: BTreeSet<LinkId>,
    ) -> Result<SrgId, SubstrateError> {
        for n in nodes.iter() {
            self.node(*n)?;
        }
        for l in links.iter() {
            self.link(*l)?;
        }
        let id = SrgId(self.next_srg);
        self.next_srg += 1;
        self.srgs.insert(id, SrgData { nodes, links });
        Ok(id)
    }

    /// Returns a reference to the shared risk group
    pub fn srg(&self, id: SrgId) -> Result<&SrgData, SubstrateError> {
        self.srgs.get(&id).ok_or(SubstrateError::SrgNotFound(id))
    }

    /// Returns all shared risk groups containing the node
    pub fn srgs_of_node(&self, node: NodeId) -> Vec<SrgId> {
        self.srgs.iter().filter(|(_, s)| s.nodes.contains(&node)).map(|(k, _)| *k).collect()
    }

    /// Returns all shared risk groups containing the link
    pub fn srgs_of_link(&self, link: LinkId) -> Vec<SrgId> {
        self.srgs.iter().filter(|(_, s)| s.links.contains(&link)).map(|(k, _)| *k).collect()
    }
}
