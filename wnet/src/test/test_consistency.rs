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

//! Test the cross-layer invariants of the nodes.

use crate::model::consistency::{check, verify};
use crate::model::{ConsistencyError, ResourceKind, ServiceChainHop, WNet};
use crate::substrate::NodeId;
use lazy_static::lazy_static;
use maplit::{btreemap, btreeset};

lazy_static! {
    static ref A: NodeId = 2.into();
    static ref B: NodeId = 3.into();
    static ref C: NodeId = 4.into();
}

/// # Test network
///
/// Chain of three nodes with every kind of element.
///
/// ```text
/// A ==== B ==== C
/// ```
///
/// - lightpath A -> B -> C, coupled to the IP link A -> C
/// - IP links A <-> B and B <-> C, carrying a tunnel A -> B -> C
/// - service chain A -> firewall at B -> C
/// - shared risk group containing B and the fiber A -> B
fn get_test_net() -> WNet {
    let mut net = WNet::new();
    assert_eq!(*A, net.add_node("A", (0.0, 0.0)).unwrap());
    assert_eq!(*B, net.add_node("B", (1.0, 0.0)).unwrap());
    assert_eq!(*C, net.add_node("C", (2.0, 0.0)).unwrap());

    let (ab, _) = net.add_fiber(*A, *B, true).unwrap();
    let (bc, _) = net.add_fiber(*B, *C, true).unwrap();
    let (ac_ip, _) = net.add_ip_link(*A, *C, 0.0, false).unwrap();
    let lpr = net.add_lightpath_request(*A, *C, 100.0).unwrap();
    net.add_lightpath(lpr, vec![ab, bc]).unwrap();
    net.couple_lightpath_request(lpr, ac_ip).unwrap();

    let (ab_ip, _) = net.add_ip_link(*A, *B, 10.0, true).unwrap();
    let (bc_ip, _) = net.add_ip_link(*B, *C, 10.0, true).unwrap();
    let demand = net.add_ip_unicast_demand(*A, *C, 5.0).unwrap();
    net.add_mpls_te_tunnel(demand, vec![ab_ip, bc_ip], 5.0).unwrap();

    net.node_mut(*B).unwrap().set_capacity(ResourceKind::Cpu, 4.0).unwrap();
    let fw = net
        .add_vnf_instance(*B, "firewall", "fw", 10.0, btreemap! {ResourceKind::Cpu => 1.0})
        .unwrap();
    let scr = net
        .add_service_chain_request(btreeset! {*A}, btreeset! {*C}, vec!["firewall".to_string()], 2.0)
        .unwrap();
    net.add_service_chain(
        scr,
        vec![ServiceChainHop::Link(ab_ip), ServiceChainHop::Vnf(fw), ServiceChainHop::Link(bc_ip)],
        2.0,
    )
    .unwrap();

    net.add_srg(btreeset! {*B}, btreeset! {ab}).unwrap();
    net
}

#[test]
fn test_consistent_network() {
    let net = get_test_net();
    for n in net.nodes() {
        assert_eq!(verify(&net, n), Ok(()));
        assert_eq!(check(&net, n), Ok(()));
    }
    net.check_consistency().unwrap();
}

#[test]
fn test_consistent_after_failure() {
    let mut net = get_test_net();
    net.node_mut(*B).unwrap().set_as_down().unwrap();
    net.check_consistency().unwrap();
    net.node_mut(*B).unwrap().set_as_up().unwrap();
    net.check_consistency().unwrap();
}

#[test]
fn test_consistent_after_removal() {
    let mut net = get_test_net();
    net.node_mut(*B).unwrap().remove().unwrap();
    net.check_consistency().unwrap();

    // a removed node is trivially consistent
    assert_eq!(verify(&net, *B), Ok(()));
    assert_eq!(verify(&net, net.anycast_origin()), Ok(()));
}

#[test]
fn test_mutual_neighbors() {
    let net = get_test_net();
    let b = net.node(*B).unwrap();
    assert_eq!(b.neighbors_via_outgoing_fibers(), btreeset! {*A, *C});
    for n in b.neighbors_via_outgoing_fibers() {
        assert!(net.node(n).unwrap().neighbors_via_incoming_fibers().contains(&*B));
    }
}

#[test]
fn test_duplicate_name() {
    let mut net = get_test_net();
    // bypass the name checks
    net.sub.node_mut(*B).unwrap().name = "A".to_string();
    assert_eq!(verify(&net, *A), Err(ConsistencyError::DuplicateName("A".to_string())));
    assert_eq!(verify(&net, *B), Err(ConsistencyError::DuplicateName("A".to_string())));
    assert_eq!(verify(&net, *C), Ok(()));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn test_check_panics_in_debug() {
    let mut net = get_test_net();
    net.sub.node_mut(*C).unwrap().name = "B".to_string();
    let _ = check(&net, *C);
}

#[test]
#[cfg(not(debug_assertions))]
fn test_check_ignores_violation_in_release() {
    let mut net = get_test_net();
    net.sub.node_mut(*C).unwrap().name = "B".to_string();
    assert_eq!(check(&net, *C), Ok(()));
    assert_eq!(net.check_consistency(), Ok(()));
    assert!(verify(&net, *C).is_err());
}
