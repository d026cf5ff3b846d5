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

//! Test the resource ledger and the VNF instances occupying it.

use crate::model::{ModelError, ResourceKind, WNet};
use crate::substrate::Substrate;
use assert_approx_eq::assert_approx_eq;
use maplit::{btreemap, btreeset};
use std::collections::{BTreeMap, BTreeSet};

fn get_test_net() -> WNet {
    let mut net = WNet::new();
    net.add_node("A", (0.0, 0.0)).unwrap();
    net.add_node("B", (1.0, 0.0)).unwrap();
    net
}

#[test]
fn test_unset_capacity() {
    let net = get_test_net();
    for n in net.nodes() {
        let node = net.node(n).unwrap();
        for kind in ResourceKind::ALL.iter() {
            assert_eq!(node.capacity(*kind), 0.0);
            assert_eq!(node.occupied(*kind), Ok(0.0));
        }
    }
}

#[test]
fn test_set_capacity() {
    let mut net = get_test_net();
    let a = net.nodes()[0];
    let b = net.nodes()[1];

    net.node_mut(a).unwrap().set_capacity(ResourceKind::Cpu, 8.0).unwrap();
    net.node_mut(a).unwrap().set_capacity(ResourceKind::Ram, 64.0).unwrap();
    assert_eq!(net.node(a).unwrap().capacity(ResourceKind::Cpu), 8.0);
    assert_eq!(net.node(a).unwrap().capacity(ResourceKind::Ram), 64.0);
    assert_eq!(net.node(a).unwrap().capacity(ResourceKind::Hd), 0.0);
    assert_eq!(net.node(b).unwrap().capacity(ResourceKind::Cpu), 0.0);

    // overwrite
    net.node_mut(a).unwrap().set_capacity(ResourceKind::Cpu, 4.0).unwrap();
    assert_eq!(net.node(a).unwrap().capacity(ResourceKind::Cpu), 4.0);

    // still a single record per kind
    let records = net.substrate().resources_at_of_type(a, ResourceKind::Cpu.tag());
    assert_eq!(records.len(), 1);
}

#[test]
fn test_vnf_occupation() {
    let mut net = get_test_net();
    let a = net.nodes()[0];
    net.node_mut(a).unwrap().set_capacity(ResourceKind::Cpu, 8.0).unwrap();
    net.node_mut(a).unwrap().set_capacity(ResourceKind::Ram, 32.0).unwrap();

    let fw = net
        .add_vnf_instance(
            a,
            "firewall",
            "fw0",
            10.0,
            btreemap! {ResourceKind::Cpu => 2.0, ResourceKind::Ram => 4.5},
        )
        .unwrap();
    let nat = net
        .add_vnf_instance(a, "nat", "nat0", 5.0, btreemap! {ResourceKind::Cpu => 1.0})
        .unwrap();

    let node = net.node(a).unwrap();
    assert_approx_eq!(node.occupied(ResourceKind::Cpu).unwrap(), 3.0);
    assert_approx_eq!(node.occupied(ResourceKind::Ram).unwrap(), 4.5);
    assert_approx_eq!(node.occupied(ResourceKind::Hd).unwrap(), 0.0);
    assert_approx_eq!(fw.occupation(&net, ResourceKind::Ram).unwrap(), 4.5);
    assert_eq!(fw.hosting_node(&net), Ok(a));
    assert_eq!(fw.vnf_type(&net), Ok("firewall"));
    assert_eq!(fw.name(&net), Ok("fw0"));

    // the ledger records are no VNF instances
    assert_eq!(node.vnf_instances(), btreeset! {fw, nat});
    assert_eq!(node.vnf_instances_of_type("nat"), Ok(btreeset! {nat}));
    assert_eq!(node.vnf_instances_of_type("dpi"), Ok(BTreeSet::new()));

    // changing the capacity keeps the occupation
    net.node_mut(a).unwrap().set_capacity(ResourceKind::Cpu, 16.0).unwrap();
    assert_approx_eq!(net.node(a).unwrap().occupied(ResourceKind::Cpu).unwrap(), 3.0);

    // removing the instance frees the resources
    net.remove_vnf_instance(fw).unwrap();
    assert_approx_eq!(net.node(a).unwrap().occupied(ResourceKind::Cpu).unwrap(), 1.0);
    assert_approx_eq!(net.node(a).unwrap().occupied(ResourceKind::Ram).unwrap(), 0.0);
    assert_eq!(net.node(a).unwrap().vnf_instances(), btreeset! {nat});
}

#[test]
fn test_vnf_type_separator() {
    let mut net = get_test_net();
    let a = net.nodes()[0];
    assert!(matches!(
        net.add_vnf_instance(a, "#CPU", "fake", 1.0, BTreeMap::new()),
        Err(ModelError::InvalidArgument(_))
    ));
    assert!(matches!(
        net.node(a).unwrap().vnf_instances_of_type("#CPU"),
        Err(ModelError::InvalidArgument(_))
    ));
}

#[test]
fn test_ledger_created_on_adoption() {
    let mut sub = Substrate::new();
    let a = sub.add_node("A");
    let net = WNet::from_substrate(sub).unwrap();
    for kind in ResourceKind::ALL.iter() {
        assert_eq!(net.substrate().resources_at_of_type(a, kind.tag()).len(), 1);
        assert_eq!(net.node(a).unwrap().capacity(*kind), 0.0);
    }
}

#[test]
fn test_duplicate_records() {
    let mut sub = Substrate::new();
    let a = sub.add_node("A");
    sub.add_resource("#HD", "#HD", a, 100.0, BTreeMap::new()).unwrap();
    sub.add_resource("#HD", "#HD", a, 200.0, BTreeMap::new()).unwrap();
    assert!(matches!(WNet::from_substrate(sub), Err(ModelError::FormatError(_))));
}

#[test]
fn test_duplicate_records_after_adoption() {
    let mut net = get_test_net();
    let a = net.nodes()[0];
    net.substrate_mut().add_resource("#HD", "#HD", a, 100.0, BTreeMap::new()).unwrap();

    // reading the capacity sums over all records
    assert_eq!(net.node(a).unwrap().capacity(ResourceKind::Hd), 100.0);
    assert!(matches!(
        net.node(a).unwrap().occupied(ResourceKind::Hd),
        Err(ModelError::FormatError(_))
    ));
    assert!(matches!(
        net.node_mut(a).unwrap().set_capacity(ResourceKind::Hd, 1.0),
        Err(ModelError::FormatError(_))
    ));
}
