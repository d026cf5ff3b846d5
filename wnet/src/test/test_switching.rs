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

//! Test the propagation functions of the switching architectures.

use crate::model::{Fiber, OpticalSwitchType, WNet};
use crate::substrate::NodeId;
use lazy_static::lazy_static;
use maplit::btreeset;
use std::collections::BTreeSet;

lazy_static! {
    static ref A: NodeId = 2.into();
    static ref B: NodeId = 3.into();
    static ref C: NodeId = 4.into();
    static ref D: NodeId = 5.into();
}

struct Fibers {
    ab: Fiber,
    ba: Fiber,
    bc: Fiber,
    cb: Fiber,
    bd: Fiber,
    db: Fiber,
}

/// # Test network
///
/// All fibers are bidirectional pairs.
///
/// ```text
/// A ==== B ==== C
///        ||
///        D
/// ```
fn get_test_net() -> (WNet, Fibers) {
    let mut net = WNet::new();

    assert_eq!(*A, net.add_node("A", (0.0, 0.0)).unwrap());
    assert_eq!(*B, net.add_node("B", (1.0, 0.0)).unwrap());
    assert_eq!(*C, net.add_node("C", (2.0, 0.0)).unwrap());
    assert_eq!(*D, net.add_node("D", (1.0, -1.0)).unwrap());

    let (ab, ba) = net.add_fiber(*A, *B, true).unwrap();
    let (bc, cb) = net.add_fiber(*B, *C, true).unwrap();
    let (bd, db) = net.add_fiber(*B, *D, true).unwrap();

    let fibers = Fibers {
        ab,
        ba: ba.unwrap(),
        bc,
        cb: cb.unwrap(),
        bd,
        db: db.unwrap(),
    };
    (net, fibers)
}

fn set_filterless(net: &mut WNet, node: NodeId) {
    net.node_mut(node)
        .unwrap()
        .set_switch_type(OpticalSwitchType::FilterlessDropAndWasteNotDirectionless);
}

#[test]
fn test_default_is_roadm() {
    let (net, _) = get_test_net();
    for n in net.nodes() {
        assert_eq!(net.node(n).unwrap().switch_type(), OpticalSwitchType::Roadm);
    }
}

#[test]
fn test_roadm_propagation() {
    let (net, f) = get_test_net();
    let b = net.node(*B).unwrap();

    assert_eq!(b.add_propagation(f.bc), btreeset! {f.bc});
    assert_eq!(b.drop_propagation(f.ab), BTreeSet::new());
    assert_eq!(b.express_propagation(f.ab, f.bc), btreeset! {f.bc});
    assert_eq!(b.express_propagation(f.ab, f.bd), btreeset! {f.bd});
    assert_eq!(b.unavoidable_propagation(f.ab), BTreeSet::new());
    assert_eq!(b.unavoidable_propagation(f.cb), BTreeSet::new());
}

#[test]
fn test_filterless_propagation() {
    let (mut net, f) = get_test_net();
    set_filterless(&mut net, *B);
    let b = net.node(*B).unwrap();

    // add is not broadcasted
    assert_eq!(b.add_propagation(f.bc), btreeset! {f.bc});

    // everything else goes everywhere, except back
    assert_eq!(b.drop_propagation(f.ab), btreeset! {f.bc, f.bd});
    assert_eq!(b.express_propagation(f.ab, f.bc), btreeset! {f.bc, f.bd});
    assert_eq!(b.express_propagation(f.ab, f.bd), btreeset! {f.bc, f.bd});
    assert_eq!(b.unavoidable_propagation(f.ab), btreeset! {f.bc, f.bd});

    assert_eq!(b.drop_propagation(f.cb), btreeset! {f.ba, f.bd});
    assert_eq!(b.drop_propagation(f.db), btreeset! {f.ba, f.bc});
}

#[test]
fn test_filterless_two_nodes() {
    let mut net = WNet::new();
    let x = net.add_node("X", (0.0, 0.0)).unwrap();
    let y = net.add_node("Y", (1.0, 0.0)).unwrap();
    let (xy, yx) = net.add_fiber(x, y, true).unwrap();
    set_filterless(&mut net, y);
    let node = net.node(y).unwrap();

    assert_eq!(node.drop_propagation(xy), BTreeSet::new());
    assert_eq!(node.express_propagation(xy, yx.unwrap()), BTreeSet::new());
    assert_eq!(node.unavoidable_propagation(xy), BTreeSet::new());
    assert_eq!(node.add_propagation(yx.unwrap()), btreeset! {yx.unwrap()});
}

#[test]
fn test_filterless_unpaired_fibers() {
    let mut net = WNet::new();
    let x = net.add_node("X", (0.0, 0.0)).unwrap();
    let y = net.add_node("Y", (1.0, 0.0)).unwrap();
    let z = net.add_node("Z", (2.0, 0.0)).unwrap();
    let (xy, _) = net.add_fiber(x, y, false).unwrap();
    let (yx, _) = net.add_fiber(y, x, false).unwrap();
    let (yz, _) = net.add_fiber(y, z, false).unwrap();
    set_filterless(&mut net, y);

    // only the declared pair is excluded, an unpaired fiber back to X still receives energy
    assert_eq!(net.node(y).unwrap().drop_propagation(xy), btreeset! {yx, yz});
}

#[test]
fn test_filterless_only_affects_own_node() {
    let (mut net, f) = get_test_net();
    set_filterless(&mut net, *C);

    assert_eq!(net.node(*B).unwrap().drop_propagation(f.ab), BTreeSet::new());
    assert_eq!(net.node(*C).unwrap().drop_propagation(f.bc), BTreeSet::new());

    // switching back restores the ROADM behavior
    set_filterless(&mut net, *B);
    assert_eq!(net.node(*B).unwrap().drop_propagation(f.ab), btreeset! {f.bc, f.bd});
    net.node_mut(*B).unwrap().set_switch_type(OpticalSwitchType::Roadm);
    assert_eq!(net.node(*B).unwrap().drop_propagation(f.ab), BTreeSet::new());
}

#[test]
fn test_switch_type_tags() {
    assert_eq!(OpticalSwitchType::from_tag(None), OpticalSwitchType::Roadm);
    assert_eq!(OpticalSwitchType::from_tag(Some("ROADM")), OpticalSwitchType::Roadm);
    assert_eq!(
        OpticalSwitchType::from_tag(Some("FILTERLESS_DROPANDWASTENOTDIRECTIONLESS")),
        OpticalSwitchType::FilterlessDropAndWasteNotDirectionless
    );
    assert_eq!(OpticalSwitchType::from_tag(Some("filterless")), OpticalSwitchType::Roadm);

    let filterless = OpticalSwitchType::FilterlessDropAndWasteNotDirectionless;
    assert!(filterless.is_drop_and_waste());
    assert!(!filterless.is_roadm());
    assert_eq!(filterless.short_name(), "Filterless");
    assert_eq!(OpticalSwitchType::Roadm.short_name(), "ROADM");
    assert_eq!(OpticalSwitchType::from_tag(Some(filterless.tag())), filterless);
}
