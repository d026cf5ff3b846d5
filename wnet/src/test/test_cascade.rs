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

//! Test the failure cascade triggered by node state changes.

use crate::model::cascade::{self, Reevaluatable};
use crate::model::{Fiber, IpLink, LightpathRequest, ModelError, WNet};
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

struct Fixture {
    net: WNet,
    r1: LightpathRequest,
    r2: LightpathRequest,
    r3: LightpathRequest,
    r4: LightpathRequest,
    ip: IpLink,
}

fn fiber(net: &WNet, a: NodeId, b: NodeId) -> Fiber {
    net.outgoing_fibers(a)
        .into_iter()
        .find(|f| net.substrate().link(f.link_id()).unwrap().destination == b)
        .unwrap()
}

/// # Test network
///
/// All fibers are bidirectional pairs.
///
/// ```text
/// A ==== B ==== C
///        ||    //
///        D ====
/// ```
///
/// - `r1`: A -> B -> C, providing the capacity of the IP link A -> C
/// - `r2`: A -> B
/// - `r3`: C -> B -> D
/// - `r4`: C -> D
fn get_test_net() -> Fixture {
    let _ = pretty_env_logger::try_init();
    let mut net = WNet::new();

    assert_eq!(*A, net.add_node("A", (0.0, 0.0)).unwrap());
    assert_eq!(*B, net.add_node("B", (1.0, 0.0)).unwrap());
    assert_eq!(*C, net.add_node("C", (2.0, 0.0)).unwrap());
    assert_eq!(*D, net.add_node("D", (1.0, -1.0)).unwrap());

    net.add_fiber(*A, *B, true).unwrap();
    net.add_fiber(*B, *C, true).unwrap();
    net.add_fiber(*B, *D, true).unwrap();
    net.add_fiber(*C, *D, true).unwrap();

    let (ab, bc, cb, bd, cd) = (
        fiber(&net, *A, *B),
        fiber(&net, *B, *C),
        fiber(&net, *C, *B),
        fiber(&net, *B, *D),
        fiber(&net, *C, *D),
    );

    let (ip, _) = net.add_ip_link(*A, *C, 0.0, false).unwrap();
    let r1 = net.add_lightpath_request(*A, *C, 100.0).unwrap();
    net.add_lightpath(r1, vec![ab, bc]).unwrap();
    net.couple_lightpath_request(r1, ip).unwrap();

    let r2 = net.add_lightpath_request(*A, *B, 40.0).unwrap();
    net.add_lightpath(r2, vec![ab]).unwrap();

    let r3 = net.add_lightpath_request(*C, *D, 10.0).unwrap();
    net.add_lightpath(r3, vec![cb, bd]).unwrap();

    let r4 = net.add_lightpath_request(*C, *D, 10.0).unwrap();
    net.add_lightpath(r4, vec![cd]).unwrap();

    Fixture { net, r1, r2, r3, r4, ip }
}

#[test]
fn test_initial_state() {
    let f = get_test_net();
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(100.0));
    for r in [f.r1, f.r2, f.r3, f.r4].iter() {
        assert!(r.is_up(&f.net));
    }
    assert_eq!(f.r2.carried_gbps(&f.net), 40.0);
    let all: BTreeSet<_> = f.net.lightpath_requests().into_iter().collect();
    assert_eq!(cascade::blocked_lightpath_requests(&f.net, &all), BTreeSet::new());
}

#[test]
fn test_node_down() {
    let mut f = get_test_net();
    let report = f.net.node_mut(*B).unwrap().set_as_down().unwrap();

    assert!(report.is_ok());
    assert_eq!(report.affected, btreeset! {f.r1, f.r2, f.r3});
    assert!(f.net.node(*B).unwrap().is_down());

    assert!(!f.r1.is_up(&f.net));
    assert!(!f.r2.is_up(&f.net));
    assert!(!f.r3.is_up(&f.net));
    assert!(f.r4.is_up(&f.net));
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(0.0));
    assert!(!f.ip.is_up(&f.net));
    for lp in f.r1.lightpaths(&f.net) {
        assert_eq!(lp.carried_gbps(&f.net), Ok(0.0));
    }

    // r2 ends at B, and is therefore not blocked
    let all: BTreeSet<_> = f.net.lightpath_requests().into_iter().collect();
    assert_eq!(cascade::blocked_lightpath_requests(&f.net, &all), btreeset! {f.r1, f.r3});

    f.net.check_consistency().unwrap();
}

#[test]
fn test_node_down_twice() {
    let mut f = get_test_net();
    let first = f.net.node_mut(*B).unwrap().set_as_down().unwrap();
    let second = f.net.node_mut(*B).unwrap().set_as_down().unwrap();
    assert_eq!(first, second);
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(0.0));
}

#[test]
fn test_node_up_again() {
    let mut f = get_test_net();
    f.net.node_mut(*B).unwrap().set_as_down().unwrap();
    let report = f.net.node_mut(*B).unwrap().set_as_up().unwrap();

    assert_eq!(report.affected, btreeset! {f.r1, f.r2, f.r3});
    assert!(f.net.node(*B).unwrap().is_up());
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(100.0));
    assert_eq!(f.r3.carried_gbps(&f.net), 10.0);
}

#[test]
fn test_end_node_down() {
    let mut f = get_test_net();
    let report = f.net.node_mut(*D).unwrap().set_as_down().unwrap();
    assert_eq!(report.affected, btreeset! {f.r3, f.r4});
    assert!(f.r1.is_up(&f.net));
    assert!(f.r2.is_up(&f.net));
    assert!(!f.r4.is_up(&f.net));

    // both requests end at the failed node
    let all: BTreeSet<_> = f.net.lightpath_requests().into_iter().collect();
    assert_eq!(cascade::blocked_lightpath_requests(&f.net, &all), BTreeSet::new());
}

#[test]
fn test_isolated_node() {
    let mut f = get_test_net();
    let e = f.net.add_node("E", (5.0, 5.0)).unwrap();
    let report = f.net.node_mut(e).unwrap().set_as_down().unwrap();
    assert!(report.affected.is_empty());
    assert!(report.is_ok());
}

#[test]
fn test_reevaluate_idempotent() {
    let mut f = get_test_net();
    f.net.node_mut(*B).unwrap().set_as_down().unwrap();
    f.r1.reevaluate(&mut f.net).unwrap();
    f.r1.reevaluate(&mut f.net).unwrap();
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(0.0));

    f.net.substrate_mut().set_node_up(*B, true).unwrap();
    f.r1.reevaluate(&mut f.net).unwrap();
    f.r1.reevaluate(&mut f.net).unwrap();
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(100.0));
}

#[test]
fn test_multiple_lightpaths() {
    let mut f = get_test_net();
    let ab = fiber(&f.net, *A, *B);
    let bd = fiber(&f.net, *B, *D);
    let dc = fiber(&f.net, *D, *C);
    f.net.add_lightpath(f.r1, vec![ab, bd, dc]).unwrap();
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(200.0));

    f.net.node_mut(*D).unwrap().set_as_down().unwrap();
    assert_eq!(f.ip.capacity_gbps(&f.net), Ok(100.0));
    assert!(f.r1.is_up(&f.net));
}

/// Increments the population of a node, but cannot be re-evaluated for node `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Bump(NodeId);

impl Reevaluatable for Bump {
    fn reevaluate(&self, net: &mut WNet) -> Result<(), ModelError> {
        if self.0 == *C {
            return Err(ModelError::UnexpectedState("cannot bump C".to_string()));
        }
        let population = net.node(self.0)?.population();
        net.node_mut(self.0)?.set_population(population + 1.0)
    }
}

#[test]
fn test_propagate_fails_forward() {
    let mut f = get_test_net();
    let report = cascade::propagate(&mut f.net, btreeset! {Bump(*B), Bump(*C), Bump(*D)});

    assert!(!report.is_ok());
    assert_eq!(report.affected.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, Bump(*C));

    // the elements after the failing one are still re-evaluated
    assert_eq!(f.net.node(*B).unwrap().population(), 1.0);
    assert_eq!(f.net.node(*D).unwrap().population(), 1.0);
    assert_eq!(f.net.node(*C).unwrap().population(), 0.0);
}

#[test]
fn test_affected_lightpath_requests() {
    let f = get_test_net();
    assert_eq!(cascade::affected_lightpath_requests(&f.net, *A), btreeset! {f.r1, f.r2});
    assert_eq!(cascade::affected_lightpath_requests(&f.net, *C), btreeset! {f.r1, f.r3, f.r4});
}
