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

//! # Resource ledger
//!
//! Every node has at most one ledger record per [`ResourceKind`]. A record is a substrate
//! resource hosted at the node, whose type is the reserved tag of the kind. The tags start with
//! the [list separator](crate::model::LIST_SEPARATOR), which is not allowed in user-defined VNF
//! types, so they can never collide.
//!
//! VNF instances occupy capacity of these records. The occupied capacity is therefore never
//! written directly, it is derived from the hosted VNF instances.

use crate::model::types::ModelError;
use crate::substrate::{NodeId, ResourceId, Substrate};

use log::*;
use std::collections::BTreeMap;

/// Kind of resource provided by a node for the instantiation of VNFs
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum ResourceKind {
    /// Number of CPUs
    Cpu,
    /// RAM in GB
    Ram,
    /// Hard disk in GB
    Hd,
}

impl ResourceKind {
    /// All resource kinds
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Cpu, ResourceKind::Ram, ResourceKind::Hd];

    /// Reserved resource type of the ledger record
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Cpu => "#CPU",
            Self::Ram => "#RAM",
            Self::Hd => "#HD",
        }
    }

    /// Unit of the capacity
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Ram | Self::Hd => "GB",
        }
    }
}

/// Returns the single ledger record of the kind at the node, or `None` if there is none. Fails
/// if multiple records exist.
pub(crate) fn record(
    s: &Substrate,
    node: NodeId,
    kind: ResourceKind,
) -> Result<Option<ResourceId>, ModelError> {
    let records = s.resources_at_of_type(node, kind.tag());
    match records.as_slice() {
        [] => Ok(None),
        [r] => Ok(Some(*r)),
        _ => Err(ModelError::FormatError(format!(
            "Node {:?} has {} {:?} records",
            node,
            records.len(),
            kind
        ))),
    }
}

/// Total capacity of the kind at the node. Sums over all records, and is zero if there is none.
pub(crate) fn capacity(s: &Substrate, node: NodeId, kind: ResourceKind) -> f64 {
    s.resources_at_of_type(node, kind.tag())
        .into_iter()
        .filter_map(|r| s.resource(r).ok())
        .fold(0.0, |acc, r| acc + r.capacity)
}

/// Occupied capacity of the kind at the node. Zero if there is no record.
pub(crate) fn occupied(s: &Substrate, node: NodeId, kind: ResourceKind) -> Result<f64, ModelError> {
    Ok(record(s, node, kind)?.map(|r| s.occupied_capacity(r)).unwrap_or(0.0))
}

/// Set the capacity of the kind at the node. Creates the record if it does not exist yet,
/// otherwise updates the capacity in place, keeping the current occupation.
pub(crate) fn set_capacity(
    s: &mut Substrate,
    node: NodeId,
    kind: ResourceKind,
    value: f64,
) -> Result<ResourceId, ModelError> {
    match record(s, node, kind)? {
        Some(r) => {
            s.resource_mut(r)?.capacity = value;
            Ok(r)
        }
        None => {
            trace!("Create {:?} record at {:?}", kind, node);
            Ok(s.add_resource(kind.tag(), kind.tag(), node, value, BTreeMap::new())?)
        }
    }
}

/// Make sure that a record exists for every kind at the node. Existing records are not touched.
pub(crate) fn ensure_records(s: &mut Substrate, node: NodeId) -> Result<(), ModelError> {
    for kind in ResourceKind::ALL.iter() {
        if record(s, node, *kind)?.is_none() {
            set_capacity(s, node, *kind, 0.0)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::btreemap;

    #[test]
    fn capacity_and_occupation() {
        let mut s = Substrate::new();
        let n = s.add_node("n");
        assert_eq!(capacity(&s, n, ResourceKind::Cpu), 0.0);
        assert_eq!(occupied(&s, n, ResourceKind::Cpu), Ok(0.0));

        let cpu = set_capacity(&mut s, n, ResourceKind::Cpu, 8.0).unwrap();
        s.add_resource("firewall", "fw", n, 10.0, btreemap! {cpu => 3.0}).unwrap();
        assert_eq!(capacity(&s, n, ResourceKind::Cpu), 8.0);
        assert_eq!(occupied(&s, n, ResourceKind::Cpu), Ok(3.0));

        // updating in place keeps the occupation
        assert_eq!(set_capacity(&mut s, n, ResourceKind::Cpu, 16.0), Ok(cpu));
        assert_eq!(capacity(&s, n, ResourceKind::Cpu), 16.0);
        assert_eq!(occupied(&s, n, ResourceKind::Cpu), Ok(3.0));
    }

    #[test]
    fn unoccupied_record_is_positive_zero() {
        let mut s = Substrate::new();
        let n = s.add_node("n");
        ensure_records(&mut s, n).unwrap();
        for kind in ResourceKind::ALL.iter() {
            assert!(capacity(&s, n, *kind).is_sign_positive());
            assert!(occupied(&s, n, *kind).unwrap().is_sign_positive());
        }
        assert_eq!(format!("{}", occupied(&s, n, ResourceKind::Hd).unwrap()), "0");
    }

    #[test]
    fn duplicate_records() {
        let mut s = Substrate::new();
        let n = s.add_node("n");
        s.add_resource("#RAM", "#RAM", n, 1.0, BTreeMap::new()).unwrap();
        s.add_resource("#RAM", "#RAM", n, 2.0, BTreeMap::new()).unwrap();
        assert_eq!(capacity(&s, n, ResourceKind::Ram), 3.0);
        assert!(matches!(
            set_capacity(&mut s, n, ResourceKind::Ram, 4.0),
            Err(ModelError::FormatError(_))
        ));
        assert!(matches!(ensure_records(&mut s, n), Err(ModelError::FormatError(_))));
    }
}
