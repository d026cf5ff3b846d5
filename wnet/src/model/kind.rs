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

//! # Element-type discriminator
//!
//! The substrate does not know what a link, demand, route or resource represents. The typed model
//! stores the kind in the reserved attribute [`ATTNAME_WTYPE`], and reads it back with
//! [`ElementKind::of`]. Elements without this attribute (like the links towards the anycast
//! nodes) are untyped and are ignored by every typed enumeration.

use crate::substrate::Attributes;

/// Name of the attribute storing the element kind
pub const ATTNAME_WTYPE: &str = "WTYPE";

/// Typed domain kind of a substrate element
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum ElementKind {
    /// Optical fiber (WDM link)
    Fiber,
    /// IP link
    IpLink,
    /// Lightpath (WDM route)
    Lightpath,
    /// Lightpath request (WDM demand)
    LightpathRequest,
    /// Service chain (IP route traversing VNF instances)
    ServiceChain,
    /// Service chain request (IP demand between the anycast nodes)
    ServiceChainRequest,
    /// IP unicast demand
    IpUnicastDemand,
    /// MPLS-TE tunnel (IP route realizing an IP unicast demand)
    MplsTeTunnel,
    /// VNF instance (resource)
    VnfInstance,
}

impl ElementKind {
    /// Name stored in the attribute
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fiber => "Fiber",
            Self::IpLink => "IpLink",
            Self::Lightpath => "Lightpath",
            Self::LightpathRequest => "LightpathRequest",
            Self::ServiceChain => "ServiceChain",
            Self::ServiceChainRequest => "ServiceChainRequest",
            Self::IpUnicastDemand => "IpUnicastDemand",
            Self::MplsTeTunnel => "MplsTeTunnel",
            Self::VnfInstance => "VnfInstance",
        }
    }

    /// Parse the name stored in the attribute
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Fiber" => Self::Fiber,
            "IpLink" => Self::IpLink,
            "Lightpath" => Self::Lightpath,
            "LightpathRequest" => Self::LightpathRequest,
            "ServiceChain" => Self::ServiceChain,
            "ServiceChainRequest" => Self::ServiceChainRequest,
            "IpUnicastDemand" => Self::IpUnicastDemand,
            "MplsTeTunnel" => Self::MplsTeTunnel,
            "VnfInstance" => Self::VnfInstance,
            _ => return None,
        })
    }

    /// Returns the kind of the element owning these attributes, or `None` if it is untyped.
    pub fn of(attributes: &Attributes) -> Option<Self> {
        attributes.get(ATTNAME_WTYPE).and_then(Self::from_name)
    }

    /// Mark the attributes as belonging to an element of this kind
    pub fn tag(&self, attributes: &mut Attributes) {
        attributes.set(ATTNAME_WTYPE, self.name());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn discriminate() {
        let mut a = Attributes::new();
        assert_eq!(ElementKind::of(&a), None);
        ElementKind::Lightpath.tag(&mut a);
        assert_eq!(ElementKind::of(&a), Some(ElementKind::Lightpath));
        a.set(ATTNAME_WTYPE, "Router");
        assert_eq!(ElementKind::of(&a), None);
    }
}
