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

//! # Optical switching policy
//!
//! The switching architecture of a node decides on which fibers a wavelength channel ends up,
//! when it is added, dropped or expressed at that node. Path computation and impairment analysis
//! use this to find out where energy is *intended* to go, and where it *physically* goes.
//!
//! - A [`Roadm`] is wavelength selective: a channel only goes where it is switched to, and can be
//!   blocked entirely.
//! - A [`FilterlessDropAndWaste`] node broadcasts every dropped or expressed channel to all other
//!   egress fibers. Only one copy is used, the others are wasted (leaked) energy.
//!
//! All functions are pure: they only read the topology, never the state of the node.
//!
//! ```text
//!          f_in                        A (pair of f_in)
//!   M ============> N ============> M
//!                   |
//!                   +=====> B
//!                   +=====> C
//! ```
//!
//! For a filterless node `N`, dropping a channel arriving on `f_in` leaks it onto `{B, C}`. The
//! fiber `A` going back to where the channel came from is the same physical cable and is
//! excluded.

use crate::model::elements::{Endpoints, Fiber};
use crate::model::net::WNet;

use std::collections::BTreeSet;
use std::fmt;

/// Name of the attribute storing the switch type of a node
pub(crate) const ATTNAME_OPTICALSWITCHTYPE: &str = "ATTNAME_OPTICALSWITCHTYPE";

/// Propagation behavior of an optical switching architecture.
pub trait OpticalSwitchingPolicy: fmt::Debug {
    /// Fibers on which a channel added at the node and sent to `output` is placed.
    fn add_propagation(&self, net: &WNet, output: Fiber) -> BTreeSet<Fiber>;

    /// Fibers on which a channel, dropped at the node after arriving on `input`, still
    /// propagates.
    fn drop_propagation(&self, net: &WNet, input: Fiber) -> BTreeSet<Fiber>;

    /// Fibers on which a channel arriving on `input` and expressed towards `output` actually
    /// propagates.
    fn express_propagation(&self, net: &WNet, input: Fiber, output: Fiber) -> BTreeSet<Fiber>;

    /// Fibers that necessarily carry energy arriving on `input`, independent of how the node is
    /// configured.
    fn unavoidable_propagation(&self, net: &WNet, input: Fiber) -> BTreeSet<Fiber>;
}

/// Reconfigurable optical add-drop multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roadm;

impl OpticalSwitchingPolicy for Roadm {
    fn add_propagation(&self, _net: &WNet, output: Fiber) -> BTreeSet<Fiber> {
        std::iter::once(output).collect()
    }

    fn drop_propagation(&self, _net: &WNet, _input: Fiber) -> BTreeSet<Fiber> {
        BTreeSet::new()
    }

    fn express_propagation(&self, _net: &WNet, _input: Fiber, output: Fiber) -> BTreeSet<Fiber> {
        std::iter::once(output).collect()
    }

    fn unavoidable_propagation(&self, _net: &WNet, _input: Fiber) -> BTreeSet<Fiber> {
        BTreeSet::new()
    }
}

/// Filterless broadcast-and-select node with drop-and-waste behavior, which is not
/// directionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterlessDropAndWaste;

impl FilterlessDropAndWaste {
    /// All outgoing fibers at the end of `input`, except the bidirectional pair of `input`.
    fn broadcast(net: &WNet, input: Fiber) -> BTreeSet<Fiber> {
        let node = match input.b(net) {
            Ok(n) => n,
            Err(_) => return BTreeSet::new(),
        };
        let pair = input.bidirectional_pair(net).ok().flatten();
        net.outgoing_fibers(node).into_iter().filter(|f| Some(*f) != pair).collect()
    }
}

impl OpticalSwitchingPolicy for FilterlessDropAndWaste {
    fn add_propagation(&self, _net: &WNet, output: Fiber) -> BTreeSet<Fiber> {
        std::iter::once(output).collect()
    }

    fn drop_propagation(&self, net: &WNet, input: Fiber) -> BTreeSet<Fiber> {
        Self::broadcast(net, input)
    }

    fn express_propagation(&self, net: &WNet, input: Fiber, _output: Fiber) -> BTreeSet<Fiber> {
        Self::broadcast(net, input)
    }

    fn unavoidable_propagation(&self, net: &WNet, input: Fiber) -> BTreeSet<Fiber> {
        Self::broadcast(net, input)
    }
}

/// Switching architecture of a node
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum OpticalSwitchType {
    /// Wavelength selective ROADM
    Roadm,
    /// Filterless drop-and-waste node
    FilterlessDropAndWasteNotDirectionless,
}

impl Default for OpticalSwitchType {
    fn default() -> Self {
        Self::Roadm
    }
}

impl OpticalSwitchType {
    /// Returns the propagation functions of this architecture
    pub fn policy(&self) -> &'static dyn OpticalSwitchingPolicy {
        match self {
            Self::Roadm => &Roadm,
            Self::FilterlessDropAndWasteNotDirectionless => &FilterlessDropAndWaste,
        }
    }

    /// Name of the variant, as stored in the attributes
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Roadm => "ROADM",
            Self::FilterlessDropAndWasteNotDirectionless => {
                "FILTERLESS_DROPANDWASTENOTDIRECTIONLESS"
            }
        }
    }

    /// Parse the stored variant name. Missing or unknown names resolve to the default (ROADM).
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("ROADM") => Self::Roadm,
            Some("FILTERLESS_DROPANDWASTENOTDIRECTIONLESS") => {
                Self::FilterlessDropAndWasteNotDirectionless
            }
            _ => Self::default(),
        }
    }

    /// Returns true for ROADMs
    pub fn is_roadm(&self) -> bool {
        matches!(self, Self::Roadm)
    }

    /// Returns true for filterless drop-and-waste nodes
    pub fn is_drop_and_waste(&self) -> bool {
        matches!(self, Self::FilterlessDropAndWasteNotDirectionless)
    }

    /// Short human readable name
    pub fn short_name(&self) -> &'static str {
        if self.is_roadm() {
            "ROADM"
        } else {
            "Filterless"
        }
    }
}

impl fmt::Display for OpticalSwitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
