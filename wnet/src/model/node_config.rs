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

//! # Node configuration
//!
//! Typed scalar state of a regular node. The network keeps one [`NodeConfig`] per node, and only
//! translates it to and from the substrate attributes when adopting or exporting a substrate.

use crate::model::switching::{OpticalSwitchType, ATTNAME_OPTICALSWITCHTYPE};
use crate::substrate::Attributes;

/// Prefix of all node attributes written by the model
pub const NODE_ATTRIBUTE_PREFIX: &str = "Node_";

const ATTNAME_TYPE: &str = "type";
const ATTNAME_CORE: &str = "isConnectedToNetworkCore";
const ATTNAME_ARBITRARY: &str = "ArbitraryString";
const ATTNAME_EQUALIZED: &str = "isOutputSpectrumEqualized";
const ATTNAME_EQUALIZATION_TARGET: &str = "equalizationTarget_mwPerGhz";

fn key(name: &str) -> String {
    format!("{}{}", NODE_ATTRIBUTE_PREFIX, name)
}

/// Switching operation a channel undergoes at a node
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum SwitchingOperation {
    /// Channel is inserted into the network at this node
    Add,
    /// Channel is extracted from the network at this node
    Drop,
    /// Channel traverses the node optically
    Express,
}

impl SwitchingOperation {
    /// All operations
    pub const ALL: [SwitchingOperation; 3] =
        [SwitchingOperation::Add, SwitchingOperation::Drop, SwitchingOperation::Express];

    fn prefix(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Drop => "drop",
            Self::Express => "express",
        }
    }
}

/// Optical parameters of one switching operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalParams {
    /// Noise figure in dB
    pub noise_figure_db: f64,
    /// Gain in dB
    pub gain_db: f64,
    /// Polarization mode dispersion in ps
    pub pmd_ps: f64,
}

impl Default for OpticalParams {
    fn default() -> Self {
        Self { noise_figure_db: 5.0, gain_db: 20.0, pmd_ps: 0.0 }
    }
}

/// Typed configuration of a regular node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// User-defined type tag
    pub node_type: String,
    /// Whether the node is attached to the network core
    pub connected_to_network_core: bool,
    /// Free-text parameter
    pub arbitrary_param_string: String,
    /// Parameters of channels added at the node
    pub add: OpticalParams,
    /// Parameters of channels dropped at the node
    pub drop: OpticalParams,
    /// Parameters of channels expressed through the node
    pub express: OpticalParams,
    /// Switching architecture
    pub switch_type: OpticalSwitchType,
    /// Target power spectral density of the output spectrum in mW/GHz, if the node equalizes it.
    pub equalization_target: Option<f64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_type: String::new(),
            connected_to_network_core: false,
            arbitrary_param_string: String::new(),
            add: OpticalParams::default(),
            drop: OpticalParams::default(),
            express: OpticalParams::default(),
            switch_type: OpticalSwitchType::default(),
            equalization_target: None,
        }
    }
}

impl NodeConfig {
    /// Returns the parameters of the operation
    pub fn params(&self, op: SwitchingOperation) -> &OpticalParams {
        match op {
            SwitchingOperation::Add => &self.add,
            SwitchingOperation::Drop => &self.drop,
            SwitchingOperation::Express => &self.express,
        }
    }

    /// Returns a mutable reference to the parameters of the operation
    pub fn params_mut(&mut self, op: SwitchingOperation) -> &mut OpticalParams {
        match op {
            SwitchingOperation::Add => &mut self.add,
            SwitchingOperation::Drop => &mut self.drop,
            SwitchingOperation::Express => &mut self.express,
        }
    }

    /// Read the configuration from the node attributes. Missing or malformed values fall back to
    /// their defaults.
    pub fn from_attributes(a: &Attributes) -> Self {
        let mut config = Self::default();
        config.node_type = a.get_str(&key(ATTNAME_TYPE), "").to_string();
        config.connected_to_network_core = a.get_bool(&key(ATTNAME_CORE), false);
        config.arbitrary_param_string = a.get_str(&key(ATTNAME_ARBITRARY), "").to_string();
        for op in SwitchingOperation::ALL.iter() {
            let default = OpticalParams::default();
            let p = config.params_mut(*op);
            p.noise_figure_db =
                a.get_f64(&key(&format!("{}NoiseFigure_db", op.prefix())), default.noise_figure_db);
            p.gain_db = a.get_f64(&key(&format!("{}Gain_db", op.prefix())), default.gain_db);
            p.pmd_ps = a.get_f64(&key(&format!("{}Pmd_ps", op.prefix())), default.pmd_ps);
        }
        // the unprefixed key is accepted as well
        config.switch_type = OpticalSwitchType::from_tag(
            a.get(&key(ATTNAME_OPTICALSWITCHTYPE)).or_else(|| a.get(ATTNAME_OPTICALSWITCHTYPE)),
        );
        // a stale target is ignored while the flag is cleared
        config.equalization_target = if a.get_bool(&key(ATTNAME_EQUALIZED), false) {
            a.get_f64_opt(&key(ATTNAME_EQUALIZATION_TARGET))
        } else {
            None
        };
        config
    }

    /// Write the configuration into the node attributes, overwriting previous values.
    pub fn write_attributes(&self, a: &mut Attributes) {
        a.set(key(ATTNAME_TYPE), &self.node_type);
        a.set(key(ATTNAME_CORE), self.connected_to_network_core);
        a.set(key(ATTNAME_ARBITRARY), &self.arbitrary_param_string);
        for op in SwitchingOperation::ALL.iter() {
            let p = self.params(*op);
            a.set(key(&format!("{}NoiseFigure_db", op.prefix())), p.noise_figure_db);
            a.set(key(&format!("{}Gain_db", op.prefix())), p.gain_db);
            a.set(key(&format!("{}Pmd_ps", op.prefix())), p.pmd_ps);
        }
        a.set(key(ATTNAME_OPTICALSWITCHTYPE), self.switch_type.tag());
        match self.equalization_target {
            Some(target) => {
                a.set(key(ATTNAME_EQUALIZED), 1);
                a.set(key(ATTNAME_EQUALIZATION_TARGET), target);
            }
            None => {
                a.set(key(ATTNAME_EQUALIZED), 0);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_from_empty_attributes() {
        let config = NodeConfig::from_attributes(&Attributes::new());
        assert_eq!(config, NodeConfig::default());
        assert_eq!(config.express.noise_figure_db, 5.0);
        assert_eq!(config.drop.gain_db, 20.0);
        assert_eq!(config.add.pmd_ps, 0.0);
        assert!(config.switch_type.is_roadm());
    }

    #[test]
    fn attribute_round_trip() {
        let mut config = NodeConfig::default();
        config.node_type = "core".to_string();
        config.connected_to_network_core = true;
        config.drop.gain_db = 12.5;
        config.switch_type = OpticalSwitchType::FilterlessDropAndWasteNotDirectionless;
        config.equalization_target = Some(0.25);

        let mut a = Attributes::new();
        config.write_attributes(&mut a);
        assert!(a.iter().all(|(k, _)| k.starts_with(NODE_ATTRIBUTE_PREFIX)));
        assert_eq!(
            a.get("Node_ATTNAME_OPTICALSWITCHTYPE"),
            Some("FILTERLESS_DROPANDWASTENOTDIRECTIONLESS")
        );
        assert_eq!(NodeConfig::from_attributes(&a), config);
    }

    #[test]
    fn stale_equalization_target() {
        let mut a = Attributes::new();
        a.set("Node_isOutputSpectrumEqualized", 0);
        a.set("Node_equalizationTarget_mwPerGhz", 3.0);
        assert_eq!(NodeConfig::from_attributes(&a).equalization_target, None);
        a.set("Node_isOutputSpectrumEqualized", 1);
        assert_eq!(NodeConfig::from_attributes(&a).equalization_target, Some(3.0));
    }

    #[test]
    fn equalized_without_target() {
        let mut a = Attributes::new();
        a.set("Node_isOutputSpectrumEqualized", 1);
        assert_eq!(NodeConfig::from_attributes(&a).equalization_target, None);
        a.set("Node_equalizationTarget_mwPerGhz", "garbage");
        assert_eq!(NodeConfig::from_attributes(&a).equalization_target, None);
    }

    #[test]
    fn unknown_switch_type() {
        let mut a = Attributes::new();
        a.set("Node_ATTNAME_OPTICALSWITCHTYPE", "WSS_MESH");
        assert_eq!(NodeConfig::from_attributes(&a).switch_type, OpticalSwitchType::Roadm);
    }

    #[test]
    fn unprefixed_switch_type() {
        let mut a = Attributes::new();
        a.set("ATTNAME_OPTICALSWITCHTYPE", "FILTERLESS_DROPANDWASTENOTDIRECTIONLESS");
        assert!(NodeConfig::from_attributes(&a).switch_type.is_drop_and_waste());

        // the prefixed key takes precedence
        a.set("Node_ATTNAME_OPTICALSWITCHTYPE", "ROADM");
        assert!(NodeConfig::from_attributes(&a).switch_type.is_roadm());
    }
}
