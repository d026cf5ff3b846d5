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

//! Parses GML files from Topology Zoo

use petgraph::prelude::*;
use std::collections::HashMap;
use std::fs::read_to_string;
use thiserror::Error;

/// Node of a parsed GML graph
#[derive(Debug, Clone, PartialEq)]
pub struct GmlNode {
    /// Unique name of the node, derived from the label
    pub name: String,
    /// Latitude, or 0 if missing
    pub latitude: f64,
    /// Longitude, or 0 if missing
    pub longitude: f64,
}

/// Undirected graph parsed from a GML file
pub type GmlGraph = Graph<GmlNode, (), Undirected, u32>;

/// Parses GML files and returns the resulting graph
/// The names will remain the same, except the same name occurs twice. In this case, we will append
/// a _N to the end, where N is a number starting from 1 (_1 is appended to the second occurence,
/// and _2 is appended to the third occurence, etc...). Spaces are replaced by `_`, and duplicate
/// edges are ignored.
pub fn parse_gml_graph(filename: impl AsRef<str>) -> Result<GmlGraph, GmlError> {
    parse_gml_str(&read_to_string(filename.as_ref())?)
}

/// Parses the content of a GML file. See [`parse_gml_graph`].
pub fn parse_gml_str(gml_str: &str) -> Result<GmlGraph, GmlError> {
    let mut g: GmlGraph = GmlGraph::new_undirected();

    let mut current_state = CurrentState::NotStarted;

    let mut used_labels: HashMap<String, usize> = HashMap::new();
    let mut node_lookup: HashMap<usize, NodeIndex<u32>> = HashMap::new();

    for (i, line) in gml_str.lines().enumerate() {
        let line = line.trim();
        current_state = match current_state {
            CurrentState::NotStarted => {
                if line == "graph [" {
                    CurrentState::None
                } else if line.is_empty() || line.starts_with('#') {
                    CurrentState::NotStarted
                } else {
                    return Err(GmlError::UnexpectedToken { line: i, content: String::from(line) });
                }
            }
            CurrentState::None => {
                if line == "node [" {
                    CurrentState::Node(NodeState::default())
                } else if line == "edge [" {
                    CurrentState::Edge { source: None, target: None }
                } else {
                    CurrentState::None
                }
            }
            CurrentState::Node(mut node) => {
                if let Some(number) = line.strip_prefix("id ") {
                    node.id = Some(number.parse()?);
                    CurrentState::Node(node)
                } else if let Some(label) = line.strip_prefix("label ") {
                    let mut name: String = label.trim_matches('"').replace(" ", "_");
                    // increment the num_used in the hashmap
                    let num_used = *used_labels.get(&name).unwrap_or(&0);
                    used_labels.insert(name.clone(), num_used + 1);
                    if num_used > 0 {
                        name.push_str(&format!("_{}", num_used));
                    }
                    node.name = Some(name);
                    CurrentState::Node(node)
                } else if let Some(number) = line.strip_prefix("Latitude ") {
                    node.latitude = Some(number.parse()?);
                    CurrentState::Node(node)
                } else if let Some(number) = line.strip_prefix("Longitude ") {
                    node.longitude = Some(number.parse()?);
                    CurrentState::Node(node)
                } else if line == "]" {
                    let name = node.name.ok_or(GmlError::NodeMissingLabel(i))?;
                    let id = node.id.ok_or(GmlError::NodeMissingId(i))?;
                    if node_lookup.contains_key(&id) {
                        return Err(GmlError::NodeIdNotUnique(i));
                    }
                    let node_idx = g.add_node(GmlNode {
                        name,
                        latitude: node.latitude.unwrap_or(0.0),
                        longitude: node.longitude.unwrap_or(0.0),
                    });
                    node_lookup.insert(id, node_idx);
                    CurrentState::None
                } else {
                    CurrentState::Node(node)
                }
            }
            CurrentState::Edge { source, target } => {
                if let Some(number) = line.strip_prefix("source ") {
                    let source: Option<usize> = Some(number.parse()?);
                    CurrentState::Edge { source, target }
                } else if let Some(number) = line.strip_prefix("target ") {
                    let target: Option<usize> = Some(number.parse()?);
                    CurrentState::Edge { source, target }
                } else if line == "]" {
                    let source = source.ok_or(GmlError::EdgeMissingSource(i))?;
                    let source_idx =
                        node_lookup.get(&source).ok_or(GmlError::UnknownNodeId(source))?;
                    let target = target.ok_or(GmlError::EdgeMissingTarget(i))?;
                    let target_idx =
                        node_lookup.get(&target).ok_or(GmlError::UnknownNodeId(target))?;
                    // ignore duplicate links and self loops
                    if source_idx != target_idx && !g.contains_edge(*source_idx, *target_idx) {
                        g.add_edge(*source_idx, *target_idx, ());
                    }
                    CurrentState::None
                } else {
                    CurrentState::Edge { source, target }
                }
            }
        };
    }

    Ok(g)
}

#[derive(Default)]
struct NodeState {
    id: Option<usize>,
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

enum CurrentState {
    NotStarted,
    None,
    Node(NodeState),
    Edge { source: Option<usize>, target: Option<usize> },
}

/// Error while parsing a GML file
#[derive(Debug, Error)]
pub enum GmlError {
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Unexpected Token
    #[error("Unexpected Token on line {line}: {content}")]
    UnexpectedToken {
        /// Line number
        line: usize,
        /// Content of the line
        content: String,
    },
    /// ParseIntError
    #[error("Cannot parse an integer! {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
    /// ParseFloatError
    #[error("Cannot parse a coordinate! {0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),
    /// Unknown Node Id
    #[error("Unknown node id: {0}")]
    UnknownNodeId(usize),
    /// Node is missing an ID field
    #[error("Node is missing an ID field before line {0}!")]
    NodeMissingId(usize),
    /// Node is missing an label field
    #[error("Node is missing a label field before line {0}!")]
    NodeMissingLabel(usize),
    /// Duplicate Node Id
    #[error("Node ID is not unique on line {0}!")]
    NodeIdNotUnique(usize),
    /// Edge is missing the source field
    #[error("Edge is missing the source field before line {0}!")]
    EdgeMissingSource(usize),
    /// Edge is missing the target field
    #[error("Edge is missing the target field before line {0}!")]
    EdgeMissingTarget(usize),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_with_abilene_gml() {
        let filename = format!("{}/test_files/abilene.gml", env!("CARGO_MANIFEST_DIR"));
        let g = parse_gml_graph(filename).unwrap();

        assert_eq!(g.node_count(), 11);
        assert_eq!(g.edge_count(), 14);

        // check all indices and node names
        assert_eq!(g.node_weight(00.into()).unwrap().name, "New_York");
        assert_eq!(g.node_weight(01.into()).unwrap().name, "Chicago");
        assert_eq!(g.node_weight(02.into()).unwrap().name, "Washington_DC");
        assert_eq!(g.node_weight(03.into()).unwrap().name, "Seattle");
        assert_eq!(g.node_weight(04.into()).unwrap().name, "Sunnyvale");
        assert_eq!(g.node_weight(05.into()).unwrap().name, "Los_Angeles");
        assert_eq!(g.node_weight(06.into()).unwrap().name, "Denver");
        assert_eq!(g.node_weight(07.into()).unwrap().name, "Kansas_City");
        assert_eq!(g.node_weight(08.into()).unwrap().name, "Houston");
        assert_eq!(g.node_weight(09.into()).unwrap().name, "Atlanta");
        assert_eq!(g.node_weight(10.into()).unwrap().name, "Indianapolis");

        assert_eq!(g.node_weight(03.into()).unwrap().latitude, 47.60621);
        assert_eq!(g.node_weight(03.into()).unwrap().longitude, -122.33207);

        // check that the edges exist and are correct
        assert_eq!(g.edge_endpoints(00.into()), Some((00.into(), 01.into())));
        assert_eq!(g.edge_endpoints(01.into()), Some((00.into(), 02.into())));
        assert_eq!(g.edge_endpoints(02.into()), Some((01.into(), 10.into())));
        assert_eq!(g.edge_endpoints(13.into()), Some((08.into(), 09.into())));
    }

    #[test]
    fn duplicate_labels_and_edges() {
        let gml = "graph [\n  node [\n    id 0\n    label \"Zurich\"\n  ]\n  node [\n    id 1\n    \
                   label \"Zurich\"\n  ]\n  node [\n    id 2\n    label \"St Gallen\"\n  ]\n  \
                   edge [\n    source 0\n    target 1\n  ]\n  edge [\n    source 1\n    \
                   target 0\n  ]\n  edge [\n    source 1\n    target 2\n  ]\n]\n";
        let g = parse_gml_str(gml).unwrap();
        assert_eq!(g.node_weight(0.into()).unwrap().name, "Zurich");
        assert_eq!(g.node_weight(1.into()).unwrap().name, "Zurich_1");
        assert_eq!(g.node_weight(2.into()).unwrap().name, "St_Gallen");
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn errors() {
        assert!(matches!(parse_gml_str("node ["), Err(GmlError::UnexpectedToken { line: 0, .. })));
        assert!(matches!(
            parse_gml_str("graph [\n node [\n label \"A\"\n ]\n]"),
            Err(GmlError::NodeMissingId(3))
        ));
        assert!(matches!(
            parse_gml_str("graph [\n node [\n id 0\n label \"A\"\n ]\n edge [\n source 0\n target 4\n ]\n]"),
            Err(GmlError::UnknownNodeId(4))
        ));
    }
}
