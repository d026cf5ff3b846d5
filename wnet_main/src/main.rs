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

use wnet::model::{cascade, printer, Fiber, LightpathRequest, ModelError, OpticalSwitchType, WNet};
use wnet::substrate::NodeId;
use wnet::topology_zoo;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::*;
use petgraph::algo::astar;
use petgraph::graphmap::DiGraphMap;
use std::collections::BTreeSet;
use std::error::Error;

/// Line rate of every lightpath created by the `fail` command, in Gbps
const LINE_RATE_GBPS: f64 = 100.0;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();

    match args.cmd {
        MainCommand::Inspect { gml_file, filterless } => {
            let net = topology_zoo::from_gml(gml_file, switch_type(filterless))?;
            inspect(&net)?;
        }
        MainCommand::Fail { gml_file, node, filterless } => {
            let mut net = topology_zoo::from_gml(gml_file, switch_type(filterless))?;
            fail(&mut net, &node)?;
        }
    }

    Ok(())
}

fn switch_type(filterless: bool) -> OpticalSwitchType {
    if filterless {
        OpticalSwitchType::FilterlessDropAndWasteNotDirectionless
    } else {
        OpticalSwitchType::Roadm
    }
}

/// Print every node with its neighbors, and where the energy of each incoming fiber ends up.
fn inspect(net: &WNet) -> Result<(), ModelError> {
    for id in net.nodes() {
        let node = net.node(id)?;
        println!("{}", printer::node_summary(net, id)?);
        println!(
            "    neighbors: {}",
            node.neighbors_via_outgoing_fibers()
                .into_iter()
                .map(|n| printer::node(net, n))
                .collect::<Result<Vec<_>, _>>()?
                .iter()
                .join(", ")
        );
        for input in node.incoming_fibers() {
            println!(
                "    {:<32} drop: {}, unavoidable: {}",
                printer::fiber(net, input)?,
                printer::fiber_set(net, &node.drop_propagation(input))?,
                printer::fiber_set(net, &node.unavoidable_propagation(input))?
            );
        }
    }
    println!("{} nodes, {} fibers", net.nodes().len(), net.fibers().len());
    net.check_consistency().map_err(|e| ModelError::UnexpectedState(e.to_string()))
}

/// Establish a lightpath between every pair of nodes along the shortest path, fail the node and
/// print the consequences.
fn fail(net: &mut WNet, name: &str) -> Result<(), Box<dyn Error>> {
    let target = net
        .node_by_name(name)
        .map(|n| n.id())
        .ok_or_else(|| ModelError::InvalidArgument(format!("Unknown node: {}", name)))?;

    let requests = establish_full_mesh(net)?;
    info!("Established {} lightpath requests", requests.len());

    let report = net.node_mut(target)?.set_as_down()?;
    let net = &*net;
    for (r, e) in report.failures.iter() {
        error!("Cannot re-evaluate {}: {}", printer::lightpath_request(net, *r)?, e);
    }

    println!("{} lightpath requests affected by the failure of {}", report.affected.len(), name);
    let blocked = cascade::blocked_lightpath_requests(net, &requests);
    println!(
        "{} lightpath requests between working nodes are blocked:\n    {}",
        blocked.len(),
        blocked
            .iter()
            .map(|r| printer::lightpath_request(net, *r))
            .collect::<Result<Vec<_>, _>>()?
            .iter()
            .join("\n    ")
    );

    let lost = net
        .ip_links()
        .into_iter()
        .filter(|l| l.capacity_gbps(net).map(|c| c == 0.0).unwrap_or(false))
        .collect::<Vec<_>>();
    println!(
        "{} IP links without capacity:\n    {}",
        lost.len(),
        lost.iter()
            .map(|l| printer::ip_link(net, *l))
            .collect::<Result<Vec<_>, _>>()?
            .iter()
            .join("\n    ")
    );

    net.check_consistency()?;
    Ok(())
}

/// Create a lightpath request for every ordered pair of nodes, realized by a single lightpath on
/// a shortest path (in hops), and coupled to a new IP link.
fn establish_full_mesh(net: &mut WNet) -> Result<BTreeSet<LightpathRequest>, ModelError> {
    let mut fibers: DiGraphMap<NodeId, Fiber> = DiGraphMap::new();
    for f in net.fibers() {
        let link = net.substrate().link(f.link_id())?;
        fibers.add_edge(link.origin, link.destination, f);
    }

    let mut requests = BTreeSet::new();
    for (a, b) in net.nodes().into_iter().tuple_combinations() {
        for (src, dst) in vec![(a, b), (b, a)] {
            let path = match astar(&fibers, src, |n| n == dst, |_| 1, |_| 0) {
                Some((_, path)) => path,
                None => {
                    warn!(
                        "No path from {} to {}",
                        printer::node(net, src)?,
                        printer::node(net, dst)?
                    );
                    continue;
                }
            };
            let hops = path
                .iter()
                .tuple_windows()
                .filter_map(|(x, y)| fibers.edge_weight(*x, *y).cloned())
                .collect::<Vec<_>>();
            let (ip, _) = net.add_ip_link(src, dst, 0.0, false)?;
            let r = net.add_lightpath_request(src, dst, LINE_RATE_GBPS)?;
            net.add_lightpath(r, hops)?;
            net.couple_lightpath_request(r, ip)?;
            requests.insert(r);
        }
    }
    Ok(requests)
}

#[derive(Parser, Debug)]
#[clap(author = "Tibor Schneider", version = "0.1")]
/// Load a Topology Zoo network as IP-over-WDM model, and inspect it or fail one of its nodes.
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Print all nodes and their switching behavior
    #[clap(name = "inspect")]
    Inspect {
        /// GML file to use
        gml_file: String,
        /// Use filterless drop-and-waste nodes instead of ROADMs
        #[clap(short = 'f', long)]
        filterless: bool,
    },
    /// Establish a full mesh of lightpaths, fail a node, and print the affected requests
    #[clap(name = "fail")]
    Fail {
        /// GML file to use
        gml_file: String,
        /// Name of the node to fail
        #[clap(short = 'n', long)]
        node: String,
        /// Use filterless drop-and-waste nodes instead of ROADMs
        #[clap(short = 'f', long)]
        filterless: bool,
    },
}
