//! Graph utilities on the connections of a genome.

use itertools::Itertools;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::gene::{ConnectionGene, NodeKey};

/// Returns the keys of the nodes required to compute the outputs, i.e., the output keys together with every node
/// having a path of enabled connections to some output.
/// The search walks the connections backward from the outputs. Input keys are never part of the result unless they
/// are outputs themselves.
pub fn required_for_output(
    input_keys: &[NodeKey],
    output_keys: &[NodeKey],
    connections: &[ConnectionGene],
) -> BTreeSet<NodeKey> {
    let inputs: HashSet<NodeKey> = input_keys.iter().copied().collect();
    let predecessors: HashMap<NodeKey, Vec<NodeKey>> = connections
        .iter()
        .filter(|connection| connection.enabled)
        .map(|connection| (connection.target, connection.source))
        .into_group_map();

    let mut required: BTreeSet<NodeKey> = output_keys.iter().copied().collect();
    let mut visited: HashSet<NodeKey> = output_keys.iter().copied().collect();
    let mut queue: VecDeque<NodeKey> = output_keys.iter().copied().collect();

    while let Some(target) = queue.pop_front() {
        for &source in predecessors.get(&target).into_iter().flatten() {
            if visited.insert(source) {
                if !inputs.contains(&source) {
                    required.insert(source);
                }
                queue.push_back(source);
            }
        }
    }

    required
}
