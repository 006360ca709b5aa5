//! Module implementing the genome, i.e., the evolvable encoding of a network, and its configuration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::IznnError;
use crate::gene::{ConnectionGene, ConnectionKey, NodeGene, NodeKey};

/// The genome configuration shared by all genomes of an experiment.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GenomeConfig {
    /// The ordered keys of the network inputs.
    pub input_keys: Vec<NodeKey>,
    /// The ordered keys of the network outputs.
    pub output_keys: Vec<NodeKey>,
    /// Scaling of the node gene distance in genome compatibility tests.
    pub compatibility_weight_coefficient: f64,
}

impl GenomeConfig {
    pub fn new(
        input_keys: Vec<NodeKey>,
        output_keys: Vec<NodeKey>,
        compatibility_weight_coefficient: f64,
    ) -> Self {
        GenomeConfig {
            input_keys,
            output_keys,
            compatibility_weight_coefficient,
        }
    }

    /// Save the configuration to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), IznnError> {
        save_json(self, path)
    }

    /// Load a configuration from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, IznnError> {
        load_json(path)
    }
}

/// A genome: node genes indexed by key and connection genes in insertion order.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Genome {
    nodes: BTreeMap<NodeKey, NodeGene>,
    connections: Vec<ConnectionGene>,
}

impl Genome {
    /// Create an empty genome.
    pub fn new() -> Self {
        Genome::default()
    }

    /// Add a node gene, replacing any gene previously stored under the same key.
    pub fn add_node(&mut self, key: NodeKey, gene: NodeGene) {
        self.nodes.insert(key, gene);
    }

    /// Add a connection gene.
    /// If a connection with the same (source, target) key exists, it is replaced in place so that the insertion order is preserved.
    pub fn add_connection(&mut self, connection: ConnectionGene) {
        match self
            .connections
            .iter_mut()
            .find(|existing| existing.key() == connection.key())
        {
            Some(existing) => *existing = connection,
            None => self.connections.push(connection),
        }
    }

    /// Returns a reference to the node gene with the given key, if any.
    pub fn node(&self, key: NodeKey) -> Option<&NodeGene> {
        self.nodes.get(&key)
    }

    /// Returns a reference to the connection gene with the given key, if any.
    pub fn connection(&self, key: ConnectionKey) -> Option<&ConnectionGene> {
        self.connections
            .iter()
            .find(|connection| connection.key() == key)
    }

    /// An iterator over the node genes, sorted by key.
    pub fn nodes_iter(&self) -> impl Iterator<Item = (&NodeKey, &NodeGene)> + '_ {
        self.nodes.iter()
    }

    /// Returns the connection genes in insertion order.
    pub fn connections(&self) -> &[ConnectionGene] {
        &self.connections
    }

    /// The number of node genes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of connection genes, enabled or not.
    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }

    /// Save the genome to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), IznnError> {
        save_json(self, path)
    }

    /// Load a genome from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, IznnError> {
        load_json(path)
    }
}

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), IznnError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, IznnError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
