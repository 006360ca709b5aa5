//! Module implementing the node and connection genes of a genome.

use serde::{Deserialize, Serialize};

/// The key of a node within a genome. Negative keys conventionally denote network inputs.
pub type NodeKey = i64;

/// The key of a connection within a genome, i.e., its (source, target) pair of node keys.
pub type ConnectionKey = (NodeKey, NodeKey);

/// Known spiking behaviors of the Izhikevich model and their (a, b, c, d) parameters.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum NeuronPreset {
    RegularSpiking,
    IntrinsicallyBursting,
    Chattering,
    FastSpiking,
    ThalamoCortical,
    Resonator,
    LowThresholdSpiking,
}

impl NeuronPreset {
    /// Returns the (a, b, c, d) parameters of the preset.
    pub fn params(&self) -> (f64, f64, f64, f64) {
        match self {
            NeuronPreset::RegularSpiking => (0.02, 0.20, -65.0, 8.00),
            NeuronPreset::IntrinsicallyBursting => (0.02, 0.20, -55.0, 4.00),
            NeuronPreset::Chattering => (0.02, 0.20, -50.0, 2.00),
            NeuronPreset::FastSpiking => (0.10, 0.20, -65.0, 2.00),
            NeuronPreset::ThalamoCortical => (0.02, 0.25, -65.0, 0.05),
            NeuronPreset::Resonator => (0.10, 0.25, -65.0, 2.00),
            NeuronPreset::LowThresholdSpiking => (0.02, 0.25, -65.0, 2.00),
        }
    }
}

/// The parameters of a single node: an additive bias current and the Izhikevich (a, b, c, d) parameters.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct NodeGene {
    /// Constant current added to the node input at every step.
    pub bias: f64,
    /// Time scale of the recovery variable.
    pub a: f64,
    /// Sensitivity of the recovery variable to the membrane potential.
    pub b: f64,
    /// After-spike reset value of the membrane potential (mV).
    pub c: f64,
    /// After-spike increment of the recovery variable.
    pub d: f64,
}

impl NodeGene {
    pub fn new(bias: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        NodeGene { bias, a, b, c, d }
    }

    /// Create a node gene with the parameters of a known spiking behavior.
    pub fn from_preset(bias: f64, preset: NeuronPreset) -> Self {
        let (a, b, c, d) = preset.params();
        NodeGene { bias, a, b, c, d }
    }

    /// Returns the genomic distance between two node genes, used to evaluate compatibility between genomes.
    /// Only the model parameters contribute; the bias is left out of the sum.
    pub fn distance(&self, other: &NodeGene, compatibility_weight_coefficient: f64) -> f64 {
        let s = (self.a - other.a).abs()
            + (self.b - other.b).abs()
            + (self.c - other.c).abs()
            + (self.d - other.d).abs();
        s * compatibility_weight_coefficient
    }
}

/// A weighted connection between two nodes of a genome.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ConnectionGene {
    /// The key of the node sending the signal.
    pub source: NodeKey,
    /// The key of the node receiving the signal.
    pub target: NodeKey,
    /// The weight applied to the transmitted signal.
    pub weight: f64,
    /// Whether the connection is expressed in the phenotype.
    pub enabled: bool,
}

impl ConnectionGene {
    pub fn new(source: NodeKey, target: NodeKey, weight: f64, enabled: bool) -> Self {
        ConnectionGene {
            source,
            target,
            weight,
            enabled,
        }
    }

    /// Returns the (source, target) key of the connection.
    pub fn key(&self) -> ConnectionKey {
        (self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_preset() {
        let gene = NodeGene::from_preset(1.5, NeuronPreset::FastSpiking);
        assert_eq!(gene, NodeGene::new(1.5, 0.1, 0.2, -65.0, 2.0));
    }

    #[test]
    fn test_distance_identical() {
        let gene = NodeGene::new(0.3, 0.02, 0.2, -65.0, 8.0);
        assert_eq!(gene.distance(&gene, 0.0), 0.0);
        assert_eq!(gene.distance(&gene, 0.5), 0.0);
        assert_eq!(gene.distance(&gene, 7.0), 0.0);
    }

    #[test]
    fn test_distance_symmetric_and_linear() {
        let g1 = NodeGene::from_preset(0.0, NeuronPreset::RegularSpiking);
        let g2 = NodeGene::from_preset(0.0, NeuronPreset::Resonator);
        assert_eq!(g1.distance(&g2, 0.5), g2.distance(&g1, 0.5));
        assert_eq!(g1.distance(&g2, 1.0), 2.0 * g1.distance(&g2, 0.5));
    }

    #[test]
    fn test_distance_ignores_bias() {
        let g1 = NodeGene::new(0.0, 0.02, 0.2, -65.0, 8.0);
        let g2 = NodeGene::new(100.0, 0.02, 0.2, -65.0, 8.0);
        assert_eq!(g1.distance(&g2, 1.0), 0.0);

        let g3 = NodeGene::new(0.0, 0.02, 0.2, -55.0, 4.0);
        assert_eq!(g1.distance(&g3, 1.0), 14.0);
        assert_eq!(g1.distance(&g3, 0.5), 7.0);
    }

    #[test]
    fn test_connection_key() {
        let connection = ConnectionGene::new(-1, 3, 0.5, true);
        assert_eq!(connection.key(), (-1, 3));
    }
}
