//! This crate provides spiking neural networks of Izhikevich neurons built from evolvable genomes.
//!
//! A [`Genome`](genome::Genome) encodes node parameters and weighted connections. Its phenotype is a
//! [`Network`](network::Network) holding one [`Neuron`](neuron::Neuron) per node required to compute the outputs.
//! The network is simulated with a fixed time step and instantaneous signal propagation: at every step, each neuron
//! sees the spikes emitted by the other neurons during the previous step.
//!
//! Neurons follow the model described in
//! Izhikevich, E. M., *Simple Model of Spiking Neurons*, IEEE Transactions on Neural Networks, 14(6), 2003.
//!
//! # Building and Simulating Networks
//!
//! ```rust
//! use rusty_iznn::gene::{ConnectionGene, NeuronPreset, NodeGene};
//! use rusty_iznn::genome::{Genome, GenomeConfig};
//! use rusty_iznn::network::Network;
//!
//! // A single output neuron driven by two inputs, one of them disabled
//! let mut genome = Genome::new();
//! genome.add_node(0, NodeGene::from_preset(0.0, NeuronPreset::RegularSpiking));
//! genome.add_connection(ConnectionGene::new(-1, 0, 10.0, true));
//! genome.add_connection(ConnectionGene::new(-2, 0, 10.0, false));
//! let config = GenomeConfig::new(vec![-1, -2], vec![0], 0.5);
//!
//! let mut network = Network::create(&genome, &config).unwrap();
//! assert_eq!(network.num_neurons(), 1);
//! assert_eq!(network.num_connections(), 1);
//!
//! // Drive the network for 100 ms
//! network.set_inputs(&[1.0, 0.0]).unwrap();
//! let dt = network.time_step_msec();
//! let num_spikes: f64 = (0..2_000)
//!     .map(|_| network.advance(dt).unwrap()[0])
//!     .sum();
//! assert!(num_spikes > 0.0);
//! ```
//!
//! # Comparing Genes
//!
//! ```rust
//! use rusty_iznn::gene::{NeuronPreset, NodeGene};
//!
//! let g1 = NodeGene::from_preset(0.0, NeuronPreset::RegularSpiking);
//! let g2 = NodeGene::from_preset(0.0, NeuronPreset::Chattering);
//! assert_eq!(g1.distance(&g2, 0.5), 0.5 * (15.0 + 6.0));
//! ```

pub mod error;
pub mod gene;
pub mod genome;
pub mod graph;
pub mod network;
pub mod neuron;
pub mod sampler;

/// The membrane potential (mV) above which a neuron fires.
pub const SPIKE_THRESHOLD: f64 = 30.0;
/// The default simulation time step (ms).
pub const TIME_STEP_MSEC: f64 = 0.05;
