//! Module for sampling random genomes.
//!
//! # Examples
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rusty_iznn::gene::NeuronPreset;
//! use rusty_iznn::network::Network;
//! use rusty_iznn::sampler::GenomeSampler;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let sampler = GenomeSampler::new(3, 2, 5, 20, (-10.0, 10.0), NeuronPreset::RegularSpiking).unwrap();
//! let genome = sampler.sample(&mut rng);
//! let network = Network::create(&genome, &sampler.config(0.5)).unwrap();
//! assert!(network.num_neurons() >= 2);
//! ```
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

use crate::error::IznnError;
use crate::gene::{ConnectionGene, NeuronPreset, NodeGene, NodeKey};
use crate::genome::{Genome, GenomeConfig};

/// Bound on the absolute value of the weight and bias limits.
pub const MAX_LIMIT: f64 = f64::MAX / 4.0;

/// A distribution of genomes with a fixed number of inputs, outputs and hidden nodes.
///
/// Input keys are `-1, -2, ...`, output keys `0, 1, ...` and hidden keys follow the output keys.
/// Node parameters are those of a preset, multiplied by `1 + e` with `e` normally distributed.
#[derive(Debug, Clone)]
pub struct GenomeSampler {
    num_inputs: usize,
    num_outputs: usize,
    num_hidden: usize,
    num_connections: usize,
    weight_dist: Uniform<f64>,
    bias_dist: Uniform<f64>,
    preset: NeuronPreset,
    param_noise: Normal<f64>,
    enabled_rate: f64,
}

impl GenomeSampler {
    /// Create a new sampler without bias, parameter noise, or disabled connections.
    pub fn new(
        num_inputs: usize,
        num_outputs: usize,
        num_hidden: usize,
        num_connections: usize,
        lim_weights: (f64, f64),
        preset: NeuronPreset,
    ) -> Result<Self, IznnError> {
        if num_outputs == 0 {
            return Err(IznnError::InvalidParameter(
                "The number of outputs must be positive.".to_string(),
            ));
        }

        Ok(GenomeSampler {
            num_inputs,
            num_outputs,
            num_hidden,
            num_connections,
            weight_dist: Self::uniform(lim_weights, "weight")?,
            bias_dist: Self::uniform((0.0, 0.0), "bias")?,
            preset,
            param_noise: Self::normal(0.0)?,
            enabled_rate: 1.0,
        })
    }

    /// Set the range of the node biases.
    pub fn with_bias(mut self, lim_bias: (f64, f64)) -> Result<Self, IznnError> {
        self.bias_dist = Self::uniform(lim_bias, "bias")?;
        Ok(self)
    }

    /// Set the (relative) standard deviation of the node parameters around the preset.
    pub fn with_param_noise(mut self, std_dev: f64) -> Result<Self, IznnError> {
        self.param_noise = Self::normal(std_dev)?;
        Ok(self)
    }

    /// Set the probability of a connection to be enabled.
    pub fn with_enabled_rate(mut self, enabled_rate: f64) -> Result<Self, IznnError> {
        if !(0.0..=1.0).contains(&enabled_rate) {
            return Err(IznnError::InvalidParameter(
                "The enabled rate must be a probability.".to_string(),
            ));
        }
        self.enabled_rate = enabled_rate;
        Ok(self)
    }

    // `Uniform::new_inclusive` panics if the scaled range overflows, and sampling computes `lo - (hi - lo)`.
    fn uniform((lo, hi): (f64, f64), name: &str) -> Result<Uniform<f64>, IznnError> {
        if !(lo.abs() <= MAX_LIMIT && hi.abs() <= MAX_LIMIT) {
            return Err(IznnError::InvalidParameter(format!(
                "The {name} range [{lo}, {hi}] must lie within [-{MAX_LIMIT:e}, {MAX_LIMIT:e}]."
            )));
        }
        if lo > hi {
            return Err(IznnError::InvalidParameter(format!(
                "The minimum {name} must be less than the maximum {name}."
            )));
        }
        Ok(Uniform::new_inclusive(lo, hi))
    }

    fn normal(std_dev: f64) -> Result<Normal<f64>, IznnError> {
        if std_dev < 0.0 {
            return Err(IznnError::InvalidParameter(
                "The parameter noise must be non-negative.".to_string(),
            ));
        }
        Normal::new(0.0, std_dev).map_err(|e| IznnError::InvalidParameter(e.to_string()))
    }

    /// The ordered input keys of the sampled genomes.
    pub fn input_keys(&self) -> Vec<NodeKey> {
        (1..=self.num_inputs as NodeKey).map(|i| -i).collect()
    }

    /// The ordered output keys of the sampled genomes.
    pub fn output_keys(&self) -> Vec<NodeKey> {
        (0..self.num_outputs as NodeKey).collect()
    }

    /// The keys of the hidden nodes of the sampled genomes.
    pub fn hidden_keys(&self) -> Vec<NodeKey> {
        let start = self.num_outputs as NodeKey;
        (start..start + self.num_hidden as NodeKey).collect()
    }

    /// The genome configuration matching the sampled genomes.
    pub fn config(&self, compatibility_weight_coefficient: f64) -> GenomeConfig {
        GenomeConfig::new(
            self.input_keys(),
            self.output_keys(),
            compatibility_weight_coefficient,
        )
    }

    /// Sample a genome from the distribution.
    /// Connections drawn twice with the same endpoints are merged, hence the genome may hold fewer connections than
    /// requested.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Genome {
        let mut genome = Genome::new();

        let (a, b, c, d) = self.preset.params();
        let targets: Vec<NodeKey> = self
            .output_keys()
            .into_iter()
            .chain(self.hidden_keys())
            .collect();
        let sources: Vec<NodeKey> = self
            .input_keys()
            .into_iter()
            .chain(targets.iter().copied())
            .collect();

        for &key in targets.iter() {
            let gene = NodeGene::new(
                self.bias_dist.sample(rng),
                a * (1.0 + self.param_noise.sample(rng)),
                b * (1.0 + self.param_noise.sample(rng)),
                c * (1.0 + self.param_noise.sample(rng)),
                d * (1.0 + self.param_noise.sample(rng)),
            );
            genome.add_node(key, gene);
        }

        for _ in 0..self.num_connections {
            let source = sources[rng.gen_range(0..sources.len())];
            let target = targets[rng.gen_range(0..targets.len())];
            let enabled = rng.gen_bool(self.enabled_rate);
            genome.add_connection(ConnectionGene::new(
                source,
                target,
                self.weight_dist.sample(rng),
                enabled,
            ));
        }

        genome
    }
}
