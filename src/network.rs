//! Module implementing the network of Izhikevich neurons, i.e., the phenotype of a genome.

use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::IznnError;
use crate::gene::NodeKey;
use crate::genome::{Genome, GenomeConfig};
use crate::graph::required_for_output;
use crate::neuron::{Input, Neuron};
use crate::TIME_STEP_MSEC;

/// A spiking neural network, i.e., a collection of neurons indexed by key, together with the ordered keys of its
/// inputs and outputs.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Network {
    neurons: BTreeMap<NodeKey, Neuron>,
    input_keys: Vec<NodeKey>,
    output_keys: Vec<NodeKey>,
    input_values: HashMap<NodeKey, f64>,
}

impl Network {
    /// Create a new network from its neurons and its ordered input and output keys.
    /// Returns an error if some output key has no neuron.
    pub fn new(
        neurons: BTreeMap<NodeKey, Neuron>,
        input_keys: Vec<NodeKey>,
        output_keys: Vec<NodeKey>,
    ) -> Result<Self, IznnError> {
        if let Some(key) = output_keys.iter().find(|&key| !neurons.contains_key(key)) {
            return Err(IznnError::InvalidParameter(format!(
                "Output {} has no neuron",
                key
            )));
        }

        Ok(Network {
            neurons,
            input_keys,
            output_keys,
            input_values: HashMap::new(),
        })
    }

    /// Build the phenotype of a genome.
    ///
    /// Only the nodes required to compute the outputs are expressed. Each neuron receives the enabled connections
    /// targeting it, in the order they appear in the genome.
    pub fn create(genome: &Genome, config: &GenomeConfig) -> Result<Self, IznnError> {
        let required = required_for_output(
            &config.input_keys,
            &config.output_keys,
            genome.connections(),
        );

        let mut node_inputs: HashMap<NodeKey, Vec<Input>> = genome
            .connections()
            .iter()
            .filter(|connection| connection.enabled)
            .filter(|connection| {
                required.contains(&connection.source) || required.contains(&connection.target)
            })
            .map(|connection| {
                (
                    connection.target,
                    Input::new(connection.source, connection.weight),
                )
            })
            .into_group_map();

        let neurons = required
            .iter()
            .map(|&key| -> Result<(NodeKey, Neuron), IznnError> {
                let gene = genome.node(key).ok_or(IznnError::MissingNodeGene(key))?;
                let inputs = node_inputs.remove(&key).unwrap_or_default();
                Ok((key, Neuron::from_gene(gene, inputs)))
            })
            .collect::<Result<BTreeMap<NodeKey, Neuron>, IznnError>>()?;

        log::debug!(
            "Phenotype expresses {} of {} nodes and {} of {} connections",
            neurons.len(),
            genome.num_nodes(),
            neurons.values().map(Neuron::num_inputs).sum::<usize>(),
            genome.num_connections()
        );

        Network::new(
            neurons,
            config.input_keys.clone(),
            config.output_keys.clone(),
        )
    }

    /// Assign the input values, in the order of the input keys.
    /// Returns an error, without modifying the current input values, if the number of values does not match the
    /// number of input keys.
    pub fn set_inputs(&mut self, values: &[f64]) -> Result<(), IznnError> {
        if values.len() != self.input_keys.len() {
            return Err(IznnError::InputCountMismatch {
                expected: self.input_keys.len(),
                found: values.len(),
            });
        }

        for (&key, &value) in self.input_keys.iter().zip(values) {
            self.input_values.insert(key, value);
        }
        Ok(())
    }

    /// Reset all neurons to their initial state.
    /// The input values are kept.
    pub fn reset(&mut self) {
        self.neurons.values_mut().for_each(Neuron::reset);
    }

    /// Returns the simulation time step (in milliseconds).
    pub fn time_step_msec(&self) -> f64 {
        TIME_STEP_MSEC
    }

    /// Advance the simulation time by the given time step (in milliseconds) and returns the outputs, i.e., whether
    /// each output neuron fired (1.0) or not (0.0), in the order of the output keys.
    ///
    /// All input currents are computed from the state reached at the end of the previous step before any neuron is
    /// updated. Returns an error, without modifying the network, if some neuron input is neither a neuron nor a
    /// network input with an assigned value.
    pub fn advance(&mut self, dt_msec: f64) -> Result<Vec<f64>, IznnError> {
        let currents = self
            .neurons
            .values()
            .map(|neuron| self.input_current(neuron))
            .collect::<Result<Vec<f64>, IznnError>>()?;

        for (neuron, current) in self.neurons.values_mut().zip(currents) {
            neuron.set_current(current);
            neuron.advance(dt_msec);
        }

        Ok(self.outputs())
    }

    // Returns the bias plus the weighted sum of the neuron inputs, accumulated in the order of the inputs.
    fn input_current(&self, neuron: &Neuron) -> Result<f64, IznnError> {
        neuron
            .inputs()
            .iter()
            .try_fold(neuron.bias(), |current, input| -> Result<f64, IznnError> {
                let value = match self.neurons.get(&input.source) {
                    Some(source) => source.fired(),
                    None => *self
                        .input_values
                        .get(&input.source)
                        .ok_or(IznnError::MissingInputBinding(input.source))?,
                };
                Ok(current + value * input.weight)
            })
    }

    /// Returns whether each output neuron fired during the last step, in the order of the output keys.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_keys
            .iter()
            .map(|key| self.neurons.get(key).map_or(0.0, Neuron::fired))
            .collect()
    }

    /// A reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    pub fn neuron(&self, key: NodeKey) -> Option<&Neuron> {
        self.neurons.get(&key)
    }

    /// An iterator over the neurons in the network, sorted by key.
    pub fn neurons_iter(&self) -> impl Iterator<Item = (&NodeKey, &Neuron)> + '_ {
        self.neurons.iter()
    }

    /// The number of neurons in the network.
    pub fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// The number of connections in the network.
    pub fn num_connections(&self) -> usize {
        self.neurons.values().map(Neuron::num_inputs).sum()
    }

    /// The ordered input keys, matching the values passed to `set_inputs`.
    pub fn input_keys(&self) -> &[NodeKey] {
        &self.input_keys
    }

    /// The ordered output keys, matching the values returned by `advance`.
    pub fn output_keys(&self) -> &[NodeKey] {
        &self.output_keys
    }

    /// Returns the value assigned to the given input, if any.
    pub fn input_value(&self, key: NodeKey) -> Option<f64> {
        self.input_values.get(&key).copied()
    }
}
