//! Module implementing the Izhikevich spiking neuron.
//!
//! The membrane potential `v` and the recovery variable `u` follow
//! ```text
//! v' = 0.04 v^2 + 5 v + 140 - u + I
//! u' = a (b v - u)
//! ```
//! and, whenever `v` exceeds the spike threshold, the neuron fires and `v <- c`, `u <- u + d`.

use serde::{Deserialize, Serialize};

use crate::gene::{NodeGene, NodeKey};
use crate::SPIKE_THRESHOLD;

/// Represents an input to a neuron, i.e., the key of the sending node and the connection weight.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Input {
    /// The key of the sending node, either another neuron or a network input.
    pub source: NodeKey,
    /// The weight of the connection.
    pub weight: f64,
}

impl Input {
    pub fn new(source: NodeKey, weight: f64) -> Self {
        Input { source, weight }
    }
}

/// Represents an Izhikevich spiking neuron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Neuron {
    bias: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    inputs: Vec<Input>,
    // Membrane potential (mV).
    v: f64,
    // Membrane recovery variable.
    u: f64,
    // 1.0 if the neuron fired during the last step, 0.0 otherwise.
    fired: f64,
    current: f64,
}

impl Neuron {
    /// Create a new neuron from its parameters and its (ordered) inputs.
    /// The neuron starts in its reset state.
    pub fn new(bias: f64, a: f64, b: f64, c: f64, d: f64, inputs: Vec<Input>) -> Self {
        Neuron {
            bias,
            a,
            b,
            c,
            d,
            inputs,
            v: c,
            u: b * c,
            fired: 0.0,
            current: bias,
        }
    }

    /// Create a new neuron from a node gene.
    pub fn from_gene(gene: &NodeGene, inputs: Vec<Input>) -> Self {
        Neuron::new(gene.bias, gene.a, gene.b, gene.c, gene.d, inputs)
    }

    /// Reset all state variables.
    pub fn reset(&mut self) {
        self.v = self.c;
        self.u = self.b * self.c;
        self.fired = 0.0;
        self.current = self.bias;
    }

    /// Advance the simulation time by the given time step (in milliseconds), using the current input current.
    ///
    /// The membrane potential is integrated with two explicit Euler half-steps, then the recovery variable with a full
    /// step. The model is not stable for all parameters and inputs: if the integration diverges, the state is reset
    /// (keeping the input current) and no spike is emitted.
    pub fn advance(&mut self, dt_msec: f64) {
        match self.integrate(dt_msec) {
            Some((v, u)) if v > SPIKE_THRESHOLD => {
                self.fired = 1.0;
                self.v = self.c;
                self.u = u + self.d;
            }
            Some((v, u)) => {
                self.fired = 0.0;
                self.v = v;
                self.u = u;
            }
            None => {
                log::trace!(
                    "Integration overflow (v={}, u={}, I={}): neuron reset",
                    self.v,
                    self.u,
                    self.current
                );
                self.fired = 0.0;
                self.v = self.c;
                self.u = self.b * self.c;
            }
        }
    }

    // Returns the integrated (v, u) pair, or None if any intermediate value is not finite.
    fn integrate(&self, dt_msec: f64) -> Option<(f64, f64)> {
        let mut v = self.v;
        for _ in 0..2 {
            v += 0.5 * dt_msec * (0.04 * v * v + 5.0 * v + 140.0 - self.u + self.current);
            if !v.is_finite() {
                return None;
            }
        }
        let u = self.u + dt_msec * self.a * (self.b * v - self.u);
        u.is_finite().then_some((v, u))
    }

    /// Returns the membrane potential (mV).
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Returns the recovery variable.
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Returns 1.0 if the neuron fired during the last step, 0.0 otherwise.
    pub fn fired(&self) -> f64 {
        self.fired
    }

    /// Returns the input current used by the next step.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Set the input current used by the next step.
    pub fn set_current(&mut self, current: f64) {
        self.current = current;
    }

    /// Returns the bias, i.e., the input current of the neuron without any input.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Returns the (bias, a, b, c, d) parameters of the neuron as a node gene.
    pub fn gene(&self) -> NodeGene {
        NodeGene::new(self.bias, self.a, self.b, self.c, self.d)
    }

    /// Returns a slice of inputs of the neuron.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Returns the number of inputs of the neuron.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }
}
