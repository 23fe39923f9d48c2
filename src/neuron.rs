use rand::Rng;

use crate::{Activation, Layer};

/// What a neuron does with its terminals and how it derives its error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    /// Passes its single terminal through unchanged; never has an error.
    Input,
    /// Error is the output layer's weighted error sum at this neuron's id.
    Hidden,
    /// Error is derived from the expected output of the current pattern.
    Output { expected_output: f64 },
}

#[derive(Debug, Clone)]
pub struct Neuron {
    id: usize,
    role: Role,
    weights: Vec<f64>,
    input_terminals: Vec<f64>,
    output: f64,
    error: f64,
}

impl Neuron {
    /// Creates a neuron with `fan_in` zeroed weights and terminals.
    ///
    /// `id` is the neuron's position inside its layer. Hidden neurons use it
    /// as the column to read from each output neuron's weights.
    #[inline]
    pub fn new(id: usize, role: Role, fan_in: usize) -> Self {
        Self {
            id,
            role,
            weights: vec![0.0; fan_in],
            input_terminals: vec![0.0; fan_in],
            output: 0.0,
            error: 0.0,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Replaces the weight vector. The fan-in never changes.
    #[inline]
    pub fn set_weights(&mut self, weights: &[f64]) {
        debug_assert_eq!(weights.len(), self.weights.len());
        self.weights.copy_from_slice(weights);
    }

    #[inline]
    pub fn input_terminals(&self) -> &[f64] {
        &self.input_terminals
    }

    #[inline]
    pub fn set_input_terminal(&mut self, index: usize, value: f64) {
        self.input_terminals[index] = value;
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Expected output of an output neuron, `0.0` for any other role.
    #[inline]
    pub fn expected_output(&self) -> f64 {
        match self.role {
            Role::Output { expected_output } => expected_output,
            Role::Input | Role::Hidden => 0.0,
        }
    }

    #[inline]
    pub fn set_expected_output(&mut self, value: f64) {
        debug_assert!(matches!(self.role, Role::Output { .. }));
        if let Role::Output { expected_output } = &mut self.role {
            *expected_output = value;
        }
    }

    /// Computes the neuron output from its current terminals.
    ///
    /// Input neurons copy terminal 0. Every other neuron divides the dot
    /// product of weights and terminals by `2 * layer_len` before applying
    /// `activation`, where `layer_len` is the neuron count of its own layer.
    #[inline]
    pub fn calculate_output(&mut self, layer_len: usize, activation: Activation) {
        match self.role {
            Role::Input => {
                self.output = self.input_terminals[0];
            }
            Role::Hidden | Role::Output { .. } => {
                let mut sum = 0.0;
                for (&w, &x) in self.weights.iter().zip(&self.input_terminals) {
                    sum += x * w;
                }
                self.output = activation.calculate_output(sum / (layer_len * 2) as f64);
            }
        }
    }

    /// Draws every weight uniformly from `[0, 1)`.
    pub fn reset_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for w in &mut self.weights {
            *w = rng.gen_range(0.0..1.0);
        }
    }

    /// `w[i] += rate * error * terminal[i]` for every connection.
    ///
    /// Each new weight only reads its own old value, so updating in place is
    /// the same as computing every value from a snapshot first.
    #[inline]
    pub fn adjust_weights(&mut self, learning_rate: f64) {
        let step = learning_rate * self.error;
        for (w, &x) in self.weights.iter_mut().zip(&self.input_terminals) {
            *w += step * x;
        }
    }

    /// Computes this neuron's error for the current pattern.
    ///
    /// `output_layer` is only read by hidden neurons, and must hold the output
    /// layer with its errors for this pattern already computed.
    pub fn compute_error(&mut self, output_layer: Option<&Layer>) {
        // 1 - y^2 is the derivative of tanh expressed through its output.
        let slope = 1.0 - self.output * self.output;
        match self.role {
            Role::Input => {}
            Role::Output { expected_output } => {
                self.error = (expected_output - self.output) * slope;
            }
            Role::Hidden => {
                let sum = output_layer.map_or(0.0, |layer| layer.weighted_error_sum(self.id));
                self.error = sum * slope;
            }
        }
    }
}
