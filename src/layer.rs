use rand::Rng;

use crate::Activation;
use crate::neuron::{Neuron, Role};

/// Handle to a layer inside a [`crate::Network`].
///
/// Layers live in a fixed arena owned by the network, so a handle stays valid
/// across weight reloads and hidden-layer redefinition. Only the three
/// constants exist outside the crate:
///
/// ```compile_fail
/// let id = glyph_mlp::LayerId(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) usize);

impl LayerId {
    pub const INPUT: LayerId = LayerId(0);
    pub const HIDDEN: LayerId = LayerId(1);
    pub const OUTPUT: LayerId = LayerId(2);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Input,
    /// Hidden layers read back-propagated error from `output_layer`.
    Hidden { output_layer: LayerId },
    Output,
}

impl LayerKind {
    fn neuron_role(self) -> Role {
        match self {
            LayerKind::Input => Role::Input,
            LayerKind::Hidden { .. } => Role::Hidden,
            LayerKind::Output => Role::Output {
                expected_output: 0.0,
            },
        }
    }
}

/// An ordered, role-homogeneous group of neurons.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    kind: LayerKind,
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(name: impl Into<String>, kind: LayerKind, neurons: usize, fan_in: usize) -> Self {
        let mut layer = Self {
            name: name.into(),
            kind,
            neurons: Vec::with_capacity(neurons),
        };
        layer.initialize(neurons, fan_in);
        layer
    }

    /// Replaces every neuron with `neurons` fresh ones of fan-in `fan_in`.
    ///
    /// Ids are reassigned from zero; all weights are discarded.
    pub fn initialize(&mut self, neurons: usize, fan_in: usize) {
        self.neurons.clear();
        for _ in 0..neurons {
            self.add_neuron(fan_in);
        }
    }

    fn add_neuron(&mut self, fan_in: usize) {
        let id = self.neurons.len();
        self.neurons
            .push(Neuron::new(id, self.kind.neuron_role(), fan_in));
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// The output layer this hidden layer propagates error from.
    #[inline]
    pub fn output_layer(&self) -> Option<LayerId> {
        match self.kind {
            LayerKind::Hidden { output_layer } => Some(output_layer),
            LayerKind::Input | LayerKind::Output => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    #[inline]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    #[inline]
    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Fan-in shared by every neuron of this layer (0 when empty).
    #[inline]
    pub fn fan_in(&self) -> usize {
        self.neurons.first().map_or(0, Neuron::fan_in)
    }

    /// Total weight count of the layer.
    #[inline]
    pub fn weight_count(&self) -> usize {
        self.neurons.iter().map(Neuron::fan_in).sum()
    }

    /// Presents a feature vector to an input layer.
    ///
    /// Shape contract: `data.len() == self.len()`.
    pub fn load_input(&mut self, data: &[f64]) {
        debug_assert_eq!(data.len(), self.neurons.len());

        let len = self.neurons.len();
        for (neuron, &value) in self.neurons.iter_mut().zip(data) {
            neuron.set_input_terminal(0, value);
            neuron.calculate_output(len, Activation::Saturating);
        }
    }

    /// Copies `previous` outputs into every neuron's terminals, in neuron-id
    /// order, then computes this layer's outputs.
    ///
    /// Shape contract: `self.fan_in() == previous.len()`.
    pub fn forward_from(&mut self, previous: &Layer, activation: Activation) {
        debug_assert_eq!(self.fan_in(), previous.len());

        let len = self.neurons.len();
        for neuron in &mut self.neurons {
            for (i, prev) in previous.neurons.iter().enumerate() {
                neuron.set_input_terminal(i, prev.output());
            }
            neuron.calculate_output(len, activation);
        }
    }

    /// Writes the expected outputs of the current pattern into an output layer.
    pub fn set_expected_outputs(&mut self, expected: &[f64]) {
        debug_assert_eq!(expected.len(), self.neurons.len());

        for (neuron, &value) in self.neurons.iter_mut().zip(expected) {
            neuron.set_expected_output(value);
        }
    }

    /// See [`Neuron::compute_error`].
    pub fn compute_errors(&mut self, output_layer: Option<&Layer>) {
        for neuron in &mut self.neurons {
            neuron.compute_error(output_layer);
        }
    }

    pub fn adjust_weights(&mut self, learning_rate: f64) {
        for neuron in &mut self.neurons {
            neuron.adjust_weights(learning_rate);
        }
    }

    pub fn reset_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for neuron in &mut self.neurons {
            neuron.reset_weights(rng);
        }
    }

    /// `sum(error_k * w_k[index])` over the neurons of this layer.
    ///
    /// `index` is the id of a neuron in the previous layer.
    pub fn weighted_error_sum(&self, index: usize) -> f64 {
        let mut sum = 0.0;
        for neuron in &self.neurons {
            sum += neuron.error() * neuron.weights()[index];
        }
        sum
    }

    /// `0.5 * sum((expected - output)^2)` over the neurons of this layer.
    pub fn mean_squared_error(&self) -> f64 {
        let mut mse = 0.0;
        for neuron in &self.neurons {
            let diff = neuron.expected_output() - neuron.output();
            mse += diff * diff;
        }
        0.5 * mse
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::output).collect()
    }

    /// Outputs thresholded at zero: `1` for positive values, `-1` otherwise.
    pub fn discrete_outputs(&self) -> Vec<i8> {
        self.neurons
            .iter()
            .map(|n| if n.output() > 0.0 { 1 } else { -1 })
            .collect()
    }

    /// Outputs rendered as ` ( a; b; ... )` with at most two decimals each.
    pub fn formatted_outputs(&self) -> String {
        let mut s = String::from(" ( ");
        for neuron in &self.neurons {
            s.push_str(&format_two_decimals(neuron.output()));
            s.push_str("; ");
        }
        s.push(')');
        s
    }

    /// Every weight of every neuron, each followed by `;`.
    pub fn weights_string(&self) -> String {
        let mut s = String::new();
        for neuron in &self.neurons {
            for w in neuron.weights() {
                s.push_str(&w.to_string());
                s.push(';');
            }
        }
        s
    }
}

fn format_two_decimals(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}
