use rand::rngs::StdRng;

use crate::layer::{Layer, LayerId, LayerKind};
use crate::{Activation, Error, Hyperparameters, NetworkBuilder, Pattern, Result};

/// A three-layer perceptron: input, hidden and output.
///
/// The network owns its layers, its training set and the RNG used to reset
/// weights. Weights are meaningless until they are reset (which `train` does)
/// or loaded from a weights blob.
#[derive(Debug, Clone)]
pub struct Network {
    /// Indexed by [`LayerId`]; always exactly three entries.
    layers: Vec<Layer>,
    activation: Activation,
    hyperparameters: Hyperparameters,
    pub(crate) training_set: Vec<Pattern>,
    rng: StdRng,
}

impl Network {
    /// Network with the default activation and hyperparameters, seeded from
    /// the operating system.
    pub fn new(input_neurons: usize, hidden_neurons: usize, output_neurons: usize) -> Result<Self> {
        Ok(NetworkBuilder::new(input_neurons, hidden_neurons, output_neurons)?.build())
    }

    pub fn new_with_seed(
        input_neurons: usize,
        hidden_neurons: usize,
        output_neurons: usize,
        seed: u64,
    ) -> Result<Self> {
        Ok(NetworkBuilder::new(input_neurons, hidden_neurons, output_neurons)?.build_with_seed(seed))
    }

    pub(crate) fn from_parts(
        input_neurons: usize,
        hidden_neurons: usize,
        output_neurons: usize,
        activation: Activation,
        hyperparameters: Hyperparameters,
        rng: StdRng,
    ) -> Self {
        let input = Layer::new("input_layer", LayerKind::Input, input_neurons, 1);
        let hidden = Layer::new(
            "hidden_layer",
            LayerKind::Hidden {
                output_layer: LayerId::OUTPUT,
            },
            hidden_neurons,
            input.len(),
        );
        let output = Layer::new("output_layer", LayerKind::Output, output_neurons, hidden.len());

        log::debug!(
            "created network {input_neurons}/{hidden_neurons}/{output_neurons} with {activation:?}"
        );

        Self {
            layers: vec![input, hidden, output],
            activation,
            hyperparameters,
            training_set: Vec::new(),
            rng,
        }
    }

    #[inline]
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    #[inline]
    pub fn input_len(&self) -> usize {
        self.layer(LayerId::INPUT).len()
    }

    #[inline]
    pub fn hidden_len(&self) -> usize {
        self.layer(LayerId::HIDDEN).len()
    }

    #[inline]
    pub fn output_len(&self) -> usize {
        self.layer(LayerId::OUTPUT).len()
    }

    #[inline]
    pub fn output_layer(&self) -> &Layer {
        self.layer(LayerId::OUTPUT)
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    #[inline]
    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    pub fn set_hyperparameters(&mut self, hyperparameters: Hyperparameters) -> Result<()> {
        hyperparameters.validate()?;
        self.hyperparameters = hyperparameters;
        Ok(())
    }

    /// Appends a pattern to the training set.
    ///
    /// `data` must match the input layer size and `expected_output` the output
    /// layer size.
    pub fn add_pattern(
        &mut self,
        name: impl Into<String>,
        data: Vec<f64>,
        expected_output: Vec<f64>,
    ) -> Result<()> {
        if data.len() != self.input_len() {
            return Err(Error::mismatch("pattern data", self.input_len(), data.len()));
        }
        if expected_output.len() != self.output_len() {
            return Err(Error::mismatch(
                "pattern expected output",
                self.output_len(),
                expected_output.len(),
            ));
        }

        self.training_set
            .push(Pattern::new(name, data, expected_output));
        Ok(())
    }

    pub fn clear_patterns(&mut self) {
        self.training_set.clear();
    }

    #[inline]
    pub fn patterns(&self) -> &[Pattern] {
        &self.training_set
    }

    /// Rebuilds the hidden layer with `neurons` neurons and the output layer
    /// with a matching fan-in. Every learned weight is discarded.
    pub fn redefine_hidden_layer_neurons(&mut self, neurons: usize) -> Result<()> {
        if neurons == 0 {
            return Err(Error::InvalidConfig(
                "hidden layer must have at least one neuron".to_owned(),
            ));
        }

        let input_len = self.input_len();
        let output_len = self.output_len();
        self.layers[LayerId::HIDDEN.0].initialize(neurons, input_len);
        self.layers[LayerId::OUTPUT.0].initialize(output_len, neurons);

        log::debug!("hidden layer redefined to {neurons} neurons");
        Ok(())
    }

    /// Draws fresh `[0, 1)` weights for every hidden and output neuron.
    pub fn reset_weights(&mut self) {
        let Self { layers, rng, .. } = self;
        for layer in layers.iter_mut() {
            if layer.kind() != LayerKind::Input {
                layer.reset_weights(rng);
            }
        }
        log::trace!("weights reset");
    }

    /// Runs a forward pass and returns the output layer values.
    pub fn evaluate(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_len() {
            return Err(Error::mismatch("input", self.input_len(), input.len()));
        }

        self.forward(input);
        Ok(self.output_layer().outputs())
    }

    /// Output layer values from the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_layer().outputs()
    }

    pub fn discrete_outputs(&self) -> Vec<i8> {
        self.output_layer().discrete_outputs()
    }

    pub fn formatted_outputs(&self) -> String {
        self.output_layer().formatted_outputs()
    }

    /// Forward pass.
    ///
    /// The input layer takes `data` verbatim; each later layer copies the
    /// previous layer's outputs into its terminals and then computes its own.
    ///
    /// Shape contract: `data.len() == self.input_len()`.
    pub(crate) fn forward(&mut self, data: &[f64]) {
        let activation = self.activation;
        self.layers[LayerId::INPUT.0].load_input(data);

        for idx in 1..self.layers.len() {
            let (left, right) = self.layers.split_at_mut(idx);
            right[0].forward_from(&left[idx - 1], activation);
        }
    }

    /// Errors from the output layer back towards the input layer.
    ///
    /// Output neurons need their expected outputs; hidden neurons read the
    /// output layer's errors, so the output layer must go first.
    pub(crate) fn compute_errors(&mut self) {
        for idx in (1..self.layers.len()).rev() {
            match self.layers[idx].output_layer() {
                Some(LayerId(out)) if out > idx => {
                    let (left, right) = self.layers.split_at_mut(out);
                    left[idx].compute_errors(Some(&right[0]));
                }
                _ => self.layers[idx].compute_errors(None),
            }
        }
    }

    /// Applies the weight update of every non-input layer using the errors of
    /// the last `compute_errors` call.
    pub(crate) fn backward(&mut self) {
        let learning_rate = self.hyperparameters.learning_rate;
        for layer in self.layers.iter_mut().rev() {
            if layer.kind() != LayerKind::Input {
                layer.adjust_weights(learning_rate);
            }
        }
    }

    /// One online step on `pattern`; returns the pattern's mean squared error
    /// measured on the outputs of the forward pass that drove the update.
    pub(crate) fn train_pattern(&mut self, pattern: &Pattern) -> f64 {
        self.layers[LayerId::OUTPUT.0].set_expected_outputs(pattern.expected_output());
        self.forward(pattern.data());
        self.compute_errors();
        self.backward();
        self.output_layer().mean_squared_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::Role;

    #[test]
    fn topology_is_wired_input_hidden_output() {
        let n = Network::new_with_seed(4, 3, 2, 0).unwrap();
        assert_eq!(n.layers().len(), 3);

        let input = n.layer(LayerId::INPUT);
        assert_eq!(input.kind(), LayerKind::Input);
        assert!(input.neurons().iter().all(|x| x.fan_in() == 1));

        let hidden = n.layer(LayerId::HIDDEN);
        assert_eq!(hidden.output_layer(), Some(LayerId::OUTPUT));
        assert!(hidden.neurons().iter().all(|x| x.fan_in() == 4));

        let output = n.output_layer();
        assert_eq!(output.kind(), LayerKind::Output);
        assert!(output.neurons().iter().all(|x| x.fan_in() == 3));
        assert!(matches!(output.neurons()[0].role(), Role::Output { .. }));
    }

    #[test]
    fn zero_sized_layers_are_rejected() {
        assert!(Network::new_with_seed(0, 3, 2, 0).is_err());
        assert!(Network::new_with_seed(4, 0, 2, 0).is_err());
        assert!(Network::new_with_seed(4, 3, 0, 0).is_err());
    }

    #[test]
    fn redefine_hidden_layer_reinitializes_hidden_and_output() {
        let mut n = Network::new_with_seed(5, 3, 2, 0).unwrap();
        n.reset_weights();
        n.redefine_hidden_layer_neurons(7).unwrap();

        let hidden = n.layer(LayerId::HIDDEN);
        assert_eq!(hidden.len(), 7);
        assert!(hidden.neurons().iter().all(|x| x.fan_in() == 5));
        assert!(hidden.neurons().iter().all(|x| x.weights().iter().all(|&w| w == 0.0)));

        let output = n.output_layer();
        assert_eq!(output.len(), 2);
        assert!(output.neurons().iter().all(|x| x.fan_in() == 7));
        for (i, neuron) in hidden.neurons().iter().enumerate() {
            assert_eq!(neuron.id(), i);
        }

        assert!(n.redefine_hidden_layer_neurons(0).is_err());
    }

    #[test]
    fn add_pattern_checks_lengths() {
        let mut n = Network::new_with_seed(2, 2, 3, 0).unwrap();
        assert!(n.add_pattern("ok", vec![1.0, -1.0], vec![1.0, -1.0, -1.0]).is_ok());

        let err = n.add_pattern("short", vec![1.0], vec![1.0, -1.0, -1.0]).unwrap_err();
        assert!(matches!(err, Error::TopologyMismatch { expected: 2, actual: 1, .. }));

        let err = n.add_pattern("wide", vec![1.0, 1.0], vec![1.0, -1.0]).unwrap_err();
        assert!(matches!(err, Error::TopologyMismatch { expected: 3, actual: 2, .. }));

        assert_eq!(n.patterns().len(), 1);
        assert_eq!(n.patterns()[0].name(), "ok");
        n.clear_patterns();
        assert!(n.patterns().is_empty());
    }

    #[test]
    fn evaluate_is_deterministic() {
        let mut n = Network::new_with_seed(4, 3, 2, 11).unwrap();
        n.reset_weights();
        let input = [1.0, -1.0, -1.0, 1.0];
        let a = n.evaluate(&input).unwrap();
        let b = n.evaluate(&input).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn evaluate_rejects_wrong_input_length() {
        let mut n = Network::new_with_seed(4, 3, 2, 0).unwrap();
        assert!(matches!(
            n.evaluate(&[1.0, 2.0]),
            Err(Error::TopologyMismatch { expected: 4, actual: 2, .. })
        ));
    }

    #[test]
    fn forward_matches_hand_computation() {
        // 1 input, 1 hidden, 1 output with known weights.
        let mut n = Network::new_with_seed(1, 1, 1, 0).unwrap();
        n.layers_mut()[1].neurons_mut()[0].set_weights(&[0.5]);
        n.layers_mut()[2].neurons_mut()[0].set_weights(&[0.25]);

        let out = n.evaluate(&[1.0]).unwrap();
        let hidden = (0.5_f64 / 2.0).tanh();
        let expected = (hidden * 0.25 / 2.0).tanh();
        assert!((out[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn hidden_error_uses_output_weights_at_neuron_id() {
        let mut n = Network::new_with_seed(1, 2, 1, 0).unwrap();
        n.layers_mut()[1].neurons_mut()[0].set_weights(&[0.5]);
        n.layers_mut()[1].neurons_mut()[1].set_weights(&[0.3]);
        n.layers_mut()[2].neurons_mut()[0].set_weights(&[0.2, 0.9]);
        n.layers_mut()[2].set_expected_outputs(&[1.0]);

        n.forward(&[1.0]);
        n.compute_errors();

        let out = &n.output_layer().neurons()[0];
        let e_out = out.error();
        assert_eq!(e_out, (1.0 - out.output()) * (1.0 - out.output() * out.output()));

        for (id, w) in [(0, 0.2), (1, 0.9)] {
            let h = &n.layer(LayerId::HIDDEN).neurons()[id];
            let expected = (e_out * w) * (1.0 - h.output() * h.output());
            assert_eq!(h.error(), expected);
        }
    }
}
