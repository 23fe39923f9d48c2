//! Network builder.
//!
//! `NetworkBuilder` fixes the three layer sizes, the activation function used by
//! every hidden and output neuron, and the training hyperparameters, then
//! produces a [`Network`]. The activation is chosen here and nowhere else;
//! there is no process-wide default to override.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{Activation, Error, Hyperparameters, Network, Result};

#[derive(Debug, Clone)]
/// Builder for a `Network`.
///
/// Example:
///
/// ```rust
/// use glyph_mlp::{Activation, NetworkBuilder};
///
/// # fn main() -> glyph_mlp::Result<()> {
/// let network = NetworkBuilder::new(32, 64, 37)?
///     .activation(Activation::HyperbolicTangent)?
///     .build_with_seed(0);
/// assert_eq!(network.hidden_len(), 64);
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    input_neurons: usize,
    hidden_neurons: usize,
    output_neurons: usize,
    activation: Activation,
    hyperparameters: Hyperparameters,
}

impl NetworkBuilder {
    /// Start building a network with the given neuron count per layer.
    pub fn new(input_neurons: usize, hidden_neurons: usize, output_neurons: usize) -> Result<Self> {
        if input_neurons == 0 || hidden_neurons == 0 || output_neurons == 0 {
            return Err(Error::InvalidConfig(format!(
                "all layer sizes must be > 0, got {input_neurons}/{hidden_neurons}/{output_neurons}"
            )));
        }
        Ok(Self {
            input_neurons,
            hidden_neurons,
            output_neurons,
            activation: Activation::default(),
            hyperparameters: Hyperparameters::default(),
        })
    }

    pub fn activation(mut self, activation: Activation) -> Result<Self> {
        activation.validate()?;
        self.activation = activation;
        Ok(self)
    }

    pub fn hyperparameters(mut self, hyperparameters: Hyperparameters) -> Result<Self> {
        hyperparameters.validate()?;
        self.hyperparameters = hyperparameters;
        Ok(self)
    }

    /// Build with an RNG seeded from the operating system.
    pub fn build(self) -> Network {
        self.build_with_rng(StdRng::from_entropy())
    }

    /// Build using a deterministic seed for weight resets.
    pub fn build_with_seed(self, seed: u64) -> Network {
        self.build_with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn build_with_rng(self, rng: StdRng) -> Network {
        Network::from_parts(
            self.input_neurons,
            self.hidden_neurons,
            self.output_neurons,
            self.activation,
            self.hyperparameters,
            rng,
        )
    }
}
