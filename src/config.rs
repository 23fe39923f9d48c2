//! Hyperparameters and network configuration.
//!
//! [`Hyperparameters`] is always available. [`NetworkConfig`] describes a whole
//! network (layer sizes, activation, hyperparameters, weights file) and can be
//! read from JSON when the `serde` feature is enabled:
//!
//! ```json
//! {
//!   "input_neurons": 1024,
//!   "hidden_neurons": 512,
//!   "output_neurons": 92,
//!   "learning_rate": 0.2,
//!   "minimum_error": 0.01,
//!   "max_epochs": 50000,
//!   "activation": { "kind": "saturating" },
//!   "weights_file": "pixels.weights"
//! }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::path::PathBuf;

use crate::{Activation, Error, Network, NetworkBuilder, Result};

#[cfg(feature = "serde")]
use std::path::Path;

pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_MINIMUM_ERROR: f64 = 0.01;
pub const DEFAULT_MAX_EPOCHS: usize = 10_000;

/// Training hyperparameters. Set them before calling `train`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    pub learning_rate: f64,
    /// Training stops once the epoch's mean error is no longer above this.
    pub minimum_error: f64,
    pub max_epochs: usize,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            minimum_error: DEFAULT_MINIMUM_ERROR,
            max_epochs: DEFAULT_MAX_EPOCHS,
        }
    }
}

impl Hyperparameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        if !(self.minimum_error.is_finite() && self.minimum_error >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "minimum_error must be finite and >= 0, got {}",
                self.minimum_error
            )));
        }
        if self.max_epochs == 0 {
            return Err(Error::InvalidConfig("max_epochs must be > 0".to_owned()));
        }
        Ok(())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub input_neurons: usize,
    pub hidden_neurons: usize,
    pub output_neurons: usize,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub hyperparameters: Hyperparameters,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activation: Activation,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights_file: Option<PathBuf>,
}

impl NetworkConfig {
    pub fn new(input_neurons: usize, hidden_neurons: usize, output_neurons: usize) -> Self {
        Self {
            input_neurons,
            hidden_neurons,
            output_neurons,
            hyperparameters: Hyperparameters::default(),
            activation: Activation::default(),
            weights_file: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.builder().map(|_| ())
    }

    fn builder(&self) -> Result<NetworkBuilder> {
        NetworkBuilder::new(self.input_neurons, self.hidden_neurons, self.output_neurons)?
            .activation(self.activation)?
            .hyperparameters(self.hyperparameters)
    }

    /// Builds the network and loads `weights_file` if it exists and is non-empty.
    pub fn build(&self) -> Result<Network> {
        let network = self.builder()?.build();
        self.load_weights_into(network)
    }

    /// Like [`NetworkConfig::build`], with a fixed seed for weight resets.
    pub fn build_with_seed(&self, seed: u64) -> Result<Network> {
        let network = self.builder()?.build_with_seed(seed);
        self.load_weights_into(network)
    }

    fn load_weights_into(&self, mut network: Network) -> Result<Network> {
        if let Some(path) = &self.weights_file {
            network.load_weights_if_present(path)?;
        }
        Ok(network)
    }
}

#[cfg(feature = "serde")]
impl NetworkConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: NetworkConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let h = Hyperparameters::default();
        assert_eq!(h.learning_rate, 0.05);
        assert_eq!(h.minimum_error, 0.01);
        assert_eq!(h.max_epochs, 10_000);
        assert!(h.validate().is_ok());
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let bad_lr = Hyperparameters {
            learning_rate: 0.0,
            ..Hyperparameters::default()
        };
        assert!(bad_lr.validate().is_err());

        let bad_err = Hyperparameters {
            minimum_error: f64::NAN,
            ..Hyperparameters::default()
        };
        assert!(bad_err.validate().is_err());

        let bad_epochs = Hyperparameters {
            max_epochs: 0,
            ..Hyperparameters::default()
        };
        assert!(bad_epochs.validate().is_err());
    }

    #[test]
    fn build_applies_sizes_and_hyperparameters() {
        let mut config = NetworkConfig::new(4, 3, 2);
        config.hyperparameters.learning_rate = 0.2;
        let network = config.build_with_seed(1).unwrap();
        assert_eq!(network.input_len(), 4);
        assert_eq!(network.hidden_len(), 3);
        assert_eq!(network.output_len(), 2);
        assert_eq!(network.hyperparameters().learning_rate, 0.2);
    }

    #[test]
    fn zero_sized_layer_is_rejected() {
        assert!(NetworkConfig::new(4, 0, 2).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let json = r#"{"input_neurons":32,"hidden_neurons":64,"output_neurons":37,"learning_rate":0.2}"#;
        let config = NetworkConfig::from_json_str(json).unwrap();
        assert_eq!(config.hidden_neurons, 64);
        assert_eq!(config.hyperparameters.learning_rate, 0.2);
        assert_eq!(config.hyperparameters.max_epochs, DEFAULT_MAX_EPOCHS);
        assert_eq!(config.activation, Activation::Saturating);
        assert_eq!(config.weights_file, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_roundtrips_activation() {
        let mut config = NetworkConfig::new(2, 2, 1);
        config.activation = Activation::Sigmoid { slope: 2.0 };
        config.weights_file = Some(PathBuf::from("strokes.weights"));
        let json = config.to_json_string_pretty().unwrap();
        assert!(json.contains(r#""kind": "sigmoid""#));

        let back = NetworkConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_with_invalid_values_is_rejected() {
        let json = r#"{"input_neurons":2,"hidden_neurons":2,"output_neurons":1,"max_epochs":0}"#;
        assert!(matches!(
            NetworkConfig::from_json_str(json),
            Err(Error::InvalidConfig(_))
        ));
    }
}
