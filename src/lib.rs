//! A three-layer perceptron trained with online backpropagation.
//!
//! `glyph-mlp` is the engine behind a glyph recognizer: a fixed
//! input → hidden → output network, trained one pattern at a time, whose
//! learned weights are stored as a flat big-endian blob.
//!
//! # Model
//!
//! - Scalars are `f64`.
//! - Every hidden and output neuron divides its weighted input sum by twice the
//!   size of its own layer before applying the activation.
//! - There are no biases. Weights are reset to values in `[0, 1)`.
//! - The default activation is a tanh-shaped function with range `(-1, 1)`,
//!   so expected outputs are encoded as `+1` / `-1`
//!   (see [`Pattern::class_target`]).
//!
//! # Panics vs `Result`
//!
//! - [`Neuron`] and [`Layer`] are the hot path. Shape contracts there are
//!   checked with `debug_assert!` only.
//! - [`Network`] validates vector lengths, hyperparameters and weight blobs
//!   at its boundary and returns [`Result`].
//!
//! # Quick start
//!
//! ```rust
//! use glyph_mlp::{Hyperparameters, NetworkBuilder, Pattern};
//!
//! # fn main() -> glyph_mlp::Result<()> {
//! let mut network = NetworkBuilder::new(2, 3, 2)?
//!     .hyperparameters(Hyperparameters {
//!         learning_rate: 0.5,
//!         minimum_error: 0.05,
//!         max_epochs: 500,
//!     })?
//!     .build_with_seed(0);
//!
//! network.add_pattern("a", vec![1.0, -1.0], Pattern::class_target(1, 2)?)?;
//! network.add_pattern("b", vec![-1.0, 1.0], Pattern::class_target(2, 2)?)?;
//!
//! let report = network.train()?;
//! assert!(report.epochs <= 500);
//!
//! let outputs = network.evaluate(&[1.0, -1.0])?;
//! assert_eq!(outputs.len(), 2);
//!
//! let blob = network.weights_to_bytes();
//! assert_eq!(blob.len(), 8 * network.weight_count());
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod config;
pub mod error;
pub mod layer;
pub mod listener;
pub mod metrics;
pub mod network;
pub mod neuron;
pub mod pattern;
mod persistence;
pub mod train;

pub use activation::Activation;
pub use builder::NetworkBuilder;
pub use config::{
    DEFAULT_LEARNING_RATE, DEFAULT_MAX_EPOCHS, DEFAULT_MINIMUM_ERROR, Hyperparameters,
    NetworkConfig,
};
pub use error::{Error, Result};
pub use layer::{Layer, LayerId, LayerKind};
pub use listener::{LogListener, NoopListener, TrainingListener};
pub use metrics::{Evaluation, highest_value_index, range_to_range};
pub use network::Network;
pub use neuron::{Neuron, Role};
pub use pattern::Pattern;
pub use train::TrainingReport;
