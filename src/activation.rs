//! Activation functions.
//!
//! A hidden or output neuron computes a scaled weighted sum of its input
//! terminals and then maps it through one of these functions. The network holds
//! a single `Activation` that every non-input neuron uses.
//!
//! The default is [`Activation::Saturating`], whose range is `(-1, 1)`. Targets
//! produced by [`crate::Pattern::class_target`] are encoded as `+1` / `-1`, so
//! swapping in a `(0, 1)` function such as `Sigmoid` changes what "correct class"
//! means for downstream consumers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Scalar activation function.
pub enum Activation {
    /// `(1 - e^(-2x)) / (1 + e^(-2x))`, algebraically `tanh(x)`.
    #[default]
    Saturating,
    /// `1 / (1 + e^(-slope * x))`.
    Sigmoid { slope: f64 },
    HyperbolicTangent,
    Sinusoid,
    RectifiedLinear,
    /// `x + bias`.
    LinearCombination { bias: f64 },
}

impl Activation {
    /// Validate activation parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Activation::Sigmoid { slope } => {
                if !slope.is_finite() {
                    return Err(Error::InvalidConfig(format!(
                        "sigmoid slope must be finite, got {slope}"
                    )));
                }
            }
            Activation::LinearCombination { bias } => {
                if !bias.is_finite() {
                    return Err(Error::InvalidConfig(format!(
                        "linear combination bias must be finite, got {bias}"
                    )));
                }
            }
            Activation::Saturating
            | Activation::HyperbolicTangent
            | Activation::Sinusoid
            | Activation::RectifiedLinear => {}
        }

        Ok(())
    }

    #[inline]
    pub fn calculate_output(self, x: f64) -> f64 {
        match self {
            Activation::Saturating => saturating(x),
            Activation::Sigmoid { slope } => sigmoid(slope * x),
            Activation::HyperbolicTangent => x.tanh(),
            Activation::Sinusoid => x.sin(),
            Activation::RectifiedLinear => x.max(0.0),
            Activation::LinearCombination { bias } => x + bias,
        }
    }
}

#[inline]
fn saturating(x: f64) -> f64 {
    // Odd function: evaluate on |x| so e^(-2x) never overflows. NaN stays NaN.
    let z = (-2.0 * x.abs()).exp();
    ((1.0 - z) / (1.0 + z)).copysign(x)
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
