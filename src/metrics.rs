//! Output interpretation.
//!
//! The network only produces one value per class; these helpers turn that
//! vector into a decision. They never take part in training.

use crate::{Error, Network, Result};

/// Index of the first largest value, or `None` for an empty slice.
pub fn highest_value_index(values: &[f64]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }

    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    Some(best)
}

/// Linearly maps `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
#[inline]
pub fn range_to_range(value: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> f64 {
    ((value - old_min) / (old_max - old_min)) * (new_max - new_min) + new_min
}

/// Summary of one output vector against a known class.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub outputs: Vec<f64>,
    pub highest_index: usize,
    pub highest_output: f64,
    pub expected_index: usize,
    pub expected_output: f64,
    pub outputs_mean: f64,
}

impl Evaluation {
    /// `expected_index` is 0-based.
    pub fn new(outputs: Vec<f64>, expected_index: usize) -> Result<Self> {
        let highest_index = highest_value_index(&outputs)
            .ok_or_else(|| Error::InvalidData("output vector must not be empty".to_owned()))?;
        if expected_index >= outputs.len() {
            return Err(Error::InvalidData(format!(
                "expected index {expected_index} is out of range for {} outputs",
                outputs.len()
            )));
        }

        let highest_output = outputs[highest_index];
        let expected_output = outputs[expected_index];
        let outputs_mean = outputs.iter().sum::<f64>() / outputs.len() as f64;

        Ok(Self {
            outputs,
            highest_index,
            highest_output,
            expected_index,
            expected_output,
            outputs_mean,
        })
    }

    /// The expected class scored the highest value (ties count).
    #[inline]
    pub fn is_correct(&self) -> bool {
        self.expected_output == self.highest_output
    }

    /// The expected class output mapped from `(-1, 1)` onto `0..=10`.
    #[inline]
    pub fn rating(&self) -> f64 {
        range_to_range(self.expected_output, -1.0, 1.0, 0.0, 10.0)
    }
}

impl Network {
    /// Evaluates `input` and scores the result against the 0-based class
    /// `expected_index`.
    pub fn evaluate_class(&mut self, input: &[f64], expected_index: usize) -> Result<Evaluation> {
        let outputs = self.evaluate(input)?;
        let evaluation = Evaluation::new(outputs, expected_index)?;
        log::debug!(
            "class {expected_index}: highest {} ({:.4}), expected output {:.4}, mean {:.4}",
            evaluation.highest_index,
            evaluation.highest_output,
            evaluation.expected_output,
            evaluation.outputs_mean
        );
        Ok(evaluation)
    }
}
