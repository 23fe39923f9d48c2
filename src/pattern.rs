//! Training patterns.

use crate::{Error, Result};

/// One labeled training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    name: String,
    data: Vec<f64>,
    expected_output: Vec<f64>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, data: Vec<f64>, expected_output: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
            expected_output,
        }
    }

    /// Builds the `+1` / `-1` target for a 1-based class id.
    ///
    /// The result has length `classes`, with `+1` at index `class_id - 1` and
    /// `-1` everywhere else.
    pub fn class_target(class_id: usize, classes: usize) -> Result<Vec<f64>> {
        if class_id == 0 || class_id > classes {
            return Err(Error::InvalidConfig(format!(
                "class id {class_id} is outside 1..={classes}"
            )));
        }

        let mut target = vec![-1.0; classes];
        target[class_id - 1] = 1.0;
        Ok(target)
    }

    /// Informational label; never used by training.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn expected_output(&self) -> &[f64] {
        &self.expected_output
    }
}
