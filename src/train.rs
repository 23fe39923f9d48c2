use std::mem;
use std::time::{Duration, Instant};

use crate::{Error, Network, NoopListener, Result, TrainingListener};

/// Outcome of a [`Network::train`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    /// Final value of the epoch counter. The counter starts at 1 and is
    /// bumped after every pass, so it is one more than the passes made.
    pub epochs: usize,
    /// Mean of the per-pattern errors of the last pass.
    pub mean_error: f64,
    pub elapsed: Duration,
    /// `true` when a listener asked training to stop.
    pub stopped_early: bool,
}

impl TrainingReport {
    /// Number of passes over the training set.
    #[inline]
    pub fn passes(&self) -> usize {
        self.epochs - 1
    }

    /// Whether the last pass got the mean error down to `minimum_error`.
    #[inline]
    pub fn converged(&self, minimum_error: f64) -> bool {
        self.mean_error <= minimum_error
    }
}

impl Network {
    /// Trains on the current training set without reporting progress.
    ///
    /// See [`Network::train_with`].
    pub fn train(&mut self) -> Result<TrainingReport> {
        self.train_with(&mut NoopListener)
    }

    /// Resets the weights and runs online backpropagation over the training set.
    ///
    /// Every pass visits the patterns in insertion order and updates the
    /// weights after each one, so a pattern always sees the updates of the
    /// pattern before it. The epoch error is the mean of each pattern's error
    /// read right after its own update; it is a training figure, not a
    /// validation metric.
    ///
    /// Training keeps going while the epoch error is above `minimum_error` and
    /// the epoch counter is below `max_epochs`. A NaN error ends training.
    pub fn train_with<L: TrainingListener + ?Sized>(
        &mut self,
        listener: &mut L,
    ) -> Result<TrainingReport> {
        if self.training_set.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        let hyperparameters = *self.hyperparameters();
        hyperparameters.validate()?;

        listener.on_training_started();
        log::info!(
            "training on {} patterns (learning rate {}, minimum error {}, max epochs {})",
            self.training_set.len(),
            hyperparameters.learning_rate,
            hyperparameters.minimum_error,
            hyperparameters.max_epochs
        );

        let start = Instant::now();
        self.reset_weights();

        let patterns = mem::take(&mut self.training_set);
        let mut epochs = 1_usize;
        let mut mean_error;
        let mut stopped_early = false;

        loop {
            let mut error_sum = 0.0;
            for pattern in &patterns {
                error_sum += self.train_pattern(pattern);
            }
            mean_error = error_sum / patterns.len() as f64;
            epochs += 1;

            if epochs % 10 == 0 {
                listener.on_training_progress_changed(epochs, mean_error);
            }

            if !(hyperparameters.minimum_error < mean_error && epochs < hyperparameters.max_epochs) {
                break;
            }
            if listener.should_stop() {
                stopped_early = true;
                break;
            }
        }

        self.training_set = patterns;

        let elapsed = start.elapsed();
        listener.on_training_completed(epochs, mean_error, elapsed);
        log::info!(
            "training finished: counter {epochs}, mean error {mean_error}, {:.3}s{}",
            elapsed.as_secs_f64(),
            if stopped_early { " (stopped by listener)" } else { "" }
        );

        Ok(TrainingReport {
            epochs,
            mean_error,
            elapsed,
            stopped_early,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hyperparameters;

    fn two_pattern_network(max_epochs: usize) -> Network {
        let mut n = Network::new_with_seed(2, 2, 1, 3).unwrap();
        n.set_hyperparameters(Hyperparameters {
            learning_rate: 0.5,
            minimum_error: 0.0,
            max_epochs,
        })
        .unwrap();
        n.add_pattern("a", vec![1.0, -1.0], vec![1.0]).unwrap();
        n.add_pattern("b", vec![-1.0, 1.0], vec![-1.0]).unwrap();
        n
    }

    #[test]
    fn single_epoch_budget_makes_exactly_one_pass() {
        let mut n = two_pattern_network(1);
        let report = n.train().unwrap();
        assert_eq!(report.epochs, 2);
        assert_eq!(report.passes(), 1);
        assert!(!report.stopped_early);
    }

    #[test]
    fn counter_stops_at_max_epochs() {
        let mut n = two_pattern_network(25);
        let report = n.train().unwrap();
        assert_eq!(report.epochs, 25);
        assert_eq!(report.passes(), 24);
    }

    #[test]
    fn empty_training_set_is_an_error() {
        let mut n = Network::new_with_seed(2, 2, 1, 0).unwrap();
        assert!(matches!(n.train(), Err(Error::EmptyTrainingSet)));
    }

    #[test]
    fn training_set_survives_training() {
        let mut n = two_pattern_network(3);
        n.train().unwrap();
        assert_eq!(n.patterns().len(), 2);
        assert_eq!(n.patterns()[0].name(), "a");
        assert_eq!(n.patterns()[1].name(), "b");
    }

    #[test]
    fn same_seed_trains_to_same_weights() {
        let mut a = two_pattern_network(20);
        let mut b = two_pattern_network(20);
        let ra = a.train().unwrap();
        let rb = b.train().unwrap();
        assert_eq!(ra.mean_error, rb.mean_error);
        assert_eq!(a.weights_to_bytes(), b.weights_to_bytes());
    }
}
