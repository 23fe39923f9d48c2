//! Training progress callbacks.

use std::time::Duration;

/// Receives training events from [`crate::Network::train_with`].
///
/// Every method has an empty default, so implementors only override what they
/// care about. Callbacks run synchronously on the training thread.
pub trait TrainingListener {
    fn on_training_started(&mut self) {}

    /// Called when the epoch counter is a multiple of 10, with the mean error
    /// of the pass that just finished.
    fn on_training_progress_changed(&mut self, _epoch: usize, _mean_error: f64) {}

    fn on_training_completed(&mut self, _epochs: usize, _mean_error: f64, _elapsed: Duration) {}

    /// Polled after every epoch; returning `true` ends training early.
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl TrainingListener for NoopListener {}

/// Forwards training events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl TrainingListener for LogListener {
    fn on_training_started(&mut self) {
        log::info!("training started");
    }

    fn on_training_progress_changed(&mut self, epoch: usize, mean_error: f64) {
        log::info!("epoch {epoch}: mean error {mean_error:.6}");
    }

    fn on_training_completed(&mut self, epochs: usize, mean_error: f64, elapsed: Duration) {
        log::info!(
            "training completed after {epochs} epochs in {:.3}s, mean error {mean_error:.6}",
            elapsed.as_secs_f64()
        );
    }
}

impl<L: TrainingListener + ?Sized> TrainingListener for &mut L {
    fn on_training_started(&mut self) {
        (**self).on_training_started();
    }

    fn on_training_progress_changed(&mut self, epoch: usize, mean_error: f64) {
        (**self).on_training_progress_changed(epoch, mean_error);
    }

    fn on_training_completed(&mut self, epochs: usize, mean_error: f64, elapsed: Duration) {
        (**self).on_training_completed(epochs, mean_error, elapsed);
    }

    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
}
