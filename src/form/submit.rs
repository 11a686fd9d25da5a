use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use super::validation::FieldErrors;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SubmitError<E = std::convert::Infallible> {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("{0} field(s) need attention")]
    Invalid(usize),
    #[error("submission failed: {0}")]
    Failed(E),
}

/// One in-flight submission at a time. Submit buttons render as loading
/// while [`SubmitGuard::is_in_flight`] holds.
#[derive(Clone, Debug, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn begin<E>(&self) -> Result<SubmitTicket, SubmitError<E>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| {
                tracing::debug!("duplicate submit rejected");
                SubmitError::AlreadySubmitting
            })?;
        Ok(SubmitTicket {
            in_flight: self.in_flight.clone(),
        })
    }

    /// Starts a submission unless `errors` block it or one is running.
    pub fn try_submit<E>(&self, errors: &FieldErrors) -> Result<SubmitTicket, SubmitError<E>> {
        if errors.blocks_submit() {
            return Err(SubmitError::Invalid(errors.len()));
        }
        self.begin()
    }

    /// Runs `submit` under the guard; the flag clears when it resolves,
    /// whatever the outcome.
    pub async fn run<T, E, F, Fut>(
        &self,
        errors: &FieldErrors,
        submit: F,
    ) -> Result<T, SubmitError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let _ticket = self.try_submit(errors)?;
        submit().await.map_err(SubmitError::Failed)
    }
}

/// Held for the duration of a submission; dropping it re-enables submit.
#[derive(Debug)]
#[must_use = "the submission ends as soon as the ticket is dropped"]
pub struct SubmitTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}
