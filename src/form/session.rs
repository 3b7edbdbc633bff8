use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::controller::{FormController, FormState, RevertTicket, SubmitRejected};
use super::fields::FormFields;
use super::relay_client::RelayClient;

pub const DEFAULT_DISPLAY_TIMEOUT: Duration = Duration::from_millis(3000);

/// One live form: the controller, the relay it talks to and the timer that
/// hides feedback again.
///
/// The controller lock is never held across an await point.
pub struct FormSession<F> {
    controller: Arc<Mutex<FormController<F>>>,
    relay: RelayClient,
    display_timeout: Duration,
    pending_revert: Mutex<Option<JoinHandle<()>>>,
}

impl<F> FormSession<F>
where
    F: FormFields + Send + 'static,
{
    pub fn new(relay: RelayClient, display_timeout: Duration) -> Self {
        Self {
            controller: Arc::new(Mutex::new(FormController::new())),
            relay,
            display_timeout,
            pending_revert: Mutex::new(None),
        }
    }

    pub fn state(&self) -> FormState {
        self.controller().state().clone()
    }

    pub fn submit_enabled(&self) -> bool {
        self.controller().submit_enabled()
    }

    pub fn fields(&self) -> F
    where
        F: Clone,
    {
        self.controller().fields().clone()
    }

    pub fn edit(&self, edit: impl FnOnce(&mut F)) {
        self.controller().edit(edit);
        self.cancel_revert();
    }

    /// Validates locally, calls the relay and shows the outcome. Feedback
    /// reverts to `Idle` after the display timeout unless something newer
    /// happens first.
    #[tracing::instrument(name = "Submit form", skip(self), fields(endpoint = F::ENDPOINT))]
    pub async fn submit(&self) -> Result<(), SubmitRejected> {
        let payload = {
            let mut controller = self.controller();
            match controller.begin_submit() {
                Ok(payload) => payload,
                Err(rejected) => {
                    drop(controller);
                    if let SubmitRejected::Invalid { ticket, .. } = &rejected {
                        self.schedule_revert(*ticket);
                    }
                    return Err(rejected);
                }
            }
        };

        let outcome = self.relay.submit(F::ENDPOINT, &payload).await;
        let ticket = self.controller().finish_submit(outcome);
        self.schedule_revert(ticket);
        Ok(())
    }

    fn controller(&self) -> MutexGuard<'_, FormController<F>> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn schedule_revert(&self, ticket: RevertTicket) {
        let controller = Arc::clone(&self.controller);
        let timeout = self.display_timeout;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            controller
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .revert(ticket);
        });

        let previous = self
            .pending_revert
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_revert(&self) {
        let pending = self
            .pending_revert
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.abort();
        }
    }
}

impl<F> Drop for FormSession<F> {
    fn drop(&mut self) {
        if let Some(pending) = self
            .pending_revert
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}
