use super::fields::FormFields;

/// What the form shows. `Success` and `Error` are transient and fall back to
/// `Idle` once their revert ticket is redeemed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success(String),
    Error(String),
}

/// Result of one relay call as the form sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered(String),
    Refused(String),
}

/// Handle for a deferred revert to `Idle`. Only the ticket issued by the
/// latest transition is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket(u64);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("A submission is already in flight")]
    InFlight,
    #[error("{message}")]
    Invalid {
        message: &'static str,
        ticket: RevertTicket,
    },
}

#[derive(Debug)]
pub struct FormController<F> {
    fields: F,
    state: FormState,
    generation: u64,
}

impl<F: FormFields> Default for FormController<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormFields> FormController<F> {
    pub fn new() -> Self {
        Self {
            fields: F::default(),
            state: FormState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// The submit control is disabled while a submission is in flight.
    pub fn submit_enabled(&self) -> bool {
        self.state != FormState::Submitting
    }

    pub fn feedback(&self) -> Option<&str> {
        match &self.state {
            FormState::Success(message) | FormState::Error(message) => Some(message),
            FormState::Idle | FormState::Submitting => None,
        }
    }

    /// A keystroke. Any displayed feedback goes away immediately and its
    /// pending revert becomes stale.
    pub fn edit(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.fields);
        if self.feedback().is_some() {
            self.transition(FormState::Idle);
        }
    }

    /// Runs local validation and, if it passes, enters `Submitting` and hands
    /// back the payload to send.
    pub fn begin_submit(&mut self) -> Result<F::Payload, SubmitRejected> {
        if self.state == FormState::Submitting {
            return Err(SubmitRejected::InFlight);
        }
        match self.fields.validate() {
            Ok(payload) => {
                self.transition(FormState::Submitting);
                Ok(payload)
            }
            Err(message) => {
                let ticket = self.transition(FormState::Error(message.to_string()));
                Err(SubmitRejected::Invalid { message, ticket })
            }
        }
    }

    /// Inputs are cleared on delivery and kept on refusal.
    pub fn finish_submit(&mut self, outcome: RelayOutcome) -> RevertTicket {
        match outcome {
            RelayOutcome::Delivered(message) => {
                self.fields = F::default();
                self.transition(FormState::Success(message))
            }
            RelayOutcome::Refused(message) => self.transition(FormState::Error(message)),
        }
    }

    /// Returns whether the ticket was still current.
    pub fn revert(&mut self, ticket: RevertTicket) -> bool {
        if ticket.0 != self.generation || self.feedback().is_none() {
            return false;
        }
        self.transition(FormState::Idle);
        true
    }

    fn transition(&mut self, state: FormState) -> RevertTicket {
        self.generation += 1;
        self.state = state;
        RevertTicket(self.generation)
    }
}
