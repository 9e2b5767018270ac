//! Registration session - the capacity-bounded collection loop
//!
//! A session starts `Collecting` with no attendees and ends `Closed` with a
//! [`SessionReport`]. Closing happens exactly once, when capacity is reached,
//! the operator declines to continue, or the input source gives out.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::config::{ConfigError, WorkshopConfig};
use crate::core::input::{InputError, InputValidator, Prompter};
use crate::core::notice::{CloseReason, Notice, Reporter};
use crate::core::pricing::PricingPolicy;
use crate::core::stats::{roster, Statistics};
use crate::entities::attendee::{AttendeeRecord, Modality};

#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("registration is already closed ({0})")]
    AlreadyClosed(CloseReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Collecting,
    Closed(CloseReason),
}

/// Everything known about a closed session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub workshop: String,
    pub capacity: usize,
    pub base_price: f64,
    pub close_reason: CloseReason,
    pub statistics: Statistics,
    pub attendees: Vec<AttendeeRecord>,
}

impl SessionReport {
    /// Roster lines in registration order
    pub fn roster(&self) -> Vec<String> {
        roster(&self.attendees)
    }
}

pub struct RegistrationSession<P> {
    config: WorkshopConfig,
    pricing: PricingPolicy,
    validator: InputValidator<P>,
    records: Vec<AttendeeRecord>,
    state: SessionState,
}

impl<P: Prompter> RegistrationSession<P> {
    /// Open a session; the configuration is validated first
    pub fn new(config: WorkshopConfig, prompter: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pricing: config.pricing(),
            validator: InputValidator::new(prompter, config.retry_policy()),
            records: Vec::new(),
            state: SessionState::Collecting,
            config,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn records(&self) -> &[AttendeeRecord] {
        &self.records
    }

    /// Run the loop to completion and summarize
    ///
    /// A closed session accepts nothing further; running it again fails.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<SessionReport, SessionError> {
        if let SessionState::Closed(reason) = self.state {
            return Err(SessionError::AlreadyClosed(reason));
        }

        reporter.notify(Notice::Banner {
            name: self.config.name.clone(),
            capacity: self.config.capacity,
            base_price: self.config.base_price,
            modalities: self.config.modalities.clone(),
        });
        tracing::info!(
            workshop = %self.config.name,
            capacity = self.config.capacity,
            "registration opened"
        );

        let reason = self.collect(reporter)?;
        self.state = SessionState::Closed(reason);
        tracing::info!(%reason, registered = self.records.len(), "registration closed");
        reporter.notify(Notice::Closed { reason });

        Ok(SessionReport {
            workshop: self.config.name.clone(),
            capacity: self.config.capacity,
            base_price: self.config.base_price,
            close_reason: reason,
            statistics: Statistics::compute(&self.records),
            attendees: self.records.clone(),
        })
    }

    fn collect(&mut self, reporter: &mut dyn Reporter) -> Result<CloseReason, SessionError> {
        while self.records.len() < self.config.capacity {
            reporter.notify(Notice::NewAttempt {
                seat: self.records.len() + 1,
                capacity: self.config.capacity,
            });

            let record = match self.attempt(reporter) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e) => return stop_reason(e),
            };

            tracing::info!(
                name = record.name(),
                age = record.age(),
                price = record.price(),
                "attendee registered"
            );
            self.records.push(record.clone());
            reporter.notify(Notice::Registered { record });

            if self.records.len() == self.config.capacity {
                break;
            }

            match self.validator.confirm_continue() {
                Ok(true) => {}
                Ok(false) => return Ok(CloseReason::OperatorDeclined),
                Err(e) => return stop_reason(e),
            }
        }

        reporter.notify(Notice::CapacityReached);
        Ok(CloseReason::CapacityReached)
    }

    /// Collect one attendee. `Ok(None)` means the attempt was discarded.
    fn attempt(
        &mut self,
        reporter: &mut dyn Reporter,
    ) -> Result<Option<AttendeeRecord>, InputError> {
        let name = self.validator.read_name(reporter)?;
        let age = self.validator.read_age(reporter)?;
        let email = self.validator.read_email()?;

        let answer = self.validator.read_modality(&self.config.modality_choices())?;
        let Some(modality) = self.offered_modality(&answer) else {
            tracing::debug!(input = %answer, "rejected modality, discarding attempt");
            reporter.notify(Notice::InvalidModality { input: answer });
            return Ok(None);
        };

        let price = self.pricing.price(age);
        Ok(Some(AttendeeRecord::new(name, age, email, modality, price)))
    }

    fn offered_modality(&self, answer: &str) -> Option<Modality> {
        answer
            .parse::<Modality>()
            .ok()
            .filter(|m| self.config.modalities.contains(m))
    }
}

/// Map an input failure to the reason the session closes
fn stop_reason(err: InputError) -> Result<CloseReason, SessionError> {
    match err {
        InputError::Exhausted(field) => {
            tracing::warn!(%field, "input exhausted, closing registration");
            Ok(CloseReason::InputExhausted)
        }
        InputError::RetriesExceeded { field, attempts } => {
            tracing::warn!(%field, attempts, "retry limit reached, closing registration");
            Ok(CloseReason::RetriesExhausted)
        }
        InputError::Io(e) => Err(SessionError::Io(e)),
    }
}
