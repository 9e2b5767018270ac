//! Structured output emitted by a registration session
//!
//! The session never prints. It hands [`Notice`] values to a [`Reporter`],
//! and the CLI decides how (and whether) to render them.

use serde::Serialize;

use crate::entities::attendee::{AttendeeRecord, Modality};

/// Why a session stopped accepting registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The last free seat was taken
    CapacityReached,
    /// The operator answered anything but "s" to "continue?"
    OperatorDeclined,
    /// The input source ran dry
    InputExhausted,
    /// A field was rejected more times than the retry policy allows
    RetriesExhausted,
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseReason::CapacityReached => write!(f, "capacity_reached"),
            CloseReason::OperatorDeclined => write!(f, "operator_declined"),
            CloseReason::InputExhausted => write!(f, "input_exhausted"),
            CloseReason::RetriesExhausted => write!(f, "retries_exhausted"),
        }
    }
}

/// Something that happened during a session
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Session opened
    Banner {
        name: String,
        capacity: usize,
        base_price: f64,
        modalities: Vec<Modality>,
    },
    /// A new attendee attempt starts for the given 1-based seat
    NewAttempt { seat: usize, capacity: usize },
    /// Blank name entered
    InvalidName,
    /// Age was not a positive whole number
    InvalidAge { input: String },
    /// Modality not offered; the attempt is discarded
    InvalidModality { input: String },
    /// A record was appended
    Registered { record: AttendeeRecord },
    /// All seats taken
    CapacityReached,
    /// The session is closed; no prompts follow
    Closed { reason: CloseReason },
}

/// Sink for session notices
pub trait Reporter {
    fn notify(&mut self, notice: Notice);
}

/// Reporter that keeps every notice, for inspection after the fact
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub notices: Vec<Notice>,
}

impl Reporter for RecordingReporter {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
