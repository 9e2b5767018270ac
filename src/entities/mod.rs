//! Entity type definitions
//!
//! - [`AttendeeRecord`] - one accepted registration with its derived price and domain
//! - [`Modality`] - the workshop slot an attendee picks

pub mod attendee;

pub use attendee::{AttendeeRecord, Modality};
