//! Workshop registration console
//!
//! Registers attendees for a capacity-limited workshop, prices each seat by
//! age and reports statistics once registration closes.

pub mod cli;
pub mod core;
pub mod entities;
