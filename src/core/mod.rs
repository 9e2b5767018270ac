//! Core module - configuration, pricing, input validation and the session loop

pub mod config;
pub mod input;
pub mod notice;
pub mod pricing;
pub mod session;
pub mod stats;

pub use config::{ConfigError, ConfigLayer, WorkshopConfig};
pub use input::{InputError, InputValidator, LinePrompter, Prompter, RetryPolicy, TermPrompter};
pub use notice::{CloseReason, Notice, Reporter};
pub use pricing::{DiscountRule, PriceQuote, PricingPolicy};
pub use session::{RegistrationSession, SessionError, SessionReport, SessionState};
pub use stats::Statistics;
