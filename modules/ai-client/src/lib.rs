//! Thin client for hosted text-generation models.
//!
//! Only the Claude Messages API is supported. Callers that need to swap the
//! backend (tests, alternate gateways) depend on [`TextGenerator`] instead of
//! [`Claude`] directly.

pub mod claude;
pub mod traits;
pub mod util;

pub use claude::Claude;
pub use traits::{Sampling, TextGenerator};
