//! Joke evaluation: novelty, safety and funniness, plus the per-session
//! cursor that walks a joke list.

pub mod funniness;
pub mod novelty;
pub mod safety;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use funniness::{parse_score, FunninessMethod, FunninessScorer, FunninessVerdict};
pub use novelty::{NoveltyVerdict, ToldJokes};
pub use safety::{check_safety, SafetyVerdict, UNSAFE_KEYWORDS};
pub use session::{Evaluation, JokeSession, Turn};
