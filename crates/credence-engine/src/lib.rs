//! Credibility scoring for witness, suspect and law-enforcement statements.
//!
//! Composes a sentiment-polarity primitive and a semantic-similarity
//! primitive into a bounded confidence score:
//!
//! - [`sentiment`]: polarity in [-1, 1] and the cooperation verdict.
//! - [`consistency`]: similarity of two statements, normalised to [0, 1].
//! - [`aggregate`]: the confidence score combining the two.
//! - [`engine`]: the [`CredibilityEngine`] façade, including store-backed
//!   assessment of a person's statements in a case.

pub mod aggregate;
pub mod config;
pub mod consistency;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod sentiment;

pub use aggregate::ConfidencePolicy;
pub use config::EngineConfig;
pub use consistency::HashedCosine;
pub use engine::CredibilityEngine;
pub use error::AssessError;
pub use sentiment::LexiconPolarity;

#[cfg(test)]
mod tests;
