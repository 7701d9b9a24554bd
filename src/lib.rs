//! Persona-driven document analysis.
//!
//! Documents are split into titled sections by heading heuristics, every
//! section is scored against an embedding of "persona + job to be done", and
//! a small document-diverse selection (two, two and one sections from the
//! three best documents) is refined into its most relevant paragraphs.

pub mod config;
pub mod encoder;
pub mod error;
pub mod extract;
pub mod input;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod rank;

pub use config::Settings;
pub use encoder::{Encoder, EncoderKind};
pub use error::AnalysisError;
pub use extract::{DocumentSource, FileExtractor, TextExtractor};
pub use input::ChallengeInput;
pub use output::AnalysisResult;
pub use pipeline::Analyzer;
