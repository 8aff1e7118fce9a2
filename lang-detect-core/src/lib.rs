//! N-gram based natural language identification.
//!
//! This crate implements the Cavnar–Trenkle text categorization method:
//! - Character n-gram frequency profiles built from raw text
//! - A rank-order distance between an input profile and reference profiles
//! - Nearest reference selection
//! - Training of reference profiles from corpora or TextCat frequency lists
//! - Persistence of reference profile sets
//!
//! ```no_run
//! use lang_detect_core::{LanguageDetector, ModelKind};
//!
//! let detector = LanguageDetector::open("./models", ModelKind::Tc)?;
//! println!("{}", detector.detect("what language is this?")?);
//! # Ok::<(), lang_detect_core::DetectError>(())
//! ```

/// Profile model and detection.
pub mod model;

/// Serialized reference profile sets.
pub mod store;

pub mod training;

pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{DetectError, Result};
pub use model::detector::{LanguageDetector, detect};
pub use model::profile::{LIMIT, Profile};
pub use store::{ModelKind, ProfileSet};
