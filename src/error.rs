//! Error types for the extraction pipeline and the suggestion store.

use crate::suggestion::FieldKind;
use thiserror::Error;

/// Failure while turning raw text into suggestion skeletons.
///
/// `IllegalCharacter` comes from the tokenizer; every other variant is a
/// grammar failure from the assembler. Either way the whole input is
/// rejected — the grammar has no error-recovery production, so nothing
/// recognized earlier in the same text survives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("illegal character {ch:?} at byte {offset}")]
    IllegalCharacter { ch: char, offset: usize },

    /// A separator with no field label in front of it.
    #[error("separator with no preceding field label")]
    UnexpectedSeparator,

    /// An optional field label seen before any title opened a suggestion.
    #[error("{0} field before any title")]
    FieldBeforeTitle(FieldKind),

    /// A field label with something other than a separator behind it.
    #[error("{0} label not followed by a separator")]
    MissingSeparator(FieldKind),

    /// The input reduced to leading noise only.
    #[error("no suggestions in input")]
    NoSuggestions,
}

/// Failure from the suggestion store.
///
/// `NotFound` is a normal, expected outcome and is never logged loudly.
/// `InvariantViolation` signals store corruption (an empty bucket or
/// submitter sequence that eager pruning should have removed, or a
/// duplicated entry id) and halts further processing of that community.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
