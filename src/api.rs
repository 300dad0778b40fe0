//! Public extraction API.
//!
//! This is the boundary the surrounding command/chat layer talks to: parse
//! failures are swallowed here into an empty result (a message that does not
//! parse simply holds no suggestions), never propagated as errors. Callers
//! that care about the failure itself use [`try_extract_with`].

use crate::engine::{self, Recovery};
use crate::error::ParseError;
use crate::suggestion::SuggestionFields;
use crate::vocab::Vocabulary;
use tracing::debug;

/// Options that affect extraction behavior.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// How the assembler reacts to a malformed block. The default rejects the
    /// whole input, matching the grammar's all-or-nothing contract.
    pub recovery: Recovery,
}

/// Extracts suggestion skeletons from `text` using the built-in vocabulary.
///
/// Returns the skeletons in source order, or an empty vector when the text
/// holds none — including when it fails to parse at all.
///
/// # Example
/// ```
/// let entries = shelftalker::extract("title: piranesi\ngenre: fantasy");
/// assert_eq!(entries[0].genre.as_deref(), Some("fantasy"));
/// ```
pub fn extract(text: &str) -> Vec<SuggestionFields> {
    extract_with(text, Vocabulary::builtin(), &Options::default())
}

/// Like [`extract`], with an injected vocabulary and options.
pub fn extract_with(text: &str, vocab: &Vocabulary, options: &Options) -> Vec<SuggestionFields> {
    match try_extract_with(text, vocab, options) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(%err, "extraction failed; treating input as holding no suggestions");
            Vec::new()
        }
    }
}

/// The full pipeline with failures exposed: lower-case, normalize markup,
/// tokenize against `vocab`, assemble.
pub fn try_extract_with(
    text: &str,
    vocab: &Vocabulary,
    options: &Options,
) -> Result<Vec<SuggestionFields>, ParseError> {
    let lowered = text.to_lowercase();
    let cleaned = engine::normalize(&lowered);
    let tokens = engine::tokenize(&cleaned, vocab)?;
    engine::assemble(&tokens, options.recovery)
}
