//! Token-stream assembly.
//!
//! Reduces the scanner's output to suggestion skeletons:
//!
//! ```text
//! Input        := LeadingNoise Suggestions
//! LeadingNoise := FreeText*                  -- discarded
//! Suggestions  := Suggestion+
//! Suggestion   := Title OtherField*
//! Title        := LABEL(Title) SEPARATOR Text
//! OtherField   := LABEL(k) SEPARATOR Text
//! Text         := FreeText*                  -- joined with single spaces
//! ```
//!
//! A new Title always opens a new suggestion, closing the previous one. There
//! is no error-recovery production: by default any sequence that does not
//! reduce rejects the entire input, including every suggestion recognized
//! before the fault. [`Recovery::BestEffort`] relaxes that to dropping the
//! malformed block alone — still as a whole unit, never partially salvaged.

use crate::error::ParseError;
use crate::suggestion::{FieldKind, SuggestionFields};
use crate::{Token, TokenKind};

/// How the assembler reacts to input that does not reduce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recovery {
    /// One malformed line anywhere discards every suggestion in the input.
    #[default]
    AllOrNothing,
    /// Drop the malformed block as a unit and resume at the next title.
    BestEffort,
}

pub(crate) fn assemble(
    tokens: &[Token<'_>],
    recovery: Recovery,
) -> Result<Vec<SuggestionFields>, ParseError> {
    match recovery {
        Recovery::AllOrNothing => assemble_strict(tokens),
        Recovery::BestEffort => Ok(assemble_best_effort(tokens)),
    }
}

fn assemble_strict(tokens: &[Token<'_>]) -> Result<Vec<SuggestionFields>, ParseError> {
    let mut cursor = 0;

    // Leading noise: free text before the first label is discarded.
    while matches!(tokens.get(cursor), Some(token) if token.kind == TokenKind::FreeText) {
        cursor += 1;
    }

    let mut entries: Vec<Vec<(FieldKind, String)>> = Vec::new();
    let mut current: Option<Vec<(FieldKind, String)>> = None;

    while cursor < tokens.len() {
        // Free text cannot appear here: the noise and value loops consume
        // every run of it, so only a label may open a field.
        let kind = match tokens[cursor].kind {
            TokenKind::Label(kind) => kind,
            _ => return Err(ParseError::UnexpectedSeparator),
        };
        cursor += 1;

        match tokens.get(cursor) {
            Some(token) if token.kind == TokenKind::Separator => cursor += 1,
            _ => return Err(ParseError::MissingSeparator(kind)),
        }

        let value = take_text(tokens, &mut cursor);

        if kind == FieldKind::Title {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(vec![(FieldKind::Title, value)]);
        } else {
            match current.as_mut() {
                Some(fields) => fields.push((kind, value)),
                None => return Err(ParseError::FieldBeforeTitle(kind)),
            }
        }
    }

    if let Some(done) = current.take() {
        entries.push(done);
    }
    if entries.is_empty() {
        return Err(ParseError::NoSuggestions);
    }
    Ok(entries.into_iter().map(SuggestionFields::from_pairs).collect())
}

fn assemble_best_effort(tokens: &[Token<'_>]) -> Vec<SuggestionFields> {
    let mut entries = Vec::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        // Resume at the next title; everything in between is dropped.
        while cursor < tokens.len() && tokens[cursor].kind != TokenKind::Label(FieldKind::Title) {
            cursor += 1;
        }
        if cursor >= tokens.len() {
            break;
        }
        match parse_block(tokens, cursor) {
            Ok((pairs, next)) => {
                entries.push(SuggestionFields::from_pairs(pairs));
                cursor = next;
            }
            // The whole block is rejected as a unit; scanning continues past
            // the offending token.
            Err(next) => cursor = next,
        }
    }

    entries
}

/// Parses one Title…fields… block starting at a Title label. `Ok` carries the
/// field pairs and the index of the next block; `Err` carries the index to
/// resume scanning from after a malformed block.
fn parse_block(
    tokens: &[Token<'_>],
    start: usize,
) -> Result<(Vec<(FieldKind, String)>, usize), usize> {
    let mut cursor = start;
    let mut pairs = Vec::new();

    while cursor < tokens.len() {
        let kind = match tokens[cursor].kind {
            TokenKind::Label(FieldKind::Title) if cursor != start => break,
            TokenKind::Label(kind) => kind,
            _ => return Err(cursor + 1),
        };
        cursor += 1;

        match tokens.get(cursor) {
            Some(token) if token.kind == TokenKind::Separator => cursor += 1,
            _ => return Err(cursor),
        }

        let value = take_text(tokens, &mut cursor);
        pairs.push((kind, value));
    }

    Ok((pairs, cursor))
}

/// Consumes the run of free-text tokens at `cursor`, joined with single
/// spaces. Zero tokens is legal and yields the empty string.
fn take_text(tokens: &[Token<'_>], cursor: &mut usize) -> String {
    let mut parts = Vec::new();
    while let Some(token) = tokens.get(*cursor) {
        if token.kind != TokenKind::FreeText {
            break;
        }
        parts.push(token.text);
        *cursor += 1;
    }
    parts.join(" ")
}
