//! Fixed-priority scanner.
//!
//! The input is scanned left to right. At each position the scanner tries,
//! in the vocabulary's declared order, to match one label pattern; failing
//! that, a `:` becomes a Separator; failing that, the remainder of the line
//! becomes one FreeText token. Space, tab and newline between tokens are
//! skipped and produce nothing. Input is expected to be lower-cased already —
//! every label keyword is defined lower-case.

use crate::error::ParseError;
use crate::suggestion::FieldKind;
use crate::vocab::Vocabulary;
use crate::{Token, TokenKind};

pub(crate) fn tokenize<'a>(text: &'a str, vocab: &Vocabulary) -> Result<Vec<Token<'a>>, ParseError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let Some(ch) = rest.chars().next() else { break };

        if matches!(ch, ' ' | '\t' | '\n') {
            pos += ch.len_utf8();
            continue;
        }

        if let Some((kind, synonym, consumed)) = match_label(vocab, rest) {
            tokens.push(Token { kind: TokenKind::Label(kind), text: synonym });
            pos += consumed;
            continue;
        }

        if ch == ':' {
            tokens.push(Token { kind: TokenKind::Separator, text: &rest[..1] });
            pos += 1;
            continue;
        }

        let line = match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        };
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            // Nothing scannable on this line (a stray control character,
            // typically a bare carriage return). Abort the whole parse.
            return Err(ParseError::IllegalCharacter { ch, offset: pos });
        }
        tokens.push(Token { kind: TokenKind::FreeText, text: trimmed });
        pos += line.len();
    }

    Ok(tokens)
}

/// Tries every label pattern at the current position, first match wins.
/// Returns the field kind, the matched synonym, and the number of bytes to
/// consume — one short of the match, leaving the separator in the input.
fn match_label<'a>(vocab: &Vocabulary, rest: &'a str) -> Option<(FieldKind, &'a str, usize)> {
    for label in vocab.labels() {
        if let Some(caps) = label.regex().captures(rest) {
            let whole = caps.get(0)?;
            let synonym = caps.get(1)?;
            return Some((label.kind(), synonym.as_str(), whole.end() - 1));
        }
    }
    None
}
