//! Pre-tokenization cleanup of markup-wrapped labels.
//!
//! Chat markup likes to swallow the separator together with the label it
//! decorates: `**author:** susanna clarke` carries the `:` inside the bold
//! span, which would leave the markup's tail glued to the value once the
//! label is scanned. Rewriting it to `**author**:` keeps the label/value
//! boundary where the tokenizer expects it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Markup delimiters handled, longest first so `***` is not rewritten as a
/// run of `*` spans.
const DELIMITERS: [&str; 7] = ["***", "**", "*", "__", "_", "~~", "`"];

static WRAPPED_LABELS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    DELIMITERS
        .iter()
        .map(|delimiter| {
            let escaped = regex::escape(delimiter);
            let pattern = format!("{escaped}(?P<label>[^:\n]{{1,60}}?):{escaped}");
            (Regex::new(&pattern).unwrap(), format!("{delimiter}${{label}}{delimiter}:"))
        })
        .collect()
});

/// Moves a separator trapped inside a markup span to just after it. Pure and
/// infallible; text with no wrapped label comes back unchanged.
pub(crate) fn normalize(raw: &str) -> String {
    let mut text: Cow<'_, str> = Cow::Borrowed(raw);
    for (pattern, replacement) in WRAPPED_LABELS.iter() {
        if pattern.is_match(&text) {
            let rewritten = pattern.replace_all(&text, replacement.as_str()).into_owned();
            text = Cow::Owned(rewritten);
        }
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn moves_separator_out_of_bold_span() {
        assert_eq!(normalize("**author:** susanna clarke"), "**author**: susanna clarke");
    }

    #[test]
    fn moves_separator_out_of_underscore_span() {
        assert_eq!(normalize("_autor:_ asd asd asd"), "_autor_: asd asd asd");
    }

    #[test]
    fn handles_every_delimiter_once_per_line() {
        assert_eq!(
            normalize("~~notes:~~ skip this one\n`pages:` 123"),
            "~~notes~~: skip this one\n`pages`: 123"
        );
    }

    #[test]
    fn leaves_already_clean_text_alone() {
        let text = "title: piranesi\n**author**: susanna clarke";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn ignores_markup_spanning_the_whole_line() {
        // The closing delimiter is nowhere near the separator, so this is a
        // styled value, not a wrapped label.
        let text = "**author: susanna clarke**";
        assert_eq!(normalize(text), text);
    }
}
