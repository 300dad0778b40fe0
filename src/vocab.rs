//! Label vocabulary: the ordered list of field-label patterns the tokenizer
//! dispatches on.
//!
//! Declaration order is match priority and is semantically load-bearing: the
//! specific Goodreads and Wikipedia patterns are declared before the Links
//! pattern, whose generic `link…` synonym would otherwise shadow them. The
//! first pattern that matches at a scan position wins, with no backtracking
//! to a shorter-but-earlier match.
//!
//! Every pattern accepts an optional markup/bullet prefix (`_ * > - . =` runs
//! plus whitespace), one of the label's synonyms, up to 5 stray non-separator
//! characters, and then requires the `:` separator. The separator is part of
//! the match so no lookahead is needed, but the tokenizer leaves it in the
//! input for the separator rule to consume.

use crate::suggestion::FieldKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// One prioritized label pattern.
#[derive(Debug)]
pub struct LabelPattern {
    kind: FieldKind,
    regex: Regex,
}

impl LabelPattern {
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// An ordered label vocabulary. The built-in set covers English and
/// Portuguese; deployments can inject their own synonym lists through
/// [`Vocabulary::builder`] without touching the engine.
#[derive(Debug)]
pub struct Vocabulary {
    labels: Vec<LabelPattern>,
}

impl Vocabulary {
    /// The built-in English/Portuguese vocabulary.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder { labels: Vec::new() }
    }

    /// Field kinds in match-priority order.
    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.labels.iter().map(|label| label.kind)
    }

    pub(crate) fn labels(&self) -> &[LabelPattern] {
        &self.labels
    }
}

/// Builds a custom [`Vocabulary`]. Synonyms are matched literally (they are
/// regex-escaped; spaces inside a synonym match any whitespace), and labels
/// are tried in the order they were declared.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    labels: Vec<(FieldKind, String)>,
}

impl VocabularyBuilder {
    pub fn label(mut self, kind: FieldKind, synonyms: &[&str]) -> Self {
        let alternatives = synonyms
            .iter()
            .map(|synonym| regex::escape(synonym).replace(' ', r"\s"))
            .collect::<Vec<_>>()
            .join("|");
        self.labels.push((kind, alternatives));
        self
    }

    pub fn build(self) -> Result<Vocabulary, regex::Error> {
        let labels = self
            .labels
            .into_iter()
            .map(|(kind, alternatives)| {
                Regex::new(&label_pattern(&alternatives)).map(|regex| LabelPattern { kind, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Vocabulary { labels })
    }
}

fn label_pattern(alternatives: &str) -> String {
    format!(r"^(?:[_*>=.\-]*\s*)?({alternatives})[^:]{{0,5}}:")
}

/// Built-in synonym alternations, in match-priority order. The Links entry
/// keeps the greedy `link…` form: anything starting with the word `link` up
/// to a separator on the same line.
const BUILTIN_LABELS: [(FieldKind, &str); 13] = [
    (FieldKind::Title, "titles|title|título|títulos|titulos|titulo|nome|nomes"),
    (FieldKind::Author, "autores|autoras|autora|authors|author|autor"),
    (FieldKind::Genre, "genres|géneros|generos|categorias|género|genero|genre"),
    (FieldKind::Description, "description|descrição|descriçao|descricao|summary|sinopse|resumo"),
    (
        FieldKind::Date,
        r"publication\sdate|data\sde\spublicação|data\sde\spublicaçao|data\sde\spublicacao|release\sdate|data|date",
    ),
    (
        FieldKind::Notes,
        "comments|comment|comentários|comentarios|comentário|comentario|thoughts|footnotes|footnote|notes|notas|nota|note",
    ),
    (FieldKind::Reviews, "reviews|review|avaliações|avaliaçoes|avaliacoes|avaliação|avaliaçao|avaliacao"),
    (FieldKind::Goodreads, r"goodreads|link\sdo\sgoodreads"),
    (
        FieldKind::Wikipedia,
        r"wikipedia|wikipédia|link\sda\swikipédia|link\sda\swikipedia|link\sdo\swikipedia|link\sdo\swikipédia|wiki",
    ),
    (FieldKind::Links, r"link[^\n]*|links|link"),
    (
        FieldKind::Pages,
        r"número\sde\spáginas|numero\sde\spáginas|número\sde\spaginas|numero\sde\spaginas|nº\sde\spáginas|nº\sde\spaginas|nº\spáginas|nº\spaginas|páginas|paginas|number\sof\spages|nº\sof\spages|nº\spages|pages|length|comprimento",
    ),
    (FieldKind::Download, "download|downloads|tranferir"),
    (FieldKind::Quotes, "quote|quotes|citações|citaçoes|citacoes|citação|citaçao|citacao"),
];

static BUILTIN: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    labels: BUILTIN_LABELS
        .iter()
        .map(|&(kind, alternatives)| LabelPattern {
            kind,
            regex: Regex::new(&label_pattern(alternatives)).unwrap(),
        })
        .collect(),
});
