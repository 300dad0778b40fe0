//! Suggestion record types: the closed field enumeration, the assembled
//! skeleton produced by the extraction pipeline, and the finalized entry held
//! by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The closed set of fields a suggestion can carry. Title is mandatory per
/// entry; everything else is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Title,
    Author,
    Genre,
    Description,
    Date,
    Notes,
    Reviews,
    Links,
    Download,
    Pages,
    Goodreads,
    Wikipedia,
    Quotes,
}

impl FieldKind {
    /// Every field kind in declaration order. Display loops use this; the
    /// tokenizer's match priority is the vocabulary's declaration order, not
    /// this one (see [`crate::Vocabulary`]).
    pub const ALL: [FieldKind; 13] = [
        FieldKind::Title,
        FieldKind::Author,
        FieldKind::Genre,
        FieldKind::Description,
        FieldKind::Date,
        FieldKind::Notes,
        FieldKind::Reviews,
        FieldKind::Links,
        FieldKind::Download,
        FieldKind::Pages,
        FieldKind::Goodreads,
        FieldKind::Wikipedia,
        FieldKind::Quotes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Author => "author",
            FieldKind::Genre => "genre",
            FieldKind::Description => "description",
            FieldKind::Date => "date",
            FieldKind::Notes => "notes",
            FieldKind::Reviews => "reviews",
            FieldKind::Links => "links",
            FieldKind::Download => "download",
            FieldKind::Pages => "pages",
            FieldKind::Goodreads => "goodreads",
            FieldKind::Wikipedia => "wikipedia",
            FieldKind::Quotes => "quotes",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The assembled field set of one suggestion, before an identifier is
/// attached. Values are free-text lines joined with single spaces; a label
/// repeated within the same suggestion span joins into the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionFields {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goodreads: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes: Option<String>,
}

fn join_into(slot: &mut Option<String>, value: &str) {
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(value);
        }
        empty => *empty = Some(value.to_owned()),
    }
}

impl SuggestionFields {
    pub(crate) fn from_pairs(pairs: Vec<(FieldKind, String)>) -> Self {
        let mut fields = SuggestionFields::default();
        for (kind, value) in pairs {
            fields.merge(kind, &value);
        }
        fields
    }

    /// Append `value` under `kind`, space-joining with any text the field
    /// already holds.
    pub fn merge(&mut self, kind: FieldKind, value: &str) {
        match kind {
            FieldKind::Title => {
                if self.title.is_empty() {
                    self.title = value.to_owned();
                } else {
                    self.title.push(' ');
                    self.title.push_str(value);
                }
            }
            FieldKind::Author => join_into(&mut self.author, value),
            FieldKind::Genre => join_into(&mut self.genre, value),
            FieldKind::Description => join_into(&mut self.description, value),
            FieldKind::Date => join_into(&mut self.date, value),
            FieldKind::Notes => join_into(&mut self.notes, value),
            FieldKind::Reviews => join_into(&mut self.reviews, value),
            FieldKind::Links => join_into(&mut self.links, value),
            FieldKind::Download => join_into(&mut self.download, value),
            FieldKind::Pages => join_into(&mut self.pages, value),
            FieldKind::Goodreads => join_into(&mut self.goodreads, value),
            FieldKind::Wikipedia => join_into(&mut self.wikipedia, value),
            FieldKind::Quotes => join_into(&mut self.quotes, value),
        }
    }

    /// The value held under `kind`, if any. Title is always present, possibly
    /// as the empty string.
    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Title => Some(&self.title),
            FieldKind::Author => self.author.as_deref(),
            FieldKind::Genre => self.genre.as_deref(),
            FieldKind::Description => self.description.as_deref(),
            FieldKind::Date => self.date.as_deref(),
            FieldKind::Notes => self.notes.as_deref(),
            FieldKind::Reviews => self.reviews.as_deref(),
            FieldKind::Links => self.links.as_deref(),
            FieldKind::Download => self.download.as_deref(),
            FieldKind::Pages => self.pages.as_deref(),
            FieldKind::Goodreads => self.goodreads.as_deref(),
            FieldKind::Wikipedia => self.wikipedia.as_deref(),
            FieldKind::Quotes => self.quotes.as_deref(),
        }
    }
}

/// One finalized suggestion: the assembled fields plus a generated unique
/// identifier. The submitting user's identity is carried by the store map
/// the entry lives under, so an entry serializes flat as
/// `{id, title, author?, ...}` with absent optional fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: SuggestionFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_joins_repeated_fields_with_single_spaces() {
        let mut fields = SuggestionFields::default();
        fields.merge(FieldKind::Title, "piranesi");
        fields.merge(FieldKind::Links, "https://a.example");
        fields.merge(FieldKind::Links, "https://b.example");

        assert_eq!(fields.title, "piranesi");
        assert_eq!(fields.links.as_deref(), Some("https://a.example https://b.example"));
    }

    #[test]
    fn absent_optional_fields_are_omitted_from_json() {
        let fields = SuggestionFields {
            title: "dune".to_owned(),
            genre: Some("science fiction".to_owned()),
            ..SuggestionFields::default()
        };
        let entry = SuggestionEntry { id: Uuid::new_v4(), fields };

        let json = serde_json::to_value(&entry).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("id"));
        assert_eq!(object["title"], "dune");
        assert_eq!(object["genre"], "science fiction");
        assert!(!object.contains_key("author"));
        assert!(!object.contains_key("quotes"));
    }

    #[test]
    fn entry_json_round_trips() {
        let fields = SuggestionFields {
            title: "hyperion".to_owned(),
            author: Some("dan simmons".to_owned()),
            pages: Some("482".to_owned()),
            ..SuggestionFields::default()
        };
        let entry = SuggestionEntry { id: Uuid::new_v4(), fields };

        let json = serde_json::to_string(&entry).unwrap();
        let back: SuggestionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
