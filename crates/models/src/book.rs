use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A book record as stored on disk and returned over the wire.
///
/// `id` is an opaque string assigned by the server and immutable afterwards.
/// `created_at` is stamped on creation; seed records predate the API and
/// carry no timestamp. `updated_at` appears only after the first update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The persisted document: the whole collection, serialized as-is.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Shelf {
    pub books: Vec<Book>,
}

impl Shelf {
    /// Default contents written when the store file does not exist yet.
    pub fn seed() -> Self {
        let book = |id: &str, title: &str, author: &str| Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            created_at: None,
            updated_at: None,
        };
        Self {
            books: vec![
                book("1", "The Hobbit", "J.R.R. Tolkien"),
                book("2", "To Kill a Mockingbird", "Harper Lee"),
                book("3", "1984", "George Orwell"),
            ],
        }
    }
}

/// Creation input: both fields required, trimmed, non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct NewBook {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl NewBook {
    /// Validate and trim both fields, returning `(title, author)`.
    pub fn validate(&self) -> Result<(String, String), ModelError> {
        let title = required(self.title.as_deref(), "title")?;
        let author = required(self.author.as_deref(), "author")?;
        Ok((title, author))
    }
}

/// Update input: at least one field present, each present field non-empty
/// after trimming.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl BookPatch {
    /// Validate and trim the provided fields, returning them in order.
    pub fn validate(&self) -> Result<(Option<String>, Option<String>), ModelError> {
        if self.title.is_none() && self.author.is_none() {
            return Err(ModelError::Validation(
                "provide title and/or author to update".into(),
            ));
        }
        let title = self.title.as_deref().map(|s| non_empty(s, "title")).transpose()?;
        let author = self.author.as_deref().map(|s| non_empty(s, "author")).transpose()?;
        Ok((title, author))
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, ModelError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ModelError::Validation(format!("{field} is required"))),
    }
}

fn non_empty(value: &str, field: &str) -> Result<String, ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!(
            "{field} must be a non-empty string"
        )));
    }
    Ok(value.trim().to_string())
}
