/*
 * Responsibility
 * - Publication request/response DTOs
 * - Field rules (title length, author email shape, year range)
 */
use serde::{Deserialize, Serialize};

use super::{
    Validate, deserialize_lenient_int, deserialize_present, deserialize_present_lenient_int,
};
use crate::repos::publication_repo::{NewPublication, Publication, PublicationPatch};

pub const TITLE_MIN_CHARS: usize = 5;
pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2025;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePublicationRequest {
    pub title: String,
    pub author: String,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub year: Option<i32>,
}

impl Validate for CreatePublicationRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        check_author(&self.author, &mut errors);
        if let Some(year) = self.year {
            check_year(year, &mut errors);
        }
        into_result(errors)
    }
}

impl From<CreatePublicationRequest> for NewPublication {
    fn from(req: CreatePublicationRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            year: req.year,
        }
    }
}

// Tri-state per field:
// - None: field missing (do not update)
// - Some(None): null
// - Some(Some(v)): set value
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePublicationRequest {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub author: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present_lenient_int")]
    pub year: Option<Option<i32>>,
}

impl Validate for UpdatePublicationRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        match &self.title {
            Some(Some(title)) => check_title(title, &mut errors),
            Some(None) => errors.push("title must be a string".to_string()),
            None => {}
        }
        match &self.author {
            Some(Some(author)) => check_author(author, &mut errors),
            Some(None) => errors.push("author must be an email".to_string()),
            None => {}
        }
        // null clears the year
        if let Some(Some(year)) = self.year {
            check_year(year, &mut errors);
        }
        into_result(errors)
    }
}

impl From<UpdatePublicationRequest> for PublicationPatch {
    fn from(req: UpdatePublicationRequest) -> Self {
        Self {
            title: req.title.flatten(),
            author: req.author.flatten(),
            year: req.year,
        }
    }
}

/// `?author=` filter, read from the raw query pairs so a repeated key is not a parse error.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListPublicationsQuery {
    pub authors: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthorFilter {
    All,
    Equals(String),
    /// `author` given more than once: no single author can match.
    Nothing,
}

impl From<Vec<(String, String)>> for ListPublicationsQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            authors: pairs
                .into_iter()
                .filter(|(key, _)| key == "author")
                .map(|(_, value)| value)
                .collect(),
        }
    }
}

impl ListPublicationsQuery {
    pub fn author_filter(mut self) -> AuthorFilter {
        match self.authors.len() {
            0 => AuthorFilter::All,
            1 => AuthorFilter::Equals(self.authors.remove(0)),
            _ => AuthorFilter::Nothing,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub created_by: String,
}

impl From<Publication> for PublicationResponse {
    fn from(p: Publication) -> Self {
        Self {
            id: p.id,
            title: p.title,
            author: p.author,
            year: p.year,
            created_by: p.created_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

fn check_title(title: &str, errors: &mut Vec<String>) {
    if title.chars().count() < TITLE_MIN_CHARS {
        errors.push(format!(
            "title must be longer than or equal to {TITLE_MIN_CHARS} characters"
        ));
    }
}

fn check_author(author: &str, errors: &mut Vec<String>) {
    if !is_email(author) {
        errors.push("author must be an email".to_string());
    }
}

fn check_year(year: i32, errors: &mut Vec<String>) {
    if year < YEAR_MIN {
        errors.push(format!("year must not be less than {YEAR_MIN}"));
    }
    if year > YEAR_MAX {
        errors.push(format!("year must not be greater than {YEAR_MAX}"));
    }
}

fn into_result(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// `local@domain.tld` shape check. Not RFC 5322; no quoted local parts or IP literals.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    let local_ok = local
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(is_local_char));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));

    labels_ok && tld_ok
}

fn is_local_char(c: char) -> bool {
    c.is_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
}
