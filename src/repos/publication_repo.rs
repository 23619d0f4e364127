/*
 * Responsibility
 * - publications CRUD over process memory
 * - ids are allocated sequentially from 1 and never reused
 * - keyed by id; since ids only grow, key order == insertion order
 */
use std::collections::BTreeMap;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct NewPublication {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

/// Field-by-field update. `None` leaves the stored value alone.
///
/// `year` is tri-state:
/// - None: do not update
/// - Some(None): clear
/// - Some(Some(v)): set v
#[derive(Debug, Clone, Default)]
pub struct PublicationPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<Option<i32>>,
}

#[derive(Debug)]
pub struct PublicationStore {
    rows: BTreeMap<i64, Publication>,
    next_id: i64,
}

impl Default for PublicationStore {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl PublicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All publications in insertion order, optionally only those whose author matches exactly.
    /// An empty filter counts as no filter.
    pub fn list(&self, author: Option<&str>) -> Vec<Publication> {
        let author = author.filter(|a| !a.is_empty());
        self.rows
            .values()
            .filter(|p| author.is_none_or(|a| p.author == a))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> Result<&Publication, RepoError> {
        self.rows.get(&id).ok_or(RepoError::NotFound { id })
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut Publication, RepoError> {
        self.rows.get_mut(&id).ok_or(RepoError::NotFound { id })
    }

    pub fn create(&mut self, new: NewPublication, created_by: &str) -> Publication {
        let id = self.next_id;
        self.next_id += 1;

        let publication = Publication {
            id,
            title: new.title,
            author: new.author,
            year: new.year,
            created_by: created_by.to_string(),
        };
        self.rows.insert(id, publication.clone());
        publication
    }

    pub fn update(&mut self, id: i64, patch: PublicationPatch) -> Result<Publication, RepoError> {
        let publication = self.get_mut(id)?;

        if let Some(title) = patch.title {
            publication.title = title;
        }
        if let Some(author) = patch.author {
            publication.author = author;
        }
        if let Some(year) = patch.year {
            publication.year = year;
        }

        Ok(publication.clone())
    }

    pub fn remove(&mut self, id: i64) -> Result<(), RepoError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound { id })
    }
}
