//! CD collection DTOs used by the API tests.
//!
//! # Design
//! These mirror the server's records but are defined independently, so the
//! end-to-end tests catch schema drift between the two crates. Equality is by
//! identity: an entity fetched before and after an update compares equal.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub artist_ids: Vec<i64>,
}

impl Artist {
    pub fn named(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
        }
    }
}

impl Album {
    pub fn new(title: &str, release_date: NaiveDate, artist_ids: Vec<i64>) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            release_date,
            artist_ids,
        }
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artist {}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Album {}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.name)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.title)
    }
}
