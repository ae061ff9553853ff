//! Artist and album records served by the CD collection API.
//!
//! Both records compare by identity only: two values with the same `id` are
//! equal even if their other fields differ.

use std::fmt;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record kind exposed as a REST collection.
///
/// `COLLECTION` is the path segment (`/artist`, `/album`) and `LOOKUP_PARAM`
/// the query parameter that selects a record by its secondary key.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
    const LOOKUP_PARAM: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn lookup_key(&self) -> &str;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub artist_ids: Vec<i64>,
}

impl Entity for Artist {
    const COLLECTION: &'static str = "artist";
    const LOOKUP_PARAM: &'static str = "artistName";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn lookup_key(&self) -> &str {
        &self.name
    }
}

impl Entity for Album {
    const COLLECTION: &'static str = "album";
    const LOOKUP_PARAM: &'static str = "albumTitle";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn lookup_key(&self) -> &str {
        &self.title
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_serializes_to_json() {
        let artist = Artist {
            id: 3,
            name: "Prince".to_string(),
        };
        let json = serde_json::to_value(&artist).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Prince");
    }

    #[test]
    fn album_uses_camel_case_fields() {
        let album = Album {
            id: 1,
            title: "Raising Sand".to_string(),
            release_date: NaiveDate::from_ymd_opt(2007, 10, 23).unwrap(),
            artist_ids: vec![4, 2],
        };
        let json = serde_json::to_value(&album).unwrap();
        assert_eq!(json["releaseDate"], "2007-10-23");
        assert_eq!(json["artistIds"], serde_json::json!([4, 2]));
    }

    #[test]
    fn album_defaults_id_and_artist_ids() {
        let album: Album =
            serde_json::from_str(r#"{"title":"Raising Snd","releaseDate":"2007-10-23"}"#).unwrap();
        assert_eq!(album.id, 0);
        assert!(album.artist_ids.is_empty());
    }

    #[test]
    fn album_rejects_missing_release_date() {
        let result: Result<Album, _> = serde_json::from_str(r#"{"title":"No date"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn equality_is_by_identity() {
        let a = Artist {
            id: 7,
            name: "Prince".to_string(),
        };
        let b = Artist {
            id: 7,
            name: "The Artist".to_string(),
        };
        assert_eq!(a, b);
        assert_ne!(
            a,
            Artist {
                id: 8,
                name: "Prince".to_string()
            }
        );
    }

    #[test]
    fn display_shows_id_and_name() {
        let artist = Artist {
            id: 2,
            name: "U2".to_string(),
        };
        assert_eq!(artist.to_string(), "2:U2");
    }
}
