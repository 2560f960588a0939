//! Domain models

use serde::{Deserialize, Serialize};

use crate::Error;

/// Musical genre of a catalog entry.
///
/// Stored as text in the songs table; values outside this set are a data
/// error surfaced on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Pops,
    Rock,
    Anime,
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Genre::Pops => "Pops",
            Genre::Rock => "Rock",
            Genre::Anime => "Anime",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Genre {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Pops" => Ok(Genre::Pops),
            "Rock" => Ok(Genre::Rock),
            "Anime" => Ok(Genre::Anime),
            other => Err(Error::InvalidInput(format!("unknown genre: {}", other))),
        }
    }
}

/// One difficulty sheet attached to a song; the payload is opaque
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sheet {
    pub sheet: String,
    pub difficulty: i64,
}

/// Full catalog entry with its sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub music_id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub genre: Genre,
    pub base_difficulty: Option<i64>,
    pub thumbnail: Option<String>,
    pub sheets: Vec<Sheet>,
}

/// Display projection used by search, favorites and history responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SongSummary {
    pub music_id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub thumbnail: Option<String>,
}

/// Per-measure difficulty override
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DifficultyOverride {
    pub measure: i64,
    pub difficulty: i64,
}

/// Search predicate — exactly one of the three supported match modes
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "search_category", rename_all = "snake_case")]
pub enum SearchQuery {
    /// Exact base-difficulty match
    Difficulty { difficulty: i64 },
    /// Substring match on title or artist
    Keyword { text: String },
    /// Exact genre match
    Genre { genre: Genre },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_display_parse_roundtrip() {
        for genre in [Genre::Pops, Genre::Rock, Genre::Anime] {
            let parsed: Genre = genre.to_string().parse().unwrap();
            assert_eq!(parsed, genre);
        }
    }

    #[test]
    fn test_genre_unknown_value_is_error() {
        let result = "Jazz".parse::<Genre>();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_search_query_deserializes_tagged_variants() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"search_category": "difficulty", "difficulty": 3}"#).unwrap();
        assert!(matches!(query, SearchQuery::Difficulty { difficulty: 3 }));

        let query: SearchQuery =
            serde_json::from_str(r#"{"search_category": "keyword", "text": "love"}"#).unwrap();
        assert!(matches!(query, SearchQuery::Keyword { ref text } if text == "love"));

        let query: SearchQuery =
            serde_json::from_str(r#"{"search_category": "genre", "genre": "Rock"}"#).unwrap();
        assert!(matches!(query, SearchQuery::Genre { genre: Genre::Rock }));
    }

    #[test]
    fn test_search_query_rejects_unknown_category() {
        let result = serde_json::from_str::<SearchQuery>(r#"{"search_category": "mood"}"#);
        assert!(result.is_err());
    }
}
