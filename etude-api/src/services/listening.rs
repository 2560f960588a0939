//! Listening-history service client (recently played tracks)
//!
//! The provider's recommendation API is no longer publicly available, so
//! the recently-played recommender samples from the user's listening
//! history instead.

use serde::{Deserialize, Serialize};

use etude_common::{Error, Result};

/// Default number of recently played tracks fetched upstream
pub const DEFAULT_FETCH_LIMIT: i64 = 10;
/// Default number of tracks recommended
pub const DEFAULT_RECOMMEND_COUNT: i64 = 2;

/// Track recommended from listening history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedResponse {
    items: Vec<RecentlyPlayedItem>,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedItem {
    track: Track,
}

#[derive(Debug, Deserialize)]
struct Track {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<TrackArtist>,
    album: TrackAlbum,
}

#[derive(Debug, Deserialize)]
struct TrackArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TrackAlbum {
    name: String,
    #[serde(default)]
    images: Vec<AlbumImage>,
}

#[derive(Debug, Deserialize)]
struct AlbumImage {
    url: String,
}

/// Fetch up to `limit` recently played tracks for the given access token
pub async fn recently_played(
    http: &reqwest::Client,
    listening_url: &str,
    access_token: &str,
    limit: i64,
) -> Result<Vec<RecommendedTrack>> {
    let url = format!(
        "{}/v1/me/player/recently-played?limit={}",
        listening_url.trim_end_matches('/'),
        limit
    );

    let response = http
        .get(&url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("listening service request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream(format!(
            "listening service returned {}: {}",
            status, body
        )));
    }

    let parsed: RecentlyPlayedResponse = response
        .json()
        .await
        .map_err(|e| Error::Upstream(format!("invalid listening service response: {}", e)))?;

    Ok(parsed
        .items
        .into_iter()
        .map(|item| {
            let track = item.track;
            RecommendedTrack {
                id: track.id,
                title: track.name,
                artist: track
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                album: track.album.name,
                image_url: track
                    .album
                    .images
                    .first()
                    .map(|i| i.url.clone())
                    .unwrap_or_default(),
            }
        })
        .collect())
}
