//! Search result projections and the results page state

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::format::{format_clock_duration, parse_release_date};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A podcast as shown on a card
#[derive(Clone, Debug, PartialEq)]
pub struct Podcast {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// An episode as shown on a card
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub podcast_name: String,
    pub image_url: String,
    /// `m:ss`, or `--:--` when unknown
    pub duration: String,
    pub description: String,
    pub track_time_millis: Option<u64>,
    pub release_date: Option<DateTime<Utc>>,
}

/// Body of `GET /track/search/{query}`. Both arrays are optional and may be `null`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub podcasts: Option<Vec<Value>>,
    #[serde(default, rename = "podcastEpisodes")]
    pub podcast_episodes: Option<Vec<Value>>,
}

/// Normalized result of one search
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    pub podcasts: Vec<Podcast>,
    pub episodes: Vec<Episode>,
}

impl SearchResults {
    pub fn from_raw(raw: RawSearchResponse) -> Self {
        let podcasts = raw
            .podcasts
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, record)| podcast_from_record(index, record))
            .collect();
        let episodes = raw
            .podcast_episodes
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, record)| episode_from_record(index, record))
            .collect();

        Self { podcasts, episodes }
    }

    pub fn is_empty(&self) -> bool {
        self.podcasts.is_empty() && self.episodes.is_empty()
    }
}

fn podcast_from_record(index: usize, record: &Value) -> Podcast {
    let fields = record.as_object();
    Podcast {
        id: first_present(fields, &["collectionId", "trackId", "id"])
            .unwrap_or_else(|| format!("podcast-{}", index)),
        title: first_present(fields, &["collectionName", "artistName", "trackName"])
            .unwrap_or_else(|| "Untitled".to_string()),
        author: first_present(fields, &["artistName"]).unwrap_or_else(|| "Unknown".to_string()),
        image_url: first_present(fields, &["artworkUrl600"])
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
    }
}

fn episode_from_record(index: usize, record: &Value) -> Episode {
    let fields = record.as_object();
    let track_time_millis = fields
        .and_then(|f| f.get("trackTimeMillis"))
        .and_then(millis_from_value);

    Episode {
        id: first_present(fields, &["trackId", "collectionId", "id"])
            .unwrap_or_else(|| format!("episode-{}", index)),
        title: first_present(fields, &["trackName"]).unwrap_or_else(|| "Untitled".to_string()),
        podcast_name: first_present(fields, &["collectionName", "artistName"])
            .unwrap_or_else(|| "Unknown".to_string()),
        image_url: first_present(fields, &["artworkUrl600"])
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        duration: format_clock_duration(track_time_millis),
        description: first_present(fields, &["description", "longDescription", "summary"])
            .unwrap_or_default(),
        track_time_millis,
        release_date: first_present(fields, &["releaseDate"])
            .as_deref()
            .and_then(parse_release_date),
    }
}

/// First field in `keys` holding a usable scalar. Missing, `null`, empty
/// strings, zero and booleans are skipped.
fn first_present(fields: Option<&Map<String, Value>>, keys: &[&str]) -> Option<String> {
    let fields = fields?;
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let is_zero = n.as_f64().is_some_and(|f| f == 0.0);
            (!is_zero).then(|| n.to_string())
        }
        _ => None,
    }
}

fn millis_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .filter(|ms| *ms > 0)
}

/// State of the results page
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub results: SearchResults,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> SearchResults {
        let raw: RawSearchResponse = serde_json::from_value(body).unwrap();
        SearchResults::from_raw(raw)
    }

    #[test]
    fn podcast_title_falls_back_to_track_name() {
        let results = parse(json!({
            "podcasts": [{ "trackId": "1", "trackName": "Talk Show" }]
        }));

        assert_eq!(
            results.podcasts,
            vec![Podcast {
                id: "1".into(),
                title: "Talk Show".into(),
                author: "Unknown".into(),
                image_url: PLACEHOLDER_IMAGE.into(),
            }]
        );
        assert!(results.episodes.is_empty());
    }

    #[test]
    fn podcast_prefers_collection_fields() {
        let results = parse(json!({
            "podcasts": [{
                "collectionId": 917918570,
                "trackId": 1,
                "collectionName": "Serial",
                "artistName": "Serial Productions",
                "trackName": "Serial (track)",
                "artworkUrl600": "https://is1-ssl.mzstatic.com/serial.jpg"
            }]
        }));

        let podcast = &results.podcasts[0];
        assert_eq!(podcast.id, "917918570");
        assert_eq!(podcast.title, "Serial");
        assert_eq!(podcast.author, "Serial Productions");
        assert_eq!(podcast.image_url, "https://is1-ssl.mzstatic.com/serial.jpg");
    }

    #[test]
    fn records_without_identity_get_positional_ids() {
        let results = parse(json!({
            "podcasts": [{}, { "collectionName": "" , "artistName": null }],
            "podcastEpisodes": [{ "id": 0 }]
        }));

        assert_eq!(results.podcasts[0].id, "podcast-0");
        assert_eq!(results.podcasts[1].id, "podcast-1");
        assert_eq!(results.podcasts[1].title, "Untitled");
        assert_eq!(results.episodes[0].id, "episode-0");
    }

    #[test]
    fn episode_projection_applies_every_fallback() {
        let results = parse(json!({
            "podcastEpisodes": [{
                "trackId": 1000650000001u64,
                "trackName": "Episode 1: The Alibi",
                "artistName": "Serial Productions",
                "trackTimeMillis": 125000,
                "longDescription": "It's Baltimore, 1999.",
                "releaseDate": "2014-10-03T07:00:00Z"
            }]
        }));

        let episode = &results.episodes[0];
        assert_eq!(episode.id, "1000650000001");
        assert_eq!(episode.podcast_name, "Serial Productions");
        assert_eq!(episode.duration, "2:05");
        assert_eq!(episode.track_time_millis, Some(125_000));
        assert_eq!(episode.description, "It's Baltimore, 1999.");
        assert_eq!(
            crate::model::format::format_release_date(episode.release_date.as_ref()),
            "Oct 3, 2014"
        );
    }

    #[test]
    fn malformed_episode_fields_degrade_to_placeholders() {
        let results = parse(json!({
            "podcastEpisodes": [{
                "trackTimeMillis": "not a number",
                "releaseDate": "soon",
                "description": ""
            }]
        }));

        let episode = &results.episodes[0];
        assert_eq!(episode.title, "Untitled");
        assert_eq!(episode.podcast_name, "Unknown");
        assert_eq!(episode.duration, "--:--");
        assert_eq!(episode.description, "");
        assert!(episode.release_date.is_none());
        assert_eq!(episode.image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn null_and_missing_arrays_are_empty() {
        assert!(parse(json!({})).is_empty());
        assert!(parse(json!({ "podcasts": null, "podcastEpisodes": null })).is_empty());
    }
}
