use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Millisecond counts arrive as integers, floats, strings or null depending
/// on the endpoint. Anything unusable counts as zero so one odd song does not
/// sink the whole list.
fn lenient_millis<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_u64() {
            Some(whole) => return Ok(whole),
            None => n.as_f64(),
        },
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .map(|ms| ms.round() as u64)
        .unwrap_or(0))
}

/// The song bound to the player. Immutable once selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(alias = "audio", alias = "audioUrl")]
    pub audio_url: String,
    #[serde(default, alias = "poster", alias = "posterUrl")]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArtistRef {
    #[serde(default, alias = "artistId", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AlbumRef {
    #[serde(default, alias = "albumId", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A song as returned by the search, playlist and trending endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SongRecord {
    #[serde(default, alias = "songId", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "audio", alias = "audioUrl")]
    pub audio_url: Option<String>,
    /// Length in milliseconds.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub duration: u64,
    #[serde(default, alias = "createdAt", alias = "releaseDate")]
    pub created_at: Option<String>,
}

impl SongRecord {
    pub fn main_artist_name(&self) -> &str {
        self.artists
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown artist")
    }

    /// Song artwork, falling back to the album cover.
    pub fn poster(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.album.as_ref().and_then(|a| a.image.as_deref()))
            .filter(|s| !s.is_empty())
    }

    pub fn album_title(&self) -> &str {
        self.album.as_ref().map(|a| a.title.as_str()).unwrap_or("")
    }

    /// Project into a playable track. Records without audio are not playable.
    pub fn to_track(&self) -> Option<Track> {
        let audio_url = self.audio_url.clone().filter(|url| !url.trim().is_empty())?;
        Some(Track {
            id: self.id.clone(),
            title: self.title.clone(),
            artist: self.main_artist_name().to_string(),
            audio_url,
            poster_url: self.poster().map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Playlist {
    #[serde(default, alias = "playlistId", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub songs: Vec<SongRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Notification {
    #[serde(default, alias = "notificationId", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "message")]
    pub content: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "isRead")]
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(alias = "genreId")]
    pub genre_id: String,
    pub name: String,
}

/// One member of a listen-together room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomParticipant {
    pub username: String,
    #[serde(default, rename = "host", alias = "isHost")]
    pub is_host: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn track_accepts_wire_aliases() {
        let track: Track = serde_json::from_value(json!({
            "id": "t1",
            "title": "Song",
            "artist": "Someone",
            "audio": "https://cdn/a.mp3",
            "poster": "https://cdn/a.jpg"
        }))
        .unwrap();
        assert_eq!(track.audio_url, "https://cdn/a.mp3");
        assert_eq!(track.poster_url.as_deref(), Some("https://cdn/a.jpg"));
    }

    #[test]
    fn song_record_projects_to_track() {
        let record: SongRecord = serde_json::from_value(json!({
            "songId": "s9",
            "title": "Night Drive",
            "artists": [{ "name": "Lead" }, { "name": "Feature" }],
            "album": { "title": "Roads", "image": "https://cdn/album.jpg" },
            "audio": "https://cdn/s9.mp3",
            "duration": 183000
        }))
        .unwrap();

        let track = record.to_track().unwrap();
        assert_eq!(track.id, "s9");
        assert_eq!(track.artist, "Lead");
        assert_eq!(track.poster_url.as_deref(), Some("https://cdn/album.jpg"));
        assert_eq!(record.album_title(), "Roads");
    }

    #[test]
    fn odd_durations_do_not_sink_the_list() {
        let songs: Vec<SongRecord> = serde_json::from_value(json!([
            { "title": "Null", "duration": null },
            { "title": "Float", "duration": 183000.6 },
            { "title": "Text", "duration": "61000" },
            { "title": "Negative", "duration": -5 },
            { "title": "Missing" }
        ]))
        .unwrap();
        let durations: Vec<u64> = songs.iter().map(|s| s.duration).collect();
        assert_eq!(durations, vec![0, 183001, 61000, 0, 0]);
    }

    #[test]
    fn song_without_audio_is_not_playable() {
        let record = SongRecord {
            id: "x".into(),
            title: "Silent".into(),
            ..Default::default()
        };
        assert!(record.to_track().is_none());
        assert_eq!(record.main_artist_name(), "Unknown artist");
    }

    #[test]
    fn participant_host_flag_from_either_field() {
        let a: RoomParticipant =
            serde_json::from_value(json!({ "username": "ana", "host": true })).unwrap();
        let b: RoomParticipant =
            serde_json::from_value(json!({ "username": "bo", "isHost": true })).unwrap();
        let c: RoomParticipant = serde_json::from_value(json!({ "username": "cy" })).unwrap();
        assert!(a.is_host);
        assert!(b.is_host);
        assert!(!c.is_host);
    }

    #[test]
    fn notification_tolerates_sparse_payloads() {
        let n: Notification =
            serde_json::from_value(json!({ "message": "Payment received" })).unwrap();
        assert_eq!(n.content.as_deref(), Some("Payment received"));
        assert!(!n.is_read);
    }
}
