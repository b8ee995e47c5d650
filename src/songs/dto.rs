use serde::Deserialize;

/// Body for create and full-replace update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub image_url: Option<String>,
    pub file_url: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub release_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_accepts_camel_case_fields() {
        let body = r#"{"title":"Shape of You","artist":"Ed Sheeran",
                       "imageUrl":"https://img","fileUrl":"https://mp3",
                       "genre":"Pop","duration":235,"releaseYear":2017}"#;
        let payload: SongPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.title, "Shape of You");
        assert_eq!(payload.image_url.as_deref(), Some("https://img"));
        assert_eq!(payload.release_year, Some(2017));
        assert_eq!(payload.album, None);
    }
}
