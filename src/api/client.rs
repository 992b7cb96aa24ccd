use crate::api::models::*;
use crate::config::AppConfig;
use crate::diagnostics::{log_perf, Stopwatch};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    /// True when the server rejected the call with exactly this message.
    pub fn is_rejection(&self, expected: &str) -> bool {
        matches!(self, ApiError::Rejected { message, .. } if message == expected)
    }
}

/// Where the colour service lives. It is served next to the web page, so a
/// relative endpoint resolves against the page origin when there is one and
/// against the API base otherwise.
pub fn resolve_color_endpoint(endpoint: &str, api_base: &str, page_origin: Option<&str>) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }
    let base = page_origin
        .map(|origin| origin.trim_end_matches('/'))
        .filter(|origin| !origin.is_empty() && *origin != "null")
        .unwrap_or(api_base);
    format!("{}/{}", base, endpoint.trim_start_matches('/'))
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Map a raw HTTP exchange onto the `{success, data|error}` contract.
/// A 2xx body is the data; anything else is a rejection carrying the
/// server's `error` or `message` field.
pub fn interpret_response(status: u16, body: &str) -> ApiResult<Value> {
    let parsed = if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(body)
    };

    if (200..300).contains(&status) {
        return parsed.map_err(|e| ApiError::Decode(e.to_string()));
    }

    let message = parsed
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| format!("HTTP {status}"));
    Err(ApiError::Rejected { status, message })
}

/// Decode the value at a JSON pointer inside a response body.
fn field<T: DeserializeOwned>(data: &Value, pointer: &'static str) -> ApiResult<T> {
    let raw = data
        .pointer(pointer)
        .ok_or(ApiError::MissingField(pointer))?;
    serde_json::from_value(raw.clone()).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Search hits come back either bare or wrapped as `{ "item": song }`.
fn search_hit(hit: Value) -> ApiResult<SongRecord> {
    let song = match hit {
        Value::Object(mut map) if map.get("item").is_some_and(Value::is_object) => {
            map.remove("item").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(song).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    color_endpoint: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_endpoint.clone(),
            color_endpoint: config.color_endpoint.clone(),
        }
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Generic request used by every endpoint helper.
    pub async fn fetch_api_data(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> ApiResult<Value> {
        let started_at = Stopwatch::start();
        let url = self.resolve(path);
        let mut request = HTTP_CLIENT.request(method.as_reqwest(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log_perf("api", &started_at, &format!("{method:?} {path} -> {status}"));

        interpret_response(status, &text)
    }

    pub async fn refresh_token(&self, token: &str) -> ApiResult<String> {
        let body = json!({ "token": token });
        let data = self
            .fetch_api_data("/api/auth/refresh", Method::Post, Some(&body), None, &[])
            .await?;
        let fresh: String = field(&data, "/accessToken")?;
        if fresh.is_empty() {
            return Err(ApiError::MissingField("/accessToken"));
        }
        Ok(fresh)
    }

    pub async fn fetch_notifications(&self, token: &str) -> ApiResult<Vec<Notification>> {
        let data = self
            .fetch_api_data("/api/user/notification", Method::Get, None, Some(token), &[])
            .await?;
        field(&data, "/notifications")
    }

    pub async fn playlist_detail(&self, id: &str, token: Option<&str>) -> ApiResult<Playlist> {
        let path = format!("/api/user/playlist/detail/{}", urlencoding::encode(id));
        let data = self
            .fetch_api_data(&path, Method::Get, None, token, &[])
            .await?;
        field(&data, "/playlist")
    }

    pub async fn search_songs(&self, term: &str) -> ApiResult<Vec<SongRecord>> {
        let query = [("query", term.to_string()), ("page", "1".to_string())];
        let data = self
            .fetch_api_data("/api/songs/search", Method::Get, None, None, &query)
            .await?;
        let hits: Vec<Value> = field(&data, "/songs")?;
        hits.into_iter().map(search_hit).collect()
    }

    pub async fn create_genre(&self, name: &str, token: Option<&str>) -> ApiResult<Genre> {
        let body = json!({ "name": name });
        let data = self
            .fetch_api_data("/api/admin/create/genre", Method::Post, Some(&body), token, &[])
            .await?;
        let genre_id = data
            .pointer("/genreId")
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .ok_or(ApiError::MissingField("/genreId"))?;
        Ok(Genre {
            genre_id,
            name: name.to_string(),
        })
    }

    /// Dominant colour of an image, as computed by the colour service.
    pub async fn dominant_color(&self, image_url: &str) -> ApiResult<String> {
        let endpoint = resolve_color_endpoint(
            &self.color_endpoint,
            &self.base_url,
            page_origin().as_deref(),
        );
        let path = format!("{endpoint}?imageUrl={}", urlencoding::encode(image_url));
        let data = self
            .fetch_api_data(&path, Method::Get, None, None, &[])
            .await?;
        field(&data, "/dominantColor")
    }
}
