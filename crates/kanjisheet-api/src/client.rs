use std::time::Duration;

use kanjisheet_config::api::ApiConfig;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::model::{KanjiEntry, WordEntry};
use crate::{ClientError, KanjiLookup, LookupError};

/// kanjiapi.dev client
#[derive(Clone)]
pub struct KanjiApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl KanjiApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("kanjisheet/", env!("CARGO_PKG_VERSION")));

        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }

        let base_url = parse_base_url(&config.base_url)?;

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    /// Client with default settings against another API root
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// `{base}/{resource}/{key}` with `key` as one encoded segment
    fn endpoint(&self, resource: &str, key: &str) -> Url {
        let mut url = self.base_url.clone();
        // base_url is checked to be a base in `parse_base_url`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource).push(key);
        }
        url
    }

    async fn get<T>(&self, resource: &str, kanji: &str) -> Result<T, LookupError>
    where
        T: DeserializeOwned,
    {
        if kanji.is_empty() {
            return Err(LookupError::EmptyKey);
        }

        let url = self.endpoint(resource, kanji);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::LookupFailed {
                kanji: kanji.to_string(),
                status,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                LookupError::InvalidResponse {
                    kanji: kanji.to_string(),
                    source: e,
                }
            } else {
                LookupError::NetworkError(e)
            }
        })
    }
}

#[async_trait::async_trait]
impl KanjiLookup for KanjiApiClient {
    async fn lookup_kanji(&self, kanji: &str) -> Result<KanjiEntry, LookupError> {
        self.get("kanji", kanji).await
    }

    async fn lookup_words(&self, kanji: &str) -> Result<Vec<WordEntry>, LookupError> {
        self.get("words", kanji).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim()).map_err(|e| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http(s) URL".to_string(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn mock_client(server: &MockServer) -> KanjiApiClient {
        KanjiApiClient::with_base_url(&server.url("/v1")).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_key() {
        let client = KanjiApiClient::with_base_url("https://kanjiapi.dev/v1").unwrap();

        assert_eq!(
            client.endpoint("kanji", "木").as_str(),
            "https://kanjiapi.dev/v1/kanji/%E6%9C%A8"
        );
        assert_eq!(
            client.endpoint("words", "a/b").as_str(),
            "https://kanjiapi.dev/v1/words/a%2Fb"
        );
    }

    #[test]
    fn test_endpoint_trailing_slash_base() {
        let client = KanjiApiClient::with_base_url("http://localhost:8080/v1/").unwrap();
        assert_eq!(
            client.endpoint("kanji", "x").as_str(),
            "http://localhost:8080/v1/kanji/x"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            KanjiApiClient::with_base_url("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            KanjiApiClient::with_base_url("mailto:someone@example.com"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            KanjiApiClient::with_base_url("kanjiapi.dev/v1"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            KanjiApiClient::with_base_url("ftp://kanjiapi.dev/v1"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_kanji_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path_includes("/v1/kanji/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "kanji": "木",
                        "meanings": ["tree"],
                        "on_readings": ["ボク", "モク"],
                        "kun_readings": ["き"],
                        "stroke_count": 4
                    }));
            })
            .await;

        let entry = mock_client(&server).lookup_kanji("木").await.unwrap();

        mock.assert_async().await;
        assert_eq!(entry.meanings, vec!["tree"]);
        assert_eq!(entry.on_readings, vec!["ボク", "モク"]);
        assert_eq!(entry.kun_readings, vec!["き"]);
    }

    #[tokio::test]
    async fn test_lookup_kanji_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_includes("/v1/kanji/");
                then.status(404).body("Not Found");
            })
            .await;

        let err = mock_client(&server).lookup_kanji("x").await.unwrap_err();

        match &err {
            LookupError::LookupFailed { kanji, status } => {
                assert_eq!(kanji, "x");
                assert_eq!(status.as_u16(), 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    }

    #[tokio::test]
    async fn test_lookup_kanji_missing_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_includes("/v1/kanji/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "meanings": ["tree"] }));
            })
            .await;

        let err = mock_client(&server).lookup_kanji("木").await.unwrap_err();
        assert!(
            matches!(err, LookupError::InvalidResponse { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_lookup_kanji_connection_refused() {
        // Nothing listens on port 1
        let client = KanjiApiClient::with_base_url("http://127.0.0.1:1/v1").unwrap();

        let err = client.lookup_kanji("木").await.unwrap_err();
        assert!(
            matches!(err, LookupError::NetworkError(_)),
            "unexpected error: {err:?}"
        );
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_lookup_kanji_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_includes("/v1/kanji/");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({
                        "meanings": [],
                        "on_readings": [],
                        "kun_readings": []
                    }));
            })
            .await;

        let client = KanjiApiClient::new(&ApiConfig {
            base_url: server.url("/v1"),
            timeout_seconds: 1,
            ..ApiConfig::default()
        })
        .unwrap();

        match client.lookup_kanji("木").await {
            Err(LookupError::NetworkError(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_key_skips_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let err = mock_client(&server).lookup_kanji("").await.unwrap_err();

        assert!(matches!(err, LookupError::EmptyKey));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_lookup_words() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path_includes("/v1/words/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([
                        {
                            "variants": [
                                { "written": "木", "pronounced": "き", "priorities": ["ichi1"] }
                            ],
                            "meanings": [ { "glosses": ["tree", "shrub"] } ]
                        },
                        {
                            "variants": [ { "written": "木曜", "pronounced": "もくよう", "priorities": [] } ],
                            "meanings": [ { "glosses": ["Thursday"] } ]
                        }
                    ]));
            })
            .await;

        let words = mock_client(&server).lookup_words("木").await.unwrap();

        mock.assert_async().await;
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].variants[0].written, "木");
        assert_eq!(words[1].meanings[0].glosses, vec!["Thursday"]);
    }
}
