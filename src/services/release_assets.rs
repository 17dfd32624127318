use crate::domain::models::{Release, ReleaseAsset};
use crate::errors::ReleaseError;
use regex::Regex;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

const GITHUB_JSON: &str = "application/vnd.github+json";
const OCTET_STREAM: &str = "application/octet-stream";

pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal HTTP surface needed to talk to the release host.
pub trait ReleaseApi {
    fn get(&self, url: &str, accept: &str) -> Result<HttpReply, ReleaseError>;
}

pub struct GithubClient {
    client: reqwest::blocking::Client,
    token: Option<SecretString>,
}

impl GithubClient {
    /// Requests block until the server finishes; large assets may take minutes.
    pub fn new(token: Option<SecretString>) -> anyhow::Result<Self> {
        Self::with_timeout(token, None)
    }

    pub fn with_timeout(
        token: Option<SecretString>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("relsign/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, token })
    }
}

impl ReleaseApi for GithubClient {
    fn get(&self, url: &str, accept: &str) -> Result<HttpReply, ReleaseError> {
        let mut req = self.client.get(url).header(ACCEPT, accept);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.expose_secret());
        }
        let resp = req
            .send()
            .map_err(|e| ReleaseError::Network(format!("GET {}: {}", url, e)))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| ReleaseError::Network(format!("reading {}: {}", url, e)))?
            .to_vec();
        Ok(HttpReply { status, body })
    }
}

/// GET with one fixed-delay retry. Anything other than a 200 (including a
/// transport failure) counts as a failed attempt.
pub fn get_with_retry(
    api: &dyn ReleaseApi,
    url: &str,
    accept: &str,
    retry_delay: Duration,
) -> Result<Vec<u8>, ReleaseError> {
    let mut last_failure = String::new();
    for attempt in 1..=2 {
        match api.get(url, accept) {
            Ok(reply) if reply.status == 200 => return Ok(reply.body),
            Ok(reply) => last_failure = format!("HTTP {}", reply.status),
            Err(e) => last_failure = e.to_string(),
        }
        if attempt == 1 {
            tracing::warn!(
                "GET {} failed ({}), retrying in {}s",
                url,
                last_failure,
                retry_delay.as_secs()
            );
            std::thread::sleep(retry_delay);
        }
    }
    Err(ReleaseError::Network(format!(
        "GET {} failed after retry: {}",
        url, last_failure
    )))
}

pub fn release_url(api_base: &str, repo: &str, tag: Option<&str>) -> String {
    let base = api_base.trim_end_matches('/');
    match tag {
        Some(t) => format!("{}/repos/{}/releases/tags/{}", base, repo, t),
        None => format!("{}/repos/{}/releases/latest", base, repo),
    }
}

pub fn find_asset<'a>(release: &'a Release, pattern: &Regex) -> Result<&'a ReleaseAsset, ReleaseError> {
    release
        .assets
        .iter()
        .find(|a| pattern.is_match(&a.name))
        .ok_or_else(|| {
            ReleaseError::Discovery(format!(
                "release {} has no asset matching {}",
                release.tag_name,
                pattern.as_str()
            ))
        })
}

pub struct FetchRequest {
    pub api_base: String,
    pub repo: String,
    pub tag: Option<String>,
    pub pattern: Regex,
    pub retry_delay: Duration,
}

pub fn fetch_release_asset(
    api: &dyn ReleaseApi,
    request: &FetchRequest,
) -> Result<(Release, ReleaseAsset), ReleaseError> {
    let url = release_url(&request.api_base, &request.repo, request.tag.as_deref());
    tracing::info!("fetching release document {}", url);
    let body = get_with_retry(api, &url, GITHUB_JSON, request.retry_delay)?;
    let release: Release = serde_json::from_slice(&body)
        .map_err(|e| ReleaseError::Network(format!("unexpected release document from {}: {}", url, e)))?;
    let asset = find_asset(&release, &request.pattern)?.clone();
    Ok((release, asset))
}

pub struct Download {
    pub bytes: u64,
    pub sha256: String,
}

/// Downloads `asset` to `dest` with the same single-retry policy.
pub fn download_asset(
    api: &dyn ReleaseApi,
    asset: &ReleaseAsset,
    dest: &Path,
    retry_delay: Duration,
) -> anyhow::Result<Download> {
    let body = get_with_retry(api, &asset.browser_download_url, OCTET_STREAM, retry_delay)?;
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(dest, &body)?;
    Ok(Download {
        bytes: body.len() as u64,
        sha256: hex::encode(Sha256::digest(&body)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct ScriptedApi {
        replies: RefCell<VecDeque<HttpReply>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedApi {
        fn new(replies: Vec<(u16, &str)>) -> Self {
            Self {
                replies: RefCell::new(
                    replies
                        .into_iter()
                        .map(|(status, body)| HttpReply {
                            status,
                            body: body.as_bytes().to_vec(),
                        })
                        .collect(),
                ),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ReleaseApi for ScriptedApi {
        fn get(&self, url: &str, _accept: &str) -> Result<HttpReply, ReleaseError> {
            self.calls.borrow_mut().push(url.to_string());
            self.replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ReleaseError::Network("no scripted reply".to_string()))
        }
    }

    const RELEASE_JSON: &str = r#"{
        "tag_name": "v2.6.0",
        "assets": [
            {"name": "gcm-linux_amd64.2.6.0.tar.gz", "browser_download_url": "https://dl/tar", "size": 10},
            {"name": "gcm-linux_amd64.2.6.0.deb", "browser_download_url": "https://dl/deb", "size": 20}
        ]
    }"#;

    fn request(tag: Option<&str>) -> FetchRequest {
        FetchRequest {
            api_base: "https://api.example/".to_string(),
            repo: "owner/tool".to_string(),
            tag: tag.map(str::to_string),
            pattern: Regex::new(r"\.deb$").unwrap(),
            retry_delay: Duration::ZERO,
        }
    }

    #[test]
    fn first_failure_then_success_yields_asset() {
        let api = ScriptedApi::new(vec![(503, ""), (200, RELEASE_JSON)]);
        let (release, asset) = fetch_release_asset(&api, &request(Some("v2.6.0"))).unwrap();
        assert_eq!(release.tag_name, "v2.6.0");
        assert_eq!(asset.browser_download_url, "https://dl/deb");
        assert_eq!(api.calls.borrow().len(), 2);
    }

    #[test]
    fn two_failures_are_terminal() {
        let api = ScriptedApi::new(vec![(500, ""), (404, ""), (200, RELEASE_JSON)]);
        let err = fetch_release_asset(&api, &request(None)).err().unwrap();
        assert!(matches!(err, ReleaseError::Network(_)));
        assert!(err.to_string().contains("HTTP 404"));
        assert_eq!(api.calls.borrow().len(), 2);
    }

    #[test]
    fn no_matching_asset_is_discovery_error() {
        let api = ScriptedApi::new(vec![(200, r#"{"tag_name":"v1","assets":[]}"#)]);
        let err = fetch_release_asset(&api, &request(None)).err().unwrap();
        assert!(matches!(err, ReleaseError::Discovery(_)));
    }

    #[test]
    fn urls_for_tag_and_latest() {
        assert_eq!(
            release_url("https://api.example/", "o/r", Some("v1")),
            "https://api.example/repos/o/r/releases/tags/v1"
        );
        assert_eq!(
            release_url("https://api.example", "o/r", None),
            "https://api.example/repos/o/r/releases/latest"
        );
    }

    #[test]
    fn download_writes_file_and_digest() {
        let tmp = tempfile::TempDir::new().unwrap();
        let api = ScriptedApi::new(vec![(200, "abc")]);
        let asset = ReleaseAsset {
            name: "a.deb".to_string(),
            browser_download_url: "https://dl/a".to_string(),
            size: 3,
        };
        let dest = tmp.path().join("out/a.deb");
        let d = download_asset(&api, &asset, &dest, Duration::ZERO).unwrap();
        assert_eq!(d.bytes, 3);
        assert_eq!(
            d.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(std::fs::read(dest).unwrap(), b"abc");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn github_client_retries_once_against_http_server() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/tool/releases/tags/v2.6.0"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/tool/releases/tags/v2.6.0"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RELEASE_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let mut req = request(Some("v2.6.0"));
        req.api_base = server.uri();
        let asset = tokio::task::spawn_blocking(move || {
            let client = GithubClient::new(Some(SecretString::from("tok".to_string()))).unwrap();
            fetch_release_asset(&client, &req).map(|(_, a)| a)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(asset.name, "gcm-linux_amd64.2.6.0.deb");
    }

    async fn slow_download_server(delay: Duration) -> wiremock::MockServer {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dl/a.deb"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"abc".to_vec())
                    .set_delay(delay),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn default_client_waits_past_thirty_seconds() {
        let server = slow_download_server(Duration::from_secs(32)).await;
        let url = format!("{}/dl/a.deb", server.uri());
        let reply = tokio::task::spawn_blocking(move || {
            GithubClient::new(None).unwrap().get(&url, OCTET_STREAM)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, b"abc");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn explicit_timeout_cuts_slow_reply() {
        let server = slow_download_server(Duration::from_secs(3)).await;
        let url = format!("{}/dl/a.deb", server.uri());
        let result = tokio::task::spawn_blocking(move || {
            GithubClient::with_timeout(None, Some(Duration::from_millis(200)))
                .unwrap()
                .get(&url, OCTET_STREAM)
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(ReleaseError::Network(_))));
    }
}
