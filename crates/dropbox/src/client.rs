//! Dropbox client implementation
//!
//! Wraps a reqwest client carrying the bearer token and implements the
//! RemoteStore trait from dbx-core against the Dropbox API v2 endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use dbx_core::{
    Error, FileEntry, FolderEntry, Profile, RemoteEntry, RemotePath, RemoteStore, Result,
};

use crate::error::{from_status, from_transport};
use crate::wire::{
    CreateFolderArg, CreateFolderResult, FileMetadata, ListFolderResult, Metadata, PathArg,
    UploadArg, header_arg,
};

const API_ARG_HEADER: &str = "Dropbox-API-Arg";
const API_RESULT_HEADER: &str = "Dropbox-API-Result";

/// Dropbox client wrapper
///
/// Built once per invocation; the credential is fixed for its lifetime.
pub struct DropboxClient {
    http: reqwest::Client,
    api_url: String,
    content_url: String,
}

impl DropboxClient {
    /// Create a new client from a profile
    pub fn new(profile: &Profile) -> Result<Self> {
        profile.validate()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", profile.access_token.trim()))
            .map_err(|_| Error::Auth("access token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let timeouts = profile.timeout_config();
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("dbx/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_millis(timeouts.connect_ms))
            .timeout(Duration::from_millis(timeouts.read_ms))
            .build()
            .map_err(|e| Error::General(format!("Failed to build HTTP client: {e}")))?;

        tracing::debug!(profile = %profile.name, api = %profile.api_url, "dropbox client ready");

        Ok(Self {
            http,
            api_url: profile.api_url.trim_end_matches('/').to_string(),
            content_url: profile.content_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_endpoint(&self, route: &str) -> String {
        format!("{}/{route}", self.api_url)
    }

    fn content_endpoint(&self, route: &str) -> String {
        format!("{}/{route}", self.content_url)
    }

    /// POST a JSON argument to an RPC route and decode the JSON result
    async fn rpc<A, R>(&self, route: &str, arg: &A, path: &RemotePath) -> Result<R>
    where
        A: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        tracing::debug!(route, path = %path, "rpc request");
        let response = self
            .http
            .post(self.api_endpoint(route))
            .json(arg)
            .send()
            .await
            .map_err(|e| from_transport(e, path))?;

        let response = check(response, path).await?;
        response.json::<R>().await.map_err(|e| from_transport(e, path))
    }
}

/// Pass a successful response through, or turn the status and body into an error
async fn check(response: reqwest::Response, path: &RemotePath) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "request failed");
    Err(from_status(status.as_u16(), &body, path))
}

#[async_trait]
impl RemoteStore for DropboxClient {
    async fn list_folder(&self, path: &RemotePath) -> Result<Vec<RemoteEntry>> {
        let arg = PathArg {
            path: path.as_api_str(),
        };
        let result: ListFolderResult = self.rpc("files/list_folder", &arg, path).await?;

        if result.has_more {
            tracing::warn!(
                path = %path,
                "listing truncated by the provider; only the first page is shown"
            );
        }

        Ok(result
            .entries
            .into_iter()
            .filter_map(Metadata::into_entry)
            .collect())
    }

    async fn upload(&self, path: &RemotePath, data: Vec<u8>) -> Result<FileEntry> {
        let arg = header_arg(&UploadArg {
            path: path.as_api_str(),
            mode: "add",
            autorename: false,
            mute: false,
        })?;

        tracing::debug!(path = %path, bytes = data.len(), "upload request");
        let response = self
            .http
            .post(self.content_endpoint("files/upload"))
            .header(API_ARG_HEADER, arg)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await
            .map_err(|e| from_transport(e, path))?;

        let response = check(response, path).await?;
        let meta: FileMetadata = response.json().await.map_err(|e| from_transport(e, path))?;
        Ok(meta.into())
    }

    async fn download(&self, path: &RemotePath) -> Result<(FileEntry, Vec<u8>)> {
        let arg = header_arg(&PathArg {
            path: path.as_api_str(),
        })?;

        tracing::debug!(path = %path, "download request");
        let response = self
            .http
            .post(self.content_endpoint("files/download"))
            .header(API_ARG_HEADER, arg)
            .send()
            .await
            .map_err(|e| from_transport(e, path))?;

        let response = check(response, path).await?;
        let meta_raw = response
            .headers()
            .get(API_RESULT_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Api(format!("'{path}': response missing {API_RESULT_HEADER}")))?
            .to_string();
        let meta: FileMetadata = serde_json::from_str(&meta_raw)?;

        let data = response
            .bytes()
            .await
            .map_err(|e| from_transport(e, path))?
            .to_vec();

        Ok((meta.into(), data))
    }

    async fn create_folder(&self, path: &RemotePath) -> Result<FolderEntry> {
        let arg = CreateFolderArg {
            path: path.as_api_str(),
            autorename: false,
        };
        let result: CreateFolderResult = self.rpc("files/create_folder_v2", &arg, path).await?;
        Ok(result.metadata.into())
    }
}
