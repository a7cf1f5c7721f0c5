use async_trait::async_trait;
use fq_core::{BlobStore, Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, IF_NONE_MATCH};
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

pub mod auth;
pub mod connection;

pub use connection::{Credential, StorageAccount};

pub const API_VERSION: &str = "2021-08-06";
pub const JSONL_CONTENT_TYPE: &str = "application/x-ndjson";

const ERROR_CODE_HEADER: &str = "x-ms-error-code";
const CONTAINER_ALREADY_EXISTS: &str = "ContainerAlreadyExists";

/// Azure Blob Storage over its REST API.
pub struct AzureBlobStore {
    client: reqwest::Client,
    account: StorageAccount,
}

impl AzureBlobStore {
    pub fn new(account: StorageAccount) -> Self {
        Self {
            client: reqwest::Client::new(),
            account,
        }
    }

    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        Ok(Self::new(StorageAccount::from_connection_string(connection_string)?))
    }

    fn resource_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.account.blob_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("Cannot append to {}", self.account.blob_endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn container_url(&self, container: &str) -> Result<Url> {
        let mut url = self.resource_url([container])?;
        url.query_pairs_mut().append_pair("restype", "container");
        Ok(url)
    }

    pub fn blob_url(&self, container: &str, blob: &str) -> Result<Url> {
        self.resource_url(std::iter::once(container).chain(blob.split('/')))
    }

    /// Adds date, version and credentials. SAS tokens go on the query string;
    /// Shared Key signs the final headers.
    fn authorize(&self, method: &Method, mut url: Url, mut headers: HeaderMap) -> Result<(Url, HeaderMap)> {
        let date = chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        headers.insert(HeaderName::from_static("x-ms-date"), header_value(&date)?);
        headers.insert(HeaderName::from_static("x-ms-version"), HeaderValue::from_static(API_VERSION));

        match &self.account.credential {
            Credential::SharedKey(key) => {
                let value = auth::authorization(&self.account.name, key, method, &url, &headers)?;
                headers.insert(AUTHORIZATION, header_value(&value)?);
            }
            Credential::Sas(sas) => {
                let query = match url.query() {
                    Some(existing) if !existing.is_empty() => format!("{}&{}", existing, sas),
                    _ => sas.clone(),
                };
                url.set_query(Some(&query));
            }
        }
        Ok((url, headers))
    }

    async fn put(&self, url: Url, mut headers: HeaderMap, body: Vec<u8>, resource: &str) -> Result<()> {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        let (url, headers) = self.authorize(&Method::PUT, url, headers)?;
        debug!("PUT {}{}", url.origin().ascii_serialization(), url.path());

        let response = self.client.put(url).headers(headers).body(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let code = response
            .headers()
            .get(ERROR_CODE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();
        Err(service_error(status, code.as_deref(), resource, &body))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Storage(format!("Invalid header value: {}", e)))
}

/// Maps a failed response to an error, keyed on the service error code.
pub fn service_error(status: StatusCode, code: Option<&str>, resource: &str, body: &str) -> Error {
    match code {
        Some(CONTAINER_ALREADY_EXISTS) => Error::ContainerAlreadyExists(resource.to_string()),
        Some(code) => Error::Storage(format!("{} failed with {} ({}): {}", resource, status, code, body.trim())),
        None => Error::Storage(format!("{} failed with {}: {}", resource, status, body.trim())),
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn create_container(&self, container: &str) -> Result<()> {
        let url = self.container_url(container)?;
        self.put(url, HeaderMap::new(), Vec::new(), container).await
    }

    async fn upload_blob(&self, container: &str, name: &str, data: Vec<u8>, overwrite: bool) -> Result<()> {
        let url = self.blob_url(container, name)?;
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-ms-blob-type"), HeaderValue::from_static("BlockBlob"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSONL_CONTENT_TYPE));
        if !overwrite {
            headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
        }
        self.put(url, headers, data, &format!("{}/{}", container, name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(connection_string: &str) -> AzureBlobStore {
        AzureBlobStore::from_connection_string(connection_string).unwrap()
    }

    #[test]
    fn test_urls_on_account_endpoint() {
        let store = store("AccountName=fique;AccountKey=c2VjcmV0LWtleQ==");
        assert_eq!(
            store.container_url("blog-data").unwrap().as_str(),
            "https://fique.blob.core.windows.net/blog-data?restype=container"
        );
        assert_eq!(
            store.blob_url("blog-data", "fique_articles.jsonl").unwrap().as_str(),
            "https://fique.blob.core.windows.net/blog-data/fique_articles.jsonl"
        );
    }

    #[test]
    fn test_urls_on_path_style_endpoint() {
        let store = store("UseDevelopmentStorage=true");
        assert_eq!(
            store.blob_url("blog-data", "2026/10/out file.jsonl").unwrap().as_str(),
            "http://127.0.0.1:10000/devstoreaccount1/blog-data/2026/10/out%20file.jsonl"
        );
    }

    #[test]
    fn test_shared_key_sets_authorization() {
        let store = store("AccountName=fique;AccountKey=c2VjcmV0LWtleQ==");
        let url = store.container_url("blog-data").unwrap();
        let (url, headers) = store.authorize(&Method::PUT, url, HeaderMap::new()).unwrap();
        assert_eq!(url.query(), Some("restype=container"));
        assert!(headers[AUTHORIZATION].to_str().unwrap().starts_with("SharedKey fique:"));
        assert_eq!(headers["x-ms-version"], API_VERSION);
        assert!(headers["x-ms-date"].to_str().unwrap().ends_with(" GMT"));
    }

    #[test]
    fn test_sas_goes_on_query_string() {
        let store = store("BlobEndpoint=https://fique.blob.core.windows.net;SharedAccessSignature=sv=2021-08-06&sig=a%2Bb");
        let url = store.container_url("blog-data").unwrap();
        let (url, headers) = store.authorize(&Method::PUT, url, HeaderMap::new()).unwrap();
        assert_eq!(url.query(), Some("restype=container&sv=2021-08-06&sig=a%2Bb"));
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_service_error_codes() {
        let err = service_error(StatusCode::CONFLICT, Some("ContainerAlreadyExists"), "blog-data", "");
        assert!(matches!(err, Error::ContainerAlreadyExists(name) if name == "blog-data"));

        let err = service_error(StatusCode::FORBIDDEN, Some("AuthorizationFailure"), "blog-data", "<Error/>");
        assert!(matches!(err, Error::Storage(msg) if msg.contains("AuthorizationFailure")));

        let err = service_error(StatusCode::INTERNAL_SERVER_ERROR, None, "blog-data", "");
        assert!(matches!(err, Error::Storage(_)));
    }
}
