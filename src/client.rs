use crate::accounts::Accounts;
use crate::error::{ApiError, Form3Error};
use crate::filter::{FilterParams, encode_filter};
use crate::models::{Envelope, ErrorBody, ListEnvelope, NewResource, Resource};
use crate::page::Page;
use log::{debug, info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const CONTENT_TYPE_JSON_API: &str = "application/vnd.api+json";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub organisation_id: Option<Uuid>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            organisation_id: None,
        }
    }
}

impl ClientConfig {
    /// Read `FORM3_API_HOST`, `FORM3_API_KEY` and `FORM3_ORGANISATION_ID`,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, Form3Error> {
        let mut config = Self::default();
        if let Ok(host) = env::var("FORM3_API_HOST") {
            config.base_url = host;
        }
        config.api_key = env::var("FORM3_API_KEY").ok();
        if let Ok(raw) = env::var("FORM3_ORGANISATION_ID") {
            let id = Uuid::parse_str(raw.trim()).map_err(|_| {
                Form3Error::InvalidParameter("FORM3_ORGANISATION_ID must be a UUID")
            })?;
            config.organisation_id = Some(id);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_organisation_id(mut self, organisation_id: Uuid) -> Self {
        self.organisation_id = Some(organisation_id);
        self
    }
}

/// Handle to the remote service. Cheap to clone; clones share the
/// underlying connection pool and never mutate configuration.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    organisation_id: Option<Uuid>,
}

impl Client {
    /// Create a new client against the default base URL.
    pub fn new() -> Result<Self, Form3Error> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Form3Error> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        info!("Initialized Form3 API client for {}", base_url);
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            organisation_id: config.organisation_id,
        })
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Form3Error> {
        self.base_url = normalize_base_url(&base_url.into())?;
        info!("Updated Form3 API base URL to {}", self.base_url);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn organisation_id(&self) -> Option<Uuid> {
        self.organisation_id
    }

    /// Accounts endpoint bound to this client.
    pub fn accounts(&self) -> Accounts {
        Accounts::new(self.clone())
    }

    /// Create a resource of `kind` under `path`.
    ///
    /// The resource id is generated here. The owning organisation comes from
    /// the configuration, or is freshly generated when none was configured.
    pub async fn create<A>(
        &self,
        path: &str,
        kind: &str,
        attributes: &A,
    ) -> Result<Resource<A>, Form3Error>
    where
        A: Serialize + DeserializeOwned,
    {
        let body = Envelope {
            data: NewResource {
                kind,
                id: Uuid::new_v4(),
                organisation_id: self.organisation_id.unwrap_or_else(Uuid::new_v4),
                attributes,
            },
        };
        let bytes = serde_json::to_vec(&body).map_err(Form3Error::Encode)?;
        info!("Creating {} resource {}", kind, body.data.id);
        let request = self
            .http
            .post(self.url_for(path))
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_API)
            .body(bytes);
        let response = self.send(request).await?;
        let envelope: Envelope<Resource<A>> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Fetch the resource with `id` under `path`.
    pub async fn fetch<A>(&self, path: &str, id: Uuid) -> Result<Resource<A>, Form3Error>
    where
        A: DeserializeOwned,
    {
        let url = self.url_for(&format!("{}/{}", path.trim_end_matches('/'), id));
        debug!("Fetching resource {}", id);
        let response = self.send(self.http.get(url)).await?;
        let envelope: Envelope<Resource<A>> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Fetch one page of the collection under `path`.
    ///
    /// `page_number` is zero based.
    pub async fn list<A, F>(
        &self,
        path: &str,
        page_number: u32,
        page_size: u32,
        filter: Option<&F>,
    ) -> Result<Page<A>, Form3Error>
    where
        A: DeserializeOwned,
        F: FilterParams + ?Sized,
    {
        if page_size == 0 {
            return Err(Form3Error::InvalidParameter(
                "page_size must be a positive integer",
            ));
        }
        let link = format!(
            "{}?page[number]={}&page[size]={}{}",
            path,
            page_number,
            page_size,
            encode_filter(filter)
        );
        debug!(
            "Listing page {} (size {}) of {}",
            page_number, page_size, path
        );
        self.get_page(&link).await
    }

    /// Follow a pagination link as returned by the service.
    pub(crate) async fn get_page<A>(&self, link: &str) -> Result<Page<A>, Form3Error>
    where
        A: DeserializeOwned,
    {
        let response = self.send(self.http.get(self.url_for(link))).await?;
        let envelope: ListEnvelope<A> = decode(response).await?;
        debug!("Decoded page of {} resources", envelope.data.len());
        Ok(Page::new(self.clone(), envelope.data, envelope.links))
    }

    /// Delete the resource with `id` at `version`.
    ///
    /// Only `204 No Content` counts as success.
    pub async fn delete(&self, path: &str, id: Uuid, version: i64) -> Result<(), Form3Error> {
        let url = self.url_for(&format!(
            "{}/{}?version={}",
            path.trim_end_matches('/'),
            id,
            version
        ));
        info!("Deleting resource {} at version {}", id, version);
        let request = self.authorize(self.http.delete(url));
        let response = request.send().await?;
        debug!("Received status {}", response.status());
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound.into()),
            StatusCode::CONFLICT => Err(ApiError::VersionConflict.into()),
            status => Err(Form3Error::Status(status)),
        }
    }

    /// Resolve a path or link against the base URL. Absolute URLs pass
    /// through untouched.
    pub(crate) fn url_for(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            return link.to_string();
        }
        format!("{}/{}", self.base_url, link.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, CONTENT_TYPE_JSON_API);
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Form3Error> {
        let request = self.authorize(request).build()?;
        debug!("{} request to {}", request.method(), request.url());
        let response = self.http.execute(request).await?;
        debug!("Received status {}", response.status());
        handle_status(response).await
    }
}

fn normalize_base_url(raw: &str) -> Result<String, Form3Error> {
    let base_url = raw.trim().trim_end_matches('/');
    if base_url.is_empty() {
        return Err(Form3Error::InvalidParameter("base_url must not be empty"));
    }
    Ok(base_url.to_string())
}

async fn handle_status(response: Response) -> Result<Response, Form3Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let api_error = match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::CONFLICT => ApiError::Conflict(error_message(response).await),
        StatusCode::BAD_REQUEST => ApiError::BadRequest(error_message(response).await),
        _ => return Err(Form3Error::Status(status)),
    };
    Err(Form3Error::Api(api_error))
}

async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error_message)
        .unwrap_or(body)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Form3Error> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        debug!("Failed to decode response body: {}", e);
        Form3Error::Decode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Client {
        Client::with_config(ClientConfig::default().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn resolves_relative_links_against_base_url() {
        let client = client("http://localhost:8080/");
        assert_eq!(
            client.url_for("/v1/organisation/accounts?page[number]=1"),
            "http://localhost:8080/v1/organisation/accounts?page[number]=1"
        );
        assert_eq!(
            client.url_for("v1/organisation/accounts"),
            "http://localhost:8080/v1/organisation/accounts"
        );
    }

    #[test]
    fn absolute_links_pass_through() {
        let client = client("http://localhost:8080");
        let link = "https://api.example.com/v1/organisation/accounts?page[number]=2";
        assert_eq!(client.url_for(link), link);
    }

    #[test]
    fn default_config_targets_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_none());
        assert!(config.organisation_id.is_none());
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = Client::with_config(ClientConfig::default().with_base_url(" ")).unwrap_err();
        assert!(matches!(err, Form3Error::InvalidParameter(_)));
    }

    #[test]
    fn base_url_override_is_validated() {
        let client = client("http://localhost:8080");
        for bad in ["", "  ", "/"] {
            let err = client.clone().with_base_url(bad).unwrap_err();
            assert!(matches!(err, Form3Error::InvalidParameter(_)));
        }
        let client = client.with_base_url("http://proxy.local:9000/").unwrap();
        assert_eq!(client.base_url(), "http://proxy.local:9000");
        assert_eq!(
            client.url_for("v1/organisation/accounts"),
            "http://proxy.local:9000/v1/organisation/accounts"
        );
    }
}
