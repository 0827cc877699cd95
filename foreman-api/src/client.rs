use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};
use url::Url;

use foreman_config::Connection;
use foreman_core::{ForemanError, Result};

use crate::entity::Setting;
use crate::SettingsApi;

const API_ACCEPT: &str = "application/json;version=2";
const SETTINGS_RESOURCE: &str = "settings";
const SEARCH_PAGE_SIZE: &str = "1000";

/// Index responses wrap the entities in `results`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// API client bound to one server and one set of credentials
pub struct ForemanClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl ForemanClient {
    pub fn new(connection: &Connection) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(API_ACCEPT));

        if !connection.validate_certs {
            debug!("TLS certificate validation disabled");
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(connection.timeout)
            .danger_accept_invalid_certs(!connection.validate_certs)
            .build()
            .map_err(|e| ForemanError::Transport {
                endpoint: connection.server_url.to_string(),
                context: format!("Failed to build HTTP client: {e}"),
            })?;

        // Url::join drops the last path segment unless it ends in '/',
        // which would break servers mounted below a prefix.
        let mut base_url = connection.server_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            username: connection.username.clone(),
            password: connection.password.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ForemanError::Config(format!("Invalid API path '{path}': {e}")))
    }

    /// Authenticate, send, and turn non-success statuses into errors
    fn send(&self, request: RequestBuilder, endpoint: &Url) -> Result<Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| ForemanError::Transport {
                endpoint: endpoint.to_string(),
                context: error_chain(&e),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().unwrap_or_default();
        let body = extract_error_message(&error_text);
        error!(endpoint = %endpoint, status = status.as_u16(), error = %body, "Request failed");
        Err(ForemanError::Http {
            status: status.as_u16(),
            endpoint: endpoint.path().to_string(),
            body,
        })
    }

    fn parse<T: serde::de::DeserializeOwned>(response: Response, endpoint: &Url) -> Result<T> {
        response.json().map_err(|e| {
            ForemanError::Serialization(format!("Failed to parse response from {endpoint}: {e}"))
        })
    }

    /// Run an index search and return the raw result entries
    pub fn search(&self, resource: &str, search: &str) -> Result<Vec<Value>> {
        let url = self.endpoint(&format!("api/{resource}"))?;
        debug!(resource = %resource, search = %search, "Searching");

        let request = self
            .client
            .get(url.clone())
            .query(&[("search", search), ("per_page", SEARCH_PAGE_SIZE)]);
        let response = self.send(request, &url)?;
        let page: SearchResponse = Self::parse(response, &url)?;
        Ok(page.results)
    }

    /// Fetch a single setting by its API id
    pub fn show_setting(&self, id: &str) -> Result<Setting> {
        let url = self.endpoint(&format!("api/{SETTINGS_RESOURCE}/{id}"))?;
        let response = self.send(self.client.get(url.clone()), &url)?;
        Self::parse(response, &url)
    }
}

impl SettingsApi for ForemanClient {
    fn find_setting(&self, name: &str) -> Result<Setting> {
        let search = name_search(name);
        let mut results = self.search(SETTINGS_RESOURCE, &search)?;

        match results.len() {
            0 => Err(ForemanError::NotFound {
                resource: SETTINGS_RESOURCE.to_string(),
                search,
            }),
            1 => {
                let thin: Setting = serde_json::from_value(results.remove(0))?;
                // Search results may omit fields, so always load the full entity.
                self.show_setting(&thin.resource_id())
            }
            count => Err(ForemanError::Ambiguous {
                resource: SETTINGS_RESOURCE.to_string(),
                search,
                count,
            }),
        }
    }

    fn update_setting(&self, setting: &Setting, value: &Value) -> Result<Setting> {
        let url = self.endpoint(&format!(
            "api/{SETTINGS_RESOURCE}/{}",
            setting.resource_id()
        ))?;
        let payload = json!({ "setting": { "value": value } });

        let response = self.send(self.client.put(url.clone()).json(&payload), &url)?;
        debug!(name = %setting.name, "Setting updated on server");
        Self::parse(response, &url)
    }
}

/// Exact-match scoped search on the `name` field
pub fn name_search(name: &str) -> String {
    format!("name=\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// reqwest keeps the useful part (TLS, DNS, timeout) in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Foreman wraps failures as `{"error": {"message": ...}}`; fall back to the raw body
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let error = v.get("error")?;
            error
                .get("message")
                .or_else(|| error.get("full_messages"))
                .map(|m| match m {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
        })
        .unwrap_or_else(|| body.trim().to_string())
}
