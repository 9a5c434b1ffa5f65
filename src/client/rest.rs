//! REST implementation of the appliance client seam.
//!
//! Thin synchronous wrapper over the OneView HTTPS API: a session is opened
//! once against `/rest/login-sessions` and the returned token authenticates
//! every subsequent call. Collection endpoints reply with a
//! `ResourceCollection` envelope (`members`, `count`, ...); single-resource
//! endpoints reply with the bare object. Both shapes normalize to a
//! sequence here so modules never see the difference.

use super::{ApplianceClient, ClientError, ClientResult, ResourceClient};
use crate::config::OneViewConfig;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Request timeout for appliance calls
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `X-Api-Version` value used when the config does not pin one
const DEFAULT_API_VERSION: u32 = 800;

const EVENTS_URI: &str = "/rest/events";
const FIRMWARE_DRIVERS_URI: &str = "/rest/firmware-drivers";
const TIME_AND_LOCALE_URI: &str = "/rest/appliance/configuration/time-locale";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "sessionID")]
    session_id: String,
}

/// Shared authenticated session against one appliance
struct RestSession {
    http: Client,
    base: url::Url,
    api_version: u32,
    token: String,
}

impl RestSession {
    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.base.join(path)?;
        Ok(self
            .http
            .request(method, url)
            .header("X-Api-Version", self.api_version)
            .header("Auth", &self.token))
    }

    /// Map non-2xx responses to [`ClientError::Api`] with the appliance's
    /// own `message` field when it sends one.
    fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Appliance client backed by the OneView REST API.
pub struct RestApplianceClient {
    events: RestResourceClient,
    firmware_drivers: RestResourceClient,
    time_and_locale: RestResourceClient,
}

impl RestApplianceClient {
    /// Open an authenticated session and build resource clients for every
    /// category the modules consume.
    pub fn connect(config: &OneViewConfig) -> ClientResult<Self> {
        let api_version = config.api_version.unwrap_or(DEFAULT_API_VERSION);
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            // Appliances ship with self-signed certificates.
            .danger_accept_invalid_certs(true)
            .build()?;
        let base = url::Url::parse(&config.base_url())?;

        debug!(appliance = %config.ip, api_version, "opening appliance session");
        let response = http
            .post(base.join("/rest/login-sessions")?)
            .header("X-Api-Version", api_version)
            .json(&json!({
                "userName": config.credentials.username,
                "password": config.credentials.password,
            }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Auth(format!(
                "login to {} rejected with status {}",
                config.ip, status
            )));
        }
        let login: LoginResponse = response.json()?;

        let session = Arc::new(RestSession {
            http,
            base,
            api_version,
            token: login.session_id,
        });
        Ok(Self {
            events: RestResourceClient::new(Arc::clone(&session), EVENTS_URI),
            firmware_drivers: RestResourceClient::new(Arc::clone(&session), FIRMWARE_DRIVERS_URI),
            time_and_locale: RestResourceClient::new(session, TIME_AND_LOCALE_URI),
        })
    }
}

impl ApplianceClient for RestApplianceClient {
    fn events(&self) -> &dyn ResourceClient {
        &self.events
    }

    fn firmware_drivers(&self) -> &dyn ResourceClient {
        &self.firmware_drivers
    }

    fn appliance_time_and_locale_configuration(&self) -> &dyn ResourceClient {
        &self.time_and_locale
    }
}

/// One resource category on one appliance session
struct RestResourceClient {
    session: Arc<RestSession>,
    root: &'static str,
}

impl RestResourceClient {
    fn new(session: Arc<RestSession>, root: &'static str) -> Self {
        Self { session, root }
    }

    fn resource_uri(resource: &Value) -> ClientResult<&str> {
        resource
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::InvalidResource("resource has no 'uri' field".to_string()))
    }

    /// Normalize a collection envelope or bare resource to a sequence.
    fn members_of(body: Value) -> Vec<Value> {
        match body {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("members") {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(obj)],
            },
            other => vec![other],
        }
    }
}

impl ResourceClient for RestResourceClient {
    fn get_all(&self) -> ClientResult<Vec<Value>> {
        debug!(root = self.root, "get_all");
        let response = self
            .session
            .request(Method::GET, self.root)?
            .query(&[("start", "0"), ("count", "-1")])
            .send()?;
        let body: Value = RestSession::check(response)?.json()?;
        Ok(Self::members_of(body))
    }

    fn get_by(&self, field: &str, value: &str) -> ClientResult<Vec<Value>> {
        debug!(root = self.root, field, value, "get_by");
        let filter = format!("\"{}='{}'\"", field, value);
        let response = self
            .session
            .request(Method::GET, self.root)?
            .query(&[("start", "0"), ("count", "-1"), ("filter", &filter)])
            .send()?;
        let body: Value = RestSession::check(response)?.json()?;
        // Not every endpoint honors the filter parameter, so match locally
        // as well.
        let mut members = Self::members_of(body);
        members.retain(|m| m.get(field).and_then(Value::as_str) == Some(value));
        Ok(members)
    }

    fn create(&self, data: &Value) -> ClientResult<Value> {
        debug!(root = self.root, "create");
        let response = self
            .session
            .request(Method::POST, self.root)?
            .json(data)
            .send()?;
        Ok(RestSession::check(response)?.json()?)
    }

    fn update(&self, data: &Value) -> ClientResult<Value> {
        let uri = Self::resource_uri(data)?;
        debug!(root = self.root, uri, "update");
        let response = self.session.request(Method::PUT, uri)?.json(data).send()?;
        Ok(RestSession::check(response)?.json()?)
    }

    fn delete(&self, resource: &Value) -> ClientResult<()> {
        let uri = Self::resource_uri(resource)?;
        debug!(root = self.root, uri, "delete");
        let response = self.session.request(Method::DELETE, uri)?.send()?;
        RestSession::check(response)?;
        Ok(())
    }
}
