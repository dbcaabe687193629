//! HTTP transport for the IBFS REST dispatcher.
//!
//! Every operation is one request against the dispatcher URL, selected by
//! the `IBIRS_action` parameter. `signOn` and `get` report success through
//! the `returncode` attribute of the `ibfsrpc` root; `describeFex`,
//! `getContent` and `run` only promise an HTTP success status.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::form_urlencoded;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::describe::{schema_from_document, ParameterSchema};
use crate::error::ClientError;
use crate::resources::{items_from_document, ResourceItem};
use crate::session::Session;
use crate::xml::{self, Element};

/// Service selector, constant across all operations.
pub const SERVICE: &str = "ibfs";
/// The one `returncode` value that means success.
pub const SUCCESS_CODE: &str = "10000";
/// Placeholder for the arguments parameter when none are supplied.
pub const NULL_ARGS: &str = "__null";

const ACTION_SIGN_ON: &str = "signOn";
const ACTION_GET: &str = "get";
const ACTION_GET_CONTENT: &str = "getContent";
const ACTION_DESCRIBE_FEX: &str = "describeFex";
const ACTION_RUN: &str = "run";

const PARAM_ACTION: &str = "IBIRS_action";
const PARAM_SERVICE: &str = "IBIRS_service";
const PARAM_PATH: &str = "IBIRS_path";
const PARAM_ARGS: &str = "IBIRS_args";
const PARAM_RANDOM: &str = "IBIRS_random";
const PARAM_USER: &str = "IBIRS_userName";
const PARAM_PASSWORD: &str = "IBIRS_password";

/// Client for one IBFS dispatcher. Cheap to clone; the platform session
/// rides on the shared cookie store.
#[derive(Debug, Clone)]
pub struct IbfsClient {
    http: Client,
    config: ClientConfig,
}

impl IbfsClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Authenticate and capture the session context (user metadata plus the
    /// CSRF token the platform expects on later mutating requests).
    pub async fn sign_on(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        debug!(user = %username, "signing on");
        let form = [
            (PARAM_ACTION, ACTION_SIGN_ON),
            (PARAM_SERVICE, SERVICE),
            (PARAM_USER, username),
            (PARAM_PASSWORD, password),
        ];
        let response = self
            .http
            .post(&self.config.base_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let doc = checked_document(response).await?;
        Ok(Session::from_document(&doc))
    }

    /// List the children of a repository folder.
    pub async fn resource_items(&self, path: &str) -> Result<Vec<ResourceItem>, ClientError> {
        debug!(path = %path, "listing folder");
        let query = [
            (PARAM_ACTION, ACTION_GET),
            (PARAM_SERVICE, SERVICE),
            (PARAM_PATH, path),
            (PARAM_ARGS, NULL_ARGS),
        ];
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let doc = checked_document(response).await?;
        Ok(items_from_document(&doc))
    }

    /// Fetch a resource's raw content. The body is returned verbatim; it is
    /// not XML.
    pub async fn content(&self, path: &str) -> Result<String, ClientError> {
        debug!(path = %path, "fetching content");
        let query = [
            (PARAM_ACTION, ACTION_GET_CONTENT),
            (PARAM_SERVICE, SERVICE),
            (PARAM_PATH, path),
            (PARAM_ARGS, NULL_ARGS),
        ];
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        body_text(response).await
    }

    /// Discover the parameter schema of a report definition.
    ///
    /// A fresh random token rides along on every call so intermediaries
    /// never serve a stale description for the same path.
    pub async fn describe_fex(&self, path: &str) -> Result<ParameterSchema, ClientError> {
        let random = Uuid::new_v4().simple().to_string();
        debug!(path = %path, random = %random, "describing report parameters");
        let query = [
            (PARAM_ACTION, ACTION_DESCRIBE_FEX),
            (PARAM_SERVICE, SERVICE),
            (PARAM_PATH, path),
            (PARAM_RANDOM, random.as_str()),
        ];
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let body = body_text(response).await?;
        let doc = xml::parse(&body)?;
        Ok(schema_from_document(&doc))
    }

    /// Build the execution URL for a report: the `run` action plus the
    /// submitted `(name, value)` pairs in order. With no pairs the
    /// conventional `IBIRS_args=__null` placeholder is sent instead.
    pub fn run_url(&self, path: &str, pairs: &[(String, String)]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair(PARAM_ACTION, ACTION_RUN)
            .append_pair(PARAM_SERVICE, SERVICE)
            .append_pair(PARAM_PATH, path);
        if pairs.is_empty() {
            query.append_pair(PARAM_ARGS, NULL_ARGS);
        } else {
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
        }
        format!("{}?{}", self.config.base_url, query.finish())
    }

    /// Execute a report and return its rendered output. The browser
    /// equivalent opens [`run_url`](Self::run_url) in a new tab; here the
    /// body comes back to the caller.
    pub async fn run_report(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<String, ClientError> {
        let url = self.run_url(path, pairs);
        debug!(url = %url, "running report");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        body_text(response).await
    }
}

/// Read the body of a successful response, mapping non-2xx statuses to
/// [`ClientError::Transport`].
async fn body_text(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Transport(format!(
            "request failed with status {status}"
        )));
    }
    response
        .text()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))
}

/// Parse a response body as XML and require a successful `returncode` on
/// the `ibfsrpc` root.
async fn checked_document(response: reqwest::Response) -> Result<Element, ClientError> {
    let body = body_text(response).await?;
    let doc = xml::parse(&body)?;
    let rpc = doc.find("ibfsrpc");
    let code = rpc.map(|e| e.attr_or_empty("returncode")).unwrap_or("");
    if code != SUCCESS_CODE {
        let message = rpc
            .map(|e| e.attr_or_empty("returndesc"))
            .unwrap_or("")
            .to_string();
        return Err(ClientError::Api {
            code: code.to_string(),
            message,
        });
    }
    Ok(doc)
}
