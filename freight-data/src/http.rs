//! Blocking HTTP client shared by the lookup providers.
//!
//! The lookup traits in `freight-core` are synchronous. [`BlockingClient`]
//! bridges them to `reqwest` by blocking on a Tokio runtime that it owns and
//! reuses across calls.

use std::future::Future;
use std::time::Duration;

use freight_core::LookupError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Default user agent sent with every lookup.
pub const DEFAULT_USER_AGENT: &str = "freight-route/0.1";

/// Default connect and request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for HTTP provider construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// `reqwest` client paired with the runtime that drives it.
///
/// Outside any Tokio runtime, requests run on the owned runtime. Inside a
/// multi-threaded runtime they run on the caller's runtime through
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime, where
/// neither is allowed, the owned runtime is driven from a scoped helper thread
/// while the caller blocks.
pub(crate) struct BlockingClient {
    client: Client,
    // Only `None` while dropping.
    runtime: Option<Runtime>,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("timeout", &self.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime: Some(runtime),
            timeout,
        })
    }

    /// `GET url?query` and decode the JSON body as `T`.
    pub(crate) fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let Some(runtime) = self.runtime.as_ref() else {
            return Err(LookupError::Unavailable {
                url: url.to_owned(),
                message: "client runtime has shut down".to_owned(),
            });
        };
        let future = self.fetch_json(url, query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => Self::block_on_helper_thread(runtime, future, url),
            Err(_) => runtime.block_on(future),
        }
    }

    fn block_on_helper_thread<T, F>(
        runtime: &Runtime,
        future: F,
        url: &str,
    ) -> Result<T, LookupError>
    where
        T: Send,
        F: Future<Output = Result<T, LookupError>> + Send,
    {
        std::thread::scope(|scope| scope.spawn(|| runtime.block_on(future)).join())
            .unwrap_or_else(|_| {
                Err(LookupError::Unavailable {
                    url: url.to_owned(),
                    message: "lookup thread panicked".to_owned(),
                })
            })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.convert_reqwest_error(&err, url)
            } else {
                LookupError::Malformed {
                    message: err.to_string(),
                }
            }
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> LookupError {
        if error.is_timeout() {
            return LookupError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return LookupError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }

        LookupError::Unavailable {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl Drop for BlockingClient {
    fn drop(&mut self) {
        // A plain drop panics when the owner is dropped inside an async context.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Join a base URL and a path without doubling the separator.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
