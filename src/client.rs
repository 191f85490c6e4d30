//! The request dispatcher.
//!
//! The [`Client`] type turns any [`Endpoint`] descriptor into one
//! authenticated HTTP exchange and decodes the result. Use [`ClientBuilder`]
//! to configure and create clients.

use crate::{
    credentials::Credentials,
    endpoint::{Endpoint, EndpointBinding, HttpMethod},
    params::QueryParams,
    response::{decode_with_paging, Envelope},
    Error, Response, Result,
};
use http::{header::AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// The service's public origin.
pub const DEFAULT_BASE_URL: &str = "https://api.intrinio.com";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "INTRINIO_BASE_URL";

/// An authenticated client for the Intrinio API.
///
/// The client is cheap to clone and safe to share between tasks. It holds
/// only immutable configuration and a pooled HTTP client, so concurrent
/// calls need no coordination. Every call performs exactly one HTTP round
/// trip; failures are returned, never retried.
///
/// # Examples
///
/// ```no_run
/// use intrinio_client::{Client, GetPrices};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), intrinio_client::Error> {
/// let client = Client::builder()
///     .basic_auth("username", "password")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let prices = client.current_prices(&GetPrices::new("AAPL")).await?;
/// println!("AAPL closed at {:?} on {}", prices.data.close, prices.data.date);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    authorization: HeaderValue,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client for the public service with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::builder().basic_auth(username, password).build()
    }

    /// Creates a client configured from the environment.
    ///
    /// See [`ClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The API username this client authenticates as.
    pub fn username(&self) -> &str {
        self.inner.credentials.username()
    }

    /// Dispatches a request descriptor to its catalog endpoint.
    ///
    /// The descriptor is encoded first; a missing required field fails here
    /// without touching the network. The response body is decoded into the
    /// shape the endpoint's binding declares.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use intrinio_client::{Client, Envelope, SearchDataPoints};
    ///
    /// # async fn example() -> Result<(), intrinio_client::Error> {
    /// let client = Client::from_env()?;
    /// let request = SearchDataPoints::new(["AAPL", "MSFT"], ["close_price", "marketcap"]);
    ///
    /// let response = client.dispatch(&request).await?;
    /// if let Envelope::Many(points) = response.data {
    ///     for point in points {
    ///         println!("{:?} {:?} = {:?}", point.identifier, point.item, point.value);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dispatch<E>(&self, request: &E) -> Result<Response<Envelope<E::Item>>>
    where
        E: Endpoint,
    {
        let binding = E::binding();
        let params = request.to_params()?;
        let start_time = Instant::now();

        let result = match self.execute_request(binding, params).await {
            Ok(response) => self.parse_response::<E::Item>(binding, response, start_time).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                operation = %binding.operation,
                method = %binding.method,
                path = binding.path,
                "Request failed"
            );
        }

        result
    }

    /// Dispatches a request, aborting it if `cancel` completes first.
    ///
    /// When the cancellation future wins, the in-flight request is dropped
    /// and an error of kind [`Cancelled`](crate::ErrorKind::Cancelled) is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use intrinio_client::{Client, GetCompanyDetails};
    /// use tokio::sync::oneshot;
    ///
    /// # async fn example() -> Result<(), intrinio_client::Error> {
    /// let client = Client::from_env()?;
    /// let (stop, stopped) = oneshot::channel::<()>();
    ///
    /// let request = GetCompanyDetails::new("AAPL");
    /// let call = client.dispatch_cancellable(&request, async {
    ///     let _ = stopped.await;
    /// });
    /// drop(stop);
    /// assert!(call.await.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dispatch_cancellable<E, C>(
        &self,
        request: &E,
        cancel: C,
    ) -> Result<Response<Envelope<E::Item>>>
    where
        E: Endpoint,
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::info!(operation = %E::OPERATION, "Request cancelled");
                Err(Error::cancelled())
            }
            result = self.dispatch(request) => result,
        }
    }

    /// Dispatches a request whose endpoint returns a single object.
    pub async fn fetch_one<E>(&self, request: &E) -> Result<Response<E::Item>>
    where
        E: Endpoint,
    {
        self.dispatch(request).await?.into_one()
    }

    /// Dispatches a request whose endpoint returns a list.
    pub async fn fetch_many<E>(&self, request: &E) -> Result<Response<Vec<E::Item>>>
    where
        E: Endpoint,
    {
        self.dispatch(request).await?.into_many()
    }

    /// Builds `base_url + path`, keeping any path prefix of the base URL.
    fn endpoint_url(&self, binding: &EndpointBinding) -> Url {
        let mut url = self.inner.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), binding.path);
        url.set_path(&path);
        url
    }

    /// Sends a single request.
    async fn execute_request(
        &self,
        binding: &EndpointBinding,
        params: QueryParams,
    ) -> Result<reqwest::Response> {
        let mut url = self.endpoint_url(binding);

        if binding.method == HttpMethod::Get && !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }
        }

        tracing::debug!(
            operation = %binding.operation,
            method = %binding.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(binding.method.as_method(), url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        request = request.header(AUTHORIZATION, self.inner.authorization.clone());

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if binding.method == HttpMethod::Post {
            request = request.form(&params.into_pairs());
        }

        request.send().await.map_err(Error::from_transport)
    }

    /// Routes a response to the decoder or the error translator.
    async fn parse_response<T>(
        &self,
        binding: &EndpointBinding,
        response: reqwest::Response,
        start_time: Instant,
    ) -> Result<Response<Envelope<T>>>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let raw_response = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            let latency = start_time.elapsed();

            if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    latency_ms = latency.as_millis(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    latency_ms = latency.as_millis(),
                    response = %raw_response,
                    "Request rejected"
                );
            }

            return Err(Error::from_status(status, raw_response));
        }

        let raw_body = response.text().await.map_err(Error::from_transport)?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            operation = %binding.operation,
            "Received HTTP response"
        );

        match decode_with_paging::<T>(&raw_body, binding.shape) {
            Ok((data, paging)) => {
                Ok(Response::new(data, raw_body, status, headers, latency).with_paging(paging))
            }
            Err(e) => {
                let error = e.into_error(status, raw_body);
                tracing::error!(
                    error = %error,
                    raw_response = %error.raw_body(),
                    "Failed to deserialize response"
                );
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("credentials", &self.inner.credentials)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use intrinio_client::{ClientBuilder, Credentials};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), intrinio_client::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.intrinio.com")?
///     .credentials(Credentials::new("username", "password"))
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<Url>,
    credentials: Option<Credentials>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` targeting [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self {
            base_url: None,
            credentials: None,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Creates a builder from the environment.
    ///
    /// Credentials come from `INTRINIO_USERNAME` and `INTRINIO_PASSWORD`;
    /// `INTRINIO_BASE_URL`, when set, overrides the base URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials are missing or the base
    /// URL is invalid.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new().credentials(Credentials::from_env()?);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                builder = builder.base_url(base_url)?;
            }
        }
        Ok(builder)
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the credentials sent with every request.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Shorthand for [`credentials`](Self::credentials).
    pub fn basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials(Credentials::new(username, password))
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets a per-request timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no credentials were provided or the
    /// HTTP client cannot be built.
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("Credentials are required"))?;
        let authorization = credentials.authorization_header()?;

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                credentials,
                authorization,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
