//! Error types for Intrinio API calls.
//!
//! Every failure a call can produce is reported through the single [`Error`]
//! type. The [`ErrorKind`] tells the failure classes apart, while the
//! remaining fields carry whatever the service or the transport reported:
//! HTTP status, error code, message, per-field validation errors and the raw
//! response body.

use http::StatusCode;
use serde::Deserialize;
use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The class of failure behind an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response was received: DNS, connection or timeout failures.
    Transport,
    /// The service answered with a non-2xx status.
    Remote,
    /// A 2xx response whose body did not decode into the declared shape.
    MalformedResponse,
    /// The request descriptor was rejected before anything was sent.
    InvalidRequest,
    /// The call was cancelled by the caller while in flight.
    Cancelled,
    /// The client could not be configured (bad base URL, missing credentials).
    Configuration,
}

impl ErrorKind {
    /// The error code reported for failures that do not come from the service.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "RequestFailed",
            ErrorKind::Remote => "RemoteError",
            ErrorKind::MalformedResponse => "MalformedResponse",
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Configuration => "Configuration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Remote => "remote",
            ErrorKind::MalformedResponse => "malformed response",
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// A validation error the service attributed to one input parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The wire name of the offending parameter.
    pub field: String,
    /// The service's description of the problem.
    pub message: String,
}

/// The error type for all Intrinio API calls.
///
/// Errors are only created by this crate. Transport failures carry a status
/// code of `0`; remote failures carry the HTTP status and, when the service
/// sent a structured error body, its error code, message and field errors.
///
/// # Examples
///
/// ```no_run
/// use intrinio_client::{Client, ErrorKind, GetPrices};
///
/// # async fn example() -> Result<(), intrinio_client::Error> {
/// let client = Client::new("user", "pass")?;
///
/// match client.current_prices(&GetPrices::new("AAPL")).await {
///     Ok(response) => println!("Close: {:?}", response.data.close),
///     Err(e) if e.kind() == ErrorKind::Remote => {
///         eprintln!("{} {}: {}", e.status_code(), e.error_code(), e.error_message());
///         for field in e.field_errors() {
///             eprintln!("  {}: {}", field.field, field.message);
///         }
///     }
///     Err(e) => eprintln!("Request failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
#[error("{kind} error (status {status_code}, {error_code}): {error_message}")]
pub struct Error {
    kind: ErrorKind,
    status_code: u16,
    status_description: String,
    error_code: String,
    error_message: String,
    field_errors: Vec<FieldError>,
    raw_body: String,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    fn new(kind: ErrorKind, error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            kind,
            status_code: 0,
            status_description: String::new(),
            error_code: error_code.into(),
            error_message: error_message.into(),
            field_errors: Vec::new(),
            raw_body: String::new(),
            source: None,
        }
    }

    /// Translates a non-2xx response into a remote error.
    ///
    /// Structured error bodies contribute their code, message and field
    /// errors. Anything else falls back to the reason phrase as the code and
    /// the raw body as the message.
    pub(crate) fn from_status(status: StatusCode, raw_body: String) -> Self {
        let reason = status.canonical_reason().unwrap_or_default();
        let fallback_code = if reason.is_empty() {
            format!("Http{}", status.as_u16())
        } else {
            reason.replace(' ', "")
        };

        let (error_code, error_message, field_errors) = match RemoteError::parse(&raw_body) {
            Some(remote) => (
                remote.error_code.unwrap_or(fallback_code),
                remote.message.unwrap_or_else(|| raw_body.clone()),
                remote.field_errors,
            ),
            None => (fallback_code, raw_body.clone(), Vec::new()),
        };

        Self {
            kind: ErrorKind::Remote,
            status_code: status.as_u16(),
            status_description: reason.to_string(),
            error_code,
            error_message,
            field_errors,
            raw_body,
            source: None,
        }
    }

    /// Translates a failure below the HTTP layer.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "Timeout"
        } else if err.is_connect() {
            "ConnectionFailed"
        } else {
            ErrorKind::Transport.code()
        };

        let mut error = Self::new(ErrorKind::Transport, code, err.to_string());
        error.source = Some(Box::new(err));
        error
    }

    /// A 2xx response whose body did not decode into the declared shape.
    pub(crate) fn malformed(
        status: StatusCode,
        raw_body: String,
        message: impl Into<String>,
        source: Option<BoxError>,
    ) -> Self {
        let mut error = Self::new(
            ErrorKind::MalformedResponse,
            ErrorKind::MalformedResponse.code(),
            message,
        );
        error.status_code = status.as_u16();
        error.status_description = status.canonical_reason().unwrap_or_default().to_string();
        error.raw_body = raw_body;
        error.source = source;
        error
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, ErrorKind::InvalidRequest.code(), message)
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(
            ErrorKind::Cancelled,
            ErrorKind::Cancelled.code(),
            "Request was cancelled before a response arrived",
        )
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, ErrorKind::Configuration.code(), message)
    }

    /// The failure class.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status code, or `0` when no HTTP response was received.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the HTTP status if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self.status_code {
            0 => None,
            code => StatusCode::from_u16(code).ok(),
        }
    }

    /// The HTTP reason phrase, empty when no response was received.
    pub fn status_description(&self) -> &str {
        &self.status_description
    }

    /// The service's error code, or one naming the local failure class.
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// A human-readable description of the failure.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Per-field validation errors reported by the service.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// The raw response body, empty when none was received.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Returns `true` if no response was received from the service.
    pub fn is_transport(&self) -> bool {
        self.kind == ErrorKind::Transport
    }

    /// Returns `true` if the call timed out.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Transport && self.error_code == "Timeout"
    }

    /// Returns `true` if the service rejected the call with a non-2xx status.
    pub fn is_remote(&self) -> bool {
        self.kind == ErrorKind::Remote
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        let mut error = Self::configuration(format!("Invalid URL: {}", err));
        error.source = Some(Box::new(err));
        error
    }
}

/// A specialized `Result` type for Intrinio API calls.
pub type Result<T> = std::result::Result<T, Error>;

/// The structured fields recovered from an error body.
struct RemoteError {
    error_code: Option<String>,
    message: Option<String>,
    field_errors: Vec<FieldError>,
}

impl RemoteError {
    fn parse(body: &str) -> Option<Self> {
        let status = match serde_json::from_str::<ErrorBody>(body).ok()? {
            ErrorBody::Wrapped { response_status } => response_status,
            ErrorBody::Flat(status) => status,
        };

        let mut message = status.message;
        let mut field_errors = Vec::new();
        for entry in status.errors {
            let text = entry.message.or(entry.human).unwrap_or_default();
            match entry.field {
                Some(field) => field_errors.push(FieldError {
                    field,
                    message: text,
                }),
                None if message.is_none() && !text.is_empty() => message = Some(text),
                None => {}
            }
        }

        if status.error_code.is_none() && message.is_none() && field_errors.is_empty() {
            return None;
        }

        Some(Self {
            error_code: status.error_code,
            message,
            field_errors,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Wrapped {
        #[serde(rename = "responseStatus", alias = "ResponseStatus", alias = "response_status")]
        response_status: ErrorStatus,
    },
    Flat(ErrorStatus),
}

#[derive(Deserialize)]
struct ErrorStatus {
    #[serde(default, alias = "errorCode", alias = "ErrorCode")]
    error_code: Option<String>,
    #[serde(default, alias = "Message", alias = "errorMessage")]
    message: Option<String>,
    #[serde(default, alias = "Errors")]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    #[serde(default, alias = "fieldName", alias = "FieldName")]
    field: Option<String>,
    #[serde(default, alias = "Message")]
    message: Option<String>,
    #[serde(default)]
    human: Option<String>,
}
