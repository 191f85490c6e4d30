//! Decoded responses.
//!
//! [`Envelope`] holds the payload of a successful call, either one object or
//! an ordered list, depending on the endpoint's [`ResponseShape`].
//! [`Response`] wraps it together with details of the HTTP exchange.

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::endpoint::ResponseShape;
use crate::{Error, Result};

/// The decoded payload of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// The endpoint returned a single object.
    One(T),
    /// The endpoint returned a list, in the service's order.
    Many(Vec<T>),
}

impl<T> Envelope<T> {
    /// The shape this envelope was decoded from.
    pub fn shape(&self) -> ResponseShape {
        match self {
            Envelope::One(_) => ResponseShape::Object,
            Envelope::Many(_) => ResponseShape::List,
        }
    }

    /// Returns the single object, or `None` for a list.
    pub fn into_one(self) -> Option<T> {
        match self {
            Envelope::One(item) => Some(item),
            Envelope::Many(_) => None,
        }
    }

    /// Returns the list, or `None` for a single object.
    pub fn into_many(self) -> Option<Vec<T>> {
        match self {
            Envelope::One(_) => None,
            Envelope::Many(items) => Some(items),
        }
    }

    /// Flattens either shape into a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Envelope::One(item) => vec![item],
            Envelope::Many(items) => items,
        }
    }
}

/// Paging details of a wrapped list response.
///
/// List endpoints may answer with `{"data": [...], "result_count": ...}`
/// instead of a bare array. The members next to `data` end up here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Paging {
    /// Total number of results across all pages.
    pub result_count: Option<u64>,
    /// Number of results per page.
    pub page_size: Option<u64>,
    /// The page this response holds, starting at 1.
    pub current_page: Option<u64>,
    /// Number of pages available.
    pub total_pages: Option<u64>,
    /// API credits charged for the call.
    pub api_call_credits: Option<u64>,
}

/// Why a body could not be decoded.
#[derive(Debug)]
pub enum DecodeError {
    /// The body was not valid JSON, or did not match the item type.
    Json(serde_json::Error),
    /// The body was valid JSON but had the wrong top-level shape.
    ShapeMismatch {
        /// The shape the endpoint declares.
        expected: ResponseShape,
    },
}

/// Decodes a response body into the declared shape.
///
/// For [`ResponseShape::Object`] the body must be a JSON object. For
/// [`ResponseShape::List`] it must be a JSON array, or an object whose
/// `data` member is an array. Anything else is a
/// [`DecodeError::ShapeMismatch`]. Unknown fields are ignored by the item
/// type's `Deserialize` implementation.
///
/// # Examples
///
/// ```
/// use intrinio_client::endpoint::ResponseShape;
/// use intrinio_client::response::{decode, Envelope};
///
/// let envelope = decode::<u32>("[3, 1, 2]", ResponseShape::List).unwrap();
/// assert_eq!(envelope, Envelope::Many(vec![3, 1, 2]));
///
/// let wrapped = decode::<u32>(r#"{"data": [7], "total_pages": 1}"#, ResponseShape::List).unwrap();
/// assert_eq!(wrapped, Envelope::Many(vec![7]));
///
/// assert!(decode::<u32>("[3, 1, 2]", ResponseShape::Object).is_err());
/// ```
pub fn decode<T: DeserializeOwned>(
    body: &str,
    shape: ResponseShape,
) -> std::result::Result<Envelope<T>, DecodeError> {
    decode_with_paging(body, shape).map(|(envelope, _)| envelope)
}

/// Like [`decode`], but also returns the paging details of a wrapped list.
///
/// The paging is `None` for objects and bare arrays.
///
/// # Examples
///
/// ```
/// use intrinio_client::endpoint::ResponseShape;
/// use intrinio_client::response::decode_with_paging;
///
/// let body = r#"{"data": [1, 2], "result_count": 12, "current_page": 1, "total_pages": 6}"#;
/// let (_, paging) = decode_with_paging::<u32>(body, ResponseShape::List).unwrap();
///
/// let paging = paging.unwrap();
/// assert_eq!(paging.result_count, Some(12));
/// assert_eq!(paging.total_pages, Some(6));
/// ```
pub fn decode_with_paging<T: DeserializeOwned>(
    body: &str,
    shape: ResponseShape,
) -> std::result::Result<(Envelope<T>, Option<Paging>), DecodeError> {
    let value: Value = serde_json::from_str(body).map_err(DecodeError::Json)?;

    match (shape, value) {
        (ResponseShape::List, Value::Array(items)) => Ok((decode_items(items)?, None)),
        (ResponseShape::List, Value::Object(mut members)) => match members.remove("data") {
            Some(Value::Array(items)) => {
                let paging = serde_json::from_value(Value::Object(members))
                    .map_err(DecodeError::Json)?;
                Ok((decode_items(items)?, Some(paging)))
            }
            _ => Err(DecodeError::ShapeMismatch {
                expected: ResponseShape::List,
            }),
        },
        (ResponseShape::Object, value @ Value::Object(_)) => serde_json::from_value(value)
            .map(|item| (Envelope::One(item), None))
            .map_err(DecodeError::Json),
        (expected, _) => Err(DecodeError::ShapeMismatch { expected }),
    }
}

fn decode_items<T: DeserializeOwned>(
    items: Vec<Value>,
) -> std::result::Result<Envelope<T>, DecodeError> {
    items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<T>, _>>()
        .map(Envelope::Many)
        .map_err(DecodeError::Json)
}

impl DecodeError {
    /// Converts into a malformed-response [`Error`] carrying the raw body.
    pub(crate) fn into_error(self, status: StatusCode, raw_body: String) -> Error {
        match self {
            DecodeError::Json(e) => Error::malformed(
                status,
                raw_body,
                format!("Failed to deserialize response: {}", e),
                Some(Box::new(e)),
            ),
            DecodeError::ShapeMismatch { expected } => {
                let expected = match expected {
                    ResponseShape::Object => "a JSON object",
                    ResponseShape::List => "a JSON array or a `data` list",
                };
                Error::malformed(
                    status,
                    raw_body,
                    format!("Expected {} in response body", expected),
                    None,
                )
            }
        }
    }
}

/// A successful response.
///
/// This type provides the decoded payload along with the raw body, status,
/// headers and latency of the HTTP exchange.
///
/// # Examples
///
/// ```no_run
/// use intrinio_client::{Client, GetCompanyDetails};
///
/// # async fn example() -> Result<(), intrinio_client::Error> {
/// let client = Client::from_env()?;
/// let response = client.company_details(&GetCompanyDetails::new("AAPL")).await?;
///
/// println!("Company: {:?}", response.data.name);
/// println!("Request took {:?}", response.latency);
///
/// if response.latency > std::time::Duration::from_secs(1) {
///     println!("Slow response body: {}", response.raw_body);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded payload.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the body was read.
    pub latency: Duration,

    /// Paging details, present when a list came wrapped in a `data` object.
    pub paging: Option<Paging>,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            paging: None,
        }
    }

    /// Attaches paging details.
    pub fn with_paging(mut self, paging: Option<Paging>) -> Self {
        self.paging = paging;
        self
    }

    /// Maps the payload to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use intrinio_client::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     42,
    ///     "42".to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    /// );
    ///
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            paging: self.paging,
        }
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> Response<Envelope<T>> {
    /// Unwraps a single-object payload.
    ///
    /// # Errors
    ///
    /// Returns a malformed-response error if the payload is a list.
    pub fn into_one(self) -> Result<Response<T>> {
        match self.data {
            Envelope::One(item) => Ok(Response::new(
                item,
                self.raw_body,
                self.status,
                self.headers,
                self.latency,
            )
            .with_paging(self.paging)),
            Envelope::Many(_) => Err(DecodeError::ShapeMismatch {
                expected: ResponseShape::Object,
            }
            .into_error(self.status, self.raw_body)),
        }
    }

    /// Unwraps a list payload.
    ///
    /// # Errors
    ///
    /// Returns a malformed-response error if the payload is a single object.
    pub fn into_many(self) -> Result<Response<Vec<T>>> {
        match self.data {
            Envelope::Many(items) => Ok(Response::new(
                items,
                self.raw_body,
                self.status,
                self.headers,
                self.latency,
            )
            .with_paging(self.paging)),
            Envelope::One(_) => Err(DecodeError::ShapeMismatch {
                expected: ResponseShape::List,
            }
            .into_error(self.status, self.raw_body)),
        }
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Price {
        date: String,
        close: Option<f64>,
        volume: Option<f64>,
    }

    #[test]
    fn test_decode_single_object() {
        let envelope =
            decode::<Price>(r#"{"date":"2020-01-02","close":300.35}"#, ResponseShape::Object).unwrap();

        assert_eq!(
            envelope,
            Envelope::One(Price {
                date: "2020-01-02".to_string(),
                close: Some(300.35),
                volume: None,
            })
        );
    }

    #[test]
    fn test_decode_list_keeps_order() {
        let body = r#"[{"date":"2020-01-03","close":1.0},{"date":"2020-01-01","close":2.0}]"#;
        let items = decode::<Price>(body, ResponseShape::List)
            .unwrap()
            .into_many()
            .unwrap();

        let dates: Vec<_> = items.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2020-01-03", "2020-01-01"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{"date":"2020-01-02","close":1.5,"exchange":"XNAS"}"#;
        assert!(decode::<Price>(body, ResponseShape::Object).is_ok());
    }

    #[test]
    fn test_shape_mismatch_is_not_coerced() {
        let object = r#"{"date":"2020-01-02"}"#;
        let list = r#"[{"date":"2020-01-02"}]"#;

        assert!(matches!(
            decode::<Price>(object, ResponseShape::List),
            Err(DecodeError::ShapeMismatch {
                expected: ResponseShape::List
            })
        ));
        assert!(matches!(
            decode::<Price>(list, ResponseShape::Object),
            Err(DecodeError::ShapeMismatch {
                expected: ResponseShape::Object
            })
        ));
    }

    #[test]
    fn test_wrapped_list_is_unwrapped_with_paging() {
        let body = r#"{
            "data": [{"date":"2020-01-03","close":1.0},{"date":"2020-01-02","close":2.0}],
            "result_count": 2,
            "page_size": 100,
            "current_page": 1,
            "total_pages": 1,
            "api_call_credits": 1
        }"#;

        let (envelope, paging) = decode_with_paging::<Price>(body, ResponseShape::List).unwrap();

        assert_eq!(envelope.into_many().unwrap().len(), 2);
        assert_eq!(
            paging,
            Some(Paging {
                result_count: Some(2),
                page_size: Some(100),
                current_page: Some(1),
                total_pages: Some(1),
                api_call_credits: Some(1),
            })
        );
    }

    #[test]
    fn test_bare_list_has_no_paging() {
        let (_, paging) = decode_with_paging::<Price>("[]", ResponseShape::List).unwrap();
        assert_eq!(paging, None);
    }

    #[test]
    fn test_object_without_data_list_is_a_mismatch() {
        for body in [r#"{"data":{"date":"2020-01-02"}}"#, r#"{"result_count":1}"#] {
            assert!(matches!(
                decode::<Price>(body, ResponseShape::List),
                Err(DecodeError::ShapeMismatch {
                    expected: ResponseShape::List
                })
            ));
        }
    }

    #[test]
    fn test_paging_survives_into_many() {
        let response = Response::new(
            Envelope::Many(vec![1, 2]),
            "{}".to_string(),
            StatusCode::OK,
            HeaderMap::new(),
            Duration::from_millis(5),
        )
        .with_paging(Some(Paging {
            total_pages: Some(3),
            ..Paging::default()
        }));

        let response = response.into_many().unwrap();
        assert_eq!(response.paging.and_then(|p| p.total_pages), Some(3));
    }

    #[test]
    fn test_decode_error_becomes_malformed_response() {
        let err = decode::<Price>("<html>", ResponseShape::Object)
            .unwrap_err()
            .into_error(StatusCode::OK, "<html>".to_string());

        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.raw_body(), "<html>");
        assert_eq!(err.status_code(), 200);
    }

    #[test]
    fn test_response_into_one_rejects_lists() {
        let response = Response::new(
            Envelope::Many(vec![1, 2]),
            "[1,2]".to_string(),
            StatusCode::OK,
            HeaderMap::new(),
            Duration::from_millis(5),
        );

        let err = response.into_one().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
