//! Wire encoding of request parameters.
//!
//! [`QueryParams`] collects the `(key, value)` pairs a request descriptor
//! produces. Pairs keep insertion order, so the same descriptor always
//! encodes to the same sequence. Unset or blank optional values and empty
//! lists are never written.

use chrono::NaiveDate;
use std::fmt::Display;

use crate::{Error, Result};

/// Separator between the values of a list parameter.
pub const LIST_SEPARATOR: &str = ",";

/// Formats a date the way the service expects it on the wire (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use intrinio_client::params::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2017, 3, 9).unwrap();
/// assert_eq!(format_date(date), "2017-03-09");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// An ordered list of encoded request parameters.
///
/// # Examples
///
/// ```
/// use intrinio_client::params::QueryParams;
///
/// let mut params = QueryParams::new();
/// params
///     .required("identifier", "AAPL")
///     .unwrap()
///     .optional("type", None::<&str>)
///     .list("item", ["open_price", "close_price"])
///     .unwrap();
///
/// assert_eq!(
///     params.into_pairs(),
///     vec![
///         ("identifier".to_string(), "AAPL".to_string()),
///         ("item".to_string(), "open_price,close_price".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter that must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidRequest`](crate::ErrorKind::InvalidRequest)
    /// error if the value renders as an empty string.
    pub fn required(&mut self, key: &str, value: impl Display) -> Result<&mut Self> {
        let value = value.to_string();
        if value.trim().is_empty() {
            return Err(Error::invalid_request(format!(
                "Missing required parameter `{}`",
                key
            )));
        }
        self.pairs.push((key.to_string(), value));
        Ok(self)
    }

    /// Appends a parameter only when a value is set.
    ///
    /// A value that renders as a blank string is treated as unset, so an
    /// empty filter never reaches the wire.
    pub fn optional<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.pairs.push((key.to_string(), value));
            }
        }
        self
    }

    /// Appends an optional date, formatted with [`format_date`].
    pub fn date(&mut self, key: &str, value: Option<NaiveDate>) -> &mut Self {
        self.optional(key, value.map(format_date))
    }

    /// Appends a list parameter as one comma-delimited value.
    ///
    /// Nothing is written for an empty list. Each element must encode to
    /// exactly one token.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidRequest`](crate::ErrorKind::InvalidRequest)
    /// error if an element is blank or contains [`LIST_SEPARATOR`].
    pub fn list<I>(&mut self, key: &str, values: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let mut tokens = Vec::new();
        for value in values {
            let token = value.to_string();
            if token.trim().is_empty() {
                return Err(Error::invalid_request(format!(
                    "Parameter `{}` contains a blank value",
                    key
                )));
            }
            if token.contains(LIST_SEPARATOR) {
                return Err(Error::invalid_request(format!(
                    "Value `{}` of parameter `{}` contains the list separator `{}`",
                    token, key, LIST_SEPARATOR
                )));
            }
            tokens.push(token);
        }

        if !tokens.is_empty() {
            self.pairs.push((key.to_string(), tokens.join(LIST_SEPARATOR)));
        }
        Ok(self)
    }

    /// Appends a list parameter that must contain at least one value.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidRequest`](crate::ErrorKind::InvalidRequest)
    /// error if the list is empty or [`list`](Self::list) rejects an element.
    pub fn required_list<I>(&mut self, key: &str, values: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let before = self.pairs.len();
        self.list(key, values)?;
        if self.pairs.len() == before {
            return Err(Error::invalid_request(format!(
                "Parameter `{}` requires at least one value",
                key
            )));
        }
        Ok(self)
    }

    /// Returns `true` if no parameters were written.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of encoded parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Looks up the encoded value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the encoded pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the list, returning the encoded pairs in order.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
