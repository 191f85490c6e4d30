//! The endpoint catalog.
//!
//! Every remote operation is described by a static [`EndpointBinding`] in
//! [`CATALOG`]. Request descriptors name their operation through the
//! [`Endpoint`] trait and the client looks the binding up at dispatch time,
//! so the dispatcher itself knows nothing about individual endpoints.

use serde::de::DeserializeOwned;
use std::fmt;

use crate::params::QueryParams;
use crate::Result;

/// HTTP methods used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in a form-encoded body.
    Post,
}

impl HttpMethod {
    /// Converts to the `http` crate's method type.
    pub fn as_method(&self) -> http::Method {
        match self {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Whether an endpoint answers with one object or a list of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// A single JSON object.
    Object,
    /// A JSON array of objects.
    List,
}

/// A logical operation offered by the service.
///
/// The discriminant is the operation's index in [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Company master list.
    CompaniesMasterList,
    /// Security master list.
    SecuritiesMasterList,
    /// Index master list.
    IndicesMasterList,
    /// Owner master list.
    OwnersMasterList,
    /// Details for one company.
    CompanyDetails,
    /// Details for one security.
    SecurityDetails,
    /// Details for one index.
    IndexDetails,
    /// Securities screener.
    SecuritiesSearch,
    /// Most recent data points for identifiers × tags.
    DataPoints,
    /// Historical values of one tag.
    HistoricalData,
    /// Latest prices for one security.
    CurrentPrices,
    /// Regulatory filings of one company.
    CompanyFilings,
    /// Standardized financial statement periods.
    StandardizedFundamentals,
}

impl Operation {
    /// All operations, in catalog order.
    pub const ALL: [Operation; 13] = [
        Operation::CompaniesMasterList,
        Operation::SecuritiesMasterList,
        Operation::IndicesMasterList,
        Operation::OwnersMasterList,
        Operation::CompanyDetails,
        Operation::SecurityDetails,
        Operation::IndexDetails,
        Operation::SecuritiesSearch,
        Operation::DataPoints,
        Operation::HistoricalData,
        Operation::CurrentPrices,
        Operation::CompanyFilings,
        Operation::StandardizedFundamentals,
    ];

    /// Looks up this operation's binding in [`CATALOG`].
    pub fn binding(self) -> &'static EndpointBinding {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Static routing information for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointBinding {
    /// The operation this binding serves.
    pub operation: Operation,
    /// Path relative to the client's base URL.
    pub path: &'static str,
    /// HTTP method.
    pub method: HttpMethod,
    /// Shape of a successful response body.
    pub shape: ResponseShape,
}

const fn get(operation: Operation, path: &'static str, shape: ResponseShape) -> EndpointBinding {
    EndpointBinding {
        operation,
        path,
        method: HttpMethod::Get,
        shape,
    }
}

/// Bindings for every supported operation, indexed by [`Operation`].
pub static CATALOG: [EndpointBinding; 13] = [
    get(Operation::CompaniesMasterList, "/companies/master", ResponseShape::List),
    get(Operation::SecuritiesMasterList, "/securities/master", ResponseShape::List),
    get(Operation::IndicesMasterList, "/indices/master", ResponseShape::List),
    get(Operation::OwnersMasterList, "/owners/master", ResponseShape::List),
    get(Operation::CompanyDetails, "/companies", ResponseShape::Object),
    get(Operation::SecurityDetails, "/securities", ResponseShape::Object),
    get(Operation::IndexDetails, "/indices", ResponseShape::Object),
    get(Operation::SecuritiesSearch, "/securities/search", ResponseShape::List),
    get(Operation::DataPoints, "/data_point", ResponseShape::List),
    get(Operation::HistoricalData, "/historical_data", ResponseShape::List),
    get(Operation::CurrentPrices, "/prices", ResponseShape::Object),
    get(Operation::CompanyFilings, "/companies/filings", ResponseShape::List),
    get(Operation::StandardizedFundamentals, "/fundamentals/standardized", ResponseShape::List),
];

/// A request descriptor that can be dispatched by [`Client`](crate::Client).
///
/// Implementors name the operation they target, the type each returned
/// object decodes into, and how their fields map onto wire parameters.
///
/// # Examples
///
/// ```
/// use intrinio_client::endpoint::{Endpoint, Operation};
/// use intrinio_client::params::QueryParams;
/// use serde::Deserialize;
///
/// struct LatestPrice {
///     identifier: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Price {
///     close: Option<f64>,
/// }
///
/// impl Endpoint for LatestPrice {
///     const OPERATION: Operation = Operation::CurrentPrices;
///     type Item = Price;
///
///     fn encode(&self, params: &mut QueryParams) -> intrinio_client::Result<()> {
///         params.required("identifier", &self.identifier)?;
///         Ok(())
///     }
/// }
///
/// assert_eq!(LatestPrice::binding().path, "/prices");
/// ```
pub trait Endpoint {
    /// The catalog operation this descriptor targets.
    const OPERATION: Operation;

    /// The type of each object in a successful response.
    type Item: DeserializeOwned;

    /// Writes this descriptor's parameters.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error if a required field is missing.
    fn encode(&self, params: &mut QueryParams) -> Result<()>;

    /// The binding for [`Self::OPERATION`].
    ///
    /// Descriptors for endpoints outside [`CATALOG`] may override this.
    fn binding() -> &'static EndpointBinding {
        Self::OPERATION.binding()
    }

    /// Encodes this descriptor into an ordered parameter list.
    fn to_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        self.encode(&mut params)?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_indexed_by_operation() {
        for operation in Operation::ALL {
            assert_eq!(operation.binding().operation, operation);
        }
    }

    #[test]
    fn test_catalog_paths_are_unique_and_rooted() {
        let paths: HashSet<_> = CATALOG.iter().map(|b| b.path).collect();
        assert_eq!(paths.len(), CATALOG.len());
        assert!(CATALOG.iter().all(|b| b.path.starts_with('/')));
    }

    #[test]
    fn test_detail_endpoints_return_single_objects() {
        for operation in [
            Operation::CompanyDetails,
            Operation::SecurityDetails,
            Operation::IndexDetails,
            Operation::CurrentPrices,
        ] {
            assert_eq!(operation.binding().shape, ResponseShape::Object);
        }
        assert_eq!(Operation::SecuritiesSearch.binding().shape, ResponseShape::List);
    }

    #[test]
    fn test_fundamentals_binding() {
        let binding = Operation::StandardizedFundamentals.binding();
        assert_eq!(binding.path, "/fundamentals/standardized");
        assert_eq!(binding.method, HttpMethod::Get);
        assert_eq!(binding.method.as_method(), http::Method::GET);
    }
}
