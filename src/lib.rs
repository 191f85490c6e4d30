//! # intrinio-client - A typed client for the Intrinio market data API
//!
//! Every remote operation is described by a request descriptor that knows
//! its endpoint. The [`Client`] encodes the descriptor, sends one
//! authenticated HTTP request, and decodes the answer into typed data or a
//! single structured [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use intrinio_client::{Client, FinancialStatement, GetPrices, GetStandardizedFundamentals};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), intrinio_client::Error> {
//!     let client = Client::new("username", "password")?;
//!
//!     let prices = client.current_prices(&GetPrices::new("AAPL")).await?;
//!     println!("AAPL closed at {:?} on {}", prices.data.close, prices.data.date);
//!
//!     let request = GetStandardizedFundamentals::new("AAPL", FinancialStatement::IncomeStatement);
//!     for period in client.standardized_fundamentals(&request).await?.data {
//!         println!("{:?} {:?}", period.fiscal_year, period.fiscal_period);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed requests and responses** - One descriptor per endpoint, decoded into typed payloads
//! - **Data-driven endpoint catalog** - Paths, methods and response shapes live in one static table
//! - **Strict parameter encoding** - Unset parameters are omitted, never sent empty
//! - **Single error type** - Transport, remote, malformed-response and invalid-request failures
//!   share one [`Error`] with status, code, message, field errors and raw body
//! - **No hidden retries** - Every call is exactly one HTTP round trip
//! - **Automatic logging** - Structured logging with `tracing`; credentials are never logged
//!
//! ## Error Handling
//!
//! ```no_run
//! use intrinio_client::{Client, ErrorKind, GetCompanyDetails};
//!
//! # async fn example() -> Result<(), intrinio_client::Error> {
//! # let client = Client::from_env()?;
//! match client.company_details(&GetCompanyDetails::new("AAPL")).await {
//!     Ok(response) => println!("{:?}", response.data.name),
//!     Err(e) => match e.kind() {
//!         ErrorKind::Remote => eprintln!("{} {}: {}", e.status_code(), e.error_code(), e.error_message()),
//!         ErrorKind::MalformedResponse => eprintln!("Unexpected body: {}", e.raw_body()),
//!         _ => eprintln!("Request failed: {}", e),
//!     },
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod credentials;
pub mod dto;
pub mod endpoint;
mod error;
pub mod messages;
pub mod params;
pub mod response;
mod types;

pub use client::{Client, ClientBuilder, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use credentials::{Credentials, PASSWORD_ENV, USERNAME_ENV};
pub use dto::*;
pub use endpoint::{Endpoint, EndpointBinding, HttpMethod, Operation, ResponseShape, CATALOG};
pub use error::{Error, ErrorKind, FieldError, Result};
pub use messages::*;
pub use response::{Envelope, Paging, Response};
pub use types::{
    FinancialStatement, Frequency, IndexType, OwnerType, PeriodType, SearchCondition,
    SearchOperator, SortOrder, Tag,
};
