//! Request descriptors, one per catalog operation.
//!
//! Optional parameters are `Option`s and are left out of the request when
//! unset or blank. The service rejects some explicitly empty parameters (the
//! security master list answers an empty `identifier` with a server error),
//! so `Some("")` is encoded exactly like `None`.

use chrono::NaiveDate;

use crate::dto::{
    CompanyDetails, CompanySummary, DataPoint, FundamentalPeriod, HistoricalValue, IndexDetails,
    IndexSummary, OwnerSummary, Price, SecFiling, SecurityDetails, SecuritySearchResult,
    SecuritySummary,
};
use crate::endpoint::{Endpoint, Operation};
use crate::params::QueryParams;
use crate::types::{
    FinancialStatement, Frequency, IndexType, OwnerType, PeriodType, SearchCondition, SortOrder,
    Tag,
};
use crate::Result;

/// Lists all companies covered by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCompaniesMasterList {
    /// Free-text filter on ticker or name.
    pub query: Option<String>,
    /// Only companies that filed on or after this date.
    pub latest_filing_date: Option<NaiveDate>,
    /// Results per page.
    pub page_size: Option<u32>,
    /// Page to return, starting at 1.
    pub page_number: Option<u32>,
}

impl Endpoint for GetCompaniesMasterList {
    const OPERATION: Operation = Operation::CompaniesMasterList;
    type Item = CompanySummary;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .optional("query", self.query.as_deref())
            .date("latest_filing_date", self.latest_filing_date)
            .optional("page_size", self.page_size)
            .optional("page_number", self.page_number);
        Ok(())
    }
}

/// Lists all securities covered by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetSecuritiesMasterList {
    /// Ticker symbol or other identifier.
    pub identifier: Option<String>,
    /// Free-text filter on ticker or name.
    pub query: Option<String>,
    /// Exchange symbol, e.g. `^XNYS`.
    pub exch_symbol: Option<String>,
    /// Restrict to securities traded in the United States.
    pub us_only: Option<bool>,
    /// Results per page.
    pub page_size: Option<u32>,
    /// Page to return, starting at 1.
    pub page_number: Option<u32>,
}

impl Endpoint for GetSecuritiesMasterList {
    const OPERATION: Operation = Operation::SecuritiesMasterList;
    type Item = SecuritySummary;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .optional("identifier", self.identifier.as_deref())
            .optional("query", self.query.as_deref())
            .optional("exch_symbol", self.exch_symbol.as_deref())
            .optional("us_only", self.us_only.map(|us| if us { "Yes" } else { "No" }))
            .optional("page_size", self.page_size)
            .optional("page_number", self.page_number);
        Ok(())
    }
}

/// Lists all indices covered by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIndicesMasterList {
    /// Free-text filter on symbol or name.
    pub query: Option<String>,
    /// Restrict to one index family. Sent as `type`.
    pub index_type: Option<IndexType>,
    /// Results per page.
    pub page_size: Option<u32>,
    /// Page to return, starting at 1.
    pub page_number: Option<u32>,
}

impl Endpoint for GetIndicesMasterList {
    const OPERATION: Operation = Operation::IndicesMasterList;
    type Item = IndexSummary;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .optional("query", self.query.as_deref())
            .optional("type", self.index_type)
            .optional("page_size", self.page_size)
            .optional("page_number", self.page_number);
        Ok(())
    }
}

/// Lists institutional and individual owners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOwnersMasterList {
    /// Free-text filter on owner name.
    pub query: Option<String>,
    /// Restrict to institutional or individual owners. Sent as `type`.
    pub owner_type: Option<OwnerType>,
    /// Results per page.
    pub page_size: Option<u32>,
    /// Page to return, starting at 1.
    pub page_number: Option<u32>,
}

impl Endpoint for GetOwnersMasterList {
    const OPERATION: Operation = Operation::OwnersMasterList;
    type Item = OwnerSummary;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .optional("query", self.query.as_deref())
            .optional("type", self.owner_type)
            .optional("page_size", self.page_size)
            .optional("page_number", self.page_number);
        Ok(())
    }
}

macro_rules! identifier_request {
    ($(#[$meta:meta])* $name:ident, $operation:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Ticker symbol or other identifier.
            pub identifier: String,
        }

        impl $name {
            /// Creates a request for the given identifier.
            pub fn new(identifier: impl Into<String>) -> Self {
                Self {
                    identifier: identifier.into(),
                }
            }
        }

        impl Endpoint for $name {
            const OPERATION: Operation = Operation::$operation;
            type Item = $item;

            fn encode(&self, params: &mut QueryParams) -> Result<()> {
                params.required("identifier", &self.identifier)?;
                Ok(())
            }
        }
    };
}

identifier_request!(
    /// Fetches the profile of one company.
    GetCompanyDetails,
    CompanyDetails,
    CompanyDetails
);

identifier_request!(
    /// Fetches the profile of one security.
    GetSecurityDetails,
    SecurityDetails,
    SecurityDetails
);

identifier_request!(
    /// Fetches the profile of one index.
    GetIndexDetails,
    IndexDetails,
    IndexDetails
);

identifier_request!(
    /// Fetches the latest prices of one security.
    GetPrices,
    CurrentPrices,
    Price
);

/// Screens securities against a set of conditions.
///
/// Each condition costs one API credit.
///
/// # Examples
///
/// ```
/// use intrinio_client::endpoint::Endpoint;
/// use intrinio_client::{SearchCondition, SearchOperator, SearchSecurities};
///
/// let request = SearchSecurities {
///     page_size: Some(1),
///     ..SearchSecurities::new(vec![
///         SearchCondition::new("accruedexpenses", SearchOperator::Gt, 0.01),
///         SearchCondition::new("marketcap", SearchOperator::Lte, 1_000_000),
///     ])
/// };
///
/// let params = request.to_params().unwrap();
/// assert_eq!(
///     params.get("conditions"),
///     Some("accruedexpenses~gt~0.01,marketcap~lte~1000000")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSecurities {
    /// Screening conditions, all of which must hold.
    pub conditions: Vec<SearchCondition>,
    /// Results per page.
    pub page_size: Option<u32>,
    /// Page to return, starting at 1.
    pub page_number: Option<u32>,
}

impl SearchSecurities {
    /// Creates a search over the given conditions.
    pub fn new(conditions: Vec<SearchCondition>) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }
}

impl Endpoint for SearchSecurities {
    const OPERATION: Operation = Operation::SecuritiesSearch;
    type Item = SecuritySearchResult;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        for condition in &self.conditions {
            condition.validate()?;
        }
        params
            .required_list("conditions", &self.conditions)?
            .optional("page_size", self.page_size)
            .optional("page_number", self.page_number);
        Ok(())
    }
}

/// Fetches the most recent value of every tag for every identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchDataPoints {
    /// Ticker symbols or other identifiers. Sent as `identifier`.
    pub identifiers: Vec<String>,
    /// Data tags to look up. Sent as `item`.
    pub tags: Vec<Tag>,
}

impl SearchDataPoints {
    /// Creates a request for the cross product of identifiers and tags.
    pub fn new<I, T>(identifiers: I, tags: T) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<Tag>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Endpoint for SearchDataPoints {
    const OPERATION: Operation = Operation::DataPoints;
    type Item = DataPoint;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .required_list("identifier", &self.identifiers)?
            .required_list("item", &self.tags)?;
        Ok(())
    }
}

/// Fetches the history of one tag for one identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistoricalData {
    /// Ticker symbol or other identifier.
    pub identifier: String,
    /// The data tag whose history is requested.
    pub item: Tag,
    /// Earliest date to include.
    pub start_date: Option<NaiveDate>,
    /// Latest date to include.
    pub end_date: Option<NaiveDate>,
    /// Sampling frequency.
    pub frequency: Option<Frequency>,
    /// Period basis for statement tags; the service defaults to TTM.
    pub period_type: Option<PeriodType>,
    /// Ordering of the returned values.
    pub sort_order: Option<SortOrder>,
    /// Results per page.
    pub page_size: Option<u32>,
}

impl SearchHistoricalData {
    /// Creates a request with every optional parameter unset.
    pub fn new(identifier: impl Into<String>, item: impl Into<Tag>) -> Self {
        Self {
            identifier: identifier.into(),
            item: item.into(),
            start_date: None,
            end_date: None,
            frequency: None,
            period_type: None,
            sort_order: None,
            page_size: None,
        }
    }
}

impl Endpoint for SearchHistoricalData {
    const OPERATION: Operation = Operation::HistoricalData;
    type Item = HistoricalValue;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .required("identifier", &self.identifier)?
            .required("item", &self.item)?
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .optional("frequency", self.frequency)
            .optional("type", self.period_type)
            .optional("sort_order", self.sort_order)
            .optional("page_size", self.page_size);
        Ok(())
    }
}

/// Lists the regulatory filings of one company.
#[derive(Debug, Clone, PartialEq)]
pub struct GetCompanySecFilings {
    /// Ticker symbol or other identifier.
    pub identifier: String,
    /// Filing form, e.g. `10-K`, `10-Q`, `8-K` or `4`.
    pub report_type: Option<String>,
}

impl GetCompanySecFilings {
    /// Creates a request for all filings of a company.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            report_type: None,
        }
    }
}

impl Endpoint for GetCompanySecFilings {
    const OPERATION: Operation = Operation::CompanyFilings;
    type Item = SecFiling;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .required("identifier", &self.identifier)?
            .optional("report_type", self.report_type.as_deref());
        Ok(())
    }
}

/// Lists the standardized statement periods of one company.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use intrinio_client::endpoint::Endpoint;
/// use intrinio_client::{FinancialStatement, GetStandardizedFundamentals, PeriodType};
///
/// let request = GetStandardizedFundamentals {
///     period_type: Some(PeriodType::FiscalYear),
///     date: NaiveDate::from_ymd_opt(2016, 6, 30),
///     ..GetStandardizedFundamentals::new("AAPL", FinancialStatement::IncomeStatement)
/// };
///
/// let pairs = request.to_params().unwrap().into_pairs();
/// assert_eq!(pairs[2], ("type".to_string(), "FY".to_string()));
/// assert_eq!(pairs[3], ("date".to_string(), "2016-06-30".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GetStandardizedFundamentals {
    /// Ticker symbol or other identifier.
    pub identifier: String,
    /// The statement to list periods for.
    pub statement: FinancialStatement,
    /// All period types are returned when unset.
    pub period_type: Option<PeriodType>,
    /// Latest period as of this date; the service defaults to today.
    pub date: Option<NaiveDate>,
}

impl GetStandardizedFundamentals {
    /// Creates a request for one statement of one company.
    pub fn new(identifier: impl Into<String>, statement: FinancialStatement) -> Self {
        Self {
            identifier: identifier.into(),
            statement,
            period_type: None,
            date: None,
        }
    }
}

impl Endpoint for GetStandardizedFundamentals {
    const OPERATION: Operation = Operation::StandardizedFundamentals;
    type Item = FundamentalPeriod;

    fn encode(&self, params: &mut QueryParams) -> Result<()> {
        params
            .required("identifier", &self.identifier)?
            .required("statement", self.statement)?
            .optional("type", self.period_type)
            .date("date", self.date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchOperator;
    use crate::ErrorKind;

    fn pairs<E: Endpoint>(request: &E) -> Vec<(String, String)> {
        request.to_params().unwrap().into_pairs()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_master_lists_without_filters_send_nothing() {
        assert!(pairs(&GetCompaniesMasterList::default()).is_empty());
        assert!(pairs(&GetSecuritiesMasterList::default()).is_empty());
        assert!(pairs(&GetIndicesMasterList::default()).is_empty());
        assert!(pairs(&GetOwnersMasterList::default()).is_empty());
    }

    #[test]
    fn test_securities_master_list_filters() {
        let request = GetSecuritiesMasterList {
            exch_symbol: Some("^XNAS".to_string()),
            us_only: Some(true),
            page_size: Some(100),
            ..Default::default()
        };

        assert_eq!(
            pairs(&request),
            vec![
                pair("exch_symbol", "^XNAS"),
                pair("us_only", "Yes"),
                pair("page_size", "100"),
            ]
        );
    }

    #[test]
    fn test_owner_type_uses_type_key() {
        let request = GetOwnersMasterList {
            owner_type: Some(OwnerType::Institutional),
            ..Default::default()
        };
        assert_eq!(pairs(&request), vec![pair("type", "institutional")]);
    }

    #[test]
    fn test_prices_encode_identifier_only() {
        assert_eq!(pairs(&GetPrices::new("AAPL")), vec![pair("identifier", "AAPL")]);
    }

    #[test]
    fn test_missing_identifier_is_invalid() {
        let err = GetCompanyDetails::new("").to_params().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_search_conditions_encode_one_token_each() {
        let request = SearchSecurities::new(vec![
            SearchCondition::new("marketcap", SearchOperator::Gt, 1000),
            SearchCondition::new("name", SearchOperator::Contains, "Bank"),
            SearchCondition::new("pricetoearnings", SearchOperator::Lt, 12.5),
        ]);

        let params = request.to_params().unwrap();
        let conditions = params.get("conditions").unwrap();
        let tokens: Vec<_> = conditions.split(',').collect();

        assert_eq!(
            tokens,
            ["marketcap~gt~1000", "name~contains~Bank", "pricetoearnings~lt~12.5"]
        );
    }

    #[test]
    fn test_condition_containing_a_comma_is_invalid() {
        let request = SearchSecurities::new(vec![SearchCondition::new(
            "name",
            SearchOperator::Contains,
            "Bank, N.A.",
        )]);

        let err = request.to_params().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_identifier_containing_a_comma_is_invalid() {
        let request = SearchDataPoints::new(["AAPL,MSFT"], ["close_price"]);

        let err = request.to_params().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(err.error_message().contains("identifier"));
    }

    #[test]
    fn test_blank_filters_are_not_sent() {
        let request = GetSecuritiesMasterList {
            query: Some(String::new()),
            identifier: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(pairs(&request).is_empty());

        let request = GetCompaniesMasterList {
            query: Some(String::new()),
            ..Default::default()
        };
        assert!(pairs(&request).is_empty());
    }

    #[test]
    fn test_search_without_conditions_is_invalid() {
        let err = SearchSecurities::default().to_params().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_data_points_cross_product() {
        let request = SearchDataPoints::new(["AAPL"], ["accruedexpenses", "acquisitions"]);

        assert_eq!(
            pairs(&request),
            vec![
                pair("identifier", "AAPL"),
                pair("item", "accruedexpenses,acquisitions"),
            ]
        );
    }

    #[test]
    fn test_historical_data_optional_fields() {
        let request = SearchHistoricalData {
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1),
            frequency: Some(Frequency::Quarterly),
            sort_order: Some(SortOrder::Ascending),
            ..SearchHistoricalData::new("AAPL", "totalrevenue")
        };

        assert_eq!(
            pairs(&request),
            vec![
                pair("identifier", "AAPL"),
                pair("item", "totalrevenue"),
                pair("start_date", "2015-01-01"),
                pair("frequency", "quarterly"),
                pair("sort_order", "asc"),
            ]
        );
    }

    #[test]
    fn test_filings_report_type() {
        let request = GetCompanySecFilings {
            report_type: Some("10-K".to_string()),
            ..GetCompanySecFilings::new("AAPL")
        };
        assert_eq!(
            pairs(&request),
            vec![pair("identifier", "AAPL"), pair("report_type", "10-K")]
        );
    }

    #[test]
    fn test_fundamentals_without_optionals() {
        let request = GetStandardizedFundamentals::new("AAPL", FinancialStatement::BalanceSheet);
        assert_eq!(
            pairs(&request),
            vec![pair("identifier", "AAPL"), pair("statement", "balance_sheet")]
        );
    }

    #[test]
    fn test_encoding_is_repeatable() {
        let request = GetStandardizedFundamentals {
            period_type: Some(PeriodType::Quarter),
            date: NaiveDate::from_ymd_opt(2017, 1, 31),
            ..GetStandardizedFundamentals::new("MSFT", FinancialStatement::Calculations)
        };
        assert_eq!(pairs(&request), pairs(&request));
    }
}
