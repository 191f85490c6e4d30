//! Response payloads.
//!
//! Field names match the service's JSON. Every field the service may leave
//! out is an `Option`, so a missing value stays distinguishable from zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An entry of the company master list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub lei: Option<String>,
    pub cik: Option<String>,
    pub latest_filing_date: Option<NaiveDate>,
}

/// An entry of the security master list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub ticker: Option<String>,
    pub figi_ticker: Option<String>,
    pub figi: Option<String>,
    pub composite_figi: Option<String>,
    pub composite_figi_ticker: Option<String>,
    pub security_name: Option<String>,
    pub market_sector: Option<String>,
    pub security_type: Option<String>,
    pub stock_exchange: Option<String>,
    pub last_crsp_adj_date: Option<NaiveDate>,
}

/// An entry of the index master list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSummary {
    pub symbol: Option<String>,
    pub index_name: Option<String>,
    pub index_type: Option<String>,
}

/// An entry of the owner master list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub owner_cik: Option<String>,
    pub owner_name: Option<String>,
}

/// Company profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub legal_name: Option<String>,
    pub lei: Option<String>,
    pub cik: Option<String>,
    pub stock_exchange: Option<String>,
    pub sic: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub ceo: Option<String>,
    pub company_url: Option<String>,
    pub business_address: Option<String>,
    pub business_phone_no: Option<String>,
    pub hq_state: Option<String>,
    pub hq_country: Option<String>,
    pub inc_state: Option<String>,
    pub inc_country: Option<String>,
    pub employees: Option<u64>,
    pub sector: Option<String>,
    pub industry_category: Option<String>,
    pub industry_group: Option<String>,
    pub standardized_active: Option<bool>,
}

/// Security profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityDetails {
    pub ticker: Option<String>,
    pub figi_ticker: Option<String>,
    pub figi: Option<String>,
    pub composite_figi: Option<String>,
    pub composite_figi_ticker: Option<String>,
    pub security_name: Option<String>,
    pub market_sector: Option<String>,
    pub security_type: Option<String>,
    pub stock_exchange: Option<String>,
    pub exchange_ticker: Option<String>,
    pub currency: Option<String>,
    pub round_lot_size: Option<u64>,
    pub primary_security: Option<bool>,
    pub delisted_security: Option<bool>,
    pub first_stock_price: Option<NaiveDate>,
    pub last_stock_price: Option<NaiveDate>,
}

/// Index profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDetails {
    pub symbol: Option<String>,
    pub index_name: Option<String>,
    pub index_type: Option<String>,
    pub continent: Option<String>,
    pub country: Option<String>,
}

/// A security matching a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySearchResult {
    pub ticker: Option<String>,
    pub figi_ticker: Option<String>,
    pub figi: Option<String>,
    pub security_name: Option<String>,
}

/// The latest value of one tag for one identifier.
///
/// Values are numeric for most tags and text for a few (`name`, `ceo`), so
/// they are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub identifier: Option<String>,
    pub item: Option<String>,
    pub value: Option<serde_json::Value>,
}

/// One observation of a historical tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalValue {
    /// The date the value applies to.
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Prices for one trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub ex_dividend: Option<f64>,
    pub split_ratio: Option<f64>,
    pub adj_open: Option<f64>,
    pub adj_high: Option<f64>,
    pub adj_low: Option<f64>,
    pub adj_close: Option<f64>,
    pub adj_volume: Option<f64>,
}

/// A regulatory filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecFiling {
    pub filing_date: Option<NaiveDate>,
    /// Acceptance timestamp as reported by the service.
    pub accepted_date: Option<String>,
    pub period_ended: Option<NaiveDate>,
    pub accno: Option<String>,
    pub report_type: Option<String>,
    pub filing_url: Option<String>,
    pub report_url: Option<String>,
    pub instance_url: Option<String>,
}

/// One reporting period of a standardized statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalPeriod {
    pub fiscal_year: Option<i32>,
    pub fiscal_period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_numbers_stay_absent() {
        let price: Price = serde_json::from_str(r#"{"date":"2020-01-02","close":300.35}"#).unwrap();

        assert_eq!(price.date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(price.close, Some(300.35));
        assert_eq!(price.open, None);
        assert_eq!(price.volume, None);
    }

    #[test]
    fn test_null_historical_value() {
        let value: HistoricalValue =
            serde_json::from_str(r#"{"date":"2015-12-31","value":null}"#).unwrap();
        assert_eq!(value.value, None);
    }

    #[test]
    fn test_data_point_text_value() {
        let point: DataPoint =
            serde_json::from_str(r#"{"identifier":"AAPL","item":"name","value":"Apple Inc"}"#).unwrap();
        assert_eq!(point.value, Some(serde_json::json!("Apple Inc")));
    }
}
