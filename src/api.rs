//! One typed method per catalog operation.
//!
//! Each method is a thin wrapper over [`Client::fetch_one`] or
//! [`Client::fetch_many`], chosen by the shape of the endpoint.

use crate::dto::{
    CompanyDetails, CompanySummary, DataPoint, FundamentalPeriod, HistoricalValue, IndexDetails,
    IndexSummary, OwnerSummary, Price, SecFiling, SecurityDetails, SecuritySearchResult,
    SecuritySummary,
};
use crate::messages::{
    GetCompaniesMasterList, GetCompanyDetails, GetCompanySecFilings, GetIndexDetails,
    GetIndicesMasterList, GetOwnersMasterList, GetPrices, GetSecuritiesMasterList,
    GetSecurityDetails, GetStandardizedFundamentals, SearchDataPoints, SearchHistoricalData,
    SearchSecurities,
};
use crate::{Client, Response, Result};

impl Client {
    /// Company master list.
    pub async fn companies_master_list(
        &self,
        request: &GetCompaniesMasterList,
    ) -> Result<Response<Vec<CompanySummary>>> {
        self.fetch_many(request).await
    }

    /// Security master list.
    ///
    /// Blank filters are dropped before sending; the service fails on empty
    /// parameter values for this endpoint.
    pub async fn securities_master_list(
        &self,
        request: &GetSecuritiesMasterList,
    ) -> Result<Response<Vec<SecuritySummary>>> {
        self.fetch_many(request).await
    }

    /// Index master list.
    pub async fn indices_master_list(
        &self,
        request: &GetIndicesMasterList,
    ) -> Result<Response<Vec<IndexSummary>>> {
        self.fetch_many(request).await
    }

    /// Owner master list. Requires a subscription to the ownership feed.
    pub async fn owners_master_list(
        &self,
        request: &GetOwnersMasterList,
    ) -> Result<Response<Vec<OwnerSummary>>> {
        self.fetch_many(request).await
    }

    /// Profile of one company.
    pub async fn company_details(
        &self,
        request: &GetCompanyDetails,
    ) -> Result<Response<CompanyDetails>> {
        self.fetch_one(request).await
    }

    /// Profile of one security.
    pub async fn security_details(
        &self,
        request: &GetSecurityDetails,
    ) -> Result<Response<SecurityDetails>> {
        self.fetch_one(request).await
    }

    /// Profile of one index.
    pub async fn index_details(&self, request: &GetIndexDetails) -> Result<Response<IndexDetails>> {
        self.fetch_one(request).await
    }

    /// Securities matching every condition of the search.
    pub async fn search_securities(
        &self,
        request: &SearchSecurities,
    ) -> Result<Response<Vec<SecuritySearchResult>>> {
        self.fetch_many(request).await
    }

    /// Latest values for each identifier and tag.
    ///
    /// Income statement, cash flow and ratio tags are trailing twelve months
    /// values; everything else is the most recently reported value.
    pub async fn data_points(&self, request: &SearchDataPoints) -> Result<Response<Vec<DataPoint>>> {
        self.fetch_many(request).await
    }

    /// Historical values of one tag.
    pub async fn historical_data(
        &self,
        request: &SearchHistoricalData,
    ) -> Result<Response<Vec<HistoricalValue>>> {
        self.fetch_many(request).await
    }

    /// Latest prices of one security.
    pub async fn current_prices(&self, request: &GetPrices) -> Result<Response<Price>> {
        self.fetch_one(request).await
    }

    /// Regulatory filings of one company.
    pub async fn company_filings(
        &self,
        request: &GetCompanySecFilings,
    ) -> Result<Response<Vec<SecFiling>>> {
        self.fetch_many(request).await
    }

    /// Standardized statement periods of one company.
    pub async fn standardized_fundamentals(
        &self,
        request: &GetStandardizedFundamentals,
    ) -> Result<Response<Vec<FundamentalPeriod>>> {
        self.fetch_many(request).await
    }
}
