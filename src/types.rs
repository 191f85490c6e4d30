//! Enumerated parameter values and search conditions.

use std::fmt;

use crate::params::LIST_SEPARATOR;
use crate::{Error, Result};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// The value sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// A financial statement.
    pub enum FinancialStatement {
        /// Income statement.
        IncomeStatement => "income_statement",
        /// Balance sheet.
        BalanceSheet => "balance_sheet",
        /// Statement of cash flows.
        CashFlowStatement => "cash_flow_statement",
        /// Calculated metrics and ratios.
        Calculations => "calculations",
    }
}

wire_enum! {
    /// The kind of reporting period requested.
    pub enum PeriodType {
        /// Fiscal years.
        FiscalYear => "FY",
        /// Fiscal quarters.
        Quarter => "QTR",
        /// Trailing twelve months.
        TrailingTwelveMonths => "TTM",
        /// Year to date.
        YearToDate => "YTD",
    }
}

wire_enum! {
    /// Sampling frequency of historical data.
    pub enum Frequency {
        /// One value per day.
        Daily => "daily",
        /// One value per week.
        Weekly => "weekly",
        /// One value per month.
        Monthly => "monthly",
        /// One value per quarter.
        Quarterly => "quarterly",
        /// One value per year.
        Yearly => "yearly",
    }
}

wire_enum! {
    /// Ordering of historical data.
    pub enum SortOrder {
        /// Oldest first.
        Ascending => "asc",
        /// Newest first.
        Descending => "desc",
    }
}

wire_enum! {
    /// The family of an index in the index master list.
    pub enum IndexType {
        /// Stock market indices.
        StockMarket => "stock_market",
        /// Economic indicators.
        Economic => "economic",
        /// SIC sector indices.
        Sic => "sic",
    }
}

wire_enum! {
    /// The kind of owner in the owner master list.
    pub enum OwnerType {
        /// Institutional owners.
        Institutional => "institutional",
        /// Individual insiders.
        Individual => "individual",
    }
}

wire_enum! {
    /// Comparison applied by a securities search condition.
    pub enum SearchOperator {
        /// Greater than.
        Gt => "gt",
        /// Greater than or equal.
        Gte => "gte",
        /// Less than.
        Lt => "lt",
        /// Less than or equal.
        Lte => "lte",
        /// Equal.
        Eq => "eq",
        /// Text contains.
        Contains => "contains",
    }
}

/// A data tag such as `close_price` or `marketcap`.
///
/// The service publishes several thousand tags, so they are carried as
/// strings rather than an exhaustive enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Creates a tag from its wire name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The tag's wire name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Separator between the parts of an encoded search condition.
pub const CONDITION_SEPARATOR: char = '~';

/// One screening condition of a securities search.
///
/// Encodes as `tag~operator~value`.
///
/// # Examples
///
/// ```
/// use intrinio_client::{SearchCondition, SearchOperator};
///
/// let condition = SearchCondition::new("accruedexpenses", SearchOperator::Gt, 0.01);
/// assert_eq!(condition.to_string(), "accruedexpenses~gt~0.01");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCondition {
    /// The tag being compared.
    pub tag: Tag,
    /// The comparison.
    pub operator: SearchOperator,
    /// The value compared against, already rendered for the wire.
    pub value: String,
}

impl SearchCondition {
    /// Creates a condition.
    pub fn new(tag: impl Into<Tag>, operator: SearchOperator, value: impl fmt::Display) -> Self {
        Self {
            tag: tag.into(),
            operator,
            value: value.to_string(),
        }
    }

    /// Checks that the condition encodes to exactly one token.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidRequest`](crate::ErrorKind::InvalidRequest)
    /// error if the tag or value is blank, or contains
    /// [`CONDITION_SEPARATOR`] or [`LIST_SEPARATOR`].
    pub fn validate(&self) -> Result<()> {
        for (part, text) in [("tag", self.tag.as_str()), ("value", self.value.as_str())] {
            if text.trim().is_empty() {
                return Err(Error::invalid_request(format!(
                    "Search condition has a blank {}",
                    part
                )));
            }
            if text.contains(CONDITION_SEPARATOR) || text.contains(LIST_SEPARATOR) {
                return Err(Error::invalid_request(format!(
                    "Search condition {} `{}` contains a reserved separator",
                    part, text
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for SearchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.tag,
            self.operator,
            self.value,
            sep = CONDITION_SEPARATOR
        )
    }
}
