//! Wire types for the paginated transaction-search API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::parse::parse_amount;

/// One page of search results, exactly as the service returns it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Page {
    /// 1-based page number reported by the server
    pub page: u32,
    pub per_page: u32,
    /// Total records across all pages
    pub total: u64,
    pub total_pages: u32,
    pub data: Vec<TransactionRecord>,
}

/// A single transaction on a page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: String,
    /// Epoch milliseconds, UTC
    pub timestamp: i64,
    /// Raw type string ("credit" / "debit", any case)
    pub txn_type: String,
    /// Currency-prefixed amount, e.g. "$1,234.56"
    pub amount: String,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub address: String,
    pub city: String,
    pub zip_code: i64,
}

impl TransactionRecord {
    /// When the transaction happened, interpreted as epoch millis in UTC.
    pub fn occurred_at(&self) -> Result<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp).ok_or_else(|| {
            Error::parse(format!(
                "transaction {} has out-of-range timestamp {}",
                self.id, self.timestamp
            ))
        })
    }

    /// Numeric amount with the currency symbol and separators removed.
    pub fn amount_value(&self) -> Result<f64> {
        parse_amount(&self.amount)
    }

    /// Case-insensitive type test against a configured label.
    pub fn is_type(&self, label: &str) -> bool {
        self.txn_type.eq_ignore_ascii_case(label)
    }
}

/// Requested transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnType {
    Credit,
    Debit,
}

/// The strings the service uses for each [`TxnType`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TxnLabels {
    pub credit: String,
    pub debit: String,
}

impl Default for TxnLabels {
    fn default() -> Self {
        Self {
            credit: "credit".to_string(),
            debit: "debit".to_string(),
        }
    }
}

impl TxnLabels {
    pub fn label(&self, kind: TxnType) -> &str {
        match kind {
            TxnType::Credit => &self.credit,
            TxnType::Debit => &self.debit,
        }
    }

    /// Normalize user input to a [`TxnType`]. Anything other than the two
    /// labels (ignoring case and surrounding whitespace) is a validation error.
    pub fn parse(&self, input: &str) -> Result<TxnType> {
        let normalized = input.trim().to_lowercase();
        if normalized == self.credit.to_lowercase() {
            Ok(TxnType::Credit)
        } else if normalized == self.debit.to_lowercase() {
            Ok(TxnType::Debit)
        } else {
            Err(Error::validation(format!("invalid txnType: {input}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const PAGE_JSON: &str = r#"{
        "page": 1,
        "per_page": 10,
        "total": 1,
        "total_pages": 1,
        "data": [{
            "id": 1,
            "userId": 1,
            "userName": "John Oliver",
            "timestamp": 1549536882071,
            "txnType": "debit",
            "amount": "$1,670.57",
            "location": {"id": 7, "address": "770, Deepends, Stockpost Street", "city": "Ilchester", "zipCode": 84080},
            "ip": "212.215.115.165"
        }]
    }"#;

    #[test]
    fn test_deserialize_page() {
        let page: Page = serde_json::from_str(PAGE_JSON).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.data.len(), 1);

        let rec = &page.data[0];
        assert_eq!(rec.user_name, "John Oliver");
        assert_eq!(rec.txn_type, "debit");
        assert_eq!(rec.location.zip_code, 84080);
        assert_eq!(rec.amount_value().unwrap(), 1670.57);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": 4, "userId": 2, "timestamp": 0, "txnType": "credit", "amount": "$1.00"}"#;
        let rec: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.user_name, "");
        assert_eq!(rec.location, Location::default());
    }

    #[test]
    fn test_occurred_at_is_utc() {
        use chrono::Datelike;
        let page: Page = serde_json::from_str(PAGE_JSON).unwrap();
        let at = page.data[0].occurred_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2019, 2, 7));
    }

    #[test]
    fn test_occurred_at_out_of_range() {
        let page: Page = serde_json::from_str(PAGE_JSON).unwrap();
        let mut rec = page.data[0].clone();
        rec.timestamp = i64::MAX;
        assert_eq!(rec.occurred_at().unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_labels_parse_case_insensitive() {
        let labels = TxnLabels::default();
        assert_eq!(labels.parse("DEBIT").unwrap(), TxnType::Debit);
        assert_eq!(labels.parse("Credit").unwrap(), TxnType::Credit);
        assert_eq!(labels.parse("refund").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(labels.parse("").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_is_type_ignores_case() {
        let page: Page = serde_json::from_str(PAGE_JSON).unwrap();
        let mut rec = page.data[0].clone();
        rec.txn_type = "Debit".to_string();
        assert!(rec.is_type("debit"));
        assert!(!rec.is_type("credit"));
    }
}
