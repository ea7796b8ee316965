//! Find a user's transactions that exceed their average monthly debit spend.

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{TransactionRecord, TxnLabels, TxnType};
use crate::parse::MonthYear;
use crate::source::{PageFetcher, PagedTransactionSource};

/// Returned as the only id when nothing qualifies.
pub const NO_MATCH: i64 = -1;

#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub labels: TxnLabels,
}

/// Outcome of one analysis, with the statistics it was based on.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub ids: Vec<i64>,
    pub period: MonthYear,
    pub txn_type: TxnType,
    /// Debit records in the period, regardless of the requested type
    pub debit_count: usize,
    pub debit_sum: f64,
    /// `debit_sum / debit_count`; not finite when there were no debits
    pub average: f64,
    /// Records of the requested type in the period
    pub candidates: usize,
    pub pages_fetched: usize,
}

pub struct TransactionAnalyzer<F> {
    fetcher: F,
    config: AnalyzerConfig,
}

impl<F: PageFetcher> TransactionAnalyzer<F> {
    pub fn new(fetcher: F, config: AnalyzerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Ids of `txn_type` transactions in `month_year` whose amount is above
    /// the average debit for that month, or `[NO_MATCH]`.
    pub fn analyze(&self, user_id: i64, txn_type: &str, month_year: &str) -> Result<Vec<i64>> {
        self.analyze_detailed(user_id, txn_type, month_year)
            .map(|a| a.ids)
    }

    pub fn analyze_detailed(
        &self,
        user_id: i64,
        txn_type: &str,
        month_year: &str,
    ) -> Result<Analysis> {
        let labels = &self.config.labels;
        let kind = labels.parse(txn_type)?;
        let period: MonthYear = month_year.parse()?;
        let wanted = labels.label(kind);

        info!(user_id, txn_type = wanted, %period, "analyzing transactions");

        let mut source = PagedTransactionSource::initialize(&self.fetcher, user_id)?;

        let mut debit_count = 0usize;
        let mut debit_sum = 0.0f64;
        let mut candidates: Vec<(TransactionRecord, f64)> = Vec::new();

        while let Some(page) = source.get_next()? {
            for record in page.data {
                if !period.contains(record.occurred_at()?) {
                    continue;
                }

                let is_debit = record.is_type(&labels.debit);
                let is_wanted = record.is_type(wanted);
                if !is_debit && !is_wanted {
                    continue;
                }

                let amount = record.amount_value()?;
                if is_debit {
                    debit_count += 1;
                    debit_sum += amount;
                }
                if is_wanted {
                    candidates.push((record, amount));
                }
            }
        }

        // No guard on zero debits: NaN compares false and falls through to NO_MATCH.
        let average = debit_sum / debit_count as f64;
        debug!(debit_count, debit_sum, average, candidates = candidates.len(), "monthly statistics");

        let mut ids: Vec<i64> = candidates
            .iter()
            .filter(|(_, amount)| *amount > average)
            .map(|(record, _)| record.id)
            .collect();

        if ids.is_empty() {
            ids.push(NO_MATCH);
        }

        info!(user_id, matches = ids.len(), pages = source.pages_fetched(), "analysis complete");

        Ok(Analysis {
            ids,
            period,
            txn_type: kind,
            debit_count,
            debit_sum,
            average,
            candidates: candidates.len(),
            pages_fetched: source.pages_fetched(),
        })
    }
}
