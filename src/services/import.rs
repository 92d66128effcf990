//! Bank CSV import service
//!
//! Imports transactions from bank CSV exports with a configurable column
//! mapping. Duplicate rows are detected by a content-derived import id, so
//! re-importing the same file is a no-op. Malformed rows are skipped and
//! counted, not fatal.

use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use crate::audit::EntityType;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{AccountId, Money, Transaction};
use crate::storage::Storage;

/// Column mapping configuration for CSV import
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Index of the date column
    pub date_column: usize,
    /// Index of the description column
    pub description_column: usize,
    /// Index of the amount column
    pub amount_column: usize,
    /// Index of the category column, if the export carries one
    pub category_column: Option<usize>,
    /// Date format string (e.g., "%Y-%m-%d", "%m/%d/%Y")
    pub date_format: String,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Whether to invert amounts (credit card exports often show purchases
    /// as positive)
    pub invert_amounts: bool,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: 1,
            amount_column: 2,
            category_column: None,
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            invert_amounts: false,
        }
    }
}

impl ColumnMapping {
    /// Common mapping for credit card CSV exports
    /// (date, description, amount, category; purchases positive)
    pub fn credit_card() -> Self {
        Self {
            category_column: Some(3),
            date_format: "%m/%d/%Y".to_string(),
            invert_amounts: true,
            ..Self::default()
        }
    }
}

/// Result counts from one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// Service importing bank CSV files into an account
pub struct CsvImporter<'a> {
    storage: &'a Storage,
}

impl<'a> CsvImporter<'a> {
    /// Create a new importer
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a CSV file into an account
    pub fn import_file(
        &self,
        account_id: AccountId,
        path: &Path,
        mapping: &ColumnMapping,
    ) -> PayoffResult<ImportSummary> {
        let account = self
            .storage
            .accounts
            .get(account_id)?
            .ok_or_else(|| PayoffError::account_not_found(account_id.to_string()))?;

        if account.archived {
            return Err(PayoffError::Validation(
                "Cannot import into an archived account".into(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(mapping.has_header)
            .flexible(true)
            .from_path(path)
            .map_err(|e| PayoffError::Import(format!("Failed to open {}: {}", path.display(), e)))?;

        let mut summary = ImportSummary::default();

        for (row, record) in reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(row, "skipping unreadable CSV row: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            let mut txn = match parse_record(account_id, &record, mapping) {
                Ok(txn) => txn,
                Err(e) => {
                    warn!(row, "skipping malformed CSV row: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            let import_id = txn.generate_import_id();
            if self
                .storage
                .transactions
                .find_by_import_id(&import_id)?
                .is_some()
            {
                summary.skipped_duplicates += 1;
                continue;
            }
            txn.import_id = Some(import_id);

            self.storage.transactions.upsert(txn.clone())?;
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.description.clone()),
                &txn,
            )?;
            summary.imported += 1;
        }

        self.storage.transactions.save()?;
        Ok(summary)
    }
}

fn parse_record(
    account_id: AccountId,
    record: &csv::StringRecord,
    mapping: &ColumnMapping,
) -> PayoffResult<Transaction> {
    let field = |idx: usize| {
        record
            .get(idx)
            .map(str::trim)
            .ok_or_else(|| PayoffError::Import(format!("Missing column {}", idx)))
    };

    let date = NaiveDate::parse_from_str(field(mapping.date_column)?, &mapping.date_format)
        .map_err(|e| PayoffError::Import(format!("Bad date: {}", e)))?;

    let mut amount = Money::parse(field(mapping.amount_column)?)
        .map_err(|e| PayoffError::Import(format!("Bad amount: {}", e)))?;
    if mapping.invert_amounts {
        amount = -amount;
    }

    let description = field(mapping.description_column)?.to_string();

    let category = match mapping.category_column {
        Some(idx) => {
            let value = field(idx)?;
            (!value.is_empty()).then(|| value.to_string())
        }
        None => None,
    };

    Ok(Transaction::with_details(
        account_id,
        date,
        amount,
        description,
        category,
        None,
    ))
}
