//! The module contains the errors the ledger can throw.
use sea_orm::DbErr;
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Export failed: {0}")]
    Export(String),
}
