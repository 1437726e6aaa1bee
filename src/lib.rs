/// Public library interface for the habit ledger
///
/// This module exports the ledger, the domain types it manages, and the
/// tabular view engine that can be used by other applications or tests.

// Internal modules
mod domain;
mod ledger;
mod table;

// Re-export public modules and types
pub use domain::*;
pub use ledger::{Ledger, LedgerError, LedgerSnapshot};
pub use table::{Column, TableError, TableView, DEFAULT_PAGE_SIZE};
