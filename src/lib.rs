//! Turns PDF-extracted bank statement text into classified movement tables.
//!
//! Each supported institution formats its statements differently, so the
//! crate is a collection of per-bank pipelines built from shared pieces:
//! amount and date tokenizers ([`common_parsers`]), the line reassembly
//! state machine ([`lines`]), and the balance-delta / keyword classifiers
//! ([`classify`]). [`statement_format::Bank`] dispatches an identifier to
//! its fixed pipeline; results come back as a [`table::MovementTable`] plus
//! the advisory conditions the operator should see.

pub mod azteca_statement;
pub mod banamex_statement;
pub mod bancomer_statement;
pub mod banorte_statement;
pub mod banregio_statement;
pub mod classify;
pub mod common_parsers;
pub mod error;
pub mod inbursa_statement;
pub mod lines;
pub mod pdftotext;
pub mod santander_statement;
pub mod scotiabank_statement;
pub mod statement_format;
pub mod table;

pub use error::{Advisory, FormatError};
pub use statement_format::{Bank, ParseOutcome, StatementFormat};
pub use table::{Movement, MovementTable};
