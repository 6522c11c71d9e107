use std::path::Path;

use chrono::NaiveDate;

use crate::common_parsers::{parse_decimal_token, section_between};
use crate::error::FormatError;
use crate::pdftotext::pdftotext;
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Banco Azteca statements: one movement per physical line, ISO-dated, with
/// explicit cargo and abono columns read positionally from the row tail.
pub struct AztecaStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha Operación", "Concepto", "Cargo", "Abono"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
    ],
};

const SECTION_START: &str = "Detalle de movimientos realizados";
const SECTION_END: &str = "Revise cuidadosamente éste Estado de Cuenta.";

impl StatementFormat for AztecaStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        // The movements section is sliced out when both markers survived
        // extraction; the ISO-dated row shape is selective enough to scan the
        // whole document when they did not.
        let body = section_between(text, SECTION_START, SECTION_END).unwrap_or(text);

        let mut table = MovementTable::new(SCHEMA);
        let mut skipped = 0;
        for line in body.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(first) = tokens.first() else {
                continue;
            };
            if NaiveDate::parse_from_str(first, "%Y-%m-%d").is_err() {
                continue;
            }
            if tokens.len() <= 5 {
                skipped += 1;
                continue;
            }
            let len = tokens.len();
            let amounts = (
                parse_decimal_token(tokens[len - 3]),
                parse_decimal_token(tokens[len - 2]),
            );
            let (Some(cargo), Some(abono)) = amounts else {
                log::debug!("azteca: fila con montos ilegibles: {line}");
                skipped += 1;
                continue;
            };
            table.push(Movement {
                date: tokens[0].to_string(),
                description: tokens
                    .get(4..len - 3)
                    .map(|t| t.join(" "))
                    .unwrap_or_default(),
                withdrawal: cargo,
                deposit: abono,
                balance: None,
            });
        }

        let mut outcome = ParseOutcome::new(table);
        outcome.skipped = skipped;
        outcome
    }

    /// Column order matters for the positional cargo/abono split, so this
    /// format goes through layout-preserving extraction.
    fn extract(path: &Path) -> Result<String, FormatError> {
        Ok(pdftotext(path, true)?)
    }
}
