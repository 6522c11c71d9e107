use std::fmt;
use std::io;

use thiserror::Error;

/// Hard failures. Everything else the parsers can recover from is reported
/// through [`Advisory`] conditions instead.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Dispatch failed: the identifier names no supported institution.
    #[error("unsupported statement format: {0}")]
    UnsupportedFormat(String),
    /// The text source could not extract the document.
    #[error("failed to extract statement text: {0}")]
    Extraction(#[from] pdf_extract::OutputError),
    /// The pdftotext collaborator could not be run.
    #[error("failed to run pdftotext: {0}")]
    Io(#[from] io::Error),
}

/// Advisory conditions an operator should see. These never abort a pass; in
/// most cases an empty result is still returned alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    OpeningBalanceNotFound,
    NoMovementsFound,
    MovementsSectionNotFound,
    StatementPeriodNotFound,
    ReviewTrailingMovements,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Advisory::OpeningBalanceNotFound => "No se pudo extraer el saldo inicial.",
            Advisory::NoMovementsFound => "No se encontraron movimientos.",
            Advisory::MovementsSectionNotFound => {
                "No se encontró la sección de movimientos."
            }
            Advisory::StatementPeriodNotFound => {
                "No se pudo encontrar la información del mes y año en el estado de cuenta."
            }
            Advisory::ReviewTrailingMovements => {
                "Revisar los movimientos al final del archivo: los movimientos muy abajo \
                 del PDF pueden no registrarse bien."
            }
        };
        f.write_str(message)
    }
}
