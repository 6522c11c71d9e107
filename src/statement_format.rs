use std::fmt;
use std::path::Path;
use std::str::FromStr;

use pdf_extract::extract_text;

use crate::azteca_statement::AztecaStatement;
use crate::banamex_statement::BanamexStatement;
use crate::bancomer_statement::BancomerStatement;
use crate::banorte_statement::BanorteStatement;
use crate::banregio_statement::BanregioStatement;
use crate::error::{Advisory, FormatError};
use crate::inbursa_statement::InbursaStatement;
use crate::santander_statement::SantanderStatement;
use crate::scotiabank_statement::ScotiabankStatement;
use crate::table::{MovementTable, Schema};

/// What one parsing pass produces: the classified rows, the advisory
/// conditions the caller must surface to the operator, and how many records
/// were dropped along the way.
#[derive(Debug)]
pub struct ParseOutcome {
    pub table: MovementTable,
    pub advisories: Vec<Advisory>,
    pub skipped: usize,
}

impl ParseOutcome {
    pub fn new(table: MovementTable) -> Self {
        ParseOutcome {
            table,
            advisories: Vec::new(),
            skipped: 0,
        }
    }

    /// Empty result carrying an advisory — the recoverable "structural
    /// absence" outcome (missing section, missing opening balance, ...).
    pub fn empty(schema: Schema, advisory: Advisory) -> Self {
        ParseOutcome {
            table: MovementTable::new(schema),
            advisories: vec![advisory],
            skipped: 0,
        }
    }
}

/// One institution's statement pipeline: text in, classified table out.
///
/// `parse_text` is the core; `parse_file` wires in the text-source
/// collaborator. Formats whose tables only survive layout-preserving
/// extraction override `extract`.
pub trait StatementFormat {
    fn parse_text(text: &str) -> ParseOutcome;

    fn extract(path: &Path) -> Result<String, FormatError> {
        Ok(extract_text(path)?)
    }

    fn parse_file(path: &Path) -> Result<ParseOutcome, FormatError> {
        Ok(Self::parse_text(&Self::extract(path)?))
    }
}

/// The closed set of supported institutions. Each variant is a fixed
/// pipeline configuration, not a plug-in; an unknown identifier fails fast
/// in [`Bank::from_str`] with nothing processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Banamex,
    BancoAzteca,
    Bancomer,
    Banorte,
    Banregio,
    Inbursa,
    Santander,
    Scotiabank,
}

impl Bank {
    pub const ALL: [Bank; 8] = [
        Bank::Banamex,
        Bank::BancoAzteca,
        Bank::Bancomer,
        Bank::Banorte,
        Bank::Banregio,
        Bank::Inbursa,
        Bank::Santander,
        Bank::Scotiabank,
    ];

    /// The identifier the statements have always been selected by.
    pub fn name(self) -> &'static str {
        match self {
            Bank::Banamex => "BANAMEX",
            Bank::BancoAzteca => "BANCOAZTE",
            Bank::Bancomer => "BANCOMER",
            Bank::Banorte => "BANORTE",
            Bank::Banregio => "BANREGIO",
            Bank::Inbursa => "INBURSA",
            Bank::Santander => "SANTANDER",
            Bank::Scotiabank => "SCOTIABANK",
        }
    }

    pub fn parse_text(self, text: &str) -> ParseOutcome {
        match self {
            Bank::Banamex => BanamexStatement::parse_text(text),
            Bank::BancoAzteca => AztecaStatement::parse_text(text),
            Bank::Bancomer => BancomerStatement::parse_text(text),
            Bank::Banorte => BanorteStatement::parse_text(text),
            Bank::Banregio => BanregioStatement::parse_text(text),
            Bank::Inbursa => InbursaStatement::parse_text(text),
            Bank::Santander => SantanderStatement::parse_text(text),
            Bank::Scotiabank => ScotiabankStatement::parse_text(text),
        }
    }

    pub fn parse_file(self, path: &Path) -> Result<ParseOutcome, FormatError> {
        match self {
            Bank::Banamex => BanamexStatement::parse_file(path),
            Bank::BancoAzteca => AztecaStatement::parse_file(path),
            Bank::Bancomer => BancomerStatement::parse_file(path),
            Bank::Banorte => BanorteStatement::parse_file(path),
            Bank::Banregio => BanregioStatement::parse_file(path),
            Bank::Inbursa => InbursaStatement::parse_file(path),
            Bank::Santander => SantanderStatement::parse_file(path),
            Bank::Scotiabank => ScotiabankStatement::parse_file(path),
        }
    }
}

impl FromStr for Bank {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BANAMEX" => Ok(Bank::Banamex),
            "BANCOAZTE" => Ok(Bank::BancoAzteca),
            "BANCOMER" => Ok(Bank::Bancomer),
            "BANORTE" => Ok(Bank::Banorte),
            "BANREGIO" => Ok(Bank::Banregio),
            "INBURSA" => Ok(Bank::Inbursa),
            "SANTANDER" => Ok(Bank::Santander),
            "SCOTIABANK" => Ok(Bank::Scotiabank),
            _ => Err(FormatError::UnsupportedFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
