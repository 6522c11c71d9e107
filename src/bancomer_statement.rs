use crate::classify::{split_amount, Direction, KeywordClassifier};
use crate::common_parsers::{day_slash_month, peso_amount};
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Bancomer statements: one movement per `DD/Mon` line with a single
/// undifferentiated amount column, so direction comes from the deposit
/// keyword list and everything else counts as a charge.
pub struct BancomerStatement;

const SCHEMA: Schema = Schema {
    headers: &["Operación", "Descripción", "Cargos", "Abonos"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
    ],
};

/// Checked against the lowercased description. Anything that is not
/// recognizably an abono is a cargo.
const KEYWORDS: KeywordClassifier = KeywordClassifier::new(
    &[(
        &["abono", "depósito", "traspaso", "recibidos"],
        Direction::Deposit,
    )],
    Some(Direction::Withdrawal),
);

impl StatementFormat for BancomerStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let mut table = MovementTable::new(SCHEMA);
        let mut skipped = 0;
        for line in text.lines() {
            let line = line.trim();
            if day_slash_month(line).is_err() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() <= 2 {
                skipped += 1;
                continue;
            }
            let first_amount = tokens
                .iter()
                .enumerate()
                .find_map(|(i, t)| peso_amount(t).ok().map(|(_, cents)| (i, cents)));
            let Some((index, amount)) = first_amount else {
                log::debug!("bancomer: fila sin monto: {line}");
                skipped += 1;
                continue;
            };
            let description = tokens
                .get(2..index)
                .map(|t| t.join(" "))
                .unwrap_or_default();
            let direction = KEYWORDS.classify(&description.to_lowercase());
            let (cargo, abono) = split_amount(amount, direction);
            table.push(Movement {
                date: tokens[0].to_string(),
                description,
                withdrawal: cargo,
                deposit: abono,
                balance: None,
            });
        }
        let mut outcome = ParseOutcome::new(table);
        outcome.skipped = skipped;
        outcome
    }
}
