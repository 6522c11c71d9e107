use crate::classify::{split_amount, RunningBalance};
use crate::common_parsers::{find_amounts, mon_day, parse_decimal_token};
use crate::error::Advisory;
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Inbursa statements: one movement per `MON DD` line with trailing
/// [monto, saldo] columns, seeded by the `BALANCE INICIAL` row. Direction is
/// the running-balance delta with Inbursa's own tie-break: only a strictly
/// increased balance counts as an abono.
pub struct InbursaStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha", "Concepto", "Cargos", "Abonos"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
    ],
};

const OPENING_MARKER: &str = "BALANCE INICIAL";

impl StatementFormat for InbursaStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let opening = text
            .lines()
            .find(|line| line.contains(OPENING_MARKER))
            .and_then(|line| find_amounts(line).first().copied());
        let Some(opening) = opening else {
            return ParseOutcome::empty(SCHEMA, Advisory::OpeningBalanceNotFound);
        };

        let mut balance = RunningBalance::new(opening);
        let mut table = MovementTable::new(SCHEMA);
        let mut skipped = 0;
        for line in text.lines() {
            let line = line.trim();
            if mon_day(line).is_err() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 5 {
                log::debug!("inbursa: línea ignorada por tener menos de 5 partes: {line}");
                skipped += 1;
                continue;
            }
            let len = tokens.len();
            let amounts = (
                parse_decimal_token(tokens[len - 2]),
                parse_decimal_token(tokens[len - 1]),
            );
            let (Some(monto), Some(saldo)) = amounts else {
                log::warn!("inbursa: error al procesar la línea: {line}");
                skipped += 1;
                continue;
            };

            let direction = balance.classify_strict_increase(saldo);
            let (cargo, abono) = split_amount(monto, Some(direction));
            table.push(Movement {
                date: tokens[..2].join(" "),
                description: tokens[2..len - 2].join(" "),
                withdrawal: cargo,
                deposit: abono,
                balance: Some(saldo),
            });
        }

        let mut outcome = ParseOutcome::new(table);
        outcome.skipped = skipped;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
CUENTA EFE INBURSA
BALANCE INICIAL 5,000.00
MAY 02 PAGO PROVEEDOR ACERO 1,200.00 3,800.00
MAY 05 DEPOSITO CLIENTE OBRA 2,000.00 5,800.00
MAY 06 COMISION MANEJO CUENTA 50.00 5,800.00
MAY 07 corto
";

    #[test]
    fn classifies_against_the_initial_balance() {
        let outcome = InbursaStatement::parse_text(STATEMENT);
        let movements = outcome.table.movements();
        assert_eq!(movements.len(), 3);

        assert_eq!(movements[0].date, "MAY 02");
        assert_eq!(movements[0].description, "PAGO PROVEEDOR ACERO");
        assert_eq!(movements[0].withdrawal, 120000);
        assert_eq!(movements[0].deposit, 0);

        assert_eq!(movements[1].withdrawal, 0);
        assert_eq!(movements[1].deposit, 200000);
    }

    #[test]
    fn unchanged_balance_counts_as_cargo() {
        // The tie-break differs from the other balance-delta formats.
        let outcome = InbursaStatement::parse_text(STATEMENT);
        let held = &outcome.table.movements()[2];
        assert_eq!(held.withdrawal, 5000);
        assert_eq!(held.deposit, 0);
        assert_eq!(held.balance, Some(580000));
    }

    #[test]
    fn short_lines_are_counted_and_skipped() {
        let outcome = InbursaStatement::parse_text(STATEMENT);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn missing_initial_balance_refuses_to_classify() {
        let text = "MAY 02 PAGO PROVEEDOR 1,200.00 3,800.00\n";
        let outcome = InbursaStatement::parse_text(text);
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.advisories, vec![Advisory::OpeningBalanceNotFound]);
    }
}
