use crate::classify::{split_amount, RunningBalance};
use crate::common_parsers::{contains_amount, day_mon_short_year, find_amounts};
use crate::error::Advisory;
use crate::lines::{
    reassemble, AmountLineAction, PlainLineAction, ReassemblyRules, RecordStart,
};
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Banorte statements: `DD-MON-YY` rows wrapping their description across
/// lines, a `SALDO ANTERIOR` row carrying the opening balance, and direction
/// inferred from the running-balance delta.
pub struct BanorteStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha", "Descripción", "Retiro", "Depósito"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
    ],
};

const OPENING_MARKER: &str = "SALDO ANTERIOR";

fn record_start(line: &str) -> Option<RecordStart> {
    let (rest, date) = day_mon_short_year(line).ok()?;
    Some(RecordStart {
        date: date.to_string(),
        first_fragment: rest.trim().to_string(),
    })
}

fn no_skip(_: &str) -> bool {
    false
}

const RULES: ReassemblyRules = ReassemblyRules {
    record_start,
    skip: no_skip,
    has_amount: contains_amount,
    // Amount lines join the record text so the trailing [monto, saldo] pair
    // survives even when the columns wrapped onto their own line.
    amount_lines: AmountLineAction::AppendFragment,
    plain_lines: PlainLineAction::Append,
    hard_stop: None,
    paired_with_next: None,
};

impl StatementFormat for BanorteStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let records = reassemble(text, &RULES);
        if records.is_empty() {
            return ParseOutcome::empty(SCHEMA, Advisory::NoMovementsFound);
        }

        // The SALDO ANTERIOR row seeds the pass and never reaches the output.
        let opening = records
            .iter()
            .map(|r| r.description())
            .find(|desc| desc.to_uppercase().contains(OPENING_MARKER))
            .and_then(|desc| find_amounts(&desc).first().copied());
        let Some(opening) = opening else {
            return ParseOutcome::empty(SCHEMA, Advisory::OpeningBalanceNotFound);
        };

        let mut balance = RunningBalance::new(opening);
        let mut table = MovementTable::new(SCHEMA);
        let mut skipped = 0;
        for record in &records {
            let description = record.description();
            if description.to_uppercase().contains(OPENING_MARKER) {
                continue;
            }
            // Amounts ride at the tail of the description text: the last two
            // are [monto, saldo]; a lone amount is the balance only, with no
            // transactional amount recoverable.
            let amounts = find_amounts(&description);
            let (monto, saldo) = match amounts[..] {
                [] => {
                    log::debug!("banorte: registro sin montos: {description}");
                    skipped += 1;
                    continue;
                }
                [saldo] => (0, saldo),
                [.., monto, saldo] => (monto, saldo),
            };
            let direction = balance.classify(saldo);
            let (retiro, deposito) = split_amount(monto, Some(direction));
            table.push(Movement {
                date: record.date.clone(),
                description,
                withdrawal: retiro,
                deposit: deposito,
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
01-MAY-24 SALDO ANTERIOR 10,000.00
02-MAY-24 PAGO CHEQUE 00123
BENEFICIARIO CONSTRUCTORA 2,000.00 8,000.00
03-MAY-24 DEPOSITO EFECTIVO SUCURSAL 1,500.00 9,500.00
04-MAY-24 ANOTACION SIN MONTOS
PENDIENTE DE APLICAR
";

    #[test]
    fn balance_delta_classifies_directions() {
        let outcome = BanorteStatement::parse_text(STATEMENT);
        let movements = outcome.table.movements();
        assert_eq!(movements.len(), 2);

        assert_eq!(movements[0].date, "02-MAY-24");
        assert_eq!(movements[0].withdrawal, 200000);
        assert_eq!(movements[0].deposit, 0);

        assert_eq!(movements[1].date, "03-MAY-24");
        assert_eq!(movements[1].withdrawal, 0);
        assert_eq!(movements[1].deposit, 150000);
    }

    #[test]
    fn opening_row_is_excluded_from_output() {
        let outcome = BanorteStatement::parse_text(STATEMENT);
        assert!(outcome
            .table
            .movements()
            .iter()
            .all(|m| !m.description.contains("SALDO ANTERIOR")));
    }

    #[test]
    fn records_without_amounts_are_dropped() {
        let outcome = BanorteStatement::parse_text(STATEMENT);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn missing_opening_balance_refuses_to_classify() {
        let text = "02-MAY-24 PAGO CHEQUE 2,000.00 8,000.00\n";
        let outcome = BanorteStatement::parse_text(text);
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.advisories, vec![Advisory::OpeningBalanceNotFound]);
    }

    #[test]
    fn no_records_raises_the_advisory() {
        let outcome = BanorteStatement::parse_text("texto sin movimientos\n");
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.advisories, vec![Advisory::NoMovementsFound]);
    }
}
