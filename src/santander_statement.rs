use nom::{
    character::complete::{digit1, multispace0, multispace1, none_of},
    multi::many_till,
    sequence::{pair, preceded},
    IResult,
};

use crate::classify::{split_amount, RunningBalance};
use crate::common_parsers::{
    day_mon_year, find_all, peso_amount, prefixed_peso_amount, section_between,
    take_until_including,
};
use crate::error::Advisory;
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Santander statements: the checking-account movements live between two
/// literal section markers, seeded by the prior-period closing balance, with
/// `DD-MON-YYYY <folio> <descripción> <monto> <saldo>` rows.
pub struct SantanderStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha", "Descripción", "Retiro", "Depósito"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
    ],
};

const SECTION_START: &str = "Detalle de movimientos cuenta de cheques.";
const SECTION_END: &str = "Detalles de movimientos Dinero Creciente Santander.";
const OPENING_MARKER: &str = "SALDOFINALDELPERIODOANTERIOR:";

#[derive(Debug)]
struct RawRow {
    date: String,
    description: String,
    amount: i64,
    balance: i64,
}

/// One movement row. The description runs from the folio to the trailing
/// [monto, saldo] pair and stays on its physical line.
fn movement_row(input: &str) -> IResult<&str, RawRow> {
    let (input, date) = day_mon_year(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _folio) = digit1(input)?;
    let (input, (description_chars, (amount, balance))) = many_till(
        none_of("\n"),
        pair(
            preceded(multispace1, peso_amount),
            preceded(multispace1, peso_amount),
        ),
    )(input)?;
    Ok((
        input,
        RawRow {
            date: date.to_string(),
            description: description_chars
                .into_iter()
                .collect::<String>()
                .trim()
                .to_string(),
            amount,
            balance,
        },
    ))
}

fn opening_balance(section: &str) -> Option<i64> {
    let (rest, ()) = take_until_including(OPENING_MARKER)(section).ok()?;
    let parsed: IResult<&str, i64> = preceded(multispace0, prefixed_peso_amount)(rest);
    parsed.ok().map(|(_, cents)| cents)
}

impl StatementFormat for SantanderStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let Some(section) = section_between(text, SECTION_START, SECTION_END) else {
            return ParseOutcome::empty(SCHEMA, Advisory::MovementsSectionNotFound);
        };
        let Some(opening) = opening_balance(section) else {
            return ParseOutcome::empty(SCHEMA, Advisory::OpeningBalanceNotFound);
        };
        let rows = find_all(section, movement_row);
        if rows.is_empty() {
            return ParseOutcome::empty(SCHEMA, Advisory::NoMovementsFound);
        }

        let mut balance = RunningBalance::new(opening);
        let mut table = MovementTable::new(SCHEMA);
        for row in rows {
            let direction = balance.classify(row.balance);
            let (retiro, deposito) = split_amount(row.amount, Some(direction));
            table.push(Movement {
                date: row.date,
                description: row.description,
                withdrawal: retiro,
                deposit: deposito,
                balance: Some(row.balance),
            });
        }
        ParseOutcome::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
Estado de cuenta Santander
Detalle de movimientos cuenta de cheques.
SALDOFINALDELPERIODOANTERIOR: $20,000.00
02-ENE-2024 8552594 NOMINA PAGO DE NOMINA 4,500.00 15,500.00
05-ENE-2024 8552601 DEPOSITO EN EFECTIVO 3,000.00 18,500.00
09-ENE-2024 8552617 COBRO COMISION MEMBRESIA 0.00 18,500.00
Detalles de movimientos Dinero Creciente Santander.
11-ENE-2024 9990001 FUERA DE SECCION 1.00 2.00
";

    #[test]
    fn rows_classify_by_balance_delta() {
        let outcome = SantanderStatement::parse_text(STATEMENT);
        let movements = outcome.table.movements();
        assert_eq!(movements.len(), 3);

        assert_eq!(movements[0].date, "02-ENE-2024");
        assert_eq!(movements[0].withdrawal, 450000);
        assert_eq!(movements[0].deposit, 0);
        assert!(movements[0].description.contains("NOMINA"));

        assert_eq!(movements[1].withdrawal, 0);
        assert_eq!(movements[1].deposit, 300000);
    }

    #[test]
    fn unchanged_balance_lands_on_deposito() {
        // Known boundary case of the strict-less rule.
        let outcome = SantanderStatement::parse_text(STATEMENT);
        let held = &outcome.table.movements()[2];
        assert_eq!(held.withdrawal, 0);
        assert_eq!(held.deposit, 0);
        assert_eq!(held.balance, Some(1850000));
    }

    #[test]
    fn rows_outside_the_section_are_ignored() {
        let outcome = SantanderStatement::parse_text(STATEMENT);
        assert!(outcome
            .table
            .movements()
            .iter()
            .all(|m| !m.description.contains("FUERA DE SECCION")));
    }

    #[test]
    fn missing_section_raises_the_advisory() {
        let outcome = SantanderStatement::parse_text("texto cualquiera");
        assert!(outcome.table.is_empty());
        assert_eq!(
            outcome.advisories,
            vec![Advisory::MovementsSectionNotFound]
        );
    }

    #[test]
    fn missing_opening_balance_raises_the_advisory() {
        let text = "\
Detalle de movimientos cuenta de cheques.
02-ENE-2024 8552594 NOMINA 4,500.00 15,500.00
Detalles de movimientos Dinero Creciente Santander.
";
        let outcome = SantanderStatement::parse_text(text);
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.advisories, vec![Advisory::OpeningBalanceNotFound]);
    }

    #[test]
    fn balance_equation_holds_across_the_pass() {
        let outcome = SantanderStatement::parse_text(STATEMENT);
        let mut previous = 2000000;
        for movement in outcome.table.movements() {
            let stated = movement.balance.expect("balance column is always stated");
            assert_eq!(stated, previous - movement.withdrawal + movement.deposit);
            assert!(movement.withdrawal == 0 || movement.deposit == 0);
            previous = stated;
        }
    }

    #[test]
    fn reruns_are_deterministic() {
        let first = SantanderStatement::parse_text(STATEMENT);
        let second = SantanderStatement::parse_text(STATEMENT);
        assert_eq!(first.table.rows(), second.table.rows());
        assert_eq!(first.table.headers(), second.table.headers());
    }
}
