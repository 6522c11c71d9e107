use nom::{
    bytes::complete::tag,
    character::complete::{alpha1, char, digit1},
    combinator::verify,
    sequence::tuple,
    IResult,
};

use crate::classify::{Direction, KeywordClassifier};
use crate::common_parsers::{find_first, is_day_token, peso_amount, spanish_month};
use crate::error::Advisory;
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Banregio statements: rows carry only the day of month, so the statement
/// period header supplies month and year; the first amount on the row is a
/// cargo or abono depending on the movement code embedded in the line.
pub struct BanregioStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha", "Descripción", "Cargos", "Abonos"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
    ],
};

/// Checked against the whole row text: transfer codes charge, interest
/// credits. Anything else stays unclassified for manual review.
const KEYWORDS: KeywordClassifier = KeywordClassifier::new(
    &[
        (&["TRA"], Direction::Withdrawal),
        (&["INT"], Direction::Deposit),
    ],
    None,
);

/// `del DD al DD de <mes> <yyyy>` in the statement header.
fn statement_period(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = tag("del ")(input)?;
    let (input, _) = verify(digit1, |s: &str| s.len() == 2)(input)?;
    let (input, _) = tag(" al ")(input)?;
    let (input, _) = verify(digit1, |s: &str| s.len() == 2)(input)?;
    let (input, _) = tag(" de ")(input)?;
    let (input, (month, _, year)) =
        tuple((alpha1, char(' '), verify(digit1, |s: &str| s.len() == 4)))(input)?;
    Ok((input, (month, year)))
}

impl StatementFormat for BanregioStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let period = find_first(text, statement_period)
            .filter(|(month, _)| spanish_month(month).is_some());
        let Some((month, year)) = period else {
            return ParseOutcome::empty(SCHEMA, Advisory::StatementPeriodNotFound);
        };

        let mut table = MovementTable::new(SCHEMA);
        for line in text.lines() {
            let line = line.trim();
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() <= 3 || !is_day_token(tokens[0]) {
                continue;
            }

            let mut description = Vec::new();
            let mut cargo = 0;
            let mut abono = 0;
            for token in &tokens[1..] {
                if let Ok((_, amount)) = peso_amount(token) {
                    match KEYWORDS.classify(line) {
                        Some(Direction::Withdrawal) => cargo = amount,
                        Some(Direction::Deposit) => abono = amount,
                        None => {}
                    }
                    break;
                }
                description.push(*token);
            }

            table.push(Movement {
                date: format!("{}/{}/{}", tokens[0], month, year),
                description: description.join(" "),
                withdrawal: cargo,
                deposit: abono,
                balance: None,
            });
        }
        ParseOutcome::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
ESTADO DE CUENTA del 01 al 31 de julio 2024
05 TRA SPEI ENVIADO CONSTRUCTORA 3,500.00 12,000.00
12 INT INTERESES GANADOS 45.10 12,045.10
20 CODIGO DESCONOCIDO OXXO 100.00 11,945.10
encabezado sin dia
";

    #[test]
    fn day_rows_complete_their_date_from_the_period() {
        let outcome = BanregioStatement::parse_text(STATEMENT);
        let movements = outcome.table.movements();
        assert_eq!(movements.len(), 3);
        assert_eq!(movements[0].date, "05/julio/2024");
        assert_eq!(movements[1].date, "12/julio/2024");
    }

    #[test]
    fn movement_codes_pick_the_column() {
        let outcome = BanregioStatement::parse_text(STATEMENT);
        let movements = outcome.table.movements();

        assert_eq!(movements[0].withdrawal, 350000);
        assert_eq!(movements[0].deposit, 0);
        assert_eq!(movements[0].description, "TRA SPEI ENVIADO CONSTRUCTORA");

        assert_eq!(movements[1].withdrawal, 0);
        assert_eq!(movements[1].deposit, 4510);
    }

    #[test]
    fn unknown_codes_stay_unclassified() {
        let outcome = BanregioStatement::parse_text(STATEMENT);
        let unknown = &outcome.table.movements()[2];
        assert_eq!(unknown.withdrawal, 0);
        assert_eq!(unknown.deposit, 0);
    }

    #[test]
    fn missing_period_refuses_to_parse() {
        let outcome = BanregioStatement::parse_text("05 TRA ALGO 1.00\n");
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.advisories, vec![Advisory::StatementPeriodNotFound]);
    }
}
