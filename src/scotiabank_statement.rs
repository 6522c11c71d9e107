use nom::{
    bytes::complete::tag_no_case,
    character::complete::{multispace0, none_of},
    multi::many_till,
    IResult,
};

use crate::classify::{split_amount, RunningBalance};
use crate::common_parsers::{
    contains_prefixed_amount, day_month_word, find_first, parse_decimal_token,
    prefixed_peso_amount,
};
use crate::error::Advisory;
use crate::lines::{
    reassemble, AmountLineAction, PlainLineAction, ReassemblyRules, RecordStart,
};
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Scotiabank statements: `DD Mon` rows whose amount columns are
/// `$`-prefixed and frequently wrapped, classified against the running
/// balance seeded from the "Saldo inicial" header. Movements near the end of
/// the file extract unreliably, so every pass carries a review advisory.
pub struct ScotiabankStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha", "Concepto", "Depósito", "Retiro", "Saldo"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Deposit,
        Column::Withdrawal,
        Column::Balance,
    ],
};

/// Summary rows interleaved with the movements.
const SKIP_SIGNATURES: &[&str] = &["Saldo", "final", "Comisionescobradas"];

fn skip_line(line: &str) -> bool {
    SKIP_SIGNATURES.iter().any(|sig| line.contains(sig))
}

fn record_start(line: &str) -> Option<RecordStart> {
    day_month_word(line).ok()?;
    // The date stays inline: classification slices the combined row by
    // whitespace tokens.
    Some(RecordStart {
        date: String::new(),
        first_fragment: line.to_string(),
    })
}

const RULES: ReassemblyRules = ReassemblyRules {
    record_start,
    skip: skip_line,
    has_amount: contains_prefixed_amount,
    amount_lines: AmountLineAction::AppendFragment,
    plain_lines: PlainLineAction::Close,
    hard_stop: None,
    paired_with_next: Some("DEPOSITOS SBC CAMARA"),
};

/// `S aldo inicial ... $1,234.56` — extraction tends to split the leading
/// letter off, and the amount stays on the same line.
fn saldo_inicial(input: &str) -> IResult<&str, i64> {
    let (input, _) = tag_no_case("S")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = tag_no_case("aldo")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = tag_no_case("inicial")(input)?;
    let (input, (_, cents)) = many_till(none_of("\n"), prefixed_peso_amount)(input)?;
    Ok((input, cents))
}

impl StatementFormat for ScotiabankStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let Some(opening) = find_first(text, saldo_inicial) else {
            return ParseOutcome::empty(SCHEMA, Advisory::OpeningBalanceNotFound);
        };

        let mut balance = RunningBalance::new(opening);
        let mut table = MovementTable::new(SCHEMA);
        let mut skipped = 0;
        for record in reassemble(text, &RULES) {
            let tokens = record.tokens();
            // Fewer tokens than a plausible row: dropped, not emitted.
            if tokens.len() <= 4 {
                skipped += 1;
                continue;
            }
            let len = tokens.len();
            let amounts = (
                parse_decimal_token(tokens[len - 2]),
                parse_decimal_token(tokens[len - 1]),
            );
            let (Some(monto), Some(saldo)) = amounts else {
                log::debug!("scotiabank: registro con montos ilegibles");
                skipped += 1;
                continue;
            };

            let direction = balance.classify(saldo);
            let (retiro, deposito) = split_amount(monto, Some(direction));
            table.push(Movement {
                date: tokens[..2].join(" "),
                description: tokens[2..len - 3].join(" "),
                withdrawal: retiro,
                deposit: deposito,
                balance: Some(saldo),
            });
        }

        let mut outcome = ParseOutcome::new(table);
        outcome.skipped = skipped;
        // Movements close to the end of the PDF may not register well.
        outcome.advisories.push(Advisory::ReviewTrailingMovements);
        outcome
    }
}
