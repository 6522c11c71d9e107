use crate::classify::{split_amount, Direction, KeywordClassifier};
use crate::common_parsers::{contains_amount, day_month_word, strip_noise_lines};
use crate::lines::{
    reassemble, AmountLineAction, PlainLineAction, ReassemblyRules, Record, RecordStart,
};
use crate::statement_format::{ParseOutcome, StatementFormat};
use crate::table::{Column, Movement, MovementTable, Schema};

/// Banamex checking statements: `DD Mon` rows with boilerplate interleaved in
/// the movements table and the amount columns usually wrapped onto a
/// following line. No reliable balance column on every row, so direction
/// comes from the keyword lists.
pub struct BanamexStatement;

const SCHEMA: Schema = Schema {
    headers: &["Fecha", "Concepto", "Retiro", "Depósito", "Saldo"],
    columns: &[
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
        Column::Balance,
    ],
};

/// Boilerplate signatures interleaved within the movements table.
const NOISE: &[&str] = &[
    "000180.B07CHDA008.OD.0731.01",
    "ESTADOS DE CUENTA AL",
    "CLIENTE:",
    "Página:",
    "GRUPO SUNEGO DE PUEBLA SA DE CV",
    "DETALLE DE OPERACIONES",
    "FECHA CONCEPTO RETIROS DEPOSITOS SALDO",
];

const KEYWORDS: KeywordClassifier = KeywordClassifier::new(
    &[
        (
            &["PAGO RECIBIDO", "ABONO", "DEPOSITO", "TRASPASO REF"],
            Direction::Deposit,
        ),
        (
            &[
                "PAGO A",
                "COMPRA",
                "RETIRO",
                "COMISION",
                "IVA COMISION",
                "DOMI AMERICAN EXPRESS",
                "COBRO IMP TPV GPRS",
                "COBRO COMI TPV GPRS",
                "COMPRA INVERSION INTEGRAL",
                "PAGO INTERBANCARIO A BBVA MEXICO",
                "COBRO IMP COM CUOT BJA FAC",
                "COBRO COM CUOT BJA FAC",
                "PAGO INTERBANCARIO A BANORTE",
                "PAGO INTERBANCARIO A SANTANDER",
                "PAGO INTERBANCARIO A BAJIO",
            ],
            Direction::Withdrawal,
        ),
    ],
    None,
);

fn record_start(line: &str) -> Option<RecordStart> {
    let (rest, date) = day_month_word(line).ok()?;
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
    amount_lines: AmountLineAction::CaptureOnly,
    plain_lines: PlainLineAction::Append,
    hard_stop: Some("SALDO MINIMO REQUERIDO"),
    paired_with_next: None,
};

fn classify(record: &Record) -> Movement {
    let concepto = record.description();
    let (withdrawal, deposit, saldo) = match record.amounts[..] {
        // No amount ever closed the record: emitted for manual review.
        [] => (0, 0, 0),
        [amount] => keyword_split(&concepto, amount, 0),
        [amount, saldo] => keyword_split(&concepto, amount, saldo),
        // Three or more tokens are the explicit retiro/deposito/saldo columns.
        _ => {
            let len = record.amounts.len();
            (record.amounts[len - 3], 0, record.amounts[len - 1])
        }
    };
    Movement {
        date: record.date.clone(),
        description: concepto,
        withdrawal,
        deposit,
        balance: Some(saldo),
    }
}

fn keyword_split(concepto: &str, amount: i64, saldo: i64) -> (i64, i64, i64) {
    let direction = KEYWORDS.classify(&concepto.to_uppercase());
    if direction.is_none() {
        log::debug!("banamex: concepto sin clasificar: {concepto}");
    }
    let (withdrawal, deposit) = split_amount(amount, direction);
    (withdrawal, deposit, saldo)
}

impl StatementFormat for BanamexStatement {
    fn parse_text(text: &str) -> ParseOutcome {
        let cleaned = strip_noise_lines(text, NOISE);
        let mut table = MovementTable::new(SCHEMA);
        for record in reassemble(&cleaned, &RULES) {
            table.push(classify(&record));
        }
        ParseOutcome::new(table)
    }
}
