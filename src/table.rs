//! Sink-facing tabular output: per-format column schemas over classified
//! movements. The sink (CSV, spreadsheet, whatever the caller wires up) only
//! ever sees headers and formatted string cells.

/// The roles a column can project from a [`Movement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Description,
    Withdrawal,
    Deposit,
    Balance,
}

/// A format's fixed output schema: header titles (as the institution names
/// them) and the movement field each column projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub headers: &'static [&'static str],
    pub columns: &'static [Column],
}

/// One classified movement. Amounts are cents; at most one of
/// withdrawal/deposit is non-zero for balance-column formats, and both are
/// zero when the keyword strategy could not classify the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub date: String,
    pub description: String,
    pub withdrawal: i64,
    pub deposit: i64,
    pub balance: Option<i64>,
}

/// Ordered rows under a fixed schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementTable {
    schema: Schema,
    movements: Vec<Movement>,
}

impl MovementTable {
    pub fn new(schema: Schema) -> Self {
        MovementTable {
            schema,
            movements: Vec::new(),
        }
    }

    pub fn push(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.schema.headers
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Rows as formatted cells, one per schema column.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.movements
            .iter()
            .map(|movement| {
                self.schema
                    .columns
                    .iter()
                    .map(|column| cell(movement, *column))
                    .collect()
            })
            .collect()
    }
}

fn cell(movement: &Movement, column: Column) -> String {
    match column {
        Column::Date => movement.date.clone(),
        Column::Description => movement.description.clone(),
        Column::Withdrawal => format_cents(movement.withdrawal),
        Column::Deposit => format_cents(movement.deposit),
        Column::Balance => format_cents(movement.balance.unwrap_or(0)),
    }
}

/// Cents back to the statement's decimal form, without thousands separators.
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
