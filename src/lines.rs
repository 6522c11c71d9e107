use crate::common_parsers::find_amounts;

/// Lookahead-capable cursor over the physical lines of a statement.
/// End of stream is explicit: both operations return `None` once exhausted.
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        LineCursor {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }
}

/// One reassembled movement, before classification.
///
/// `date` is the raw token at whatever granularity the format reports; it is
/// empty for formats that keep the date inline in the first fragment.
/// `amounts` holds every amount token captured from amount-bearing lines, in
/// encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: String,
    pub fragments: Vec<String>,
    pub amounts: Vec<i64>,
}

impl Record {
    fn open(date: String, first_fragment: String) -> Self {
        Record {
            date,
            fragments: vec![first_fragment],
            amounts: Vec::new(),
        }
    }

    /// Description text: fragments joined in encounter order.
    pub fn description(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whitespace tokens of the full accumulated text.
    pub fn tokens(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .flat_map(|f| f.split_whitespace())
            .collect()
    }
}

/// The date token and remaining text of a line that opens a record.
pub struct RecordStart {
    pub date: String,
    pub first_fragment: String,
}

/// What an amount-bearing line contributes besides its amount tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountLineAction {
    /// The whole line joins the record text (Scotiabank).
    AppendFragment,
    /// Only the amount tokens are captured (Banamex, Banorte).
    CaptureOnly,
}

/// What a line with neither date nor amount does to an open record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainLineAction {
    /// Description continuation fragment (Banamex, Banorte).
    Append,
    /// The record is complete; emit it (Scotiabank).
    Close,
}

/// Per-format reassembly rules. The state machine shape is shared; only the
/// predicates and line policies differ between institutions.
pub struct ReassemblyRules {
    /// Recognizes a line that opens a new record.
    pub record_start: fn(&str) -> Option<RecordStart>,
    /// Lines skipped unconditionally, without touching state.
    pub skip: fn(&str) -> bool,
    /// Lines carrying at least one inline amount.
    pub has_amount: fn(&str) -> bool,
    pub amount_lines: AmountLineAction,
    pub plain_lines: PlainLineAction,
    /// Emit any open record and end the pass when this substring appears.
    pub hard_stop: Option<&'static str>,
    /// A line with this substring and the line after it form one
    /// self-contained record, emitted immediately.
    pub paired_with_next: Option<&'static str>,
}

/// Walks the line stream and merges physical lines into logical records.
///
/// A record opens at a line matching the date-start predicate, accumulates
/// description fragments and amount tokens, and closes on the next date line,
/// on a plain line when the format says so, or at end of input (flush).
/// Amount lines with no open record are dropped: a record only exists once a
/// date token has been seen.
pub fn reassemble(text: &str, rules: &ReassemblyRules) -> Vec<Record> {
    let mut cursor = LineCursor::new(text);
    let mut records = Vec::new();
    let mut open: Option<Record> = None;

    while let Some(raw) = cursor.advance() {
        let line = raw.trim();
        if line.is_empty() || (rules.skip)(line) {
            continue;
        }

        if let Some(stop) = rules.hard_stop {
            if line.contains(stop) {
                if let Some(record) = open.take() {
                    records.push(record);
                }
                return records;
            }
        }

        if let Some(marker) = rules.paired_with_next {
            if line.contains(marker) {
                if let Some(record) = open.take() {
                    records.push(record);
                }
                let mut combined = line.to_string();
                if let Some(next) = cursor.advance() {
                    combined.push(' ');
                    combined.push_str(next.trim());
                }
                let mut record = Record::open(String::new(), combined);
                record.amounts = find_amounts(&record.fragments[0]);
                records.push(record);
                continue;
            }
        }

        if let Some(start) = (rules.record_start)(line) {
            if let Some(record) = open.take() {
                records.push(record);
            }
            open = Some(Record::open(start.date, start.first_fragment));
        } else if (rules.has_amount)(line) {
            if let Some(record) = open.as_mut() {
                record.amounts.extend(find_amounts(line));
                if rules.amount_lines == AmountLineAction::AppendFragment {
                    record.fragments.push(line.to_string());
                }
            }
        } else if open.is_some() {
            match rules.plain_lines {
                PlainLineAction::Append => {
                    if let Some(record) = open.as_mut() {
                        record.fragments.push(line.to_string());
                    }
                }
                PlainLineAction::Close => {
                    if let Some(record) = open.take() {
                        records.push(record);
                    }
                }
            }
        }
    }

    if let Some(record) = open.take() {
        records.push(record);
    }
    records
}
