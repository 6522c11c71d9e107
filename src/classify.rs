/// Direction of a movement. Exactly one side of a classified movement is
/// non-zero; an unclassified movement reports zero on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Withdrawal,
    Deposit,
}

/// The running balance carried across one classification pass.
///
/// Seeded from the statement's opening balance and updated to each record's
/// stated balance regardless of how the record classified.
#[derive(Debug, Clone, Copy)]
pub struct RunningBalance {
    current: i64,
}

impl RunningBalance {
    pub fn new(opening: i64) -> Self {
        RunningBalance { current: opening }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    /// Balance fell ⇒ withdrawal; rose or held ⇒ deposit.
    ///
    /// The tie-break is deliberate: an unchanged balance classifies as a
    /// deposit, matching the strict-less comparison the formats have always
    /// used.
    pub fn classify(&mut self, stated: i64) -> Direction {
        let direction = if stated < self.current {
            Direction::Withdrawal
        } else {
            Direction::Deposit
        };
        self.current = stated;
        direction
    }

    /// Inbursa's rule: balance rose ⇒ deposit; fell or held ⇒ withdrawal.
    pub fn classify_strict_increase(&mut self, stated: i64) -> Direction {
        let direction = if stated > self.current {
            Direction::Deposit
        } else {
            Direction::Withdrawal
        };
        self.current = stated;
        direction
    }
}

/// Keyword strategy for formats that report a single undifferentiated amount
/// column with no balance to diff against. Rules are checked in order; the
/// first list containing a matching phrase wins.
///
/// Total on any description: no match falls back to the configured default,
/// or to unclassified (`None`), in which case callers report zero on both
/// sides for manual review.
pub struct KeywordClassifier {
    rules: &'static [(&'static [&'static str], Direction)],
    fallback: Option<Direction>,
}

impl KeywordClassifier {
    pub const fn new(
        rules: &'static [(&'static [&'static str], Direction)],
        fallback: Option<Direction>,
    ) -> Self {
        KeywordClassifier { rules, fallback }
    }

    pub fn classify(&self, description: &str) -> Option<Direction> {
        for (keywords, direction) in self.rules {
            if keywords.iter().any(|k| description.contains(k)) {
                return Some(*direction);
            }
        }
        self.fallback
    }
}

/// Splits a transactional amount into (withdrawal, deposit) cents.
pub fn split_amount(amount: i64, direction: Option<Direction>) -> (i64, i64) {
    match direction {
        Some(Direction::Withdrawal) => (amount, 0),
        Some(Direction::Deposit) => (0, amount),
        None => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_delta_sequence() {
        // Opening 1000.00, balances 800.00 then 950.00:
        // withdrawal of 200.00 followed by deposit of 150.00.
        let mut balance = RunningBalance::new(100000);
        assert_eq!(balance.classify(80000), Direction::Withdrawal);
        assert_eq!(balance.classify(95000), Direction::Deposit);
        assert_eq!(balance.current(), 95000);
    }

    #[test]
    fn unchanged_balance_classifies_as_deposit() {
        // Known boundary case: strict-less means equality lands on deposit.
        let mut balance = RunningBalance::new(50000);
        assert_eq!(balance.classify(50000), Direction::Deposit);
    }

    #[test]
    fn unchanged_balance_is_withdrawal_under_strict_increase() {
        let mut balance = RunningBalance::new(50000);
        assert_eq!(balance.classify_strict_increase(50000), Direction::Withdrawal);
        assert_eq!(balance.classify_strict_increase(60000), Direction::Deposit);
    }

    #[test]
    fn balance_updates_regardless_of_outcome() {
        let mut balance = RunningBalance::new(10000);
        balance.classify(7000);
        assert_eq!(balance.current(), 7000);
        balance.classify(7000);
        assert_eq!(balance.current(), 7000);
    }

    const KEYWORDS: KeywordClassifier = KeywordClassifier::new(
        &[
            (&["ABONO", "DEPOSITO"], Direction::Deposit),
            (&["RETIRO", "COMISION"], Direction::Withdrawal),
        ],
        None,
    );

    #[test]
    fn keyword_first_matching_list_wins() {
        assert_eq!(KEYWORDS.classify("DEPOSITO EFECTIVO"), Some(Direction::Deposit));
        assert_eq!(KEYWORDS.classify("COMISION MEMBRESIA"), Some(Direction::Withdrawal));
    }

    #[test]
    fn keyword_is_total_on_unknown_descriptions() {
        assert_eq!(KEYWORDS.classify("CONCEPTO DESCONOCIDO"), None);
        assert_eq!(split_amount(12345, KEYWORDS.classify("CONCEPTO DESCONOCIDO")), (0, 0));
    }

    #[test]
    fn keyword_fallback_applies() {
        const WITH_FALLBACK: KeywordClassifier = KeywordClassifier::new(
            &[(&["abono"], Direction::Deposit)],
            Some(Direction::Withdrawal),
        );
        assert_eq!(WITH_FALLBACK.classify("pago tarjeta"), Some(Direction::Withdrawal));
    }

    #[test]
    fn split_amount_is_mutually_exclusive() {
        assert_eq!(split_amount(500, Some(Direction::Withdrawal)), (500, 0));
        assert_eq!(split_amount(500, Some(Direction::Deposit)), (0, 500));
    }
}
