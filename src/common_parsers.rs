use chrono::Month;
use nom::{
    bytes::complete::{tag, take_until, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, recognize, verify},
    error::Error,
    multi::separated_list1,
    sequence::{preceded, tuple},
    IResult,
};

/// Monetary amount in cents: `1,234.56`, optionally `$`-prefixed.
///
/// Statements follow the fixed `$X,XXX.XX` convention; anything with more or
/// fewer than two cent digits is not an amount.
pub fn peso_amount(input: &str) -> IResult<&str, i64> {
    preceded(opt(char('$')), grouped_cents)(input)
}

/// Like [`peso_amount`] but the `$` prefix is mandatory.
pub fn prefixed_peso_amount(input: &str) -> IResult<&str, i64> {
    preceded(char('$'), grouped_cents)(input)
}

fn grouped_cents(input: &str) -> IResult<&str, i64> {
    let (input, whole_groups) = separated_list1(char(','), digit1)(input)?;
    let (input, cents_str) =
        preceded(char('.'), verify(digit1, |s: &str| s.len() == 2))(input)?;
    let whole: i64 = whole_groups.concat().parse().unwrap_or(0);
    let cents: i64 = cents_str.parse().unwrap_or(0);
    Ok((input, whole * 100 + cents))
}

/// Whitespace-token form of an amount, as lenient as the statements are:
/// `$` and thousands separators optional, cents optional (`150` == `150.00`,
/// `12.5` == `12.50`). Returns `None` when the token is not a plain decimal.
pub fn parse_decimal_token(token: &str) -> Option<i64> {
    let parsed: IResult<&str, i64> = all_consuming(decimal_cents)(token.trim());
    parsed.ok().map(|(_, cents)| cents)
}

fn decimal_cents(input: &str) -> IResult<&str, i64> {
    let (input, _) = opt(char('$'))(input)?;
    let (input, whole_groups) = separated_list1(char(','), digit1)(input)?;
    let (input, frac) =
        opt(preceded(char('.'), verify(digit1, |s: &str| s.len() <= 2)))(input)?;
    let whole: i64 = whole_groups.concat().parse().unwrap_or(0);
    let cents = match frac {
        Some(f) if f.len() == 1 => f.parse::<i64>().unwrap_or(0) * 10,
        Some(f) => f.parse::<i64>().unwrap_or(0),
        None => 0,
    };
    Ok((input, whole * 100 + cents))
}

/// Runs `parser` at every position of `text`, collecting all matches in
/// left-to-right order. The scan resumes after each match.
pub fn find_all<'a, O>(
    text: &'a str,
    parser: fn(&'a str) -> IResult<&'a str, O>,
) -> Vec<O> {
    let mut found = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match parser(rest) {
            Ok((tail, value)) => {
                found.push(value);
                rest = tail;
            }
            Err(_) => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }
    found
}

/// First match of `parser` anywhere in `text`.
pub fn find_first<'a, O>(
    text: &'a str,
    parser: fn(&'a str) -> IResult<&'a str, O>,
) -> Option<O> {
    let mut rest = text;
    while !rest.is_empty() {
        if let Ok((_, value)) = parser(rest) {
            return Some(value);
        }
        let mut chars = rest.chars();
        chars.next();
        rest = chars.as_str();
    }
    None
}

/// All amounts embedded in a line or record, in encounter order.
pub fn find_amounts(text: &str) -> Vec<i64> {
    find_all(text, peso_amount)
}

pub fn contains_amount(text: &str) -> bool {
    find_first(text, peso_amount).is_some()
}

pub fn contains_prefixed_amount(text: &str) -> bool {
    find_first(text, prefixed_peso_amount).is_some()
}

fn digits(count: usize) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| take_while_m_n(count, count, |c: char| c.is_ascii_digit())(input)
}

fn word_chars(count: usize) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| {
        take_while_m_n(count, count, |c: char| c.is_alphanumeric() || c == '_')(input)
    }
}

fn upper_chars(count: usize) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| take_while_m_n(count, count, |c: char| c.is_ascii_uppercase())(input)
}

/// `DD Mon` — Banamex and Scotiabank row dates.
pub fn day_month_word(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digits(2), char(' '), word_chars(3))))(input)
}

/// `DD-MON-YYYY` — Santander row dates.
pub fn day_mon_year(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        digits(2),
        char('-'),
        upper_chars(3),
        char('-'),
        digits(4),
    )))(input)
}

/// `DD-MON-YY` — Banorte row dates.
pub fn day_mon_short_year(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        digits(2),
        char('-'),
        upper_chars(3),
        char('-'),
        digits(2),
    )))(input)
}

/// `DD/Mon` — Bancomer row dates.
pub fn day_slash_month(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digits(2), char('/'), word_chars(3))))(input)
}

/// `MON DD` — Inbursa row dates.
pub fn mon_day(input: &str) -> IResult<&str, &str> {
    recognize(tuple((upper_chars(3), char(' '), digits(2))))(input)
}

/// Bare `DD` token — Banregio rows carry only the day of month.
pub fn is_day_token(token: &str) -> bool {
    let parsed: IResult<&str, &str> = all_consuming(digits(2))(token);
    parsed.is_ok()
}

pub fn take_until_including(t: &str) -> impl Fn(&str) -> IResult<&str, ()> + '_ {
    move |input| {
        let (input, _) = take_until(t)(input)?;
        let (input, _) = tag(t)(input)?;
        Ok((input, ()))
    }
}

/// Substring strictly between the first occurrences of the two markers.
/// `None` when either marker is absent (callers surface this as an advisory,
/// not a failure).
pub fn section_between<'a>(
    text: &'a str,
    start_marker: &str,
    end_marker: &str,
) -> Option<&'a str> {
    let (rest, ()) = take_until_including(start_marker)(text).ok()?;
    let section: IResult<&str, &str, Error<&str>> = take_until(end_marker)(rest);
    section.ok().map(|(_, body)| body)
}

/// Drops every line containing any of the boilerplate signatures.
/// Order-preserving; applied before reassembly for formats that interleave
/// headers and column titles within the movements table.
pub fn strip_noise_lines(text: &str, signatures: &[&str]) -> String {
    text.lines()
        .filter(|line| !signatures.iter().any(|sig| line.contains(sig)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Month names as they appear in statement period headers.
pub fn spanish_month(name: &str) -> Option<Month> {
    match name.to_lowercase().as_str() {
        "enero" => Some(Month::January),
        "febrero" => Some(Month::February),
        "marzo" => Some(Month::March),
        "abril" => Some(Month::April),
        "mayo" => Some(Month::May),
        "junio" => Some(Month::June),
        "julio" => Some(Month::July),
        "agosto" => Some(Month::August),
        "septiembre" => Some(Month::September),
        "octubre" => Some(Month::October),
        "noviembre" => Some(Month::November),
        "diciembre" => Some(Month::December),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peso_amount_parses_cents() {
        assert_eq!(peso_amount("1,234.56"), Ok(("", 123456)));
        assert_eq!(peso_amount("$0.99"), Ok(("", 99)));
        assert_eq!(peso_amount("15.00 rest"), Ok((" rest", 1500)));
        assert!(peso_amount("abc").is_err());
        assert!(peso_amount("100.5").is_err());
    }

    #[test]
    fn prefixed_amount_requires_dollar_sign() {
        assert_eq!(prefixed_peso_amount("$2,000.00"), Ok(("", 200000)));
        assert!(prefixed_peso_amount("2,000.00").is_err());
    }

    #[test]
    fn decimal_tokens_are_lenient() {
        assert_eq!(parse_decimal_token("1,234.56"), Some(123456));
        assert_eq!(parse_decimal_token("$150"), Some(15000));
        assert_eq!(parse_decimal_token("12.5"), Some(1250));
        assert_eq!(parse_decimal_token("0"), Some(0));
        assert_eq!(parse_decimal_token("REF123"), None);
        assert_eq!(parse_decimal_token(""), None);
    }

    #[test]
    fn find_amounts_in_order() {
        let line = "02 MAY PAGO RECIBIDO 1,500.00 10,250.75";
        assert_eq!(find_amounts(line), vec![150000, 1025075]);
        assert_eq!(find_amounts("sin montos"), Vec::<i64>::new());
    }

    #[test]
    fn date_token_shapes() {
        assert!(day_month_word("02 MAY resto").is_ok());
        assert!(day_month_word("2 MAY").is_err());
        assert_eq!(day_mon_year("01-ENE-2024 x"), Ok((" x", "01-ENE-2024")));
        assert_eq!(day_mon_short_year("01-ENE-24 x"), Ok((" x", "01-ENE-24")));
        assert!(day_slash_month("15/Abr resto").is_ok());
        assert!(mon_day("MAY 02 resto").is_ok());
        assert!(mon_day("May 02").is_err());
        assert!(is_day_token("07"));
        assert!(!is_day_token("123"));
        assert!(!is_day_token("7"));
    }

    #[test]
    fn section_between_markers() {
        let text = "encabezado INICIO cuerpo de la tabla FIN pie";
        assert_eq!(
            section_between(text, "INICIO", "FIN"),
            Some(" cuerpo de la tabla ")
        );
        assert_eq!(section_between(text, "NOEXISTE", "FIN"), None);
        assert_eq!(section_between(text, "INICIO", "NOEXISTE"), None);
    }

    #[test]
    fn noise_lines_are_dropped() {
        let text = "uno\nCLIENTE: 123\ndos\nPágina: 4\ntres";
        let cleaned = strip_noise_lines(text, &["CLIENTE:", "Página:"]);
        assert_eq!(cleaned, "uno\ndos\ntres");
    }

    #[test]
    fn month_names() {
        assert_eq!(spanish_month("julio"), Some(Month::July));
        assert_eq!(spanish_month("JULIO"), Some(Month::July));
        assert_eq!(spanish_month("julius"), None);
    }
}
