//! Format-code interpretation.
//!
//! Report variables carry short format codes like `A8`, `I6` or `D12.2`.
//! Only the leading character family matters to a form control; the mapping
//! is total, with unrecognized codes falling through to plain text.

/// Control-relevant reading of a raw format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    /// `A...`: alphanumeric. `max_len` is set when the remainder is a
    /// positive base-10 integer, e.g. `A8` but not `A` or `A8V`.
    Alpha { max_len: Option<u32> },
    /// `I...`, `P...`, `D...`: the numeric family. Fractional input is
    /// allowed; the precision remainder is not enforced client-side.
    Numeric,
    /// Anything else, the empty code included. No coercion.
    Other,
}

impl FormatCode {
    /// Interpret a raw code. Never fails.
    pub fn parse(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => FormatCode::Alpha {
                max_len: code[1..].parse::<u32>().ok().filter(|n| *n > 0),
            },
            Some('I') | Some('P') | Some('D') => FormatCode::Numeric,
            _ => FormatCode::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_with_length() {
        assert_eq!(
            FormatCode::parse("A8"),
            FormatCode::Alpha { max_len: Some(8) }
        );
        assert_eq!(
            FormatCode::parse("A255"),
            FormatCode::Alpha { max_len: Some(255) }
        );
    }

    #[test]
    fn alpha_without_usable_length() {
        assert_eq!(FormatCode::parse("A"), FormatCode::Alpha { max_len: None });
        assert_eq!(FormatCode::parse("A0"), FormatCode::Alpha { max_len: None });
        assert_eq!(FormatCode::parse("A8V"), FormatCode::Alpha { max_len: None });
        assert_eq!(FormatCode::parse("A-3"), FormatCode::Alpha { max_len: None });
    }

    #[test]
    fn numeric_family() {
        assert_eq!(FormatCode::parse("I6"), FormatCode::Numeric);
        assert_eq!(FormatCode::parse("P12.2"), FormatCode::Numeric);
        assert_eq!(FormatCode::parse("D8.1"), FormatCode::Numeric);
        assert_eq!(FormatCode::parse("I"), FormatCode::Numeric);
    }

    #[test]
    fn everything_else_is_plain() {
        assert_eq!(FormatCode::parse(""), FormatCode::Other);
        assert_eq!(FormatCode::parse("YYMD"), FormatCode::Other);
        assert_eq!(FormatCode::parse("a8"), FormatCode::Other);
        assert_eq!(FormatCode::parse("Z9"), FormatCode::Other);
    }
}
