/// Fractional digits used when rendering a numeric spindle
pub const SPINDLE_PRECISION: usize = 10;

/// A semantic number addressing a position in a block tree.
///
/// Numbers are rendered with fixed precision before parsing so that values
/// like `0.842` never pick up float noise. Strings are parsed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Spindle {
    Number(f64),
    Text(String),
}

impl Spindle {
    /// The decimal string the digits are read from
    pub fn to_decimal_string(&self) -> String {
        match self {
            // -0.0 renders as "-0.…", which would read as a no-pscale spindle
            Spindle::Number(n) if *n == 0.0 => format!("{:.*}", SPINDLE_PRECISION, 0.0),
            Spindle::Number(n) => format!("{:.*}", SPINDLE_PRECISION, n),
            Spindle::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Spindle {
    fn from(n: f64) -> Self {
        Spindle::Number(n)
    }
}

impl From<&str> for Spindle {
    fn from(s: &str) -> Self {
        Spindle::Text(s.to_string())
    }
}

impl From<String> for Spindle {
    fn from(s: String) -> Self {
        Spindle::Text(s)
    }
}

/// Which of the three spindle formats an address was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpindleFormat {
    /// `0.234`: walk the fractional digits, root sits at pscale 0
    Delineation,
    /// `23.45`: walk every digit, root sits at pscale = integer length
    Split,
    /// `2345`: walk every digit, no pscale at all
    NoPscale,
}

/// A spindle broken into tree keys plus pscale bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub walk_digits: Vec<String>,
    pub has_pscale: bool,
    pub digits_before: i32,
}

impl ParsedAddress {
    /// Address of the root itself, used when a point mode runs without a spindle
    pub fn root() -> Self {
        Self {
            walk_digits: Vec::new(),
            has_pscale: true,
            digits_before: 0,
        }
    }

    pub fn parse(spindle: Option<&Spindle>) -> Self {
        match spindle {
            Some(spindle) => Self::parse_decimal(&spindle.to_decimal_string()),
            None => Self::root(),
        }
    }

    /// Parse a decimal string such as `0.234`, `23.45` or `2345`
    pub fn parse_decimal(decimal: &str) -> Self {
        let mut parts = decimal.split('.');
        let int_part = match parts.next() {
            Some("") | None => "0",
            Some(int_part) => int_part,
        };
        let frac_part = parts.next().unwrap_or("").trim_end_matches('0');

        match Self::format_of(int_part, frac_part) {
            SpindleFormat::Delineation => Self {
                walk_digits: split_digits(frac_part),
                has_pscale: true,
                digits_before: 0,
            },
            SpindleFormat::Split => Self {
                walk_digits: split_digits(int_part)
                    .into_iter()
                    .chain(split_digits(frac_part))
                    .collect(),
                has_pscale: true,
                digits_before: int_part.chars().count() as i32,
            },
            SpindleFormat::NoPscale => Self {
                walk_digits: split_digits(int_part),
                has_pscale: false,
                digits_before: -1,
            },
        }
    }

    fn format_of(int_part: &str, frac_part: &str) -> SpindleFormat {
        if int_part == "0" {
            SpindleFormat::Delineation
        } else if frac_part.is_empty() {
            SpindleFormat::NoPscale
        } else {
            SpindleFormat::Split
        }
    }

    pub fn format(&self) -> SpindleFormat {
        match (self.has_pscale, self.digits_before) {
            (false, _) => SpindleFormat::NoPscale,
            (true, 0) => SpindleFormat::Delineation,
            (true, _) => SpindleFormat::Split,
        }
    }

    /// Pscale of the root entry
    pub fn root_pscale(&self) -> Option<i32> {
        self.has_pscale.then_some(self.digits_before)
    }

    /// Pscale of the entry reached by the digit at `index`
    pub fn pscale_at(&self, index: usize) -> Option<i32> {
        self.has_pscale
            .then(|| self.digits_before - 1 - index as i32)
    }

    /// Dot-joined walk path, `None` when there are no digits
    pub fn end_path(&self) -> Option<String> {
        (!self.walk_digits.is_empty()).then(|| self.walk_digits.join("."))
    }
}

fn split_digits(s: &str) -> Vec<String> {
    s.chars().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn digits(parsed: &ParsedAddress) -> String {
        parsed.walk_digits.concat()
    }

    #[rstest]
    #[case("0.234", "234", true, 0, SpindleFormat::Delineation)]
    #[case("0.2340000", "234", true, 0, SpindleFormat::Delineation)]
    #[case("0", "", true, 0, SpindleFormat::Delineation)]
    #[case(".5", "5", true, 0, SpindleFormat::Delineation)]
    #[case("23.45", "2345", true, 2, SpindleFormat::Split)]
    #[case("1.10", "11", true, 1, SpindleFormat::Split)]
    #[case("2345", "2345", false, -1, SpindleFormat::NoPscale)]
    #[case("7.000", "7", false, -1, SpindleFormat::NoPscale)]
    #[case("1.2.3", "12", true, 1, SpindleFormat::Split)]
    fn test_parse_decimal_formats(
        #[case] input: &str,
        #[case] expected_digits: &str,
        #[case] has_pscale: bool,
        #[case] digits_before: i32,
        #[case] format: SpindleFormat,
    ) {
        let parsed = ParsedAddress::parse_decimal(input);

        assert_eq!(digits(&parsed), expected_digits);
        assert_eq!(parsed.has_pscale, has_pscale);
        assert_eq!(parsed.digits_before, digits_before);
        assert_eq!(parsed.format(), format);
    }

    #[rstest]
    #[case(0.842, "842")]
    #[case(0.1, "1")]
    #[case(0.3, "3")]
    #[case(0.123456789, "123456789")]
    #[case(0.0, "")]
    #[case(-0.0, "")]
    fn test_numeric_spindles_have_no_float_noise(#[case] input: f64, #[case] expected: &str) {
        let parsed = ParsedAddress::parse(Some(&Spindle::from(input)));

        assert_eq!(digits(&parsed), expected);
        assert_eq!(parsed.format(), SpindleFormat::Delineation);
    }

    #[test]
    fn test_negative_zero_reads_like_zero() {
        let negative = ParsedAddress::parse(Some(&Spindle::from(-0.0)));

        assert_eq!(Spindle::from(-0.0).to_decimal_string(), "0.0000000000");
        assert_eq!(negative, ParsedAddress::parse(Some(&Spindle::from(0.0))));
        assert_eq!(negative.root_pscale(), Some(0));
    }

    #[test]
    fn test_numeric_integer_is_no_pscale() {
        let parsed = ParsedAddress::parse(Some(&Spindle::from(5.0)));

        assert_eq!(digits(&parsed), "5");
        assert!(!parsed.has_pscale);
        assert_eq!(parsed.root_pscale(), None);
        assert_eq!(parsed.pscale_at(0), None);
    }

    #[test]
    fn test_numeric_split() {
        let parsed = ParsedAddress::parse(Some(&Spindle::from(23.45)));

        assert_eq!(digits(&parsed), "2345");
        assert_eq!(parsed.root_pscale(), Some(2));
        let pscales: Vec<Option<i32>> = (0..4).map(|i| parsed.pscale_at(i)).collect();
        assert_eq!(pscales, vec![Some(1), Some(0), Some(-1), Some(-2)]);
    }

    #[test]
    fn test_absent_spindle_is_root() {
        let parsed = ParsedAddress::parse(None);

        assert_eq!(parsed, ParsedAddress::root());
        assert_eq!(parsed.root_pscale(), Some(0));
        assert_eq!(parsed.end_path(), None);
    }

    #[test]
    fn test_delineation_pscales_are_non_positive() {
        let parsed = ParsedAddress::parse_decimal("0.98765");

        assert_eq!(parsed.walk_digits.len(), 5);
        for i in 0..parsed.walk_digits.len() {
            assert!(parsed.pscale_at(i).unwrap() <= 0);
        }
    }

    #[test]
    fn test_end_path_joins_digits() {
        let parsed = ParsedAddress::parse_decimal("0.234");
        assert_eq!(parsed.end_path().as_deref(), Some("2.3.4"));
    }

    #[test]
    fn test_decimal_string_of_number() {
        assert_eq!(Spindle::from(0.842).to_decimal_string(), "0.8420000000");
        assert_eq!(Spindle::from("0.842").to_decimal_string(), "0.842");
    }
}
