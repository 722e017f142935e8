use std::num::IntErrorKind;

/// Reachability value that marks a point without a defined distance.
pub const UNREACHABLE: f32 = -1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultReason {
    NotANumber,
    OutOfRange,
}

/// Result of parsing a single data row. Malformed rows never abort a load;
/// they fall back to a default and say why.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RowOutcome<T> {
    Parsed(T),
    Defaulted(DefaultReason),
}

impl<T> RowOutcome<T> {
    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Parsed(value) => value,
            Self::Defaulted(_) => default,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub order_rows: usize,
    pub order_defaulted: usize,
    pub reachability_rows: usize,
    pub reachability_defaulted: usize,
    pub explicit_unreachable: usize,
}

impl ParseReport {
    pub fn defaulted_rows(&self) -> usize {
        self.order_defaulted + self.reachability_defaulted
    }
}

pub fn parse_order_line(line: &str) -> RowOutcome<i32> {
    match line.trim().parse::<i32>() {
        Ok(value) => RowOutcome::Parsed(value),
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                RowOutcome::Defaulted(DefaultReason::OutOfRange)
            }
            _ => RowOutcome::Defaulted(DefaultReason::NotANumber),
        },
    }
}

/// Accepts plain decimal-point numbers only: digits with at most one `.`,
/// no sign, exponent, grouping or surrounding whitespace. The literal `-1`
/// is the explicit unreachable marker.
pub fn parse_reachability_line(line: &str) -> RowOutcome<f32> {
    if line == "-1" {
        return RowOutcome::Parsed(UNREACHABLE);
    }

    let mut digits = 0usize;
    let mut points = 0usize;
    for byte in line.bytes() {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' => points += 1,
            _ => return RowOutcome::Defaulted(DefaultReason::NotANumber),
        }
    }
    if digits == 0 || points > 1 {
        return RowOutcome::Defaulted(DefaultReason::NotANumber);
    }

    match line.parse::<f32>() {
        Ok(value) if value.is_finite() => RowOutcome::Parsed(value),
        Ok(_) => RowOutcome::Defaulted(DefaultReason::OutOfRange),
        Err(_) => RowOutcome::Defaulted(DefaultReason::NotANumber),
    }
}

pub fn parse_order(contents: &str, report: &mut ParseReport) -> Vec<i32> {
    contents
        .lines()
        .map(|line| {
            let outcome = parse_order_line(line);
            report.order_rows += 1;
            if outcome.is_defaulted() {
                report.order_defaulted += 1;
            }
            outcome.value_or(0)
        })
        .collect()
}

pub fn parse_reachabilities(contents: &str, report: &mut ParseReport) -> Vec<f32> {
    contents
        .lines()
        .map(|line| {
            let outcome = parse_reachability_line(line);
            report.reachability_rows += 1;
            match outcome {
                RowOutcome::Parsed(value) if value == UNREACHABLE => {
                    report.explicit_unreachable += 1;
                }
                RowOutcome::Defaulted(_) => report.reachability_defaulted += 1,
                RowOutcome::Parsed(_) => {}
            }
            outcome.value_or(UNREACHABLE)
        })
        .collect()
}

pub fn parse_image_paths(contents: &str) -> Vec<String> {
    contents.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_order_line_defaults_to_zero() {
        assert_eq!(
            parse_order_line("xx"),
            RowOutcome::Defaulted(DefaultReason::NotANumber)
        );
        assert_eq!(parse_order_line("xx").value_or(0), 0);
        assert_eq!(parse_order_line(" 17 "), RowOutcome::Parsed(17));
        assert_eq!(
            parse_order_line("99999999999"),
            RowOutcome::Defaulted(DefaultReason::OutOfRange)
        );
    }

    #[test]
    fn reachability_uses_plain_decimal_point_format() {
        assert_eq!(parse_reachability_line("0.25"), RowOutcome::Parsed(0.25));
        assert_eq!(parse_reachability_line("3"), RowOutcome::Parsed(3.0));
        assert_eq!(parse_reachability_line(".5"), RowOutcome::Parsed(0.5));
        for rejected in ["0,25", "1e3", "+1", " 1.0", "1.2.3", "", "-0.5", "NaN"] {
            assert_eq!(
                parse_reachability_line(rejected),
                RowOutcome::Defaulted(DefaultReason::NotANumber),
                "{rejected:?} should not parse"
            );
        }
    }

    #[test]
    fn reachability_overflow_is_out_of_range() {
        let huge = "9".repeat(60);
        assert_eq!(
            parse_reachability_line(&huge),
            RowOutcome::Defaulted(DefaultReason::OutOfRange)
        );
    }

    #[test]
    fn explicit_marker_is_not_counted_as_defaulted() {
        let mut report = ParseReport::default();
        let values = parse_reachabilities("-1\n0.5\nbogus\r\n2.0\n", &mut report);

        assert_eq!(values, vec![UNREACHABLE, 0.5, UNREACHABLE, 2.0]);
        assert_eq!(report.reachability_rows, 4);
        assert_eq!(report.explicit_unreachable, 1);
        assert_eq!(report.reachability_defaulted, 1);
    }

    #[test]
    fn order_report_counts_defaulted_rows() {
        let mut report = ParseReport::default();
        let order = parse_order("2\nxx\n1\r\n", &mut report);

        assert_eq!(order, vec![2, 0, 1]);
        assert_eq!(report.order_rows, 3);
        assert_eq!(report.order_defaulted, 1);
        assert_eq!(report.defaulted_rows(), 1);
    }
}
