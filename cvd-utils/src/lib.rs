//! Shared utility functions for CVD crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Date format used for chart titles, slider marks and JSON: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format.
    ///
    /// Month and day may be written without zero padding ("2020-2-15").
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

}

/// Label helpers for chart titles and axis names
pub mod labels {
    /// Turn a snake_case field name into a title-cased label.
    ///
    /// `"deaths_per_million"` becomes `"Deaths Per Million"`.
    pub fn title_case(field: &str) -> String {
        field
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Format a number with two decimals and comma thousands separators,
    /// e.g. `126476461.0` -> `"126,476,461.00"`.
    pub fn format_thousands(value: f64) -> String {
        let formatted = format!("{:.2}", value.abs());
        let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{}", sign, grouped, frac_part)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_title_case() {
            assert_eq!(title_case("deaths_per_million"), "Deaths Per Million");
            assert_eq!(title_case("cumulative_total_cases"), "Cumulative Total Cases");
            assert_eq!(title_case("cases"), "Cases");
            assert_eq!(title_case(""), "");
        }

        #[test]
        fn test_format_thousands() {
            assert_eq!(format_thousands(126476461.0), "126,476,461.00");
            assert_eq!(format_thousands(999.5), "999.50");
            assert_eq!(format_thousands(1000.0), "1,000.00");
            assert_eq!(format_thousands(0.0), "0.00");
            assert_eq!(format_thousands(-12345.678), "-12,345.68");
        }
    }
}
