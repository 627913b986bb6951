//! Shared utility functions for the sequestration calculator crates.

/// Number formatting functions
pub mod numbers {
    /// Format a number the way a range input reports it: integral values
    /// without a fractional part, everything else in its shortest form.
    pub fn format_number(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        }
    }

    /// Format a number as a percentage label, e.g. `80%`.
    pub fn format_percent(value: f64) -> String {
        format!("{}%", format_number(value))
    }

    /// Parse a numeric form value. Non-finite literals (`NaN`, `inf`) are rejected.
    pub fn parse_finite(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

}

/// Date utility functions
pub mod dates {
    use chrono::NaiveDateTime;

    /// Format a timestamp as "YYYY-MM-DD HH:MM:SS"
    pub fn format_timestamp(ts: &NaiveDateTime) -> String {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_timestamp() {
            let ts = NaiveDate::from_ymd_opt(2025, 3, 7)
                .unwrap()
                .and_hms_opt(9, 5, 30)
                .unwrap();
            assert_eq!(format_timestamp(&ts), "2025-03-07 09:05:30");
        }
    }
}
