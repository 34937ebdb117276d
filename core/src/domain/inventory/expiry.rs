use chrono::NaiveDate;

/// Day/month/year, as written by scans: `15/11/2025`.
pub const EXPIRY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Sort key for a batch's expiry.
///
/// `Unknown` orders after every `Known` date (variant order), so a batch
/// whose expiry cannot be read is never treated as urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpiryDate {
    Known(NaiveDate),
    Unknown,
}

impl ExpiryDate {
    /// Never fails: missing or malformed text yields [`ExpiryDate::Unknown`].
    pub fn parse(text: Option<&str>) -> Self {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return ExpiryDate::Unknown;
        };

        match NaiveDate::parse_from_str(text, EXPIRY_DATE_FORMAT) {
            Ok(date) => ExpiryDate::Known(date),
            Err(e) => {
                tracing::debug!(
                    expiry = %text,
                    error = %e,
                    "Unparseable expiry date, ordering batch last"
                );
                ExpiryDate::Unknown
            }
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ExpiryDate::Known(date) => Some(*date),
            ExpiryDate::Unknown => None,
        }
    }

    /// Whole days from `today` until expiry; negative once expired.
    pub fn days_from(&self, today: NaiveDate) -> Option<i64> {
        self.date().map(|date| (date - today).num_days())
    }
}

pub fn format_expiry(date: NaiveDate) -> String {
    date.format(EXPIRY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_month_year() {
        assert_eq!(
            ExpiryDate::parse(Some("15/11/2025")),
            ExpiryDate::Known(date(2025, 11, 15))
        );
        assert_eq!(
            ExpiryDate::parse(Some(" 02/11/2025 ")),
            ExpiryDate::Known(date(2025, 11, 2))
        );
    }

    #[test]
    fn test_malformed_or_missing_is_unknown() {
        assert_eq!(ExpiryDate::parse(None), ExpiryDate::Unknown);
        assert_eq!(ExpiryDate::parse(Some("")), ExpiryDate::Unknown);
        assert_eq!(ExpiryDate::parse(Some("2025-11-15")), ExpiryDate::Unknown);
        assert_eq!(ExpiryDate::parse(Some("31/02/2025")), ExpiryDate::Unknown);
        assert_eq!(ExpiryDate::parse(Some("next week")), ExpiryDate::Unknown);
    }

    #[test]
    fn test_unknown_sorts_after_every_known_date() {
        let far_future = ExpiryDate::Known(date(9999, 12, 31));
        assert!(far_future < ExpiryDate::Unknown);
        assert!(ExpiryDate::Known(date(2025, 11, 2)) < ExpiryDate::Known(date(2025, 11, 15)));
    }

    #[test]
    fn test_days_from() {
        let today = date(2025, 11, 10);
        assert_eq!(
            ExpiryDate::parse(Some("15/11/2025")).days_from(today),
            Some(5)
        );
        assert_eq!(
            ExpiryDate::parse(Some("08/11/2025")).days_from(today),
            Some(-2)
        );
        assert_eq!(ExpiryDate::Unknown.days_from(today), None);
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry(date(2025, 1, 5)), "05/01/2025");
    }
}
