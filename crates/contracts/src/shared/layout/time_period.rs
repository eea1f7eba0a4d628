use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default reporting period of the dashboard. Persisted as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Today,
    Yesterday,
    Week,
    #[default]
    Month,
    Year,
    Custom,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Today => "today",
            TimePeriod::Yesterday => "yesterday",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
            TimePeriod::Custom => "custom",
        }
    }

    /// Parses the persisted form; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.as_str() == s.trim())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Today => "Today",
            TimePeriod::Yesterday => "Yesterday",
            TimePeriod::Week => "This week",
            TimePeriod::Month => "This month",
            TimePeriod::Year => "This year",
            TimePeriod::Custom => "Custom range",
        }
    }

    pub fn all() -> [TimePeriod; 6] {
        [
            TimePeriod::Today,
            TimePeriod::Yesterday,
            TimePeriod::Week,
            TimePeriod::Month,
            TimePeriod::Year,
            TimePeriod::Custom,
        ]
    }

    /// Inclusive date bounds relative to `today`. Weeks start on Monday.
    /// `Custom` has no fixed bounds.
    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            TimePeriod::Today => Some((today, today)),
            TimePeriod::Yesterday => {
                let day = today - Duration::days(1);
                Some((day, day))
            }
            TimePeriod::Week => {
                let offset = today.weekday().num_days_from_monday() as i64;
                Some((today - Duration::days(offset), today))
            }
            TimePeriod::Month => Some((today.with_day(1)?, today)),
            TimePeriod::Year => Some((NaiveDate::from_ymd_opt(today.year(), 1, 1)?, today)),
            TimePeriod::Custom => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        for period in TimePeriod::all() {
            assert_eq!(TimePeriod::parse(period.as_str()), Some(period));
        }
        assert_eq!(TimePeriod::parse("quarter"), None);
        assert_eq!(serde_json::to_string(&TimePeriod::Yesterday).unwrap(), "\"yesterday\"");
    }

    #[test]
    fn test_date_ranges() {
        // Thursday
        let today = date(2024, 3, 14);
        assert_eq!(TimePeriod::Today.date_range(today), Some((today, today)));
        assert_eq!(
            TimePeriod::Yesterday.date_range(today),
            Some((date(2024, 3, 13), date(2024, 3, 13)))
        );
        assert_eq!(TimePeriod::Week.date_range(today), Some((date(2024, 3, 11), today)));
        assert_eq!(TimePeriod::Month.date_range(today), Some((date(2024, 3, 1), today)));
        assert_eq!(TimePeriod::Year.date_range(today), Some((date(2024, 1, 1), today)));
        assert_eq!(TimePeriod::Custom.date_range(today), None);
    }

    #[test]
    fn test_yesterday_crosses_year() {
        let today = date(2025, 1, 1);
        assert_eq!(
            TimePeriod::Yesterday.date_range(today),
            Some((date(2024, 12, 31), date(2024, 12, 31)))
        );
    }
}
