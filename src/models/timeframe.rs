//! Lookback period and sampling interval accepted by the market-data provider

use std::fmt;

use crate::utils::ChartError;

/// How far back to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl Period {
    /// Parse period string
    /// Supported: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max
    pub fn parse(period: &str) -> Result<Self, ChartError> {
        match period.to_lowercase().as_str() {
            "1d" => Ok(Period::OneDay),
            "5d" => Ok(Period::FiveDays),
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "5y" => Ok(Period::FiveYears),
            "10y" => Ok(Period::TenYears),
            "ytd" => Ok(Period::YearToDate),
            "max" => Ok(Period::Max),
            _ => Err(ChartError::InvalidTimeframe(format!(
                "Unknown period: '{}'. Supported: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max",
                period
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bar size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    NinetyMinutes,
    OneHour,
    OneDay,
    FiveDays,
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl Interval {
    /// Parse interval string
    /// Supported: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo
    /// Case-sensitive: "1M" is neither a minute nor a month.
    pub fn parse(interval: &str) -> Result<Self, ChartError> {
        match interval {
            "1m" => Ok(Interval::OneMinute),
            "2m" => Ok(Interval::TwoMinutes),
            "5m" => Ok(Interval::FiveMinutes),
            "15m" => Ok(Interval::FifteenMinutes),
            "30m" => Ok(Interval::ThirtyMinutes),
            "60m" => Ok(Interval::SixtyMinutes),
            "90m" => Ok(Interval::NinetyMinutes),
            "1h" => Ok(Interval::OneHour),
            "1d" => Ok(Interval::OneDay),
            "5d" => Ok(Interval::FiveDays),
            "1wk" => Ok(Interval::OneWeek),
            "1mo" => Ok(Interval::OneMonth),
            "3mo" => Ok(Interval::ThreeMonths),
            _ => Err(ChartError::InvalidTimeframe(format!(
                "Unknown interval: '{}'. Supported: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo",
                interval
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::TwoMinutes => "2m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::SixtyMinutes => "60m",
            Interval::NinetyMinutes => "90m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::FiveDays => "5d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
            Interval::ThreeMonths => "3mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        assert_eq!(Period::parse("1y").unwrap(), Period::OneYear);
        assert_eq!(Interval::parse("1d").unwrap(), Interval::OneDay);
    }

    #[test]
    fn test_period_parse_is_case_insensitive() {
        assert_eq!(Period::parse("YTD").unwrap(), Period::YearToDate);
    }

    #[test]
    fn test_interval_parse_is_case_sensitive() {
        assert!(matches!(Interval::parse("1M"), Err(ChartError::InvalidTimeframe(_))));
        assert!(matches!(Interval::parse("1WK"), Err(ChartError::InvalidTimeframe(_))));
        assert_eq!(Interval::parse("1wk").unwrap(), Interval::OneWeek);
    }

    #[test]
    fn test_minute_and_month_distinct() {
        assert_eq!(Interval::parse("1m").unwrap(), Interval::OneMinute);
        assert_eq!(Interval::parse("1mo").unwrap(), Interval::OneMonth);
    }

    #[test]
    fn test_wire_form_round_trips() {
        for s in ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"] {
            assert_eq!(Period::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_rejects_unknown() {
        assert!(matches!(Period::parse("52w"), Err(ChartError::InvalidTimeframe(_))));
        assert!(matches!(Interval::parse("2h"), Err(ChartError::InvalidTimeframe(_))));
    }
}
