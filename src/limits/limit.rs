//! The [`Limit`] value: a request quota over a time window.

use chrono::TimeDelta;
use std::fmt;

/// A request quota: at most `requests` requests per `timespan`.
///
/// A limit with zero requests means nothing may ever be scheduled against it;
/// it is what the catalog returns for unknown providers and unset tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    pub requests: u64,
    pub timespan: TimeDelta,
}

impl Limit {
    /// The zero quota.
    pub const NONE: Limit = Limit {
        requests: 0,
        timespan: TimeDelta::zero(),
    };

    pub const fn new(requests: u64, timespan: TimeDelta) -> Self {
        Self { requests, timespan }
    }

    pub fn per_minute(requests: u64) -> Self {
        Self::new(requests, TimeDelta::minutes(1))
    }

    pub fn per_day(requests: u64) -> Self {
        Self::new(requests, TimeDelta::days(1))
    }

    /// One month is counted as 31 days (744 hours), the longest calendar month.
    pub fn per_month(requests: u64) -> Self {
        Self::new(requests, TimeDelta::days(31))
    }

    pub fn is_none(&self) -> bool {
        self.requests == 0
    }

    /// Pessimistic number of requests a task firing every `interval` makes within
    /// one window of this limit: `ceil(timespan / interval)`, and never less than one.
    ///
    /// A task that fires at all is charged at least once, so a zero quota with an
    /// empty window still rejects it. Returns `None` for a non-positive interval,
    /// which would mean an unbounded rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::TimeDelta;
    /// use weather_collector::Limit;
    ///
    /// let limit = Limit::per_minute(60);
    /// assert_eq!(limit.requests_for_interval(TimeDelta::seconds(60)), Some(1));
    /// assert_eq!(limit.requests_for_interval(TimeDelta::seconds(25)), Some(3));
    /// assert_eq!(limit.requests_for_interval(TimeDelta::zero()), None);
    /// assert_eq!(Limit::NONE.requests_for_interval(TimeDelta::hours(1)), Some(1));
    /// ```
    pub fn requests_for_interval(&self, interval: TimeDelta) -> Option<u64> {
        let interval = interval.to_std().ok().filter(|d| !d.is_zero())?;
        let window = self.timespan.to_std().unwrap_or_default();
        let requests = window.as_nanos().div_ceil(interval.as_nanos()).max(1);
        Some(u64::try_from(requests).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests per {}",
            self.requests,
            describe_timespan(self.timespan)
        )
    }
}

fn describe_timespan(timespan: TimeDelta) -> String {
    if timespan == TimeDelta::days(31) {
        "month".to_string()
    } else if timespan == TimeDelta::days(1) {
        "day".to_string()
    } else if timespan == TimeDelta::hours(1) {
        "hour".to_string()
    } else if timespan == TimeDelta::minutes(1) {
        "minute".to_string()
    } else {
        format!("{} seconds", timespan.num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_round_up() {
        let limit = Limit::per_minute(60);
        assert_eq!(limit.requests_for_interval(TimeDelta::seconds(7)), Some(9));
        assert_eq!(limit.requests_for_interval(TimeDelta::seconds(61)), Some(1));
        assert_eq!(limit.requests_for_interval(TimeDelta::milliseconds(500)), Some(120));
    }

    #[test]
    fn test_month_window() {
        let limit = Limit::per_month(100);
        assert_eq!(limit.timespan, TimeDelta::hours(744));
        assert_eq!(limit.requests_for_interval(TimeDelta::hours(1)), Some(744));
        assert_eq!(limit.requests_for_interval(TimeDelta::hours(8)), Some(93));
    }

    #[test]
    fn test_sub_millisecond_interval_is_counted() {
        let limit = Limit::per_minute(60);
        assert_eq!(
            limit.requests_for_interval(TimeDelta::microseconds(500)),
            Some(120_000)
        );
        assert_eq!(limit.requests_for_interval(TimeDelta::nanoseconds(1)), Some(60_000_000_000));
    }

    #[test]
    fn test_empty_window_charges_one_request() {
        assert_eq!(Limit::NONE.requests_for_interval(TimeDelta::days(365)), Some(1));
        assert_eq!(Limit::per_day(50).requests_for_interval(TimeDelta::days(7)), Some(1));
        assert_eq!(Limit::NONE.requests_for_interval(TimeDelta::zero()), None);
    }

    #[test]
    fn test_non_positive_interval() {
        let limit = Limit::per_day(50);
        assert_eq!(limit.requests_for_interval(TimeDelta::zero()), None);
        assert_eq!(limit.requests_for_interval(TimeDelta::seconds(-1)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Limit::per_month(100).to_string(), "100 requests per month");
        assert_eq!(Limit::per_minute(60).to_string(), "60 requests per minute");
        assert_eq!(
            Limit::new(5, TimeDelta::seconds(10)).to_string(),
            "5 requests per 10 seconds"
        );
    }
}
