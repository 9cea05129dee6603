use chrono::{NaiveDate, Utc};

/// Source of "today" for effective dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod clock_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_return_the_fixed_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[rstest]
    fn it_should_return_the_current_utc_date() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        assert!(today >= before);
    }
}
