use crate::models::TOTAL_DAYS;
use chrono::{Datelike, NaiveDate};

const DECEMBER: u32 = 12;

/// Date gate for opening a day.
///
/// Without a season year, `today`'s own year is the season: January to
/// November keep everything locked and December unlocks day by day. With a
/// season year, any later year counts as "season over" and unlocks everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockRule {
    pub season_year: Option<i32>,
}

impl UnlockRule {
    pub fn for_season(year: i32) -> Self {
        Self {
            season_year: Some(year),
        }
    }

    pub fn can_open(&self, day: u8, today: NaiveDate) -> bool {
        if day == 0 || day > TOTAL_DAYS {
            return false;
        }

        let season = self.season_year.unwrap_or_else(|| today.year());
        if today.year() > season {
            return true;
        }
        if today.year() < season || today.month() < DECEMBER {
            return false;
        }

        today.day() >= u32::from(day)
    }
}

pub fn can_open(day: u8, today: NaiveDate) -> bool {
    UnlockRule::default().can_open(day, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn nothing_opens_before_december() {
        for today in [date(2025, 1, 1), date(2025, 6, 15), date(2025, 11, 30)] {
            assert!((1..=TOTAL_DAYS).all(|day| !can_open(day, today)));
        }
    }

    #[test]
    fn december_opens_up_to_day_of_month() {
        for k in 1..=31u32 {
            let today = date(2025, 12, k);
            for day in 1..=TOTAL_DAYS {
                assert_eq!(can_open(day, today), u32::from(day) <= k, "day {day} on dec {k}");
            }
        }
    }

    #[test]
    fn december_tenth_boundary() {
        let today = date(2025, 12, 10);
        assert!(can_open(10, today));
        assert!(!can_open(11, today));
    }

    #[test]
    fn everything_opens_after_the_season() {
        let rule = UnlockRule::for_season(2025);
        for today in [date(2026, 1, 2), date(2026, 12, 1)] {
            assert!((1..=TOTAL_DAYS).all(|day| rule.can_open(day, today)));
        }
    }

    #[test]
    fn nothing_opens_in_a_year_before_the_season() {
        let rule = UnlockRule::for_season(2026);
        assert!(!rule.can_open(1, date(2025, 12, 24)));
    }

    #[test]
    fn season_rule_matches_default_within_its_year() {
        let rule = UnlockRule::for_season(2025);
        let today = date(2025, 12, 5);
        for day in 1..=TOTAL_DAYS {
            assert_eq!(rule.can_open(day, today), can_open(day, today));
        }
    }

    #[test]
    fn out_of_range_days_never_open() {
        let today = date(2025, 12, 31);
        assert!(!can_open(0, today));
        assert!(!can_open(25, today));
    }
}
