use time::{ext::NumericalDuration, OffsetDateTime, Weekday};

pub trait TimeTo
where
    Self: Sized,
{
    fn time_to(self, rhs: Self) -> i32;
}

impl TimeTo for Weekday {
    fn time_to(self, rhs: Self) -> i32 {
        (rhs as i32) - (self as i32)
    }
}

pub trait CyclicTimeTo: TimeTo {
    fn cyclic_time_to(self, rhs: Self) -> u32;
}

impl CyclicTimeTo for Weekday {
    fn cyclic_time_to(self, rhs: Self) -> u32 {
        self.time_to(rhs).rem_euclid(7) as u32
    }
}

/// Start-of-period boundaries, all at midnight in the value's own offset.
pub trait TimeStart {
    fn day_start(self) -> Self;
    fn week_start(self, first_day: Weekday) -> Self;
    fn month_start(self) -> Self;
    fn year_start(self) -> Self;
}

impl TimeStart for OffsetDateTime {
    fn day_start(self) -> Self {
        self.replace_time(time::Time::MIDNIGHT)
    }

    fn week_start(self, first_day: Weekday) -> Self {
        self.day_start() - (first_day.cyclic_time_to(self.weekday()) as i64).days()
    }

    fn month_start(self) -> Self {
        self.day_start() - (self.day() as i64 - 1).days()
    }

    fn year_start(self) -> Self {
        self.day_start() - (self.ordinal() as i64 - 1).days()
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Weekday;

    use super::{CyclicTimeTo, TimeStart, TimeTo};

    #[test]
    fn weekday_distances() {
        assert_eq!(Weekday::Monday.time_to(Weekday::Friday), 4);
        assert_eq!(Weekday::Friday.time_to(Weekday::Monday), -4);
        assert_eq!(Weekday::Friday.cyclic_time_to(Weekday::Friday), 0);
        assert_eq!(Weekday::Friday.cyclic_time_to(Weekday::Monday), 3);
        assert_eq!(Weekday::Sunday.cyclic_time_to(Weekday::Wednesday), 3);
    }

    #[test]
    fn period_starts() {
        let now = datetime!(2025-06-18 21:30 +2);
        assert_eq!(now.day_start(), datetime!(2025-06-18 0:00 +2));
        assert_eq!(now.week_start(Weekday::Sunday), datetime!(2025-06-15 0:00 +2));
        assert_eq!(now.week_start(Weekday::Monday), datetime!(2025-06-16 0:00 +2));
        assert_eq!(now.month_start(), datetime!(2025-06-01 0:00 +2));
        assert_eq!(now.year_start(), datetime!(2025-01-01 0:00 +2));
    }

    #[test]
    fn week_start_on_first_day_is_same_day() {
        let sunday = datetime!(2025-06-15 0:01 UTC);
        assert_eq!(sunday.week_start(Weekday::Sunday), datetime!(2025-06-15 0:00 UTC));
    }
}
