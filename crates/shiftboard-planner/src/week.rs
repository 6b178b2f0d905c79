//! Week window arithmetic for the Sunday-to-Saturday grid.

use chrono::{Datelike, Days, Local, NaiveDate};
use shiftboard_core::types::SlotDate;

pub const DAYS_PER_WEEK: usize = 7;

pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Today's date on the local clock, the reference point for week offsets.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Seven consecutive dates, Sunday through Saturday, `offset` weeks away
/// from the week containing the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
    offset: i32,
}

impl WeekWindow {
    /// `sunday = today - weekday(today) + 7 * offset`.
    ///
    /// Returns `None` only when the window would fall outside the range chrono
    /// can represent.
    pub fn new(today: NaiveDate, offset: i32) -> Option<Self> {
        let back = u64::from(today.weekday().num_days_from_sunday());
        let sunday = today.checked_sub_days(Days::new(back))?;
        let shift = Days::new(u64::from(offset.unsigned_abs()) * DAYS_PER_WEEK as u64);
        let start = if offset >= 0 {
            sunday.checked_add_days(shift)?
        } else {
            sunday.checked_sub_days(shift)?
        };
        // Saturday must exist too, so every index below is in range.
        start.checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))?;
        Some(Self { start, offset })
    }

    /// The week containing `today`.
    pub fn current(today: NaiveDate) -> Option<Self> {
        Self::new(today, 0)
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// The Sunday.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The Saturday.
    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(DAYS_PER_WEEK as u64 - 1)
    }

    pub fn dates(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        std::array::from_fn(|i| self.start + Days::new(i as u64))
    }

    pub fn slot_dates(&self) -> [SlotDate; DAYS_PER_WEEK] {
        self.dates().map(SlotDate::from)
    }

    /// Date of grid column `index` (0 = Sunday).
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        (index < DAYS_PER_WEEK).then(|| self.start + Days::new(index as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// `"Jun 9 – Jun 15, 2024"`.
    pub fn range_label(&self) -> String {
        format!(
            "{} – {}",
            self.start.format("%b %-d"),
            self.end().format("%b %-d, %Y")
        )
    }

    /// Column headers, `"09/06"` style (day/month).
    pub fn day_labels(&self) -> [String; DAYS_PER_WEEK] {
        self.dates().map(|d| d.format("%d/%m").to_string())
    }

    pub fn next(&self) -> Option<Self> {
        let start = self.start.checked_add_days(Days::new(DAYS_PER_WEEK as u64))?;
        start.checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))?;
        Some(Self {
            start,
            offset: self.offset.checked_add(1)?,
        })
    }

    pub fn previous(&self) -> Option<Self> {
        let start = self.start.checked_sub_days(Days::new(DAYS_PER_WEEK as u64))?;
        Some(Self {
            start,
            offset: self.offset.checked_sub(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_week_starts_on_preceding_sunday() {
        // 2024-06-12 is a Wednesday.
        let w = WeekWindow::current(ymd(2024, 6, 12)).unwrap();
        assert_eq!(w.start(), ymd(2024, 6, 9));
        assert_eq!(w.end(), ymd(2024, 6, 15));
        assert_eq!(w.date_at(1), Some(ymd(2024, 6, 10)));
        assert_eq!(w.date_at(7), None);
    }

    #[test]
    fn sunday_is_its_own_week_start() {
        let w = WeekWindow::current(ymd(2024, 6, 9)).unwrap();
        assert_eq!(w.start(), ymd(2024, 6, 9));
    }

    #[test]
    fn range_label_format() {
        let w = WeekWindow::current(ymd(2024, 6, 12)).unwrap();
        assert_eq!(w.range_label(), "Jun 9 – Jun 15, 2024");
    }

    #[test]
    fn year_rollover_uses_calendar_arithmetic() {
        // 2025-01-01 is a Wednesday; its week starts 2024-12-29.
        let w = WeekWindow::current(ymd(2025, 1, 1)).unwrap();
        assert_eq!(w.start(), ymd(2024, 12, 29));
        assert_eq!(w.range_label(), "Dec 29 – Jan 4, 2025");
        assert_eq!(
            w.day_labels(),
            ["29/12", "30/12", "31/12", "01/01", "02/01", "03/01", "04/01"].map(String::from)
        );
    }

    #[test]
    fn negative_offset_crosses_month_boundary() {
        let w = WeekWindow::new(ymd(2024, 3, 6), -1).unwrap();
        assert_eq!(w.start(), ymd(2024, 2, 25));
        assert!(w.contains(ymd(2024, 2, 29)));
        assert!(!w.contains(ymd(2024, 3, 3)));
    }

    #[test]
    fn next_and_previous_match_offsets() {
        let today = ymd(2024, 6, 12);
        let w = WeekWindow::current(today).unwrap();
        assert_eq!(w.next(), WeekWindow::new(today, 1));
        assert_eq!(w.previous(), WeekWindow::new(today, -1));
        assert_eq!(w.next().and_then(|n| n.previous()), Some(w));
    }

    #[test]
    fn out_of_range_offset_is_none() {
        assert!(WeekWindow::new(ymd(2024, 6, 12), i32::MAX).is_none());
    }

    proptest! {
        #[test]
        fn window_is_seven_days_from_sunday(days in 0i64..200_000, offset in -2_000i32..2_000) {
            let today = ymd(1900, 1, 1) + chrono::Duration::days(days);
            let w = WeekWindow::new(today, offset).unwrap();
            let dates = w.dates();
            prop_assert_eq!(dates[0].weekday(), Weekday::Sun);
            for pair in dates.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
            }
            let next = WeekWindow::new(today, offset + 1).unwrap();
            prop_assert_eq!(next.start() - w.start(), chrono::Duration::days(7));
        }

        #[test]
        fn window_is_stable_within_a_day(days in 0i64..200_000, offset in -100i32..100) {
            let today = ymd(1900, 1, 1) + chrono::Duration::days(days);
            prop_assert_eq!(WeekWindow::new(today, offset), WeekWindow::new(today, offset));
        }
    }
}
