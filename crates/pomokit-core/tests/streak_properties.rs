//! Property tests for the streak tracker and the weekly series.

use chrono::{Days, NaiveDate};
use pomokit_core::stats::series_for_7_days;
use pomokit_core::{LogEntry, Streak};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 20).unwrap()
}

proptest! {
    /// Walk forward through time, logging on some days, and check the
    /// invariants after every recomputation.
    #[test]
    fn best_never_below_current(steps in prop::collection::vec((0u64..4, 0usize..3), 1..60)) {
        let mut streak = Streak::default();
        let mut log: Vec<LogEntry> = Vec::new();
        let mut today = base();
        let mut previous_best = 0;

        for (gap, pomodoros) in steps {
            today = today.checked_add_days(Days::new(gap)).unwrap();
            for _ in 0..pomodoros {
                log.push(LogEntry::new(today, 1500, "General", None));
                streak.recompute(&log, today);
                prop_assert!(streak.best >= streak.current);
                prop_assert!(streak.best >= previous_best);
                previous_best = streak.best;
            }
            if pomodoros > 0 {
                prop_assert_eq!(streak.last_date, Some(today));
                prop_assert!(streak.current >= 1);
            }
        }
    }

    /// Re-running the tracker on the same day never changes anything.
    #[test]
    fn recompute_is_idempotent_within_a_day(days in prop::collection::vec(0u64..30, 1..20)) {
        let log: Vec<LogEntry> = days
            .iter()
            .map(|d| LogEntry::new(base().checked_add_days(Days::new(*d)).unwrap(), 60, "A", None))
            .collect();
        let today = base().checked_add_days(Days::new(days[0])).unwrap();

        let mut streak = Streak::default();
        streak.recompute(&log, today);
        let once = streak.clone();
        prop_assert!(!streak.recompute(&log, today));
        prop_assert_eq!(streak, once);
    }

    #[test]
    fn series_has_seven_ordered_days_ending_today(
        offsets in prop::collection::vec(0u64..20, 0..80),
        today_offset in 0u64..20,
    ) {
        let today = base().checked_add_days(Days::new(today_offset)).unwrap();
        let log: Vec<LogEntry> = offsets
            .iter()
            .map(|d| LogEntry::new(base().checked_add_days(Days::new(*d)).unwrap(), 60, "A", None))
            .collect();

        let series = series_for_7_days(&log, today);

        prop_assert_eq!(series.len(), 7);
        prop_assert_eq!(series[6].date, today);
        for pair in series.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
        for point in &series {
            let expected = log.iter().filter(|e| e.date == point.date).count();
            prop_assert_eq!(point.value, expected);
        }
    }
}
