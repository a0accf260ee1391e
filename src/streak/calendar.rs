//! Day-string calendar math for study streaks

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

/// Day-string format: `YYYY-MM-DD`
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Existing dates kept when a new day is appended
pub const MAX_RETAINED_DATES: usize = 90;

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

pub fn parse_day(day: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(day, DAY_FORMAT).ok()
}

fn parse_days(dates: &[String]) -> Vec<NaiveDate> {
    dates
        .iter()
        .filter_map(|d| {
            let parsed = parse_day(d);
            if parsed.is_none() {
                log::warn!("Skipping malformed study date {:?}", d);
            }
            parsed
        })
        .collect()
}

/// Length of the run of consecutive days ending at the most recent date.
///
/// The run is anchored at the latest date in `dates`, not at today: a streak
/// whose last day was yesterday still reports its full length.
pub fn calculate_streak(dates: &[String]) -> u32 {
    let mut days = parse_days(dates);
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&most_recent) = days.first() else {
        return 0;
    };

    let mut streak = 0;
    let mut expected_gap = 0;
    for day in days {
        let diff = (most_recent - day).num_days();
        if diff != expected_gap {
            break;
        }
        streak += 1;
        expected_gap += 1;
    }

    streak
}

/// Monday that starts the week containing `today`
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

/// Which days of the current Monday-starting week appear in `dates`
pub fn calculate_week_progress(dates: &[String], today: NaiveDate) -> [bool; 7] {
    let studied: HashSet<NaiveDate> = parse_days(dates).into_iter().collect();
    let monday = week_start(today);

    let mut week = [false; 7];
    for (offset, slot) in week.iter_mut().enumerate() {
        *slot = studied.contains(&(monday + Duration::days(offset as i64)));
    }
    week
}

/// Keep the most recent [`MAX_RETAINED_DATES`] entries, ordered oldest first.
///
/// Ordering is by date value; malformed entries sort by their raw string.
pub fn retain_recent(dates: &mut Vec<String>) {
    dates.sort();
    dates.dedup();
    if dates.len() > MAX_RETAINED_DATES {
        dates.drain(..dates.len() - MAX_RETAINED_DATES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn days_before(today: NaiveDate, offsets: &[i64]) -> Vec<String> {
        offsets
            .iter()
            .map(|o| format_day(today - Duration::days(*o)))
            .collect()
    }

    #[test]
    fn test_empty_dates_have_no_streak() {
        assert_eq!(calculate_streak(&[]), 0);
    }

    #[test]
    fn test_consecutive_run_including_today() {
        let today = day("2026-03-12");
        assert_eq!(calculate_streak(&days_before(today, &[0, 1, 2, 3])), 4);
    }

    #[test]
    fn test_run_ending_yesterday_still_counts() {
        let today = day("2026-03-12");
        assert_eq!(calculate_streak(&days_before(today, &[1, 2, 3])), 3);
    }

    #[test]
    fn test_gap_breaks_run() {
        let today = day("2026-03-12");
        assert_eq!(calculate_streak(&days_before(today, &[0, 5])), 1);
        assert_eq!(calculate_streak(&days_before(today, &[0, 1, 3, 4, 5])), 2);
    }

    #[test]
    fn test_unordered_and_duplicate_dates() {
        let dates = vec![
            "2026-03-10".to_string(),
            "2026-03-12".to_string(),
            "2026-03-11".to_string(),
            "2026-03-12".to_string(),
        ];
        assert_eq!(calculate_streak(&dates), 3);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let dates = vec!["2026-03-12".to_string(), "garbage".to_string(), "2026-03-11".to_string()];
        assert_eq!(calculate_streak(&dates), 2);
    }

    #[test]
    fn test_run_crosses_month_boundary() {
        let dates = vec!["2026-02-28".to_string(), "2026-03-01".to_string(), "2026-02-27".to_string()];
        assert_eq!(calculate_streak(&dates), 3);
    }

    #[test]
    fn test_week_start() {
        // 2026-03-09 is a Monday
        assert_eq!(week_start(day("2026-03-09")), day("2026-03-09"));
        assert_eq!(week_start(day("2026-03-12")), day("2026-03-09"));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_start(day("2026-03-15")), day("2026-03-09"));
    }

    #[test]
    fn test_week_progress_marks_current_week_only() {
        let dates = vec![
            "2026-03-08".to_string(), // previous Sunday
            "2026-03-09".to_string(), // Monday
            "2026-03-11".to_string(), // Wednesday
            "2026-03-15".to_string(), // Sunday
        ];
        let week = calculate_week_progress(&dates, day("2026-03-12"));
        assert_eq!(week, [true, false, true, false, false, false, true]);
    }

    #[test]
    fn test_week_progress_always_seven_slots() {
        let today = day("2026-03-15");
        assert_eq!(calculate_week_progress(&[], today).len(), 7);

        let many: Vec<String> = (0..1200).map(|o| format_day(today - Duration::days(o))).collect();
        let week = calculate_week_progress(&many, today);
        assert_eq!(week.len(), 7);
        assert!(week.iter().all(|d| *d));
    }

    #[test]
    fn test_retain_recent_keeps_newest_by_date() {
        let today = day("2026-06-30");
        let mut dates: Vec<String> = (0..100).rev().map(|o| format_day(today - Duration::days(o))).collect();
        // an out-of-order late entry must not be dropped
        dates.swap(0, 99);

        retain_recent(&mut dates);

        assert_eq!(dates.len(), MAX_RETAINED_DATES);
        assert_eq!(dates.last().unwrap(), "2026-06-30");
        assert_eq!(dates.first().unwrap(), &format_day(today - Duration::days(89)));
    }
}
