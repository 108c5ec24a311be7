//! Sandwich leave detection.
//!
//! A non-working block (a holiday, or a run of weekly-off days) that has
//! full-day approved leave on the day before and the day after is charged as
//! leave. Half-day leave never closes a bracket.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::{
    DateInterval, Holiday, LeaveRequest, SandwichKind, SandwichPattern, WeeklyOffPattern,
};

use super::calendar::add_days;

/// Approved leave per date: `true` for full-day, `false` for half-day.
///
/// When a full-day and a half-day leave both cover a date, full-day wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDays {
    days: BTreeMap<NaiveDate, bool>,
}

impl BookedDays {
    /// Marks every day of every approved leave.
    pub fn from_leaves<'a>(leaves: impl IntoIterator<Item = &'a LeaveRequest>) -> Self {
        let mut days = BTreeMap::new();
        for leave in leaves.into_iter().filter(|l| l.is_approved()) {
            let full_day = !leave.is_half_day();
            for date in leave.interval.days() {
                let entry = days.entry(date).or_insert(false);
                *entry |= full_day;
            }
        }
        Self { days }
    }

    /// True only when `date` carries full-day approved leave.
    pub fn is_full_day(&self, date: NaiveDate) -> bool {
        self.days.get(&date).copied().unwrap_or(false)
    }

    /// True when any approved leave, full or half, covers `date`.
    pub fn is_booked(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Full-day booked dates in ascending order.
    pub fn full_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(|(_, full)| **full)
            .map(|(date, _)| *date)
    }
}

/// Finds holidays bridged by full-day leave on both adjacent days.
///
/// Each holiday charges its whole span. Patterns are keyed by their anchor
/// pair, so when several holiday records share the same day-before and
/// day-after only the first one listed is reported.
pub fn detect_holiday_sandwiches(booked: &BookedDays, holidays: &[Holiday]) -> Vec<SandwichPattern> {
    let mut seen: HashSet<(NaiveDate, NaiveDate)> = HashSet::new();
    let mut patterns = Vec::new();

    for holiday in holidays {
        // A holiday at the edge of the calendar has no bracketing day.
        let (Some(before), Some(after)) = (
            add_days(holiday.interval.start(), -1),
            add_days(holiday.interval.end(), 1),
        ) else {
            continue;
        };

        if !(booked.is_full_day(before) && booked.is_full_day(after)) {
            continue;
        }
        if !seen.insert((before, after)) {
            debug!(
                holiday = %holiday.name,
                before = %before,
                after = %after,
                "Holiday bridge already counted"
            );
            continue;
        }

        let charged_days = holiday.interval.day_span();
        patterns.push(SandwichPattern {
            kind: SandwichKind::Holiday,
            anchor_dates: [before, after],
            charged_days,
            reason: format!(
                "Holiday '{}' ({} day{}) bridged by full-day leave on {} and {}",
                holiday.name,
                charged_days,
                plural(charged_days),
                before,
                after
            ),
            holiday_name: Some(holiday.name.clone()),
        });
    }

    patterns
}

/// Finds runs of weekly-off days bridged by full-day leave.
///
/// Only the off days are charged; the anchor days are already ordinary
/// leave.
pub fn detect_weekend_sandwiches(
    booked: &BookedDays,
    weekly_off: &WeeklyOffPattern,
) -> Vec<SandwichPattern> {
    let mut patterns = Vec::new();

    for date in booked.full_days() {
        if weekly_off.is_week_off(date) {
            continue;
        }

        // A working `date` means the pattern has at most six off days.
        let mut off_count: u32 = 0;
        while off_count < 7
            && add_days(date, i64::from(off_count) + 1).is_some_and(|d| weekly_off.is_week_off(d))
        {
            off_count += 1;
        }
        if off_count == 0 {
            continue;
        }

        let Some(after) = add_days(date, i64::from(off_count) + 1) else {
            continue;
        };
        if !booked.is_full_day(after) {
            continue;
        }

        patterns.push(SandwichPattern {
            kind: SandwichKind::Weekend,
            anchor_dates: [date, after],
            charged_days: off_count,
            reason: format!(
                "{} week-off day{} between full-day leave on {} ({}) and {} ({})",
                off_count,
                plural(off_count),
                date,
                date.weekday(),
                after,
                after.weekday()
            ),
            holiday_name: None,
        });
    }

    patterns
}

/// Runs both detectors over the full leave set and keeps the patterns with
/// an anchor inside `window`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::detect_sandwiches;
/// use leave_engine::models::{Holiday, LeaveRequest, LeaveStatus, WeeklyOffPattern, YearMonth};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 11, day).unwrap();
/// let leaves = vec![
///     LeaveRequest::new("a", "emp", d(13), d(13), None, LeaveStatus::Approved, "Casual").unwrap(),
///     LeaveRequest::new("b", "emp", d(15), d(15), None, LeaveStatus::Approved, "Casual").unwrap(),
/// ];
/// let holidays = vec![Holiday::single_day("Holiday", d(14))];
/// let window = YearMonth::new(2025, 11).unwrap().interval();
///
/// let patterns = detect_sandwiches(&leaves, &holidays, &WeeklyOffPattern::default(), &window);
/// assert_eq!(patterns.len(), 1);
/// assert_eq!(patterns[0].charged_days, 1);
/// ```
pub fn detect_sandwiches(
    leaves: &[LeaveRequest],
    holidays: &[Holiday],
    weekly_off: &WeeklyOffPattern,
    window: &DateInterval,
) -> Vec<SandwichPattern> {
    let booked = BookedDays::from_leaves(leaves);
    detect_booked_sandwiches(&booked, holidays, weekly_off, window)
}

/// Same as [`detect_sandwiches`] over already-built [`BookedDays`].
pub fn detect_booked_sandwiches(
    booked: &BookedDays,
    holidays: &[Holiday],
    weekly_off: &WeeklyOffPattern,
    window: &DateInterval,
) -> Vec<SandwichPattern> {
    let mut patterns = detect_holiday_sandwiches(booked, holidays);
    patterns.extend(detect_weekend_sandwiches(booked, weekly_off));
    patterns.retain(|p| p.touches(window.start(), window.end()));
    patterns
}

fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HalfDaySession, LeaveStatus, YearMonth};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn full_day(id: &str, start: &str, end: &str) -> LeaveRequest {
        LeaveRequest::new(
            id,
            "emp_001",
            make_date(start),
            make_date(end),
            None,
            LeaveStatus::Approved,
            "Casual",
        )
        .unwrap()
    }

    fn half_day(id: &str, date: &str) -> LeaveRequest {
        LeaveRequest::new(
            id,
            "emp_001",
            make_date(date),
            make_date(date),
            Some(HalfDaySession::MorningHalf),
            LeaveStatus::Approved,
            "Casual",
        )
        .unwrap()
    }

    fn november() -> DateInterval {
        YearMonth::new(2025, 11).unwrap().interval()
    }

    // ==========================================================================
    // Booked days
    // ==========================================================================
    #[test]
    fn test_half_day_books_false() {
        let booked = BookedDays::from_leaves(&[half_day("h", "2025-11-13")]);
        assert!(booked.is_booked(make_date("2025-11-13")));
        assert!(!booked.is_full_day(make_date("2025-11-13")));
    }

    #[test]
    fn test_full_day_wins_over_half_day_on_same_date() {
        let booked = BookedDays::from_leaves(&[
            half_day("h", "2025-11-13"),
            full_day("f", "2025-11-13", "2025-11-13"),
        ]);
        assert!(booked.is_full_day(make_date("2025-11-13")));
    }

    #[test]
    fn test_unapproved_leave_is_not_booked() {
        let mut pending = full_day("p", "2025-11-13", "2025-11-13");
        pending.status = LeaveStatus::Pending;
        let mut rejected = full_day("r", "2025-11-15", "2025-11-15");
        rejected.status = LeaveStatus::Rejected;
        let booked = BookedDays::from_leaves(&[pending, rejected]);
        assert!(!booked.is_booked(make_date("2025-11-13")));
        assert!(!booked.is_booked(make_date("2025-11-15")));
    }

    // ==========================================================================
    // Scenario A: holiday Nov 14 bridged by leave on Nov 13 and Nov 15
    // ==========================================================================
    #[test]
    fn test_scenario_a_single_day_holiday_sandwich() {
        let leaves = vec![
            full_day("a", "2025-11-13", "2025-11-13"),
            full_day("b", "2025-11-15", "2025-11-15"),
        ];
        let holidays = vec![Holiday::single_day("Holiday", make_date("2025-11-14"))];

        let patterns = detect_sandwiches(
            &leaves,
            &holidays,
            &WeeklyOffPattern::default(),
            &november(),
        );

        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind, SandwichKind::Holiday);
        assert_eq!(patterns[0].charged_days, 1);
        assert_eq!(
            patterns[0].anchor_dates,
            [make_date("2025-11-13"), make_date("2025-11-15")]
        );
        assert_eq!(patterns[0].holiday_name.as_deref(), Some("Holiday"));
    }

    // ==========================================================================
    // Scenario B: Sat/Sun week-off bridged by Friday and Monday leave
    // ==========================================================================
    #[test]
    fn test_scenario_b_two_day_weekend_sandwich() {
        let leaves = vec![
            full_day("fri", "2025-11-21", "2025-11-21"),
            full_day("mon", "2025-11-24", "2025-11-24"),
        ];
        let pattern = WeeklyOffPattern::new([0, 6]).unwrap();

        let patterns = detect_sandwiches(&leaves, &[], &pattern, &november());

        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind, SandwichKind::Weekend);
        assert_eq!(patterns[0].charged_days, 2);
        assert_eq!(
            patterns[0].anchor_dates,
            [make_date("2025-11-21"), make_date("2025-11-24")]
        );
    }

    // ==========================================================================
    // Scenario C: half-day before the holiday does not close the bracket
    // ==========================================================================
    #[test]
    fn test_scenario_c_half_day_anchor_is_not_a_sandwich() {
        let leaves = vec![
            half_day("h", "2025-11-13"),
            full_day("b", "2025-11-15", "2025-11-15"),
        ];
        let holidays = vec![Holiday::single_day("Holiday", make_date("2025-11-14"))];

        let patterns = detect_sandwiches(
            &leaves,
            &holidays,
            &WeeklyOffPattern::default(),
            &november(),
        );
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_leave_on_one_side_only_is_not_a_sandwich() {
        let leaves = vec![full_day("a", "2025-11-13", "2025-11-13")];
        let holidays = vec![Holiday::single_day("Holiday", make_date("2025-11-14"))];
        let booked = BookedDays::from_leaves(&leaves);
        assert!(detect_holiday_sandwiches(&booked, &holidays).is_empty());
    }

    #[test]
    fn test_multi_day_holiday_charges_full_span() {
        let leaves = vec![
            full_day("a", "2025-10-17", "2025-10-17"),
            full_day("b", "2025-10-23", "2025-10-23"),
        ];
        let holidays = vec![
            Holiday::new("Diwali", None, make_date("2025-10-18"), make_date("2025-10-22")).unwrap(),
        ];
        let booked = BookedDays::from_leaves(&leaves);
        let patterns = detect_holiday_sandwiches(&booked, &holidays);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].charged_days, 5);
    }

    // Known limitation: two holiday records with identical anchors are
    // counted once, whichever is listed first.
    #[test]
    fn test_duplicate_holiday_bridge_counted_once_first_match_wins() {
        let leaves = vec![
            full_day("a", "2025-12-24", "2025-12-24"),
            full_day("b", "2025-12-26", "2025-12-26"),
        ];
        let holidays = vec![
            Holiday::single_day("Christmas", make_date("2025-12-25")),
            Holiday::single_day("Christmas (regional)", make_date("2025-12-25")),
        ];
        let booked = BookedDays::from_leaves(&leaves);
        let patterns = detect_holiday_sandwiches(&booked, &holidays);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].holiday_name.as_deref(), Some("Christmas"));
    }

    // Known limitation: back-to-back holidays are judged one record at a
    // time, so a bridge spanning both is not detected when each record's
    // own neighbours are not both on leave.
    #[test]
    fn test_back_to_back_holidays_are_judged_per_record() {
        let leaves = vec![
            full_day("a", "2025-12-24", "2025-12-24"),
            full_day("b", "2025-12-27", "2025-12-27"),
        ];
        let holidays = vec![
            Holiday::single_day("Christmas", make_date("2025-12-25")),
            Holiday::single_day("Boxing Day", make_date("2025-12-26")),
        ];
        let booked = BookedDays::from_leaves(&leaves);
        assert!(detect_holiday_sandwiches(&booked, &holidays).is_empty());
    }

    #[test]
    fn test_single_sunday_sandwich_with_default_pattern() {
        // Saturday 2025-11-22 and Monday 2025-11-24 around Sunday
        let leaves = vec![
            full_day("sat", "2025-11-22", "2025-11-22"),
            full_day("mon", "2025-11-24", "2025-11-24"),
        ];
        let booked = BookedDays::from_leaves(&leaves);
        let patterns = detect_weekend_sandwiches(&booked, &WeeklyOffPattern::default());
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].charged_days, 1);
    }

    #[test]
    fn test_weekend_without_leave_after_is_not_charged() {
        let leaves = vec![full_day("fri", "2025-11-21", "2025-11-21")];
        let booked = BookedDays::from_leaves(&leaves);
        let pattern = WeeklyOffPattern::new([0, 6]).unwrap();
        assert!(detect_weekend_sandwiches(&booked, &pattern).is_empty());
    }

    #[test]
    fn test_half_day_monday_does_not_close_weekend() {
        let leaves = vec![
            full_day("fri", "2025-11-21", "2025-11-21"),
            half_day("mon", "2025-11-24"),
        ];
        let booked = BookedDays::from_leaves(&leaves);
        let pattern = WeeklyOffPattern::new([0, 6]).unwrap();
        assert!(detect_weekend_sandwiches(&booked, &pattern).is_empty());
    }

    #[test]
    fn test_leave_spanning_the_weekend_is_still_charged() {
        let leaves = vec![full_day("long", "2025-11-21", "2025-11-24")];
        let booked = BookedDays::from_leaves(&leaves);
        let pattern = WeeklyOffPattern::new([0, 6]).unwrap();
        let patterns = detect_weekend_sandwiches(&booked, &pattern);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].charged_days, 2);
    }

    #[test]
    fn test_no_week_off_days_means_no_weekend_sandwich() {
        let leaves = vec![full_day("week", "2025-11-17", "2025-11-23")];
        let booked = BookedDays::from_leaves(&leaves);
        let pattern = WeeklyOffPattern::new([]).unwrap();
        assert!(detect_weekend_sandwiches(&booked, &pattern).is_empty());
    }

    #[test]
    fn test_window_filter_keeps_patterns_with_anchor_inside() {
        // Friday Oct 31 and Monday Nov 3 around a Sat/Sun weekend
        let leaves = vec![
            full_day("fri", "2025-10-31", "2025-10-31"),
            full_day("mon", "2025-11-03", "2025-11-03"),
        ];
        let pattern = WeeklyOffPattern::new([0, 6]).unwrap();

        let october = YearMonth::new(2025, 10).unwrap().interval();
        let december = YearMonth::new(2025, 12).unwrap().interval();

        assert_eq!(detect_sandwiches(&leaves, &[], &pattern, &november()).len(), 1);
        assert_eq!(detect_sandwiches(&leaves, &[], &pattern, &october).len(), 1);
        assert!(detect_sandwiches(&leaves, &[], &pattern, &december).is_empty());
    }

    #[test]
    fn test_holidays_at_calendar_edges_are_skipped() {
        let holidays = vec![
            Holiday::single_day("Last", NaiveDate::MAX),
            Holiday::single_day("First", NaiveDate::MIN),
        ];
        let window = DateInterval::new(NaiveDate::MIN, NaiveDate::MAX).unwrap();
        assert!(detect_sandwiches(&[], &holidays, &WeeklyOffPattern::default(), &window).is_empty());
    }

    #[test]
    fn test_leave_on_last_representable_day_has_no_weekend_bracket() {
        let leave = LeaveRequest::new(
            "edge",
            "emp_001",
            NaiveDate::MAX,
            NaiveDate::MAX,
            None,
            LeaveStatus::Approved,
            "Casual",
        )
        .unwrap();
        let booked = BookedDays::from_leaves([&leave]);
        let everything_but_leave_day: Vec<u8> = (0..7u8)
            .filter(|d| u32::from(*d) != NaiveDate::MAX.weekday().num_days_from_sunday())
            .collect();
        let pattern = WeeklyOffPattern::new(everything_but_leave_day).unwrap();
        assert!(detect_weekend_sandwiches(&booked, &pattern).is_empty());
    }
}
