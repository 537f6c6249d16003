//! Concrete date and time intervals, and collapsing of overlapping ones.
//!
//! Collapsing narrows overlapping ranges to their common window
//! (intersection), which is what constraint resolution needs: a candidate
//! has to satisfy every overlapping constraint at once.

use chrono::NaiveDate;

use crate::time::Time;

/// A half-open interval `[start, end)` over an ordered point type.
pub trait Interval: Clone {
    type Point: Ord + Copy;

    fn start_point(&self) -> Self::Point;
    fn end_point(&self) -> Self::Point;
    fn from_points(start: Self::Point, end: Self::Point) -> Self;

    /// Whether the two ranges share any instant: either `self` starts no
    /// later than `other` and runs past its start, or `self` starts inside
    /// `other`.
    fn is_overlapping(&self, other: &Self) -> bool {
        let (s1, e1) = (self.start_point(), self.end_point());
        let (s2, e2) = (other.start_point(), other.end_point());
        (e1 > s2 && s1 <= s2) || (s1 < e2 && s1 >= s2)
    }

    /// The common window of two overlapping ranges.
    fn collapse_overlapping(&self, other: &Self) -> Self {
        Self::from_points(
            self.start_point().max(other.start_point()),
            self.end_point().min(other.end_point()),
        )
    }

    fn contains_point(&self, point: Self::Point) -> bool {
        self.start_point() <= point && point < self.end_point()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The dates from `start` up to, but not including, `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` is on or after the start and before the end.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_point(date)
    }
}

impl Interval for DateRange {
    type Point = NaiveDate;

    fn start_point(&self) -> NaiveDate {
        self.start
    }

    fn end_point(&self) -> NaiveDate {
        self.end
    }

    fn from_points(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start, end)
    }
}

/// Time ranges compare on milliseconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Time,
    pub end: Time,
}

impl TimeRange {
    /// The clock span from `start` up to, but not including, `end`. An end of
    /// `24:00:00` runs to midnight.
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Whether `time` is on or after the start and before the end.
    pub fn contains(&self, time: Time) -> bool {
        self.contains_point(time.to_millis())
    }
}

impl Interval for TimeRange {
    type Point = u64;

    fn start_point(&self) -> u64 {
        self.start.to_millis()
    }

    fn end_point(&self) -> u64 {
        self.end.to_millis()
    }

    fn from_points(start: u64, end: u64) -> Self {
        Self::new(Time::from_millis(start), Time::from_millis(end))
    }
}

/// Replace overlapping pairs by their intersection until no two ranges
/// overlap, then sort by start. Each step removes one range, so this ends.
pub fn collapse<R: Interval>(ranges: &[R]) -> Vec<R> {
    let mut result = ranges.to_vec();
    while collapse_first_overlap(&mut result) {}
    result.sort_by_key(|r| r.start_point());
    result
}

fn collapse_first_overlap<R: Interval>(ranges: &mut Vec<R>) -> bool {
    for i in 0..ranges.len() {
        for j in (i + 1)..ranges.len() {
            if ranges[i].is_overlapping(&ranges[j]) {
                let merged = ranges[i].collapse_overlapping(&ranges[j]);
                ranges.remove(j);
                ranges.remove(i);
                ranges.push(merged);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, m, day).unwrap()
    }

    fn t(h: u32) -> Time {
        Time::new(h, 0, 0)
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = DateRange::new(d(1, 1), d(1, 10));
        let b = DateRange::new(d(1, 5), d(1, 20));
        assert!(a.is_overlapping(&b));
        assert!(b.is_overlapping(&a));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let a = DateRange::new(d(1, 1), d(1, 10));
        let b = DateRange::new(d(1, 10), d(1, 20));
        assert!(!a.is_overlapping(&b));
        assert!(!b.is_overlapping(&a));
    }

    #[test]
    fn test_collapse_overlapping_is_intersection() {
        let a = TimeRange::new(t(8), t(12));
        let b = TimeRange::new(t(10), t(14));
        assert_eq!(a.collapse_overlapping(&b), TimeRange::new(t(10), t(12)));
    }

    #[test]
    fn test_collapse_list() {
        let ranges = [
            DateRange::new(d(6, 1), d(6, 30)),
            DateRange::new(d(1, 1), d(1, 31)),
            DateRange::new(d(1, 15), d(2, 15)),
        ];
        assert_eq!(
            collapse(&ranges),
            vec![
                DateRange::new(d(1, 15), d(1, 31)),
                DateRange::new(d(6, 1), d(6, 30)),
            ]
        );
    }

    #[test]
    fn test_collapse_disjoint_only_sorts() {
        let ranges = [TimeRange::new(t(16), t(20)), TimeRange::new(t(8), t(12))];
        assert_eq!(
            collapse(&ranges),
            vec![TimeRange::new(t(8), t(12)), TimeRange::new(t(16), t(20))]
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = TimeRange::new(t(9), t(12));
        assert!(r.contains(t(9)));
        assert!(r.contains(Time::new(11, 59, 59)));
        assert!(!r.contains(t(12)));
    }
}
