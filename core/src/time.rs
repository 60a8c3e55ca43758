use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::input::expand_key;

/// Every calendar day from `begin` to `end`, both inclusive, ascending.
///
/// A reversed range yields an empty sequence rather than an error.
pub fn expand_date_range(begin: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    begin.iter_days().take_while(|d| *d <= end).collect()
}

/// Moves a (year, month) pair by `delta` months. `None` when the result overflows.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let index = year
        .checked_mul(12)?
        .checked_add(month as i32 - 1)?
        .checked_add(delta)?;
    Some((index.div_euclid(12), index.rem_euclid(12) as u32 + 1))
}

/// First and last day of the given month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ReportError> {
    let invalid = || ReportError::InvalidMonth(format!("{:04}-{:02}", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = (28..=31)
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(invalid)?;

    Ok((first, last))
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(input.to_string()))
}

/// The inclusive date window a report covers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    begin: NaiveDate,
    end: NaiveDate,
    monthly: bool,
}

impl ReportPeriod {
    pub fn month(year: i32, month: u32) -> Result<Self, ReportError> {
        let (begin, end) = month_bounds(year, month)?;
        Ok(Self { begin, end, monthly: true })
    }

    pub fn containing_month(date: NaiveDate) -> Result<Self, ReportError> {
        Self::month(date.year(), date.month())
    }

    pub fn range(begin: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if end < begin {
            return Err(ReportError::InvalidRange { begin, end });
        }
        Ok(Self { begin, end, monthly: false })
    }

    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_monthly(&self) -> bool {
        self.monthly
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        expand_date_range(self.begin, self.end)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.begin).num_days() + 1
    }

    fn span(&self) -> Days {
        Days::new(self.num_days().unsigned_abs())
    }

    fn out_of_range(&self) -> ReportError {
        ReportError::InvalidRange { begin: self.begin, end: self.end }
    }

    /// The period immediately before this one: the previous calendar month for monthly
    /// periods, otherwise a window of the same length.
    ///
    /// Fails instead of panicking when the result falls outside the supported calendar.
    pub fn previous(&self) -> Result<Self, ReportError> {
        if self.monthly {
            let day = self.begin.pred_opt().ok_or_else(|| self.out_of_range())?;
            Self::containing_month(day)
        } else {
            let len = self.span();
            let begin = self.begin.checked_sub_days(len);
            let end = self.end.checked_sub_days(len);
            match begin.zip(end) {
                Some((begin, end)) => Self::range(begin, end),
                None => Err(self.out_of_range()),
            }
        }
    }

    pub fn next(&self) -> Result<Self, ReportError> {
        if self.monthly {
            let day = self.end.succ_opt().ok_or_else(|| self.out_of_range())?;
            Self::containing_month(day)
        } else {
            let len = self.span();
            let begin = self.begin.checked_add_days(len);
            let end = self.end.checked_add_days(len);
            match begin.zip(end) {
                Some((begin, end)) => Self::range(begin, end),
                None => Err(self.out_of_range()),
            }
        }
    }

    pub fn label(&self) -> String {
        if self.monthly {
            self.begin.format("%Y-%m").to_string()
        } else {
            format!("{}..{}", self.begin.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
        }
    }
}

const MONTH_KEYWORDS: [&str; 5] = ["this", "current", "last", "previous", "next"];

/// Parses a month selector relative to `today`.
///
/// Accepts `YYYY-MM`, signed offsets such as `-1` or `+2`, and the keywords
/// `this`, `current`, `last`, `previous` and `next` (unambiguous prefixes allowed).
pub fn parse_month(input: &str, today: NaiveDate) -> Result<ReportPeriod, ReportError> {
    let input = input.trim();
    let invalid = || ReportError::InvalidMonth(input.to_string());

    // 1. Absolute month
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d") {
        return ReportPeriod::containing_month(d);
    }

    // 2. Signed offset
    let delta = if input.starts_with(['+', '-']) {
        input.parse::<i32>().map_err(|_| invalid())?
    } else {
        // 3. Keywords
        match expand_key(input, &MONTH_KEYWORDS).map_err(|_| invalid())?.as_str() {
            "this" | "current" => 0,
            "last" | "previous" => -1,
            "next" => 1,
            _ => return Err(invalid()),
        }
    };

    let (year, month) = shift_month(today.year(), today.month(), delta).ok_or_else(invalid)?;
    ReportPeriod::month(year, month).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expand_date_range_inclusive() {
        let dates = expand_date_range(date(2024, 2, 27), date(2024, 3, 1));
        assert_eq!(
            dates,
            vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_expand_date_range_single_and_reversed() {
        assert_eq!(expand_date_range(date(2025, 1, 5), date(2025, 1, 5)), vec![date(2025, 1, 5)]);
        assert!(expand_date_range(date(2025, 1, 6), date(2025, 1, 5)).is_empty());
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(2024, 2).unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(2025, 12).unwrap(), (date(2025, 12, 1), date(2025, 12, 31)));
        assert!(month_bounds(2025, 13).is_err());
    }

    #[test]
    fn test_shift_month_across_years() {
        assert_eq!(shift_month(2025, 1, -1), Some((2024, 12)));
        assert_eq!(shift_month(2024, 12, 1), Some((2025, 1)));
        assert_eq!(shift_month(2025, 3, -15), Some((2023, 12)));
    }

    #[test]
    fn test_shift_month_overflow() {
        assert_eq!(shift_month(2025, 1, i32::MAX), None);
        assert_eq!(shift_month(-2025, 1, i32::MIN), None);
        assert_eq!(shift_month(i32::MAX, 12, 0), None);
    }

    #[test]
    fn test_period_navigation() {
        let jan = ReportPeriod::month(2025, 1).unwrap();
        assert_eq!(jan.previous().unwrap(), ReportPeriod::month(2024, 12).unwrap());
        assert_eq!(jan.next().unwrap().end(), date(2025, 2, 28));
        assert_eq!(jan.dates().len(), 31);

        let week = ReportPeriod::range(date(2025, 1, 6), date(2025, 1, 12)).unwrap();
        assert_eq!(week.previous().unwrap().begin(), date(2024, 12, 30));
        assert_eq!(week.next().unwrap().end(), date(2025, 1, 19));
    }

    #[test]
    fn test_range_rejects_reversed() {
        assert_eq!(
            ReportPeriod::range(date(2025, 1, 2), date(2025, 1, 1)),
            Err(ReportError::InvalidRange { begin: date(2025, 1, 2), end: date(2025, 1, 1) })
        );
    }

    #[test]
    fn test_parse_month() {
        let today = date(2025, 1, 15);

        assert_eq!(parse_month("2024-11", today).unwrap(), ReportPeriod::month(2024, 11).unwrap());
        assert_eq!(parse_month("this", today).unwrap(), ReportPeriod::month(2025, 1).unwrap());
        assert_eq!(parse_month("prev", today).unwrap(), ReportPeriod::month(2024, 12).unwrap());
        assert_eq!(parse_month("n", today).unwrap(), ReportPeriod::month(2025, 2).unwrap());
        assert_eq!(parse_month("-13", today).unwrap(), ReportPeriod::month(2023, 12).unwrap());
        assert_eq!(parse_month("+1", today).unwrap(), ReportPeriod::month(2025, 2).unwrap());

        assert!(parse_month("someday", today).is_err());
        assert!(parse_month("2025-13", today).is_err());
    }

    #[test]
    fn test_parse_month_huge_offset() {
        let today = date(2025, 1, 15);

        assert_eq!(
            parse_month("+2147483647", today),
            Err(ReportError::InvalidMonth("+2147483647".to_string()))
        );
        assert_eq!(
            parse_month("-2147483648", today),
            Err(ReportError::InvalidMonth("-2147483648".to_string()))
        );
        // Fits in i32 months but lands past the last supported year.
        assert_eq!(
            parse_month("+100000000", today),
            Err(ReportError::InvalidMonth("+100000000".to_string()))
        );
    }

    #[test]
    fn test_navigation_at_calendar_edges() {
        let last = ReportPeriod::range(NaiveDate::MAX, NaiveDate::MAX).unwrap();
        assert_eq!(
            last.next(),
            Err(ReportError::InvalidRange { begin: NaiveDate::MAX, end: NaiveDate::MAX })
        );
        assert!(last.previous().is_ok());

        let first = ReportPeriod::range(NaiveDate::MIN, NaiveDate::MIN).unwrap();
        assert!(first.previous().is_err());

        let final_month = ReportPeriod::containing_month(NaiveDate::MAX).unwrap();
        assert_eq!(final_month.end(), NaiveDate::MAX);
        assert!(final_month.next().is_err());
        assert!(final_month.previous().is_ok());
    }
}
