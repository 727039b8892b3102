//! Calendar validation for AniList fuzzy dates.
//!
//! The upstream reports start/end dates as independent year/month/day
//! components, any of which may be missing or zero. Only complete triples
//! that denote a real calendar day are serialized; everything else degrades
//! to null rather than storing garbage.

use crate::api::types::RawDate;
use chrono::NaiveDate;

/// True when (year, month, day) denotes a real calendar date
pub fn is_valid_date(year: i32, month: i32, day: i32) -> bool {
    if year == 0 || month == 0 || day == 0 {
        return false;
    }
    match (u32::try_from(month), u32::try_from(day)) {
        (Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day).is_some(),
        _ => false,
    }
}

/// Render a fuzzy date as `Y-M-D` when it denotes a real calendar day
pub fn fuzzy_to_iso(date: Option<&RawDate>) -> Option<String> {
    let date = date?;
    let (year, month, day) = (date.year?, date.month?, date.day?);
    if !is_valid_date(year, month, day) {
        return None;
    }
    Some(format!("{}-{}-{}", year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_dates_are_valid() {
        assert!(is_valid_date(2020, 2, 29)); // leap year
        assert!(is_valid_date(2021, 12, 31));
        assert!(is_valid_date(1998, 4, 3));
    }

    #[test]
    fn test_impossible_dates_are_invalid() {
        assert!(!is_valid_date(2021, 2, 29)); // not a leap year
        assert!(!is_valid_date(2021, 13, 1));
        assert!(!is_valid_date(2021, 4, 31));
        assert!(!is_valid_date(2021, 1, -5));
    }

    #[test]
    fn test_zero_components_are_invalid() {
        assert!(!is_valid_date(0, 0, 0));
        assert!(!is_valid_date(2021, 0, 1));
        assert!(!is_valid_date(2021, 1, 0));
    }

    #[test]
    fn test_fuzzy_to_iso_renders_without_padding() {
        let date = RawDate {
            year: Some(2020),
            month: Some(1),
            day: Some(1),
        };
        assert_eq!(fuzzy_to_iso(Some(&date)), Some("2020-1-1".to_string()));
    }

    #[test]
    fn test_fuzzy_to_iso_rejects_partial_dates() {
        assert_eq!(fuzzy_to_iso(None), None);

        let missing_day = RawDate {
            year: Some(2020),
            month: Some(1),
            day: None,
        };
        assert_eq!(fuzzy_to_iso(Some(&missing_day)), None);

        let zeroed = RawDate {
            year: Some(0),
            month: Some(0),
            day: Some(0),
        };
        assert_eq!(fuzzy_to_iso(Some(&zeroed)), None);
    }
}
