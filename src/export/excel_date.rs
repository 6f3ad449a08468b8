use chrono::{NaiveDate, NaiveTime, Timelike};

pub(crate) const DATE_FORMAT: &str = "yyyy-mm-dd";
pub(crate) const TIME_FORMAT: &str = "hh:mm";

const EXCEL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(d) => d,
    None => NaiveDate::MIN,
};

/// Days since the 1899-12-30 epoch.
pub(crate) fn date_serial(d: NaiveDate) -> f64 {
    (d - EXCEL_EPOCH).num_days() as f64
}

/// Fraction of a day.
pub(crate) fn time_serial(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / 86400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_serials() {
        assert_eq!(date_serial(NaiveDate::from_ymd_opt(1900, 3, 1).unwrap()), 61.0);
        assert_eq!(date_serial(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), 45658.0);
        assert_eq!(time_serial(NaiveTime::from_hms_opt(12, 0, 0).unwrap()), 0.5);
    }
}
