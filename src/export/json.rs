use crate::errors::AppResult;
use crate::models::DayEntry;

/// Pretty-printed array of flat `{date, start, end, ...}` objects.
pub fn to_json_bytes(entries: &[DayEntry]) -> AppResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::normalize_range;
    use crate::models::{DayMap, DayRecord};
    use crate::utils::{date::parse_date, time::parse_time};

    #[test]
    fn reparsing_yields_the_range() {
        let mut days = DayMap::new();
        days.insert(
            parse_date("2025-02-03").unwrap(),
            DayRecord::with_times(parse_time("08:00"), parse_time("12:30"), 0),
        );
        let entries = normalize_range(
            parse_date("2025-02-02").unwrap(),
            parse_date("2025-02-04").unwrap(),
            &days,
        );

        let bytes = to_json_bytes(&entries).unwrap();
        let back: Vec<DayEntry> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, entries);

        let raw: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(raw[1]["date"], "2025-02-03");
        assert_eq!(raw[1]["start"], "08:00");
        assert_eq!(raw[0]["end"], "");
    }
}
