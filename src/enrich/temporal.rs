use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Base year for fallback dates when the season is missing or unparseable.
pub const FALLBACK_SEASON_YEAR: i32 = 1900;

const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Parses an explicit event date. Accepts a plain ISO date or a seconds
/// precision datetime; anything else degrades to `None`.
pub fn parse_event_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    None
}

/// Resolves the event instant for a record: the explicit date when one
/// parses, otherwise January 1st of the season year plus `event_num` days
/// plus `discipline_ord` seconds.
///
/// The fallback is order-preserving over (season, event_num,
/// discipline_ord); records that tie on all three may collide, and the
/// course identity comparison disambiguates downstream.
pub fn resolve_event_dt(
    raw_date: Option<&str>,
    season_num: Option<i32>,
    event_num: u32,
    discipline_ord: u8,
) -> NaiveDateTime {
    if let Some(dt) = parse_event_date(raw_date) {
        return dt;
    }

    let year = season_num.unwrap_or(FALLBACK_SEASON_YEAR);
    let base = NaiveDate::from_ymd_opt(year, 1, 1)
        .or_else(|| NaiveDate::from_ymd_opt(FALLBACK_SEASON_YEAR, 1, 1))
        .unwrap_or_default();

    base.and_time(NaiveTime::MIN)
        + Duration::days(i64::from(event_num))
        + Duration::seconds(i64::from(discipline_ord))
}

/// Age in fractional years at the event, using a 365.25-day year. `None`
/// when the birth date is unknown.
pub fn age_years(event_dt: NaiveDateTime, birth_dt: Option<NaiveDate>) -> Option<f64> {
    let birth = birth_dt?.and_time(NaiveTime::MIN);
    let seconds = (event_dt - birth).num_seconds() as f64;
    Some(seconds / SECONDS_PER_YEAR)
}
