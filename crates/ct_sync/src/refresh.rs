//! Twice-daily cache invalidation.
//!
//! The cache goes stale the first time it is checked after any of today's
//! boundary hours has passed since the last fetch. Only today's boundaries are
//! considered, so any number of missed boundaries collapses into a single
//! catch-up fetch.

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

fn boundary_on<Tz: TimeZone>(now: &DateTime<Tz>, days_ahead: u64, hour: u32) -> Option<DateTime<Tz>> {
    let date = now.date_naive().checked_add_days(chrono::Days::new(days_ahead))?;
    let naive = date.and_hms_opt(hour, 0, 0)?;
    now.timezone().from_local_datetime(&naive).earliest()
}

pub fn should_refresh<Tz: TimeZone>(
    last_fetch: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
    boundary_hours: &[u32],
) -> bool {
    let Some(last_fetch) = last_fetch else {
        debug!("No previous fetch time found, will fetch new data");
        return true;
    };

    for &hour in boundary_hours {
        let Some(boundary) = boundary_on(now, 0, hour) else {
            continue;
        };
        if last_fetch < boundary && *now >= boundary {
            debug!("Last fetch {} predates today's {:02}:00 boundary", last_fetch, hour);
            return true;
        }
    }

    false
}

/// The first boundary strictly after `now`, today or tomorrow.
pub fn next_refresh<Tz: TimeZone>(now: &DateTime<Tz>, boundary_hours: &[u32]) -> Option<DateTime<Tz>> {
    let mut hours = boundary_hours.to_vec();
    hours.sort_unstable();
    hours.dedup();

    hours
        .iter()
        .filter_map(|&hour| boundary_on(now, 0, hour))
        .find(|boundary| boundary > now)
        .or_else(|| hours.iter().find_map(|&hour| boundary_on(now, 1, hour)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const HOURS: [u32; 2] = [7, 17];

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, day, hour, minute, 0)
            .unwrap()
    }

    fn utc(time: DateTime<FixedOffset>) -> Option<DateTime<Utc>> {
        Some(time.with_timezone(&Utc))
    }

    #[test]
    fn test_refresh_without_previous_fetch() {
        assert!(should_refresh(None, &at(10, 12, 0), &HOURS));
    }

    #[test]
    fn test_no_refresh_right_after_fetch() {
        for (hour, minute) in [(0, 30), (7, 0), (12, 0), (17, 0), (23, 59)] {
            let now = at(10, hour, minute);
            assert!(!should_refresh(utc(now), &now, &HOURS), "{hour}:{minute}");
        }
    }

    #[test]
    fn test_refresh_after_morning_boundary() {
        let last = utc(at(10, 6, 59));
        assert!(!should_refresh(last, &at(10, 6, 59), &HOURS));
        assert!(should_refresh(last, &at(10, 7, 0), &HOURS));
    }

    #[test]
    fn test_refresh_after_evening_boundary() {
        let last = utc(at(10, 7, 30));
        assert!(!should_refresh(last, &at(10, 16, 59), &HOURS));
        assert!(should_refresh(last, &at(10, 17, 0), &HOURS));
    }

    #[test]
    fn test_evening_fetch_valid_until_next_morning() {
        let last = utc(at(10, 18, 0));
        assert!(!should_refresh(last, &at(10, 23, 0), &HOURS));
        assert!(!should_refresh(last, &at(11, 6, 0), &HOURS));
        assert!(should_refresh(last, &at(11, 7, 1), &HOURS));
    }

    #[test]
    fn test_missed_boundaries_collapse_into_one_refresh() {
        let last = utc(at(8, 9, 0));
        let now = at(10, 12, 0);
        assert!(should_refresh(last, &now, &HOURS));
        assert!(!should_refresh(utc(now), &now, &HOURS));
    }

    #[test]
    fn test_only_todays_boundaries_are_checked() {
        // Yesterday's 17:00 was missed, but before 07:00 today nothing is due.
        let last = utc(at(9, 10, 0));
        assert!(!should_refresh(last, &at(10, 5, 0), &HOURS));
    }

    #[test]
    fn test_next_refresh() {
        assert_eq!(next_refresh(&at(10, 6, 0), &HOURS), Some(at(10, 7, 0)));
        assert_eq!(next_refresh(&at(10, 7, 0), &HOURS), Some(at(10, 17, 0)));
        assert_eq!(next_refresh(&at(10, 18, 0), &HOURS), Some(at(11, 7, 0)));
        assert_eq!(next_refresh(&at(10, 18, 0), &[]), None);
    }
}
