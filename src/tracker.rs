//! Day counting since the last reset.
//!
//! The reset moment is stored as entered in a `datetime-local` field, so it is
//! read back in the zone of the clock it is compared against.

use crate::storage::{Store, load_reference};
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use tracing::warn;

pub const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Настройте последнюю дату и время срыва в разделе \"Настройки\".";
pub const IN_FUTURE_MESSAGE: &str =
    "Дата срыва установлена в будущем. Пожалуйста, проверьте настройки.";

const DAY_FORMS: [&str; 3] = ["день", "дня", "дней"];
const HOUR_FORMS: [&str; 3] = ["час", "часа", "часов"];

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    NotConfigured,
    InFuture,
    Day { number: i64, days: i64, hours: i64 },
}

impl DayStatus {
    pub fn headline(&self) -> String {
        match self {
            DayStatus::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            DayStatus::InFuture => IN_FUTURE_MESSAGE.to_string(),
            DayStatus::Day { number, .. } => format!("День #{number}"),
        }
    }

    /// Elapsed span such as "3 дня 5 часов"; only present for a running count.
    pub fn detail(&self) -> Option<String> {
        match self {
            DayStatus::Day { days, hours, .. } => Some(format!(
                "{days} {} {hours} {}",
                day_word(*days),
                hour_word(*hours)
            )),
            _ => None,
        }
    }

    pub fn state(&self) -> &'static str {
        match self {
            DayStatus::NotConfigured => "not_configured",
            DayStatus::InFuture => "in_future",
            DayStatus::Day { .. } => "day",
        }
    }
}

pub trait DayView {
    fn set_day_text(&mut self, headline: String, detail: Option<String>);
}

/// Picks the one/few/many form: 1, 21, 101 → one; 2-4, 22-24 → few; the rest,
/// including 11-14, → many.
pub fn plural(n: i64, forms: [&'static str; 3]) -> &'static str {
    let n = n.abs();
    let last = n % 10;
    let last_two = n % 100;
    if last == 1 && last_two != 11 {
        forms[0]
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        forms[1]
    } else {
        forms[2]
    }
}

pub fn day_word(days: i64) -> &'static str {
    plural(days, DAY_FORMS)
}

pub fn hour_word(hours: i64) -> &'static str {
    plural(hours, HOUR_FORMS)
}

pub fn parse_reference<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(zone));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| resolve_local(naive, |at| zone.from_local_datetime(at)))
}

/// A wall-clock time skipped by a forward DST jump resolves to the same
/// reading an hour later, the way browsers do.
fn resolve_local<Tz: TimeZone>(
    naive: NaiveDateTime,
    lookup: impl Fn(&NaiveDateTime) -> LocalResult<DateTime<Tz>>,
) -> Option<DateTime<Tz>> {
    match lookup(&naive) {
        LocalResult::None => lookup(&(naive + Duration::hours(1))).earliest(),
        found => found.earliest(),
    }
}

pub fn day_status_at<Tz: TimeZone>(reference: Option<&str>, now: &DateTime<Tz>) -> DayStatus {
    let Some(raw) = reference else {
        return DayStatus::NotConfigured;
    };
    let Some(reference) = parse_reference(raw, &now.timezone()) else {
        warn!("stored reset timestamp {raw:?} is not a date-time, treating it as unset");
        return DayStatus::NotConfigured;
    };

    let diff = now.clone().signed_duration_since(reference).num_milliseconds();
    if diff < 0 {
        return DayStatus::InFuture;
    }

    let days = diff / MS_PER_DAY;
    DayStatus::Day {
        number: days + 1,
        days,
        hours: (diff % MS_PER_DAY) / MS_PER_HOUR,
    }
}

pub fn display_current_day<Tz: TimeZone>(
    view: &mut impl DayView,
    store: &impl Store,
    now: &DateTime<Tz>,
) -> DayStatus {
    let status = day_status_at(load_reference(store).as_deref(), now);
    view.set_day_text(status.headline(), status.detail());
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StoreData, save_reference};
    use chrono::Utc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap()
    }

    #[test]
    fn reference_now_is_day_one() {
        let status = day_status_at(Some("2026-10-19T12:30"), &now());
        assert_eq!(status, DayStatus::Day { number: 1, days: 0, hours: 0 });
        assert_eq!(status.headline(), "День #1");
    }

    #[test]
    fn one_full_day_ago_is_day_two() {
        let reference = (now() - Duration::milliseconds(MS_PER_DAY)).to_rfc3339();
        let status = day_status_at(Some(&reference), &now());
        assert_eq!(status, DayStatus::Day { number: 2, days: 1, hours: 0 });
    }

    #[test]
    fn just_under_a_day_is_still_day_one() {
        let status = day_status_at(Some("2026-10-18T12:30:01"), &now());
        assert_eq!(status, DayStatus::Day { number: 1, days: 0, hours: 23 });
    }

    #[test]
    fn future_reference_shows_warning_without_count() {
        let status = day_status_at(Some("2026-10-20T09:00"), &now());
        assert_eq!(status, DayStatus::InFuture);
        assert_eq!(status.headline(), IN_FUTURE_MESSAGE);
        assert!(status.detail().is_none());
    }

    #[test]
    fn absent_or_garbage_reference_asks_for_settings() {
        assert_eq!(day_status_at(None, &now()), DayStatus::NotConfigured);
        assert_eq!(day_status_at(Some("yesterday"), &now()), DayStatus::NotConfigured);
    }

    #[test]
    fn skipped_wall_clock_time_shifts_forward() {
        // 02:00-03:00 on 2026-03-29 does not exist in this zone.
        let gap_start = NaiveDateTime::parse_from_str("2026-03-29T02:00", "%Y-%m-%dT%H:%M").unwrap();
        let gap_end = gap_start + Duration::hours(1);
        let lookup = |at: &NaiveDateTime| {
            if (gap_start..gap_end).contains(at) {
                LocalResult::None
            } else {
                LocalResult::Single(Utc.from_utc_datetime(at))
            }
        };

        let inside = NaiveDateTime::parse_from_str("2026-03-29T02:30", "%Y-%m-%dT%H:%M").unwrap();
        let resolved = resolve_local(inside, lookup).expect("gap time resolves");
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 29, 3, 30, 0).unwrap());

        let outside = NaiveDateTime::parse_from_str("2026-03-29T03:30", "%Y-%m-%dT%H:%M").unwrap();
        assert_eq!(resolve_local(outside, lookup), Some(resolved));
    }

    #[test]
    fn plural_forms_follow_last_digits() {
        assert_eq!(day_word(1), "день");
        assert_eq!(day_word(21), "день");
        assert_eq!(day_word(11), "дней");
        assert_eq!(day_word(3), "дня");
        assert_eq!(day_word(24), "дня");
        assert_eq!(day_word(13), "дней");
        assert_eq!(day_word(0), "дней");
        assert_eq!(day_word(105), "дней");
        assert_eq!(hour_word(1), "час");
        assert_eq!(hour_word(22), "часа");
        assert_eq!(hour_word(12), "часов");
    }

    #[test]
    fn detail_line_uses_plural_words() {
        let status = day_status_at(Some("2026-10-16T07:30"), &now());
        assert_eq!(status, DayStatus::Day { number: 4, days: 3, hours: 5 });
        assert_eq!(status.detail().as_deref(), Some("3 дня 5 часов"));
    }

    #[test]
    fn reads_reference_from_store() {
        struct Line(Option<(String, Option<String>)>);
        impl DayView for Line {
            fn set_day_text(&mut self, headline: String, detail: Option<String>) {
                self.0 = Some((headline, detail));
            }
        }

        let mut store = StoreData::default();
        let mut view = Line(None);
        display_current_day(&mut view, &store, &now());
        assert_eq!(view.0, Some((NOT_CONFIGURED_MESSAGE.to_string(), None)));

        save_reference(&mut store, "2026-10-18T11:30");
        display_current_day(&mut view, &store, &now());
        assert_eq!(
            view.0,
            Some(("День #2".to_string(), Some("1 день 1 час".to_string())))
        );
    }
}
