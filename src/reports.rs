use crate::errors::AppError;
use crate::models::{Report, ReportForm};
use crate::storage::{Store, append_report};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use tracing::info;

pub const DEFAULT_DIFFICULTY: i64 = 3;

/// Renders the date and time a report is stamped with.
pub trait StampFormatter {
    fn date<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display;
    fn time<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display;
}

/// `ru-RU` style stamps: `19.10.2026` and `14:05:09`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuLocale;

impl StampFormatter for RuLocale {
    fn date<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        at.format("%d.%m.%Y").to_string()
    }

    fn time<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug)]
pub enum ReportOutcome {
    Saved(Report),
    Rejected,
}

pub fn record_report<Tz, F>(
    store: &mut impl Store,
    form: &ReportForm,
    now: &DateTime<Tz>,
    formatter: &F,
) -> Result<ReportOutcome, AppError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    F: StampFormatter,
{
    let notes = form.notes.trim();
    let Ok(difficulty) = form.difficulty.trim().parse::<i64>() else {
        return Ok(ReportOutcome::Rejected);
    };
    if notes.is_empty() {
        return Ok(ReportOutcome::Rejected);
    }

    let report = Report {
        date: formatter.date(now),
        time: formatter.time(now),
        difficulty,
        notes: notes.to_string(),
    };
    append_report(store, report.clone())?;
    info!(difficulty, date = %report.date, "report recorded");

    Ok(ReportOutcome::Saved(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StoreData, load_reports};
    use chrono::Utc;

    struct FixedStamp;

    impl StampFormatter for FixedStamp {
        fn date<Tz: TimeZone>(&self, _at: &DateTime<Tz>) -> String
        where
            Tz::Offset: Display,
        {
            "DATE".to_string()
        }

        fn time<Tz: TimeZone>(&self, _at: &DateTime<Tz>) -> String
        where
            Tz::Offset: Display,
        {
            "TIME".to_string()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 7, 5, 9).unwrap()
    }

    fn form(notes: &str, difficulty: &str) -> ReportForm {
        ReportForm {
            notes: notes.to_string(),
            difficulty: difficulty.to_string(),
        }
    }

    #[test]
    fn saves_trimmed_notes_and_difficulty() {
        let mut store = StoreData::default();
        let outcome = record_report(&mut store, &form("  felt fine \n", "2"), &now(), &FixedStamp)
            .unwrap();
        assert!(matches!(outcome, ReportOutcome::Saved(_)));

        assert_eq!(
            load_reports(&store),
            vec![Report {
                date: "DATE".into(),
                time: "TIME".into(),
                difficulty: 2,
                notes: "felt fine".into(),
            }]
        );
    }

    #[test]
    fn appends_without_touching_prior_entries() {
        let mut store = StoreData::default();
        record_report(&mut store, &form("first", "5"), &now(), &FixedStamp).unwrap();
        let before = load_reports(&store);

        record_report(&mut store, &form("second", "1"), &now(), &FixedStamp).unwrap();
        let after = load_reports(&store);
        assert_eq!(after.len(), 2);
        assert_eq!(after[..1], before[..]);
    }

    #[test]
    fn empty_fields_change_nothing() {
        let mut store = StoreData::default();
        for bad in [form("", "3"), form("   ", "3"), form("notes", ""), form("notes", "hard")] {
            let outcome = record_report(&mut store, &bad, &now(), &FixedStamp).unwrap();
            assert!(matches!(outcome, ReportOutcome::Rejected));
        }
        assert_eq!(store, StoreData::default());
    }

    #[test]
    fn difficulty_range_is_not_enforced() {
        let mut store = StoreData::default();
        record_report(&mut store, &form("rough", "9"), &now(), &FixedStamp).unwrap();
        assert_eq!(load_reports(&store)[0].difficulty, 9);
    }

    #[test]
    fn ru_locale_stamps() {
        assert_eq!(RuLocale.date(&now()), "19.10.2026");
        assert_eq!(RuLocale.time(&now()), "07:05:09");
    }
}
