//! Application shell.
//!
//! Owns the database connection, the bound views, the form state, the
//! settings store and the error sink, and wires user actions to them.

use crate::config::settings::Settings;
use crate::core::commit::{CommitReport, commit_trigger};
use crate::core::form::FormState;
use crate::core::registry::{
    self, CUP_SIZES, PERSISTED_INPUTS, RECORD_TYPES, SLEEP_TOTAL_INPUT,
};
use crate::core::report::{ErrorSink, Failure};
use crate::core::view::{DeleteReport, ViewHandle, ViewManager};
use crate::db::initialize::init_db;
use crate::db::log::{LogOp, wlog};
use crate::db::pool::DbPool;
use crate::db::records::insert_record;
use crate::errors::{AppError, AppResult};
use crate::models::descriptor::{CommitTrigger, RecordDescriptor};
use crate::models::field::{FieldKind, FieldValue};
use crate::models::record::RecordId;
use crate::ui::messages::warning;
use crate::utils::date::today;
use crate::utils::time::now;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use std::collections::HashSet;

pub const LAST_PAGE_KEY: &str = "last_page";

/// Values typed on the command line for one commit.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `input=value` assignments, applied in order.
    pub assignments: Vec<(String, String)>,
    /// Checkbox inputs to tick.
    pub checks: Vec<String>,
    /// Value for every `date` column of the committed record types.
    pub date: Option<NaiveDate>,
    /// Value for every `time` column of the committed record types.
    pub time: Option<NaiveTime>,
}

impl Overrides {
    /// Split `input=value`. The value is kept as typed.
    pub fn parse_assignment(raw: &str) -> AppResult<(String, String)> {
        match raw.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
            _ => Err(AppError::invalid_input(raw, "expected <input>=<value>")),
        }
    }
}

/// Forwards failures to the wrapped sink and records them in `log`.
struct LoggingSink<'a> {
    conn: &'a Connection,
    inner: &'a mut dyn ErrorSink,
}

impl ErrorSink for LoggingSink<'_> {
    fn report(&mut self, failure: Failure) {
        let msg = format!("{} failed: {}", failure.operation, failure.error);
        let _ = wlog(self.conn, LogOp::Error, failure.record_type, &msg);
        self.inner.report(failure);
    }
}

pub struct Shell {
    pool: DbPool,
    views: ViewManager,
    form: FormState,
    settings: Settings,
    sink: Box<dyn ErrorSink>,
    today: NaiveDate,
    now: NaiveTime,
}

impl Shell {
    pub fn start(pool: DbPool, settings: Settings, sink: Box<dyn ErrorSink>) -> AppResult<Self> {
        Self::start_at(pool, settings, sink, today(), now())
    }

    /// Startup with an explicit clock.
    pub fn start_at(
        pool: DbPool,
        settings: Settings,
        sink: Box<dyn ErrorSink>,
        today: NaiveDate,
        now: NaiveTime,
    ) -> AppResult<Self> {
        registry::validate()?;
        init_db(&pool.conn)?;
        let views = ViewManager::bind_all(&pool.conn, RECORD_TYPES)?;

        let mut shell = Self {
            pool,
            views,
            form: FormState::new(today, now),
            settings,
            sink,
            today,
            now,
        };
        shell.restore_inputs();
        Ok(shell)
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn restore_inputs(&mut self) {
        for &key in PERSISTED_INPUTS {
            if !self.settings.contains(key) {
                continue;
            }
            let value = match self.form.kind(key) {
                Some(FieldKind::Text) => FieldValue::Text(self.settings.get(key, String::new())),
                Some(FieldKind::Slider { min, .. }) => FieldValue::Int(self.settings.get(key, min)),
                _ => continue,
            };
            if let Err(e) = self.form.set(key, value) {
                warning(format!("Ignoring saved value: {}", e));
            }
        }
    }

    /// Run a commit trigger against the current form, after applying the
    /// trigger stamps and the command-line overrides.
    pub fn commit(&mut self, trigger_name: &str, overrides: &Overrides) -> AppResult<CommitReport> {
        let trigger = registry::trigger(trigger_name)?;
        let records = trigger
            .records
            .iter()
            .map(|r| registry::descriptor(r))
            .collect::<AppResult<Vec<&'static RecordDescriptor>>>()?;

        self.check_inputs(trigger, overrides)?;

        let explicit: HashSet<&str> = overrides
            .assignments
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();

        for &input in trigger.stamp {
            if !explicit.contains(input) {
                self.form.stamp(input, self.today, self.now)?;
            }
        }

        for d in &records {
            for f in d.fields {
                if explicit.contains(f.input) {
                    continue;
                }
                match (f.column, overrides.date, overrides.time) {
                    (RecordDescriptor::DATE_COLUMN, Some(date), _) => {
                        self.form.set(f.input, FieldValue::Date(date))?
                    }
                    (RecordDescriptor::TIME_COLUMN, _, Some(time)) => {
                        self.form.set(f.input, FieldValue::Time(time))?
                    }
                    _ => {}
                }
            }
        }

        for (input, raw) in &overrides.assignments {
            self.form.set_str(input, raw)?;
        }
        for input in &overrides.checks {
            self.form.set(input, FieldValue::Bool(true))?;
        }

        let computes_total = records
            .iter()
            .any(|d| d.fields.iter().any(|f| f.input == SLEEP_TOTAL_INPUT));
        if computes_total && !explicit.contains(SLEEP_TOTAL_INPUT) {
            self.form.update_sleep_total();
        }

        let conn = &self.pool.conn;
        let mut sink = LoggingSink {
            conn,
            inner: self.sink.as_mut(),
        };
        let report = commit_trigger(
            trigger,
            &records,
            &self.form,
            |d, values| insert_record(conn, d, values),
            &mut self.views,
            conn,
            &mut sink,
        );

        for (name, id) in &report.committed {
            let _ = wlog(conn, LogOp::Commit, name, &format!("Inserted row id={}", id));
        }

        Ok(report)
    }

    /// Every assigned or ticked input must exist and be read by the trigger.
    fn check_inputs(&self, trigger: &CommitTrigger, overrides: &Overrides) -> AppResult<()> {
        let allowed = registry::trigger_inputs(trigger)?;
        let assigned = overrides.assignments.iter().map(|(k, _)| k);

        for input in assigned.chain(&overrides.checks) {
            let Some(kind) = self.form.kind(input) else {
                return Err(AppError::UnknownInput(input.clone()));
            };
            if overrides.checks.contains(input) && kind != FieldKind::Check {
                return Err(AppError::invalid_input(
                    input,
                    format!("is a {} input, not a checkbox", kind.name()),
                ));
            }
            if !allowed.contains(input.as_str()) {
                return Err(AppError::invalid_input(
                    input,
                    format!("not read by trigger '{}'", trigger.name),
                ));
            }
        }
        Ok(())
    }

    /// Commit one cup of water, stamped now.
    pub fn hydrate(&mut self, ounces: i64) -> AppResult<CommitReport> {
        if !CUP_SIZES.contains(&ounces) {
            return Err(AppError::invalid_input(
                "amount",
                format!("cup size must be one of {:?}", CUP_SIZES),
            ));
        }
        let overrides = Overrides {
            assignments: vec![("amount".to_string(), ounces.to_string())],
            ..Overrides::default()
        };
        self.commit("hydration", &overrides)
    }

    /// Select `(record type, id)` rows in their views, then run the single
    /// delete action over every view.
    pub fn delete(&mut self, rows: &[(String, RecordId)]) -> AppResult<DeleteReport> {
        let mut wanted: Vec<(ViewHandle, RecordId)> = Vec::with_capacity(rows.len());
        for (name, id) in rows {
            let h = self.views.handle(name)?;
            if !wanted.contains(&(h, *id)) {
                wanted.push((h, *id));
            }
        }
        for (h, id) in &wanted {
            if let Err(e) = self.views.select(*h, &[*id]) {
                let all: Vec<ViewHandle> = self.views.handles().collect();
                for h in all {
                    self.views.clear_selection(h);
                }
                return Err(e);
            }
        }

        let conn = &self.pool.conn;
        let mut sink = LoggingSink {
            conn,
            inner: self.sink.as_mut(),
        };
        let report = self.views.delete_selected_all(conn, &mut sink);

        for (h, id) in &wanted {
            let view = self.views.view(*h);
            if !view.rows().iter().any(|r| r.id == *id) {
                let _ = wlog(
                    conn,
                    LogOp::Delete,
                    view.descriptor().table,
                    &format!("Deleted row id={}", id),
                );
            }
        }

        Ok(report)
    }

    /// Views shown by a page, or by a single record type.
    pub fn switch_page(&mut self, name: &str) -> AppResult<Vec<ViewHandle>> {
        let handles = match registry::page(name) {
            Some(p) => p
                .records
                .iter()
                .map(|r| self.views.handle(r))
                .collect::<AppResult<Vec<_>>>()?,
            None => vec![
                self.views
                    .handle(name)
                    .map_err(|_| AppError::UnknownPage(name.to_string()))?,
            ],
        };
        self.settings.set(LAST_PAGE_KEY, name)?;
        Ok(handles)
    }

    pub fn last_page(&self, default: &str) -> String {
        self.settings.get(LAST_PAGE_KEY, default.to_string())
    }

    /// Store persisted inputs and save the settings. A failed save is
    /// returned to the caller.
    pub fn close(mut self) -> AppResult<()> {
        for &key in PERSISTED_INPUTS {
            match self.form.get(key) {
                Some(FieldValue::Int(v)) => self.settings.set(key, *v)?,
                Some(FieldValue::Text(s)) => self.settings.set(key, s.as_str())?,
                _ => {}
            }
        }
        self.settings.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::MemorySink;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares the collected failures with the test after the shell owns it.
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<String>>>);

    impl ErrorSink for SharedSink {
        fn report(&mut self, failure: Failure) {
            self.0.borrow_mut().push(failure.to_string());
        }
    }

    fn clock() -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            NaiveTime::from_hms_opt(7, 45, 0).unwrap(),
        )
    }

    fn shell_with(settings: Settings, sink: Box<dyn ErrorSink>) -> Shell {
        let (d, t) = clock();
        Shell::start_at(DbPool::in_memory().unwrap(), settings, sink, d, t).unwrap()
    }

    fn shell() -> Shell {
        shell_with(
            Settings::in_memory("org", "app"),
            Box::new(MemorySink::default()),
        )
    }

    fn set(pairs: &[(&str, &str)]) -> Overrides {
        Overrides {
            assignments: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Overrides::default()
        }
    }

    fn rows_of(sh: &Shell, name: &str) -> Vec<Vec<String>> {
        let h = sh.views().handle(name).unwrap();
        sh.views().view(h).rows().iter().map(|r| r.cells.clone()).collect()
    }

    #[test]
    fn sleep_trigger_commits_four_rows_with_computed_total() {
        let mut sh = shell();
        let report = sh
            .commit(
                "sleep",
                &set(&[
                    ("time_asleep", "23:00"),
                    ("time_awake", "07:30"),
                    ("woke_up_like", "6"),
                    ("sleep_quality_slider", "8"),
                ]),
            )
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.committed.len(), 4);
        assert_eq!(rows_of(&sh, "total_hours_slept")[0], vec!["2025-08-02", "08:30"]);
        assert_eq!(rows_of(&sh, "woke_up_like")[0], vec!["2025-08-02", "6"]);
        assert_eq!(
            rows_of(&sh, "sleep")[0],
            vec!["2025-08-02", "23:00:00", "07:30:00"]
        );
    }

    #[test]
    fn explicit_total_wins_over_the_computed_one() {
        let mut sh = shell();
        sh.commit(
            "sleep",
            &set(&[
                ("time_asleep", "23:00"),
                ("time_awake", "07:30"),
                ("total_hours_slept", "7:5"),
            ]),
        )
        .unwrap();
        assert_eq!(rows_of(&sh, "total_hours_slept")[0][1], "07:05");
    }

    #[test]
    fn basics_triggers_stamp_time_unless_given() {
        let mut sh = shell();
        sh.form_mut().set_str("basics_time", "06:00").unwrap();

        let mut o = Overrides::default();
        o.checks.push("shower_check".into());
        sh.commit("shower", &o).unwrap();
        assert_eq!(rows_of(&sh, "shower")[0], vec!["2025-08-02", "07:45:00", "1"]);

        sh.commit("teeth", &set(&[("basics_time", "21:10")])).unwrap();
        assert_eq!(rows_of(&sh, "teeth")[0], vec!["2025-08-02", "21:10:00", "0"]);
    }

    #[test]
    fn date_and_time_overrides_hit_every_record_of_the_trigger() {
        let mut sh = shell();
        let mut o = set(&[("calm_spinbox", "4")]);
        o.date = NaiveDate::from_ymd_opt(2025, 5, 4);
        o.time = NaiveTime::from_hms_opt(21, 15, 0);
        sh.commit("cspr", &o).unwrap();
        assert_eq!(
            rows_of(&sh, "cspr")[0],
            vec!["2025-05-04", "21:15:00", "4", "0", "0", "0"]
        );
    }

    #[test]
    fn check_on_a_slider_is_rejected() {
        let mut sh = shell();
        let mut o = Overrides::default();
        o.checks.push("mood_slider".into());
        assert!(matches!(
            sh.commit("mmdmr", &o),
            Err(AppError::InvalidInput { .. })
        ));
        assert!(rows_of(&sh, "mmdmr").is_empty());
    }

    #[test]
    fn inputs_outside_the_trigger_are_rejected_before_commit() {
        let mut sh = shell();
        let err = sh.commit("pet_mood", &set(&[("mood", "7")])).unwrap_err();
        assert!(matches!(
            &err,
            AppError::InvalidInput { input, reason }
                if input == "mood" && reason == "not read by trigger 'pet_mood'"
        ));
        assert!(rows_of(&sh, "pet_mood").is_empty());
        assert_eq!(sh.form().get("mood"), Some(&FieldValue::Int(0)));

        let mut o = set(&[("calm_slider", "5"), ("calories", "500")]);
        o.checks.push("shower_check".into());
        assert!(sh.commit("cspr", &o).is_err());
        assert!(rows_of(&sh, "cspr").is_empty());

        let mut o = Overrides::default();
        o.checks.push("exercise_check".into());
        assert!(matches!(
            sh.commit("shower", &o),
            Err(AppError::InvalidInput { .. })
        ));
        assert!(rows_of(&sh, "shower").is_empty());
    }

    #[test]
    fn text_values_are_stored_as_typed() {
        let mut sh = shell();
        let (k, v) = Overrides::parse_assignment("pet_walk_note=  limping, left paw  ").unwrap();
        sh.commit("pet_walk_notes", &set(&[(k.as_str(), v.as_str())]))
            .unwrap();
        assert_eq!(rows_of(&sh, "pet_walk_notes")[0][2], "  limping, left paw  ");
    }

    #[test]
    fn blank_note_fails_and_reaches_the_sink() {
        let sink = SharedSink::default();
        let mut sh = shell_with(Settings::in_memory("org", "app"), Box::new(sink.clone()));

        let report = sh.commit("pet_notes", &Overrides::default()).unwrap();
        assert_eq!(report.failed, 1);
        assert!(rows_of(&sh, "pet_notes").is_empty());

        let failures = sink.0.borrow();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("[pet_notes] commit failed"));

        let logged: i64 = sh
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'error' AND target = 'pet_notes'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(logged, 1);
    }

    #[test]
    fn hydrate_accepts_only_cup_sizes() {
        let mut sh = shell();
        sh.hydrate(16).unwrap();
        assert_eq!(
            rows_of(&sh, "hydration")[0],
            vec!["2025-08-02", "07:45:00", "16"]
        );
        assert!(sh.hydrate(12).is_err());
        assert_eq!(rows_of(&sh, "hydration").len(), 1);
    }

    #[test]
    fn delete_removes_selected_rows_and_logs_them() {
        let mut sh = shell();
        sh.hydrate(8).unwrap();
        sh.hydrate(32).unwrap();
        let h = sh.views().handle("hydration").unwrap();
        let first = sh.views().view(h).rows()[1].id;

        let report = sh.delete(&[("hydration".into(), first)]).unwrap();
        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(rows_of(&sh, "hydration"), vec![vec!["2025-08-02", "07:45:00", "32"]]);

        let logged: i64 = sh
            .conn()
            .query_row("SELECT COUNT(*) FROM log WHERE operation = 'del'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(logged, 1);
    }

    #[test]
    fn repeated_rows_are_deleted_and_logged_once() {
        let mut sh = shell();
        sh.hydrate(24).unwrap();
        let h = sh.views().handle("hydration").unwrap();
        let id = sh.views().view(h).rows()[0].id;

        let report = sh
            .delete(&[("hydration".into(), id), ("hydration".into(), id)])
            .unwrap();
        assert_eq!(report.deleted, 1);
        assert!(rows_of(&sh, "hydration").is_empty());

        let logged: i64 = sh
            .conn()
            .query_row("SELECT COUNT(*) FROM log WHERE operation = 'del'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(logged, 1);
    }

    #[test]
    fn delete_of_a_missing_row_selects_nothing() {
        let mut sh = shell();
        sh.hydrate(8).unwrap();
        let h = sh.views().handle("hydration").unwrap();
        let id = sh.views().view(h).rows()[0].id;

        let err = sh
            .delete(&[("hydration".into(), id), ("diet".into(), 77)])
            .unwrap_err();
        assert!(matches!(err, AppError::RowNotFound { id: 77, .. }));
        assert!(sh.views().view(h).selection().is_empty());
        assert_eq!(rows_of(&sh, "hydration").len(), 1);
    }

    #[test]
    fn pages_resolve_to_their_views_and_are_remembered() {
        let mut sh = shell();
        assert_eq!(sh.switch_page("mental").unwrap().len(), 3);
        assert_eq!(sh.last_page("sleep"), "mental");

        assert_eq!(sh.switch_page("hydration").unwrap().len(), 1);
        assert!(matches!(sh.switch_page("garden"), Err(AppError::UnknownPage(_))));
        assert_eq!(sh.last_page("sleep"), "hydration");
    }

    #[test]
    fn persisted_inputs_survive_a_restart() {
        let path = std::env::temp_dir().join(format!(
            "rwellog_shell_settings_{}.yml",
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();

        let mut sh = shell_with(
            Settings::load(&path, "org", "app").unwrap(),
            Box::new(MemorySink::default()),
        );
        sh.form_mut().set_str("pet_mood", "9").unwrap();
        sh.form_mut().set_str("pet_notes", "napping").unwrap();
        sh.close().unwrap();

        let sh = shell_with(
            Settings::load(&path, "org", "app").unwrap(),
            Box::new(MemorySink::default()),
        );
        assert_eq!(sh.form().get("pet_mood_slider"), Some(&FieldValue::Int(9)));
        assert_eq!(sh.form().get("pet_mood"), Some(&FieldValue::Int(9)));
        assert_eq!(
            sh.form().get("pet_notes"),
            Some(&FieldValue::Text("napping".into()))
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn assignment_parsing() {
        assert_eq!(
            Overrides::parse_assignment(" calories = 420").unwrap(),
            ("calories".to_string(), " 420".to_string())
        );
        assert_eq!(
            Overrides::parse_assignment("food_eaten=a=b").unwrap(),
            ("food_eaten".to_string(), "a=b".to_string())
        );
        assert!(Overrides::parse_assignment("calories").is_err());
        assert!(Overrides::parse_assignment("=3").is_err());
    }
}
