use crate::models::SettingsForm;
use crate::storage::{Store, save_reference};
use crate::theme::ClassList;
use tracing::info;

pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOutcome {
    Saved,
    Rejected,
}

/// Stores the reset moment, replacing any earlier one.
pub fn record_settings(store: &mut impl Store, form: &SettingsForm) -> SettingsOutcome {
    let value = form.last_relapse.trim();
    if value.is_empty() {
        return SettingsOutcome::Rejected;
    }
    save_reference(store, value);
    info!(reference = value, "reset timestamp updated");
    SettingsOutcome::Saved
}

/// Visibility of the settings card. Lives for one render only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    pub classes: ClassList,
}

impl SettingsPanel {
    pub fn new(open: bool) -> Self {
        let mut classes = ClassList::new(["card", "settings-card"]);
        if !open {
            classes.add(HIDDEN_CLASS);
        }
        Self { classes }
    }

    pub fn toggle(&mut self) {
        self.classes.toggle(HIDDEN_CLASS);
    }

    pub fn is_hidden(&self) -> bool {
        self.classes.contains(HIDDEN_CLASS)
    }

    /// Link for the toggle control: the page as it looks after one toggle.
    pub fn toggle_href(&self) -> &'static str {
        let mut next = self.clone();
        next.toggle();
        if next.is_hidden() { "/" } else { "/?settings=open" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StoreData, load_reference};

    #[test]
    fn empty_value_is_rejected_without_writing() {
        let mut store = StoreData::default();
        let form = SettingsForm { last_relapse: "  ".to_string() };
        assert_eq!(record_settings(&mut store, &form), SettingsOutcome::Rejected);
        assert_eq!(store, StoreData::default());
    }

    #[test]
    fn new_value_overwrites_previous() {
        let mut store = StoreData::default();
        for value in ["2026-10-01T10:00", "2026-10-12T22:15"] {
            let form = SettingsForm { last_relapse: value.to_string() };
            assert_eq!(record_settings(&mut store, &form), SettingsOutcome::Saved);
        }
        assert_eq!(load_reference(&store).as_deref(), Some("2026-10-12T22:15"));
    }

    #[test]
    fn panel_toggles_hidden_class() {
        let mut panel = SettingsPanel::new(false);
        assert!(panel.is_hidden());
        panel.toggle();
        assert!(!panel.is_hidden());
        panel.toggle();
        assert!(panel.is_hidden());
    }

    #[test]
    fn toggle_link_points_at_opposite_state() {
        assert_eq!(SettingsPanel::new(false).toggle_href(), "/?settings=open");
        assert_eq!(SettingsPanel::new(true).toggle_href(), "/");
    }
}
