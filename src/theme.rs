use crate::storage::{Store, load_theme, save_theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything that is not `dark` flips to dark.
    pub fn opposite_of(class: &str) -> Theme {
        if class == Theme::Dark.class() {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

/// Insertion-ordered set of CSS class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for class in classes {
            list.add(class);
        }
        list
    }

    pub fn add(&mut self, class: impl Into<String>) {
        let class = class.into();
        if class.is_empty() || self.contains(&class) {
            return;
        }
        self.classes.push(class);
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|existing| existing != class);
    }

    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    pub fn as_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// A rendering surface whose root, containers, cards and buttons follow the theme.
pub trait ThemeTarget {
    fn themeable(&mut self) -> Vec<&mut ClassList>;
}

pub fn apply_theme(target: &mut impl ThemeTarget, theme: &str) {
    for classes in target.themeable() {
        for known in Theme::ALL {
            classes.remove(known.class());
        }
        classes.add(theme);
    }
}

pub fn initialize_theme(target: &mut impl ThemeTarget, store: &impl Store) -> String {
    let theme = load_theme(store);
    apply_theme(target, &theme);
    theme
}

pub fn toggle_theme(store: &mut impl Store) -> Theme {
    let next = Theme::opposite_of(&load_theme(store));
    save_theme(store, next.class());
    next
}
