pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;

/// The difficulty range input and the label that echoes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultySlider {
    value: i64,
    label: String,
}

impl DifficultySlider {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            label: value.to_string(),
        }
    }

    pub fn input(&mut self, value: i64) {
        self.value = value;
        self.label = value.to_string();
    }

    pub fn reset(&mut self, value: i64) {
        self.input(value);
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
