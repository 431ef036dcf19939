use super::Value;
use serde::{Deserialize, Serialize};

/// Which gesture protocol a subcomponent answers to. Fixed per instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    /// Click a single element.
    Item,
    /// Drag a contiguous range along the category axis.
    Domain,
    /// Drag a rectangle.
    Bounds,
    /// Drag a rectangle spanning the full chart height.
    BoundsDomain,
}

/// In-progress pointer gesture, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    None,
    Bounds {
        begin_x: f32,
        begin_y: f32,
        end_x: f32,
        end_y: f32,
    },
    Domain {
        begin_index: usize,
        begin_x: f32,
        end_index: usize,
        end_x: f32,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Highlighted axis values, in selection order, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedLabels(Vec<Value>);

impl SelectedLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: &Value) -> bool {
        let key = value.key();
        self.0.iter().any(|v| v.key() == key)
    }

    /// Appends the value unless present. Returns whether it was added.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        let key = value.key();
        let before = self.0.len();
        self.0.retain(|v| v.key() != key);
        self.0.len() != before
    }

    /// Adds the value if absent, removes it otherwise.
    pub fn toggle(&mut self, value: Value) {
        if !self.remove(&value) {
            self.0.push(value);
        }
    }

    pub fn replace(&mut self, values: impl IntoIterator<Item = Value>) {
        self.0.clear();
        for value in values {
            self.insert(value);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}
