//! Pointer and click events as delivered by the host's event loop.

use crate::backend::HitElement;
use crate::data_types::Value;

/// Primary button bit of [`PointerEvent::buttons`].
pub const PRIMARY_BUTTON: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The pointer entered the chart.
    Over,
    /// The pointer left the chart.
    Out,
    Click,
}

impl PointerKind {
    /// Everything but a click is a hover event.
    pub fn is_hover(self) -> bool {
        self != Self::Click
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Ctrl or meta: add to the existing selection instead of replacing it.
    pub fn accumulates(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    /// Bitmask of held buttons: 1 primary, 2 secondary, 4 auxiliary.
    pub buttons: u16,
    pub modifiers: Modifiers,
    /// Elements under the pointer, nearest first.
    pub hits: Vec<HitElement>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32, buttons: u16) -> Self {
        Self {
            kind,
            x,
            y,
            buttons,
            modifiers: Modifiers::default(),
            hits: vec![],
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, x, y, PRIMARY_BUTTON)
    }

    pub fn drag(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y, PRIMARY_BUTTON)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y, 0)
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Click, x, y, 0)
    }

    pub fn with_hits(mut self, hits: Vec<HitElement>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A click on a list row, carrying the row's `group` and `value` attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ListClick {
    pub group: String,
    pub value: Value,
    pub modifiers: Modifiers,
}

impl ListClick {
    pub fn new(group: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
