use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::queue::{InputEvent, InputQueue};

/// What the user asked the frontend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    Menu,
    NextPage,
    PrevPage,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Select,
        Action::Back,
        Action::Menu,
        Action::NextPage,
        Action::PrevPage,
    ];
}

/// A physical input that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Key(u32),
    Button(u32),
}

impl Binding {
    fn matches(self, event: &InputEvent) -> bool {
        match (self, event) {
            (Binding::Key(k), InputEvent::KeyDown { key_code }) => k == *key_code,
            (Binding::Button(b), InputEvent::ButtonDown { button }) => b == *button,
            _ => false,
        }
    }
}

/// Maps keys and gamepad buttons onto [`Action`]s.
///
/// JSON form: `{ "select": [{ "key": 13 }, { "button": 0 }], ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlMap {
    bindings: HashMap<Action, Vec<Binding>>,
}

impl ControlMap {
    /// A map with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Parse a map from JSON. Actions missing from the document keep their
    /// default bindings.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: HashMap<Action, Vec<Binding>> = serde_json::from_str(json)?;
        let mut map = Self::default();
        map.bindings.extend(parsed);
        Ok(map)
    }

    pub fn bind(&mut self, action: Action, binding: Binding) {
        let list = self.bindings.entry(action).or_default();
        if !list.contains(&binding) {
            list.push(binding);
        }
    }

    pub fn bindings(&self, action: Action) -> &[Binding] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Action a press maps to. Releases and custom events map to nothing.
    pub fn action_for(&self, event: &InputEvent) -> Option<Action> {
        if !event.is_press() {
            return None;
        }
        Action::ALL
            .into_iter()
            .find(|action| self.bindings(*action).iter().any(|b| b.matches(event)))
    }

    /// Actions triggered by this frame's pending input, in arrival order.
    pub fn actions(&self, input: &InputQueue) -> Vec<Action> {
        input.iter().filter_map(|e| self.action_for(e)).collect()
    }
}

impl Default for ControlMap {
    /// Arrow keys, Enter, Escape, Tab and Page Up/Down, plus the standard
    /// gamepad layout.
    fn default() -> Self {
        let mut map = Self::empty();
        for (action, key, button) in [
            (Action::Left, 37, 14),
            (Action::Up, 38, 12),
            (Action::Right, 39, 15),
            (Action::Down, 40, 13),
            (Action::Select, 13, 0),
            (Action::Back, 27, 1),
            (Action::Menu, 9, 9),
            (Action::NextPage, 34, 5),
            (Action::PrevPage, 33, 4),
        ] {
            map.bind(action, Binding::Key(key));
            map.bind(action, Binding::Button(button));
        }
        map
    }
}
