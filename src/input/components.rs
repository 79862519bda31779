use bevy::prelude::*;

/// Maps an action name to the input identifier used on each device class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub action: String,
    /// Identifier looked up on the touch/virtual-pad source.
    pub handheld: String,
    /// Identifier looked up on the keyboard/gamepad source.
    pub keyboard: String,
}

impl ActionBinding {
    pub fn new(
        action: impl Into<String>,
        handheld: impl Into<String>,
        keyboard: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            handheld: handheld.into(),
            keyboard: keyboard.into(),
        }
    }
}

/// Ordered action-to-input map carried by a character.
///
/// Lookup is first match wins; duplicate identifiers are allowed (two actions
/// may share a physical input).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct InputMap {
    pub bindings: Vec<ActionBinding>,
}

impl InputMap {
    pub fn new(bindings: Vec<ActionBinding>) -> Self {
        Self { bindings }
    }

    pub fn binding(&self, action: &str) -> Option<&ActionBinding> {
        self.bindings.iter().find(|b| b.action == action)
    }
}

impl Default for InputMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                ActionBinding::new("Jump", "Jump", "Jump"),
                ActionBinding::new("Attack", "Attack", "Fire2"),
            ],
        }
    }
}
