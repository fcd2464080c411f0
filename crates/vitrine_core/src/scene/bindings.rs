use std::collections::HashMap;

use crate::input::KeyCode;
use crate::player::MoveAction;

/// Maps physical keys to walkthrough movement actions.
///
/// # Example
/// ```rust,ignore
/// use vitrine_core::{KeyBindings, KeyCode, MoveAction};
///
/// let mut bindings = KeyBindings::with_default_layout();
/// // AZERTY players
/// bindings.bind(KeyCode::KeyZ, MoveAction::Forward);
/// bindings.bind(KeyCode::KeyQ, MoveAction::Left);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    mappings: HashMap<KeyCode, MoveAction>,
}

impl KeyBindings {
    /// Creates an empty table; every key is ignored.
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Arrow keys plus WASD.
    pub fn with_default_layout() -> Self {
        let mut b = Self::new();
        b.bind(KeyCode::ArrowUp, MoveAction::Forward);
        b.bind(KeyCode::KeyW, MoveAction::Forward);
        b.bind(KeyCode::ArrowDown, MoveAction::Backward);
        b.bind(KeyCode::KeyS, MoveAction::Backward);
        b.bind(KeyCode::ArrowLeft, MoveAction::Left);
        b.bind(KeyCode::KeyA, MoveAction::Left);
        b.bind(KeyCode::ArrowRight, MoveAction::Right);
        b.bind(KeyCode::KeyD, MoveAction::Right);
        b
    }

    /// Binds `key` to `action`.  Binding the same key twice overwrites the
    /// old binding; several keys may share one action.
    pub fn bind(&mut self, key: KeyCode, action: MoveAction) {
        self.mappings.insert(key, action);
    }

    /// Removes the binding for `key`, if any.
    pub fn unbind(&mut self, key: KeyCode) {
        self.mappings.remove(&key);
    }

    /// Removes all key bindings.
    pub fn clear(&mut self) {
        self.mappings.clear();
    }

    /// The action bound to `key`, or `None` for keys the walkthrough ignores.
    pub fn action(&self, key: KeyCode) -> Option<MoveAction> {
        self.mappings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_default_layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_covers_arrows_and_wasd() {
        let b = KeyBindings::default();
        assert_eq!(b.action(KeyCode::ArrowUp), Some(MoveAction::Forward));
        assert_eq!(b.action(KeyCode::KeyW), Some(MoveAction::Forward));
        assert_eq!(b.action(KeyCode::KeyS), Some(MoveAction::Backward));
        assert_eq!(b.action(KeyCode::ArrowLeft), Some(MoveAction::Left));
        assert_eq!(b.action(KeyCode::KeyD), Some(MoveAction::Right));
        assert_eq!(b.action(KeyCode::Space), None);
    }

    #[test]
    fn rebind_and_unbind() {
        let mut b = KeyBindings::default();
        b.bind(KeyCode::KeyW, MoveAction::Backward);
        assert_eq!(b.action(KeyCode::KeyW), Some(MoveAction::Backward));
        b.unbind(KeyCode::KeyW);
        assert_eq!(b.action(KeyCode::KeyW), None);
        b.clear();
        assert_eq!(b.action(KeyCode::ArrowUp), None);
    }
}
