use serde::Deserialize;

/// Logical actions the game understands. Device mapping lives in `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Pause,
    Restart,
    Confirm,
}

impl Action {
    pub const COUNT: usize = 7;

    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Attack,
        Action::Pause,
        Action::Restart,
        Action::Confirm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Key codes (browser `keyCode` values) bound to each action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<u32>,
    pub move_right: Vec<u32>,
    pub jump: Vec<u32>,
    pub attack: Vec<u32>,
    pub pause: Vec<u32>,
    pub restart: Vec<u32>,
    pub confirm: Vec<u32>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![37, 65],      // ArrowLeft, A
            move_right: vec![39, 68],     // ArrowRight, D
            jump: vec![38, 87, 32],       // ArrowUp, W, Space
            attack: vec![74, 88],         // J, X
            pause: vec![27, 80],          // Escape, P
            restart: vec![82],            // R
            confirm: vec![13],            // Enter
        }
    }
}

impl KeyBindings {
    fn codes(&self, action: Action) -> &[u32] {
        match action {
            Action::MoveLeft => &self.move_left,
            Action::MoveRight => &self.move_right,
            Action::Jump => &self.jump,
            Action::Attack => &self.attack,
            Action::Pause => &self.pause,
            Action::Restart => &self.restart,
            Action::Confirm => &self.confirm,
        }
    }

    /// First action bound to `key_code`, if any.
    pub fn action_for(&self, key_code: u32) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.codes(action).contains(&key_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for(32), Some(Action::Jump));
        assert_eq!(b.action_for(65), Some(Action::MoveLeft));
        assert_eq!(b.action_for(13), Some(Action::Confirm));
        assert_eq!(b.action_for(999), None);
    }

    #[test]
    fn action_indices_are_dense() {
        for (i, a) in Action::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
    }
}
