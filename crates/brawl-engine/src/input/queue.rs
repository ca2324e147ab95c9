use crate::input::bindings::{Action, KeyBindings};

/// Raw input events pushed by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed (browser `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The host already mapped a device input to a logical action
    /// (touch buttons, gamepads).
    Action { action: Action, down: bool },
}

/// Host events waiting for the next frame. Key handlers fire between
/// frames, so events are buffered here and folded in one batch per tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Start a new input frame on `state` and fold every pending event into
    /// it, in arrival order. The buffer keeps its allocation.
    pub fn flush(&mut self, state: &mut InputState, bindings: &KeyBindings) {
        state.begin_frame();
        state.apply(&self.pending, bindings);
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Per-frame logical input: edge ("just pressed") and level ("held") state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Action::COUNT],
    pressed: [bool; Action::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: edges from the previous frame are dropped, held keys persist.
    pub fn begin_frame(&mut self) {
        self.pressed = [false; Action::COUNT];
    }

    /// Fold raw events into action state. Key repeats do not produce new edges.
    pub fn apply(&mut self, events: &[InputEvent], bindings: &KeyBindings) {
        for event in events {
            let (action, down) = match *event {
                InputEvent::KeyDown { key_code } => match bindings.action_for(key_code) {
                    Some(a) => (a, true),
                    None => continue,
                },
                InputEvent::KeyUp { key_code } => match bindings.action_for(key_code) {
                    Some(a) => (a, false),
                    None => continue,
                },
                InputEvent::Action { action, down } => (action, down),
            };
            self.set(action, down);
        }
    }

    /// Set one action directly.
    pub fn set(&mut self, action: Action, down: bool) {
        let i = action.index();
        if down && !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = down;
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    pub fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// -1 for left, +1 for right, 0 for neither or both.
    pub fn horizontal(&self) -> f32 {
        let left = self.held(Action::MoveLeft) as i32;
        let right = self.held(Action::MoveRight) as i32;
        (right - left) as f32
    }

    /// Release everything (e.g. when the window loses focus).
    pub fn clear(&mut self) {
        self.held = [false; Action::COUNT];
        self.pressed = [false; Action::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_folds_in_arrival_order() {
        let bindings = KeyBindings::default();
        let mut queue = InputQueue::new();
        let mut state = InputState::new();
        // Tapped between frames: down then up still registers the press.
        queue.push(InputEvent::KeyDown { key_code: 74 });
        queue.push(InputEvent::KeyUp { key_code: 74 });
        assert_eq!(queue.pending(), 2);
        queue.flush(&mut state, &bindings);
        assert_eq!(queue.pending(), 0);
        assert!(state.just_pressed(Action::Attack));
        assert!(!state.held(Action::Attack));

        queue.flush(&mut state, &bindings);
        assert!(!state.just_pressed(Action::Attack));
    }

    #[test]
    fn press_is_an_edge_hold_is_a_level() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();

        state.begin_frame();
        state.apply(&[InputEvent::KeyDown { key_code: 32 }], &bindings);
        assert!(state.just_pressed(Action::Jump));
        assert!(state.held(Action::Jump));

        // Key repeat on the next frame: still held, no new edge.
        state.begin_frame();
        state.apply(&[InputEvent::KeyDown { key_code: 32 }], &bindings);
        assert!(!state.just_pressed(Action::Jump));
        assert!(state.held(Action::Jump));

        state.begin_frame();
        state.apply(&[InputEvent::KeyUp { key_code: 32 }], &bindings);
        assert!(!state.held(Action::Jump));
    }

    #[test]
    fn horizontal_axis() {
        let mut state = InputState::new();
        state.set(Action::MoveLeft, true);
        assert_eq!(state.horizontal(), -1.0);
        state.set(Action::MoveRight, true);
        assert_eq!(state.horizontal(), 0.0);
        state.set(Action::MoveLeft, false);
        assert_eq!(state.horizontal(), 1.0);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut state = InputState::new();
        state.apply(&[InputEvent::KeyDown { key_code: 1234 }], &KeyBindings::default());
        assert!(Action::ALL.iter().all(|a| !state.held(*a)));
    }
}
