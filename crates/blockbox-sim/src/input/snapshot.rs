//! Multi-source input aggregation.
//!
//! Keyboard, on-screen direction buttons and the virtual joystick all write
//! into one boolean snapshot, last writer wins. There is no event queue:
//! between two ticks only the latest value per action matters, and the
//! scheduler reads the snapshot exactly once per frame.

/// The three logical actions the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// Wire code for the on-screen button exports.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Action::MoveLeft),
            1 => Some(Action::MoveRight),
            2 => Some(Action::Jump),
            _ => None,
        }
    }
}

/// The per-frame read: what the player is asking for right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Joystick axis magnitudes at or below this leave both directions clear.
pub const JOYSTICK_DEAD_ZONE: f32 = 0.1;

/// JS `keyCode` values accepted from the page. A/←, D/→ and W/↑/Space are
/// synonyms for the same actions.
const KEY_ARROW_LEFT: u32 = 37;
const KEY_ARROW_UP: u32 = 38;
const KEY_ARROW_RIGHT: u32 = 39;
const KEY_SPACE: u32 = 32;
const KEY_A: u32 = 65;
const KEY_D: u32 = 68;
const KEY_W: u32 = 87;

fn action_for_key(code: u32) -> Option<Action> {
    match code {
        KEY_ARROW_LEFT | KEY_A => Some(Action::MoveLeft),
        KEY_ARROW_RIGHT | KEY_D => Some(Action::MoveRight),
        KEY_ARROW_UP | KEY_W | KEY_SPACE => Some(Action::Jump),
        _ => None,
    }
}

/// Single-owner input state. UI event handlers call the setters; the
/// scheduler calls `snapshot` once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    snapshot: ActionSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard producer. Unknown key codes are ignored.
    pub fn key_down(&mut self, code: u32) {
        if let Some(action) = action_for_key(code) {
            self.set(action, true);
        }
    }

    pub fn key_up(&mut self, code: u32) {
        if let Some(action) = action_for_key(code) {
            self.set(action, false);
        }
    }

    /// Direction-button producer (pointer-down/up and touch-start/end alike).
    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    /// Joystick producer: a horizontal axis value in [-1, 1]. Outside the
    /// dead zone exactly one direction is set and the other cleared; inside
    /// it both are cleared. The joystick never writes the jump action.
    pub fn joystick(&mut self, axis: f32) {
        if axis < -JOYSTICK_DEAD_ZONE {
            self.snapshot.move_left = true;
            self.snapshot.move_right = false;
        } else if axis > JOYSTICK_DEAD_ZONE {
            self.snapshot.move_left = false;
            self.snapshot.move_right = true;
        } else {
            self.snapshot.move_left = false;
            self.snapshot.move_right = false;
        }
    }

    /// Drag ended (pointer/touch release or leaving tracking).
    pub fn joystick_end(&mut self) {
        self.snapshot.move_left = false;
        self.snapshot.move_right = false;
    }

    /// The current snapshot. Synchronous; consumed once per tick.
    pub fn snapshot(&self) -> ActionSnapshot {
        self.snapshot
    }

    fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::MoveLeft => self.snapshot.move_left = value,
            Action::MoveRight => self.snapshot.move_right = value,
            Action::Jump => self.snapshot.jump = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_synonyms_map_to_same_action() {
        let mut input = InputState::new();
        input.key_down(KEY_A);
        assert!(input.snapshot().move_left);
        input.key_up(KEY_A);
        assert!(!input.snapshot().move_left);

        input.key_down(KEY_ARROW_LEFT);
        assert!(input.snapshot().move_left);

        input.key_down(KEY_SPACE);
        input.key_down(KEY_W);
        assert!(input.snapshot().jump);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = InputState::new();
        input.key_down(27); // Escape
        assert_eq!(input.snapshot(), ActionSnapshot::default());
    }

    #[test]
    fn synonym_release_is_last_writer_wins() {
        // A down, ArrowLeft down, A up: the boolean is simply cleared.
        // There is no per-key refcount; latest write per action wins.
        let mut input = InputState::new();
        input.key_down(KEY_A);
        input.key_down(KEY_ARROW_LEFT);
        input.key_up(KEY_A);
        assert!(!input.snapshot().move_left);
    }

    #[test]
    fn buttons_press_and_release() {
        let mut input = InputState::new();
        input.press(Action::MoveRight);
        assert!(input.snapshot().move_right);
        input.release(Action::MoveRight);
        assert!(!input.snapshot().move_right);
    }

    #[test]
    fn joystick_dead_zone() {
        let mut input = InputState::new();
        input.joystick(0.05);
        assert!(!input.snapshot().move_left);
        assert!(!input.snapshot().move_right);

        input.joystick(-0.09);
        assert_eq!(input.snapshot(), ActionSnapshot::default());
    }

    #[test]
    fn joystick_sets_exactly_one_direction() {
        let mut input = InputState::new();
        input.joystick(0.8);
        assert!(input.snapshot().move_right);
        assert!(!input.snapshot().move_left);

        // Sweeping across to the other side flips in one write.
        input.joystick(-0.8);
        assert!(input.snapshot().move_left);
        assert!(!input.snapshot().move_right);

        // Back into the dead zone clears both.
        input.joystick(0.0);
        assert!(!input.snapshot().move_left);
        assert!(!input.snapshot().move_right);
    }

    #[test]
    fn joystick_end_clears_both_directions() {
        let mut input = InputState::new();
        input.joystick(1.0);
        input.joystick_end();
        assert!(!input.snapshot().move_left);
        assert!(!input.snapshot().move_right);
    }

    #[test]
    fn joystick_does_not_touch_jump() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.joystick(0.5);
        input.joystick_end();
        assert!(input.snapshot().jump);
    }

    #[test]
    fn action_button_codes() {
        assert_eq!(Action::from_code(0), Some(Action::MoveLeft));
        assert_eq!(Action::from_code(1), Some(Action::MoveRight));
        assert_eq!(Action::from_code(2), Some(Action::Jump));
        assert_eq!(Action::from_code(9), None);
    }
}
