//! Default keyboard binding resolver.
//!
//! Maps crossterm key events to [`LogicalAction`]s and folds press/release
//! events into one [`ActionState`] per frame. Terminals that never emit
//! release events are handled with a timeout: a key not seen again (as a press
//! or repeat) within the timeout counts as released.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{ActionState, LogicalAction};

// Long enough to bridge the gap before the terminal's own key repeat starts.
const DEFAULT_KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(500);

/// Map a key to a logical action.
pub fn map_key(code: KeyCode) -> Option<LogicalAction> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(LogicalAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(LogicalAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(LogicalAction::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(LogicalAction::RotateCw),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(LogicalAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(LogicalAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(LogicalAction::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Folds key events into per-frame [`ActionState`]s.
#[derive(Debug, Clone)]
pub struct KeyboardResolver {
    state: ActionState,
    last_seen: [Option<Instant>; LogicalAction::COUNT],
    release_timeout: Duration,
}

impl KeyboardResolver {
    pub fn new() -> Self {
        Self {
            state: ActionState::new(),
            last_seen: [None; LogicalAction::COUNT],
            release_timeout: DEFAULT_KEY_RELEASE_TIMEOUT,
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    /// Record one key event. Unmapped keys are ignored.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.handle_key_event_at(key, Instant::now());
    }

    fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) {
        let Some(action) = map_key(key.code) else {
            return;
        };
        let slot = action.index();

        match key.kind {
            KeyEventKind::Press => {
                if !self.state.is_held(action) {
                    self.state.press(action);
                }
                self.last_seen[slot] = Some(now);
            }
            KeyEventKind::Repeat => {
                // Terminal auto-repeat only proves the key is still down.
                self.state.set_held(action, true);
                self.last_seen[slot] = Some(now);
            }
            KeyEventKind::Release => {
                self.state.set_held(action, false);
                self.last_seen[slot] = None;
            }
        }
    }

    /// State for this frame. Press edges are consumed.
    pub fn frame(&mut self) -> ActionState {
        self.frame_at(Instant::now())
    }

    fn frame_at(&mut self, now: Instant) -> ActionState {
        for action in LogicalAction::ALL {
            let slot = action.index();
            if let Some(seen) = self.last_seen[slot] {
                if now.saturating_duration_since(seen) > self.release_timeout {
                    self.state.set_held(action, false);
                    self.last_seen[slot] = None;
                }
            }
        }

        let out = self.state;
        self.state.clear_pressed();
        out
    }

    pub fn reset(&mut self) {
        self.state = ActionState::new();
        self.last_seen = [None; LogicalAction::COUNT];
    }
}

impl Default for KeyboardResolver {
    fn default() -> Self {
        Self::new()
    }
}
