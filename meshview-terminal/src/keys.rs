/// Held-key tracking on top of terminal key events
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use meshview_core::{Key, KeyState};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a press counts as held when the terminal never reports releases.
/// Keyboard auto-repeat refreshes it while the key stays down.
pub const DEFAULT_HOLD_TIMEOUT: Duration = Duration::from_millis(300);

/// Turns key events into a per-frame "which keys are down" snapshot
#[derive(Debug)]
pub struct KeyTracker {
    held: HashMap<Key, Instant>,
    reports_release: bool,
    hold_timeout: Duration,
}

impl KeyTracker {
    /// `reports_release` is true when the terminal sends key release events
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            reports_release,
            hold_timeout: DEFAULT_HOLD_TIMEOUT,
        }
    }

    pub fn with_hold_timeout(mut self, hold_timeout: Duration) -> Self {
        self.hold_timeout = hold_timeout;
        self
    }

    pub fn handle(&mut self, event: &KeyEvent, now: Instant) {
        let Some(key) = map_key(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    /// Drop presses that timed out without a release event
    pub fn expire(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        let timeout = self.hold_timeout;
        self.held
            .retain(|_, pressed| now.saturating_duration_since(*pressed) < timeout);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl KeyState for KeyTracker {
    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }
}

/// Terminal key codes bound to viewer keys
pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Key::W,
            'a' => Key::A,
            's' => Key::S,
            'd' => Key::D,
            'q' => Key::Q,
            'e' => Key::E,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

/// Esc or Ctrl-C close the viewer
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
