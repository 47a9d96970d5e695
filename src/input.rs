/// User input delivered to the mounted page. Pointer coordinates are canvas-space pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown { key: String },
    KeyUp { key: String },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    Press { control: ControlKind },
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// Map a key name (`ArrowLeft`, ...) to an arrow; any other key is `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Which arrow keys are currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowKeyMap {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl ArrowKeyMap {
    pub fn set(&mut self, key: ArrowKey, held: bool) {
        match key {
            ArrowKey::Left => self.left = held,
            ArrowKey::Right => self.right = held,
            ArrowKey::Up => self.up = held,
            ArrowKey::Down => self.down = held,
        }
    }

    pub fn is_held(&self, key: ArrowKey) -> bool {
        match key {
            ArrowKey::Left => self.left,
            ArrowKey::Right => self.right,
            ArrowKey::Up => self.up,
            ArrowKey::Down => self.down,
        }
    }

    /// Apply a key event; returns `true` when it was an arrow key.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        let (name, held) = match event {
            InputEvent::KeyDown { key } => (key.as_str(), true),
            InputEvent::KeyUp { key } => (key.as_str(), false),
            _ => return false,
        };
        match ArrowKey::from_key_name(name) {
            Some(arrow) => {
                self.set(arrow, held);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Undo,
    Redo,
}

/// A page control (button) and whether it currently accepts presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub kind: ControlKind,
    pub enabled: bool,
}
