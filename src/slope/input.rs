//! Logical control signals.
//!
//! Each signal is a held boolean toggled by key press/release. The shell
//! feeds browser key names through [`Control::from_key`]; the simulation
//! only ever sees the [`Controls`] record.

/// One directional control signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
}

impl Control {
    /// Map a `KeyboardEvent.key` name to a control signal. Arrow keys plus
    /// WASD aliases; anything else is ignored.
    pub fn from_key(key: &str) -> Option<Control> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::Left),
            "ArrowRight" | "d" | "D" => Some(Control::Right),
            "ArrowUp" | "w" | "W" => Some(Control::Up),
            "ArrowDown" | "s" | "S" => Some(Control::Down),
            _ => None,
        }
    }
}

/// Held state of all four signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Controls {
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Left => self.left = held,
            Control::Right => self.right = held,
            Control::Up => self.up = held,
            Control::Down => self.down = held,
        }
    }

    /// Net horizontal sign: -1 (left), 0, or 1 (right). Opposite held
    /// signals cancel.
    pub fn horizontal(&self) -> f64 {
        (self.right as i8 - self.left as i8) as f64
    }

    /// Net vertical sign: -1 (up, away from the viewer), 0, or 1 (down).
    pub fn vertical(&self) -> f64 {
        (self.down as i8 - self.up as i8) as f64
    }
}
