//! User interface subsystem - OLED display + physical buttons.
//!
//! The UI is a small state machine that reacts to button presses and
//! renders the current screen on the SSD1306 OLED.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 5 tactile switches (UP, DOWN, LEFT, RIGHT, SELECT),
//!   sampled once per tick

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
pub mod input_filter;
pub mod input_logic;
pub mod machine;
pub mod render;


/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Current volume and progress bar for the active profile.
    Main,
    /// Top-level menu.
    Menu,
    /// Read-only view of the active profile.
    View,
    /// Edit the active profile.
    EditSettings,
    /// Pick which profile is active.
    LoadProfile,
}

/// Physical button events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Up,
    Down,
    Left,
    Right,
    Select,
}

/// Highlighted row of a list screen; empty right after entering a menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor(Option<u8>);

impl Cursor {
    /// No row highlighted yet.
    pub const NONE: Self = Self(None);

    pub const fn at(row: u8) -> Self {
        Self(Some(row))
    }

    pub fn row(self) -> Option<u8> {
        self.0
    }
}

/// Button lines sampled in one tick (`true` = pressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub select: bool,
}

impl Buttons {
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
        select: false,
    };

    /// A sample with only `event`'s button pressed.
    pub fn only(event: ButtonEvent) -> Self {
        let mut buttons = Self::NONE;
        match event {
            ButtonEvent::Up => buttons.up = true,
            ButtonEvent::Down => buttons.down = true,
            ButtonEvent::Left => buttons.left = true,
            ButtonEvent::Right => buttons.right = true,
            ButtonEvent::Select => buttons.select = true,
        }
        buttons
    }

    pub fn any(self) -> bool {
        self.as_array().iter().any(|&pressed| pressed)
    }

    /// Lines in event order: up, down, left, right, select.
    pub fn as_array(self) -> [bool; 5] {
        [self.up, self.down, self.left, self.right, self.select]
    }

    pub fn from_array(lines: [bool; 5]) -> Self {
        let [up, down, left, right, select] = lines;
        Self {
            up,
            down,
            left,
            right,
            select,
        }
    }

    /// Events for this tick, in the order they are applied.
    ///
    /// LEFT wins when LEFT and RIGHT are both held.
    pub fn events(self) -> impl Iterator<Item = ButtonEvent> {
        let right = self.right && !self.left;
        [
            (self.up, ButtonEvent::Up),
            (self.down, ButtonEvent::Down),
            (self.left, ButtonEvent::Left),
            (right, ButtonEvent::Right),
            (self.select, ButtonEvent::Select),
        ]
        .into_iter()
        .filter_map(|(pressed, event)| pressed.then_some(event))
    }
}
