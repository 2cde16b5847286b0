//! Screen/cursor state machine.
//!
//! `UiState::on_event` is a pure transition: it returns the next state and
//! at most one [`Command`] for the controller to carry out against the
//! settings store or the rangefinder.
//!
//! ```text
//! Main ──SEL──▶ Menu ──SEL[0]──▶ Main
//!                │ ──SEL[1]──▶ View ──SEL──▶ Menu
//!                │ ──SEL[2]──▶ EditSettings ──SEL[3] (save)──▶ Menu
//!                └ ──SEL[3]──▶ LoadProfile ──SEL[1] (load)──▶ Menu
//! ```

use super::input_logic::{wrap_next, wrap_prev};
use super::{ButtonEvent, Cursor, Screen};
use crate::profile::ProfileField;

/// Rows on the menu screen.
pub const MENU_ITEMS: u8 = 4;
/// Rows on the edit screen: three fields and "save".
pub const EDIT_ITEMS: u8 = 4;
/// Rows on the load screen: index and "load".
pub const LOAD_ITEMS: u8 = 2;

/// Edit row that stores the profile.
pub const EDIT_ROW_SAVE: u8 = 3;
/// Load row holding the profile index.
pub const LOAD_ROW_INDEX: u8 = 0;
/// Load row that activates the chosen profile.
pub const LOAD_ROW_COMMIT: u8 = 1;

/// Side effects requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Take a live reading and use it as the empty-tank height.
    MeasureMinHeight,
    /// Step a numeric field of the active profile.
    Nudge { field: ProfileField, increase: bool },
    /// Move the active profile index (RAM only).
    StepActiveIndex { increase: bool },
    /// Persist the active profile.
    SaveActiveProfile,
    /// Persist the active index and reload every profile.
    CommitActiveIndex,
}

/// Screen a menu row leads to.
pub fn menu_target(row: u8) -> Option<Screen> {
    match row {
        0 => Some(Screen::Main),
        1 => Some(Screen::View),
        2 => Some(Screen::EditSettings),
        3 => Some(Screen::LoadProfile),
        _ => None,
    }
}

/// Profile field shown on an edit row.
pub fn edit_row_field(row: u8) -> Option<ProfileField> {
    match row {
        0 => Some(ProfileField::MinHeight),
        1 => Some(ProfileField::Diameter),
        2 => Some(ProfileField::TargetCapacity),
        _ => None,
    }
}

/// Current screen and cursor. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiState {
    pub screen: Screen,
    pub cursor: Cursor,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Boot state: main screen, cursor on the first row.
    pub const fn new() -> Self {
        Self {
            screen: Screen::Main,
            cursor: Cursor::at(0),
        }
    }

    /// Enter `screen` with nothing selected.
    const fn entering(screen: Screen) -> Self {
        Self {
            screen,
            cursor: Cursor::NONE,
        }
    }

    fn with_cursor(self, cursor: Cursor) -> Self {
        Self { cursor, ..self }
    }

    /// Apply one button event.
    pub fn on_event(self, event: ButtonEvent) -> (Self, Option<Command>) {
        use ButtonEvent::*;

        let row = self.cursor.row();
        match (self.screen, event) {
            (Screen::Main, Select) => (Self::entering(Screen::Menu), None),
            (Screen::Main, _) => (self, None),

            (Screen::Menu, Up) => (self.with_cursor(wrap_prev(self.cursor, MENU_ITEMS)), None),
            (Screen::Menu, Down) => (self.with_cursor(wrap_next(self.cursor, MENU_ITEMS)), None),
            (Screen::Menu, Select) => match row.and_then(menu_target) {
                Some(screen) => (Self::entering(screen), None),
                None => (self, None),
            },
            (Screen::Menu, Left | Right) => (self, None),

            (Screen::View, Select) => (
                Self {
                    screen: Screen::Menu,
                    ..self
                },
                None,
            ),
            (Screen::View, _) => (self, None),

            (Screen::EditSettings, Up) => {
                (self.with_cursor(wrap_prev(self.cursor, EDIT_ITEMS)), None)
            }
            (Screen::EditSettings, Down) => {
                (self.with_cursor(wrap_next(self.cursor, EDIT_ITEMS)), None)
            }
            (Screen::EditSettings, Left | Right) => {
                let command = row
                    .and_then(edit_row_field)
                    .filter(|field| *field != ProfileField::MinHeight)
                    .map(|field| Command::Nudge {
                        field,
                        increase: event == Right,
                    });
                (self, command)
            }
            (Screen::EditSettings, Select) => match row {
                Some(0) => (self, Some(Command::MeasureMinHeight)),
                Some(EDIT_ROW_SAVE) => (
                    Self::entering(Screen::Menu),
                    Some(Command::SaveActiveProfile),
                ),
                _ => (self, None),
            },

            // Two rows: UP and DOWN both just toggle.
            (Screen::LoadProfile, Up | Down) => {
                (self.with_cursor(wrap_next(self.cursor, LOAD_ITEMS)), None)
            }
            (Screen::LoadProfile, Left | Right) => match row {
                Some(LOAD_ROW_INDEX) => (
                    self,
                    Some(Command::StepActiveIndex {
                        increase: event == Right,
                    }),
                ),
                _ => (self, None),
            },
            // Only the "load" row commits; select with no row highlighted
            // is ignored.
            (Screen::LoadProfile, Select) => match row {
                Some(LOAD_ROW_COMMIT) => (
                    Self::entering(Screen::Menu),
                    Some(Command::CommitActiveIndex),
                ),
                _ => (self, None),
            },
        }
    }
}
