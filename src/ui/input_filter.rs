//! Optional filtering of raw button samples.
//!
//! By default every tick a line reads pressed counts as a press, so a held
//! button repeats once per tick. `InputMode::Debounced` only reports the
//! released → pressed edge and drops edges that follow an accepted press
//! of the same button within `DEBOUNCE_MS`.

use super::Buttons;
use crate::config::DEBOUNCE_MS;

/// How raw button samples become presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    /// Pressed in this tick = press event.
    Raw,
    /// Press edges only, with a dead time after each accepted press.
    Debounced,
}

/// Per-button edge and debounce state.
pub struct InputFilter {
    mode: InputMode,
    /// Raw sample of the previous tick.
    held: Buttons,
    /// Time of the last accepted press, per button.
    last_press_ms: [Option<u64>; 5],
}

impl InputFilter {
    pub const fn new(mode: InputMode) -> Self {
        Self {
            mode,
            held: Buttons::NONE,
            last_press_ms: [None; 5],
        }
    }

    /// Turn this tick's raw sample into presses.
    pub fn filter(&mut self, raw: Buttons, now_ms: u64) -> Buttons {
        if self.mode == InputMode::Raw {
            return raw;
        }

        let lines = raw.as_array();
        let held = self.held.as_array();
        let mut pressed = [false; 5];

        for (i, pressed) in pressed.iter_mut().enumerate() {
            let edge = lines[i] && !held[i];
            let settled = self.last_press_ms[i]
                .map_or(true, |last| now_ms.saturating_sub(last) >= DEBOUNCE_MS);
            if edge && settled {
                *pressed = true;
                self.last_press_ms[i] = Some(now_ms);
            }
        }

        self.held = raw;
        Buttons::from_array(pressed)
    }
}
