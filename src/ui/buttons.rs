//! GPIO button input.
//!
//! Five physical buttons (active-low with internal pull-up):
//!   - UP / DOWN   - move the cursor
//!   - LEFT / RIGHT - adjust the selected value
//!   - SELECT      - context-dependent: open / confirm / measure
//!
//! The main loop reads every line once per tick; edge detection and
//! debouncing (if enabled) happen in [`crate::ui::input_filter`].

use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::ui::Buttons;

/// The five button inputs.
pub struct ButtonPins<'d> {
    up: Input<'d>,
    down: Input<'d>,
    left: Input<'d>,
    right: Input<'d>,
    select: Input<'d>,
}

impl<'d> ButtonPins<'d> {
    pub fn new(up: AnyPin, down: AnyPin, left: AnyPin, right: AnyPin, select: AnyPin) -> Self {
        Self {
            up: Input::new(up, Pull::Up),
            down: Input::new(down, Pull::Up),
            left: Input::new(left, Pull::Up),
            right: Input::new(right, Pull::Up),
            select: Input::new(select, Pull::Up),
        }
    }

    /// Read all lines; a low line is a pressed button.
    pub fn sample(&self) -> Buttons {
        Buttons {
            up: self.up.is_low(),
            down: self.down.is_low(),
            left: self.left.is_low(),
            right: self.right.is_low(),
            select: self.select.is_low(),
        }
    }
}
