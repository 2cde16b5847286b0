//! Screen painting.
//!
//! Every screen is drawn from a read-only [`Snapshot`] onto any
//! monochrome `embedded-graphics` draw target, so the layout runs the same
//! on the SSD1306 and in host tests. Coordinates follow the text cursor
//! convention of the panel: a text position is its top-left corner.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use super::machine::{edit_row_field, EDIT_ITEMS, LOAD_ITEMS, LOAD_ROW_INDEX, MENU_ITEMS};
use super::{Cursor, Screen};
use crate::config::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRESS_BAR_HEIGHT, PROGRESS_BAR_WIDTH, PROGRESS_BAR_X,
    ROW_HEIGHT, TITLE_RULE_Y,
};
use crate::profile::{Field, ProfileField, ProfileIndex, TankProfile};
use crate::volume::MainReading;

/// Shown instead of a volume when the tank cannot be measured.
pub const UNCONFIGURED_MESSAGE: &str = "please configure";

const MENU_LABELS: [&str; MENU_ITEMS as usize] =
    ["Main Screen", "View Settings", "Edit Settings", "Load Settings"];

/// Y of the large volume figure on the main screen.
const VOLUME_TEXT_Y: i32 = 15;

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub screen: Screen,
    pub cursor: Cursor,
    pub active_index: ProfileIndex,
    pub profile: TankProfile,
    pub reading: MainReading,
}

fn text_style(font: &'static MonoFont<'static>, color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(color)
        .build()
}

/// X that centres `chars` glyphs of `char_width` px on the panel.
pub fn centered_x(chars: usize, char_width: u32) -> i32 {
    let text_width = chars as u32 * char_width;
    (DISPLAY_WIDTH.saturating_sub(text_width) / 2) as i32
}

/// Top of list row `row` (rows start right under the title rule).
pub fn row_y(row: u8) -> i32 {
    TITLE_RULE_Y + 1 + i32::from(row) * ROW_HEIGHT as i32
}

/// Top of the main-screen progress bar.
pub fn progress_bar_y() -> i32 {
    ((DISPLAY_HEIGHT - PROGRESS_BAR_HEIGHT) / 2) as i32 + 15
}

/// Integer part of a field, `--` when unset.
pub fn format_field(field: Field) -> String<12> {
    let mut s = String::new();
    match field {
        Field::Set(v) => {
            let _ = write!(s, "{}", v as i32);
        }
        Field::Unset => {
            let _ = s.push_str("--");
        }
    }
    s
}

/// Volume with one decimal, e.g. `3.8 L`.
pub fn format_liters(liters: f32) -> String<16> {
    let mut s = String::new();
    let _ = write!(s, "{:.1} L", liters);
    s
}

fn field_label(field: ProfileField) -> &'static str {
    match field {
        ProfileField::MinHeight => "Min Height: ",
        ProfileField::Diameter => "Diameter: ",
        ProfileField::TargetCapacity => "Target Capacity: ",
    }
}

/// Paint the whole frame for `snapshot`.
pub fn draw<D>(display: &mut D, snapshot: &Snapshot) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;
    match snapshot.screen {
        Screen::Main => draw_main(display, &snapshot.reading),
        Screen::Menu => draw_menu(display, snapshot.cursor),
        Screen::View => draw_view(display, &snapshot.profile),
        Screen::EditSettings => draw_edit(display, &snapshot.profile, snapshot.cursor),
        Screen::LoadProfile => draw_load(display, snapshot.active_index, snapshot.cursor),
    }
}

fn draw_main<D>(display: &mut D, reading: &MainReading) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let (liters, remaining, fill_px) = match *reading {
        MainReading::Unconfigured => {
            Text::with_baseline(
                UNCONFIGURED_MESSAGE,
                Point::zero(),
                text_style(&FONT_6X10, BinaryColor::On),
                Baseline::Top,
            )
            .draw(display)?;
            return Ok(());
        }
        MainReading::Level {
            liters,
            remaining,
            fill_px,
        } => (liters, remaining, fill_px),
    };

    let volume = format_liters(liters);
    Text::with_baseline(
        &volume,
        Point::new(centered_x(volume.len(), 10), VOLUME_TEXT_Y),
        text_style(&FONT_10X20, BinaryColor::On),
        Baseline::Top,
    )
    .draw(display)?;

    let bar_y = progress_bar_y();
    Rectangle::new(
        Point::new(PROGRESS_BAR_X, bar_y),
        Size::new(PROGRESS_BAR_WIDTH, PROGRESS_BAR_HEIGHT),
    )
    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
    .draw(display)?;
    if fill_px > 0 {
        Rectangle::new(
            Point::new(PROGRESS_BAR_X, bar_y),
            Size::new(fill_px.min(PROGRESS_BAR_WIDTH), PROGRESS_BAR_HEIGHT),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)?;
    }

    let mut left: String<24> = String::new();
    match remaining {
        Some(r) => {
            let _ = write!(left, "Left: {:.1} L", r);
        }
        None => {
            let _ = left.push_str("Left: --");
        }
    }
    Text::with_baseline(
        &left,
        Point::new(centered_x(left.len(), 6), bar_y + PROGRESS_BAR_HEIGHT as i32 + 3),
        text_style(&FONT_6X10, BinaryColor::On),
        Baseline::Top,
    )
    .draw(display)?;

    Ok(())
}

fn draw_title<D>(display: &mut D, title: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(
        title,
        Point::new(centered_x(title.len(), 6), 0),
        text_style(&FONT_6X10, BinaryColor::On),
        Baseline::Top,
    )
    .draw(display)?;

    Line::new(
        Point::new(0, TITLE_RULE_Y),
        Point::new(DISPLAY_WIDTH as i32 - 1, TITLE_RULE_Y),
    )
    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
    .draw(display)?;

    Ok(())
}

/// One list row; the highlighted row is drawn inverted.
fn draw_row<D>(display: &mut D, row: u8, text: &str, highlighted: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let y = row_y(row);
    let color = if highlighted {
        Rectangle::new(Point::new(0, y), Size::new(DISPLAY_WIDTH, ROW_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display)?;
        BinaryColor::Off
    } else {
        BinaryColor::On
    };

    Text::with_baseline(
        text,
        Point::new(0, y),
        text_style(&FONT_6X10, color),
        Baseline::Top,
    )
    .draw(display)?;
    Ok(())
}

fn draw_menu<D>(display: &mut D, cursor: Cursor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_title(display, "Menu")?;
    for (row, label) in (0u8..).zip(MENU_LABELS) {
        draw_row(display, row, label, cursor.row() == Some(row))?;
    }
    Ok(())
}

fn draw_view<D>(display: &mut D, profile: &TankProfile) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_title(display, "View Settings")?;
    let fields = [
        ProfileField::MinHeight,
        ProfileField::Diameter,
        ProfileField::TargetCapacity,
    ];
    for (line, field) in (0i32..).zip(fields) {
        let mut text: String<32> = String::new();
        let _ = text.push_str(field_label(field));
        let _ = text.push_str(&format_field(profile.field(field)));
        Text::with_baseline(
            &text,
            Point::new(0, 14 + line * ROW_HEIGHT as i32),
            text_style(&FONT_6X10, BinaryColor::On),
            Baseline::Top,
        )
        .draw(display)?;
    }
    Ok(())
}

fn draw_edit<D>(display: &mut D, profile: &TankProfile, cursor: Cursor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_title(display, "Edit Settings")?;
    for row in 0..EDIT_ITEMS {
        let mut text: String<32> = String::new();
        match edit_row_field(row) {
            Some(field) => {
                let _ = text.push_str(field_label(field));
                let _ = text.push_str(&format_field(profile.field(field)));
            }
            None => {
                let _ = text.push_str("Save Settings");
            }
        }
        draw_row(display, row, &text, cursor.row() == Some(row))?;
    }
    Ok(())
}

fn draw_load<D>(display: &mut D, active: ProfileIndex, cursor: Cursor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_title(display, "Load Settings")?;
    for row in 0..LOAD_ITEMS {
        let mut text: String<16> = String::new();
        if row == LOAD_ROW_INDEX {
            let _ = write!(text, "Index: {}", active.get());
        } else {
            let _ = text.push_str("Load Settings");
        }
        draw_row(display, row, &text, cursor.row() == Some(row))?;
    }
    Ok(())
}
