//! Integration tests for tank-gauge host-testable logic.
//!
//! The controller is driven tick by tick with button samples, an
//! in-memory settings image and a scripted rangefinder.

use embassy_futures::block_on;

use tank_gauge::config::{PROGRESS_BAR_WIDTH, SETTINGS_IMAGE_SIZE};
use tank_gauge::profile::{Field, ProfileIndex, TankProfile, PROFILE_RECORD_SIZE};
use tank_gauge::sensor::Rangefinder;
use tank_gauge::settings::ACTIVE_INDEX_OFFSET;
use tank_gauge::storage::{ByteStore, RamImage};
use tank_gauge::ui::input_filter::InputMode;
use tank_gauge::ui::render::{draw, Snapshot};
use tank_gauge::ui::{ButtonEvent, Buttons, Cursor, Screen};
use tank_gauge::volume::MainReading;
use tank_gauge::Controller;

type Image = RamImage<SETTINGS_IMAGE_SIZE>;

/// Rangefinder returning readings from a script, then repeating the last.
struct Scripted {
    readings: Vec<Option<f32>>,
    next: usize,
}

impl Scripted {
    fn new(readings: &[Option<f32>]) -> Self {
        Self {
            readings: readings.to_vec(),
            next: 0,
        }
    }
}

impl Rangefinder for Scripted {
    async fn measure_distance(&mut self) -> Option<f32> {
        let i = self.next.min(self.readings.len() - 1);
        self.next += 1;
        self.readings[i]
    }
}

struct Rig {
    gauge: Controller<Image, Scripted>,
    now_ms: u64,
}

impl Rig {
    fn boot(image: Image, readings: &[Option<f32>]) -> Self {
        Self {
            gauge: Controller::boot(image, Scripted::new(readings), InputMode::Raw),
            now_ms: 0,
        }
    }

    /// One main-loop tick with `event` held.
    fn press(&mut self, event: ButtonEvent) {
        self.now_ms += 100;
        block_on(self.gauge.handle_buttons(Buttons::only(event), self.now_ms));
    }

    fn press_all(&mut self, events: &[ButtonEvent]) {
        for &event in events {
            self.press(event);
        }
    }

    fn image(&self) -> Image {
        self.gauge.settings().storage().clone()
    }
}

fn stored_profile(image: &mut Image, slot: usize) -> TankProfile {
    let mut buf = [0u8; PROFILE_RECORD_SIZE];
    image.read(slot * PROFILE_RECORD_SIZE, &mut buf).unwrap();
    TankProfile::deserialize(&buf).unwrap()
}

fn stored_active(image: &mut Image) -> i32 {
    let mut buf = [0u8; 4];
    image.read(ACTIVE_INDEX_OFFSET, &mut buf).unwrap();
    i32::from_le_bytes(buf)
}

#[test]
fn fresh_device_boots_unconfigured() {
    let mut rig = Rig::boot(Image::erased(), &[Some(40.0)]);
    let mut image = rig.image();
    assert_eq!(stored_active(&mut image), 0);
    assert!(image.is_dirty());

    block_on(rig.gauge.sample_distance());
    let snapshot = rig.gauge.snapshot();
    assert_eq!(snapshot.screen, Screen::Main);
    assert_eq!(snapshot.active_index, ProfileIndex::FIRST);
    assert_eq!(snapshot.reading, MainReading::Unconfigured);
}

#[test]
fn configure_measure_and_save_profile() {
    use ButtonEvent::*;

    // Boot sample, then the min-height measurement, then background samples.
    let mut rig = Rig::boot(Image::erased(), &[Some(95.0), Some(100.0), Some(40.0)]);
    block_on(rig.gauge.sample_distance());

    // Main → Menu → "Edit Settings".
    rig.press_all(&[Select, Down, Down, Down, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::EditSettings);
    assert_eq!(rig.gauge.ui().cursor, Cursor::NONE);

    // Min height from a live reading.
    rig.press_all(&[Down, Select]);
    assert_eq!(
        rig.gauge.settings().active_profile().min_height,
        Field::Set(100.0)
    );

    // Diameter 0 → 20, target 0 → 50.
    rig.press_all(&[Down, Right, Right]);
    rig.press_all(&[Down, Right, Right, Right, Right, Right]);
    // Save.
    rig.press_all(&[Down, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::Menu);

    let expected = TankProfile::new(100.0, 20.0, 50.0);
    assert_eq!(*rig.gauge.settings().active_profile(), expected);
    let mut image = rig.image();
    assert_eq!(stored_profile(&mut image, 0), expected);

    // Back to main and take the next background sample.
    rig.press_all(&[Down, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::Main);
    block_on(rig.gauge.sample_distance());
    match rig.gauge.snapshot().reading {
        MainReading::Level {
            liters,
            remaining,
            fill_px,
        } => {
            assert!((liters - 3.77).abs() < 0.01);
            assert!((remaining.unwrap() - 46.23).abs() < 0.01);
            assert_eq!(fill_px, 9);
        }
        other => panic!("expected a level, got {:?}", other),
    }

    // Settings survive a reboot from the same image.
    let rebooted = Rig::boot(rig.image(), &[None]);
    assert_eq!(*rebooted.gauge.settings().active_profile(), expected);
}

#[test]
fn unsaved_edits_are_lost_on_reboot() {
    use ButtonEvent::*;

    let mut rig = Rig::boot(Image::erased(), &[None]);
    rig.press_all(&[Select, Up, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::EditSettings);
    rig.press_all(&[Down, Down, Right]);
    assert_eq!(
        rig.gauge.settings().active_profile().diameter,
        Field::Set(10.0)
    );

    let rebooted = Rig::boot(rig.image(), &[None]);
    assert_eq!(
        rebooted.gauge.settings().active_profile().diameter,
        Field::Unset
    );
}

#[test]
fn failed_measurement_leaves_profile_untouched() {
    use ButtonEvent::*;

    let mut rig = Rig::boot(Image::erased(), &[None]);
    rig.press_all(&[Select, Up, Select, Down, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::EditSettings);
    assert_eq!(
        rig.gauge.settings().active_profile().min_height,
        Field::Unset
    );
}

#[test]
fn load_profile_switches_and_persists_index() {
    use ButtonEvent::*;

    // Slot 2 holds a configured tank.
    let mut image = Image::erased();
    let mut record = [0u8; PROFILE_RECORD_SIZE];
    TankProfile::new(120.0, 30.0, 80.0).serialize(&mut record);
    image.write(2 * PROFILE_RECORD_SIZE, &record).unwrap();

    let mut rig = Rig::boot(image, &[None]);
    assert_eq!(rig.gauge.settings().active_index(), ProfileIndex::FIRST);

    // Main → Menu → "Load Settings", step the index twice, then load.
    rig.press_all(&[Select, Up, Down, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::LoadProfile);
    rig.press_all(&[Down, Right, Right]);
    assert_eq!(rig.gauge.settings().active_index().get(), 2);
    let mut before_commit = rig.image();
    assert_eq!(stored_active(&mut before_commit), 0);

    rig.press_all(&[Down, Select]);
    assert_eq!(rig.gauge.ui().screen, Screen::Menu);
    let mut after_commit = rig.image();
    assert_eq!(stored_active(&mut after_commit), 2);
    assert_eq!(
        *rig.gauge.settings().active_profile(),
        TankProfile::new(120.0, 30.0, 80.0)
    );

    let rebooted = Rig::boot(rig.image(), &[None]);
    assert_eq!(rebooted.gauge.settings().active_index().get(), 2);
}

#[test]
fn index_stepping_stops_at_the_ends() {
    use ButtonEvent::*;

    let mut rig = Rig::boot(Image::erased(), &[None]);
    rig.press_all(&[Select, Up, Down, Select, Down]);
    assert_eq!(rig.gauge.ui().screen, Screen::LoadProfile);
    rig.press_all(&[Left, Left]);
    assert_eq!(rig.gauge.settings().active_index(), ProfileIndex::FIRST);
    for _ in 0..8 {
        rig.press(Right);
    }
    assert_eq!(rig.gauge.settings().active_index(), ProfileIndex::LAST);
}

#[test]
fn overfull_tank_fills_the_bar() {
    let mut image = Image::erased();
    let mut record = [0u8; PROFILE_RECORD_SIZE];
    // 10 cm diameter, target 1 L: 50 cm of liquid is far past it.
    TankProfile::new(100.0, 10.0, 1.0).serialize(&mut record);
    image.write(0, &record).unwrap();

    let mut rig = Rig::boot(image, &[Some(50.0)]);
    block_on(rig.gauge.sample_distance());
    match rig.gauge.snapshot().reading {
        MainReading::Level { fill_px, .. } => assert_eq!(fill_px, PROGRESS_BAR_WIDTH),
        other => panic!("expected a level, got {:?}", other),
    }
}

#[test]
fn sensor_below_floor_reads_zero_liters() {
    let mut image = Image::erased();
    let mut record = [0u8; PROFILE_RECORD_SIZE];
    TankProfile::new(100.0, 20.0, 50.0).serialize(&mut record);
    image.write(0, &record).unwrap();

    let mut rig = Rig::boot(image, &[Some(120.0)]);
    block_on(rig.gauge.sample_distance());
    match rig.gauge.snapshot().reading {
        MainReading::Level {
            liters, fill_px, ..
        } => {
            assert_eq!(liters, 0.0);
            assert_eq!(fill_px, 0);
        }
        other => panic!("expected a level, got {:?}", other),
    }
}

/// Minimal frame buffer to check that a frame renders.
struct Frame {
    lit: usize,
}

impl embedded_graphics::geometry::OriginDimensions for Frame {
    fn size(&self) -> embedded_graphics::geometry::Size {
        embedded_graphics::geometry::Size::new(128, 64)
    }
}

impl embedded_graphics::draw_target::DrawTarget for Frame {
    type Color = embedded_graphics::pixelcolor::BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        self.lit += pixels
            .into_iter()
            .filter(|embedded_graphics::Pixel(_, c)| *c == Self::Color::On)
            .count();
        Ok(())
    }
}

#[test]
fn every_reachable_screen_renders() {
    use ButtonEvent::*;

    let mut rig = Rig::boot(Image::erased(), &[None]);
    let mut frames: Vec<Snapshot> = vec![rig.gauge.snapshot()];
    for event in [Select, Down, Down, Select, Select, Down, Down, Down, Select] {
        rig.press(event);
        frames.push(rig.gauge.snapshot());
    }
    assert!(frames.iter().any(|f| f.screen == Screen::View));
    assert!(frames.iter().any(|f| f.screen == Screen::EditSettings));

    for snapshot in &frames {
        let mut frame = Frame { lit: 0 };
        draw(&mut frame, snapshot).unwrap();
        assert!(frame.lit > 0, "{:?} drew nothing", snapshot.screen);
    }
}
