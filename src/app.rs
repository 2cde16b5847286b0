//! The gauge controller: UI state, settings and the rangefinder, driven
//! one tick at a time by the firmware main loop.
//!
//! Hardware stays outside: the loop samples the buttons, hands the raw
//! sample in, syncs storage and paints the [`Snapshot`] this produces.

use crate::config::PROGRESS_BAR_WIDTH;
use crate::error::Error;
use crate::profile::Field;
use crate::sensor::Rangefinder;
use crate::settings::SettingsStore;
use crate::storage::ByteStore;
use crate::ui::input_filter::{InputFilter, InputMode};
use crate::ui::machine::{Command, UiState};
use crate::ui::render::Snapshot;
use crate::ui::Buttons;
use crate::volume::MainReading;

pub struct Controller<S, R> {
    ui: UiState,
    settings: SettingsStore<S>,
    rangefinder: R,
    input: InputFilter,
    /// Distance from the most recent background sample.
    last_distance: Option<f32>,
}

impl<S: ByteStore, R: Rangefinder> Controller<S, R> {
    /// Load settings from `storage` and start on the main screen.
    pub fn boot(storage: S, rangefinder: R, mode: InputMode) -> Self {
        let settings = SettingsStore::boot(storage);
        info!(
            "Booted with profile {} ({:?} input)",
            settings.active_index().get(),
            mode
        );
        Self {
            ui: UiState::new(),
            settings,
            rangefinder,
            input: InputFilter::new(mode),
            last_distance: None,
        }
    }

    /// Process one tick's raw button sample.
    ///
    /// Events run in their fixed order against the state each previous
    /// event left behind.
    pub async fn handle_buttons(&mut self, raw: Buttons, now_ms: u64) {
        let pressed = self.input.filter(raw, now_ms);
        for event in pressed.events() {
            let (next, command) = self.ui.on_event(event);
            if next.screen != self.ui.screen {
                info!("Screen {:?} -> {:?}", self.ui.screen, next.screen);
            }
            self.ui = next;

            if let Some(command) = command {
                if let Err(e) = self.apply(command).await {
                    warn!("{:?} failed: {:?}", command, e);
                }
            }
        }
    }

    /// Carry out a command produced by a transition.
    pub async fn apply(&mut self, command: Command) -> Result<(), Error> {
        debug!("Applying {:?}", command);
        match command {
            Command::MeasureMinHeight => {
                let distance = self
                    .rangefinder
                    .measure_distance()
                    .await
                    .ok_or(Error::SensorTimeout)?;
                self.settings.active_profile_mut().min_height = Field::Set(distance);
                self.last_distance = Some(distance);
            }
            Command::Nudge { field, increase } => {
                let value = self.settings.active_profile_mut().field_mut(field);
                *value = value.nudge(increase);
            }
            Command::StepActiveIndex { increase } => {
                let index = self.settings.active_index().step(increase);
                self.settings.set_active_index(index);
            }
            Command::SaveActiveProfile => {
                let index = self.settings.active_index().get();
                self.settings.save(index);
            }
            Command::CommitActiveIndex => {
                let index = self.settings.active_index();
                self.settings.save_active_index(index);
                self.settings.load_all();
            }
        }
        Ok(())
    }

    /// Take the background reading used by the next main-screen frame.
    pub async fn sample_distance(&mut self) -> Option<f32> {
        self.last_distance = self.rangefinder.measure_distance().await;
        self.last_distance
    }

    /// Everything needed to draw the current frame.
    pub fn snapshot(&self) -> Snapshot {
        let profile = *self.settings.active_profile();
        Snapshot {
            screen: self.ui.screen,
            cursor: self.ui.cursor,
            active_index: self.settings.active_index(),
            profile,
            reading: MainReading::evaluate(&profile, self.last_distance, PROGRESS_BAR_WIDTH),
        }
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.settings.storage_mut()
    }
}
