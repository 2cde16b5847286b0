//! HC-SR04 ultrasonic rangefinder.
//!
//! Protocol: hold TRIG low, pulse it high for 10 µs, then time how long
//! ECHO stays high. The pulse width is the sound round-trip time.
//! The whole measurement is bounded by `ECHO_TIMEOUT_MS`.

use embassy_time::{with_timeout, Duration, Instant, Timer};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::digital::Wait;

use super::{echo_to_distance, Rangefinder};
use crate::config::{ECHO_TIMEOUT_MS, TRIGGER_PULSE_US, TRIGGER_SETTLE_US};

/// Sonar driver over a trigger output and an edge-waitable echo input.
pub struct Hcsr04<T, E> {
    trigger: T,
    echo: E,
}

impl<T: OutputPin, E: Wait> Hcsr04<T, E> {
    pub fn new(trigger: T, echo: E) -> Self {
        Self { trigger, echo }
    }

    async fn fire_trigger(&mut self) {
        // GPIO writes on the nRF are infallible.
        let _ = self.trigger.set_low();
        Timer::after_micros(TRIGGER_SETTLE_US).await;
        let _ = self.trigger.set_high();
        Timer::after_micros(TRIGGER_PULSE_US).await;
        let _ = self.trigger.set_low();
    }

    /// Width of the echo pulse in µs, `None` on timeout.
    async fn echo_width_us(&mut self) -> Option<u64> {
        let echo = &mut self.echo;
        let measured = with_timeout(Duration::from_millis(ECHO_TIMEOUT_MS), async {
            echo.wait_for_high().await.ok()?;
            let start = Instant::now();
            echo.wait_for_low().await.ok()?;
            Some(start.elapsed().as_micros())
        })
        .await;

        measured.ok().flatten()
    }
}

impl<T: OutputPin, E: Wait> Rangefinder for Hcsr04<T, E> {
    async fn measure_distance(&mut self) -> Option<f32> {
        self.fire_trigger().await;

        match self.echo_width_us().await.and_then(echo_to_distance) {
            Some(distance) => {
                debug!("Sonar: {} cm", distance);
                Some(distance)
            }
            None => {
                warn!("Sonar: no echo within {} ms", ECHO_TIMEOUT_MS);
                None
            }
        }
    }
}
