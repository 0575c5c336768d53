use std::fmt;

use anyhow::Context;
use chrono::{DateTime, Local};

use crate::{
    board::{Board, Note, Rgb},
    config::{
        ALERT_NOTE_DURATION, ALERT_RATIO, ALERT_ROWS, COMPONENT_LIGHT, COMPONENT_TEMP_C,
        COMPONENT_TEMP_F, DISPLAY_COLUMNS, LED_PULSE, LOOP_PERIOD, MIN_BASELINE_NOISE,
        SERVO_MAX_ANGLE, SERVO_STEP, UPLOAD_INTERVAL,
    },
    lcd::fit_row,
    measurement::Measurement,
    telemetry::{Observation, TelemetrySink},
};

pub const ALERT_MELODY: [Note; 8] = [
    Note::Do,
    Note::Re,
    Note::Mi,
    Note::Fa,
    Note::Sol,
    Note::La,
    Note::Si,
    Note::Do,
];

#[derive(Debug, Clone, PartialEq)]
pub struct LoopState {
    pub baseline_noise: f64,
    /// Always below `UPLOAD_INTERVAL` between iterations.
    pub upload_counter: u32,
    pub servo_angle: u16,
}

impl LoopState {
    pub fn new(baseline_noise: f64) -> LoopState {
        LoopState {
            baseline_noise: floor_baseline(baseline_noise),
            upload_counter: 0,
            servo_angle: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Iteration {
    pub measurement: Measurement,
    pub color: Rgb,
    pub alert: bool,
    pub status: Option<StatusReport>,
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    pub timestamp: DateTime<Local>,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub lux: f64,
    pub loudness: f64,
    pub baseline_noise: f64,
    pub button_pressed: bool,
    pub knob_angle_deg: f64,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.timestamp.format("%a %b %e %H:%M:%S %Y"))?;
        writeln!(
            f,
            "temperature: {:.1} F / {:.1} C",
            self.temperature_f, self.temperature_c
        )?;
        writeln!(f, "lighting: {:.1} lux", self.lux)?;
        writeln!(f, "sound: {:.0} / {:.0}", self.loudness, self.baseline_noise)?;
        writeln!(f, "button state: {}", u8::from(self.button_pressed))?;
        write!(f, "knob state: {:5.2} deg", self.knob_angle_deg)
    }
}

#[derive(Debug)]
pub struct Monitor<B, T> {
    board: B,
    telemetry: T,
    state: LoopState,
}

impl<B: Board, T: TelemetrySink> Monitor<B, T> {
    /// Seeds the baseline from the room's loudness at startup.
    pub fn new(mut board: B, telemetry: T) -> Result<Monitor<B, T>, anyhow::Error> {
        let loudness = board
            .read_loudness()
            .context("Failed to sample baseline noise")?;

        Ok(Monitor {
            board,
            telemetry,
            state: LoopState::new(loudness),
        })
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn measure(&mut self) -> Result<Measurement, anyhow::Error> {
        let temperature_c = self
            .board
            .read_temperature()
            .context("Failed to read temperature")?;
        let lux = self.board.read_light().context("Failed to read light")?;
        let loudness = self
            .board
            .read_loudness()
            .context("Failed to read loudness")?;
        let button_pressed = self.board.read_button().context("Failed to read button")?;
        let knob_angle_deg = self
            .board
            .read_knob_angle()
            .context("Failed to read knob")?;

        Ok(Measurement {
            timestamp: Local::now(),
            temperature_c,
            lux,
            loudness,
            button_pressed,
            knob_angle_deg,
        })
    }

    /// One pass of the loop, without the trailing sleep.
    pub fn tick(&mut self) -> Result<Iteration, anyhow::Error> {
        let measurement = self.measure()?;

        let mut color = backlight_color(measurement.loudness, self.state.baseline_noise);
        if measurement.button_pressed {
            color = knob_color(measurement.knob_turn());
            self.state.baseline_noise = floor_baseline(measurement.loudness);
            log::info!("Baseline noise reset to {:.0}", self.state.baseline_noise);
        }

        if let Err(e) = self.show_readings(color, &measurement) {
            log::error!("{e:#}");
        }

        let alert = is_alert(measurement.loudness, self.state.baseline_noise);
        if alert {
            color = Rgb::RED;
            if let Err(e) = self.sound_alert(measurement.loudness) {
                log::error!("{e:#}");
            }
        }

        self.state.upload_counter += 1;
        let status = if self.state.upload_counter >= UPLOAD_INTERVAL {
            Some(self.upload(&measurement))
        } else {
            None
        };

        Ok(Iteration {
            measurement,
            color,
            alert,
            status,
        })
    }

    pub fn run(mut self) -> ! {
        loop {
            match self.tick() {
                Ok(iteration) => {
                    log::debug!(
                        "{:?} -> {:?}, alert: {}",
                        iteration.measurement, iteration.color, iteration.alert
                    );
                    if let Some(status) = iteration.status {
                        println!("\n{status}");
                    }
                }
                Err(e) => log::error!("{e:#}"),
            }

            self.board.delay(LOOP_PERIOD);
        }
    }

    fn show_readings(&mut self, color: Rgb, measurement: &Measurement) -> Result<(), anyhow::Error> {
        self.board.set_display_color(color)?;
        self.board.set_display_text(
            0,
            &fit_row(
                &format!("Temp {:.1} F", measurement.temperature_f()),
                DISPLAY_COLUMNS,
            ),
        )?;
        self.board.set_display_text(
            1,
            &fit_row(&format!("Light {:.1} lux", measurement.lux), DISPLAY_COLUMNS),
        )?;

        Ok(())
    }

    fn sound_alert(&mut self, loudness: f64) -> Result<(), anyhow::Error> {
        log::warn!(
            "Loudness {:.0} is over {}x the baseline {:.0}",
            loudness,
            ALERT_RATIO,
            self.state.baseline_noise
        );

        self.board.set_display_color(Rgb::RED)?;
        for (row, text) in (0u8..).zip(ALERT_ROWS) {
            self.board
                .set_display_text(row, &fit_row(text, DISPLAY_COLUMNS))?;
        }
        // sensing stalls until the melody ends
        for note in ALERT_MELODY {
            self.board.play_tone(note, ALERT_NOTE_DURATION)?;
        }

        Ok(())
    }

    fn upload(&mut self, measurement: &Measurement) -> StatusReport {
        self.state.upload_counter = 0;

        let temperature_f = measurement.temperature_f();
        let observations = [
            Observation::new(COMPONENT_TEMP_C, measurement.temperature_c),
            Observation::new(COMPONENT_TEMP_F, temperature_f),
            Observation::new(COMPONENT_LIGHT, measurement.lux),
        ];
        for observation in &observations {
            if let Err(e) = self.telemetry.send(observation) {
                log::warn!("{e:#}");
            }
        }

        if let Err(e) = self.pulse_led() {
            log::error!("{e:#}");
        }

        self.state.servo_angle = next_servo_angle(self.state.servo_angle);
        if let Err(e) = self.board.set_servo_angle(self.state.servo_angle) {
            log::error!("{e:#}");
        }

        StatusReport {
            timestamp: measurement.timestamp,
            temperature_c: measurement.temperature_c,
            temperature_f,
            lux: measurement.lux,
            loudness: measurement.loudness,
            baseline_noise: self.state.baseline_noise,
            button_pressed: measurement.button_pressed,
            knob_angle_deg: measurement.knob_angle_deg,
        }
    }

    fn pulse_led(&mut self) -> Result<(), anyhow::Error> {
        self.board.set_led(true)?;
        self.board.delay(LED_PULSE);
        self.board.set_led(false)
    }
}

/// Green at or below the baseline, shading to red at twice the baseline.
pub fn backlight_color(loudness: f64, baseline_noise: f64) -> Rgb {
    let red = ((loudness / baseline_noise - 1.0) * 255.0).clamp(0.0, 255.0);
    let green = (255.0 - red).clamp(0.0, 255.0);
    Rgb::new(red as u8, green as u8, 0)
}

pub fn knob_color(knob_turn: f64) -> Rgb {
    Rgb::new(0, 0, (knob_turn * 255.0).clamp(0.0, 255.0) as u8)
}

pub fn is_alert(loudness: f64, baseline_noise: f64) -> bool {
    loudness / baseline_noise > ALERT_RATIO
}

/// Steps through 0, 90, 180 and back to 0.
pub fn next_servo_angle(current: u16) -> u16 {
    (current + SERVO_STEP) % (SERVO_MAX_ANGLE + SERVO_STEP)
}

fn floor_baseline(loudness: f64) -> f64 {
    loudness.max(MIN_BASELINE_NOISE)
}
