use chrono::{DateTime, Local};

use crate::config::KNOB_FULL_SCALE_DEG;

#[derive(Debug, Clone)]
pub struct Measurement {
    pub timestamp: DateTime<Local>,
    pub temperature_c: f64,
    pub lux: f64,
    pub loudness: f64,
    pub button_pressed: bool,
    pub knob_angle_deg: f64,
}

impl Measurement {
    pub fn temperature_f(&self) -> f64 {
        celsius_to_fahrenheit(self.temperature_c)
    }

    pub fn knob_turn(&self) -> f64 {
        self.knob_angle_deg / KNOB_FULL_SCALE_DEG
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}
