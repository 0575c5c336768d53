use std::time::Duration;

/// Number of loop iterations between telemetry uploads.
pub const UPLOAD_INTERVAL: u32 = 5;
pub const LOOP_PERIOD: Duration = Duration::from_secs(1);

/// Loudness / baseline ratio above which the alert fires.
pub const ALERT_RATIO: f64 = 100.0;
pub const ALERT_NOTE_DURATION: Duration = Duration::from_millis(100);
pub const ALERT_ROWS: [&str; 2] = ["KEEPING IT DOWN", "OH YEAH"];

pub const LED_PULSE: Duration = Duration::from_millis(50);

pub const SERVO_STEP: u16 = 90;
pub const SERVO_MAX_ANGLE: u16 = 180;

/// Floor applied to the baseline so the loudness ratio stays finite.
pub const MIN_BASELINE_NOISE: f64 = 1.0;

pub const KNOB_FULL_SCALE_DEG: f64 = 300.0;

pub const TELEMETRY_ENDPOINT: &str = "localhost:41234";
pub const COMPONENT_TEMP_C: &str = "temp";
pub const COMPONENT_TEMP_F: &str = "tempF";
pub const COMPONENT_LIGHT: &str = "light";

pub const DISPLAY_COLUMNS: usize = 16;
pub const DISPLAY_ROWS: u8 = 2;

// Grove Base HAT analog channels
pub const TEMPERATURE_CHANNEL: u8 = 0;
pub const LIGHT_CHANNEL: u8 = 2;
pub const LOUDNESS_CHANNEL: u8 = 4;
pub const KNOB_CHANNEL: u8 = 6;

// BCM GPIO numbers
pub const BUTTON_PIN: u8 = 5;
pub const LED_PIN: u8 = 16;
pub const BUZZER_PIN: u8 = 12;
pub const SERVO_PIN: u8 = 18;
