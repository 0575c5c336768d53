use std::time::Duration;

use anyhow::Context as _;
use embedded_hal::delay::DelayNs;
use rppal::{
    gpio::{Gpio, InputPin, OutputPin},
    hal::Delay,
};

use crate::{
    base_hat::{self, BaseHat},
    board::{Board, Note, Rgb},
    config::{
        BUTTON_PIN, BUZZER_PIN, DISPLAY_ROWS, KNOB_CHANNEL, KNOB_FULL_SCALE_DEG, LED_PIN,
        LIGHT_CHANNEL, LOUDNESS_CHANNEL, SERVO_MAX_ANGLE, SERVO_PIN, TEMPERATURE_CHANNEL,
    },
    lcd::Lcd,
};

pub const SERVO_PERIOD: Duration = Duration::from_millis(20);
pub const SERVO_MIN_PULSE_US: u64 = 600;
pub const SERVO_MAX_PULSE_US: u64 = 2500;

#[derive(Debug)]
pub struct GroveBoard {
    delay: Delay,
    hat: BaseHat,
    lcd: Lcd,
    button: InputPin,
    led: OutputPin,
    buzzer: OutputPin,
    servo: OutputPin,
}

impl GroveBoard {
    pub fn new(hat: BaseHat) -> Result<GroveBoard, anyhow::Error> {
        let lcd = Lcd::new().context("Failed to initialize LCD")?;

        let gpio = Gpio::new().context("Failed to initialize GPIO")?;
        let button = gpio
            .get(BUTTON_PIN)
            .context("Failed to acquire button pin")?
            .into_input_pulldown();
        let led = gpio
            .get(LED_PIN)
            .context("Failed to acquire LED pin")?
            .into_output_low();
        let buzzer = gpio
            .get(BUZZER_PIN)
            .context("Failed to acquire buzzer pin")?
            .into_output_low();
        let servo = gpio
            .get(SERVO_PIN)
            .context("Failed to acquire servo pin")?
            .into_output_low();

        Ok(GroveBoard {
            delay: Delay,
            hat,
            lcd,
            button,
            led,
            buzzer,
            servo,
        })
    }

    pub fn init(&mut self) -> Result<(), anyhow::Error> {
        self.lcd.init().context("Failed to initialize LCD")?;

        Ok(())
    }
}

impl Board for GroveBoard {
    fn read_temperature(&mut self) -> Result<f64, anyhow::Error> {
        let raw = self.hat.read_raw(TEMPERATURE_CHANNEL)?;
        base_hat::thermistor_celsius(raw)
    }

    fn read_light(&mut self) -> Result<f64, anyhow::Error> {
        let raw = self.hat.read_raw(LIGHT_CHANNEL)?;
        Ok(base_hat::light_lux(raw))
    }

    fn read_loudness(&mut self) -> Result<f64, anyhow::Error> {
        let raw = self.hat.read_raw(LOUDNESS_CHANNEL)?;
        Ok(f64::from(raw))
    }

    fn read_button(&mut self) -> Result<bool, anyhow::Error> {
        Ok(self.button.is_high())
    }

    fn read_knob_angle(&mut self) -> Result<f64, anyhow::Error> {
        let raw = self.hat.read_raw(KNOB_CHANNEL)?;
        Ok(base_hat::rotary_degrees(raw, KNOB_FULL_SCALE_DEG))
    }

    fn set_display_text(&mut self, row: u8, text: &str) -> Result<(), anyhow::Error> {
        if row >= DISPLAY_ROWS {
            return Err(anyhow::anyhow!("Invalid display row: {}", row));
        }
        self.lcd.set_cursor(row, 0)?;
        self.lcd.write(text)
    }

    fn set_display_color(&mut self, color: Rgb) -> Result<(), anyhow::Error> {
        self.lcd.set_color(color)
    }

    fn set_led(&mut self, on: bool) -> Result<(), anyhow::Error> {
        if on {
            self.led.set_high();
        } else {
            self.led.set_low();
        }
        Ok(())
    }

    fn play_tone(&mut self, note: Note, duration: Duration) -> Result<(), anyhow::Error> {
        self.buzzer
            .set_pwm_frequency(note.frequency_hz(), 0.5)
            .context("Failed to start buzzer")?;
        self.delay(duration);
        self.buzzer.clear_pwm().context("Failed to stop buzzer")?;
        Ok(())
    }

    fn set_servo_angle(&mut self, degrees: u16) -> Result<(), anyhow::Error> {
        self.servo
            .set_pwm(SERVO_PERIOD, servo_pulse_width(degrees))
            .context("Failed to drive servo")?;
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
        self.delay.delay_us(micros);
    }
}

pub fn servo_pulse_width(degrees: u16) -> Duration {
    let degrees = u64::from(degrees.min(SERVO_MAX_ANGLE));
    let span = SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US;
    Duration::from_micros(SERVO_MIN_PULSE_US + degrees * span / u64::from(SERVO_MAX_ANGLE))
}
