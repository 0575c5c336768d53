use anyhow::Context;
use embedded_hal::delay::DelayNs;
use rppal::{hal::Delay, i2c::I2c};

use crate::board::Rgb;

pub const TEXT_ADDRESS: u16 = 0x3e;
pub const BACKLIGHT_ADDRESS: u16 = 0x62;

const CONTROL_COMMAND: u8 = 0x80;
const CONTROL_DATA: u8 = 0x40;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_LEFT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0c;
const CMD_FUNCTION_SET_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSET: u8 = 0x40;

const REG_MODE1: u8 = 0x00;
const REG_MODE2: u8 = 0x01;
const REG_BLUE: u8 = 0x02;
const REG_GREEN: u8 = 0x03;
const REG_RED: u8 = 0x04;
const REG_OUTPUT: u8 = 0x08;
const OUTPUT_ALL_PWM: u8 = 0xaa;

/// JHD1313M1 16x2 character display with RGB backlight.
#[derive(Debug)]
pub struct Lcd {
    text: I2c,
    backlight: I2c,
    delay: Delay,
}

impl Lcd {
    pub fn new() -> Result<Lcd, anyhow::Error> {
        let mut text = I2c::new().context("Failed to initialize I2C")?;
        text.set_slave_address(TEXT_ADDRESS)
            .context("Failed to address LCD text controller")?;

        let mut backlight = I2c::new().context("Failed to initialize I2C")?;
        backlight
            .set_slave_address(BACKLIGHT_ADDRESS)
            .context("Failed to address LCD backlight controller")?;

        Ok(Lcd {
            text,
            backlight,
            delay: Delay,
        })
    }

    pub fn init(&mut self) -> Result<(), anyhow::Error> {
        self.delay.delay_ms(50);
        self.command(CMD_FUNCTION_SET_2LINE)?;
        self.delay.delay_us(100);
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        self.command(CMD_ENTRY_MODE_LEFT)?;

        self.backlight_register(REG_MODE1, 0x00)?;
        self.backlight_register(REG_MODE2, 0x00)?;
        self.backlight_register(REG_OUTPUT, OUTPUT_ALL_PWM)?;

        Ok(())
    }

    pub fn set_cursor(&mut self, row: u8, column: u8) -> Result<(), anyhow::Error> {
        self.command(CMD_SET_DDRAM | (column + row * ROW_OFFSET))
    }

    pub fn write(&mut self, text: &str) -> Result<(), anyhow::Error> {
        for byte in text.bytes() {
            self.text
                .write(&[CONTROL_DATA, byte])
                .context("Failed to write LCD data")?;
        }
        Ok(())
    }

    pub fn set_color(&mut self, color: Rgb) -> Result<(), anyhow::Error> {
        self.backlight_register(REG_RED, color.r)?;
        self.backlight_register(REG_GREEN, color.g)?;
        self.backlight_register(REG_BLUE, color.b)?;
        Ok(())
    }

    fn command(&mut self, command: u8) -> Result<(), anyhow::Error> {
        self.text
            .write(&[CONTROL_COMMAND, command])
            .context("Failed to write LCD command")?;
        Ok(())
    }

    fn backlight_register(&mut self, register: u8, value: u8) -> Result<(), anyhow::Error> {
        self.backlight
            .smbus_write_byte(register, value)
            .context("Failed to write LCD backlight register")
    }
}

pub fn fit_row(text: &str, columns: usize) -> String {
    format!("{text:<columns$.columns$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_row_pads() {
        assert_eq!(fit_row("Temp 68.0 F", 16), "Temp 68.0 F     ");
    }

    #[test]
    fn test_fit_row_truncates() {
        assert_eq!(fit_row("Light 123456.7 lux", 16), "Light 123456.7 l");
    }
}
