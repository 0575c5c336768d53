use anyhow::Context;
use rppal::i2c::I2c;

pub const ADDRESS: u16 = 0x04;

pub const REGISTER_PRODUCT_ID: u8 = 0x00;
pub const REGISTER_RAW_BASE: u8 = 0x10;

pub const PRODUCT_ID_RPI_HAT: u16 = 0x0004;
pub const PRODUCT_ID_RPI_ZERO_HAT: u16 = 0x0005;

pub const CHANNELS: u8 = 8;
/// 12-bit converter.
pub const FULL_SCALE: u16 = 4095;

pub const THERMISTOR_B: f64 = 3975.0;
pub const THERMISTOR_R0: f64 = 10_000.0;
pub const MAX_LUX: f64 = 10_000.0;

#[derive(Debug)]
pub struct BaseHat {
    i2c: I2c,
}

impl BaseHat {
    pub fn new() -> Result<BaseHat, anyhow::Error> {
        let mut i2c = I2c::new().context("Failed to initialize I2C")?;
        i2c.set_slave_address(ADDRESS)
            .context("Failed to address Grove Base HAT")?;

        Ok(BaseHat { i2c })
    }

    pub fn product_id(&mut self) -> Result<u16, anyhow::Error> {
        self.i2c
            .smbus_read_word(REGISTER_PRODUCT_ID)
            .context("Failed to read Grove Base HAT product id")
    }

    pub fn read_raw(&mut self, channel: u8) -> Result<u16, anyhow::Error> {
        if channel >= CHANNELS {
            return Err(anyhow::anyhow!(
                "Invalid channel: expected 0..{}, got {}",
                CHANNELS,
                channel
            ));
        }

        let raw = self
            .i2c
            .smbus_read_word(REGISTER_RAW_BASE + channel)
            .with_context(|| format!("Failed to read analog channel {channel}"))?;

        Ok(raw.min(FULL_SCALE))
    }
}

pub fn is_supported_product(product_id: u16) -> bool {
    matches!(product_id, PRODUCT_ID_RPI_HAT | PRODUCT_ID_RPI_ZERO_HAT)
}

/// Grove temperature sensor: NTC thermistor in a divider against R0.
pub fn thermistor_celsius(raw: u16) -> Result<f64, anyhow::Error> {
    if raw == 0 || raw >= FULL_SCALE {
        return Err(anyhow::anyhow!(
            "Thermistor reading out of range: {}",
            raw
        ));
    }

    let raw = f64::from(raw);
    let resistance = (f64::from(FULL_SCALE) - raw) * THERMISTOR_R0 / raw;
    let kelvin = 1.0 / ((resistance / THERMISTOR_R0).ln() / THERMISTOR_B + 1.0 / 298.15);

    Ok(kelvin - 273.15)
}

/// Grove light sensor: photoresistor resistance mapped onto an approximate lux curve.
pub fn light_lux(raw: u16) -> f64 {
    if raw == 0 {
        return 0.0;
    }
    if raw >= FULL_SCALE {
        return MAX_LUX;
    }

    let raw = f64::from(raw);
    let resistance_k = (f64::from(FULL_SCALE) - raw) * 10.0 / raw;
    let lux = 10_000.0 / (resistance_k * 15.0).powf(4.0 / 3.0);

    lux.min(MAX_LUX)
}

pub fn rotary_degrees(raw: u16, full_travel_deg: f64) -> f64 {
    f64::from(raw.min(FULL_SCALE)) * full_travel_deg / f64::from(FULL_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thermistor_at_reference_point() {
        // resistance equals R0 exactly when the divider sits at mid scale
        let raw = (FULL_SCALE + 1) / 2;
        let celsius = thermistor_celsius(raw).unwrap();
        assert!((celsius - 25.0).abs() < 0.1, "{celsius}");
    }

    #[test]
    fn test_thermistor_warmer_reads_higher() {
        let cold = thermistor_celsius(1500).unwrap();
        let warm = thermistor_celsius(2500).unwrap();
        assert!(warm > cold);
    }

    #[test]
    fn test_thermistor_rejects_rails() {
        assert!(thermistor_celsius(0).is_err());
        assert!(thermistor_celsius(FULL_SCALE).is_err());
    }

    #[test]
    fn test_light_lux_saturates() {
        assert_eq!(light_lux(0), 0.0);
        assert_eq!(light_lux(FULL_SCALE), MAX_LUX);
        assert!(light_lux(1000) < light_lux(3000));
    }

    #[test]
    fn test_rotary_degrees() {
        assert_eq!(rotary_degrees(0, 300.0), 0.0);
        assert_eq!(rotary_degrees(FULL_SCALE, 300.0), 300.0);
        assert_eq!(rotary_degrees(u16::MAX, 300.0), 300.0);
    }

    #[test]
    fn test_is_supported_product() {
        assert!(is_supported_product(PRODUCT_ID_RPI_HAT));
        assert!(is_supported_product(PRODUCT_ID_RPI_ZERO_HAT));
        assert!(!is_supported_product(0xffff));
    }
}
