use anyhow::Context;
use rppal::system::{DeviceInfo, Model};

use crate::base_hat::{self, BaseHat};

/// Confirms we are on a 40-pin Raspberry Pi carrying a Grove Base HAT.
pub fn check(hat: &mut BaseHat) -> Result<Model, anyhow::Error> {
    let info = DeviceInfo::new().context("Failed to identify the board")?;
    let model = info.model();
    if !is_supported_model(model) {
        return Err(anyhow::anyhow!("Unsupported board: {:?}", model));
    }

    let product_id = hat.product_id()?;
    if !base_hat::is_supported_product(product_id) {
        return Err(anyhow::anyhow!(
            "Unsupported HAT: product id {:#06x}",
            product_id
        ));
    }

    Ok(model)
}

/// The first boards only have the 26-pin header the HAT cannot sit on.
pub fn is_supported_model(model: Model) -> bool {
    !matches!(
        model,
        Model::RaspberryPiA | Model::RaspberryPiBRev1 | Model::RaspberryPiBRev2
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_model() {
        assert!(is_supported_model(Model::RaspberryPi4B));
        assert!(is_supported_model(Model::RaspberryPi3BPlus));
        assert!(!is_supported_model(Model::RaspberryPiA));
        assert!(!is_supported_model(Model::RaspberryPiBRev2));
    }
}
