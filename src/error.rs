#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Unsupported platform, exiting: {0:#}")]
    UnsupportedPlatform(anyhow::Error),
    #[error("Can't create all devices, exiting: {0:#}")]
    Device(anyhow::Error),
    #[error("Connection to telemetry collector at {endpoint} failed, exiting: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::UnsupportedPlatform(_) => 10,
            StartupError::Device(_) => 99,
            StartupError::Network { .. } => 98,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            StartupError::UnsupportedPlatform(anyhow::anyhow!("no HAT")).exit_code(),
            StartupError::Device(anyhow::anyhow!("no LCD")).exit_code(),
            StartupError::Network {
                endpoint: "localhost:41234".to_string(),
                source: std::io::Error::other("refused"),
            }
            .exit_code(),
        ];

        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
        assert!(codes.iter().all(|&code| code != 0));
    }

    #[test]
    fn test_message_includes_cause() {
        let e = StartupError::Device(anyhow::anyhow!("no LCD").context("Failed to initialize LCD"));
        assert_eq!(
            e.to_string(),
            "Can't create all devices, exiting: Failed to initialize LCD: no LCD"
        );
    }
}
