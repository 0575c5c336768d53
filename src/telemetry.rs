use std::net::UdpSocket;

use anyhow::Context;
use serde::Serialize;

/// One message for the collector: `{"n":"<component>","v":<value>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation<'a> {
    pub n: &'a str,
    pub v: f64,
}

impl<'a> Observation<'a> {
    pub fn new(component: &'a str, value: f64) -> Observation<'a> {
        Observation {
            n: component,
            v: value,
        }
    }

    pub fn to_line(&self) -> Result<Vec<u8>, anyhow::Error> {
        let mut line = serde_json::to_vec(self).context("Failed to encode observation")?;
        line.push(b'\n');
        Ok(line)
    }
}

pub trait TelemetrySink {
    fn send(&mut self, observation: &Observation<'_>) -> Result<(), anyhow::Error>;
}

#[derive(Debug)]
pub struct UdpTelemetry {
    socket: UdpSocket,
}

impl UdpTelemetry {
    pub fn connect(endpoint: &str) -> Result<UdpTelemetry, std::io::Error> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect(endpoint)?;

        Ok(UdpTelemetry { socket })
    }
}

impl TelemetrySink for UdpTelemetry {
    fn send(&mut self, observation: &Observation<'_>) -> Result<(), anyhow::Error> {
        let line = observation.to_line()?;
        self.socket
            .send(&line)
            .with_context(|| format!("Failed to send {} to collector", observation.n))?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_line() {
        let line = Observation::new("temp", 20.0).to_line().unwrap();
        assert_eq!(line, b"{\"n\":\"temp\",\"v\":20.0}\n");
    }

    #[test]
    fn test_udp_telemetry_delivers_datagram() {
        let collector = UdpSocket::bind("127.0.0.1:0").unwrap();
        let endpoint = collector.local_addr().unwrap().to_string();

        let mut telemetry = UdpTelemetry::connect(&endpoint).unwrap();
        telemetry.send(&Observation::new("light", 312.5)).unwrap();

        let mut buf = [0u8; 64];
        let len = collector.recv(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"{\"n\":\"light\",\"v\":312.5}\n");
    }
}
