use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    Do,
    Re,
    Mi,
    Fa,
    Sol,
    La,
    Si,
}

impl Note {
    pub const fn period_us(self) -> u32 {
        match self {
            Note::Do => 3800,
            Note::Re => 3400,
            Note::Mi => 3000,
            Note::Fa => 2900,
            Note::Sol => 2550,
            Note::La => 2270,
            Note::Si => 2000,
        }
    }

    pub fn frequency_hz(self) -> f64 {
        1_000_000.0 / f64::from(self.period_us())
    }
}

pub trait Board {
    fn read_temperature(&mut self) -> Result<f64, anyhow::Error>;
    fn read_light(&mut self) -> Result<f64, anyhow::Error>;
    fn read_loudness(&mut self) -> Result<f64, anyhow::Error>;
    fn read_button(&mut self) -> Result<bool, anyhow::Error>;
    fn read_knob_angle(&mut self) -> Result<f64, anyhow::Error>;

    fn set_display_text(&mut self, row: u8, text: &str) -> Result<(), anyhow::Error>;
    fn set_display_color(&mut self, color: Rgb) -> Result<(), anyhow::Error>;
    fn set_led(&mut self, on: bool) -> Result<(), anyhow::Error>;

    /// Blocks for the whole `duration`.
    fn play_tone(&mut self, note: Note, duration: Duration) -> Result<(), anyhow::Error>;
    fn set_servo_angle(&mut self, degrees: u16) -> Result<(), anyhow::Error>;

    fn delay(&mut self, duration: Duration);
}

#[cfg(test)]
pub mod fake {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        Text(u8, String),
        Color(Rgb),
        Led(bool),
        Tone(Note, Duration),
        Servo(u16),
        Delay(Duration),
    }

    #[derive(Debug, Default)]
    pub struct FakeBoard {
        pub temperature_c: f64,
        pub lux: f64,
        pub loudness: f64,
        pub button: bool,
        pub knob_deg: f64,
        pub fail_reads: bool,
        pub fail_writes: bool,
        pub events: Vec<Event>,
    }

    impl FakeBoard {
        pub fn tones(&self) -> Vec<Note> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Tone(note, _) => Some(*note),
                    _ => None,
                })
                .collect()
        }

        pub fn last_text(&self, row: u8) -> Option<&str> {
            self.events.iter().rev().find_map(|e| match e {
                Event::Text(r, text) if *r == row => Some(text.as_str()),
                _ => None,
            })
        }

        pub fn last_color(&self) -> Option<Rgb> {
            self.events.iter().rev().find_map(|e| match e {
                Event::Color(c) => Some(*c),
                _ => None,
            })
        }

        fn read(&self, value: f64) -> Result<f64, anyhow::Error> {
            if self.fail_reads {
                return Err(anyhow::anyhow!("sensor unplugged"));
            }
            Ok(value)
        }

        fn write(&mut self, event: Event) -> Result<(), anyhow::Error> {
            if self.fail_writes {
                return Err(anyhow::anyhow!("device unplugged"));
            }
            self.events.push(event);
            Ok(())
        }
    }

    impl Board for FakeBoard {
        fn read_temperature(&mut self) -> Result<f64, anyhow::Error> {
            self.read(self.temperature_c)
        }

        fn read_light(&mut self) -> Result<f64, anyhow::Error> {
            self.read(self.lux)
        }

        fn read_loudness(&mut self) -> Result<f64, anyhow::Error> {
            self.read(self.loudness)
        }

        fn read_button(&mut self) -> Result<bool, anyhow::Error> {
            Ok(self.button)
        }

        fn read_knob_angle(&mut self) -> Result<f64, anyhow::Error> {
            self.read(self.knob_deg)
        }

        fn set_display_text(&mut self, row: u8, text: &str) -> Result<(), anyhow::Error> {
            self.write(Event::Text(row, text.to_string()))
        }

        fn set_display_color(&mut self, color: Rgb) -> Result<(), anyhow::Error> {
            self.write(Event::Color(color))
        }

        fn set_led(&mut self, on: bool) -> Result<(), anyhow::Error> {
            self.write(Event::Led(on))
        }

        fn play_tone(&mut self, note: Note, duration: Duration) -> Result<(), anyhow::Error> {
            self.write(Event::Tone(note, duration))
        }

        fn set_servo_angle(&mut self, degrees: u16) -> Result<(), anyhow::Error> {
            self.write(Event::Servo(degrees))
        }

        fn delay(&mut self, duration: Duration) {
            self.events.push(Event::Delay(duration));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_frequency() {
        assert_eq!(Note::Si.frequency_hz(), 500.0);
        assert!(Note::Do.frequency_hz() < Note::Re.frequency_hz());
    }
}
