use crate::config::GameConfig;

/// Sine-driven breathing and rocking, used by the title logo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseAndTilt {
    pub pulse_speed: f32,
    pub scale_amount: f32,
    pub tilt_speed: f32,
    pub tilt_amount: f32,
}

impl PulseAndTilt {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            pulse_speed: config.pulse_speed,
            scale_amount: config.pulse_amount,
            tilt_speed: config.tilt_speed,
            tilt_amount: config.tilt_amount,
        }
    }

    /// Scale factor around 1.0 at time `t` seconds.
    pub fn scale(&self, t: f32) -> f32 {
        1.0 + (t * self.pulse_speed).sin() * self.scale_amount
    }

    /// Tilt in degrees at time `t` seconds.
    pub fn tilt(&self, t: f32) -> f32 {
        (t * self.tilt_speed).sin() * self.tilt_amount
    }
}
