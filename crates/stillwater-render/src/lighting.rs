//! Day/night lighting model

use bytemuck::{Pod, Zeroable};

/// Length of one full day/night cycle in seconds of wall-clock time
pub const DAY_CYCLE_SECONDS: f64 = 60.0;

/// Map total elapsed time to a 24-hour time of day
pub fn time_of_day(total_time: f64) -> f64 {
    (total_time % DAY_CYCLE_SECONDS) / DAY_CYCLE_SECONDS * 24.0
}

/// Light uniform buffer data (bind group 2)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightUniforms {
    pub directional_direction: [f32; 3],
    pub directional_intensity: f32,
    pub directional_color: [f32; 4],
    pub ambient_color1: [f32; 4],
    pub ambient_color2: [f32; 4],
    pub ambient_intensity1: f32,
    pub ambient_intensity2: f32,
    pub _pad: [f32; 2],
}

impl LightUniforms {
    /// Compute the lighting state for a 24-hour time of day.
    ///
    /// Dawn (0-6h) ramps the sun and the first ambient up while the second
    /// ambient fades; daytime (6-18h) holds full sun with a warm white
    /// second ambient; dusk (18-24h) fades the sun back out while the second
    /// ambient climbs from half strength.
    pub fn for_time_of_day(time_of_day: f64) -> Self {
        let mut lights = Self {
            directional_direction: [-0.5, 1.0, -0.5],
            directional_color: [1.0, 1.0, 0.8, 1.0], // Light yellow
            ambient_color1: [1.0, 0.0, 0.0, 1.0],    // Red
            ambient_color2: [0.0, 0.0, 1.0, 1.0],    // Blue
            directional_intensity: 0.0,
            ambient_intensity1: 0.0,
            ambient_intensity2: 0.0,
            _pad: [0.0; 2],
        };

        if time_of_day < 6.0 {
            lights.directional_intensity = (time_of_day / 6.0) as f32;
            lights.ambient_intensity1 = (time_of_day / 6.0) as f32;
            lights.ambient_intensity2 = ((6.0 - time_of_day) / 6.0) as f32;
        } else if time_of_day > 18.0 {
            lights.directional_intensity = ((24.0 - time_of_day) / 6.0) as f32;
            lights.ambient_intensity1 = 0.5;
            lights.ambient_intensity2 = (0.5 + ((time_of_day - 18.0) / 6.0) * 0.5) as f32;
        } else {
            lights.directional_intensity = 1.0;
            lights.ambient_intensity1 = 0.5;
            lights.ambient_intensity2 = 1.0;
            lights.ambient_color2 = [1.0, 0.8, 0.8, 1.0]; // Warm white
        }

        lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_every_sixty_seconds() {
        assert!((time_of_day(0.0) - 0.0).abs() < 1e-9);
        assert!((time_of_day(30.0) - 12.0).abs() < 1e-9);
        assert!((time_of_day(60.0) - 0.0).abs() < 1e-9);
        assert!((time_of_day(75.0) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn midnight_has_no_sun() {
        let lights = LightUniforms::for_time_of_day(0.0);
        assert_eq!(lights.directional_intensity, 0.0);
        assert_eq!(lights.ambient_intensity2, 1.0);
    }

    #[test]
    fn noon_has_full_sun_and_warm_ambient() {
        let lights = LightUniforms::for_time_of_day(12.0);
        assert_eq!(lights.directional_intensity, 1.0);
        assert_eq!(lights.ambient_color2, [1.0, 0.8, 0.8, 1.0]);
        assert_eq!(lights.ambient_intensity2, 1.0);
    }

    #[test]
    fn dusk_ramps_the_sun_down() {
        let lights = LightUniforms::for_time_of_day(21.0);
        assert!((lights.directional_intensity - 0.5).abs() < 1e-6);
        assert!((lights.ambient_intensity2 - 0.75).abs() < 1e-6);
        assert_eq!(lights.ambient_color2, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn dawn_ramps_linearly() {
        let lights = LightUniforms::for_time_of_day(3.0);
        assert!((lights.directional_intensity - 0.5).abs() < 1e-6);
        assert!((lights.ambient_intensity1 - 0.5).abs() < 1e-6);
        assert!((lights.ambient_intensity2 - 0.5).abs() < 1e-6);
    }
}
