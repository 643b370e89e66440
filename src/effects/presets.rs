//! Named parameter sets. Unknown names (including "default") yield the
//! effect's defaults.

use super::{ElectricParams, FireParams, LavaParams, PlasmaParams, WaterParams};
use crate::color::Color;

pub const LAVA_PRESETS: &[&str] = &["default", "fast", "slow", "intense"];
pub const WATER_PRESETS: &[&str] = &["default", "ocean", "tropical", "stormy"];
pub const FIRE_PRESETS: &[&str] = &["default", "hot", "cold", "magical"];
pub const PLASMA_PRESETS: &[&str] = &["default", "rainbow", "electric", "alien"];
pub const ELECTRIC_PRESETS: &[&str] = &["default", "lightning", "energy", "magic"];

pub fn lava_preset(name: &str) -> LavaParams {
    let base = LavaParams::default();
    match name {
        "fast" => LavaParams {
            scroll_speed_u: 0.2,
            scroll_speed_v: 0.1,
            pulse_frequency: 2.0,
            glow_intensity: 3.0,
            ..base
        },
        "slow" => LavaParams {
            scroll_speed_u: 0.05,
            scroll_speed_v: 0.025,
            pulse_frequency: 0.5,
            glow_intensity: 1.5,
            ..base
        },
        "intense" => LavaParams {
            base_color: Color::rgb(200, 50, 0),
            hot_color: Color::rgb(255, 200, 50),
            noise_scale: 4.0,
            glow_intensity: 4.0,
            pulse_frequency: 3.0,
            ..base
        },
        _ => base,
    }
}

pub fn water_preset(name: &str) -> WaterParams {
    let base = WaterParams::default();
    match name {
        "ocean" => WaterParams {
            deep_color: Color::rgb(0, 30, 100),
            shallow_color: Color::rgb(0, 100, 200),
            wave_speed: 0.5,
            wave_scale: 2.0,
            foam_amount: 0.1,
            ..base
        },
        "tropical" => WaterParams {
            deep_color: Color::rgb(0, 50, 150),
            shallow_color: Color::rgb(50, 200, 255),
            wave_speed: 1.2,
            wave_scale: 6.0,
            foam_amount: 0.4,
            caustic_strength: 0.8,
            ..base
        },
        "stormy" => WaterParams {
            deep_color: Color::rgb(20, 30, 40),
            shallow_color: Color::rgb(60, 80, 100),
            wave_speed: 2.0,
            wave_scale: 8.0,
            foam_amount: 0.6,
            ..base
        },
        _ => base,
    }
}

pub fn fire_preset(name: &str) -> FireParams {
    let base = FireParams::default();
    match name {
        "hot" => FireParams {
            inner_color: Color::rgb(255, 255, 200),
            outer_color: Color::rgb(255, 100, 0),
            intensity: 1.5,
            turbulence: 3.0,
            ..base
        },
        "cold" => FireParams {
            inner_color: Color::rgb(200, 200, 255),
            outer_color: Color::rgb(100, 150, 255),
            intensity: 1.0,
            turbulence: 1.5,
            ..base
        },
        "magical" => FireParams {
            inner_color: Color::rgb(255, 200, 255),
            outer_color: Color::rgb(150, 0, 255),
            intensity: 1.2,
            turbulence: 2.5,
            wind_strength: 0.05,
            ..base
        },
        _ => base,
    }
}

pub fn plasma_preset(name: &str) -> PlasmaParams {
    let base = PlasmaParams::default();
    match name {
        "rainbow" => PlasmaParams {
            color1: Color::rgb(255, 0, 0),
            color2: Color::rgb(0, 255, 0),
            color3: Color::rgb(0, 0, 255),
            speed: 0.8,
            ..base
        },
        "electric" => PlasmaParams {
            color1: Color::rgb(255, 255, 255),
            color2: Color::rgb(100, 100, 255),
            color3: Color::rgb(200, 200, 255),
            frequency1: 4.0,
            frequency2: 6.0,
            frequency3: 8.0,
            speed: 2.0,
            ..base
        },
        "alien" => PlasmaParams {
            color1: Color::rgb(0, 255, 0),
            color2: Color::rgb(255, 0, 255),
            color3: Color::rgb(255, 255, 0),
            frequency1: 1.5,
            frequency2: 2.5,
            frequency3: 3.5,
            speed: 0.6,
            ..base
        },
        _ => base,
    }
}

pub fn electric_preset(name: &str) -> ElectricParams {
    let base = ElectricParams::default();
    match name {
        "lightning" => ElectricParams {
            bolt_color: Color::rgb(255, 255, 255),
            glow_color: Color::rgb(150, 150, 255),
            bolt_frequency: 12.0,
            intensity: 2.0,
            flicker_speed: 15.0,
            ..base
        },
        "energy" => ElectricParams {
            bolt_color: Color::rgb(0, 255, 255),
            glow_color: Color::rgb(0, 150, 200),
            bolt_frequency: 6.0,
            intensity: 1.5,
            flicker_speed: 8.0,
            glow_radius: 0.15,
            ..base
        },
        "magic" => ElectricParams {
            bolt_color: Color::rgb(255, 100, 255),
            glow_color: Color::rgb(200, 0, 200),
            bolt_frequency: 4.0,
            intensity: 1.2,
            flicker_speed: 5.0,
            glow_radius: 0.2,
            ..base
        },
        _ => base,
    }
}
