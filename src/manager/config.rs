//! JSON configuration for the scheduler and the demo driver

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EffectManager, FrameSchedule, DEFAULT_MAX_EFFECTS_PER_FRAME};
use crate::effects::presets::{
    electric_preset, fire_preset, lava_preset, plasma_preset, water_preset,
};
use crate::effects::{
    AnimatedEffect, ElectricParams, EnergyParams, FireParams, LavaParams, PlasmaParams,
    SwirlParams, WaterParams,
};
use crate::error::ConfigError;
use crate::texture::TextureHandle;

/// Scheduler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub max_effects_per_frame: usize,
    pub global_time_scale: f32,
    pub schedule: FrameSchedule,
    /// Update interval given to newly registered entries, seconds
    pub default_update_interval: f32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_effects_per_frame: DEFAULT_MAX_EFFECTS_PER_FRAME,
            global_time_scale: 1.0,
            schedule: FrameSchedule::FirstN,
            default_update_interval: 0.0,
        }
    }
}

impl ManagerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.global_time_scale.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "global_time_scale must be finite (got {})",
                self.global_time_scale
            )));
        }
        if !self.default_update_interval.is_finite() || self.default_update_interval < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_update_interval must be a non-negative number (got {})",
                self.default_update_interval
            )));
        }
        Ok(())
    }
}

/// Where an effect's parameters come from: a named preset, explicit
/// parameters, or neither (defaults). Also carries per-entry scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSource<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
    #[serde(default = "unit_scale")]
    pub time_scale: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<f32>,
}

fn unit_scale() -> f32 {
    1.0
}

impl<P> Default for EffectSource<P> {
    fn default() -> Self {
        Self {
            preset: None,
            params: None,
            time_scale: 1.0,
            update_interval: None,
        }
    }
}

impl<P: Clone + Default> EffectSource<P> {
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn params(params: P) -> Self {
        Self {
            params: Some(params),
            ..Self::default()
        }
    }

    /// Explicit params, else the preset through `lookup`, else defaults
    fn resolve(&self, lookup: Option<fn(&str) -> P>) -> P {
        match (&self.params, &self.preset, lookup) {
            (Some(params), _, _) => params.clone(),
            (None, Some(name), Some(lookup)) => lookup(name),
            _ => P::default(),
        }
    }

    /// Stricter than the preset lookups: a name the lookup would quietly
    /// map to defaults is an error here, so a typo in a document surfaces
    /// at load time.
    fn validate(&self, kind: &str, presets: Option<&[&str]>) -> Result<(), ConfigError> {
        if self.preset.is_some() && self.params.is_some() {
            return Err(ConfigError::Invalid(format!(
                "{kind}: give either a preset or params, not both"
            )));
        }
        if let Some(name) = &self.preset {
            match presets {
                None => {
                    return Err(ConfigError::Invalid(format!("{kind} has no presets")));
                },
                Some(known) if !known.contains(&name.as_str()) => {
                    return Err(ConfigError::Invalid(format!(
                        "unknown {kind} preset {name:?} (expected one of {known:?})"
                    )));
                },
                Some(_) => {},
            }
        }
        if !self.time_scale.is_finite() {
            return Err(ConfigError::Invalid(format!("{kind}: time_scale must be finite")));
        }
        if self.update_interval.is_some_and(|i| !i.is_finite() || i < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "{kind}: update_interval must be a non-negative number"
            )));
        }
        Ok(())
    }

    fn register(&self, manager: &mut EffectManager, texture: &TextureHandle, lookup: Option<fn(&str) -> P>)
    where
        P: AnimatedEffect,
    {
        manager.register_effect(texture, &self.resolve(lookup));
        manager.set_effect_time_scale(texture, self.time_scale);
        if let Some(interval) = self.update_interval {
            manager.set_effect_update_interval(texture, interval);
        }
    }
}

/// One animated effect to register, tagged by `"kind"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    Lava(EffectSource<LavaParams>),
    Water(EffectSource<WaterParams>),
    Fire(EffectSource<FireParams>),
    Plasma(EffectSource<PlasmaParams>),
    Electric(EffectSource<ElectricParams>),
    Energy(EffectSource<EnergyParams>),
    Swirl(EffectSource<SwirlParams>),
}

impl EffectSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lava(_) => "lava",
            Self::Water(_) => "water",
            Self::Fire(_) => "fire",
            Self::Plasma(_) => "plasma",
            Self::Electric(_) => "electric",
            Self::Energy(_) => "energy",
            Self::Swirl(_) => "swirl",
        }
    }

    /// Rejects unknown preset names, presets on effects that have none,
    /// preset and params given together, and non-finite scheduling values.
    /// [`register`](Self::register) on an unvalidated spec still falls back
    /// to default parameters for an unknown name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use crate::effects::presets::{
            ELECTRIC_PRESETS, FIRE_PRESETS, LAVA_PRESETS, PLASMA_PRESETS, WATER_PRESETS,
        };
        let kind = self.kind();
        match self {
            Self::Lava(s) => s.validate(kind, Some(LAVA_PRESETS)),
            Self::Water(s) => s.validate(kind, Some(WATER_PRESETS)),
            Self::Fire(s) => s.validate(kind, Some(FIRE_PRESETS)),
            Self::Plasma(s) => s.validate(kind, Some(PLASMA_PRESETS)),
            Self::Electric(s) => s.validate(kind, Some(ELECTRIC_PRESETS)),
            Self::Energy(s) => s.validate(kind, None),
            Self::Swirl(s) => s.validate(kind, None),
        }
    }

    /// Register this effect against `texture`
    pub fn register(&self, manager: &mut EffectManager, texture: &TextureHandle) {
        match self {
            Self::Lava(s) => s.register(manager, texture, Some(lava_preset)),
            Self::Water(s) => s.register(manager, texture, Some(water_preset)),
            Self::Fire(s) => s.register(manager, texture, Some(fire_preset)),
            Self::Plasma(s) => s.register(manager, texture, Some(plasma_preset)),
            Self::Electric(s) => s.register(manager, texture, Some(electric_preset)),
            Self::Energy(s) => s.register(manager, texture, None),
            Self::Swirl(s) => s.register(manager, texture, None),
        }
    }
}

/// Settings for the headless demo binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    /// Seconds of simulated time per frame
    pub delta_time: f32,
    pub manager: ManagerConfig,
    pub effects: Vec<EffectSpec>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            frames: 120,
            delta_time: 1.0 / 60.0,
            manager: ManagerConfig::default(),
            effects: vec![
                EffectSpec::Lava(EffectSource::preset("fast")),
                EffectSpec::Water(EffectSource::preset("tropical")),
                EffectSpec::Fire(EffectSource::default()),
                EffectSpec::Plasma(EffectSource::preset("rainbow")),
                EffectSpec::Electric(EffectSource::preset("lightning")),
                EffectSpec::Energy(EffectSource::default()),
                EffectSpec::Swirl(EffectSource::default()),
            ],
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "texture size must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if !self.delta_time.is_finite() || self.delta_time < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "delta_time must be a non-negative number (got {})",
                self.delta_time
            )));
        }
        self.manager.validate()?;
        self.effects.iter().try_for_each(EffectSpec::validate)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
