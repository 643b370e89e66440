//! Effect scheduler
//!
//! [`EffectManager`] owns a registry of (texture, update callback) entries
//! and drives them from a single `update(dt)` call per frame. It is a plain
//! value: the application constructs one and passes it to whatever needs to
//! register effects.

mod config;
mod schedule;

pub use config::{DemoConfig, EffectSource, EffectSpec, ManagerConfig};
pub use schedule::FrameSchedule;

use std::time::Instant;

use tracing::{debug, warn};

use crate::effects::{
    AnimatedEffect, ElectricParams, EnergyParams, FireParams, LavaParams, PlasmaParams,
    SwirlParams, WaterParams,
};
use crate::error::EffectFault;
use crate::texture::TextureHandle;

/// Default cap on entries visited per update
pub const DEFAULT_MAX_EFFECTS_PER_FRAME: usize = 10;

/// Smoothing factor of the update-cost moving average
const COST_SMOOTHING: f32 = 0.1;

/// Per-entry update callback: receives the texture and the entry's time
pub type UpdateFn = Box<dyn FnMut(&TextureHandle, f32) -> Result<(), EffectFault>>;

struct EffectEntry {
    texture: TextureHandle,
    update: UpdateFn,
    label: String,
    paused: bool,
    time_scale: f32,
    last_update_time: f32,
    /// Seconds of global time between updates; 0 = every frame
    update_interval: f32,
}

impl EffectEntry {
    fn is_due(&self, now: f32) -> bool {
        self.update_interval <= 0.0 || now - self.last_update_time >= self.update_interval
    }

    fn info(&self) -> EffectInfo {
        EffectInfo {
            label: self.label.clone(),
            paused: self.paused,
            time_scale: self.time_scale,
            update_interval: self.update_interval,
            last_update_time: self.last_update_time,
        }
    }
}

/// Read-only view of one registry entry
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInfo {
    pub label: String,
    pub paused: bool,
    pub time_scale: f32,
    pub update_interval: f32,
    /// Global time of the last successful update (registration time before
    /// the first one)
    pub last_update_time: f32,
}

pub struct EffectManager {
    effects: Vec<EffectEntry>,
    global_time: f32,
    time_scale: f32,
    max_effects_per_frame: usize,
    default_update_interval: f32,
    schedule: FrameSchedule,
    cursor: usize,

    average_update_time_ms: f32,
    updates_this_frame: usize,
    frame_count: u64,
}

impl Default for EffectManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectManager {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
            global_time: 0.0,
            time_scale: 1.0,
            max_effects_per_frame: DEFAULT_MAX_EFFECTS_PER_FRAME,
            default_update_interval: 0.0,
            schedule: FrameSchedule::default(),
            cursor: 0,
            average_update_time_ms: 0.0,
            updates_this_frame: 0,
            frame_count: 0,
        }
    }

    pub fn with_config(config: &ManagerConfig) -> Self {
        Self {
            time_scale: config.global_time_scale,
            max_effects_per_frame: config.max_effects_per_frame,
            default_update_interval: config.default_update_interval.max(0.0),
            schedule: config.schedule,
            ..Self::new()
        }
    }

    /// Advance global time by `dt · global_time_scale` and run the entries
    /// this frame's schedule selects.
    ///
    /// Paused entries and entries whose interval has not elapsed still take
    /// one of the frame's slots. A callback that returns an [`EffectFault`]
    /// is unregistered; the rest of the frame runs normally.
    pub fn update(&mut self, dt: f32) {
        let start = Instant::now();

        self.global_time += dt * self.time_scale;
        self.updates_this_frame = 0;
        self.frame_count += 1;
        self.drop_released();

        let now = self.global_time;
        let mut faulted = Vec::new();
        let visits = self
            .schedule
            .visits(self.effects.len(), self.max_effects_per_frame, self.cursor);
        let mut visited = 0;

        for index in visits {
            visited += 1;
            let entry = &mut self.effects[index];
            if entry.paused || !entry.is_due(now) {
                continue;
            }
            match (entry.update)(&entry.texture, now * entry.time_scale) {
                Ok(()) => {
                    entry.last_update_time = now;
                    self.updates_this_frame += 1;
                },
                Err(fault) => {
                    warn!(texture = ?entry.texture.id(), label = %entry.label, %fault, "removing faulted effect");
                    faulted.push(index);
                },
            }
        }
        self.cursor = self.cursor.wrapping_add(visited);

        if !faulted.is_empty() {
            let mut index = 0;
            self.effects.retain(|_| {
                let keep = !faulted.contains(&index);
                index += 1;
                keep
            });
        }

        let sample = start.elapsed().as_secs_f32() * 1000.0;
        self.average_update_time_ms =
            self.average_update_time_ms * (1.0 - COST_SMOOTHING) + sample * COST_SMOOTHING;
    }

    /// Remove entries whose texture the resource layer has released
    fn drop_released(&mut self) {
        self.effects.retain(|entry| {
            if entry.texture.is_released() {
                warn!(texture = ?entry.texture.id(), label = %entry.label, "dropping effect for released texture");
                false
            } else {
                true
            }
        });
    }

    fn find_mut(&mut self, texture: &TextureHandle) -> Option<&mut EffectEntry> {
        self.effects.iter_mut().find(|e| e.texture.ptr_eq(texture))
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register `update` against `texture` under `label`, replacing any
    /// entry already bound to the same texture.
    pub fn register_custom_effect<F>(&mut self, texture: &TextureHandle, update: F, label: impl Into<String>)
    where
        F: FnMut(&TextureHandle, f32) -> Result<(), EffectFault> + 'static,
    {
        let label = label.into();
        if self.unregister_effect(texture) {
            debug!(texture = ?texture.id(), %label, "replacing effect");
        } else {
            debug!(texture = ?texture.id(), %label, "registering effect");
        }
        self.effects.push(EffectEntry {
            texture: texture.clone(),
            update: Box::new(update),
            label,
            paused: false,
            time_scale: 1.0,
            last_update_time: self.global_time,
            update_interval: self.default_update_interval,
        });
    }

    /// Register any animated effect. The parameters are copied; every update
    /// renders the copy at the entry's current time.
    pub fn register_effect<E: AnimatedEffect>(&mut self, texture: &TextureHandle, params: &E) {
        let params = params.clone();
        let label = params.label();
        self.register_custom_effect(
            texture,
            move |target, time| {
                params.with_time(time).render(target);
                Ok(())
            },
            label,
        );
    }

    pub fn register_lava_effect(&mut self, texture: &TextureHandle, params: &LavaParams) {
        self.register_effect(texture, params);
    }

    pub fn register_water_effect(&mut self, texture: &TextureHandle, params: &WaterParams) {
        self.register_effect(texture, params);
    }

    pub fn register_fire_effect(&mut self, texture: &TextureHandle, params: &FireParams) {
        self.register_effect(texture, params);
    }

    pub fn register_plasma_effect(&mut self, texture: &TextureHandle, params: &PlasmaParams) {
        self.register_effect(texture, params);
    }

    pub fn register_electric_effect(&mut self, texture: &TextureHandle, params: &ElectricParams) {
        self.register_effect(texture, params);
    }

    pub fn register_energy_effect(&mut self, texture: &TextureHandle, params: &EnergyParams) {
        self.register_effect(texture, params);
    }

    pub fn register_swirl_effect(&mut self, texture: &TextureHandle, params: &SwirlParams) {
        self.register_effect(texture, params);
    }

    /// Returns whether an entry was removed
    pub fn unregister_effect(&mut self, texture: &TextureHandle) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| !e.texture.ptr_eq(texture));
        let removed = self.effects.len() != before;
        if removed {
            debug!(texture = ?texture.id(), "unregistered effect");
        }
        removed
    }

    pub fn unregister_all_effects(&mut self) {
        debug!(count = self.effects.len(), "unregistering all effects");
        self.effects.clear();
    }

    // ========================================================================
    // Per-entry control
    // ========================================================================

    pub fn pause_effect(&mut self, texture: &TextureHandle) {
        if let Some(entry) = self.find_mut(texture) {
            entry.paused = true;
        }
    }

    pub fn resume_effect(&mut self, texture: &TextureHandle) {
        if let Some(entry) = self.find_mut(texture) {
            entry.paused = false;
        }
    }

    /// Multiplier applied to global time before it reaches this entry
    pub fn set_effect_time_scale(&mut self, texture: &TextureHandle, scale: f32) {
        if let Some(entry) = self.find_mut(texture) {
            entry.time_scale = scale;
        }
    }

    /// Minimum global time between two updates of this entry; 0 = every frame
    pub fn set_effect_update_interval(&mut self, texture: &TextureHandle, interval: f32) {
        if let Some(entry) = self.find_mut(texture) {
            entry.update_interval = interval.max(0.0);
        }
    }

    // ========================================================================
    // Global settings
    // ========================================================================

    pub fn set_global_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    pub fn set_max_effects_per_frame(&mut self, max: usize) {
        self.max_effects_per_frame = max;
    }

    pub fn set_schedule(&mut self, schedule: FrameSchedule) {
        self.schedule = schedule;
    }

    /// Update rate for entries registered from now on. `hz <= 0` means
    /// every frame.
    pub fn set_update_frequency(&mut self, hz: f32) {
        self.default_update_interval = if hz > 0.0 { 1.0 / hz } else { 0.0 };
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn has_effect(&self, texture: &TextureHandle) -> bool {
        self.effects.iter().any(|e| e.texture.ptr_eq(texture))
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn effect_info(&self, texture: &TextureHandle) -> Option<EffectInfo> {
        self.effects
            .iter()
            .find(|e| e.texture.ptr_eq(texture))
            .map(EffectEntry::info)
    }

    /// Registered textures in registration order, paused ones included
    pub fn active_textures(&self) -> Vec<TextureHandle> {
        self.effects.iter().map(|e| e.texture.clone()).collect()
    }

    pub fn global_time(&self) -> f32 {
        self.global_time
    }

    pub fn global_time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn max_effects_per_frame(&self) -> usize {
        self.max_effects_per_frame
    }

    pub fn schedule(&self) -> FrameSchedule {
        self.schedule
    }

    /// Callbacks that ran successfully during the last `update`
    pub fn updates_this_frame(&self) -> usize {
        self.updates_this_frame
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Exponentially smoothed wall-clock cost of `update`, milliseconds
    pub fn average_update_time_ms(&self) -> f32 {
        self.average_update_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn tex() -> TextureHandle {
        TextureHandle::new(4, 4).unwrap()
    }

    /// Callback that counts its calls and records the times it saw
    fn counter(manager: &mut EffectManager, target: &TextureHandle) -> Rc<RefCell<Vec<f32>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        manager.register_custom_effect(
            target,
            move |_, t| {
                log.borrow_mut().push(t);
                Ok(())
            },
            "counter",
        );
        seen
    }

    #[test]
    fn defaults() {
        let m = EffectManager::new();
        assert_eq!(m.max_effects_per_frame(), 10);
        assert_eq!(m.global_time_scale(), 1.0);
        assert_eq!(m.schedule(), FrameSchedule::FirstN);
        assert_eq!(m.effect_count(), 0);
    }

    #[test]
    fn global_time_advances_with_scale() {
        let mut m = EffectManager::new();
        m.update(0.5);
        m.set_global_time_scale(2.0);
        m.update(0.25);
        assert!((m.global_time() - 1.0).abs() < 1e-6);
        assert_eq!(m.frame_count(), 2);
    }

    #[test]
    fn callback_receives_scaled_time() {
        let mut m = EffectManager::new();
        let t = tex();
        let seen = counter(&mut m, &t);
        m.set_effect_time_scale(&t, 3.0);
        m.update(0.5);
        assert_eq!(*seen.borrow(), vec![1.5]);
        assert_eq!(m.effect_info(&t).unwrap().last_update_time, 0.5);
    }

    #[test]
    fn cap_limits_callbacks_per_frame() {
        let mut m = EffectManager::new();
        m.set_max_effects_per_frame(3);
        let textures: Vec<_> = (0..5).map(|_| tex()).collect();
        let logs: Vec<_> = textures.iter().map(|t| counter(&mut m, t)).collect();
        m.update(0.1);
        assert_eq!(m.updates_this_frame(), 3);
        let ran: Vec<_> = logs.iter().map(|l| l.borrow().len()).collect();
        assert_eq!(ran, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn paused_entries_still_consume_slots() {
        let mut m = EffectManager::new();
        m.set_max_effects_per_frame(2);
        let textures: Vec<_> = (0..3).map(|_| tex()).collect();
        let logs: Vec<_> = textures.iter().map(|t| counter(&mut m, t)).collect();
        m.pause_effect(&textures[0]);
        m.update(0.1);
        assert_eq!(m.updates_this_frame(), 1);
        assert_eq!(logs[2].borrow().len(), 0);
    }

    #[test]
    fn round_robin_reaches_every_entry() {
        let mut m = EffectManager::with_config(&ManagerConfig {
            max_effects_per_frame: 2,
            schedule: FrameSchedule::RoundRobin,
            ..ManagerConfig::default()
        });
        let textures: Vec<_> = (0..3).map(|_| tex()).collect();
        let logs: Vec<_> = textures.iter().map(|t| counter(&mut m, t)).collect();
        m.update(0.1);
        m.update(0.1);
        m.update(0.1);
        let ran: Vec<_> = logs.iter().map(|l| l.borrow().len()).collect();
        assert_eq!(ran, vec![2, 2, 2]);
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut m = EffectManager::new();
        let t = tex();
        let first = counter(&mut m, &t);
        let second = counter(&mut m, &t);
        assert_eq!(m.effect_count(), 1);
        m.update(0.1);
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn custom_effect_label_follows_the_callback() {
        let mut m = EffectManager::new();
        let t = tex();
        m.register_custom_effect(&t, |_, _| Ok(()), "scanlines");
        assert_eq!(m.effect_info(&t).unwrap().label, "scanlines");

        m.register_lava_effect(&t, &LavaParams::default());
        assert_eq!(m.effect_info(&t).unwrap().label, "Lava");
    }

    #[test]
    fn replaced_entry_moves_to_the_end() {
        let mut m = EffectManager::new();
        let a = tex();
        let b = tex();
        counter(&mut m, &a);
        counter(&mut m, &b);
        counter(&mut m, &a);
        let order = m.active_textures();
        assert!(order[0].ptr_eq(&b));
        assert!(order[1].ptr_eq(&a));
    }

    #[test]
    fn pause_and_resume() {
        let mut m = EffectManager::new();
        let t = tex();
        let seen = counter(&mut m, &t);
        m.pause_effect(&t);
        m.update(0.1);
        m.update(0.1);
        assert!(seen.borrow().is_empty());
        assert!(m.effect_info(&t).unwrap().paused);
        m.resume_effect(&t);
        m.update(0.1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn fault_removes_only_the_faulting_entry() {
        let mut m = EffectManager::new();
        let good_a = tex();
        let bad = tex();
        let good_b = tex();
        let log_a = counter(&mut m, &good_a);
        m.register_custom_effect(&bad, |_, _| Err(EffectFault::failed("boom")), "broken");
        let log_b = counter(&mut m, &good_b);

        m.update(0.1);
        assert_eq!(m.updates_this_frame(), 2);
        assert!(!m.has_effect(&bad));
        assert_eq!(m.effect_count(), 2);

        m.update(0.1);
        assert_eq!(log_a.borrow().len(), 2);
        assert_eq!(log_b.borrow().len(), 2);
        assert!(!m.active_textures().iter().any(|t| t.ptr_eq(&bad)));
    }

    #[test]
    fn update_interval_throttles() {
        let mut m = EffectManager::new();
        let t = tex();
        let seen = counter(&mut m, &t);
        m.set_effect_update_interval(&t, 0.25);
        for _ in 0..10 {
            m.update(0.1);
        }
        // Due at 0.3, 0.6, 0.9 (each 0.3 after the last run)
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn update_frequency_applies_to_new_entries() {
        let mut m = EffectManager::new();
        let early = tex();
        counter(&mut m, &early);
        m.set_update_frequency(4.0);
        let late = tex();
        counter(&mut m, &late);
        assert_eq!(m.effect_info(&early).unwrap().update_interval, 0.0);
        assert_eq!(m.effect_info(&late).unwrap().update_interval, 0.25);
        m.set_update_frequency(0.0);
        let again = tex();
        counter(&mut m, &again);
        assert_eq!(m.effect_info(&again).unwrap().update_interval, 0.0);
    }

    #[test]
    fn released_textures_are_dropped() {
        let mut m = EffectManager::new();
        let t = tex();
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        m.register_custom_effect(
            &t,
            move |_, _| {
                c.set(c.get() + 1);
                Ok(())
            },
            "x",
        );
        t.release().unwrap();
        m.update(0.1);
        assert_eq!(calls.get(), 0);
        assert!(!m.has_effect(&t));
    }

    #[test]
    fn unregister_is_immediate() {
        let mut m = EffectManager::new();
        let a = tex();
        let b = tex();
        let seen = counter(&mut m, &a);
        counter(&mut m, &b);
        assert!(m.unregister_effect(&a));
        assert!(!m.unregister_effect(&a));
        m.update(0.1);
        assert!(seen.borrow().is_empty());
        m.unregister_all_effects();
        assert_eq!(m.effect_count(), 0);
    }

    #[test]
    fn animated_registration_writes_pixels() {
        let mut m = EffectManager::new();
        let t = tex();
        m.register_plasma_effect(&t, &PlasmaParams::default());
        assert_eq!(m.effect_info(&t).unwrap().label, "Plasma");
        m.update(0.016);
        assert!(t.snapshot().unwrap().iter().all(|&p| p >> 24 == 0xFF));
    }

    #[test]
    fn locked_texture_is_not_a_fault() {
        let mut m = EffectManager::new();
        let t = tex();
        m.register_lava_effect(&t, &LavaParams::default());
        let guard = t.try_lock().unwrap();
        m.update(0.1);
        drop(guard);
        assert!(m.has_effect(&t));
    }

    #[test]
    fn average_update_time_is_non_negative() {
        let mut m = EffectManager::new();
        let t = tex();
        m.register_fire_effect(&t, &FireParams::default());
        m.update(0.1);
        assert!(m.average_update_time_ms() >= 0.0);
    }
}
