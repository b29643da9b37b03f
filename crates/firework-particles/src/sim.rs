//! Firework simulation: launch, per-tick physics, apex bursts, and fades

use crate::config::FireworkConfig;
use crate::fade::{Fade, FadeAction};
use crate::particle::{ParticlePool, Role, SlotHandle};
use crate::rand::ParticleRng;
use firework_core::{Color, Result, Vec2};
use firework_runtime::{EventBus, FireworkEvent};

/// Outcome of one shell burst
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub position: Vec2,
    pub color: Color,
    /// Shrapnel slots handed out by the pool, in acquisition order
    pub spawned: Vec<SlotHandle>,
    /// Pieces skipped because the pool was exhausted
    pub dropped: usize,
}

/// Owns the particle pool and everything that mutates it.
///
/// `time` is the continuous clock fades are sampled against; it only moves
/// forward through [`FireworkSim::update`].
pub struct FireworkSim {
    config: FireworkConfig,
    pool: ParticlePool,
    rng: ParticleRng,
    time: f64,
    events: EventBus,
}

impl FireworkSim {
    pub fn new(config: FireworkConfig, rng: ParticleRng) -> Result<Self> {
        config.validate()?;
        let pool = ParticlePool::new(config.capacity);
        Ok(Self {
            config,
            pool,
            rng,
            time: 0.0,
            events: EventBus::new(),
        })
    }

    pub fn with_seed(config: FireworkConfig, seed: u64) -> Result<Self> {
        Self::new(config, ParticleRng::new(seed))
    }

    pub fn config(&self) -> &FireworkConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    /// Seconds of simulated time so far
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn drain_events(&mut self) -> Vec<FireworkEvent> {
        self.events.drain()
    }

    /// Place a new shell at `position`. Returns None (and does nothing else)
    /// when the pool is exhausted.
    pub fn launch(&mut self, position: Vec2) -> Option<SlotHandle> {
        let Some(handle) = self.pool.acquire() else {
            self.events.push(FireworkEvent::LaunchDropped { position });
            return None;
        };

        let cfg = &self.config;
        let velocity = Vec2::new(
            self.rng.range(cfg.shell_velocity_x.min, cfg.shell_velocity_x.max),
            self.rng.range(cfg.shell_velocity_y.min, cfg.shell_velocity_y.max),
        );
        let life = self.rng.range(cfg.shell_life.min, cfg.shell_life.max);
        let fade = Fade::new(
            self.time,
            life as f64 * cfg.shell_life_scale,
            1.0,
            cfg.shell_alpha_floor,
            cfg.fade_easing,
        );

        let p = &mut self.pool[handle];
        p.position = position;
        p.velocity = velocity;
        p.size = cfg.shell_size;
        p.color = cfg.shell_color;
        p.alpha = 1.0;
        p.life = life;
        p.role = Role::Shell;
        p.start_fade(fade);

        self.events.push(FireworkEvent::ShellLaunched {
            slot: handle.index(),
            position,
        });
        Some(handle)
    }

    /// Burst shrapnel out of the particle in `shell`'s slot.
    ///
    /// Only reads the shell's position; releasing the shell is the caller's job.
    /// Pieces that find no free slot are skipped.
    pub fn explode(&mut self, shell: SlotHandle) -> Explosion {
        let origin = self.pool[shell].position;
        let color = self
            .rng
            .index(self.config.palette.len())
            .map(|i| self.config.palette[i])
            .unwrap_or(Color::WHITE);
        let count = self
            .rng
            .count(self.config.shrapnel_count.min, self.config.shrapnel_count.max);

        let mut spawned = Vec::with_capacity(count);
        let mut dropped = 0;
        for _ in 0..count {
            let Some(handle) = self.pool.acquire() else {
                dropped += 1;
                continue;
            };

            let cfg = &self.config;
            let angle = self.rng.angle();
            let speed = self.rng.range(cfg.shrapnel_speed.min, cfg.shrapnel_speed.max);
            let size = self.rng.range(cfg.shrapnel_size.min, cfg.shrapnel_size.max);
            let duration = self.rng.range(cfg.shrapnel_fade.min, cfg.shrapnel_fade.max);
            let fade = Fade::new(self.time, duration as f64, 1.0, 0.0, cfg.fade_easing)
                .on_complete(FadeAction::Release);

            let p = &mut self.pool[handle];
            p.position = origin;
            p.velocity = Vec2::from_angle(angle, speed);
            p.size = size;
            p.color = color;
            p.alpha = 1.0;
            p.life = duration;
            p.role = Role::Shrapnel;
            p.start_fade(fade);

            spawned.push(handle);
        }

        self.events.push(FireworkEvent::ShellExploded {
            position: origin,
            color,
            spawned: spawned.len(),
            dropped,
        });

        Explosion {
            position: origin,
            color,
            spawned,
            dropped,
        }
    }

    /// Advance the clock by `dt` seconds and run one tick: fades, then physics.
    pub fn update(&mut self, dt: f64) {
        self.time += dt.max(0.0);
        self.apply_fades();
        self.step_physics();
    }

    /// Sample every active fade at the current time and run completion actions
    fn apply_fades(&mut self) {
        let now = self.time;
        for index in 0..self.pool.capacity() {
            let handle = SlotHandle(index);
            let particle = &mut self.pool[handle];
            if particle.dead {
                continue;
            }
            if let Some(FadeAction::Release) = particle.advance_fade(now) {
                self.pool.release(handle);
            }
        }
    }

    /// One forward pass over the pool. Shrapnel spawned into later slots by a
    /// burst earlier in the pass is integrated in the same tick.
    fn step_physics(&mut self) {
        let gravity = self.config.gravity;
        let friction = self.config.friction;
        let apex = self.config.apex_velocity;

        for index in 0..self.pool.capacity() {
            let handle = SlotHandle(index);
            let p = &mut self.pool[handle];
            if p.dead {
                continue;
            }

            p.velocity.y += gravity;
            p.velocity *= friction;
            let velocity = p.velocity;
            p.position += velocity;

            if p.is_shell() && p.velocity.y >= apex {
                self.explode(handle);
                self.pool.release(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountRange;

    fn sim() -> FireworkSim {
        FireworkSim::with_seed(FireworkConfig::default(), 0xF1_2E).unwrap()
    }

    fn exploded_events(events: &[FireworkEvent]) -> Vec<FireworkEvent> {
        events
            .iter()
            .filter(|e| matches!(e, FireworkEvent::ShellExploded { .. }))
            .cloned()
            .collect()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = FireworkConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(FireworkSim::with_seed(config, 1).is_err());
    }

    #[test]
    fn launch_places_one_upward_shell() {
        let mut sim = sim();
        let handle = sim.launch(Vec2::new(100.0, 100.0)).unwrap();

        assert_eq!(sim.pool().active_count(), 1);
        let p = &sim.pool()[handle];
        assert!(!p.dead);
        assert_eq!(p.role, Role::Shell);
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
        assert!(p.velocity.y < 0.0);
        assert!((-17.0..-7.0).contains(&p.velocity.y));
        assert!((-0.75..0.75).contains(&p.velocity.x));
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.color, Color::WHITE);
        assert!((100.0..150.0).contains(&p.life));

        let fade = p.fade.as_ref().unwrap();
        assert!((fade.to - 0.8).abs() < 1e-6);
        assert!((fade.duration - p.life as f64 / 100.0).abs() < 1e-6);
        assert_eq!(fade.on_complete, None);

        assert_eq!(
            sim.drain_events(),
            vec![FireworkEvent::ShellLaunched {
                slot: handle.index(),
                position: Vec2::new(100.0, 100.0)
            }]
        );
    }

    #[test]
    fn launch_into_full_pool_is_silent_noop() {
        let mut sim = sim();
        for _ in 0..1000 {
            sim.pool_mut().acquire().unwrap();
        }
        assert_eq!(sim.pool().active_count(), 1000);

        assert!(sim.launch(Vec2::new(5.0, 5.0)).is_none());
        assert_eq!(sim.pool().active_count(), 1000);
        assert_eq!(sim.pool().capacity(), 1000);
        assert!(matches!(
            sim.drain_events().as_slice(),
            [FireworkEvent::LaunchDropped { .. }]
        ));
    }

    #[test]
    fn explosion_spawns_one_colored_burst_at_origin() {
        let mut sim = sim();
        let shell = sim.launch(Vec2::new(250.0, 80.0)).unwrap();
        let burst = sim.explode(shell);

        let n = burst.spawned.len();
        assert!((50..=99).contains(&n), "shrapnel count {n}");
        assert_eq!(burst.dropped, 0);
        assert_eq!(burst.position, Vec2::new(250.0, 80.0));
        assert!(sim.config().palette.contains(&burst.color));

        for handle in &burst.spawned {
            let p = &sim.pool()[*handle];
            assert_eq!(p.role, Role::Shrapnel);
            assert_eq!(p.position, Vec2::new(250.0, 80.0));
            assert_eq!(p.color, burst.color);
            assert!((1.0..2.5).contains(&p.size));
            let speed = p.velocity.length();
            assert!(speed >= 2.0 - 1e-4 && speed < 6.0 + 1e-4, "speed {speed}");
            let fade = p.fade.as_ref().unwrap();
            assert_eq!(fade.to, 0.0);
            assert_eq!(fade.on_complete, Some(FadeAction::Release));
            assert!((1.5..2.5).contains(&fade.duration));
        }
        // explode itself leaves the shell alone
        assert!(!sim.pool()[shell].dead);
    }

    #[test]
    fn explosion_truncates_when_pool_runs_out() {
        let config = FireworkConfig {
            capacity: 20,
            ..Default::default()
        };
        let mut sim = FireworkSim::with_seed(config, 11).unwrap();
        let shell = sim.launch(Vec2::new(10.0, 10.0)).unwrap();
        let burst = sim.explode(shell);

        assert_eq!(burst.spawned.len(), 19);
        assert!(burst.dropped >= 31);
        assert!(sim.pool().is_full());
    }

    #[test]
    fn shell_bursts_exactly_once_on_the_apex_tick() {
        let mut sim = sim();
        let shell = sim.launch(Vec2::new(400.0, 600.0)).unwrap();
        sim.drain_events();

        let cfg = sim.config().clone();
        let mut bursts = 0;
        for _ in 0..600 {
            let before = sim.pool()[shell].clone();
            let was_shell = !before.dead && before.is_shell();
            sim.update(1.0 / 60.0);
            let events = exploded_events(&sim.drain_events());

            if was_shell {
                let vy = (before.velocity.y + cfg.gravity) * cfg.friction;
                let expected_pos = before.position
                    + Vec2::new(before.velocity.x * cfg.friction, vy);
                if vy >= cfg.apex_velocity {
                    assert_eq!(events.len(), 1);
                    match &events[0] {
                        FireworkEvent::ShellExploded { position, .. } => {
                            assert!(position.distance(expected_pos) < 1e-3);
                        }
                        _ => unreachable!(),
                    }
                    assert!(sim.pool()[shell].dead);
                } else {
                    assert!(events.is_empty());
                    assert!(!sim.pool()[shell].dead);
                }
            }
            bursts += events.len();
        }
        assert_eq!(bursts, 1);
    }

    #[test]
    fn apex_burst_at_known_position() {
        let config = FireworkConfig {
            gravity: 0.0,
            friction: 1.0,
            ..Default::default()
        };
        let mut sim = FireworkSim::with_seed(config, 5).unwrap();
        let shell = sim.launch(Vec2::new(250.0, 81.0)).unwrap();
        {
            let p = &mut sim.pool_mut()[shell];
            p.velocity = Vec2::new(0.0, -1.0);
        }
        sim.drain_events();

        sim.update(1.0 / 60.0);

        let events = exploded_events(&sim.drain_events());
        assert_eq!(events.len(), 1);
        let FireworkEvent::ShellExploded {
            position,
            spawned,
            dropped,
            ..
        } = &events[0]
        else {
            unreachable!()
        };
        assert_eq!(*position, Vec2::new(250.0, 80.0));
        assert!((50..=99).contains(spawned));
        assert_eq!(*dropped, 0);
        assert!(sim.pool()[shell].dead);
        assert_eq!(sim.pool().active_count(), *spawned);
    }

    #[test]
    fn dead_particles_are_not_integrated() {
        let mut sim = sim();
        let h = sim.pool_mut().acquire().unwrap();
        sim.pool_mut()[h].velocity = Vec2::new(3.0, 3.0);
        sim.pool_mut().release(h);

        sim.update(1.0 / 60.0);
        let p = &sim.pool()[h];
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.velocity, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn shrapnel_fades_out_then_frees_its_slot() {
        let config = FireworkConfig {
            capacity: 10,
            shrapnel_count: CountRange::new(9, 10),
            ..Default::default()
        };
        let mut sim = FireworkSim::with_seed(config, 21).unwrap();
        let shell = sim.launch(Vec2::new(300.0, 300.0)).unwrap();
        let burst = sim.explode(shell);
        sim.pool_mut().release(shell);
        assert_eq!(burst.spawned.len(), 9);

        let ends: Vec<(SlotHandle, f64)> = burst
            .spawned
            .iter()
            .map(|h| (*h, sim.pool()[*h].fade.as_ref().unwrap().end_time()))
            .collect();
        let mut last_alpha: Vec<f32> = vec![1.0; ends.len()];

        let dt = 1.0 / 120.0;
        while sim.pool().active_count() > 0 {
            sim.update(dt);
            let now = sim.time();
            for (i, (handle, end)) in ends.iter().enumerate() {
                let p = &sim.pool()[*handle];
                if now >= *end {
                    assert!(p.dead, "slot {} alive after its fade ended", handle.index());
                } else {
                    assert!(!p.dead, "slot {} died early", handle.index());
                    assert!(p.alpha < last_alpha[i]);
                    last_alpha[i] = p.alpha;
                }
            }
            assert!(now < 10.0, "shrapnel never expired");
        }

        // Every slot is reusable again, lowest index first
        assert_eq!(sim.pool_mut().acquire().unwrap().index(), 0);
        assert_eq!(sim.pool_mut().acquire().unwrap().index(), 1);
    }

    #[test]
    fn freed_shrapnel_slot_is_next_acquired() {
        let config = FireworkConfig {
            capacity: 4,
            shrapnel_count: CountRange::new(3, 4),
            ..Default::default()
        };
        let mut sim = FireworkSim::with_seed(config, 8).unwrap();
        let shell = sim.launch(Vec2::new(0.0, 0.0)).unwrap();
        let burst = sim.explode(shell);
        assert!(sim.pool().is_full());

        assert_eq!(burst.spawned.len(), 3);

        // Known lifetimes so exactly one piece expires first
        let easing = sim.config().fade_easing;
        for (handle, duration) in burst.spawned.iter().zip([2.0, 1.0, 3.0]) {
            let fade = Fade::new(0.0, duration, 1.0, 0.0, easing).on_complete(FadeAction::Release);
            sim.pool_mut()[*handle].start_fade(fade);
        }
        let first_to_end = burst.spawned[1];

        // Keep the shell slot occupied without letting it burst again
        sim.pool_mut()[shell].role = Role::Shrapnel;
        sim.pool_mut()[shell].fade = None;

        while sim.time() < 1.0 {
            sim.update(1.0 / 240.0);
        }
        assert!(sim.pool()[first_to_end].dead);
        assert_eq!(sim.pool().active_count(), 3);
        assert_eq!(sim.launch(Vec2::new(1.0, 1.0)), Some(first_to_end));
        assert!(sim.launch(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn second_fade_replaces_first() {
        let mut sim = sim();
        let h = sim.launch(Vec2::new(0.0, 0.0)).unwrap();
        // Pin the particle so it never reaches its apex during the test
        sim.pool_mut()[h].role = Role::Shrapnel;

        let first = Fade::new(0.0, 1.0, 1.0, 0.0, crate::fade::Easing::Linear)
            .on_complete(FadeAction::Release);
        sim.pool_mut()[h].start_fade(first);
        sim.update(0.25);
        assert!((sim.pool()[h].alpha - 0.75).abs() < 1e-5);

        let second = Fade::new(
            sim.time(),
            2.0,
            sim.pool()[h].alpha,
            0.5,
            crate::fade::Easing::Linear,
        );
        sim.pool_mut()[h].start_fade(second.clone());

        // Past the first fade's end: still alive, on the second curve
        while sim.time() < 1.5 {
            sim.update(0.125);
            let expected = second.sample(sim.time());
            assert!((sim.pool()[h].alpha - expected).abs() < 1e-5);
        }
        assert!(!sim.pool()[h].dead);

        while sim.time() < 3.0 {
            sim.update(0.125);
        }
        assert!((sim.pool()[h].alpha - 0.5).abs() < 1e-6);
        assert!(!sim.pool()[h].dead);
        assert!(sim.pool()[h].fade.is_none());
    }

    #[test]
    fn shell_fade_settles_at_floor() {
        let mut sim = sim();
        let h = sim.launch(Vec2::new(0.0, 0.0)).unwrap();
        sim.pool_mut()[h].role = Role::Shrapnel;
        let end = sim.pool()[h].fade.as_ref().unwrap().end_time();

        while sim.time() <= end {
            sim.update(1.0 / 60.0);
        }
        let p = &sim.pool()[h];
        assert!((p.alpha - 0.8).abs() < 1e-6);
        assert!(!p.dead);
    }

    #[test]
    fn pool_never_grows_under_sustained_clicking() {
        let mut sim = sim();
        for frame in 0..900 {
            if frame % 3 == 0 {
                sim.launch(Vec2::new(frame as f32, 700.0));
            }
            sim.update(1.0 / 60.0);
            assert!(sim.pool().active_count() <= 1000);
            assert_eq!(sim.pool().capacity(), 1000);
            assert_eq!(
                sim.pool().active_count(),
                sim.pool().slots().iter().filter(|p| !p.dead).count()
            );
        }
    }
}
