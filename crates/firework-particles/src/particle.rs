//! Particle records and the fixed-capacity pool that owns them

use crate::fade::{Fade, FadeAction};
use firework_core::{Color, Vec2};
use std::ops::{Index, IndexMut};

/// What an active particle is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Ascending particle launched by a click; bursts at its apex
    Shell,
    /// Burst fragment; lives until its fade completes
    Shrapnel,
}

/// One reusable pool record
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Circle radius in pixels
    pub size: f32,
    pub color: Color,
    /// Current opacity in [0, 1], driven by `fade`
    pub alpha: f32,
    /// Randomized lifetime units; shells derive their fade duration from it
    pub life: f32,
    pub role: Role,
    pub dead: bool,
    /// The one fade currently driving `alpha`, if any
    pub fade: Option<Fade>,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: 0.0,
            color: Color::TRANSPARENT,
            alpha: 0.0,
            life: 0.0,
            role: Role::Shrapnel,
            dead: true,
            fade: None,
        }
    }

    pub fn is_shell(&self) -> bool {
        self.role == Role::Shell
    }

    /// Replace any running fade. The previous one never completes.
    pub fn start_fade(&mut self, fade: Fade) {
        self.fade = Some(fade);
    }

    /// Sample the current fade at `now`.
    ///
    /// Returns the fade's completion action once it finishes; the fade is
    /// removed at that point so the action is reported exactly once.
    pub fn advance_fade(&mut self, now: f64) -> Option<FadeAction> {
        let fade = self.fade.as_ref()?;
        self.alpha = fade.sample(now);
        if fade.is_finished(now) {
            return self.fade.take().and_then(|f| f.on_complete);
        }
        None
    }
}

/// Stable index of a pool record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(pub(crate) usize);

impl SlotHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity particle pool.
///
/// Records are allocated once in `new` and only ever reset afterwards.
/// `acquire` hands out the lowest-indexed dead slot.
pub struct ParticlePool {
    particles: Vec<Particle>,
    active_count: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let mut particles = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            particles.push(Particle::dead());
        }
        Self {
            particles,
            active_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_full(&self) -> bool {
        self.active_count >= self.particles.len()
    }

    /// Activate the first dead slot. Returns None if every slot is active.
    pub fn acquire(&mut self) -> Option<SlotHandle> {
        if self.is_full() {
            return None;
        }
        let idx = self.particles.iter().position(|p| p.dead)?;
        self.particles[idx].dead = false;
        self.active_count += 1;
        Some(SlotHandle(idx))
    }

    /// Mark a slot dead and drop its fade. Releasing a dead slot is a no-op.
    pub fn release(&mut self, handle: SlotHandle) {
        let particle = &mut self.particles[handle.0];
        if particle.dead {
            return;
        }
        particle.dead = true;
        particle.fade = None;
        self.active_count -= 1;
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&Particle> {
        self.particles.get(handle.0)
    }

    /// Handle for the slot at `index`, if in range
    pub fn handle_at(&self, index: usize) -> Option<SlotHandle> {
        (index < self.particles.len()).then_some(SlotHandle(index))
    }

    /// All records, dead ones included
    pub fn slots(&self) -> &[Particle] {
        &self.particles
    }

    /// Active records with their handles
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotHandle, &Particle)> {
        self.particles
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.dead)
            .map(|(i, p)| (SlotHandle(i), p))
    }
}

impl Index<SlotHandle> for ParticlePool {
    type Output = Particle;
    fn index(&self, handle: SlotHandle) -> &Particle {
        &self.particles[handle.0]
    }
}

impl IndexMut<SlotHandle> for ParticlePool {
    fn index_mut(&mut self, handle: SlotHandle) -> &mut Particle {
        &mut self.particles[handle.0]
    }
}
