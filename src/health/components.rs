use std::ops::{BitOr, BitOrAssign};
use std::time::Duration;

use bevy::prelude::*;

use super::hooks::{HealthHooks, HurtPayload};

/// Faction tag used for friendly-fire checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Player,
    Enemy,
}

/// Bitset of damage kinds.
///
/// Containment is "fully contained": a mask covers a hit only when every bit
/// of the hit's kinds is present, not on any overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DamageKinds(u32);

impl DamageKinds {
    pub const NONE: Self = Self(0);
    pub const PHYSICAL: Self = Self(1);
    pub const FIRE: Self = Self(1 << 1);
    pub const ICE: Self = Self(1 << 2);
    pub const POISON: Self = Self(1 << 3);
    pub const MAGIC: Self = Self(1 << 4);
    pub const FALL: Self = Self(1 << 5);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DamageKinds {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DamageKinds {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Upper bound on health, replacing the `-1` sentinel of data-driven configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCap {
    Unlimited,
    Limited(i32),
}

/// Remaining (or configured) lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lives {
    Unlimited,
    Count(u32),
}

impl Lives {
    /// One life gone. `Count` saturates at zero, `Unlimited` never runs out.
    pub fn spend(self) -> Self {
        match self {
            Lives::Unlimited => Lives::Unlimited,
            Lives::Count(n) => Lives::Count(n.saturating_sub(1)),
        }
    }

    pub fn is_exhausted(self) -> bool {
        self == Lives::Count(0)
    }
}

/// How long an invulnerability window lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    After(Duration),
    /// Effectively unlimited; only `set_vulnerable` or `kill` get past it.
    Never,
}

/// Countdown driven by an external `tick`. Readiness is polled; the only
/// pushed edge is the natural-expiry `true` returned from [`Cooldown::tick`].
#[derive(Debug, Clone, Default)]
pub struct Cooldown {
    state: CooldownState,
}

#[derive(Debug, Clone, Default)]
enum CooldownState {
    #[default]
    Ready,
    Counting(Timer),
    Held,
}

impl Cooldown {
    pub fn ready(&self) -> bool {
        matches!(self.state, CooldownState::Ready)
    }

    /// (Re)starts the countdown. A zero-length window disarms immediately.
    pub fn set(&mut self, expiry: Expiry) {
        self.state = match expiry {
            Expiry::After(duration) if duration.is_zero() => CooldownState::Ready,
            Expiry::After(duration) => CooldownState::Counting(Timer::new(duration, TimerMode::Once)),
            Expiry::Never => CooldownState::Held,
        };
    }

    /// Stops the countdown without reporting an expiry edge.
    pub fn clear(&mut self) {
        self.state = CooldownState::Ready;
    }

    /// Advances the countdown; returns true exactly once, on the tick it
    /// naturally expires.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if let CooldownState::Counting(timer) = &mut self.state {
            timer.tick(delta);
            if timer.is_finished() {
                self.state = CooldownState::Ready;
                return true;
            }
        }
        false
    }
}

/// An immutable, fully-resolved hit. Built by whoever detected the collision
/// and handed to the victim's `CharacterHealth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageInfo {
    pub amount: i32,
    pub kinds: DamageKinds,
    /// Entity whose `CharacterHealth` dealt this hit.
    pub causer: Entity,
    /// Lets an allied hit through a friendly-fire-disabled target.
    pub friendly_fire: bool,
}

impl DamageInfo {
    pub fn new(amount: i32, causer: Entity) -> Self {
        Self {
            amount,
            kinds: DamageKinds::PHYSICAL,
            causer,
            friendly_fire: false,
        }
    }

    pub fn with_kinds(mut self, kinds: DamageKinds) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_friendly_fire(mut self) -> Self {
        self.friendly_fire = true;
        self
    }
}

/// Damage payload carried by a hit-emitting child (a sword arc, a spike
/// ball...). Collision detection resolves the owning root and turns this into
/// a [`DamageInfo`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: i32,
    pub kinds: DamageKinds,
    pub friendly_fire: bool,
}

impl Damage {
    pub fn new(amount: i32) -> Self {
        Self {
            amount,
            ..Default::default()
        }
    }

    pub fn with_kinds(mut self, kinds: DamageKinds) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_friendly_fire(mut self) -> Self {
        self.friendly_fire = true;
        self
    }

    pub fn info(&self, causer: Entity) -> DamageInfo {
        DamageInfo {
            amount: self.amount,
            kinds: self.kinds,
            causer,
            friendly_fire: self.friendly_fire,
        }
    }
}

impl Default for Damage {
    fn default() -> Self {
        Self {
            amount: 1,
            kinds: DamageKinds::PHYSICAL,
            friendly_fire: false,
        }
    }
}

/// Marker for hit-detection children toggled off by the death sequence.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct HitBox;

/// Coarse view of the health state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    AliveVulnerable,
    AliveInvulnerable,
    DeadAwaitingRespawn,
    GameOver,
}

/// Tracks a character's health and lives.
///
/// Drives damage, death, respawn and game-over sequencing, and raises the
/// [`HealthHooks`] notifications in a fixed order. All operations run
/// synchronously to completion inside the caller's tick; the invulnerability
/// countdown is advanced by [`CharacterHealth::tick`].
#[derive(Component, Debug)]
pub struct CharacterHealth {
    pub alignment: Alignment,
    /// Can receive damage from the same alignment?
    pub friendly_fire: bool,
    pub starting_health: i32,
    pub max_health: HealthCap,
    pub starting_lives: Lives,
    pub max_lives: Lives,
    /// How long the character stays invulnerable after surviving a hit.
    /// Zero disables the window.
    pub invulnerability_after_damage: Duration,
    /// Damage kinds fully ignored, regardless of invulnerability.
    pub immunity: DamageKinds,
    pub hooks: HealthHooks,
    health: i32,
    lives: Lives,
    invulnerability: Cooldown,
    owner: Option<Entity>,
    game_over: bool,
}

impl Default for CharacterHealth {
    fn default() -> Self {
        Self {
            alignment: Alignment::None,
            friendly_fire: false,
            starting_health: 1,
            max_health: HealthCap::Limited(1),
            starting_lives: Lives::Count(1),
            max_lives: Lives::Count(1),
            invulnerability_after_damage: Duration::from_secs(2),
            immunity: DamageKinds::NONE,
            hooks: HealthHooks::default(),
            health: 0,
            lives: Lives::Count(1),
            invulnerability: Cooldown::default(),
            owner: None,
            game_over: false,
        }
    }
}

impl CharacterHealth {
    pub fn new(starting_health: i32, max_health: HealthCap) -> Self {
        Self {
            starting_health,
            max_health,
            ..Default::default()
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_friendly_fire(mut self) -> Self {
        self.friendly_fire = true;
        self
    }

    pub fn with_lives(mut self, starting: Lives, max: Lives) -> Self {
        self.starting_lives = starting;
        self.max_lives = max;
        self
    }

    pub fn with_immunity(mut self, immunity: DamageKinds) -> Self {
        self.immunity = immunity;
        self
    }

    pub fn with_invulnerability_window(mut self, window: Duration) -> Self {
        self.invulnerability_after_damage = window;
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn lives(&self) -> Lives {
        self.lives
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    /// Validates the configuration and brings the character to life.
    ///
    /// Misconfiguration is a setup bug and fails hard. Healing up to
    /// `starting_health` fires `on_heal`, and `on_max_health` when the
    /// character starts at its cap.
    pub fn initialize(&mut self, owner: Entity) {
        if let HealthCap::Limited(max) = self.max_health {
            assert!(
                self.starting_health <= max,
                "(CharacterHealth) starting_health {} exceeds max_health {}",
                self.starting_health,
                max
            );
        }
        match (self.starting_lives, self.max_lives) {
            (Lives::Count(starting), Lives::Count(max)) => assert!(
                starting <= max,
                "(CharacterHealth) starting_lives {starting} exceeds max_lives {max}"
            ),
            (Lives::Unlimited, Lives::Count(max)) => panic!(
                "(CharacterHealth) starting_lives is unlimited but max_lives is {max}"
            ),
            _ => {}
        }

        self.owner = Some(owner);
        self.game_over = false;
        self.invulnerability.clear();
        self.health = 0;
        self.heal(self.starting_health);
        self.lives = self.starting_lives;
    }

    /// Advances the invulnerability countdown; fires `on_invulnerability_end`
    /// exactly once when it expires naturally.
    pub fn tick(&mut self, delta: Duration) {
        if self.invulnerability.tick(delta) {
            self.hooks.on_invulnerability_end.fire(&());
        }
    }

    /// Increases health, clamped to the cap. Fires `on_heal`, and
    /// `on_max_health` every time the heal ends at the cap. Does not revive
    /// the dead; only the internal respawn path may heal a dead character.
    pub fn heal(&mut self, amount: i32) {
        self.health += amount;
        self.hooks.on_heal.fire(&());

        if let HealthCap::Limited(max) = self.max_health {
            if self.health >= max {
                self.health = max;
                self.hooks.on_max_health.fire(&());
            }
        }
    }

    /// Turns the character invulnerable; it can still be killed with
    /// [`CharacterHealth::kill`]. Re-arming while already invulnerable
    /// restarts the window and fires `on_invulnerability_start` again.
    pub fn set_invulnerable(&mut self, expiry: Expiry) {
        self.invulnerability.set(expiry);
        self.hooks.on_invulnerability_start.fire(&());
    }

    /// Clears the window immediately. Intentionally silent: the end hook only
    /// fires on natural expiry, never on an explicit clear.
    pub fn set_vulnerable(&mut self) {
        self.invulnerability.clear();
    }

    /// A dead character always reports invulnerable, so nothing processes its
    /// death twice.
    pub fn is_invulnerable(&self) -> bool {
        self.health <= 0 || !self.invulnerability.ready()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> HealthState {
        if self.game_over {
            HealthState::GameOver
        } else if self.health <= 0 {
            HealthState::DeadAwaitingRespawn
        } else if self.is_invulnerable() {
            HealthState::AliveInvulnerable
        } else {
            HealthState::AliveVulnerable
        }
    }

    /// Tries to damage the character with a resolved hit, crediting the
    /// causer with `on_hurt` when health was actually reduced.
    pub fn damage(&mut self, hit: &DamageInfo, causer: &mut CharacterHealth) -> bool {
        debug!(
            "hit for {} (kinds {:?}) on health {}",
            hit.amount, hit.kinds, self.health
        );

        if !self.friendly_fire && !hit.friendly_fire && causer.alignment == self.alignment {
            debug!("friendly hit without override, ignored");
            return false;
        }

        if self.damage_of_kind(hit.amount, hit.kinds, causer.alignment, Some(hit.causer)) {
            causer.hooks.on_hurt.fire(&HurtPayload {
                damage: Some(*hit),
                other: self.owner,
            });
            true
        } else {
            false
        }
    }

    /// Self-inflicted variant of [`CharacterHealth::damage`] for when causer
    /// and victim are the same controller, which two `&mut` borrows cannot
    /// express. Only gets through on a friendly-fire-enabled character.
    pub fn damage_self(&mut self, hit: &DamageInfo) -> bool {
        if !self.friendly_fire && !hit.friendly_fire {
            return false;
        }

        let alignment = self.alignment;
        if self.damage_of_kind(hit.amount, hit.kinds, alignment, Some(hit.causer)) {
            let victim = self.owner;
            self.hooks.on_hurt.fire(&HurtPayload {
                damage: Some(*hit),
                other: victim,
            });
            true
        } else {
            false
        }
    }

    /// Kind-checked damage path. Same-alignment hits are dropped here without
    /// any hooks; a fully-covered kind fires `on_damage` then `on_immunity`
    /// and blocks the hit.
    pub fn damage_of_kind(
        &mut self,
        amount: i32,
        kinds: DamageKinds,
        causer_alignment: Alignment,
        causer: Option<Entity>,
    ) -> bool {
        if !self.friendly_fire && causer_alignment == self.alignment {
            debug!("cannot receive damage from the same alignment");
            return false;
        }

        if self.immunity.contains(kinds) {
            debug!("immune to {kinds:?}");
            self.hooks.on_damage.fire(&());
            self.hooks.on_immunity.fire(&());
            return false;
        }

        self.take_damage(amount, causer)
    }

    /// Base damage path.
    ///
    /// Invulnerable targets observe `on_damage` then `on_immunity` and take
    /// nothing. Otherwise health drops by `amount`, a survivor re-arms its
    /// post-damage window, `on_damage` and `on_injured` fire, and a lethal
    /// hit runs [`CharacterHealth::die`] before returning.
    pub fn take_damage(&mut self, amount: i32, causer: Option<Entity>) -> bool {
        if amount <= 0 {
            warn!("non-positive damage amount: {amount}");
        }

        if self.is_invulnerable() {
            debug!("invulnerable, hit ignored");
            self.hooks.on_damage.fire(&());
            self.hooks.on_immunity.fire(&());
            return false;
        }

        self.health -= amount;

        // do not leave a dead character invulnerable
        if self.health > 0 {
            self.set_invulnerable(Expiry::After(self.invulnerability_after_damage));
        }

        self.hooks.on_damage.fire(&());
        self.hooks.on_injured.fire(&HurtPayload {
            damage: None,
            other: causer,
        });

        if self.health <= 0 {
            self.die();
        }

        true
    }

    /// Kills the character outright, bypassing invulnerability and immunity.
    pub fn kill(&mut self) {
        self.health = 0;
        self.die();
    }

    /// Spends a life and fires `on_death`; then either `on_game_over`
    /// (terminal) or a heal back to `starting_health` plus `on_respawn`.
    /// Respawning does not re-arm invulnerability and does not reset the
    /// immunity mask or alignment.
    pub fn die(&mut self) {
        self.lives = self.lives.spend();
        self.hooks.on_death.fire(&());

        if self.lives.is_exhausted() {
            debug!("game over");
            self.hooks.on_game_over.fire(&());
            self.game_over = true;
        } else {
            self.health = 0;
            self.heal(self.starting_health);
            self.hooks.on_respawn.fire(&());
        }
    }
}
