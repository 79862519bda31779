use bevy::prelude::*;

use super::components::{DamageInfo, DamageKinds};

/// Message asking the combat layer to damage `target` on behalf of `causer`.
///
/// Written by collision/hit detection; consumed by `apply_damage_system`,
/// which resolves both `CharacterHealth` components and runs the full gate
/// chain (friendly fire, immunity, invulnerability).
#[derive(Message, Debug, Clone)]
pub struct DamageEvent {
    pub target: Entity,
    pub causer: Entity,
    pub amount: i32,
    pub kinds: DamageKinds,
    pub friendly_fire: bool,
}

impl DamageEvent {
    pub fn new(target: Entity, causer: Entity, amount: i32) -> Self {
        Self {
            target,
            causer,
            amount,
            kinds: DamageKinds::PHYSICAL,
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

    pub fn info(&self) -> DamageInfo {
        DamageInfo {
            amount: self.amount,
            kinds: self.kinds,
            causer: self.causer,
            friendly_fire: self.friendly_fire,
        }
    }
}

/// Message fired once when a character spends its last life.
#[derive(Message, Debug, Clone)]
pub struct GameOverEvent {
    pub entity: Entity,
}

/// Message asking for all hit-detection and damage-emitting children of
/// `entity` to be deactivated. Death handling never sends this on its own;
/// game code decides when the corpse stops biting.
#[derive(Message, Debug, Clone)]
pub struct DisableHitBoxesEvent {
    pub entity: Entity,
}
