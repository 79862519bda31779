use bevy::ecs::entity_disabling::Disabled;
use bevy::prelude::*;

use super::components::{CharacterHealth, Damage, HitBox};
use super::events::{DamageEvent, DisableHitBoxesEvent, GameOverEvent};
use crate::character::components::Character;

/// Marker set once a controller's game over has been announced, so the
/// message fires exactly once per character.
#[derive(Component, Debug, Default)]
pub struct GameOverHandled;

/// Validates and initializes freshly added `CharacterHealth` components.
///
/// A controller on an entity without a `Character` is a setup bug and fails
/// hard, as does a misconfigured controller (checked inside `initialize`).
pub fn initialize_health_system(
    mut query: Query<(Entity, &mut CharacterHealth), Added<CharacterHealth>>,
    characters: Query<(), With<Character>>,
) {
    for (entity, mut health) in query.iter_mut() {
        assert!(
            characters.get(entity).is_ok(),
            "(CharacterHealth) Character owner is required: {entity:?}"
        );
        health.initialize(entity);
    }
}

/// Advances every controller's invulnerability countdown by the frame delta.
/// Natural expiries fire `on_invulnerability_end` from inside `tick`.
pub fn tick_invulnerability_system(time: Res<Time>, mut query: Query<&mut CharacterHealth>) {
    for mut health in query.iter_mut() {
        health.tick(time.delta());
    }
}

/// Applies queued `DamageEvent`s through the full gate chain.
///
/// A target that despawned before the hit landed is skipped; an event whose
/// causer cannot be resolved is a programming error and fails hard.
pub fn apply_damage_system(
    mut messages: MessageReader<DamageEvent>,
    mut query: Query<&mut CharacterHealth>,
) {
    for event in messages.read() {
        let hit = event.info();

        if event.target == event.causer {
            if let Ok(mut target) = query.get_mut(event.target) {
                target.damage_self(&hit);
            }
            continue;
        }

        assert!(
            query.contains(event.causer),
            "(CharacterHealth) damage without causer: {event:?}"
        );
        if let Ok([mut target, mut causer]) = query.get_many_mut([event.target, event.causer]) {
            target.damage(&hit, &mut causer);
        }
        // resolved causer with Err means the target despawned: stale hit
    }
}

/// Announces each character's game over exactly once.
///
/// Deciding what a game over means globally (credits, state switch, retry
/// menu) is left to the game; this only reports it.
pub fn check_game_over_system(
    mut commands: Commands,
    query: Query<(Entity, &CharacterHealth), (With<Character>, Without<GameOverHandled>)>,
    mut messages: MessageWriter<GameOverEvent>,
) {
    for (entity, health) in query.iter() {
        if health.is_game_over() {
            info!("{entity:?} is out of lives");
            messages.write(GameOverEvent { entity });
            commands.entity(entity).insert(GameOverHandled);
        }
    }
}

/// Deactivates every hit-detection and damage-emitting node under the given
/// entity (itself included) by inserting `Disabled`.
pub fn disable_hit_boxes_system(
    mut commands: Commands,
    mut messages: MessageReader<DisableHitBoxesEvent>,
    children: Query<&Children>,
    hit_emitters: Query<(), Or<(With<HitBox>, With<Damage>)>>,
) {
    for event in messages.read() {
        let subtree = std::iter::once(event.entity).chain(children.iter_descendants(event.entity));
        for entity in subtree {
            if hit_emitters.get(entity).is_ok() {
                debug!("disabling hit emitter {entity:?}");
                commands.entity(entity).insert(Disabled);
            }
        }
    }
}
