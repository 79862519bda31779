use bevy::prelude::*;

use super::events::{DamageEvent, DisableHitBoxesEvent, GameOverEvent};
use super::systems::{
    apply_damage_system, check_game_over_system, disable_hit_boxes_system,
    initialize_health_system, tick_invulnerability_system,
};
use crate::states::GameState;

/// System sets ordering the health pipeline within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthSets {
    /// Invulnerability countdowns advance first
    Tick,
    /// Queued hits resolve against the controllers
    Damage,
    /// Game-over announcements and hitbox deactivation
    Resolve,
}

/// Health plugin wiring validation, ticking, damage and death resolution.
pub fn plugin(app: &mut App) {
    app.add_message::<DamageEvent>()
        .add_message::<GameOverEvent>()
        .add_message::<DisableHitBoxesEvent>()
        .configure_sets(
            Update,
            (HealthSets::Tick, HealthSets::Damage, HealthSets::Resolve)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(PreUpdate, initialize_health_system)
        .add_systems(
            Update,
            (
                tick_invulnerability_system.in_set(HealthSets::Tick),
                apply_damage_system.in_set(HealthSets::Damage),
                (check_game_over_system, disable_hit_boxes_system).in_set(HealthSets::Resolve),
            ),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::components::Character;
    use crate::health::components::{Alignment, CharacterHealth, HealthCap, Lives};

    fn plugin_app() -> App {
        let mut app = App::new();
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.init_state::<GameState>();
        app.init_resource::<Time>();
        app.add_plugins(plugin);
        app
    }

    #[test]
    fn test_plugin_registers_messages() {
        let mut app = plugin_app();
        let entity = app.world_mut().spawn_empty().id();
        app.world_mut()
            .write_message(DamageEvent::new(entity, entity, 1));
        app.world_mut().write_message(GameOverEvent { entity });
        app.world_mut().write_message(DisableHitBoxesEvent { entity });
        // Reaching this point means every message type is registered
    }

    #[test]
    fn test_full_pipeline_damages_through_the_plugin() {
        let mut app = plugin_app();
        let target = app
            .world_mut()
            .spawn((
                Character,
                CharacterHealth::new(5, HealthCap::Limited(5)).with_alignment(Alignment::Player),
            ))
            .id();
        let causer = app
            .world_mut()
            .spawn((
                Character,
                CharacterHealth::new(1, HealthCap::Limited(1)).with_alignment(Alignment::Enemy),
            ))
            .id();
        app.update();

        app.world_mut()
            .write_message(DamageEvent::new(target, causer, 2));
        app.update();

        let health = app.world().get::<CharacterHealth>(target).unwrap();
        assert_eq!(health.health(), 3);
    }

    #[test]
    fn test_pipeline_is_gated_outside_in_game() {
        let mut app = plugin_app();
        let target = app
            .world_mut()
            .spawn((
                Character,
                CharacterHealth::new(5, HealthCap::Limited(5))
                    .with_alignment(Alignment::Player)
                    .with_lives(Lives::Count(2), Lives::Count(2)),
            ))
            .id();
        let causer = app
            .world_mut()
            .spawn((
                Character,
                CharacterHealth::new(1, HealthCap::Limited(1)).with_alignment(Alignment::Enemy),
            ))
            .id();
        app.update();

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::GameOver);
        app.update(); // state transition applies

        app.world_mut()
            .write_message(DamageEvent::new(target, causer, 2));
        app.update();

        // Nothing processed the hit once the game left InGame
        let health = app.world().get::<CharacterHealth>(target).unwrap();
        assert_eq!(health.health(), 5);
    }
}
