pub mod components;
pub mod events;
pub mod hooks;
pub mod plugin;
pub mod systems;

pub use components::{
    Alignment, CharacterHealth, Cooldown, Damage, DamageInfo, DamageKinds, Expiry, HealthCap,
    HealthState, HitBox, Lives,
};
pub use events::{DamageEvent, DisableHitBoxesEvent, GameOverEvent};
pub use hooks::{HealthHooks, Hook, HookId, HurtPayload};
pub use plugin::{plugin, HealthSets};
pub use systems::{
    apply_damage_system, check_game_over_system, disable_hit_boxes_system,
    initialize_health_system, tick_invulnerability_system, GameOverHandled,
};
