use bevy::prelude::*;

use super::sources::{DeviceKind, KeyBindings, TouchControls};
use super::systems::clear_touch_edges_system;

/// Input plugin registering the source resources and the touch edge rollover.
pub fn plugin(app: &mut App) {
    app.init_resource::<KeyBindings>()
        .init_resource::<TouchControls>()
        .init_resource::<DeviceKind>()
        .add_systems(PreUpdate, clear_touch_edges_system);
}
