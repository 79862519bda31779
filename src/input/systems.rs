use bevy::prelude::*;

use super::sources::TouchControls;

/// Rolls the touch-control edges over at the start of each frame, so a
/// `just_pressed` from the UI layer is visible for exactly one frame.
pub fn clear_touch_edges_system(mut touch: ResMut<TouchControls>) {
    touch.clear_just_pressed();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::sources::InputSource;

    #[test]
    fn test_edges_last_one_frame() {
        let mut app = App::new();
        app.init_resource::<TouchControls>();
        app.add_systems(PreUpdate, clear_touch_edges_system);

        app.world_mut().resource_mut::<TouchControls>().press("Jump");
        let touch = app.world().resource::<TouchControls>();
        assert!(touch.just_pressed("Jump"));

        app.update();
        let touch = app.world().resource::<TouchControls>();
        assert!(!touch.just_pressed("Jump"));
        assert!(touch.held("Jump"));
    }
}
