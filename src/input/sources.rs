use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

/// Name of the horizontal raw axis on every source.
pub const AXIS_HORIZONTAL: &str = "Horizontal";
/// Name of the vertical raw axis on every source.
pub const AXIS_VERTICAL: &str = "Vertical";

/// A queryable input backend: named signed axes plus named buttons.
///
/// Edge detection (`just_pressed`) is owned by the source; the adapter keeps
/// no cross-frame memory of its own.
pub trait InputSource {
    /// Raw axis value in [-1, 1]; unknown names read 0.
    fn axis(&self, name: &str) -> f32;
    /// True for every frame the named button is held.
    fn held(&self, name: &str) -> bool;
    /// True exactly on the frame the named button went down.
    fn just_pressed(&self, name: &str) -> bool;
}

/// Device class the adapter branches on, fresh at every query.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceKind {
    #[default]
    Desktop,
    Handheld,
}

/// A named button backed by one or more physical keys.
#[derive(Debug, Clone)]
pub struct ButtonBinding {
    pub name: String,
    pub keys: Vec<KeyCode>,
}

/// A named axis assembled from negative and positive key sets.
#[derive(Debug, Clone)]
pub struct AxisBinding {
    pub name: String,
    pub negative: Vec<KeyCode>,
    pub positive: Vec<KeyCode>,
}

/// Keyboard tables giving names to keys, the stand-in for an engine-level
/// input manager. Games override the defaults by replacing the resource.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub buttons: Vec<ButtonBinding>,
    pub axes: Vec<AxisBinding>,
}

impl KeyBindings {
    pub fn button(&self, name: &str) -> Option<&ButtonBinding> {
        self.buttons.iter().find(|b| b.name == name)
    }

    pub fn axis(&self, name: &str) -> Option<&AxisBinding> {
        self.axes.iter().find(|a| a.name == name)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            buttons: vec![
                ButtonBinding {
                    name: "Jump".into(),
                    keys: vec![KeyCode::Space],
                },
                ButtonBinding {
                    name: "Fire2".into(),
                    keys: vec![KeyCode::KeyJ],
                },
            ],
            axes: vec![
                AxisBinding {
                    name: AXIS_HORIZONTAL.into(),
                    negative: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
                    positive: vec![KeyCode::KeyD, KeyCode::ArrowRight],
                },
                AxisBinding {
                    name: AXIS_VERTICAL.into(),
                    negative: vec![KeyCode::KeyS, KeyCode::ArrowDown],
                    positive: vec![KeyCode::KeyW, KeyCode::ArrowUp],
                },
            ],
        }
    }
}

/// Borrow-view over the keyboard state and its naming tables.
pub struct KeyboardSource<'a> {
    keys: &'a ButtonInput<KeyCode>,
    bindings: &'a KeyBindings,
}

impl<'a> KeyboardSource<'a> {
    pub fn new(keys: &'a ButtonInput<KeyCode>, bindings: &'a KeyBindings) -> Self {
        Self { keys, bindings }
    }
}

impl InputSource for KeyboardSource<'_> {
    fn axis(&self, name: &str) -> f32 {
        let Some(axis) = self.bindings.axis(name) else {
            debug!("no keyboard axis bound as {name:?}");
            return 0.0;
        };
        let negative = axis.negative.iter().any(|key| self.keys.pressed(*key));
        let positive = axis.positive.iter().any(|key| self.keys.pressed(*key));
        (positive as i32 - negative as i32) as f32
    }

    fn held(&self, name: &str) -> bool {
        let Some(button) = self.bindings.button(name) else {
            debug!("no keyboard button bound as {name:?}");
            return false;
        };
        button.keys.iter().any(|key| self.keys.pressed(*key))
    }

    fn just_pressed(&self, name: &str) -> bool {
        let Some(button) = self.bindings.button(name) else {
            debug!("no keyboard button bound as {name:?}");
            return false;
        };
        button.keys.iter().any(|key| self.keys.just_pressed(*key))
    }
}

/// State of the on-screen touch controls, fed by a UI layer outside this
/// crate. Just-pressed edges are cleared once per frame by the input plugin,
/// mirroring `ButtonInput` bookkeeping.
#[derive(Resource, Debug, Clone, Default)]
pub struct TouchControls {
    held: HashSet<String>,
    just_pressed: HashSet<String>,
    axes: HashMap<String, f32>,
}

impl TouchControls {
    pub fn press(&mut self, name: &str) {
        if self.held.insert(name.to_owned()) {
            self.just_pressed.insert(name.to_owned());
        }
    }

    pub fn release(&mut self, name: &str) {
        self.held.remove(name);
    }

    pub fn set_axis(&mut self, name: &str, value: f32) {
        self.axes.insert(name.to_owned(), value.clamp(-1.0, 1.0));
    }

    pub fn clear_just_pressed(&mut self) {
        self.just_pressed.clear();
    }
}

impl InputSource for TouchControls {
    fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    fn held(&self, name: &str) -> bool {
        self.held.contains(name)
    }

    fn just_pressed(&self, name: &str) -> bool {
        self.just_pressed.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod keyboard_tests {
        use super::*;

        #[test]
        fn test_button_held_and_just_pressed() {
            let bindings = KeyBindings::default();
            let mut keys = ButtonInput::<KeyCode>::default();
            keys.press(KeyCode::Space);

            let source = KeyboardSource::new(&keys, &bindings);
            assert!(source.held("Jump"));
            assert!(source.just_pressed("Jump"));
            assert!(!source.held("Fire2"));
        }

        #[test]
        fn test_held_survives_edge_clear() {
            let bindings = KeyBindings::default();
            let mut keys = ButtonInput::<KeyCode>::default();
            keys.press(KeyCode::Space);
            keys.clear(); // frame rollover

            let source = KeyboardSource::new(&keys, &bindings);
            assert!(source.held("Jump"));
            assert!(!source.just_pressed("Jump"));
        }

        #[test]
        fn test_axis_from_key_pairs() {
            let bindings = KeyBindings::default();
            let mut keys = ButtonInput::<KeyCode>::default();
            keys.press(KeyCode::KeyD);

            let source = KeyboardSource::new(&keys, &bindings);
            assert_eq!(source.axis(AXIS_HORIZONTAL), 1.0);
            assert_eq!(source.axis(AXIS_VERTICAL), 0.0);
        }

        #[test]
        fn test_axis_opposing_keys_cancel() {
            let bindings = KeyBindings::default();
            let mut keys = ButtonInput::<KeyCode>::default();
            keys.press(KeyCode::KeyA);
            keys.press(KeyCode::ArrowRight);

            let source = KeyboardSource::new(&keys, &bindings);
            assert_eq!(source.axis(AXIS_HORIZONTAL), 0.0);
        }

        #[test]
        fn test_unknown_names_read_neutral() {
            let bindings = KeyBindings::default();
            let keys = ButtonInput::<KeyCode>::default();

            let source = KeyboardSource::new(&keys, &bindings);
            assert_eq!(source.axis("Throttle"), 0.0);
            assert!(!source.held("Warp"));
            assert!(!source.just_pressed("Warp"));
        }
    }

    mod touch_tests {
        use super::*;

        #[test]
        fn test_press_sets_held_and_edge() {
            let mut touch = TouchControls::default();
            touch.press("Jump");
            assert!(touch.held("Jump"));
            assert!(touch.just_pressed("Jump"));
        }

        #[test]
        fn test_edge_clears_but_held_remains() {
            let mut touch = TouchControls::default();
            touch.press("Jump");
            touch.clear_just_pressed();
            assert!(touch.held("Jump"));
            assert!(!touch.just_pressed("Jump"));
        }

        #[test]
        fn test_repeat_press_while_held_is_no_edge() {
            let mut touch = TouchControls::default();
            touch.press("Jump");
            touch.clear_just_pressed();
            touch.press("Jump");
            assert!(!touch.just_pressed("Jump"));
        }

        #[test]
        fn test_release_then_press_is_a_new_edge() {
            let mut touch = TouchControls::default();
            touch.press("Jump");
            touch.clear_just_pressed();
            touch.release("Jump");
            touch.press("Jump");
            assert!(touch.just_pressed("Jump"));
        }

        #[test]
        fn test_axis_is_clamped() {
            let mut touch = TouchControls::default();
            touch.set_axis(AXIS_HORIZONTAL, 3.0);
            assert_eq!(touch.axis(AXIS_HORIZONTAL), 1.0);
            touch.set_axis(AXIS_HORIZONTAL, -0.25);
            assert_eq!(touch.axis(AXIS_HORIZONTAL), -0.25);
        }

        #[test]
        fn test_unknown_axis_reads_zero() {
            let touch = TouchControls::default();
            assert_eq!(touch.axis(AXIS_VERTICAL), 0.0);
        }
    }
}
