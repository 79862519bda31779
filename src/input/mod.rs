pub mod adapter;
pub mod components;
pub mod plugin;
pub mod sources;
pub mod systems;

pub use adapter::InputAdapter;
pub use components::{ActionBinding, InputMap};
pub use plugin::plugin;
pub use sources::{
    AxisBinding, ButtonBinding, DeviceKind, InputSource, KeyBindings, KeyboardSource,
    TouchControls, AXIS_HORIZONTAL, AXIS_VERTICAL,
};
pub use systems::clear_touch_edges_system;
