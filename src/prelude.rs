pub use bevy::prelude::*;
pub use crate::states::*;

// Re-export components and events
pub use crate::character::components::*;
pub use crate::health::components::*;
pub use crate::health::events::*;
pub use crate::health::hooks::*;
pub use crate::input::adapter::*;
pub use crate::input::components::*;
pub use crate::input::sources::*;

// Re-export systems
pub use crate::health::systems::*;
pub use crate::input::systems::*;
