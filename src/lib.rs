pub mod character;
pub mod health;
pub mod input;
pub mod prelude;
pub mod states;

pub use health::plugin as health_plugin;
pub use input::plugin as input_plugin;
