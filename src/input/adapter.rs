use bevy::prelude::*;

use super::components::InputMap;
use super::sources::{DeviceKind, InputSource, AXIS_HORIZONTAL, AXIS_VERTICAL};

/// Query surface over a character's [`InputMap`] and the two device-class
/// sources. Every call is a pure read: the device branch is evaluated fresh,
/// nothing is cached, and edge detection belongs to the sources.
pub struct InputAdapter<'a> {
    map: &'a InputMap,
    device: DeviceKind,
    handheld: &'a dyn InputSource,
    desktop: &'a dyn InputSource,
}

impl<'a> InputAdapter<'a> {
    pub fn new(
        map: &'a InputMap,
        device: DeviceKind,
        handheld: &'a dyn InputSource,
        desktop: &'a dyn InputSource,
    ) -> Self {
        Self {
            map,
            device,
            handheld,
            desktop,
        }
    }

    fn source(&self) -> &'a dyn InputSource {
        match self.device {
            DeviceKind::Handheld => self.handheld,
            DeviceKind::Desktop => self.desktop,
        }
    }

    /// Resolves an action to (source, identifier); unknown actions warn and
    /// resolve to nothing.
    fn resolve(&self, action: &str) -> Option<(&'a dyn InputSource, &'a str)> {
        match self.map.binding(action) {
            Some(binding) => Some(match self.device {
                DeviceKind::Handheld => (self.handheld, binding.handheld.as_str()),
                DeviceKind::Desktop => (self.desktop, binding.keyboard.as_str()),
            }),
            None => {
                warn!("cannot find action: {action}");
                None
            }
        }
    }

    /// True exactly on the frame the bound input went down.
    pub fn is_action_just_activated(&self, action: &str) -> bool {
        self.resolve(action)
            .map(|(source, id)| source.just_pressed(id))
            .unwrap_or(false)
    }

    /// True for every frame the bound input is held.
    pub fn is_action_active(&self, action: &str) -> bool {
        self.resolve(action)
            .map(|(source, id)| source.held(id))
            .unwrap_or(false)
    }

    pub fn raw_axis_x(&self) -> f32 {
        self.source().axis(AXIS_HORIZONTAL).clamp(-1.0, 1.0)
    }

    pub fn raw_axis_y(&self) -> f32 {
        self.source().axis(AXIS_VERTICAL).clamp(-1.0, 1.0)
    }

    pub fn raw_axis(&self) -> Vec2 {
        Vec2::new(self.raw_axis_x(), self.raw_axis_y())
    }

    // Strict sign tests: an axis at exactly 0 is neither direction.

    pub fn is_left_active(&self) -> bool {
        self.raw_axis_x() < 0.0
    }

    pub fn is_right_active(&self) -> bool {
        self.raw_axis_x() > 0.0
    }

    pub fn is_up_active(&self) -> bool {
        self.raw_axis_y() > 0.0
    }

    pub fn is_down_active(&self) -> bool {
        self.raw_axis_y() < 0.0
    }
}
