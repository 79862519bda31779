use bevy::prelude::*;

/// Marker for the entity that owns a character's input and health components.
///
/// Movement, animation and collision logic hang off this entity in the game
/// proper; this crate only requires its presence so a `CharacterHealth` can
/// resolve its owner.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Character;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_is_spawnable() {
        let mut world = World::new();
        let entity = world.spawn(Character).id();
        assert!(world.get::<Character>(entity).is_some());
    }

    #[test]
    fn test_character_default() {
        assert_eq!(Character::default(), Character);
    }
}
