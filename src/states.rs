use bevy::prelude::*;

#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash, States)]
pub enum GameState {
    #[default]
    InGame,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_state_default_is_in_game() {
        assert_eq!(GameState::default(), GameState::InGame);
    }

    #[test]
    fn game_state_has_game_over() {
        let state = GameState::GameOver;
        assert_ne!(state, GameState::InGame);
    }

    #[test]
    fn game_state_derives_clone() {
        let state = GameState::GameOver;
        let cloned = state.clone();
        assert_eq!(state, cloned);
    }
}
