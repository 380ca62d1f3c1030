use glam::Vec2;

use crate::action::{Action, MoveDirection};
use crate::key::{Key, KeyState};

/// Everything the platform layer observed during one frame.
///
/// `held` drives continuous actions (movement, rotation) on every tick.
/// `pressed` holds keys that went down during the frame; they trigger one-shot
/// actions (fire, camera toggle, exit) once. The pointer delta is consumed
/// once as well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: KeyState,
    pub pressed: Vec<Key>,
    pub pointer_delta: Vec2,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition, keeping `held` and `pressed` consistent.
    pub fn key_event(&mut self, key: Key, down: bool) {
        tracing::trace!(?key, down, "key event");
        if down && !self.held.is_held(key) {
            self.pressed.push(key);
        }
        self.held.set(key, down);
    }

    pub fn add_pointer_motion(&mut self, delta: Vec2) {
        self.pointer_delta += delta;
    }

    /// Actions for the first tick of a frame: held, then look and one-shots.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = self.held_actions();
        actions.extend(self.one_shot_actions());
        actions
    }

    /// Actions that must run exactly once per frame: the pointer look and
    /// any fire, camera or exit press.
    pub fn one_shot_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.pointer_delta != Vec2::ZERO {
            actions.push(Action::Look(self.pointer_delta));
        }
        actions.extend(self.pressed.iter().filter_map(|key| match key {
            Key::Fire => Some(Action::Fire),
            Key::ToggleCamera => Some(Action::ToggleCamera),
            Key::Exit => Some(Action::Exit),
            _ => None,
        }));
        actions
    }

    /// Actions for any further tick in the same frame: held keys only.
    pub fn held_actions(&self) -> Vec<Action> {
        self.held
            .held_keys()
            .filter_map(|key| match key {
                Key::Forward => Some(Action::Move(MoveDirection::Forward)),
                Key::Back => Some(Action::Move(MoveDirection::Back)),
                Key::Left => Some(Action::Move(MoveDirection::Left)),
                Key::Right => Some(Action::Move(MoveDirection::Right)),
                Key::RotateLeft => Some(Action::Turn(-1.0)),
                Key::RotateRight => Some(Action::Turn(1.0)),
                Key::ToggleCamera | Key::Fire | Key::Exit => None,
            })
            .collect()
    }

    /// Start the next frame: keep held keys, forget edges and pointer motion.
    pub fn next_frame(&mut self) {
        self.pressed.clear();
        self.pointer_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_actions() {
        assert!(InputSnapshot::new().actions().is_empty());
    }

    #[test]
    fn held_movement_maps_to_moves() {
        let mut input = InputSnapshot::new();
        input.key_event(Key::Forward, true);
        input.key_event(Key::RotateLeft, true);
        let actions = input.held_actions();
        assert_eq!(
            actions,
            vec![Action::Move(MoveDirection::Forward), Action::Turn(-1.0)]
        );
    }

    #[test]
    fn fire_triggers_once_per_press() {
        let mut input = InputSnapshot::new();
        input.key_event(Key::Fire, true);
        // Auto-repeat from the platform does not re-trigger.
        input.key_event(Key::Fire, true);
        let fires = input
            .actions()
            .into_iter()
            .filter(|a| *a == Action::Fire)
            .count();
        assert_eq!(fires, 1);
        assert!(!input.held_actions().contains(&Action::Fire));

        input.next_frame();
        assert!(!input.actions().contains(&Action::Fire));
    }

    #[test]
    fn pointer_motion_accumulates_into_one_look() {
        let mut input = InputSnapshot::new();
        input.add_pointer_motion(Vec2::new(1.0, 0.0));
        input.add_pointer_motion(Vec2::new(2.0, -1.0));
        let looks: Vec<Action> = input
            .actions()
            .into_iter()
            .filter(|a| matches!(a, Action::Look(_)))
            .collect();
        assert_eq!(looks, vec![Action::Look(Vec2::new(3.0, -1.0))]);
        input.next_frame();
        assert_eq!(input.pointer_delta, Vec2::ZERO);
    }

    #[test]
    fn held_keys_survive_next_frame() {
        let mut input = InputSnapshot::new();
        input.key_event(Key::Back, true);
        input.next_frame();
        assert_eq!(input.held_actions(), vec![Action::Move(MoveDirection::Back)]);
    }

    #[test]
    fn one_shots_exclude_held_movement() {
        let mut input = InputSnapshot::new();
        input.key_event(Key::Left, true);
        input.key_event(Key::ToggleCamera, true);
        input.key_event(Key::Exit, true);
        assert_eq!(
            input.one_shot_actions(),
            vec![Action::ToggleCamera, Action::Exit]
        );
        assert_eq!(
            input.actions(),
            vec![
                Action::Move(MoveDirection::Left),
                Action::ToggleCamera,
                Action::Exit
            ]
        );
    }
}
