use glam::Vec2;

/// Planar movement relative to the player's facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

/// A high-level action applied to the world during a tick.
///
/// Produced from an [`InputSnapshot`](crate::InputSnapshot); headless drivers
/// may also construct them directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Push the player along a direction relative to where it faces.
    Move(MoveDirection),
    /// Yaw the player; `-1.0` turns left, `1.0` turns right.
    Turn(f32),
    /// Pointer motion in pixels since the last frame.
    Look(Vec2),
    /// Spawn a bullet in front of the player.
    Fire,
    /// Switch between first- and third-person view.
    ToggleCamera,
    /// Request the driver to stop.
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_move_is_constructible() {
        let a = Action::Move(MoveDirection::Forward);
        assert!(matches!(a, Action::Move(MoveDirection::Forward)));
    }

    #[test]
    fn action_look_carries_delta() {
        let a = Action::Look(Vec2::new(4.0, -2.0));
        let Action::Look(delta) = a else {
            panic!("expected look");
        };
        assert_eq!(delta, Vec2::new(4.0, -2.0));
    }
}
