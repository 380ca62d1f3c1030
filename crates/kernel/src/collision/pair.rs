use crate::object::{GameObject, ObjectKind};
use serde::{Deserialize, Serialize};

/// What happens when two dynamic objects overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairResponse {
    /// No physical response.
    Ignore,
    /// Both objects die.
    Annihilate,
    /// Push apart and split the combined energy along the contact axis.
    Elastic,
}

/// Response table, keyed on the canonical (smaller, larger) kind pair.
/// Arguments may come in either order.
pub fn response_for(a: ObjectKind, b: ObjectKind) -> PairResponse {
    let (first, second) = if b < a { (b, a) } else { (a, b) };
    match (first, second) {
        (ObjectKind::Player, ObjectKind::Bullet) => PairResponse::Ignore,
        (ObjectKind::Bullet, ObjectKind::Cube) => PairResponse::Annihilate,
        _ => PairResponse::Elastic,
    }
}

/// A detected overlap between two dynamic objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    pub response: PairResponse,
    /// Centre distance at detection time.
    pub distance: f32,
}

/// Whether two bounding spheres overlap.
pub fn overlaps(a: &GameObject, b: &GameObject) -> bool {
    a.position().distance(b.position()) < a.radius + b.radius
}

/// Detect and resolve one pair. Returns `None` when the spheres do not touch.
///
/// The outcome does not depend on argument order: the pair is first put in
/// canonical order (by kind, ties keep the given order) and the contact axis
/// is flipped with it.
pub fn resolve_pair(a: &mut GameObject, b: &mut GameObject) -> Option<PairContact> {
    let mut v = a.position() - b.position();
    let d = v.length();
    if d >= a.radius + b.radius {
        return None;
    }

    let (o1, o2) = if b.kind() < a.kind() {
        v = -v;
        (b, a)
    } else {
        (a, b)
    };

    let response = response_for(o1.kind(), o2.kind());
    match response {
        PairResponse::Ignore => {}
        PairResponse::Annihilate => {
            o1.alive = false;
            o2.alive = false;
        }
        PairResponse::Elastic => {
            // The push uses the raw offset scaled by the distance.
            let push = v * (d / 2.0);
            o1.transform.position += push;
            o2.transform.position -= push;

            let axis = v.normalize_or_zero();
            let share = (o1.energy.length() + o2.energy.length()) / 2.0;
            o1.energy = axis * share;
            o2.energy = -axis * share;
        }
    }

    Some(PairContact {
        response,
        distance: d,
    })
}
