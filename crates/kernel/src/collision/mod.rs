//! Collision detection and response.
//!
//! Two independent passes run each tick: sphere-vs-sphere between dynamic
//! objects ([`pair`]) and sphere-vs-triangle against the static terrain
//! ([`surface`]). Both are brute force.

pub mod pair;
pub mod surface;

pub use pair::{PairContact, PairResponse, resolve_pair, response_for};
pub use surface::{SurfaceContact, resolve_surface, resolve_triangle};
