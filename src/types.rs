//! Core spatial types for the arena.
//!
//! Defines teams, 3D positions with planar (ground-plane) helpers, and the
//! yaw angle conventions used by navigation and observation encoding.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two competing teams.
///
/// Teams are encoded as `1` (red) and `2` (blue) wherever a numeric id is
/// needed, so that `0` can mean "no team" in observation vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Returns both teams in a fixed order.
    pub fn all() -> [Team; 2] {
        [Team::Red, Team::Blue]
    }

    /// Returns the opposing team.
    pub fn enemy(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// Numeric id used in observation encoding (1 = red, 2 = blue, 0 = none).
    pub fn id(self) -> u32 {
        match self {
            Team::Red => 1,
            Team::Blue => 2,
        }
    }

    /// Zero-based index for per-team arrays (0 = red, 1 = blue).
    pub fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
        }
    }
}

/// A position or direction in the arena.
///
/// The arena floor is the X-Z plane; Y points up. Agents move and aim in the
/// ground plane only, so most helpers ignore the Y component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new vector.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin / zero vector.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Euclidean distance to `other` in the ground plane (Y ignored).
    pub fn planar_distance_to(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Compass-style bearing from `self` toward `target`, in degrees.
    ///
    /// 0° points along +Z, 90° along +X, wrapped to (−180, 180]. Returns 0
    /// when the two points coincide in the ground plane.
    pub fn planar_bearing_to(&self, target: &Vec3) -> f64 {
        let dx = target.x - self.x;
        let dz = target.z - self.z;
        if dx == 0.0 && dz == 0.0 {
            return 0.0;
        }
        wrap_deg(dx.atan2(dz).to_degrees())
    }

    /// Unit vector in the ground plane for a yaw angle in degrees.
    ///
    /// Yaw 0 faces +Z; increasing yaw turns toward +X (a right turn when
    /// seen from above).
    pub fn from_yaw(yaw_deg: f64) -> Self {
        let r = yaw_deg.to_radians();
        Self::new(r.sin(), 0.0, r.cos())
    }

    /// Planar dot product with `other` (Y ignored).
    pub fn planar_dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.z * other.z
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Wraps an angle in degrees to the range (−180, 180].
pub fn wrap_deg(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Signed yaw delta, in degrees, from a heading to the bearing of a target.
///
/// Positive means the target lies to the agent's right (turning right, i.e.
/// increasing yaw, reduces the magnitude); negative means it lies to the
/// left. Range (−180, 180].
pub fn signed_yaw_delta(yaw_deg: f64, from: &Vec3, target: &Vec3) -> f64 {
    wrap_deg(from.planar_bearing_to(target) - yaw_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_ids_and_enemies() {
        assert_eq!(Team::Red.id(), 1);
        assert_eq!(Team::Blue.id(), 2);
        assert_eq!(Team::Red.enemy(), Team::Blue);
        assert_eq!(Team::Blue.enemy(), Team::Red);
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 5.0, 0.0);
        let b = Vec3::new(3.0, -2.0, 4.0);
        assert!((a.planar_distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let o = Vec3::zero();
        assert!((o.planar_bearing_to(&Vec3::new(0.0, 0.0, 1.0)) - 0.0).abs() < 1e-10);
        assert!((o.planar_bearing_to(&Vec3::new(1.0, 0.0, 0.0)) - 90.0).abs() < 1e-10);
        assert!((o.planar_bearing_to(&Vec3::new(-1.0, 0.0, 0.0)) + 90.0).abs() < 1e-10);
        assert!((o.planar_bearing_to(&Vec3::new(0.0, 0.0, -1.0)) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn bearing_of_coincident_points_is_zero() {
        let p = Vec3::new(2.0, 0.0, 2.0);
        assert_eq!(p.planar_bearing_to(&p), 0.0);
    }

    #[test]
    fn from_yaw_matches_bearing() {
        for yaw in [-135.0, -90.0, 0.0, 45.0, 90.0, 180.0] {
            let dir = Vec3::from_yaw(yaw);
            let bearing = Vec3::zero().planar_bearing_to(&dir);
            assert!((wrap_deg(bearing - yaw)).abs() < 1e-10, "yaw {}", yaw);
        }
    }

    #[test]
    fn wrap_deg_range() {
        assert_eq!(wrap_deg(180.0), 180.0);
        assert_eq!(wrap_deg(-180.0), 180.0);
        assert!((wrap_deg(540.0) - 180.0).abs() < 1e-10);
        assert!((wrap_deg(190.0) + 170.0).abs() < 1e-10);
        assert!((wrap_deg(-190.0) - 170.0).abs() < 1e-10);
    }

    #[test]
    fn yaw_delta_sign_convention() {
        // Facing +Z, a target due +X is 90° to the right.
        let o = Vec3::zero();
        let east = Vec3::new(10.0, 0.0, 0.0);
        let west = Vec3::new(-10.0, 0.0, 0.0);
        assert!((signed_yaw_delta(0.0, &o, &east) - 90.0).abs() < 1e-10);
        assert!((signed_yaw_delta(0.0, &o, &west) + 90.0).abs() < 1e-10);
    }

    #[test]
    fn yaw_delta_zero_when_facing_target() {
        let o = Vec3::zero();
        let ahead = Vec3::new(0.0, 0.0, 10.0);
        assert!(signed_yaw_delta(0.0, &o, &ahead).abs() < 1e-10);
    }
}
