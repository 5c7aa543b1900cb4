//! Discrete actions and the movement intents they decode to.
//!
//! A policy emits one [`ActionVector`] per agent per tick: five small
//! integers with bounded domains. The controller decodes it into a
//! [`ControlIntent`] — an enum-based representation in which translation
//! and rotation are mutually exclusive by construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DriveDirection {
    Forward,
    Backward,
}

impl DriveDirection {
    /// Multiplier applied to the agent's forward axis (+1 forward, −1 back).
    pub fn sign(self) -> f64 {
        match self {
            DriveDirection::Forward => 1.0,
            DriveDirection::Backward => -1.0,
        }
    }
}

/// Rotation direction about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnDirection {
    /// Positive yaw rate (clockwise seen from above).
    Right,
    /// Negative yaw rate.
    Left,
}

impl TurnDirection {
    /// Multiplier applied to the turn rate (+1 right, −1 left).
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Right => 1.0,
            TurnDirection::Left => -1.0,
        }
    }
}

/// Physical intent for one tick: hold still, drive, or turn.
///
/// Exactly one variant is active per tick, which encodes the invariant that
/// translation and rotation intents are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementIntent {
    /// No linear or rotational intent.
    #[default]
    Hold,
    /// Drive along the forward axis (or its negation).
    Drive(DriveDirection),
    /// Rotate in place.
    Turn(TurnDirection),
}

/// Full decoded intent for one tick: movement plus the shoot flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlIntent {
    pub movement: MovementIntent,
    pub shoot: bool,
}

impl ControlIntent {
    /// The do-nothing intent.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// One policy output for one agent: five bounded discrete axes.
///
/// | Axis          | Domain | Meaning                                  |
/// |---------------|--------|------------------------------------------|
/// | `forward`     | 0..=2  | 0 none, 1 forward, 2 backward            |
/// | `rotate`      | 0..=2  | 0 none, 1 right, 2 left                  |
/// | `shoot`       | 0..=1  | 1 fires the laser for this tick          |
/// | `seek_target` | 0..=1  | 1 auto-navigates to the nearest target   |
/// | `seek_base`   | 0..=1  | 1 auto-navigates to the home base        |
///
/// Values outside an axis domain are treated as 0 for that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionVector {
    pub forward: u32,
    pub rotate: u32,
    pub shoot: u32,
    pub seek_target: u32,
    pub seek_base: u32,
}

impl ActionVector {
    /// The all-zero action (no movement, no shooting, no seeking).
    pub fn idle() -> Self {
        Self::default()
    }

    /// Builds an action from the raw 5-element wire layout
    /// `[forward, rotate, shoot, seek_target, seek_base]`.
    pub fn from_array(axes: [u32; 5]) -> Self {
        Self {
            forward: axes[0],
            rotate: axes[1],
            shoot: axes[2],
            seek_target: axes[3],
            seek_base: axes[4],
        }
    }

    /// Returns the raw 5-element wire layout.
    pub fn as_array(&self) -> [u32; 5] {
        [
            self.forward,
            self.rotate,
            self.shoot,
            self.seek_target,
            self.seek_base,
        ]
    }

    /// Decoded forward selector; out-of-domain values decode to `None`.
    pub fn drive(&self) -> Option<DriveDirection> {
        match self.forward {
            1 => Some(DriveDirection::Forward),
            2 => Some(DriveDirection::Backward),
            _ => None,
        }
    }

    /// Decoded rotate selector; out-of-domain values decode to `None`.
    pub fn turn(&self) -> Option<TurnDirection> {
        match self.rotate {
            1 => Some(TurnDirection::Right),
            2 => Some(TurnDirection::Left),
            _ => None,
        }
    }

    /// Whether the shoot flag is set (exactly 1; anything else is off).
    pub fn wants_shoot(&self) -> bool {
        self.shoot == 1
    }

    /// Whether the go-to-nearest-target override is set.
    pub fn wants_seek_target(&self) -> bool {
        self.seek_target == 1
    }

    /// Whether the go-to-base override is set.
    pub fn wants_seek_base(&self) -> bool {
        self.seek_base == 1
    }
}
