//! Turning raw host input into drive values.

/*
Drive Signals
=============

The engine animates along a single scalar. Hosts have richer input: a
rotation sensor reporting three axes, or a finger dragging across the
screen. `DriveSignal` folds either into the scalar and applies a common
sensitivity factor.

MOTION
    Every rotation reading becomes   x * 2 + y + z.
    Readings arrive much faster than frames, so they are only stored.
    `poll()` once per frame yields a value when the reading moved by more
    than 0.001 since the last one handed out.

TOUCH_DISTANCE
    A drag yields its length from the touch-down point, scaled down by 500
    and wrapped into one turn:   (dist / 500) mod 2π + committed

TOUCH_ANGLE
    A drag yields the direction from the touch-down point to the finger,
    measured from the +x axis and running through [0, 2π):

        dy > 0     acos(dx / dist)
        dy <= 0    2π - acos(dx / dist)

    then wrapped into one turn and added to the committed value.

Lifting the finger commits the last touch reading, so the next drag carries
on from where the previous one ended instead of snapping back.

Every produced value is `reading * sensitivity`.
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default multiplier from a sensor or touch reading to a drive value.
pub const DEFAULT_SENSITIVITY: f32 = 6.0;

/// Smallest motion reading change that produces a new drive value.
pub const MOTION_THRESHOLD: f32 = 0.001;

/// Drag length, in host pixels, that advances a touch-distance reading by 1.
pub const TOUCH_DISTANCE_SCALE: f32 = 500.0;

/// Where drive values come from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriveMode {
    /// Device rotation.
    #[default]
    Motion,
    /// Drag length from the touch-down point.
    TouchDistance,
    /// Drag direction from the touch-down point.
    TouchAngle,
}

impl DriveMode {
    pub const ALL: [DriveMode; 3] = [
        DriveMode::Motion,
        DriveMode::TouchDistance,
        DriveMode::TouchAngle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DriveMode::Motion => "motion",
            DriveMode::TouchDistance => "touch distance",
            DriveMode::TouchAngle => "touch angle",
        }
    }

    /// The next mode in [`DriveMode::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            DriveMode::Motion => DriveMode::TouchDistance,
            DriveMode::TouchDistance => DriveMode::TouchAngle,
            DriveMode::TouchAngle => DriveMode::Motion,
        }
    }

    #[inline]
    pub fn is_touch(self) -> bool {
        !matches!(self, DriveMode::Motion)
    }
}

/// Stateful adapter from sensor readings or touch gestures to drive values.
#[derive(Debug, Clone)]
pub struct DriveSignal {
    mode: DriveMode,
    sensitivity: f32,
    /// Latest motion reading, or the committed touch reading
    current: f32,
    /// Motion reading last handed out by `poll`
    last_polled: f32,
    anchor: Option<(f32, f32)>,
}

impl DriveSignal {
    pub fn new(mode: DriveMode) -> Self {
        Self {
            mode,
            sensitivity: DEFAULT_SENSITIVITY,
            current: 0.0,
            last_polled: 0.0,
            anchor: None,
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    #[inline]
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Switch modes. A drag in progress is dropped; the committed value is kept.
    pub fn set_mode(&mut self, mode: DriveMode) {
        self.mode = mode;
        self.anchor = None;
    }

    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Change the sensitivity and return the current reading rescaled by it.
    pub fn set_sensitivity(&mut self, sensitivity: f32) -> f32 {
        self.sensitivity = sensitivity;
        self.value()
    }

    /// Current reading times sensitivity.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current * self.sensitivity
    }

    /// Store a rotation reading. Ignored outside [`DriveMode::Motion`].
    pub fn on_rotation(&mut self, axes: [f32; 3]) {
        if self.mode == DriveMode::Motion {
            self.current = motion_reading(axes);
        }
    }

    /// Drive value for this frame, if the motion reading moved enough.
    pub fn poll(&mut self) -> Option<f32> {
        if self.mode != DriveMode::Motion {
            return None;
        }
        if (self.last_polled - self.current).abs() > MOTION_THRESHOLD {
            self.last_polled = self.current;
            Some(self.value())
        } else {
            None
        }
    }

    /// Start a drag at `(x, y)`.
    pub fn touch_down(&mut self, x: f32, y: f32) {
        if self.mode.is_touch() {
            self.anchor = Some((x, y));
        }
    }

    /// Drive value for the finger at `(x, y)`.
    ///
    /// `None` without a drag in progress or while the finger sits on the
    /// touch-down point.
    pub fn touch_move(&mut self, x: f32, y: f32) -> Option<f32> {
        self.touch_reading(x, y).map(|reading| reading * self.sensitivity)
    }

    /// End the drag at `(x, y)`, committing its reading.
    pub fn touch_up(&mut self, x: f32, y: f32) {
        if let Some(reading) = self.touch_reading(x, y) {
            self.current = reading;
        }
        self.anchor = None;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    fn touch_reading(&self, x: f32, y: f32) -> Option<f32> {
        let (ax, ay) = self.anchor?;
        let (dx, dy) = (x - ax, y - ay);
        let dist = (dx * dx + dy * dy).sqrt();
        if dist == 0.0 || !dist.is_finite() {
            return None;
        }

        let turn = match self.mode {
            DriveMode::TouchAngle => {
                let angle = (dx / dist).clamp(-1.0, 1.0).acos();
                if dy > 0.0 {
                    angle
                } else {
                    TAU - angle
                }
            }
            DriveMode::TouchDistance => dist / TOUCH_DISTANCE_SCALE,
            DriveMode::Motion => return None,
        };
        Some(turn % TAU + self.current)
    }
}

impl Default for DriveSignal {
    fn default() -> Self {
        Self::new(DriveMode::default())
    }
}

/// Fold three rotation axes into one reading.
#[inline]
pub fn motion_reading([x, y, z]: [f32; 3]) -> f32 {
    x * 2.0 + y + z
}
