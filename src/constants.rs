//! Shared constants mirroring the axis/rotation encodings of the wire format.

/// Axis encoding: 0 = width, 1 = depth, 2 = height. Not exported over the wire;
/// only `rotation_type` and the coordinate fields are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width = 0,
    Depth = 1,
    Height = 2,
}

/// Canonical width-then-depth-then-height iteration order.
pub const AXIS_ORDER_WDH: [Axis; 3] = [Axis::Width, Axis::Depth, Axis::Height];

/// Order used by `packingDirection = BACKTOFRONT`: width, then height, then
/// depth (`BACK_TO_FRONT_ARRAY` in the original source).
pub const AXIS_ORDER_WHD: [Axis; 3] = [Axis::Width, Axis::Height, Axis::Depth];

pub const START_POSITION: [f64; 3] = [0.0, 0.0, 0.0];

/// Default `allowedRotations` when an item omits the field.
pub const DEFAULT_ALLOWED_ROTATIONS: &str = "012345";

/// Human-readable descriptions for each rotation code, in code order.
/// Mirrors the wording the original system attaches to each permutation.
pub const ROTATION_DESCRIPTIONS: [&str; 6] = [
    "No box rotation",
    "Rotate the box around the z-axis by 90°",
    "Rotate the box around the x-axis by 90°",
    "Rotate the box around the x-axis by 90° and then around the z-axis by 90°",
    "Rotate the box around the y-axis by 90°",
    "Rotate the box around the z-axis by 90° and then around the x-axis by 90°",
];
