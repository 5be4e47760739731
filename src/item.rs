//! Items and their rotation permutations.

use crate::constants::{DEFAULT_ALLOWED_ROTATIONS, ROTATION_DESCRIPTIONS};
use crate::error::Error;

/// Index into an [`crate::registry::ItemRegistry`]. Cheap to copy, carries no
/// borrow, and is what bins/clusters/the packer pass around instead of the
/// item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(pub usize);

#[derive(Debug, Clone)]
pub struct Item {
    pub id: String,
    pub original_width: f64,
    pub original_depth: f64,
    pub original_height: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub weight: f64,
    pub volume: f64,
    pub position: [f64; 3],
    pub item_cons_key: String,
    pub allowed_rotations: String,
    pub gravity_strength: Option<f64>,
    pub rotation_type: Option<u8>,
    pub rotation_type_description: Option<String>,
}

impl Item {
    pub fn new(
        id: String,
        width: f64,
        depth: f64,
        height: f64,
        weight: f64,
        item_cons_key: String,
        allowed_rotations: Option<String>,
        gravity_strength: Option<f64>,
    ) -> Self {
        let allowed_rotations = match allowed_rotations {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_ALLOWED_ROTATIONS.to_string(),
        };
        let id = if id.is_empty() { "NA".to_string() } else { id };
        Item {
            id,
            original_width: width,
            original_depth: depth,
            original_height: height,
            width,
            depth,
            height,
            weight,
            volume: width * depth * height,
            position: crate::constants::START_POSITION,
            item_cons_key,
            allowed_rotations,
            gravity_strength,
            rotation_type: None,
            rotation_type_description: None,
        }
    }

    pub fn furthest_point_width(&self) -> f64 {
        self.position[0] + self.width
    }

    pub fn furthest_point_depth(&self) -> f64 {
        self.position[1] + self.depth
    }

    pub fn furthest_point_height(&self) -> f64 {
        self.position[2] + self.height
    }

    pub fn furthest_point(&self) -> [f64; 3] {
        [
            self.furthest_point_width(),
            self.furthest_point_depth(),
            self.furthest_point_height(),
        ]
    }

    pub fn current_dimensions(&self) -> [f64; 3] {
        [self.width, self.depth, self.height]
    }

    pub fn smallest_dimension(&self) -> f64 {
        self.width.min(self.depth).min(self.height)
    }

    /// Apply one of the six rotation permutations to the original dimensions.
    /// `rotation_type` must be `0..=5`; callers filter `allowedRotations`
    /// before reaching here.
    pub fn rotate(&mut self, rotation_type: u8) {
        let (w, d, h) = (self.original_width, self.original_depth, self.original_height);
        let (nw, nd, nh) = match rotation_type {
            0 => (w, d, h),
            1 => (d, w, h),
            2 => (h, d, w),
            3 => (d, h, w),
            4 => (w, h, d),
            5 => (h, w, d),
            _ => unreachable!("rotation digit validated before reaching Item::rotate"),
        };
        self.width = nw;
        self.depth = nd;
        self.height = nh;
        self.rotation_type = Some(rotation_type);
        self.rotation_type_description = Some(ROTATION_DESCRIPTIONS[rotation_type as usize].to_string());
    }

    pub fn reset_rotation(&mut self) {
        self.width = self.original_width;
        self.depth = self.original_depth;
        self.height = self.original_height;
        self.rotation_type = None;
        self.rotation_type_description = None;
    }

    /// Dimensions-plus-weight-plus-rotations equality, used by the "skip if
    /// same as previous unfitted item" shortcut.
    pub fn equals_for_pruning(&self, other: &Item) -> bool {
        self.original_width == other.original_width
            && self.original_depth == other.original_depth
            && self.original_height == other.original_height
            && self.weight == other.weight
            && self.allowed_rotations == other.allowed_rotations
    }

    /// Dimensions-only equality, used to group items for the 2D layer hint.
    pub fn equals_loosely(&self, other: &Item) -> bool {
        self.original_width == other.original_width
            && self.original_depth == other.original_depth
            && self.original_height == other.original_height
    }
}

/// Validate raw item fields at the parsing boundary. Never called by the
/// placement core itself.
pub fn validate_item_fields(
    width: f64,
    depth: f64,
    height: f64,
    weight: f64,
    allowed_rotations: &str,
    gravity_strength: Option<f64>,
) -> Result<(), Error> {
    for dim in [width, depth, height] {
        if dim <= 0.0 {
            return Err(Error::NonPositiveDimension(dim));
        }
    }
    if weight < 0.0 {
        return Err(Error::NegativeWeight(weight));
    }
    if allowed_rotations.is_empty() {
        return Err(Error::EmptyAllowedRotations);
    }
    for c in allowed_rotations.chars() {
        if !('0'..='5').contains(&c) {
            return Err(Error::UnknownRotationDigit(c));
        }
    }
    if let Some(g) = gravity_strength {
        if !(0.0..=100.0).contains(&g) {
            return Err(Error::GravityOutOfRange(g));
        }
    }
    Ok(())
}
