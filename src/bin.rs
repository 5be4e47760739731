//! A single container and the placement search over it.

use crate::constants::{Axis, AXIS_ORDER_WDH, AXIS_ORDER_WHD};
use crate::geometry;
use crate::gravity::Gravity;
use crate::intersection_cache::IntersectionCache;
use crate::item::ItemHandle;
use crate::kdtree::KdTree;
use crate::registry::ItemRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackingDirection {
    BottomUp,
    BackToFront,
}

impl PackingDirection {
    fn axis_order(self) -> [Axis; 3] {
        match self {
            PackingDirection::BottomUp => AXIS_ORDER_WDH,
            PackingDirection::BackToFront => AXIS_ORDER_WHD,
        }
    }
}

/// Target kd-tree depth `D* = ceil(sqrt(N/125)) + 1` for an estimated fit
/// count `N`.
fn kdtree_depth_for_capacity(estimated_items: usize) -> u32 {
    let n = estimated_items as f64;
    ((n / 125.0).sqrt().ceil() as u32) + 1
}

#[derive(Debug)]
pub struct Bin {
    pub id: u32,
    pub type_tag: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub max_weight: f64,
    pub gravity: Gravity,
    pub packing_direction: PackingDirection,

    pub items: Vec<ItemHandle>,
    pub unfitted_items: Vec<ItemHandle>,

    x_free: Vec<ItemHandle>,
    y_free: Vec<ItemHandle>,
    z_free: Vec<ItemHandle>,

    placed_max_dims: [f64; 3],
    pub actual_volume_util: f64,
    pub actual_weight_util: f64,

    kdtree: KdTree,
    cache: IntersectionCache,
}

impl Bin {
    pub fn new(
        id: u32,
        type_tag: String,
        width: f64,
        depth: f64,
        height: f64,
        max_weight: f64,
        gravity: Gravity,
        packing_direction: PackingDirection,
        estimated_items: usize,
    ) -> Self {
        Bin {
            id,
            type_tag,
            width,
            depth,
            height,
            max_weight,
            gravity,
            packing_direction,
            items: Vec::new(),
            unfitted_items: Vec::new(),
            x_free: Vec::new(),
            y_free: Vec::new(),
            z_free: Vec::new(),
            placed_max_dims: [0.0, 0.0, 0.0],
            actual_volume_util: 0.0,
            actual_weight_util: 0.0,
            kdtree: KdTree::new(kdtree_depth_for_capacity(estimated_items), [width, depth, height]),
            cache: IntersectionCache::new(),
        }
    }

    pub fn dims(&self) -> [f64; 3] {
        [self.width, self.depth, self.height]
    }

    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }

    fn free_list(&self, axis: Axis) -> &[ItemHandle] {
        match axis {
            Axis::Width => &self.x_free,
            Axis::Depth => &self.y_free,
            Axis::Height => &self.z_free,
        }
    }

    /// Try every allowed rotation of `handle`, at its current `position`,
    /// against everything already placed. Leaves the item rotated to whatever
    /// succeeded; resets it to its original orientation on total failure.
    pub fn place_item_in_bin(&mut self, registry: &mut ItemRegistry, handle: ItemHandle) -> bool {
        let allowed: Vec<u8> = registry
            .get(handle)
            .allowed_rotations
            .chars()
            .map(|c| c.to_digit(10).unwrap() as u8)
            .collect();

        'rotation: for rotation in allowed {
            registry.get_mut(handle).rotate(rotation);
            let item = registry.get(handle);

            let fp = item.furthest_point();
            if fp[0] > self.width || fp[1] > self.depth || fp[2] > self.height {
                continue;
            }

            let search_extent = [
                self.placed_max_dims[0] + item.width,
                self.placed_max_dims[1] + item.depth,
                self.placed_max_dims[2] + item.height,
            ];
            let mut candidates = Vec::new();
            self.kdtree.query(item.position, search_extent, &mut candidates);

            for &candidate in &candidates {
                let candidate_item = registry.get(candidate);
                let trying_item = registry.get(handle);
                if geometry::intersecting(trying_item, candidate_item) {
                    let boundary = geometry::nearest_boundary(trying_item, candidate_item);
                    self.cache.add_intersection(trying_item.position, boundary);
                    continue 'rotation;
                }
            }

            if self.gravity.enabled() || registry.get(handle).gravity_strength.is_some() {
                let placed_items: Vec<_> = self.items.iter().map(|&h| registry.get(h)).collect();
                let item = registry.get(handle);
                if !self.gravity.obeys(0.0, &placed_items, item) {
                    continue;
                }
            }

            return true;
        }

        registry.get_mut(handle).reset_rotation();
        false
    }

    /// For every non-first item: try placing it face-to-face against every
    /// already-placed reference item, axis by axis in the bin's configured
    /// order.
    pub fn search_position_and_place_item(&mut self, registry: &mut ItemRegistry, handle: ItemHandle) -> bool {
        for axis in self.packing_direction.axis_order() {
            let references = self.free_list(axis).to_vec();
            for reference in references {
                let ref_item = registry.get(reference);
                let ref_pos = ref_item.position;
                let ref_extent = ref_item.current_dimensions()[axis as usize];

                let mut trying_position = ref_pos;
                trying_position[axis as usize] += ref_extent;
                registry.get_mut(handle).position = trying_position;

                let smallest = registry.get(handle).smallest_dimension();
                if self.cache.is_cache_hit(trying_position, smallest) {
                    continue;
                }

                if self.place_item_in_bin(registry, handle) {
                    self.add_fitted_item(registry, handle);
                    return true;
                }
            }
        }
        log::warn!(
            "item {} unfittable in bin {} under every allowed rotation",
            registry.get(handle).id,
            self.id
        );
        self.unfitted_items.push(handle);
        false
    }

    /// Commit a successfully placed item: record it, update aggregates,
    /// insert it into the spatial index and free lists, and prune any free
    /// anchors the new item now occludes.
    pub(crate) fn add_fitted_item(&mut self, registry: &mut ItemRegistry, handle: ItemHandle) {
        self.items.push(handle);
        let item = registry.get(handle);
        self.actual_volume_util += item.volume;
        self.actual_weight_util += item.weight;
        let fp = item.furthest_point();
        for axis in 0..3 {
            self.placed_max_dims[axis] = self.placed_max_dims[axis].max(fp[axis]);
        }
        self.kdtree.insert(handle, fp);

        self.x_free.push(handle);
        self.y_free.push(handle);
        let new_fp_height = fp[2];
        let insert_at = self
            .z_free
            .iter()
            .position(|&h| registry.get(h).furthest_point_height() > new_fp_height)
            .unwrap_or(self.z_free.len());
        self.z_free.insert(insert_at, handle);

        self.prune_free_list(registry, handle, Axis::Width);
        self.prune_free_list(registry, handle, Axis::Depth);
        self.prune_free_list(registry, handle, Axis::Height);
    }

    fn prune_free_list(&mut self, registry: &ItemRegistry, new_handle: ItemHandle, axis: Axis) {
        let new_item = registry.get(new_handle);
        let new_pos_axis = new_item.position[axis as usize];
        let list = match axis {
            Axis::Width => &mut self.x_free,
            Axis::Depth => &mut self.y_free,
            Axis::Height => &mut self.z_free,
        };
        list.retain(|&h| {
            if h == new_handle {
                return true;
            }
            let in_bin = registry.get(h);
            let occluded = new_pos_axis == in_bin.furthest_point()[axis as usize]
                && geometry::intersecting_xy(new_item, in_bin)
                && geometry::intersecting_z(new_item, in_bin);
            !occluded
        });
    }

    pub fn add_unfitted_item(&mut self, handle: ItemHandle) {
        self.unfitted_items.push(handle);
    }

    pub fn actual_volume_util_percentage(&self) -> f64 {
        (self.actual_volume_util / self.volume() * 100.0).max(0.0)
    }

    pub fn actual_weight_util_percentage(&self) -> f64 {
        if self.max_weight <= 0.0 {
            return 0.0;
        }
        (self.actual_weight_util / self.max_weight * 100.0).max(0.0)
    }
}
