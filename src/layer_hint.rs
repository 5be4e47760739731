//! Optional 2D layer pre-solver for runs of identical items ("optimized"
//! sort mode). Grouped rectangles of one shape tile perfectly on a grid, so
//! this reduces the best-fit/long-side-fit/area-fit/contact-point/neat-row
//! ensemble to the grid arrangement directly, rather than scoring five
//! heuristics that converge on the same answer for congruent rectangles.

use crate::bin::Bin;
use crate::item::ItemHandle;
use crate::registry::ItemRegistry;

/// Runs the layer hint over `handles` (already sorted for the enclosing
/// cluster) and returns whatever it did not place, in original order, for
/// the caller to feed through the normal search.
pub fn run(registry: &mut ItemRegistry, bin: &mut Bin, handles: Vec<ItemHandle>) -> Vec<ItemHandle> {
    let mut leftover = Vec::new();
    let mut z = 0.0_f64;
    let mut i = 0;
    while i < handles.len() {
        let mut j = i + 1;
        while j < handles.len() && registry.get(handles[j]).equals_loosely(registry.get(handles[i])) {
            j += 1;
        }
        let run = handles[i..j].to_vec();
        let (new_z, run_leftover) = pack_shape(registry, bin, &run, z);
        z = new_z;
        leftover.extend(run_leftover);
        i = j;
    }
    leftover
}

fn pack_shape(registry: &mut ItemRegistry, bin: &mut Bin, run: &[ItemHandle], mut z: f64) -> (f64, Vec<ItemHandle>) {
    let base = registry.get(run[0]);
    let (base_w, base_d, base_h) = (base.original_width, base.original_depth, base.original_height);

    let cols_flat = (bin.width / base_w).floor() as usize;
    let rows_flat = (bin.depth / base_d).floor() as usize;
    let cols_rot = (bin.width / base_d).floor() as usize;
    let rows_rot = (bin.depth / base_w).floor() as usize;

    let (chosen_w, chosen_d, chosen_rotation, cols) = if cols_rot * rows_rot > cols_flat * rows_flat {
        (base_d, base_w, 1u8, cols_rot)
    } else {
        (base_w, base_d, 0u8, cols_flat)
    };
    let per_layer_capacity = cols * if chosen_rotation == 1 { rows_rot } else { rows_flat };

    if per_layer_capacity == 0 {
        return (z, run.to_vec());
    }

    let mut idx = 0;
    let mut leftover = Vec::new();
    while idx < run.len() {
        if z + base_h > bin.height {
            leftover.extend_from_slice(&run[idx..]);
            break;
        }

        let take = per_layer_capacity.min(run.len() - idx);
        let layer = &run[idx..idx + take];
        let mut placed_in_layer = 0;
        for (slot, &handle) in layer.iter().enumerate() {
            if bin.actual_weight_util + registry.get(handle).weight > bin.max_weight {
                leftover.push(handle);
                continue;
            }

            let col = slot % cols;
            let row = slot / cols;
            let x = col as f64 * chosen_w;
            let y = row as f64 * chosen_d;
            registry.get_mut(handle).position = [x, y, z];

            let saved_rotations = registry.get(handle).allowed_rotations.clone();
            registry.get_mut(handle).allowed_rotations = chosen_rotation.to_string();
            let placed = bin.place_item_in_bin(registry, handle);
            registry.get_mut(handle).allowed_rotations = saved_rotations;

            if placed {
                bin.add_fitted_item(registry, handle);
                placed_in_layer += 1;
            } else {
                leftover.push(handle);
            }
        }

        idx += take;
        if placed_in_layer == 0 {
            leftover.extend_from_slice(&run[idx..]);
            break;
        }
        z += base_h;
    }

    (z, leftover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bin::PackingDirection;
    use crate::gravity::Gravity;
    use crate::item::Item;

    #[test]
    fn identical_cubes_tile_the_footprint() {
        let mut registry = ItemRegistry::new();
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(registry.add_item(Item::new(
                "x".into(),
                5.0,
                5.0,
                5.0,
                1.0,
                String::new(),
                None,
                None,
            )));
        }
        let mut bin = Bin::new(
            1,
            "standard".into(),
            10.0,
            10.0,
            10.0,
            1000.0,
            Gravity::new(0.0),
            PackingDirection::BottomUp,
            4,
        );
        let leftover = run(&mut registry, &mut bin, handles);
        assert!(leftover.is_empty());
        assert_eq!(bin.items.len(), 4);
    }

    #[test]
    fn shape_that_cannot_fit_even_once_is_left_for_the_normal_path() {
        let mut registry = ItemRegistry::new();
        let h = registry.add_item(Item::new(
            "x".into(),
            20.0,
            20.0,
            1.0,
            1.0,
            String::new(),
            None,
            None,
        ));
        let mut bin = Bin::new(
            1,
            "standard".into(),
            10.0,
            10.0,
            10.0,
            1000.0,
            Gravity::new(0.0),
            PackingDirection::BottomUp,
            1,
        );
        let leftover = run(&mut registry, &mut bin, vec![h]);
        assert_eq!(leftover, vec![h]);
        assert!(bin.items.is_empty());
    }
}
