//! One consolidation group's worth of bins.
//!
//! Converts the source's recursive `startPacking` into an iterative loop —
//! same control flow, no recursion depth tied to the number of bins opened.

use crate::bin::{Bin, PackingDirection};
use crate::constants::START_POSITION;
use crate::gravity::Gravity;
use crate::item::ItemHandle;
use crate::layer_hint;
use crate::registry::{ItemRegistry, SortMethod};

pub struct ClusterSpec {
    pub type_tag: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub max_weight: f64,
    pub gravity: Gravity,
    pub packing_direction: PackingDirection,
    pub available_bins: Option<u32>,
    pub sort_method: SortMethod,
}

pub struct Cluster {
    pub bins: Vec<Bin>,
    pub unfitted_items: Vec<ItemHandle>,
    next_bin_id: u32,
}

impl Cluster {
    pub fn new(starting_bin_id: u32) -> Self {
        Cluster {
            bins: Vec::new(),
            unfitted_items: Vec::new(),
            next_bin_id: starting_bin_id,
        }
    }

    /// Estimate how many of `handles` (in order) a fresh bin can hold, used
    /// only to pre-size the bin's kd-tree. Mirrors the source: it keeps
    /// scanning past an item that wouldn't fit rather than stopping early,
    /// since a smaller item later in the list might still fit the remaining
    /// budget.
    fn estimate_capacity(registry: &ItemRegistry, handles: &[ItemHandle], max_volume: f64, max_weight: f64) -> usize {
        let mut count = 0;
        let mut cum_volume = 0.0;
        let mut cum_weight = 0.0;
        for &h in handles {
            let item = registry.get(h);
            if cum_volume + item.volume < max_volume && cum_weight + item.weight <= max_weight {
                count += 1;
                cum_volume += item.volume;
                cum_weight += item.weight;
            }
        }
        count
    }

    pub fn pack(&mut self, registry: &mut ItemRegistry, spec: &ClusterSpec, mut remaining: Vec<ItemHandle>) {
        while !remaining.is_empty() {
            if let Some(limit) = spec.available_bins {
                if self.bins.len() as u32 >= limit {
                    self.unfitted_items.extend(remaining);
                    return;
                }
            }

            let estimate = Self::estimate_capacity(
                registry,
                &remaining,
                spec.width * spec.depth * spec.height,
                spec.max_weight,
            );
            let bin_id = self.next_bin_id;
            log::trace!("opening bin {bin_id} ({}), estimated capacity {estimate} items", spec.type_tag);
            let mut bin = Bin::new(
                bin_id,
                spec.type_tag.clone(),
                spec.width,
                spec.depth,
                spec.height,
                spec.max_weight,
                spec.gravity,
                spec.packing_direction,
                estimate,
            );
            self.next_bin_id += 1;

            let mut working = remaining;
            if spec.sort_method == SortMethod::Optimized {
                working = layer_hint::run(registry, &mut bin, working);
            }

            for handle in working {
                let item = registry.get(handle);
                let would_exceed_volume = bin.actual_volume_util + item.volume > bin.volume();
                let would_exceed_weight = bin.actual_weight_util + item.weight > bin.max_weight;
                if would_exceed_volume || would_exceed_weight {
                    bin.add_unfitted_item(handle);
                    continue;
                }

                if bin.items.is_empty() {
                    registry.get_mut(handle).position = START_POSITION;
                    if bin.place_item_in_bin(registry, handle) {
                        bin.add_fitted_item(registry, handle);
                        continue;
                    }
                }

                if let Some(&last_unfitted) = bin.unfitted_items.last() {
                    if registry.get(last_unfitted).equals_for_pruning(registry.get(handle)) {
                        bin.add_unfitted_item(handle);
                        continue;
                    }
                }

                bin.search_position_and_place_item(registry, handle);
            }

            if bin.items.is_empty() {
                log::debug!("closing bin {bin_id} empty, discarding it");
                self.unfitted_items.extend(bin.unfitted_items);
                return;
            }

            log::debug!(
                "closing bin {bin_id} with {} items, {} unfitted carried to the next bin",
                bin.items.len(),
                bin.unfitted_items.len()
            );
            remaining = std::mem::take(&mut bin.unfitted_items);
            self.bins.push(bin);
        }
    }
}
