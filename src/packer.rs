//! Top-level aggregation across consolidation groups.

use rayon::prelude::*;

use crate::bin::PackingDirection;
use crate::cluster::{Cluster, ClusterSpec};
use crate::gravity::Gravity;
use crate::item::ItemHandle;
use crate::registry::{ItemRegistry, SortMethod};

pub struct PackerSpec {
    pub type_tag: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub max_weight: f64,
    pub gravity_strength: f64,
    pub packing_direction: PackingDirection,
    pub available_bins: Option<u32>,
    pub sort_method: SortMethod,
}

pub struct Packer {
    spec: PackerSpec,
    clusters: Vec<Cluster>,
}

impl Packer {
    pub fn new(spec: PackerSpec) -> Self {
        Packer {
            spec,
            clusters: Vec::new(),
        }
    }

    /// Groups `handles` by consolidation key, sorts each group, and packs
    /// every group into its own run of clusters. Bin ids are numbered
    /// contiguously across the whole request, continuing from one cluster
    /// into the next.
    pub fn pack(&mut self, registry: &mut ItemRegistry, handles: Vec<ItemHandle>) {
        let groups = registry.split_by_consolidation_key(&handles);
        let mut next_bin_id = 1;

        let cluster_spec = ClusterSpec {
            type_tag: self.spec.type_tag.clone(),
            width: self.spec.width,
            depth: self.spec.depth,
            height: self.spec.height,
            max_weight: self.spec.max_weight,
            gravity: Gravity::new(self.spec.gravity_strength),
            packing_direction: self.spec.packing_direction,
            available_bins: self.spec.available_bins,
            sort_method: self.spec.sort_method,
        };

        for (_key, mut group_handles) in groups {
            registry.sort_group(&mut group_handles, self.spec.sort_method);
            let mut cluster = Cluster::new(next_bin_id);
            cluster.pack(registry, &cluster_spec, group_handles);
            next_bin_id += cluster.bins.len() as u32;
            self.clusters.push(cluster);
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn number_of_bins(&self) -> usize {
        self.clusters.iter().map(|c| c.bins.len()).sum()
    }

    /// Average, not volume-weighted, of each bin's own utilisation
    /// percentage.
    pub fn total_volume_util_percentage(&self) -> f64 {
        let n = self.number_of_bins();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .clusters
            .iter()
            .flat_map(|c| c.bins.iter())
            .map(|b| b.actual_volume_util_percentage())
            .sum();
        (sum / n as f64).max(0.0)
    }

    pub fn total_weight_util_percentage(&self) -> f64 {
        let n = self.number_of_bins();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .clusters
            .iter()
            .flat_map(|c| c.bins.iter())
            .map(|b| b.actual_weight_util_percentage())
            .sum();
        (sum / n as f64).max(0.0)
    }

    pub fn unfitted_items(&self) -> Vec<ItemHandle> {
        self.clusters.iter().flat_map(|c| c.unfitted_items.iter().copied()).collect()
    }

    /// True when nothing was packed at all: none of the input items could be
    /// placed in any bin.
    pub fn exception(&self) -> bool {
        self.number_of_bins() == 0
    }
}

/// Runs several independent packing requests across threads. Each request
/// owns its own registry and spec, so there is no shared mutable state
/// between them; within a single request the placement search stays
/// single-threaded, per the concurrency model. Mirrors the batch query
/// pattern in `examples/olwmc-clam/src/search/cakes.rs`'s
/// `batch_rnn_search`, which likewise reaches for `par_iter` only across
/// independent queries, never inside one.
pub fn pack_many(requests: Vec<(ItemRegistry, Vec<ItemHandle>, PackerSpec)>) -> Vec<(ItemRegistry, Packer)> {
    requests
        .into_par_iter()
        .map(|(mut registry, handles, spec)| {
            let mut packer = Packer::new(spec);
            packer.pack(&mut registry, handles);
            (registry, packer)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn spec() -> PackerSpec {
        PackerSpec {
            type_tag: "standard".into(),
            width: 10.0,
            depth: 10.0,
            height: 10.0,
            max_weight: 1000.0,
            gravity_strength: 0.0,
            packing_direction: PackingDirection::BottomUp,
            available_bins: None,
            sort_method: SortMethod::Volume,
        }
    }

    #[test]
    fn two_consolidation_groups_each_fill_their_own_bin() {
        let mut registry = ItemRegistry::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            handles.push(registry.add_item(Item::new(
                "x".into(),
                5.0,
                5.0,
                5.0,
                1.0,
                "A".into(),
                None,
                None,
            )));
        }
        for _ in 0..2 {
            handles.push(registry.add_item(Item::new(
                "y".into(),
                10.0,
                10.0,
                5.0,
                1.0,
                "B".into(),
                None,
                None,
            )));
        }

        let mut packer = Packer::new(spec());
        packer.pack(&mut registry, handles);

        assert_eq!(packer.number_of_bins(), 2);
        assert_eq!(packer.total_volume_util_percentage(), 100.0);
        assert!(packer.unfitted_items().is_empty());
        assert!(!packer.exception());
    }

    #[test]
    fn every_item_unfittable_raises_the_exception_flag() {
        let mut registry = ItemRegistry::new();
        let h = registry.add_item(Item::new(
            "x".into(),
            100.0,
            100.0,
            100.0,
            1.0,
            String::new(),
            Some("0".into()),
            None,
        ));
        let mut packer = Packer::new(spec());
        packer.pack(&mut registry, vec![h]);
        assert_eq!(packer.number_of_bins(), 0);
        assert!(packer.exception());
        assert_eq!(packer.unfitted_items(), vec![h]);
    }

    #[test]
    fn pack_many_runs_independent_requests() {
        let make_request = || {
            let mut registry = ItemRegistry::new();
            let h = registry.add_item(Item::new("x".into(), 5.0, 5.0, 5.0, 1.0, String::new(), None, None));
            (registry, vec![h], spec())
        };
        let requests = vec![make_request(), make_request()];
        let results = pack_many(requests);
        assert_eq!(results.len(), 2);
        for (_, packer) in &results {
            assert_eq!(packer.number_of_bins(), 1);
        }
    }
}
