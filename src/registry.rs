//! Owns every item for the duration of one packing call.

use crate::item::{Item, ItemHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMethod {
    Volume,
    Weight,
    Optimized,
}

impl SortMethod {
    pub fn parse(s: &str) -> SortMethod {
        match s.to_ascii_uppercase().as_str() {
            "WEIGHT" => SortMethod::Weight,
            "VOLUME" => SortMethod::Volume,
            _ => SortMethod::Optimized,
        }
    }
}

#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        ItemRegistry { items: Vec::new() }
    }

    pub fn add_item(&mut self, item: Item) -> ItemHandle {
        self.items.push(item);
        ItemHandle(self.items.len() - 1)
    }

    pub fn get(&self, handle: ItemHandle) -> &Item {
        &self.items[handle.0]
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> &mut Item {
        &mut self.items[handle.0]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn all_handles(&self) -> Vec<ItemHandle> {
        (0..self.items.len()).map(ItemHandle).collect()
    }

    /// Group handles by consolidation key, preserving the order in which each
    /// key first appears. An empty key is its own group (per spec, empty is
    /// "grouped as one", i.e. all empty-key items share a single group).
    pub fn split_by_consolidation_key(&self, handles: &[ItemHandle]) -> Vec<(String, Vec<ItemHandle>)> {
        let mut groups: Vec<(String, Vec<ItemHandle>)> = Vec::new();
        for &h in handles {
            let key = self.get(h).item_cons_key.clone();
            if let Some(group) = groups.iter_mut().find(|(k, _)| *k == key) {
                group.1.push(h);
            } else {
                groups.push((key, vec![h]));
            }
        }
        groups
    }

    /// Sort one consolidation group's handles by the requested method. Ties
    /// break on the other metric, descending, matching the original sorter
    /// pair (`consKeyAndVolumeSorter` / `consKeyAndWeightSorter`) collapsed to
    /// a single already-grouped vector.
    pub fn sort_group(&self, handles: &mut [ItemHandle], method: SortMethod) {
        match method {
            SortMethod::Weight => handles.sort_by(|&a, &b| {
                let (ia, ib) = (self.get(a), self.get(b));
                ib.weight
                    .partial_cmp(&ia.weight)
                    .unwrap()
                    .then_with(|| ib.volume.partial_cmp(&ia.volume).unwrap())
                    .then_with(|| a.0.cmp(&b.0))
            }),
            SortMethod::Volume | SortMethod::Optimized => handles.sort_by(|&a, &b| {
                let (ia, ib) = (self.get(a), self.get(b));
                ib.volume
                    .partial_cmp(&ia.volume)
                    .unwrap()
                    .then_with(|| ib.weight.partial_cmp(&ia.weight).unwrap())
                    .then_with(|| a.0.cmp(&b.0))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(reg: &mut ItemRegistry, cons_key: &str, volume_dim: f64, weight: f64) -> ItemHandle {
        reg.add_item(Item::new(
            "x".into(),
            volume_dim,
            1.0,
            1.0,
            weight,
            cons_key.into(),
            None,
            None,
        ))
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let mut reg = ItemRegistry::new();
        let a = add(&mut reg, "B", 1.0, 1.0);
        let b = add(&mut reg, "A", 1.0, 1.0);
        let c = add(&mut reg, "B", 1.0, 1.0);
        let groups = reg.split_by_consolidation_key(&[a, b, c]);
        assert_eq!(groups[0].0, "B");
        assert_eq!(groups[1].0, "A");
        assert_eq!(groups[0].1, vec![a, c]);
    }

    #[test]
    fn volume_sort_ties_break_on_weight_descending() {
        let mut reg = ItemRegistry::new();
        let small_heavy = add(&mut reg, "", 2.0, 9.0);
        let small_light = add(&mut reg, "", 2.0, 1.0);
        let big = add(&mut reg, "", 5.0, 1.0);
        let mut handles = vec![small_light, big, small_heavy];
        reg.sort_group(&mut handles, SortMethod::Volume);
        assert_eq!(handles, vec![big, small_heavy, small_light]);
    }
}
