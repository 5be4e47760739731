//! The concrete numeric scenarios a packing run is expected to reproduce,
//! exercised end to end through the public `Packer` API.

use stowline::bin::PackingDirection;
use stowline::{Item, ItemRegistry, Packer, PackerSpec, SortMethod};

fn spec(max_weight: f64, gravity_strength: f64, available_bins: Option<u32>) -> PackerSpec {
    PackerSpec {
        type_tag: "standard".into(),
        width: 10.0,
        depth: 10.0,
        height: 10.0,
        max_weight,
        gravity_strength,
        packing_direction: PackingDirection::BottomUp,
        available_bins,
        sort_method: SortMethod::Volume,
    }
}

#[test]
fn four_cubes_fill_one_layer_of_one_bin() {
    let mut registry = ItemRegistry::new();
    let mut handles = Vec::new();
    for _ in 0..4 {
        handles.push(registry.add_item(Item::new(
            "cube".into(),
            5.0,
            5.0,
            5.0,
            10.0,
            String::new(),
            None,
            None,
        )));
    }

    let mut packer = Packer::new(spec(1000.0, 0.0, None));
    packer.pack(&mut registry, handles);

    assert_eq!(packer.number_of_bins(), 1);
    assert!(packer.unfitted_items().is_empty());
    assert_eq!(packer.total_volume_util_percentage(), 50.0);

    let positions: Vec<[f64; 3]> = packer.clusters()[0].bins[0]
        .items
        .iter()
        .map(|&h| registry.get(h).position)
        .collect();
    for p in &positions {
        assert!([0.0, 5.0].contains(&p[0]));
        assert!([0.0, 5.0].contains(&p[1]));
        assert_eq!(p[2], 0.0);
    }
}

#[test]
fn full_support_stacks_two_slabs_in_one_bin() {
    let mut registry = ItemRegistry::new();
    let bottom = registry.add_item(Item::new(
        "slab".into(),
        10.0,
        10.0,
        5.0,
        1.0,
        String::new(),
        None,
        None,
    ));
    let top = registry.add_item(Item::new("slab".into(), 10.0, 10.0, 5.0, 1.0, String::new(), None, None));

    let mut packer = Packer::new(spec(1000.0, 100.0, None));
    packer.pack(&mut registry, vec![bottom, top]);

    assert_eq!(packer.number_of_bins(), 1);
    assert!(packer.unfitted_items().is_empty());
    let positions: Vec<[f64; 3]> = packer.clusters()[0].bins[0]
        .items
        .iter()
        .map(|&h| registry.get(h).position)
        .collect();
    assert!(positions.contains(&[0.0, 0.0, 0.0]));
    assert!(positions.contains(&[0.0, 0.0, 5.0]));
}

#[test]
fn insufficient_support_sends_the_second_item_to_a_fresh_origin() {
    let mut registry = ItemRegistry::new();
    let small = registry.add_item(Item::new(
        "small".into(),
        5.0,
        5.0,
        5.0,
        1.0,
        String::new(),
        None,
        None,
    ));
    let wide = registry.add_item(Item::new(
        "wide".into(),
        10.0,
        10.0,
        1.0,
        1.0,
        String::new(),
        Some("0".into()),
        None,
    ));

    let mut packer = Packer::new(spec(1000.0, 100.0, None));
    packer.pack(&mut registry, vec![small, wide]);

    assert!(packer.unfitted_items().is_empty());
    assert_eq!(registry.get(small).position, [0.0, 0.0, 0.0]);
    assert_eq!(registry.get(wide).position, [0.0, 0.0, 0.0]);
    // The wide slab can't rest on the small cube (25% support < gravity's
    // required 100%) and can't share the small cube's footprint either, so
    // it lands at the origin of a second bin rather than on top of the first.
    assert_eq!(packer.number_of_bins(), 2);
}

#[test]
fn weight_budget_under_a_bin_ceiling_leaves_the_overflow_unfitted() {
    let mut registry = ItemRegistry::new();
    let mut handles = Vec::new();
    for _ in 0..2 {
        handles.push(registry.add_item(Item::new(
            "crate".into(),
            1.0,
            1.0,
            1.0,
            10.0,
            String::new(),
            None,
            None,
        )));
    }

    let mut packer = Packer::new(spec(15.0, 0.0, Some(1)));
    packer.pack(&mut registry, handles);

    assert_eq!(packer.number_of_bins(), 1);
    assert_eq!(packer.unfitted_items().len(), 1);
    let util = packer.total_weight_util_percentage();
    assert!((util - (10.0 / 15.0 * 100.0)).abs() < 1e-9);
}

#[test]
fn a_single_allowed_rotation_that_cannot_fit_leaves_no_bin() {
    let mut registry = ItemRegistry::new();
    let h = registry.add_item(Item::new(
        "plank".into(),
        11.0,
        1.0,
        1.0,
        1.0,
        String::new(),
        Some("0".into()),
        None,
    ));

    let mut packer = Packer::new(spec(1000.0, 0.0, None));
    packer.pack(&mut registry, vec![h]);

    assert_eq!(packer.number_of_bins(), 0);
    assert!(packer.exception());
    assert_eq!(packer.unfitted_items(), vec![h]);
}

#[test]
fn two_consolidation_groups_each_fill_their_own_bin_at_full_utilisation() {
    let mut registry = ItemRegistry::new();
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(registry.add_item(Item::new(
            "a".into(),
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
            "b".into(),
            10.0,
            10.0,
            5.0,
            1.0,
            "B".into(),
            None,
            None,
        )));
    }

    let mut packer = Packer::new(spec(1000.0, 0.0, None));
    packer.pack(&mut registry, handles);

    assert_eq!(packer.number_of_bins(), 2);
    assert_eq!(packer.total_volume_util_percentage(), 100.0);
    assert!(packer.unfitted_items().is_empty());
}
