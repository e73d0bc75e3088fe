//! Tests for rotation index formulas.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use seo_switch::Tier;
use seo_switch::rotation::{
    COMPANION_SLOT, GENERIC_H1_SLOT, GENERIC_PRIMARY_SLOT, LINK_ANCHOR_SLOT, LINK_TARGET_SLOT,
    MAIN_SLOT, RotationOffsets, cheap_price_index, offer_index, rotation_index,
};

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Generic),
        Just(Tier::FamilyScoped),
        Just(Tier::CategorySpecific),
    ]
}

proptest! {
    #[test]
    fn index_is_in_range(
        tier in arb_tier(),
        vehicle in any::<u32>(),
        category in any::<u32>(),
        slot in 0u32..32,
        pool in 1usize..64,
    ) {
        let index = rotation_index(tier, vehicle, category, slot, size(pool), &RotationOffsets::default());
        prop_assert!(index < pool);
    }

    #[test]
    fn index_is_deterministic(
        tier in arb_tier(),
        vehicle in any::<u32>(),
        category in any::<u32>(),
        slot in 0u32..32,
        pool in 1usize..64,
    ) {
        let offsets = RotationOffsets::default();
        let first = rotation_index(tier, vehicle, category, slot, size(pool), &offsets);
        let second = rotation_index(tier, vehicle, category, slot, size(pool), &offsets);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn single_entry_pool_is_always_index_zero(
        tier in arb_tier(),
        vehicle in any::<u32>(),
        category in any::<u32>(),
        slot in 0u32..32,
    ) {
        prop_assert_eq!(
            rotation_index(tier, vehicle, category, slot, size(1), &RotationOffsets::default()),
            0
        );
    }
}

#[test]
fn generic_primary_slot_uses_vehicle_only() {
    let offsets = RotationOffsets::default();
    assert_eq!(
        rotation_index(Tier::Generic, 17484, 2462, GENERIC_PRIMARY_SLOT, size(3), &offsets),
        0
    );
}

#[test]
fn generic_h1_slot_adds_offset() {
    let offsets = RotationOffsets::default();
    // (17484 + 1) mod 3
    assert_eq!(
        rotation_index(Tier::Generic, 17484, 2462, GENERIC_H1_SLOT, size(3), &offsets),
        1
    );
}

#[test]
fn family_formula() {
    let offsets = RotationOffsets::default();
    // (100 + 20 + 13) mod 7 = 133 mod 7 = 0
    assert_eq!(rotation_index(Tier::FamilyScoped, 100, 20, 13, size(7), &offsets), 0);
    // (100 + 20 + 14) mod 7 = 1
    assert_eq!(rotation_index(Tier::FamilyScoped, 100, 20, 14, size(7), &offsets), 1);
}

#[test]
fn category_formula_per_slot() {
    let offsets = RotationOffsets {
        generic_h1: 1,
        category_link: 1,
        category_companion: 3,
    };
    // (10 + 20 + 0) mod 4 = 2
    assert_eq!(rotation_index(Tier::CategorySpecific, 10, 20, MAIN_SLOT, size(4), &offsets), 2);
    // (10 + 20 + 1) mod 4 = 3 for both link halves
    assert_eq!(rotation_index(Tier::CategorySpecific, 10, 20, LINK_ANCHOR_SLOT, size(4), &offsets), 3);
    assert_eq!(rotation_index(Tier::CategorySpecific, 10, 20, LINK_TARGET_SLOT, size(4), &offsets), 3);
    // (10 + 20 + 3) mod 4 = 1
    assert_eq!(rotation_index(Tier::CategorySpecific, 10, 20, COMPANION_SLOT, size(4), &offsets), 1);
}

#[test]
fn neighbouring_vehicles_rotate() {
    let offsets = RotationOffsets::default();
    let indices: Vec<usize> = (0..3)
        .map(|vehicle| rotation_index(Tier::Generic, vehicle, 1, GENERIC_PRIMARY_SLOT, size(3), &offsets))
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn phrase_bank_indices() {
    // (2462 + 17484) mod 5 = 19946 mod 5 = 1
    assert_eq!(cheap_price_index(17484, 2462, size(5)), 1);
    // 17484 mod 3 = 0
    assert_eq!(offer_index(17484, size(3)), 0);
}
