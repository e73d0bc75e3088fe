//! Rotation index calculator.
//!
//! Each tier has its own formula. All of them are pure functions of integer
//! keys and the pool size, so a given catalog URL always renders the same
//! entry while different URLs spread over the pool.
//!
//! Indices depend on the pool size: adding or removing an entry shifts the
//! index of every combination mapped to that pool, so pool mutations must be
//! followed by cache invalidation of the affected scope.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::types::Tier;

/// Generic tier slot for the title/description primary switch.
pub const GENERIC_PRIMARY_SLOT: u32 = 1;
/// Generic tier slot for the H1 switch.
pub const GENERIC_H1_SLOT: u32 = 2;
/// Category-specific main switch, resolved by `#CompSwitch_<category>#`.
pub const MAIN_SLOT: u32 = 0;
/// Category-specific anchor text half of `#LinkGammeCar_<category>#`.
pub const LINK_ANCHOR_SLOT: u32 = 1;
/// Category-specific link target half of `#LinkGammeCar_<category>#`.
pub const LINK_TARGET_SLOT: u32 = 2;
/// Category-specific companion switch.
pub const COMPANION_SLOT: u32 = 3;

/// Per-slot constants added to the rotation seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationOffsets {
    /// Added to the generic H1 slot so the H1 differs from the title.
    pub generic_h1: u64,
    /// Shared by both halves of the link pair.
    pub category_link: u64,
    pub category_companion: u64,
}

impl Default for RotationOffsets {
    fn default() -> Self {
        Self {
            generic_h1: 1,
            category_link: 1,
            category_companion: 3,
        }
    }
}

impl RotationOffsets {
    fn generic(&self, slot: u32) -> u64 {
        match slot {
            GENERIC_H1_SLOT => self.generic_h1,
            _ => 0,
        }
    }

    fn category(&self, slot: u32) -> u64 {
        match slot {
            MAIN_SLOT => 0,
            LINK_ANCHOR_SLOT | LINK_TARGET_SLOT => self.category_link,
            COMPANION_SLOT => self.category_companion,
            other => u64::from(other),
        }
    }
}

/// Rotation seed for a tier, before reduction by the pool size.
///
/// `category_id` is always the requested category, even when a wildcard
/// scope answered.
pub fn rotation_seed(
    tier: Tier,
    vehicle_type_id: u32,
    category_id: u32,
    slot: u32,
    offsets: &RotationOffsets,
) -> u64 {
    let vehicle = u64::from(vehicle_type_id);
    let category = u64::from(category_id);
    match tier {
        Tier::Generic => vehicle + offsets.generic(slot),
        Tier::FamilyScoped => vehicle + category + u64::from(slot),
        Tier::CategorySpecific => vehicle + category + offsets.category(slot),
    }
}

/// Reduce a seed into `0..pool_size`.
pub fn reduce(seed: u64, pool_size: NonZeroUsize) -> usize {
    // usize -> u64 is lossless on every supported target.
    let size = pool_size.get() as u64;
    (seed % size) as usize
}

/// Index into a pool of `pool_size` entries for one `(tier, slot)` lookup.
///
/// ```
/// use std::num::NonZeroUsize;
/// use seo_switch::rotation::{RotationOffsets, rotation_index, GENERIC_PRIMARY_SLOT};
/// use seo_switch::Tier;
///
/// let size = NonZeroUsize::new(3).unwrap();
/// let index = rotation_index(
///     Tier::Generic, 17484, 2462, GENERIC_PRIMARY_SLOT, size, &RotationOffsets::default(),
/// );
/// // 17484 = 3 × 5828
/// assert_eq!(index, 0);
/// ```
pub fn rotation_index(
    tier: Tier,
    vehicle_type_id: u32,
    category_id: u32,
    slot: u32,
    pool_size: NonZeroUsize,
    offsets: &RotationOffsets,
) -> usize {
    reduce(
        rotation_seed(tier, vehicle_type_id, category_id, slot, offsets),
        pool_size,
    )
}

/// Index into a phrase bank for `#PrixPasCher#`.
pub fn cheap_price_index(vehicle_type_id: u32, category_id: u32, bank_size: NonZeroUsize) -> usize {
    reduce(u64::from(category_id) + u64::from(vehicle_type_id), bank_size)
}

/// Index into a phrase bank for `#VousPropose#`.
pub fn offer_index(vehicle_type_id: u32, bank_size: NonZeroUsize) -> usize {
    reduce(u64::from(vehicle_type_id), bank_size)
}
