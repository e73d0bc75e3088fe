use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Specificity level of a switch pool.
///
/// Variants are declared from least to most specific; resolution walks them
/// in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Generic,
    FamilyScoped,
    CategorySpecific,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Generic => "generic",
            Tier::FamilyScoped => "family_scoped",
            Tier::CategorySpecific => "category_specific",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Tier-dependent key of a switch pool.
///
/// A `category_id` of `0` in the `Generic` and `FamilyScoped` tiers is the
/// wildcard scope consulted after the category-level pool came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum PoolScope {
    Generic { category_id: u32 },
    FamilyScoped { family_id: u32, category_id: u32 },
    CategorySpecific { category_id: u32 },
}

impl PoolScope {
    pub fn tier(&self) -> Tier {
        match self {
            PoolScope::Generic { .. } => Tier::Generic,
            PoolScope::FamilyScoped { .. } => Tier::FamilyScoped,
            PoolScope::CategorySpecific { .. } => Tier::CategorySpecific,
        }
    }
}

impl Display for PoolScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PoolScope::Generic { category_id } => write!(f, "generic({category_id})"),
            PoolScope::FamilyScoped {
                family_id,
                category_id,
            } => write!(f, "family_scoped({family_id}, {category_id})"),
            PoolScope::CategorySpecific { category_id } => {
                write!(f, "category_specific({category_id})")
            }
        }
    }
}

/// One candidate text fragment of a switch pool.
///
/// Entries sharing a `(scope, slot)` form one ordered pool; their order is
/// what rotation indices point into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchEntry {
    #[serde(flatten)]
    pub scope: PoolScope,
    pub slot: u32,
    pub content: String,
}

impl SwitchEntry {
    pub fn new(scope: PoolScope, slot: u32, content: impl Into<String>) -> Self {
        Self {
            scope,
            slot,
            content: content.into(),
        }
    }
}
