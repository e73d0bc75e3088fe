use std::fmt::{Display, Formatter, Result as FmtResult};

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A compact fingerprint of a raw template string.
///
/// Wraps a 64-bit FNV-1a hash so the same template always maps to the same
/// id across processes. Used to keep several templates of one
/// `(vehicle_type_id, category_id)` page apart in the resolution cache.
///
/// ```
/// use seo_switch::TemplateId;
///
/// const TITLE: TemplateId = TemplateId::from_template("#CompSwitch_1_2462#");
/// assert_eq!(TITLE, TemplateId::from_template("#CompSwitch_1_2462#"));
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TemplateId(u64);

impl TemplateId {
    pub const fn from_template(template: &str) -> Self {
        Self(fnv1a_hash_str_64(template))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TemplateId({:016x})", self.0)
    }
}
