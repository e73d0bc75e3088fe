mod context;
mod pool;
mod template_id;

pub use context::{PricingContext, ResolutionContext, VehicleAttributes};
pub use pool::{PoolScope, SwitchEntry, Tier};
pub use template_id::TemplateId;
