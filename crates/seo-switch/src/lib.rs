//! Deterministic SEO content-switch resolution.
//!
//! Catalog landing pages (one per vehicle type × product category) are
//! rendered from templates containing placeholders such as
//! `#CompSwitch_3_2066#`. Each placeholder picks one fragment from a pool of
//! hand-authored switches through a rotation index derived from the page's
//! ids, so neighbouring pages read differently while any given page renders
//! the same text on every request.

pub mod config;
pub mod engine;
pub mod parser;
pub mod repository;
pub mod rotation;
pub mod types;

pub use config::{ConfigError, CurrencyFormat, EngineConfig};
pub use engine::{Diagnostic, DiagnosticCode, RenderError, Rendered, SwitchEngine};
pub use repository::{PriceAggregate, SwitchPoolRepository, UpstreamError};
pub use types::{
    PoolScope, PricingContext, ResolutionContext, SwitchEntry, TemplateId, Tier,
    VehicleAttributes,
};
