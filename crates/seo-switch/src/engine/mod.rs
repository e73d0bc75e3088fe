//! Switch resolution and recursive substitution.
//!
//! [`SwitchEngine`] is the entry point: it parses a template, resolves each
//! placeholder against the tiered switch pools or the render context, expands
//! placeholders found inside resolved content, and caches the final text per
//! page.

mod cache;
mod derived;
mod diagnostics;
mod error;
mod render;
mod resolver;
mod scope;
mod substitute;

pub use cache::{CacheKey, ResolutionCache};
pub use derived::{DerivedVariables, format_price};
pub use diagnostics::{Diagnostic, DiagnosticCode, Rendered};
pub use error::RenderError;
pub use render::SwitchEngine;
pub use resolver::{LinkPair, ResolvedSwitch, TieredResolver};
pub use scope::{Frame, Interrupt, RenderScope};
