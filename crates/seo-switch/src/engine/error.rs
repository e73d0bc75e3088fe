//! Error types for the substitution engine.

use thiserror::Error;

use crate::repository::UpstreamError;
use crate::types::PoolScope;

/// A collaborator failed while rendering.
///
/// Missing data is never an error; it is reported through
/// [`Diagnostic`](crate::Diagnostic)s and the page still renders.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The switch pool repository failed.
    #[error("failed to fetch switch pool {scope} slot {slot}: {source}")]
    SwitchPool {
        scope: PoolScope,
        slot: u32,
        #[source]
        source: UpstreamError,
    },

    /// The price aggregate failed.
    #[error(
        "failed to fetch minimum price for category {category_id}, vehicle type {vehicle_type_id}: {source}"
    )]
    Pricing {
        category_id: u32,
        vehicle_type_id: u32,
        #[source]
        source: UpstreamError,
    },
}
