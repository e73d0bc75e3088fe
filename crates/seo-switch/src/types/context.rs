use bon::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle facts rendered verbatim by the derived variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct VehicleAttributes {
    #[builder(default)]
    pub body_style: String,
    #[builder(default)]
    pub fuel_type: String,
    /// Engine codes in display order.
    #[builder(default)]
    pub engine_codes: Vec<String>,
}

/// Where the minimum sale price for `#MinPrice#` comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingContext {
    /// Ask the engine's price aggregate collaborator when `#MinPrice#` is
    /// rendered.
    #[default]
    Deferred,
    /// Supplied by the caller. `None` means no sellable SKU.
    Known(Option<Decimal>),
}

/// Inputs to a single render.
///
/// `family_id` is looked up by the caller before rendering; the engine never
/// derives it from `category_id`.
///
/// ```
/// use seo_switch::{ResolutionContext, VehicleAttributes};
///
/// let ctx = ResolutionContext::builder()
///     .vehicle_type_id(17484)
///     .category_id(2462)
///     .family_id(7)
///     .vehicle_attributes(VehicleAttributes::builder().fuel_type("Diesel").build())
///     .build();
/// assert_eq!(ctx.vehicle_attributes.fuel_type, "Diesel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct ResolutionContext {
    pub vehicle_type_id: u32,
    pub category_id: u32,
    pub family_id: u32,
    #[builder(default)]
    pub vehicle_attributes: VehicleAttributes,
    #[builder(default)]
    pub pricing: PricingContext,
}
