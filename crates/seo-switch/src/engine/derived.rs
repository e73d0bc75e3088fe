//! Variables computed from the render context instead of switch pools.

use std::num::NonZeroUsize;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CurrencyFormat, EngineConfig};
use crate::engine::RenderError;
use crate::parser::Placeholder;
use crate::repository::PriceAggregate;
use crate::rotation::{cheap_price_index, offer_index};
use crate::types::{PricingContext, ResolutionContext};

/// Computes `#VCarosserie#`, `#MinPrice#` and the other derived placeholders.
pub struct DerivedVariables<'a> {
    config: &'a EngineConfig,
    prices: Option<&'a dyn PriceAggregate>,
}

impl<'a> DerivedVariables<'a> {
    pub fn new(config: &'a EngineConfig, prices: Option<&'a dyn PriceAggregate>) -> Self {
        Self { config, prices }
    }

    /// Value of a derived placeholder.
    ///
    /// Returns `Ok(None)` only for `#MinPrice#` without a sellable SKU.
    /// Switch placeholders are not derived and also yield `Ok(None)`.
    pub async fn resolve(
        &self,
        placeholder: Placeholder,
        context: &ResolutionContext,
    ) -> Result<Option<String>, RenderError> {
        let attributes = &context.vehicle_attributes;
        let value = match placeholder {
            Placeholder::BodyStyle => attributes.body_style.clone(),
            Placeholder::FuelType => attributes.fuel_type.clone(),
            Placeholder::EngineCodes => attributes.engine_codes.join(", "),
            Placeholder::CheapPriceVariant => bank_phrase(&self.config.cheap_price_phrases, |size| {
                cheap_price_index(context.vehicle_type_id, context.category_id, size)
            }),
            Placeholder::OfferVariant => bank_phrase(&self.config.offer_phrases, |size| {
                offer_index(context.vehicle_type_id, size)
            }),
            Placeholder::MinPrice => {
                return Ok(self
                    .min_price(context)
                    .await?
                    .map(|price| format_price(price, &self.config.currency)));
            }
            Placeholder::CompSwitch { .. }
            | Placeholder::CompSwitchSelf { .. }
            | Placeholder::LinkGammeCar { .. } => return Ok(None),
        };
        Ok(Some(value))
    }

    async fn min_price(&self, context: &ResolutionContext) -> Result<Option<Decimal>, RenderError> {
        match (context.pricing, self.prices) {
            (PricingContext::Known(price), _) => Ok(price),
            (PricingContext::Deferred, Some(prices)) => prices
                .min_price(context.category_id, context.vehicle_type_id)
                .await
                .map_err(|source| RenderError::Pricing {
                    category_id: context.category_id,
                    vehicle_type_id: context.vehicle_type_id,
                    source,
                }),
            (PricingContext::Deferred, None) => Ok(None),
        }
    }
}

/// Pick a phrase from a bank. Banks are validated non-empty with the config;
/// an empty bank renders as an empty string.
fn bank_phrase(bank: &[String], index: impl FnOnce(NonZeroUsize) -> usize) -> String {
    NonZeroUsize::new(bank.len())
        .map(|size| bank[index(size)].clone())
        .unwrap_or_default()
}

/// Format a price with two decimals, grouped thousands and a currency symbol.
///
/// ```
/// use rust_decimal::Decimal;
/// use seo_switch::CurrencyFormat;
/// use seo_switch::engine::format_price;
///
/// let format = CurrencyFormat::builder().thousands_separator(' ').build();
/// assert_eq!(format_price(Decimal::new(123456, 1), &format), "12 345,60 €");
/// ```
pub fn format_price(price: Decimal, format: &CurrencyFormat) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut amount = String::with_capacity(digits.len() + 8);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        amount.push('-');
    }
    let len = integer.len();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            amount.push(format.thousands_separator);
        }
        amount.push(digit);
    }
    amount.push(format.decimal_separator);
    amount.push_str(fraction);

    if format.symbol.is_empty() {
        amount
    } else if format.symbol_after {
        format!("{amount} {}", format.symbol)
    } else {
        format!("{}{amount}", format.symbol)
    }
}
