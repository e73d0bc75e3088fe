//! Tests for context-derived placeholders.

use rust_decimal_macros::dec;
use seo_switch::engine::DerivedVariables;
use seo_switch::parser::Placeholder;
use seo_switch::repository::MemoryPriceAggregate;
use seo_switch::{
    CurrencyFormat, EngineConfig, PricingContext, ResolutionContext, VehicleAttributes,
};

fn context() -> ResolutionContext {
    ResolutionContext::builder()
        .vehicle_type_id(17484)
        .category_id(2462)
        .family_id(1)
        .vehicle_attributes(
            VehicleAttributes::builder()
                .body_style("Berline")
                .fuel_type("Diesel")
                .engine_codes(vec!["K9K 608".to_string(), "K9K 612".to_string()])
                .build(),
        )
        .build()
}

fn config() -> EngineConfig {
    EngineConfig::builder()
        .cheap_price_phrases(
            ["p0", "p1", "p2", "p3", "p4"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .offer_phrases(["o0", "o1", "o2"].into_iter().map(String::from).collect())
        .currency(CurrencyFormat::builder().thousands_separator(' ').build())
        .build()
}

#[tokio::test]
async fn vehicle_attributes_pass_through() {
    let config = config();
    let derived = DerivedVariables::new(&config, None);
    let ctx = context();
    assert_eq!(
        derived.resolve(Placeholder::BodyStyle, &ctx).await.unwrap().as_deref(),
        Some("Berline")
    );
    assert_eq!(
        derived.resolve(Placeholder::FuelType, &ctx).await.unwrap().as_deref(),
        Some("Diesel")
    );
    assert_eq!(
        derived.resolve(Placeholder::EngineCodes, &ctx).await.unwrap().as_deref(),
        Some("K9K 608, K9K 612")
    );
}

#[tokio::test]
async fn empty_engine_codes_render_empty() {
    let config = config();
    let derived = DerivedVariables::new(&config, None);
    let mut ctx = context();
    ctx.vehicle_attributes.engine_codes.clear();
    assert_eq!(
        derived.resolve(Placeholder::EngineCodes, &ctx).await.unwrap().as_deref(),
        Some("")
    );
}

#[tokio::test]
async fn phrase_banks_rotate_deterministically() {
    let config = config();
    let derived = DerivedVariables::new(&config, None);
    let ctx = context();
    // (2462 + 17484) mod 5 = 1
    assert_eq!(
        derived.resolve(Placeholder::CheapPriceVariant, &ctx).await.unwrap().as_deref(),
        Some("p1")
    );
    // 17484 mod 3 = 0
    assert_eq!(
        derived.resolve(Placeholder::OfferVariant, &ctx).await.unwrap().as_deref(),
        Some("o0")
    );
}

#[tokio::test]
async fn known_price_is_formatted() {
    let config = config();
    let derived = DerivedVariables::new(&config, None);
    let mut ctx = context();
    ctx.pricing = PricingContext::Known(Some(dec!(1249.5)));
    assert_eq!(
        derived.resolve(Placeholder::MinPrice, &ctx).await.unwrap().as_deref(),
        Some("1 249,50 €")
    );
}

#[tokio::test]
async fn known_price_wins_over_aggregate() {
    let config = config();
    let prices = MemoryPriceAggregate::new().with_price(2462, 17484, dec!(99));
    let derived = DerivedVariables::new(&config, Some(&prices));
    let mut ctx = context();
    ctx.pricing = PricingContext::Known(None);
    assert_eq!(derived.resolve(Placeholder::MinPrice, &ctx).await.unwrap(), None);
}

#[tokio::test]
async fn deferred_price_asks_aggregate() {
    let config = config();
    let prices = MemoryPriceAggregate::new().with_price(2462, 17484, dec!(12.3));
    let derived = DerivedVariables::new(&config, Some(&prices));
    assert_eq!(
        derived.resolve(Placeholder::MinPrice, &context()).await.unwrap().as_deref(),
        Some("12,30 €")
    );
}

#[tokio::test]
async fn deferred_price_without_sku_is_none() {
    let config = config();
    let prices = MemoryPriceAggregate::new();
    let derived = DerivedVariables::new(&config, Some(&prices));
    assert_eq!(derived.resolve(Placeholder::MinPrice, &context()).await.unwrap(), None);
}

#[test]
fn known_price_serializes_exactly() {
    let pricing = PricingContext::Known(Some(dec!(1249.10)));
    let json = serde_json::to_string(&pricing).unwrap();
    assert_eq!(json, r#"{"Known":"1249.10"}"#);

    let back: PricingContext = serde_json::from_str(&json).unwrap();
    let PricingContext::Known(Some(price)) = back else {
        panic!("expected a known price, got {back:?}");
    };
    assert_eq!(price.to_string(), "1249.10");
}
