//! End-to-end checkout flows against the in-memory Catalog Store.
//!
//! Covers the full path: bulk read → graph build → cost resolution →
//! settlement planning → sale recording → atomic decrement application,
//! including concurrent checkouts contending for one counter.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use souq_core::cart::Cart;
use souq_core::catalog::CatalogRecords;
use souq_core::types::{
    BundleRow, CategoryRecord, IngredientRecord, PaymentMethod, ProductRecord, RecipeRow,
};
use souq_core::StockTarget;
use souq_store::{CheckoutError, CheckoutService, MemoryStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

fn product(id: &str, name: &str, price: &str, stock: i64) -> ProductRecord {
    ProductRecord {
        id: id.to_string(),
        name: name.to_string(),
        category_id: None,
        selling_price: price.parse().unwrap(),
        is_bundle: false,
        stock,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn bundle(id: &str, name: &str, price: &str) -> ProductRecord {
    ProductRecord {
        is_bundle: true,
        stock: 0,
        ..product(id, name, price, 0)
    }
}

fn ingredient(id: &str, name: &str, cost: &str, stock: Decimal) -> IngredientRecord {
    IngredientRecord {
        id: id.to_string(),
        name: name.to_string(),
        unit: "kg".to_string(),
        cost_per_unit: cost.parse().unwrap(),
        stock,
        low_stock_threshold: dec!(10),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn bundle_row(bundle: &str, component: &str, qty: i64) -> BundleRow {
    BundleRow {
        bundle_item_id: bundle.to_string(),
        component_item_id: component.to_string(),
        quantity: qty,
    }
}

fn recipe_row(item: &str, ing: &str, qty: Decimal) -> RecipeRow {
    RecipeRow {
        item_id: item.to_string(),
        ingredient_id: ing.to_string(),
        quantity: qty,
    }
}

/// The diner catalog used across these tests:
/// - Flour 2.00/kg (stock 100 kg); Bread = 0.5 kg Flour, priced 5.00
/// - Burger (recipe cost 3.00), Fries (recipe cost 1.00)
/// - ComboMeal = 1× Burger + 2× Fries, priced 9.00
/// - Cola: plain resale item, no recipe
fn diner_records() -> CatalogRecords {
    CatalogRecords {
        products: vec![
            bundle("combo", "ComboMeal", "9.00"),
            product("burger", "Burger", "4.50", 40),
            product("fries", "Fries", "1.50", 60),
            product("bread", "Bread", "5.00", 10),
            product("cola", "Cola", "1.50", 5),
        ],
        bundle_rows: vec![
            bundle_row("combo", "burger", 1),
            bundle_row("combo", "fries", 2),
        ],
        ingredients: vec![
            ingredient("flour", "Flour", "2.00", dec!(100)),
            ingredient("beef", "Beef", "6.00", dec!(50)),
            ingredient("potato", "Potato", "0.50", dec!(80)),
        ],
        recipe_rows: vec![
            recipe_row("bread", "flour", dec!(0.5)),
            recipe_row("burger", "beef", dec!(0.5)),
            recipe_row("fries", "potato", dec!(2)),
        ],
        categories: vec![CategoryRecord {
            id: "mains".to_string(),
            name: "Mains".to_string(),
        }],
    }
}

fn diner() -> CheckoutService<MemoryStore> {
    init_tracing();
    CheckoutService::new(Arc::new(MemoryStore::seeded(diner_records())))
}

async fn cart_of(service: &CheckoutService<MemoryStore>, lines: &[(&str, i64)]) -> Cart {
    let graph = service.catalog_graph().await.unwrap();
    let mut cart = Cart::new();
    for (id, qty) in lines {
        cart.add_item(graph.item(id).unwrap(), *qty).unwrap();
    }
    cart
}

/// Scenario A: Flour at 2.00/kg, Bread = 0.5 kg Flour → cost 1.00.
#[tokio::test]
async fn bread_cost_resolves_from_recipe() {
    let service = diner();
    assert_eq!(
        service.resolve_cost("bread").await.unwrap(),
        "1.00".parse().unwrap()
    );
}

/// Scenario B: ComboMeal = 1× Burger (3.00) + 2× Fries (1.00) → cost 5.00.
#[tokio::test]
async fn combo_cost_sums_weighted_children() {
    let service = diner();
    assert_eq!(
        service.resolve_cost("burger").await.unwrap(),
        "3.00".parse().unwrap()
    );
    assert_eq!(
        service.resolve_cost("fries").await.unwrap(),
        "1.00".parse().unwrap()
    );
    assert_eq!(
        service.resolve_cost("combo").await.unwrap(),
        "5.00".parse().unwrap()
    );
}

/// Scenario C: cart = 2× ComboMeal → Burger −2, Fries −4, one entry each.
#[tokio::test]
async fn combo_checkout_decrements_aggregated_components() {
    let service = diner();
    let cart = cart_of(&service, &[("combo", 2)]).await;

    let receipt = service
        .settle_checkout(&cart, PaymentMethod::Cash)
        .await
        .unwrap();

    assert_eq!(receipt.total, "18.00".parse().unwrap());
    // Exactly two applied targets: no duplicate Fries entries.
    assert_eq!(receipt.applied.len(), 2);

    let store = service.store();
    assert_eq!(store.product_stock("burger"), Some(38));
    assert_eq!(store.product_stock("fries"), Some(56));
}

/// Scenario D: Flour stock 0.3 kg, one Bread needs 0.5 kg → partial
/// settlement naming the flour target; other targets unaffected.
#[tokio::test]
async fn insufficient_flour_fails_only_the_flour_target() {
    init_tracing();
    let mut records = diner_records();
    records.ingredients[0].stock = dec!(0.3);
    let service = CheckoutService::new(Arc::new(MemoryStore::seeded(records)));

    let cart = cart_of(&service, &[("bread", 1), ("cola", 2)]).await;
    let err = service
        .settle_checkout(&cart, PaymentMethod::Cash)
        .await
        .unwrap_err();

    let CheckoutError::PartialSettlement {
        applied, failed, ..
    } = err
    else {
        panic!("expected partial settlement");
    };

    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].target, StockTarget::ingredient("flour"));
    assert_eq!(failed[0].requested, dec!(0.5));
    assert_eq!(failed[0].available, dec!(0.3));

    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].target, StockTarget::product("cola"));

    // Flour untouched, cola applied and not rolled back.
    let store = service.store();
    assert_eq!(store.ingredient_stock("flour"), Some(dec!(0.3)));
    assert_eq!(store.product_stock("cola"), Some(3));
}

/// Two bundles and a recipe line all landing on shared counters
/// accumulate into one decrement per counter across the whole cart.
#[tokio::test]
async fn overlapping_lines_share_counters() {
    let service = diner();
    // combo → burger/fries product stock; extra fries lines merge in cart;
    // bread and a second bread line share the flour counter.
    let cart = cart_of(
        &service,
        &[("combo", 1), ("fries", 3), ("bread", 1), ("bread", 1)],
    )
    .await;

    service
        .settle_checkout(&cart, PaymentMethod::Card)
        .await
        .unwrap();

    let store = service.store();
    // fries: 2 from the combo + 3 direct = 5 off one counter.
    assert_eq!(store.product_stock("fries"), Some(55));
    // flour: 2 breads × 0.5 kg = 1 kg off one counter.
    assert_eq!(store.ingredient_stock("flour"), Some(dec!(99)));
}

/// Two concurrent checkouts whose combined demand exceeds one counter:
/// the atomic per-counter primitive lets exactly one of them through.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_cannot_oversell_a_counter() {
    let service = diner(); // cola stock: 5
    let cart_a = cart_of(&service, &[("cola", 3)]).await;
    let cart_b = cart_of(&service, &[("cola", 3)]).await;

    let (a, b) = {
        let (sa, sb) = (service.clone(), service.clone());
        let ta = tokio::spawn(async move { sa.settle_checkout(&cart_a, PaymentMethod::Cash).await });
        let tb = tokio::spawn(async move { sb.settle_checkout(&cart_b, PaymentMethod::Cash).await });
        (ta.await.unwrap(), tb.await.unwrap())
    };

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one checkout may win the counter");

    let loser = if a.is_ok() { b } else { a };
    match loser.unwrap_err() {
        CheckoutError::PartialSettlement { failed, .. } => {
            assert_eq!(failed[0].target, StockTarget::product("cola"));
            assert_eq!(failed[0].available, dec!(2));
        }
        other => panic!("expected partial settlement, got {other:?}"),
    }

    // 5 − 3 = 2 left; never negative, never double-sold.
    assert_eq!(service.store().product_stock("cola"), Some(2));
}

/// A receipt serializes with the target/quantity shape the surrounding
/// application renders.
#[tokio::test]
async fn receipt_serializes_for_the_api_boundary() {
    let service = diner();
    let cart = cart_of(&service, &[("cola", 2)]).await;

    let receipt = service
        .settle_checkout(&cart, PaymentMethod::Cash)
        .await
        .unwrap();

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["total"], "3.00");
    assert_eq!(json["applied"][0]["target"]["target"], "product");
    assert_eq!(json["applied"][0]["target"]["item_id"], "cola");
    assert_eq!(json["applied"][0]["quantity"], "2");
}
