//! # Catalog Graph Builder
//!
//! Assembles an in-memory, queryable view of the catalog from the raw
//! records handed over by the Catalog Store.
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Graph Assembly                              │
//! │                                                                         │
//! │  products ─┐                                                            │
//! │  bundles  ─┤                                                            │
//! │  recipes  ─┼──► integrity checks ──► join ──► CatalogGraph              │
//! │  ingreds. ─┤         │                        ├── item by id      O(1)  │
//! │  categories┘         │                        ├── ingredient by id O(1) │
//! │                      ▼                        ├── composition rows O(1) │
//! │              Vec<IntegrityFault>              └── recipe rows      O(1) │
//! │                                                                         │
//! │  build()          → any fault rejects the whole load                   │
//! │  build_lenient()  → faulted items are quarantined, rest is usable      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The builder performs no writes and holds no caches: callers rebuild the
//! graph after any catalog mutation, so resolved costs never go stale.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, IntegrityFault};
use crate::types::{
    BundleComponent, BundleRow, CategoryRecord, Ingredient, IngredientRecord, Item, ItemKind,
    ProductRecord, RecipeLine, RecipeRow,
};

// =============================================================================
// Catalog Records
// =============================================================================

/// The raw catalog tables, bulk-read from the Catalog Store in one shot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecords {
    pub products: Vec<ProductRecord>,
    pub bundle_rows: Vec<BundleRow>,
    pub ingredients: Vec<IngredientRecord>,
    pub recipe_rows: Vec<RecipeRow>,
    pub categories: Vec<CategoryRecord>,
}

// =============================================================================
// Catalog Graph
// =============================================================================

/// An immutable, indexed view of the catalog.
///
/// ## Invariants (established at build time)
/// - Every bundle component id resolves to an existing item
/// - Every recipe ingredient id resolves to an existing ingredient
/// - Recipes are unique per (item, ingredient); compositions are unique
///   per (bundle, component)
///
/// The one-level-deep bundle invariant is *not* established here: the cost
/// resolver and settlement planner detect nested bundles defensively at
/// use time, where the catalog-write layer may have let one through.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGraph {
    items: HashMap<String, Item>,
    ingredients: HashMap<String, Ingredient>,
}

impl CatalogGraph {
    /// Builds the graph, rejecting the whole load on any integrity fault.
    ///
    /// This is the default path: a catalog with broken references is a
    /// catalog-management bug, and settling checkouts against it would
    /// silently under-decrement stock.
    pub fn build(records: CatalogRecords) -> Result<Self, CatalogError> {
        let (graph, faults) = Self::build_lenient(records);
        if faults.is_empty() {
            Ok(graph)
        } else {
            Err(CatalogError::IntegrityFaults { faults })
        }
    }

    /// Builds the graph, quarantining only the items touched by a fault.
    ///
    /// Items whose composition or recipe carries a fault are excluded from
    /// the graph; everything else stays queryable. The fault list is
    /// returned alongside so the catalog-management layer can repair the
    /// broken rows.
    pub fn build_lenient(records: CatalogRecords) -> (Self, Vec<IntegrityFault>) {
        let CatalogRecords {
            products,
            bundle_rows,
            ingredients,
            recipe_rows,
            categories,
        } = records;

        let category_names: HashMap<String, String> = categories
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let ingredients: HashMap<String, Ingredient> = ingredients
            .into_iter()
            .map(|rec| {
                (
                    rec.id.clone(),
                    Ingredient {
                        id: rec.id,
                        name: rec.name,
                        unit: rec.unit,
                        cost_per_unit: rec.cost_per_unit,
                        stock: rec.stock,
                        low_stock_threshold: rec.low_stock_threshold,
                    },
                )
            })
            .collect();

        // Which product ids exist, and which of them are bundles.
        let bundle_flags: HashMap<&str, bool> = products
            .iter()
            .map(|p| (p.id.as_str(), p.is_bundle))
            .collect();

        let mut faults = Vec::new();

        // Group composition rows per bundle, checking references as we go.
        let mut compositions: HashMap<String, Vec<BundleComponent>> = HashMap::new();
        let mut seen_components: HashSet<(String, String)> = HashSet::new();
        for row in bundle_rows {
            match bundle_flags.get(row.bundle_item_id.as_str()) {
                None => {
                    faults.push(IntegrityFault::UnknownBundleOwner {
                        item_id: row.bundle_item_id,
                    });
                    continue;
                }
                Some(false) => {
                    faults.push(IntegrityFault::BundleRowOnSingleItem {
                        item_id: row.bundle_item_id,
                    });
                    continue;
                }
                Some(true) => {}
            }
            if !bundle_flags.contains_key(row.component_item_id.as_str()) {
                faults.push(IntegrityFault::UnknownBundleComponent {
                    bundle_id: row.bundle_item_id,
                    component_id: row.component_item_id,
                });
                continue;
            }
            let key = (row.bundle_item_id.clone(), row.component_item_id.clone());
            if !seen_components.insert(key) {
                faults.push(IntegrityFault::DuplicateBundleComponent {
                    bundle_id: row.bundle_item_id,
                    component_id: row.component_item_id,
                });
                continue;
            }
            compositions
                .entry(row.bundle_item_id)
                .or_default()
                .push(BundleComponent {
                    item_id: row.component_item_id,
                    quantity: row.quantity,
                });
        }

        // Group recipe rows per item, checking references as we go.
        let mut recipes: HashMap<String, Vec<RecipeLine>> = HashMap::new();
        let mut seen_lines: HashSet<(String, String)> = HashSet::new();
        for row in recipe_rows {
            match bundle_flags.get(row.item_id.as_str()) {
                None => {
                    faults.push(IntegrityFault::UnknownRecipeOwner {
                        item_id: row.item_id,
                    });
                    continue;
                }
                Some(true) => {
                    faults.push(IntegrityFault::RecipeOnBundle {
                        item_id: row.item_id,
                    });
                    continue;
                }
                Some(false) => {}
            }
            if !ingredients.contains_key(row.ingredient_id.as_str()) {
                faults.push(IntegrityFault::UnknownRecipeIngredient {
                    item_id: row.item_id,
                    ingredient_id: row.ingredient_id,
                });
                continue;
            }
            let key = (row.item_id.clone(), row.ingredient_id.clone());
            if !seen_lines.insert(key) {
                faults.push(IntegrityFault::DuplicateRecipeLine {
                    item_id: row.item_id,
                    ingredient_id: row.ingredient_id,
                });
                continue;
            }
            recipes.entry(row.item_id).or_default().push(RecipeLine {
                ingredient_id: row.ingredient_id,
                quantity: row.quantity,
            });
        }

        let quarantined: HashSet<String> = faults
            .iter()
            .map(|f| f.offending_item().to_string())
            .collect();

        let items: HashMap<String, Item> = products
            .into_iter()
            .filter(|p| !quarantined.contains(&p.id))
            .map(|p| {
                let kind = if p.is_bundle {
                    ItemKind::Bundle {
                        components: compositions.remove(&p.id).unwrap_or_default(),
                    }
                } else {
                    ItemKind::Single {
                        recipe: recipes.remove(&p.id),
                        stock: p.stock,
                    }
                };
                let category = p
                    .category_id
                    .as_ref()
                    .and_then(|id| category_names.get(id).cloned());
                (
                    p.id.clone(),
                    Item {
                        id: p.id,
                        name: p.name,
                        category,
                        price: p.selling_price,
                        kind,
                    },
                )
            })
            .collect();

        (CatalogGraph { items, ingredients }, faults)
    }

    /// Looks up an item by id.
    #[inline]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Looks up an ingredient by id.
    #[inline]
    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    /// Iterates over all items, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Iterates over all ingredients, in no particular order.
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    /// Ingredients whose stock has fallen below their alert threshold.
    pub fn low_stock_ingredients(&self) -> Vec<&Ingredient> {
        let mut low: Vec<&Ingredient> = self
            .ingredients
            .values()
            .filter(|i| i.is_low_stock())
            .collect();
        low.sort_by(|a, b| a.id.cmp(&b.id));
        low
    }

    /// Number of items in the graph.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of ingredients in the graph.
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn product(id: &str, price: &str, stock: i64) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {id}"),
            category_id: None,
            selling_price: price.parse().unwrap(),
            is_bundle: false,
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn bundle(id: &str, price: &str) -> ProductRecord {
        ProductRecord {
            is_bundle: true,
            stock: 0,
            ..product(id, price, 0)
        }
    }

    fn ingredient(id: &str, cost: &str, stock: rust_decimal::Decimal) -> IngredientRecord {
        IngredientRecord {
            id: id.to_string(),
            name: format!("Ingredient {id}"),
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

    fn recipe_row(item: &str, ing: &str, qty: rust_decimal::Decimal) -> RecipeRow {
        RecipeRow {
            item_id: item.to_string(),
            ingredient_id: ing.to_string(),
            quantity: qty,
        }
    }

    #[test]
    fn test_build_joins_compositions_and_recipes() {
        let records = CatalogRecords {
            products: vec![
                bundle("combo", "9.00"),
                product("burger", "4.50", 20),
                product("bread", "5.00", 10),
            ],
            bundle_rows: vec![bundle_row("combo", "burger", 2)],
            ingredients: vec![ingredient("flour", "2.00", dec!(100))],
            recipe_rows: vec![recipe_row("bread", "flour", dec!(0.5))],
            categories: vec![],
        };

        let graph = CatalogGraph::build(records).unwrap();
        assert_eq!(graph.item_count(), 3);
        assert_eq!(graph.ingredient_count(), 1);

        let combo = graph.item("combo").unwrap();
        match &combo.kind {
            ItemKind::Bundle { components } => {
                assert_eq!(components.len(), 1);
                assert_eq!(components[0].item_id, "burger");
                assert_eq!(components[0].quantity, 2);
            }
            ItemKind::Single { .. } => panic!("combo should be a bundle"),
        }

        let bread = graph.item("bread").unwrap();
        assert_eq!(bread.recipe().map(<[RecipeLine]>::len), Some(1));
        assert_eq!(bread.own_stock(), Some(10));
    }

    #[test]
    fn test_category_names_resolve_and_missing_category_is_not_a_fault() {
        let mut bread = product("bread", "5.00", 10);
        bread.category_id = Some("bakery".to_string());
        let mut tea = product("tea", "1.00", 50);
        tea.category_id = Some("ghost-category".to_string());

        let records = CatalogRecords {
            products: vec![bread, tea],
            categories: vec![CategoryRecord {
                id: "bakery".to_string(),
                name: "Bakery".to_string(),
            }],
            ..Default::default()
        };

        let graph = CatalogGraph::build(records).unwrap();
        assert_eq!(
            graph.item("bread").unwrap().category.as_deref(),
            Some("Bakery")
        );
        assert_eq!(graph.item("tea").unwrap().category, None);
    }

    #[test]
    fn test_missing_component_rejects_strict_build() {
        let records = CatalogRecords {
            products: vec![bundle("combo", "9.00")],
            bundle_rows: vec![bundle_row("combo", "ghost", 1)],
            ..Default::default()
        };

        let err = CatalogGraph::build(records).unwrap_err();
        let CatalogError::IntegrityFaults { faults } = err;
        assert_eq!(
            faults,
            vec![IntegrityFault::UnknownBundleComponent {
                bundle_id: "combo".to_string(),
                component_id: "ghost".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_ingredient_rejects_strict_build() {
        let records = CatalogRecords {
            products: vec![product("bread", "5.00", 10)],
            recipe_rows: vec![recipe_row("bread", "ghost-flour", dec!(0.5))],
            ..Default::default()
        };

        let err = CatalogGraph::build(records).unwrap_err();
        let CatalogError::IntegrityFaults { faults } = err;
        assert!(matches!(
            faults.as_slice(),
            [IntegrityFault::UnknownRecipeIngredient { .. }]
        ));
    }

    #[test]
    fn test_lenient_build_quarantines_only_faulted_items() {
        let records = CatalogRecords {
            products: vec![
                bundle("combo", "9.00"),
                product("burger", "4.50", 20),
                product("bread", "5.00", 10),
            ],
            bundle_rows: vec![bundle_row("combo", "ghost", 1)],
            ingredients: vec![ingredient("flour", "2.00", dec!(100))],
            recipe_rows: vec![recipe_row("bread", "flour", dec!(0.5))],
            categories: vec![],
        };

        let (graph, faults) = CatalogGraph::build_lenient(records);
        assert_eq!(faults.len(), 1);
        // The broken bundle is gone, the healthy items survive.
        assert!(graph.item("combo").is_none());
        assert!(graph.item("burger").is_some());
        assert!(graph.item("bread").is_some());
    }

    #[test]
    fn test_duplicate_rows_are_faults() {
        let records = CatalogRecords {
            products: vec![
                bundle("combo", "9.00"),
                product("fries", "1.50", 30),
                product("bread", "5.00", 10),
            ],
            bundle_rows: vec![
                bundle_row("combo", "fries", 1),
                bundle_row("combo", "fries", 2),
            ],
            ingredients: vec![ingredient("flour", "2.00", dec!(100))],
            recipe_rows: vec![
                recipe_row("bread", "flour", dec!(0.5)),
                recipe_row("bread", "flour", dec!(0.25)),
            ],
            categories: vec![],
        };

        let (graph, faults) = CatalogGraph::build_lenient(records);
        assert_eq!(faults.len(), 2);
        assert!(graph.item("combo").is_none());
        assert!(graph.item("bread").is_none());
        assert!(graph.item("fries").is_some());
    }

    #[test]
    fn test_recipe_on_bundle_is_a_fault() {
        let records = CatalogRecords {
            products: vec![bundle("combo", "9.00")],
            ingredients: vec![ingredient("flour", "2.00", dec!(100))],
            recipe_rows: vec![recipe_row("combo", "flour", dec!(1))],
            ..Default::default()
        };

        let err = CatalogGraph::build(records).unwrap_err();
        let CatalogError::IntegrityFaults { faults } = err;
        assert_eq!(
            faults,
            vec![IntegrityFault::RecipeOnBundle {
                item_id: "combo".to_string(),
            }]
        );
    }

    #[test]
    fn test_low_stock_ingredients() {
        let records = CatalogRecords {
            ingredients: vec![
                ingredient("flour", "2.00", dec!(3)),
                ingredient("sugar", "1.50", dec!(50)),
                ingredient("salt", "0.30", dec!(9.5)),
            ],
            ..Default::default()
        };

        let graph = CatalogGraph::build(records).unwrap();
        let low: Vec<&str> = graph
            .low_stock_ingredients()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(low, vec!["flour", "salt"]);
    }
}
