//! Integration tests for the cart store.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use rust_decimal::Decimal;
use teentops_sdk::cart::parse_quantity;
use teentops_sdk::models::format_price;
use teentops_sdk::CartStore;

#[test]
fn test_add_from_two_products() {
    let top = common::crop_top();
    let tee = common::graphic_tee();
    let mut cart = CartStore::new();

    cart.add_item(&top, &top.variants[0], 2);
    cart.add_item(&tee, &tee.variants[0], 1);
    cart.add_item(&top, &top.variants[0], 1);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.get(10).unwrap().quantity, 3);
    assert_eq!(cart.get(10).unwrap().product_image.as_deref(), Some("/media/crop-red.jpg"));
    assert_eq!(format_price(cart.total()), "$94.99");
}

#[test]
fn test_quantity_text_input() {
    let top = common::crop_top();
    let mut cart = CartStore::new();
    cart.add_item(&top, &top.variants[2], i64::from(parse_quantity("two")));
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn test_subscriber_receives_current_state() {
    let top = common::crop_top();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let mut cart = CartStore::new();
    cart.subscribe(move |c| sink.lock().unwrap().push((c.item_count(), c.total())));

    cart.add_item(&top, &top.variants[0], 2);
    cart.update_quantity(10, 5);
    cart.remove_item(10);

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (2, Decimal::new(5000, 2)),
            (5, Decimal::new(12500, 2)),
            (0, Decimal::ZERO),
        ]
    );
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize, i64),
    Update(usize, i64),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, -2i64..6).prop_map(|(v, q)| Op::Add(v, q)),
        (0usize..3, -2i64..6).prop_map(|(v, q)| Op::Update(v, q)),
        (0usize..3).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_cart_matches_model(ops in prop::collection::vec(op(), 0..40)) {
        let product = common::crop_top();
        let mut cart = CartStore::new();
        let mut model: HashMap<u64, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(v, q) => {
                    let variant = &product.variants[v];
                    cart.add_item(&product, variant, q);
                    *model.entry(variant.id).or_insert(0) += q.max(1) as u32;
                }
                Op::Update(v, q) => {
                    let id = product.variants[v].id;
                    cart.update_quantity(id, q);
                    if q < 1 {
                        model.remove(&id);
                    } else if let Some(existing) = model.get_mut(&id) {
                        *existing = q as u32;
                    }
                }
                Op::Remove(v) => {
                    let id = product.variants[v].id;
                    cart.remove_item(id);
                    model.remove(&id);
                }
            }
        }

        // One row per variant, never a zero quantity.
        let mut ids: Vec<u64> = cart.items().iter().map(|i| i.variant_id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), cart.len());
        prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));

        prop_assert_eq!(cart.len(), model.len());
        for (id, qty) in &model {
            prop_assert_eq!(cart.get(*id).map(|i| i.quantity), Some(*qty));
        }

        let expected: Decimal = cart
            .items()
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();
        prop_assert_eq!(cart.total(), expected);
        prop_assert_eq!(cart.item_count(), model.values().map(|q| u64::from(*q)).sum::<u64>());
    }
}
