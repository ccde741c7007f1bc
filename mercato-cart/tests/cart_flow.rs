use mercato_cart::{CartConfig, CartSession, InMemoryVariantProvider};
use mercato_catalog::{BulkPrice, InventoryRecord, PricingTier, SegmentPrice, Variant};
use uuid::Uuid;

fn variant(regular: i64, sale: i64) -> Variant {
    Variant {
        id: Uuid::new_v4(),
        sku: Some("MRC-001".to_string()),
        regular_price: regular,
        sale_price: sale,
        bulk_prices: vec![],
        segment_prices: vec![],
        inventory: vec![stock(100, 0, false)],
        updated_at: None,
        metadata: serde_json::json!({}),
    }
}

fn stock(quantity: i64, reserved: i64, backorder: bool) -> InventoryRecord {
    InventoryRecord {
        location_id: None,
        quantity,
        reserved_qty: reserved,
        sell_when_out_of_stock: backorder,
    }
}

#[tokio::test]
async fn enterprise_2_account_shops_at_enterprise_1_prices() {
    let mut provider = InMemoryVariantProvider::new();
    let mut v = variant(120, 100);
    v.segment_prices = vec![
        SegmentPrice { customer_type: PricingTier::B2c, regular_price: 110, sale_price: 0 },
        SegmentPrice { customer_type: PricingTier::Enterprise1, regular_price: 90, sale_price: 85 },
    ];
    provider.upsert(v.clone());

    let mut cart = CartSession::for_customer(
        "acct-enterprise",
        Some(PricingTier::Enterprise2),
        CartConfig::default(),
    );
    cart.add_line(v, 2).unwrap();
    cart.refresh_snapshots(&provider).await.unwrap();

    let evaluation = cart.evaluate();
    assert_eq!(evaluation.lines[0].unit_price, 85);
    assert_eq!(evaluation.subtotal, 170);
    assert!(evaluation.can_checkout());
}

#[tokio::test]
async fn growing_the_quantity_flips_the_line_to_bulk_pricing() {
    let mut v = variant(100, 90);
    v.bulk_prices = vec![
        BulkPrice { min_qty: 10, max_qty: Some(49), price: 70 },
        BulkPrice { min_qty: 50, max_qty: None, price: 60 },
    ];

    let mut cart = CartSession::new(CartConfig::default());
    let line_id = cart.add_line(v, 2).unwrap();

    let evaluation = cart.evaluate();
    assert!(!evaluation.lines[0].is_bulk_price);
    assert_eq!(evaluation.lines[0].unit_price, 90);

    cart.set_quantity(&line_id, 60).unwrap();
    let evaluation = cart.evaluate();
    let line = &evaluation.lines[0];
    assert!(line.is_bulk_price);
    assert_eq!(line.unit_price, 60);
    assert_eq!(line.line_total, 3600);
    let savings = line.savings.unwrap();
    assert_eq!(savings.amount, 40);
    assert_eq!(savings.percent, 40);
}

#[tokio::test]
async fn reservations_block_checkout_until_backorder_opens_up() {
    let mut provider = InMemoryVariantProvider::new();
    let mut v = variant(50, 0);
    v.inventory = vec![stock(5, 2, false)];
    provider.upsert(v.clone());

    let mut cart = CartSession::new(CartConfig::default());
    let line_id = cart.add_line(v.clone(), 3).unwrap();
    assert!(cart.evaluate().can_checkout());

    // Another shopper's reservation lands server-side; the re-fetched
    // snapshot leaves this cart holding more than is available
    v.inventory = vec![stock(5, 4, false)];
    provider.upsert(v.clone());
    cart.refresh_snapshots(&provider).await.unwrap();

    let evaluation = cart.evaluate();
    assert_eq!(evaluation.lines[0].availability.available, 1);
    assert!(evaluation.checkout_blocked);
    assert_eq!(evaluation.unsatisfiable_lines(), vec![line_id]);

    // The warehouse flips the location to sell-when-out-of-stock
    v.inventory = vec![stock(5, 4, true)];
    provider.upsert(v);
    cart.refresh_snapshots(&provider).await.unwrap();

    let evaluation = cart.evaluate();
    assert!(evaluation.lines[0].availability.can_backorder);
    assert!(evaluation.can_checkout());
}

#[tokio::test]
async fn vanished_variant_keeps_its_captured_price_but_blocks_checkout() {
    let mut provider = InMemoryVariantProvider::new();
    let v = variant(100, 80);
    let variant_id = v.id;
    provider.upsert(v.clone());

    let mut cart = CartSession::new(CartConfig::default());
    cart.add_line(v, 2).unwrap();

    provider.remove(&variant_id);
    let refreshed = cart.refresh_snapshots(&provider).await.unwrap();
    assert_eq!(refreshed, 0);

    let evaluation = cart.evaluate();
    // Stored add-time price still carries the line...
    assert_eq!(evaluation.lines[0].unit_price, 80);
    assert_eq!(evaluation.subtotal, 160);
    // ...but with no inventory data the line cannot clear checkout
    assert!(evaluation.checkout_blocked);
}

#[tokio::test]
async fn refresh_reprices_the_cart_from_fresh_snapshots() {
    let mut provider = InMemoryVariantProvider::new();
    let mut v = variant(100, 0);
    provider.upsert(v.clone());

    let mut cart = CartSession::new(CartConfig::default());
    cart.add_line(v.clone(), 1).unwrap();
    assert_eq!(cart.evaluate().subtotal, 100);

    // Catalog puts the variant on sale
    v.sale_price = 80;
    provider.upsert(v);
    let refreshed = cart.refresh_snapshots(&provider).await.unwrap();
    assert_eq!(refreshed, 1);
    assert_eq!(cart.evaluate().subtotal, 80);
}
