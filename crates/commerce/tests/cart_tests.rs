mod common;

use common::{TestContext, TestResult};
use rust_decimal::Decimal;
use storefront_commerce::{compute_total, CartIntent, QuantityChange, StoreError};

#[tokio::test]
async fn add_then_add_again_conflicts() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    let cart = ctx
        .carts
        .upsert_item(&alice, "lamp", 2, CartIntent::Add)
        .await?;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("lamp").map(|l| l.quantity), Some(2));

    let err = ctx
        .carts
        .upsert_item(&alice, "lamp", 5, CartIntent::Add)
        .await
        .expect_err("second add must conflict");
    assert!(matches!(err, StoreError::Conflict { .. }));

    let cart = ctx.carts.get_cart(&alice).await?;
    assert_eq!(cart.get("lamp").map(|l| l.quantity), Some(2));

    Ok(())
}

#[tokio::test]
async fn update_replaces_or_creates_line() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;
    ctx.seed_product("mug", 7).await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 2, CartIntent::Add)
        .await?;
    let cart = ctx
        .carts
        .upsert_item(&alice, "lamp", 6, CartIntent::Update)
        .await?;
    assert_eq!(cart.get("lamp").map(|l| l.quantity), Some(6));

    let cart = ctx
        .carts
        .upsert_item(&alice, "mug", 3, CartIntent::Update)
        .await?;
    assert_eq!(cart.len(), 2);
    assert_eq!(compute_total(cart.lines()), Decimal::from(6 * 40 + 3 * 7));

    Ok(())
}

#[tokio::test]
async fn invalid_quantity_and_unknown_product_are_rejected() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    for quantity in [0, 11, -1] {
        let err = ctx
            .carts
            .upsert_item(&alice, "lamp", quantity, CartIntent::Add)
            .await
            .expect_err("quantity outside 1..=10 must fail");
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    let err = ctx
        .carts
        .upsert_item(&alice, "ghost", 1, CartIntent::Add)
        .await
        .expect_err("unknown product must fail");
    assert!(matches!(err, StoreError::NotFound { .. }));

    assert!(ctx.carts.get_cart(&alice).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn set_quantity_zero_removes_line() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 2, CartIntent::Add)
        .await?;

    let change = ctx.carts.set_quantity(&alice, "lamp", 0).await?;
    assert_eq!(change, QuantityChange::Removed);
    assert!(ctx.carts.get_cart(&alice).await?.is_empty());

    // Removing an absent line through set_quantity is a no-op.
    let change = ctx.carts.set_quantity(&alice, "lamp", 0).await?;
    assert_eq!(change, QuantityChange::Removed);

    let err = ctx
        .carts
        .set_quantity(&alice, "ghost", 0)
        .await
        .expect_err("unknown product");
    assert!(matches!(err, StoreError::NotFound { .. }));

    match ctx.carts.set_quantity(&alice, "lamp", 4).await? {
        QuantityChange::Updated(cart) => {
            assert_eq!(cart.get("lamp").map(|l| l.quantity), Some(4))
        }
        other => panic!("expected updated cart, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn remove_item_requires_existing_line() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;
    ctx.carts.remove_item(&alice, "lamp").await?;

    let err = ctx
        .carts
        .remove_item(&alice, "lamp")
        .await
        .expect_err("line is already gone");
    assert!(matches!(err, StoreError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn cart_uses_live_catalog_cost() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 2, CartIntent::Add)
        .await?;
    ctx.seed_product("lamp", 55).await?;

    let cart = ctx.carts.get_cart(&alice).await?;
    assert_eq!(compute_total(cart.lines()), Decimal::from(110));

    Ok(())
}

#[tokio::test]
async fn carts_are_per_user_and_writes_bump_version() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    let bob = ctx.register("Bob", "bob@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    let before = ctx.version(&alice).await?;
    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;
    ctx.carts
        .upsert_item(&bob, "lamp", 3, CartIntent::Add)
        .await?;
    ctx.carts.set_quantity(&alice, "lamp", 2).await?;

    assert_eq!(ctx.version(&alice).await?, before + 2);
    assert_eq!(
        ctx.carts.get_cart(&bob).await?.get("lamp").map(|l| l.quantity),
        Some(3)
    );

    Ok(())
}

#[tokio::test]
async fn racing_adds_produce_one_line() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 40).await?;

    let first = {
        let carts = ctx.carts.clone();
        let alice = alice.clone();
        tokio::spawn(async move { carts.upsert_item(&alice, "lamp", 1, CartIntent::Add).await })
    };
    let second = {
        let carts = ctx.carts.clone();
        let alice = alice.clone();
        tokio::spawn(async move { carts.upsert_item(&alice, "lamp", 2, CartIntent::Add).await })
    };

    let results = [first.await?, second.await?];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(StoreError::Conflict { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(ctx.carts.get_cart(&alice).await?.len(), 1);

    Ok(())
}
