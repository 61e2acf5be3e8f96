mod common;

use common::{TestContext, TestResult, HOME};
use rust_decimal::Decimal;
use storefront_commerce::{CartIntent, StoreError};

#[tokio::test]
async fn successful_checkout_debits_wallet_and_empties_cart() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 100).await?;
    ctx.seed_product("mug", 50).await?;
    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 2, CartIntent::Add)
        .await?;
    ctx.carts
        .upsert_item(&alice, "mug", 2, CartIntent::Add)
        .await?;

    let receipt = ctx.checkout.checkout(&alice).await?;

    assert_eq!(receipt.charged, Decimal::from(300));
    assert_eq!(receipt.wallet_money, Decimal::from(200));
    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(200));
    assert!(ctx.carts.get_cart(&alice).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn insufficient_balance_changes_nothing() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.set_wallet(&alice, 100).await?;
    ctx.seed_product("chair", 150).await?;
    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;
    ctx.carts
        .upsert_item(&alice, "chair", 1, CartIntent::Add)
        .await?;
    let version = ctx.version(&alice).await?;

    let err = ctx
        .checkout
        .checkout(&alice)
        .await
        .expect_err("150 does not fit in 100");
    assert!(matches!(err, StoreError::InsufficientBalance { .. }));

    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(100));
    assert_eq!(ctx.carts.get_cart(&alice).await?.len(), 1);
    assert_eq!(ctx.version(&alice).await?, version);

    Ok(())
}

#[tokio::test]
async fn empty_cart_is_rejected_regardless_of_wallet_and_address() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;

    assert!(matches!(
        ctx.checkout.checkout(&alice).await,
        Err(StoreError::EmptyCart)
    ));

    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;
    ctx.set_wallet(&alice, 0).await?;

    assert!(matches!(
        ctx.checkout.checkout(&alice).await,
        Err(StoreError::EmptyCart)
    ));

    Ok(())
}

#[tokio::test]
async fn legacy_address_does_not_satisfy_checkout() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("desk", 500).await?;
    ctx.addresses
        .set_legacy_address(&alice, &alice.public_id, HOME)
        .await?;
    ctx.carts
        .upsert_item(&alice, "desk", 1, CartIntent::Add)
        .await?;

    assert!(matches!(
        ctx.checkout.checkout(&alice).await,
        Err(StoreError::NoAddress)
    ));
    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(500));

    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;
    let receipt = ctx.checkout.checkout(&alice).await?;
    assert_eq!(receipt.wallet_money, Decimal::ZERO);

    Ok(())
}

#[tokio::test]
async fn stale_snapshot_cannot_commit() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.seed_product("lamp", 60).await?;
    ctx.seed_product("mug", 10).await?;
    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;
    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;

    let snapshot = ctx.checkout.snapshot(alice.user_id).await?;
    let approved = snapshot.evaluate()?;

    // The cart changes after the snapshot was taken.
    ctx.carts
        .upsert_item(&alice, "mug", 1, CartIntent::Add)
        .await?;

    assert!(!ctx.checkout.commit(&snapshot, &approved).await?);
    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(500));
    assert_eq!(ctx.carts.get_cart(&alice).await?.len(), 2);

    // A fresh attempt charges for the cart as it is now.
    let receipt = ctx.checkout.checkout(&alice).await?;
    assert_eq!(receipt.charged, Decimal::from(70));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_checkouts_debit_once() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.set_wallet(&alice, 100).await?;
    ctx.seed_product("lamp", 60).await?;
    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;
    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;

    let first = {
        let checkout = ctx.checkout.clone();
        let alice = alice.clone();
        tokio::spawn(async move { checkout.checkout(&alice).await })
    };
    let second = {
        let checkout = ctx.checkout.clone();
        let alice = alice.clone();
        tokio::spawn(async move { checkout.checkout(&alice).await })
    };

    let results = [first.await?, second.await?];
    let successes: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(successes.len(), 1, "exactly one checkout may succeed");
    assert_eq!(successes[0].wallet_money, Decimal::from(40));

    // Only overlapping snapshots guarantee InsufficientBalance; a loser that
    // starts after the winner committed sees the emptied cart instead. The
    // overlapping case is pinned down by
    // checkout_losing_the_race_reports_insufficient_balance.
    let loser = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one checkout must fail");
    assert!(
        matches!(
            loser,
            StoreError::EmptyCart | StoreError::InsufficientBalance { .. }
        ),
        "unexpected failure: {loser:?}"
    );

    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(40));

    Ok(())
}

#[tokio::test]
async fn checkout_losing_the_race_reports_insufficient_balance() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.set_wallet(&alice, 100).await?;
    ctx.seed_product("lamp", 60).await?;
    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;
    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;

    // Both requests read the same state; the first one commits.
    let loser_view = ctx.checkout.snapshot(alice.user_id).await?;
    let winner = ctx.checkout.checkout(&alice).await?;
    assert_eq!(winner.wallet_money, Decimal::from(40));

    match ctx.checkout.settle(&alice, loser_view).await {
        Err(StoreError::InsufficientBalance { balance, total }) => {
            assert_eq!(balance, Decimal::from(40));
            assert_eq!(total, Decimal::from(60));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(40));

    Ok(())
}

#[tokio::test]
async fn second_checkout_of_same_total_is_insufficient() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    ctx.set_wallet(&alice, 100).await?;
    ctx.seed_product("lamp", 60).await?;
    ctx.addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;
    ctx.checkout.checkout(&alice).await?;

    ctx.carts
        .upsert_item(&alice, "lamp", 1, CartIntent::Add)
        .await?;
    let err = ctx
        .checkout
        .checkout(&alice)
        .await
        .expect_err("40 left, 60 needed");
    assert!(matches!(err, StoreError::InsufficientBalance { .. }));
    assert_eq!(ctx.wallet(&alice).await?, Decimal::from(40));

    Ok(())
}
