mod common;

use common::{TestContext, TestResult, HOME};
use storefront_commerce::{Projection, StoreError, UserView};

#[tokio::test]
async fn add_and_list_addresses_in_insertion_order() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;

    let first = ctx
        .addresses
        .add_address(&alice, &alice.public_id, &format!("  {HOME}  "))
        .await?;
    let second = ctx
        .addresses
        .add_address(&alice, &alice.public_id, "1600 Pennsylvania Avenue NW")
        .await?;

    assert_eq!(first.text, HOME, "address text is stored trimmed");
    assert_ne!(first.id, second.id);

    let listed = ctx
        .addresses
        .list_addresses(&alice, &alice.public_id)
        .await?;
    let ids: Vec<&str> = listed.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

    Ok(())
}

#[tokio::test]
async fn short_address_is_rejected_without_writing() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    let version = ctx.version(&alice).await?;

    let err = ctx
        .addresses
        .add_address(&alice, &alice.public_id, &"x".repeat(19))
        .await
        .expect_err("19 characters is too short");
    assert!(matches!(err, StoreError::Validation { .. }));

    ctx.addresses
        .add_address(&alice, &alice.public_id, &"x".repeat(20))
        .await?;

    let listed = ctx.addresses.list_addresses(&alice, &alice.public_id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(ctx.version(&alice).await?, version + 1);

    Ok(())
}

#[tokio::test]
async fn deleting_twice_is_not_found() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;

    let address = ctx
        .addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;

    ctx.addresses
        .delete_address(&alice, &alice.public_id, &address.id)
        .await?;

    let err = ctx
        .addresses
        .delete_address(&alice, &alice.public_id, &address.id)
        .await
        .expect_err("second delete must fail");
    assert!(matches!(err, StoreError::NotFound { .. }));

    let err = ctx
        .addresses
        .delete_address(&alice, &alice.public_id, "no-such-address")
        .await
        .expect_err("unknown id must fail");
    assert!(matches!(err, StoreError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn other_users_records_are_forbidden() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;
    let bob = ctx.register("Bob", "bob@example.com").await?;

    let address = ctx
        .addresses
        .add_address(&alice, &alice.public_id, HOME)
        .await?;

    assert!(matches!(
        ctx.addresses.list_addresses(&bob, &alice.public_id).await,
        Err(StoreError::Forbidden)
    ));
    assert!(matches!(
        ctx.addresses.add_address(&bob, &alice.public_id, HOME).await,
        Err(StoreError::Forbidden)
    ));
    assert!(matches!(
        ctx.addresses
            .delete_address(&bob, &alice.public_id, &address.id)
            .await,
        Err(StoreError::Forbidden)
    ));
    assert!(matches!(
        ctx.identities
            .get_user(&bob, &alice.public_id, Projection::Full)
            .await,
        Err(StoreError::Forbidden)
    ));

    // Bob cannot delete Alice's address through his own user id either.
    assert!(matches!(
        ctx.addresses
            .delete_address(&bob, &bob.public_id, &address.id)
            .await,
        Err(StoreError::NotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_user_is_not_found() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;

    assert!(matches!(
        ctx.addresses.list_addresses(&alice, "missing-user").await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        ctx.identities
            .get_user(&alice, "missing-user", Projection::AddressOnly)
            .await,
        Err(StoreError::NotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn legacy_address_round_trips_through_projections() -> TestResult {
    let ctx = TestContext::new().await?;
    let alice = ctx.register("Alice", "alice@example.com").await?;

    let view = ctx
        .identities
        .get_user(&alice, &alice.public_id, Projection::AddressOnly)
        .await?;
    assert_eq!(view, UserView::AddressOnly { address: None });

    assert!(matches!(
        ctx.addresses
            .set_legacy_address(&alice, &alice.public_id, "too short")
            .await,
        Err(StoreError::Validation { .. })
    ));

    let stored = ctx
        .addresses
        .set_legacy_address(&alice, &alice.public_id, HOME)
        .await?;
    assert_eq!(stored, HOME);

    let view = ctx
        .identities
        .get_user(&alice, &alice.public_id, Projection::AddressOnly)
        .await?;
    assert_eq!(
        view,
        UserView::AddressOnly {
            address: Some(HOME.to_string())
        }
    );

    match ctx
        .identities
        .get_user(&alice, &alice.public_id, Projection::Full)
        .await?
    {
        UserView::Full(profile) => {
            assert_eq!(profile.email, "alice@example.com");
            assert_eq!(profile.address.as_deref(), Some(HOME));
            assert!(profile.addresses.is_empty());
            assert_eq!(profile.wallet_money, rust_decimal::Decimal::from(500));
        }
        other => panic!("expected full profile, got {other:?}"),
    }

    Ok(())
}
