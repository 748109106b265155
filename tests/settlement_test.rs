mod common;

use common::{add_project, dec, empty_service, register_user, test_service};

use carbonledger::application::AppError;
use carbonledger::domain::{TradeKind, TradeRequest, net_position};

fn trade(project_id: i64, amount: &str, kind: &str) -> TradeRequest {
    TradeRequest::try_from_parts(Some(project_id), Some(dec(amount)), Some(kind)).unwrap()
}

#[tokio::test]
async fn test_buy_reduces_balance_and_appends_record() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "25.00").await;
    let user = register_user(&service, "alice").await;
    assert_eq!(user.balance, dec("1000"));

    let credit = service
        .settle_trade(user.id, trade(project.id, "10", "buy"))
        .await
        .unwrap();

    assert_eq!(credit.user_id, user.id);
    assert_eq!(credit.project_id, project.id);
    assert_eq!(credit.amount, dec("10"));
    assert_eq!(credit.price, dec("25.00"));
    assert_eq!(credit.kind, TradeKind::Buy);

    let user = service.current_user(user.id).await.unwrap();
    assert_eq!(user.balance, dec("750.00"));

    let credits = service.user_credits(user.id).await;
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].id, credit.id);
}

#[tokio::test]
async fn test_sell_increases_balance_and_keeps_order() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "25.00").await;
    let user = register_user(&service, "alice").await;

    let bought = service
        .settle_trade(user.id, trade(project.id, "10", "buy"))
        .await
        .unwrap();
    let sold = service
        .settle_trade(user.id, trade(project.id, "4", "sell"))
        .await
        .unwrap();

    let user = service.current_user(user.id).await.unwrap();
    assert_eq!(user.balance, dec("850.00"));

    let credits = service.user_credits(user.id).await;
    assert_eq!(credits.len(), 2);
    assert_eq!(credits[0].id, bought.id);
    assert_eq!(credits[1].id, sold.id);
    assert_eq!(credits[1].kind, TradeKind::Sell);
}

#[tokio::test]
async fn test_insufficient_balance_leaves_state_unchanged() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "25.00").await;
    let user = register_user(&service, "alice").await;

    // Spend the balance down to 100.00 first.
    service
        .settle_trade(user.id, trade(project.id, "36", "buy"))
        .await
        .unwrap();
    let before = service.current_user(user.id).await.unwrap();
    assert_eq!(before.balance, dec("100.00"));

    // Buying 10 costs 250.00, more than what is left.
    let err = service
        .settle_trade(user.id, trade(project.id, "10", "buy"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientBalance { .. }));

    let after = service.current_user(user.id).await.unwrap();
    assert_eq!(after.balance, dec("100.00"));
    assert_eq!(service.user_credits(user.id).await.len(), 1);
}

#[tokio::test]
async fn test_buy_of_exactly_the_balance_is_allowed() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "25.00").await;
    let user = register_user(&service, "alice").await;

    service
        .settle_trade(user.id, trade(project.id, "40", "buy"))
        .await
        .unwrap();

    let user = service.current_user(user.id).await.unwrap();
    assert_eq!(user.balance, dec("0.00"));
}

#[tokio::test]
async fn test_unknown_project_never_mutates_state() {
    let service = test_service().await;
    let user = register_user(&service, "alice").await;

    let err = service
        .settle_trade(user.id, trade(999, "10", "buy"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProjectNotFound));

    let after = service.current_user(user.id).await.unwrap();
    assert_eq!(after.balance, dec("1000"));
    assert!(service.user_credits(user.id).await.is_empty());
}

#[tokio::test]
async fn test_sell_without_prior_holdings_is_allowed() {
    // Inventory is informational and sells are not limited by holdings.
    let service = empty_service().await;
    let project = add_project(&service, "Wind Farm", "20").await;
    let user = register_user(&service, "alice").await;

    service
        .settle_trade(user.id, trade(project.id, "5", "sell"))
        .await
        .unwrap();

    let user = service.current_user(user.id).await.unwrap();
    assert_eq!(user.balance, dec("1100"));
}

#[tokio::test]
async fn test_net_position_matches_ledger() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "25").await;
    let user = register_user(&service, "alice").await;

    for (amount, kind) in [("10", "buy"), ("4", "sell"), ("2.5", "buy")] {
        service
            .settle_trade(user.id, trade(project.id, amount, kind))
            .await
            .unwrap();
    }

    let credits = service.user_credits(user.id).await;
    assert_eq!(net_position(user.id, &credits), dec("8.5"));
}

#[tokio::test]
async fn test_fractional_amounts_round_half_even() {
    let service = empty_service().await;
    let project = add_project(&service, "Solar", "25.55").await;
    let user = register_user(&service, "alice").await;

    // 0.1 * 25.55 = 2.555 -> 2.56 under round-half-even.
    service
        .settle_trade(user.id, trade(project.id, "0.1", "buy"))
        .await
        .unwrap();

    let user = service.current_user(user.id).await.unwrap();
    assert_eq!(user.balance, dec("997.44"));
}

#[tokio::test]
async fn test_identifiers_are_unique_across_users_and_credits() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "1").await;

    let mut ids = std::collections::HashSet::new();
    for i in 0..3 {
        let user = register_user(&service, &format!("user{i}")).await;
        assert!(ids.insert(user.id));
        for _ in 0..2 {
            let credit = service
                .settle_trade(user.id, trade(project.id, "1", "buy"))
                .await
                .unwrap();
            assert!(ids.insert(credit.id));
        }
    }
    assert_eq!(ids.len(), 9);
}

#[tokio::test]
async fn test_concurrent_buys_on_one_user_serialize() {
    let service = empty_service().await;
    let project = add_project(&service, "Amazon", "25").await;
    let user = register_user(&service, "alice").await;

    // Each buy costs 750.00: either alone fits the 1000 balance, both
    // together do not. Settlement must serialize per user, so exactly one
    // succeeds.
    let (first, second) = tokio::join!(
        service.settle_trade(user.id, trade(project.id, "30", "buy")),
        service.settle_trade(user.id, trade(project.id, "30", "buy")),
    );

    assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
    let user = service.current_user(user.id).await.unwrap();
    assert_eq!(user.balance, dec("250.00"));
    assert_eq!(service.user_credits(user.id).await.len(), 1);
}

#[tokio::test]
async fn test_register_rejects_duplicate_usernames() {
    let service = empty_service().await;
    register_user(&service, "alice").await;

    let err = service.register("alice", "other").await.unwrap_err();
    assert!(matches!(err, AppError::UsernameTaken));
}

#[tokio::test]
async fn test_authenticate_checks_password() {
    let service = empty_service().await;
    let user = register_user(&service, "alice").await;

    let authenticated = service.authenticate("alice", "hunter2").await.unwrap();
    assert_eq!(authenticated.id, user.id);

    assert!(matches!(
        service.authenticate("alice", "wrong").await.unwrap_err(),
        AppError::InvalidCredentials
    ));
    assert!(matches!(
        service.authenticate("nobody", "hunter2").await.unwrap_err(),
        AppError::InvalidCredentials
    ));
}
