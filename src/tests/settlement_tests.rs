use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::ChannelType;
use crate::storage::{SettleOutcome, Storage};
use crate::tests::{create_test_service, usd_expense};

#[tokio::test]
async fn settlement_is_idempotent() {
    let service = create_test_service();
    let trip = Uuid::new_v4();
    let (v, b) = (Uuid::new_v4(), Uuid::new_v4());

    let tx_id = service
        .create_expense(usd_expense(trip, v, dec!(100), vec![v, b]))
        .await
        .unwrap();
    let obligation_id = service.storage.get_obligations(&[tx_id]).await.unwrap()[0].id;

    let settled = service
        .settle_one(obligation_id, ChannelType::Venmo)
        .await
        .unwrap();
    assert!(settled.settled);
    assert_eq!(settled.settlement_method, Some(ChannelType::Venmo));
    let first_settled_at = settled.settled_at.unwrap();

    // Second attempt loses the CAS and must not overwrite anything
    let result = service.settle_one(obligation_id, ChannelType::Cash).await;
    assert!(matches!(result, Err(LedgerError::SettlementConflict(id)) if id == obligation_id));

    let stored = service
        .storage
        .get_obligation(obligation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.settled_at, Some(first_settled_at));
    assert_eq!(stored.settlement_method, Some(ChannelType::Venmo));
}

#[tokio::test]
async fn settling_unknown_obligation_is_not_found() {
    let service = create_test_service();
    let result = service
        .settle_one(Uuid::new_v4(), ChannelType::Venmo)
        .await;
    assert!(matches!(result, Err(LedgerError::ObligationNotFound(_))));
}

#[tokio::test]
async fn bulk_settle_covers_both_directions() {
    let service = create_test_service();
    let trip = Uuid::new_v4();
    let (v, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    // B owes V 30; V owes B 20; C owes V 30 and must be untouched
    service
        .create_expense(usd_expense(trip, v, dec!(90), vec![v, b, c]))
        .await
        .unwrap();
    service
        .create_expense(usd_expense(trip, b, dec!(40), vec![b, v]))
        .await
        .unwrap();

    let result = service
        .settle_all_with_counterparty(trip, v, b, ChannelType::Zelle)
        .await
        .unwrap();
    assert_eq!(result.settled_count, 2);
    assert!(result.conflicted_ids.is_empty());

    let summary = service.get_balance_summary(trip, v).await.unwrap();
    assert_eq!(summary.balances.len(), 1);
    assert_eq!(summary.balances[0].counterparty_id, c);
    assert_eq!(summary.balances[0].net_amount, dec!(30));
}

#[tokio::test]
async fn bulk_settle_with_nothing_open_is_a_noop() {
    let service = create_test_service();
    let trip = Uuid::new_v4();

    let result = service
        .settle_all_with_counterparty(trip, Uuid::new_v4(), Uuid::new_v4(), ChannelType::Cash)
        .await
        .unwrap();
    assert_eq!(result.settled_count, 0);
    assert!(result.conflicted_ids.is_empty());
}

#[tokio::test]
async fn bulk_settle_skips_already_settled_obligations() {
    let service = create_test_service();
    let trip = Uuid::new_v4();
    let (v, b) = (Uuid::new_v4(), Uuid::new_v4());

    let tx1 = service
        .create_expense(usd_expense(trip, v, dec!(60), vec![v, b]))
        .await
        .unwrap();
    service
        .create_expense(usd_expense(trip, v, dec!(20), vec![v, b]))
        .await
        .unwrap();

    let first = service.storage.get_obligations(&[tx1]).await.unwrap()[0].id;
    service.settle_one(first, ChannelType::Venmo).await.unwrap();

    // The bulk path recomputes the open set, so the settled one is excluded
    let result = service
        .settle_all_with_counterparty(trip, v, b, ChannelType::Venmo)
        .await
        .unwrap();
    assert_eq!(result.settled_count, 1);
    assert!(result.conflicted_ids.is_empty());
}

#[tokio::test]
async fn batch_store_reports_cas_losers() {
    let service = create_test_service();
    let trip = Uuid::new_v4();
    let (v, b) = (Uuid::new_v4(), Uuid::new_v4());

    let tx1 = service
        .create_expense(usd_expense(trip, v, dec!(60), vec![v, b]))
        .await
        .unwrap();
    let tx2 = service
        .create_expense(usd_expense(trip, v, dec!(20), vec![v, b]))
        .await
        .unwrap();
    let ob1 = service.storage.get_obligations(&[tx1]).await.unwrap()[0].id;
    let ob2 = service.storage.get_obligations(&[tx2]).await.unwrap()[0].id;

    // A concurrent actor wins the first CAS before the batch lands
    let outcome = service
        .storage
        .settle_obligation(ob1, ChannelType::Cash, Utc::now())
        .await
        .unwrap();
    assert!(matches!(outcome, SettleOutcome::Settled(_)));

    let result = service
        .storage
        .settle_obligations_batch(&[ob1, ob2], ChannelType::Venmo, Utc::now())
        .await
        .unwrap();
    assert_eq!(result.settled_count, 1);
    assert_eq!(result.conflicted_ids, vec![ob1]);

    // The loser keeps the first writer's method
    let stored = service.storage.get_obligation(ob1).await.unwrap().unwrap();
    assert_eq!(stored.settlement_method, Some(ChannelType::Cash));
}

#[tokio::test]
async fn batch_settle_reports_unknown_ids_without_aborting() {
    let service = create_test_service();
    let trip = Uuid::new_v4();
    let (v, b) = (Uuid::new_v4(), Uuid::new_v4());

    let tx_id = service
        .create_expense(usd_expense(trip, v, dec!(50), vec![v, b]))
        .await
        .unwrap();
    let known = service.storage.get_obligations(&[tx_id]).await.unwrap()[0].id;
    let unknown = Uuid::new_v4();

    // The unknown id matches zero rows; the known one must still settle
    let result = service
        .storage
        .settle_obligations_batch(&[unknown, known], ChannelType::Venmo, Utc::now())
        .await
        .unwrap();
    assert_eq!(result.settled_count, 1);
    assert_eq!(result.conflicted_ids, vec![unknown]);

    let stored = service.storage.get_obligation(known).await.unwrap().unwrap();
    assert!(stored.settled);
}

#[tokio::test]
async fn store_cas_returns_already_settled() {
    let service = create_test_service();
    let trip = Uuid::new_v4();
    let (v, b) = (Uuid::new_v4(), Uuid::new_v4());

    let tx_id = service
        .create_expense(usd_expense(trip, v, dec!(10), vec![v, b]))
        .await
        .unwrap();
    let ob = service.storage.get_obligations(&[tx_id]).await.unwrap()[0].id;

    let first = service
        .storage
        .settle_obligation(ob, ChannelType::Venmo, Utc::now())
        .await
        .unwrap();
    assert!(matches!(first, SettleOutcome::Settled(_)));

    let second = service
        .storage
        .settle_obligation(ob, ChannelType::Venmo, Utc::now())
        .await
        .unwrap();
    assert!(matches!(second, SettleOutcome::AlreadySettled));
}
