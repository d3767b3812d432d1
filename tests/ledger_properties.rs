//! Ledger-wide properties exercised through the public API
//!
//! Every test runs against both account stores on a multi-threaded runtime so
//! that spawned operations genuinely interleave.

use concurrent_ledger::{
    AccountStore, BlockingLedger, ErrorKind, InMemoryAccountStore, LedgerService,
    ShardedAccountStore,
};
use futures::future::join_all;
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
enum Backing {
    Memory,
    Sharded,
}

fn service(backing: Backing) -> LedgerService {
    let store: Arc<dyn AccountStore> = match backing {
        Backing::Memory => Arc::new(InMemoryAccountStore::new()),
        Backing::Sharded => Arc::new(ShardedAccountStore::new()),
    };
    LedgerService::new(store)
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deposits_sum_exactly(
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);
    let id = ledger.create_account(0.0).await.unwrap().id;

    let deposits = (0..200).map(|_| {
        let ledger = ledger.clone();
        async move { ledger.deposit(id, 1.0).await }
    });
    let results = join_all(deposits).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(ledger.get_balance(id).await.unwrap(), 200.0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_withdrawals_never_overdraw(
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);
    let id = ledger.create_account(50.0).await.unwrap().id;

    let withdrawals = (0..100).map(|_| {
        let ledger = ledger.clone();
        async move { ledger.withdraw(id, 1.0).await }
    });
    let results = join_all(withdrawals).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .inspect(|e| assert_eq!(e.kind(), ErrorKind::InsufficientFunds))
        .count();

    assert_eq!(succeeded, 50);
    assert_eq!(rejected, 50);
    assert_eq!(ledger.get_balance(id).await.unwrap(), 0.0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn deposit_then_withdraw_restores_balance(
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);
    let id = ledger.create_account(10.0).await.unwrap().id;

    ledger.deposit(id, 7.5).await.unwrap();
    ledger.withdraw(id, 7.5).await.unwrap();

    assert_eq!(ledger.get_balance(id).await.unwrap(), 10.0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn balance_reads_do_not_change_state(
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);
    let id = ledger.create_account(42.0).await.unwrap().id;

    let reads = (0..20).map(|_| {
        let ledger = ledger.clone();
        async move { ledger.get_balance(id).await }
    });
    let balances = join_all(reads).await;

    assert!(balances.into_iter().all(|b| b.unwrap() == 42.0));
    assert_eq!(ledger.store().len(), 1);
}

#[rstest]
#[case::zero(0.0, Ok(0.0))]
#[case::positive(100.0, Ok(100.0))]
#[case::just_negative(-0.01, Err(ErrorKind::InvalidAmount))]
#[case::nan(f64::NAN, Err(ErrorKind::InvalidAmount))]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_account_boundaries(
    #[case] initial_balance: f64,
    #[case] expected: Result<f64, ErrorKind>,
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);

    let result = ledger
        .create_account(initial_balance)
        .await
        .map(|account| account.balance)
        .map_err(|e| e.kind());

    assert_eq!(result, expected);
    assert_eq!(ledger.store().len(), usize::from(expected.is_ok()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_increasing_ids(
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);

    let creates = (0..64).map(|_| {
        let ledger = ledger.clone();
        async move { ledger.create_account(0.0).await }
    });
    let mut ids: Vec<u64> = join_all(creates)
        .await
        .into_iter()
        .map(|r| r.unwrap().id)
        .collect();

    let distinct: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), 64);

    ids.sort_unstable();
    assert_eq!(ids, (1..=64).collect::<Vec<u64>>());

    // Sequential creation after the burst keeps counting upwards
    let next = ledger.create_account(0.0).await.unwrap().id;
    assert_eq!(next, 65);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_account_is_reported_for_every_operation(
    #[values(Backing::Memory, Backing::Sharded)] backing: Backing,
) {
    let ledger = service(backing);

    assert_eq!(
        ledger.deposit(9999, 1.0).await.unwrap_err().kind(),
        ErrorKind::AccountNotFound
    );
    assert_eq!(
        ledger.withdraw(9999, 1.0).await.unwrap_err().kind(),
        ErrorKind::AccountNotFound
    );
    assert_eq!(
        ledger.get_balance(9999).await.unwrap_err().kind(),
        ErrorKind::AccountNotFound
    );
}

/// Create 100, deposit 50, withdraw 200 (rejected), withdraw 150, then read
/// an identifier that was never issued.
#[rstest]
fn blocking_scenario(#[values(Backing::Memory, Backing::Sharded)] backing: Backing) {
    let store = service(backing).store().clone();
    let ledger = BlockingLedger::new(store, 2).unwrap();

    let id = ledger.create_account(100.0).unwrap().id;
    assert_eq!(ledger.deposit(id, 50.0).unwrap().balance, 150.0);

    let rejected = ledger.withdraw(id, 200.0).unwrap_err();
    assert_eq!(rejected.kind(), ErrorKind::InsufficientFunds);
    assert_eq!(ledger.get_balance(id).unwrap(), 150.0);

    assert_eq!(ledger.withdraw(id, 150.0).unwrap().balance, 0.0);
    assert_eq!(
        ledger.get_balance(9999).unwrap_err().kind(),
        ErrorKind::AccountNotFound
    );
}
