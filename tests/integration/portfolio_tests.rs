//! Scenarios spanning both contracts
//!
//! A user tracks money moved into investment pools as expenses in their
//! coinflow wallet and budgets for it like any other category.

use crate::harness::{TestHarness, STARTING_BALANCE};
use coinflow_dapp::NotificationKind;

#[test]
fn test_staking_tracked_as_budgeted_expense() {
    let harness = TestHarness::new();
    let coinflow = harness.coinflow();
    let pool = harness.pool();
    let creator = &harness.accounts.wallet_1;
    let investor = &harness.accounts.wallet_2;

    let wallet_id = harness.onboard(investor, "investor");
    coinflow.add_transaction(
        investor,
        &wallet_id,
        &harness.s("income"),
        &50_000_000,
        &harness.s("Income"),
        &harness.s("Quarterly bonus"),
        &harness.tags(&[]),
    );
    let budget_id = coinflow.create_budget(
        investor,
        &harness.s("Investments"),
        &harness.s("investing"),
        &20_000_000,
        &harness.s("quarterly"),
        &None,
    );

    let pool_id = harness.create_pool(creator, "moderate", 0);
    for amount in [8_000_000i128, 9_000_000] {
        pool.stake_in_pool(investor, &pool_id, &amount);
        coinflow.add_transaction(
            investor,
            &wallet_id,
            &harness.s("expense"),
            &amount,
            &harness.s("investing"),
            &harness.s("Pool deposit"),
            &harness.tags(&["pool"]),
        );
    }

    let staked = pool.get_user_pools(investor).total_staked;
    assert_eq!(staked, 17_000_000);
    assert_eq!(harness.token_balance(investor), STARTING_BALANCE - staked);
    assert_eq!(coinflow.get_budget(investor, &budget_id).spent, staked);
    assert_eq!(coinflow.get_wallet(investor, &wallet_id).balance, 50_000_000 - staked);

    let notifications = coinflow.get_user_notifications(investor);
    assert_eq!(notifications.len(), 1);
    let warning = notifications.get(0).unwrap();
    assert_eq!(warning.kind, NotificationKind::BudgetWarning);
    coinflow.mark_notification_read(investor, &warning.id);
    assert!(coinflow.get_user_notifications(investor).get(0).unwrap().read);
}

#[test]
fn test_contracts_pause_independently() {
    let harness = TestHarness::new();
    let deployer = &harness.accounts.deployer;
    let user = &harness.accounts.wallet_4;

    harness.coinflow().pause_contract(deployer);
    assert!(harness.coinflow().is_paused());
    assert!(!harness.pool().get_contract_stats().contract_paused);

    // The pool keeps accepting pools while coinflow is paused
    assert_eq!(harness.create_pool(user, "conservative", 100), 1);
}
