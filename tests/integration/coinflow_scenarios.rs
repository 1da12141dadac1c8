//! Coinflow user journeys
//!
//! Each test drives the deployed contract through its client the way a
//! wallet frontend would: register, open wallets, record activity, budget.

use crate::harness::TestHarness;
use coinflow_dapp::{BudgetPeriod, CoinflowError, NotificationKind, TransactionKind};

#[test]
fn test_household_month() {
    let harness = TestHarness::new();
    let coinflow = harness.coinflow();
    let alice = &harness.accounts.wallet_1;

    let wallet_id = harness.onboard(alice, "alice");
    coinflow.create_category(
        alice,
        &harness.s("food"),
        &harness.s("Food & Dining"),
        &harness.s("Food expenses"),
        &harness.s("#FF5733"),
    );
    let budget_id = coinflow.create_budget(
        alice,
        &harness.s("Monthly Food Budget"),
        &harness.s("food"),
        &500_000,
        &harness.s("monthly"),
        &Some(wallet_id),
    );

    coinflow.add_transaction(
        alice,
        &wallet_id,
        &harness.s("income"),
        &2_000_000,
        &harness.s("Income"),
        &harness.s("Salary payment"),
        &harness.tags(&[]),
    );
    harness.advance_days(3);
    let groceries = coinflow.add_transaction(
        alice,
        &wallet_id,
        &harness.s("expense"),
        &250_000,
        &harness.s("food"),
        &harness.s("Grocery shopping"),
        &harness.tags(&["food", "grocery"]),
    );
    harness.advance_days(10);
    coinflow.add_transaction(
        alice,
        &wallet_id,
        &harness.s("expense"),
        &175_000,
        &harness.s("food"),
        &harness.s("Restaurant"),
        &harness.tags(&["food"]),
    );

    let wallet = coinflow.get_wallet(alice, &wallet_id);
    assert_eq!(wallet.balance, 1_575_000);

    let budget = coinflow.get_budget(alice, &budget_id);
    assert_eq!(budget.period, BudgetPeriod::Monthly);
    assert_eq!(budget.spent, 425_000);

    let notifications = coinflow.get_user_notifications(alice);
    assert_eq!(notifications.len(), 1);
    let warning = notifications.get(0).unwrap();
    assert_eq!(warning.kind, NotificationKind::BudgetWarning);
    assert_eq!(warning.budget_id, budget_id);

    // Correcting the grocery receipt pushes the budget over its limit
    coinflow.update_transaction(
        alice,
        &groceries,
        &400_000,
        &harness.s("food"),
        &harness.s("Grocery shopping (corrected)"),
    );
    assert_eq!(coinflow.get_wallet(alice, &wallet_id).balance, 1_425_000);
    assert_eq!(coinflow.get_budget(alice, &budget_id).spent, 575_000);

    let notifications = coinflow.get_user_notifications(alice);
    assert_eq!(notifications.len(), 2);
    assert_eq!(
        notifications.get(1).unwrap().kind,
        NotificationKind::BudgetExceeded
    );

    let history = coinflow.get_wallet_transactions(alice, &wallet_id);
    assert_eq!(history.len(), 3);
    let first = coinflow.get_transaction(alice, &history.get(0).unwrap());
    assert_eq!(first.kind, TransactionKind::Income);

    let stats = coinflow.get_contract_stats();
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.total_wallets, 1);
    assert_eq!(stats.total_transactions, 3);
    assert_eq!(stats.total_categories, 1);
    assert_eq!(stats.total_budgets, 1);
}

#[test]
fn test_users_are_isolated() {
    let harness = TestHarness::new();
    let coinflow = harness.coinflow();
    let alice = &harness.accounts.wallet_1;
    let bob = &harness.accounts.wallet_2;

    let alice_wallet = harness.onboard(alice, "alice");
    let bob_wallet = harness.onboard(bob, "bob");
    assert_ne!(alice_wallet, bob_wallet);

    assert_eq!(
        coinflow.try_get_wallet(bob, &alice_wallet),
        Err(Ok(CoinflowError::Unauthorized))
    );
    assert_eq!(
        coinflow.try_add_transaction(
            bob,
            &alice_wallet,
            &harness.s("income"),
            &1_000,
            &harness.s("Income"),
            &harness.s("Not my wallet"),
            &harness.tags(&[]),
        ),
        Err(Ok(CoinflowError::Unauthorized))
    );

    // Category keys are scoped per owner
    for user in [alice, bob] {
        coinflow.create_category(
            user,
            &harness.s("rent"),
            &harness.s("Rent"),
            &harness.s("Housing"),
            &harness.s("#000000"),
        );
    }
    assert_eq!(coinflow.get_user_categories(alice).len(), 1);
    assert_eq!(coinflow.get_user_categories(bob).len(), 1);
}

#[test]
fn test_admin_pause_cycle() {
    let harness = TestHarness::new();
    let coinflow = harness.coinflow();
    let deployer = &harness.accounts.deployer;
    let alice = &harness.accounts.wallet_1;

    let wallet_id = harness.onboard(alice, "alice");

    coinflow.pause_contract(deployer);
    assert!(coinflow.is_paused());
    assert_eq!(
        coinflow.try_pause_contract(alice),
        Err(Ok(CoinflowError::Unauthorized))
    );
    assert_eq!(
        coinflow.try_create_wallet(
            alice,
            &harness.s("Savings"),
            &harness.s("savings"),
            &harness.s(""),
        ),
        Err(Ok(CoinflowError::ContractPaused))
    );
    // Reads keep working while paused
    assert_eq!(coinflow.get_wallet(alice, &wallet_id).balance, 0);

    coinflow.unpause_contract(deployer);
    assert!(!coinflow.is_paused());
    coinflow.create_wallet(
        alice,
        &harness.s("Savings"),
        &harness.s("savings"),
        &harness.s(""),
    );
    assert_eq!(coinflow.get_user_wallets(alice).len(), 2);
}

#[test]
fn test_error_handling() {
    let harness = TestHarness::new();
    let coinflow = harness.coinflow();
    let alice = &harness.accounts.wallet_1;

    assert_eq!(
        coinflow.try_add_transaction(
            alice,
            &999,
            &harness.s("income"),
            &1_000_000,
            &harness.s("Income"),
            &harness.s("Test"),
            &harness.tags(&[]),
        ),
        Err(Ok(CoinflowError::Unauthorized))
    );

    let wallet_id = harness.onboard(alice, "alice");
    assert_eq!(
        coinflow.try_create_budget(
            alice,
            &harness.s("Test Budget"),
            &harness.s("Food"),
            &1_000_000,
            &harness.s("invalid-period"),
            &Some(wallet_id),
        ),
        Err(Ok(CoinflowError::InvalidBudgetPeriod))
    );
}
