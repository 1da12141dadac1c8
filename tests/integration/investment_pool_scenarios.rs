//! Investment pool lifecycles: staking, governance and emergency exits.

use crate::harness::{TestHarness, STARTING_BALANCE};
use investment_pool::{PoolError, ProposalStatus};

#[test]
fn test_pool_governance_lifecycle() {
    let harness = TestHarness::new();
    let pool = harness.pool();
    let creator = &harness.accounts.wallet_1;
    let staker1 = &harness.accounts.wallet_2;
    let staker2 = &harness.accounts.wallet_3;

    let pool_id = harness.create_pool(creator, "aggressive", 400);
    pool.stake_in_pool(staker1, &pool_id, &10_000_000);
    pool.stake_in_pool(staker2, &pool_id, &15_000_000);

    let proposal_id = pool.create_proposal(
        staker1,
        &pool_id,
        &harness.s("fee-change"),
        &harness.s("Lower the pool fee"),
        &harness.s("Drop the fee to 1%"),
        &0,
        &Some(100),
    );
    pool.vote_on_proposal(staker1, &proposal_id, &false);
    pool.vote_on_proposal(staker2, &proposal_id, &true);
    assert_eq!(
        pool.try_vote_on_proposal(staker2, &proposal_id, &true),
        Err(Ok(PoolError::AlreadyVoted))
    );

    harness.advance_days(3);
    assert_eq!(
        pool.try_execute_proposal(creator, &proposal_id),
        Err(Ok(PoolError::VotingStillOpen))
    );

    harness.advance_days(5);
    assert!(pool.execute_proposal(creator, &proposal_id));
    assert_eq!(
        pool.get_proposal(&proposal_id).unwrap().status,
        ProposalStatus::Executed
    );
    assert_eq!(pool.get_pool(&pool_id).unwrap().fee_bps, 100);

    // The new fee applies to withdrawals after execution
    let net = pool.unstake_from_pool(staker2, &pool_id, &10_000_000);
    assert_eq!(net, 9_900_000);
    assert_eq!(harness.token_balance(creator), STARTING_BALANCE + 100_000);
}

#[test]
fn test_multiple_pools_per_user() {
    let harness = TestHarness::new();
    let pool = harness.pool();
    let creator = &harness.accounts.wallet_1;
    let staker = &harness.accounts.wallet_2;

    let conservative = harness.create_pool(creator, "conservative", 250);
    let aggressive = harness.create_pool(creator, "aggressive", 250);
    pool.stake_in_pool(staker, &conservative, &2_000_000);
    pool.stake_in_pool(staker, &aggressive, &10_000_000);

    let summary = pool.get_user_pools(staker);
    assert_eq!(summary.pool_count, 2);
    assert_eq!(summary.total_staked, 12_000_000);
    assert_eq!(harness.token_balance(&harness.contracts.pool), 12_000_000);

    let stats = pool.get_contract_stats();
    assert_eq!(stats.total_pools, 2);
    assert_eq!(stats.total_staked, 12_000_000);
}

#[test]
fn test_emergency_exit_while_paused() {
    let harness = TestHarness::new();
    let pool = harness.pool();
    let deployer = &harness.accounts.deployer;
    let creator = &harness.accounts.wallet_1;
    let staker1 = &harness.accounts.wallet_2;
    let staker2 = &harness.accounts.wallet_3;

    let pool_id = harness.create_pool(creator, "moderate", 500);
    pool.stake_in_pool(staker1, &pool_id, &4_000_000);
    pool.stake_in_pool(staker2, &pool_id, &6_000_000);

    pool.set_contract_paused(deployer, &true);
    assert_eq!(
        pool.try_unstake_from_pool(staker1, &pool_id, &4_000_000),
        Err(Ok(PoolError::Unauthorized))
    );
    assert_eq!(
        pool.try_emergency_withdraw(staker1, &pool_id),
        Err(Ok(PoolError::EmergencyNotEnabled))
    );

    pool.enable_emergency_withdrawal(deployer);
    assert_eq!(pool.emergency_withdraw(staker1, &pool_id), 4_000_000);
    assert_eq!(pool.emergency_withdraw(staker2, &pool_id), 6_000_000);

    assert_eq!(harness.token_balance(staker1), STARTING_BALANCE);
    assert_eq!(harness.token_balance(staker2), STARTING_BALANCE);
    assert_eq!(harness.token_balance(creator), STARTING_BALANCE);
    assert_eq!(pool.get_pool(&pool_id).unwrap().staker_count, 0);
    assert_eq!(pool.get_contract_stats().total_staked, 0);
}

#[test]
fn test_error_handling() {
    let harness = TestHarness::new();
    let pool = harness.pool();
    let staker = &harness.accounts.wallet_2;

    assert_eq!(
        pool.try_stake_in_pool(staker, &999, &5_000_000),
        Err(Ok(PoolError::NotFound))
    );
    assert_eq!(
        pool.try_vote_on_proposal(staker, &999, &true),
        Err(Ok(PoolError::NotFound))
    );
    assert_eq!(
        pool.try_set_contract_paused(staker, &true),
        Err(Ok(PoolError::Unauthorized))
    );
    assert_eq!(pool.get_pool(&999), None);
}
