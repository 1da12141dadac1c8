#![no_std]

//! Investment pool staking and governance
//!
//! Anyone can open a pool with stake bounds, a funding target and a fee.
//! Stakers deposit the configured token; their position is their voting power
//! on proposals raised against the pool. Passed proposals can change the fee
//! or close the pool. The admin can pause the contract and, in an emergency,
//! let stakers pull their full position out without fees.

use shared_utils::{AccessControl, Events, Pausable, SafeMath, Storage, Validation};
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, String, Vec};

mod errors;
mod types;

pub use errors::PoolError;
pub use types::*;

#[contract]
pub struct InvestmentPoolContract;

fn require_initialized(e: &Env) -> Result<(), PoolError> {
    if AccessControl::get_admin(e).is_none() {
        return Err(PoolError::NotInitialized);
    }
    Ok(())
}

/// A paused contract rejects writes with `Unauthorized`.
fn require_active(e: &Env) -> Result<(), PoolError> {
    require_initialized(e)?;
    Pausable::ensure_not_paused(e, PoolError::Unauthorized)
}

fn require_admin(e: &Env, caller: &Address) -> Result<(), PoolError> {
    require_initialized(e)?;
    if !AccessControl::is_admin(e, caller) {
        log!(e, "Rejected admin call from non-admin");
        return Err(PoolError::Unauthorized);
    }
    Ok(())
}

fn emergency_enabled(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<_, bool>(&DataKey::EmergencyWithdrawal)
        .unwrap_or(false)
}

fn token_client(e: &Env) -> Result<token::Client<'_>, PoolError> {
    let token = e
        .storage()
        .instance()
        .get::<_, Address>(&DataKey::Token)
        .ok_or(PoolError::NotInitialized)?;
    Ok(token::Client::new(e, &token))
}

fn load_pool(e: &Env, pool_id: u64) -> Result<Pool, PoolError> {
    Storage::get::<_, Pool>(e, &DataKey::Pool(pool_id)).ok_or(PoolError::NotFound)
}

fn stake_of(e: &Env, pool_id: u64, staker: &Address) -> i128 {
    Storage::get::<_, Stake>(e, &DataKey::Stake(pool_id, staker.clone()))
        .map(|stake| stake.amount)
        .unwrap_or(0)
}

fn total_staked(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get::<_, i128>(&DataKey::TotalStaked)
        .unwrap_or(0)
}

fn adjust_total_staked(e: &Env, delta: i128) -> Result<(), PoolError> {
    let total = SafeMath::add(total_staked(e), delta).ok_or(PoolError::InvalidParameters)?;
    e.storage().instance().set(&DataKey::TotalStaked, &total);
    Ok(())
}

fn remove_user_pool(e: &Env, staker: &Address, pool_id: u64) {
    let key = DataKey::UserPools(staker.clone());
    let ids = Storage::get::<_, Vec<u64>>(e, &key).unwrap_or(Vec::new(e));
    let mut kept = Vec::new(e);
    for id in ids.iter() {
        if id != pool_id {
            kept.push_back(id);
        }
    }
    Storage::set(e, &key, &kept);
}

/// Lower the voter's weight on the pool's open proposals to the stake they
/// still hold, taking the difference off the side they voted for.
fn cap_open_votes(
    e: &Env,
    pool_id: u64,
    voter: &Address,
    remaining: i128,
) -> Result<(), PoolError> {
    let proposal_ids = Storage::get::<_, Vec<u64>>(e, &DataKey::PoolProposals(pool_id))
        .unwrap_or(Vec::new(e));
    for proposal_id in proposal_ids.iter() {
        let vote_key = DataKey::Vote(proposal_id, voter.clone());
        let Some(mut vote) = Storage::get::<_, Vote>(e, &vote_key) else {
            continue;
        };
        if vote.power <= remaining {
            continue;
        }
        let key = DataKey::Proposal(proposal_id);
        let Some(mut proposal) = Storage::get::<_, Proposal>(e, &key) else {
            continue;
        };
        if proposal.status != ProposalStatus::Active {
            continue;
        }

        let released = vote.power - remaining;
        if vote.support {
            proposal.votes_for =
                SafeMath::sub(proposal.votes_for, released).ok_or(PoolError::InvalidParameters)?;
        } else {
            proposal.votes_against = SafeMath::sub(proposal.votes_against, released)
                .ok_or(PoolError::InvalidParameters)?;
        }
        vote.power = remaining;
        Storage::set(e, &key, &proposal);
        Storage::set(e, &vote_key, &vote);
        log!(e, "Vote weight on proposal {} reduced by {}", proposal_id, released);
    }
    Ok(())
}

/// Reduce a position by `amount`, closing it when it reaches zero.
fn withdraw_position(
    e: &Env,
    pool: &mut Pool,
    mut stake: Stake,
    amount: i128,
) -> Result<(), PoolError> {
    stake.amount = SafeMath::sub(stake.amount, amount).ok_or(PoolError::InsufficientStake)?;
    stake.updated_at = e.ledger().timestamp();
    pool.total_staked =
        SafeMath::sub(pool.total_staked, amount).ok_or(PoolError::InsufficientStake)?;

    cap_open_votes(e, pool.id, &stake.staker, stake.amount)?;

    let stake_key = DataKey::Stake(pool.id, stake.staker.clone());
    if stake.amount == 0 {
        Storage::remove(e, &stake_key);
        remove_user_pool(e, &stake.staker, pool.id);
        pool.staker_count = pool.staker_count.saturating_sub(1);
    } else {
        Storage::set(e, &stake_key, &stake);
    }
    Storage::set(e, &DataKey::Pool(pool.id), &*pool);
    adjust_total_staked(e, -amount)
}

fn validate_pool_params(
    e: &Env,
    name: &String,
    description: &String,
    pool_type: &String,
    min_stake: i128,
    max_stake: i128,
    target_amount: i128,
    fee_bps: u32,
) -> Result<PoolType, PoolError> {
    if !Validation::len_within(name, 1, MAX_NAME_LEN)
        || !Validation::len_within(description, 0, MAX_DESCRIPTION_LEN)
    {
        log!(e, "Invalid pool name or description");
        return Err(PoolError::InvalidParameters);
    }
    let pool_type = PoolType::parse(e, pool_type).ok_or(PoolError::InvalidParameters)?;
    if min_stake <= 0 || min_stake > max_stake || max_stake > target_amount {
        log!(e, "Invalid stake bounds: {} {} {}", min_stake, max_stake, target_amount);
        return Err(PoolError::InvalidParameters);
    }
    if fee_bps > MAX_FEE_BPS {
        return Err(PoolError::InvalidParameters);
    }
    Ok(pool_type)
}

#[contractimpl]
impl InvestmentPoolContract {
    /// Initialize with the admin and the token that pools are staked in.
    pub fn initialize(e: Env, admin: Address, token: Address) -> Result<(), PoolError> {
        if !AccessControl::init_admin(&e, &admin) {
            return Err(PoolError::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Token, &token);
        Storage::bump_instance(&e);
        Ok(())
    }

    pub fn get_admin(e: Env) -> Result<Address, PoolError> {
        AccessControl::get_admin(&e).ok_or(PoolError::NotInitialized)
    }

    // ============================================
    // Pools
    // ============================================

    pub fn create_pool(
        e: Env,
        creator: Address,
        name: String,
        description: String,
        pool_type: String,
        min_stake: i128,
        max_stake: i128,
        target_amount: i128,
        fee_bps: u32,
    ) -> Result<u64, PoolError> {
        require_active(&e)?;
        creator.require_auth();

        let pool_type = validate_pool_params(
            &e,
            &name,
            &description,
            &pool_type,
            min_stake,
            max_stake,
            target_amount,
            fee_bps,
        )?;

        let pool_id = Storage::next_id(&e, &DataKey::PoolCount);
        let pool = Pool {
            id: pool_id,
            creator: creator.clone(),
            name,
            description,
            pool_type,
            min_stake,
            max_stake,
            target_amount,
            fee_bps,
            total_staked: 0,
            staker_count: 0,
            is_active: true,
            created_at: e.ledger().timestamp(),
        };
        Storage::set(&e, &DataKey::Pool(pool_id), &pool);

        Events::emit_for(&e, symbol_short!("pool_new"), pool_id, (creator, pool_type));
        Ok(pool_id)
    }

    pub fn get_pool(e: Env, pool_id: u64) -> Option<Pool> {
        Storage::get(&e, &DataKey::Pool(pool_id))
    }

    /// Open or close a pool for new stakes and proposals. Creator or admin only.
    pub fn set_pool_active(
        e: Env,
        caller: Address,
        pool_id: u64,
        active: bool,
    ) -> Result<(), PoolError> {
        require_active(&e)?;
        caller.require_auth();

        let mut pool = load_pool(&e, pool_id)?;
        if pool.creator != caller && !AccessControl::is_admin(&e, &caller) {
            return Err(PoolError::Unauthorized);
        }
        pool.is_active = active;
        Storage::set(&e, &DataKey::Pool(pool_id), &pool);

        Events::emit_for(&e, symbol_short!("pool_act"), pool_id, active);
        Ok(())
    }

    // ============================================
    // Staking
    // ============================================

    /// Deposit `amount` into a pool.
    ///
    /// Every deposit must meet the pool's minimum on its own; the resulting
    /// position is capped by `max_stake` and the pool total by its target.
    pub fn stake_in_pool(
        e: Env,
        staker: Address,
        pool_id: u64,
        amount: i128,
    ) -> Result<(), PoolError> {
        require_active(&e)?;
        staker.require_auth();

        let mut pool = load_pool(&e, pool_id)?;
        if !pool.is_active || emergency_enabled(&e) {
            return Err(PoolError::PoolInactive);
        }
        if amount < pool.min_stake {
            log!(&e, "Stake below minimum: {} < {}", amount, pool.min_stake);
            return Err(PoolError::MinimumStakeNotMet);
        }

        let stake_key = DataKey::Stake(pool_id, staker.clone());
        let now = e.ledger().timestamp();
        let existing = Storage::get::<_, Stake>(&e, &stake_key);
        let is_new = existing.is_none();
        let mut stake = existing.unwrap_or(Stake {
            pool_id,
            staker: staker.clone(),
            amount: 0,
            staked_at: now,
            updated_at: now,
        });

        let position =
            SafeMath::add(stake.amount, amount).ok_or(PoolError::MaximumStakeExceeded)?;
        if position > pool.max_stake {
            return Err(PoolError::MaximumStakeExceeded);
        }
        let pool_total =
            SafeMath::add(pool.total_staked, amount).ok_or(PoolError::PoolTargetReached)?;
        if pool_total > pool.target_amount {
            return Err(PoolError::PoolTargetReached);
        }

        token_client(&e)?.transfer(&staker, &e.current_contract_address(), &amount);

        stake.amount = position;
        stake.updated_at = now;
        Storage::set(&e, &stake_key, &stake);

        pool.total_staked = pool_total;
        if is_new {
            pool.staker_count += 1;
            let user_key = DataKey::UserPools(staker.clone());
            let mut ids = Storage::get::<_, Vec<u64>>(&e, &user_key).unwrap_or(Vec::new(&e));
            ids.push_back(pool_id);
            Storage::set(&e, &user_key, &ids);
        }
        Storage::set(&e, &DataKey::Pool(pool_id), &pool);
        adjust_total_staked(&e, amount)?;

        Events::emit_for(&e, symbol_short!("staked"), pool_id, (staker, amount));
        Ok(())
    }

    /// Withdraw part or all of a position. The pool fee on `amount` goes to
    /// the pool creator; the net amount is returned.
    pub fn unstake_from_pool(
        e: Env,
        staker: Address,
        pool_id: u64,
        amount: i128,
    ) -> Result<i128, PoolError> {
        require_active(&e)?;
        staker.require_auth();

        let mut pool = load_pool(&e, pool_id)?;
        if amount <= 0 {
            return Err(PoolError::InvalidParameters);
        }
        let stake = Storage::get::<_, Stake>(&e, &DataKey::Stake(pool_id, staker.clone()))
            .ok_or(PoolError::InsufficientStake)?;
        if amount > stake.amount {
            return Err(PoolError::InsufficientStake);
        }

        let fee = SafeMath::bps(amount, pool.fee_bps).ok_or(PoolError::InvalidParameters)?;
        let net = SafeMath::sub(amount, fee).ok_or(PoolError::InvalidParameters)?;

        withdraw_position(&e, &mut pool, stake, amount)?;

        let token = token_client(&e)?;
        let contract = e.current_contract_address();
        token.transfer(&contract, &staker, &net);
        if fee > 0 {
            token.transfer(&contract, &pool.creator, &fee);
        }

        Events::emit_for(&e, symbol_short!("unstaked"), pool_id, (staker, net, fee));
        Ok(net)
    }

    /// Pull out a whole position without fees. Only available once the admin
    /// has enabled emergency withdrawal; works while paused.
    pub fn emergency_withdraw(e: Env, staker: Address, pool_id: u64) -> Result<i128, PoolError> {
        require_initialized(&e)?;
        staker.require_auth();

        if !emergency_enabled(&e) {
            return Err(PoolError::EmergencyNotEnabled);
        }
        let mut pool = load_pool(&e, pool_id)?;
        let stake = Storage::get::<_, Stake>(&e, &DataKey::Stake(pool_id, staker.clone()))
            .ok_or(PoolError::InsufficientStake)?;
        let amount = stake.amount;

        withdraw_position(&e, &mut pool, stake, amount)?;
        token_client(&e)?.transfer(&e.current_contract_address(), &staker, &amount);

        Events::emit_for(&e, symbol_short!("emrg_wd"), pool_id, (staker, amount));
        Ok(amount)
    }

    pub fn get_stake(e: Env, pool_id: u64, staker: Address) -> Option<Stake> {
        Storage::get(&e, &DataKey::Stake(pool_id, staker))
    }

    pub fn get_user_pools(e: Env, user: Address) -> UserPoolsSummary {
        let pool_ids = Storage::get::<_, Vec<u64>>(&e, &DataKey::UserPools(user.clone()))
            .unwrap_or(Vec::new(&e));
        let mut total: i128 = 0;
        for pool_id in pool_ids.iter() {
            total = total.saturating_add(stake_of(&e, pool_id, &user));
        }
        UserPoolsSummary {
            pool_count: pool_ids.len(),
            total_staked: total,
            pool_ids,
        }
    }

    // ============================================
    // Governance
    // ============================================

    /// Raise a proposal against a pool.
    ///
    /// The proposer needs a position of at least the pool's minimum stake.
    pub fn create_proposal(
        e: Env,
        proposer: Address,
        pool_id: u64,
        proposal_type: String,
        title: String,
        description: String,
        amount: i128,
        parameter: Option<i128>,
    ) -> Result<u64, PoolError> {
        require_active(&e)?;
        proposer.require_auth();

        let pool = load_pool(&e, pool_id)?;
        if !pool.is_active {
            return Err(PoolError::PoolInactive);
        }
        let power = stake_of(&e, pool_id, &proposer);
        if power <= 0 || power < pool.min_stake {
            log!(&e, "Insufficient voting power: {}", power);
            return Err(PoolError::InsufficientVotingPower);
        }

        let proposal_type =
            ProposalType::parse(&e, &proposal_type).ok_or(PoolError::InvalidParameters)?;
        if !Validation::len_within(&title, 1, MAX_TITLE_LEN)
            || !Validation::len_within(&description, 0, MAX_DESCRIPTION_LEN)
            || amount < 0
        {
            return Err(PoolError::InvalidParameters);
        }
        if proposal_type == ProposalType::FeeChange {
            match parameter {
                Some(fee) if Validation::amount_within(fee, 0, MAX_FEE_BPS as i128) => {}
                _ => return Err(PoolError::InvalidParameters),
            }
        }

        let proposal_id = Storage::next_id(&e, &DataKey::ProposalCount);
        let now = e.ledger().timestamp();
        let proposal = Proposal {
            id: proposal_id,
            pool_id,
            proposer: proposer.clone(),
            proposal_type,
            title,
            description,
            amount,
            parameter,
            votes_for: 0,
            votes_against: 0,
            voter_count: 0,
            created_at: now,
            voting_ends_at: now + VOTING_PERIOD_SECS,
            status: ProposalStatus::Active,
        };
        Storage::set(&e, &DataKey::Proposal(proposal_id), &proposal);

        let list_key = DataKey::PoolProposals(pool_id);
        let mut ids = Storage::get::<_, Vec<u64>>(&e, &list_key).unwrap_or(Vec::new(&e));
        ids.push_back(proposal_id);
        Storage::set(&e, &list_key, &ids);

        Events::emit_for(&e, symbol_short!("proposal"), proposal_id, (pool_id, proposer));
        Ok(proposal_id)
    }

    pub fn get_proposal(e: Env, proposal_id: u64) -> Option<Proposal> {
        Storage::get(&e, &DataKey::Proposal(proposal_id))
    }

    pub fn get_pool_proposals(e: Env, pool_id: u64) -> Vec<u64> {
        Storage::get(&e, &DataKey::PoolProposals(pool_id)).unwrap_or(Vec::new(&e))
    }

    /// Cast a vote weighted by the voter's current stake in the pool.
    ///
    /// Withdrawing stake before the proposal is executed lowers the vote's
    /// weight to what the voter still holds.
    pub fn vote_on_proposal(
        e: Env,
        voter: Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<(), PoolError> {
        require_active(&e)?;
        voter.require_auth();

        let key = DataKey::Proposal(proposal_id);
        let mut proposal = Storage::get::<_, Proposal>(&e, &key).ok_or(PoolError::NotFound)?;
        if proposal.status != ProposalStatus::Active {
            return Err(PoolError::ProposalNotActive);
        }
        let now = e.ledger().timestamp();
        if now >= proposal.voting_ends_at {
            return Err(PoolError::VotingClosed);
        }
        let vote_key = DataKey::Vote(proposal_id, voter.clone());
        if Storage::has(&e, &vote_key) {
            return Err(PoolError::AlreadyVoted);
        }
        let power = stake_of(&e, proposal.pool_id, &voter);
        if power <= 0 {
            return Err(PoolError::InsufficientVotingPower);
        }

        if support {
            proposal.votes_for =
                SafeMath::add(proposal.votes_for, power).ok_or(PoolError::InvalidParameters)?;
        } else {
            proposal.votes_against = SafeMath::add(proposal.votes_against, power)
                .ok_or(PoolError::InvalidParameters)?;
        }
        proposal.voter_count += 1;
        Storage::set(&e, &key, &proposal);

        let vote = Vote {
            proposal_id,
            voter: voter.clone(),
            support,
            power,
            voted_at: now,
        };
        Storage::set(&e, &vote_key, &vote);

        Events::emit_for(&e, symbol_short!("voted"), proposal_id, (voter, support, power));
        Ok(())
    }

    pub fn get_vote(e: Env, proposal_id: u64, voter: Address) -> Option<Vote> {
        Storage::get(&e, &DataKey::Vote(proposal_id, voter))
    }

    /// Close voting on a proposal and apply it if it passed.
    ///
    /// A proposal passes when votes for outweigh votes against and turnout is
    /// at least `QUORUM_PERCENT` of the pool's stake at execution time.
    pub fn execute_proposal(e: Env, caller: Address, proposal_id: u64) -> Result<bool, PoolError> {
        require_active(&e)?;
        caller.require_auth();

        let key = DataKey::Proposal(proposal_id);
        let mut proposal = Storage::get::<_, Proposal>(&e, &key).ok_or(PoolError::NotFound)?;
        if proposal.status != ProposalStatus::Active {
            return Err(PoolError::ProposalNotActive);
        }
        if e.ledger().timestamp() < proposal.voting_ends_at {
            return Err(PoolError::VotingStillOpen);
        }

        let mut pool = load_pool(&e, proposal.pool_id)?;
        let turnout = proposal.votes_for.saturating_add(proposal.votes_against);
        let quorum_met = SafeMath::percent_of(turnout, pool.total_staked) >= QUORUM_PERCENT;
        let passed = quorum_met && proposal.votes_for > proposal.votes_against;

        if passed {
            match proposal.proposal_type {
                ProposalType::FeeChange => {
                    if let Some(fee) = proposal.parameter {
                        pool.fee_bps = fee as u32;
                    }
                }
                ProposalType::PoolClosure => pool.is_active = false,
                ProposalType::Investment => {}
            }
            Storage::set(&e, &DataKey::Pool(pool.id), &pool);
            proposal.status = ProposalStatus::Executed;
        } else {
            proposal.status = ProposalStatus::Rejected;
        }
        Storage::set(&e, &key, &proposal);

        Events::emit_for(&e, symbol_short!("executed"), proposal_id, passed);
        Ok(passed)
    }

    // ============================================
    // Admin
    // ============================================

    pub fn set_contract_paused(e: Env, caller: Address, paused: bool) -> Result<(), PoolError> {
        caller.require_auth();
        require_admin(&e, &caller)?;
        Pausable::set_paused(&e, paused);
        Ok(())
    }

    pub fn enable_emergency_withdrawal(e: Env, caller: Address) -> Result<(), PoolError> {
        caller.require_auth();
        require_admin(&e, &caller)?;
        e.storage()
            .instance()
            .set(&DataKey::EmergencyWithdrawal, &true);

        Events::emit(&e, symbol_short!("emergency"), caller);
        Ok(())
    }

    pub fn get_contract_stats(e: Env) -> PoolStats {
        PoolStats {
            total_pools: Storage::count(&e, &DataKey::PoolCount),
            total_proposals: Storage::count(&e, &DataKey::ProposalCount),
            total_staked: total_staked(&e),
            contract_paused: Pausable::is_paused(&e),
            emergency_withdrawal: emergency_enabled(&e),
        }
    }
}
