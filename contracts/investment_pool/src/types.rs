use shared_utils::Validation;
use soroban_sdk::{contracttype, Address, Env, String, Vec};

pub const MAX_FEE_BPS: u32 = 1_000;
pub const MAX_NAME_LEN: u32 = 50;
pub const MAX_TITLE_LEN: u32 = 100;
pub const MAX_DESCRIPTION_LEN: u32 = 200;
pub const VOTING_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;
/// Share of the pool's stake (percent) that must vote for a proposal to count.
pub const QUORUM_PERCENT: u32 = 10;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Token,
    Pool(u64),
    Stake(u64, Address),  // (pool_id, staker)
    UserPools(Address),   // staker -> Vec<pool_id> with an open position
    Proposal(u64),
    PoolProposals(u64),   // pool_id -> Vec<proposal_id>
    Vote(u64, Address),   // (proposal_id, voter)
    PoolCount,
    ProposalCount,
    TotalStaked,
    EmergencyWithdrawal,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolType {
    Conservative,
    Moderate,
    Aggressive,
}

impl PoolType {
    pub fn parse(e: &Env, raw: &String) -> Option<Self> {
        match Validation::match_index(e, raw, &["conservative", "moderate", "aggressive"])? {
            0 => Some(PoolType::Conservative),
            1 => Some(PoolType::Moderate),
            _ => Some(PoolType::Aggressive),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u64,
    pub creator: Address,
    pub name: String,
    pub description: String,
    pub pool_type: PoolType,
    pub min_stake: i128,
    pub max_stake: i128,
    pub target_amount: i128,
    pub fee_bps: u32,
    pub total_staked: i128,
    pub staker_count: u32,
    pub is_active: bool,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    pub pool_id: u64,
    pub staker: Address,
    pub amount: i128,
    pub staked_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPoolsSummary {
    pub pool_count: u32,
    pub total_staked: i128,
    pub pool_ids: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalType {
    Investment,
    FeeChange,
    PoolClosure,
}

impl ProposalType {
    pub fn parse(e: &Env, raw: &String) -> Option<Self> {
        match Validation::match_index(e, raw, &["investment", "fee-change", "pool-closure"])? {
            0 => Some(ProposalType::Investment),
            1 => Some(ProposalType::FeeChange),
            _ => Some(ProposalType::PoolClosure),
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    Active,
    Executed,
    Rejected,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub pool_id: u64,
    pub proposer: Address,
    pub proposal_type: ProposalType,
    pub title: String,
    pub description: String,
    pub amount: i128,
    /// New fee in bps for `FeeChange`; unused otherwise.
    pub parameter: Option<i128>,
    pub votes_for: i128,
    pub votes_against: i128,
    pub voter_count: u32,
    pub created_at: u64,
    pub voting_ends_at: u64,
    pub status: ProposalStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vote {
    pub proposal_id: u64,
    pub voter: Address,
    pub support: bool,
    pub power: i128,
    pub voted_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStats {
    pub total_pools: u64,
    pub total_proposals: u64,
    pub total_staked: i128,
    pub contract_paused: bool,
    pub emergency_withdrawal: bool,
}
