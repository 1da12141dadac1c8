use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    /// Caller lacks the required role, or the contract is paused.
    Unauthorized = 200,
    NotFound = 201,
    PoolInactive = 202,
    InvalidParameters = 203,
    InsufficientStake = 204,
    MaximumStakeExceeded = 205,
    PoolTargetReached = 206,
    MinimumStakeNotMet = 207,
    InsufficientVotingPower = 208,
    VotingClosed = 209,
    VotingStillOpen = 210,
    AlreadyVoted = 211,
    ProposalNotActive = 212,
    EmergencyNotEnabled = 213,
    AlreadyInitialized = 214,
    NotInitialized = 215,
}
