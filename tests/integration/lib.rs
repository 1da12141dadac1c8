//! End-to-end scenarios for the coinflow and investment pool contracts
//!
//! Both contracts are deployed into one `Env` by [`harness::TestHarness`],
//! together with a Stellar asset used as the staking token.


#[cfg(test)]
mod coinflow_scenarios;

#[cfg(test)]
mod investment_pool_scenarios;

#[cfg(test)]
mod portfolio_tests;
