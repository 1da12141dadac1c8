//! Storage helpers
//!
//! Records live in persistent storage and get their TTL extended on every
//! write. Counters and configuration live in instance storage.

use soroban_sdk::{Env, IntoVal, TryFromVal, Val};

pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub struct Storage;

impl Storage {
    pub fn get<K, V>(e: &Env, key: &K) -> Option<V>
    where
        K: IntoVal<Env, Val>,
        V: TryFromVal<Env, Val>,
    {
        e.storage().persistent().get::<K, V>(key)
    }

    pub fn has<K>(e: &Env, key: &K) -> bool
    where
        K: IntoVal<Env, Val>,
    {
        e.storage().persistent().has(key)
    }

    pub fn set<K, V>(e: &Env, key: &K, value: &V)
    where
        K: IntoVal<Env, Val>,
        V: IntoVal<Env, Val>,
    {
        e.storage().persistent().set(key, value);
        e.storage().persistent().extend_ttl(
            key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }

    pub fn remove<K>(e: &Env, key: &K)
    where
        K: IntoVal<Env, Val>,
    {
        e.storage().persistent().remove(key);
    }

    /// Current value of an instance-storage counter (0 if never written).
    pub fn count<K>(e: &Env, key: &K) -> u64
    where
        K: IntoVal<Env, Val>,
    {
        e.storage().instance().get::<K, u64>(key).unwrap_or(0)
    }

    /// Increment a counter and return the new value. Ids handed out this way start at 1.
    pub fn next_id<K>(e: &Env, key: &K) -> u64
    where
        K: IntoVal<Env, Val>,
    {
        let next = Self::count(e, key) + 1;
        e.storage().instance().set(key, &next);
        next
    }

    pub fn bump_instance(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }
}
