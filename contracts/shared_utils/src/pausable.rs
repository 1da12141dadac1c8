//! Pausable contract functionality for emergency stops

use super::events::Events;
use soroban_sdk::{Env, Symbol};

/// Pausable contract functionality
pub struct Pausable;

impl Pausable {
    /// Storage key for the paused state
    pub fn paused_key(env: &Env) -> Symbol {
        Symbol::new(env, "paused")
    }

    /// Check if the contract is currently paused
    ///
    /// # Returns
    /// `true` if paused, `false` otherwise (including before first write)
    pub fn is_paused(e: &Env) -> bool {
        e.storage()
            .instance()
            .get::<_, bool>(&Self::paused_key(e))
            .unwrap_or(false)
    }

    /// Set the paused state.
    ///
    /// Emits `Pause` or `Unpause` only when the state actually changes, so
    /// repeating the current state is a silent no-op.
    pub fn set_paused(e: &Env, paused: bool) {
        if Self::is_paused(e) == paused {
            return;
        }

        e.storage().instance().set(&Self::paused_key(e), &paused);

        let event = if paused { "Pause" } else { "Unpause" };
        Events::emit(e, Symbol::new(e, event), ());
    }

    /// Guard for state-changing entry points.
    ///
    /// Each contract reports a paused contract with its own error code, so the
    /// error to return is supplied by the caller.
    pub fn ensure_not_paused<E>(e: &Env, err: E) -> Result<(), E> {
        if Self::is_paused(e) {
            return Err(err);
        }
        Ok(())
    }
}
