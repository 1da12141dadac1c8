//! Event emission helpers

use soroban_sdk::{Env, IntoVal, Symbol, Val};

/// Thin wrapper over `env.events()` so every contract publishes with the
/// same topic layout: `(event_type,)` or `(event_type, id)`.
pub struct Events;

impl Events {
    pub fn emit<D>(e: &Env, event_type: Symbol, data: D)
    where
        D: IntoVal<Env, Val>,
    {
        e.events().publish((event_type,), data);
    }

    /// Publish an event whose second topic identifies the affected record.
    pub fn emit_for<I, D>(e: &Env, event_type: Symbol, id: I, data: D)
    where
        I: IntoVal<Env, Val>,
        D: IntoVal<Env, Val>,
    {
        e.events().publish((event_type, id), data);
    }
}
