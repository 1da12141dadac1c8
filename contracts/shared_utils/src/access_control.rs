//! Single-admin access control

use soroban_sdk::{symbol_short, Address, Env, Symbol};

const ADMIN: Symbol = symbol_short!("admin");

pub struct AccessControl;

impl AccessControl {
    /// Store the admin address.
    ///
    /// Returns `false` without touching storage if an admin is already set.
    pub fn init_admin(e: &Env, admin: &Address) -> bool {
        if e.storage().instance().has(&ADMIN) {
            return false;
        }
        e.storage().instance().set(&ADMIN, admin);
        true
    }

    pub fn get_admin(e: &Env) -> Option<Address> {
        e.storage().instance().get::<_, Address>(&ADMIN)
    }

    /// `true` only when an admin is set and equals `who`.
    pub fn is_admin(e: &Env, who: &Address) -> bool {
        match Self::get_admin(e) {
            Some(admin) => admin == *who,
            None => false,
        }
    }
}
