//! Input validation helpers

use soroban_sdk::{Env, String};

pub struct Validation;

impl Validation {
    /// Length of `s` in bytes lies within `min..=max`.
    pub fn len_within(s: &String, min: u32, max: u32) -> bool {
        let len = s.len();
        len >= min && len <= max
    }

    /// Index of `s` in `allowed`, compared case-sensitively.
    ///
    /// Contracts use this to parse string-encoded enum arguments.
    pub fn match_index(e: &Env, s: &String, allowed: &[&str]) -> Option<usize> {
        allowed
            .iter()
            .position(|candidate| *s == String::from_str(e, candidate))
    }

    pub fn amount_within(amount: i128, min: i128, max: i128) -> bool {
        amount >= min && amount <= max
    }
}
