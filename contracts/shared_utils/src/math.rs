//! Checked arithmetic for token amounts

/// Basis-point denominator (100% = 10_000 bps)
pub const BPS_DENOMINATOR: i128 = 10_000;

pub struct SafeMath;

impl SafeMath {
    pub fn add(a: i128, b: i128) -> Option<i128> {
        a.checked_add(b)
    }

    pub fn sub(a: i128, b: i128) -> Option<i128> {
        a.checked_sub(b)
    }

    /// `amount * bps / 10_000`, rounded toward zero.
    pub fn bps(amount: i128, bps: u32) -> Option<i128> {
        amount
            .checked_mul(bps as i128)?
            .checked_div(BPS_DENOMINATOR)
    }

    /// Whole percentage of `part` relative to `whole`.
    ///
    /// Returns 0 when `whole` is not positive or `part` is negative.
    pub fn percent_of(part: i128, whole: i128) -> u32 {
        if whole <= 0 || part <= 0 {
            return 0;
        }
        let percent = part.saturating_mul(100) / whole;
        if percent > u32::MAX as i128 {
            u32::MAX
        } else {
            percent as u32
        }
    }
}
