use anchor_lang::prelude::*;

use crate::{constants::SCALE, error::StakingError};

/// Safely add two u128 values
pub fn checked_add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or(StakingError::ArithmeticOverflow.into())
}

/// Safely subtract two u128 values
pub fn checked_sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or(StakingError::ArithmeticOverflow.into())
}

/// Safely multiply two u128 values
pub fn checked_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or(StakingError::ArithmeticOverflow.into())
}

/// Truncating division; a zero divisor is reported as overflow
pub fn checked_div(a: u128, b: u128) -> Result<u128> {
    a.checked_div(b).ok_or(StakingError::ArithmeticOverflow.into())
}

/// Safely add two u64 values
pub fn checked_add_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(StakingError::ArithmeticOverflow.into())
}

/// Narrow a u128 back to a token amount
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| StakingError::ArithmeticOverflow.into())
}

/// Accumulator increase for `reward` units spread over `total_staked` shares
/// Formula: reward * SCALE / total_staked (truncating)
pub fn reward_per_share(reward: u128, total_staked: u64) -> Result<u128> {
    checked_div(checked_mul(reward, SCALE)?, total_staked as u128)
}

/// Reward owed to `amount` shares at accumulator value `acc`
/// Formula: amount * acc / SCALE (truncating)
pub fn accrued_for(amount: u64, acc_reward_per_share: u128) -> Result<u128> {
    checked_div(checked_mul(amount as u128, acc_reward_per_share)?, SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn test_checked_helpers() {
        assert_eq!(checked_add(100, 200).unwrap(), 300);
        assert!(checked_add(u128::MAX, 1).is_err());

        assert_eq!(checked_sub(200, 100).unwrap(), 100);
        assert!(checked_sub(100, 200).is_err());

        assert_eq!(checked_mul(7, 6).unwrap(), 42);
        assert!(checked_mul(u128::MAX, 2).is_err());

        assert_eq!(checked_div(100, 3).unwrap(), 33);
        assert_eq!(
            checked_div(100, 0).unwrap_err(),
            Error::from(StakingError::ArithmeticOverflow)
        );

        assert_eq!(checked_add_u64(1, 2).unwrap(), 3);
        assert!(checked_add_u64(u64::MAX, 1).is_err());
    }

    #[test]
    fn test_to_u64_narrowing() {
        assert_eq!(to_u64(u64::MAX as u128).unwrap(), u64::MAX);
        assert!(to_u64(u64::MAX as u128 + 1).is_err());
    }

    #[test]
    fn test_reward_per_share() {
        // 10 slots at rate 5 over 100 staked tokens
        assert_eq!(reward_per_share(50, 100).unwrap(), 50 * SCALE / 100);

        // Truncates instead of rounding up
        assert_eq!(reward_per_share(1, 3).unwrap(), SCALE / 3);

        // No shares to spread over
        assert!(reward_per_share(1, 0).is_err());

        // reward * SCALE overflows u128
        assert!(reward_per_share(u128::MAX / 1_000, 1).is_err());
    }

    #[test]
    fn test_accrued_for() {
        let acc = reward_per_share(1_000, 100).unwrap();
        assert_eq!(accrued_for(100, acc).unwrap(), 1_000);
        assert_eq!(accrued_for(25, acc).unwrap(), 250);
        assert_eq!(accrued_for(0, acc).unwrap(), 0);
        assert!(accrued_for(u64::MAX, u128::MAX).is_err());
    }
}
