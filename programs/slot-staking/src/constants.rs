// PDA Seeds for deterministic address generation

/// Seed for the PoolInfo PDA: ["pool"]
/// One pool per program deployment
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for UserInfo PDAs: ["user", pool.key(), owner.key()]
/// This ensures one record per owner per pool
pub const USER_SEED: &[u8] = b"user";

/// Seed for the vault authority PDA: ["vault_authority", pool.key()]
/// Signs every transfer out of the stake and reward vaults
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for the stake vault PDA: ["stake_vault", pool.key()]
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";

/// Seed for the reward vault PDA: ["reward_vault", pool.key()]
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

// Precision

/// Fixed-point scale applied to `acc_reward_per_share` (1e12)
pub const SCALE: u128 = 1_000_000_000_000;

/// Reward emitted per slot when a client does not pick its own rate
pub const DEFAULT_REWARD_RATE_PER_SLOT: u64 = 1;

// Account Space Constants

/// Anchor discriminator size (8 bytes)
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Check if an emission window is well formed
pub fn is_valid_slot_range(start_slot: u64, end_slot: u64) -> bool {
    start_slot < end_slot
}

/// Check if a reward rate can be used for a new pool
pub fn is_valid_reward_rate(rate: u64) -> bool {
    rate > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_range_validation() {
        assert!(is_valid_slot_range(100, 1000));
        assert!(is_valid_slot_range(0, 1));
        assert!(!is_valid_slot_range(1000, 1000));
        assert!(!is_valid_slot_range(1000, 100));
    }

    #[test]
    fn test_reward_rate_validation() {
        assert!(is_valid_reward_rate(DEFAULT_REWARD_RATE_PER_SLOT));
        assert!(is_valid_reward_rate(u64::MAX));
        assert!(!is_valid_reward_rate(0));
    }
}
