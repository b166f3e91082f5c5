// Export all instruction modules

pub mod claim_reward;
pub mod fund_rewards;
pub mod initialize;
pub mod stake;
pub mod update_pool;

// Re-export the instruction structs for easy access
pub use claim_reward::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use stake::*;
pub use update_pool::*;

use anchor_lang::prelude::*;

use crate::state::{PoolInfo, UserInfo};

/// Run `apply` against the pool and user records, restoring both if it fails.
/// The runtime already discards a failed transaction; this keeps the same
/// all-or-nothing result when the handlers run off-chain.
pub(crate) fn with_rollback<T>(
    pool: &mut PoolInfo,
    user: &mut UserInfo,
    apply: impl FnOnce(&mut PoolInfo, &mut UserInfo) -> Result<T>,
) -> Result<T> {
    let pool_snapshot = pool.clone();
    let user_snapshot = user.clone();

    match apply(pool, user) {
        Ok(value) => Ok(value),
        Err(err) => {
            *pool = pool_snapshot;
            *user = user_snapshot;
            Err(err)
        }
    }
}
