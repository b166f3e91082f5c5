use anchor_lang::prelude::*;

use crate::{constants::POOL_SEED, error::StakingError, events::PoolSynced, state::PoolInfo};

/// Bring the pool accumulator current
/// This is a lightweight operation that anyone can call
#[derive(Accounts)]
pub struct UpdatePool<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Account<'info, PoolInfo>,

    /// The caller of this instruction (can be anyone)
    /// CHECK: This account is not validated as anyone can call this instruction
    pub caller: UncheckedAccount<'info>,
}

impl<'info> UpdatePool<'info> {
    pub fn update_pool(&mut self) -> Result<()> {
        let current_slot = Clock::get()?.slot;

        let report = process_update_pool(&mut self.pool, current_slot)?;

        msg!("POOL UPDATE: caller={}", self.caller.key());

        emit!(PoolSynced {
            previous_acc_reward_per_share: report.previous_acc_reward_per_share,
            acc_reward_per_share: report.acc_reward_per_share,
            last_reward_slot: report.last_reward_slot,
            total_staked: report.total_staked,
        });

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub previous_acc_reward_per_share: u128,
    pub acc_reward_per_share: u128,
    pub last_reward_slot: u64,
    pub total_staked: u64,
}

/// Sync the pool to `current_slot` and describe what changed
pub fn process_update_pool(pool: &mut PoolInfo, current_slot: u64) -> Result<SyncReport> {
    if !pool.is_initialized {
        return Err(StakingError::AccountNotFound.into());
    }

    let previous_acc_reward_per_share = pool.acc_reward_per_share;
    let previous_slot = pool.last_reward_slot;
    pool.sync(current_slot)?;

    msg!(
        "Reward calculations: previous={}, new={}, slots={}..{}, total_staked={}",
        previous_acc_reward_per_share,
        pool.acc_reward_per_share,
        previous_slot,
        pool.last_reward_slot,
        pool.total_staked
    );

    Ok(SyncReport {
        previous_acc_reward_per_share,
        acc_reward_per_share: pool.acc_reward_per_share,
        last_reward_slot: pool.last_reward_slot,
        total_staked: pool.total_staked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::{constants::SCALE, test_utils::*};

    #[test]
    fn test_update_reports_delta() {
        let mut pool = active_pool(100, 1000, 5);
        pool.total_staked = 50;

        let report = process_update_pool(&mut pool, 120).unwrap();

        assert_eq!(report.previous_acc_reward_per_share, 0);
        assert_eq!(report.acc_reward_per_share, 20 * 5 * SCALE / 50);
        assert_eq!(report.last_reward_slot, 120);
        assert_eq!(report.total_staked, 50);
    }

    #[test]
    fn test_update_twice_same_slot() {
        let mut pool = active_pool(100, 1000, 5);
        pool.total_staked = 50;
        process_update_pool(&mut pool, 120).unwrap();

        let report = process_update_pool(&mut pool, 120).unwrap();

        assert_eq!(
            report.previous_acc_reward_per_share,
            report.acc_reward_per_share
        );
    }

    #[test]
    fn test_update_uninitialized_pool() {
        let mut pool = PoolInfo::default();

        let err = process_update_pool(&mut pool, 10).unwrap_err();

        assert_eq!(err, Error::from(StakingError::AccountNotFound));
    }
}
