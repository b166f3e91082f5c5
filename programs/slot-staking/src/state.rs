use anchor_lang::prelude::*;

use crate::{
    constants::{is_valid_reward_rate, is_valid_slot_range},
    error::StakingError,
    math,
};

/// The staking pool shared by every participant
/// Holds the global reward accumulator for the emission window
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    /// Authority that created the pool and may fund its reward vault
    pub admin: Pubkey,

    /// The token that users stake
    pub staking_mint: Pubkey,

    /// The token paid out as rewards (may equal staking_mint)
    pub reward_mint: Pubkey,

    /// Token account holding all staked principal
    pub stake_vault: Pubkey,

    /// Token account holding reward funds
    pub reward_vault: Pubkey,

    /// First slot of reward emission (inclusive)
    pub start_slot: u64,

    /// Slot at which emission stops (exclusive)
    pub end_slot: u64,

    /// Sum of every user's staked amount
    pub total_staked: u64,

    /// Cumulative reward per staked unit, scaled by SCALE
    pub acc_reward_per_share: u128,

    /// Slot up to which acc_reward_per_share has been brought current
    pub last_reward_slot: u64,

    /// Reward units emitted per slot across the whole pool
    pub reward_rate_per_slot: u64,

    /// Set once by initialize; the pool PDA is a singleton
    pub is_initialized: bool,

    /// Bump seed for the pool PDA
    pub bump: u8,

    /// Bump seed for the vault authority PDA
    pub vault_authority_bump: u8,
}

/// Per-owner stake record - one per owner per pool
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct UserInfo {
    /// The staker who owns this record
    pub owner: Pubkey,

    /// Which pool this record belongs to
    pub pool: Pubkey,

    /// Currently staked balance
    pub amount: u64,

    /// amount * acc_reward_per_share / SCALE at the last settlement
    pub debt_reward: u128,

    /// Slot of the most recent stake (informational)
    pub deposit_slot: u64,

    /// Lifetime reward paid to this owner (informational)
    pub total_claimed: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

/// Parameters fixed when the pool is created
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub admin: Pubkey,
    pub staking_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub stake_vault: Pubkey,
    pub reward_vault: Pubkey,
    pub start_slot: u64,
    pub end_slot: u64,
    pub reward_rate_per_slot: u64,
    pub bump: u8,
    pub vault_authority_bump: u8,
}

/// A staker whose signature and PDA seeds were already checked by the accounts context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staker {
    pub owner: Pubkey,
    pub pool: Pubkey,
    pub user_bump: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStatus {
    Uninitialized,
    /// Rewards are still being emitted
    Active,
    /// current_slot >= end_slot; accrued rewards remain claimable
    Expired,
}

impl PoolInfo {
    /// Write the immutable pool parameters and zero the accounting
    /// True while the record is still zeroed and may be initialized
    pub fn accepts_initialize(&self) -> bool {
        !self.is_initialized
    }

    pub fn initialize(&mut self, config: PoolConfig) -> Result<()> {
        if !self.accepts_initialize() {
            return Err(StakingError::AlreadyInitialized.into());
        }

        if !is_valid_slot_range(config.start_slot, config.end_slot) {
            msg!(
                "Invalid slot range: start={} end={}",
                config.start_slot,
                config.end_slot
            );
            return Err(StakingError::InvalidRange.into());
        }

        if !is_valid_reward_rate(config.reward_rate_per_slot) {
            return Err(StakingError::InvalidRewardRate.into());
        }

        self.admin = config.admin;
        self.staking_mint = config.staking_mint;
        self.reward_mint = config.reward_mint;
        self.stake_vault = config.stake_vault;
        self.reward_vault = config.reward_vault;
        self.start_slot = config.start_slot;
        self.end_slot = config.end_slot;
        self.reward_rate_per_slot = config.reward_rate_per_slot;

        self.total_staked = 0;
        self.acc_reward_per_share = 0;
        self.last_reward_slot = config.start_slot;

        self.is_initialized = true;
        self.bump = config.bump;
        self.vault_authority_bump = config.vault_authority_bump;

        Ok(())
    }

    /// Compute the accumulator and checkpoint slot as of `current_slot`
    /// without writing them back
    pub fn accrue_to(&self, current_slot: u64) -> Result<(u128, u64)> {
        let effective_now = current_slot.min(self.end_slot);
        let effective_last = self.last_reward_slot.max(self.start_slot);
        let elapsed = effective_now.saturating_sub(effective_last);

        // Slots never move backwards, even for a stale current_slot
        if elapsed == 0 {
            return Ok((self.acc_reward_per_share, effective_last));
        }

        // Nothing staked: the emission for this gap is forfeited
        if self.total_staked == 0 {
            return Ok((self.acc_reward_per_share, effective_now));
        }

        let reward = math::checked_mul(elapsed as u128, self.reward_rate_per_slot as u128)?;
        let delta = math::reward_per_share(reward, self.total_staked)?;
        let acc = math::checked_add(self.acc_reward_per_share, delta)?;

        #[cfg(feature = "verbose")]
        msg!(
            "accrue: elapsed={} reward={} delta={} acc={}",
            elapsed,
            reward,
            delta,
            acc
        );

        Ok((acc, effective_now))
    }

    /// Bring acc_reward_per_share and last_reward_slot current
    /// Must run before any balance-affecting read or write
    pub fn sync(&mut self, current_slot: u64) -> Result<()> {
        let (acc, last_reward_slot) = self.accrue_to(current_slot)?;
        self.acc_reward_per_share = acc;
        self.last_reward_slot = last_reward_slot;
        Ok(())
    }

    /// Accumulator value a sync at `current_slot` would produce
    pub fn preview_acc_reward_per_share(&self, current_slot: u64) -> Result<u128> {
        self.accrue_to(current_slot).map(|(acc, _)| acc)
    }

    pub fn status(&self, current_slot: u64) -> PoolStatus {
        if !self.is_initialized {
            PoolStatus::Uninitialized
        } else if current_slot >= self.end_slot {
            PoolStatus::Expired
        } else {
            PoolStatus::Active
        }
    }
}

impl UserInfo {
    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Set up a fresh record on the owner's first stake
    pub fn open(&mut self, staker: &Staker) {
        self.owner = staker.owner;
        self.pool = staker.pool;
        self.amount = 0;
        self.debt_reward = 0;
        self.deposit_slot = 0;
        self.total_claimed = 0;
        self.bump = staker.user_bump;
    }

    /// Fail unless this record belongs to `staker` in the same pool
    pub fn authorize(&self, staker: &Staker) -> Result<()> {
        if self.owner != staker.owner || self.pool != staker.pool {
            msg!(
                "User record owner mismatch: record={} signer={}",
                self.owner,
                staker.owner
            );
            return Err(StakingError::Unauthorized.into());
        }
        Ok(())
    }

    /// Reward earned since the last settlement at accumulator value `acc`
    pub fn pending_reward(&self, acc_reward_per_share: u128) -> Result<u64> {
        let accrued = math::accrued_for(self.amount, acc_reward_per_share)?;
        math::to_u64(math::checked_sub(accrued, self.debt_reward)?)
    }

    /// Mark everything up to `acc` as settled
    pub fn checkpoint(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.debt_reward = math::accrued_for(self.amount, acc_reward_per_share)?;
        Ok(())
    }
}
