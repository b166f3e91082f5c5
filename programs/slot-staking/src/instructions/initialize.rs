use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    error::StakingError,
    events::PoolInitialized,
    state::{PoolConfig, PoolInfo},
};

/// Create the pool and its custodial vaults
/// Every account is opened with init_if_needed; the pool constraint rejects a
/// second call with AlreadyInitialized before any vault mint is checked
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin who pays for the accounts and becomes the pool authority
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The pool record
    /// PDA: ["pool"]
    #[account(
        init_if_needed,
        payer = admin,
        space = DISCRIMINATOR_SIZE + PoolInfo::INIT_SPACE,
        seeds = [POOL_SEED],
        bump,
        constraint = pool.accepts_initialize() @ StakingError::AlreadyInitialized
    )]
    pub pool: Account<'info, PoolInfo>,

    /// The token that users will stake
    pub staking_mint: Account<'info, Mint>,

    /// The token paid out as rewards
    /// Can be the same as staking_mint for single-token staking
    pub reward_mint: Account<'info, Mint>,

    /// Signs for both vaults
    /// CHECK: PDA with no data, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Holds all staked principal
    /// PDA: ["stake_vault", pool.key()]
    #[account(
        init_if_needed,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = vault_authority,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Holds reward funds; topped up through fund_rewards
    /// PDA: ["reward_vault", pool.key()]
    #[account(
        init_if_needed,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = vault_authority,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        start_slot: u64,
        end_slot: u64,
        reward_rate_per_slot: u64,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        let config = PoolConfig {
            admin: self.admin.key(),
            staking_mint: self.staking_mint.key(),
            reward_mint: self.reward_mint.key(),
            stake_vault: self.stake_vault.key(),
            reward_vault: self.reward_vault.key(),
            start_slot,
            end_slot,
            reward_rate_per_slot,
            bump: bumps.pool,
            vault_authority_bump: bumps.vault_authority,
        };

        process_initialize(&mut self.pool, config)?;

        if self.staking_mint.key() == self.reward_mint.key() {
            msg!("Single-token staking pool detected (stake and reward tokens are the same)");
        }

        emit!(PoolInitialized {
            admin: config.admin,
            staking_mint: config.staking_mint,
            reward_mint: config.reward_mint,
            start_slot,
            end_slot,
            reward_rate_per_slot,
        });

        Ok(())
    }
}

/// Create the pool record; no tokens move
pub fn process_initialize(pool: &mut PoolInfo, config: PoolConfig) -> Result<()> {
    pool.initialize(config)?;

    msg!(
        "Staking pool initialized: Admin={}, StakingMint={}, RewardMint={}",
        pool.admin,
        pool.staking_mint,
        pool.reward_mint
    );
    msg!(
        "Pool parameters: StartSlot={}, EndSlot={}, RewardRatePerSlot={}",
        pool.start_slot,
        pool.end_slot,
        pool.reward_rate_per_slot
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::{state::PoolStatus, test_utils::*};

    #[test]
    fn test_initialize_creates_active_pool() {
        let mut pool = PoolInfo::default();

        process_initialize(&mut pool, pool_config(100, 1000, DEFAULT_REWARD_RATE_PER_SLOT)).unwrap();

        assert_eq!(pool.admin, key(200));
        assert_eq!(pool.start_slot, 100);
        assert_eq!(pool.end_slot, 1000);
        assert_eq!(pool.last_reward_slot, 100);
        assert_eq!(pool.total_staked, 0);
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.status(100), PoolStatus::Active);
    }

    #[test]
    fn test_initialize_invalid_range() {
        let mut pool = PoolInfo::default();

        let err = process_initialize(&mut pool, pool_config(1000, 100, 1)).unwrap_err();

        assert_eq!(err, Error::from(StakingError::InvalidRange));
        assert!(!pool.is_initialized);
    }

    #[test]
    fn test_initialize_already_initialized() {
        let mut pool = PoolInfo::default();
        process_initialize(&mut pool, pool_config(100, 1000, 1)).unwrap();

        let err = process_initialize(&mut pool, pool_config(100, 1000, 1)).unwrap_err();

        assert_eq!(err, Error::from(StakingError::AlreadyInitialized));
    }

    #[test]
    fn test_reinitialize_with_other_mints_rejected_first() {
        let mut pool = PoolInfo::default();
        assert!(pool.accepts_initialize());
        process_initialize(&mut pool, pool_config(100, 1000, 1)).unwrap();
        let before = pool.clone();

        // The account constraint gate runs before the vault mint checks
        assert!(!pool.accepts_initialize());

        let mut other = pool_config(100, 1000, 1);
        other.staking_mint = key(90);
        other.reward_mint = key(91);
        let err = process_initialize(&mut pool, other).unwrap_err();

        assert_eq!(err, Error::from(StakingError::AlreadyInitialized));
        assert_eq!(pool, before);
    }
}
