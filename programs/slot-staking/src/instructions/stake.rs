use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    error::StakingError,
    events::Staked,
    gateway::{SplTokenGateway, TransferGateway},
    instructions::with_rollback,
    math,
    state::{PoolInfo, Staker, UserInfo},
};

/// Stake tokens into the pool
/// Creates the user record on first use and settles any pending reward
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user who is staking tokens
    /// Must sign the transaction and pays for the user record on first use
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Account<'info, PoolInfo>,

    /// PDA: ["user", pool.key(), user.key()]
    #[account(
        init_if_needed,
        payer = user,
        space = DISCRIMINATOR_SIZE + UserInfo::INIT_SPACE,
        seeds = [USER_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_info: Account<'info, UserInfo>,

    /// Source of the staked tokens
    #[account(
        mut,
        constraint = user_staking_wallet.mint == pool.staking_mint @ StakingError::InvalidTokenMint,
        constraint = user_staking_wallet.owner == user.key() @ StakingError::Unauthorized,
    )]
    pub user_staking_wallet: Account<'info, TokenAccount>,

    /// Receives any reward settled by this stake
    #[account(
        mut,
        constraint = user_reward_wallet.mint == pool.reward_mint @ StakingError::InvalidTokenMint,
        constraint = user_reward_wallet.owner == user.key() @ StakingError::Unauthorized,
    )]
    pub user_reward_wallet: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = pool.stake_vault @ StakingError::InvalidTokenAccount,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = pool.reward_vault @ StakingError::InvalidTokenAccount,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA with no data, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        address = pool.staking_mint @ StakingError::InvalidTokenMint,
    )]
    pub staking_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Stake<'info> {
    /// Execute the staking operation
    pub fn stake(&mut self, amount: u64, bumps: &StakeBumps) -> Result<()> {
        let current_slot = Clock::get()?.slot;
        let staker = Staker {
            owner: self.user.key(),
            pool: self.pool.key(),
            user_bump: bumps.user_info,
        };

        let mut gateway = self.gateway();
        let receipt = process_stake(
            &mut self.pool,
            &mut self.user_info,
            &staker,
            amount,
            current_slot,
            &mut gateway,
        )?;

        emit!(Staked {
            owner: staker.owner,
            amount,
            settled_reward: receipt.settled_reward,
            user_amount: receipt.user_amount,
            total_staked: receipt.total_staked,
            slot: current_slot,
        });

        Ok(())
    }

    fn gateway(&self) -> SplTokenGateway<'info> {
        SplTokenGateway {
            token_program: self.token_program.to_account_info(),
            owner: self.user.to_account_info(),
            owner_reward_wallet: self.user_reward_wallet.to_account_info(),
            reward_vault: self.reward_vault.to_account_info(),
            reward_vault_balance: self.reward_vault.amount,
            vault_authority: self.vault_authority.to_account_info(),
            vault_authority_bump: self.pool.vault_authority_bump,
            pool: self.pool.key(),
            stake_accounts: None,
        }
        .with_stake_accounts(
            self.user_staking_wallet.to_account_info(),
            self.stake_vault.to_account_info(),
        )
    }
}

/// Result of a committed stake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeReceipt {
    /// Reward earned on the previous balance and paid out by this stake
    pub settled_reward: u64,
    pub user_amount: u64,
    pub total_staked: u64,
}

/// Add `amount` to the staker's position.
///
/// The pool is synced first, then reward earned on the existing balance is
/// settled so the new amount cannot dilute or inherit it. All state is
/// written before the gateway is asked to move tokens, and any failure
/// leaves `pool` and `user` exactly as they were. Reward liquidity is
/// checked up front and the deposit is pulled before the payout, so a
/// failed deposit never leaves a reward paid out.
pub fn process_stake<G: TransferGateway>(
    pool: &mut PoolInfo,
    user: &mut UserInfo,
    staker: &Staker,
    amount: u64,
    current_slot: u64,
    gateway: &mut G,
) -> Result<StakeReceipt> {
    if amount == 0 {
        return Err(StakingError::InvalidAmount.into());
    }
    if !pool.is_initialized {
        return Err(StakingError::AccountNotFound.into());
    }
    if user.is_initialized() {
        user.authorize(staker)?;
    }

    let receipt = with_rollback(pool, user, |pool, user| {
        pool.sync(current_slot)?;

        if !user.is_initialized() {
            user.open(staker);
        }

        let pending = user.pending_reward(pool.acc_reward_per_share)?;

        user.amount = math::checked_add_u64(user.amount, amount)?;
        pool.total_staked = math::checked_add_u64(pool.total_staked, amount)?;
        user.checkpoint(pool.acc_reward_per_share)?;
        user.deposit_slot = current_slot;
        user.total_claimed = user.total_claimed.saturating_add(pending);

        if gateway.reward_liquidity() < pending {
            msg!(
                "Reward vault cannot settle {} pending before stake",
                pending
            );
            return Err(StakingError::InsufficientRewardLiquidity.into());
        }

        gateway.deposit_stake(amount)?;
        if pending > 0 {
            gateway.pay_reward(pending)?;
        }

        Ok(StakeReceipt {
            settled_reward: pending,
            user_amount: user.amount,
            total_staked: pool.total_staked,
        })
    })?;

    msg!(
        "STAKE EVENT: user={}, amount={}, settled_reward={}, user_amount={}, total_pool_staked={}, slot={}",
        staker.owner,
        amount,
        receipt.settled_reward,
        receipt.user_amount,
        receipt.total_staked,
        current_slot
    );

    Ok(receipt)
}
