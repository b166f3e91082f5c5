use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    error::StakingError,
    events::RewardClaimed,
    gateway::{SplTokenGateway, TransferGateway},
    instructions::with_rollback,
    state::{PoolInfo, Staker, UserInfo},
};

/// Claim accrued rewards without touching principal
#[derive(Accounts)]
pub struct ClaimReward<'info> {
    /// The user claiming rewards
    /// Must be the owner of the user record
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
        mut,
        seeds = [USER_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_info.bump,
        constraint = user_info.owner == user.key() @ StakingError::Unauthorized,
    )]
    pub user_info: Account<'info, UserInfo>,

    /// Receives the reward tokens
    #[account(
        mut,
        constraint = user_reward_wallet.mint == pool.reward_mint @ StakingError::InvalidTokenMint,
        constraint = user_reward_wallet.owner == user.key() @ StakingError::Unauthorized,
    )]
    pub user_reward_wallet: Account<'info, TokenAccount>,

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

    pub token_program: Program<'info, Token>,
}

impl<'info> ClaimReward<'info> {
    /// Execute the reward claiming operation
    pub fn claim_reward(&mut self) -> Result<()> {
        let current_slot = Clock::get()?.slot;
        let staker = Staker {
            owner: self.user.key(),
            pool: self.pool.key(),
            user_bump: self.user_info.bump,
        };

        let mut gateway = self.gateway();
        let claimed = process_claim_reward(
            &mut self.pool,
            &mut self.user_info,
            &staker,
            current_slot,
            &mut gateway,
        )?;

        if claimed > 0 {
            emit!(RewardClaimed {
                owner: staker.owner,
                amount: claimed,
                slot: current_slot,
            });
        }

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
    }
}

/// Pay out everything the staker has earned up to `current_slot`.
///
/// Returns the amount paid. A zero pending reward is a successful no-op.
/// If the payout fails, `debt_reward` is left untouched so the same reward
/// stays claimable.
pub fn process_claim_reward<G: TransferGateway>(
    pool: &mut PoolInfo,
    user: &mut UserInfo,
    staker: &Staker,
    current_slot: u64,
    gateway: &mut G,
) -> Result<u64> {
    if !pool.is_initialized || !user.is_initialized() {
        return Err(StakingError::AccountNotFound.into());
    }
    user.authorize(staker)?;

    let claimed = with_rollback(pool, user, |pool, user| {
        pool.sync(current_slot)?;

        let pending = user.pending_reward(pool.acc_reward_per_share)?;
        if pending == 0 {
            msg!("No rewards to claim");
            return Ok(0);
        }

        user.checkpoint(pool.acc_reward_per_share)?;
        user.total_claimed = user.total_claimed.saturating_add(pending);

        gateway.pay_reward(pending)?;

        Ok(pending)
    })?;

    msg!(
        "CLAIM EVENT: user={}, claimed_amount={}, stake_amount={}, total_claimed={}, slot={}",
        staker.owner,
        claimed,
        user.amount,
        user.total_claimed,
        current_slot
    );

    Ok(claimed)
}
