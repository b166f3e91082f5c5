use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::POOL_SEED, error::StakingError, events::RewardsFunded, state::PoolInfo,
};

/// Move reward tokens from the admin into the reward vault
#[derive(Accounts)]
pub struct FundRewards<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump,
        has_one = admin @ StakingError::Unauthorized,
    )]
    pub pool: Account<'info, PoolInfo>,

    #[account(
        mut,
        constraint = admin_reward_wallet.mint == pool.reward_mint @ StakingError::InvalidTokenMint,
        constraint = admin_reward_wallet.owner == admin.key() @ StakingError::Unauthorized,
    )]
    pub admin_reward_wallet: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = pool.reward_vault @ StakingError::InvalidTokenAccount,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> FundRewards<'info> {
    pub fn fund_rewards(&mut self, amount: u64) -> Result<()> {
        validate_funding(&self.pool, &self.admin.key(), amount)?;

        let transfer_ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.admin_reward_wallet.to_account_info(),
                to: self.reward_vault.to_account_info(),
                authority: self.admin.to_account_info(),
            },
        );

        token::transfer(transfer_ctx, amount).map_err(|err| {
            msg!("Reward funding transfer of {} failed: {}", amount, err);
            error!(StakingError::TransferFailed)
        })?;

        msg!(
            "FUND EVENT: admin={}, amount={}, vault_balance_before={}",
            self.admin.key(),
            amount,
            self.reward_vault.amount
        );

        emit!(RewardsFunded {
            admin: self.admin.key(),
            amount,
        });

        Ok(())
    }
}

/// Only the pool admin may fund, and only with a non-zero amount
pub fn validate_funding(pool: &PoolInfo, admin: &Pubkey, amount: u64) -> Result<()> {
    if !pool.is_initialized {
        return Err(StakingError::AccountNotFound.into());
    }
    if pool.admin != *admin {
        return Err(StakingError::Unauthorized.into());
    }
    if amount == 0 {
        return Err(StakingError::InvalidAmount.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::test_utils::*;

    #[test]
    fn test_validate_funding() {
        let pool = active_pool(100, 1000, 1);

        assert!(validate_funding(&pool, &pool.admin, 1_000).is_ok());
        assert_eq!(
            validate_funding(&pool, &key(1), 1_000).unwrap_err(),
            Error::from(StakingError::Unauthorized)
        );
        assert_eq!(
            validate_funding(&pool, &pool.admin, 0).unwrap_err(),
            Error::from(StakingError::InvalidAmount)
        );
        assert_eq!(
            validate_funding(&PoolInfo::default(), &key(1), 1).unwrap_err(),
            Error::from(StakingError::AccountNotFound)
        );
    }
}
