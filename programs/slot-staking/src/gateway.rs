use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::{constants::VAULT_AUTHORITY_SEED, error::StakingError};

/// Moves tokens between the staker and the pool vaults
/// Handlers decide the amount and direction; implementations only execute
pub trait TransferGateway {
    /// Pull `amount` staking tokens from the staker's wallet into the stake vault
    fn deposit_stake(&mut self, amount: u64) -> Result<()>;

    /// Pay `amount` reward tokens from the reward vault to the staker
    fn pay_reward(&mut self, amount: u64) -> Result<()>;

    /// Reward tokens currently available to `pay_reward`
    fn reward_liquidity(&self) -> u64;
}

/// SPL Token CPI implementation used on-chain
pub struct SplTokenGateway<'info> {
    pub token_program: AccountInfo<'info>,
    pub owner: AccountInfo<'info>,
    pub owner_reward_wallet: AccountInfo<'info>,
    pub reward_vault: AccountInfo<'info>,
    /// Reward vault balance as loaded at the start of the instruction
    pub reward_vault_balance: u64,
    pub vault_authority: AccountInfo<'info>,
    pub vault_authority_bump: u8,
    pub pool: Pubkey,
    /// Only present for instructions that move principal
    pub stake_accounts: Option<StakeAccounts<'info>>,
}

pub struct StakeAccounts<'info> {
    pub owner_staking_wallet: AccountInfo<'info>,
    pub stake_vault: AccountInfo<'info>,
}

impl<'info> SplTokenGateway<'info> {
    pub fn with_stake_accounts(
        mut self,
        owner_staking_wallet: AccountInfo<'info>,
        stake_vault: AccountInfo<'info>,
    ) -> Self {
        self.stake_accounts = Some(StakeAccounts {
            owner_staking_wallet,
            stake_vault,
        });
        self
    }
}

impl<'info> TransferGateway for SplTokenGateway<'info> {
    fn deposit_stake(&mut self, amount: u64) -> Result<()> {
        let accounts = self
            .stake_accounts
            .as_ref()
            .ok_or(StakingError::InvalidTokenAccount)?;

        let transfer_ctx = CpiContext::new(
            self.token_program.clone(),
            Transfer {
                from: accounts.owner_staking_wallet.clone(),
                to: accounts.stake_vault.clone(),
                authority: self.owner.clone(),
            },
        );

        token::transfer(transfer_ctx, amount).map_err(|err| {
            msg!("Stake transfer of {} failed: {}", amount, err);
            crate::log_error!(StakingError::TransferFailed, "deposit_stake");
            error!(StakingError::TransferFailed)
        })?;

        msg!("Transferred {} tokens to stake vault", amount);

        Ok(())
    }

    fn pay_reward(&mut self, amount: u64) -> Result<()> {
        if self.reward_vault_balance < amount {
            msg!(
                "Insufficient reward vault balance: has {}, needs {}",
                self.reward_vault_balance,
                amount
            );
            crate::log_error!(StakingError::InsufficientRewardLiquidity, "pay_reward");
            return Err(StakingError::InsufficientRewardLiquidity.into());
        }

        let bump = [self.vault_authority_bump];
        let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, self.pool.as_ref(), &bump];
        let signer_seeds = &[seeds];

        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from: self.reward_vault.clone(),
                to: self.owner_reward_wallet.clone(),
                authority: self.vault_authority.clone(),
            },
            signer_seeds,
        );

        token::transfer(transfer_ctx, amount).map_err(|err| {
            msg!("Reward transfer of {} failed: {}", amount, err);
            crate::log_error!(StakingError::TransferFailed, "pay_reward");
            error!(StakingError::TransferFailed)
        })?;

        self.reward_vault_balance = self.reward_vault_balance.saturating_sub(amount);

        msg!("Transferred {} reward tokens to user", amount);

        Ok(())
    }

    fn reward_liquidity(&self) -> u64 {
        self.reward_vault_balance
    }
}
