use anchor_lang::prelude::*;

// Import our modules
pub mod constants;
pub mod error;
pub mod events;
pub mod gateway;
pub mod instructions;
pub mod math;
pub mod state;

#[cfg(test)]
mod test_utils;

// Import instruction handlers
pub use instructions::*;

declare_id!("8xHxL2EX8StDf1VQbNQRt4D7UvNPtBfn8nnPND7ZvVzd");

#[program]
pub mod slot_staking {
    use super::*;

    /// Create the pool and its stake/reward vaults
    /// Rewards are emitted over slots [start_slot, end_slot)
    pub fn initialize(
        ctx: Context<Initialize>,
        start_slot: u64,
        end_slot: u64,
        reward_rate_per_slot: u64,
    ) -> Result<()> {
        ctx.accounts
            .initialize(start_slot, end_slot, reward_rate_per_slot, &ctx.bumps)
    }

    /// Stake tokens into the pool
    /// Settles any reward earned on the existing stake before adding to it
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        ctx.accounts.stake(amount, &ctx.bumps)
    }

    /// Claim accrued rewards without unstaking
    pub fn claim_reward(ctx: Context<ClaimReward>) -> Result<()> {
        ctx.accounts.claim_reward()
    }

    /// Bring the reward accumulator current; anyone may call
    pub fn update_pool(ctx: Context<UpdatePool>) -> Result<()> {
        ctx.accounts.update_pool()
    }

    /// Top up the reward vault from the admin's wallet
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        ctx.accounts.fund_rewards(amount)
    }
}
