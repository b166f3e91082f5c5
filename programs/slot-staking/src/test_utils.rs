//! Shared fixtures for the unit tests

use anchor_lang::prelude::*;

use crate::{
    error::StakingError,
    gateway::TransferGateway,
    state::{PoolConfig, PoolInfo, Staker, UserInfo},
};

pub const POOL_KEY: Pubkey = Pubkey::new_from_array([7; 32]);

pub fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

pub fn pool_config(start_slot: u64, end_slot: u64, reward_rate_per_slot: u64) -> PoolConfig {
    PoolConfig {
        admin: key(200),
        staking_mint: key(201),
        reward_mint: key(202),
        stake_vault: key(203),
        reward_vault: key(204),
        start_slot,
        end_slot,
        reward_rate_per_slot,
        bump: 255,
        vault_authority_bump: 254,
    }
}

pub fn active_pool(start_slot: u64, end_slot: u64, reward_rate_per_slot: u64) -> PoolInfo {
    let mut pool = PoolInfo::default();
    pool.initialize(pool_config(start_slot, end_slot, reward_rate_per_slot))
        .unwrap();
    pool
}

pub fn staker(seed: u8) -> Staker {
    Staker {
        owner: key(seed),
        pool: POOL_KEY,
        user_bump: seed,
    }
}

pub fn user_sum(users: &[UserInfo]) -> u64 {
    users.iter().map(|user| user.amount).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockTransfer {
    Deposit(u64),
    Reward(u64),
}

/// In-memory gateway that records every transfer it executes
#[derive(Debug)]
pub struct MockGateway {
    pub reward_liquidity: u64,
    pub fail_deposits: bool,
    pub transfers: Vec<MockTransfer>,
}

impl MockGateway {
    pub fn funded(reward_liquidity: u64) -> Self {
        Self {
            reward_liquidity,
            fail_deposits: false,
            transfers: Vec::new(),
        }
    }

    pub fn rewards_paid(&self) -> u64 {
        self.transfers
            .iter()
            .map(|transfer| match transfer {
                MockTransfer::Reward(amount) => *amount,
                MockTransfer::Deposit(_) => 0,
            })
            .sum()
    }
}

impl TransferGateway for MockGateway {
    fn deposit_stake(&mut self, amount: u64) -> Result<()> {
        if self.fail_deposits {
            return Err(StakingError::TransferFailed.into());
        }
        self.transfers.push(MockTransfer::Deposit(amount));
        Ok(())
    }

    fn pay_reward(&mut self, amount: u64) -> Result<()> {
        if self.reward_liquidity < amount {
            return Err(StakingError::InsufficientRewardLiquidity.into());
        }
        self.reward_liquidity -= amount;
        self.transfers.push(MockTransfer::Reward(amount));
        Ok(())
    }

    fn reward_liquidity(&self) -> u64 {
        self.reward_liquidity
    }
}
