use anchor_lang::prelude::*;

/// Emitted once when the pool is created
#[event]
pub struct PoolInitialized {
    pub admin: Pubkey,
    pub staking_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub start_slot: u64,
    pub end_slot: u64,
    pub reward_rate_per_slot: u64,
}

/// Emitted when the accumulator is brought current by the crank
#[event]
pub struct PoolSynced {
    pub previous_acc_reward_per_share: u128,
    pub acc_reward_per_share: u128,
    pub last_reward_slot: u64,
    pub total_staked: u64,
}

/// Emitted after a successful stake
#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    pub settled_reward: u64,
    pub user_amount: u64,
    pub total_staked: u64,
    pub slot: u64,
}

/// Emitted when a claim pays out a non-zero reward
#[event]
pub struct RewardClaimed {
    pub owner: Pubkey,
    pub amount: u64,
    pub slot: u64,
}

/// Emitted when the admin tops up the reward vault
#[event]
pub struct RewardsFunded {
    pub admin: Pubkey,
    pub amount: u64,
}
