use anchor_lang::prelude::*;

/// Custom error types for the slot staking program
/// Every failure aborts the whole instruction; nothing is partially applied
#[error_code]
pub enum StakingError {
    // Pool Management Errors
    #[msg("Start slot must be strictly before end slot")]
    InvalidRange,

    #[msg("Pool has already been initialized")]
    AlreadyInitialized,

    #[msg("Reward rate per slot must be non-zero")]
    InvalidRewardRate,

    // Staking Errors
    #[msg("Stake amount must be greater than zero")]
    InvalidAmount,

    // Math Errors
    #[msg("Arithmetic overflow in reward accounting")]
    ArithmeticOverflow,

    // Account Errors
    #[msg("Signer does not match the expected owner")]
    Unauthorized,

    #[msg("Account has not been created")]
    AccountNotFound,

    #[msg("Invalid token mint provided")]
    InvalidTokenMint,

    #[msg("Invalid token account provided")]
    InvalidTokenAccount,

    // Transfer Errors
    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Reward vault cannot cover the pending reward")]
    InsufficientRewardLiquidity,
}

impl StakingError {
    /// Get error code as u32 for logging
    pub fn error_code(&self) -> u32 {
        match self {
            // Pool errors: 1000-1099
            StakingError::InvalidRange => 1001,
            StakingError::AlreadyInitialized => 1002,
            StakingError::InvalidRewardRate => 1003,

            // Staking errors: 1100-1199
            StakingError::InvalidAmount => 1101,

            // Math errors: 1400-1499
            StakingError::ArithmeticOverflow => 1401,

            // Account errors: 1700-1799
            StakingError::Unauthorized => 1701,
            StakingError::AccountNotFound => 1702,
            StakingError::InvalidTokenMint => 1703,
            StakingError::InvalidTokenAccount => 1704,

            // Transfer errors: 1500-1599
            StakingError::TransferFailed => 1501,
            StakingError::InsufficientRewardLiquidity => 1502,
        }
    }

    /// Get human-readable error category
    pub fn category(&self) -> &'static str {
        match self.error_code() {
            1000..=1099 => "Pool Management",
            1100..=1199 => "Staking Operations",
            1400..=1499 => "Mathematical Operations",
            1500..=1599 => "Token Transfers",
            1700..=1799 => "Account Validation",
            _ => "Unknown",
        }
    }
}

/// Helper macro for logging errors with context
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {
        msg!(
            "Error {}: {} in context: {}",
            $error.error_code(),
            $error.category(),
            $context
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn test_error_codes() {
        assert_eq!(StakingError::InvalidRange.error_code(), 1001);
        assert_eq!(StakingError::InvalidAmount.error_code(), 1101);
        assert_eq!(StakingError::ArithmeticOverflow.error_code(), 1401);
        assert_eq!(StakingError::InsufficientRewardLiquidity.error_code(), 1502);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(StakingError::AlreadyInitialized.category(), "Pool Management");
        assert_eq!(StakingError::InvalidAmount.category(), "Staking Operations");
        assert_eq!(StakingError::ArithmeticOverflow.category(), "Mathematical Operations");
        assert_eq!(StakingError::TransferFailed.category(), "Token Transfers");
        assert_eq!(StakingError::Unauthorized.category(), "Account Validation");
    }

    #[test]
    fn test_error_converts_to_anchor_error() {
        let err = Error::from(StakingError::InvalidAmount);
        assert_eq!(err, Error::from(StakingError::InvalidAmount));
        assert_ne!(err, Error::from(StakingError::InvalidRange));
    }
}
