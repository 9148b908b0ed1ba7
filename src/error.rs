use near_sdk::FunctionError;
use thiserror::Error;

/// Every way a swap operation can be rejected.
///
/// Returning one of these from a `#[handle_result]` method aborts the receipt,
/// so the host discards any storage writes and no promise is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error, FunctionError)]
pub enum SwapError {
    #[error("A swap with this hashed secret already exists")]
    DuplicateSwap,
    #[error("Participant must differ from the initiator")]
    InvalidParticipant,
    #[error("Refund time must be in the future")]
    InvalidDeadline,
    #[error("Total amount must be positive")]
    InvalidAmount,
    #[error("Attached deposit must be zero")]
    UnexpectedValue,
    #[error("Secret must be {expected} bytes, got {actual}")]
    InvalidSecret { expected: usize, actual: usize },
    #[error("Swap not found")]
    SwapNotFound,
    #[error("Token transfer for this swap is still in flight")]
    SettlementPending,
    #[error("Redemption window is closed")]
    RedemptionWindowClosed,
    #[error("Refund time has not been reached")]
    RefundTooEarly,
    #[error("Attach at least {required} Tgas, got {prepaid} Tgas")]
    InsufficientGas { required: u64, prepaid: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            SwapError::InvalidSecret {
                expected: 32,
                actual: 16
            }
            .to_string(),
            "Secret must be 32 bytes, got 16"
        );
        assert_eq!(SwapError::RefundTooEarly.to_string(), "Refund time has not been reached");
    }
}
