use near_sdk::env;

use crate::error::SwapError;

pub const NANOS_IN_SEC: u64 = 1_000_000_000;

/// Current block time in whole unix seconds.
pub fn now_secs() -> u64 {
    env::block_timestamp() / NANOS_IN_SEC
}

/// A new swap must expire strictly after the block it is created in.
pub fn assert_refund_time_in_future(refund_time: u64, now: u64) -> Result<(), SwapError> {
    if refund_time <= now {
        return Err(SwapError::InvalidDeadline);
    }
    Ok(())
}

/// Redemption is open while `now < refund_time`.
pub fn assert_redemption_window(refund_time: u64, now: u64) -> Result<(), SwapError> {
    if now >= refund_time {
        return Err(SwapError::RedemptionWindowClosed);
    }
    Ok(())
}

/// Refund is open from `refund_time` onwards, inclusive.
pub fn assert_refund_window(refund_time: u64, now: u64) -> Result<(), SwapError> {
    if now < refund_time {
        return Err(SwapError::RefundTooEarly);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::testing_env;

    #[test]
    fn now_secs_truncates_block_timestamp() {
        testing_env!(VMContextBuilder::new()
            .block_timestamp(21_600 * NANOS_IN_SEC + 999_999_999)
            .build());
        assert_eq!(now_secs(), 21_600);
    }

    #[test]
    fn windows_split_exactly_at_refund_time() {
        let refund_time = 60;

        assert!(assert_redemption_window(refund_time, 59).is_ok());
        assert_eq!(
            assert_redemption_window(refund_time, 60),
            Err(SwapError::RedemptionWindowClosed)
        );

        assert_eq!(assert_refund_window(refund_time, 59), Err(SwapError::RefundTooEarly));
        assert!(assert_refund_window(refund_time, 60).is_ok());
    }

    #[test]
    fn refund_time_equal_to_now_is_rejected() {
        assert!(assert_refund_time_in_future(61, 60).is_ok());
        assert_eq!(assert_refund_time_in_future(60, 60), Err(SwapError::InvalidDeadline));
        assert_eq!(assert_refund_time_in_future(0, 60), Err(SwapError::InvalidDeadline));
    }
}
