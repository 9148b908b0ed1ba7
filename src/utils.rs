use near_sdk::json_types::U128;
use near_sdk::{bs58, env, AccountId};

use crate::swap::HashedSecret;

// Helper for consistent logging
pub fn log_swap_event(event: &str, hashed_secret: &HashedSecret, actor: &AccountId, amount: U128) {
    env::log_str(&format!(
        "SWAP_{}: hashed_secret='{}', actor='{}', amount='{}'",
        event,
        bs58::encode(hashed_secret).into_string(),
        actor,
        amount.0
    ));
}
