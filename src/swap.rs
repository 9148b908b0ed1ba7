use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId, CryptoHash};

/// Length in bytes of a swap secret.
pub const SECRET_LENGTH: usize = 32;

// Unique identifier for a swap: the double SHA-256 of its secret.
pub type HashedSecret = CryptoHash;

// All the immutable parameters of a single swap instance.
#[near(serializers = [json, borsh])]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swap {
    pub initiator: AccountId,   // Funding account, refunded on timeout
    pub participant: AccountId, // Receives the tokens once the secret is revealed
    pub refund_time: u64,       // Unix seconds
    pub token_address: AccountId,
    pub total_amount: U128,
}

/// Hashes a secret the way swap keys are committed to: `sha256(sha256(secret))`.
pub fn hash_secret(secret: &[u8]) -> HashedSecret {
    env::sha256_array(&env::sha256_array(secret))
}
