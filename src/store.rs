use std::collections::BTreeMap;

use near_sdk::near;
use near_sdk::store::{IterableMap, IterableSet};

use crate::swap::{HashedSecret, Swap};

/// Storage seen by the swap ledger: a single map of live swaps keyed by hashed secret.
pub trait SwapStore {
    fn swap(&self, hashed_secret: &HashedSecret) -> Option<&Swap>;

    fn insert(&mut self, hashed_secret: HashedSecret, swap: Swap);

    fn remove(&mut self, hashed_secret: &HashedSecret) -> Option<Swap>;

    /// True while a token transfer for this key has not been confirmed yet.
    fn is_settling(&self, _hashed_secret: &HashedSecret) -> bool {
        false
    }
}

impl SwapStore for BTreeMap<HashedSecret, Swap> {
    fn swap(&self, hashed_secret: &HashedSecret) -> Option<&Swap> {
        self.get(hashed_secret)
    }

    fn insert(&mut self, hashed_secret: HashedSecret, swap: Swap) {
        BTreeMap::insert(self, hashed_secret, swap);
    }

    fn remove(&mut self, hashed_secret: &HashedSecret) -> Option<Swap> {
        BTreeMap::remove(self, hashed_secret)
    }
}

/// On-chain swap storage.
///
/// Besides the live records it tracks the keys whose `ft_transfer_from` or
/// `ft_transfer` is still in flight, so a swap cannot be paid out before it is
/// funded and a key cannot be reused while its payout may still be reverted.
#[near(serializers = [borsh])]
pub struct SwapBook {
    swaps: IterableMap<HashedSecret, Swap>,
    settling: IterableSet<HashedSecret>,
}

impl SwapBook {
    pub fn new() -> Self {
        Self {
            swaps: IterableMap::new(b"s"),
            settling: IterableSet::new(b"p"),
        }
    }

    pub fn begin_settlement(&mut self, hashed_secret: HashedSecret) {
        self.settling.insert(hashed_secret);
    }

    pub fn end_settlement(&mut self, hashed_secret: &HashedSecret) -> bool {
        self.settling.remove(hashed_secret)
    }

    pub fn len(&self) -> u32 {
        self.swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    pub fn page(&self, from_index: u32, limit: u32) -> Vec<(HashedSecret, Swap)> {
        self.swaps
            .iter()
            .skip(from_index as usize)
            .take(limit as usize)
            .map(|(hashed_secret, swap)| (*hashed_secret, swap.clone()))
            .collect()
    }
}

impl Default for SwapBook {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapStore for SwapBook {
    fn swap(&self, hashed_secret: &HashedSecret) -> Option<&Swap> {
        self.swaps.get(hashed_secret)
    }

    fn insert(&mut self, hashed_secret: HashedSecret, swap: Swap) {
        self.swaps.insert(hashed_secret, swap);
    }

    fn remove(&mut self, hashed_secret: &HashedSecret) -> Option<Swap> {
        self.swaps.remove(hashed_secret)
    }

    fn is_settling(&self, hashed_secret: &HashedSecret) -> bool {
        self.settling.contains(hashed_secret)
    }
}
