//! Hash time-locked swap state machine.
//!
//! Per hashed secret a swap is either absent or live:
//!
//! ```text
//! [absent] --initiate--> [live] --redeem (secret, before refund_time)--> [absent]
//!                        [live] --refund (at/after refund_time)-------> [absent]
//! ```
//!
//! Handlers validate everything before touching the store, so an `Err` leaves it
//! untouched. A successful handler returns the one token transfer that must follow.

use near_sdk::json_types::U128;
use near_sdk::{env, AccountId, NearToken};

use crate::error::SwapError;
use crate::store::SwapStore;
use crate::swap::{hash_secret, HashedSecret, Swap, SECRET_LENGTH};
use crate::timelocks::{
    assert_redemption_window, assert_refund_time_in_future, assert_refund_window, now_secs,
};
use crate::token::TokenTransfer;

/// Who is calling, with what, and when.
#[derive(Clone, Debug)]
pub struct CallContext {
    /// Account that signed the transaction.
    pub signer: AccountId,
    /// Account that made this call; differs from `signer` when a proxy relays it.
    pub funder: AccountId,
    pub attached: NearToken,
    /// Unix seconds.
    pub now: u64,
    /// This contract.
    pub contract: AccountId,
}

impl CallContext {
    pub fn from_env() -> Self {
        Self {
            signer: env::signer_account_id(),
            funder: env::predecessor_account_id(),
            attached: env::attached_deposit(),
            now: now_secs(),
            contract: env::current_account_id(),
        }
    }

    fn assert_no_deposit(&self) -> Result<(), SwapError> {
        if self.attached.as_yoctonear() > 0 {
            return Err(SwapError::UnexpectedValue);
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct InitiateArgs {
    pub hashed_secret: HashedSecret,
    pub participant: AccountId,
    pub refund_time: u64,
    pub token_address: AccountId,
    pub total_amount: U128,
}

/// Result of a successful operation: the swap it created or removed and the
/// transfer that has to be executed for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub hashed_secret: HashedSecret,
    pub swap: Swap,
    pub transfer: TokenTransfer,
}

/// Locks `total_amount` of `token_address` behind `hashed_secret`.
///
/// The funding account is the immediate caller, so a relaying proxy, not the
/// signer behind it, becomes the initiator and pays.
pub fn initiate<S: SwapStore>(
    store: &mut S,
    ctx: &CallContext,
    args: InitiateArgs,
) -> Result<Transition, SwapError> {
    ctx.assert_no_deposit()?;
    if store.swap(&args.hashed_secret).is_some() || store.is_settling(&args.hashed_secret) {
        return Err(SwapError::DuplicateSwap);
    }
    if args.total_amount.0 == 0 {
        return Err(SwapError::InvalidAmount);
    }
    if args.participant == ctx.funder || args.participant == ctx.signer {
        return Err(SwapError::InvalidParticipant);
    }
    assert_refund_time_in_future(args.refund_time, ctx.now)?;

    let swap = Swap {
        initiator: ctx.funder.clone(),
        participant: args.participant,
        refund_time: args.refund_time,
        token_address: args.token_address,
        total_amount: args.total_amount,
    };
    store.insert(args.hashed_secret, swap.clone());

    let transfer = TokenTransfer::TransferFrom {
        token: swap.token_address.clone(),
        amount: swap.total_amount,
        from: swap.initiator.clone(),
        to: ctx.contract.clone(),
    };
    Ok(Transition {
        hashed_secret: args.hashed_secret,
        swap,
        transfer,
    })
}

/// Pays the participant once the secret is revealed. Anyone knowing the secret
/// may call this; the payout always goes to the participant.
pub fn redeem<S: SwapStore>(
    store: &mut S,
    ctx: &CallContext,
    secret: &[u8],
) -> Result<Transition, SwapError> {
    ctx.assert_no_deposit()?;
    if secret.len() != SECRET_LENGTH {
        return Err(SwapError::InvalidSecret {
            expected: SECRET_LENGTH,
            actual: secret.len(),
        });
    }
    let hashed_secret = hash_secret(secret);
    let swap = live_swap(store, &hashed_secret)?;
    assert_redemption_window(swap.refund_time, ctx.now)?;

    let swap = take(store, &hashed_secret)?;
    let transfer = TokenTransfer::Transfer {
        token: swap.token_address.clone(),
        amount: swap.total_amount,
        to: swap.participant.clone(),
    };
    Ok(Transition {
        hashed_secret,
        swap,
        transfer,
    })
}

/// Returns the tokens to the initiator once the refund time is reached.
/// Anyone may call this; the payout always goes to the initiator.
pub fn refund<S: SwapStore>(
    store: &mut S,
    ctx: &CallContext,
    hashed_secret: HashedSecret,
) -> Result<Transition, SwapError> {
    ctx.assert_no_deposit()?;
    let swap = live_swap(store, &hashed_secret)?;
    assert_refund_window(swap.refund_time, ctx.now)?;

    let swap = take(store, &hashed_secret)?;
    let transfer = TokenTransfer::Transfer {
        token: swap.token_address.clone(),
        amount: swap.total_amount,
        to: swap.initiator.clone(),
    };
    Ok(Transition {
        hashed_secret,
        swap,
        transfer,
    })
}

fn live_swap<'a, S: SwapStore>(
    store: &'a S,
    hashed_secret: &HashedSecret,
) -> Result<&'a Swap, SwapError> {
    let swap = store.swap(hashed_secret).ok_or(SwapError::SwapNotFound)?;
    if store.is_settling(hashed_secret) {
        return Err(SwapError::SettlementPending);
    }
    Ok(swap)
}

fn take<S: SwapStore>(store: &mut S, hashed_secret: &HashedSecret) -> Result<Swap, SwapError> {
    store.remove(hashed_secret).ok_or(SwapError::SwapNotFound)
}
