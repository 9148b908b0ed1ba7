use near_sdk::json_types::{Base58CryptoHash, Base64VecU8, U128};
use near_sdk::{env, ext_contract, log, near, AccountId, Gas, Promise, PromiseError};

mod error;
mod ledger;
mod store;
mod swap;
mod timelocks;
mod token;
mod utils;

pub use error::SwapError;
pub use ledger::{CallContext, InitiateArgs, Transition};
pub use store::{SwapBook, SwapStore};
pub use swap::{hash_secret, HashedSecret, Swap, SECRET_LENGTH};
pub use token::TokenTransfer;

use token::GAS_FOR_FT_CALL;
use utils::log_swap_event;

const DEFAULT_PAGE_LIMIT: u32 = 50;
const MAX_PAGE_LIMIT: u32 = 100;

// Static gas for the confirm/compensate callbacks.
const GAS_FOR_CALLBACK: Gas = Gas::from_tgas(10);
// Budget for the method body that schedules the token call and its callback.
const GAS_FOR_EXECUTION: Gas = Gas::from_tgas(15);
/// Least prepaid gas a swap operation accepts; covers the token call, its callback and the body.
pub const MIN_PREPAID_GAS: Gas = Gas::from_gas(
    GAS_FOR_FT_CALL.as_gas() + GAS_FOR_CALLBACK.as_gas() + GAS_FOR_EXECUTION.as_gas(),
);

#[ext_contract(ext_self)]
pub trait SelfCallbacks {
    fn on_swap_funded(&mut self, hashed_secret: HashedSecret);
    fn on_payout_settled(&mut self, hashed_secret: HashedSecret, swap: Swap);
}

// Define the contract structure
#[near(contract_state)]
pub struct Contract {
    // Live swaps keyed by hashed secret, plus the keys whose transfer is in flight
    swaps: SwapBook,
}

impl Default for Contract {
    fn default() -> Self {
        Self {
            swaps: SwapBook::new(),
        }
    }
}

#[near]
impl Contract {
    #[init]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks `total_amount` of `token_address` until either the secret behind
    /// `hashed_secret` is revealed or `refund_time` (unix seconds) passes.
    ///
    /// The immediate caller funds the swap and must have approved this contract
    /// on the token beforehand; the tokens are pulled with `ft_transfer_from`.
    #[payable]
    #[handle_result]
    pub fn initiate(
        &mut self,
        hashed_secret: Base58CryptoHash,
        participant: AccountId,
        refund_time: u64,
        token_address: AccountId,
        total_amount: U128,
    ) -> Result<Promise, SwapError> {
        assert_enough_gas()?;
        let ctx = CallContext::from_env();
        let transition = ledger::initiate(
            &mut self.swaps,
            &ctx,
            InitiateArgs {
                hashed_secret: hashed_secret.into(),
                participant,
                refund_time,
                token_address,
                total_amount,
            },
        )?;
        let key = transition.hashed_secret;
        self.swaps.begin_settlement(key);

        log_swap_event("INITIATED", &key, &ctx.funder, transition.swap.total_amount);

        Ok(transition.transfer.into_promise("HTLC initiate").then(
            ext_self::ext(env::current_account_id())
                .with_static_gas(GAS_FOR_CALLBACK)
                .on_swap_funded(key),
        ))
    }

    /// Pays the swap out to its participant. Callable by anyone who knows the secret.
    #[payable]
    #[handle_result]
    pub fn redeem(&mut self, secret: Base64VecU8) -> Result<Promise, SwapError> {
        assert_enough_gas()?;
        let ctx = CallContext::from_env();
        let transition = ledger::redeem(&mut self.swaps, &ctx, &secret.0)?;

        log_swap_event(
            "REDEEMED",
            &transition.hashed_secret,
            &ctx.funder,
            transition.swap.total_amount,
        );
        Ok(self.pay_out(transition, "HTLC redeem"))
    }

    /// Returns the swap to its initiator once `refund_time` is reached. Callable by anyone.
    #[payable]
    #[handle_result]
    pub fn refund(&mut self, hashed_secret: Base58CryptoHash) -> Result<Promise, SwapError> {
        assert_enough_gas()?;
        let ctx = CallContext::from_env();
        let transition = ledger::refund(&mut self.swaps, &ctx, hashed_secret.into())?;

        log_swap_event(
            "REFUNDED",
            &transition.hashed_secret,
            &ctx.funder,
            transition.swap.total_amount,
        );
        Ok(self.pay_out(transition, "HTLC refund"))
    }

    // --- VIEWS ---

    pub fn get_swap(&self, hashed_secret: Base58CryptoHash) -> Option<Swap> {
        self.swaps.swap(&hashed_secret.into()).cloned()
    }

    pub fn get_swaps(
        &self,
        from_index: Option<u32>,
        limit: Option<u32>,
    ) -> Vec<(Base58CryptoHash, Swap)> {
        self.swaps
            .page(
                from_index.unwrap_or(0),
                limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT),
            )
            .into_iter()
            .map(|(hashed_secret, swap)| (hashed_secret.into(), swap))
            .collect()
    }

    pub fn get_swap_count(&self) -> u32 {
        self.swaps.len()
    }

    /// True while the funding or payout transfer of this swap is unconfirmed.
    pub fn is_settling(&self, hashed_secret: Base58CryptoHash) -> bool {
        self.swaps.is_settling(&hashed_secret.into())
    }

    // --- PRIVATE CALLBACKS ---

    #[private]
    pub fn on_swap_funded(
        &mut self,
        #[callback_result] result: Result<(), PromiseError>,
        hashed_secret: HashedSecret,
    ) {
        self.resolve_funding(hashed_secret, result.is_ok());
    }

    #[private]
    pub fn on_payout_settled(
        &mut self,
        #[callback_result] result: Result<(), PromiseError>,
        hashed_secret: HashedSecret,
        swap: Swap,
    ) {
        self.resolve_payout(hashed_secret, swap, result.is_ok());
    }
}

impl Contract {
    fn pay_out(&mut self, transition: Transition, memo: &str) -> Promise {
        let Transition {
            hashed_secret,
            swap,
            transfer,
        } = transition;
        self.swaps.begin_settlement(hashed_secret);

        transfer.into_promise(memo).then(
            ext_self::ext(env::current_account_id())
                .with_static_gas(GAS_FOR_CALLBACK)
                .on_payout_settled(hashed_secret, swap),
        )
    }

    fn resolve_funding(&mut self, hashed_secret: HashedSecret, funded: bool) {
        self.swaps.end_settlement(&hashed_secret);

        if funded {
            if let Some(swap) = self.swaps.swap(&hashed_secret) {
                log_swap_event("FUNDED", &hashed_secret, &swap.initiator, swap.total_amount);
            }
            return;
        }

        // The tokens never arrived, so the swap must not exist.
        if let Some(swap) = self.swaps.remove(&hashed_secret) {
            log!("Token pull failed; swap removed.");
            log_swap_event(
                "FUNDING_FAILED",
                &hashed_secret,
                &swap.initiator,
                swap.total_amount,
            );
        }
    }

    fn resolve_payout(&mut self, hashed_secret: HashedSecret, swap: Swap, paid: bool) {
        self.swaps.end_settlement(&hashed_secret);

        if paid {
            log_swap_event(
                "PAYOUT_SETTLED",
                &hashed_secret,
                &swap.token_address,
                swap.total_amount,
            );
            return;
        }

        // Tokens are still held here; put the swap back so the payout can be retried.
        log!("Token payout failed; swap restored.");
        log_swap_event(
            "PAYOUT_FAILED",
            &hashed_secret,
            &swap.token_address,
            swap.total_amount,
        );
        self.swaps.insert(hashed_secret, swap);
    }
}

fn assert_enough_gas() -> Result<(), SwapError> {
    let prepaid = env::prepaid_gas();
    if prepaid < MIN_PREPAID_GAS {
        return Err(SwapError::InsufficientGas {
            required: MIN_PREPAID_GAS.as_tgas(),
            prepaid: prepaid.as_tgas(),
        });
    }
    Ok(())
}
