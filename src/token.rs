use near_sdk::json_types::U128;
use near_sdk::{ext_contract, AccountId, Gas, NearToken, Promise};

// NEP-141 requires exactly one yoctoNEAR on transfers.
const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// Static gas for `ft_transfer` / `ft_transfer_from` on the token contract.
pub const GAS_FOR_FT_CALL: Gas = Gas::from_tgas(15);

// External contract interfaces
#[ext_contract(ext_fungible_token)]
pub trait FungibleToken {
    fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>);
    fn ft_transfer_from(
        &mut self,
        owner_id: AccountId,
        new_owner_id: AccountId,
        amount: U128,
        memo: Option<String>,
    );
}

/// The single outbound call a successful swap operation asks the token ledger to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenTransfer {
    /// Pull `amount` from `from` into `to` using the allowance `from` granted.
    TransferFrom {
        token: AccountId,
        amount: U128,
        from: AccountId,
        to: AccountId,
    },
    /// Pay `amount` out of this contract's own balance.
    Transfer {
        token: AccountId,
        amount: U128,
        to: AccountId,
    },
}

impl TokenTransfer {
    pub fn token(&self) -> &AccountId {
        match self {
            Self::TransferFrom { token, .. } | Self::Transfer { token, .. } => token,
        }
    }

    pub fn into_promise(self, memo: &str) -> Promise {
        let token = self.token().clone();
        let call = ext_fungible_token::ext(token)
            .with_attached_deposit(ONE_YOCTO)
            .with_static_gas(GAS_FOR_FT_CALL);

        match self {
            Self::TransferFrom {
                amount, from, to, ..
            } => call.ft_transfer_from(from, to, amount, Some(memo.to_string())),
            Self::Transfer { amount, to, .. } => call.ft_transfer(to, amount, Some(memo.to_string())),
        }
    }
}
