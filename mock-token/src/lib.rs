//! Fungible token exposing the NEP-141 transfer subset plus `ft_approve` /
//! `ft_transfer_from`. Accounts need no storage registration.

use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{assert_one_yocto, env, near, require, AccountId, PanicOnDefault};

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    balances: LookupMap<AccountId, u128>,
    // (owner, spender) -> remaining allowance
    allowances: LookupMap<(AccountId, AccountId), u128>,
}

#[near]
impl Contract {
    #[init]
    pub fn new(owner_id: AccountId, total_supply: U128) -> Self {
        let mut balances = LookupMap::new(b"b");
        balances.insert(owner_id, total_supply.0);
        Self {
            balances,
            allowances: LookupMap::new(b"a"),
        }
    }

    #[payable]
    pub fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>) {
        assert_one_yocto();
        let sender_id = env::predecessor_account_id();
        self.move_balance(&sender_id, &receiver_id, amount.0);
        log_transfer(&sender_id, &receiver_id, amount, memo);
    }

    #[payable]
    pub fn ft_approve(&mut self, spender_id: AccountId, amount: U128) {
        assert_one_yocto();
        self.allowances
            .insert((env::predecessor_account_id(), spender_id), amount.0);
    }

    #[payable]
    pub fn ft_transfer_from(
        &mut self,
        owner_id: AccountId,
        new_owner_id: AccountId,
        amount: U128,
        memo: Option<String>,
    ) {
        assert_one_yocto();
        let key = (owner_id.clone(), env::predecessor_account_id());
        let allowance = self.allowances.get(&key).copied().unwrap_or(0);
        require!(allowance >= amount.0, "Insufficient allowance");

        self.move_balance(&owner_id, &new_owner_id, amount.0);
        self.allowances.insert(key, allowance - amount.0);
        log_transfer(&owner_id, &new_owner_id, amount, memo);
    }

    pub fn ft_balance_of(&self, account_id: AccountId) -> U128 {
        U128(self.balances.get(&account_id).copied().unwrap_or(0))
    }

    pub fn ft_allowance(&self, owner_id: AccountId, spender_id: AccountId) -> U128 {
        U128(
            self.allowances
                .get(&(owner_id, spender_id))
                .copied()
                .unwrap_or(0),
        )
    }
}

impl Contract {
    fn move_balance(&mut self, from: &AccountId, to: &AccountId, amount: u128) {
        require!(amount > 0, "The amount should be a positive number");
        require!(from != to, "Sender and receiver should be different");

        let from_balance = self.balances.get(from).copied().unwrap_or(0);
        require!(from_balance >= amount, "The account doesn't have enough balance");
        self.balances.insert(from.clone(), from_balance - amount);

        let to_balance = self.balances.get(to).copied().unwrap_or(0);
        self.balances.insert(to.clone(), to_balance + amount);
    }
}

fn log_transfer(from: &AccountId, to: &AccountId, amount: U128, memo: Option<String>) {
    env::log_str(&format!(
        "Transfer {} from {} to {}{}",
        amount.0,
        from,
        to,
        memo.map(|m| format!(" ({m})")).unwrap_or_default()
    ));
}
