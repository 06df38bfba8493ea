//! Payment gateway: native and fungible-token rails.
//!
//! The native rail settles against the attached deposit (exact tender,
//! push transfers out). The fungible-token rail settles against an
//! in-contract deposit ledger fed by the standard NEP-141 `ft_on_transfer`
//! receiver hook, with allowances authorising engine pulls; credits leave
//! the contract through `ft_withdraw`, which re-credits on a failed
//! external transfer.

use near_sdk::{ext_contract, PromiseOrValue};

use crate::internal::{check_one_yocto, rail_key};
use crate::*;

// `#[ext_contract]` generates helper structs that the compiler flags as
// dead_code even though they are used at runtime for cross-contract calls.
#[allow(dead_code)]
#[ext_contract(ext_ft)]
pub trait FungibleToken {
    fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>);
}

#[allow(dead_code)]
#[ext_contract(ext_self)]
pub trait WithdrawResolver {
    fn ft_resolve_withdraw(&mut self, token: AccountId, account_id: AccountId, amount: U128)
        -> U128;
}

#[near]
impl Contract {
    // --- NEP-141 receiver ---

    /// Credits the sender's deposit balance for the calling token contract.
    /// `msg` may name a different beneficiary account to credit; empty
    /// credits the sender. Never keeps unused funds: the full amount is
    /// credited and 0 is returned.
    #[handle_result]
    pub fn ft_on_transfer(
        &mut self,
        sender_id: AccountId,
        amount: U128,
        msg: String,
    ) -> Result<PromiseOrValue<U128>, MarketError> {
        if amount.0 == 0 {
            return Err(MarketError::InvalidInput(
                "Deposit amount must be greater than 0".into(),
            ));
        }
        let token = env::predecessor_account_id();
        let beneficiary = if msg.is_empty() {
            sender_id
        } else {
            msg.parse::<AccountId>()
                .map_err(|_| MarketError::InvalidInput("msg must be a valid account id".into()))?
        };

        let new_balance = self.internal_ft_credit(&token, &beneficiary, amount.0)?;
        events::emit_ft_deposited(&token, &beneficiary, amount.0, new_balance);
        Ok(PromiseOrValue::Value(U128(0)))
    }

    // --- Allowances and withdrawals ---

    /// Authorise the marketplace to pull up to `amount` of the caller's
    /// deposited balance of `token`. Overwrites any previous allowance.
    #[payable]
    #[handle_result]
    pub fn ft_approve(&mut self, token: AccountId, amount: U128) -> Result<(), MarketError> {
        check_one_yocto()?;
        let account_id = env::predecessor_account_id();
        let key = rail_key(&token, &account_id);
        if amount.0 == 0 {
            self.ft_allowances.remove(&key);
        } else {
            self.ft_allowances.insert(key, amount.0);
        }
        events::emit_ft_approved(&token, &account_id, amount.0);
        Ok(())
    }

    /// Send deposited credit back out through the token contract. The
    /// resolve callback re-credits the ledger if the transfer fails.
    #[payable]
    #[handle_result]
    pub fn ft_withdraw(&mut self, token: AccountId, amount: U128) -> Result<Promise, MarketError> {
        check_one_yocto()?;
        if amount.0 == 0 {
            return Err(MarketError::InvalidInput(
                "Withdraw amount must be greater than 0".into(),
            ));
        }
        let account_id = env::predecessor_account_id();
        self.internal_ft_debit_deposit(&token, &account_id, amount.0)?;

        Ok(ext_ft::ext(token.clone())
            .with_attached_deposit(ONE_YOCTO)
            .with_static_gas(Gas::from_tgas(GAS_FT_TRANSFER))
            .ft_transfer(account_id.clone(), amount, None)
            .then(
                ext_self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(GAS_FT_RESOLVE))
                    .ft_resolve_withdraw(token, account_id, amount),
            ))
    }

    /// Only callable by this contract. Safety: must not panic — the debit
    /// already happened; on transfer failure the credit is restored.
    #[private]
    pub fn ft_resolve_withdraw(
        &mut self,
        token: AccountId,
        account_id: AccountId,
        amount: U128,
    ) -> U128 {
        match env::promise_result_checked(0, 16) {
            Ok(_) => {
                let balance = self
                    .ft_deposits
                    .get(&rail_key(&token, &account_id))
                    .copied()
                    .unwrap_or(0);
                events::emit_ft_withdrawn(&token, &account_id, amount.0, balance);
                amount
            }
            Err(_) => {
                env::log_str("Withdraw failed on the token contract; re-crediting deposit");
                // Saturating re-credit: losing dust beats trapping funds.
                let key = rail_key(&token, &account_id);
                let balance = self.ft_deposits.get(&key).copied().unwrap_or(0);
                self.ft_deposits.insert(key, balance.saturating_add(amount.0));
                U128(0)
            }
        }
    }

    // --- Views ---

    pub fn ft_balance_of(&self, token: AccountId, account_id: AccountId) -> U128 {
        U128(
            self.ft_deposits
                .get(&rail_key(&token, &account_id))
                .copied()
                .unwrap_or(0),
        )
    }

    pub fn ft_allowance(&self, token: AccountId, account_id: AccountId) -> U128 {
        U128(
            self.ft_allowances
                .get(&rail_key(&token, &account_id))
                .copied()
                .unwrap_or(0),
        )
    }
}

// ── Internal rail operations ─────────────────────────────────────────────────

impl Contract {
    /// Collect `total` from `payer` on the listing's rail.
    ///
    /// Native: the attached deposit must match exactly. Token: requires a
    /// 1-yocto call, then pulls from the payer's deposit within their
    /// allowance; either shortfall reads as `PaymentTransferFailed`.
    pub(crate) fn internal_collect_payment(
        &mut self,
        payment_token: Option<&AccountId>,
        payer: &AccountId,
        total: u128,
    ) -> Result<(), MarketError> {
        match payment_token {
            None => self.internal_check_exact_tender(total),
            Some(token) => {
                check_one_yocto()?;
                self.internal_ft_pull(token, payer, total)
            }
        }
    }

    /// Exact-tender discipline for the native rail. Over- and underpayment
    /// both fail so nothing ever needs refunding.
    pub(crate) fn internal_check_exact_tender(&self, required: u128) -> Result<(), MarketError> {
        let attached = env::attached_deposit().as_yoctonear();
        if attached != required {
            return Err(MarketError::WrongPaymentAmount(format!(
                "Attached deposit {} does not match required amount {}",
                attached, required
            )));
        }
        Ok(())
    }

    /// Pay `amount` to `recipient` on the given rail. Native amounts leave
    /// as transfer receipts; token amounts stay as withdrawable credit.
    pub(crate) fn internal_payout(
        &mut self,
        payment_token: Option<&AccountId>,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), MarketError> {
        if amount == 0 {
            return Ok(());
        }
        match payment_token {
            None => {
                let _ = Promise::new(recipient.clone()).transfer(NearToken::from_yoctonear(amount));
                Ok(())
            }
            Some(token) => {
                self.internal_ft_credit(token, recipient, amount)?;
                Ok(())
            }
        }
    }

    /// Debit an engine pull from both the allowance and the deposit.
    pub(crate) fn internal_ft_pull(
        &mut self,
        token: &AccountId,
        payer: &AccountId,
        amount: u128,
    ) -> Result<(), MarketError> {
        let key = rail_key(token, payer);
        let allowance = self.ft_allowances.get(&key).copied().unwrap_or(0);
        if allowance < amount {
            return Err(MarketError::PaymentTransferFailed(format!(
                "Allowance {} is below required amount {}",
                allowance, amount
            )));
        }
        let deposit = self.ft_deposits.get(&key).copied().unwrap_or(0);
        if deposit < amount {
            return Err(MarketError::PaymentTransferFailed(format!(
                "Deposited balance {} is below required amount {}",
                deposit, amount
            )));
        }

        if allowance == amount {
            self.ft_allowances.remove(&key);
        } else {
            self.ft_allowances.insert(key.clone(), allowance - amount);
        }
        if deposit == amount {
            self.ft_deposits.remove(&key);
        } else {
            self.ft_deposits.insert(key, deposit - amount);
        }
        Ok(())
    }

    fn internal_ft_credit(
        &mut self,
        token: &AccountId,
        account_id: &AccountId,
        amount: u128,
    ) -> Result<u128, MarketError> {
        let key = rail_key(token, account_id);
        let balance = self.ft_deposits.get(&key).copied().unwrap_or(0);
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| MarketError::InternalError("Deposit balance overflow".into()))?;
        self.ft_deposits.insert(key, new_balance);
        Ok(new_balance)
    }

    fn internal_ft_debit_deposit(
        &mut self,
        token: &AccountId,
        account_id: &AccountId,
        amount: u128,
    ) -> Result<(), MarketError> {
        let key = rail_key(token, account_id);
        let balance = self.ft_deposits.get(&key).copied().unwrap_or(0);
        if balance < amount {
            return Err(MarketError::InsufficientBalance(format!(
                "Deposited balance {} is below withdraw amount {}",
                balance, amount
            )));
        }
        if balance == amount {
            self.ft_deposits.remove(&key);
        } else {
            self.ft_deposits.insert(key, balance - amount);
        }
        Ok(())
    }
}
