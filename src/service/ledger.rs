//! Ledger operations as effects over [`LedgerEnv`].
//!
//! Each function validates nothing itself: it looks up what the engine needs,
//! asks [`BankingOperation`](crate::core::BankingOperation) for new records
//! and appends them. Reads and the append that depends on them happen under
//! the affected accounts' locks; whole-ledger snapshots and restores run
//! exclusively.

use crate::core::{
    calculate_balance, Account, AccountNumber, AccountState, Transaction, TransferPair,
};
use crate::service::env::LedgerEnv;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::repository::{AccountRepository, TransactionRepository};
use crate::snapshot::LedgerSnapshot;
use rust_decimal::Decimal;
use std::iter;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::info;

/// Register a new account. Fails if the number is already taken.
pub fn open_account(
    account_number: impl Into<AccountNumber>,
    state: AccountState,
) -> impl Effect<Output = Account, Error = ServiceError, Env = LedgerEnv> {
    let account_number = account_number.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<Account> {
        env.locks().with_locked(&[&account_number], || -> ServiceResult<Account> {
            if env.accounts().find(&account_number)?.is_some() {
                return Err(ServiceError::AccountExists(account_number.clone()));
            }
            let account = env.engine().open_account(account_number.clone(), state);
            env.accounts().save(account.clone())?;
            info!(account = %account_number, %state, "account opened");
            Ok(account)
        })
    })
}

/// Move an account to `target` if its lifecycle allows it.
pub fn change_account_state(
    account_number: impl Into<AccountNumber>,
    target: AccountState,
) -> impl Effect<Output = Account, Error = ServiceError, Env = LedgerEnv> {
    let account_number = account_number.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<Account> {
        env.locks().with_locked(&[&account_number], || -> ServiceResult<Account> {
            let mut account = env.require_account(&account_number)?;
            let from = account.state();
            account.change_state(target)?;
            env.accounts().save(account.clone())?;
            info!(account = %account_number, %from, to = %target, "account state changed");
            Ok(account)
        })
    })
}

pub fn deposit(
    account_number: impl Into<AccountNumber>,
    amount: Decimal,
) -> impl Effect<Output = Transaction, Error = ServiceError, Env = LedgerEnv> {
    let account_number = account_number.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<Transaction> {
        env.locks().with_locked(&[&account_number], || -> ServiceResult<Transaction> {
            let account = env.require_account(&account_number)?;
            let tx = env.engine().deposit(&account, amount)?;
            ensure_representable(env, &tx)?;
            env.transactions().save(tx.clone())?;
            info!(
                account = %account_number,
                %amount,
                transaction_id = %tx.transaction_id(),
                "deposit committed"
            );
            Ok(tx)
        })
    })
}

pub fn withdraw(
    account_number: impl Into<AccountNumber>,
    amount: Decimal,
) -> impl Effect<Output = Transaction, Error = ServiceError, Env = LedgerEnv> {
    let account_number = account_number.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<Transaction> {
        env.locks().with_locked(&[&account_number], || -> ServiceResult<Transaction> {
            let account = env.require_account(&account_number)?;
            let history = env.transactions().find_by_account_number(&account_number)?;
            let tx = env.engine().withdraw(&account, amount, &history)?;
            env.transactions().save(tx.clone())?;
            info!(
                account = %account_number,
                %amount,
                transaction_id = %tx.transaction_id(),
                "withdrawal committed"
            );
            Ok(tx)
        })
    })
}

/// Move funds between two accounts. Both sides are appended together.
pub fn transfer(
    from: impl Into<AccountNumber>,
    to: impl Into<AccountNumber>,
    amount: Decimal,
) -> impl Effect<Output = TransferPair, Error = ServiceError, Env = LedgerEnv> {
    let from = from.into();
    let to = to.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<TransferPair> {
        env.locks().with_locked(&[&from, &to], || -> ServiceResult<TransferPair> {
            let source = env.require_account(&from)?;
            let destination = env.require_account(&to)?;
            let history = env.transactions().find_by_account_number(&from)?;
            let pair = env
                .engine()
                .transfer(&source, &destination, amount, &history)?;
            ensure_representable(env, pair.credit())?;
            env.transactions().save_all(pair.clone().into_vec())?;
            if let Some(transfer_id) = pair.transfer_id() {
                info!(from = %from, to = %to, %amount, %transfer_id, "transfer committed");
            }
            Ok(pair)
        })
    })
}

/// Current balance derived from the account's history.
pub fn balance(
    account_number: impl Into<AccountNumber>,
) -> impl Effect<Output = Decimal, Error = ServiceError, Env = LedgerEnv> {
    let account_number = account_number.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<Decimal> {
        env.locks().with_locked(&[&account_number], || -> ServiceResult<Decimal> {
            env.require_account(&account_number)?;
            let history = env.transactions().find_by_account_number(&account_number)?;
            Ok(calculate_balance(&account_number, &history)?)
        })
    })
}

/// The account's entries in append order.
pub fn history(
    account_number: impl Into<AccountNumber>,
) -> impl Effect<Output = Vec<Transaction>, Error = ServiceError, Env = LedgerEnv> {
    let account_number = account_number.into();
    from_fn(move |env: &LedgerEnv| -> ServiceResult<Vec<Transaction>> {
        env.require_account(&account_number)?;
        env.transactions().find_by_account_number(&account_number)
    })
}

/// Capture every account and transaction.
pub fn snapshot() -> impl Effect<Output = LedgerSnapshot, Error = ServiceError, Env = LedgerEnv> {
    from_fn(|env: &LedgerEnv| -> ServiceResult<LedgerSnapshot> {
        let snapshot = capture(env)?;
        info!(
            snapshot = %snapshot.id,
            accounts = snapshot.accounts.len(),
            transactions = snapshot.transactions.len(),
            "snapshot taken"
        );
        Ok(snapshot)
    })
}

/// Load a snapshot into an empty ledger, auditing it first when configured.
pub fn restore(
    snapshot: LedgerSnapshot,
) -> impl Effect<Output = (), Error = ServiceError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| env.locks().with_exclusive(|| load(env, &snapshot)))
}

/// Snapshot the ledger and encode it in the configured format.
pub fn export_snapshot() -> impl Effect<Output = Vec<u8>, Error = ServiceError, Env = LedgerEnv> {
    from_fn(|env: &LedgerEnv| -> ServiceResult<Vec<u8>> {
        Ok(capture(env)?.encode(env.config().snapshot_format)?)
    })
}

/// Decode bytes in the configured format and restore them.
pub fn import_snapshot(
    bytes: Vec<u8>,
) -> impl Effect<Output = (), Error = ServiceError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> ServiceResult<()> {
        let snapshot = LedgerSnapshot::decode(&bytes, env.config().snapshot_format)?;
        env.locks().with_exclusive(|| load(env, &snapshot))
    })
}

/// Fails if appending `entry` would take its account's balance out of range.
fn ensure_representable(env: &LedgerEnv, entry: &Transaction) -> ServiceResult<()> {
    let account_number = entry.account_number();
    let history = env.transactions().find_by_account_number(account_number)?;
    calculate_balance(account_number, history.iter().chain(iter::once(entry)))?;
    Ok(())
}

fn capture(env: &LedgerEnv) -> ServiceResult<LedgerSnapshot> {
    env.locks().with_exclusive(|| -> ServiceResult<LedgerSnapshot> {
        Ok(LedgerSnapshot::new(
            env.accounts().all()?,
            env.transactions().all()?,
        ))
    })
}

/// Must run inside [`AccountLocks::with_exclusive`](crate::service::AccountLocks::with_exclusive).
fn load(env: &LedgerEnv, snapshot: &LedgerSnapshot) -> ServiceResult<()> {
    if !env.accounts().all()?.is_empty() || !env.transactions().all()?.is_empty() {
        return Err(ServiceError::LedgerNotEmpty(snapshot.id.clone()));
    }
    if env.config().audit_on_restore {
        snapshot.audit(env.audit())?;
    }
    for account in &snapshot.accounts {
        env.accounts().save(account.clone())?;
    }
    env.transactions().save_all(snapshot.transactions.clone())?;
    info!(
        snapshot = %snapshot.id,
        accounts = snapshot.accounts.len(),
        transactions = snapshot.transactions.len(),
        "snapshot restored"
    );
    Ok(())
}
