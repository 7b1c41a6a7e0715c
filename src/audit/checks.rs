//! Standard ledger integrity checks.
//!
//! Every check is a pure function over an [`AuditContext`] that reports all
//! of its violations at once.

use crate::audit::context::AuditContext;
use crate::audit::rules::AuditValidation;
use crate::audit::violations::LedgerViolation;
use crate::core::{balances_by_account, Transaction, TransactionType, TransferId};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use stillwater::validation::Validation;

pub(crate) fn collect(violations: Vec<LedgerViolation>) -> AuditValidation {
    let checks: Vec<AuditValidation> = violations
        .into_iter()
        .map(|violation| Validation::fail(violation))
        .collect();
    Validation::all_vec(checks).map(|_| ())
}

/// Every amount is strictly positive.
pub fn positive_amounts(ctx: &AuditContext<'_>) -> AuditValidation {
    collect(
        ctx.transactions
            .iter()
            .filter(|tx| tx.amount() <= Decimal::ZERO)
            .map(|tx| LedgerViolation::NonPositiveAmount {
                transaction_id: tx.transaction_id().clone(),
                amount: tx.amount(),
            })
            .collect(),
    )
}

/// No transaction id is used twice.
pub fn unique_transaction_ids(ctx: &AuditContext<'_>) -> AuditValidation {
    let mut seen: BTreeMap<_, usize> = BTreeMap::new();
    for tx in ctx.transactions {
        *seen.entry(tx.transaction_id()).or_default() += 1;
    }
    collect(
        seen.into_iter()
            .filter(|(_, occurrences)| *occurrences > 1)
            .map(|(id, occurrences)| LedgerViolation::DuplicateTransactionId {
                transaction_id: id.clone(),
                occurrences,
            })
            .collect(),
    )
}

/// Transfer sides carry a transfer id; deposits and withdrawals do not.
pub fn transfer_ids_match_types(ctx: &AuditContext<'_>) -> AuditValidation {
    let violations = ctx
        .transactions
        .iter()
        .filter_map(|tx| {
            match (tx.transaction_type().is_transfer(), tx.transfer_id()) {
                (true, None) => Some(LedgerViolation::MissingTransferId {
                    transaction_id: tx.transaction_id().clone(),
                    transaction_type: tx.transaction_type(),
                }),
                (false, Some(transfer_id)) => Some(LedgerViolation::UnexpectedTransferId {
                    transaction_id: tx.transaction_id().clone(),
                    transaction_type: tx.transaction_type(),
                    transfer_id: transfer_id.clone(),
                }),
                (true, Some(_)) | (false, None) => None,
            }
        })
        .collect();
    collect(violations)
}

/// Each transfer id links exactly one debit and one credit with equal
/// amounts, one timestamp and two distinct accounts.
pub fn transfers_paired(ctx: &AuditContext<'_>) -> AuditValidation {
    let mut groups: BTreeMap<&TransferId, (Vec<&Transaction>, Vec<&Transaction>)> =
        BTreeMap::new();
    for tx in ctx.transactions {
        let Some(transfer_id) = tx.transfer_id() else {
            continue;
        };
        let (debits, credits) = groups.entry(transfer_id).or_default();
        match tx.transaction_type() {
            TransactionType::TransferDebit => debits.push(tx),
            TransactionType::TransferCredit => credits.push(tx),
            TransactionType::Deposit | TransactionType::Withdraw => {}
        }
    }

    let mut violations = Vec::new();
    for (transfer_id, (debits, credits)) in groups {
        let (debit, credit) = match (debits.as_slice(), credits.as_slice()) {
            ([debit], [credit]) => (*debit, *credit),
            _ => {
                violations.push(LedgerViolation::UnpairedTransfer {
                    transfer_id: transfer_id.clone(),
                    debits: debits.len(),
                    credits: credits.len(),
                });
                continue;
            }
        };
        if debit.amount() != credit.amount() {
            violations.push(LedgerViolation::TransferAmountMismatch {
                transfer_id: transfer_id.clone(),
                debit: debit.amount(),
                credit: credit.amount(),
            });
        }
        if debit.occurred_at() != credit.occurred_at() {
            violations.push(LedgerViolation::TransferTimestampMismatch {
                transfer_id: transfer_id.clone(),
            });
        }
        if debit.account_number() == credit.account_number() {
            violations.push(LedgerViolation::TransferWithinAccount {
                transfer_id: transfer_id.clone(),
                account: debit.account_number().clone(),
            });
        }
    }
    collect(violations)
}

/// Every transaction belongs to an account in the context.
pub fn known_accounts(ctx: &AuditContext<'_>) -> AuditValidation {
    let known: HashSet<_> = ctx
        .accounts
        .iter()
        .map(|account| account.account_number())
        .collect();
    collect(
        ctx.transactions
            .iter()
            .filter(|tx| !known.contains(tx.account_number()))
            .map(|tx| LedgerViolation::UnknownAccount {
                transaction_id: tx.transaction_id().clone(),
                account: tx.account_number().clone(),
            })
            .collect(),
    )
}

/// Every account's derived balance is representable and not below zero.
pub fn no_negative_balances(ctx: &AuditContext<'_>) -> AuditValidation {
    collect(
        balances_by_account(ctx.transactions)
            .into_iter()
            .filter_map(|(account, balance)| match balance {
                Ok(balance) if balance < Decimal::ZERO => {
                    Some(LedgerViolation::NegativeBalance { account, balance })
                }
                Ok(_) => None,
                Err(_) => Some(LedgerViolation::BalanceOverflow { account }),
            })
            .collect(),
    )
}
