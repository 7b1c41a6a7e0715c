//! Balances derived from transaction history.
//!
//! Credits and debits are totalled separately and only then netted. Both
//! totals are order-independent, so a balance never depends on the order of
//! its history, and an out-of-range total is reported instead of panicking.

use super::error::{BankingError, BankingResult};
use super::transaction::{AccountNumber, Transaction, TransactionType};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    credits: Decimal,
    debits: Decimal,
}

impl Totals {
    fn add(self, tx: &Transaction) -> Option<Self> {
        match tx.transaction_type() {
            TransactionType::Deposit | TransactionType::TransferCredit => Some(Self {
                credits: self.credits.checked_add(tx.amount())?,
                ..self
            }),
            TransactionType::Withdraw | TransactionType::TransferDebit => Some(Self {
                debits: self.debits.checked_add(tx.amount())?,
                ..self
            }),
        }
    }

    fn net(self) -> Option<Decimal> {
        self.credits.checked_sub(self.debits)
    }
}

fn overflow(account: &AccountNumber) -> BankingError {
    BankingError::BalanceOverflow {
        account: account.clone(),
    }
}

/// Net balance of `account` over `transactions`.
///
/// Entries for other accounts are ignored. Fails with
/// [`BankingError::BalanceOverflow`] if the account's credits or debits add up
/// to more than a `Decimal` can hold.
///
/// # Example
///
/// ```rust
/// use banking_ledger::core::{calculate_balance, AccountNumber, Transaction};
/// use rust_decimal::Decimal;
///
/// let ledger: Vec<Transaction> = Vec::new();
/// let balance = calculate_balance(&AccountNumber::from("A1"), &ledger).unwrap();
/// assert_eq!(balance, Decimal::ZERO);
/// ```
pub fn calculate_balance<'a, I>(
    account: &AccountNumber,
    transactions: I,
) -> BankingResult<Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.account_number() == account)
        .try_fold(Totals::default(), Totals::add)
        .and_then(Totals::net)
        .ok_or_else(|| overflow(account))
}

/// Balance of every account that appears in `transactions`.
pub fn balances_by_account<'a, I>(
    transactions: I,
) -> BTreeMap<AccountNumber, BankingResult<Decimal>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<&AccountNumber, Option<Totals>> = BTreeMap::new();
    for tx in transactions {
        let entry = totals
            .entry(tx.account_number())
            .or_insert(Some(Totals::default()));
        *entry = (*entry).and_then(|current| current.add(tx));
    }
    totals
        .into_iter()
        .map(|(account, totals)| {
            let balance = totals.and_then(Totals::net).ok_or_else(|| overflow(account));
            (account.clone(), balance)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::{TransactionId, TransactionType, TransferId};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn tx(account: &str, kind: TransactionType, amount: Decimal) -> Transaction {
        let transfer_id = kind.is_transfer().then(|| TransferId::from("tr-1"));
        Transaction::new(
            AccountNumber::from(account),
            Utc::now(),
            kind,
            amount,
            TransactionId::from(format!("{account}-{kind}-{amount}")),
            transfer_id,
        )
    }

    #[test]
    fn empty_ledger_returns_zero() {
        let ledger: Vec<Transaction> = Vec::new();
        let balance = calculate_balance(&AccountNumber::from("A1"), &ledger).unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[test]
    fn single_deposit_increases_balance() {
        let ledger = [tx("1234", TransactionType::Deposit, dec!(100.00))];
        let balance = calculate_balance(&AccountNumber::from("1234"), &ledger).unwrap();
        assert_eq!(balance, dec!(100.00));
        assert_eq!(balance.to_string(), "100.00");
    }

    #[test]
    fn single_withdraw_decreases_balance() {
        let ledger = [tx("1234", TransactionType::Withdraw, dec!(100.00))];
        let balance = calculate_balance(&AccountNumber::from("1234"), &ledger).unwrap();
        assert_eq!(balance, dec!(-100.00));
    }

    #[test]
    fn mixed_ledger_calculates_net_balance() {
        let ledger = [
            tx("1234", TransactionType::Deposit, dec!(1500.00)),
            tx("1234", TransactionType::Withdraw, dec!(500)),
            tx("1234", TransactionType::TransferDebit, dec!(300)),
            tx("1234", TransactionType::TransferCredit, dec!(100)),
        ];
        let balance = calculate_balance(&AccountNumber::from("1234"), &ledger).unwrap();
        assert_eq!(balance, dec!(800.00));
    }

    #[test]
    fn ignores_other_accounts() {
        let ledger = [
            tx("A1", TransactionType::Deposit, dec!(100.00)),
            tx("A2", TransactionType::Deposit, dec!(999.00)),
        ];
        let balance = calculate_balance(&AccountNumber::from("A1"), &ledger).unwrap();
        assert_eq!(balance, dec!(100.00));
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let ledger: Vec<_> = (0..10)
            .map(|_| tx("A1", TransactionType::Deposit, dec!(0.1)))
            .collect();
        let balance = calculate_balance(&AccountNumber::from("A1"), &ledger).unwrap();
        assert_eq!(balance, dec!(1.0));
    }

    #[test]
    fn balances_by_account_groups_entries() {
        let ledger = [
            tx("A1", TransactionType::Deposit, dec!(500)),
            tx("A1", TransactionType::TransferDebit, dec!(400)),
            tx("B1", TransactionType::TransferCredit, dec!(400)),
        ];
        let balances = balances_by_account(&ledger);
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[&AccountNumber::from("A1")], Ok(dec!(100)));
        assert_eq!(balances[&AccountNumber::from("B1")], Ok(dec!(400)));
    }

    #[test]
    fn overflowing_credits_are_reported() {
        let ledger = [
            tx("A1", TransactionType::Deposit, Decimal::MAX),
            tx("A1", TransactionType::TransferCredit, Decimal::MAX),
            tx("A1", TransactionType::Withdraw, dec!(1)),
        ];
        assert_eq!(
            calculate_balance(&AccountNumber::from("A1"), &ledger),
            Err(BankingError::BalanceOverflow {
                account: AccountNumber::from("A1"),
            })
        );
        assert!(balances_by_account(&ledger)[&AccountNumber::from("A1")].is_err());
    }

    #[test]
    fn large_totals_net_regardless_of_order() {
        let mut ledger = vec![
            tx("A1", TransactionType::Withdraw, Decimal::MAX - dec!(1)),
            tx("A1", TransactionType::Deposit, Decimal::MAX),
            tx("B1", TransactionType::Deposit, Decimal::MAX),
        ];
        let account = AccountNumber::from("A1");
        assert_eq!(calculate_balance(&account, &ledger), Ok(dec!(1)));
        ledger.reverse();
        assert_eq!(calculate_balance(&account, &ledger), Ok(dec!(1)));
    }
}
