//! Property-based tests for the ledger core.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use banking_ledger::audit::LedgerAudit;
use banking_ledger::core::{
    calculate_balance, Account, AccountState, BankingError, BankingOperation, SequentialIds,
    SystemClock, Transaction, TransactionType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn engine() -> BankingOperation {
    BankingOperation::new(SystemClock, SequentialIds::new("p"))
}

prop_compose! {
    fn arbitrary_state()(variant in 0..4u8) -> AccountState {
        match variant {
            0 => AccountState::Active,
            1 => AccountState::Pending,
            2 => AccountState::Frozen,
            _ => AccountState::Closed,
        }
    }
}

prop_compose! {
    fn positive_amount()(cents in 1i64..10_000_000) -> Decimal {
        Decimal::new(cents, 2)
    }
}

prop_compose! {
    fn non_positive_amount()(cents in -10_000_000i64..=0) -> Decimal {
        Decimal::new(cents, 2)
    }
}

const ACCOUNTS: [&str; 3] = ["A1", "B1", "C1"];

#[derive(Clone, Debug)]
enum Step {
    Deposit(usize, Decimal),
    Withdraw(usize, Decimal),
    Transfer(usize, usize, Decimal),
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    let index = 0..ACCOUNTS.len();
    prop_oneof![
        (index.clone(), positive_amount()).prop_map(|(i, amount)| Step::Deposit(i, amount)),
        (index.clone(), positive_amount()).prop_map(|(i, amount)| Step::Withdraw(i, amount)),
        (index.clone(), index, positive_amount())
            .prop_map(|(from, to, amount)| Step::Transfer(from, to, amount)),
    ]
}

/// Apply steps to a set of active accounts, keeping only accepted records.
fn replay(steps: &[Step]) -> (Vec<Account>, Vec<Transaction>) {
    let engine = engine();
    let accounts: Vec<Account> = ACCOUNTS
        .iter()
        .map(|number| Account::new(*number, AccountState::Active))
        .collect();
    let mut ledger = Vec::new();
    for step in steps {
        let produced = match step {
            Step::Deposit(i, amount) => engine.deposit(&accounts[*i], *amount).map(|tx| vec![tx]),
            Step::Withdraw(i, amount) => engine
                .withdraw(&accounts[*i], *amount, &ledger)
                .map(|tx| vec![tx]),
            Step::Transfer(from, to, amount) => engine
                .transfer(&accounts[*from], &accounts[*to], *amount, &ledger)
                .map(|pair| pair.into_vec()),
        };
        if let Ok(records) = produced {
            ledger.extend(records);
        }
    }
    (accounts, ledger)
}

/// A replayed ledger together with an arbitrary permutation of it.
fn ledger_and_shuffle() -> impl Strategy<Value = (Vec<Account>, Vec<Transaction>, Vec<Transaction>)> {
    prop::collection::vec(arbitrary_step(), 0..40)
        .prop_map(|steps| replay(&steps))
        .prop_flat_map(|(accounts, ledger)| {
            let shuffled = Just(ledger.clone()).prop_shuffle();
            (Just(accounts), Just(ledger), shuffled)
        })
}

proptest! {
    #[test]
    fn balance_ignores_entry_order((accounts, ledger, shuffled) in ledger_and_shuffle()) {
        for account in &accounts {
            prop_assert_eq!(
                calculate_balance(account.account_number(), &ledger),
                calculate_balance(account.account_number(), &shuffled)
            );
        }
    }

    #[test]
    fn accepted_operations_never_overdraw(steps in prop::collection::vec(arbitrary_step(), 0..40)) {
        let (accounts, ledger) = replay(&steps);
        for account in &accounts {
            let mut running = Decimal::ZERO;
            for tx in ledger.iter().filter(|tx| tx.account_number() == account.account_number()) {
                running += tx.signed_amount();
                prop_assert!(running >= Decimal::ZERO);
            }
            prop_assert_eq!(Ok(running), calculate_balance(account.account_number(), &ledger));
        }
        prop_assert!(LedgerAudit::standard().check(&accounts, &ledger).is_ok());
    }

    #[test]
    fn non_positive_amounts_are_rejected_first(
        state in arbitrary_state(),
        amount in non_positive_amount(),
    ) {
        let engine = engine();
        let account = Account::new("A1", state);
        let other = Account::new("B1", AccountState::Active);
        let expected = BankingError::InvalidAmount { amount };

        prop_assert_eq!(engine.deposit(&account, amount).unwrap_err(), expected.clone());
        prop_assert_eq!(engine.withdraw(&account, amount, &[]).unwrap_err(), expected.clone());
        prop_assert_eq!(engine.transfer(&account, &other, amount, &[]).unwrap_err(), expected);
    }

    #[test]
    fn closed_accounts_are_terminal(target in arbitrary_state(), amount in positive_amount()) {
        let engine = engine();
        let mut closed = Account::new("C1", AccountState::Closed);
        let active = Account::new("A1", AccountState::Active);
        let funding = vec![engine.deposit(&active, amount).unwrap()];

        prop_assert!(closed.change_state(target).is_err());
        prop_assert_eq!(closed.state(), AccountState::Closed);
        prop_assert!(engine.deposit(&closed, amount).is_err());
        prop_assert!(engine.withdraw(&closed, amount, &[]).is_err());
        prop_assert!(engine.transfer(&closed, &active, amount, &[]).is_err());
        prop_assert!(engine.transfer(&active, &closed, amount, &funding).is_err());
    }

    #[test]
    fn withdrawing_more_than_balance_fails(
        funded in positive_amount(),
        extra in positive_amount(),
    ) {
        let engine = engine();
        let account = Account::new("A1", AccountState::Active);
        let ledger = vec![engine.deposit(&account, funded).unwrap()];
        let requested = funded + extra;

        let is_insufficient = matches!(
            engine.withdraw(&account, requested, &ledger),
            Err(BankingError::InsufficientFunds { .. })
        );
        prop_assert!(is_insufficient);
        prop_assert!(engine.withdraw(&account, funded, &ledger).is_ok());
    }

    #[test]
    fn transfer_pairs_mirror_each_other(
        funded in positive_amount(),
        destination in arbitrary_state(),
    ) {
        prop_assume!(destination != AccountState::Closed);
        let engine = engine();
        let from = Account::new("A1", AccountState::Active);
        let to = Account::new("B1", destination);
        let mut ledger = vec![engine.deposit(&from, funded).unwrap()];

        let pair = engine.transfer(&from, &to, funded, &ledger).unwrap();
        let debit = pair.debit().clone();
        let credit = pair.credit().clone();

        prop_assert_eq!(debit.transaction_type(), TransactionType::TransferDebit);
        prop_assert_eq!(credit.transaction_type(), TransactionType::TransferCredit);
        prop_assert_eq!(debit.amount(), credit.amount());
        prop_assert_eq!(debit.occurred_at(), credit.occurred_at());
        prop_assert_eq!(debit.transfer_id(), credit.transfer_id());
        prop_assert!(debit.transfer_id().is_some());
        prop_assert_ne!(debit.transaction_id(), credit.transaction_id());

        ledger.extend(pair.into_vec());
        let total = calculate_balance(from.account_number(), &ledger).unwrap()
            + calculate_balance(to.account_number(), &ledger).unwrap();
        prop_assert_eq!(total, funded);
    }

    #[test]
    fn transition_rules_match_account_behaviour(from in arbitrary_state(), to in arbitrary_state()) {
        let mut account = Account::new("A1", from);
        let allowed = from.can_transition_to(to);

        prop_assert_eq!(account.change_state(to).is_ok(), allowed);
        let expected = if allowed { to } else { from };
        prop_assert_eq!(account.state(), expected);
    }
}
