//! Account lifecycle states and the rules that govern them.
//!
//! Both the transition graph and the per-operation legality table are
//! exhaustive matches over closed enums, so adding a state or an operation
//! fails to compile until every rule has been revisited.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountState {
    Active,
    Pending,
    Frozen,
    Closed,
}

impl AccountState {
    /// Every state, in declaration order.
    pub const ALL: [AccountState; 4] = [
        AccountState::Active,
        AccountState::Pending,
        AccountState::Frozen,
        AccountState::Closed,
    ];

    /// Upper-case name used in messages and on the wire.
    pub fn name(self) -> &'static str {
        match self {
            AccountState::Active => "ACTIVE",
            AccountState::Pending => "PENDING",
            AccountState::Frozen => "FROZEN",
            AccountState::Closed => "CLOSED",
        }
    }

    /// Whether the transition `self -> target` is permitted.
    ///
    /// Same-state transitions are permitted except out of `Closed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use banking_ledger::core::AccountState;
    ///
    /// assert!(AccountState::Pending.can_transition_to(AccountState::Active));
    /// assert!(!AccountState::Active.can_transition_to(AccountState::Pending));
    /// assert!(!AccountState::Closed.can_transition_to(AccountState::Active));
    /// ```
    pub fn can_transition_to(self, target: AccountState) -> bool {
        match (self, target) {
            (AccountState::Closed, _) => false,
            (AccountState::Active, AccountState::Pending) => false,
            (AccountState::Pending, AccountState::Frozen) => false,
            (AccountState::Active, _)
            | (AccountState::Pending, _)
            | (AccountState::Frozen, _) => true,
        }
    }

    /// Whether `operation` may be performed on an account in this state.
    pub fn permits(self, operation: Operation) -> bool {
        match operation {
            Operation::Deposit => match self {
                AccountState::Active | AccountState::Pending | AccountState::Frozen => true,
                AccountState::Closed => false,
            },
            Operation::Withdraw | Operation::Transfer => match self {
                AccountState::Active => true,
                AccountState::Pending | AccountState::Frozen | AccountState::Closed => false,
            },
        }
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Money-moving operations whose legality depends on account state.
///
/// `Transfer` refers to the source side; the destination of a transfer is
/// checked as a `Deposit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Deposit,
    Withdraw,
    Transfer,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Deposit => "deposits",
            Operation::Withdraw => "withdrawals",
            Operation::Transfer => "transfers",
        };
        f.write_str(label)
    }
}
