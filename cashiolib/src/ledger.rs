//! Два неотрицательных счётчика: банк и наличные.

use crate::{
    error::{CashioError, Result},
    model::{Account, Balances},
};
use rust_decimal::Decimal;

/// Outcome of a withdrawal. Running short is routine, so it is not an error.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed { balance: Decimal },
    InsufficientFunds { available: Decimal },
}

impl Removal {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    bank: Decimal,
    cash: Decimal,
}

impl Ledger {
    pub fn new(bank: Decimal, cash: Decimal) -> Result<Self> {
        non_negative(bank)?;
        non_negative(cash)?;
        Ok(Self { bank, cash })
    }

    pub fn bank(&self) -> Decimal {
        self.bank
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn balances(&self) -> Balances {
        Balances::new(self.bank, self.cash)
    }

    pub fn add_bank(&mut self, amount: Decimal) -> Result<Decimal> {
        self.add(Account::Bank, amount)
    }

    pub fn add_cash(&mut self, amount: Decimal) -> Result<Decimal> {
        self.add(Account::Cash, amount)
    }

    pub fn remove_bank(&mut self, amount: Decimal) -> Result<Removal> {
        self.remove(Account::Bank, amount)
    }

    pub fn remove_cash(&mut self, amount: Decimal) -> Result<Removal> {
        self.remove(Account::Cash, amount)
    }

    pub fn add(&mut self, account: Account, amount: Decimal) -> Result<Decimal> {
        non_negative(amount)?;
        let slot = self.slot(account);
        let sum = slot
            .checked_add(amount)
            .ok_or(CashioError::Overflow { balance: *slot, amount })?;
        *slot = sum;
        Ok(sum)
    }

    pub fn remove(&mut self, account: Account, amount: Decimal) -> Result<Removal> {
        non_negative(amount)?;
        let slot = self.slot(account);
        if *slot >= amount {
            *slot -= amount;
            Ok(Removal::Removed { balance: *slot })
        } else {
            Ok(Removal::InsufficientFunds { available: *slot })
        }
    }

    /// Brings the ledger in line with a saved snapshot. The bank moves by the
    /// delta between saved and current balance; cash is overwritten.
    pub fn reconcile(&mut self, saved: Balances) -> Result<()> {
        non_negative(saved.bank)?;
        non_negative(saved.cash)?;

        let delta = saved.bank - self.bank;
        if delta < Decimal::ZERO {
            if let Removal::InsufficientFunds { available } = self.remove_bank(-delta)? {
                return Err(CashioError::Parse(format!(
                    "cannot reconcile bank {available} down to {}",
                    saved.bank
                )));
            }
        } else {
            self.add_bank(delta)?;
        }
        self.cash = saved.cash;
        Ok(())
    }

    fn slot(&mut self, account: Account) -> &mut Decimal {
        match account {
            Account::Bank => &mut self.bank,
            Account::Cash => &mut self.cash,
        }
    }
}

fn non_negative(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(CashioError::InvalidAmount(amount));
    }
    Ok(())
}
