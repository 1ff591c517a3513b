//! Доменные модели: счета, снимок балансов, цвета и звуковые сигналы.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Account {
    Bank,
    Cash,
}

/// Снимок обоих балансов — то, что уходит в хранилище и на экран.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Balances {
    pub bank: Decimal,
    pub cash: Decimal,
}

impl Balances {
    pub fn new(bank: Decimal, cash: Decimal) -> Self {
        Self { bank, cash }
    }

    pub fn get(&self, account: Account) -> Decimal {
        match account {
            Account::Bank => self.bank,
            Account::Cash => self.cash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BANK: Rgb = Rgb::new(50, 205, 50);
    pub const CASH: Rgb = Rgb::new(0, 255, 0);
    pub const GAIN: Rgb = Rgb::new(0, 255, 0);
    pub const LOSS: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Alpha channel is `alpha * 255`, truncated.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Frontend sound: cue name plus the sound set it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundCue {
    pub name: &'static str,
    pub set: &'static str,
}

impl SoundCue {
    pub const MONEY_GAINED: SoundCue = SoundCue {
        name: "LOCAL_PLYR_CASH_COUNTER_COMPLETE",
        set: "DLC_HEISTS_GENERAL_FRONTEND_SOUNDS",
    };
    pub const MONEY_LOST: SoundCue = SoundCue {
        name: "PS2A_MONEY_LOST",
        set: "PALETO_SCORE_2A_BANK_SS",
    };
}

/// `1234.5` -> `1,234.50`: two decimals, comma-grouped thousands.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let s = rounded.abs().to_string();
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
