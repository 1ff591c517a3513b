//! Горячие клавиши: разбор аккордов вида `shift+insert` и таблица действий.

use crate::error::{CashioError, Result};
use rust_decimal::Decimal;
use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Multiply,
    Divide,
    Add,
    Subtract,
    F(u8),
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn shift(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }
}

impl FromStr for Key {
    type Err = CashioError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "insert" | "ins" => Key::Insert,
            "delete" | "del" => Key::Delete,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,
            "multiply" | "*" => Key::Multiply,
            "divide" | "/" => Key::Divide,
            "add" | "+" => Key::Add,
            "subtract" | "-" => Key::Subtract,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.as_str()) {
                    (Some(c), "") if c.is_ascii_alphanumeric() => Key::Char(c),
                    (Some('f'), n) => match n.parse::<u8>() {
                        Ok(n @ 1..=24) => Key::F(n),
                        _ => return Err(CashioError::UnknownKey(s.to_string())),
                    },
                    _ => return Err(CashioError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl FromStr for KeyChord {
    type Err = CashioError;

    /// `z`, `shift+insert`, `ctrl+alt+f5`. The key goes last.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        // "+" alone or "shift++" means the Add key
        let (mods, key) = match parts.as_slice() {
            [.., "", ""] => (&parts[..parts.len() - 2], "+"),
            [mods @ .., key] => (mods, *key),
            [] => return Err(CashioError::UnknownKey(s.to_string())),
        };

        let mut modifiers = Modifiers::NONE;
        for m in mods {
            match m.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                _ => return Err(CashioError::UnknownKey(s.to_string())),
            }
        }

        Ok(KeyChord::new(key.parse()?, modifiers))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Insert => f.write_str("insert"),
            Key::Delete => f.write_str("delete"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::PageUp => f.write_str("pageup"),
            Key::PageDown => f.write_str("pagedown"),
            Key::Multiply => f.write_str("multiply"),
            Key::Divide => f.write_str("divide"),
            Key::Add => f.write_str("add"),
            Key::Subtract => f.write_str("subtract"),
            Key::F(n) => write!(f, "f{n}"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddBank(Decimal),
    RemoveBank(Decimal),
    AddCash(Decimal),
    RemoveCash(Decimal),
    ShowBoth,
}

impl Action {
    /// Builds an action from its config name. Money actions need an amount.
    pub fn from_parts(name: &str, amount: Option<Decimal>) -> Result<Self> {
        let need = |amount: Option<Decimal>| {
            amount.ok_or_else(|| CashioError::Parse(format!("action {name} needs an amount")))
        };
        let action = match name {
            "AddBank" => Action::AddBank(need(amount)?),
            "RemoveBank" => Action::RemoveBank(need(amount)?),
            "AddCash" => Action::AddCash(need(amount)?),
            "RemoveCash" => Action::RemoveCash(need(amount)?),
            "ShowBoth" => Action::ShowBoth,
            other => return Err(CashioError::Parse(format!("unknown action: {other}"))),
        };
        Ok(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    map: HashMap<KeyChord, Action>,
}

impl Bindings {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn bind(&mut self, chord: KeyChord, action: Action) -> &mut Self {
        self.map.insert(chord, action);
        self
    }

    /// Exact chord first, then the bare key: `ctrl+insert` falls back to `insert`.
    pub fn resolve(&self, chord: KeyChord) -> Option<Action> {
        self.map
            .get(&chord)
            .or_else(|| self.map.get(&KeyChord::plain(chord.key)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyChord, &Action)> {
        self.map.iter()
    }
}

impl Default for Bindings {
    fn default() -> Self {
        let mut b = Bindings::empty();
        b.bind(KeyChord::shift(Key::Insert), Action::AddCash(Decimal::new(500, 0)))
            .bind(KeyChord::shift(Key::Delete), Action::RemoveCash(Decimal::new(200, 0)))
            .bind(KeyChord::plain(Key::Insert), Action::AddBank(Decimal::new(500, 0)))
            .bind(KeyChord::plain(Key::Delete), Action::RemoveBank(Decimal::new(200, 0)))
            .bind(KeyChord::plain(Key::Multiply), Action::AddCash(Decimal::new(100, 0)))
            .bind(KeyChord::plain(Key::Divide), Action::RemoveCash(Decimal::new(50, 0)))
            .bind(KeyChord::plain(Key::Char('z')), Action::ShowBoth);
        b
    }
}
