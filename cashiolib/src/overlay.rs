//! Оверлей балансов: плавное появление/исчезание и раскладка текста.
//!
//! Видимость задаётся альфой. Пока аннотация жива, альфа растёт на шаг за
//! тик; после истечения убывает, а на нуле оба текста скрываются и кадр
//! не рисуется.

use crate::model::{format_money, Account, Balances, Rgb, Rgba};
use std::time::{Duration, Instant};

pub const DEFAULT_ANNOTATION_TTL: Duration = Duration::from_secs(5);
/// 20 steps of 0.05.
pub const DEFAULT_FADE_STEPS: u8 = 20;

const BALANCE_SCALE: f32 = 0.6;
const ANNOTATION_SCALE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeAnnotation {
    pub text: String,
    pub color: Rgb,
    pub target: Account,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// What survived a tick and should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub show_bank: bool,
    pub show_cash: bool,
    pub alpha: f32,
    pub annotation: Option<(String, Rgb)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
}

impl Resolution {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One screen-space text. `x` is the right edge; texts are outlined.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone)]
pub struct OverlayController {
    ttl: Duration,
    steps: u8,
    level: u8,
    show_bank: bool,
    show_cash: bool,
    expires_at: Option<Instant>,
    annotation: Option<ChangeAnnotation>,
}

impl OverlayController {
    pub fn new(ttl: Duration, fade_steps: u8) -> Self {
        Self {
            ttl,
            steps: fade_steps.max(1),
            level: 0,
            show_bank: false,
            show_cash: false,
            expires_at: None,
            annotation: None,
        }
    }

    /// Shows a "+100.00"-style note next to one balance and hides the other.
    pub fn show_change(&mut self, text: impl Into<String>, color: Rgb, target: Account, now: Instant) {
        let expires_at = now + self.ttl;
        self.annotation = Some(ChangeAnnotation { text: text.into(), color, target, expires_at });
        self.expires_at = Some(expires_at);
        self.level = 0;
        self.show_bank = target == Account::Bank;
        self.show_cash = target == Account::Cash;
    }

    pub fn show_both(&mut self, now: Instant) {
        self.annotation = None;
        self.expires_at = Some(now + self.ttl);
        self.level = 0;
        self.show_bank = true;
        self.show_cash = true;
    }

    /// Advances the fade by one step. `None` means nothing is drawn this frame.
    pub fn tick(&mut self, now: Instant) -> Option<OverlayFrame> {
        if self.is_live(now) {
            self.level = self.level.saturating_add(1).min(self.steps);
        } else {
            self.level = self.level.saturating_sub(1);
            if self.level == 0 {
                self.show_bank = false;
                self.show_cash = false;
                return None;
            }
        }

        Some(OverlayFrame {
            show_bank: self.show_bank,
            show_cash: self.show_cash,
            alpha: self.alpha(),
            annotation: self
                .annotation
                .as_ref()
                .filter(|a| !a.text.is_empty())
                .map(|a| (a.text.clone(), a.color)),
        })
    }

    pub fn phase(&self, now: Instant) -> FadePhase {
        if self.is_live(now) {
            if self.level >= self.steps {
                FadePhase::Visible
            } else {
                FadePhase::FadingIn
            }
        } else if self.level > 0 && self.is_visible() {
            FadePhase::FadingOut
        } else {
            FadePhase::Hidden
        }
    }

    pub fn alpha(&self) -> f32 {
        f32::from(self.level) / f32::from(self.steps)
    }

    pub fn is_visible(&self) -> bool {
        self.show_bank || self.show_cash
    }

    pub fn show_bank(&self) -> bool {
        self.show_bank
    }

    pub fn show_cash(&self) -> bool {
        self.show_cash
    }

    pub fn annotation(&self) -> Option<&ChangeAnnotation> {
        self.annotation.as_ref()
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|t| now < t)
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOTATION_TTL, DEFAULT_FADE_STEPS)
    }
}

/// Bank above cash above annotation, anchored top-right.
pub fn layout(frame: &OverlayFrame, balances: Balances, res: Resolution) -> Vec<TextDraw> {
    let x = res.width * 0.495;
    let bank_y = res.height * 0.02 - 20.0;
    let cash_y = bank_y + res.height * 0.016;
    let line = res.height * 0.015;

    let mut out = Vec::with_capacity(3);
    let mut annotation_y = bank_y + line;

    if frame.show_bank {
        out.push(TextDraw {
            text: format!("Bank: ${}", format_money(balances.bank)),
            x,
            y: bank_y,
            scale: BALANCE_SCALE,
            color: Rgb::BANK.with_alpha(frame.alpha),
        });
    }

    if frame.show_cash {
        let y = if frame.show_bank { cash_y } else { bank_y };
        out.push(TextDraw {
            text: format!("Cash: ${}", format_money(balances.cash)),
            x,
            y,
            scale: BALANCE_SCALE,
            color: Rgb::CASH.with_alpha(frame.alpha),
        });
        annotation_y = y + line;
    }

    if let Some((text, color)) = &frame.annotation {
        out.push(TextDraw {
            text: text.clone(),
            x,
            y: annotation_y,
            scale: ANNOTATION_SCALE,
            color: color.with_alpha(frame.alpha),
        });
    }

    out
}
