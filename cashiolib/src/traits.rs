//! Трэйты на границе с хостом: формат файла, хранилище, HUD и звук.

use crate::{
    error::Result,
    model::{Balances, SoundCue},
    overlay::{Resolution, TextDraw},
};
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Balances>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, balances: &Balances) -> Result<()>;
}

/// Where balances live between sessions. `Ok(None)` means nothing saved yet.
pub trait BalanceStore {
    fn load(&self) -> Result<Option<Balances>>;
    fn save(&self, balances: &Balances) -> Result<()>;
}

/// Screen-side sink of the host. Called from the frame tick only.
pub trait Hud {
    fn resolution(&self) -> Resolution;
    fn draw_text(&mut self, text: &TextDraw);
    fn subtitle(&mut self, message: &str);

    /// The game's own cash counter; hidden every frame.
    fn suppress_native_cash(&mut self) {}

    /// The ammo counter shares the top-right corner with the overlay.
    fn suppress_ammo_this_frame(&mut self) {}
}

pub trait Audio {
    fn play(&mut self, cue: SoundCue);
}

/// For hosts without sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}
