//! Фасад экономики: связывает счета, оверлей, отложенное сохранение и хост.
//!
//! Хост вызывает `tick` раз в кадр и `save_now` при выгрузке скрипта;
//! остальное: обычные вызовы из обработчиков клавиш или других модов.

use crate::{
    config::Config,
    debounce::SaveDebouncer,
    error::Result,
    events::{EconomyEvent, Listeners},
    input::{Action, Bindings, KeyChord},
    ledger::{Ledger, Removal},
    model::{format_money, Account, Balances, Rgb, SoundCue},
    overlay::{layout, OverlayController},
    traits::{Audio, BalanceStore, Hud},
};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::{collections::VecDeque, sync::mpsc::Receiver, time::Instant};

pub const NOT_ENOUGH_CASH: &str = "Not enough cash.";
pub const NOT_ENOUGH_BANK: &str = "Not enough balance in the bank.";

pub struct Economy {
    ledger: Ledger,
    overlay: OverlayController,
    saver: SaveDebouncer,
    bindings: Bindings,
    store: Box<dyn BalanceStore>,
    audio: Box<dyn Audio>,
    listeners: Listeners,
    notices: VecDeque<String>,
}

impl Economy {
    /// Fresh economy at the configured starting balances; nothing is loaded.
    pub fn new(config: &Config, store: Box<dyn BalanceStore>, audio: Box<dyn Audio>) -> Result<Self> {
        Ok(Self {
            ledger: Ledger::new(config.starting_bank, config.starting_cash)?,
            overlay: OverlayController::new(config.annotation_ttl, config.fade_steps),
            saver: SaveDebouncer::new(config.save_delay),
            bindings: config.bindings.clone(),
            store,
            audio,
            listeners: Listeners::default(),
            notices: VecDeque::new(),
        })
    }

    /// `new` plus loading the saved balances. A broken save is not fatal:
    /// the defaults stay and a notice is queued for the next frame.
    pub fn open(config: &Config, store: Box<dyn BalanceStore>, audio: Box<dyn Audio>) -> Result<Self> {
        let mut eco = Self::new(config, store, audio)?;
        eco.load();
        Ok(eco)
    }

    pub fn load(&mut self) {
        let loaded = self.store.load().and_then(|saved| match saved {
            Some(b) => self.ledger.reconcile(b).map(|_| Some(b)),
            None => Ok(None),
        });
        match loaded {
            Ok(Some(b)) => info!("loaded balances: bank {}, cash {}", b.bank, b.cash),
            Ok(None) => info!("no saved balances, starting with defaults"),
            Err(e) => {
                warn!("failed to load balances: {e}");
                self.notify(format!("Error loading data: {e}"));
            }
        }
    }

    pub fn bank(&self) -> Decimal {
        self.ledger.bank()
    }

    pub fn cash(&self) -> Decimal {
        self.ledger.cash()
    }

    pub fn balances(&self) -> Balances {
        self.ledger.balances()
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn is_ui_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn is_save_pending(&self) -> bool {
        self.saver.is_pending()
    }

    pub fn add_bank(&mut self, amount: Decimal, now: Instant) -> Result<Decimal> {
        self.deposit(Account::Bank, amount, now)
    }

    pub fn add_cash(&mut self, amount: Decimal, now: Instant) -> Result<Decimal> {
        self.deposit(Account::Cash, amount, now)
    }

    pub fn remove_bank(&mut self, amount: Decimal, now: Instant) -> Result<Removal> {
        self.withdraw(Account::Bank, amount, now)
    }

    pub fn remove_cash(&mut self, amount: Decimal, now: Instant) -> Result<Removal> {
        self.withdraw(Account::Cash, amount, now)
    }

    pub fn show_ui(&mut self, now: Instant) {
        self.overlay.show_both(now);
        self.listeners.publish(EconomyEvent::UiShown);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&EconomyEvent) + 'static) {
        self.listeners.subscribe(listener);
    }

    pub fn subscribe_channel(&mut self) -> Receiver<EconomyEvent> {
        self.listeners.channel()
    }

    /// Queues a one-line message shown as a subtitle on the next tick.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notices.push_back(message.into());
    }

    /// Runs whatever the chord is bound to. `Ok(None)` for unbound keys.
    pub fn handle_key(&mut self, chord: KeyChord, now: Instant) -> Result<Option<Action>> {
        let Some(action) = self.bindings.resolve(chord) else {
            return Ok(None);
        };
        debug!("{chord} -> {action:?}");
        self.perform(action, now)?;
        Ok(Some(action))
    }

    pub fn perform(&mut self, action: Action, now: Instant) -> Result<()> {
        match action {
            Action::AddBank(a) => {
                self.add_bank(a, now)?;
            }
            Action::AddCash(a) => {
                self.add_cash(a, now)?;
            }
            Action::RemoveBank(a) => {
                if !self.remove_bank(a, now)?.is_removed() {
                    self.notify(NOT_ENOUGH_BANK);
                }
            }
            Action::RemoveCash(a) => {
                if !self.remove_cash(a, now)?.is_removed() {
                    self.notify(NOT_ENOUGH_CASH);
                }
            }
            Action::ShowBoth => self.show_ui(now),
        }
        Ok(())
    }

    /// One frame: HUD housekeeping, due save, fade step, draw.
    pub fn tick(&mut self, now: Instant, hud: &mut dyn Hud) {
        hud.suppress_native_cash();
        if self.overlay.is_visible() {
            hud.suppress_ammo_this_frame();
        }

        if self.saver.poll(now) {
            self.persist();
        }

        while let Some(msg) = self.notices.pop_front() {
            hud.subtitle(&msg);
        }

        if let Some(frame) = self.overlay.tick(now) {
            for text in layout(&frame, self.ledger.balances(), hud.resolution()) {
                hud.draw_text(&text);
            }
        }
    }

    /// Unconditional save for the exit hook; drops any pending debounce.
    pub fn save_now(&mut self) -> Result<()> {
        self.saver.cancel();
        let b = self.ledger.balances();
        self.store.save(&b)?;
        info!("saved balances: bank {}, cash {}", b.bank, b.cash);
        Ok(())
    }

    fn persist(&mut self) {
        let b = self.ledger.balances();
        match self.store.save(&b) {
            Ok(()) => info!("saved balances: bank {}, cash {}", b.bank, b.cash),
            Err(e) => {
                warn!("failed to save balances: {e}");
                self.notify(format!("Error saving data: {e}"));
            }
        }
    }

    fn deposit(&mut self, account: Account, amount: Decimal, now: Instant) -> Result<Decimal> {
        let balance = self.ledger.add(account, amount)?;
        debug!("{account:?} +{amount} = {balance}");

        self.overlay
            .show_change(format!("+{}", format_money(amount)), Rgb::GAIN, account, now);
        self.audio.play(SoundCue::MONEY_GAINED);
        self.saver.schedule(now);

        let (added, changed) = match account {
            Account::Bank => (EconomyEvent::BankMoneyAdded(amount), EconomyEvent::BankBalanceChanged(balance)),
            Account::Cash => (EconomyEvent::CashMoneyAdded(amount), EconomyEvent::CashBalanceChanged(balance)),
        };
        self.listeners.publish(added);
        self.listeners.publish(changed);
        Ok(balance)
    }

    fn withdraw(&mut self, account: Account, amount: Decimal, now: Instant) -> Result<Removal> {
        let outcome = self.ledger.remove(account, amount)?;
        let Removal::Removed { balance } = outcome else {
            debug!("{account:?} -{amount} refused: insufficient funds");
            return Ok(outcome);
        };
        debug!("{account:?} -{amount} = {balance}");

        self.overlay
            .show_change(format!("-{}", format_money(amount)), Rgb::LOSS, account, now);
        self.audio.play(SoundCue::MONEY_LOST);
        self.saver.schedule(now);

        let (removed, changed) = match account {
            Account::Bank => (EconomyEvent::BankMoneyRemoved(amount), EconomyEvent::BankBalanceChanged(balance)),
            Account::Cash => (EconomyEvent::CashMoneyRemoved(amount), EconomyEvent::CashBalanceChanged(balance)),
        };
        self.listeners.publish(removed);
        self.listeners.publish(changed);
        Ok(outcome)
    }
}

impl std::fmt::Debug for Economy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Economy")
            .field("ledger", &self.ledger)
            .field("overlay", &self.overlay)
            .field("saver", &self.saver)
            .field("listeners", &self.listeners)
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}
