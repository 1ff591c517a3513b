//! События экономики и явная подписка на них (вместо глобального синглтона).

use rust_decimal::Decimal;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyEvent {
    BankMoneyAdded(Decimal),
    BankMoneyRemoved(Decimal),
    BankBalanceChanged(Decimal),
    CashMoneyAdded(Decimal),
    CashMoneyRemoved(Decimal),
    CashBalanceChanged(Decimal),
    UiShown,
}

type Listener = Box<dyn FnMut(&EconomyEvent)>;

#[derive(Default)]
pub struct Listeners {
    callbacks: Vec<Listener>,
    channels: Vec<Sender<EconomyEvent>>,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&EconomyEvent) + 'static) {
        self.callbacks.push(Box::new(listener));
    }

    pub fn channel(&mut self) -> Receiver<EconomyEvent> {
        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        rx
    }

    pub fn publish(&mut self, event: EconomyEvent) {
        for cb in &mut self.callbacks {
            cb(&event);
        }
        // a dropped receiver unsubscribes
        self.channels.retain(|tx| tx.send(event).is_ok());
    }

    pub fn len(&self) -> usize {
        self.callbacks.len() + self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("callbacks", &self.callbacks.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}
