use cashiolib::{
    config::Config,
    economy::{Economy, NOT_ENOUGH_BANK, NOT_ENOUGH_CASH},
    error::{CashioError, Result},
    events::EconomyEvent,
    input::{Action, Key, KeyChord},
    model::{Balances, SoundCue},
    overlay::{Resolution, TextDraw},
    store::MemoryStore,
    traits::{Audio, BalanceStore, Hud, Silent},
};
use rust_decimal::Decimal;
use std::{
    cell::RefCell,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

#[derive(Default)]
struct RecordingHud {
    texts: Vec<String>,
    subtitles: Vec<String>,
    native_cash_hidden: usize,
    ammo_hidden: usize,
}

impl Hud for RecordingHud {
    fn resolution(&self) -> Resolution {
        Resolution::new(1920.0, 1080.0)
    }
    fn draw_text(&mut self, text: &TextDraw) {
        self.texts.push(text.text.clone());
    }
    fn subtitle(&mut self, message: &str) {
        self.subtitles.push(message.to_string());
    }
    fn suppress_native_cash(&mut self) {
        self.native_cash_hidden += 1;
    }
    fn suppress_ammo_this_frame(&mut self) {
        self.ammo_hidden += 1;
    }
}

#[derive(Clone, Default)]
struct RecordingAudio(Rc<RefCell<Vec<SoundCue>>>);

impl Audio for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.0.borrow_mut().push(cue);
    }
}

struct BrokenStore;

impl BalanceStore for BrokenStore {
    fn load(&self) -> Result<Option<Balances>> {
        Err(CashioError::Xml("unexpected end of file".into()))
    }
    fn save(&self, _balances: &Balances) -> Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

fn d(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn fresh() -> (Economy, MemoryStore) {
    let store = MemoryStore::new();
    let eco = Economy::open(&Config::default(), Box::new(store.clone()), Box::new(Silent)).unwrap();
    (eco, store)
}

#[test]
fn scenario_through_facade() {
    let (mut eco, _) = fresh();
    let now = Instant::now();
    assert_eq!(eco.balances(), Balances::new(d(1000), d(500)));

    assert_eq!(eco.add_cash(d(500), now).unwrap(), d(1000));
    assert!(eco.remove_bank(d(200), now).unwrap().is_removed());
    assert!(!eco.remove_cash(d(2000), now).unwrap().is_removed());
    assert_eq!(eco.balances(), Balances::new(d(800), d(1000)));

    assert!(matches!(eco.add_bank(d(-5), now), Err(CashioError::InvalidAmount(_))));
    assert_eq!(eco.bank(), d(800));
}

#[test]
fn loads_saved_balances_over_defaults() {
    let store = MemoryStore::with(Balances::new(d(42), d(7)));
    let eco = Economy::open(&Config::default(), Box::new(store), Box::new(Silent)).unwrap();
    assert_eq!(eco.balances(), Balances::new(d(42), d(7)));
}

#[test]
fn broken_store_is_not_fatal() {
    let mut eco = Economy::open(&Config::default(), Box::new(BrokenStore), Box::new(Silent)).unwrap();
    let mut hud = RecordingHud::default();
    let t0 = Instant::now();
    assert_eq!(eco.balances(), Balances::new(d(1000), d(500)));

    eco.add_cash(d(1), t0).unwrap();
    eco.tick(t0 + Duration::from_secs(1), &mut hud);
    assert_eq!(hud.subtitles.len(), 2);
    assert!(hud.subtitles[0].starts_with("Error loading data:"));
    assert!(hud.subtitles[1].starts_with("Error saving data:"));
    assert_eq!(eco.cash(), d(501));

    assert!(eco.save_now().is_err());
}

#[test]
fn events_fire_added_then_changed() {
    let (mut eco, _) = fresh();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    eco.subscribe(move |e| sink.borrow_mut().push(*e));
    let rx = eco.subscribe_channel();
    let now = Instant::now();

    eco.add_bank(d(100), now).unwrap();
    assert!(eco.remove_cash(d(50), now).unwrap().is_removed());
    let _ = eco.remove_cash(d(10_000), now).unwrap();
    eco.show_ui(now);

    let expected = vec![
        EconomyEvent::BankMoneyAdded(d(100)),
        EconomyEvent::BankBalanceChanged(d(1100)),
        EconomyEvent::CashMoneyRemoved(d(50)),
        EconomyEvent::CashBalanceChanged(d(450)),
        EconomyEvent::UiShown,
    ];
    assert_eq!(*seen.borrow(), expected);
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn dropped_channel_unsubscribes() {
    let (mut eco, _) = fresh();
    drop(eco.subscribe_channel());
    eco.add_cash(d(1), Instant::now()).unwrap();
    let rx = eco.subscribe_channel();
    eco.add_cash(d(1), Instant::now()).unwrap();
    assert_eq!(rx.try_iter().count(), 2);
}

#[test]
fn default_keys_drive_the_economy() {
    let (mut eco, _) = fresh();
    let mut hud = RecordingHud::default();
    let now = Instant::now();

    let a = eco.handle_key(KeyChord::shift(Key::Insert), now).unwrap();
    assert_eq!(a, Some(Action::AddCash(d(500))));
    eco.handle_key(KeyChord::plain(Key::Delete), now).unwrap();
    eco.handle_key(KeyChord::plain(Key::Multiply), now).unwrap();
    eco.handle_key(KeyChord::plain(Key::Divide), now).unwrap();
    assert_eq!(eco.balances(), Balances::new(d(800), d(1050)));

    assert_eq!(eco.handle_key(KeyChord::plain(Key::Home), now).unwrap(), None);

    for _ in 0..5 {
        eco.handle_key(KeyChord::plain(Key::Delete), now).unwrap();
    }
    for _ in 0..6 {
        eco.handle_key(KeyChord::shift(Key::Delete), now).unwrap();
    }
    eco.tick(now, &mut hud);
    assert_eq!(hud.subtitles, [NOT_ENOUGH_BANK, NOT_ENOUGH_CASH]);
    assert_eq!(eco.balances(), Balances::new(d(0), d(50)));
}

#[test]
fn tick_draws_annotation_and_plays_sounds() {
    let audio = RecordingAudio::default();
    let mut eco = Economy::open(&Config::default(), Box::new(MemoryStore::new()), Box::new(audio.clone())).unwrap();
    let mut hud = RecordingHud::default();
    let now = Instant::now();

    eco.tick(now, &mut hud);
    assert_eq!(hud.native_cash_hidden, 1);
    assert_eq!(hud.ammo_hidden, 0);
    assert!(hud.texts.is_empty());

    assert!(eco.remove_bank(d(200), now).unwrap().is_removed());
    eco.tick(now, &mut hud);
    assert_eq!(hud.texts, ["Bank: $800.00", "-200.00"]);
    assert_eq!(hud.ammo_hidden, 1);

    eco.add_cash(d(1500), now).unwrap();
    hud.texts.clear();
    eco.tick(now, &mut hud);
    assert_eq!(hud.texts, ["Cash: $2,000.00", "+1,500.00"]);

    eco.show_ui(now);
    hud.texts.clear();
    eco.tick(now, &mut hud);
    assert_eq!(hud.texts, ["Bank: $800.00", "Cash: $2,000.00"]);

    assert_eq!(*audio.0.borrow(), [SoundCue::MONEY_LOST, SoundCue::MONEY_GAINED]);
}

#[test]
fn overlay_hides_after_ttl_and_fade() {
    let (mut eco, _) = fresh();
    let mut hud = RecordingHud::default();
    let t0 = Instant::now();
    eco.add_cash(d(1), t0).unwrap();

    let after = t0 + Duration::from_secs(5);
    for _ in 0..20 {
        eco.tick(after, &mut hud);
    }
    assert!(!eco.is_ui_visible());
    hud.texts.clear();
    eco.tick(after + Duration::from_millis(16), &mut hud);
    assert!(hud.texts.is_empty());
}
