use cashiolib::{
    model::{Account, Balances, Rgb},
    overlay::{layout, FadePhase, OverlayController, OverlayFrame, Resolution},
};
use rust_decimal::Decimal;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn fades_in_holds_then_hides() {
    let t0 = Instant::now();
    let mut o = OverlayController::default();
    o.show_change("+500.00", Rgb::GAIN, Account::Cash, t0);
    assert!(o.show_cash() && !o.show_bank());
    assert_eq!(o.alpha(), 0.0);

    let mut now = t0;
    for i in 1..=20 {
        now += FRAME;
        let f = o.tick(now).expect("drawn while fading in");
        assert!(f.alpha > 0.0 && f.alpha <= 1.0, "tick {i}: {}", f.alpha);
    }
    assert_eq!(o.alpha(), 1.0);
    assert_eq!(o.phase(now), FadePhase::Visible);

    // saturates
    o.tick(now + FRAME).unwrap();
    assert_eq!(o.alpha(), 1.0);

    // expiry: exactly 20 ticks drain it
    let after = t0 + Duration::from_secs(5);
    assert_eq!(o.phase(after), FadePhase::FadingOut);
    for _ in 0..19 {
        assert!(o.tick(after).is_some());
    }
    assert!(o.tick(after).is_none());
    assert!(!o.show_bank() && !o.show_cash());
    assert_eq!(o.phase(after), FadePhase::Hidden);
    assert!(o.tick(after).is_none());
}

#[test]
fn alpha_stays_in_unit_range() {
    let t0 = Instant::now();
    let mut o = OverlayController::new(Duration::from_millis(300), 7);
    let mut now = t0;
    for i in 0..2000u32 {
        if i % 150 == 0 {
            o.show_both(now);
        }
        if i % 400 == 75 {
            o.show_change("-50.00", Rgb::LOSS, Account::Bank, now);
        }
        o.tick(now);
        assert!((0.0..=1.0).contains(&o.alpha()));
        now += FRAME;
    }
}

#[test]
fn nothing_is_drawn_before_first_show() {
    let mut o = OverlayController::default();
    assert!(o.tick(Instant::now()).is_none());
    assert!(!o.is_visible());
}

#[test]
fn show_both_clears_annotation() {
    let t0 = Instant::now();
    let mut o = OverlayController::default();
    o.show_change("+1.00", Rgb::GAIN, Account::Bank, t0);
    o.show_both(t0);
    let f = o.tick(t0).unwrap();
    assert!(f.show_bank && f.show_cash);
    assert_eq!(f.annotation, None);
    assert_eq!(o.phase(t0), FadePhase::FadingIn);
}

fn frame(show_bank: bool, show_cash: bool, annotation: bool) -> OverlayFrame {
    OverlayFrame {
        show_bank,
        show_cash,
        alpha: 0.5,
        annotation: annotation.then(|| ("-200.00".to_string(), Rgb::LOSS)),
    }
}

#[test]
fn layout_orders_bank_cash_annotation() {
    let b = Balances::new(Decimal::new(12345, 1), Decimal::new(500, 0));
    let res = Resolution::new(1920.0, 1080.0);

    let texts = layout(&frame(true, true, true), b, res);
    let lines: Vec<&str> = texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(lines, ["Bank: $1,234.50", "Cash: $500.00", "-200.00"]);
    assert!(texts[0].y < texts[1].y && texts[1].y < texts[2].y);
    assert!(texts.iter().all(|t| t.x == texts[0].x));

    assert_eq!(texts[0].color, Rgb::BANK.with_alpha(0.5));
    assert_eq!(texts[1].color, Rgb::CASH.with_alpha(0.5));
    assert_eq!(texts[2].color.r, 255);
    assert_eq!(texts[2].color.a, 127);
}

#[test]
fn cash_takes_bank_slot_when_bank_hidden() {
    let b = Balances::new(Decimal::new(1, 0), Decimal::new(2, 0));
    let res = Resolution::new(1280.0, 720.0);

    let both = layout(&frame(true, true, false), b, res);
    let cash_only = layout(&frame(false, true, true), b, res);
    assert_eq!(cash_only.len(), 2);
    assert_eq!(cash_only[0].y, both[0].y);
    assert!(cash_only[1].y > cash_only[0].y);

    let bank_only = layout(&frame(true, false, true), b, res);
    assert_eq!(bank_only[0].text, "Bank: $1.00");
    assert!(bank_only[1].y > bank_only[0].y);
}

#[test]
fn long_hold_at_max_fade_steps_does_not_wrap() {
    let t0 = Instant::now();
    let mut o = OverlayController::new(Duration::from_secs(60), u8::MAX);
    o.show_change("+1.00", Rgb::GAIN, Account::Bank, t0);

    let mut now = t0;
    for _ in 0..600 {
        now += FRAME;
        o.tick(now).expect("drawn while live");
    }
    assert_eq!(o.alpha(), 1.0);
    assert_eq!(o.phase(now), FadePhase::Visible);
}
