use cashiolib::{
    config::Config,
    economy::Economy,
    error::{CashioError, Result},
    input::KeyChord,
    model::{format_money, SoundCue},
    overlay::{Resolution, TextDraw},
    store::XmlFileStore,
    traits::{Audio, BalanceStore, Hud},
};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "cashio", version, about = "Банк и наличные: безголовый хост для cashiolib")]
struct Cli {
    /// Файл конфигурации (XML)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Файл сохранения (перекрывает SavePath из конфига)
    #[arg(short = 's', long = "save", global = true)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Показать сохранённые балансы
    Status,

    /// Прогнать сценарий (`key shift+insert`, `wait 1500`, ...) на виртуальных кадрах
    Run {
        /// Файл сценария (по умолчанию stdin)
        #[arg(short = 'i', long = "script")]
        script: Option<PathBuf>,

        /// Кадров в секунду
        #[arg(long, default_value_t = 60)]
        fps: u32,

        #[arg(long, default_value_t = 1920.0)]
        width: f32,

        #[arg(long, default_value_t = 1080.0)]
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Key(KeyChord),
    Wait(Duration),
    Add(String, Decimal),
    Remove(String, Decimal),
    Show,
    Status,
}

fn parse_step(line: &str) -> Result<Option<Step>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let amount = |s: &str| -> Result<Decimal> {
        s.parse().map_err(|e| CashioError::Parse(format!("amount {s}: {e}")))
    };

    let step = match words.as_slice() {
        ["key", chord] => Step::Key(chord.parse()?),
        ["wait", ms] => Step::Wait(Duration::from_millis(
            ms.parse().map_err(|e| CashioError::Parse(format!("wait {ms}: {e}")))?,
        )),
        ["add", acct @ ("bank" | "cash"), a] => Step::Add(acct.to_string(), amount(*a)?),
        ["remove", acct @ ("bank" | "cash"), a] => Step::Remove(acct.to_string(), amount(*a)?),
        ["show"] => Step::Show,
        ["status"] => Step::Status,
        _ => return Err(CashioError::Parse(format!("bad script line: {line}"))),
    };
    Ok(Some(step))
}

/// Prints the overlay only when the drawn texts change, not every frame.
struct ConsoleHud {
    res: Resolution,
    frame: Vec<String>,
    shown: Vec<String>,
}

impl ConsoleHud {
    fn new(res: Resolution) -> Self {
        Self { res, frame: Vec::new(), shown: Vec::new() }
    }

    fn end_frame(&mut self, at: Duration) {
        if self.frame != self.shown {
            if self.frame.is_empty() {
                println!("[{:>8.3}s] overlay hidden", at.as_secs_f32());
            } else {
                println!("[{:>8.3}s] overlay: {}", at.as_secs_f32(), self.frame.join(" | "));
            }
            std::mem::swap(&mut self.frame, &mut self.shown);
        }
        self.frame.clear();
    }
}

impl Hud for ConsoleHud {
    fn resolution(&self) -> Resolution {
        self.res
    }

    fn draw_text(&mut self, text: &TextDraw) {
        self.frame.push(text.text.clone());
    }

    fn subtitle(&mut self, message: &str) {
        println!("[subtitle] {message}");
    }
}

struct LogAudio;

impl Audio for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!("sound {} ({})", cue.name, cue.set);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(save) = cli.save {
        config.save_path = save;
    }
    info!("save file: {}", config.save_path.display());
    let store = XmlFileStore::new(config.save_path.clone());

    match cli.command {
        Cmd::Status => {
            match store.load()? {
                Some(b) => println!("Bank: ${}\nCash: ${}", format_money(b.bank), format_money(b.cash)),
                None => println!("no save at {}", store.path().display()),
            }
            Ok(())
        }
        Cmd::Run { script, fps, width, height } => {
            let reader: Box<dyn BufRead> = match script {
                Some(path) => Box::new(BufReader::new(File::open(path)?)),
                None => Box::new(BufReader::new(io::stdin())),
            };
            let mut eco = Economy::open(&config, Box::new(store), Box::new(LogAudio))?;
            run(&mut eco, reader, fps.max(1), Resolution::new(width, height))
        }
    }
}

/// Plays the script, then saves whatever happened, even if the script failed.
fn run(eco: &mut Economy, reader: impl BufRead, fps: u32, res: Resolution) -> Result<()> {
    let played = play(eco, reader, fps, res);
    let saved = eco.save_now();
    match &saved {
        Ok(()) => println!("saved: bank {} cash {}", format_money(eco.bank()), format_money(eco.cash())),
        Err(e) => warn!("final save failed: {e}"),
    }
    played.and(saved)
}

fn play(eco: &mut Economy, reader: impl BufRead, fps: u32, res: Resolution) -> Result<()> {
    let frame = Duration::from_secs(1) / fps;
    let start = Instant::now();
    let mut elapsed = Duration::ZERO;
    let mut hud = ConsoleHud::new(res);

    // game loop: commands land between frames
    for line in reader.lines() {
        let Some(step) = parse_step(&line?)? else { continue };
        let now = start + elapsed;
        match step {
            Step::Key(chord) => {
                if eco.handle_key(chord, now)?.is_none() {
                    println!("[{:>8.3}s] {chord} is not bound", elapsed.as_secs_f32());
                }
            }
            Step::Add(acct, a) => {
                if acct == "bank" {
                    eco.add_bank(a, now)?;
                } else {
                    eco.add_cash(a, now)?;
                }
            }
            Step::Remove(acct, a) => {
                let removed = if acct == "bank" { eco.remove_bank(a, now)? } else { eco.remove_cash(a, now)? };
                if !removed.is_removed() {
                    println!("[{:>8.3}s] not enough {acct}", elapsed.as_secs_f32());
                }
            }
            Step::Show => eco.show_ui(now),
            Step::Status => println!(
                "[{:>8.3}s] bank {} cash {}",
                elapsed.as_secs_f32(),
                format_money(eco.bank()),
                format_money(eco.cash())
            ),
            Step::Wait(d) => {
                let until = elapsed + d;
                while elapsed < until {
                    elapsed += frame;
                    eco.tick(start + elapsed, &mut hud);
                    hud.end_frame(elapsed);
                }
            }
        }
    }
    Ok(())
}
