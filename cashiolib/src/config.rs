//! Настройки: путь сохранения, стартовые балансы, тайминги, горячие клавиши.
//!
//! Файл конфигурации в XML, любое поле можно опустить:
//! ```xml
//! <Config>
//!   <SavePath>scripts/TrustlessHoldings/data.xml</SavePath>
//!   <StartingBank>1000</StartingBank>
//!   <StartingCash>500</StartingCash>
//!   <AnnotationTtlMs>5000</AnnotationTtlMs>
//!   <SaveDelayMs>1000</SaveDelayMs>
//!   <FadeSteps>20</FadeSteps>
//!   <Bindings>
//!     <Binding><Chord>shift+insert</Chord><Action>AddCash</Action><Amount>500</Amount></Binding>
//!     <Binding><Chord>z</Chord><Action>ShowBoth</Action></Binding>
//!   </Bindings>
//! </Config>
//! ```

use crate::{
    debounce::DEFAULT_SAVE_DELAY,
    error::{CashioError, Result},
    input::{Action, Bindings, KeyChord},
    overlay::{DEFAULT_ANNOTATION_TTL, DEFAULT_FADE_STEPS},
    store::DEFAULT_SAVE_PATH,
};
use quick_xml::de::from_reader;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub save_path: PathBuf,
    pub starting_bank: Decimal,
    pub starting_cash: Decimal,
    pub annotation_ttl: Duration,
    pub save_delay: Duration,
    pub fade_steps: u8,
    pub bindings: Bindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            starting_bank: Decimal::new(1000, 0),
            starting_cash: Decimal::new(500, 0),
            annotation_ttl: DEFAULT_ANNOTATION_TTL,
            save_delay: DEFAULT_SAVE_DELAY,
            fade_steps: DEFAULT_FADE_STEPS,
            bindings: Bindings::default(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct XmlConfig {
    #[serde(rename = "SavePath")]
    save_path: Option<String>,
    #[serde(rename = "StartingBank")]
    starting_bank: Option<String>,
    #[serde(rename = "StartingCash")]
    starting_cash: Option<String>,
    #[serde(rename = "AnnotationTtlMs")]
    annotation_ttl_ms: Option<u64>,
    #[serde(rename = "SaveDelayMs")]
    save_delay_ms: Option<u64>,
    #[serde(rename = "FadeSteps")]
    fade_steps: Option<u8>,
    #[serde(rename = "Bindings")]
    bindings: Option<XmlBindings>,
}

#[derive(Deserialize, Debug, Default)]
struct XmlBindings {
    #[serde(rename = "Binding", default)]
    binding: Vec<XmlBinding>,
}

#[derive(Deserialize, Debug)]
struct XmlBinding {
    #[serde(rename = "Chord")]
    chord: String,
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Amount", default)]
    amount: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(r: R) -> Result<Self> {
        let x: XmlConfig = from_reader(r).map_err(|e| CashioError::Xml(format!("{e}")))?;
        let mut cfg = Config::default();

        if let Some(p) = x.save_path {
            cfg.save_path = PathBuf::from(p);
        }
        if let Some(s) = x.starting_bank {
            cfg.starting_bank = parse_amount("StartingBank", &s)?;
        }
        if let Some(s) = x.starting_cash {
            cfg.starting_cash = parse_amount("StartingCash", &s)?;
        }
        if let Some(ms) = x.annotation_ttl_ms {
            cfg.annotation_ttl = Duration::from_millis(ms);
        }
        if let Some(ms) = x.save_delay_ms {
            cfg.save_delay = Duration::from_millis(ms);
        }
        if let Some(n) = x.fade_steps {
            if n == 0 {
                return Err(CashioError::Parse("FadeSteps must be at least 1".into()));
            }
            cfg.fade_steps = n;
        }
        if let Some(b) = x.bindings {
            cfg.bindings = bindings_from_xml(b)?;
        }

        Ok(cfg)
    }
}

fn bindings_from_xml(x: XmlBindings) -> Result<Bindings> {
    let mut bindings = Bindings::empty();
    for b in x.binding {
        let chord: KeyChord = b.chord.parse()?;
        let amount = b
            .amount
            .as_deref()
            .map(|a| parse_amount("Amount", a))
            .transpose()?;
        bindings.bind(chord, Action::from_parts(b.action.trim(), amount)?);
    }
    Ok(bindings)
}

fn parse_amount(field: &str, s: &str) -> Result<Decimal> {
    let d: Decimal = s
        .trim()
        .parse()
        .map_err(|e| CashioError::Parse(format!("{field}: {e}")))?;
    if d < Decimal::ZERO {
        return Err(CashioError::InvalidAmount(d));
    }
    Ok(d)
}
