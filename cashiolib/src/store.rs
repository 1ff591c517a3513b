//! Хранилища балансов: XML-файл на диске и память (для тестов и dry-run).

use crate::{
    error::Result,
    formats::xml::BankDataXml,
    model::Balances,
    traits::{BalanceStore, ReadFormat, WriteFormat},
};
use std::{
    cell::RefCell,
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

pub const DEFAULT_SAVE_PATH: &str = "scripts/TrustlessHoldings/data.xml";

#[derive(Debug, Clone)]
pub struct XmlFileStore {
    path: PathBuf,
}

impl XmlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for XmlFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_PATH)
    }
}

impl BalanceStore for XmlFileStore {
    fn load(&self) -> Result<Option<Balances>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        BankDataXml::read(BufReader::new(file)).map(Some)
    }

    fn save(&self, balances: &Balances) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut w = BufWriter::new(File::create(&self.path)?);
        BankDataXml::write(&mut w, balances)?;
        w.flush()?;
        Ok(())
    }
}

/// Shared in-memory slot; clones see the same data and save count.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    saved: Option<Balances>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(balances: Balances) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().saved = Some(balances);
        store
    }

    pub fn saved(&self) -> Option<Balances> {
        self.inner.borrow().saved
    }

    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl BalanceStore for MemoryStore {
    fn load(&self) -> Result<Option<Balances>> {
        Ok(self.saved())
    }

    fn save(&self, balances: &Balances) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.saved = Some(*balances);
        inner.saves += 1;
        Ok(())
    }
}
