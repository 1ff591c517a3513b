//! XML сохранения: <BankData><BankBalance/><CashBalance/></BankData>
//!
//! Совместим с файлами, которые писал старый плагин (лишние атрибуты вроде
//! xmlns:xsi при чтении игнорируются).

use crate::{
    error::{CashioError, Result},
    model::Balances,
};
use quick_xml::{de::from_reader, se::to_string};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

const DECL: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "BankData")]
struct XmlBankData {
    #[serde(rename = "BankBalance", with = "rust_decimal::serde::str")]
    bank_balance: Decimal,
    #[serde(rename = "CashBalance", with = "rust_decimal::serde::str")]
    cash_balance: Decimal,
}

pub struct BankDataXml;

impl crate::traits::ReadFormat for BankDataXml {
    fn read<R: BufRead>(r: R) -> Result<Balances> {
        let x: XmlBankData = from_reader(r).map_err(|e| CashioError::Xml(format!("{e}")))?;

        if x.bank_balance < Decimal::ZERO || x.cash_balance < Decimal::ZERO {
            return Err(CashioError::Parse(format!(
                "negative balance in save: bank {}, cash {}",
                x.bank_balance, x.cash_balance
            )));
        }

        Ok(Balances::new(x.bank_balance, x.cash_balance))
    }
}

impl crate::traits::WriteFormat for BankDataXml {
    fn write<W: Write>(mut w: W, balances: &Balances) -> Result<()> {
        let x = XmlBankData {
            bank_balance: balances.bank,
            cash_balance: balances.cash,
        };

        let s = to_string(&x).map_err(|e| CashioError::Xml(format!("{e}")))?;
        w.write_all(DECL.as_bytes())?;
        w.write_all(s.as_bytes())?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
