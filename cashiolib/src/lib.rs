//! cashiolib — банк и наличные для игрового скрипта: счета, отложенное
//! сохранение в XML и затухающий оверлей с балансами.

pub mod config;
pub mod debounce;
pub mod economy;
pub mod error;
pub mod events;
pub mod input;
pub mod ledger;
pub mod model;
pub mod overlay;
pub mod store;
pub mod traits;

pub mod formats {
    pub mod xml;
}
