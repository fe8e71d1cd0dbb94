#[macro_use]
extern crate lazy_static;

pub mod configuration;
pub mod formatter;
pub mod helper;
pub mod peer;
pub mod plural;

pub use configuration::{Configuration, ConfigurationError, Kind, LocalizedStrings, UnitTable};
pub use formatter::{configure_units, global, Formatter, RATIO_INF, RATIO_NA};
pub use plural::{PluralCategory, PluralForms, PluralRule};
