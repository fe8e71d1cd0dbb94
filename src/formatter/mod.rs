use std::sync::{Arc, RwLock};

use log::info;

use crate::configuration::{Configuration, LocalizedStrings, UnitTable};
use crate::plural::{PluralForms, PluralRule};

pub mod time;
pub mod truncate;

use truncate::{group_thousands, to_trunc_fixed};

/// Ratio of a torrent that has neither uploaded nor downloaded anything.
pub const RATIO_NA: f64 = -1.0;
/// Ratio of a torrent that uploaded something but downloaded nothing.
pub const RATIO_INF: f64 = -2.0;

lazy_static! {
    static ref GLOBAL_FORMATTER: RwLock<Arc<Formatter>> =
        RwLock::new(Arc::new(Formatter::default()));
}

/// Replaces the process-wide formatter. Until this is called, `global()`
/// hands out a formatter built from the default configuration.
pub fn configure_units(configuration: Configuration) {
    info!(
        "configuring units: speed {:?}, size {:?}, memory {:?}",
        configuration.speed.labels(),
        configuration.size.labels(),
        configuration.memory.labels()
    );
    let formatter = Arc::new(Formatter::new(configuration));
    match GLOBAL_FORMATTER.write() {
        Ok(mut global) => *global = formatter,
        Err(poisoned) => *poisoned.into_inner() = formatter,
    }
}

pub fn global() -> Arc<Formatter> {
    match GLOBAL_FORMATTER.read() {
        Ok(global) => Arc::clone(&global),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}

/// Turns raw transfer statistics into display strings.
///
/// All inputs are taken as they come: negative byte counts or durations are
/// formatted, not clamped.
#[derive(Clone, Debug)]
pub struct Formatter {
    configuration: Configuration,
    plural_rule: PluralRule,
}

impl Formatter {
    pub fn new(configuration: Configuration) -> Formatter {
        let plural_rule = PluralRule::for_locale(&configuration.strings.locale);
        Formatter {
            configuration,
            plural_rule,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn strings(&self) -> &LocalizedStrings {
        &self.configuration.strings
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Formats a file or disk size.
    pub fn format_size(&self, bytes: i64) -> String {
        Self::format_bytes(&self.configuration.size, bytes)
    }

    /// Formats an amount of memory, usually with binary units.
    pub fn format_memory(&self, bytes: i64) -> String {
        Self::format_bytes(&self.configuration.memory, bytes)
    }

    fn format_bytes(units: &UnitTable, bytes: i64) -> String {
        let size = bytes as f64;
        let tier = match units.tier_of(size) {
            Some(tier) => tier,
            None => return format!("{} {}", bytes, units.byte_label()),
        };

        let converted_size = size / units.divisor(tier);

        // at least 3 digits and at least 1 decimal
        let precision = if converted_size <= 9.995 { 2 } else { 1 };
        format!(
            "{} {}",
            to_trunc_fixed(converted_size, precision),
            units.label(tier)
        )
    }

    /// Converts bytes per second into whole speed-base units per second.
    pub fn to_kbps(&self, bytes_per_second: f64) -> f64 {
        (bytes_per_second / self.configuration.speed.base() as f64).floor()
    }

    pub fn format_speed_bps(&self, bytes_per_second: f64) -> String {
        self.format_speed_kbps(self.to_kbps(bytes_per_second))
    }

    pub fn format_speed_kbps(&self, kbps: f64) -> String {
        let units = &self.configuration.speed;
        let kilo = units.base() as f64;
        let mut speed = kbps;

        if speed <= 999.95 {
            return format!("{} {}", to_trunc_fixed(speed, 1), units.label(0));
        }

        speed /= kilo;

        if speed <= 99.995 {
            return format!("{} {}", to_trunc_fixed(speed, 2), units.label(1));
        }
        if speed <= 999.95 {
            return format!("{} {}", to_trunc_fixed(speed, 1), units.label(1));
        }

        speed /= kilo;
        format!("{} {}", to_trunc_fixed(speed, 2), units.label(2))
    }

    /// Shows more fraction digits for small values: `9.99`, `12.3`, `150`.
    pub fn format_percent(&self, x: f64) -> String {
        if x < 10.0 {
            to_trunc_fixed(x, 2)
        } else if x < 100.0 {
            to_trunc_fixed(x, 1)
        } else {
            to_trunc_fixed(x, 0)
        }
    }

    pub fn format_ratio(&self, x: f64) -> String {
        if x == RATIO_NA {
            return self.strings().none.clone();
        }
        if x == RATIO_INF {
            return self.strings().infinity.clone();
        }
        self.format_percent(x)
    }

    /// English-only: appends `s` unless `count` is exactly one.
    pub fn pluralize(&self, count: i64, word: &str) -> String {
        if count == 1 {
            format!("{} {}", count, word)
        } else {
            format!("{} {}s", count, word)
        }
    }

    /// `count` with thousands separators, followed by the plural form the
    /// configured locale picks for it.
    pub fn count_string(&self, count: i64, forms: &PluralForms) -> String {
        let category = self.plural_rule.category(count.unsigned_abs());
        format!(
            "{} {}",
            group_thousands(count, &self.strings().thousands_separator),
            forms.get(category)
        )
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Configuration::new())
    }
}
