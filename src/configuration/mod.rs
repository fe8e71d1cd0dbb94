use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
};

use log::{debug, info, warn};
use xml::reader::{EventReader, XmlEvent as XmlReaderEvent};

pub mod error;
pub mod strings;
pub mod unit_table;

pub use error::ConfigurationError;
pub use strings::LocalizedStrings;
pub use unit_table::{Kind, UnitTable};

/// Everything a `Formatter` needs: the three unit tables and the localized
/// words it splices into its output.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub speed: UnitTable,
    pub size: UnitTable,
    pub memory: UnitTable,
    pub strings: LocalizedStrings,
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            speed: UnitTable::default_speed(),
            size: UnitTable::default_size(),
            memory: UnitTable::default_memory(),
            strings: LocalizedStrings::new(),
        }
    }

    pub fn units(&self, kind: Kind) -> &UnitTable {
        match kind {
            Kind::Speed => &self.speed,
            Kind::Size => &self.size,
            Kind::Memory => &self.memory,
        }
    }

    pub fn set_units(&mut self, kind: Kind, table: UnitTable) {
        match kind {
            Kind::Speed => self.speed = table,
            Kind::Size => self.size = table,
            Kind::Memory => self.memory = table,
        }
    }

    /// The active tables as `(kind, base, labels)`, in the order speed, size,
    /// memory.
    pub fn unit_dictionary(&self) -> Vec<(Kind, u64, [String; 4])> {
        Kind::ALL
            .iter()
            .map(|kind| {
                let table = self.units(*kind);
                (*kind, table.base(), table.labels().clone())
            })
            .collect()
    }

    pub fn load(filename: &str) -> Result<Configuration, ConfigurationError> {
        let mut real_filename = String::from(filename);
        match dirs::home_dir() {
            Some(home_dir) => match home_dir.to_str() {
                Some(home) => {
                    real_filename = real_filename.replace("~", home);
                }
                None => {}
            },
            None => {}
        }

        let file = File::open(&real_filename).map_err(|why| match why.kind() {
            ErrorKind::NotFound => ConfigurationError::NotFound {
                path: filename.to_string(),
            },
            _ => ConfigurationError::Io {
                path: filename.to_string(),
                source: why,
            },
        })?;

        info!("read formatter configuration from {}", real_filename);
        Self::parse(BufReader::new(file))
    }

    pub fn parse<R: Read>(reader: R) -> Result<Configuration, ConfigurationError> {
        let mut configuration = Configuration::new();

        let mut current_kind: Option<Kind> = None;
        let mut base = 0;
        let mut byte_label = String::new();
        let mut labels: Vec<String> = Vec::new();

        let parser = EventReader::new(reader);
        for e in parser {
            match e? {
                XmlReaderEvent::StartElement {
                    name, attributes, ..
                } => match name.to_string().as_str() {
                    "formatter-configuration" => {
                        for attr in attributes {
                            match attr.name.to_string().as_str() {
                                "locale" => {
                                    configuration.strings.locale = attr.value;
                                }
                                _ => {}
                            }
                        }
                    }
                    "units" => {
                        let mut kind_value = String::new();
                        let mut base_value = None;
                        byte_label = String::from("B");
                        labels.clear();

                        for attr in attributes {
                            match attr.name.to_string().as_str() {
                                "kind" => {
                                    kind_value = attr.value;
                                }
                                "base" => {
                                    base_value = Some(attr.value);
                                }
                                "byte-label" => {
                                    byte_label = attr.value;
                                }
                                _ => {}
                            }
                        }

                        let kind: Kind = kind_value.parse()?;
                        base = match base_value {
                            Some(value) => value
                                .trim()
                                .parse::<u64>()
                                .map_err(|_| ConfigurationError::InvalidNumber(value))?,
                            None => configuration.units(kind).base(),
                        };
                        current_kind = Some(kind);
                    }
                    "unit" => {
                        if current_kind.is_some() {
                            for attr in attributes {
                                match attr.name.to_string().as_str() {
                                    "name" => {
                                        labels.push(attr.value);
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                    "string" => {
                        let mut key = String::new();
                        let mut value = String::new();
                        for attr in attributes {
                            match attr.name.to_string().as_str() {
                                "key" => {
                                    key = attr.value;
                                }
                                "value" => {
                                    value = attr.value;
                                }
                                _ => {}
                            }
                        }

                        if !configuration.strings.set(&key, value) {
                            warn!("ignoring unknown string key '{}'", key);
                        }
                    }
                    _ => {}
                },
                XmlReaderEvent::EndElement { name } => match name.to_string().as_str() {
                    "units" => {
                        if let Some(kind) = current_kind.take() {
                            let table =
                                UnitTable::from_labels(kind, base, byte_label.clone(), &labels)?;
                            debug!(
                                "{} units: base {}, labels {:?}",
                                kind,
                                table.base(),
                                table.labels()
                            );
                            configuration.set_units(kind, table);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(configuration)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
