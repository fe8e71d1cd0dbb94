use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// CLDR cardinal plural rules for integer counts, grouped by the locale
/// families that share them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluralRule {
    /// en, de, nl, sv, it, es, ...: one for 1.
    OneOther,
    /// fr, pt-BR: one for 0 and 1.
    ZeroOneOther,
    /// ru, uk, be
    EastSlavic,
    Polish,
    CzechSlovak,
    Arabic,
    /// ja, zh, ko, vi, th, ...: a single form.
    NoPlural,
}

impl PluralRule {
    pub fn for_locale(tag: &str) -> PluralRule {
        lazy_static! {
            static ref REGEX_LOCALE: Regex =
                Regex::new(r"^([A-Za-z]{2,3})(?:[-_]([A-Za-z]{2}|[0-9]{3}))?").unwrap();
        }

        let captures = match REGEX_LOCALE.captures(tag.trim()) {
            Some(captures) => captures,
            None => return PluralRule::OneOther,
        };
        let language = captures[1].to_ascii_lowercase();
        let region = captures
            .get(2)
            .map(|region| region.as_str().to_ascii_uppercase());

        match language.as_str() {
            "fr" | "ff" | "kab" => PluralRule::ZeroOneOther,
            "pt" if region.as_deref() == Some("BR") => PluralRule::ZeroOneOther,
            "ru" | "uk" | "be" => PluralRule::EastSlavic,
            "pl" => PluralRule::Polish,
            "cs" | "sk" => PluralRule::CzechSlovak,
            "ar" => PluralRule::Arabic,
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "my" | "km" | "tr" => {
                PluralRule::NoPlural
            }
            _ => PluralRule::OneOther,
        }
    }

    pub fn category(&self, n: u64) -> PluralCategory {
        let mod10 = n % 10;
        let mod100 = n % 100;

        match self {
            PluralRule::OneOther => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            PluralRule::ZeroOneOther => {
                if n <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            PluralRule::EastSlavic => {
                if mod10 == 1 && mod100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::CzechSlovak => match n {
                1 => PluralCategory::One,
                2..=4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            PluralRule::Arabic => match n {
                0 => PluralCategory::Zero,
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                _ if (3..=10).contains(&mod100) => PluralCategory::Few,
                _ if (11..=99).contains(&mod100) => PluralCategory::Many,
                _ => PluralCategory::Other,
            },
            PluralRule::NoPlural => PluralCategory::Other,
        }
    }
}

/// The word forms of one message, one per plural category. Categories
/// without a form use the `other` form.
#[derive(Clone, Debug, PartialEq)]
pub struct PluralForms {
    zero: Option<String>,
    one: Option<String>,
    two: Option<String>,
    few: Option<String>,
    many: Option<String>,
    other: String,
}

impl PluralForms {
    pub fn new(other: impl Into<String>) -> PluralForms {
        PluralForms {
            zero: None,
            one: None,
            two: None,
            few: None,
            many: None,
            other: other.into(),
        }
    }

    /// The usual English pair of singular and plural.
    pub fn english(singular: impl Into<String>, plural: impl Into<String>) -> PluralForms {
        PluralForms::new(plural).one(singular)
    }

    pub fn zero(mut self, form: impl Into<String>) -> Self {
        self.zero = Some(form.into());
        self
    }

    pub fn one(mut self, form: impl Into<String>) -> Self {
        self.one = Some(form.into());
        self
    }

    pub fn two(mut self, form: impl Into<String>) -> Self {
        self.two = Some(form.into());
        self
    }

    pub fn few(mut self, form: impl Into<String>) -> Self {
        self.few = Some(form.into());
        self
    }

    pub fn many(mut self, form: impl Into<String>) -> Self {
        self.many = Some(form.into());
        self
    }

    pub fn get(&self, category: PluralCategory) -> &str {
        let form = match category {
            PluralCategory::Zero => &self.zero,
            PluralCategory::One => &self.one,
            PluralCategory::Two => &self.two,
            PluralCategory::Few => &self.few,
            PluralCategory::Many => &self.many,
            PluralCategory::Other => return &self.other,
        };
        form.as_deref().unwrap_or(&self.other)
    }
}
