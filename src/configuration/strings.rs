/// Words the formatter splices into its output. They come already translated
/// from whatever localization lookup the caller uses.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalizedStrings {
    pub none: String,
    pub not_available: String,
    pub infinity: String,
    pub today: String,
    pub yesterday: String,
    pub tomorrow: String,
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub am: String,
    pub pm: String,
    /// chrono `strftime` pattern for dates outside today/yesterday/tomorrow.
    pub date_format: String,
    pub thousands_separator: String,
    pub locale: String,
}

impl LocalizedStrings {
    pub fn new() -> LocalizedStrings {
        LocalizedStrings {
            none: String::from("None"),
            not_available: String::from("N/A"),
            infinity: String::from("\u{221e}"),
            today: String::from("Today"),
            yesterday: String::from("Yesterday"),
            tomorrow: String::from("Tomorrow"),
            days: String::from("days"),
            hours: String::from("hr"),
            minutes: String::from("min"),
            seconds: String::from("seconds"),
            am: String::from("AM"),
            pm: String::from("PM"),
            date_format: String::from("%a %b %d %Y"),
            thousands_separator: String::from(","),
            locale: String::from("en"),
        }
    }

    /// Sets the string stored under a settings-file key. Returns `false` for
    /// keys that don't exist.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "none" => &mut self.none,
            "not-available" => &mut self.not_available,
            "infinity" => &mut self.infinity,
            "today" => &mut self.today,
            "yesterday" => &mut self.yesterday,
            "tomorrow" => &mut self.tomorrow,
            "days" => &mut self.days,
            "hours" => &mut self.hours,
            "minutes" => &mut self.minutes,
            "seconds" => &mut self.seconds,
            "am" => &mut self.am,
            "pm" => &mut self.pm,
            "date-format" => &mut self.date_format,
            "thousands-separator" => &mut self.thousands_separator,
            "locale" => &mut self.locale,
            _ => return false,
        };
        *slot = value;
        true
    }
}

impl Default for LocalizedStrings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_key() {
        let mut strings = LocalizedStrings::new();
        assert!(strings.set("today", String::from("Heute")));
        assert_eq!(strings.today, "Heute");
    }

    #[test]
    fn test_set_unknown_key() {
        let mut strings = LocalizedStrings::new();
        assert!(!strings.set("weekday", String::from("Montag")));
        assert_eq!(strings, LocalizedStrings::new());
    }
}
