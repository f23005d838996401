//! Configuration file checks (`config --check`).

use crate::models::Screen;
use serde_yaml::Value;

const KNOWN_KEYS: &[&str] = &[
    "page_size",
    "page_sizes",
    "separator_char",
    "max_cell_width",
    "default_seed",
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Known keys absent from the file (defaults apply).
    pub missing: Vec<String>,
    /// Keys the program does not know.
    pub unknown: Vec<String>,
    /// `page_sizes` entries that do not name a screen.
    pub bad_screens: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty() && self.bad_screens.is_empty()
    }
}

pub fn check_yaml(content: &str) -> CheckReport {
    let mut report = CheckReport::default();
    let value: Value = serde_yaml::from_str(content).unwrap_or(Value::Null);
    let Some(map) = value.as_mapping() else {
        report.missing = KNOWN_KEYS.iter().map(|k| k.to_string()).collect();
        return report;
    };

    for key in KNOWN_KEYS {
        if !map.contains_key(Value::String(key.to_string())) {
            report.missing.push(key.to_string());
        }
    }

    for key in map.keys().filter_map(Value::as_str) {
        if !KNOWN_KEYS.contains(&key) {
            report.unknown.push(key.to_string());
        }
    }

    if let Some(sizes) = map
        .get(Value::String("page_sizes".into()))
        .and_then(Value::as_mapping)
    {
        for key in sizes.keys().filter_map(Value::as_str) {
            if key.parse::<Screen>().is_err() {
                report.bad_screens.push(key.to_string());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_and_unknown_keys() {
        let report = check_yaml("page_size: 5\ncolour: blue\npage_sizes:\n  colours: 3\n");
        assert!(report.missing.contains(&"separator_char".to_string()));
        assert!(!report.missing.contains(&"page_size".to_string()));
        assert_eq!(report.unknown, ["colour"]);
        assert_eq!(report.bad_screens, ["colours"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn full_default_file_is_clean() {
        let yaml = serde_yaml::to_string(&crate::config::Config::default()).unwrap();
        assert!(check_yaml(&yaml).is_clean());
    }
}
