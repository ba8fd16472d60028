use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::dom;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FooterConfig {
    pub selector: String,
    pub organisation: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            selector: ".footer-bottom p".to_string(),
            organisation: "Care Point Hospital".to_string(),
        }
    }
}

pub fn copyright(year: i32, organisation: &str) -> String {
    format!("© {} {}. All rights reserved.", year, organisation)
}

/// Keep the footer's copyright year current. Returns false if there is no footer.
pub fn install(document: &Document, config: &FooterConfig) -> bool {
    match dom::query_one(document, &config.selector) {
        Some(line) => {
            line.set_text(&copyright(Local::now().year(), &config.organisation));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copyright_line() {
        assert_eq!(
            copyright(2026, "Care Point Hospital"),
            "© 2026 Care Point Hospital. All rights reserved."
        );
    }
}
