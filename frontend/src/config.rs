use std::str::FromStr;

use log::Level;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use web_sys::Document;

use crate::components::overlay::OverlayProps;
use crate::dom;
use crate::effects::anchors::AnchorConfig;
use crate::effects::cards::CardsConfig;
use crate::effects::footer::FooterConfig;
use crate::effects::form::FormConfig;
use crate::effects::menu::MenuConfig;
use crate::effects::navbar::{ActiveLinkConfig, NavbarConfig};
use crate::effects::page_load::PageLoadConfig;
use crate::effects::parallax::ParallaxConfig;
use crate::effects::reveal::{default_reveals, inner_reveals, landing_reveals, LazyImageConfig, RevealConfig};
use crate::effects::ripple::RippleConfig;
use crate::effects::stats::{CountersConfig, SectionCounterConfig, StatCounterConfig};
use crate::error::{EffectsError, Result};

/// Id of the optional `<script type="application/json">` block a template can
/// use to pick a profile and override any of its values.
pub const CONFIG_ELEMENT_ID: &str = "page-effects-config";

/// `<body>` attribute naming the profile when the page has no config block.
pub const PROFILE_ATTR: &str = "data-effects-profile";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // local builds
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Which page's behaviour set to start from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// The public landing page (`#navbar`, `#mobileToggle`).
    Landing,
    /// Bootstrap inner pages (`.navbar-collapse`, stats section, forms).
    Inner,
    /// Both pages' behaviour at once.
    #[default]
    All,
}

impl Profile {
    /// Guess from the page's markup: the landing navbar or the Bootstrap collapse.
    pub fn detect(exists: impl Fn(&str) -> bool) -> Self {
        if exists("#navbar") || exists("#mobileToggle") {
            Profile::Landing
        } else if exists(".navbar-collapse") || exists(".navbar-toggler") {
            Profile::Inner
        } else {
            Profile::All
        }
    }

    pub fn config(self) -> EffectsConfig {
        match self {
            Profile::Landing => EffectsConfig::landing(),
            Profile::Inner => EffectsConfig::inner(),
            Profile::All => EffectsConfig::default(),
        }
    }
}

impl FromStr for Profile {
    type Err = EffectsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "landing" => Ok(Profile::Landing),
            "inner" => Ok(Profile::Inner),
            "all" => Ok(Profile::All),
            other => Err(EffectsError::UnknownProfile(other.to_string())),
        }
    }
}

/// Console greeting printed once everything is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Banner {
    Welcome,
    Loaded,
    Silent,
}

/// Everything the page effects bind to. A blank selector turns its
/// behaviour off; anything a page doesn't have is skipped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub profile: Profile,
    pub navbar: NavbarConfig,
    pub active_links: ActiveLinkConfig,
    pub menus: Vec<MenuConfig>,
    pub anchors: AnchorConfig,
    pub reveals: Vec<RevealConfig>,
    pub counters: CountersConfig,
    pub lazy_images: LazyImageConfig,
    pub parallax: ParallaxConfig,
    pub cards: CardsConfig,
    pub ripple: RippleConfig,
    pub overlay: OverlayProps,
    pub footer: FooterConfig,
    pub appointment_form: FormConfig,
    pub page_load: PageLoadConfig,
    pub banner: Banner,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            profile: Profile::All,
            navbar: NavbarConfig::default(),
            active_links: ActiveLinkConfig::default(),
            menus: vec![MenuConfig::default(), MenuConfig::bootstrap()],
            anchors: AnchorConfig::default(),
            reveals: default_reveals(),
            counters: CountersConfig::default(),
            lazy_images: LazyImageConfig::default(),
            parallax: ParallaxConfig::default(),
            cards: CardsConfig::default(),
            ripple: RippleConfig::default(),
            overlay: OverlayProps::default(),
            footer: FooterConfig::default(),
            appointment_form: FormConfig::default(),
            page_load: PageLoadConfig::default(),
            banner: Banner::Welcome,
        }
    }
}

/// Recursively lay `overrides` over `base`. Objects merge key by key,
/// everything else (arrays included) replaces.
fn merge(base: &mut Value, overrides: Value) {
    match overrides {
        Value::Object(overrides) if base.is_object() => {
            if let Some(fields) = base.as_object_mut() {
                for (key, value) in overrides {
                    merge(fields.entry(key).or_insert(Value::Null), value);
                }
            }
        }
        other => *base = other,
    }
}

impl EffectsConfig {
    /// The landing page: `#navbar`, the custom mobile menu, fading cards,
    /// stat counters, parallax shapes, ripples and the progress bar.
    pub fn landing() -> Self {
        Self {
            profile: Profile::Landing,
            navbar: NavbarConfig {
                selector: "#navbar".to_string(),
                ..NavbarConfig::default()
            },
            active_links: ActiveLinkConfig {
                enabled: false,
                ..ActiveLinkConfig::default()
            },
            menus: vec![MenuConfig::default()],
            reveals: landing_reveals(),
            counters: CountersConfig {
                stats: StatCounterConfig::default(),
                sections: SectionCounterConfig {
                    section: String::new(),
                    ..SectionCounterConfig::default()
                },
            },
            cards: CardsConfig::landing(),
            overlay: OverlayProps {
                progress_bar: true,
                scroll_top_after: None,
            },
            appointment_form: FormConfig {
                selector: String::new(),
                ..FormConfig::default()
            },
            page_load: PageLoadConfig {
                restore_overflow: false,
                ..PageLoadConfig::default()
            },
            banner: Banner::Welcome,
            ..Self::default()
        }
    }

    /// Bootstrap inner pages: `.navbar` shadow and solid background, active
    /// section links, rising cards, the stats section, the appointment form
    /// and the scroll-to-top button.
    pub fn inner() -> Self {
        Self {
            profile: Profile::Inner,
            navbar: NavbarConfig {
                selector: ".navbar".to_string(),
                scrolled_class: "shadow".to_string(),
                solid_after: Some(100.0),
                ..NavbarConfig::default()
            },
            active_links: ActiveLinkConfig::default(),
            menus: vec![MenuConfig::bootstrap()],
            reveals: inner_reveals(),
            counters: CountersConfig {
                stats: StatCounterConfig {
                    selector: String::new(),
                    ..StatCounterConfig::default()
                },
                sections: SectionCounterConfig::default(),
            },
            lazy_images: LazyImageConfig {
                selector: String::new(),
                ..LazyImageConfig::default()
            },
            parallax: ParallaxConfig {
                selector: String::new(),
                ..ParallaxConfig::default()
            },
            cards: CardsConfig::inner(),
            ripple: RippleConfig {
                selector: String::new(),
                ..RippleConfig::default()
            },
            overlay: OverlayProps {
                progress_bar: false,
                scroll_top_after: Some(300.0),
            },
            footer: FooterConfig {
                selector: String::new(),
                ..FooterConfig::default()
            },
            page_load: PageLoadConfig {
                fade_in: false,
                restore_overflow: true,
                ..PageLoadConfig::default()
            },
            banner: Banner::Loaded,
            ..Self::default()
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Self::resolve(Some(raw), None, Profile::All)
    }

    /// Pick the profile (config block's `"profile"`, then the `<body>` hint,
    /// then `detected`) and lay the config block over it.
    pub fn resolve(raw: Option<&str>, body_hint: Option<&str>, detected: Profile) -> Result<Self> {
        let overrides: Value = match raw {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)?,
            _ => Value::Object(Map::new()),
        };

        let profile = match (overrides.get("profile"), body_hint) {
            (Some(named), _) => Profile::deserialize(named)?,
            (None, Some(hint)) => hint.parse::<Profile>()?,
            (None, None) => detected,
        };

        let mut config = serde_json::to_value(profile.config())?;
        merge(&mut config, overrides);
        Ok(serde_json::from_value(config)?)
    }

    /// Read the page's profile and config block. Anything broken is logged
    /// and the detected profile is used as is.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        let hint = document.body().and_then(|body| body.get_attribute(PROFILE_ATTR));
        let detected = Profile::detect(|selector| dom::query_one(document, selector).is_some());

        match Self::resolve(raw.as_deref(), hint.as_deref(), detected) {
            Ok(config) => {
                log::debug!("page effects profile {:?}", config.profile);
                config
            }
            Err(e) => {
                log::error!("{}; falling back to the {:?} profile", e, detected);
                detected.config()
            }
        }
    }

    /// Single-element bindings this config expects but `exists` can't find.
    pub fn missing_bindings(&self, exists: impl Fn(&str) -> bool) -> Vec<String> {
        let mut missing = Vec::new();
        if !dom::is_disabled(&self.navbar.selector) && !exists(&self.navbar.selector) {
            missing.push(format!("navbar `{}`", self.navbar.selector));
        }
        let menus: Vec<&MenuConfig> = self
            .menus
            .iter()
            .filter(|m| !dom::is_disabled(&m.toggle) && !dom::is_disabled(&m.menu))
            .collect();
        if !menus.is_empty() && !menus.iter().any(|m| exists(&m.toggle) && exists(&m.menu)) {
            missing.push("mobile menu toggle/menu pair".to_string());
        }
        missing
    }

    /// Warn about missing bindings. They only disable their own behaviour.
    pub fn validate(&self, document: &Document) -> Vec<String> {
        let missing = self.missing_bindings(|selector| dom::query_one(document, selector).is_some());
        for binding in &missing {
            log::warn!("{} not found, its effects are skipped", binding);
        }
        missing
    }
}
