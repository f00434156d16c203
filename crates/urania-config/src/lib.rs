use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use urania::{AspectSettings, AspectType, DisplayMode, TransitSettings};

/// Engine settings resolved from `configs/urania.toml`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSettings {
    pub aspects: AspectSettings,
    pub transits: TransitSettings,
    pub default_mode: DisplayMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AspectSetToml {
    #[serde(default)]
    types: Option<Vec<String>>,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransitToml {
    #[serde(default)]
    types: Option<Vec<String>>,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
    #[serde(default = "default_include_ingresses")]
    include_ingresses: bool,
    #[serde(default = "default_ingress_orb")]
    ingress_orb: f64,
}

impl Default for TransitToml {
    fn default() -> Self {
        Self {
            types: None,
            orbs: BTreeMap::new(),
            include_ingresses: default_include_ingresses(),
            ingress_orb: default_ingress_orb(),
        }
    }
}

fn default_include_ingresses() -> bool {
    true
}

fn default_ingress_orb() -> f64 {
    urania::transits::DEFAULT_INGRESS_ORB
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    default_mode: Option<String>,
    #[serde(default)]
    aspects: AspectSetToml,
    #[serde(default)]
    transits: TransitToml,
}

/// Try the usual relative locations of `configs/urania.toml`, from the
/// workspace root or from inside a crate directory.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("loaded engine config from {p}");
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", paths);
}

fn parse_aspect_set(
    section: &str,
    types: Option<&[String]>,
    orbs: &BTreeMap<String, f64>,
) -> anyhow::Result<AspectSettings> {
    let mut settings = match types {
        Some(names) => {
            let parsed = names
                .iter()
                .map(|n| n.parse::<AspectType>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("[{section}] types: {e}"))?;
            if parsed.is_empty() {
                log::warn!("[{section}] lists no aspect types; nothing will be detected");
            }
            AspectSettings::only(&parsed)
        }
        None => AspectSettings::default(),
    };
    for (name, orb) in orbs {
        let aspect: AspectType = name
            .parse()
            .map_err(|e| anyhow::anyhow!("[{section}.orbs] {e}"))?;
        settings = settings
            .with_orb(aspect, *orb)
            .map_err(|e| anyhow::anyhow!("[{section}.orbs] {e}"))?;
    }
    Ok(settings)
}

/// Parse and validate engine settings from TOML text
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;

    let default_mode = match root.default_mode.as_deref() {
        Some(name) => name
            .parse::<DisplayMode>()
            .map_err(|e| anyhow::anyhow!("default_mode: {e}"))?,
        None => DisplayMode::default(),
    };

    let aspects = parse_aspect_set("aspects", root.aspects.types.as_deref(), &root.aspects.orbs)?;

    let TransitToml {
        types,
        orbs,
        include_ingresses,
        ingress_orb,
    } = root.transits;
    let mut transits = TransitSettings {
        aspects: parse_aspect_set("transits", types.as_deref(), &orbs)?,
        ..TransitSettings::default()
    }
    .with_ingress_orb(ingress_orb)
    .map_err(|e| anyhow::anyhow!("[transits] {e}"))?;
    if !include_ingresses {
        transits = transits.without_ingresses();
    }

    Ok(EngineSettings {
        aspects,
        transits,
        default_mode,
    })
}

pub fn load_engine_settings_from(path: &Path) -> anyhow::Result<EngineSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_engine_settings(&text)
}

/// Load from the default locations, falling back to built-in settings when
/// no config file exists. A file that exists but is invalid is an error.
pub fn load_engine_settings() -> anyhow::Result<EngineSettings> {
    match read_config_toml_text() {
        Ok(text) => parse_engine_settings(&text),
        Err(e) => {
            log::info!("{e}; using built-in engine settings");
            Ok(EngineSettings::default())
        }
    }
}
