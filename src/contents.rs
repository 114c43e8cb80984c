use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    conditional::FeatureFlags, keys::Substitutions, manifest::AppConfig, palette::Palette,
};

/// One template content unit: an opaque text blob plus the path it came
/// from. Input to the engine, read-only.
pub struct Contents {
    pub(crate) contents: String,
    pub(crate) origin: PathBuf,
}

impl FromStr for Contents {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Contents {
            contents: s.to_owned(),
            origin: PathBuf::new(),
        })
    }
}

impl Contents {
    #[must_use]
    pub fn new(contents: String, origin: PathBuf) -> Contents {
        Contents { contents, origin }
    }

    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Conditional blocks resolve first, then placeholders substitute, so a
    /// token inside a removed region is never substituted.
    #[must_use]
    pub fn transform(&self, flags: &FeatureFlags, keys: &Substitutions) -> String {
        keys.apply(&flags.resolve(&self.contents))
    }
}

/// The whole pipeline over one content blob: derive the palette, build both
/// tables, resolve conditionals, substitute.
#[must_use]
pub fn transform_str(content: &str, config: &AppConfig) -> String {
    let palette = Palette::derive(config.theme_color);
    let keys = Substitutions::from_config(config, &palette);
    let flags = FeatureFlags::from_config(config);

    keys.apply(&flags.resolve(content))
}
