use crate::{keys::replace_all, manifest::AppConfig};

/// Block name → enabled table for `{{#FLAG}} ... {{/FLAG}}` regions.
///
/// Block names live in their own namespace; they never collide with
/// substitution tokens.
pub struct FeatureFlags {
    pub list: Vec<(String, bool)>,
}

impl FeatureFlags {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> FeatureFlags {
        FeatureFlags {
            list: vec![
                ("FEATURE_COMMENTS".into(), config.feature_comments),
                ("FEATURE_NOTIFICATIONS".into(), config.feature_notifications),
                ("ENABLE_SLACK".into(), config.feature_slack),
            ],
        }
    }

    /// Resolves every marked region for every flag, one flag at a time in
    /// table order. Marker sets of distinct flags never overlap, so the
    /// order does not affect the result.
    #[must_use]
    pub fn resolve(&self, content: &str) -> String {
        let mut result = content.to_owned();

        for (flag, enabled) in &self.list {
            result = resolve_flag(&result, flag, *enabled);
        }

        result
    }
}

/// Enabled flags unwrap: only the marker literals disappear. Disabled flags
/// remove from each open marker to the first following close marker, each
/// region handled independently. An open marker with no close before
/// end-of-content stays literal, as do markers of flags not in the table.
fn resolve_flag(content: &str, flag: &str, enabled: bool) -> String {
    let open = format!("{{{{#{flag}}}}}");
    let close = format!("{{{{/{flag}}}}}");

    if enabled {
        return replace_all(&replace_all(content, &open, ""), &close, "");
    }

    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    while let Some(start) = content[last..].find(&open).map(|i| i + last) {
        let after_open = start + open.len();

        let Some(end) = content[after_open..].find(&close).map(|i| i + after_open) else {
            break;
        };

        result.push_str(&content[last..start]);
        last = end + close.len();
    }

    result.push_str(&content[last..]);
    result
}
