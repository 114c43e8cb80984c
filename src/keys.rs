use crate::{manifest::AppConfig, palette::Palette};

/// Fixed-suffix identifier appended to the kebab-case name for `{{BOT_NAME}}`.
const BOT_SUFFIX: &str = "-bot";
/// Domain template combined with the kebab-case name for `{{WEB_APP_URL}}`.
const WEB_APP_DOMAIN: &str = "web.app";

/// Placeholder token → replacement string table.
///
/// Built fresh per generation run; the key set is closed, tokens are literal
/// `{{NAME}}` strings.
pub struct Substitutions {
    pub list: Vec<(String, String)>,
}

impl Substitutions {
    #[must_use]
    pub fn from_config(config: &AppConfig, palette: &Palette) -> Substitutions {
        let kebab = config.app_name_kebab.as_str();

        let mut list: Vec<(String, String)> = vec![
            ("{{APP_NAME}}".into(), config.app_name.clone()),
            ("{{APP_NAME_KEBAB}}".into(), kebab.into()),
            ("{{APP_SHORT_NAME}}".into(), config.app_short_name.clone()),
            ("{{APP_DESCRIPTION}}".into(), config.app_description.clone()),
            ("{{EVENT_NAME}}".into(), config.event_name.clone()),
            ("{{EVENT_EMOJI}}".into(), config.event_emoji.clone()),
            ("{{THEME_COLOR}}".into(), config.theme_color.to_string()),
            ("{{APP_ICON}}".into(), config.app_icon.clone()),
            ("{{BOT_NAME}}".into(), format!("{kebab}{BOT_SUFFIX}")),
            ("{{CRON_SCHEDULE}}".into(), config.cron_schedule.clone()),
            (
                "{{SLACK_CHANNEL}}".into(),
                or_default(config.slack_channel.as_deref(), ""),
            ),
            (
                "{{EMOJI_POSITIVE}}".into(),
                or_default(config.emoji_positive.as_deref(), "thumbsup"),
            ),
            (
                "{{EMOJI_NEGATIVE}}".into(),
                or_default(config.emoji_negative.as_deref(), "x"),
            ),
            (
                "{{WEB_APP_URL}}".into(),
                format!("https://{kebab}.{WEB_APP_DOMAIN}"),
            ),
            (
                "{{FIREBASE_PROJECT_ID}}".into(),
                or_default(config.firebase_project_id.as_deref(), "your-firebase-project"),
            ),
        ];

        for (step, color) in palette.iter() {
            list.push((format!("{{{{PRIMARY_{step}}}}}"), color.to_string()));
        }

        Substitutions { list }
    }

    #[must_use]
    pub fn get_match(&self, key: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every occurrence of every token, in table-iteration order.
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        let mut result = content.to_owned();

        for (token, value) in &self.list {
            if result.contains(token.as_str()) {
                result = replace_all(&result, token, value);
            }
        }

        result
    }
}

/// Fallback defaults resolve here, at table build time, never at
/// configuration construction time.
fn or_default(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_owned()
}

/// Literal all-occurrences replacement. Non-overlapping: scanning resumes
/// after each replaced range, and never inside inserted text.
pub(crate) fn replace_all(content: &str, from: &str, to: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    while let Some(at) = content[last..].find(from).map(|i| i + last) {
        result.push_str(&content[last..at]);
        result.push_str(to);
        last = at + from.len();
    }

    result.push_str(&content[last..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::tests::lunch_crew_config;

    #[test]
    fn replaces_all_occurrences_literally() {
        assert_eq!(replace_all("a.c and a.c", "a.c", "Z"), "Z and Z");
        // No pattern semantics: '.' must not match arbitrary characters.
        assert_eq!(replace_all("abc", "a.c", "Z"), "abc");
        assert_eq!(
            replace_all("x {{A.B*}} y {{AxB?}} z", "{{A.B*}}", "ok"),
            "x ok y {{AxB?}} z"
        );
    }

    #[test]
    fn metacharacters_in_tokens_match_only_themselves() {
        for meta in [
            ".", "*", "+", "?", "^", "$", "{", "}", "(", ")", "|", "[", "]", "\\",
        ] {
            let token = format!("{{{{A{meta}B}}}}");
            let content = format!("x {token} y {{{{AzB}}}}");

            assert_eq!(
                replace_all(&content, &token, "ok"),
                format!("x ok y {{{{AzB}}}}"),
                "token {token} must match exactly its literal form"
            );
        }
    }

    #[test]
    fn derived_and_defaulted_entries() {
        let config = lunch_crew_config();
        let palette = Palette::derive(config.theme_color);
        let keys = Substitutions::from_config(&config, &palette);

        assert_eq!(keys.get_match("{{BOT_NAME}}"), Some("lunch-crew-bot"));
        assert_eq!(
            keys.get_match("{{WEB_APP_URL}}"),
            Some("https://lunch-crew.web.app")
        );
        assert_eq!(keys.get_match("{{SLACK_CHANNEL}}"), Some(""));
        assert_eq!(keys.get_match("{{EMOJI_POSITIVE}}"), Some("thumbsup"));
        assert_eq!(keys.get_match("{{EMOJI_NEGATIVE}}"), Some("x"));
        assert_eq!(
            keys.get_match("{{FIREBASE_PROJECT_ID}}"),
            Some("your-firebase-project")
        );
        assert_eq!(keys.get_match("{{PRIMARY_500}}"), Some("#4caf50"));
        assert_eq!(keys.get_match("{{PRIMARY_50}}"), Some("#edf7ee"));
        assert_eq!(keys.get_match("{{NOT_A_KEY}}"), None);
    }

    #[test]
    fn substitution_is_complete() {
        let config = lunch_crew_config();
        let palette = Palette::derive(config.theme_color);
        let keys = Substitutions::from_config(&config, &palette);

        let template: String = keys
            .list
            .iter()
            .map(|(token, _)| format!("{token}\n"))
            .collect();
        let result = keys.apply(&template);

        for (token, _) in &keys.list {
            assert!(!result.contains(token.as_str()), "{token} not replaced");
        }
    }
}
