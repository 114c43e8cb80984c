use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};
use derive_builder::Builder;
use logos::{Logos, Span};

use crate::{palette::Rgb, warn};

/// Immutable configuration record for one generation run.
///
/// Optional fields keep their `Option` here; fixed defaults apply at
/// substitution-table build time, never at construction time.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct AppConfig {
    pub app_name: String,
    pub app_name_kebab: String,
    pub app_short_name: String,
    pub app_description: String,
    pub event_name: String,
    pub event_emoji: String,
    pub theme_color: Rgb,
    pub app_icon: String,
    pub feature_comments: bool,
    pub feature_notifications: bool,
    pub feature_slack: bool,
    pub backend_platform: BackendPlatform,
    pub cron_schedule: String,
    #[builder(default)]
    pub slack_channel: Option<String>,
    #[builder(default)]
    pub emoji_positive: Option<String>,
    #[builder(default)]
    pub emoji_negative: Option<String>,
    pub output_path: PathBuf,
    #[builder(default)]
    pub firebase_project_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendPlatform {
    Cloudflare,
    Vercel,
    Aws,
}

impl FromStr for BackendPlatform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cloudflare" => Ok(BackendPlatform::Cloudflare),
            "vercel" => Ok(BackendPlatform::Vercel),
            "aws" => Ok(BackendPlatform::Aws),
            other => Err(anyhow!(
                "Unknown backend platform '{other}', expected cloudflare, vercel or aws"
            )),
        }
    }
}

impl fmt::Display for BackendPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendPlatform::Cloudflare => write!(f, "cloudflare"),
            BackendPlatform::Vercel => write!(f, "vercel"),
            BackendPlatform::Aws => write!(f, "aws"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Str(String),
    Bool(bool),
}

/// Flat manifest value list, in declaration order.
#[derive(Debug, Default, PartialEq)]
pub struct Values {
    pub list: Vec<(String, Value)>,
}

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TokenE<'i> {
    #[regex(r#""[^"]*""#, |lex| lex.slice().trim_matches('"'))]
    #[regex(r#"'[^']*'"#, |lex| lex.slice().trim_matches('\''))]
    String(&'i str),

    #[regex(r"(?i:false)", |_| false)]
    #[regex(r"(?i:true)", |_| true)]
    Bool(bool),

    #[token("=")]
    Eq,

    #[token(";")]
    Semicolon,

    #[regex("(?i:[a-z][_a-z0-9]*)")]
    Ident(&'i str),

    #[regex("#[^\n]*")]
    Comment,
}

fn line_col(inp: &str, at: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for c in inp.chars().take(at) {
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

fn err_at(inp: &str, path: &Path, span: &Span, msg: impl Into<String>) -> anyhow::Error {
    let (line, col) = line_col(inp, span.start);
    anyhow!(
        "{msg}\n    {path}:{line}:{col}",
        msg = msg.into(),
        path = path.display()
    )
}

impl Values {
    /// Parses `ident = value;` statements. Values are quoted strings or bare
    /// bools; `#` starts a line comment; semicolons are optional.
    pub fn from_str(s: &str, path: &Path) -> Result<Values> {
        let mut lexer = TokenE::lexer(s);
        let mut tokens: Vec<(TokenE<'_>, Span)> = Vec::new();

        while let Some(token) = lexer.next() {
            let Ok(token) = token else {
                return Err(err_at(s, path, &lexer.span(), "Error reading token"));
            };

            if matches!(token, TokenE::Comment) {
                continue;
            }
            tokens.push((token, lexer.span()));
        }

        let mut values = Values::default();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i..] {
                [(TokenE::Ident(key), _), (TokenE::Eq, _), (value, span), ..] => {
                    let value = match value {
                        TokenE::String(v) => Value::Str((*v).to_owned()),
                        TokenE::Bool(v) => Value::Bool(*v),
                        other => {
                            return Err(err_at(
                                s,
                                path,
                                span,
                                format!(
                                    "Expected a quoted string or bool for '{key}', found {other:?}"
                                ),
                            ))
                        }
                    };

                    values.set((*key).to_owned(), value);

                    i += 3;
                    if matches!(tokens.get(i), Some((TokenE::Semicolon, _))) {
                        i += 1;
                    }
                }
                [(token, span), ..] => {
                    return Err(err_at(
                        s,
                        path,
                        span,
                        format!("Found unexpected token {token:?}"),
                    ))
                }
                [] => unreachable!("loop condition checked the slice is not empty"),
            }
        }

        Ok(values)
    }

    /// Builds a value list from CLI `key=value` pairs. Bare `true`/`false`
    /// become bools, anything else a string. Empty pairs are skipped.
    pub fn from_cli_pairs(pairs: &[String]) -> Result<Values> {
        let mut values = Values::default();

        for pair in pairs.iter().filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                bail!("Invalid key=value pair '{pair}'");
            };

            let value = match value {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => Value::Str(other.to_owned()),
            };

            values.set(key.to_owned(), value);
        }

        Ok(values)
    }

    /// Merges `other` over `self`: later sources win, with a warning.
    #[must_use]
    pub fn stash(mut self, other: Values) -> Values {
        for (key, value) in other.list {
            self.set(key, value);
        }

        self
    }

    fn set(&mut self, key: String, value: Value) {
        if let Some(slot) = self.list.iter_mut().find(|(k, _)| *k == key) {
            warn!("Overriding value for '{key}'");
            slot.1 = value;
        } else {
            self.list.push((key, value));
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.list
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn required_str(&self, key: &str) -> Result<String> {
        match self.get(key) {
            Some(Value::Str(v)) => Ok(v.clone()),
            Some(Value::Bool(_)) => bail!("Value for '{key}' must be a quoted string"),
            None => bail!(
                "No value found for key \"{0}\".\nSet it:\n\
                 \t1. In the manifest as {0} = \"value\";\n\
                 \t2. As argument: `crewgen generate manifest.conf {0}=value`",
                key
            ),
        }
    }

    fn required_bool(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            Some(Value::Bool(v)) => Ok(*v),
            Some(Value::Str(_)) => bail!("Value for '{key}' must be true or false"),
            None => bail!(
                "No value found for key \"{0}\".\nSet it:\n\
                 \t1. In the manifest as {0} = true;\n\
                 \t2. As argument: `crewgen generate manifest.conf {0}=true`",
                key
            ),
        }
    }

    fn optional_str(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            Some(Value::Str(v)) => Ok(Some(v.clone())),
            Some(Value::Bool(_)) => bail!("Value for '{key}' must be a quoted string"),
            None => Ok(None),
        }
    }
}

impl AppConfig {
    /// Validates and assembles the record. Fails fast on missing required
    /// keys, malformed theme colors and unknown backend platforms.
    pub fn from_values(values: &Values) -> Result<AppConfig> {
        AppConfigBuilder::default()
            .app_name(values.required_str("app_name")?)
            .app_name_kebab(values.required_str("app_name_kebab")?)
            .app_short_name(values.required_str("app_short_name")?)
            .app_description(values.required_str("app_description")?)
            .event_name(values.required_str("event_name")?)
            .event_emoji(values.required_str("event_emoji")?)
            .theme_color(values.required_str("theme_color")?.parse::<Rgb>()?)
            .app_icon(values.required_str("app_icon")?)
            .feature_comments(values.required_bool("feature_comments")?)
            .feature_notifications(values.required_bool("feature_notifications")?)
            .feature_slack(values.required_bool("feature_slack")?)
            .backend_platform(
                values
                    .required_str("backend_platform")?
                    .parse::<BackendPlatform>()?,
            )
            .cron_schedule(values.required_str("cron_schedule")?)
            .slack_channel(values.optional_str("slack_channel")?)
            .emoji_positive(values.optional_str("emoji_positive")?)
            .emoji_negative(values.optional_str("emoji_negative")?)
            .output_path(PathBuf::from(values.required_str("output_path")?))
            .firebase_project_id(values.optional_str("firebase_project_id")?)
            .build()
            .map_err(|e| anyhow!("Incomplete manifest: {e}"))
    }
}
