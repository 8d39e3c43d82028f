//! Menu entries shared by both protocol dialects.

use serde::{Deserialize, Serialize};

/// Separator between value and commands in script mode `info`
pub const SCRIPT_PAYLOAD_SEPARATOR: &str = "|";

/// Separator between value and commands in blocks mode `data`
pub const BLOCK_PAYLOAD_SEPARATOR: &str = "||";

/// A single row offered to the user.
///
/// `value` is the stable identity used for history matching; `cmds` is the
/// ordered list of actions, selected by index (plain selection runs the first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cmds: Vec<String>,
    #[serde(default)]
    pub icon: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub is_multiline: bool,
    #[serde(default)]
    pub use_markup: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_highlighted: bool,
}

impl MenuOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        MenuOption {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_cmds<I, S>(mut self, cmds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmds = cmds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn multiline(mut self, is_multiline: bool) -> Self {
        self.is_multiline = is_multiline;
        self
    }

    pub fn markup(mut self, use_markup: bool) -> Self {
        self.use_markup = use_markup;
        self
    }

    pub fn urgent(mut self, is_urgent: bool) -> Self {
        self.is_urgent = is_urgent;
        self
    }

    pub fn highlighted(mut self, is_highlighted: bool) -> Self {
        self.is_highlighted = is_highlighted;
        self
    }

    /// Options without a name or without commands cannot be printed
    pub fn is_printable(&self) -> bool {
        !self.name.is_empty() && !self.cmds.is_empty()
    }

    /// Display text: the name, then the category after a space
    /// (or a carriage return for multiline rows).
    pub fn label(&self) -> String {
        if self.category.is_empty() {
            return self.name.clone();
        }
        let separator = if self.is_multiline { '\r' } else { ' ' };
        format!("{}{}{}", self.name, separator, self.category)
    }

    /// `value` followed by every command, joined with `separator`
    pub fn payload(&self, separator: &str) -> String {
        std::iter::once(self.value.as_str())
            .chain(self.cmds.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// The option the user picked and the command they invoked on it
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub cmd: String,
    pub value: String,
}

impl Selection {
    /// Resolve a selection from `value<sep>cmd1<sep>cmd2...`.
    ///
    /// Returns None when the payload carries no command at all. An index past
    /// the last command falls back to the first one.
    pub fn from_payload(payload: &str, separator: &str, index: usize) -> Option<Selection> {
        let mut parts = payload.split(separator);
        let value = parts.next()?.to_string();
        let cmds: Vec<&str> = parts.collect();
        if cmds.is_empty() {
            return None;
        }

        let index = if index < cmds.len() {
            index
        } else {
            tracing::warn!(
                index,
                available = cmds.len(),
                "Index did not result in a valid command. Selecting first command"
            );
            0
        };

        Some(Selection {
            cmd: cmds[index].to_string(),
            value,
        })
    }
}

/// Stable case-insensitive sort by display name
pub fn sort_by_name(options: &mut [MenuOption]) {
    options.sort_by_cached_key(|o| o.name.to_lowercase());
}
