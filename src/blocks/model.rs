use serde::Serialize;

use crate::option::{MenuOption, BLOCK_PAYLOAD_SEPARATOR};

/// Screen state owned by the application and rendered on demand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub message: String,
    pub overlay: String,
    pub prompt: String,
    pub input: String,
    /// `"send"` or `"filter"`; empty leaves rofi's default
    pub input_action: String,
    /// Row to highlight when `render` is not given one explicitly
    pub active_entry: usize,
    pub options: Vec<MenuOption>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One entry of the `lines` array
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct BlockLine {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data: String,
    #[serde(skip_serializing_if = "is_false")]
    pub urgent: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub highlight: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub markup: bool,
}

/// Wire shape of a single render, field names as rofi-blocks expects them
#[derive(Debug, Serialize)]
pub(crate) struct BlockModel<'a> {
    pub message: &'a str,
    pub overlay: &'a str,
    pub prompt: &'a str,
    pub input: &'a str,
    #[serde(rename = "input action", skip_serializing_if = "is_empty_str")]
    pub input_action: &'a str,
    #[serde(rename = "event format", skip_serializing_if = "is_empty_str")]
    pub event_format: &'a str,
    #[serde(rename = "active entry", skip_serializing_if = "is_zero")]
    pub active_entry: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<BlockLine>,
}

fn is_empty_str(value: &&str) -> bool {
    value.is_empty()
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl BlockLine {
    /// None for options that cannot be printed
    pub fn from_option(option: &MenuOption) -> Option<BlockLine> {
        if option.name.is_empty() {
            tracing::debug!(value = %option.value, "Option was empty");
            return None;
        }
        if option.cmds.is_empty() {
            tracing::warn!(name = %option.name, "Can't print options with no commands");
            return None;
        }

        Some(BlockLine {
            text: option.label(),
            icon: option.icon.clone(),
            data: option.payload(BLOCK_PAYLOAD_SEPARATOR),
            urgent: option.is_urgent,
            highlight: option.is_highlighted,
            markup: option.use_markup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_line_from_option() {
        let opt = MenuOption::new("Foo", "v1")
            .with_cmds(["open", "edit"])
            .with_category("files")
            .with_icon("folder")
            .urgent(true);
        let line = BlockLine::from_option(&opt).unwrap();
        assert_eq!(line.text, "Foo files");
        assert_eq!(line.icon, "folder");
        assert_eq!(line.data, "v1||open||edit");
        assert!(line.urgent);
        assert!(!line.highlight);
        assert!(!line.markup);
    }

    #[test]
    fn test_block_line_skips_unprintable() {
        assert!(BlockLine::from_option(&MenuOption::new("", "v").with_cmds(["x"])).is_none());
        assert!(BlockLine::from_option(&MenuOption::new("Foo", "v")).is_none());
    }

    #[test]
    fn test_block_line_omits_empty_fields() {
        let line = BlockLine::from_option(&MenuOption::new("Foo", "v").with_cmds(["x"])).unwrap();
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"text":"Foo","data":"v||x"}"#);
    }
}
