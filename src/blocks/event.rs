use serde::{Deserialize, Serialize};

/// Event kinds rofi-blocks reports that the decoder acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// A row was accepted; `value` carries its data
    SelectEntry,
    /// A custom key was pressed on a row; a `CustomKey` event follows
    ActiveEntry,
    /// Which custom key was pressed, 1-based in `index`
    CustomKey,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::SelectEntry => "SELECT_ENTRY",
            EventName::ActiveEntry => "ACTIVE_ENTRY",
            EventName::CustomKey => "CUSTOM_KEY",
        }
    }

    pub fn parse(name: &str) -> Option<EventName> {
        match name {
            "SELECT_ENTRY" => Some(EventName::SelectEntry),
            "ACTIVE_ENTRY" => Some(EventName::ActiveEntry),
            "CUSTOM_KEY" => Some(EventName::CustomKey),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One object from rofi's event stream, shaped by `EVENT_FORMAT`.
///
/// Fields are kept as raw strings so that unknown names or bad indices are
/// validation failures rather than stream decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub index: String,
}

impl Event {
    pub fn new(name: EventName, value: impl Into<String>, index: impl Into<String>) -> Self {
        Event {
            name: name.as_str().to_string(),
            value: value.into(),
            index: index.into(),
        }
    }

    pub fn kind(&self) -> Option<EventName> {
        EventName::parse(&self.name)
    }

    /// 1-based custom key index, if `index` holds a positive integer
    pub fn key_index(&self) -> Option<usize> {
        self.index.trim().parse::<usize>().ok().filter(|i| *i >= 1)
    }

    /// Known name, a value for entry events, a positive index for key events
    pub fn is_valid(&self) -> bool {
        match self.kind() {
            None => false,
            Some(EventName::SelectEntry) | Some(EventName::ActiveEntry) => !self.value.is_empty(),
            Some(EventName::CustomKey) => self.key_index().is_some(),
        }
    }
}
