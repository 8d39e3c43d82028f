use std::io::{self, Stdout, Write};
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::history::HistoryStore;
use crate::option::{MenuOption, SCRIPT_PAYLOAD_SEPARATOR};

/// Starts a directive line and separates an option from its row properties
const NUL: char = '\0';
/// Separates keys from values inside a line
const UNIT_SEPARATOR: char = '\x1f';

/// Mode options understood by rofi's script mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Prompt,
    Message,
    /// Comma separated row indices to mark active
    Active,
    UseHotKeys,
    MarkupRows,
    /// `true` rejects input that matches no row
    NoCustom,
}

impl Directive {
    pub fn key(self) -> &'static str {
        match self {
            Directive::Prompt => "prompt",
            Directive::Message => "message",
            Directive::Active => "active",
            Directive::UseHotKeys => "use-hot-keys",
            Directive::MarkupRows => "markup-rows",
            Directive::NoCustom => "no-custom",
        }
    }
}

/// `\0<key>\x1f<value>`
pub fn encode_directive(key: &str, value: &str) -> String {
    format!("{}{}{}{}", NUL, key, UNIT_SEPARATOR, value)
}

/// `<label>\0info\x1f<value>|<cmd>...[\x1ficon\x1f<icon>]`
///
/// Returns None for options that have no name or no commands.
pub fn encode_option(option: &MenuOption) -> Option<String> {
    if option.name.is_empty() {
        debug!(value = %option.value, "Option was empty");
        return None;
    }
    if option.cmds.is_empty() {
        warn!(name = %option.name, "Can't print options with no commands");
        return None;
    }

    let mut line = format!(
        "{}{}info{}{}",
        option.label(),
        NUL,
        UNIT_SEPARATOR,
        option.payload(SCRIPT_PAYLOAD_SEPARATOR)
    );

    if !option.icon.is_empty() {
        line.push(UNIT_SEPARATOR);
        line.push_str("icon");
        line.push(UNIT_SEPARATOR);
        line.push_str(&option.icon);
    }

    trace!(line = %line.escape_debug(), "Option");
    Some(line)
}

/// Writes script mode lines, flushing after every line
pub struct LineEncoder<W: Write> {
    out: W,
    /// Store and namespace used by `print_all` to promote recent choices
    history: Option<(HistoryStore, String)>,
}

impl LineEncoder<Stdout> {
    pub fn stdout(config: &Config) -> Self {
        LineEncoder::new(io::stdout(), config)
    }
}

impl<W: Write> LineEncoder<W> {
    pub fn new(out: W, config: &Config) -> Self {
        let history = config
            .history
            .as_ref()
            .map(|namespace| (HistoryStore::from_config(config), namespace.clone()));
        LineEncoder { out, history }
    }

    /// Replace the history store (for testing or custom cache roots)
    pub fn with_history_store(mut self, store: HistoryStore, namespace: impl Into<String>) -> Self {
        self.history = Some((store, namespace.into()));
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    /// Emit the startup directives: custom input is rejected unless
    /// `enable_custom` is called afterwards.
    pub fn begin(&mut self) -> io::Result<()> {
        self.directive(Directive::NoCustom, "true")
    }

    pub fn directive(&mut self, directive: Directive, value: &str) -> io::Result<()> {
        self.raw_directive(directive.key(), value)
    }

    /// Emit a directive rofi knows about that has no `Directive` variant
    pub fn raw_directive(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.write_line(&encode_directive(key, value))
    }

    pub fn set_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.directive(Directive::Prompt, prompt)
    }

    pub fn set_message(&mut self, message: &str) -> io::Result<()> {
        self.directive(Directive::Message, message)
    }

    pub fn set_active(&mut self, active_rows: &str) -> io::Result<()> {
        self.directive(Directive::Active, active_rows)
    }

    pub fn enable_hotkeys(&mut self) -> io::Result<()> {
        debug!("Enabled hotkeys");
        self.directive(Directive::UseHotKeys, "true")
    }

    pub fn enable_markup(&mut self) -> io::Result<()> {
        debug!("Enabled markup rows");
        self.directive(Directive::MarkupRows, "true")
    }

    pub fn enable_custom(&mut self) -> io::Result<()> {
        debug!("Enabled custom entries");
        self.directive(Directive::NoCustom, "false")
    }

    /// Emit one option. Returns false when the option was skipped.
    pub fn print(&mut self, option: &MenuOption) -> io::Result<bool> {
        match encode_option(option) {
            Some(line) => {
                self.write_line(&line)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Emit every option, promoting recent choices first when a history
    /// namespace is configured.
    ///
    /// Call `sort_by_name` beforehand for alphabetical order among the
    /// options history does not promote.
    pub fn print_all(&mut self, options: Vec<MenuOption>) -> io::Result<usize> {
        let options = match &self.history {
            Some((store, namespace)) => store.sort_using_history(options, namespace),
            None => options,
        };

        let mut printed = 0;
        for option in &options {
            if self.print(option)? {
                printed += 1;
            }
        }
        debug!(printed, total = options.len(), "Printed options");
        Ok(printed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::sort_by_name;

    fn output(encoder: LineEncoder<Vec<u8>>) -> String {
        String::from_utf8(encoder.into_inner()).unwrap()
    }

    #[test]
    fn test_encode_option_minimal() {
        let opt = MenuOption::new("Foo", "v1").with_cmds(["open"]);
        assert_eq!(encode_option(&opt).unwrap(), "Foo\x00info\x1fv1|open");
    }

    #[test]
    fn test_encode_option_with_category_and_icon() {
        let opt = MenuOption::new("Foo", "v1")
            .with_cmds(["open", "edit"])
            .with_category("files")
            .with_icon("folder");
        assert_eq!(
            encode_option(&opt).unwrap(),
            "Foo files\x00info\x1fv1|open|edit\x1ficon\x1ffolder"
        );
    }

    #[test]
    fn test_encode_option_multiline_category() {
        let opt = MenuOption::new("Foo", "v1")
            .with_cmds(["open"])
            .with_category("second line")
            .multiline(true);
        assert_eq!(
            encode_option(&opt).unwrap(),
            "Foo\rsecond line\x00info\x1fv1|open"
        );
    }

    #[test]
    fn test_encode_option_skips_unprintable() {
        assert!(encode_option(&MenuOption::new("", "v").with_cmds(["open"])).is_none());
        assert!(encode_option(&MenuOption::new("Foo", "v")).is_none());
    }

    #[test]
    fn test_encode_directive() {
        assert_eq!(encode_directive("prompt", "Run"), "\x00prompt\x1fRun");
        assert_eq!(Directive::UseHotKeys.key(), "use-hot-keys");
    }

    #[test]
    fn test_directives_write_one_line_each() {
        let mut encoder = LineEncoder::new(Vec::new(), &Config::default());
        encoder.begin().unwrap();
        encoder.set_prompt("Launch").unwrap();
        encoder.set_message("<b>hi</b>").unwrap();
        encoder.set_active("0,2").unwrap();
        encoder.enable_hotkeys().unwrap();
        encoder.enable_markup().unwrap();
        encoder.enable_custom().unwrap();

        assert_eq!(
            output(encoder),
            "\x00no-custom\x1ftrue\n\
             \x00prompt\x1fLaunch\n\
             \x00message\x1f<b>hi</b>\n\
             \x00active\x1f0,2\n\
             \x00use-hot-keys\x1ftrue\n\
             \x00markup-rows\x1ftrue\n\
             \x00no-custom\x1ffalse\n"
        );
    }

    #[test]
    fn test_print_skips_empty_options() {
        let mut encoder = LineEncoder::new(Vec::new(), &Config::default());
        assert!(!encoder.print(&MenuOption::new("", "v").with_cmds(["x"])).unwrap());
        assert!(output(encoder).is_empty());
    }

    #[test]
    fn test_print_all_without_history_keeps_order() {
        let mut encoder = LineEncoder::new(Vec::new(), &Config::default());
        let mut options = vec![
            MenuOption::new("beta", "b").with_cmds(["run"]),
            MenuOption::new("Alpha", "a").with_cmds(["run"]),
            MenuOption::new("", "skip").with_cmds(["run"]),
        ];
        sort_by_name(&mut options);

        assert_eq!(encoder.print_all(options).unwrap(), 2);
        assert_eq!(
            output(encoder),
            "Alpha\x00info\x1fa|run\nbeta\x00info\x1fb|run\n"
        );
    }

    #[test]
    fn test_print_all_promotes_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::with_root(dir.path());
        store.save("apps", "c");

        let mut encoder =
            LineEncoder::new(Vec::new(), &Config::default()).with_history_store(store, "apps");
        let options = vec![
            MenuOption::new("A", "a").with_cmds(["run"]),
            MenuOption::new("B", "b").with_cmds(["run"]),
            MenuOption::new("C", "c").with_cmds(["run"]),
        ];
        encoder.print_all(options).unwrap();

        let out = output(encoder);
        let names: Vec<_> = out.lines().map(|l| l.split('\0').next().unwrap()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
