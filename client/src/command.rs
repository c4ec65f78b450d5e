use std::str::FromStr;

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Card number in the list view.
    Pick(usize),
    Open(String),
    Back,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

impl FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            "b" | "back" => Command::Back,
            "r" | "reload" => Command::Reload,
            "q" | "quit" | "exit" => Command::Quit,
            "h" | "help" | "?" | "" => Command::Help,
            "o" | "open" if !rest.is_empty() => Command::Open(rest.to_string()),
            w => match w.parse() {
                Ok(n) if rest.is_empty() => Command::Pick(n),
                _ => Command::Unknown(line.to_string()),
            },
        };
        Ok(cmd)
    }
}

pub const HELP: &str = "\
  <n>        open card number n
  open <id>  open a movie by id
  back, b    return to the list
  reload, r  fetch the list again
  quit, q    exit";
