/// The action selected by the first token of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Unknown or missing action.
    Undefined,
    /// Look up `args[0]`.
    Get,
    /// Store `args[1]` under `args[0]`.
    Set,
}

/// A parsed operator command.
///
/// Arguments are passed through uninterpreted; the dispatcher checks their
/// count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// What to do.
    pub action: Action,
    /// Tokens following the action, already lowercased.
    pub args: Vec<String>,
}

impl Command {
    /// Creates a command.
    pub fn new(action: Action, args: Vec<String>) -> Self {
        Self { action, args }
    }

    /// A command with no recognised action and no arguments.
    pub fn undefined() -> Self {
        Self::new(Action::Undefined, Vec::new())
    }
}

/// The outcome of reading one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A command to dispatch.
    Command(Command),
    /// The operator asked to leave, or input ended.
    Exit,
}

/// Parses one line of operator input.
///
/// The whole line is lowercased, keys and values included, then split on
/// single spaces.
pub fn parse_line(line: &str) -> Input {
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
        .to_lowercase();
    let mut tokens = line.split(' ');

    let action = match tokens.next() {
        Some("get") => Action::Get,
        Some("set") => Action::Set,
        Some("exit") => return Input::Exit,
        Some(_) | None => Action::Undefined,
    };
    Input::Command(Command::new(action, tokens.map(str::to_owned).collect()))
}
