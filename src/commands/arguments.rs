/// Argument pools shared by every command a stack composes.
///
/// Global options are appended once and repeated on every command; next-command
/// arguments attach to the next composed command only and are drained by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentAccumulator {
    global_options: Vec<String>,
    next_command_args: Vec<String>,
}

impl ArgumentAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a persistent option. The token is taken verbatim.
    pub fn add_global_option(&mut self, token: impl Into<String>) {
        self.global_options.push(token.into());
    }

    /// Append one argument for the next composed command only.
    pub fn add_next_command_argument(&mut self, token: impl Into<String>) {
        self.next_command_args.push(token.into());
    }

    /// Append several arguments for the next composed command, in order.
    pub fn add_next_command_arguments<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next_command_args
            .extend(tokens.into_iter().map(Into::into));
    }

    /// Global options rendered for a command line, each one prefixed by a space.
    #[must_use]
    pub fn global_options(&self) -> String {
        prefixed(&self.global_options)
    }

    /// Take the next-command arguments, leaving the pool empty.
    ///
    /// Returns the arguments joined by single spaces with a leading space, or an
    /// empty string when nothing was queued.
    pub fn drain_next_command_arguments(&mut self) -> String {
        let drained = prefixed(&self.next_command_args);
        self.next_command_args.clear();
        drained
    }

    #[must_use]
    pub fn has_next_command_arguments(&self) -> bool {
        !self.next_command_args.is_empty()
    }
}

fn prefixed(tokens: &[String]) -> String {
    if tokens.is_empty() {
        String::new()
    } else {
        format!(" {}", tokens.join(" "))
    }
}

/// The subcommand part of a Drush invocation.
///
/// Built either from a single string or from fragments; empty fragments are
/// dropped and the rest joined with single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandText(String);

impl CommandText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fragments
            .into_iter()
            .filter(|f| !f.as_ref().is_empty())
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        CommandText(joined)
    }
}

impl From<&str> for CommandText {
    fn from(command: &str) -> Self {
        CommandText(command.to_string())
    }
}

impl From<String> for CommandText {
    fn from(command: String) -> Self {
        CommandText(command)
    }
}

impl From<&String> for CommandText {
    fn from(command: &String) -> Self {
        CommandText(command.clone())
    }
}

impl From<Vec<&str>> for CommandText {
    fn from(fragments: Vec<&str>) -> Self {
        CommandText::from_fragments(fragments)
    }
}

impl From<Vec<String>> for CommandText {
    fn from(fragments: Vec<String>) -> Self {
        CommandText::from_fragments(fragments)
    }
}

impl From<&[&str]> for CommandText {
    fn from(fragments: &[&str]) -> Self {
        CommandText::from_fragments(fragments)
    }
}

impl<const N: usize> From<[&str; N]> for CommandText {
    fn from(fragments: [&str; N]) -> Self {
        CommandText::from_fragments(fragments)
    }
}
