use thiserror::Error;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything not starting with `/` is a question for the assistant.
    Ask(String),
    Open,
    Close,
    Menu,
    Goto(String),
    Scroll(u32),
    Page,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command /{0}, try /help")]
    Unknown(String),
    #[error("/{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("scroll offset must be a whole number of pixels, got {0:?}")]
    InvalidScroll(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Ask(input.to_string()));
        };
        // `//` escapes a question that itself starts with a slash.
        if rest.starts_with('/') {
            return Ok(Command::Ask(rest.to_string()));
        }

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "open" => Ok(Command::Open),
            "close" => Ok(Command::Close),
            "menu" => Ok(Command::Menu),
            "page" => Ok(Command::Page),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "goto" if arg.is_empty() => Err(CommandError::MissingArgument("goto")),
            "goto" => Ok(Command::Goto(arg.to_string())),
            "scroll" if arg.is_empty() => Err(CommandError::MissingArgument("scroll")),
            "scroll" => arg
                .parse()
                .map(Command::Scroll)
                .map_err(|_| CommandError::InvalidScroll(arg.to_string())),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_slash_escapes_a_question() {
        assert_eq!(
            Command::parse("//etc paths?"),
            Ok(Command::Ask("/etc paths?".to_string()))
        );
        assert_eq!(Command::parse("//open"), Ok(Command::Ask("/open".to_string())));
    }

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            Command::parse("  What cloud providers do you support? "),
            Ok(Command::Ask("What cloud providers do you support?".to_string()))
        );
        assert_eq!(Command::parse(""), Ok(Command::Ask(String::new())));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(Command::parse("/open"), Ok(Command::Open));
        assert_eq!(Command::parse("/CLOSE"), Ok(Command::Close));
        assert_eq!(Command::parse("/exit"), Ok(Command::Quit));
        assert_eq!(Command::parse("/goto  #team"), Ok(Command::Goto("#team".to_string())));
        assert_eq!(Command::parse("/scroll 120"), Ok(Command::Scroll(120)));
    }

    #[test]
    fn test_bad_commands() {
        assert_eq!(Command::parse("/goto"), Err(CommandError::MissingArgument("goto")));
        assert_eq!(
            Command::parse("/scroll far"),
            Err(CommandError::InvalidScroll("far".to_string()))
        );
        assert_eq!(
            Command::parse("/dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
