use std::path::PathBuf;

use rustyline::{Config, Editor, Result};

pub fn generate_prompt(chat_open: bool) -> String {
    match chat_open {
        true => "you> ".to_string(),
        false => "> ".to_string(),
    }
}

pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(false)
        .build();
    Editor::with_config(config)
}

/// Where REPL history is kept between runs, if the platform has a data dir.
pub fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("lumina").join("history.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reflects_panel_state() {
        assert_eq!(generate_prompt(false), "> ");
        assert_eq!(generate_prompt(true), "you> ");
    }
}
