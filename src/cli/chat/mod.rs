pub mod command;
pub mod controller;
pub mod conversation_state;
pub mod prompt;
pub mod render;

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use color_print::cformat;
use command::Command;
use controller::{ChatController, Rejected, PANEL_HEIGHT, PANEL_WIDTH};
use crossterm::style::Stylize;
use eyre::Result;
use prompt::generate_prompt;
use render::LineKind;
use rustyline::error::ReadlineError;
use tracing::{debug, info, warn};

use crate::cli::page::chrome::{ChatToggle, PageState};
use crate::cli::page::{self, content::CHAT_PLACEHOLDER};

const HELP_TEXT: &str = "
Lumina

/open           Open the chat panel
/close          Close the chat panel
/menu           Toggle the navigation menu
/goto <section> Jump to home, services, about, team or contact
/scroll <px>    Scroll the page to an offset
/page           Show the whole page again
/help           Show this help dialogue
/quit           Quit the application

Anything else is sent to the assistant. Start a question with // to send
a leading slash, e.g. //etc is mounted where?
";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    chat: ChatController,
    page: PageState,
    width: usize,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        chat: ChatController,
    ) -> Self {
        let width = crossterm::terminal::size()
            .map(|(cols, _)| usize::from(cols).clamp(40, 100))
            .unwrap_or(80);
        let chat = chat.with_panel_size(width.min(PANEL_WIDTH), PANEL_HEIGHT);

        Self {
            output,
            input,
            interactive,
            chat,
            page: PageState::default(),
            width,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        // One-shot question
        if let Some(input) = self.input.take() {
            return match self.chat.submit(&input).await {
                Ok(reply) => {
                    let text = reply.text.clone();
                    writeln!(self.output, "{}", text)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(Rejected::Blank) => {
                    writeln!(self.output, "Nothing to ask.")?;
                    Ok(ExitCode::FAILURE)
                }
                Err(Rejected::Busy) => Ok(ExitCode::FAILURE),
            };
        }

        if self.interactive {
            self.print_page()?;
            self.print_welcome()?;
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        let welcome = cformat!(
            "\n<bold>Hi, I'm Lumina.</bold> Ask me anything about our services.\n<dim>/help for commands, /quit to leave</dim>\n"
        );
        writeln!(self.output, "{}", welcome)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;
        let history = prompt::history_path();
        if let Some(path) = &history {
            if rl.load_history(path).is_err() {
                debug!("No REPL history at {}", path.display());
            }
        }

        loop {
            let prompt_text = generate_prompt(self.page.chat_open);
            match rl.readline_with_initial(&prompt_text, (self.chat.draft(), "")) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str());

                    match Command::parse(&line) {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.handle_command(command).await?,
                        Err(e) => writeln!(self.output, "{}", e.to_string().red())?,
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        info!("Session ended with {} messages", self.chat.messages().len());

        if let Some(path) = &history {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            if let Err(e) = rl.save_history(path) {
                warn!("Could not save REPL history: {}", e);
            }
        }

        Ok(())
    }

    async fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Ask(text) => self.ask(text).await?,
            Command::Open => {
                if self.page.open_chat().is_some() {
                    self.panel_opened()?;
                }
            }
            Command::Close => {
                if self.page.close_chat().is_some() {
                    self.print_launcher()?;
                }
            }
            Command::Menu => {
                self.page.toggle_menu();
                let nav = page::render_nav(&self.page);
                page::write_lines(&mut self.output, &nav)?;
            }
            Command::Goto(target) => match self.page.follow_link(&target) {
                Some(section) => {
                    let lines = page::render_section(section, self.width);
                    page::write_lines(&mut self.output, &lines)?;
                }
                None => writeln!(self.output, "{}", format!("No section called {:?}", target).red())?,
            },
            Command::Scroll(offset) => {
                if self.page.on_scroll(offset) {
                    let nav = page::render_nav(&self.page);
                    page::write_lines(&mut self.output, &nav)?;
                }
            }
            Command::Page => self.print_page()?,
            Command::Help => writeln!(self.output, "{}", HELP_TEXT)?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Sends the visitor's text through the input box of the chat panel.
    async fn ask(&mut self, text: String) -> Result<()> {
        if let Some(ChatToggle::Opened) = self.page.open_chat() {
            self.panel_opened()?;
        }

        self.chat.set_draft(text);
        let turn = match self.chat.begin_draft() {
            Ok(turn) => turn,
            Err(rejected) => {
                debug!("Submit ignored: {:?}", rejected);
                return Ok(());
            }
        };
        self.print_chat()?;

        let reply = self.chat.ask(&turn).await;
        self.chat.finish_turn(turn, reply);
        self.page.on_reply();
        self.print_chat()?;
        Ok(())
    }

    fn panel_opened(&mut self) -> Result<()> {
        self.chat.on_panel_opened();
        self.print_launcher()?;
        self.print_chat()
    }

    fn print_page(&mut self) -> Result<()> {
        let lines = page::render_page(&self.page, self.width);
        page::write_lines(&mut self.output, &lines)?;
        Ok(())
    }

    fn print_launcher(&mut self) -> Result<()> {
        let lines = page::render_launcher(&self.page);
        page::write_lines(&mut self.output, &lines)?;
        Ok(())
    }

    /// Prints the visible window of the message list.
    fn print_chat(&mut self) -> Result<()> {
        let panel_width = self.chat.width();
        let lines = self.chat.view().lines(panel_width);
        let range = self.chat.viewport().visible_range();

        writeln!(self.output, "{}", "─".repeat(panel_width).dark_grey())?;
        for line in lines.get(range).unwrap_or_default() {
            let text = line.text.as_str();
            match line.kind {
                LineKind::User => writeln!(self.output, "{}", text.white().on_blue())?,
                LineKind::Model => writeln!(self.output, "{}", text)?,
                LineKind::Timestamp => writeln!(self.output, "{}", text.dark_grey())?,
                LineKind::Typing => writeln!(self.output, "{}", text.dark_grey().slow_blink())?,
                LineKind::Spacer => writeln!(self.output)?,
            }
        }
        writeln!(
            self.output,
            "{}",
            format!("{:<width$}", CHAT_PLACEHOLDER, width = panel_width).dark_grey()
        )?;
        Ok(())
    }
}
