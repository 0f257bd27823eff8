use tracing::{debug, info};

use super::conversation_state::{ConversationState, Message};
use super::render::{render, ChatView, MessageViewport};
use crate::gemini_client::{AssistantClient, Reply, Role, Turn};

/// Columns used when laying out the panel for scroll bookkeeping.
pub const PANEL_WIDTH: usize = 60;
pub const PANEL_HEIGHT: usize = 18;

/// A user turn that has been recorded and is waiting for the assistant.
#[derive(Debug)]
pub struct PendingTurn {
    pub message: String,
    pub history: Vec<Turn>,
}

/// Why a submit was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    Blank,
    Busy,
}

/// Owns the transcript, the loading flag, the input draft and the message list scroll.
pub struct ChatController {
    assistant: AssistantClient,
    conversation_state: ConversationState,
    loading: bool,
    draft: String,
    viewport: MessageViewport,
    width: usize,
}

impl ChatController {
    pub fn new(assistant: AssistantClient) -> Self {
        Self::with_state(assistant, ConversationState::new())
    }

    pub fn with_state(assistant: AssistantClient, conversation_state: ConversationState) -> Self {
        let mut controller = Self {
            assistant,
            conversation_state,
            loading: false,
            draft: String::new(),
            viewport: MessageViewport::new(PANEL_HEIGHT),
            width: PANEL_WIDTH,
        };
        controller.refresh();
        controller
    }

    pub fn with_panel_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.viewport = MessageViewport::new(height);
        self.refresh();
        self
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation_state.get_messages()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn viewport(&self) -> MessageViewport {
        self.viewport
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn view(&self) -> ChatView {
        render(self.conversation_state.get_messages(), self.loading)
    }

    /// Records the user's message and marks the panel busy.
    ///
    /// Blank text and submits made while a reply is outstanding leave the
    /// transcript untouched.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, Rejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejected::Blank);
        }
        if self.loading {
            debug!("Ignoring submit while a reply is outstanding");
            return Err(Rejected::Busy);
        }

        let history = self.conversation_state.turns();
        self.conversation_state.add_user_message(text);
        self.loading = true;
        self.refresh();

        info!("Visitor asked: {}", text);
        Ok(PendingTurn {
            message: text.to_string(),
            history,
        })
    }

    /// Appends the assistant's reply for `turn` and clears the busy flag.
    pub fn finish_turn(&mut self, turn: PendingTurn, reply: Reply) -> &Message {
        if reply.is_fallback() {
            info!("Answering {:?} with fallback text", turn.message);
        }
        self.loading = false;
        self.conversation_state.push(Message::new(Role::Model, reply.text()));
        self.refresh();
        self.conversation_state.newest()
    }

    pub async fn ask(&self, turn: &PendingTurn) -> Reply {
        self.assistant.chat(&turn.message, &turn.history).await
    }

    /// Full round trip for one visitor message.
    pub async fn submit(&mut self, text: &str) -> Result<&Message, Rejected> {
        let turn = self.begin_turn(text)?;
        let reply = self.ask(&turn).await;
        Ok(self.finish_turn(turn, reply))
    }

    /// Submits the input draft, clearing it only when the submit is accepted.
    pub fn begin_draft(&mut self) -> Result<PendingTurn, Rejected> {
        let draft = self.draft.clone();
        let turn = self.begin_turn(&draft)?;
        self.draft.clear();
        Ok(turn)
    }

    /// Called when the panel becomes visible.
    pub fn on_panel_opened(&mut self) {
        self.refresh();
    }

    /// Re-derives the layout height and jumps to the newest message.
    fn refresh(&mut self) {
        let lines = self.view().lines(self.width).len();
        self.viewport.set_content_height(lines);
        self.viewport.scroll_to_bottom();
    }
}
