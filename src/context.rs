use crate::error::MenuError;
use crate::menu::Menu;
use crate::menu_loop;
use crate::option::Flow;
use crate::registry::Registry;
use crate::terminal::Terminal;
use anyhow::Result;
use std::collections::VecDeque;
use std::io::Write;
use tracing::debug;

/// Per-session bookkeeping of the loop controller.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The most recently dispatched choice.
    pub last_choice: Option<String>,
    /// One-shot message shown with the next menu, then cleared.
    pub status: String,
    /// Choices processed before the user is prompted again, front first.
    pub queue: VecDeque<String>,
    /// Text printed once when the session starts.
    pub intro: Option<String>,
    /// Text shown when asking for a choice.
    pub prompt: String,
}

impl SessionState {
    pub fn new(prompt: impl Into<String>, intro: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            intro,
            ..Self::default()
        }
    }

    /// Forget everything that only makes sense inside one session.
    pub(crate) fn finish(&mut self) {
        self.last_choice = None;
        self.status.clear();
        self.queue.clear();
    }
}

/// What hooks and handlers see of the running session.
///
/// It carries the menu's registry, the session state and the active terminal.
pub struct Context<'a, M> {
    registry: &'a Registry<M>,
    session: &'a mut SessionState,
    terminal: &'a mut dyn Terminal,
}

impl<'a, M> Context<'a, M> {
    pub fn new(
        registry: &'a Registry<M>,
        session: &'a mut SessionState,
        terminal: &'a mut dyn Terminal,
    ) -> Self {
        Self {
            registry,
            session,
            terminal,
        }
    }

    pub fn registry(&self) -> &'a Registry<M> {
        self.registry
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut SessionState {
        self.session
    }

    pub fn status(&self) -> &str {
        &self.session.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.session.status = status.into();
    }

    pub fn last_choice(&self) -> Option<&str> {
        self.session.last_choice.as_deref()
    }

    pub fn intro(&self) -> Option<&str> {
        self.session.intro.as_deref()
    }

    /// Replace the intro text. Only useful from `preloop`, which runs before the
    /// intro is printed.
    pub fn set_intro(&mut self, intro: impl Into<String>) {
        self.session.intro = Some(intro.into());
    }

    pub fn prompt(&self) -> &str {
        &self.session.prompt
    }

    /// Add a choice to the back of the queue.
    pub fn queue_choice(&mut self, choice: impl Into<String>) {
        let choice = choice.into();
        debug!(choice = %choice, "choice queued");
        self.session.queue.push_back(choice);
    }

    pub(crate) fn next_queued(&mut self) -> Option<String> {
        self.session.queue.pop_front()
    }

    /// Take the pending status, leaving it empty.
    pub(crate) fn take_status(&mut self) -> String {
        std::mem::take(&mut self.session.status)
    }

    /// Writer for anything a hook or handler wants to show.
    pub fn out(&mut self) -> &mut dyn Write {
        self.terminal.output()
    }

    /// Show `prompt` and read one line; `None` when input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.terminal.read_line(prompt)
    }

    /// Show `prompt` and read one line, failing if input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        match self.terminal.read_line(prompt)? {
            Some(line) => Ok(line),
            None => Err(MenuError::InputClosed {
                prompt: prompt.to_owned(),
            }
            .into()),
        }
    }
}

impl<M: Menu> Context<'_, M> {
    /// Act on one normalized choice: empty choices go to
    /// [`Menu::emptyline`], known keys run their handler and become the last
    /// choice, anything else goes to [`Menu::unrecognized`].
    pub fn dispatch(&mut self, menu: &mut M, choice: &str) -> Result<Flow> {
        if choice.is_empty() {
            return menu.emptyline(self);
        }
        let registry = self.registry;
        match registry.lookup(choice) {
            Some(option) => {
                debug!(choice, key = option.key(), "dispatching choice");
                let flow = option.invoke(menu, self)?;
                self.session.last_choice = Some(choice.to_owned());
                Ok(flow)
            }
            None => {
                debug!(choice, "unrecognized choice");
                menu.unrecognized(choice, self)
            }
        }
    }

    /// Run a complete session of another menu on the same terminal and hand
    /// the finished menu back.
    pub fn submenu<N: Menu>(&mut self, mut menu: N) -> Result<N> {
        let registry = Registry::build(&menu)?;
        let mut session = SessionState::new(menu.prompt(), menu.intro().map(str::to_owned));
        let mut nested = Context::new(&registry, &mut session, &mut *self.terminal);
        menu_loop::drive(&mut menu, &mut nested)?;
        Ok(menu)
    }
}
