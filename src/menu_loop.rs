use crate::context::{Context, SessionState};
use crate::error::MenuError;
use crate::menu::{self, Menu};
use crate::redirect::IoScope;
use crate::registry::Registry;
use crate::terminal::{StdioTerminal, Terminal};
use anyhow::Result;
use tracing::{debug, info};

/// Drives sessions of a [`Menu`]: show the menu, read a choice, dispatch it and
/// repeat until a handler or hook says stop.
///
/// The loop owns the menu value (the caller's state), the option registry built
/// from it, the session state and the terminal. By default it talks through
/// standard input and output.
///
/// Example
/// ```
/// use menu_engine::{Flow, Menu, MenuLoop, MenuOption, StreamTerminal};
///
/// struct Quitter;
///
/// impl Menu for Quitter {
///     fn options(&self) -> Vec<MenuOption<Self>> {
///         vec![MenuOption::described("Q: Quit.", |_: &mut Self, _| Ok(Flow::Stop))]
///     }
/// }
///
/// let (term, out) = StreamTerminal::scripted("q\n");
/// let mut menu = MenuLoop::new(Quitter).unwrap().with_terminal(term);
/// menu.menuloop().unwrap();
/// assert_eq!(out.contents(), "\nQ: Quit.\n\nPlease enter your selection: ");
/// ```
pub struct MenuLoop<M: Menu> {
    menu: M,
    registry: Registry<M>,
    session: SessionState,
    io: IoScope,
}

impl<M: Menu> MenuLoop<M> {
    /// Build the option registry for `menu`.
    ///
    /// Fails if an option has no key or two keys are equal ignoring case.
    pub fn new(menu: M) -> Result<Self, MenuError> {
        let registry = Registry::build(&menu)?;
        let session = SessionState::new(menu.prompt(), menu.intro().map(str::to_owned));
        Ok(Self {
            menu,
            registry,
            session,
            io: IoScope::new(Box::new(StdioTerminal::new())),
        })
    }

    /// Talk through `terminal` instead of standard input and output.
    pub fn with_terminal(mut self, terminal: impl Terminal + 'static) -> Self {
        self.io.replace(Box::new(terminal));
        self
    }

    /// Use `terminal` for the next session only; the current one comes back
    /// when that session ends.
    pub fn redirect(mut self, terminal: impl Terminal + 'static) -> Self {
        self.io.redirect(Box::new(terminal));
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.session.prompt = prompt.into();
        self
    }

    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.session.intro = Some(intro.into());
        self
    }

    /// Add choices to be processed, in order, before the user is prompted.
    pub fn queue_choices<I, S>(&mut self, choices: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.session.queue.extend(choices.into_iter().map(Into::into));
        debug!(queued = self.session.queue.len(), "choices queued");
    }

    /// Run one session.
    pub fn menuloop(&mut self) -> Result<()> {
        let mut scope = self.io.enter();
        let mut ctx = Context::new(&self.registry, &mut self.session, scope.terminal());
        let result = drive(&mut self.menu, &mut ctx);
        self.session.finish();
        result
    }

    /// Run one session with `intro` printed instead of the configured intro.
    pub fn menuloop_with_intro(&mut self, intro: impl Into<String>) -> Result<()> {
        self.session.intro = Some(intro.into());
        self.menuloop()
    }

    pub fn menu(&self) -> &M {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut M {
        &mut self.menu
    }

    pub fn into_menu(self) -> M {
        self.menu
    }

    pub fn registry(&self) -> &Registry<M> {
        &self.registry
    }

    /// The rendered menu text.
    pub fn text(&self) -> &str {
        self.registry.text()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }
}

/// One full session: `preloop`, the intro, the choice cycle, `postloop`.
///
/// A session also ends, without error, when the terminal runs out of input at
/// the prompt.
pub(crate) fn drive<M: Menu>(menu: &mut M, ctx: &mut Context<'_, M>) -> Result<()> {
    info!(options = ctx.registry().len(), "menu session started");
    ctx.session_mut().last_choice = None;
    menu.preloop(ctx)?;
    if let Some(intro) = ctx.intro().filter(|intro| !intro.is_empty()).map(str::to_owned) {
        writeln!(ctx.out(), "{}", intro)?;
    }

    loop {
        let raw = match ctx.next_queued() {
            Some(choice) => {
                debug!(choice = %choice, "taking queued choice");
                choice
            }
            None => {
                menu::render(ctx)?;
                let prompt = ctx.prompt().to_owned();
                match ctx.read_line(&prompt)? {
                    Some(line) => line.trim().to_owned(),
                    None => {
                        info!("input exhausted, ending menu session");
                        break;
                    }
                }
            }
        };

        let choice = menu.prechoice(raw, ctx)?;
        let flow = menu.onechoice(&choice, ctx)?;
        if menu.postchoice(flow, &choice, ctx)?.is_stop() {
            break;
        }
    }

    menu.postloop(ctx)?;
    info!("menu session finished");
    Ok(())
}
