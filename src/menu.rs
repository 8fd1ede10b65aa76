use crate::context::Context;
use crate::option::{Flow, MenuOption};
use crate::registry;
use anyhow::Result;

/// Prompt used when a menu does not pick its own.
pub const DEFAULT_PROMPT: &str = "Please enter your selection: ";

/// A menu: a set of options plus the hooks the loop calls around them.
///
/// Only [`Menu::options`] is required. Every hook has a default, and a menu
/// overrides just the ones it cares about. Within one session the loop calls
/// `preloop` once, then for every choice `prechoice`, `onechoice` and
/// `postchoice`, and finally `postloop` once.
///
/// Example
/// ```
/// use menu_engine::{Flow, Menu, MenuLoop, MenuOption, StreamTerminal};
///
/// #[derive(Default)]
/// struct Counter {
///     count: u32,
/// }
///
/// impl Menu for Counter {
///     fn options(&self) -> Vec<MenuOption<Self>> {
///         vec![
///             MenuOption::new("a", "A: add one", |c: &mut Self, _ctx| {
///                 c.count += 1;
///                 Ok(())
///             }),
///             MenuOption::new("b", "B: quit", |_: &mut Self, _ctx| Ok(Flow::Stop)),
///         ]
///     }
/// }
///
/// let (term, _out) = StreamTerminal::scripted("a\na\nB\n");
/// let mut menu = MenuLoop::new(Counter::default()).unwrap().with_terminal(term);
/// menu.menuloop().unwrap();
/// assert_eq!(menu.menu().count, 2);
/// ```
pub trait Menu: Sized + 'static {
    /// The options of this menu. Called once when the menu is built.
    fn options(&self) -> Vec<MenuOption<Self>>;

    /// Put the options in display order. Defaults to sorting by key.
    fn sort_menu(options: &mut [MenuOption<Self>]) {
        registry::sort_by_key(options);
    }

    /// Text shown when asking for a choice.
    fn prompt(&self) -> &str {
        DEFAULT_PROMPT
    }

    /// Text printed once at the start of each session.
    fn intro(&self) -> Option<&str> {
        None
    }

    /// Runs once before the first prompt of a session.
    fn preloop(&mut self, _ctx: &mut Context<'_, Self>) -> Result<()> {
        Ok(())
    }

    /// Normalizes a raw choice before it is dispatched.
    fn prechoice(&mut self, choice: String, _ctx: &mut Context<'_, Self>) -> Result<String> {
        Ok(choice)
    }

    /// Acts on a single choice.
    fn onechoice(&mut self, choice: &str, ctx: &mut Context<'_, Self>) -> Result<Flow> {
        ctx.dispatch(self, choice)
    }

    /// Handles an empty choice by repeating the last one, if any.
    fn emptyline(&mut self, ctx: &mut Context<'_, Self>) -> Result<Flow> {
        match ctx.last_choice().map(str::to_owned) {
            Some(last) => self.onechoice(&last, ctx),
            None => Ok(Flow::Continue),
        }
    }

    /// Handles a choice that matches no option.
    fn unrecognized(&mut self, choice: &str, ctx: &mut Context<'_, Self>) -> Result<Flow> {
        ctx.set_status(unrecognized_status(choice));
        Ok(Flow::Continue)
    }

    /// Gets the last word on whether the loop stops after a choice.
    fn postchoice(
        &mut self,
        flow: Flow,
        _choice: &str,
        _ctx: &mut Context<'_, Self>,
    ) -> Result<Flow> {
        Ok(flow)
    }

    /// Runs once after the session ends.
    fn postloop(&mut self, _ctx: &mut Context<'_, Self>) -> Result<()> {
        Ok(())
    }
}

/// Status set for input that matches no option.
pub fn unrecognized_status(choice: &str) -> String {
    format!(
        "I do not recognize the choice '{}'. Please make another choice.",
        choice
    )
}

/// Write the menu text followed by a blank line, then the pending status
/// framed as `Status: ...` plus another blank line.
pub(crate) fn render<M>(ctx: &mut Context<'_, M>) -> Result<()> {
    let text = ctx.registry().text();
    writeln!(ctx.out(), "{}", text)?;
    writeln!(ctx.out())?;
    let status = ctx.take_status();
    if !status.is_empty() {
        writeln!(ctx.out(), "Status: {}", status)?;
        writeln!(ctx.out())?;
    }
    Ok(())
}
