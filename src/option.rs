use crate::context::Context;
use anyhow::Result;

/// Termination signal returned by every handler and hook.
///
/// This replaces the "truthy means stop" convention: a menu keeps cycling while
/// it sees [`Flow::Continue`] and ends its session on [`Flow::Stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep the loop running.
    #[default]
    Continue,
    /// End the current session.
    Stop,
}

impl Flow {
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}

/// A handler that does not say anything keeps the menu going.
impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

impl From<bool> for Flow {
    fn from(stop: bool) -> Self {
        if stop { Flow::Stop } else { Flow::Continue }
    }
}

/// Boxed action bound to a menu option.
///
/// Handlers get the menu value they belong to (the caller-owned state) and the
/// session [`Context`] for talking to the user.
pub type Handler<M> = Box<dyn Fn(&mut M, &mut Context<'_, M>) -> Result<Flow>>;

/// One selectable entry of a menu.
///
/// The key is what the user types (matched case-insensitively), the line is
/// what the menu shows, exactly as written.
pub struct MenuOption<M> {
    key: String,
    line: String,
    handler: Handler<M>,
}

impl<M: 'static> MenuOption<M> {
    /// Declare an option with an explicit key and display line.
    ///
    /// Example
    /// ```
    /// use menu_engine::{Flow, MenuOption};
    ///
    /// struct Counter(u32);
    ///
    /// let add = MenuOption::new("a", "A: add one", |c: &mut Counter, _ctx| {
    ///     c.0 += 1;
    ///     Ok(())
    /// });
    /// assert_eq!(add.key(), "a");
    /// let quit = MenuOption::new("b", "B: quit", |_: &mut Counter, _ctx| Ok(Flow::Stop));
    /// assert_eq!(quit.line(), "B: quit");
    /// ```
    pub fn new<F, R>(key: impl Into<String>, line: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut M, &mut Context<'_, M>) -> Result<R> + 'static,
        R: Into<Flow> + 'static,
    {
        Self {
            key: key.into().trim().to_owned(),
            line: line.into().trim().to_owned(),
            handler: Box::new(move |menu, ctx| handler(menu, ctx).map(Into::into)),
        }
    }

    /// Declare an option whose key is the text before the first colon of its
    /// display line, e.g. `"F: Foo"` is selected with `f`.
    ///
    /// Only the first line of `description` is shown. A description without a
    /// colon gets an empty key, which the registry refuses to build.
    pub fn described<F, R>(description: &str, handler: F) -> Self
    where
        F: Fn(&mut M, &mut Context<'_, M>) -> Result<R> + 'static,
        R: Into<Flow> + 'static,
    {
        let line = description.trim().lines().next().unwrap_or_default().trim();
        let key = match line.split_once(':') {
            Some((key, _)) => key,
            None => "",
        };
        Self::new(key, line, handler)
    }
}

impl<M> MenuOption<M> {
    /// The key as declared (trimmed, original case).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The key used for matching user input.
    pub fn folded_key(&self) -> String {
        fold(&self.key)
    }

    /// The display line shown in the menu.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub(crate) fn invoke(&self, menu: &mut M, ctx: &mut Context<'_, M>) -> Result<Flow> {
        (self.handler)(menu, ctx)
    }
}

impl<M> std::fmt::Debug for MenuOption<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuOption")
            .field("key", &self.key)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

/// Case folding applied to keys and user choices before matching.
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    #[test]
    fn test_flow_conversions() {
        assert_eq!(Flow::from(()), Flow::Continue);
        assert_eq!(Flow::from(true), Flow::Stop);
        assert_eq!(Flow::from(false), Flow::Continue);
        assert!(Flow::Stop.is_stop());
        assert!(!Flow::default().is_stop());
    }

    #[test]
    fn test_described_takes_key_before_first_colon() {
        let opt = MenuOption::described(
            "\n  C: Play with your hands.\n\n  This is just rock-paper-scissors.\n",
            |_: &mut Nothing, _| Ok(()),
        );
        assert_eq!(opt.key(), "C");
        assert_eq!(opt.folded_key(), "c");
        assert_eq!(opt.line(), "C: Play with your hands.");
    }

    #[test]
    fn test_described_without_colon_has_empty_key() {
        let opt = MenuOption::described("B. Play with numbers.", |_: &mut Nothing, _| Ok(()));
        assert_eq!(opt.key(), "");
        assert_eq!(opt.line(), "B. Play with numbers.");
    }

    #[test]
    fn test_new_trims_key_and_line() {
        let opt = MenuOption::new("  Quit ", " Q: Quit.  ", |_: &mut Nothing, _| Ok(true));
        assert_eq!(opt.key(), "Quit");
        assert_eq!(opt.folded_key(), "quit");
        assert_eq!(opt.line(), "Q: Quit.");
    }
}
