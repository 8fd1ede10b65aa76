use crate::terminal::Terminal;
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Owns the terminal a menu loop talks through, plus an optional one-shot
/// replacement for the next session.
///
/// [`IoScope::enter`] swaps the replacement in and returns a guard; dropping the
/// guard puts the original terminal back. Since the swap-back lives in `Drop`,
/// it happens however the session ends: a stop, an error bubbling out of a
/// hook or handler, or a panic.
pub struct IoScope {
    active: Box<dyn Terminal>,
    pending: Option<Box<dyn Terminal>>,
    saved: Option<Box<dyn Terminal>>,
}

impl IoScope {
    pub fn new(terminal: Box<dyn Terminal>) -> Self {
        Self {
            active: terminal,
            pending: None,
            saved: None,
        }
    }

    /// Use `terminal` for the next session only.
    pub fn redirect(&mut self, terminal: Box<dyn Terminal>) {
        self.pending = Some(terminal);
    }

    /// Replace the default terminal for good.
    pub fn replace(&mut self, terminal: Box<dyn Terminal>) -> Box<dyn Terminal> {
        std::mem::replace(&mut self.active, terminal)
    }

    pub fn is_redirect_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a session, swapping in the pending replacement if there is one.
    pub fn enter(&mut self) -> ActiveScope<'_> {
        if let Some(replacement) = self.pending.take() {
            debug!("redirecting menu input and output");
            self.saved = Some(std::mem::replace(&mut self.active, replacement));
        }
        ActiveScope { scope: self }
    }

    fn restore(&mut self) {
        if let Some(original) = self.saved.take() {
            debug!("restoring menu input and output");
            self.active = original;
        }
    }

    pub fn terminal(&mut self) -> &mut dyn Terminal {
        self.active.as_mut()
    }
}

/// A session's hold on the terminal. Restores the original on drop.
pub struct ActiveScope<'a> {
    scope: &'a mut IoScope,
}

impl Deref for ActiveScope<'_> {
    type Target = IoScope;

    fn deref(&self) -> &IoScope {
        self.scope
    }
}

impl DerefMut for ActiveScope<'_> {
    fn deref_mut(&mut self) -> &mut IoScope {
        self.scope
    }
}

impl Drop for ActiveScope<'_> {
    fn drop(&mut self) {
        self.scope.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::StreamTerminal;

    #[test]
    fn test_enter_without_redirect_keeps_terminal() {
        let (term, out) = StreamTerminal::scripted("");
        let mut scope = IoScope::new(Box::new(term));
        {
            let mut active = scope.enter();
            write!(active.terminal().output(), "x").unwrap();
        }
        assert_eq!(out.contents(), "x");
    }

    #[test]
    fn test_redirect_is_undone_on_drop() {
        let (original, original_out) = StreamTerminal::scripted("");
        let (replacement, replacement_out) = StreamTerminal::scripted("");
        let mut scope = IoScope::new(Box::new(original));
        scope.redirect(Box::new(replacement));
        assert!(scope.is_redirect_pending());
        {
            let mut active = scope.enter();
            write!(active.terminal().output(), "redirected").unwrap();
        }
        assert!(!scope.is_redirect_pending());
        write!(scope.terminal().output(), "original").unwrap();

        assert_eq!(replacement_out.contents(), "redirected");
        assert_eq!(original_out.contents(), "original");
    }

    #[test]
    fn test_redirect_is_undone_on_panic() {
        let (original, original_out) = StreamTerminal::scripted("");
        let (replacement, _) = StreamTerminal::scripted("");
        let mut scope = IoScope::new(Box::new(original));
        scope.redirect(Box::new(replacement));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _active = scope.enter();
            panic!("handler blew up");
        }));
        assert!(result.is_err());

        write!(scope.terminal().output(), "back").unwrap();
        assert_eq!(original_out.contents(), "back");
    }
}
