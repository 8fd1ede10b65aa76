//! A small engine for line-oriented interactive menus.
//!
//! A menu is a value implementing [`Menu`]: it declares its options (a key the
//! user types, the line shown for it and a handler) and may override hooks that
//! run around every choice. [`MenuLoop`] builds the option registry once, then
//! repeatedly shows the menu, reads a choice, dispatches it and checks whether
//! to stop. Input and output go through an injected [`Terminal`], so a menu can
//! be driven from a script or an in-memory buffer as easily as from a user.
//!
//! The [`demos`] module holds a few complete menus built on the engine.

mod context;
pub mod demos;
mod error;
mod io_adapters;
mod menu;
mod menu_loop;
mod option;
mod redirect;
mod registry;
mod terminal;

pub mod logging;

pub use context::{Context, SessionState};
pub use error::MenuError;
pub use io_adapters::SharedBuffer;
pub use menu::{DEFAULT_PROMPT, Menu, unrecognized_status};
pub use menu_loop::MenuLoop;
pub use option::{Flow, Handler, MenuOption};
pub use redirect::{ActiveScope, IoScope};
pub use registry::{Registry, sort_by_key};
pub use terminal::{EditorTerminal, StdioTerminal, StreamTerminal, Terminal};
