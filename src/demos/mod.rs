//! Complete menus built on the engine: a number sequence toy, a handful of
//! Monty Python skits, a maze and a top level menu tying them together.

mod maze;
mod monty;
mod numbers;
mod top;

pub use maze::{Direction, Maze};
pub use monty::{MontyMenu, gainsay};
pub use numbers::{NumberMenu, next_prime};
pub use top::TopMenu;
