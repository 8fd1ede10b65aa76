use super::{Maze, MontyMenu, NumberMenu};
use crate::{Context, Flow, Menu, MenuOption};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};

const PLAYS: [&str; 3] = ["rock", "paper", "scissors"];

/// What each play beats.
fn beats(play: &str) -> Option<&'static str> {
    match play {
        "rock" => Some("scissors"),
        "paper" => Some("rock"),
        "scissors" => Some("paper"),
        _ => None,
    }
}

/// The top level menu, leading to all the other games.
pub struct TopMenu {
    rng: StdRng,
}

impl TopMenu {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the rock-paper-scissors bot and every sub-menu it opens.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn maze(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        let maze = Maze::with_seed(self.rng.next_u64())?;
        ctx.submenu(maze)?;
        Ok(())
    }

    fn numbers(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        ctx.submenu(NumberMenu::new())?;
        Ok(())
    }

    /// Rock-paper-scissors until somebody wins.
    fn rps(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        loop {
            let play = ctx.ask("Rock, paper, or scissors? ")?.trim().to_lowercase();
            let bot = PLAYS.choose(&mut self.rng).copied().unwrap_or("rock");
            match beats(&play) {
                None => writeln!(ctx.out(), "Invalid play. Come on, this is kid's stuff.")?,
                Some(_) if play == bot => writeln!(ctx.out(), "Draw, play again.")?,
                Some(beaten) if beaten == bot => {
                    writeln!(ctx.out(), "I chose {}. You won!", bot)?;
                    return Ok(());
                }
                Some(_) => {
                    writeln!(ctx.out(), "I chose {}. You lose.", bot)?;
                    return Ok(());
                }
            }
        }
    }

    fn words(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        ctx.submenu(MontyMenu::with_seed(self.rng.next_u64()))?;
        Ok(())
    }
}

impl Default for TopMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu for TopMenu {
    fn options(&self) -> Vec<MenuOption<Self>> {
        vec![
            MenuOption::described("A: Play in a maze.", Self::maze),
            MenuOption::described("B: Play with numbers.", Self::numbers),
            MenuOption::described(
                "C: Play with your hands.\n\nThis is just a game of rock-paper-scissors.",
                Self::rps,
            ),
            MenuOption::described("D: Play with words.", Self::words),
            MenuOption::described("E: Quit.", |_: &mut Self, _| Ok(Flow::Stop)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MenuLoop, StreamTerminal};

    fn run(input: &str) -> String {
        let (term, out) = StreamTerminal::scripted(input);
        let mut menu = MenuLoop::new(TopMenu::with_seed(5)).unwrap().with_terminal(term);
        menu.menuloop().unwrap();
        out.contents()
    }

    #[test]
    fn test_menu_text() {
        let menu = MenuLoop::new(TopMenu::with_seed(5)).unwrap();
        assert_eq!(
            menu.text(),
            concat!(
                "\nA: Play in a maze.",
                "\nB: Play with numbers.",
                "\nC: Play with your hands.",
                "\nD: Play with words.",
                "\nE: Quit."
            )
        );
    }

    #[test]
    fn test_beats() {
        assert_eq!(beats("rock"), Some("scissors"));
        assert_eq!(beats("paper"), Some("rock"));
        assert_eq!(beats("scissors"), Some("paper"));
        assert_eq!(beats("lizard"), None);
    }

    #[test]
    fn test_numbers_submenu_returns_to_top() {
        let out = run("b\n2\n4\ne\n");
        assert!(out.contains("1: Add the last two numbers."));
        assert!(out.contains("The final number is 2.\nHave a nice day.\n"));
        // Back at the top menu before quitting.
        let after = out.split("Have a nice day.\n").nth(1).unwrap();
        assert!(after.contains("A: Play in a maze."));
    }

    #[test]
    fn test_maze_submenu_quits_back() {
        let out = run("a\nquit\ne\n");
        assert!(out.contains("You are in a maze."));
        assert!(out.contains("In the maze: "));
        assert!(out.ends_with("Please enter your selection: "));
    }

    #[test]
    fn test_words_submenu() {
        let out = run("d\nd\ne\n");
        assert!(out.contains("D: Stop it, that's just silly."));
    }

    #[test]
    fn test_rps_plays_until_decided() {
        // Enough rounds that one of them ends the game; the rest fall through to
        // the top menu and get repeated or quit.
        let mut input = String::from("c\nlizard\n");
        input.push_str(&"rock\n".repeat(20));
        input.push_str("e\n");
        let (term, out) = StreamTerminal::scripted(input);
        let mut menu = MenuLoop::new(TopMenu::with_seed(9)).unwrap().with_terminal(term);
        menu.menuloop().unwrap();

        let out = out.contents();
        assert!(out.contains("Invalid play. Come on, this is kid's stuff."));
        assert!(
            out.contains("I chose scissors. You won!") || out.contains("I chose paper. You lose.")
        );
    }
}
