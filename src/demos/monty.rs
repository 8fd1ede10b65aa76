use crate::{Context, Flow, Menu, MenuOption};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

const NEGATIVES: [&str; 6] = ["no", "not", "isn't", "ain't", "doesn't", "wasn't"];

/// A menu of Monty Python skits.
pub struct MontyMenu {
    rng: StdRng,
    argument_limit: Duration,
}

impl MontyMenu {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible skits.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            argument_limit: Duration::from_secs(120),
        }
    }

    /// How long the argument goes on for.
    pub fn with_argument_limit(mut self, limit: Duration) -> Self {
        self.argument_limit = limit;
        self
    }

    fn argument(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        let start = Instant::now();
        let mut said = ctx.ask("Please state an assertion to argue about: ")?;
        while start.elapsed() < self.argument_limit {
            said = ctx.ask(gainsay(&said))?;
        }
        writeln!(ctx.out(), "I'm sorry, your five minutes is up.")?;
        ctx.ask("Press Enter to continue: ")?;
        Ok(())
    }

    fn knight(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        let mut limbs = vec!["other leg", "leg", "other arm", "arm"];
        let mut combat = false;
        while let Some(&next) = limbs.last() {
            if !combat {
                writeln!(ctx.out(), "None shall pass.")?;
            }
            let action = ctx.ask("What do you do? ")?;
            if action.trim().eq_ignore_ascii_case("attack") {
                limbs.pop();
                writeln!(
                    ctx.out(),
                    "Excellent attack. You chop off the black knight's {}.",
                    next
                )?;
                combat = true;
            } else if combat {
                writeln!(
                    ctx.out(),
                    "The black knight attacks, but you easily block his blow."
                )?;
            }
        }
        ctx.ask("Press Enter to call it a draw: ")?;
        Ok(())
    }

    fn spam(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        let food = ctx.ask("What would you like to eat? ")?;
        let before = self.rng.random_range(2..=4);
        let after = self.rng.random_range(0..=2);

        let mut meal = vec!["spam"; before];
        meal.push(food.trim());
        meal.extend(std::iter::repeat_n("spam", after));
        meal.push("and spam.");

        writeln!(ctx.out(), "Here is your {}", meal.join(", "))?;
        ctx.ask("Press Enter to eat a wafer thin wafer and explode: ")?;
        Ok(())
    }
}

impl Default for MontyMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// Contradict whatever was just said.
pub fn gainsay(said: &str) -> &'static str {
    let lowered = said.to_lowercase();
    if lowered
        .split_whitespace()
        .any(|word| NEGATIVES.contains(&word))
    {
        "Yes it is. "
    } else {
        "No it isn't. "
    }
}

impl Menu for MontyMenu {
    fn options(&self) -> Vec<MenuOption<Self>> {
        vec![
            MenuOption::described("A: Have an intellectual discussion.", Self::argument),
            MenuOption::described("B: Get some vigorous exercise.", Self::knight),
            MenuOption::described("C: Enjoy some fine dining.", Self::spam),
            MenuOption::described("D: Stop it, that's just silly.", |_: &mut Self, _| {
                Ok(Flow::Stop)
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MenuError, MenuLoop, StreamTerminal};

    fn run(menu: MontyMenu, input: &str) -> (Result<()>, String) {
        let (term, out) = StreamTerminal::scripted(input);
        let mut menu = MenuLoop::new(menu).unwrap().with_terminal(term);
        let result = menu.menuloop();
        (result, out.contents())
    }

    #[test]
    fn test_gainsay() {
        assert_eq!(gainsay("This is an argument"), "No it isn't. ");
        assert_eq!(gainsay("It is NOT"), "Yes it is. ");
        assert_eq!(gainsay("no it isn't"), "Yes it is. ");
    }

    #[test]
    fn test_knight_loses_all_limbs() {
        let input = "b\nlook\nattack\nwave\nattack\nattack\nattack\n\nd\n";
        let (result, out) = run(MontyMenu::with_seed(1), input);
        result.unwrap();

        assert_eq!(out.matches("None shall pass.").count(), 2);
        assert_eq!(out.matches("The black knight attacks").count(), 1);
        let limbs = [
            "knight's arm.",
            "knight's other arm.",
            "knight's leg.",
            "knight's other leg.",
        ];
        let order: Vec<usize> = limbs
            .iter()
            .map(|limb| out.find(limb).unwrap())
            .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(out.contains("Press Enter to call it a draw: "));
    }

    #[test]
    fn test_spam_serves_food_between_spam() {
        let (result, out) = run(MontyMenu::with_seed(7), "c\neggs\n\nd\n");
        result.unwrap();

        let line = out
            .lines()
            .find(|line| line.contains("Here is your "))
            .unwrap();
        let line = line.split("Here is your ").nth(1).unwrap();
        let items: Vec<&str> = line.split(", ").collect();
        let eggs = items.iter().position(|item| *item == "eggs").unwrap();
        assert!((2..=4).contains(&eggs));
        assert!(items[..eggs].iter().all(|item| *item == "spam"));
        assert_eq!(*items.last().unwrap(), "and spam.");
        assert!(items.len() - eggs - 2 <= 2);
    }

    #[test]
    fn test_argument_ends_when_time_is_up() {
        let menu = MontyMenu::with_seed(3).with_argument_limit(Duration::ZERO);
        let (result, out) = run(menu, "a\nYes it is\n\nd\n");
        result.unwrap();
        assert!(out.contains("Please state an assertion to argue about: "));
        assert!(out.contains("I'm sorry, your five minutes is up.\nPress Enter to continue: "));
    }

    #[test]
    fn test_skit_fails_when_input_runs_out() {
        let (result, _out) = run(MontyMenu::with_seed(3), "c\n");
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<MenuError>(),
            Some(&MenuError::InputClosed {
                prompt: "What would you like to eat? ".to_string()
            })
        );
    }
}
