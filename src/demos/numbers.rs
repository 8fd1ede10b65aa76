use crate::{Context, Flow, Menu, MenuOption};
use anyhow::Result;

/// Once the last number passes this, the menu closes itself.
const LIMIT: u64 = 99;

/// Grow an integer sequence one step at a time.
///
/// The sequence starts as `0, 1` at the beginning of every session. Each option
/// appends one number derived from the last ones; the session ends on quit or
/// as soon as the last number goes over 99.
#[derive(Debug, Default)]
pub struct NumberMenu {
    numbers: Vec<u64>,
}

impl NumberMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    pub fn last(&self) -> u64 {
        self.numbers.last().copied().unwrap_or_default()
    }

    fn fibonacci(&mut self, _ctx: &mut Context<'_, Self>) -> Result<()> {
        let n = self.numbers.len();
        let next = match n {
            0 => 0,
            1 => self.numbers[0],
            _ => self.numbers[n - 1] + self.numbers[n - 2],
        };
        self.numbers.push(next);
        Ok(())
    }

    fn prime(&mut self, _ctx: &mut Context<'_, Self>) -> Result<()> {
        self.numbers.push(next_prime(self.last()));
        Ok(())
    }

    fn collatz(&mut self, _ctx: &mut Context<'_, Self>) -> Result<()> {
        let last = self.last();
        self.numbers
            .push(if last % 2 == 1 { last * 3 + 1 } else { last / 2 });
        Ok(())
    }

    fn status(&self) -> String {
        format!("The number is now {}.", self.last())
    }
}

/// The smallest prime strictly greater than `n`.
pub fn next_prime(n: u64) -> u64 {
    (n + 1..).find(|&k| is_prime(k)).unwrap_or(2)
}

fn is_prime(k: u64) -> bool {
    k >= 2 && (2..).take_while(|d| d * d <= k).all(|d| k % d != 0)
}

impl Menu for NumberMenu {
    fn options(&self) -> Vec<MenuOption<Self>> {
        vec![
            MenuOption::described("1: Add the last two numbers.", Self::fibonacci),
            MenuOption::described("2: Go up to the next prime.", Self::prime),
            MenuOption::described("3: Collatz the last number.", Self::collatz),
            MenuOption::described("4: Quit.", |_: &mut Self, _| Ok(Flow::Stop)),
        ]
    }

    /// Numeric keys sort as numbers, so `10` would come after `9`.
    fn sort_menu(options: &mut [MenuOption<Self>]) {
        options.sort_by_key(|option| option.key().parse::<u32>().unwrap_or(u32::MAX));
    }

    fn preloop(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        self.numbers = vec![0, 1];
        ctx.set_status(self.status());
        Ok(())
    }

    fn postchoice(
        &mut self,
        flow: Flow,
        _choice: &str,
        ctx: &mut Context<'_, Self>,
    ) -> Result<Flow> {
        if ctx.status().is_empty() {
            ctx.set_status(self.status());
        }
        if self.last() > LIMIT {
            Ok(Flow::Stop)
        } else {
            Ok(flow)
        }
    }

    fn postloop(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        writeln!(ctx.out(), "The final number is {}.", self.last())?;
        writeln!(ctx.out(), "Have a nice day.")?;
        Ok(())
    }
}
