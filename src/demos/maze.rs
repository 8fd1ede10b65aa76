use crate::{Context, Flow, Menu, MenuOption, unrecognized_status};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

/// Which ways are open from each cell, rows top to bottom.
///
/// ```text
/// +   +-------+-----------+---------------+
/// |           |           |               |
/// |   +---+   |   +---+   +   +---+---+   |
/// |   |       |       |       |   |       |
/// |   +---+---+---+   +---+   +   |   +---+
/// |       |       |       |       |   |   |
/// +---+   |   +---+   +   +---+---+   +   |
/// |           |       |       |           |
/// |   +-------+   +   +---+---+   +-------+
/// |               |       |               |
/// +---------------+-------+-----------+   +
/// ```
const MAP: [[&str; 10]; 5] = [
    ["se", "ew", "ws", "es", "we", "ws", "es", "we", "we", "ws"],
    ["sn", "e", "wn", "ne", "sw", "ne", "wns", "s", "se", "nw"],
    ["ne", "sw", "se", "w", "nse", "ws", "en", "wn", "ns", "s"],
    ["se", "wen", "wn", "se", "nsw", "ne", "w", "se", "ewn", "wn"],
    ["ne", "ew", "ew", "nw", "ne", "w", "e", "wen", "ew", "w"],
];
const START: (usize, usize) = (0, 0);
const EXIT: (usize, usize) = (9, 4);

const INTRO: &str =
    "You are in a maze.\nYou have a torch, but it barely lights past the end of your hand.";

const HELP_TEXT: &str = "This is a maze game. The only info you get is what directions you can move from
where you are. You may move by typing in any of the four cardinal compass
points: north, south, east, or west. You may abbreviate any of these
commands by just using the first letter: n, s, e, or w.";

/// Odds that the magic word does anything.
const TELEPORT_ODDS: f64 = 0.23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }

    fn word(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// A maze you walk through in the dark, knowing only which ways are open.
///
/// Moves can be abbreviated to their first letter and take an optional repeat
/// count, e.g. `e 3`.
pub struct Maze {
    x: usize,
    y: usize,
    moves: usize,
    last_moves: usize,
    command: Regex,
    rng: StdRng,
}

impl Maze {
    pub fn new() -> Result<Self> {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Result<Self> {
        Ok(Self {
            x: START.0,
            y: START.1,
            moves: 1,
            last_moves: 1,
            command: Regex::new(r"^([A-Za-z]+)(?:\s+(\d+))?$")?,
            rng,
        })
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    fn current(&self) -> &'static str {
        MAP[self.y][self.x]
    }

    /// Walk up to `self.moves` cells, stopping at the first wall.
    fn travel(&mut self, direction: Direction, ctx: &mut Context<'_, Self>) -> Result<()> {
        self.last_moves = self.moves;
        for _ in 0..self.moves {
            let (dx, dy) = direction.delta();
            let open = self.current().contains(direction.letter());
            let next = (
                self.x.checked_add_signed(dx),
                self.y.checked_add_signed(dy),
            );
            match next {
                (Some(x), Some(y)) if open && y < MAP.len() && x < MAP[y].len() => {
                    self.x = x;
                    self.y = y;
                    writeln!(ctx.out(), "moving...")?;
                }
                _ => {
                    writeln!(ctx.out(), "Ow! You bump into a wall.")?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Describe the ways out of the current cell.
    pub fn directions(&self) -> String {
        let words: Vec<&str> = self
            .current()
            .chars()
            .filter_map(Direction::from_letter)
            .map(Direction::word)
            .collect();
        match words.as_slice() {
            [a] => format!("You are in a dead end. You can only move to the {}.", a),
            [a, b] => format!("You are in a hallway. You can move {} or {}.", a, b),
            [a, b, c] => format!(
                "You are at an intersection. You can move {}, {}, or {}.",
                a, b, c
            ),
            _ => format!("You are in an open space. You can move {}.", words.join(", ")),
        }
    }

    fn teleport(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        if self.rng.random_bool(TELEPORT_ODDS) {
            self.y = self.rng.random_range(0..MAP.len());
            self.x = self.rng.random_range(0..MAP[self.y].len());
            writeln!(ctx.out(), "Poof! You have been teleported!")?;
        } else {
            writeln!(ctx.out(), "Nothing happens.")?;
        }
        Ok(())
    }
}

fn movement(direction: Direction) -> MenuOption<Maze> {
    let line = format!(
        "{}: Move to the {}. Add a number to move several times.",
        direction.word(),
        direction.word()
    );
    MenuOption::new(direction.word(), line, move |maze: &mut Maze, ctx| {
        maze.travel(direction, ctx)
    })
}

impl Menu for Maze {
    fn options(&self) -> Vec<MenuOption<Self>> {
        vec![
            movement(Direction::North),
            movement(Direction::South),
            movement(Direction::East),
            movement(Direction::West),
            MenuOption::described("help: Explain the game.", |_: &mut Self, ctx| {
                writeln!(ctx.out(), "{}", HELP_TEXT)?;
                Ok(())
            }),
            MenuOption::described("quit: Give up and quit.", |_: &mut Self, _| Ok(Flow::Stop)),
        ]
    }

    fn prompt(&self) -> &str {
        "In the maze: "
    }

    fn intro(&self) -> Option<&str> {
        Some(INTRO)
    }

    fn preloop(&mut self, ctx: &mut Context<'_, Self>) -> Result<()> {
        (self.x, self.y) = START;
        self.last_moves = 1;
        ctx.set_intro(format!("{}\n{}", INTRO, self.directions()));
        Ok(())
    }

    /// Expand `n`/`s`/`e`/`w` and peel off a repeat count.
    fn prechoice(&mut self, choice: String, _ctx: &mut Context<'_, Self>) -> Result<String> {
        self.moves = 1;
        let Some(caps) = self.command.captures(&choice) else {
            return Ok(choice);
        };
        if let Some(count) = caps.get(2) {
            match count.as_str().parse() {
                Ok(moves) => self.moves = moves,
                Err(_) => return Ok(choice),
            }
        }
        let word = caps[1].to_lowercase();
        let mut letters = word.chars();
        let command = match (letters.next().and_then(Direction::from_letter), letters.next()) {
            (Some(direction), None) => direction.word().to_owned(),
            _ => word,
        };
        Ok(command)
    }

    /// Repeat the last move, count included.
    fn emptyline(&mut self, ctx: &mut Context<'_, Self>) -> Result<Flow> {
        let Some(choice) = ctx.last_choice().map(str::to_owned) else {
            return Ok(Flow::Continue);
        };
        self.moves = self.last_moves;
        self.onechoice(&choice, ctx)
    }

    fn unrecognized(&mut self, choice: &str, ctx: &mut Context<'_, Self>) -> Result<Flow> {
        if choice.eq_ignore_ascii_case("xyzzy") {
            self.teleport(ctx)?;
        } else {
            ctx.set_status(unrecognized_status(choice));
        }
        Ok(Flow::Continue)
    }

    fn postchoice(
        &mut self,
        flow: Flow,
        _choice: &str,
        ctx: &mut Context<'_, Self>,
    ) -> Result<Flow> {
        if self.position() == EXIT {
            writeln!(ctx.out(), "You made it out of the maze!")?;
            return Ok(Flow::Stop);
        }
        if !flow.is_stop() {
            writeln!(ctx.out(), "{}", self.directions())?;
        }
        Ok(flow)
    }
}
