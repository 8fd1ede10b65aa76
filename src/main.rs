use anyhow::Context as _;
use argh::FromArgs;
use menu_engine::demos::{Maze, MontyMenu, NumberMenu, TopMenu};
use menu_engine::{
    EditorTerminal, Menu, MenuLoop, StdioTerminal, StreamTerminal, Terminal, logging,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(FromArgs)]
/// Play with a few menus built on menu_engine.
struct Args {
    #[argh(option, default = "MenuKind::Top")]
    /// which menu to open: top, numbers, monty or maze. Defaults to top.
    menu: MenuKind,

    #[argh(option)]
    /// read choices and answers from this file instead of the keyboard.
    script: Option<PathBuf>,

    #[argh(switch)]
    /// read plain lines from stdin, without line editing or history.
    plain: bool,

    #[argh(option)]
    /// text shown when asking for a choice.
    prompt: Option<String>,

    #[argh(option)]
    /// seed for the random parts of the games.
    seed: Option<u64>,

    #[argh(option)]
    /// write logs to this file. Falls back to $MENU_ENGINE_LOG.
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuKind {
    Top,
    Numbers,
    Monty,
    Maze,
}

impl FromStr for MenuKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(MenuKind::Top),
            "numbers" => Ok(MenuKind::Numbers),
            "monty" | "words" => Ok(MenuKind::Monty),
            "maze" => Ok(MenuKind::Maze),
            other => Err(format!(
                "unknown menu '{}', expected top, numbers, monty or maze",
                other
            )),
        }
    }
}

fn terminal(args: &Args) -> anyhow::Result<Box<dyn Terminal>> {
    if let Some(path) = &args.script {
        let file = File::open(path)
            .with_context(|| format!("can't open script {}", path.display()))?;
        return Ok(Box::new(StreamTerminal::new(BufReader::new(file), io::stdout())));
    }
    if args.plain {
        return Ok(Box::new(StdioTerminal::new()));
    }
    let editor = EditorTerminal::new().context("can't start the line editor")?;
    Ok(Box::new(editor))
}

fn run<M: Menu>(menu: M, args: &Args) -> anyhow::Result<()> {
    let mut menu_loop = MenuLoop::new(menu)?.with_terminal(terminal(args)?);
    if let Some(prompt) = &args.prompt {
        menu_loop = menu_loop.with_prompt(prompt.clone());
    }
    menu_loop.menuloop()
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    logging::init_tracing(args.log_file.as_deref())?;

    match (args.menu, args.seed) {
        (MenuKind::Top, Some(seed)) => run(TopMenu::with_seed(seed), &args),
        (MenuKind::Top, None) => run(TopMenu::new(), &args),
        (MenuKind::Numbers, _) => run(NumberMenu::new(), &args),
        (MenuKind::Monty, Some(seed)) => run(MontyMenu::with_seed(seed), &args),
        (MenuKind::Monty, None) => run(MontyMenu::new(), &args),
        (MenuKind::Maze, Some(seed)) => run(Maze::with_seed(seed)?, &args),
        (MenuKind::Maze, None) => run(Maze::new()?, &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_kind_parsing() {
        assert_eq!("top".parse::<MenuKind>(), Ok(MenuKind::Top));
        assert_eq!("Numbers".parse::<MenuKind>(), Ok(MenuKind::Numbers));
        assert_eq!("words".parse::<MenuKind>(), Ok(MenuKind::Monty));
        assert_eq!("MAZE".parse::<MenuKind>(), Ok(MenuKind::Maze));
        assert!("chess".parse::<MenuKind>().is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::from_args(&["menu_demo"], &["--menu", "maze", "--seed", "4", "--plain"])
            .unwrap();
        assert_eq!(args.menu, MenuKind::Maze);
        assert_eq!(args.seed, Some(4));
        assert!(args.plain);
        assert!(args.script.is_none());
    }

    #[test]
    fn test_args_default_menu() {
        let args = Args::from_args(&["menu_demo"], &[]).unwrap();
        assert_eq!(args.menu, MenuKind::Top);
        assert!(!args.plain);
    }
}
