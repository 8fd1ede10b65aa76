use crate::error::MenuError;
use crate::menu::Menu;
use crate::option::{MenuOption, fold};
use std::collections::HashMap;

/// The static part of a menu: its options in display order, the lookup table
/// from folded key to option and the rendered menu text.
///
/// Built once per menu value and never changed while a session runs.
pub struct Registry<M> {
    options: Vec<MenuOption<M>>,
    index: HashMap<String, usize>,
    text: String,
}

impl<M: Menu> Registry<M> {
    /// Collect, validate and sort the options declared by `menu`.
    pub fn build(menu: &M) -> Result<Self, MenuError> {
        let mut options = menu.options();
        M::sort_menu(&mut options);
        Self::from_sorted(options)
    }
}

impl<M> Registry<M> {
    /// Build a registry from options that are already in display order.
    pub fn from_sorted(options: Vec<MenuOption<M>>) -> Result<Self, MenuError> {
        let mut index = HashMap::with_capacity(options.len());
        for (pos, option) in options.iter().enumerate() {
            if option.key().is_empty() {
                return Err(MenuError::MissingKey {
                    line: option.line().to_owned(),
                });
            }
            if let Some(prev) = index.insert(option.folded_key(), pos) {
                return Err(MenuError::DuplicateKey {
                    key: option.folded_key(),
                    first: options[prev].line().to_owned(),
                    second: option.line().to_owned(),
                });
            }
        }

        let lines: Vec<&str> = options.iter().map(MenuOption::line).collect();
        let text = format!("\n{}", lines.join("\n"));

        Ok(Self {
            options,
            index,
            text,
        })
    }

    /// Find the option for a user choice, ignoring case.
    pub fn lookup(&self, choice: &str) -> Option<&MenuOption<M>> {
        self.index.get(&fold(choice)).map(|&pos| &self.options[pos])
    }

    /// Options in display order.
    pub fn options(&self) -> &[MenuOption<M>] {
        &self.options
    }

    /// The rendered menu: a blank line, then one line per option.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Default ordering of menu lines: by declared key, as written.
pub fn sort_by_key<M>(options: &mut [MenuOption<M>]) {
    options.sort_by(|a, b| a.key().cmp(b.key()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Flow;

    #[derive(Default)]
    struct Letters {
        extra: Vec<(&'static str, &'static str)>,
    }

    impl Menu for Letters {
        fn options(&self) -> Vec<MenuOption<Self>> {
            let mut options = vec![
                MenuOption::described("C: Third.", |_: &mut Self, _| Ok(())),
                MenuOption::described("A: First.", |_: &mut Self, _| Ok(())),
                MenuOption::described("B: Second.", |_: &mut Self, _| Ok(Flow::Stop)),
            ];
            for (key, line) in &self.extra {
                options.push(MenuOption::new(*key, *line, |_: &mut Self, _| Ok(())));
            }
            options
        }
    }

    #[test]
    fn test_menu_text_sorted_by_key() {
        let registry = Registry::build(&Letters::default()).unwrap();
        assert_eq!(registry.text(), "\nA: First.\nB: Second.\nC: Third.");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_menu_text_is_deterministic() {
        let menu = Letters::default();
        let first = Registry::build(&menu).unwrap();
        let second = Registry::build(&menu).unwrap();
        assert_eq!(first.text(), second.text());
        assert_eq!(first.text(), first.text());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let registry = Registry::build(&Letters::default()).unwrap();
        assert_eq!(registry.lookup("a").unwrap().line(), "A: First.");
        assert_eq!(registry.lookup("A").unwrap().line(), "A: First.");
        assert!(registry.lookup("d").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_word_keys_match_every_case_permutation() {
        let menu = Letters {
            extra: vec![("Go", "Go: Leave.")],
        };
        let registry = Registry::build(&menu).unwrap();
        for input in ["go", "gO", "Go", "GO"] {
            assert_eq!(registry.lookup(input).unwrap().key(), "Go");
        }
    }

    #[test]
    fn test_duplicate_keys_after_folding_fail() {
        let menu = Letters {
            extra: vec![("a", "a: Also first.")],
        };
        let err = Registry::build(&menu).err().unwrap();
        assert_eq!(
            err,
            MenuError::DuplicateKey {
                key: "a".to_string(),
                first: "A: First.".to_string(),
                second: "a: Also first.".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_key_fails() {
        let options = vec![MenuOption::described("No colon here.", |_: &mut Letters, _| {
            Ok(())
        })];
        let err = Registry::from_sorted(options).err().unwrap();
        assert_eq!(
            err,
            MenuError::MissingKey {
                line: "No colon here.".to_string()
            }
        );
    }

    #[test]
    fn test_from_sorted_keeps_given_order() {
        let options = vec![
            MenuOption::new("2", "2: Two.", |_: &mut Letters, _| Ok(())),
            MenuOption::new("10", "10: Ten.", |_: &mut Letters, _| Ok(())),
        ];
        let registry = Registry::from_sorted(options).unwrap();
        assert_eq!(registry.text(), "\n2: Two.\n10: Ten.");
    }

    #[test]
    fn test_sort_by_key_is_lexicographic() {
        let mut options = vec![
            MenuOption::new("2", "2: Two.", |_: &mut Letters, _| Ok(())),
            MenuOption::new("10", "10: Ten.", |_: &mut Letters, _| Ok(())),
        ];
        sort_by_key(&mut options);
        assert_eq!(options[0].key(), "10");
    }
}
