//! rustyline helper: command completion, hints and highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use hcms_core::route::Page;
use strum::IntoEnumIterator;

use crate::command::COMMANDS;

#[derive(Clone)]
pub struct PortalHelper {
    commands: Vec<String>,
    pages: Vec<String>,
}

impl PortalHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            pages: Page::iter().map(|p| p.path().to_string()).collect(),
        }
    }

    fn candidates<'a>(&'a self, line: &str) -> (usize, Vec<&'a String>) {
        if let Some(path) = line.strip_prefix("go ") {
            let start = line.len() - path.len();
            let matches = self.pages.iter().filter(|p| p.starts_with(path)).collect();
            return (start, matches);
        }
        if line.contains(' ') {
            return (0, Vec::new());
        }
        (0, self.commands.iter().filter(|c| c.starts_with(line)).collect())
    }
}

impl Helper for PortalHelper {}

impl Completer for PortalHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|m| Pair {
                display: m.clone(),
                replacement: m.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for PortalHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or_default();
        if line.starts_with(word) && self.commands.iter().any(|c| c == word) {
            Owned(format!("{}{}", word.bright_cyan(), &line[word.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PortalHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|m| m.len() > typed.len())
            .map(|m| m[typed.len()..].to_string())
    }
}

impl Validator for PortalHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_command_words() {
        let helper = PortalHelper::new();
        let (start, matches) = helper.candidates("sp");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["specialty"]);
        assert!(helper.candidates("search ad").1.is_empty());
    }

    #[test]
    fn test_completes_page_paths_after_go() {
        let helper = PortalHelper::new();
        let (start, matches) = helper.candidates("go /patientR");
        assert_eq!(start, 3);
        assert_eq!(matches, vec!["/patientRecord.html"]);
    }
}
