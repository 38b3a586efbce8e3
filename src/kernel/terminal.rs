use std::collections::VecDeque;

use crate::models::VfsPath;

pub const WELCOME_BANNER: &str = "Welcome to Auris Terminal. Type 'help' for available commands.";

const DEFAULT_SCROLLBACK_LIMIT: usize = 1000;
const DEFAULT_HISTORY_LIMIT: usize = 500;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Input,
    Output,
    Error,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl TerminalEntry {
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Input,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Success,
            text: text.into(),
        }
    }
}

/// Interpreter state: working directory, scrollback and command recall.
///
/// `history` keeps the most recent command at the front; `history_cursor`
/// indexes into it while the user is browsing with up/down.
#[derive(Debug)]
pub struct TerminalSession {
    cwd: VfsPath,
    entries: VecDeque<TerminalEntry>,
    history: VecDeque<String>,
    history_cursor: Option<usize>,
    input: String,
    scrollback_limit: usize,
    history_limit: usize,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLBACK_LIMIT, DEFAULT_HISTORY_LIMIT)
    }
}

impl TerminalSession {
    pub fn new(scrollback_limit: usize, history_limit: usize) -> Self {
        let mut session = Self {
            cwd: VfsPath::root(),
            entries: VecDeque::new(),
            history: VecDeque::new(),
            history_cursor: None,
            input: String::new(),
            scrollback_limit: scrollback_limit.max(1),
            history_limit: history_limit.max(1),
        };
        session.push(TerminalEntry::output(WELCOME_BANNER));
        session
    }

    pub fn cwd(&self) -> &VfsPath {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: VfsPath) {
        self.cwd = cwd;
    }

    pub fn entries(&self) -> impl Iterator<Item = &TerminalEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: TerminalEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.scrollback_limit {
            self.entries.pop_front();
        }
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TerminalEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    /// Drops the whole scrollback, banner included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Pushes a submitted line onto the front of history and leaves browse
    /// mode. Blank lines are not recorded.
    pub fn record_command(&mut self, line: &str) {
        self.history_cursor = None;
        self.input.clear();
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.history.push_front(line.to_string());
        self.history.truncate(self.history_limit);
    }

    /// Oldest first, the order `history` prints in.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().rev().map(String::as_str)
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    /// Steps toward older commands, clamping at the oldest one.
    pub fn history_prev(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let next = match self.history_cursor {
            None => 0,
            Some(i) => (i + 1).min(self.history.len() - 1),
        };
        let changed = self.history_cursor != Some(next);
        self.history_cursor = Some(next);
        if let Some(line) = self.history.get(next) {
            self.input.clone_from(line);
        }
        changed
    }

    /// Steps toward newer commands. Moving past the newest leaves browse mode
    /// with an empty input line.
    pub fn history_next(&mut self) -> bool {
        match self.history_cursor {
            None => false,
            Some(0) => {
                self.history_cursor = None;
                self.input.clear();
                true
            }
            Some(i) => {
                self.history_cursor = Some(i - 1);
                if let Some(line) = self.history.get(i - 1) {
                    self.input.clone_from(line);
                }
                true
            }
        }
    }

    pub fn prompt(&self, user: &str) -> String {
        format!("{user}@auris:{}$", self.cwd)
    }
}

/// Splits a command line on whitespace. A double-quoted run is one token
/// with the quotes stripped; an unterminated quote runs to end of line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}
