//! Terminal command interpreter. Every command goes through the same store
//! operations the editor uses, so tab cascades apply to `rm` and `rename`.

use std::fmt::Display;

use crate::kernel::terminal::{tokenize, TerminalEntry};
use crate::models::{resolve, FileTreeError, NodeKind, VfsPath};

const HELP: &[(&str, &str)] = &[
    ("help", "Show this list"),
    ("ls [path]", "List directory contents"),
    ("cd [path]", "Change directory (no argument, / or ~ for root)"),
    ("pwd", "Print working directory"),
    ("cat <file>", "Print file contents"),
    ("touch <file>", "Create an empty file"),
    ("mkdir <dir>", "Create a directory"),
    ("rm <path>", "Remove a file or directory"),
    ("rename <path> <name>", "Rename a file or directory"),
    ("open <file>", "Open a file in the editor"),
    ("tree [path]", "Show the directory tree"),
    ("echo <text>", "Print text"),
    ("whoami", "Print the current user"),
    ("perm <path>", "Show the collaboration flag for a path"),
    ("history", "List previous commands"),
    ("clear", "Clear the terminal"),
];

fn fail(cmd: &str, target: &str, reason: impl Display) -> Vec<TerminalEntry> {
    vec![TerminalEntry::error(format!("{cmd}: {target}: {reason}"))]
}

fn missing_operand(cmd: &str) -> Vec<TerminalEntry> {
    vec![TerminalEntry::error(format!("{cmd}: missing operand"))]
}

impl super::Store {
    /// Runs one input line and returns the entries it produced, starting with
    /// the echoed input. The same entries are appended to the scrollback,
    /// except for `clear`, which empties it and returns nothing.
    pub fn execute_command(&mut self, line: &str) -> Vec<TerminalEntry> {
        let line = line.trim();
        self.state.terminal.record_command(line);
        if line.is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(line);
        let Some((command, args)) = tokens.split_first() else {
            return Vec::new();
        };
        if command == "clear" {
            self.state.terminal.clear();
            return Vec::new();
        }

        let mut entries = vec![TerminalEntry::input(format!("$ {line}"))];
        entries.extend(self.run_command(command, args));
        self.state.terminal.extend(entries.iter().cloned());
        entries
    }

    fn run_command(&mut self, command: &str, args: &[String]) -> Vec<TerminalEntry> {
        let first = args.first().map(String::as_str);
        match command {
            "help" => self.cmd_help(),
            "ls" => self.cmd_ls(first),
            "cd" => self.cmd_cd(first),
            "pwd" => vec![TerminalEntry::output(self.state.terminal.cwd().to_string())],
            "cat" => self.cmd_cat(first),
            "touch" => self.cmd_create(command, first, NodeKind::File),
            "mkdir" => self.cmd_create(command, first, NodeKind::Folder),
            "rm" => self.cmd_rm(first),
            "rename" => self.cmd_rename(first, args.get(1).map(String::as_str)),
            "open" => self.cmd_open(first),
            "tree" => self.cmd_tree(first),
            "echo" => vec![TerminalEntry::output(args.join(" "))],
            "whoami" => vec![TerminalEntry::output(self.current_user())],
            "perm" => self.cmd_perm(first),
            "history" => self.cmd_history(),
            other => vec![TerminalEntry::error(format!("command not found: {other}"))],
        }
    }

    fn resolve_arg(&self, arg: &str) -> VfsPath {
        resolve(self.state.terminal.cwd(), arg)
    }

    fn cmd_help(&self) -> Vec<TerminalEntry> {
        let width = HELP.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
        std::iter::once(TerminalEntry::output("Available commands:"))
            .chain(HELP.iter().map(|(usage, summary)| {
                TerminalEntry::output(format!("  {usage:<width$}  {summary}"))
            }))
            .collect()
    }

    fn cmd_ls(&self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let target = self.resolve_arg(arg.unwrap_or("."));
        let children = match self.state.tree.list_children(&target) {
            Ok(children) => children,
            Err(err) => return fail("ls", arg.unwrap_or("."), err),
        };
        if children.is_empty() {
            return vec![TerminalEntry::output("(empty directory)")];
        }
        let listing = children
            .iter()
            .map(|node| {
                if node.is_dir() {
                    format!("{}/", node.name())
                } else {
                    node.name().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        vec![TerminalEntry::output(listing)]
    }

    fn cmd_cd(&mut self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let target = match arg {
            None | Some("~") | Some("/") => VfsPath::root(),
            Some(arg) => match arg.strip_prefix("~/") {
                Some(rest) => resolve(&VfsPath::root(), rest),
                None => self.resolve_arg(arg),
            },
        };
        match self.state.tree.get(&target) {
            Some(node) if node.is_dir() => {
                self.state.terminal.set_cwd(target);
                Vec::new()
            }
            Some(_) => fail("cd", arg.unwrap_or_default(), FileTreeError::NotADirectory),
            None => fail("cd", arg.unwrap_or_default(), FileTreeError::NotFound),
        }
    }

    fn cmd_cat(&self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let Some(arg) = arg else {
            return missing_operand("cat");
        };
        match self.state.tree.read_file(&self.resolve_arg(arg)) {
            Ok("") => vec![TerminalEntry::output("(empty file)")],
            Ok(content) => vec![TerminalEntry::output(content)],
            Err(err) => fail("cat", arg, err),
        }
    }

    fn cmd_create(&mut self, command: &str, arg: Option<&str>, kind: NodeKind) -> Vec<TerminalEntry> {
        let Some(arg) = arg else {
            return missing_operand(command);
        };
        let target = self.resolve_arg(arg);
        let Some((parent, name)) = target.split_last() else {
            return fail(command, arg, FileTreeError::InvalidName);
        };
        let created = match kind {
            NodeKind::File => self.create_file(&parent, name, String::new()),
            NodeKind::Folder => self.create_folder(&parent, name),
        };
        match (created, kind) {
            (Ok(path), NodeKind::File) => vec![TerminalEntry::success(format!("Created file: {path}"))],
            (Ok(path), NodeKind::Folder) => {
                vec![TerminalEntry::success(format!("Created directory: {path}"))]
            }
            (Err(err), _) => fail(command, arg, err),
        }
    }

    fn cmd_rm(&mut self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let Some(arg) = arg else {
            return missing_operand("rm");
        };
        let target = self.resolve_arg(arg);
        match self.delete_node(&target) {
            Ok(_) => vec![TerminalEntry::success(format!("Removed: {target}"))],
            Err(err) => fail("rm", arg, err),
        }
    }

    fn cmd_rename(&mut self, arg: Option<&str>, new_name: Option<&str>) -> Vec<TerminalEntry> {
        let (Some(arg), Some(new_name)) = (arg, new_name) else {
            return missing_operand("rename");
        };
        let target = self.resolve_arg(arg);
        match self.rename_node(&target, new_name) {
            Ok(new_path) => {
                vec![TerminalEntry::success(format!("Renamed: {target} -> {new_path}"))]
            }
            Err(err) => fail("rename", arg, err),
        }
    }

    fn cmd_open(&mut self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let Some(arg) = arg else {
            return missing_operand("open");
        };
        let target = self.resolve_arg(arg);
        if let Err(err) = self.state.tree.read_file(&target) {
            return fail("open", arg, err);
        }
        match self.open_file(&target) {
            Ok(Some(_)) => vec![TerminalEntry::success(format!("Opened: {target}"))],
            Ok(None) => fail("open", arg, FileTreeError::NotFound),
            Err(err) => fail("open", arg, err),
        }
    }

    fn cmd_tree(&self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let target = self.resolve_arg(arg.unwrap_or("."));
        let tree = &self.state.tree;
        let Some(id) = tree.lookup(&target) else {
            return fail("tree", arg.unwrap_or("."), FileTreeError::NotFound);
        };
        if tree.node(id).is_some_and(|n| !n.is_dir()) {
            return fail("tree", arg.unwrap_or("."), FileTreeError::NotADirectory);
        }

        let rows = tree.flatten(id);
        if rows.is_empty() {
            return vec![TerminalEntry::output("(empty directory)")];
        }
        std::iter::once(TerminalEntry::output(target.to_string()))
            .chain(rows.into_iter().map(|row| {
                let indent = "  ".repeat(usize::from(row.depth) + 1);
                let suffix = if row.kind == NodeKind::Folder { "/" } else { "" };
                TerminalEntry::output(format!("{indent}{}{suffix}", row.name))
            }))
            .collect()
    }

    fn cmd_perm(&self, arg: Option<&str>) -> Vec<TerminalEntry> {
        let Some(arg) = arg else {
            return missing_operand("perm");
        };
        let target = self.resolve_arg(arg);
        if self.state.tree.get(&target).is_none() {
            return fail("perm", arg, FileTreeError::NotFound);
        }
        let flag = self
            .file_permission(&target)
            .map_or("unset", |permission| permission.as_str());
        vec![TerminalEntry::output(format!("{target}: {flag}"))]
    }

    fn cmd_history(&self) -> Vec<TerminalEntry> {
        self.state
            .terminal
            .history()
            .enumerate()
            .map(|(i, line)| TerminalEntry::output(format!("{:>4}  {line}", i + 1)))
            .collect()
    }
}
