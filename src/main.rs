//! auris 命令行入口：在标准输入上驱动工作区终端
//!
//! Lines are handed to the terminal interpreter. A few `:` commands reach the
//! editor side, which has no text command of its own.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use auris::app::Workspace;
use auris::kernel::services::adapters::{
    ensure_settings_file, load_config, JsonFilePersistence, MemoryPersistence, PermissionTable,
    StaticIdentity,
};
use auris::kernel::services::ports::WorkspacePersistence;
use auris::kernel::{
    Action, Collaborators, EditorAction, EntryKind, TerminalEntry, WorkspaceError,
};

mod logging;

const META_HELP: &str = ":tabs  :edit <text>  :save  :saveall  :up  :down  :quit";

struct Args {
    data_dir: Option<PathBuf>,
    fresh: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        data_dir: None,
        fresh: false,
    };
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--data-dir=") {
            args.data_dir = Some(PathBuf::from(value));
        } else if arg == "--fresh" {
            args.fresh = true;
        }
    }
    args
}

fn main() -> io::Result<()> {
    let _logging = logging::init();
    let args = parse_args();
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "failed to create settings file");
    }
    let config = load_config();

    let persistence: Box<dyn WorkspacePersistence> = if args.fresh {
        Box::new(MemoryPersistence::new())
    } else if let Some(dir) = args.data_dir {
        Box::new(JsonFilePersistence::new(dir))
    } else {
        Box::new(JsonFilePersistence::open_default()?)
    };
    let collab = Collaborators {
        identity: Box::new(StaticIdentity::new(config.user.clone())),
        permissions: Box::new(PermissionTable::from_settings(&config)),
        group_id: config.group_id.clone(),
    };
    let mut workspace = Workspace::load(config, persistence, collab);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for entry in workspace.state().terminal.entries() {
        print_entry(&mut stdout, entry)?;
    }
    writeln!(stdout, "{META_HELP}")?;

    loop {
        write!(stdout, "{} ", workspace.store().prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            ":quit" | ":q" => break,
            ":tabs" => print_tabs(&workspace, &mut stdout)?,
            ":save" => {
                let result = workspace.dispatch(Action::Editor(EditorAction::SaveActive));
                report(&mut stdout, result.error)?;
            }
            ":saveall" => {
                let result = workspace.dispatch(Action::Editor(EditorAction::SaveAll));
                report(&mut stdout, result.error)?;
            }
            ":up" | ":down" => {
                let action = if line.trim() == ":up" {
                    Action::TerminalHistoryPrev
                } else {
                    Action::TerminalHistoryNext
                };
                workspace.dispatch(action);
                writeln!(stdout, "{}", workspace.state().terminal.input())?;
            }
            meta if edit_argument(meta).is_some() => {
                let text = edit_argument(meta).unwrap_or_default();
                let Some(id) = workspace.state().editor.active_id() else {
                    writeln!(stdout, "no active tab")?;
                    continue;
                };
                workspace.dispatch(Action::Editor(EditorAction::UpdateContent {
                    id,
                    content: text.replace("\\n", "\n"),
                }));
            }
            _ => {
                for entry in workspace.execute_command(line) {
                    print_entry(&mut stdout, &entry)?;
                }
            }
        }
    }
    Ok(())
}

/// The buffer text after `:edit`, or `None` when the line is another command.
fn edit_argument(line: &str) -> Option<&str> {
    match line.strip_prefix(":edit")? {
        "" => Some(""),
        rest if rest.starts_with(' ') => Some(rest.trim_start()),
        _ => None,
    }
}

fn print_entry(out: &mut impl Write, entry: &TerminalEntry) -> io::Result<()> {
    match entry.kind {
        // The prompt line already shows what was typed.
        EntryKind::Input => Ok(()),
        EntryKind::Error => writeln!(out, "error: {}", entry.text),
        EntryKind::Output | EntryKind::Success => writeln!(out, "{}", entry.text),
    }
}

fn print_tabs(workspace: &Workspace, out: &mut impl Write) -> io::Result<()> {
    let views = workspace.state().editor.views();
    if views.is_empty() {
        return writeln!(out, "(no open tabs)");
    }
    for view in views {
        let marker = if view.active { '*' } else { ' ' };
        let dirty = if view.modified { " [modified]" } else { "" };
        writeln!(out, "{marker} {} {} ({}){dirty}", view.id, view.path, view.language)?;
    }
    Ok(())
}

fn report(out: &mut impl Write, error: Option<WorkspaceError>) -> io::Result<()> {
    match error {
        Some(err) => writeln!(out, "error: {err}"),
        None => writeln!(out, "saved"),
    }
}
