//! Headless workspace core (state/action/effect).

pub mod action;
pub mod editor;
pub mod effect;
pub mod error;
pub mod seed;
pub mod services;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod terminal;

pub use action::Action;
pub use editor::{EditorAction, EditorState, EditorTabState, TabId, TabView};
pub use effect::Effect;
pub use error::WorkspaceError;
pub use state::AppState;
pub use store::{Collaborators, DispatchResult, Store};
pub use terminal::{EntryKind, TerminalEntry, TerminalSession};
