//! Editor domain: open buffers (tabs) layered over the file tree.

mod action;
mod state;

pub use action::EditorAction;
pub use state::{EditorState, EditorTabState, TabId, TabView};
pub(crate) use state::next_raw_id;
