use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::kernel::editor::TabId;
use crate::kernel::services::adapters::paths::{create_dir_if_missing, ensure_workspace_dir};
use crate::kernel::services::ports::{
    NodeSnapshot, TabSnapshot, WorkspacePersistence, WorkspaceSnapshot,
};

const TREE_FILE: &str = "filetree.json";
const TABS_FILE: &str = "tabs.json";
const ACTIVE_TAB_FILE: &str = "activetab.json";
const UNREADABLE_SUFFIX: &str = "corrupt";

/// One JSON document per slice inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    dir: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the per-user workspace directory, creating it if needed.
    pub fn open_default() -> io::Result<Self> {
        ensure_workspace_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> io::Result<Option<T>> {
        let path = self.dir.join(name);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Writes next to the target and renames over it, so a crash mid-write
    /// never leaves a truncated document behind.
    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> io::Result<()> {
        create_dir_if_missing(&self.dir)?;
        let data = serde_json::to_vec(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let target = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &target)
    }
}

impl WorkspacePersistence for JsonFilePersistence {
    fn load(&self) -> io::Result<Option<WorkspaceSnapshot>> {
        let Some(tree) = self.read_json::<Vec<NodeSnapshot>>(TREE_FILE)? else {
            return Ok(None);
        };

        // A broken tab list costs the open tabs, not the tree.
        let tabs = match self.read_json::<Vec<TabSnapshot>>(TABS_FILE) {
            Ok(tabs) => tabs.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable tab snapshot");
                Vec::new()
            }
        };
        let active_tab = match self.read_json::<TabId>(ACTIVE_TAB_FILE) {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable active tab");
                None
            }
        };

        Ok(Some(WorkspaceSnapshot {
            tree,
            tabs,
            active_tab,
        }))
    }

    fn persist_tree(&mut self, tree: &[NodeSnapshot]) -> io::Result<()> {
        self.write_json(TREE_FILE, tree)
    }

    fn persist_tabs(&mut self, tabs: &[TabSnapshot]) -> io::Result<()> {
        self.write_json(TABS_FILE, tabs)
    }

    fn persist_active_tab(&mut self, active: Option<TabId>) -> io::Result<()> {
        match active {
            Some(id) => self.write_json(ACTIVE_TAB_FILE, &id),
            None => match std::fs::remove_file(self.dir.join(ACTIVE_TAB_FILE)) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            },
        }
    }

    /// Renames the tree and tab documents to `<name>.corrupt`, replacing any
    /// older copy. The tabs go too: their buffers belong to the lost tree.
    fn set_aside_unreadable(&mut self) -> io::Result<()> {
        for name in [TREE_FILE, TABS_FILE] {
            let from = self.dir.join(name);
            let to = self.dir.join(format!("{name}.{UNREADABLE_SUFFIX}"));
            match std::fs::rename(&from, &to) {
                Ok(()) => {
                    tracing::warn!(path = %to.display(), "set aside unreadable workspace file");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub tree: Option<Vec<NodeSnapshot>>,
    pub tabs: Vec<TabSnapshot>,
    pub active_tab: Option<TabId>,
    pub writes: usize,
    pub fail_writes: bool,
    pub fail_load: bool,
    pub set_aside: Option<Vec<NodeSnapshot>>,
}

/// Keeps snapshots in memory. Clones share one store, so a test can hand
/// one handle to the workspace and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    store: Rc<RefCell<MemoryStore>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: WorkspaceSnapshot) -> Self {
        let persistence = Self::new();
        {
            let mut store = persistence.store.borrow_mut();
            store.tree = Some(snapshot.tree);
            store.tabs = snapshot.tabs;
            store.active_tab = snapshot.active_tab;
        }
        persistence
    }

    /// Makes every later write fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.store.borrow_mut().fail_writes = fail;
    }

    /// Makes `load` fail until the data is set aside.
    pub fn set_fail_load(&self, fail: bool) {
        self.store.borrow_mut().fail_load = fail;
    }

    pub fn set_aside(&self) -> Option<Vec<NodeSnapshot>> {
        self.store.borrow().set_aside.clone()
    }

    pub fn writes(&self) -> usize {
        self.store.borrow().writes
    }

    pub fn tree(&self) -> Option<Vec<NodeSnapshot>> {
        self.store.borrow().tree.clone()
    }

    pub fn tabs(&self) -> Vec<TabSnapshot> {
        self.store.borrow().tabs.clone()
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.store.borrow().active_tab
    }

    fn write(&self, apply: impl FnOnce(&mut MemoryStore)) -> io::Result<()> {
        let mut store = self.store.borrow_mut();
        if store.fail_writes {
            return Err(io::Error::other("memory store is read-only"));
        }
        apply(&mut *store);
        store.writes += 1;
        Ok(())
    }
}

impl WorkspacePersistence for MemoryPersistence {
    fn load(&self) -> io::Result<Option<WorkspaceSnapshot>> {
        let store = self.store.borrow();
        if store.fail_load {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "memory store is unreadable"));
        }
        Ok(store.tree.as_ref().map(|tree| WorkspaceSnapshot {
            tree: tree.clone(),
            tabs: store.tabs.clone(),
            active_tab: store.active_tab,
        }))
    }

    fn persist_tree(&mut self, tree: &[NodeSnapshot]) -> io::Result<()> {
        self.write(|store| store.tree = Some(tree.to_vec()))
    }

    fn persist_tabs(&mut self, tabs: &[TabSnapshot]) -> io::Result<()> {
        self.write(|store| store.tabs = tabs.to_vec())
    }

    fn persist_active_tab(&mut self, active: Option<TabId>) -> io::Result<()> {
        self.write(|store| store.active_tab = active)
    }

    fn set_aside_unreadable(&mut self) -> io::Result<()> {
        let mut store = self.store.borrow_mut();
        if store.fail_writes {
            return Err(io::Error::other("memory store is read-only"));
        }
        store.set_aside = store.tree.take();
        store.tabs.clear();
        store.fail_load = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/persistence.rs"]
mod tests;
