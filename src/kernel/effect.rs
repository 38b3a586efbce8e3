/// Side effects the host runs after a dispatch. Each one asks for the current
/// value of one persisted slice, so duplicates within a batch collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    PersistTree,
    PersistTabs,
    PersistActiveTab,
}
