// Utils compartidos

pub mod abort;
pub mod storage;
pub mod navigation;

pub use abort::AbortHandle;
pub use storage::{load_json, remove_keys, save_json, KeyValueStore, LocalStore, MemoryStore};
pub use navigation::{BrowserNavigator, Navigator};
