mod storage;

pub use storage::{IModelStorage, IPreferenceStorage};
