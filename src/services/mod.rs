// Service exports
pub mod store;

pub use store::{
    DecisionEntry, FlagEntry, JsonFileStore, MemoryStore, StoreError, StoredState, SwipeStore,
};
