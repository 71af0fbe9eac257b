pub mod format;
pub mod store;

pub use store::GenerationStore;
