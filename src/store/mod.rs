//! Preference storage backends

pub mod disk;
pub mod memory;

pub use disk::DiskPreferenceStore;
pub use memory::MemoryPreferenceStore;
