pub mod atomic_write;
pub mod link;
pub mod rename_dir;

pub use atomic_write::{AtomicWriteOptions, atomic_write};
pub use link::{create_dir_link, is_dir_link, read_dir_link, remove_dir_link};
pub use rename_dir::{RenameOptions, rename_dir};
