pub mod dropbox;

pub use dropbox::DropboxStorageAddon;
