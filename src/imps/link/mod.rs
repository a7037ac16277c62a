pub mod dataverse;

pub use dataverse::DataverseLinkAddon;
