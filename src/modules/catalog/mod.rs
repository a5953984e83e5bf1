pub(crate) mod api;
pub mod folder;
pub mod item;
pub mod metadata;
pub mod radarr;
pub mod sonarr;

// Re-exports for convenience
pub use folder::scan_folder;
pub use item::{resolve_level, CheckLevel, LocalFileMeta, LocalItem};
pub use radarr::RadarrSource;
pub use sonarr::SonarrSource;
