//! Repository structs: one per table, zero-sized, async methods over
//! `&PgPool`.

pub mod border_repo;
pub mod content_item_repo;
pub mod display_repo;
pub mod play_history_repo;
pub mod queue_repo;

pub use border_repo::BorderRepo;
pub use content_item_repo::ContentItemRepo;
pub use display_repo::DisplayRepo;
pub use play_history_repo::PlayHistoryRepo;
pub use queue_repo::QueueRepo;
