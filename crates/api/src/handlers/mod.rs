//! HTTP handlers, one module per resource.

pub mod borders;
pub mod content;
pub mod displays;
pub mod maintenance;
pub mod moderation;
pub mod playback;
pub mod queue;
