/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures and the search state (data.rs)
/// - The gallery fetch/pagination state machine (gallery.rs)
/// - User-facing notices (notice.rs)

pub mod data;
pub mod gallery;
pub mod notice;
