//! UI components for the CMS window

pub mod editor;
pub mod file_list;
pub mod notice;
pub mod preview;
