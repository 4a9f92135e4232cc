//! Shared helpers.

pub mod date;
pub mod html;
pub mod mime;
