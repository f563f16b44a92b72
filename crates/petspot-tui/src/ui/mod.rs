//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Frame layout, title and status bars, overlays
//! - `input`: Keyboard event handling per page
//! - `styles`: Color scheme and text styling
//! - `pages`: Page-specific content (landing, sign in, sign up, home)

pub mod input;
pub mod pages;
pub mod render;
pub mod styles;
