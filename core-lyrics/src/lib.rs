//! # Lyrics Sectioning Module
//!
//! Splits raw lyrics text into semantic sections (verses and choruses) and
//! paginates over the derived sections.
//!
//! ## Overview
//!
//! This module provides:
//! - Marker-based splitting of a lyrics blob into ordered sections
//! - Page-window selection over a section sequence
//!
//! Both operations are pure functions with no I/O and no shared state; they
//! may be invoked concurrently without synchronization. A section sequence is
//! produced fresh from the stored text on every request and discarded after
//! the paging step.

pub mod error;
pub mod pager;
pub mod section;
pub mod split;

pub use error::{LyricsError, Result};
pub use pager::{page, SectionPage};
pub use section::Section;
pub use split::split;
