//! Text storage.
//!
//! This module provides the rope-backed [`TextBuffer`] every rich-text
//! document is built on.
//!
//! # Examples
//!
//! ```
//! use richtext::TextBuffer;
//!
//! let mut buffer = TextBuffer::with_text("Hello");
//! buffer.insert(5, ", world").unwrap();
//! assert_eq!(buffer.to_string(), "Hello, world");
//! assert_eq!(buffer.len_chars(), 12);
//! ```

mod buffer;
mod rope;

pub use buffer::TextBuffer;
pub use rope::RopeWrapper;
