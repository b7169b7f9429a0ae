//! Line-oriented input handling.
//!
//! Input passes through [`escape`] once, before any grammar rule sees it, and
//! is then split into lines held by a [`TokenStream`]. Literal text leaves the
//! engine through [`to_literal`] (or [`unescape`] for verbatim code).

mod escape;
mod stream;

pub use escape::{escape, to_literal, unescape, ESCAPABLE, ESCAPE_MARKER};
pub use stream::{Line, TokenStream};
