//! Standard grammar rules.
//!
//! Block rules live in [`block`], inline pipeline stages in [`inline`]. Line
//! patterns shared between rules are in `patterns`; the structured link
//! syntax parsers are in `syntax`.

pub mod block;
pub mod inline;

mod patterns;
mod syntax;
