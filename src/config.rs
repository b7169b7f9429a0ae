//! Configuration for the Markdown engine.
//!
//! Grammar is configured through the handler catalogs (see
//! [`ParserBuilder`](crate::extensions::ParserBuilder)); the settings here
//! tune how the parser drives them.

/// Parser settings shared by a top-level parser and all of its sub-parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum depth of nested sub-parsers (list items, quotes). Deeper
    /// content is parsed by the terminal handler alone.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets maximum nesting depth for parsing.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(ParserConfig::default().max_nesting_depth, 64);
        assert_eq!(ParserConfig::new().max_nesting_depth(3).max_nesting_depth, 3);
    }
}
