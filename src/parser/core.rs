use std::cell::RefCell;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::ast::{Child, Node};
use crate::config::ParserConfig;
use crate::lexer::{escape, TokenStream};

use super::links::resolve_links;
use super::rules;
use super::state::ParserState;
use super::traits::{BlockParser, InlineParser};

/// Two-phase markdown parser driving a block catalog and an inline pipeline.
///
/// A parser with an empty context stack is a top-level parser: it escapes its
/// input and resolves reference links once the tree is complete. Parsers
/// returned by [`Parser::subparser`] work on already escaped text and leave
/// resolution to their top-level ancestor.
#[derive(Debug, Clone)]
pub struct Parser {
    blocks: Vec<Arc<dyn BlockParser>>,
    inlines: Vec<Arc<dyn InlineParser>>,
    context: Vec<String>,
    config: ParserConfig,
}

impl Parser {
    /// Creates a top-level parser over the given catalogs.
    ///
    /// The last block handler should always claim its position; without such
    /// a terminal handler unclaimed lines are skipped.
    pub fn new(
        blocks: Vec<Arc<dyn BlockParser>>,
        inlines: Vec<Arc<dyn InlineParser>>,
        config: ParserConfig,
    ) -> Self {
        Self {
            blocks,
            inlines,
            context: Vec::new(),
            config,
        }
    }

    /// Parser with the standard markdown catalogs.
    pub fn markdown() -> Self {
        Self::new(
            rules::block::standard(),
            rules::inline::standard(),
            ParserConfig::default(),
        )
    }

    pub fn block_parsers(&self) -> &[Arc<dyn BlockParser>] {
        &self.blocks
    }

    pub fn inline_parsers(&self) -> &[Arc<dyn InlineParser>] {
        &self.inlines
    }

    /// The context tags this parser runs under, outermost first.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn is_top_level(&self) -> bool {
        self.context.is_empty()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `text` into block nodes.
    pub fn parse(&self, text: &str) -> Vec<Node> {
        let mut ast = Vec::new();

        if self.is_top_level() {
            let mut stream = TokenStream::new(&escape(text));
            self.parse_stream(&mut stream, &mut ast);
            resolve_links(&mut ast);
        } else {
            let mut stream = TokenStream::new(text);
            self.parse_stream(&mut stream, &mut ast);
        }

        ast
    }

    /// Runs the block loop until the stream is exhausted.
    pub fn parse_stream(&self, stream: &mut TokenStream, ast: &mut Vec<Node>) {
        while !stream.is_eos() {
            if stream.peek(0).is_empty() {
                stream.consume(0);
                continue;
            }

            let start = stream.line();
            match self
                .blocks
                .iter()
                .find(|handler| handler.parse(self, stream, ast))
            {
                Some(handler) => {
                    debug!(
                        "{} claimed lines {}..{} (context {:?})",
                        handler.name(),
                        start,
                        stream.line(),
                        self.context
                    );
                    if stream.line() == start {
                        warn!("{} claimed line {} without consuming it", handler.name(), start);
                        stream.consume(0);
                    }
                }
                None => {
                    debug!("no block handler claimed line {}, skipping it", start);
                    stream.consume(0);
                }
            }
        }
    }

    /// A parser for content nested under `tag`.
    ///
    /// The new parser shares this parser's handlers, minus those excluding
    /// themselves from the extended context. Past the configured nesting depth
    /// only the terminal handler is kept, so deeper content becomes plain
    /// paragraphs.
    pub fn subparser(&self, tag: Option<&str>) -> Parser {
        let mut context = self.context.clone();
        if let Some(tag) = tag {
            context.push(tag.to_string());
        }

        let mut blocks: Vec<Arc<dyn BlockParser>> = self
            .blocks
            .iter()
            .filter(|handler| !handler.exclude_from_subparse(&context))
            .cloned()
            .collect();

        if context.len() > self.config.max_nesting_depth {
            debug!(
                "nesting depth {} exceeds {}, keeping only the terminal handler",
                context.len(),
                self.config.max_nesting_depth
            );
            blocks = blocks.last().cloned().into_iter().collect();
        }

        debug!("subparser for context {:?} with {} block handlers", context, blocks.len());

        Parser {
            blocks,
            inlines: self.inlines.clone(),
            context,
            config: self.config.clone(),
        }
    }

    /// A copy of this parser whose sub-parsers keep only the terminal
    /// handler.
    ///
    /// Whether a handler claims a line does not depend on how its nested
    /// content parses, so lookahead probes run on this copy and stay linear.
    pub fn shallow(&self) -> Parser {
        let mut parser = self.clone();
        parser.config.max_nesting_depth = self.context.len();
        parser
    }

    /// Runs the inline pipeline over `text` with a fresh state.
    ///
    /// `extra` tags are added to this parser's context for the duration of
    /// the call (for example [`context::HEADING`](super::context::HEADING)).
    pub fn parse_inlines(&self, text: &str, extra: &[&str]) -> Vec<Child> {
        let mut context = self.context.clone();
        context.extend(extra.iter().map(|tag| tag.to_string()));

        let collected = RefCell::new(Vec::new());
        let state = ParserState::new(&collected, &context);
        self.continue_inlines(text, state)
    }

    /// Runs the pipeline from `state`'s stage onwards.
    ///
    /// Past the last stage the text is final: escapes are turned into literal
    /// characters and placeholders into their nodes.
    pub fn continue_inlines(&self, text: &str, state: ParserState<'_>) -> Vec<Child> {
        let mut state = state;

        loop {
            let Some(handler) = self.inlines.get(state.pipeline_index()) else {
                return state.resolve(text);
            };

            if handler.exclude_from_subparse(state.context()) {
                state = state.advance();
                continue;
            }

            trace!("inline stage {} ({})", state.pipeline_index(), handler.name());
            return handler.parse(self, text, state.advance());
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::markdown()
    }
}
