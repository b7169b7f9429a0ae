/// Extension system for custom Markdown syntax.
///
/// New grammar is added by implementing [`BlockParser`] or [`InlineParser`]
/// and placing the handler into a catalog with [`ParserBuilder`]. A preset
/// derived from another parser starts from a copy of its catalogs and
/// applies its own steps on top.
use crate::config::ParserConfig;
use crate::error::{HandlerCatalog, MarkdownError, Result};
use crate::parser::rules;
use crate::parser::{BlockParser, InlineParser, Parser};
use log::debug;
use std::sync::Arc;

/// Builder assembling the handler catalogs of a [`Parser`].
///
/// Steps that name a missing handler, or add a name that is already taken,
/// are recorded and reported by [`ParserBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    blocks: Vec<Arc<dyn BlockParser>>,
    inlines: Vec<Arc<dyn InlineParser>>,
    config: ParserConfig,
    error: Option<MarkdownError>,
}

trait Named {
    fn handler_name(&self) -> &str;
}

impl Named for Arc<dyn BlockParser> {
    fn handler_name(&self) -> &str {
        self.name()
    }
}

impl Named for Arc<dyn InlineParser> {
    fn handler_name(&self) -> &str {
        self.name()
    }
}

fn position<T: Named>(catalog: &[T], name: &str) -> Option<usize> {
    catalog.iter().position(|entry| entry.handler_name() == name)
}

/// Where a step places its handler.
#[derive(Clone, Copy)]
enum Placement<'n> {
    End,
    Before(&'n str),
    Replace(&'n str),
}

fn place<T: Named>(
    catalog: &mut Vec<T>,
    kind: HandlerCatalog,
    placement: Placement<'_>,
    handler: T,
) -> Result<()> {
    let name = handler.handler_name().to_string();
    let replaced = match placement {
        Placement::Replace(target) => Some(target),
        _ => None,
    };
    if replaced != Some(name.as_str()) && position(catalog, &name).is_some() {
        return Err(MarkdownError::duplicate_handler(kind, name));
    }

    match placement {
        Placement::End => catalog.push(handler),
        Placement::Before(target) => {
            let index = position(catalog, target)
                .ok_or_else(|| MarkdownError::unknown_handler(kind, target))?;
            catalog.insert(index, handler);
        }
        Placement::Replace(target) => {
            let index = position(catalog, target)
                .ok_or_else(|| MarkdownError::unknown_handler(kind, target))?;
            catalog[index] = handler;
        }
    }
    Ok(())
}

fn remove<T: Named>(catalog: &mut Vec<T>, kind: HandlerCatalog, name: &str) -> Result<()> {
    let index =
        position(catalog, name).ok_or_else(|| MarkdownError::unknown_handler(kind, name))?;
    catalog.remove(index);
    Ok(())
}

impl ParserBuilder {
    /// Creates a builder with empty catalogs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the standard markdown catalogs.
    pub fn markdown() -> Self {
        Self {
            blocks: rules::block::standard(),
            inlines: rules::inline::standard(),
            ..Self::default()
        }
    }

    /// Starts from the catalogs and configuration of an existing parser.
    pub fn from_parser(parent: &Parser) -> Self {
        Self {
            blocks: parent.block_parsers().to_vec(),
            inlines: parent.inline_parsers().to_vec(),
            config: parent.config().clone(),
            error: None,
        }
    }

    fn record(&mut self, result: Result<()>) {
        if let Err(error) = result {
            debug!("parser builder step failed: {}", error);
            if self.error.is_none() {
                self.error = Some(error);
            }
        }
    }

    fn place_block(mut self, placement: Placement<'_>, handler: Arc<dyn BlockParser>) -> Self {
        let result = place(&mut self.blocks, HandlerCatalog::Block, placement, handler);
        self.record(result);
        self
    }

    fn place_inline(mut self, placement: Placement<'_>, handler: Arc<dyn InlineParser>) -> Self {
        let result = place(&mut self.inlines, HandlerCatalog::Inline, placement, handler);
        self.record(result);
        self
    }

    /// Appends a block handler to the catalog.
    pub fn block(self, handler: impl BlockParser + 'static) -> Self {
        self.place_block(Placement::End, Arc::new(handler))
    }

    /// Inserts a block handler ahead of the handler named `name`.
    pub fn block_before(self, name: &str, handler: impl BlockParser + 'static) -> Self {
        self.place_block(Placement::Before(name), Arc::new(handler))
    }

    /// Puts a block handler in the place of the handler named `name`.
    pub fn replace_block(self, name: &str, handler: impl BlockParser + 'static) -> Self {
        self.place_block(Placement::Replace(name), Arc::new(handler))
    }

    pub fn without_block(mut self, name: &str) -> Self {
        let result = remove(&mut self.blocks, HandlerCatalog::Block, name);
        self.record(result);
        self
    }

    /// Appends an inline stage to the end of the pipeline.
    pub fn inline(self, handler: impl InlineParser + 'static) -> Self {
        self.place_inline(Placement::End, Arc::new(handler))
    }

    /// Inserts an inline stage ahead of the stage named `name`.
    pub fn inline_before(self, name: &str, handler: impl InlineParser + 'static) -> Self {
        self.place_inline(Placement::Before(name), Arc::new(handler))
    }

    pub fn replace_inline(self, name: &str, handler: impl InlineParser + 'static) -> Self {
        self.place_inline(Placement::Replace(name), Arc::new(handler))
    }

    pub fn without_inline(mut self, name: &str) -> Self {
        let result = remove(&mut self.inlines, HandlerCatalog::Inline, name);
        self.record(result);
        self
    }

    /// Sets the parser configuration.
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Names of the block handlers in catalog order.
    pub fn block_names(&self) -> Vec<&str> {
        self.blocks.iter().map(|handler| handler.name()).collect()
    }

    /// Names of the inline stages in pipeline order.
    pub fn inline_names(&self) -> Vec<&str> {
        self.inlines.iter().map(|handler| handler.name()).collect()
    }

    /// Builds the parser, failing with the first step that went wrong.
    pub fn build(self) -> Result<Parser> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Parser::new(self.blocks, self.inlines, self.config))
    }
}
