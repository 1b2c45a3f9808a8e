use std::fmt;

use crate::address::Spindle;
use crate::models::{Block, BlockRef, Node};
use crate::resolve::{BspResult, Selector, resolve_block};

/// Maps a block name to a block.
///
/// Supplied by the document layer. Must be synchronous; returning `None`
/// means "no such block".
pub trait BlockLoader {
    fn load(&self, name: &str) -> Option<Block>;
}

impl<F> BlockLoader for F
where
    F: Fn(&str) -> Option<Block>,
{
    fn load(&self, name: &str) -> Option<Block> {
        self(name)
    }
}

/// Holds at most one loader. Registering replaces the previous one.
#[derive(Default)]
pub struct LoaderRegistry {
    loader: Option<Box<dyn BlockLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, loader: impl BlockLoader + 'static) {
        if self.loader.is_some() {
            log::debug!("replacing registered block loader");
        }
        self.loader = Some(Box::new(loader));
    }

    pub fn is_registered(&self) -> bool {
        self.loader.is_some()
    }

    pub fn load(&self, name: &str) -> Option<Block> {
        self.loader.as_ref()?.load(name)
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("registered", &self.is_registered())
            .finish()
    }
}

/// Entry point for resolving block · spindle · point.
///
/// Owns the loader registry used for blocks given by name. Registration
/// needs `&mut self`, so a resolver shared between threads has to be fully
/// set up before it is shared; there is no locking inside.
#[derive(Debug, Default)]
pub struct Resolver {
    registry: LoaderRegistry,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(loader: impl BlockLoader + 'static) -> Self {
        let mut resolver = Self::new();
        resolver.register_loader(loader);
        resolver
    }

    /// Set the loader for named blocks, replacing any earlier one
    pub fn register_loader(&mut self, loader: impl BlockLoader + 'static) {
        self.registry.register(loader);
    }

    /// Resolve `block` (a name or a block), `spindle` and `selector`.
    ///
    /// A name that no loader can supply resolves against an empty block.
    pub fn resolve<'a>(
        &self,
        block: impl Into<BlockRef<'a>>,
        spindle: Option<&Spindle>,
        selector: Option<&Selector>,
    ) -> BspResult {
        match block.into() {
            BlockRef::Block(block) => resolve_block(block, spindle, selector),
            BlockRef::Name(name) => match self.registry.load(name) {
                Some(block) => resolve_block(&block, spindle, selector),
                None => {
                    log::debug!("block {name:?} not found, resolving as empty");
                    BspResult::Block { tree: Node::empty() }
                }
            },
        }
    }
}
