/// The checker backend.
///
/// Walks the program once, builds the scope tree and collects every rule
/// violation instead of stopping at the first one.
pub mod core;

/// Symbols, scopes and the retained scope tree.
pub mod scope;

pub use self::{
    core::{Checker, check},
    scope::{Scope, ScopeId, ScopeTree, Symbol, SymbolKind},
};
