use std::fmt;

use indexmap::IndexMap;

use crate::{ast::Type, error::SemanticError};

/// Whether a symbol names a variable or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A declared variable or a function parameter.
    Variable,
    /// A declared function.
    Function,
}

/// Metadata about a declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Variable or function.
    pub kind:      SymbolKind,
    /// The declared name.
    pub name:      String,
    /// Variable type, or return type for functions.
    pub data_type: Type,
    /// Parameters in order; empty for variables.
    pub params:    Vec<Symbol>,
}

impl Symbol {
    /// A variable symbol.
    pub fn variable(name: impl Into<String>, data_type: Type) -> Self {
        Self { kind: SymbolKind::Variable,
               name: name.into(),
               data_type,
               params: Vec::new() }
    }

    /// A function symbol with its parameters.
    pub fn function(name: impl Into<String>, return_type: Type, params: Vec<Self>) -> Self {
        Self { kind: SymbolKind::Function,
               name: name.into(),
               data_type: return_type,
               params }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Variable => write!(f, "Variable {} : {}", self.name, self.data_type),
            SymbolKind::Function => {
                let params = self.params
                                 .iter()
                                 .map(|p| format!("{} : {}", p.name, p.data_type))
                                 .collect::<Vec<_>>()
                                 .join(", ");
                write!(f, "Function {}({params}) : {}", self.name, self.data_type)
            },
        }
    }
}

/// Index of a scope inside its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The position of the scope in creation order; the global scope is `0`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A lexical region: its own symbols plus links to the enclosing and nested
/// regions.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols:  IndexMap<String, Symbol>,
    parent:   Option<ScopeId>,
    children: Vec<ScopeId>,
}

impl Scope {
    /// Symbols declared directly in this scope, in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// The symbol declared directly in this scope under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// The enclosing scope; `None` for the global scope.
    #[must_use]
    pub const fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Nested scopes in creation order.
    #[must_use]
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }
}

/// The tree of every scope created while checking a program.
///
/// Scopes live in an arena and refer to each other by [`ScopeId`]. Nothing is
/// discarded when the checker leaves a scope, so the whole tree can be
/// inspected or printed afterwards.
///
/// # Example
/// ```
/// use declang::{
///     ast::Type,
///     interpreter::checker::{ScopeTree, Symbol},
/// };
///
/// let mut tree = ScopeTree::new();
/// let global = tree.global();
/// tree.declare(global, Symbol::variable("x", Type::Int)).unwrap();
///
/// let inner = tree.add_child(global);
/// assert!(tree.lookup(inner, "x").is_some());
/// assert!(tree.declare(global, Symbol::variable("x", Type::Int)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// Creates a tree holding only an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()] }
    }

    /// The root scope.
    #[must_use]
    pub const fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Creates an empty scope nested in `parent` and returns its id.
    pub fn add_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { parent: Some(parent),
                                 ..Scope::default() });
        self.scopes[parent.0].children.push(id);
        id
    }

    /// Adds `symbol` to `scope`.
    ///
    /// # Errors
    /// Returns `DuplicateDeclaration` if the name is already declared in that
    /// very scope. Declarations in enclosing scopes do not conflict.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), SemanticError> {
        let symbols = &mut self.scopes[scope.0].symbols;
        if symbols.contains_key(&symbol.name) {
            return Err(SemanticError::DuplicateDeclaration { name: symbol.name });
        }
        symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Resolves `name` starting at `scope` and walking outward through the
    /// parents. Stops at the first match.
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// The scope with the given id.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Number of scopes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always `false`: the global scope exists from the start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, id: ScopeId, depth: usize) -> fmt::Result {
        let indent = " ".repeat(depth * 4);
        writeln!(f, "{indent}Scope #{}", id.0)?;

        let scope = &self.scopes[id.0];
        for symbol in scope.symbols.values() {
            writeln!(f, "{indent}    {symbol}")?;
        }
        for child in &scope.children {
            self.dump(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ScopeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, self.global(), 0)
    }
}
