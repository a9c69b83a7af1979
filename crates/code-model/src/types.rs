use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of resolving a single expression or declaration.
///
/// Failures stay local to the expression they came from; consumers skip them.
pub type Resolution<T> = std::result::Result<T, ResolutionError>;

/// Why a single expression could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionError {
    /// Symbol could not be found by the resolver
    #[error("Unsolved symbol: {0}")]
    UnsolvedSymbol(String),

    /// Declaration lives in a library that was not part of the snapshot
    #[error("External declaration: {0}")]
    External(String),

    /// Resolver produced no type information
    #[error("Missing type information")]
    MissingType,

    /// Anything else the resolver reported
    #[error("{0}")]
    Other(String),
}

/// Declaring type of a resolved method call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallTarget {
    /// Package of the declaring type (empty for the unnamed package)
    #[serde(default)]
    pub package: String,

    /// Simple (or nested, dot-separated) name of the declaring type
    pub class_name: String,
}

impl CallTarget {
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
        }
    }

    /// Fully qualified name of the declaring type
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}.{}", self.package, self.class_name)
        }
    }
}

/// A resolved type as reported by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedType {
    /// `T[]`, possibly nested
    Array { component: Box<ResolvedType> },

    /// A class or interface, with its type arguments (`List<Order>`)
    Reference {
        name: String,
        #[serde(default)]
        type_args: Vec<ResolvedType>,
    },

    /// Primitives, type variables, wildcards, `void`
    Other,
}

impl ResolvedType {
    /// Plain reference without type arguments
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// Parameterized reference
    pub fn generic(name: impl Into<String>, type_args: Vec<ResolvedType>) -> Self {
        Self::Reference {
            name: name.into(),
            type_args,
        }
    }

    /// Array with `self` as component type
    pub fn array_of(component: ResolvedType) -> Self {
        Self::Array {
            component: Box::new(component),
        }
    }

    /// Strip every array dimension down to the element type
    #[must_use]
    pub fn element_type(&self) -> &ResolvedType {
        let mut current = self;
        while let Self::Array { component } = current {
            current = component;
        }
        current
    }

    /// Qualified names this type points at, for relation counting.
    ///
    /// Arrays are unwrapped first. A reference yields its own name followed by
    /// the names of its direct reference type arguments; deeper nesting and
    /// array-typed arguments are not visited.
    #[must_use]
    pub fn referenced_names(&self) -> Vec<&str> {
        match self.element_type() {
            Self::Reference { name, type_args } => {
                let mut names = Vec::with_capacity(1 + type_args.len());
                names.push(name.as_str());
                names.extend(type_args.iter().filter_map(|arg| match arg {
                    Self::Reference { name, .. } => Some(name.as_str()),
                    _ => None,
                }));
                names
            }
            _ => Vec::new(),
        }
    }
}

/// One class- or interface-like declaration with everything the resolver
/// found inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDeclaration {
    /// Fully qualified name (`org.example.Outer.Inner`)
    pub name: String,

    /// Text of every comment contained anywhere in the declaration
    #[serde(default)]
    pub comments: Vec<String>,

    /// Every simple name occurring in the declaration, in source order
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// Method call expressions, resolved to their declaring type
    #[serde(default)]
    pub calls: Vec<Resolution<CallTarget>>,

    /// Field declarations, resolved to their declared type
    #[serde(default)]
    pub fields: Vec<Resolution<ResolvedType>>,

    /// Local variable declarations, resolved to their declared type
    #[serde(default)]
    pub locals: Vec<Resolution<ResolvedType>>,

    /// Field access expressions, resolved to the accessed member's type
    #[serde(default)]
    pub field_accesses: Vec<Resolution<ResolvedType>>,
}

impl UnitDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifiers.push(identifier.into());
        self
    }

    pub fn with_call(mut self, call: Resolution<CallTarget>) -> Self {
        self.calls.push(call);
        self
    }

    pub fn with_field(mut self, field: Resolution<ResolvedType>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_local(mut self, local: Resolution<ResolvedType>) -> Self {
        self.locals.push(local);
        self
    }

    pub fn with_field_access(mut self, access: Resolution<ResolvedType>) -> Self {
        self.field_accesses.push(access);
        self
    }

    /// Comments followed by identifiers, space separated, each followed by a
    /// trailing space.
    #[must_use]
    pub fn document_text(&self) -> String {
        let capacity = self
            .comments
            .iter()
            .chain(&self.identifiers)
            .map(|s| s.len() + 1)
            .sum();
        let mut body = String::with_capacity(capacity);
        for text in self.comments.iter().chain(&self.identifiers) {
            body.push_str(text);
            body.push(' ');
        }
        body
    }
}
