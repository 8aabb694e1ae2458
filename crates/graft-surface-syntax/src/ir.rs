//! Intermediate representation for the translatable subset of C#.
//!
//! The reader lowers the concrete syntax tree into this IR; writers walk it
//! to produce target text. Nodes are pure data: no behavior beyond
//! construction helpers, and no mutation after the reader hands the tree off.
//!
//! Anything the reader does not understand collapses into [`Node::Unknown`],
//! which carries a human-readable message and renders verbatim in the output
//! so the reader of the translated text can locate it.

use serde::{Deserialize, Serialize};

/// Output language a writer identifies as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// Script-function dialect.
    PowerShell,
    /// Class-oriented dialect (5.0+ class syntax).
    PowerShell5,
}

/// Binary operators the translation understands.
///
/// The set is closed on purpose: an operator outside it makes the whole
/// expression an [`Node::Unknown`] at read time, never a silent passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Unknown,
    NotEqual,
    Equal,
    Not,
    GreaterThan,
    GreaterThanEqualTo,
    LessThan,
    LessThanEqualTo,
    Or,
    And,
    Bor,
    Minus,
    Plus,
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Type name as spelled in the source.
    pub name: String,
    /// Surface modifier strings (`public`, `static`, `abstract`, ...).
    pub modifiers: Vec<String>,
    /// `Node::Attribute` entries lifted from attribute lists.
    pub attributes: Vec<Node>,
    /// Base types as surface strings.
    pub bases: Vec<String>,
    pub members: Vec<Node>,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    /// Return type surface string; `void` for none.
    pub return_type: String,
    pub modifiers: Vec<String>,
    /// `Node::Attribute` entries.
    pub attributes: Vec<Node>,
    /// `Node::Parameter` entries.
    pub parameters: Vec<Node>,
    /// Absent for abstract and extern methods.
    pub body: Option<Node>,
    /// Full declaration text as it appeared in the source. Platform-invoke
    /// rendering re-emits this verbatim inside an `Add-Type` block.
    pub original_source: String,
}

impl Method {
    /// True when the method binds to a native library: a `DllImport`
    /// attribute combined with an `extern` modifier.
    pub fn is_platform_invoke(&self) -> bool {
        let imported = self.attributes.iter().any(|a| {
            matches!(a, Node::Attribute { name, .. } if name == "DllImport")
        });
        imported && self.modifiers.iter().any(|m| m == "extern")
    }
}

/// The closed sum of IR node variants.
///
/// Every variant has exactly one visit arm in every writer; the dispatch
/// match is exhaustive so adding a variant forces every writer to handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Top-level container. A compilation unit without an explicit namespace
    /// becomes a `Namespace` with an empty name.
    Namespace {
        name: String,
        usings: Vec<Node>,
        members: Vec<Node>,
    },
    /// `using X.Y.Z;` (the directive, not the resource statement).
    UsingDirective { name: String },
    ClassDeclaration(Box<TypeDeclaration>),
    InterfaceDeclaration(Box<TypeDeclaration>),
    MethodDeclaration(Box<Method>),
    Constructor {
        identifier: String,
        /// An `ArgumentList` holding `Parameter` nodes.
        arguments: Box<Node>,
        body: Option<Box<Node>>,
    },
    /// Accessor bodies are discarded; only name, type, modifiers survive.
    PropertyDeclaration {
        name: String,
        ty: String,
        modifiers: Vec<String>,
    },
    FieldDeclaration {
        name: String,
        ty: String,
        modifiers: Vec<String>,
    },
    Parameter {
        name: String,
        ty: String,
        /// `ref` / `out` surface strings.
        modifiers: Vec<String>,
    },
    Attribute {
        name: String,
        /// `AttributeArgument` nodes.
        arguments: Vec<Node>,
    },
    AttributeArgument { expression: Box<Node> },
    Block { statements: Vec<Node> },
    If {
        condition: Box<Node>,
        body: Box<Node>,
        else_clause: Option<Box<Node>>,
    },
    /// `body` may itself be another `If` (chained `else if`).
    ElseClause { body: Box<Node> },
    For {
        declaration: Option<Box<Node>>,
        initializers: Vec<Node>,
        condition: Option<Box<Node>>,
        incrementors: Vec<Node>,
        statement: Box<Node>,
    },
    ForEach {
        /// Wrapped as an `IdentifierName`.
        identifier: Box<Node>,
        expression: Box<Node>,
        statement: Box<Node>,
    },
    While {
        condition: Box<Node>,
        statement: Box<Node>,
    },
    Switch {
        expression: Box<Node>,
        sections: Vec<Node>,
    },
    /// The `default` label is an `IdentifierName("default")` so writers can
    /// detect it by name comparison.
    SwitchSection {
        labels: Vec<Node>,
        statements: Vec<Node>,
    },
    Try {
        block: Box<Node>,
        catches: Vec<Node>,
        finally_clause: Option<Box<Node>>,
    },
    Catch {
        declaration: Option<Box<Node>>,
        block: Box<Node>,
    },
    CatchDeclaration { ty: String },
    Finally { body: Box<Node> },
    /// The resource form: `using (R = expr) stmt`.
    Using {
        declaration: Box<Node>,
        body: Box<Node>,
    },
    Throw { operand: Option<Box<Node>> },
    Break,
    Continue,
    Return { operand: Option<Box<Node>> },
    Assignment {
        left: Box<Node>,
        right: Box<Node>,
    },
    BinaryExpression {
        left: Box<Node>,
        op: BinaryOp,
        right: Box<Node>,
    },
    Invocation {
        expression: Box<Node>,
        /// An `ArgumentList`, or a `BracketedArgumentList` for element access.
        arguments: Box<Node>,
    },
    ObjectCreation {
        ty: String,
        /// An `ArgumentList`.
        arguments: Box<Node>,
    },
    ArrayCreation { initializer: Vec<Node> },
    /// `expression` may be a `TypeExpression`, which writers render as
    /// static access.
    MemberAccess {
        expression: Box<Node>,
        identifier: String,
    },
    IdentifierName { name: String },
    TypeExpression { type_name: String },
    Cast {
        ty: String,
        expression: Box<Node>,
    },
    /// Numeric, boolean, char and null literals; surface token preserved.
    Literal { token: String },
    StringConstant { value: String },
    /// Interpolated string; kept double-quoted by writers.
    TemplateStringConstant { value: String },
    VariableDeclaration {
        ty: String,
        /// `VariableDeclarator` nodes.
        variables: Vec<Node>,
    },
    VariableDeclarator {
        name: String,
        initializer: Option<Box<Node>>,
    },
    ThisExpression,
    ParenthesizedExpression { operand: Box<Node> },
    PostfixUnaryExpression { operand: Box<Node> },
    PrefixUnaryExpression { operand: Box<Node> },
    Argument { expression: Box<Node> },
    ArgumentList { arguments: Vec<Node> },
    BracketedArgumentList { arguments: Vec<Node> },
    /// Escape hatch: text emitted as-is.
    RawCode { code: String },
    /// Terminal fallback for unsupported syntax; never has children.
    Unknown { message: String },
}

impl Node {
    pub fn ident(name: impl Into<String>) -> Self {
        Node::IdentifierName { name: name.into() }
    }

    pub fn type_expr(type_name: impl Into<String>) -> Self {
        Node::TypeExpression {
            type_name: type_name.into(),
        }
    }

    pub fn literal(token: impl Into<String>) -> Self {
        Node::Literal {
            token: token.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::StringConstant {
            value: value.into(),
        }
    }

    pub fn raw(code: impl Into<String>) -> Self {
        Node::RawCode { code: code.into() }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Node::Unknown {
            message: message.into(),
        }
    }

    pub fn block(statements: Vec<Node>) -> Self {
        Node::Block { statements }
    }

    pub fn binary(left: Node, op: BinaryOp, right: Node) -> Self {
        Node::BinaryExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assign(left: Node, right: Node) -> Self {
        Node::Assignment {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn member(expression: Node, identifier: impl Into<String>) -> Self {
        Node::MemberAccess {
            expression: Box::new(expression),
            identifier: identifier.into(),
        }
    }

    pub fn argument(expression: Node) -> Self {
        Node::Argument {
            expression: Box::new(expression),
        }
    }

    pub fn argument_list(arguments: Vec<Node>) -> Self {
        Node::ArgumentList { arguments }
    }

    pub fn invocation(expression: Node, arguments: Node) -> Self {
        Node::Invocation {
            expression: Box::new(expression),
            arguments: Box::new(arguments),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Node::Block { .. })
    }

    pub fn is_if(&self) -> bool {
        matches!(self, Node::If { .. })
    }

    /// Name of the first declarator, for nodes that declare a variable.
    /// Used by the resource-`using` lowering to address the variable again
    /// in the `finally` block.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Node::VariableDeclaration { variables, .. } => {
                variables.iter().find_map(|v| match v {
                    Node::VariableDeclarator { name, .. } => Some(name.as_str()),
                    _ => None,
                })
            }
            Node::VariableDeclarator { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_expression_tree() {
        let expr = Node::binary(Node::ident("a"), BinaryOp::Equal, Node::ident("b"));
        match expr {
            Node::BinaryExpression { op, .. } => assert_eq!(op, BinaryOp::Equal),
            _ => panic!("expected BinaryExpression"),
        }
    }

    #[test]
    fn declared_name_from_declaration() {
        let decl = Node::VariableDeclaration {
            ty: "var".into(),
            variables: vec![Node::VariableDeclarator {
                name: "s".into(),
                initializer: None,
            }],
        };
        assert_eq!(decl.declared_name(), Some("s"));
        assert_eq!(Node::Break.declared_name(), None);
    }

    #[test]
    fn platform_invoke_requires_attribute_and_modifier() {
        let mut method = Method {
            name: "Beep".into(),
            return_type: "bool".into(),
            modifiers: vec!["public".into(), "static".into(), "extern".into()],
            attributes: vec![Node::Attribute {
                name: "DllImport".into(),
                arguments: vec![],
            }],
            parameters: vec![],
            body: None,
            original_source: String::new(),
        };
        assert!(method.is_platform_invoke());

        method.modifiers.retain(|m| m != "extern");
        assert!(!method.is_platform_invoke());
    }
}
