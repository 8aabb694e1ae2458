//! Tree-sitter based C# reader.
//!
//! Lowers the concrete syntax tree into the IR. Unsupported syntax becomes
//! [`Node::Unknown`] carrying the node kind and original text; only a
//! front-end parse failure is an error.

use crate::ir::{BinaryOp, Method, Node, TypeDeclaration};
use crate::traits::{ReadError, Reader};
use tree_sitter::{Node as TsNode, Parser, Tree};

/// Static instance of the C# reader for the registry.
pub static CSHARP_READER: CSharpReader = CSharpReader;

/// C# reader using tree-sitter.
pub struct CSharpReader;

impl Reader for CSharpReader {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cs"]
    }

    fn read(&self, source: &str) -> Result<Node, ReadError> {
        read_csharp(source)
    }
}

/// Parse C# source into the IR.
pub fn read_csharp(source: &str) -> Result<Node, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_c_sharp::language().into())
        .map_err(|err| ReadError::Incomplete(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Incomplete("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_compilation_unit(&tree)
}

struct ReadContext<'a> {
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: TsNode) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn unknown(&self, node: TsNode) -> Node {
        Node::unknown(format!("{}: {}", node.kind(), self.node_text(node)))
    }

    fn read_compilation_unit(&self, tree: &Tree) -> Result<Node, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            return Err(ReadError::Incomplete(self.diagnostics(root)));
        }

        let mut usings = Vec::new();
        let mut members = Vec::new();
        let mut namespaces = Vec::new();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            if !child.is_named() || child.kind() == "comment" {
                continue;
            }
            match child.kind() {
                "using_directive" => usings.push(self.read_using_directive(child)),
                "namespace_declaration" | "file_scoped_namespace_declaration" => {
                    namespaces.push(child)
                }
                _ => members.push(self.read_node(child)),
            }
        }

        // A file holding exactly one explicit namespace is that namespace;
        // otherwise a synthetic empty one wraps the members.
        if members.is_empty() && namespaces.len() == 1 {
            match self.read_namespace(namespaces[0]) {
                Node::Namespace {
                    name,
                    usings: inner,
                    members,
                } => {
                    usings.extend(inner);
                    return Ok(Node::Namespace {
                        name,
                        usings,
                        members,
                    });
                }
                other => return Ok(other),
            }
        }
        for namespace in namespaces {
            members.push(self.read_namespace(namespace));
        }

        Ok(Node::Namespace {
            name: String::new(),
            usings,
            members,
        })
    }

    /// Locate the first error node and describe it.
    fn diagnostics(&self, root: TsNode) -> String {
        match self.first_error(root) {
            Some(node) => {
                let pos = node.start_position();
                let mut text = self.node_text(node).to_string();
                if text.len() > 40 {
                    text.truncate(40);
                }
                format!(
                    "syntax error at line {}, column {}: {}",
                    pos.row + 1,
                    pos.column + 1,
                    text
                )
            }
            None => "syntax error in source".into(),
        }
    }

    fn first_error<'t>(&self, node: TsNode<'t>) -> Option<TsNode<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        children
            .into_iter()
            .filter(|c| c.has_error())
            .find_map(|c| self.first_error(c).or(Some(c)))
    }

    // Dispatch ---------------------------------------------------------------

    fn read_node(&self, node: TsNode) -> Node {
        match node.kind() {
            "using_directive" => self.read_using_directive(node),
            "namespace_declaration" | "file_scoped_namespace_declaration" => {
                self.read_namespace(node)
            }
            "class_declaration" => {
                Node::ClassDeclaration(Box::new(self.read_type_declaration(node)))
            }
            "interface_declaration" => {
                Node::InterfaceDeclaration(Box::new(self.read_type_declaration(node)))
            }
            "method_declaration" => self.read_method(node),
            "constructor_declaration" => self.read_constructor(node),
            "property_declaration" => self.read_property(node),
            "field_declaration" => self.read_field(node),
            "parameter" => self.read_parameter(node),
            "attribute" => self.read_attribute(node),
            "block" => self.read_block(node),
            "global_statement" | "expression_statement" => self
                .first_named_child(node)
                .map(|c| self.read_node(c))
                .unwrap_or_else(|| self.unknown(node)),
            "local_declaration_statement" => self
                .child_of_kind(node, "variable_declaration")
                .map(|c| self.read_variable_declaration(c))
                .unwrap_or_else(|| self.unknown(node)),
            "if_statement" => self.read_if(node),
            "for_statement" => self.read_for(node),
            "foreach_statement" => self.read_foreach(node),
            "while_statement" => self.read_while(node),
            "switch_statement" => self.read_switch(node),
            "try_statement" => self.read_try(node),
            "using_statement" => self.read_using_statement(node),
            "throw_statement" => Node::Throw {
                operand: self.first_named_child(node).map(|c| Box::new(self.read_node(c))),
            },
            "return_statement" => Node::Return {
                operand: self.first_named_child(node).map(|c| Box::new(self.read_node(c))),
            },
            "break_statement" => Node::Break,
            "continue_statement" => Node::Continue,
            "variable_declaration" => self.read_variable_declaration(node),
            "variable_declarator" => self.read_variable_declarator(node),
            "assignment_expression" => self.read_assignment(node),
            "binary_expression" => self.read_binary(node),
            "invocation_expression" => self.read_invocation(node),
            "object_creation_expression" => self.read_object_creation(node),
            "array_creation_expression" | "implicit_array_creation_expression" => {
                self.read_array_creation(node)
            }
            "member_access_expression" => self.read_member_access(node),
            "element_access_expression" => self.read_element_access(node),
            "qualified_name" => self.read_qualified_name(node),
            "cast_expression" => self.read_cast(node),
            "identifier" => Node::ident(self.node_text(node)),
            "predefined_type" | "generic_name" => Node::type_expr(self.node_text(node)),
            "this_expression" => Node::ThisExpression,
            "parenthesized_expression" => Node::ParenthesizedExpression {
                operand: Box::new(
                    self.first_named_child(node)
                        .map(|c| self.read_node(c))
                        .unwrap_or_else(|| self.unknown(node)),
                ),
            },
            "prefix_unary_expression" => self.read_prefix_unary(node),
            "postfix_unary_expression" => self.read_postfix_unary(node),
            "string_literal" => {
                let text = self.node_text(node);
                let value = text
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(text);
                Node::string(value)
            }
            "verbatim_string_literal" => {
                let text = self.node_text(node);
                let value = text
                    .strip_prefix("@\"")
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(text);
                Node::string(value)
            }
            "interpolated_string_expression" => {
                let text = self.node_text(node);
                let value = text
                    .strip_prefix("$@\"")
                    .or_else(|| text.strip_prefix("$\""))
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(text);
                Node::TemplateStringConstant {
                    value: value.to_string(),
                }
            }
            "integer_literal" | "real_literal" | "boolean_literal" | "null_literal"
            | "character_literal" => Node::literal(self.node_text(node)),
            "argument" => self.read_argument(node),
            "argument_list" => self.read_argument_list(node),
            "bracketed_argument_list" => self.read_bracketed_argument_list(node),
            _ => self.unknown(node),
        }
    }

    // Node helpers -----------------------------------------------------------

    fn first_named_child<'t>(&self, node: TsNode<'t>) -> Option<TsNode<'t>> {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor)
            .find(|c| c.is_named() && c.kind() != "comment");
        result
    }

    fn child_of_kind<'t>(&self, node: TsNode<'t>, kind: &str) -> Option<TsNode<'t>> {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor).find(|c| c.kind() == kind);
        result
    }

    /// Surface modifier strings (`public`, `static`, `extern`, ...).
    fn modifiers(&self, node: TsNode) -> Vec<String> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|c| c.kind() == "modifier")
            .map(|c| self.node_text(c).to_string())
            .collect()
    }

    /// Attributes from every attribute list on a declaration.
    fn attributes(&self, node: TsNode) -> Vec<Node> {
        let mut attributes = Vec::new();
        let mut cursor = node.walk();
        for list in node.children(&mut cursor).filter(|c| c.kind() == "attribute_list") {
            let mut inner = list.walk();
            for attribute in list.children(&mut inner).filter(|c| c.kind() == "attribute") {
                attributes.push(self.read_attribute(attribute));
            }
        }
        attributes
    }

    fn field_text(&self, node: TsNode, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.node_text(n).to_string())
    }

    // Declarations -----------------------------------------------------------

    fn read_using_directive(&self, node: TsNode) -> Node {
        let mut cursor = node.walk();
        let name = node
            .children(&mut cursor)
            .find(|c| c.kind() == "qualified_name" || c.kind() == "identifier")
            .map(|c| self.node_text(c).to_string())
            .unwrap_or_default();
        Node::UsingDirective { name }
    }

    fn read_namespace(&self, node: TsNode) -> Node {
        let name = self.field_text(node, "name").unwrap_or_default();
        // File-scoped namespaces have no body node; their declarations are
        // direct children.
        let scope = node.child_by_field_name("body").unwrap_or(node);

        let mut usings = Vec::new();
        let mut members = Vec::new();
        let mut cursor = scope.walk();
        for child in scope.children(&mut cursor) {
            if !child.is_named() || child.kind() == "comment" {
                continue;
            }
            match child.kind() {
                "using_directive" => usings.push(self.read_using_directive(child)),
                // The name child, when iterating the namespace node itself.
                "qualified_name" | "identifier" => {}
                _ => members.push(self.read_node(child)),
            }
        }

        Node::Namespace {
            name,
            usings,
            members,
        }
    }

    fn read_type_declaration(&self, node: TsNode) -> TypeDeclaration {
        let name = self.field_text(node, "name").unwrap_or_default();
        let modifiers = self.modifiers(node);
        let attributes = self.attributes(node);

        let mut bases = Vec::new();
        if let Some(base_list) = self.child_of_kind(node, "base_list") {
            let mut cursor = base_list.walk();
            for base in base_list.children(&mut cursor).filter(|c| c.is_named()) {
                bases.push(self.node_text(base).to_string());
            }
        }

        let mut members = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.children(&mut cursor) {
                if member.is_named() && member.kind() != "comment" {
                    members.push(self.read_node(member));
                }
            }
        }

        TypeDeclaration {
            name,
            modifiers,
            attributes,
            bases,
            members,
        }
    }

    fn read_method(&self, node: TsNode) -> Node {
        let name = self.field_text(node, "name").unwrap_or_default();
        let return_type = self
            .field_text(node, "type")
            .or_else(|| self.field_text(node, "returns"))
            .unwrap_or_else(|| "void".into());
        let modifiers = self.modifiers(node);
        let attributes = self.attributes(node);
        let parameters = self.read_parameters(node);

        let body = node
            .child_by_field_name("body")
            .or_else(|| self.child_of_kind(node, "arrow_expression_clause"))
            .and_then(|body| match body.kind() {
                "block" => Some(self.read_block(body)),
                // Expression-bodied methods become a single-return block.
                "arrow_expression_clause" => self.first_named_child(body).map(|expr| {
                    Node::block(vec![Node::Return {
                        operand: Some(Box::new(self.read_node(expr))),
                    }])
                }),
                _ => Some(self.read_node(body)),
            });

        Node::MethodDeclaration(Box::new(Method {
            name,
            return_type,
            modifiers,
            attributes,
            parameters,
            body,
            original_source: self.node_text(node).to_string(),
        }))
    }

    fn read_parameters(&self, node: TsNode) -> Vec<Node> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        list.children(&mut cursor)
            .filter(|c| c.kind() == "parameter")
            .map(|c| self.read_parameter(c))
            .collect()
    }

    fn read_parameter(&self, node: TsNode) -> Node {
        let name = self.field_text(node, "name").unwrap_or_default();
        let ty = self.field_text(node, "type").unwrap_or_default();

        let mut modifiers = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let text = self.node_text(child);
            if matches!(text, "ref" | "out" | "in" | "params")
                && node.child_by_field_name("name") != Some(child)
            {
                modifiers.push(text.to_string());
            }
        }

        Node::Parameter {
            name,
            ty,
            modifiers,
        }
    }

    fn read_constructor(&self, node: TsNode) -> Node {
        let identifier = self.field_text(node, "name").unwrap_or_default();
        let parameters = self.read_parameters(node);
        let body = node
            .child_by_field_name("body")
            .map(|b| Box::new(self.read_block(b)));

        Node::Constructor {
            identifier,
            arguments: Box::new(Node::argument_list(parameters)),
            body,
        }
    }

    fn read_property(&self, node: TsNode) -> Node {
        // Accessor bodies are discarded.
        Node::PropertyDeclaration {
            name: self.field_text(node, "name").unwrap_or_default(),
            ty: self.field_text(node, "type").unwrap_or_default(),
            modifiers: self.modifiers(node),
        }
    }

    fn read_field(&self, node: TsNode) -> Node {
        let declaration = self.child_of_kind(node, "variable_declaration");
        let ty = declaration
            .and_then(|d| self.field_text(d, "type"))
            .unwrap_or_default();
        let name = declaration
            .and_then(|d| self.child_of_kind(d, "variable_declarator"))
            .and_then(|v| self.field_text(v, "name"))
            .unwrap_or_default();

        Node::FieldDeclaration {
            name,
            ty,
            modifiers: self.modifiers(node),
        }
    }

    fn read_attribute(&self, node: TsNode) -> Node {
        let name = self.field_text(node, "name").unwrap_or_default();
        let mut arguments = Vec::new();
        if let Some(list) = self.child_of_kind(node, "attribute_argument_list") {
            let mut cursor = list.walk();
            for argument in list
                .children(&mut cursor)
                .filter(|c| c.kind() == "attribute_argument")
            {
                arguments.push(self.read_attribute_argument(argument));
            }
        }
        Node::Attribute { name, arguments }
    }

    fn read_attribute_argument(&self, node: TsNode) -> Node {
        let mut cursor = node.walk();
        let children: Vec<_> = node
            .children(&mut cursor)
            .filter(|c| c.is_named() && c.kind() != "comment")
            .collect();

        // `Name = expr` arguments keep their assignment shape.
        let expression = match children.as_slice() {
            [name_equals, value] if name_equals.kind() == "name_equals" => {
                let name = self
                    .first_named_child(*name_equals)
                    .map(|n| self.node_text(n).to_string())
                    .unwrap_or_default();
                Node::assign(Node::ident(name), self.read_node(*value))
            }
            [expr, ..] => self.read_node(*expr),
            [] => self.unknown(node),
        };

        Node::AttributeArgument {
            expression: Box::new(expression),
        }
    }

    // Statements -------------------------------------------------------------

    fn read_block(&self, node: TsNode) -> Node {
        let mut statements = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if !child.is_named() || matches!(child.kind(), "comment" | "empty_statement") {
                continue;
            }
            statements.push(self.read_node(child));
        }
        Node::Block { statements }
    }

    fn read_if(&self, node: TsNode) -> Node {
        let condition = node
            .child_by_field_name("condition")
            .map(|c| self.read_node(c))
            .unwrap_or_else(|| self.unknown(node));
        let body = node
            .child_by_field_name("consequence")
            .map(|c| self.read_node(c))
            .unwrap_or_else(|| Node::block(vec![]));
        let else_clause = node.child_by_field_name("alternative").map(|alt| {
            Box::new(Node::ElseClause {
                body: Box::new(self.read_node(alt)),
            })
        });

        Node::If {
            condition: Box::new(condition),
            body: Box::new(body),
            else_clause,
        }
    }

    fn read_for(&self, node: TsNode) -> Node {
        let mut declaration = None;
        let mut initializers = Vec::new();
        let mut cursor = node.walk();
        for initializer in node.children_by_field_name("initializer", &mut cursor) {
            if initializer.kind() == "variable_declaration" {
                declaration = Some(Box::new(self.read_variable_declaration(initializer)));
            } else {
                initializers.push(self.read_node(initializer));
            }
        }

        let condition = node
            .child_by_field_name("condition")
            .map(|c| Box::new(self.read_node(c)));

        let mut incrementors = Vec::new();
        let mut cursor = node.walk();
        for update in node.children_by_field_name("update", &mut cursor) {
            incrementors.push(self.read_node(update));
        }

        let statement = node
            .child_by_field_name("body")
            .map(|b| self.read_node(b))
            .unwrap_or_else(|| Node::block(vec![]));

        Node::For {
            declaration,
            initializers,
            condition,
            incrementors,
            statement: Box::new(statement),
        }
    }

    fn read_foreach(&self, node: TsNode) -> Node {
        let identifier = node
            .child_by_field_name("left")
            .map(|l| Node::ident(self.node_text(l)))
            .unwrap_or_else(|| self.unknown(node));
        let expression = node
            .child_by_field_name("right")
            .map(|r| self.read_node(r))
            .unwrap_or_else(|| self.unknown(node));
        let statement = node
            .child_by_field_name("body")
            .map(|b| self.read_node(b))
            .unwrap_or_else(|| Node::block(vec![]));

        Node::ForEach {
            identifier: Box::new(identifier),
            expression: Box::new(expression),
            statement: Box::new(statement),
        }
    }

    fn read_while(&self, node: TsNode) -> Node {
        let condition = node
            .child_by_field_name("condition")
            .map(|c| self.read_node(c))
            .unwrap_or_else(|| self.unknown(node));
        let statement = node
            .child_by_field_name("body")
            .map(|b| self.read_node(b))
            .unwrap_or_else(|| Node::block(vec![]));

        Node::While {
            condition: Box::new(condition),
            statement: Box::new(statement),
        }
    }

    fn read_switch(&self, node: TsNode) -> Node {
        let expression = node
            .child_by_field_name("value")
            .or_else(|| {
                let mut cursor = node.walk();
                let result = node.children(&mut cursor)
                    .find(|c| c.is_named() && c.kind() != "switch_body" && c.kind() != "comment");
                result
            })
            .map(|v| self.read_node(v))
            .unwrap_or_else(|| self.unknown(node));

        let mut sections = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for section in body
                .children(&mut cursor)
                .filter(|c| c.kind() == "switch_section")
            {
                sections.push(self.read_switch_section(section));
            }
        }

        Node::Switch {
            expression: Box::new(expression),
            sections,
        }
    }

    fn read_switch_section(&self, node: TsNode) -> Node {
        let mut labels = Vec::new();
        let mut statements = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if !child.is_named() || child.kind() == "comment" {
                continue;
            }
            match child.kind() {
                "case_switch_label" => {
                    let label = self
                        .first_named_child(child)
                        .map(|l| self.read_node(l))
                        .unwrap_or_else(|| self.unknown(child));
                    labels.push(label);
                }
                "default_switch_label" => labels.push(Node::ident("default")),
                "case_pattern_switch_label" => labels.push(self.unknown(child)),
                _ => statements.push(self.read_node(child)),
            }
        }

        Node::SwitchSection { labels, statements }
    }

    fn read_try(&self, node: TsNode) -> Node {
        let block = node
            .child_by_field_name("body")
            .map(|b| self.read_block(b))
            .unwrap_or_else(|| Node::block(vec![]));

        let mut catches = Vec::new();
        let mut finally_clause = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "catch_clause" => catches.push(self.read_catch(child)),
                "finally_clause" => {
                    let body = self
                        .child_of_kind(child, "block")
                        .map(|b| self.read_block(b))
                        .unwrap_or_else(|| Node::block(vec![]));
                    finally_clause = Some(Box::new(Node::Finally {
                        body: Box::new(body),
                    }));
                }
                _ => {}
            }
        }

        Node::Try {
            block: Box::new(block),
            catches,
            finally_clause,
        }
    }

    fn read_catch(&self, node: TsNode) -> Node {
        let declaration = self.child_of_kind(node, "catch_declaration").map(|decl| {
            Box::new(Node::CatchDeclaration {
                ty: self.field_text(decl, "type").unwrap_or_default(),
            })
        });
        let block = node
            .child_by_field_name("body")
            .map(|b| self.read_block(b))
            .unwrap_or_else(|| Node::block(vec![]));

        Node::Catch {
            declaration,
            block: Box::new(block),
        }
    }

    fn read_using_statement(&self, node: TsNode) -> Node {
        let body_node = node.child_by_field_name("body");
        let mut cursor = node.walk();
        let resource = node.children(&mut cursor).find(|c| {
            c.is_named() && c.kind() != "comment" && Some(*c) != body_node
        });

        let declaration = resource
            .map(|r| self.read_node(r))
            .unwrap_or_else(|| self.unknown(node));
        let body = body_node
            .map(|b| self.read_node(b))
            .unwrap_or_else(|| Node::block(vec![]));

        Node::Using {
            declaration: Box::new(declaration),
            body: Box::new(body),
        }
    }

    fn read_variable_declaration(&self, node: TsNode) -> Node {
        let ty = self.field_text(node, "type").unwrap_or_default();
        let mut variables = Vec::new();
        let mut cursor = node.walk();
        for declarator in node
            .children(&mut cursor)
            .filter(|c| c.kind() == "variable_declarator")
        {
            variables.push(self.read_variable_declarator(declarator));
        }

        Node::VariableDeclaration { ty, variables }
    }

    fn read_variable_declarator(&self, node: TsNode) -> Node {
        let name = self
            .field_text(node, "name")
            .or_else(|| {
                self.child_of_kind(node, "identifier")
                    .map(|n| self.node_text(n).to_string())
            })
            .unwrap_or_default();

        let initializer = self
            .child_of_kind(node, "equals_value_clause")
            .and_then(|eq| self.first_named_child(eq))
            .or_else(|| node.child_by_field_name("value"))
            .map(|init| Box::new(self.read_node(init)));

        Node::VariableDeclarator { name, initializer }
    }

    // Expressions ------------------------------------------------------------

    fn read_assignment(&self, node: TsNode) -> Node {
        let Some(left) = node.child_by_field_name("left") else {
            return self.unknown(node);
        };
        let Some(right) = node.child_by_field_name("right") else {
            return self.unknown(node);
        };
        let operator = node
            .child_by_field_name("operator")
            .map(|o| self.node_text(o))
            .unwrap_or("=");

        match operator {
            "=" => Node::assign(self.read_node(left), self.read_node(right)),
            // Compound assignment desugars to `left = left op right`.
            "+=" | "-=" | "|=" => {
                let op = match operator {
                    "+=" => BinaryOp::Plus,
                    "-=" => BinaryOp::Minus,
                    _ => BinaryOp::Bor,
                };
                Node::assign(
                    self.read_node(left),
                    Node::binary(self.read_node(left), op, self.read_node(right)),
                )
            }
            _ => self.unknown(node),
        }
    }

    fn read_binary(&self, node: TsNode) -> Node {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return self.unknown(node);
        };
        let op = node
            .child_by_field_name("operator")
            .map(|o| binary_operator(self.node_text(o)))
            .unwrap_or(BinaryOp::Unknown);

        Node::binary(self.read_node(left), op, self.read_node(right))
    }

    fn read_invocation(&self, node: TsNode) -> Node {
        let expression = node
            .child_by_field_name("function")
            .map(|f| self.read_node(f))
            .unwrap_or_else(|| self.unknown(node));
        let arguments = node
            .child_by_field_name("arguments")
            .map(|a| self.read_argument_list(a))
            .unwrap_or_else(|| Node::argument_list(vec![]));

        Node::invocation(expression, arguments)
    }

    fn read_object_creation(&self, node: TsNode) -> Node {
        let ty = self.field_text(node, "type").unwrap_or_default();
        let arguments = node
            .child_by_field_name("arguments")
            .map(|a| self.read_argument_list(a))
            .unwrap_or_else(|| Node::argument_list(vec![]));

        Node::ObjectCreation {
            ty,
            arguments: Box::new(arguments),
        }
    }

    fn read_array_creation(&self, node: TsNode) -> Node {
        let mut initializer = Vec::new();
        if let Some(init) = self.child_of_kind(node, "initializer_expression") {
            let mut cursor = init.walk();
            for element in init.children(&mut cursor) {
                if element.is_named() && element.kind() != "comment" {
                    initializer.push(self.read_node(element));
                }
            }
        }
        Node::ArrayCreation { initializer }
    }

    fn read_member_access(&self, node: TsNode) -> Node {
        let expression = node
            .child_by_field_name("expression")
            .map(|e| self.read_node(e))
            .unwrap_or_else(|| self.unknown(node));
        let identifier = self.field_text(node, "name").unwrap_or_default();

        Node::member(expression, identifier)
    }

    fn read_element_access(&self, node: TsNode) -> Node {
        let expression = node
            .child_by_field_name("expression")
            .map(|e| self.read_node(e))
            .unwrap_or_else(|| self.unknown(node));
        let arguments = node
            .child_by_field_name("subscript")
            .or_else(|| self.child_of_kind(node, "bracketed_argument_list"))
            .map(|a| self.read_bracketed_argument_list(a))
            .unwrap_or_else(|| Node::BracketedArgumentList { arguments: vec![] });

        Node::invocation(expression, arguments)
    }

    fn read_qualified_name(&self, node: TsNode) -> Node {
        let expression = node
            .child_by_field_name("qualifier")
            .map(|q| self.read_node(q))
            .unwrap_or_else(|| self.unknown(node));
        let identifier = self.field_text(node, "name").unwrap_or_default();

        Node::member(expression, identifier)
    }

    fn read_cast(&self, node: TsNode) -> Node {
        let ty = self.field_text(node, "type").unwrap_or_default();
        let expression = node
            .child_by_field_name("value")
            .map(|v| self.read_node(v))
            .unwrap_or_else(|| self.unknown(node));

        Node::Cast {
            ty,
            expression: Box::new(expression),
        }
    }

    fn read_prefix_unary(&self, node: TsNode) -> Node {
        let operator = node.child(0).map(|o| self.node_text(o)).unwrap_or("");
        if operator == "++" || operator == "--" {
            if let Some(operand) = self.first_named_child(node) {
                return Node::PrefixUnaryExpression {
                    operand: Box::new(self.read_node(operand)),
                };
            }
        }
        self.unknown(node)
    }

    fn read_postfix_unary(&self, node: TsNode) -> Node {
        let operator = node
            .child(node.child_count().saturating_sub(1))
            .map(|o| self.node_text(o))
            .unwrap_or("");
        if operator == "++" || operator == "--" {
            if let Some(operand) = self.first_named_child(node) {
                return Node::PostfixUnaryExpression {
                    operand: Box::new(self.read_node(operand)),
                };
            }
        }
        self.unknown(node)
    }

    fn read_argument(&self, node: TsNode) -> Node {
        let mut cursor = node.walk();
        let expression = node
            .children(&mut cursor)
            .find(|c| c.is_named() && !matches!(c.kind(), "comment" | "name_colon"))
            .map(|c| self.read_node(c))
            .unwrap_or_else(|| self.unknown(node));

        Node::argument(expression)
    }

    fn read_argument_list(&self, node: TsNode) -> Node {
        let mut cursor = node.walk();
        let arguments = node
            .children(&mut cursor)
            .filter(|c| c.kind() == "argument")
            .map(|c| self.read_argument(c))
            .collect();

        Node::ArgumentList { arguments }
    }

    fn read_bracketed_argument_list(&self, node: TsNode) -> Node {
        let mut cursor = node.walk();
        let arguments = node
            .children(&mut cursor)
            .filter(|c| c.kind() == "argument")
            .map(|c| self.read_argument(c))
            .collect();

        Node::BracketedArgumentList { arguments }
    }
}

/// Closed operator lookup.
fn binary_operator(text: &str) -> BinaryOp {
    match text {
        "!=" => BinaryOp::NotEqual,
        "==" => BinaryOp::Equal,
        "!" => BinaryOp::Not,
        ">" => BinaryOp::GreaterThan,
        ">=" => BinaryOp::GreaterThanEqualTo,
        "<" => BinaryOp::LessThan,
        "<=" => BinaryOp::LessThanEqualTo,
        "||" => BinaryOp::Or,
        "&&" => BinaryOp::And,
        "|" => BinaryOp::Bor,
        "-" => BinaryOp::Minus,
        "+" => BinaryOp::Plus,
        _ => BinaryOp::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Node {
        read_csharp(code).expect("parse failed")
    }

    fn members(root: &Node) -> &[Node] {
        match root {
            Node::Namespace { members, .. } => members,
            _ => panic!("expected Namespace root"),
        }
    }

    #[test]
    fn compilation_unit_becomes_synthetic_namespace() {
        let root = parse("var x = 1;");
        match &root {
            Node::Namespace { name, members, .. } => {
                assert!(name.is_empty());
                assert_eq!(members.len(), 1);
                assert!(matches!(members[0], Node::VariableDeclaration { .. }));
            }
            _ => panic!("expected Namespace"),
        }
    }

    #[test]
    fn explicit_namespace_is_the_root() {
        let root = parse("namespace Demo.App { class C { } }");
        match &root {
            Node::Namespace { name, members, .. } => {
                assert_eq!(name, "Demo.App");
                assert!(matches!(members[0], Node::ClassDeclaration(_)));
            }
            _ => panic!("expected Namespace"),
        }
    }

    #[test]
    fn using_directives_are_lifted() {
        let root = parse("using System;\nusing System.IO;\nclass C { }");
        match &root {
            Node::Namespace { usings, .. } => {
                assert_eq!(usings.len(), 2);
                assert_eq!(
                    usings[0],
                    Node::UsingDirective {
                        name: "System".into()
                    }
                );
            }
            _ => panic!("expected Namespace"),
        }
    }

    #[test]
    fn class_modifiers_bases_and_members() {
        let root = parse(
            "public abstract class Node : Base, IThing { public int Count { get; set; } private string _name; }",
        );
        let Node::ClassDeclaration(decl) = &members(&root)[0] else {
            panic!("expected class");
        };
        assert_eq!(decl.name, "Node");
        assert_eq!(decl.modifiers, vec!["public", "abstract"]);
        assert_eq!(decl.bases, vec!["Base", "IThing"]);
        assert_eq!(decl.members.len(), 2);
        assert!(matches!(
            &decl.members[0],
            Node::PropertyDeclaration { name, ty, .. } if name == "Count" && ty == "int"
        ));
        assert!(matches!(
            &decl.members[1],
            Node::FieldDeclaration { name, ty, .. } if name == "_name" && ty == "string"
        ));
    }

    #[test]
    fn method_captures_signature_and_source() {
        let root = parse("class C { public static int Add(int a, ref int b) { return a; } }");
        let Node::ClassDeclaration(decl) = &members(&root)[0] else {
            panic!("expected class");
        };
        let Node::MethodDeclaration(method) = &decl.members[0] else {
            panic!("expected method");
        };
        assert_eq!(method.name, "Add");
        assert_eq!(method.return_type, "int");
        assert_eq!(method.modifiers, vec!["public", "static"]);
        assert_eq!(method.parameters.len(), 2);
        assert!(matches!(
            &method.parameters[1],
            Node::Parameter { name, modifiers, .. } if name == "b" && modifiers == &["ref".to_string()]
        ));
        assert!(method.body.is_some());
        assert!(method.original_source.contains("Add(int a, ref int b)"));
    }

    #[test]
    fn abstract_method_has_no_body() {
        let root = parse("abstract class C { public abstract void Send(); }");
        let Node::ClassDeclaration(decl) = &members(&root)[0] else {
            panic!("expected class");
        };
        let Node::MethodDeclaration(method) = &decl.members[0] else {
            panic!("expected method");
        };
        assert!(method.body.is_none());
    }

    #[test]
    fn extern_method_with_dll_import() {
        let root = parse(
            "class C { [DllImport(\"user32.dll\")] public static extern int Beep(int f); }",
        );
        let Node::ClassDeclaration(decl) = &members(&root)[0] else {
            panic!("expected class");
        };
        let Node::MethodDeclaration(method) = &decl.members[0] else {
            panic!("expected method");
        };
        assert!(method.is_platform_invoke());
        assert!(method.body.is_none());
    }

    #[test]
    fn if_else_chain_maps_to_else_clause() {
        let root = parse("if (a == b) { } else if (c != d) { } else { }");
        let Node::If { else_clause, .. } = &members(&root)[0] else {
            panic!("expected if");
        };
        let Some(else_clause) = else_clause else {
            panic!("expected else clause");
        };
        let Node::ElseClause { body } = else_clause.as_ref() else {
            panic!("expected ElseClause");
        };
        assert!(body.is_if());
    }

    #[test]
    fn operator_lookup_is_closed() {
        let root = parse("var x = a == b;");
        let Node::VariableDeclaration { variables, .. } = &members(&root)[0] else {
            panic!("expected declaration");
        };
        let Node::VariableDeclarator { initializer, .. } = &variables[0] else {
            panic!("expected declarator");
        };
        assert!(matches!(
            initializer.as_deref(),
            Some(Node::BinaryExpression {
                op: BinaryOp::Equal,
                ..
            })
        ));

        // Multiplication is outside the closed set.
        let root = parse("var x = a * b;");
        let Node::VariableDeclaration { variables, .. } = &members(&root)[0] else {
            panic!("expected declaration");
        };
        let Node::VariableDeclarator { initializer, .. } = &variables[0] else {
            panic!("expected declarator");
        };
        assert!(matches!(
            initializer.as_deref(),
            Some(Node::BinaryExpression {
                op: BinaryOp::Unknown,
                ..
            })
        ));
    }

    #[test]
    fn switch_default_label_is_identifier() {
        let root = parse("switch (x) { case 1: break; default: break; }");
        let Node::Switch { sections, .. } = &members(&root)[0] else {
            panic!("expected switch");
        };
        assert_eq!(sections.len(), 2);
        let Node::SwitchSection { labels, .. } = &sections[1] else {
            panic!("expected section");
        };
        assert_eq!(labels[0], Node::ident("default"));
    }

    #[test]
    fn using_resource_keeps_declaration() {
        let root = parse("using (var s = new S()) { s.Go(); }");
        let Node::Using { declaration, body } = &members(&root)[0] else {
            panic!("expected using");
        };
        assert_eq!(declaration.declared_name(), Some("s"));
        assert!(body.is_block());
    }

    #[test]
    fn catch_without_declaration() {
        let root = parse("try { } catch { } finally { }");
        let Node::Try {
            catches,
            finally_clause,
            ..
        } = &members(&root)[0]
        else {
            panic!("expected try");
        };
        assert_eq!(catches.len(), 1);
        assert!(matches!(
            &catches[0],
            Node::Catch {
                declaration: None,
                ..
            }
        ));
        assert!(finally_clause.is_some());
    }

    #[test]
    fn catch_with_declaration() {
        let root = parse("try { } catch (InvalidOperationException e) { }");
        let Node::Try { catches, .. } = &members(&root)[0] else {
            panic!("expected try");
        };
        assert!(matches!(
            catches[0],
            Node::Catch {
                declaration: Some(ref decl),
                ..
            } if matches!(decl.as_ref(), Node::CatchDeclaration { ty } if ty == "InvalidOperationException")
        ));
    }

    #[test]
    fn foreach_identifier_is_wrapped() {
        let root = parse("foreach (var item in items) { }");
        let Node::ForEach { identifier, .. } = &members(&root)[0] else {
            panic!("expected foreach");
        };
        // `left` holds just the loop variable.
        assert_eq!(identifier.as_ref(), &Node::ident("item"));
    }

    #[test]
    fn compound_assignment_desugars() {
        let root = parse("x += 1;");
        let Node::Assignment { right, .. } = &members(&root)[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(
            right.as_ref(),
            Node::BinaryExpression {
                op: BinaryOp::Plus,
                ..
            }
        ));
    }

    #[test]
    fn strings_and_literals() {
        let root = parse("var a = \"plain\"; var b = $\"hi {x}\"; var c = true;");
        let nodes = members(&root);
        let init = |n: &Node| -> Node {
            match n {
                Node::VariableDeclaration { variables, .. } => match &variables[0] {
                    Node::VariableDeclarator {
                        initializer: Some(i),
                        ..
                    } => i.as_ref().clone(),
                    _ => panic!("expected initializer"),
                },
                _ => panic!("expected declaration"),
            }
        };
        assert_eq!(init(&nodes[0]), Node::string("plain"));
        assert_eq!(
            init(&nodes[1]),
            Node::TemplateStringConstant {
                value: "hi {x}".into()
            }
        );
        assert_eq!(init(&nodes[2]), Node::literal("true"));
    }

    #[test]
    fn unsupported_syntax_becomes_unknown() {
        let root = parse("var f = x => x;");
        // The lambda is outside the translated subset; it must surface as
        // Unknown somewhere in the tree, never vanish.
        fn contains_unknown(node: &Node) -> bool {
            match node {
                Node::Unknown { message } => !message.is_empty(),
                Node::Namespace { members, .. } => members.iter().any(contains_unknown),
                Node::VariableDeclaration { variables, .. } => {
                    variables.iter().any(contains_unknown)
                }
                Node::VariableDeclarator {
                    initializer: Some(i),
                    ..
                } => contains_unknown(i),
                _ => false,
            }
        }
        assert!(contains_unknown(&root));
    }

    #[test]
    fn malformed_input_is_a_parse_failure() {
        let err = read_csharp("class {{{");
        assert!(matches!(err, Err(ReadError::Incomplete(_))));
        if let Err(ReadError::Incomplete(message)) = err {
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn element_access_uses_bracketed_arguments() {
        let root = parse("var v = items[0];");
        let Node::VariableDeclaration { variables, .. } = &members(&root)[0] else {
            panic!("expected declaration");
        };
        let Node::VariableDeclarator {
            initializer: Some(init),
            ..
        } = &variables[0]
        else {
            panic!("expected initializer");
        };
        assert!(matches!(
            init.as_ref(),
            Node::Invocation { arguments, .. }
                if matches!(arguments.as_ref(), Node::BracketedArgumentList { .. })
        ));
    }
}
