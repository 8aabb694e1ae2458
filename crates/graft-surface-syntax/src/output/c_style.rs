//! C-style writer base.
//!
//! [`CStyleVisit`] gives every IR variant a default emission that produces
//! brace-and-semicolon shaped output. Dialect writers are structs that
//! implement the trait and override the variants that differ; the dispatch
//! in [`CStyleVisit::visit`] is exhaustive, so a new variant will not
//! compile until every writer handles it.

use crate::ir::{BinaryOp, Language, Method, Node, TypeDeclaration};

/// Text builder with an indentation stack.
///
/// `outdent` removes one indent unit of trailing whitespace from the buffer
/// when present, so a caller can emit `newline(); outdent(); append("}")`
/// and land the brace at the prior column.
pub struct Emitter {
    buf: String,
    depth: usize,
    indent_unit: &'static str,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            indent_unit: "    ",
        }
    }

    pub fn with_indent_unit(indent_unit: &'static str) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            indent_unit,
        }
    }

    pub fn append(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Line separator followed by the current indentation.
    pub fn newline(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.depth {
            self.buf.push_str(self.indent_unit);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.buf.ends_with(self.indent_unit) {
            let cut = self.buf.len() - self.indent_unit.len();
            self.buf.truncate(cut);
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn last_char(&self) -> Option<char> {
        self.buf.chars().next_back()
    }

    /// True when nothing but indentation follows the last line separator.
    pub fn at_line_start(&self) -> bool {
        self.buf
            .rfind('\n')
            .map(|i| self.buf[i + 1..].chars().all(|c| c == ' '))
            .unwrap_or(self.buf.is_empty())
    }

    /// Remove `suffix` from the end of the buffer if present. Used for
    /// trailing-separator elision in argument and initializer lists.
    pub fn trim_suffix(&mut self, suffix: &str) -> bool {
        if self.buf.ends_with(suffix) {
            let cut = self.buf.len() - suffix.len();
            self.buf.truncate(cut);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.buf.clear();
        self.depth = 0;
    }

    pub fn take(&mut self) -> String {
        self.depth = 0;
        std::mem::take(&mut self.buf)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Visit-per-variant emission with C-style defaults.
pub trait CStyleVisit {
    /// The per-writer builder. Reset at the start of every [`write`] call.
    ///
    /// [`write`]: CStyleVisit::write
    fn out(&mut self) -> &mut Emitter;

    /// The language tag the writer identifies as.
    fn language(&self) -> Language;

    /// Whether block statements get a trailing `;` when they do not already
    /// end in `;` or `}`.
    fn semicolon_terminated(&self) -> bool {
        true
    }

    /// Whether bare PascalCase/underscore identifiers are treated as
    /// instance members. Only the PowerShell dialects consult this.
    fn instance_prefix(&self) -> bool {
        false
    }

    /// True while emitting the sections of a `switch`.
    fn in_switch(&self) -> bool {
        false
    }

    fn set_in_switch(&mut self, _active: bool) {}

    /// Infix operator spelling, surrounding spaces included.
    fn binary_operator(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::NotEqual => " != ",
            BinaryOp::Equal => " == ",
            BinaryOp::Not => " ! ",
            BinaryOp::GreaterThan => " > ",
            BinaryOp::GreaterThanEqualTo => " >= ",
            BinaryOp::LessThan => " < ",
            BinaryOp::LessThanEqualTo => " <= ",
            BinaryOp::Or => " || ",
            BinaryOp::And => " && ",
            BinaryOp::Bor => " | ",
            BinaryOp::Minus => " - ",
            BinaryOp::Plus => " + ",
            BinaryOp::Unknown => " ? ",
        }
    }

    /// Emit `root` and return the formatted text.
    fn write(&mut self, root: &Node) -> String {
        self.out().reset();
        self.visit(root);
        self.out().take()
    }

    /// Exhaustive dispatch. No variant falls through silently.
    fn visit(&mut self, node: &Node) {
        match node {
            Node::Namespace {
                name,
                usings,
                members,
            } => self.visit_namespace(name, usings, members),
            Node::UsingDirective { name } => self.visit_using_directive(name),
            Node::ClassDeclaration(decl) => self.visit_class(decl),
            Node::InterfaceDeclaration(decl) => self.visit_interface(decl),
            Node::MethodDeclaration(method) => self.visit_method(method),
            Node::Constructor {
                identifier,
                arguments,
                body,
            } => self.visit_constructor(identifier, arguments, body.as_deref()),
            Node::PropertyDeclaration {
                name,
                ty,
                modifiers,
            } => self.visit_property(name, ty, modifiers),
            Node::FieldDeclaration {
                name,
                ty,
                modifiers,
            } => self.visit_field(name, ty, modifiers),
            Node::Parameter {
                name,
                ty,
                modifiers,
            } => self.visit_parameter(name, ty, modifiers),
            Node::Attribute { name, arguments } => self.visit_attribute(name, arguments),
            Node::AttributeArgument { expression } => self.visit_attribute_argument(expression),
            Node::Block { statements } => self.visit_block(statements),
            Node::If {
                condition,
                body,
                else_clause,
            } => self.visit_if(condition, body, else_clause.as_deref()),
            Node::ElseClause { body } => self.visit_else_clause(body),
            Node::For {
                declaration,
                initializers,
                condition,
                incrementors,
                statement,
            } => self.visit_for(
                declaration.as_deref(),
                initializers,
                condition.as_deref(),
                incrementors,
                statement,
            ),
            Node::ForEach {
                identifier,
                expression,
                statement,
            } => self.visit_foreach(identifier, expression, statement),
            Node::While {
                condition,
                statement,
            } => self.visit_while(condition, statement),
            Node::Switch {
                expression,
                sections,
            } => self.visit_switch(expression, sections),
            Node::SwitchSection { labels, statements } => {
                self.visit_switch_section(labels, statements)
            }
            Node::Try {
                block,
                catches,
                finally_clause,
            } => self.visit_try(block, catches, finally_clause.as_deref()),
            Node::Catch { declaration, block } => self.visit_catch(declaration.as_deref(), block),
            Node::CatchDeclaration { ty } => self.visit_catch_declaration(ty),
            Node::Finally { body } => self.visit_finally(body),
            Node::Using { declaration, body } => self.visit_using(declaration, body),
            Node::Throw { operand } => self.visit_throw(operand.as_deref()),
            Node::Break => self.visit_break(),
            Node::Continue => self.visit_continue(),
            Node::Return { operand } => self.visit_return(operand.as_deref()),
            Node::Assignment { left, right } => self.visit_assignment(left, right),
            Node::BinaryExpression { left, op, right } => self.visit_binary(left, *op, right),
            Node::Invocation {
                expression,
                arguments,
            } => self.visit_invocation(expression, arguments),
            Node::ObjectCreation { ty, arguments } => self.visit_object_creation(ty, arguments),
            Node::ArrayCreation { initializer } => self.visit_array_creation(initializer),
            Node::MemberAccess {
                expression,
                identifier,
            } => self.visit_member_access(expression, identifier),
            Node::IdentifierName { name } => self.visit_identifier(name),
            Node::TypeExpression { type_name } => self.visit_type_expression(type_name),
            Node::Cast { ty, expression } => self.visit_cast(ty, expression),
            Node::Literal { token } => self.visit_literal(token),
            Node::StringConstant { value } => self.visit_string(value),
            Node::TemplateStringConstant { value } => self.visit_template_string(value),
            Node::VariableDeclaration { ty, variables } => {
                self.visit_variable_declaration(ty, variables)
            }
            Node::VariableDeclarator { name, initializer } => {
                self.visit_variable_declarator(name, initializer.as_deref())
            }
            Node::ThisExpression => self.visit_this(),
            Node::ParenthesizedExpression { operand } => self.visit_parenthesized(operand),
            Node::PostfixUnaryExpression { operand } => self.visit_postfix_unary(operand),
            Node::PrefixUnaryExpression { operand } => self.visit_prefix_unary(operand),
            Node::Argument { expression } => self.visit_argument(expression),
            Node::ArgumentList { arguments } => self.visit_argument_list(arguments),
            Node::BracketedArgumentList { arguments } => {
                self.visit_bracketed_argument_list(arguments)
            }
            Node::RawCode { code } => self.visit_raw(code),
            Node::Unknown { message } => self.visit_unknown(message),
        }
    }

    // Shared machinery ------------------------------------------------------

    /// Append `;` after a statement per the termination policy.
    fn terminate(&mut self) {
        if !self.semicolon_terminated() {
            return;
        }
        match self.out().last_char() {
            Some(';') | Some('}') | None => {}
            _ => self.out().append(";"),
        }
    }

    /// Visit `nodes` with `sep` between them.
    fn separated(&mut self, nodes: &[Node], sep: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out().append(sep);
            }
            self.visit(node);
        }
    }

    /// Emit a statement wrapped in braces on their own lines. A non-block
    /// statement is treated as a one-element block.
    fn braced_body(&mut self, stmt: &Node) {
        self.out().newline();
        self.out().append("{");
        self.out().indent();
        let empty = matches!(stmt, Node::Block { statements } if statements.is_empty());
        if !empty {
            self.out().newline();
            match stmt {
                Node::Block { .. } => self.visit(stmt),
                other => {
                    self.visit(other);
                    self.terminate();
                }
            }
        }
        self.out().newline();
        self.out().outdent();
        self.out().append("}");
    }

    // Containers ------------------------------------------------------------

    fn visit_namespace(&mut self, name: &str, usings: &[Node], members: &[Node]) {
        for using in usings {
            self.visit(using);
            self.terminate();
            self.out().newline();
        }
        if name.is_empty() {
            self.separated_by_newline(members);
        } else {
            self.out().append("namespace ");
            self.out().append(name);
            self.member_body(members);
        }
    }

    fn separated_by_newline(&mut self, nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out().newline();
            }
            self.visit(node);
        }
    }

    /// Braced member list for type and namespace bodies.
    fn member_body(&mut self, members: &[Node]) {
        self.out().newline();
        self.out().append("{");
        self.out().indent();
        for member in members {
            self.out().newline();
            self.visit(member);
        }
        self.out().newline();
        self.out().outdent();
        self.out().append("}");
    }

    fn visit_using_directive(&mut self, name: &str) {
        self.out().append("using ");
        self.out().append(name);
    }

    fn visit_class(&mut self, decl: &TypeDeclaration) {
        self.type_declaration(decl, "class");
    }

    fn visit_interface(&mut self, decl: &TypeDeclaration) {
        self.type_declaration(decl, "interface");
    }

    fn type_declaration(&mut self, decl: &TypeDeclaration, keyword: &str) {
        for attribute in &decl.attributes {
            self.visit(attribute);
            self.out().newline();
        }
        if !decl.modifiers.is_empty() {
            self.out().append(&decl.modifiers.join(" "));
            self.out().append(" ");
        }
        self.out().append(keyword);
        self.out().append(" ");
        self.out().append(&decl.name);
        if !decl.bases.is_empty() {
            self.out().append(" : ");
            self.out().append(&decl.bases.join(", "));
        }
        self.member_body(&decl.members);
    }

    fn visit_method(&mut self, method: &Method) {
        for attribute in &method.attributes {
            self.visit(attribute);
            self.out().newline();
        }
        if !method.modifiers.is_empty() {
            self.out().append(&method.modifiers.join(" "));
            self.out().append(" ");
        }
        self.out().append(&method.return_type);
        self.out().append(" ");
        self.out().append(&method.name);
        self.out().append("(");
        self.separated(&method.parameters, ", ");
        self.out().append(")");
        match &method.body {
            Some(body) => self.braced_body(body),
            None => self.out().append(";"),
        }
    }

    fn visit_constructor(&mut self, identifier: &str, arguments: &Node, body: Option<&Node>) {
        self.out().append(identifier);
        self.out().append("(");
        self.visit(arguments);
        self.out().append(")");
        match body {
            Some(body) => self.braced_body(body),
            None => self.out().append(";"),
        }
    }

    fn visit_property(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        if !modifiers.is_empty() {
            self.out().append(&modifiers.join(" "));
            self.out().append(" ");
        }
        self.out().append(ty);
        self.out().append(" ");
        self.out().append(name);
    }

    fn visit_field(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        self.visit_property(name, ty, modifiers);
    }

    fn visit_parameter(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        if !modifiers.is_empty() {
            self.out().append(&modifiers.join(" "));
            self.out().append(" ");
        }
        if !ty.is_empty() {
            self.out().append(ty);
            self.out().append(" ");
        }
        self.out().append(name.strip_prefix('@').unwrap_or(name));
    }

    fn visit_attribute(&mut self, name: &str, arguments: &[Node]) {
        self.out().append("[");
        self.out().append(name);
        if !arguments.is_empty() {
            self.out().append("(");
            self.separated(arguments, ", ");
            self.out().append(")");
        }
        self.out().append("]");
    }

    fn visit_attribute_argument(&mut self, expression: &Node) {
        self.visit(expression);
    }

    // Statements -------------------------------------------------------------

    fn visit_block(&mut self, statements: &[Node]) {
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                self.out().newline();
            }
            self.visit(stmt);
            self.terminate();
        }
    }

    fn visit_if(&mut self, condition: &Node, body: &Node, else_clause: Option<&Node>) {
        self.out().append("if (");
        self.visit(condition);
        self.out().append(")");
        self.braced_body(body);
        if let Some(else_clause) = else_clause {
            self.out().newline();
            self.visit(else_clause);
        }
    }

    fn visit_else_clause(&mut self, body: &Node) {
        self.out().append("else");
        if body.is_if() {
            // Chained `else if`: no extra braces.
            self.out().append(" ");
            self.visit(body);
        } else {
            self.braced_body(body);
        }
    }

    fn visit_for(
        &mut self,
        declaration: Option<&Node>,
        initializers: &[Node],
        condition: Option<&Node>,
        incrementors: &[Node],
        statement: &Node,
    ) {
        self.out().append("for (");
        match declaration {
            Some(declaration) => self.visit(declaration),
            None => self.separated(initializers, ", "),
        }
        self.out().append("; ");
        if let Some(condition) = condition {
            self.visit(condition);
        }
        self.out().append("; ");
        self.separated(incrementors, ", ");
        self.out().append(")");
        self.braced_body(statement);
    }

    fn visit_foreach(&mut self, identifier: &Node, expression: &Node, statement: &Node) {
        self.out().append("foreach (");
        self.visit(identifier);
        self.out().append(" in ");
        self.visit(expression);
        self.out().append(")");
        self.braced_body(statement);
    }

    fn visit_while(&mut self, condition: &Node, statement: &Node) {
        self.out().append("while (");
        self.visit(condition);
        self.out().append(")");
        self.braced_body(statement);
    }

    fn visit_switch(&mut self, expression: &Node, sections: &[Node]) {
        self.out().append("switch (");
        self.visit(expression);
        self.out().append(")");
        self.out().newline();
        self.out().append("{");
        self.out().indent();
        let was_in_switch = self.in_switch();
        self.set_in_switch(true);
        for section in sections {
            self.out().newline();
            self.visit(section);
        }
        self.set_in_switch(was_in_switch);
        self.out().newline();
        self.out().outdent();
        self.out().append("}");
    }

    fn visit_switch_section(&mut self, labels: &[Node], statements: &[Node]) {
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                self.out().newline();
            }
            match label {
                Node::IdentifierName { name } if name == "default" => {
                    self.out().append("default:");
                }
                other => {
                    self.out().append("case ");
                    self.visit(other);
                    self.out().append(":");
                }
            }
        }
        self.out().indent();
        for stmt in statements {
            self.out().newline();
            self.visit(stmt);
            self.terminate();
        }
        self.out().outdent();
    }

    fn visit_try(&mut self, block: &Node, catches: &[Node], finally_clause: Option<&Node>) {
        self.out().append("try");
        self.braced_body(block);
        for catch in catches {
            self.out().newline();
            self.visit(catch);
        }
        if let Some(finally_clause) = finally_clause {
            self.out().newline();
            self.visit(finally_clause);
        }
    }

    fn visit_catch(&mut self, declaration: Option<&Node>, block: &Node) {
        self.out().append("catch");
        if let Some(declaration) = declaration {
            self.out().append(" ");
            self.visit(declaration);
        }
        self.braced_body(block);
    }

    fn visit_catch_declaration(&mut self, ty: &str) {
        self.out().append("(");
        self.out().append(ty);
        self.out().append(")");
    }

    fn visit_finally(&mut self, body: &Node) {
        self.out().append("finally");
        self.braced_body(body);
    }

    fn visit_using(&mut self, declaration: &Node, body: &Node) {
        self.out().append("using (");
        self.visit(declaration);
        self.out().append(")");
        self.braced_body(body);
    }

    fn visit_throw(&mut self, operand: Option<&Node>) {
        self.out().append("throw");
        if let Some(operand) = operand {
            self.out().append(" ");
            self.visit(operand);
        }
    }

    fn visit_break(&mut self) {
        self.out().append("break");
    }

    fn visit_continue(&mut self) {
        self.out().append("continue");
    }

    fn visit_return(&mut self, operand: Option<&Node>) {
        self.out().append("return");
        if let Some(operand) = operand {
            self.out().append(" ");
            self.visit(operand);
        }
    }

    fn visit_variable_declaration(&mut self, ty: &str, variables: &[Node]) {
        if !ty.is_empty() {
            self.out().append(ty);
            self.out().append(" ");
        }
        self.separated(variables, ", ");
    }

    fn visit_variable_declarator(&mut self, name: &str, initializer: Option<&Node>) {
        self.out().append(name.strip_prefix('@').unwrap_or(name));
        if let Some(initializer) = initializer {
            self.out().append(" = ");
            self.visit(initializer);
        }
    }

    // Expressions ------------------------------------------------------------

    fn visit_assignment(&mut self, left: &Node, right: &Node) {
        self.visit(left);
        self.out().append(" = ");
        self.visit(right);
    }

    fn visit_binary(&mut self, left: &Node, op: BinaryOp, right: &Node) {
        self.visit(left);
        let spelling = self.binary_operator(op);
        self.out().append(spelling);
        self.visit(right);
    }

    fn visit_invocation(&mut self, expression: &Node, arguments: &Node) {
        self.visit(expression);
        // Bracketed lists fence themselves.
        if matches!(arguments, Node::BracketedArgumentList { .. }) {
            self.visit(arguments);
        } else {
            self.out().append("(");
            self.visit(arguments);
            self.out().append(")");
        }
    }

    fn visit_object_creation(&mut self, ty: &str, arguments: &Node) {
        self.out().append("new ");
        self.out().append(ty);
        self.out().append("(");
        self.visit(arguments);
        self.out().append(")");
    }

    fn visit_array_creation(&mut self, initializer: &[Node]) {
        self.out().append("{ ");
        for element in initializer {
            self.visit(element);
            self.out().append(", ");
        }
        self.out().trim_suffix(", ");
        self.out().append(" }");
    }

    fn visit_member_access(&mut self, expression: &Node, identifier: &str) {
        self.visit(expression);
        self.out().append(".");
        self.out().append(identifier);
    }

    fn visit_identifier(&mut self, name: &str) {
        self.out().append(name.strip_prefix('@').unwrap_or(name));
    }

    fn visit_type_expression(&mut self, type_name: &str) {
        self.out().append(type_name);
    }

    fn visit_cast(&mut self, ty: &str, expression: &Node) {
        self.out().append("(");
        self.out().append(ty);
        self.out().append(")");
        self.visit(expression);
    }

    fn visit_literal(&mut self, token: &str) {
        self.out().append(token);
    }

    fn visit_string(&mut self, value: &str) {
        self.out().append("\"");
        self.out().append(value);
        self.out().append("\"");
    }

    fn visit_template_string(&mut self, value: &str) {
        self.out().append("$\"");
        self.out().append(value);
        self.out().append("\"");
    }

    fn visit_this(&mut self) {
        self.out().append("this");
    }

    fn visit_parenthesized(&mut self, operand: &Node) {
        self.out().append("(");
        self.visit(operand);
        self.out().append(")");
    }

    fn visit_postfix_unary(&mut self, operand: &Node) {
        self.visit(operand);
        self.out().append("++");
    }

    fn visit_prefix_unary(&mut self, operand: &Node) {
        self.out().append("++");
        self.visit(operand);
    }

    fn visit_argument(&mut self, expression: &Node) {
        self.visit(expression);
    }

    fn visit_argument_list(&mut self, arguments: &[Node]) {
        for argument in arguments {
            self.visit(argument);
            self.out().append(",");
        }
        self.out().trim_suffix(",");
    }

    fn visit_bracketed_argument_list(&mut self, arguments: &[Node]) {
        self.out().append("[");
        for argument in arguments {
            self.visit(argument);
            self.out().append(", ");
        }
        self.out().trim_suffix(", ");
        self.out().append("]");
    }

    fn visit_raw(&mut self, code: &str) {
        self.out().append(code);
    }

    fn visit_unknown(&mut self, message: &str) {
        self.out().append(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BinaryOp;

    /// Minimal C-shaped writer exercising the base defaults.
    struct CWriter {
        out: Emitter,
    }

    impl CWriter {
        fn new() -> Self {
            Self {
                out: Emitter::new(),
            }
        }
    }

    impl CStyleVisit for CWriter {
        fn out(&mut self) -> &mut Emitter {
            &mut self.out
        }

        fn language(&self) -> Language {
            Language::PowerShell
        }
    }

    #[test]
    fn outdent_lands_brace_at_prior_column() {
        let mut e = Emitter::new();
        e.append("{");
        e.indent();
        e.newline();
        e.append("x");
        e.newline();
        e.outdent();
        e.append("}");
        assert_eq!(e.take(), "{\n    x\n}");
        assert_eq!(e.depth(), 0);
    }

    #[test]
    fn if_else_chain() {
        let node = Node::If {
            condition: Box::new(Node::binary(
                Node::ident("a"),
                BinaryOp::Equal,
                Node::ident("b"),
            )),
            body: Box::new(Node::block(vec![Node::Break])),
            else_clause: Some(Box::new(Node::ElseClause {
                body: Box::new(Node::If {
                    condition: Box::new(Node::ident("c")),
                    body: Box::new(Node::block(vec![])),
                    else_clause: None,
                }),
            })),
        };
        let text = CWriter::new().write(&node);
        assert!(text.contains("if (a == b)"));
        assert!(text.contains("else if (c)"));
        assert!(text.contains("break;"));
    }

    #[test]
    fn switch_section_uses_case_labels() {
        let node = Node::Switch {
            expression: Box::new(Node::ident("x")),
            sections: vec![
                Node::SwitchSection {
                    labels: vec![Node::literal("1")],
                    statements: vec![Node::Break],
                },
                Node::SwitchSection {
                    labels: vec![Node::ident("default")],
                    statements: vec![Node::Break],
                },
            ],
        };
        let text = CWriter::new().write(&node);
        assert!(text.contains("case 1:"));
        assert!(text.contains("default:"));
    }

    #[test]
    fn argument_list_elides_trailing_comma() {
        let node = Node::argument_list(vec![
            Node::argument(Node::literal("1")),
            Node::argument(Node::literal("2")),
        ]);
        let text = CWriter::new().write(&node);
        assert_eq!(text, "1,2");
    }

    #[test]
    fn catch_declaration_is_parenthesized() {
        let node = Node::Try {
            block: Box::new(Node::block(vec![])),
            catches: vec![Node::Catch {
                declaration: Some(Box::new(Node::CatchDeclaration {
                    ty: "Exception".into(),
                })),
                block: Box::new(Node::block(vec![])),
            }],
            finally_clause: None,
        };
        let text = CWriter::new().write(&node);
        assert!(text.contains("catch (Exception)"));
    }

    #[test]
    fn empty_class_body_is_bare_braces() {
        let node = Node::ClassDeclaration(Box::new(TypeDeclaration {
            name: "Empty".into(),
            modifiers: vec![],
            attributes: vec![],
            bases: vec![],
            members: vec![],
        }));
        let text = CWriter::new().write(&node);
        assert_eq!(text, "class Empty\n{\n}");
    }
}
