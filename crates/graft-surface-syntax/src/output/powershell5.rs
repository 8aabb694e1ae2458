//! PowerShell 5 class-dialect writer.
//!
//! Builds on the function dialect and replaces the declaration layer with
//! PowerShell 5.0 class syntax: `class`/`hidden`/`static` declarations,
//! typed properties, constructors, and `[Type]::new(...)` object creation.
//! Expression and statement rewriting is shared with the function writer.

use crate::ir::{BinaryOp, Language, Method, Node, TypeDeclaration};
use crate::output::c_style::{CStyleVisit, Emitter};
use crate::output::powershell as ps;
use crate::traits::Writer;

/// Static instance of the class-dialect writer for the registry.
pub static POWERSHELL5_WRITER: PowerShell5WriterImpl = PowerShell5WriterImpl;

/// Class-dialect writer implementing the `Writer` trait.
pub struct PowerShell5WriterImpl;

impl Writer for PowerShell5WriterImpl {
    fn language(&self) -> Language {
        Language::PowerShell5
    }

    fn extension(&self) -> &'static str {
        "ps1"
    }

    fn write(&self, root: &Node) -> String {
        PowerShell5Writer::emit(root)
    }
}

/// Emits IR as PowerShell 5 class declarations.
pub struct PowerShell5Writer {
    out: Emitter,
    in_switch: bool,
    instance_prefix: bool,
}

impl PowerShell5Writer {
    pub fn new() -> Self {
        Self {
            out: Emitter::new(),
            in_switch: false,
            instance_prefix: true,
        }
    }

    /// Emit a tree to PowerShell 5 source.
    pub fn emit(root: &Node) -> String {
        Self::new().write(root)
    }
}

impl Default for PowerShell5Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl CStyleVisit for PowerShell5Writer {
    fn out(&mut self) -> &mut Emitter {
        &mut self.out
    }

    fn language(&self) -> Language {
        Language::PowerShell5
    }

    fn semicolon_terminated(&self) -> bool {
        false
    }

    fn instance_prefix(&self) -> bool {
        self.instance_prefix
    }

    fn in_switch(&self) -> bool {
        self.in_switch
    }

    fn set_in_switch(&mut self, active: bool) {
        self.in_switch = active;
    }

    fn binary_operator(&self, op: BinaryOp) -> &'static str {
        ps::operator(op)
    }

    // Shared with the function dialect.

    fn visit_identifier(&mut self, name: &str) {
        ps::identifier(self, name);
    }

    fn visit_literal(&mut self, token: &str) {
        ps::literal(self, token);
    }

    fn visit_cast(&mut self, ty: &str, expression: &Node) {
        ps::cast(self, ty, expression);
    }

    fn visit_catch_declaration(&mut self, ty: &str) {
        ps::catch_declaration(self, ty);
    }

    fn visit_member_access(&mut self, expression: &Node, ident: &str) {
        ps::member_access(self, expression, ident);
    }

    fn visit_string(&mut self, value: &str) {
        ps::string_constant(self, value);
    }

    fn visit_template_string(&mut self, value: &str) {
        ps::template_string(self, value);
    }

    fn visit_array_creation(&mut self, initializer: &[Node]) {
        ps::array_creation(self, initializer);
    }

    fn visit_variable_declaration(&mut self, ty: &str, variables: &[Node]) {
        ps::variable_declaration(self, ty, variables);
    }

    fn visit_variable_declarator(&mut self, name: &str, initializer: Option<&Node>) {
        ps::variable_declarator(self, name, initializer);
    }

    fn visit_switch(&mut self, expression: &Node, sections: &[Node]) {
        ps::switch(self, expression, sections);
    }

    fn visit_switch_section(&mut self, labels: &[Node], statements: &[Node]) {
        ps::switch_section(self, labels, statements);
    }

    fn visit_break(&mut self) {
        if !self.in_switch() {
            self.out().append("break");
        }
    }

    fn visit_using(&mut self, declaration: &Node, body: &Node) {
        ps::using_resource(self, declaration, body);
    }

    fn visit_if(&mut self, condition: &Node, body: &Node, else_clause: Option<&Node>) {
        ps::if_statement(self, condition, body, else_clause);
    }

    fn visit_else_clause(&mut self, body: &Node) {
        ps::else_clause(self, body);
    }

    // Class-oriented declaration layer.

    fn visit_namespace(&mut self, name: &str, usings: &[Node], members: &[Node]) {
        if !name.is_empty() {
            self.out().append("# module ");
            self.out().append(name);
            self.out().newline();
        }
        for using in usings {
            self.visit(using);
            self.out().newline();
        }
        self.separated_by_newline(members);
    }

    fn visit_using_directive(&mut self, name: &str) {
        self.out().append("using namespace ");
        self.out().append(name);
    }

    fn visit_class(&mut self, decl: &TypeDeclaration) {
        class_declaration(self, decl, "Class");
    }

    fn visit_interface(&mut self, decl: &TypeDeclaration) {
        class_declaration(self, decl, "Interface");
    }

    fn visit_method(&mut self, method: &Method) {
        modifier_comment(self, "Method", &method.modifiers);
        member_prefix(self, &method.modifiers);
        if !method.return_type.is_empty() && method.return_type != "void" {
            self.out().append("[");
            let ty = ps::bracket_type(&method.return_type);
            self.out().append(&ty);
            self.out().append("] ");
        }
        self.out().append(&method.name);
        self.out().append("(");
        self.separated(&method.parameters, ", ");
        self.out().append(")");
        body_or_not_implemented(self, method.body.as_ref(), &method.name);
    }

    fn visit_constructor(&mut self, identifier: &str, arguments: &Node, body: Option<&Node>) {
        self.out().append("# Constructor");
        self.out().newline();
        self.out().append(identifier);
        self.out().append("(");
        if let Node::ArgumentList { arguments } = arguments {
            self.separated(arguments, ", ");
        } else {
            self.visit(arguments);
        }
        self.out().append(")");
        body_or_not_implemented(self, body, identifier);
    }

    fn visit_property(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        modifier_comment(self, "Property", modifiers);
        member_prefix(self, modifiers);
        typed_member_name(self, name, ty);
    }

    fn visit_field(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        modifier_comment(self, "Field", modifiers);
        member_prefix(self, modifiers);
        typed_member_name(self, name, ty);
    }

    fn visit_parameter(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        ps::parameter(self, name, ty, modifiers, true);
    }

    fn visit_object_creation(&mut self, ty: &str, arguments: &Node) {
        self.out().append("[");
        let ty = ps::bracket_type(ty);
        self.out().append(&ty);
        self.out().append("]::new(");
        if let Node::ArgumentList { arguments } = arguments {
            self.separated(arguments, ", ");
        } else {
            self.visit(arguments);
        }
        self.out().append(")");
    }

    fn visit_this(&mut self) {
        self.out().append("$this");
    }
}

/// `hidden` when not public, `static` when static.
fn member_prefix(w: &mut PowerShell5Writer, modifiers: &[String]) {
    if !modifiers.iter().any(|m| m == "public") {
        w.out().append("hidden ");
    }
    if modifiers.iter().any(|m| m == "static") {
        w.out().append("static ");
    }
}

/// Modifier sets that PowerShell expresses directly carry no comment.
fn trivially_public(modifiers: &[String]) -> bool {
    match modifiers.len() {
        1 => modifiers[0] == "public",
        2 => {
            modifiers.iter().any(|m| m == "public") && modifiers.iter().any(|m| m == "static")
        }
        _ => false,
    }
}

fn modifier_comment(w: &mut PowerShell5Writer, kind: &str, modifiers: &[String]) {
    if modifiers.is_empty() || trivially_public(modifiers) {
        return;
    }
    w.out().append("# ");
    w.out().append(kind);
    w.out().append(" Modifiers: ");
    w.out().append(&modifiers.join(" "));
    w.out().newline();
}

fn typed_member_name(w: &mut PowerShell5Writer, name: &str, ty: &str) {
    if !ty.is_empty() && ty != "var" {
        w.out().append("[");
        let ty = ps::bracket_type(ty);
        w.out().append(&ty);
        w.out().append("] ");
    }
    w.out().append("$");
    w.out().append(name.strip_prefix('@').unwrap_or(name));
}

fn class_declaration(w: &mut PowerShell5Writer, decl: &TypeDeclaration, kind: &str) {
    modifier_comment(w, kind, &decl.modifiers);
    for attribute in &decl.attributes {
        w.visit(attribute);
        w.out().newline();
    }
    w.out().append("class ");
    w.out().append(&decl.name);
    if !decl.bases.is_empty() {
        w.out().append(" : ");
        w.out().append(&decl.bases.join(", "));
    }
    w.member_body(&decl.members);
}

/// Emit the body, or a `throw [NotImplementedException]` statement for
/// declarations without one (abstract and extern members).
fn body_or_not_implemented(w: &mut PowerShell5Writer, body: Option<&Node>, name: &str) {
    match body {
        Some(body) => w.braced_body(body),
        None => {
            w.out().newline();
            w.out().append("{");
            w.out().indent();
            w.out().newline();
            w.out().append("throw [NotImplementedException]\"");
            w.out().append(name);
            w.out().append(" is not implemented\"");
            w.out().newline();
            w.out().outdent();
            w.out().append("}");
        }
    }
}
