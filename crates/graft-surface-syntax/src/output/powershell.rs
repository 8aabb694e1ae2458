//! PowerShell function-dialect writer.
//!
//! Emits standalone script functions and C-style control flow. Structure
//! that has no direct PowerShell spelling is rewritten here: object creation
//! becomes `New-Object`, resource `using` becomes `try`/`finally` with a
//! `Dispose` call, `switch` becomes PowerShell's own `switch`, and platform
//! invokes become an `Add-Type` block around the preserved C# declaration.
//!
//! The dialect-specific emissions live as free functions so the class
//! dialect writer can share them without duplicating logic.

use crate::ir::{BinaryOp, Language, Method, Node};
use crate::output::c_style::{CStyleVisit, Emitter};
use crate::traits::Writer;

/// Static instance of the function-dialect writer for the registry.
pub static POWERSHELL_WRITER: PowerShellWriterImpl = PowerShellWriterImpl;

/// Function-dialect writer implementing the `Writer` trait.
pub struct PowerShellWriterImpl;

impl Writer for PowerShellWriterImpl {
    fn language(&self) -> Language {
        Language::PowerShell
    }

    fn extension(&self) -> &'static str {
        "ps1"
    }

    fn write(&self, root: &Node) -> String {
        PowerShellWriter::emit(root)
    }
}

/// Emits IR as PowerShell script functions.
pub struct PowerShellWriter {
    out: Emitter,
    in_switch: bool,
    instance_prefix: bool,
}

impl PowerShellWriter {
    pub fn new() -> Self {
        Self {
            out: Emitter::new(),
            in_switch: false,
            instance_prefix: true,
        }
    }

    /// Disable the PascalCase/underscore `$this.` heuristic. The heuristic
    /// is best-effort and misfires on PascalCase locals; callers that know
    /// their input can turn it off.
    pub fn without_instance_prefix() -> Self {
        Self {
            instance_prefix: false,
            ..Self::new()
        }
    }

    /// Emit a tree to PowerShell source.
    pub fn emit(root: &Node) -> String {
        Self::new().write(root)
    }
}

impl Default for PowerShellWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CStyleVisit for PowerShellWriter {
    fn out(&mut self) -> &mut Emitter {
        &mut self.out
    }

    fn language(&self) -> Language {
        Language::PowerShell
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
        operator(op)
    }

    fn visit_identifier(&mut self, name: &str) {
        identifier(self, name);
    }

    fn visit_literal(&mut self, token: &str) {
        literal(self, token);
    }

    fn visit_cast(&mut self, ty: &str, expression: &Node) {
        cast(self, ty, expression);
    }

    fn visit_catch_declaration(&mut self, ty: &str) {
        catch_declaration(self, ty);
    }

    fn visit_member_access(&mut self, expression: &Node, ident: &str) {
        member_access(self, expression, ident);
    }

    fn visit_string(&mut self, value: &str) {
        string_constant(self, value);
    }

    fn visit_template_string(&mut self, value: &str) {
        template_string(self, value);
    }

    fn visit_array_creation(&mut self, initializer: &[Node]) {
        array_creation(self, initializer);
    }

    fn visit_object_creation(&mut self, ty: &str, arguments: &Node) {
        object_creation(self, ty, arguments);
    }

    fn visit_parameter(&mut self, name: &str, ty: &str, modifiers: &[String]) {
        parameter(self, name, ty, modifiers, false);
    }

    fn visit_variable_declaration(&mut self, ty: &str, variables: &[Node]) {
        variable_declaration(self, ty, variables);
    }

    fn visit_variable_declarator(&mut self, name: &str, initializer: Option<&Node>) {
        variable_declarator(self, name, initializer);
    }

    fn visit_switch(&mut self, expression: &Node, sections: &[Node]) {
        switch(self, expression, sections);
    }

    fn visit_switch_section(&mut self, labels: &[Node], statements: &[Node]) {
        switch_section(self, labels, statements);
    }

    fn visit_break(&mut self) {
        // PowerShell switch sections do not fall through; a translated
        // `break` inside one would break out of enclosing loops instead.
        if !self.in_switch() {
            self.out().append("break");
        }
    }

    fn visit_using(&mut self, declaration: &Node, body: &Node) {
        using_resource(self, declaration, body);
    }

    fn visit_if(&mut self, condition: &Node, body: &Node, else_clause: Option<&Node>) {
        if_statement(self, condition, body, else_clause);
    }

    fn visit_else_clause(&mut self, body: &Node) {
        else_clause(self, body);
    }

    fn visit_method(&mut self, method: &Method) {
        function_declaration(self, method);
    }
}

// Shared dialect emissions ---------------------------------------------------

/// PowerShell word operators.
pub(crate) fn operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::NotEqual => " -ne ",
        BinaryOp::Equal => " -eq ",
        BinaryOp::Not => " -not ",
        BinaryOp::GreaterThan => " -gt ",
        BinaryOp::GreaterThanEqualTo => " -ge ",
        BinaryOp::LessThan => " -lt ",
        BinaryOp::LessThanEqualTo => " -le ",
        BinaryOp::Or => " -or ",
        BinaryOp::And => " -and ",
        BinaryOp::Bor => " -bor ",
        BinaryOp::Minus => " - ",
        BinaryOp::Plus => " + ",
        BinaryOp::Unknown => " ? ",
    }
}

/// `List<int>` spells `List[int]` in PowerShell type syntax.
pub(crate) fn bracket_type(ty: &str) -> String {
    ty.replace('<', "[").replace('>', "]")
}

pub(crate) fn identifier<W: CStyleVisit + ?Sized>(w: &mut W, name: &str) {
    let name = name.strip_prefix('@').unwrap_or(name);
    w.out().append("$");
    let instance = w.instance_prefix()
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c == '_');
    if instance {
        // Best-effort: bare PascalCase identifiers in C# usually refer to
        // instance members. Misfires on PascalCase locals.
        w.out().append("this.");
    }
    w.out().append(name);
}

pub(crate) fn literal<W: CStyleVisit + ?Sized>(w: &mut W, token: &str) {
    match token {
        "true" | "false" | "null" => {
            w.out().append("$");
            w.out().append(token);
        }
        _ => w.out().append(token),
    }
}

pub(crate) fn cast<W: CStyleVisit + ?Sized>(w: &mut W, ty: &str, expression: &Node) {
    w.out().append("[");
    let ty = bracket_type(ty);
    w.out().append(&ty);
    w.out().append("]");
    w.visit(expression);
}

pub(crate) fn catch_declaration<W: CStyleVisit + ?Sized>(w: &mut W, ty: &str) {
    w.out().append("[");
    let ty = bracket_type(ty);
    w.out().append(&ty);
    w.out().append("]");
}

pub(crate) fn member_access<W: CStyleVisit + ?Sized>(w: &mut W, expression: &Node, ident: &str) {
    if let Node::TypeExpression { type_name } = expression {
        // Member access on a type is static access.
        w.out().append("[");
        let ty = bracket_type(type_name);
        w.out().append(&ty);
        w.out().append("]::");
        w.out().append(ident);
    } else {
        w.visit(expression);
        w.out().append(".");
        w.out().append(ident);
    }
}

pub(crate) fn string_constant<W: CStyleVisit + ?Sized>(w: &mut W, value: &str) {
    // Single quotes suppress interpolation.
    w.out().append("'");
    let value = value.replace('\'', "''");
    w.out().append(&value);
    w.out().append("'");
}

pub(crate) fn template_string<W: CStyleVisit + ?Sized>(w: &mut W, value: &str) {
    w.out().append("\"");
    w.out().append(value);
    w.out().append("\"");
}

pub(crate) fn array_creation<W: CStyleVisit + ?Sized>(w: &mut W, initializer: &[Node]) {
    w.out().append("@(");
    for element in initializer {
        w.visit(element);
        w.out().append(", ");
    }
    w.out().trim_suffix(", ");
    w.out().append(")");
}

pub(crate) fn object_creation<W: CStyleVisit + ?Sized>(w: &mut W, ty: &str, arguments: &Node) {
    w.out().append("(New-Object -TypeName ");
    w.out().append(ty);
    let has_arguments = matches!(arguments, Node::ArgumentList { arguments } if !arguments.is_empty());
    if has_arguments {
        w.out().append(" -ArgumentList ");
        w.visit(arguments);
    }
    w.out().append(")");
}

pub(crate) fn parameter<W: CStyleVisit + ?Sized>(
    w: &mut W,
    name: &str,
    ty: &str,
    modifiers: &[String],
    spaced: bool,
) {
    if !modifiers.is_empty() {
        w.out().append("[ref] ");
    }
    if !ty.is_empty() && ty != "var" {
        w.out().append("[");
        let ty = bracket_type(ty);
        w.out().append(&ty);
        w.out().append("]");
        if spaced {
            w.out().append(" ");
        }
    }
    w.out().append("$");
    w.out().append(name.strip_prefix('@').unwrap_or(name));
}

pub(crate) fn variable_declaration<W: CStyleVisit + ?Sized>(w: &mut W, ty: &str, variables: &[Node]) {
    if !ty.is_empty() && ty != "var" {
        w.out().append("[");
        let ty = bracket_type(ty);
        w.out().append(&ty);
        w.out().append("]");
    }
    w.separated(variables, ", ");
}

pub(crate) fn variable_declarator<W: CStyleVisit + ?Sized>(
    w: &mut W,
    name: &str,
    initializer: Option<&Node>,
) {
    w.out().append("$");
    w.out().append(name.strip_prefix('@').unwrap_or(name));
    if let Some(initializer) = initializer {
        w.out().append(" = ");
        w.visit(initializer);
    }
}

pub(crate) fn switch<W: CStyleVisit + ?Sized>(w: &mut W, expression: &Node, sections: &[Node]) {
    w.out().append("switch (");
    w.visit(expression);
    w.out().append(")");
    w.out().newline();
    w.out().append("{");
    w.out().indent();
    let was_in_switch = w.in_switch();
    w.set_in_switch(true);
    for section in sections {
        w.out().newline();
        w.visit(section);
    }
    w.set_in_switch(was_in_switch);
    w.out().newline();
    w.out().outdent();
    w.out().append("}");
}

pub(crate) fn switch_section<W: CStyleVisit + ?Sized>(w: &mut W, labels: &[Node], statements: &[Node]) {
    for label in labels {
        match label {
            Node::IdentifierName { name } if name == "default" => w.out().append("default"),
            other => w.visit(other),
        }
        w.out().append(" ");
    }
    w.out().append("{");
    w.out().indent();
    for stmt in statements {
        w.out().newline();
        w.visit(stmt);
    }
    w.out().newline();
    w.out().outdent();
    w.out().append("}");
}

/// Lower `using (R = expr) stmt` to `try`/`finally` around a `Dispose` call.
/// The variable is declared `$null` first so the `finally` block can always
/// refer to it.
pub(crate) fn using_resource<W: CStyleVisit + ?Sized>(w: &mut W, declaration: &Node, body: &Node) {
    let name = declaration.declared_name().map(str::to_owned);
    if let Some(name) = &name {
        w.out().append("$");
        w.out().append(name);
        w.out().append(" = $null");
        w.out().newline();
    }
    w.out().append("try");
    w.out().newline();
    w.out().append("{");
    w.out().indent();
    w.out().newline();
    w.visit(declaration);
    match body {
        Node::Block { statements } => {
            for stmt in statements {
                w.out().newline();
                w.visit(stmt);
            }
        }
        other => {
            w.out().newline();
            w.visit(other);
        }
    }
    w.out().newline();
    w.out().outdent();
    w.out().append("}");
    w.out().newline();
    w.out().append("finally");
    w.out().newline();
    w.out().append("{");
    w.out().indent();
    w.out().newline();
    match &name {
        Some(name) => {
            w.out().append("$");
            w.out().append(name);
        }
        None => w.visit(declaration),
    }
    w.out().append(".Dispose()");
    w.out().newline();
    w.out().outdent();
    w.out().append("}");
}

pub(crate) fn if_statement<W: CStyleVisit + ?Sized>(
    w: &mut W,
    condition: &Node,
    body: &Node,
    else_branch: Option<&Node>,
) {
    w.out().append("if (");
    w.visit(condition);
    w.out().append(")");
    w.braced_body(body);
    if let Some(else_branch) = else_branch {
        w.out().newline();
        w.visit(else_branch);
    }
    // Trailing newline after the closing brace; a chained `else if` has
    // already emitted its own.
    if !w.out().at_line_start() {
        w.out().newline();
    }
}

pub(crate) fn else_clause<W: CStyleVisit + ?Sized>(w: &mut W, body: &Node) {
    w.out().append("else");
    if body.is_if() {
        w.out().append(" ");
        w.visit(body);
    } else {
        w.braced_body(body);
    }
}

/// Function-dialect method emission: `function Name { param(...) ... }`,
/// with the platform-invoke rewrite when the declaration binds a native
/// library.
pub(crate) fn function_declaration<W: CStyleVisit + ?Sized>(w: &mut W, method: &Method) {
    w.out().append("function ");
    w.out().append(&method.name);
    w.out().newline();
    w.out().append("{");
    w.out().indent();
    if !method.parameters.is_empty() {
        w.out().newline();
        w.out().append("param(");
        w.separated(&method.parameters, ", ");
        w.out().append(")");
    }
    if method.is_platform_invoke() {
        w.out().newline();
        platform_invoke_body(w, method);
    } else if let Some(body) = &method.body {
        if !matches!(body, Node::Block { statements } if statements.is_empty()) {
            w.out().newline();
            w.visit(body);
        }
    }
    w.out().newline();
    w.out().outdent();
    w.out().append("}");
}

/// Emit an `Add-Type` block holding the verbatim C# declaration inside a
/// `public static class PInvoke`, followed by a forwarding call.
fn platform_invoke_body<W: CStyleVisit + ?Sized>(w: &mut W, method: &Method) {
    w.out().append("Add-Type -TypeDefinition '");
    w.out().newline();
    w.out().append("using System;");
    w.out().newline();
    w.out().append("using System.Runtime.InteropServices;");
    w.out().newline();
    w.out().append("public static class PInvoke");
    w.out().newline();
    w.out().append("{");
    w.out().indent();
    for line in method.original_source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        w.out().newline();
        w.out().append(line);
    }
    w.out().newline();
    w.out().outdent();
    w.out().append("}");
    w.out().newline();
    w.out().append("'");
    w.out().newline();
    w.out().append("[PInvoke]::");
    w.out().append(&method.name);
    w.out().append("(");
    for (i, parameter) in method.parameters.iter().enumerate() {
        if i > 0 {
            w.out().append(", ");
        }
        if let Node::Parameter { name, .. } = parameter {
            w.out().append("$");
            w.out().append(name.strip_prefix('@').unwrap_or(name));
        }
    }
    w.out().append(")");
}
