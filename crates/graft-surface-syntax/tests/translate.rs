//! End-to-end translation scenarios.
//!
//! Each test drives the whole pipeline: parse C#, lower to IR, emit
//! PowerShell in one of the two dialects.

use graft_surface_syntax::{Dialect, translate};

fn function(source: &str) -> String {
    translate(source, Dialect::Function).expect("translation failed")
}

fn class(source: &str) -> String {
    translate(source, Dialect::Type).expect("translation failed")
}

#[test]
fn operator_rewrite() {
    let out = function("if (A == B) { C = 1; }");
    assert!(out.contains("if ($this.A -eq $this.B)"), "{out}");
    assert!(out.contains("$this.C = 1"), "{out}");
}

#[test]
fn lowercase_identifiers_stay_local() {
    let out = function("if (a == b) { c = 1; }");
    assert!(out.contains("if ($a -eq $b)"), "{out}");
    assert!(out.contains("$c = 1"), "{out}");
}

#[test]
fn cast_with_generic_type() {
    let out = function("var y = (List<int>)x;");
    assert!(out.contains("[List[int]]$x"), "{out}");
}

#[test]
fn object_creation_function_dialect() {
    let out = function("var f = new Foo(1, 2);");
    assert!(
        out.contains("(New-Object -TypeName Foo -ArgumentList 1,2)"),
        "{out}"
    );

    let out = function("var f = new Foo();");
    assert!(out.contains("(New-Object -TypeName Foo)"), "{out}");
    assert!(!out.contains("-ArgumentList"), "{out}");
}

#[test]
fn object_creation_type_dialect() {
    let out = class("var f = new Foo(1, 2);");
    assert!(out.contains("[Foo]::new(1, 2)"), "{out}");
}

#[test]
fn using_resource_scope() {
    let out = function("using (var s = new S()) { s.Go(); }");
    assert!(out.contains("$s = $null"), "{out}");
    assert!(out.contains("try"), "{out}");
    assert!(out.contains("$s = (New-Object -TypeName S)"), "{out}");
    assert!(out.contains("$s.Go()"), "{out}");
    assert!(out.contains("finally"), "{out}");
    assert!(out.contains("$s.Dispose()"), "{out}");
}

#[test]
fn class_with_attribute_type_dialect() {
    let source = r#"
[Cmdlet(VerbsCommunications.Send, "Greeting", SupportPaging = true)]
public abstract class Node
{
    abstract void Send();
}
"#;
    let out = class(source);
    assert!(out.contains("\n[Cmdlet(") || out.starts_with("[Cmdlet("), "{out}");
    assert!(out.contains("class Node"), "{out}");
    assert!(out.contains("hidden Send()"), "{out}");
    assert!(
        out.contains("throw [NotImplementedException]\"Send is not implemented\""),
        "{out}"
    );
}

#[test]
fn switch_with_only_default() {
    let out = function("switch (x) { default: Go(); break; }");
    assert!(out.contains("switch ($x)"), "{out}");
    assert!(out.contains("default {"), "{out}");
    // `break` inside a PowerShell switch section is suppressed.
    assert!(!out.contains("break"), "{out}");
}

#[test]
fn method_without_parameters() {
    let source = "class C { public void Go() { } }";

    let out = function(source);
    assert!(out.contains("function Go"), "{out}");
    assert!(!out.contains("param("), "{out}");

    let out = class(source);
    assert!(out.contains("Go()"), "{out}");
}

#[test]
fn platform_invoke_round_trip() {
    let source = r#"
class Native
{
    [DllImport("user32.dll")]
    public static extern int MessageBox(IntPtr hWnd, string text, string caption, int options);
}
"#;
    let out = function(source);
    assert!(out.contains("function MessageBox"), "{out}");
    assert!(out.contains("Add-Type -TypeDefinition '"), "{out}");
    assert!(out.contains("public static class PInvoke"), "{out}");
    assert!(out.contains("[DllImport(\"user32.dll\")]"), "{out}");
    assert!(
        out.contains("[PInvoke]::MessageBox($hWnd, $text, $caption, $options)"),
        "{out}"
    );
}

#[test]
fn else_if_chain() {
    let out = function("if (a == 1) { } else if (a == 2) { } else { }");
    assert!(out.contains("else if ($a -eq 2)"), "{out}");
    assert!(out.contains("else\n"), "{out}");
}

#[test]
fn for_loop_uses_word_operators() {
    let out = function("for (int i = 0; i < 10; i++) { Go(); }");
    assert!(out.contains("for ([int]$i = 0; $i -lt 10; $i++)"), "{out}");
}

#[test]
fn foreach_loop() {
    let out = function("foreach (var item in items) { Use(item); }");
    assert!(out.contains("foreach ($item in $items)"), "{out}");
}

#[test]
fn try_catch_finally() {
    let out = function("try { Go(); } catch (InvalidOperationException e) { } finally { Done(); }");
    assert!(out.contains("catch [InvalidOperationException]"), "{out}");
    assert!(out.contains("finally"), "{out}");
}

#[test]
fn static_member_access_on_predefined_type() {
    let out = function("var s = string.Format(fmt, value);");
    assert!(out.contains("[string]::Format($fmt,$value)"), "{out}");
}

#[test]
fn strings_keep_their_quoting() {
    let out = function("var a = \"plain\"; var b = $\"hi {x}\";");
    assert!(out.contains("$a = 'plain'"), "{out}");
    assert!(out.contains("$b = \"hi {x}\""), "{out}");
}

#[test]
fn unknown_constructs_render_verbatim() {
    let out = function("var f = x => x;");
    assert!(out.contains("x => x"), "{out}");
}

#[test]
fn namespace_and_usings_type_dialect() {
    let source = "using System;\nnamespace Demo.App { public class C { } }";
    let out = class(source);
    assert!(out.contains("# module Demo.App"), "{out}");
    assert!(out.contains("using namespace System"), "{out}");
    assert!(out.contains("class C"), "{out}");
}

#[test]
fn translation_is_deterministic() {
    let source = r#"
using System;

namespace Demo
{
    public class Greeter
    {
        private string _name;

        public Greeter(string name)
        {
            _name = name;
        }

        public void Greet()
        {
            if (_name != null)
            {
                Console.WriteLine(_name);
            }
        }
    }
}
"#;
    for dialect in [Dialect::Function, Dialect::Type] {
        let first = translate(source, dialect).unwrap();
        let second = translate(source, dialect).unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}

#[test]
fn parseable_input_always_writes() {
    // A grab bag of shapes; none may panic or error once parsing succeeds.
    let sources = [
        "class Empty { }",
        "interface IThing { void Go(); }",
        "var x = a ?? b;",
        "while (true) { break; }",
        "var xs = new int[] { 1, 2, 3 };",
        "var v = items[0];",
        "x += 1;",
        "throw new Exception(\"boom\");",
        "class C { public int Count { get; set; } }",
    ];
    for source in sources {
        for dialect in [Dialect::Function, Dialect::Type] {
            let out = translate(source, dialect).unwrap();
            assert!(!out.is_empty(), "empty output for {source:?}");
        }
    }
}

#[test]
fn powershell_output_avoids_c_operators() {
    let source = "if (a == b && c != d || e < f) { }";
    let out = function(source);
    assert!(!out.contains("=="), "{out}");
    assert!(!out.contains("!="), "{out}");
    assert!(!out.contains("&&"), "{out}");
    assert!(!out.contains("||"), "{out}");
}
