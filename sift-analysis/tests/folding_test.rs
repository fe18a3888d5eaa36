//! Constant folding integration tests: string concatenation, identifier
//! indirection with its depth bound, partial resolution, and integer
//! arithmetic.

use sift_analysis::binder::bind;
use sift_analysis::folding::{
    evaluate_arithmetic_expression, is_constant_string, resolve_as_partial_string_constant,
    resolve_as_string_constant,
};
use sift_core::{BinaryOp, NodeId, SourceFile, TreeBuilder, UnaryOp};

// ─── Helpers ───────────────────────────────────────────────────────────────

/// `func f() { <statements> }`.
fn file_with_body(mut b: TreeBuilder, statements: Vec<NodeId>) -> SourceFile {
    let body = b.block(statements);
    let f = b.function(Some("f"), None, vec![], &[], Some(body));
    b.build(vec![], vec![f])
}

/// `x0 := "c"; x1 := x0; …; x<hops> := x<hops-1>; return x<hops>`,
/// returning the file and the final reference node.
fn alias_chain(hops: usize) -> (SourceFile, NodeId) {
    let mut b = TreeBuilder::new();
    let mut statements = Vec::new();
    let name = b.ident("x0");
    let lit = b.string_literal("c");
    statements.push(b.var_decl(vec![name], None, vec![lit]));
    for i in 1..=hops {
        let name = b.ident(&format!("x{i}"));
        let prev = b.ident(&format!("x{}", i - 1));
        statements.push(b.var_decl(vec![name], None, vec![prev]));
    }
    let last = b.ident(&format!("x{hops}"));
    let ret = b.ret(vec![last]);
    statements.push(ret);
    (file_with_body(b, statements), last)
}

// ═══════════════════════════════════════════════════════════════════════════
// STRING RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn concatenation_of_literals_resolves() {
    let mut b = TreeBuilder::new();
    let hello = b.string_literal("Hello");
    let space = b.string_literal(" ");
    let world = b.string_literal("World");
    let left = b.binary(BinaryOp::Plus, hello, space);
    let expr = b.binary(BinaryOp::Plus, left, world);
    let file = file_with_body(b, vec![expr]);
    let table = bind(&file);

    assert_eq!(
        resolve_as_string_constant(&file, &table, Some(expr)),
        Some("Hello World".to_string())
    );
    assert!(is_constant_string(&file, &table, expr));
}

#[test]
fn only_plus_concatenates() {
    let mut b = TreeBuilder::new();
    let hello = b.string_literal("Hello");
    let world = b.string_literal("World");
    let expr = b.binary(BinaryOp::Minus, hello, world);
    let file = file_with_body(b, vec![expr]);
    let table = bind(&file);

    assert_eq!(resolve_as_string_constant(&file, &table, Some(expr)), None);
}

#[test]
fn identifier_indirection_resolves_through_safe_value() {
    let mut b = TreeBuilder::new();
    let name = b.ident("greeting");
    let lit = b.string_literal("hi");
    let decl = b.var_decl(vec![name], None, vec![lit]);
    let reference = b.ident("greeting");
    let bang = b.string_literal("!");
    let expr = b.binary(BinaryOp::Plus, reference, bang);
    let file = file_with_body(b, vec![decl, expr]);
    let table = bind(&file);

    assert_eq!(
        resolve_as_string_constant(&file, &table, Some(expr)),
        Some("hi!".to_string())
    );
}

#[test]
fn reassigned_identifier_does_not_resolve() {
    let mut b = TreeBuilder::new();
    let name = b.ident("x");
    let first = b.string_literal("a");
    let decl = b.var_decl(vec![name], None, vec![first]);
    let target = b.ident("x");
    let second = b.string_literal("b");
    let assign = b.assignment(vec![target], vec![second]);
    let reference = b.ident("x");
    let ret = b.ret(vec![reference]);
    let file = file_with_body(b, vec![decl, assign, ret]);
    let table = bind(&file);

    assert_eq!(resolve_as_string_constant(&file, &table, Some(reference)), None);
}

#[test]
fn short_alias_chain_resolves_and_long_chain_degrades() {
    let (file, last) = alias_chain(15);
    let table = bind(&file);
    assert_eq!(
        resolve_as_string_constant(&file, &table, Some(last)),
        Some("c".to_string())
    );

    let (file, last) = alias_chain(25);
    let table = bind(&file);
    assert_eq!(resolve_as_string_constant(&file, &table, Some(last)), None);
}

#[test]
fn self_referential_chain_degrades_instead_of_recursing_forever() {
    // a := ""; a = a + "t"
    let mut b = TreeBuilder::new();
    let name = b.ident("a");
    let decl = b.var_decl(vec![name], None, vec![]);
    let target = b.ident("a");
    let reference = b.ident("a");
    let t = b.string_literal("t");
    let grown = b.binary(BinaryOp::Plus, reference, t);
    let assign = b.assignment(vec![target], vec![grown]);
    let last = b.ident("a");
    let ret = b.ret(vec![last]);
    let file = file_with_body(b, vec![decl, assign, ret]);
    let table = bind(&file);

    assert_eq!(resolve_as_string_constant(&file, &table, Some(last)), None);
}

#[test]
fn partial_resolution_marks_unknown_parts() {
    let mut b = TreeBuilder::new();
    let prefix = b.string_literal("SELECT * FROM ");
    let table_name = b.ident("table");
    let expr = b.binary(BinaryOp::Plus, prefix, table_name);
    let file = file_with_body(b, vec![expr]);
    let table = bind(&file);

    assert_eq!(
        resolve_as_partial_string_constant(&file, &table, Some(expr)),
        "SELECT * FROM _?_"
    );
    assert_eq!(resolve_as_string_constant(&file, &table, Some(expr)), None);
    assert_eq!(resolve_as_partial_string_constant(&file, &table, None), "_?_");
}

// ═══════════════════════════════════════════════════════════════════════════
// ARITHMETIC
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn arithmetic_follows_tree_nesting() {
    // 2 + 3 * 2 encoded with the multiplication nested.
    let mut b = TreeBuilder::new();
    let two = b.int_literal("2");
    let three = b.int_literal("3");
    let two2 = b.int_literal("2");
    let product = b.binary(BinaryOp::Times, three, two2);
    let sum = b.binary(BinaryOp::Plus, two, product);

    // (2 + 3) * 2
    let t2 = b.int_literal("2");
    let t3 = b.int_literal("3");
    let inner = b.binary(BinaryOp::Plus, t2, t3);
    let grouped = b.paren(inner);
    let t2b = b.int_literal("2");
    let product2 = b.binary(BinaryOp::Times, grouped, t2b);

    let file = file_with_body(b, vec![sum, product2]);
    let table = bind(&file);

    assert_eq!(evaluate_arithmetic_expression(&file, &table, sum), Some(8));
    assert_eq!(evaluate_arithmetic_expression(&file, &table, product2), Some(10));
}

#[test]
fn division_truncates_toward_zero_and_rejects_zero_divisor() {
    let mut b = TreeBuilder::new();
    let two = b.int_literal("2");
    let five = b.int_literal("5");
    let quotient = b.binary(BinaryOp::Divide, two, five);

    let seven = b.int_literal("7");
    let minus_two = {
        let t = b.int_literal("2");
        b.unary(UnaryOp::Minus, t)
    };
    let negative = b.binary(BinaryOp::Divide, seven, minus_two);

    let one = b.int_literal("1");
    let zero = b.int_literal("0");
    let by_zero = b.binary(BinaryOp::Divide, one, zero);

    let file = file_with_body(b, vec![quotient, negative, by_zero]);
    let table = bind(&file);

    assert_eq!(evaluate_arithmetic_expression(&file, &table, quotient), Some(0));
    assert_eq!(evaluate_arithmetic_expression(&file, &table, negative), Some(-3));
    assert_eq!(evaluate_arithmetic_expression(&file, &table, by_zero), None);
}

#[test]
fn radix_prefixes_and_aliases_evaluate() {
    let mut b = TreeBuilder::new();
    let name = b.ident("n");
    let hex = b.int_literal("0x10");
    let decl = b.var_decl(vec![name], None, vec![hex]);
    let reference = b.ident("n");
    let octal = b.int_literal("010");
    let sum = b.binary(BinaryOp::Plus, reference, octal);
    let file = file_with_body(b, vec![decl, sum]);
    let table = bind(&file);

    assert_eq!(evaluate_arithmetic_expression(&file, &table, sum), Some(24));
}

#[test]
fn non_numeric_operand_poisons_the_expression() {
    let mut b = TreeBuilder::new();
    let yes = b.bool_literal(true);
    let no = b.bool_literal(false);
    let anded = b.binary(BinaryOp::BitwiseAnd, yes, no);

    let one = b.int_literal("1");
    let text = b.string_literal("2");
    let mixed = b.binary(BinaryOp::Plus, one, text);

    let file = file_with_body(b, vec![anded, mixed]);
    let table = bind(&file);

    assert_eq!(evaluate_arithmetic_expression(&file, &table, anded), None);
    assert_eq!(evaluate_arithmetic_expression(&file, &table, mixed), None);
}

#[test]
fn overflow_degrades_to_none() {
    let mut b = TreeBuilder::new();
    let max = b.int_literal("9223372036854775807");
    let one = b.int_literal("1");
    let sum = b.binary(BinaryOp::Plus, max, one);
    let file = file_with_body(b, vec![sum]);
    let table = bind(&file);

    assert_eq!(evaluate_arithmetic_expression(&file, &table, sum), None);
}
