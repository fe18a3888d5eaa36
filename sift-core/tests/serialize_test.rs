//! Tree persistence: a `SourceFile` survives a JSON round trip with its
//! structure intact and its symbol slots reset.

use sift_core::{ImportDecl, Node, SourceFile, TreeBuilder};

fn sample_file() -> SourceFile {
    let mut b = TreeBuilder::new();
    let name = b.ident("x");
    let value = b.string_literal("v");
    let decl = b.var_decl(vec![name], None, vec![value]);
    let chain = b.member_chain(&["x", "len"]);
    let call = b.call(chain, vec![]);
    b.build(vec![ImportDecl::plain("strings")], vec![decl, call])
}

#[test]
fn json_round_trip_preserves_structure() {
    let original = sample_file();
    let json = serde_json::to_string(&original).expect("serializes");
    let restored: SourceFile = serde_json::from_str(&json).expect("deserializes");

    assert_eq!(restored.len(), original.len());
    assert_eq!(restored.root(), original.root());
    assert_eq!(restored.imports(), original.imports());
    for (id, _) in original.iter() {
        assert_eq!(restored.children(id), original.children(id));
    }
}

#[test]
fn symbol_slots_are_not_persisted() {
    let original = sample_file();
    // Simulate a bound tree: give an identifier a symbol id.
    let bound = original
        .iter()
        .find_map(|(id, n)| match n {
            Node::Identifier(ident) => {
                ident.symbol.set(Some(sift_core::SymbolId(7)));
                Some(id)
            }
            _ => None,
        })
        .expect("file has identifiers");

    let json = serde_json::to_string(&original).expect("serializes");
    let restored: SourceFile = serde_json::from_str(&json).expect("deserializes");

    assert!(restored.ident(bound).expect("identifier").symbol.get().is_none());
}

#[test]
fn import_default_name_is_the_last_segment() {
    assert_eq!(ImportDecl::plain("math/rand").default_name(), "rand");
    assert_eq!(ImportDecl::plain("fmt").default_name(), "fmt");
}
