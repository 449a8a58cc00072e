use hypermark_validator::diagnostics::ValidationError;
use hypermark_validator::schema::{Cardinality, Constraint, Schema, SchemaRegistry, TagRule};
use hypermark_validator::tree::{BlockElement, InlineElement, Node};
use hypermark_validator::validation::{validate, validate_inline};

fn article_schema() -> Schema {
    Schema::new("article")
        .with_tag(
            "doc",
            TagRule::block()
                .with_child("title", Cardinality::One)
                .with_child("section", Cardinality::ZeroOrMore)
                .with_child("abstract", Cardinality::Optional),
        )
        .with_tag("title", TagRule::block().with_head(["text", "em"]))
        .with_tag("abstract", TagRule::block().with_head(["text"]))
        .with_tag(
            "section",
            TagRule::block()
                .with_child("p", Cardinality::OneOrMore)
                .with_child("text", Cardinality::ZeroOrMore)
                .with_head(["text", "link"]),
        )
        .with_tag("p", TagRule::block().with_head(["text", "em", "link"]))
        .with_tag("text", TagRule::inline())
        .with_tag("url", TagRule::inline())
        .with_tag("em", TagRule::inline().with_arg(["text", "link"]))
        .with_tag(
            "link",
            TagRule::inline().with_arg(["text", "em"]).with_arg(["url"]),
        )
}

fn text() -> InlineElement {
    InlineElement::new("text")
}

fn link() -> InlineElement {
    InlineElement::new("link")
        .arg(vec![text()])
        .arg(vec![InlineElement::new("url")])
}

fn title() -> BlockElement {
    BlockElement::new("title").with_head(vec![text()])
}

fn section() -> BlockElement {
    BlockElement::new("section").child(BlockElement::new("p").with_head(vec![text(), link()]))
}

#[test]
fn test_valid_article_has_no_diagnostics() {
    let tree = BlockElement::new("doc")
        .child(title())
        .child(BlockElement::new("abstract").with_head(vec![text()]))
        .child(section())
        .child(section());

    let result = validate(&tree.into(), &article_schema());
    assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
}

#[test]
fn test_two_titles_one_section() {
    let tree = BlockElement::new("doc")
        .child(title())
        .child(title())
        .child(section());

    let result = validate(&tree.into(), &article_schema());

    assert_eq!(
        result.errors,
        [ValidationError::Cardinality {
            parent: "doc".into(),
            children: vec!["title".into(), "title".into(), "section".into()],
            tag: "title".into(),
            count: 2,
            cardinality: Constraint::One,
        }]
    );
}

#[test]
fn test_cardinality_symmetric_around_one() {
    let schema = article_schema();

    let none = validate(&BlockElement::new("doc").into(), &schema);
    let two = validate(
        &BlockElement::new("doc").child(title()).child(title()).into(),
        &schema,
    );

    for (result, expected_count) in [(none, 0), (two, 2)] {
        assert_eq!(result.codes(), [130]);
        match &result.errors[0] {
            ValidationError::Cardinality { tag, count, .. } => {
                assert_eq!(tag, "title");
                assert_eq!(*count, expected_count);
            }
            other => panic!("Expected cardinality error, got {other:?}"),
        }
    }
}

#[test]
fn test_optional_and_one_or_more() {
    let schema = article_schema();
    let abstract_block = || BlockElement::new("abstract").with_head(vec![text()]);

    let tree = BlockElement::new("doc")
        .child(title())
        .child(abstract_block())
        .child(abstract_block())
        .child(BlockElement::new("section"));

    let result = validate(&tree.into(), &schema);
    let violations: Vec<(&str, &str)> = result
        .errors
        .iter()
        .map(|e| (e.parent().unwrap_or_default(), e.tag()))
        .collect();

    // The empty section is reported while walking it, before doc's own counts
    assert_eq!(violations, [("section", "p"), ("doc", "abstract")]);
    assert_eq!(result.codes(), [130, 130]);
}

#[test]
fn test_zero_or_more_never_reported() {
    let schema = article_schema();
    let mut tree = BlockElement::new("doc").child(title());
    for _ in 0..25 {
        tree = tree.child(section());
    }

    assert!(validate(&tree.into(), &schema).is_valid());

    let empty = validate(&BlockElement::new("doc").into(), &schema);
    for error in &empty.errors {
        if let ValidationError::Cardinality { tag, .. } = error {
            assert_ne!(tag, "section");
        }
    }
}

#[test]
fn test_link_with_one_argument() {
    let tree = InlineElement::new("link").arg(vec![text()]);

    let result = validate_inline(&tree, &article_schema());

    assert_eq!(
        result.errors,
        [ValidationError::ArgumentCount {
            tag: "link".into(),
            expected: 2,
            actual: 1,
        }]
    );
}

#[test]
fn test_link_with_three_arguments() {
    let tree = InlineElement::new("link")
        .arg(vec![text()])
        .arg(vec![InlineElement::new("url")])
        .arg(vec![text()]);

    let result = validate_inline(&tree, &article_schema());

    assert_eq!(result.codes(), [140, 121]);
    assert!(matches!(
        result.errors[0],
        ValidationError::ArgumentCount { expected: 2, actual: 3, .. }
    ));
    assert_eq!(
        result.errors[1].to_string(),
        "Tag '#text' is not allowed in the 3rd argument of '#link'"
    );
}

#[test]
fn test_argument_count_does_not_block_recursion() {
    let tree = InlineElement::new("link").arg(vec![InlineElement::new("url")]);

    let result = validate_inline(&tree, &article_schema());

    assert_eq!(result.codes(), [140, 121]);
    assert_eq!(
        result.errors[1],
        ValidationError::DisallowedInArg {
            parent: "link".into(),
            index: 0,
            tag: "url".into(),
        }
    );
    assert_eq!(
        result.errors[1].to_string(),
        "Tag '#url' is not allowed in the 1st argument of '#link'"
    );
}

#[test]
fn test_unknown_tags_reported_once_per_node() {
    let tree = BlockElement::new("doc")
        .child(title())
        .child(
            BlockElement::new("sidebar")
                .with_head(vec![InlineElement::new("bogus")])
                .child(BlockElement::new("widget")),
        )
        .child(BlockElement::new("sidebar"));

    let result = validate(&tree.into(), &article_schema());

    assert_eq!(
        result.errors,
        [
            ValidationError::UnknownTag {
                tag: "sidebar".into()
            },
            ValidationError::UnknownTag {
                tag: "sidebar".into()
            },
        ]
    );
}

#[test]
fn test_unknown_root() {
    let result = validate(&BlockElement::new("nope").into(), &article_schema());
    assert_eq!(result.codes(), [100]);
    assert_eq!(
        result.diagnostics()[0].to_string(),
        "Error HM100: Unknown tag '#nope'"
    );
}

#[test]
fn test_disallowed_in_block_per_occurrence() {
    let tree = BlockElement::new("doc")
        .child(title())
        .child(BlockElement::new("p"))
        .child(BlockElement::new("p"));

    let result = validate(&tree.into(), &article_schema());

    assert_eq!(result.codes(), [120, 120]);
    assert!(result
        .errors
        .iter()
        .all(|e| e.to_string() == "Tag '#p' is not allowed in '#doc'"));
}

#[test]
fn test_inline_tag_used_as_block() {
    // `em` is inline; its best-effort substructure check still finds the unknown child
    let tree = BlockElement::new("doc").child(title()).child(
        BlockElement::new("section")
            .child(BlockElement::new("p"))
            .child(BlockElement::new("em").child(BlockElement::new("mystery"))),
    );

    let result = validate(&tree.into(), &article_schema());

    assert_eq!(result.codes(), [120, 110, 100]);
    assert_eq!(
        result.errors[1],
        ValidationError::InlineUsedAsBlock { tag: "em".into() }
    );
}

#[test]
fn test_block_tag_used_as_inline() {
    let tree = InlineElement::new("em").arg(vec![
        InlineElement::new("p").arg(vec![InlineElement::new("mystery")]),
    ]);

    let result = validate_inline(&tree, &article_schema());

    // One mismatch, the placement of `p` in em's slot, then the unknown node inside `p`
    assert_eq!(result.codes(), [111, 121, 100]);
    assert_eq!(
        result.errors[0].to_string(),
        "Expected 'p' to be used as a block tag"
    );
}

#[test]
fn test_inline_children_are_mismatches() {
    let tree = BlockElement::new("doc").child(title()).child(
        BlockElement::new("section")
            .child(BlockElement::new("p"))
            .child(text())
            .child(link()),
    );

    let result = validate(&tree.into(), &article_schema());

    // `text` is a declared child but still inline; `link` is also undeclared there
    assert_eq!(
        result.errors,
        [
            ValidationError::BlockUsedAsInline { tag: "text".into() },
            ValidationError::DisallowedInBlock {
                parent: "section".into(),
                tag: "link".into(),
            },
            ValidationError::BlockUsedAsInline { tag: "link".into() },
        ]
    );
    assert_eq!(
        result.errors[0].to_string(),
        "Expected 'text' to be used as a block tag"
    );
}

#[test]
fn test_head_placement_and_content() {
    let tree = BlockElement::new("doc").child(
        BlockElement::new("title").with_head(vec![
            text(),
            link(),
            InlineElement::new("em").arg(vec![InlineElement::new("url")]),
        ]),
    );

    let result = validate(&tree.into(), &article_schema());

    assert_eq!(result.codes(), [122, 121]);
    assert_eq!(
        result.errors[0].to_string(),
        "Tag '#link' is not allowed in the head of '#title'"
    );
}

#[test]
fn test_errors_are_collected_in_one_pass() {
    let tree = BlockElement::new("doc")
        .child(BlockElement::new("p"))
        .child(BlockElement::new("unknown"))
        .child(BlockElement::new("section").with_head(vec![InlineElement::new("link")]));

    let result = validate(&tree.into(), &article_schema());

    // p disallowed, unknown tag, link arity, empty section, missing title
    assert_eq!(result.codes(), [120, 100, 140, 130, 130]);
}

#[test]
fn test_validation_is_deterministic() {
    let tree: Node = BlockElement::new("doc")
        .child(BlockElement::new("p"))
        .child(title())
        .child(title())
        .child(BlockElement::new("x"))
        .child(BlockElement::new("section"))
        .into();
    let schema = article_schema();

    let first = validate(&tree, &schema);
    for _ in 0..10 {
        assert_eq!(validate(&tree, &schema), first);
    }
}

#[test]
fn test_builtin_schema_with_json_document() {
    let registry = SchemaRegistry::with_builtin().expect("load built-in schema");
    let schema = registry.schema("core").expect("core schema");

    let json = r#"{
        "kind": "block",
        "tag": "doc",
        "children": [
            {"kind": "block", "tag": "title", "head": [{"tag": "text"}]},
            {"kind": "block", "tag": "section", "children": [
                {"kind": "block", "tag": "title", "head": [{"tag": "text"}]},
                {"kind": "block", "tag": "p", "head": [
                    {"tag": "text"},
                    {"tag": "link", "args": [[{"tag": "text"}], [{"tag": "url"}]]}
                ]},
                {"kind": "block", "tag": "list", "children": [
                    {"kind": "block", "tag": "item", "head": [{"tag": "em", "args": [[{"tag": "text"}]]}]}
                ]}
            ]}
        ]
    }"#;
    let tree: Node = serde_json::from_str(json).expect("parse document");

    let result = validate(&tree, schema);
    assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);

    let broken = r#"{"kind": "block", "tag": "doc", "children": [
        {"kind": "block", "tag": "list"},
        {"kind": "block", "tag": "blink"}
    ]}"#;
    let tree: Node = serde_json::from_str(broken).expect("parse document");
    let rendered: Vec<String> = validate(&tree, schema)
        .diagnostics()
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        rendered,
        [
            "Error HM130: Saw 0 occurrences of 'item' in list, but the schema requires one or more ('#oneOrMore') in list",
            "Error HM100: Unknown tag '#blink'",
            "Error HM130: Saw 0 occurrences of 'title' in doc, but the schema requires exactly one ('#one') in doc",
        ]
    );
}
