use arbor_tpl::{Node, Value, parse};

fn parse_literal(source: &str) -> Option<Node> {
    parse(&[source], vec![])
}

#[test]
fn empty_template_is_no_node() {
    assert_eq!(parse_literal(""), None);
}

#[test]
fn whitespace_only_template_is_no_node() {
    assert_eq!(parse_literal("   \n\t  "), None);
}

#[test]
fn comment_only_template_is_no_node() {
    assert_eq!(
        parse_literal("<!--- some comment that should be ignored -->"),
        None
    );
}

#[test]
fn self_closing_tag() {
    assert_eq!(parse_literal("<input/>"), Some(Node::new("input")));
}

#[test]
fn self_closing_tag_with_whitespace() {
    assert_eq!(parse_literal("<  input / >"), Some(Node::new("input")));
}

#[test]
fn element_with_whitespace_only_content() {
    assert_eq!(parse_literal("<div> </div>"), Some(Node::new("div")));
}

#[test]
fn element_with_newline_content() {
    assert_eq!(parse_literal("<div>\n</div>"), Some(Node::new("div")));
}

#[test]
fn whitespace_and_stray_placeholder_around_element() {
    let node = parse(
        &["       <input />       \n  ", "  "],
        vec![Value::from("   ")],
    );
    assert_eq!(node, Some(Node::new("input")));
}

#[test]
fn dynamic_tag_name_from_placeholder() {
    let node = parse(&["<", "></div>"], vec![Value::from("div")]);
    assert_eq!(node, Some(Node::new("div")));
}

#[test]
fn dynamic_tag_name_stringifies_non_strings() {
    let node = parse(&["<", "/>"], vec![Value::opaque(7u8)]);
    assert_eq!(node, Some(Node::new("[object Object]")));
}

#[test]
fn nested_elements() {
    let node = parse_literal("<div><p><span>deep</span></p></div>").expect("one element");
    assert_eq!(
        node,
        Node::new("div").child(
            Node::new("p").child(Node::new("span").child("deep"))
        )
    );
}

#[test]
fn multiple_top_level_elements_keep_the_first() {
    let node = parse_literal("<a/><b/><c/>");
    assert_eq!(node, Some(Node::new("a")));
}

#[test]
fn loose_root_text_is_not_a_node() {
    assert_eq!(parse_literal("just some text"), None);
}

#[test]
fn comment_between_elements_is_ignored() {
    let node = parse_literal("<div><!--- hidden --><p>kept</p></div>").expect("one element");
    assert_eq!(node, Node::new("div").child(Node::new("p").child("kept")));
}
