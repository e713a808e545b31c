use crate::{AttrValue, Child, Node};

impl Node {
    /// Renders the tree back to markup text. Attributes are emitted in
    /// name order so output is deterministic; dynamic attribute values
    /// and loose child values go through the stringify fallback; event
    /// bindings have no textual form and are omitted. There is no entity
    /// escaping, matching the parser, which has no entity syntax.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    let mut names: Vec<&String> = node.attrs.keys().collect();
    names.sort();
    for name in names {
        match &node.attrs[name] {
            AttrValue::Text(value) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
            AttrValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            AttrValue::Bool(false) => {}
            AttrValue::Dynamic(value) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&value.to_string());
                out.push('"');
            }
        }
    }

    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &node.children {
        match child {
            Child::Node(n) => write_node(n, out),
            Child::Text(t) => out.push_str(t),
            Child::Value(v) => out.push_str(&v.to_string()),
        }
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}
