use std::collections::HashMap;

use arbor_dom::{AttrValue, Child, Handler, Value};

/// One piece of an attribute value under construction: literal text as
/// written (collapsed later) or a raw placeholder.
#[derive(Debug)]
pub(crate) enum Fragment {
    Text(String),
    Value(Value),
}

/// Replaces every run of whitespace with exactly one space. No trimming;
/// a leading or trailing run becomes a single leading or trailing space.
pub(crate) fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

/// Merges the fragments of one attribute value. A sole placeholder passes
/// through unstringified; any mix of literal text and placeholders is
/// stringified and concatenated in order.
pub(crate) fn assemble_attr(mut fragments: Vec<Fragment>) -> AttrValue {
    if fragments.len() == 1 && matches!(fragments[0], Fragment::Value(_)) {
        if let Some(Fragment::Value(value)) = fragments.pop() {
            return AttrValue::Dynamic(value);
        }
    }
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(t) => out.push_str(&collapse_ws(&t)),
            Fragment::Value(v) => out.push_str(&v.to_string()),
        }
    }
    AttrValue::Text(out)
}

/// Resolves and stores one finished attribute. `fragments` is `None` for
/// a name with no `=` (IDL boolean). An `on`-prefixed name whose resolved
/// sole-placeholder value is a callable (or a sequence of callables) is
/// routed to `events` and never appears in `attrs`.
pub(crate) fn store_attr(
    attrs: &mut HashMap<String, AttrValue>,
    events: &mut HashMap<String, Vec<Handler>>,
    name: String,
    fragments: Option<Vec<Fragment>>,
) {
    let Some(fragments) = fragments else {
        attrs.insert(name, AttrValue::Bool(true));
        return;
    };
    let value = assemble_attr(fragments);
    if let AttrValue::Dynamic(dynamic) = &value {
        if let Some(event) = name.strip_prefix("on").filter(|rest| !rest.is_empty()) {
            match dynamic {
                Value::Handler(handler) => {
                    events.insert(event.to_string(), vec![handler.clone()]);
                    return;
                }
                Value::Handlers(handlers) => {
                    events.insert(event.to_string(), handlers.clone());
                    return;
                }
                _ => {}
            }
        }
    }
    attrs.insert(name, value);
}

/// Appends a placeholder encountered in children position. A list is
/// spliced one level, element by element; everything else is a single
/// child. Node values become element children; any other value stays
/// opaque for the consumer to interpret.
pub(crate) fn splice_child(value: Value, children: &mut Vec<Child>) {
    match value {
        Value::List(items) => {
            for item in items {
                children.push(child_of(item));
            }
        }
        other => children.push(child_of(other)),
    }
}

fn child_of(value: Value) -> Child {
    match value {
        Value::Node(node) => Child::Node(node),
        other => Child::Value(other),
    }
}
