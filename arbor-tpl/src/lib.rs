use tracing::trace;

mod assemble;
mod macros;
mod parse;
mod scan;
mod stream;

pub use arbor_dom::{AttrValue, Child, Handler, Node, Value, h, text};

/// Parses a hybrid template — `n` literal segments interleaved with
/// `n - 1` placeholder values, as produced by a template call site — into
/// a node tree. Returns `None` for input with no element (empty,
/// whitespace-only, or comment-only templates).
///
/// Parsing is total: malformed markup degrades structurally instead of
/// failing. All state is local to the call, so concurrent use needs no
/// synchronization.
///
/// ```
/// use arbor_tpl::{parse, AttrValue, Value};
///
/// let node = parse(&["<input type=\"", "\"/>"], vec![Value::from("text")])
///     .expect("one element");
/// assert_eq!(node.tag, "input");
/// assert_eq!(
///     node.attrs["type"],
///     AttrValue::Dynamic(Value::from("text"))
/// );
/// ```
pub fn parse<S: AsRef<str>>(segments: &[S], values: Vec<Value>) -> Option<Node> {
    trace!(
        segments = segments.len(),
        values = values.len(),
        "parsing hybrid template"
    );
    parse::run(stream::Stream::new(segments, values))
}
