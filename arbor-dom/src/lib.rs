use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

mod serialize;

/// Rendering of every non-primitive value when it must become text.
const OBJECT_MARKER: &str = "[object Object]";

/// An opaque callable bound to an element event. Cloning shares the
/// underlying closure; equality is allocation identity, so a parsed tree
/// can be compared against the tree built from the same closures.
#[derive(Clone)]
pub struct Handler(Rc<RefCell<dyn FnMut()>>);

impl Handler {
    pub fn new<F: FnMut() + 'static>(f: F) -> Self {
        Handler(Rc::new(RefCell::new(f)))
    }

    /// Invokes the wrapped closure. Dispatch policy (which events fire,
    /// in what order) belongs to the consuming framework.
    pub fn call(&self) {
        let mut f = self.0.borrow_mut();
        (&mut *f)();
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// An interpolated template value. The discriminant is established by the
/// call site (via the `From` conversions below); the parser only ever
/// branches on it and never inspects the payload of `Opaque`.
#[derive(Clone)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Handler(Handler),
    Handlers(Vec<Handler>),
    /// A sequence of child values, spliced one level when it appears in
    /// children position.
    List(Vec<Value>),
    Node(Node),
    /// A structured value this crate does not interpret.
    Opaque(Rc<dyn Any>),
}

impl Value {
    pub fn handler<F: FnMut() + 'static>(f: F) -> Self {
        Value::Handler(Handler::new(f))
    }

    pub fn opaque<T: Any>(value: T) -> Self {
        Value::Opaque(Rc::new(value))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Handler(a), Value::Handler(b)) => a == b,
            (Value::Handlers(a), Value::Handlers(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Handler(_) => f.write_str("Handler(..)"),
            Value::Handlers(hs) => write!(f, "Handlers(len={})", hs.len()),
            Value::List(vs) => f.debug_tuple("List").field(vs).finish(),
            Value::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

/// The total stringify fallback: primitives render via their natural text
/// form, everything else as a fixed marker. Never fails, whatever the
/// value shape.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            _ => f.write_str(OBJECT_MARKER),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}
impl From<Handler> for Value {
    fn from(h: Handler) -> Self {
        Value::Handler(h)
    }
}
impl From<Vec<Handler>> for Value {
    fn from(hs: Vec<Handler>) -> Self {
        Value::Handlers(hs)
    }
}
impl From<Vec<Value>> for Value {
    fn from(vs: Vec<Value>) -> Self {
        Value::List(vs)
    }
}
impl From<Node> for Value {
    fn from(n: Node) -> Self {
        Value::Node(n)
    }
}

/// A resolved attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    /// IDL-style attribute written without `=value`.
    Bool(bool),
    /// A sole-placeholder value, preserved unstringified.
    Dynamic(Value),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}
impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}
impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}
impl From<Value> for AttrValue {
    fn from(v: Value) -> Self {
        AttrValue::Dynamic(v)
    }
}

/// One entry of a node's children list, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Node),
    Text(String),
    /// An interpolated value left for the consuming framework to
    /// interpret (e.g. render a primitive as text).
    Value(Value),
}

impl From<Node> for Child {
    fn from(n: Node) -> Self {
        Child::Node(n)
    }
}
impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Text(s.to_string())
    }
}
impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Text(s)
    }
}
impl From<Value> for Child {
    fn from(v: Value) -> Self {
        Child::Value(v)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub attrs: HashMap<String, AttrValue>,
    pub events: HashMap<String, Vec<Handler>>,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            ..Node::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn on(mut self, event: impl Into<String>, handler: Handler) -> Self {
        self.events.entry(event.into()).or_default().push(handler);
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }
}

pub fn h(tag: impl Into<String>, attrs: Vec<(&str, &str)>, children: Vec<Child>) -> Node {
    let mut node = Node::new(tag);
    for (k, v) in attrs {
        node.attrs.insert(k.to_string(), AttrValue::Text(v.to_string()));
    }
    node.children = children;
    node
}

pub fn text(t: impl Into<String>) -> Child {
    Child::Text(t.into())
}
