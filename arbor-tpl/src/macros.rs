/// Builds a node tree from an HTML-ish template written the way the
/// framework call sites write them: string literals interleaved with
/// braced interpolations. Interpolations go through `Value::from`.
///
/// ```
/// use arbor_tpl::{html, Value};
///
/// let items = Value::from("first");
/// let node = html!("<ul class=\"list\"><li>" {items} "</li></ul>").expect("one element");
/// assert_eq!(node.tag, "ul");
/// ```
#[macro_export]
macro_rules! html {
    ($($part:tt)*) => {{
        let mut segments: ::std::vec::Vec<::std::string::String> = ::std::vec::Vec::new();
        segments.push(::std::string::String::new());
        let mut values: ::std::vec::Vec<$crate::Value> = ::std::vec::Vec::new();
        $crate::__html_part!(segments values $($part)*);
        $crate::parse(&segments, values)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __html_part {
    ($segments:ident $values:ident) => {};
    ($segments:ident $values:ident $lit:literal $($rest:tt)*) => {
        if let ::std::option::Option::Some(last) = $segments.last_mut() {
            last.push_str($lit);
        }
        $crate::__html_part!($segments $values $($rest)*);
    };
    ($segments:ident $values:ident { $value:expr } $($rest:tt)*) => {
        $values.push($crate::Value::from($value));
        $segments.push(::std::string::String::new());
        $crate::__html_part!($segments $values $($rest)*);
    };
}
