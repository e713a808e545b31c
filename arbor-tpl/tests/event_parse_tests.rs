use arbor_tpl::{AttrValue, Handler, Value, parse};

#[test]
fn onclick_placeholder_becomes_a_click_binding() {
    let fn_a = Handler::new(|| {});
    let node = parse(
        &["<button onclick=", "></button>"],
        vec![Value::Handler(fn_a.clone())],
    )
    .expect("one element");

    assert_eq!(node.events.get("click"), Some(&vec![fn_a]));
    assert!(node.attrs.is_empty());
}

#[test]
fn quoted_handler_placeholder_still_binds() {
    let fn_a = Handler::new(|| {});
    let node = parse(
        &["<button onclick=\"", "\"></button>"],
        vec![Value::Handler(fn_a.clone())],
    )
    .expect("one element");

    assert_eq!(node.events.get("click"), Some(&vec![fn_a]));
    assert!(node.attrs.is_empty());
}

#[test]
fn handler_identity_survives_parsing() {
    let fn_a = Handler::new(|| {});
    let fn_b = Handler::new(|| {});
    let node = parse(
        &["<button onclick=", "></button>"],
        vec![Value::Handler(fn_a.clone())],
    )
    .expect("one element");

    let bound = &node.events["click"][0];
    assert_eq!(bound, &fn_a);
    assert_ne!(bound, &fn_b);
}

#[test]
fn handler_sequence_is_used_as_is() {
    let fn_a = Handler::new(|| {});
    let fn_b = Handler::new(|| {});
    let node = parse(
        &["<input oninput=", "/>"],
        vec![Value::Handlers(vec![fn_a.clone(), fn_b.clone()])],
    )
    .expect("one element");

    assert_eq!(node.events.get("input"), Some(&vec![fn_a, fn_b]));
}

#[test]
fn event_name_keeps_case_after_the_prefix() {
    let fn_a = Handler::new(|| {});
    let node = parse(
        &["<button onClick=", "></button>"],
        vec![Value::Handler(fn_a.clone())],
    )
    .expect("one element");

    assert_eq!(node.events.get("Click"), Some(&vec![fn_a]));
}

#[test]
fn on_attr_with_non_callable_value_stays_in_attrs() {
    let node = parse(
        &["<button onclick=", "></button>"],
        vec![Value::from("not-a-handler")],
    )
    .expect("one element");

    assert!(node.events.is_empty());
    assert_eq!(
        node.attrs.get("onclick"),
        Some(&AttrValue::Dynamic(Value::from("not-a-handler")))
    );
}

#[test]
fn handler_mixed_with_text_is_stringified_not_bound() {
    let fn_a = Handler::new(|| {});
    let node = parse(
        &["<button onclick=\"go ", "\"></button>"],
        vec![Value::Handler(fn_a)],
    )
    .expect("one element");

    assert!(node.events.is_empty());
    assert_eq!(
        node.attrs.get("onclick"),
        Some(&AttrValue::Text("go [object Object]".to_string()))
    );
}

#[test]
fn repeated_event_attribute_overwrites() {
    let fn_a = Handler::new(|| {});
    let fn_b = Handler::new(|| {});
    let node = parse(
        &["<button onclick=", " onclick=", "></button>"],
        vec![Value::Handler(fn_a), Value::Handler(fn_b.clone())],
    )
    .expect("one element");

    assert_eq!(node.events.get("click"), Some(&vec![fn_b]));
}

#[test]
fn bound_handler_is_callable() {
    use std::cell::Cell;
    use std::rc::Rc;

    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let node = parse(
        &["<button onclick=", "></button>"],
        vec![Value::handler(move || counter.set(counter.get() + 1))],
    )
    .expect("one element");

    for handler in &node.events["click"] {
        handler.call();
    }
    assert_eq!(hits.get(), 1);
}
