use arbor_dom::{Child, Node};
use tracing::trace;

use crate::assemble::{self, Fragment};
use crate::scan::{QuotedPiece, Scanner, Token};
use crate::stream::Stream;

/// Hand-rolled state machine over the scanner's tokens. Nesting uses an
/// explicit stack of in-progress nodes, so depth is bounded by the heap
/// and end-of-input recovery is a drain of that stack. Malformed input
/// never faults: stray or mismatched closing tags, unterminated tags,
/// and junk tokens all degrade structurally.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Accumulating text for a children list, watching for `<`.
    Outside,
    /// Just saw `<`; a name run or one placeholder becomes the tag.
    TagName,
    /// Past the tag name: attribute names, `/`, or `>`.
    InTag,
    /// Read an attribute name; deciding between `=value` and IDL boolean.
    AfterAttrName,
    /// Seen `=`; a quoted, unquoted, or placeholder value follows.
    AttrValue,
    /// Accumulating an unquoted value until whitespace or tag end.
    AttrValueUnquoted,
    /// Discarding everything, newlines included, until `>`.
    ClosingTag,
    /// Discarding a tag that produced no element (e.g. an empty name).
    SkipTag,
}

pub(crate) fn run(stream: Stream) -> Option<Node> {
    let mut scanner = Scanner::new(stream);
    let mut state = State::Outside;

    // Ancestors still open, innermost last. `current` is the element
    // whose open tag is being read; it joins the stack at `>`.
    let mut stack: Vec<Node> = Vec::new();
    let mut roots: Vec<Child> = Vec::new();
    let mut current: Option<Node> = None;
    let mut self_closing = false;

    // Pending literal text in children position, already collapsed.
    let mut text_run = String::new();
    // The attribute being read.
    let mut attr_name = String::new();
    let mut fragments: Vec<Fragment> = Vec::new();

    // One-token pushback for arms that finish on a token they don't own.
    let mut pending: Option<Token> = None;

    loop {
        let Some(token) = pending.take().or_else(|| scanner.next()) else {
            break;
        };
        match state {
            State::Outside => match token {
                Token::Lt => {
                    flush_text(&mut text_run, &mut stack, &mut roots);
                    state = State::TagName;
                }
                Token::LtSlash => {
                    flush_text(&mut text_run, &mut stack, &mut roots);
                    state = State::ClosingTag;
                }
                Token::CommentOpen => scanner.skip_comment(),
                Token::Value(value) => {
                    flush_text(&mut text_run, &mut stack, &mut roots);
                    assemble::splice_child(value, children_mut(&mut stack, &mut roots));
                }
                Token::Ws => text_run.push(' '),
                Token::Chars(s) => text_run.push_str(&s),
                // Plain text: these characters are only structural inside
                // tag syntax.
                Token::Gt => text_run.push('>'),
                Token::Slash => text_run.push('/'),
                Token::Equals => text_run.push('='),
                Token::Quote(q) => text_run.push(q),
            },

            State::TagName => match token {
                Token::Ws => {}
                Token::Chars(name) => {
                    current = Some(Node::new(name));
                    state = State::InTag;
                }
                Token::Value(value) => {
                    // Dynamic tag name through the stringify fallback.
                    let name = value.to_string();
                    if name.is_empty() {
                        state = State::SkipTag;
                    } else {
                        current = Some(Node::new(name));
                        state = State::InTag;
                    }
                }
                Token::Gt => state = State::Outside,
                Token::LtSlash => state = State::ClosingTag,
                Token::CommentOpen => scanner.skip_comment(),
                // `<` rewinds to a fresh tag start; other junk is dropped.
                Token::Lt => {}
                Token::Slash | Token::Equals | Token::Quote(_) => {}
            },

            State::InTag => match token {
                Token::Ws => {}
                Token::Chars(name) => {
                    attr_name = name;
                    fragments = Vec::new();
                    state = State::AfterAttrName;
                }
                Token::Slash => self_closing = true,
                Token::Gt => {
                    if let Some(node) = current.take() {
                        if self_closing {
                            append_child(&mut stack, &mut roots, Child::Node(node));
                        } else {
                            stack.push(node);
                        }
                    }
                    self_closing = false;
                    state = State::Outside;
                }
                // A placeholder is not an attribute-name start; names come
                // from literal characters only.
                Token::Value(_) => {}
                Token::Equals | Token::Quote(_) => {}
                Token::Lt | Token::LtSlash | Token::CommentOpen => {}
            },

            State::AfterAttrName => match token {
                Token::Ws => {}
                Token::Equals => state = State::AttrValue,
                other => {
                    // No `=`: IDL boolean attribute.
                    if let Some(node) = current.as_mut() {
                        assemble::store_attr(
                            &mut node.attrs,
                            &mut node.events,
                            std::mem::take(&mut attr_name),
                            None,
                        );
                    }
                    pending = Some(other);
                    state = State::InTag;
                }
            },

            State::AttrValue => match token {
                Token::Ws => {}
                Token::Quote(quote) => {
                    read_quoted(&mut scanner, quote, &mut fragments);
                    if let Some(node) = current.as_mut() {
                        assemble::store_attr(
                            &mut node.attrs,
                            &mut node.events,
                            std::mem::take(&mut attr_name),
                            Some(std::mem::take(&mut fragments)),
                        );
                    }
                    state = State::InTag;
                }
                Token::Chars(s) => {
                    fragments.push(Fragment::Text(s));
                    state = State::AttrValueUnquoted;
                }
                Token::Value(value) => {
                    fragments.push(Fragment::Value(value));
                    state = State::AttrValueUnquoted;
                }
                other => {
                    // `=` with no value at all; resolves to empty text.
                    if let Some(node) = current.as_mut() {
                        assemble::store_attr(
                            &mut node.attrs,
                            &mut node.events,
                            std::mem::take(&mut attr_name),
                            Some(std::mem::take(&mut fragments)),
                        );
                    }
                    pending = Some(other);
                    state = State::InTag;
                }
            },

            State::AttrValueUnquoted => match token {
                Token::Chars(s) => fragments.push(Fragment::Text(s)),
                Token::Value(value) => fragments.push(Fragment::Value(value)),
                Token::Equals => fragments.push(Fragment::Text("=".to_string())),
                Token::Quote(q) => fragments.push(Fragment::Text(q.to_string())),
                other => {
                    if let Some(node) = current.as_mut() {
                        assemble::store_attr(
                            &mut node.attrs,
                            &mut node.events,
                            std::mem::take(&mut attr_name),
                            Some(std::mem::take(&mut fragments)),
                        );
                    }
                    pending = Some(other);
                    state = State::InTag;
                }
            },

            State::ClosingTag => match token {
                Token::Gt => {
                    // Pop without comparing names; a stray closer with an
                    // empty stack is ignored.
                    if let Some(node) = stack.pop() {
                        append_child(&mut stack, &mut roots, Child::Node(node));
                    }
                    state = State::Outside;
                }
                _ => {}
            },

            State::SkipTag => match token {
                Token::Gt => state = State::Outside,
                _ => {}
            },
        }
    }

    // End of input: finish whatever was mid-flight.
    match state {
        State::AfterAttrName => {
            if let Some(node) = current.as_mut() {
                assemble::store_attr(
                    &mut node.attrs,
                    &mut node.events,
                    std::mem::take(&mut attr_name),
                    None,
                );
            }
        }
        State::AttrValue | State::AttrValueUnquoted => {
            if let Some(node) = current.as_mut() {
                assemble::store_attr(
                    &mut node.attrs,
                    &mut node.events,
                    std::mem::take(&mut attr_name),
                    Some(std::mem::take(&mut fragments)),
                );
            }
        }
        _ => {}
    }
    if let Some(node) = current.take() {
        append_child(&mut stack, &mut roots, Child::Node(node));
    }
    flush_text(&mut text_run, &mut stack, &mut roots);
    if !stack.is_empty() {
        trace!(open = stack.len(), "implicitly closing unterminated elements");
    }
    while let Some(node) = stack.pop() {
        append_child(&mut stack, &mut roots, Child::Node(node));
    }

    resolve(roots)
}

/// Reads one quoted attribute value into fragments, splitting literal
/// text at each placeholder boundary.
fn read_quoted(scanner: &mut Scanner, quote: char, fragments: &mut Vec<Fragment>) {
    let mut run = String::new();
    loop {
        match scanner.next_quoted(quote) {
            QuotedPiece::Ch(c) => run.push(c),
            QuotedPiece::Value(value) => {
                if !run.is_empty() {
                    fragments.push(Fragment::Text(std::mem::take(&mut run)));
                }
                fragments.push(Fragment::Value(value));
            }
            QuotedPiece::End => {
                if !run.is_empty() {
                    fragments.push(Fragment::Text(run));
                }
                return;
            }
        }
    }
}

fn children_mut<'a>(stack: &'a mut Vec<Node>, roots: &'a mut Vec<Child>) -> &'a mut Vec<Child> {
    if let Some(top) = stack.last_mut() {
        &mut top.children
    } else {
        roots
    }
}

fn append_child(stack: &mut Vec<Node>, roots: &mut Vec<Child>, child: Child) {
    children_mut(stack, roots).push(child);
}

/// Flushes the pending text run. A run that is whitespace-only after
/// collapsing contributes no child, wherever it sits.
fn flush_text(text_run: &mut String, stack: &mut Vec<Node>, roots: &mut Vec<Child>) {
    if text_run.is_empty() {
        return;
    }
    let text = std::mem::take(text_run);
    if text.trim().is_empty() {
        return;
    }
    append_child(stack, roots, Child::Text(text));
}

/// Normalizes the finished parse: no element means no node; the first
/// top-level element wins and later siblings are discarded.
fn resolve(roots: Vec<Child>) -> Option<Node> {
    let mut first: Option<Node> = None;
    let mut discarded = 0usize;
    for child in roots {
        if let Child::Node(node) = child {
            if first.is_none() {
                first = Some(node);
            } else {
                discarded += 1;
            }
        }
    }
    if discarded > 0 {
        trace!(discarded, "multiple top-level elements; keeping the first");
    }
    first
}
