//! Tree walk that finds the next blank line to trim.
//!
//! Every tree-sitter node is classified into a [`Construct`]. Most Go node kinds are
//! [`Construct::Inert`]: they are descended into but never trimmed themselves. The eligible kinds
//! map onto a [`Category`]:
//!
//! - `block` takes the category of its owner: function declarations, method declarations and
//!   function literals give [`Category::Func`], `if_statement` gives [`Category::If`] (both the
//!   consequence and a plain `else` block), `for_statement` gives [`Category::For`]. A block with
//!   any other parent is a bare block, [`Category::Block`].
//! - `field_declaration_list` and the `literal_value` of a `struct { ... }{ ... }` composite
//!   literal are [`Category::Struct`].
//! - `interface_type` is [`Category::Interface`].
//! - `expression_switch_statement`, `type_switch_statement` and `select_statement` are
//!   [`Category::Switch`]; their clauses are [`Category::Case`].
//!
//! The walk is pre-order in document order and stops at the first trim it finds. Offsets in the
//! returned [`Trim`] are only valid against the exact source that was parsed, so the caller must
//! apply it and re-parse before looking for another one.

use tree_sitter::Node;

use crate::{
    boundary::{BodySpan, find_real_end, find_real_start},
    edit::{Edge, Edit, Trim, line_of, trim_leading, trim_trailing},
    clean::{CleanConfig, quote},
    mode::Category,
};

/// A syntax node, seen through what may be trimmed inside it.
#[derive(Debug, Clone, Copy)]
pub enum Construct<'tree> {
    /// A body whose `{` and `}` are direct children of `node`.
    Braced {
        category: Category,
        node: Node<'tree>,
    },
    /// A case clause running from its `:` to the next clause or the closing brace.
    CaseClause { node: Node<'tree>, last: bool },
    /// Nothing to trim at this node; its children are still visited.
    Inert,
}

impl<'tree> Construct<'tree> {
    pub fn classify(node: Node<'tree>) -> Self {
        let category = match node.kind() {
            "block" => block_category(node),
            "field_declaration_list" => Category::Struct,
            "literal_value" if is_struct_literal(node) => Category::Struct,
            "interface_type" => Category::Interface,
            "expression_switch_statement" | "type_switch_statement" | "select_statement" => {
                Category::Switch
            }
            "expression_case" | "type_case" | "default_case" | "communication_case" => {
                return Construct::CaseClause {
                    node,
                    last: is_last_clause(node),
                };
            }
            _ => return Construct::Inert,
        };
        Construct::Braced { category, node }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Construct::Braced { category, .. } => Some(*category),
            Construct::CaseClause { .. } => Some(Category::Case),
            Construct::Inert => None,
        }
    }
}

fn block_category(block: Node<'_>) -> Category {
    match block.parent().map(|p| p.kind()) {
        Some("function_declaration" | "method_declaration" | "func_literal") => Category::Func,
        Some("if_statement") => Category::If,
        Some("for_statement") => Category::For,
        _ => Category::Block,
    }
}

/// `struct{ A int }{ A: 1 }`: only literals whose type is spelled as a struct type count.
fn is_struct_literal(literal: Node<'_>) -> bool {
    literal
        .parent()
        .filter(|p| p.kind() == "composite_literal")
        .and_then(|p| p.child_by_field_name("type"))
        .is_some_and(|t| t.kind() == "struct_type")
}

fn is_case_kind(kind: &str) -> bool {
    matches!(
        kind,
        "expression_case" | "type_case" | "default_case" | "communication_case"
    )
}

fn is_last_clause(clause: Node<'_>) -> bool {
    let mut next = clause.next_sibling();
    while let Some(sibling) = next {
        if is_case_kind(sibling.kind()) {
            return false;
        }
        next = sibling.next_sibling();
    }
    true
}

/// Byte offsets of the `{` and `}` tokens directly under `node`.
fn brace_span(node: Node<'_>) -> Option<BodySpan> {
    let mut cursor = node.walk();
    let mut open = None;
    let mut close = None;
    for child in node.children(&mut cursor) {
        match child.kind() {
            "{" if open.is_none() => open = Some(child.start_byte()),
            "}" => close = Some(child.start_byte()),
            _ => {}
        }
    }
    Some(BodySpan::braces(open?, close?))
}

/// Span of a case clause plus whether its closing newline lies after the clause's content.
///
/// The span runs from the clause's `:` to the last newline before whatever follows the clause
/// (the next clause or the switch's `}`). The clause node itself reaches over the blank lines
/// after its last statement, so its content ends at its last statement or comment instead, or
/// right after the `:` when it has none. When the closing newline falls before that point, the
/// clause's last line is shared with the next token and only the leading edge may be trimmed.
fn case_span(source: &str, clause: Node<'_>) -> Option<(BodySpan, bool)> {
    let mut cursor = clause.walk();
    let mut colon = None;
    let mut last_content = None;
    for child in clause.children(&mut cursor) {
        match colon {
            None if child.kind() == ":" => colon = Some(child.start_byte()),
            Some(_) if child.is_named() => last_content = Some(child),
            _ => {}
        }
    }
    let colon = colon?;
    let mut content_end = last_content.map_or(colon + 1, statement_end);

    // Trailing comments may hang off the switch rather than the clause.
    let mut next = clause.next_sibling();
    while let Some(comment) = next.filter(|n| n.kind() == "comment") {
        content_end = comment.end_byte();
        next = comment.next_sibling();
    }

    let clause_end = clause.end_byte();
    let follow = next.map_or(clause_end, |n| n.start_byte()).max(clause_end);

    let close = colon + 1 + source.get(colon + 1..follow)?.rfind('\n')?;
    Some((BodySpan::case_clause(colon, close), close >= content_end))
}

/// End of the last statement under `node`, looking through `statement_list` wrappers.
fn statement_end(node: Node<'_>) -> usize {
    let mut last = node;
    while last.kind() == "statement_list" {
        let mut cursor = last.walk();
        let Some(child) = last.named_children(&mut cursor).last() else {
            break;
        };
        last = child;
    }
    last.end_byte()
}

/// Finds the first trim allowed by `config.mode`, in document order.
///
/// With `config.debug` set, the text of every eligible body is logged before its boundaries are
/// computed.
pub fn find_trim(source: &str, root: Node<'_>, config: &CleanConfig) -> Option<Trim> {
    let mode = config.mode;
    if mode.is_empty() {
        return None;
    }

    // Iterative pre-order traversal; deeply nested sources must not overflow the stack.
    let mut cursor = root.walk();
    'walk: loop {
        let construct = Construct::classify(cursor.node());
        if construct.category().is_some_and(|c| mode.enables(c))
            && let Some(trim) = trim_construct(source, construct, config.debug)
        {
            return Some(trim);
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    None
}

/// Tries the leading edge of `construct`'s body, then the trailing edge.
fn trim_construct(source: &str, construct: Construct<'_>, debug: bool) -> Option<Trim> {
    let (category, span, trailing_allowed) = match construct {
        Construct::Braced { category, node } => (category, brace_span(node)?, true),
        Construct::CaseClause { node, last } => {
            let (span, ends_after_content) = case_span(source, node)?;
            (Category::Case, span, last && ends_after_content)
        }
        Construct::Inert => return None,
    };

    if debug && let Some(body) = source.get(span.open..span.interior_end()) {
        tracing::debug!(%category, "inspecting\n{}", quote(body));
    }

    let trim = |edge, edit: Edit| Trim {
        category,
        edge,
        edit,
        // A trailing deletion starts at the newline ending the previous line.
        line: match edge {
            Edge::Leading => line_of(source, edit.start),
            Edge::Trailing => line_of(source, edit.start) + 1,
        },
    };

    if let Some(edit) =
        find_real_start(source, span).and_then(|start| trim_leading(source, span, start))
    {
        return Some(trim(Edge::Leading, edit));
    }

    if trailing_allowed
        && let Some(edit) =
            find_real_end(source, span).and_then(|end| trim_trailing(source, span, end))
    {
        return Some(trim(Edge::Trailing, edit));
    }

    tracing::trace!(%category, open = span.open, close = span.close, "nothing to trim");
    None
}
