use std::cell::RefCell;

use tree_sitter::{Node, Parser, Tree};

use crate::CleanError;

thread_local! {
    /// Shared Tree-sitter parser instance. We reuse it to avoid reloading the language for each
    /// of the many re-parses a single file goes through.
    static GO_PARSER: RefCell<Parser> = {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        parser
            .set_language(&language)
            .expect("tree-sitter-go language load failed");
        RefCell::new(parser)
    };
}

/// Parse Go source into a tree-sitter tree.
///
/// Unlike a bare tree-sitter parse, a tree containing `ERROR` or `MISSING` nodes is rejected with
/// [`CleanError::Syntax`]: blank-line trimming is only sound on a tree that covers the input
/// exactly.
pub fn parse(source: &str) -> Result<Tree, CleanError> {
    let tree = GO_PARSER
        .with(|p| {
            let mut parser = p.borrow_mut();
            parser.parse(source, None)
        })
        .ok_or(CleanError::ParseFailed)?;

    let root = tree.root_node();
    if root.has_error() {
        let node = first_error(root).unwrap_or(root);
        return Err(syntax_error(source, node));
    }

    Ok(tree)
}

/// Finds the first `ERROR` or `MISSING` node in document order.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    'walk: loop {
        let current = cursor.node();
        if current.is_error() || current.is_missing() {
            return Some(current);
        }

        // Only descend into subtrees that actually contain the error.
        if current.has_error() && cursor.goto_first_child() {
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

fn syntax_error(source: &str, node: Node<'_>) -> CleanError {
    let mut start = node.start_byte().min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);
    let position = node.start_position();

    CleanError::Syntax {
        line: position.row + 1,
        column: position.column + 1,
        text: source[line_start..line_end].trim_end_matches('\r').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_source() {
        let tree = parse("package main\n\nfunc main() {}\n").unwrap();
        assert_eq!(tree.root_node().kind(), "source_file");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn reports_line_of_syntax_error() {
        let src = "package main\n\nfunc main() {\n\tx := \n}\n";
        let err = parse(src).unwrap_err();
        match err {
            CleanError::Syntax { line, .. } => assert!((4..=5).contains(&line), "line {line}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn syntax_error_names_offending_text() {
        let src = "package main\nfunc {\n";
        let err = parse(src).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("failed to parse `"), "{msg}");
        assert!(matches!(err, CleanError::Syntax { .. }));
    }
}
