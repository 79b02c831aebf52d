use std::{fs, path::PathBuf};

use clap::Parser;
use go_removelines::{Category, walk::Construct};
use tree_sitter::Parser as TsParser;

#[derive(Parser, Debug)]
#[command(name = "parse")]
#[command(about = "Parse a Go file with tree-sitter and print the CST", long_about = None)]
struct Args {
    /// Path to the Go source file to parse
    input: PathBuf,

    /// Print the tree in S-expression format instead of the default dump format
    #[arg(long, short)]
    sexp: bool,

    /// Only print nodes that would be considered for trimming
    #[arg(long, short)]
    constructs: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)?;

    let mut parser = TsParser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| std::io::Error::other("tree-sitter failed to parse input"))?;

    let root = tree.root_node();

    if args.sexp {
        println!("{}", root.to_sexp());
    } else {
        dump_tree(&source, root, 0, args.constructs);
    }

    Ok(())
}

fn dump_tree(source: &str, node: tree_sitter::Node<'_>, depth: usize, constructs_only: bool) {
    let category = Construct::classify(node).category();

    if !constructs_only || category.is_some() {
        let indent = "  ".repeat(depth);
        let start = node.start_position();
        let end = node.end_position();

        let text_preview = node
            .utf8_text(source.as_bytes())
            .ok()
            .map(|t| t.replace('\n', "\\n"))
            .unwrap_or_else(|| "<non-utf8>".to_string());

        println!(
            "{indent}{kind}{tag} [{start_byte}..{end_byte}] ({sl}:{sc})..({el}:{ec}) \"{text}\"",
            kind = node.kind(),
            tag = category.map(tag).unwrap_or_default(),
            start_byte = node.start_byte(),
            end_byte = node.end_byte(),
            sl = start.row + 1,
            sc = start.column + 1,
            el = end.row + 1,
            ec = end.column + 1,
            text = truncate(&text_preview, 120),
        );
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        dump_tree(source, child, depth + 1, constructs_only);
    }
}

fn tag(category: Category) -> String {
    format!(" <{category}>")
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}
