//! Reads the `package` clause, the build constraint comments above it and
//! the import declarations at the top of a Go source file. Nothing past the
//! import block is looked at.

use tree_sitter::{Node, Parser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    pub package: String,
    /// `//go:build` and `// +build` lines found before the package clause.
    pub constraints: Vec<String>,
    pub imports: Vec<ImportSpec>,
}

pub struct HeaderParser {
    parser: Parser,
}

impl HeaderParser {
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| format!("failed to set parser language: go: {e}"))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, src: &str) -> Result<FileHeader, String> {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        let tree = self
            .parser
            .parse(src, None)
            .ok_or_else(|| "failed to parse source".to_string())?;
        let source = src.as_bytes();

        let mut header = FileHeader::default();
        let root = tree.root_node();
        let mut cursor = root.walk();

        for node in root.children(&mut cursor) {
            if node.is_error() || node.is_missing() {
                return Err(syntax_error(&node));
            }
            // Statement terminators.
            if !node.is_named() {
                continue;
            }
            match node.kind() {
                "comment" if header.package.is_empty() => {
                    let text = node_text(&node, source);
                    if is_constraint_line(text) {
                        header.constraints.push(text.trim_end().to_string());
                    }
                }
                "comment" => {}
                "package_clause" if header.package.is_empty() => {
                    header.package = package_name(&node, source)?;
                }
                "import_declaration" if !header.package.is_empty() => {
                    if node.has_error() {
                        return Err(syntax_error(&node));
                    }
                    process_import_declaration(&node, source, &mut header.imports);
                }
                _ => break,
            }
        }

        if header.package.is_empty() {
            return Err("expected 'package' clause".to_string());
        }
        Ok(header)
    }
}

/// One-shot parse with a fresh parser.
pub fn parse_header(src: &str) -> Result<FileHeader, String> {
    HeaderParser::new()?.parse(src)
}

fn is_constraint_line(text: &str) -> bool {
    let is_directive = |prefix: &str| {
        text.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
    };
    is_directive("//go:build") || is_directive("// +build")
}

fn package_name(node: &Node, source: &[u8]) -> Result<String, String> {
    let mut cursor = node.walk();
    let name = node
        .children(&mut cursor)
        .find(|child| child.kind() == "package_identifier")
        .map(|child| node_text(&child, source).to_string());
    name.ok_or_else(|| syntax_error(node))
}

fn process_import_declaration(node: &Node, source: &[u8], imports: &mut Vec<ImportSpec>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_spec" => process_import_spec(&child, source, imports),
            "import_spec_list" => {
                let mut list_cursor = child.walk();
                for spec in child.children(&mut list_cursor) {
                    if spec.kind() == "import_spec" {
                        process_import_spec(&spec, source, imports);
                    }
                }
            }
            _ => {}
        }
    }
}

fn process_import_spec(node: &Node, source: &[u8], imports: &mut Vec<ImportSpec>) {
    let Some(path) = node.child_by_field_name("path") else {
        return;
    };
    if !matches!(
        path.kind(),
        "interpreted_string_literal" | "raw_string_literal"
    ) {
        return;
    }

    let start = path.start_position();
    imports.push(ImportSpec {
        path: unquote(node_text(&path, source)),
        line: start.row + 1,
        column: start.column + 1,
    });
}

fn unquote(text: &str) -> String {
    text.strip_prefix(['"', '`'])
        .and_then(|s| s.strip_suffix(['"', '`']))
        .unwrap_or(text)
        .to_string()
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn syntax_error(node: &Node) -> String {
    let start = node.start_position();
    format!("{}:{}: syntax error", start.row + 1, start.column + 1)
}
