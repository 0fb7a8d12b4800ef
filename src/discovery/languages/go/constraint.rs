//! Decides whether a Go file belongs to the configured build target, from
//! its `_GOOS`/`_GOARCH` file name suffix and its `//go:build` or
//! `// +build` lines.

use super::config::{GoConfig, FILE_SUFFIX};

pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

pub const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const COMPILER: &str = "gc";

/// Newest `go1.N` release tag satisfied by constraints.
pub const RELEASE_MINOR: u32 = 23;

impl GoConfig {
    /// Whether a single build tag holds for this target.
    pub fn match_tag(&self, tag: &str) -> bool {
        if tag == "cgo" {
            return self.cgo_enabled;
        }
        if tag == self.goos || tag == self.goarch || tag == COMPILER {
            return true;
        }
        match (self.goos.as_str(), tag) {
            ("android", "linux") | ("illumos", "solaris") | ("ios", "darwin") => return true,
            _ => {}
        }
        if tag == "unix" {
            return UNIX_OS.contains(&self.goos.as_str());
        }
        if let Some(minor) = tag.strip_prefix("go1.").and_then(|v| v.parse::<u32>().ok()) {
            return (1..=RELEASE_MINOR).contains(&minor);
        }
        self.build_tags.iter().any(|t| t == tag)
    }

    /// Checks the `_GOOS`, `_GOARCH` or `_GOOS_GOARCH` suffix of a file
    /// name. Names without a known suffix match every target.
    pub fn file_name_matches(&self, name: &str) -> bool {
        let stem = name.strip_suffix(FILE_SUFFIX).unwrap_or(name);
        let stem = stem.split('.').next().unwrap_or(stem);
        let Some((_, rest)) = stem.split_once('_') else {
            return true;
        };

        let mut parts: Vec<&str> = rest.split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }

        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.match_tag(parts[n - 2]) && self.match_tag(parts[n - 1]);
        }
        match parts.last() {
            Some(last) if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.match_tag(last)
            }
            _ => true,
        }
    }

    /// Evaluates the constraint lines of a file header. A `//go:build` line
    /// wins over `// +build` lines, which are otherwise ANDed together.
    pub fn constraints_match(&self, lines: &[String]) -> Result<bool, String> {
        if let Some(line) = lines.iter().find(|l| l.starts_with("//go:build")) {
            let expr = line.trim_start_matches("//go:build");
            return Ok(parse_expr(expr)?.eval(&|tag| self.match_tag(tag)));
        }

        Ok(lines
            .iter()
            .filter_map(|l| l.strip_prefix("// +build"))
            .all(|fields| self.plus_build_matches(fields)))
    }

    /// `// +build` syntax: space-separated options are ORed, comma-separated
    /// terms ANDed, and `!` negates a term.
    fn plus_build_matches(&self, fields: &str) -> bool {
        let mut options = fields.split_whitespace().peekable();
        if options.peek().is_none() {
            return true;
        }
        options.any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !tag.is_empty() && !self.match_tag(tag),
                None => !term.is_empty() && self.match_tag(term),
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn eval(&self, holds: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Expr::Tag(tag) => holds(tag),
            Expr::Not(inner) => !inner.eval(holds),
            Expr::And(a, b) => a.eval(holds) && b.eval(holds),
            Expr::Or(a, b) => a.eval(holds) || b.eval(holds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize(src: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            '!' => tokens.push(Token::Not),
            '&' | '|' => {
                if chars.next_if(|&(_, next)| next == c).is_none() {
                    return Err(format!("invalid build constraint: unexpected '{c}' at {i}"));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if !(next.is_alphanumeric() || next == '_' || next == '.') {
                        break;
                    }
                    end = j + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Tag(src[i..end].to_string()));
            }
            other => return Err(format!("invalid build constraint: unexpected '{other}'")),
        }
    }
    Ok(tokens)
}

/// Parses a `//go:build` expression: `||` binds loosest, then `&&`, then `!`.
pub fn parse_expr(src: &str) -> Result<Expr, String> {
    let tokens = tokenize(src)?;
    let mut parser = ExprParser { tokens, pos: 0 };
    let expr = parser.or()?;
    if parser.pos != parser.tokens.len() {
        return Err(format!("invalid build constraint: {}", src.trim()));
    }
    Ok(expr)
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<Expr, String> {
        let mut expr = self.and()?;
        while self.eat(&Token::Or) {
            expr = Expr::Or(Box::new(expr), Box::new(self.and()?));
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, String> {
        let mut expr = self.not()?;
        while self.eat(&Token::And) {
            expr = Expr::And(Box::new(expr), Box::new(self.not()?));
        }
        Ok(expr)
    }

    fn not(&mut self) -> Result<Expr, String> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.not()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, String> {
        if self.eat(&Token::Open) {
            let expr = self.or()?;
            if !self.eat(&Token::Close) {
                return Err("invalid build constraint: missing ')'".to_string());
            }
            return Ok(expr);
        }
        match self.tokens.get(self.pos) {
            Some(Token::Tag(tag)) => {
                let tag = tag.clone();
                self.pos += 1;
                Ok(Expr::Tag(tag))
            }
            _ => Err("invalid build constraint: expected tag".to_string()),
        }
    }
}
