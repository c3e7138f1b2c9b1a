//! Parser for the `go.mod` text format.
//!
//! The format is line oriented. Each line is a verb followed by arguments,
//! or, inside a `verb ( ... )` block, just the arguments. `//` starts a
//! comment that runs to the end of the line. Tokens may be double-quoted
//! (with backslash escapes) or back-quoted (raw).

use modgraft_util::errors::GraftError;

use crate::coordinate::ModuleCoordinate;
use crate::manifest::{
    Comments, ExcludeDirective, GodebugSetting, Manifest, PathDirective, ReplaceDirective,
    RequireEntry, RetractDirective,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    LParen,
    RParen,
    LBrack,
    RBrack,
    Comma,
    Arrow,
}

impl Token {
    fn word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }
}

/// Verbs that may open a `verb ( ... )` block.
const BLOCK_VERBS: &[&str] = &[
    "require", "replace", "exclude", "retract", "godebug", "tool", "ignore",
];

/// Parse `go.mod` content. `file` is only used to label errors.
pub fn parse(file: &str, content: &str) -> Result<Manifest, GraftError> {
    let mut parser = Parser {
        file,
        line: 0,
        manifest: Manifest::default(),
        seen_module: false,
        pending: Vec::new(),
    };

    let mut block: Option<(String, usize)> = None;
    for (idx, raw) in content.lines().enumerate() {
        parser.line = idx + 1;
        let (tokens, comment) = lex(raw).map_err(|msg| parser.error(&msg))?;

        if tokens.is_empty() {
            if let Some(c) = comment {
                parser.pending.push(c);
            }
            continue;
        }

        if let Some((verb, _)) = &block {
            if tokens == [Token::RParen] {
                // Comments left dangling at the end of a block belong to nothing.
                parser.pending.clear();
                block = None;
                continue;
            }
            let verb = verb.clone();
            parser.directive(&verb, &tokens, comment)?;
            continue;
        }

        let verb = tokens[0]
            .word()
            .ok_or_else(|| parser.error("expected a directive"))?
            .to_string();
        let args = &tokens[1..];
        if args == [Token::LParen] {
            if !BLOCK_VERBS.contains(&verb.as_str()) {
                return Err(parser.error(&format!("{verb} does not allow a block")));
            }
            block = Some((verb, parser.line));
            continue;
        }
        parser.directive(&verb, args, comment)?;
    }

    if let Some((verb, line)) = block {
        parser.line = line;
        return Err(parser.error(&format!("unterminated {verb} block")));
    }
    if !parser.seen_module {
        return Err(GraftError::Manifest {
            message: format!("{file}: no module directive found"),
        });
    }

    let mut manifest = parser.manifest;
    manifest.trailing_comments = parser.pending;
    tracing::debug!(
        file,
        module = %manifest.module,
        require = manifest.require.len(),
        replace = manifest.replace.len(),
        exclude = manifest.exclude.len(),
        "parsed manifest"
    );
    Ok(manifest)
}

struct Parser<'a> {
    file: &'a str,
    line: usize,
    manifest: Manifest,
    seen_module: bool,
    pending: Vec<String>,
}

impl Parser<'_> {
    fn error(&self, message: &str) -> GraftError {
        GraftError::Manifest {
            message: format!("{}:{}: {message}", self.file, self.line),
        }
    }

    fn comments(&mut self, suffix: Option<String>) -> Comments {
        Comments {
            before: std::mem::take(&mut self.pending),
            suffix,
        }
    }

    fn directive(
        &mut self,
        verb: &str,
        args: &[Token],
        comment: Option<String>,
    ) -> Result<(), GraftError> {
        match verb {
            "module" => {
                if self.seen_module {
                    return Err(self.error("repeated module directive"));
                }
                let path = self.single(verb, args)?;
                self.seen_module = true;
                self.manifest.module = path;
                self.manifest.module_comments = self.comments(comment);
            }
            "go" => {
                if self.manifest.go.is_some() {
                    return Err(self.error("repeated go directive"));
                }
                let version = self.single(verb, args)?;
                self.manifest.go = Some(version);
                self.manifest.go_comments = self.comments(comment);
            }
            "toolchain" => {
                if self.manifest.toolchain.is_some() {
                    return Err(self.error("repeated toolchain directive"));
                }
                let name = self.single(verb, args)?;
                self.manifest.toolchain = Some(name);
                self.manifest.toolchain_comments = self.comments(comment);
            }
            "godebug" => {
                let setting = self.single(verb, args)?;
                let (key, value) = setting
                    .split_once('=')
                    .ok_or_else(|| self.error("usage: godebug key=value"))?;
                let (key, value) = (key.to_string(), value.to_string());
                let comments = self.comments(comment);
                self.manifest.godebug.push(GodebugSetting {
                    key,
                    value,
                    comments,
                });
            }
            "require" => {
                let [path, version] = self.words::<2>(verb, args)?;
                let (indirect, suffix) = split_indirect(comment);
                let comments = self.comments(suffix);
                self.manifest.require.push(RequireEntry {
                    module: ModuleCoordinate::new(path, version),
                    indirect,
                    comments,
                });
            }
            "exclude" => {
                let [path, version] = self.words::<2>(verb, args)?;
                let comments = self.comments(comment);
                self.manifest.exclude.push(ExcludeDirective {
                    module: ModuleCoordinate::new(path, version),
                    comments,
                });
            }
            "replace" => {
                let directive = self.replace(args)?;
                let comments = self.comments(comment);
                self.manifest.replace.push(ReplaceDirective {
                    comments,
                    ..directive
                });
            }
            "retract" => {
                let (low, high) = self.retract(args)?;
                let comments = self.comments(comment);
                self.manifest.retract.push(RetractDirective {
                    low,
                    high,
                    comments,
                });
            }
            "tool" | "ignore" => {
                let path = self.single(verb, args)?;
                let directive = PathDirective {
                    path,
                    comments: self.comments(comment),
                };
                if verb == "tool" {
                    self.manifest.tool.push(directive);
                } else {
                    self.manifest.ignore.push(directive);
                }
            }
            other => return Err(self.error(&format!("unknown directive: {other}"))),
        }
        Ok(())
    }

    fn single(&self, verb: &str, args: &[Token]) -> Result<String, GraftError> {
        let [value] = self.words::<1>(verb, args)?;
        Ok(value)
    }

    fn words<const N: usize>(&self, verb: &str, args: &[Token]) -> Result<[String; N], GraftError> {
        let words: Option<Vec<String>> = args.iter().map(|t| t.word().map(str::to_string)).collect();
        words
            .and_then(|w| <[String; N]>::try_from(w).ok())
            .ok_or_else(|| self.error(&format!("{verb} expects {} argument(s)", N)))
    }

    fn replace(&self, args: &[Token]) -> Result<ReplaceDirective, GraftError> {
        let usage = || self.error("usage: replace module/path [v1.2.3] => other/module [v1.4.5]");
        let arrow = args.iter().position(|t| *t == Token::Arrow).ok_or_else(usage)?;
        let (lhs, rhs) = (&args[..arrow], &args[arrow + 1..]);
        let old = coordinate(lhs).ok_or_else(usage)?;
        let new = coordinate(rhs).ok_or_else(usage)?;
        Ok(ReplaceDirective::new(old, new))
    }

    fn retract(&self, args: &[Token]) -> Result<(String, String), GraftError> {
        let usage = || self.error("usage: retract v1.2.3 or retract [v1.0.0, v1.9.9]");
        match args {
            [Token::Word(v)] => Ok((v.clone(), v.clone())),
            [Token::LBrack, Token::Word(low), Token::Comma, Token::Word(high), Token::RBrack] => {
                Ok((low.clone(), high.clone()))
            }
            _ => Err(usage()),
        }
    }
}

fn coordinate(tokens: &[Token]) -> Option<ModuleCoordinate> {
    match tokens {
        [Token::Word(path)] => Some(ModuleCoordinate::unversioned(path.clone())),
        [Token::Word(path), Token::Word(version)] => {
            Some(ModuleCoordinate::new(path.clone(), version.clone()))
        }
        _ => None,
    }
}

/// Split a `// indirect` marker (optionally `indirect; more text`) off a
/// trailing comment.
fn split_indirect(comment: Option<String>) -> (bool, Option<String>) {
    let Some(text) = comment else {
        return (false, None);
    };
    if text == "indirect" {
        return (true, None);
    }
    match text.strip_prefix("indirect;") {
        Some(rest) if rest.trim().is_empty() => (true, None),
        Some(rest) => (true, Some(rest.trim().to_string())),
        None => (false, Some(text)),
    }
}

/// Split one line into tokens and an optional trailing comment.
fn lex(line: &str) -> Result<(Vec<Token>, Option<String>), String> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(i, c)) = chars.peek() {
        let rest = &line[i..];
        if c.is_whitespace() {
            chars.next();
        } else if rest.starts_with("//") {
            return Ok((tokens, Some(rest[2..].trim().to_string())));
        } else if rest.starts_with("=>") {
            tokens.push(Token::Arrow);
            chars.next();
            chars.next();
        } else if let Some(punct) = punct(c) {
            tokens.push(punct);
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some((_, '"')) => break,
                    Some((_, '\\')) => match chars.next() {
                        Some((_, 'n')) => value.push('\n'),
                        Some((_, 't')) => value.push('\t'),
                        Some((_, 'r')) => value.push('\r'),
                        Some((_, other)) => value.push(other),
                        None => return Err("unterminated quoted string".to_string()),
                    },
                    Some((_, other)) => value.push(other),
                    None => return Err("unterminated quoted string".to_string()),
                }
            }
            tokens.push(Token::Word(value));
        } else if c == '`' {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some((_, '`')) => break,
                    Some((_, other)) => value.push(other),
                    None => return Err("unterminated raw string".to_string()),
                }
            }
            tokens.push(Token::Word(value));
        } else {
            let mut value = String::new();
            while let Some(&(j, ch)) = chars.peek() {
                let tail = &line[j..];
                if ch.is_whitespace()
                    || punct(ch).is_some()
                    || ch == '"'
                    || ch == '`'
                    || tail.starts_with("//")
                    || tail.starts_with("=>")
                {
                    break;
                }
                value.push(ch);
                chars.next();
            }
            tokens.push(Token::Word(value));
        }
    }
    Ok((tokens, None))
}

fn punct(c: char) -> Option<Token> {
    match c {
        '(' => Some(Token::LParen),
        ')' => Some(Token::RParen),
        '[' => Some(Token::LBrack),
        ']' => Some(Token::RBrack),
        ',' => Some(Token::Comma),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_words_and_comment() {
        let (tokens, comment) = lex("\tgolang.org/x/text v0.3.0 // indirect").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("golang.org/x/text".to_string()),
                Token::Word("v0.3.0".to_string()),
            ]
        );
        assert_eq!(comment.as_deref(), Some("indirect"));
    }

    #[test]
    fn lex_arrow_and_quotes() {
        let (tokens, comment) = lex(r#"a v1 => "my dir/a""#).unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2], Token::Arrow);
        assert_eq!(tokens[3], Token::Word("my dir/a".to_string()));
        assert!(comment.is_none());
    }

    #[test]
    fn lex_retract_interval() {
        let (tokens, _) = lex("retract [v1.0.0, v1.0.5]").unwrap();
        assert_eq!(tokens[1], Token::LBrack);
        assert_eq!(tokens[3], Token::Comma);
        assert_eq!(tokens[5], Token::RBrack);
    }

    #[test]
    fn lex_unterminated_string() {
        assert!(lex("module \"example.com/a").is_err());
    }

    #[test]
    fn split_indirect_variants() {
        assert_eq!(split_indirect(Some("indirect".into())), (true, None));
        assert_eq!(
            split_indirect(Some("indirect; pinned".into())),
            (true, Some("pinned".to_string()))
        );
        assert_eq!(
            split_indirect(Some("pinned".into())),
            (false, Some("pinned".to_string()))
        );
        assert_eq!(split_indirect(None), (false, None));
    }
}
