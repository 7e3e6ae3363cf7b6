use ratatui::style::Style;
use ratatui::text::Span;

use crate::render::Language;
use crate::theme;

/// Simple regex-free highlighter for the code blocks the console prints
/// This provides basic keyword, literal, comment and diff highlighting
pub struct CodeHighlighter;

impl CodeHighlighter {
    /// Highlight one line of text and return styled spans
    pub fn highlight(line: &str, language: Language) -> Vec<Span<'static>> {
        match language {
            Language::Diff => Self::diff_line(line),
            Language::Markdown => Self::markdown_line(line),
            Language::Json => Self::tokens(line, false),
            Language::Code | Language::Python => Self::tokens(line, true),
        }
    }

    fn diff_line(line: &str) -> Vec<Span<'static>> {
        if line.is_empty() {
            return Vec::new();
        }
        let style = if line.starts_with("+++") || line.starts_with("---") {
            theme::diff::HEADER
        } else if line.starts_with("@@") {
            Style::default().fg(theme::diff::HUNK)
        } else if line.starts_with('+') {
            Style::default().fg(theme::diff::ADDED)
        } else if line.starts_with('-') {
            Style::default().fg(theme::diff::REMOVED)
        } else {
            Style::default()
        };
        vec![Span::styled(line.to_string(), style)]
    }

    fn markdown_line(line: &str) -> Vec<Span<'static>> {
        if line.trim_start().starts_with('#') {
            return vec![Span::styled(line.to_string(), theme::heading::LEVEL_3)];
        }

        // Backtick spans are the only inline markup worth colouring
        let mut spans = Vec::new();
        for (i, part) in line.split('`').enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 1 {
                spans.push(Span::styled(
                    format!("`{}`", part),
                    Style::default().fg(theme::code::INLINE_CODE),
                ));
            } else {
                spans.push(Span::raw(part.to_string()));
            }
        }
        spans
    }

    /// Tokenize a line of Python-like code or JSON
    fn tokens(text: &str, python: bool) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            // Skip whitespace (keep it unstyled)
            if chars[i].is_whitespace() {
                let start = i;
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                spans.push(Span::raw(chars[start..i].iter().collect::<String>()));
                continue;
            }

            // Comments run to the end of the line
            if python && chars[i] == '#' {
                spans.push(Span::styled(
                    chars[i..].iter().collect::<String>(),
                    theme::code::COMMENT,
                ));
                break;
            }

            // String literals
            if chars[i] == '"' || (python && chars[i] == '\'') {
                let quote = chars[i];
                let start = i;
                i += 1;
                let mut escaped = false;
                while i < chars.len() {
                    if escaped {
                        escaped = false;
                    } else if chars[i] == '\\' {
                        escaped = true;
                    } else if chars[i] == quote {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                let literal = chars[start..i].iter().collect::<String>();

                // A JSON string followed by ':' is an object key
                let is_key = !python && {
                    let mut j = i;
                    while j < chars.len() && chars[j].is_whitespace() {
                        j += 1;
                    }
                    j < chars.len() && chars[j] == ':'
                };
                let color = if is_key {
                    theme::code::JSON_KEY
                } else {
                    theme::code::STRING
                };
                spans.push(Span::styled(literal, Style::default().fg(color)));
                continue;
            }

            // Numbers (with an optional leading minus in JSON)
            let starts_number = chars[i].is_ascii_digit()
                || (!python
                    && chars[i] == '-'
                    && i + 1 < chars.len()
                    && chars[i + 1].is_ascii_digit());
            if starts_number {
                let start = i;
                i += 1;
                while i < chars.len()
                    && (chars[i].is_ascii_digit() || matches!(chars[i], '.' | 'e' | 'E' | '+' | '-'))
                {
                    i += 1;
                }
                spans.push(Span::styled(
                    chars[start..i].iter().collect::<String>(),
                    Style::default().fg(theme::code::NUMBER),
                ));
                continue;
            }

            // Keywords and identifiers
            if chars[i].is_alphabetic() || chars[i] == '_' {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word = chars[start..i].iter().collect::<String>();

                if is_literal(&word) {
                    spans.push(Span::styled(word, Style::default().fg(theme::code::LITERAL)));
                } else if python && is_keyword(&word) {
                    spans.push(Span::styled(word, Style::default().fg(theme::code::KEYWORD)));
                } else {
                    spans.push(Span::raw(word));
                }
                continue;
            }

            // Single character we don't recognize
            spans.push(Span::raw(chars[i].to_string()));
            i += 1;
        }

        spans
    }
}

/// Check if a word is a constant literal in Python or JSON
fn is_literal(word: &str) -> bool {
    matches!(word, "None" | "True" | "False" | "null" | "true" | "false")
}

/// Check if a word is a Python keyword
fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "and" | "as" | "assert" | "async" | "await" |
        "break" | "class" | "continue" | "def" | "del" |
        "elif" | "else" | "except" | "finally" | "for" |
        "from" | "global" | "if" | "import" | "in" | "is" |
        "lambda" | "nonlocal" | "not" | "or" | "pass" |
        "raise" | "return" | "try" | "while" | "with" | "yield"
    )
}
