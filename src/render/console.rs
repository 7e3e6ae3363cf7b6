use std::fs;
use std::io::Write;
use std::path::Path;

use ratatui::style::Style;

use super::ansi::{paint, paint_spans};
use super::layout::{centered, limit, rule};
use super::{Language, RenderOptions, Renderer};
use crate::error::JlensError;
use crate::syntax_highlight::CodeHighlighter;
use crate::theme;

/// Coloured line-oriented renderer
///
/// Every line is written twice: styled to the output, plain to an in-memory
/// transcript that [`Renderer::export`] saves as text or HTML.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    options: RenderOptions,
    transcript: String,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self {
            out,
            options,
            transcript: String::new(),
        }
    }

    /// Plain text of everything printed so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, plain: &str, styled: impl FnOnce() -> String) -> Result<(), JlensError> {
        if self.options.color {
            writeln!(self.out, "{}", styled())?;
        } else {
            writeln!(self.out, "{}", plain)?;
        }
        self.transcript.push_str(plain);
        self.transcript.push('\n');
        Ok(())
    }

    fn emit_styled(&mut self, plain: &str, style: Style) -> Result<(), JlensError> {
        self.emit(plain, || paint(plain, style))
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), JlensError> {
        let width = self.options.width;
        match level {
            1 => {
                let line = rule('━', width);
                self.emit_styled(&line, theme::heading::LEVEL_1_RULE)?;
                self.emit_styled(&centered(text, width), theme::heading::LEVEL_1)?;
                self.emit_styled(&line, theme::heading::LEVEL_1_RULE)?;
            }
            2 => {
                self.emit("", String::new)?;
                let plain = centered(text, width);
                let pad = &plain[..plain.len() - text.len()];
                self.emit(&plain, || format!("{}{}", pad, paint(text, theme::heading::LEVEL_2)))?;
            }
            _ => {
                self.emit("", String::new)?;
                self.emit_styled(text, theme::heading::LEVEL_3)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn code_block(
        &mut self,
        text: &str,
        language: Language,
        line_numbers: bool,
    ) -> Result<(), JlensError> {
        let text = limit(text, self.options.max_str_len);
        for (i, line) in text.split('\n').enumerate() {
            let gutter = if line_numbers {
                format!("{:>4} │ ", i + 1)
            } else {
                String::new()
            };
            let plain = format!("{}{}", gutter, line);
            self.emit(&plain, || {
                format!(
                    "{}{}",
                    paint(&gutter, theme::code::LINE_NUMBER),
                    paint_spans(&CodeHighlighter::highlight(line, language))
                )
            })?;
        }
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), JlensError> {
        let text = limit(text, self.options.max_str_len);
        for line in text.split('\n') {
            self.emit(line, || {
                paint_spans(&CodeHighlighter::highlight(line, Language::Markdown))
            })?;
        }
        Ok(())
    }

    fn export(&self, path: &Path) -> Result<(), JlensError> {
        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        let contents = if is_html {
            transcript_html(&self.transcript)
        } else {
            self.transcript.clone()
        };
        fs::write(path, contents)?;
        log::debug!("Exported transcript to {:?}", path);
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn transcript_html(transcript: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>\n\
         body {{ background: #1a1a2e; color: #ececf4; }}\n\
         pre {{ font-family: Menlo, 'DejaVu Sans Mono', monospace; }}\n\
         </style>\n</head>\n<body>\n<pre>{}</pre>\n</body>\n</html>\n",
        escape_html(transcript)
    )
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod console_tests;
