use std::io::Write;
use std::path::Path;

use super::layout::{centered, limit, rule};
use super::{Language, RenderOptions, Renderer};
use crate::error::JlensError;

/// Uncoloured renderer for dumb terminals and pipes
///
/// Keeps no transcript, so it cannot export; redirect stdout instead.
pub struct PlainRenderer<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn heading(&mut self, level: u8, text: &str) -> Result<(), JlensError> {
        let width = self.options.width;
        match level {
            1 => {
                writeln!(self.out, "{}", rule('*', width))?;
                writeln!(self.out, "{}", centered(text, width))?;
                writeln!(self.out, "{}", rule('*', width))?;
            }
            2 => writeln!(self.out, "\n{}", centered(text, width))?,
            _ => writeln!(self.out, "\n**** {} ****\n", text)?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn code_block(
        &mut self,
        text: &str,
        _language: Language,
        line_numbers: bool,
    ) -> Result<(), JlensError> {
        let text = limit(text, self.options.max_str_len);
        for (i, line) in text.split('\n').enumerate() {
            if line_numbers {
                writeln!(self.out, "{:3}:\t{}", i + 1, line)?;
            } else {
                writeln!(self.out, "{}", line)?;
            }
        }
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<(), JlensError> {
        writeln!(self.out, "{}", limit(text, self.options.max_str_len))?;
        Ok(())
    }

    fn export(&self, _path: &Path) -> Result<(), JlensError> {
        Err(JlensError::ExportUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut PlainRenderer<Vec<u8>>)) -> String {
        let mut renderer = PlainRenderer::new(
            Vec::new(),
            RenderOptions {
                width: 10,
                max_str_len: Some(12),
                color: false,
            },
        );
        f(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_heading_levels() {
        let out = render(|r| r.heading(1, "Top").unwrap());
        assert_eq!(out, "**********\n   Top\n**********\n");

        let out = render(|r| r.heading(2, "Code").unwrap());
        assert_eq!(out, "\n   Code\n");

        let out = render(|r| r.heading(3, "Attempt 1 Code").unwrap());
        assert_eq!(out, "\n**** Attempt 1 Code ****\n\n");
    }

    #[test]
    fn test_code_block_line_numbers() {
        let out = render(|r| r.code_block("a = 1\nb = 2", Language::Python, true).unwrap());
        assert_eq!(out, "  1:\ta = 1\n  2:\tb = 2\n");
    }

    #[test]
    fn test_paragraph_is_truncated() {
        let out = render(|r| r.paragraph("0123456789abcdef").unwrap());
        assert_eq!(out, "0123456789ab... (4 characters truncated)\n");
    }

    #[test]
    fn test_export_is_unsupported() {
        let renderer = PlainRenderer::new(Vec::new(), RenderOptions::default());
        let err = renderer.export(Path::new("out.txt")).unwrap_err();
        assert!(matches!(err, JlensError::ExportUnsupported));
        assert_eq!(
            err.to_string(),
            "File output is only supported by the console renderer. Use `> output.txt` instead."
        );
    }
}
