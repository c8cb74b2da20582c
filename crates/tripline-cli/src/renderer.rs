//! Terminal rendering for the markdown produced by the core display types.
//!
//! Rich output styles the markdown with termimad; plain output passes it
//! through untouched for piping and tests.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown to the terminal, optionally with color.
pub struct TerminalRenderer {
    skin: Option<MadSkin>,
}

impl TerminalRenderer {
    /// Creates a renderer. With `rich_enabled` off, markdown is printed
    /// verbatim.
    pub fn new(rich_enabled: bool) -> Self {
        let skin = rich_enabled.then(|| {
            let mut skin = MadSkin::default();
            skin.set_headers_fg(Color::Cyan);
            skin.bold.set_fg(Color::Yellow);
            skin.italic.set_fg(Color::Magenta);
            skin
        });

        Self { skin }
    }

    /// Renders markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        match &self.skin {
            Some(skin) => {
                // Headers keep their hash prefix so output stays greppable;
                // everything else goes through termimad's inline styling.
                for line in markdown.lines() {
                    if line.starts_with('#') {
                        println!("\x1b[36m{line}\x1b[0m");
                    } else {
                        skin.print_inline(line);
                        println!();
                    }
                }
            }
            None => print!("{markdown}"),
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer_has_no_skin() {
        let renderer = TerminalRenderer::new(false);
        assert!(renderer.skin.is_none());
    }

    #[test]
    fn test_rich_renderer_has_skin() {
        let renderer = TerminalRenderer::new(true);
        assert!(renderer.skin.is_some());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.skin.is_some());
    }
}
