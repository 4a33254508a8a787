//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer; fenced code blocks are highlighted with syntect
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl MarkdownRenderer {
    /// Create a renderer using the given syntect theme name
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(theme_name).unwrap_or_else(|| {
            tracing::warn!("Unknown highlight theme {:?}, using fallback", theme_name);
            themes.into_values().next().unwrap_or_default()
        });

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        // Code blocks are pulled out of the event stream and replaced with
        // pre-highlighted HTML; everything else passes through untouched.
        let mut events: Vec<Event> = Vec::new();
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();
        let mut in_code_block = false;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_buf.clear();
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                }
                Event::Text(text) if in_code_block => {
                    code_buf.push_str(&text);
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted = self.highlight_code(&code_buf, code_lang.take().as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) => format!(
                r#"<div class="highlight language-{}">{}</div>"#,
                lang, highlighted
            ),
            Err(_) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

/// Simple HTML escaping for the plain-code fallback
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new("base16-ocean.dark");
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("This is a test."));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new("base16-ocean.dark");
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("language-rust"));
        assert!(html.contains("highlight"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let renderer = MarkdownRenderer::new("base16-ocean.dark");
        let html = renderer.render("```nosuchlang\nx < y\n```").unwrap();
        assert!(html.contains("language-nosuchlang"));
    }

    #[test]
    fn test_unknown_theme_still_renders() {
        let renderer = MarkdownRenderer::new("not-a-theme");
        let html = renderer.render("plain paragraph").unwrap();
        assert!(html.contains("plain paragraph"));
    }

    #[test]
    fn test_gfm_table() {
        let renderer = MarkdownRenderer::new("base16-ocean.dark");
        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |")
            .unwrap();
        assert!(html.contains("<table>"));
    }
}
