//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::escape_html;

/// Highlights fenced code blocks
struct CodeHighlighter {
    syntax_set: SyntaxSet,
    /// `None` when no theme could be loaded; code is then only escaped
    theme: Option<Theme>,
    line_numbers: bool,
}

impl CodeHighlighter {
    fn new(config: &HighlightConfig) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(&config.theme) {
            Some(theme) => Some(theme),
            None => {
                tracing::warn!("Unknown highlight theme {:?}, using a default", config.theme);
                themes.into_values().next()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers: config.line_number,
        }
    }

    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self.theme.as_ref().and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(html) if self.line_numbers => with_gutter(&html, lang),
            Some(html) => html,
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                escape_html(code)
            ),
        }
    }
}

/// Wrap highlighted code in a table with a line-number gutter
fn with_gutter(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let gutter: Vec<String> = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect();

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang,
        gutter.join("\n"),
        lines.join("\n")
    )
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    options: Options,
    highlighter: CodeHighlighter,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    pub fn with_options(highlight: &HighlightConfig) -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_SMART_PUNCTUATION
                | Options::ENABLE_HEADING_ATTRIBUTES,
            highlighter: CodeHighlighter::new(highlight),
        }
    }

    /// Render a markdown body (metadata already removed) to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut events = Vec::new();
        // (language, collected text) while inside a code block
        let mut block: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = block.take() {
                        let html = self.highlighter.highlight(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) => match block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                event => events.push(event),
            }
        }

        let mut output = String::new();
        html::push_html(&mut output, events.into_iter());
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
