//! Markdown to HTML conversion.
//!
//! Thin wrapper around [pulldown-cmark](https://docs.rs/pulldown-cmark) with the
//! GitHub-flavoured extensions blog posts tend to use. Rendering never fails:
//! malformed markdown degrades to whatever CommonMark makes of it.

use pulldown_cmark::{Options, Parser, html as md_html};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render a markdown body to an HTML fragment.
pub fn render(body: &str) -> String {
    let parser = Parser::new_ext(body, options());
    let mut html = String::with_capacity(body.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_heading_and_paragraph() {
        let html = render("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Some <em>emphasis</em>.</p>"));
    }

    #[test]
    fn renders_tables() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn renders_strikethrough() {
        assert!(render("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn passes_raw_html_through() {
        let html = render("<div class=\"note\">hi</div>\n");
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn empty_body_is_empty_html() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn unclosed_emphasis_does_not_fail() {
        let html = render("*never closed");
        assert!(html.contains("never closed"));
    }
}
