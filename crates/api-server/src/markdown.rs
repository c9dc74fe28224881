//! Renders the model's markdown for the page.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Markdown to HTML with GitHub-style tables.
///
/// Raw HTML in the input comes out escaped. Links and images keep only their
/// text.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { .. } | Tag::Image { .. }) => None,
        Event::End(TagEnd::Link | TagEnd::Image) => None,
        other => Some(other),
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_becomes_html_table() {
        let html = render_markdown(
            "### Plan\n\n| Keep | Sell |\n|---|---|\n| AAPL (10) | TSLA (5) |\n",
        );
        assert!(html.contains("<h3>Plan</h3>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Keep</th>"));
        assert!(html.contains("<td>AAPL (10)</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n\nHold <b>KO</b>.");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_links_keep_only_text() {
        let html = render_markdown("See [the filing](javascript:alert(1)) and ![chart](http://x/c.png).");
        assert!(!html.contains("href"));
        assert!(!html.contains("<img"));
        assert!(html.contains("the filing"));
        assert!(html.contains("chart"));
    }

    #[test]
    fn test_bold_and_lists() {
        let html = render_markdown("- **Buy** NVDA\n- **Sell** TSLA\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<strong>Buy</strong>"));
    }
}
