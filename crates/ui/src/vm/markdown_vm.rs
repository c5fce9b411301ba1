use std::collections::{HashMap, HashSet};

/// Renders topic explanations and guide pages. Output is sanitised and safe
/// for `dangerous_inner_html`.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let normalized = normalize_markdown(input);
    let parser = pulldown_cmark::Parser::new_ext(&normalized, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "del", "code", "pre", "blockquote",
        "ul", "ol", "li", "a", "h1", "h2", "h3", "h4", "hr", "table", "thead", "tbody", "tr",
        "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .link_rel(Some("noreferrer"))
        .clean(html)
        .to_string()
}

/// Normalises line endings and collapses runs of blank lines.
#[must_use]
pub fn normalize_markdown(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut blank_streak = 0usize;

    for line in normalized.split('\n') {
        let trimmed = line.trim_end_matches([' ', '\t']);
        if trimmed.is_empty() {
            blank_streak += 1;
            if blank_streak > 1 {
                continue;
            }
        } else {
            blank_streak = 0;
        }
        lines.push(trimmed);
    }

    let mut output = lines.join("\n");
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, normalize_markdown};

    #[test]
    fn normalize_markdown_trims_and_collapses_blank_lines() {
        let input = "Line one  \r\n\r\n\r\nLine two\t\r\n\r\n";
        let output = normalize_markdown(input);
        assert_eq!(output, "Line one\n\nLine two\n");
    }

    #[test]
    fn markdown_to_html_sanitizes_links() {
        let html = markdown_to_html("[Link](javascript:alert(1))");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn headings_lists_and_code_survive() {
        let html = markdown_to_html("### Window\n\n* expand right\n* shrink left\n\n`O(n)`");
        assert!(html.contains("<h3>Window</h3>"), "{html}");
        assert!(html.contains("<li>expand right</li>"), "{html}");
        assert!(html.contains("<code>O(n)</code>"), "{html}");
    }

    #[test]
    fn raw_script_is_removed() {
        let html = markdown_to_html("hello <script>alert(1)</script>");
        assert!(html.contains("hello"));
        assert!(!html.contains("script"));
    }
}
