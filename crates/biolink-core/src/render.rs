//! Public page rendering
//!
//! Builds the landing page from the settings and the visible links, in
//! stored order. Rendering is a pure function of its inputs; callers reload
//! both documents for every page view.

use crate::models::{LinkItem, Settings};

/// Built-in image served when no profile image is configured
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100"><rect width="100" height="100" fill="#e5e7eb"/><circle cx="50" cy="38" r="18" fill="#9ca3af"/><path d="M18 88c4-18 18-28 32-28s28 10 32 28z" fill="#9ca3af"/></svg>"##;

const STYLE: &str = "body{margin:0;min-height:100vh;display:flex;align-items:center;justify-content:center;\
font-family:system-ui,sans-serif;background:linear-gradient(#3b82f6,#9333ea);padding:1rem;box-sizing:border-box}\
main{width:100%;max-width:28rem}header{text-align:center;color:#fff}\
header img{width:100px;height:100px;border-radius:50%}h1{font-size:1.875rem;margin:.5rem 0}\
p{font-size:1.25rem;margin:0 0 2rem}a.entry{display:block;padding:1rem;margin-bottom:1rem;text-align:center;\
background:#fff;border-radius:.5rem;color:#111;text-decoration:none}a.entry:hover{background:#f3f4f6}";

/// Links that appear on the public page, in stored order
pub fn visible_links(links: &[LinkItem]) -> Vec<&LinkItem> {
    links.iter().filter(|link| !link.hidden).collect()
}

/// The data behind one render of the public page
#[derive(Debug)]
pub struct PublicPage<'a> {
    settings: &'a Settings,
    entries: Vec<&'a LinkItem>,
}

impl<'a> PublicPage<'a> {
    pub fn new(settings: &'a Settings, links: &'a [LinkItem]) -> Self {
        Self {
            settings,
            entries: visible_links(links),
        }
    }

    /// Profile image source, placeholder when unset
    pub fn profile_image(&self) -> &str {
        self.settings.profile_image_or_placeholder()
    }

    /// Render the full HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        html.push_str(&format!(
            "<title>{}</title>\n",
            html_escape(&self.settings.title)
        ));
        html.push_str(&format!("<style>{}</style>\n", STYLE));
        html.push_str("</head>\n<body>\n<main>\n<header>\n");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Profile\" width=\"100\" height=\"100\">\n",
            html_escape(self.profile_image())
        ));
        html.push_str(&format!(
            "<h1>{}</h1>\n",
            html_escape(&self.settings.title)
        ));
        html.push_str(&format!(
            "<p>{}</p>\n",
            html_escape(&self.settings.subtitle)
        ));
        html.push_str("</header>\n<nav>\n");

        for link in &self.entries {
            html.push_str(&format!(
                "<a class=\"entry\" href=\"{}\">{}</a>\n",
                html_escape(&link.url),
                html_escape(&link.title)
            ));
        }

        html.push_str("</nav>\n</main>\n</body>\n</html>\n");
        html
    }
}

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
    use crate::models::PLACEHOLDER_IMAGE;

    fn entry_titles<'a>(page: &'a PublicPage<'_>) -> Vec<&'a str> {
        page.entries.iter().map(|link| link.title.as_str()).collect()
    }

    fn links() -> Vec<LinkItem> {
        let mut hidden = LinkItem::with_id("2", "B", "https://b.example");
        hidden.hidden = true;
        vec![LinkItem::with_id("1", "A", "https://a.example"), hidden]
    }

    #[test]
    fn test_hidden_links_are_filtered() {
        let settings = Settings::new("T", "S", "");
        let links = links();
        let page = PublicPage::new(&settings, &links);

        assert_eq!(entry_titles(&page), vec!["A"]);
        let html = page.to_html();
        assert!(html.contains(">A</a>"));
        assert!(!html.contains("https://b.example"));
    }

    #[test]
    fn test_order_is_preserved() {
        let settings = Settings::default();
        let links = vec![
            LinkItem::with_id("3", "Third", "https://3.example"),
            LinkItem::with_id("1", "First", "https://1.example"),
            LinkItem::with_id("2", "Second", "https://2.example"),
        ];
        let page = PublicPage::new(&settings, &links);
        assert_eq!(entry_titles(&page), vec!["Third", "First", "Second"]);

        let html = page.to_html();
        let third = html.find("Third").unwrap();
        let first = html.find("First").unwrap();
        assert!(third < first);
    }

    #[test]
    fn test_placeholder_image() {
        let settings = Settings::new("T", "S", "");
        let page = PublicPage::new(&settings, &[]);
        assert_eq!(page.profile_image(), PLACEHOLDER_IMAGE);
        assert!(page
            .to_html()
            .contains(&format!("src=\"{}\"", PLACEHOLDER_IMAGE)));
    }

    #[test]
    fn test_header_from_settings() {
        let settings = Settings::new("Ada", "Engineer", "https://img.example/ada.png");
        let page = PublicPage::new(&settings, &[]);
        let html = page.to_html();

        assert!(html.contains("<h1>Ada</h1>"));
        assert!(html.contains("<p>Engineer</p>"));
        assert!(html.contains("src=\"https://img.example/ada.png\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let settings = Settings::new("<script>", "a & b", "");
        let links = vec![LinkItem::with_id(
            "1",
            "\"quoted\"",
            "https://x.example/?a=1&b=2",
        )];
        let html = PublicPage::new(&settings, &links).to_html();

        assert!(html.contains("<h1>&lt;script&gt;</h1>"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(html.contains("href=\"https://x.example/?a=1&amp;b=2\""));
    }
}
