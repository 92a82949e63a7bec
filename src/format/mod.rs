//! Output formatting for pages (table, JSON, markdown, CSV, HTML).

use crate::config::OutputFormat;
use crate::page::{Element, Page};

/// Formats page state for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats every element of the page in id order.
    pub fn format_page(&self, page: &Page) -> String {
        if page.is_empty() {
            return match self.format {
                OutputFormat::Json => "{}".to_string(),
                OutputFormat::Csv => self.csv_header(),
                OutputFormat::Html => String::new(),
                _ => "No presentation targets.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_page(page),
            OutputFormat::Table => self.table_page(page),
            OutputFormat::Markdown => self.markdown_page(page),
            OutputFormat::Csv => self.csv_page(page),
            OutputFormat::Html => self.html_page(page),
        }
    }

    // JSON formatting

    fn json_page(&self, page: &Page) -> String {
        serde_json::to_string_pretty(page).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_page(&self, page: &Page) -> String {
        let id_width = page.elements().map(|(id, _)| id.len()).max().unwrap_or(0).max(2);
        let kind_width = 5;

        let mut lines = Vec::new();

        lines.push(format!("{:<id_width$}  {:<kind_width$}  {}", "ID", "Kind", "Value"));
        lines.push(format!("{:-<id_width$}  {:-<kind_width$}  {:-<20}", "", "", ""));

        for (id, element) in page.elements() {
            let value = if element.value().is_empty() { "-" } else { element.value() };
            lines.push(format!("{:<id_width$}  {:<kind_width$}  {}", id, element.kind(), value));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_page(&self, page: &Page) -> String {
        let mut lines = Vec::new();

        lines.push("| Target | Kind | Value |".to_string());
        lines.push("|--------|------|-------|".to_string());

        for (id, element) in page.elements() {
            let value = match element {
                Element::Image { src } if !src.is_empty() => format!("![{}]({})", id, src),
                other => other.value().replace('|', "\\|"),
            };
            lines.push(format!("| `{}` | {} | {} |", id, element.kind(), value));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,kind,value".to_string()
    }

    fn csv_page(&self, page: &Page) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for (id, element) in page.elements() {
            lines.push(format!(
                "{},{},{}",
                Self::csv_escape(id),
                element.kind(),
                Self::csv_escape(element.value())
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    // HTML formatting

    fn html_page(&self, page: &Page) -> String {
        page.elements()
            .map(|(id, element)| match element {
                Element::Image { src } => format!(
                    r#"<img id="{}" src="{}">"#,
                    Self::html_escape(id),
                    Self::html_escape(src)
                ),
                Element::Text { text } => format!(
                    r#"<span id="{}">{}</span>"#,
                    Self::html_escape(id),
                    Self::html_escape(text)
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn html_escape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PresentationTargets, PRODUCT_IMAGE, PRODUCT_PRICE, PRODUCT_TITLE};

    fn make_page() -> Page {
        let mut page = Page::product();
        page.set_image_source(PRODUCT_IMAGE, "image-app.png".to_string()).unwrap();
        page.set_text(PRODUCT_TITLE, "Widget, deluxe".to_string()).unwrap();
        page.set_text(PRODUCT_PRICE, "$9.99".to_string()).unwrap();
        page
    }

    #[test]
    fn test_table_format() {
        let output = Formatter::new(OutputFormat::Table).format_page(&make_page());

        assert!(output.starts_with("ID"));
        assert!(output.contains("product-image"));
        assert!(output.contains("image-app.png"));
        assert!(output.contains("$9.99"));
        // Empty description renders as a dash
        let description = output.lines().find(|l| l.starts_with("product-description")).unwrap();
        assert!(description.trim_end().ends_with('-'));
    }

    #[test]
    fn test_json_format() {
        let output = Formatter::new(OutputFormat::Json).format_page(&make_page());

        let parsed: Page = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, make_page());
        assert!(output.contains("\"product-title\""));
    }

    #[test]
    fn test_markdown_format() {
        let output = Formatter::new(OutputFormat::Markdown).format_page(&make_page());

        assert!(output.starts_with("| Target | Kind | Value |"));
        assert!(output.contains("| `product-image` | image | ![product-image](image-app.png) |"));
        assert!(output.contains("| `product-price` | text | $9.99 |"));
    }

    #[test]
    fn test_csv_format() {
        let output = Formatter::new(OutputFormat::Csv).format_page(&make_page());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "id,kind,value");
        assert_eq!(lines.len(), 5);
        assert!(lines.contains(&"product-title,text,\"Widget, deluxe\""));
        assert!(lines.contains(&"product-description,text,"));
    }

    #[test]
    fn test_html_format() {
        let mut page = make_page();
        page.set_text(PRODUCT_TITLE, "<b>Tom & \"Jerry\"</b>".to_string()).unwrap();

        let output = Formatter::new(OutputFormat::Html).format_page(&page);

        assert!(output.contains(r#"<img id="product-image" src="image-app.png">"#));
        assert!(output.contains(r#"<span id="product-price">$9.99</span>"#));
        assert!(output.contains(
            r#"<span id="product-title">&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;</span>"#
        ));
    }

    #[test]
    fn test_empty_page() {
        let page = Page::new();
        assert_eq!(Formatter::new(OutputFormat::Json).format_page(&page), "{}");
        assert_eq!(Formatter::new(OutputFormat::Csv).format_page(&page), "id,kind,value");
        assert_eq!(Formatter::new(OutputFormat::Html).format_page(&page), "");
        assert_eq!(
            Formatter::new(OutputFormat::Table).format_page(&page),
            "No presentation targets."
        );
    }
}
