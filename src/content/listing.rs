//! Directory listing markup
//!
//! Pure function from a request path and entry names to an HTML page, kept
//! free of filesystem and HTTP concerns so it can be tested in isolation.

/// Render an HTML listing page for a directory.
///
/// Each entry becomes a link relative to the current request path. A root
/// request path renders links without a duplicated leading slash.
pub fn render_directory_listing(request_path: &str, entries: &[String]) -> String {
    let base = if request_path == "/" {
        ""
    } else {
        request_path
    };

    let items: String = entries
        .iter()
        .map(|name| format!("<li><a href=\"{base}/{name}\">{name}</a></li>"))
        .collect();

    format!(
        "<html>\n<head><title>Directory: {request_path}</title></head>\n<body>\n\
         <h1>Directory: {request_path}</h1>\n<ul>{items}</ul>\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_has_no_double_slash() {
        let entries = vec!["a.txt".to_string(), "b".to_string()];
        let html = render_directory_listing("/", &entries);
        assert!(html.contains("<a href=\"/a.txt\">a.txt</a>"));
        assert!(html.contains("<a href=\"/b\">b</a>"));
        assert!(!html.contains("//a.txt"));
    }

    #[test]
    fn test_nested_path_links_are_relative_to_request() {
        let entries = vec!["style.css".to_string()];
        let html = render_directory_listing("/assets", &entries);
        assert!(html.contains("<a href=\"/assets/style.css\">style.css</a>"));
    }

    #[test]
    fn test_one_link_per_entry() {
        let entries = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let html = render_directory_listing("/", &entries);
        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("<title>Directory: /</title>"));
    }

    #[test]
    fn test_empty_directory() {
        let html = render_directory_listing("/empty", &[]);
        assert!(html.contains("<ul></ul>"));
    }
}
