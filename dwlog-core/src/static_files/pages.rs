/// Routes that map to a fixed HTML page. Each also answers with `.html`.
const PAGES: &[(&str, &str)] = &[
    ("/admin", "admin.html"),
    ("/stats", "stats.html"),
    ("/event_detail", "event_detail.html"),
    ("/alarm_detail", "alarm_detail.html"),
    ("/lgd_detail", "lgd_detail.html"),
    ("/node_detail", "node_detail.html"),
];

const INDEX: &str = "index.html";

/// File name of the page served at `path`, if it is a page route.
pub fn page_file(path: &str) -> Option<&'static str> {
    if path == "/" || path == "/index.html" {
        return Some(INDEX);
    }

    let route = path.strip_suffix(".html").unwrap_or(path);
    PAGES
        .iter()
        .find(|(prefix, _)| *prefix == route)
        .map(|(_, file)| *file)
}
