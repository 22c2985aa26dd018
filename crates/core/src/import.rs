#![forbid(unsafe_code)]

//! Reader for Netscape bookmark files (`NETSCAPE-Bookmark-file-1`), the export
//! format of every mainstream browser.

use crate::catalog::ItemKind;

const READING_LIST_FOLDER: &str = "reading list";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedBookmark {
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    /// `ADD_DATE` of the link, converted from seconds to milliseconds.
    pub added_at_ms: Option<i64>,
    pub kind: ItemKind,
}

/// Returns the http(s) links of a bookmark export in document order.
///
/// The innermost enclosing folder, lowercased, becomes the bookmark's only tag.
/// A folder named "Reading List" never becomes a tag; links anywhere beneath one
/// are reading-list items. A link whose title is blank is titled by its url.
pub fn parse_bookmarks_html(html: &str) -> Vec<ParsedBookmark> {
    let mut out = Vec::new();
    let mut folders: Vec<String> = Vec::new();

    for line in html.lines() {
        let trimmed = line.trim();
        // ASCII lowercasing keeps byte offsets aligned with `trimmed`.
        let lower = trimmed.to_ascii_lowercase();

        if let Some(name) = folder_name(trimmed, &lower) {
            folders.push(name.to_string());
            continue;
        }

        if let Some(Link { url, title, add_date }) = link(trimmed, &lower) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                continue;
            }
            let tags = folders
                .last()
                .map(|folder| folder.to_lowercase())
                .filter(|folder| folder != READING_LIST_FOLDER)
                .into_iter()
                .collect();
            let in_reading_list = folders
                .iter()
                .any(|folder| folder.to_lowercase() == READING_LIST_FOLDER);
            let title = decode_entities(title);
            out.push(ParsedBookmark {
                title: if title.trim().is_empty() {
                    url.to_string()
                } else {
                    title
                },
                url: url.to_string(),
                tags,
                added_at_ms: add_date.and_then(|secs| secs.checked_mul(1000)),
                kind: if in_reading_list {
                    ItemKind::ReadingList
                } else {
                    ItemKind::Bookmark
                },
            });
            continue;
        }

        if lower.starts_with("</dl>") {
            folders.pop();
        }
    }

    out
}

fn folder_name<'a>(line: &'a str, lower: &str) -> Option<&'a str> {
    const OPEN: &str = "<dt><h3";
    if !lower.starts_with(OPEN) {
        return None;
    }
    let start = OPEN.len() + lower[OPEN.len()..].find('>')? + 1;
    let end = start + lower[start..].find("</h3>")?;
    if end == start {
        return None;
    }
    Some(&line[start..end])
}

struct Link<'a> {
    url: &'a str,
    title: &'a str,
    add_date: Option<i64>,
}

fn link<'a>(line: &'a str, lower: &str) -> Option<Link<'a>> {
    const OPEN: &str = "<dt><a";
    const HREF: &str = "href=\"";
    let rest = lower.strip_prefix(OPEN)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let attrs = OPEN.len() + (rest.len() - rest.trim_start().len());
    if !lower[attrs..].starts_with(HREF) {
        return None;
    }
    let url_start = attrs + HREF.len();
    let url_end = url_start + lower[url_start..].find('"')?;
    if url_end == url_start {
        return None;
    }
    let title_start = url_end + lower[url_end..].find('>')? + 1;
    let title_end = title_start + lower[title_start..].find("</a>")?;
    if title_end == title_start {
        return None;
    }
    Some(Link {
        url: &line[url_start..url_end],
        title: &line[title_start..title_end],
        add_date: add_date(&lower[url_end..title_start]),
    })
}

fn add_date(attrs: &str) -> Option<i64> {
    const ADD_DATE: &str = "add_date=\"";
    let start = attrs.find(ADD_DATE)? + ADD_DATE.len();
    let len = attrs[start..].find('"')?;
    attrs[start..start + len].parse().ok()
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&#39;", "'")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000" PERSONAL_TOOLBAR_FOLDER="true">Bookmarks bar</H3>
    <DL><p>
        <DT><A HREF="https://www.sqlite.org/docs.html" ADD_DATE="1700000001">SQLite Documentation</A>
        <DT><H3 ADD_DATE="1700000002">Rust</H3>
        <DL><p>
            <DT><A HREF="https://doc.rust-lang.org/book/" ADD_DATE="1700000003">The Rust &amp; You</A>
            <DT><A HREF="chrome://settings">Settings</A>
        </DL><p>
        <DT><A HREF="https://go.dev/blog/pipelines">Go &#39;Pipelines&#39;</A>
    </DL><p>
    <DT><H3>Reading List</H3>
    <DL><p>
        <DT><A HREF="http://example.com/later">Later &lt;maybe&gt;</A>
    </DL><p>
</DL><p>
"#;

    #[test]
    fn folders_become_lowercased_tags() {
        let parsed = parse_bookmarks_html(EXPORT);
        let summary: Vec<(&str, Vec<&str>)> = parsed
            .iter()
            .map(|b| (b.url.as_str(), b.tags.iter().map(String::as_str).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("https://www.sqlite.org/docs.html", vec!["bookmarks bar"]),
                ("https://doc.rust-lang.org/book/", vec!["rust"]),
                ("https://go.dev/blog/pipelines", vec!["bookmarks bar"]),
                ("http://example.com/later", vec![]),
            ]
        );
    }

    #[test]
    fn titles_are_entity_decoded() {
        let parsed = parse_bookmarks_html(EXPORT);
        assert_eq!(parsed[1].title, "The Rust & You");
        assert_eq!(parsed[2].title, "Go 'Pipelines'");
        assert_eq!(parsed[3].title, "Later <maybe>");
    }

    #[test]
    fn non_http_links_and_noise_are_skipped() {
        let parsed = parse_bookmarks_html(
            "<DT><A HREF=\"\">Empty</A>\n<DT><AHREF=\"https://x\">Glued</A>\n<p>text</p>\n<DT><A HREF=\"ftp://host/file\">Ftp</A>",
        );
        assert!(parsed.is_empty());
    }

    #[test]
    fn add_date_and_reading_list_kind_are_carried() {
        let parsed = parse_bookmarks_html(EXPORT);
        assert_eq!(parsed[0].added_at_ms, Some(1_700_000_001_000));
        assert_eq!(parsed[2].added_at_ms, None);
        assert_eq!(parsed[0].kind, ItemKind::Bookmark);
        assert_eq!(parsed[3].kind, ItemKind::ReadingList);
    }

    #[test]
    fn nested_folder_under_reading_list_is_still_reading_list() {
        let parsed = parse_bookmarks_html(
            "<DT><H3>Reading List</H3>\n<DL><p>\n<DT><H3>Papers</H3>\n<DL><p>\n\
             <DT><A HREF=\"https://arxiv.org/abs/1\">Paper</A>\n</DL><p>\n</DL><p>",
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].tags, vec!["papers".to_string()]);
        assert_eq!(parsed[0].kind, ItemKind::ReadingList);
    }

    #[test]
    fn blank_title_falls_back_to_url() {
        let parsed = parse_bookmarks_html("<DT><A HREF=\"https://blank.example/\">   </A>");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "https://blank.example/");
    }
}
