//! Post collection: ordering, homepage listing, and sitemap.
//!
//! Both aggregate artifacts are rendered from the same sorted slice, so the
//! homepage and `sitemap.xml` always agree on order.
//!
//! ## Ordering
//!
//! Newest first by parsed front matter date. Posts without a parseable date
//! go after every dated post. Ties keep discovery (file name) order.
//!
//! ## Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/</loc>
//!     <lastmod>2025-01-01T12:00:00.000Z</lastmod>
//!   </url>
//!   <url>
//!     <loc>https://example.com/blog/hello/</loc>
//!     <lastmod>2024-06-01T00:00:00.000Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::date;
use crate::template::{self, Fields};
use crate::types::Post;
use chrono::{DateTime, Utc};
use maud::{PreEscaped, html};
use std::cmp::Ordering;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Homepage template placeholder that receives the listing.
pub const POSTS_PLACEHOLDER: &str = "posts";

/// Sort newest first; undated posts last, ties stable.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| std::cmp::Reverse(SortDate(p.published())));
}

/// `Option<DateTime>` ordered so that `None` is the oldest possible date.
#[derive(PartialEq, Eq)]
struct SortDate(Option<DateTime<Utc>>);

impl PartialOrd for SortDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

// ============================================================================
// Homepage
// ============================================================================

/// Render one listing entry per post, in the given order.
///
/// Title, description and date are inserted as written, the same way the post
/// template receives them, so front matter can carry entities or inline HTML.
pub fn render_post_list(posts: &[Post], base_path: &str) -> String {
    posts
        .iter()
        .map(|post| render_post_entry(post, base_path))
        .collect()
}

fn render_post_entry(post: &Post, base_path: &str) -> String {
    html! {
        div style="margin-bottom: 2rem;" {
            h2 style="margin-bottom: 0.5rem;" {
                a href={ (base_path) "/" (post.slug) "/" } style="color: inherit; text-decoration: none;" {
                    (PreEscaped(post.title()))
                }
            }
            p style="color: #6b6b6b; margin-top: 0;" { (PreEscaped(post.description())) }
            small style="color: #6b6b6b;" {
                (PreEscaped(post.date())) " · " (post.read_time) " min read"
            }
        }
    }
    .into_string()
}

/// Substitute the listing into the homepage template's `{{ posts }}`.
pub fn render_homepage(index_template: &str, posts: &[Post], base_path: &str) -> String {
    let fields = Fields::from([(POSTS_PLACEHOLDER, render_post_list(posts, base_path))]);
    template::render(index_template, &fields)
}

// ============================================================================
// Sitemap
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    /// Site root first, then one entry per post.
    fn from_posts(posts: &[Post], site_url: &str, built_at: &DateTime<Utc>) -> Self {
        let site_url = site_url.trim_end_matches('/');
        let root = UrlEntry {
            loc: format!("{site_url}/"),
            lastmod: Some(date::to_iso_string(built_at)),
        };
        let urls = std::iter::once(root)
            .chain(posts.iter().map(|post| UrlEntry {
                loc: format!("{site_url}/{}/", post.slug),
                lastmod: post.published().as_ref().map(date::to_iso_string),
            }))
            .collect();

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 128);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Render `sitemap.xml` for the site root plus every post.
pub fn render_sitemap(posts: &[Post], site_url: &str, built_at: &DateTime<Utc>) -> String {
    Sitemap::from_posts(posts, site_url, built_at).into_xml()
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::FrontMatter;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn post(slug: &str, date: Option<&str>) -> Post {
        Post {
            meta: FrontMatter {
                title: Some(format!("Title {slug}")),
                description: Some(format!("About {slug}")),
                date: date.map(str::to_string),
                ..Default::default()
            },
            slug: slug.to_string(),
            read_time: 3,
            source: PathBuf::from(format!("content/{slug}.md")),
        }
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    fn built_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn sorts_newest_first() {
        let mut posts = vec![
            post("jan", Some("2024-01-01")),
            post("jun", Some("2024-06-01")),
            post("dec", Some("2023-12-01")),
        ];
        sort_posts(&mut posts);
        assert_eq!(slugs(&posts), ["jun", "jan", "dec"]);
    }

    #[test]
    fn undated_posts_sort_last_in_discovery_order() {
        let mut posts = vec![
            post("garbage", Some("someday")),
            post("old", Some("2020-01-01")),
            post("missing", None),
            post("new", Some("2024-01-01")),
        ];
        sort_posts(&mut posts);
        assert_eq!(slugs(&posts), ["new", "old", "garbage", "missing"]);
    }

    #[test]
    fn equal_dates_keep_order() {
        let mut posts = vec![
            post("b", Some("2024-01-01")),
            post("a", Some("2024-01-01")),
        ];
        sort_posts(&mut posts);
        assert_eq!(slugs(&posts), ["b", "a"]);
    }

    #[test]
    fn post_entry_links_under_base_path() {
        let html = render_post_list(&[post("hello", Some("2024-06-01"))], "/blog");
        assert!(html.contains(r#"href="/blog/hello/""#));
        assert!(html.contains("Title hello"));
        assert!(html.contains("About hello"));
        assert!(html.contains("2024-06-01 · 3 min read"));
    }

    #[test]
    fn post_entry_at_site_root() {
        let html = render_post_list(&[post("hello", None)], "");
        assert!(html.contains(r#"href="/hello/""#));
    }

    #[test]
    fn post_entry_keeps_front_matter_markup() {
        let mut p = post("x", None);
        p.meta.title = Some("Rust &amp; Go".to_string());
        p.meta.description = Some("Notes on <em>borrowing</em>".to_string());
        let html = render_post_list(&[p], "");
        assert!(html.contains(">Rust &amp; Go</a>"));
        assert!(html.contains("Notes on <em>borrowing</em>"));
    }

    #[test]
    fn post_entry_escapes_slug_in_href() {
        let html = render_post_list(&[post("a\"b", None)], "");
        assert!(html.contains(r#"href="/a&quot;b/""#));
    }

    #[test]
    fn post_entry_uses_title_default() {
        let mut p = post("x", None);
        p.meta.title = None;
        assert!(render_post_list(&[p], "").contains("Untitled"));
    }

    #[test]
    fn homepage_substitutes_listing_in_order() {
        let mut posts = vec![
            post("jan", Some("2024-01-01")),
            post("jun", Some("2024-06-01")),
        ];
        sort_posts(&mut posts);
        let html = render_homepage("<main>{{ posts }}</main>", &posts, "/blog");
        assert!(html.starts_with("<main><div"));
        assert!(html.ends_with("</div></main>"));
        let jun = html.find("/blog/jun/").unwrap();
        let jan = html.find("/blog/jan/").unwrap();
        assert!(jun < jan);
    }

    #[test]
    fn homepage_with_no_posts() {
        assert_eq!(render_homepage("<ul>{{ posts }}</ul>", &[], ""), "<ul></ul>");
    }

    #[test]
    fn sitemap_empty_has_root_only() {
        let xml = render_sitemap(&[], "https://example.com/blog", &built_at());

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://example.com/blog/</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01T12:00:00.000Z</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_lists_posts_after_root() {
        let posts = vec![post("jun", Some("2024-06-01")), post("jan", Some("2024-01-01"))];
        let xml = render_sitemap(&posts, "https://example.com/blog/", &built_at());

        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("<loc>https://example.com/blog/</loc>").count(), 1);
        let root = xml.find("<loc>https://example.com/blog/</loc>").unwrap();
        let jun = xml.find("<loc>https://example.com/blog/jun/</loc>").unwrap();
        let jan = xml.find("<loc>https://example.com/blog/jan/</loc>").unwrap();
        assert!(root < jun && jun < jan);
        assert!(xml.contains("<lastmod>2024-06-01T00:00:00.000Z</lastmod>"));
    }

    #[test]
    fn sitemap_omits_lastmod_for_undated_post() {
        let xml = render_sitemap(&[post("nodate", None)], "https://example.com", &built_at());
        assert_eq!(xml.matches("<lastmod>").count(), 1);
        assert!(xml.contains("<loc>https://example.com/nodate/</loc>"));
    }

    #[test]
    fn sitemap_escapes_loc() {
        let xml = render_sitemap(&[post("a&b", None)], "https://example.com", &built_at());
        assert!(xml.contains("<loc>https://example.com/a&amp;b/</loc>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;");
    }
}
