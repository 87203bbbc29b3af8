//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing all pages for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{config::Site, output::OutputDocument, utils::date};
use chrono::{DateTime, Utc};
use quick_xml::escape::escape;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const SITEMAP_MEDIA_TYPE: &str = "application/xml";

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Site path of the location
    pub path: String,
    /// Newest content date shown on the location, if any
    pub lastmod: Option<DateTime<Utc>>,
}

/// Build the sitemap document. Entries are listed in the given order.
pub fn build_sitemap(site: &Site, entries: &[SitemapEntry], path: &str) -> OutputDocument {
    let mut xml = String::with_capacity(128 * (entries.len() + 1));

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        let loc = site.url_for(&entry.path);
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(loc.as_str())));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date::format_ymd(lastmod)));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    OutputDocument::new(path.trim_matches('/'), xml.into_bytes(), SITEMAP_MEDIA_TYPE)
}
