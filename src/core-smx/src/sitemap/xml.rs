//! Rendering of the two sitemap document shapes.

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::sitemap::entry::UrlEntry;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<sitemap>` element of the sitemap-index document.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexChild {
    pub loc: String,
    pub lastmod: NaiveDate,
}

#[derive(Debug, thiserror::Error)]
pub enum XmlRenderError {
    #[error("Failed to write XML: {0}")]
    Write(#[from] quick_xml::Error),
    #[error("Rendered XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn date_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Renders a URL-set document. Text content is escaped on write, so slugs
/// or titles carrying `& < > " '` stay well-formed.
pub fn render_url_set(entries: &[UrlEntry]) -> Result<String, XmlRenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|w| -> Result<(), quick_xml::Error> {
            for entry in entries {
                w.create_element("url")
                    .write_inner_content(|w| -> Result<(), quick_xml::Error> {
                        w.create_element("loc").write_text_content(BytesText::new(&entry.loc))?;
                        if let Some(date) = entry.lastmod {
                            w.create_element("lastmod")
                                .write_text_content(BytesText::new(&date_text(date)))?;
                        }
                        w.create_element("changefreq")
                            .write_text_content(BytesText::new(entry.changefreq.as_str()))?;
                        w.create_element("priority")
                            .write_text_content(BytesText::new(&entry.priority_label()))?;
                        Ok(())
                    })?;
            }
            Ok(())
        })?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Renders the sitemap-index document enumerating the child documents.
pub fn render_sitemap_index(children: &[IndexChild]) -> Result<String, XmlRenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("sitemapindex")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|w| -> Result<(), quick_xml::Error> {
            for child in children {
                w.create_element("sitemap")
                    .write_inner_content(|w| -> Result<(), quick_xml::Error> {
                        w.create_element("loc").write_text_content(BytesText::new(&child.loc))?;
                        w.create_element("lastmod")
                            .write_text_content(BytesText::new(&date_text(child.lastmod)))?;
                        Ok(())
                    })?;
            }
            Ok(())
        })?;

    Ok(String::from_utf8(writer.into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use quick_xml::Reader;
    use quick_xml::events::Event;

    use crate::sitemap::entry::ChangeFreq;

    fn entry(loc: &str) -> UrlEntry {
        UrlEntry {
            loc: loc.to_string(),
            lastmod: NaiveDate::from_ymd_opt(2024, 6, 15),
            changefreq: ChangeFreq::Weekly,
            priority: 0.85,
        }
    }

    /// Walks the document with the streaming reader; returns the tag names
    /// seen. Panics on malformed XML, which is the actual assertion.
    fn parse_tags(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut tags = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).expect("well-formed XML") {
                Event::Start(e) => tags.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap()),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        tags
    }

    #[test]
    fn test_render_url_set_structure() {
        let xml = render_url_set(&[entry("https://dentamap.com/california/"), entry("https://dentamap.com/")])
            .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://dentamap.com/california/</loc>"));
        assert!(xml.contains("<lastmod>2024-06-15</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.85</priority>"));

        let tags = parse_tags(&xml);
        assert_eq!(tags.iter().filter(|t| *t == "url").count(), 2);
        assert_eq!(tags.iter().filter(|t| *t == "loc").count(), 2);
    }

    #[test]
    fn test_render_url_set_omits_missing_lastmod() {
        let mut e = entry("https://dentamap.com/");
        e.lastmod = None;
        let xml = render_url_set(&[e]).unwrap();
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_render_empty_url_set_is_well_formed() {
        let xml = render_url_set(&[]).unwrap();
        assert!(xml.contains("urlset"));
        assert!(parse_tags(&xml).iter().all(|t| t == "urlset"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let e = entry("https://dentamap.com/blog/q&a-\"<teeth>'-guide/");
        let xml = render_url_set(&[e]).unwrap();

        assert!(xml.contains("q&amp;a-"));
        assert!(!xml.contains("q&a-"));
        assert!(xml.contains("&lt;teeth&gt;"));

        // The document still parses, and the reader unescapes back to the input.
        let mut reader = Reader::from_str(&xml);
        let mut buf = Vec::new();
        let mut loc_text = None;
        loop {
            match reader.read_event_into(&mut buf).expect("well-formed XML") {
                Event::Start(tag) if tag.name().as_ref() == b"loc" => {
                    if let Ok(Event::Text(text)) = reader.read_event_into(&mut buf) {
                        loc_text = Some(text.unescape().unwrap().to_string());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        assert_eq!(loc_text.as_deref(), Some("https://dentamap.com/blog/q&a-\"<teeth>'-guide/"));
    }

    #[test]
    fn test_render_sitemap_index() {
        let children = vec![
            IndexChild {
                loc: "https://dentamap.com/sitemap.xml?type=static".to_string(),
                lastmod: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            },
            IndexChild {
                loc: "https://dentamap.com/sitemap.xml?type=cities&chunk=1".to_string(),
                lastmod: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            },
        ];

        let xml = render_sitemap_index(&children).unwrap();
        assert!(xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        // The & in the query string must be escaped for the index to parse.
        assert!(xml.contains("type=cities&amp;chunk=1"));

        let tags = parse_tags(&xml);
        assert_eq!(tags.iter().filter(|t| *t == "sitemap").count(), 2);
        assert_eq!(tags.iter().filter(|t| *t == "lastmod").count(), 2);
    }
}
