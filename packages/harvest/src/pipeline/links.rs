//! Index and detail page parsing.
//!
//! The job board renders listings as `li.job_listing` elements; detail
//! pages carry the description in `div.job_description` and both dates
//! in `ul.meta`. Parsing is selector-based and tolerant: a listing
//! missing a piece of markup yields empty strings, not an error.

use scraper::{Html, Node, Selector};
use url::Url;

use crate::types::{ListingPage, ListingSummary};

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True for links the pipeline will follow. Excludes `mailto:`,
/// `javascript:` and anything else that is not plain http(s).
fn is_followable(link: &str) -> bool {
    matches!(Url::parse(link), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}

/// Parse the index page into listing summaries, in page order.
///
/// Entries without an http(s) detail link are discarded.
pub fn extract_listings(index_html: &str) -> Vec<ListingSummary> {
    let document = Html::parse_document(index_html);
    let listing_sel = Selector::parse("li.job_listing").unwrap();
    let title_sel = Selector::parse("h3").unwrap();
    let link_sel = Selector::parse("a").unwrap();
    let location_sel = Selector::parse("div.location").unwrap();
    let company_sel = Selector::parse("div.location strong").unwrap();
    let job_type_sel = Selector::parse("li.job-type").unwrap();

    let mut listings = Vec::new();
    for item in document.select(&listing_sel) {
        let link = item
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default()
            .to_string();
        if !is_followable(&link) {
            tracing::debug!("Skipping non-http listing link: {}", link);
            continue;
        }

        let title = item
            .select(&title_sel)
            .next()
            .map(|h| clean_text(&h.text().collect::<String>()))
            .unwrap_or_default();
        let company = item
            .select(&company_sel)
            .next()
            .map(|s| clean_text(&s.text().collect::<String>()))
            .unwrap_or_default();
        let location = item
            .select(&location_sel)
            .next()
            .map(|d| clean_text(&d.text().collect::<String>()))
            .map(|full| clean_text(&full.replacen(&company, "", 1)))
            .unwrap_or_default();
        let job_type = item
            .select(&job_type_sel)
            .next()
            .map(|t| clean_text(&t.text().collect::<String>()))
            .unwrap_or_default();

        listings.push(ListingSummary {
            title,
            link,
            company,
            location,
            job_type,
        });
    }
    listings
}

/// Parse a listing detail page.
///
/// Links inside the description body are resolved against the listing
/// URL, then filtered to http(s).
pub fn parse_listing_page(detail_html: &str, listing_url: &str) -> ListingPage {
    let document = Html::parse_document(detail_html);
    let description_sel = Selector::parse("div.job_description").unwrap();
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let meta_date_sel = Selector::parse("ul.meta li.date-posted").unwrap();

    let mut page = ListingPage::default();

    if let Some(body) = document.select(&description_sel).next() {
        page.description = body.text().collect::<String>().trim().to_string();

        let base = Url::parse(listing_url).ok();
        for anchor in body.select(&anchor_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let resolved = match Url::parse(href) {
                Ok(url) => url.to_string(),
                Err(url::ParseError::RelativeUrlWithoutBase) => match &base {
                    Some(base) => match base.join(href) {
                        Ok(url) => url.to_string(),
                        Err(_) => continue,
                    },
                    None => continue,
                },
                Err(_) => continue,
            };
            if is_followable(&resolved) {
                page.additional_links.push(resolved);
            }
        }
    }

    let mut dates = document.select(&meta_date_sel);
    if let Some(posted) = dates.next() {
        page.posted_date = clean_text(&posted.text().collect::<String>());
    }
    if let Some(expires) = dates.next() {
        let raw = clean_text(&expires.text().collect::<String>());
        page.expiration_date = raw.replacen("Expires on:", "", 1).trim().to_string();
    }

    page
}

/// Extract readable text from an arbitrary HTML page, dropping script
/// and style contents. Used for additional-link pages.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    collect_text(document.tree.root(), &mut out);
    clean_text(&out)
}

fn collect_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Element(element) if matches!(element.name(), "script" | "style") => {}
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            _ => collect_text(child, out),
        }
    }
}
