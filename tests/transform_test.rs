//! Integration tests for the markdown transform and HTML assembly,
//! exercised through the public API only.

use mdpress::render::{apply_page_numbers, build_document_html};
use mdpress::{transform, BrandColors, BrandingConfig, MeasurementResult, PageGeometry};

const SAMPLE: &str = "\
# Quarterly Report

Intro paragraph with ~~old numbers~~ and a task list:

- [x] collect data
- [ ] review

## Revenue

```
| Item | Q1 | Q2 |
|------|----|----|
| Widgets | $1,200 | $1,450.50 |
| Gadgets | $800 | $950 |
| Total | $2,000 | $2,400.50 |
```

## Outlook

More text.

### Details

Fine print.
";

#[test]
fn test_heading_ids_are_stable_and_in_document_order() {
    let first = transform(SAMPLE, &BrandColors::default());
    let second = transform(SAMPLE, &BrandColors::default());

    let ids: Vec<&str> = first.headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["heading-1", "heading-2", "heading-3", "heading-4"]);
    assert_eq!(first.html, second.html);

    for heading in &first.headings {
        assert!(
            first.html.contains(&format!("id=\"{}\"", heading.id)),
            "heading anchor {} missing from body HTML",
            heading.id
        );
    }
}

#[test]
fn test_fenced_tables_are_styled_with_brand_colors() {
    let colors = BrandColors::default();
    let doc = transform(SAMPLE, &colors);

    // Header row carries the brand background, numeric cells are
    // right-aligned, and the total row is highlighted.
    assert!(doc.html.contains("<table"));
    assert!(doc.html.contains(&colors.table_header.to_css()));
    assert!(doc.html.contains("text-align: right"));
    assert!(doc.html.contains("font-weight: bold"));
    assert!(doc.html.contains("Widgets"));
    assert!(!doc.html.contains("```"));
}

#[test]
fn test_ordinary_code_fences_stay_code() {
    let markdown = "\
# Doc

```rust
fn main() {}
```
";
    let doc = transform(markdown, &BrandColors::default());
    assert!(doc.html.contains("fn main"));
    assert!(doc.html.contains("<pre"));
    assert!(!doc.html.contains("<table"));
}

#[test]
fn test_strikethrough_and_tasklists_are_enabled() {
    let doc = transform(SAMPLE, &BrandColors::default());
    assert!(doc.html.contains("<del>old numbers</del>"));
    assert!(doc.html.contains("type=\"checkbox\""));
}

#[test]
fn test_toc_lists_only_numbered_level_one_and_two_headings() {
    let geometry = PageGeometry::default();
    let usable = geometry.usable_height_px();
    let mut doc = transform(SAMPLE, &BrandColors::default());

    // Synthetic measurement: one heading per page, except the h3 and
    // one unmeasured h2.
    let mut measurement = MeasurementResult {
        total: doc.headings.len(),
        ..Default::default()
    };
    measurement
        .offsets
        .insert("heading-1".into(), 0.0);
    measurement
        .offsets
        .insert("heading-2".into(), usable + 10.0);
    measurement
        .offsets
        .insert("heading-4".into(), 2.0 * usable + 10.0);
    measurement.measured = 3;

    apply_page_numbers(&mut doc.headings, &measurement, &geometry);

    let branding = BrandingConfig::default().with_client_name("Acme");
    let with_toc = build_document_html(&doc.html, &doc.headings, &branding, true);
    let without_toc = build_document_html(&doc.html, &doc.headings, &branding, false);

    assert!(with_toc.contains("Quarterly Report"));
    assert!(with_toc.contains("Revenue"));
    // The h3 never appears as a TOC entry, and the unmeasured h2 is
    // dropped rather than shown with a bogus page number.
    assert!(!without_toc.contains("class=\"toc\""));
    assert!(with_toc.contains("class=\"toc\""));

    let toc_start = with_toc.find("class=\"toc\"").unwrap();
    let toc_end = with_toc[toc_start..].find("</nav>").unwrap() + toc_start;
    let toc = &with_toc[toc_start..toc_end];
    assert!(toc.contains("Quarterly Report"));
    assert!(toc.contains("Revenue"));
    assert!(!toc.contains("Outlook"));
    assert!(!toc.contains("Details"));

    // First content page lands after the front matter.
    let first = doc.headings.iter().find(|h| h.id == "heading-1").unwrap();
    assert_eq!(first.page_number, Some(geometry.front_matter_pages));
    let second = doc.headings.iter().find(|h| h.id == "heading-2").unwrap();
    assert_eq!(second.page_number, Some(geometry.front_matter_pages + 1));
}

#[test]
fn test_page_numbers_are_monotonic_in_offset() {
    let geometry = PageGeometry::default();
    let mut previous = 0;
    for step in 0..50 {
        let y = step as f64 * 137.3;
        let page = geometry.page_number(y);
        assert!(page >= previous, "page numbers regressed at y={}", y);
        previous = page;
    }
}
