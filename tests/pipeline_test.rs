//! Integration tests for the generation pipeline.
//!
//! Everything except the ignored end-to-end test runs without a
//! browser: configuration failures must surface before any rendering
//! starts.

use std::fs;
use std::path::Path;

use mdpress::{
    generate_file, BrandingConfig, CompanyContact, Error, GenerateOptions, Pipeline,
};

fn write_logo(path: &Path) {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(64, 32));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn branding_with_logos(dir: &Path) -> BrandingConfig {
    let logo = dir.join("logo.png");
    write_logo(&logo);
    BrandingConfig {
        client_name: "Acme Corp".into(),
        company: CompanyContact {
            name: "Studio Nine".into(),
            website: "studionine.example".into(),
            email: "hello@studionine.example".into(),
            ..Default::default()
        },
        title_logo: logo.clone(),
        header_logo: logo,
        ..Default::default()
    }
}

#[test]
fn test_missing_header_logo_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.md");
    fs::write(&input, "# Report\n\nBody text.\n").unwrap();

    let mut branding = branding_with_logos(dir.path());
    branding.header_logo = dir.path().join("nope.png");

    let output = dir.path().join("report.pdf");
    let err = generate_file(&input, &output, branding).unwrap_err();
    assert!(matches!(err, Error::MissingAsset(_)));
    // A config failure never leaves a partial output file behind.
    assert!(!output.exists());
}

#[test]
fn test_empty_required_fields_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.md");
    fs::write(&input, "# Report\n").unwrap();

    let mut branding = branding_with_logos(dir.path());
    branding.company.email = String::new();

    let err = generate_file(&input, dir.path().join("out.pdf"), branding).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_invalid_color_in_json_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("branding.json");
    fs::write(
        &config_path,
        r##"{
            "client_name": "Acme",
            "company": {"name": "S", "website": "s.example", "email": "a@s.example"},
            "title_logo": "logo.png",
            "header_logo": "logo.png",
            "colors": {
                "primary": "not-a-color",
                "secondary": "#4a6fa5",
                "table_header": "#1f3a5f",
                "table_row_alt": "#f0f4f8"
            }
        }"##,
    )
    .unwrap();

    let err = BrandingConfig::from_json_file(&config_path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_json_config_round_trips_through_the_pipeline_options() {
    let dir = tempfile::tempdir().unwrap();
    let branding = branding_with_logos(dir.path())
        .with_title("Annual Review")
        .with_layout_validation(true);

    let config_path = dir.path().join("branding.json");
    fs::write(&config_path, serde_json::to_string(&branding).unwrap()).unwrap();

    let loaded = BrandingConfig::from_json_file(&config_path).unwrap();
    assert_eq!(loaded.title_override.as_deref(), Some("Annual Review"));
    assert!(loaded.validate_layout);
    assert_eq!(loaded.colors.primary.to_css(), "#1f3a5f");
    loaded.validate().unwrap();
}

// Full run against a real browser. Requires a local Chrome or
// Chromium installation; run with `cargo test -- --ignored`.
#[test]
#[ignore]
fn test_end_to_end_generates_a_merged_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.md");
    fs::write(
        &input,
        "\
# Annual Report

Opening remarks.

## Financials

```
| Item | Amount |
|------|--------|
| Revenue | $120,000 |
| Total | $120,000 |
```

## Outlook

Closing remarks.
",
    )
    .unwrap();

    let branding = branding_with_logos(dir.path()).with_layout_validation(true);
    let output = dir.path().join("report.pdf");
    let options = GenerateOptions::new(&input, branding).with_output(&output);
    let summary = Pipeline::new(options).run().unwrap();

    assert!(output.exists());
    assert_eq!(summary.output_path, output);
    // Title page plus at least one content page.
    assert!(summary.page_count >= 2);
    assert!(summary.file_size > 0);
    assert_eq!(summary.headings_total, 3);
    assert!(summary.toc_entries >= 1);
    let validation = summary.validation.expect("validator was enabled");
    assert!(!validation.pages_sampled.is_empty());

    let merged = lopdf::Document::load(&output).unwrap();
    assert_eq!(merged.get_pages().len() as u32, summary.page_count);
}
