//! The generation pipeline: a linear state machine with no branching
//! except the optional layout validator.
//!
//! `Idle -> Transforming -> Measuring -> Mapping -> RenderingTitle ->
//! RenderingContent -> [Validating] -> Assembling -> Done | Failed`.
//! Any step failure transitions to `Failed`; there is no retry or
//! resume. The browser session is scoped to the run and closed on
//! every exit path.

use crate::assemble;
use crate::assets;
use crate::config::BrandingConfig;
use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::model::GenerationSummary;
use crate::render::{
    apply_page_numbers, build_document_html, measure_heading_positions, render_content,
    render_title_page, validate_layout, BrowserSession,
};
use crate::transform;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Transforming,
    Measuring,
    Mapping,
    RenderingTitle,
    RenderingContent,
    Validating,
    Assembling,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Transforming => "transforming markdown",
            Stage::Measuring => "measuring heading positions",
            Stage::Mapping => "mapping page numbers",
            Stage::RenderingTitle => "rendering title page",
            Stage::RenderingContent => "rendering content",
            Stage::Validating => "validating layout",
            Stage::Assembling => "assembling PDF",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Markdown input file.
    pub input: PathBuf,

    /// Output PDF path. Defaults to the input path with a `.pdf`
    /// extension.
    pub output: Option<PathBuf>,

    /// Branding configuration.
    pub branding: BrandingConfig,

    /// Page geometry shared by the mapper and the print call.
    pub geometry: PageGeometry,
}

impl GenerateOptions {
    /// Create options for an input file with default geometry.
    pub fn new(input: impl Into<PathBuf>, branding: BrandingConfig) -> Self {
        Self {
            input: input.into(),
            output: None,
            branding,
            geometry: PageGeometry::default(),
        }
    }

    /// Set an explicit output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Override the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Resolved output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("pdf"))
    }
}

/// A single-shot generation pipeline.
pub struct Pipeline {
    options: GenerateOptions,
    stage: Stage,
    observer: Option<Box<dyn FnMut(Stage)>>,
}

impl Pipeline {
    /// Create a pipeline for the given options.
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            stage: Stage::Idle,
            observer: None,
        }
    }

    /// Register a stage observer, called on every transition. Used by
    /// the CLI progress bar.
    pub fn with_observer(mut self, observer: impl FnMut(Stage) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        log::info!("stage: {}", stage);
        self.stage = stage;
        if let Some(observer) = self.observer.as_mut() {
            observer(stage);
        }
    }

    /// Run the pipeline to completion.
    pub fn run(mut self) -> Result<GenerationSummary> {
        match self.execute() {
            Ok(summary) => {
                self.enter(Stage::Done);
                Ok(summary)
            }
            Err(e) => {
                self.enter(Stage::Failed);
                Err(e)
            }
        }
    }

    fn execute(&mut self) -> Result<GenerationSummary> {
        let options = self.options.clone();
        let output_path = options.output_path();

        // Fail-fast configuration checks: everything that can be
        // validated without a browser happens before launch, so a bad
        // config never produces an output file or an orphaned
        // browser.
        options.branding.validate()?;
        let markdown = fs::read_to_string(&options.input).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", options.input.display(), e))
        })?;
        let title_logo = assets::compress_logo(
            &options.branding.title_logo,
            assets::TITLE_LOGO_MAX_WIDTH,
        )?;
        let header_logo = assets::compress_logo(
            &options.branding.header_logo,
            assets::HEADER_LOGO_MAX_WIDTH,
        )?;
        let title_logo_uri = assets::data_uri(title_logo.path())?;
        let header_logo_uri = assets::data_uri(header_logo.path())?;

        self.enter(Stage::Transforming);
        let mut document = transform::transform(&markdown, &options.branding.colors);

        // One browser for the whole run; dropped (and therefore
        // closed) on every exit path out of this function.
        let session = BrowserSession::launch(&options.geometry)?;

        self.enter(Stage::Measuring);
        let html_without_toc = build_document_html(
            &document.html,
            &document.headings,
            &options.branding,
            false,
        );
        let measurement =
            measure_heading_positions(&session, &html_without_toc, &document.headings)?;

        self.enter(Stage::Mapping);
        apply_page_numbers(&mut document.headings, &measurement, &options.geometry);

        self.enter(Stage::RenderingTitle);
        let title = options
            .branding
            .title_override
            .clone()
            .or_else(|| document.first_h1().map(String::from))
            .unwrap_or_else(|| {
                options
                    .input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Document".into())
            });
        let title_pdf = render_title_page(
            &session,
            &options.branding,
            &title,
            &title_logo_uri,
            &options.geometry,
        )?;

        self.enter(Stage::RenderingContent);
        let html_with_toc = build_document_html(
            &document.html,
            &document.headings,
            &options.branding,
            true,
        );
        let content_pdf = render_content(
            &session,
            &html_with_toc,
            &options.branding,
            &options.geometry,
            &header_logo_uri,
        )?;

        let validation = if options.branding.validate_layout {
            self.enter(Stage::Validating);
            Some(validate_layout(
                &session,
                &html_without_toc,
                &options.geometry,
            )?)
        } else {
            None
        };

        self.enter(Stage::Assembling);
        let assembled = assemble::assemble(&title_pdf, &content_pdf, &output_path)?;

        let toc_entries = document.headings.iter().filter(|h| h.in_toc()).count();
        Ok(GenerationSummary {
            output_path,
            page_count: assembled.page_count,
            file_size: assembled.file_size,
            headings_total: measurement.total,
            headings_measured: measurement.measured,
            toc_entries,
            validation,
        })
        // Compressed logo temp files are deleted when their handles
        // drop here; failures are swallowed by the drop impl.
    }
}
