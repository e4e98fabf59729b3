//! Folder-level batch processing.
//!
//! Every supported document directly inside the input folder is opened, each
//! of its pages is fitted to the requested page size, and the result is
//! written to an output subdirectory of the input folder.
//!
//! # Example
//!
//! ```no_run
//! use pagefit::batch::{BatchEvent, BatchOptions, BatchProcessor};
//! use pagefit::PageSizeTable;
//!
//! fn main() -> pagefit::Result<()> {
//!     let table = PageSizeTable::standard();
//!     let options = BatchOptions::new().with_page_size(table.lookup_or_err("a4")?);
//!
//!     let report = BatchProcessor::new(options).run_with("scans", |event| {
//!         if let BatchEvent::FileStarted { input } = event {
//!             println!("Processing: {}", input.display());
//!         }
//!     })?;
//!     println!("{} pages resized", report.total_pages());
//!     Ok(())
//! }
//! ```

mod options;
mod report;

pub use options::{BatchOptions, ErrorMode, DEFAULT_OUTPUT_DIR, DEFAULT_SUFFIX};
pub use report::{BatchReport, FileFailure, FileReport};

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::{LopdfBackend, PageStore};
use crate::detect::is_supported_extension;
use crate::error::{Error, Result};
use crate::model::PageSize;
use crate::transform::fit_page;

/// Progress events emitted during a batch run.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// A file is about to be opened.
    FileStarted {
        input: PathBuf,
    },

    /// A page is about to be fitted.
    PageStarted {
        /// 1-indexed page number
        number: usize,
        /// Total pages in the current document
        page_count: usize,
    },

    /// A file has been written.
    FileFinished {
        input: PathBuf,
        output: PathBuf,
        pages: usize,
    },

    /// A file could not be processed.
    FileFailed {
        input: PathBuf,
        /// Human-readable error description
        error: String,
    },
}

/// Sequential batch processor.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: BatchOptions,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process `input_dir` without progress reporting.
    pub fn run<P: AsRef<Path>>(&self, input_dir: P) -> Result<BatchReport> {
        self.run_with(input_dir, |_| {})
    }

    /// Process `input_dir`, calling `on_event` as files and pages are handled.
    ///
    /// The input folder must exist and have at least one entry. The output
    /// folder is created if needed, even if no file qualifies. In
    /// [`ErrorMode::Strict`] the first failing file aborts the run with an
    /// [`Error::File`]; in [`ErrorMode::Lenient`] it is recorded in the report.
    pub fn run_with<P, F>(&self, input_dir: P, mut on_event: F) -> Result<BatchReport>
    where
        P: AsRef<Path>,
        F: FnMut(&BatchEvent),
    {
        let input_dir = input_dir.as_ref();
        if !input_dir.is_dir() {
            return Err(Error::InputFolderMissing(input_dir.to_path_buf()));
        }
        if fs::read_dir(input_dir)?.next().is_none() {
            return Err(Error::InputFolderEmpty(input_dir.to_path_buf()));
        }

        let output_dir = input_dir.join(&self.options.output_dir_name);
        fs::create_dir_all(&output_dir)?;

        let mut report = BatchReport::new(
            input_dir.to_path_buf(),
            output_dir.clone(),
            self.options.page_size.clone(),
        );

        for input in collect_inputs(input_dir)? {
            on_event(&BatchEvent::FileStarted {
                input: input.clone(),
            });
            log::info!("Processing: {}", input.display());

            let output = self.output_path(&output_dir, &input);
            match self.process_file(&input, &output, &mut on_event) {
                Ok(pages) => {
                    log::info!("Wrote {} ({} pages)", output.display(), pages);
                    on_event(&BatchEvent::FileFinished {
                        input: input.clone(),
                        output: output.clone(),
                        pages,
                    });
                    report.files.push(FileReport {
                        input,
                        output,
                        pages,
                    });
                }
                Err(e) => {
                    on_event(&BatchEvent::FileFailed {
                        input: input.clone(),
                        error: e.to_string(),
                    });
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e.in_file(input));
                    }
                    log::warn!("Skipping {}: {}", input.display(), e);
                    report.failures.push(FileFailure {
                        input,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Output location for `input`: `<output_dir>/<stem><suffix>.<ext>`.
    pub fn output_path(&self, output_dir: &Path, input: &Path) -> PathBuf {
        let mut name = input.file_stem().unwrap_or_default().to_os_string();
        name.push(&self.options.suffix);
        if let Some(ext) = input.extension() {
            name.push(".");
            name.push(ext);
        }
        output_dir.join(name)
    }

    fn process_file<F>(&self, input: &Path, output: &Path, on_event: &mut F) -> Result<usize>
    where
        F: FnMut(&BatchEvent),
    {
        let mut backend = LopdfBackend::open(input)?;
        let page_count = backend.page_count();
        let pages = fit_document(&mut backend, &self.options.page_size, |number| {
            on_event(&BatchEvent::PageStarted { number, page_count })
        })?;
        backend.save(output)?;
        Ok(pages)
    }
}

/// Fit every page of `store` to `page_size`, in document order.
///
/// `on_page` receives the 1-indexed page number before each page. Returns
/// the number of pages fitted; a failing page is reported as
/// [`Error::Page`].
pub fn fit_document<S, F>(store: &mut S, page_size: &PageSize, mut on_page: F) -> Result<usize>
where
    S: PageStore + ?Sized,
    F: FnMut(usize),
{
    let page_count = store.page_count();
    for index in 0..page_count {
        let number = index + 1;
        on_page(number);

        let mut page = store.read_page(index).map_err(|e| e.on_page(number))?;
        let fit = fit_page(&mut page, page_size).map_err(|e| e.on_page(number))?;
        log::debug!(
            "Page {}: {} x {}, scale {:.4}, offset ({:.2}, {:.2})",
            number,
            fit.target_width,
            fit.target_height,
            fit.scale,
            fit.dx,
            fit.dy
        );
        store.write_page(index, &page).map_err(|e| e.on_page(number))?;
    }
    Ok(page_count)
}

/// Regular files directly inside `dir` with a supported extension, sorted by
/// path.
pub fn collect_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_extension(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}
