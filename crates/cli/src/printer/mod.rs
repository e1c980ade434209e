use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use filesift_engine::RangeSummary;
use filesift_fs::{CopyProgress, CopyReport, FileRecord};
use serde_json::json;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Maximum number of records to print.
    pub limit: usize,
    /// Whether to print summaries and per-file copy progress.
    pub verbose_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            limit: usize::MAX,
            verbose_summary: true,
        }
    }
}

/// Static context about a record listing.
#[derive(Debug)]
pub struct ListContext<'a> {
    /// Label for the command producing the listing.
    pub kind: &'a str,
    pub root: &'a Path,
    /// Number of records scanned before filtering.
    pub scanned: usize,
    /// Number of records that matched (before limit).
    pub total: usize,
    pub truncated: bool,
    pub elapsed: Option<Duration>,
}

/// Output sink for every command.
///
/// Record listings stream through `begin` / `print_record` / `finish`.
/// Scan summaries, copy progress and copy reports each have their own hook.
pub trait ResultPrinter {
    fn begin(&mut self, ctx: &ListContext) -> io::Result<()>;

    fn print_record(&mut self, rec: &FileRecord, ctx: &ListContext) -> io::Result<()>;

    fn finish(&mut self, ctx: &ListContext) -> io::Result<()>;

    fn print_ranges(
        &mut self,
        root: &Path,
        files: usize,
        summary: &RangeSummary,
    ) -> io::Result<()>;

    fn print_progress(&mut self, event: &CopyProgress) -> io::Result<()>;

    fn print_report(&mut self, dest: &Path, report: &CopyReport) -> io::Result<()>;
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// Writers other than the real stdout can't be probed for a TTY, so
    /// `Auto` means no color here.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[inline]
    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_owned()
        }
    }
}

fn join_span<T: ToString>(values: &[T]) -> String {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => format!(
            "{} .. {} ({} distinct)",
            first.to_string(),
            last.to_string(),
            values.len()
        ),
        _ => "none known".to_owned(),
    }
}

impl<W: Write, E: Write> ResultPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListContext) -> io::Result<()> {
        Ok(())
    }

    fn print_record(&mut self, rec: &FileRecord, _ctx: &ListContext) -> io::Result<()> {
        let path = self.paint("32", &rec.full_path.display().to_string());
        writeln!(
            self.out,
            "{}  {:>10.2} MB  {:<10} {}",
            rec.modified,
            rec.size_mb,
            rec.file_type.to_string(),
            path
        )
    }

    fn finish(&mut self, ctx: &ListContext) -> io::Result<()> {
        if ctx.truncated {
            let remaining = ctx.total.saturating_sub(self.cfg.limit);
            writeln!(self.out, "... and {} more files", remaining)?;
        }

        if self.cfg.verbose_summary {
            write!(
                self.err,
                "\n[{}] {} of {} files matched under {}",
                ctx.kind,
                ctx.total,
                ctx.scanned,
                ctx.root.display()
            )?;
            if let Some(elapsed) = ctx.elapsed {
                write!(self.err, " in {:.2}ms", elapsed.as_secs_f64() * 1000.0)?;
            }
            writeln!(self.err)?;
        }

        Ok(())
    }

    fn print_ranges(
        &mut self,
        root: &Path,
        files: usize,
        summary: &RangeSummary,
    ) -> io::Result<()> {
        let types: Vec<String> = summary.types.iter().map(ToString::to_string).collect();
        let size = match summary.size_mb {
            Some(b) => format!("{:.2} .. {:.2}", b.min, b.max),
            None => "none".to_owned(),
        };

        writeln!(self.out, "root:          {}", self.paint("32", &root.display().to_string()))?;
        writeln!(self.out, "files:         {}", files)?;
        writeln!(self.out, "types:         {}", types.join(", "))?;
        writeln!(self.out, "size (MB):     {}", size)?;
        writeln!(self.out, "created:       {}", join_span(&summary.created_dates))?;
        writeln!(self.out, "created time:  {}", join_span(&summary.created_times))?;
        writeln!(self.out, "modified:      {}", join_span(&summary.modified_dates))?;
        writeln!(self.out, "accessed:      {}", join_span(&summary.accessed_dates))
    }

    fn print_progress(&mut self, event: &CopyProgress) -> io::Result<()> {
        if !self.cfg.verbose_summary {
            return Ok(());
        }
        match event {
            CopyProgress::Copied {
                source,
                destination,
                bytes,
            } => writeln!(
                self.err,
                "[copy] {} -> {} ({} bytes)",
                source.display(),
                destination.display(),
                bytes
            ),
            CopyProgress::SkippedSameFile { source } => {
                writeln!(self.err, "[copy] skipped {} (already in place)", source.display())
            }
            CopyProgress::Failed { source, reason } => {
                let label = self.paint("31", "failed");
                writeln!(self.err, "[copy] {} {}: {}", label, source.display(), reason)
            }
        }
    }

    fn print_report(&mut self, dest: &Path, report: &CopyReport) -> io::Result<()> {
        writeln!(self.out, "destination:   {}", dest.display())?;
        writeln!(self.out, "attempted:     {}", report.attempted)?;
        writeln!(self.out, "copied:        {}", report.succeeded)?;
        writeln!(self.out, "already there: {}", report.skipped_same_file)?;
        writeln!(self.out, "failed:        {}", report.failed_count())?;
        writeln!(self.out, "bytes copied:  {}", report.bytes_copied)?;

        for failure in &report.failed {
            writeln!(self.out, "  {}: {}", failure.path.display(), failure.reason)?;
        }

        if report.cancelled {
            let note = self.paint("33", "cancelled before all files were attempted");
            writeln!(self.out, "{}", note)?;
        }
        Ok(())
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> ResultPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListContext) -> io::Result<()> {
        Ok(())
    }

    fn print_record(&mut self, rec: &FileRecord, ctx: &ListContext) -> io::Result<()> {
        let obj = json!({
            "type": "record",
            "kind": ctx.kind,
            "record": rec,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &ListContext) -> io::Result<()> {
        if self.cfg.verbose_summary {
            let obj = json!({
                "type": "summary",
                "kind": ctx.kind,
                "root": ctx.root,
                "scanned": ctx.scanned,
                "total": ctx.total,
                "truncated": ctx.truncated,
                "elapsed_ms": ctx.elapsed.map(|d| d.as_secs_f64() * 1000.0),
            });
            writeln!(self.err, "{}", obj)?;
        }
        Ok(())
    }

    fn print_ranges(
        &mut self,
        root: &Path,
        files: usize,
        summary: &RangeSummary,
    ) -> io::Result<()> {
        let obj = json!({
            "type": "ranges",
            "root": root,
            "files": files,
            "ranges": summary,
        });
        writeln!(self.out, "{}", obj)
    }

    fn print_progress(&mut self, event: &CopyProgress) -> io::Result<()> {
        if !self.cfg.verbose_summary {
            return Ok(());
        }
        let obj = match event {
            CopyProgress::Copied {
                source,
                destination,
                bytes,
            } => json!({
                "type": "progress",
                "event": "copied",
                "source": source,
                "destination": destination,
                "bytes": bytes,
            }),
            CopyProgress::SkippedSameFile { source } => json!({
                "type": "progress",
                "event": "skipped_same_file",
                "source": source,
            }),
            CopyProgress::Failed { source, reason } => json!({
                "type": "progress",
                "event": "failed",
                "source": source,
                "reason": reason,
            }),
        };
        writeln!(self.out, "{}", obj)
    }

    fn print_report(&mut self, dest: &Path, report: &CopyReport) -> io::Result<()> {
        let obj = json!({
            "type": "report",
            "destination": dest,
            "report": report,
        });
        writeln!(self.out, "{}", obj)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
