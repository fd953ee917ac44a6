use crate::pipeline::RunSummary;
use std::io::{self, Write};

/// Display the end-of-run summary
pub fn display_summary(summary: &RunSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;

    if summary.total_items == 0 {
        writeln!(writer, "  No media found.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "  {} of {} items processed",
        summary.processed(),
        summary.total_items
    )?;
    writeln!(writer, "  {} organized", summary.organized)?;
    writeln!(writer, "  {} already organized", summary.already_organized)?;
    writeln!(writer, "  {} skipped", summary.skipped)?;
    writeln!(writer, "  {} failed", summary.failed)?;

    if summary.duplicates_renamed > 0 {
        writeln!(
            writer,
            "  {} files stored with a duplicate suffix",
            summary.duplicates_renamed
        )?;
    }

    if summary.left_in_place > 0 {
        writeln!(
            writer,
            "  {} files left in place because the destination exists",
            summary.left_in_place
        )?;
    }

    writeln!(
        writer,
        "  {} files cleaned, {} empty folders removed",
        summary.files_cleaned, summary.dirs_removed
    )?;

    if summary.stopped_early {
        writeln!(writer)?;
        writeln!(writer, "Input closed before every item was handled.")?;
    }

    let elapsed = summary.elapsed();
    writeln!(writer)?;
    writeln!(
        writer,
        "Finished at {} ({}s)",
        summary
            .finished_at
            .unwrap_or(summary.started_at)
            .format("%Y-%m-%d %H:%M:%S"),
        elapsed.num_seconds()
    )?;

    Ok(())
}
