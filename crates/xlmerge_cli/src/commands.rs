use anyhow::Context;
use colored::Colorize;
use xlmerge_io_xlsx::{ReportMerge, SpecXlsxMergeRequest, merge_xlsx_files};

use crate::cli::Cli;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let options = cli.merge_options();
    let request = SpecXlsxMergeRequest::new(cli.files_in, cli.output).with_options(options);

    let report = merge_xlsx_files(&request)
        .with_context(|| format!("merge into {} failed", request.file_out.display()))?;
    print_report(&request, &report);
    Ok(())
}

fn print_report(request: &SpecXlsxMergeRequest, report: &ReportMerge) {
    for path in &report.files_merged {
        println!("  {} {}", "merged:".green(), path.display());
    }
    for path in &report.files_skipped {
        println!("  {} {}", "skipped:".yellow(), path.display());
    }
    println!(
        "{} Wrote {} ({} rows appended)",
        "✓".green().bold(),
        request.file_out.display().to_string().bold(),
        report.cnt_rows_appended
    );
}
