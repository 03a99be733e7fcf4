use std::path::PathBuf;

use clap::Parser;
use xlmerge_io_xlsx::SpecXlsxMergeOptions;
use xlmerge_io_xlsx::conf::derive_default_xlsx_merge_options;

#[derive(Parser, Debug)]
#[command(
    name = "xlmerge",
    about = "Merge the rows of several .xlsx files into the first one",
    version
)]
pub struct Cli {
    /// Input .xlsx files; the first one is used as the template
    #[arg(required = true, value_name = "FILE")]
    pub files_in: Vec<PathBuf>,

    /// Output .xlsx path; replaced if it exists
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Keep the header row of every file (the template header is always kept)
    #[arg(long)]
    pub keep_headers: bool,

    /// Merge files even if their column count differs from the template
    #[arg(long)]
    pub ignore_column_differences: bool,

    /// Add a column with the path of the source file
    #[arg(long)]
    pub add_file_names: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn merge_options(&self) -> SpecXlsxMergeOptions {
        let mut options = derive_default_xlsx_merge_options();
        options.if_keep_headers = self.keep_headers;
        options.if_ignore_column_differences = self.ignore_column_differences;
        options.if_add_file_names = self.add_file_names;
        options
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_inputs_output_and_flags() {
        let cli = Cli::try_parse_from([
            "xlmerge",
            "t.xlsx",
            "a.xlsx",
            "-o",
            "out.xlsx",
            "--keep-headers",
            "--add-file-names",
        ])
        .expect("parse");

        assert_eq!(
            cli.files_in,
            vec![PathBuf::from("t.xlsx"), PathBuf::from("a.xlsx")]
        );
        assert_eq!(cli.output, PathBuf::from("out.xlsx"));

        let options = cli.merge_options();
        assert!(options.if_keep_headers);
        assert!(!options.if_ignore_column_differences);
        assert!(options.if_add_file_names);
    }

    #[test]
    fn single_input_is_left_to_the_engine() {
        let cli = Cli::try_parse_from(["xlmerge", "t.xlsx", "--output", "o.xlsx"]).expect("parse");
        assert_eq!(cli.files_in.len(), 1);
    }

    #[test]
    fn output_is_required() {
        assert!(Cli::try_parse_from(["xlmerge", "t.xlsx", "a.xlsx"]).is_err());
    }
}
