use clap::{ArgAction, Args, Parser, Subcommand};
use klipbook_config::Config;
use klipbook_extract::ParsePolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "klipbook")]
#[command(version, about = "Turn a Kindle clippings export into JSON or a static HTML site", long_about = None)]
#[command(after_help = "EXAMPLES:
    klipbook tojson -n 5 -i 'My Clippings.txt' -o clippings.json
    klipbook tohtml -i 'My Clippings.txt' -o site/ --force
    klipbook list -i 'My Clippings.txt'")]
pub struct Cli {
    /// Extra config file (TOML or YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (repeat for even more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export the most recently updated books as one JSON document
    #[command(name = "tojson")]
    ToJson(ToJsonArgs),
    /// Write one HTML page per book plus an index
    #[command(name = "tohtml")]
    ToHtml(ToHtmlArgs),
    /// List the most recently updated books
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Clippings export, usually "My Clippings.txt"
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Number of books to output [default: 10]
    #[arg(short = 'n', long = "books", value_name = "COUNT")]
    pub books: Option<usize>,

    /// Skip malformed records instead of failing
    #[arg(long)]
    pub lenient: bool,
}
impl InputArgs {
    pub fn books(&self, config: &Config) -> usize {
        self.books.unwrap_or(config.books)
    }

    pub fn policy(&self, config: &Config) -> ParsePolicy {
        if self.lenient { ParsePolicy::Lenient } else { config.policy }
    }
}

#[derive(Debug, Args)]
pub struct ToJsonArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// JSON file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ToHtmlArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory to write the pages into, created if missing
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Overwrite existing pages
    #[arg(short, long)]
    pub force: bool,

    /// Render and check for conflicts without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_tojson_arguments() {
        let cli = Cli::try_parse_from(["klipbook", "tojson", "-n", "3", "-o", "out.json", "-i", "clips.txt"]).unwrap();
        let Command::ToJson(args) = cli.command else { panic!("expected tojson") };
        assert_eq!(args.input.books, Some(3));
        assert_eq!(args.input.input, PathBuf::from("clips.txt"));
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert!(!args.force);
    }

    #[test]
    fn test_tohtml_arguments_with_globals() {
        let cli = Cli::try_parse_from([
            "klipbook", "tohtml", "-i", "clips.txt", "-o", "site", "-f", "--lenient", "-vv", "-c", "klipbook.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("klipbook.toml")));
        let Command::ToHtml(args) = cli.command else { panic!("expected tohtml") };
        assert!(args.force);
        assert!(!args.dry_run);
        assert!(args.input.lenient);
        assert_eq!(args.input.books, None);
    }

    #[test]
    fn test_flags_fall_back_to_config() {
        let cli = Cli::try_parse_from(["klipbook", "list", "-i", "clips.txt"]).unwrap();
        let Command::List(args) = cli.command else { panic!("expected list") };
        let config = Config { books: 4, policy: ParsePolicy::Lenient, ..Config::default() };
        assert_eq!(args.input.books(&config), 4);
        assert_eq!(args.input.policy(&config), ParsePolicy::Lenient);
        assert_eq!(args.input.books(&Config::default()), 10);
        assert_eq!(args.input.policy(&Config::default()), ParsePolicy::Strict);
    }

    #[rstest]
    #[case(&["klipbook", "tojson", "-n", "-1", "-o", "out.json", "-i", "clips.txt"])]
    #[case(&["klipbook", "tojson", "-n", "three", "-o", "out.json", "-i", "clips.txt"])]
    #[case(&["klipbook", "tojson", "-i", "clips.txt"])]
    #[case(&["klipbook", "tohtml", "-o", "site"])]
    fn test_rejected_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
