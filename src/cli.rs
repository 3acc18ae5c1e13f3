use crate::output_name::DEFAULT_PREFIX;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub const DEFAULT_SHADOW: &str = "#145527";
pub const DEFAULT_HIGHLIGHT: &str = "#F784C5";
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_files_argument(command);
        let command = Self::register_shadow_argument(command);
        let command = Self::register_highlight_argument(command);
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_prefix_argument(command);
        let command = Self::register_max_size_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_data_url_argument(command)
    }

    fn register_input_files_argument(command: Command) -> Command {
        command.arg(Self::create_input_files_argument())
    }

    fn register_shadow_argument(command: Command) -> Command {
        command.arg(Self::create_shadow_argument())
    }

    fn register_highlight_argument(command: Command) -> Command {
        command.arg(Self::create_highlight_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_prefix_argument(command: Command) -> Command {
        command.arg(Self::create_prefix_argument())
    }

    fn register_max_size_argument(command: Command) -> Command {
        command.arg(Self::create_max_size_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_data_url_argument(command: Command) -> Command {
        command.arg(Self::create_data_url_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_files_argument() -> Arg {
        Arg::new("input_files")
            .help("Paths to PNG, JPEG, GIF or PNM input files")
            .value_parser(value_parser!(PathBuf))
            .num_args(1..)
            .required(true)
    }

    fn create_shadow_argument() -> Arg {
        arg!(shadow: -s --shadow <COLOR> "Color for the darkest tones")
            .default_value(DEFAULT_SHADOW)
    }

    fn create_highlight_argument() -> Arg {
        arg!(highlight: -l --highlight <COLOR> "Color for the brightest tones")
            .default_value(DEFAULT_HIGHLIGHT)
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory for the PNG output files")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_prefix_argument() -> Arg {
        arg!(prefix: -p --prefix <PREFIX> "Prefix of the generated output file names")
            .default_value(DEFAULT_PREFIX)
    }

    fn create_max_size_argument() -> Arg {
        arg!(max_size_mb: -m --max_size_mb <MB> "Largest accepted input file in megabytes")
            .default_value(DEFAULT_MAX_SIZE_MB.to_string())
            .value_parser(value_parser!(u64).range(1..))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_data_url_argument() -> Arg {
        arg!(data_url: --data_url "Print every result as a data URL")
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_files: Self::extract_input_files_argument(matches),
            shadow: Self::extract_shadow_argument(matches),
            highlight: Self::extract_highlight_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            prefix: Self::extract_prefix_argument(matches),
            max_size_mb: Self::extract_max_size_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            print_data_url: Self::extract_data_url_argument(matches),
        }
    }

    fn extract_input_files_argument(matches: &ArgMatches) -> Vec<PathBuf> {
        matches
            .get_many::<PathBuf>("input_files")
            .expect("Required argument input_files not provided")
            .cloned()
            .collect()
    }

    fn extract_shadow_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("shadow")
            .expect("Shadow color must be provided, but was unset.")
            .clone()
    }

    fn extract_highlight_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("highlight")
            .expect("Highlight color must be provided, but was unset.")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Output directory must be provided, but was unset.")
            .clone()
    }

    fn extract_prefix_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("prefix")
            .expect("Prefix must be provided, but was unset.")
            .clone()
    }

    fn extract_max_size_argument(matches: &ArgMatches) -> u64 {
        matches
            .get_one::<u64>("max_size_mb")
            .expect("Maximum input size must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_data_url_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("data_url")
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
