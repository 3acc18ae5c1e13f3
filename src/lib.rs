use std::{
    fs::{self, File, OpenOptions},
    io::BufReader,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
};

pub use crate::image::{
    render_target::RenderTarget,
    transformer::{map_duotone, DuotoneOptions, DuotoneTransformer},
    Image,
};
pub use cli::CLIParser;
pub use error::Error;
pub use output_name::OutputName;
pub use preview::Preview;
pub use session::{LoadTicket, Session};

use crate::image::{reader::DecodingImageReader, ImageReader};
use threadpool::ThreadPool;

mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;
pub mod output_name;
pub mod preview;
pub mod session;

pub type Result<T> = std::result::Result<T, error::Error>;

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

pub struct Arguments {
    input_files: Vec<PathBuf>,
    shadow: String,
    highlight: String,
    output_directory: PathBuf,
    prefix: String,
    max_size_mb: u64,
    number_of_threads: usize,
    print_data_url: bool,
}

/// Outcome of converting one input file.
#[derive(Debug)]
pub struct ConversionReport {
    pub input_file: PathBuf,
    pub result: Result<ConvertedImage>,
}

#[derive(Debug)]
pub struct ConvertedImage {
    pub output_file: PathBuf,
    pub width: u32,
    pub height: u32,
    pub data_url: Option<String>,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

pub(crate) fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

fn check_input_file_size(file_path: &Path, size: u64, max_size_mb: u64) -> Result<()> {
    let limit = max_size_mb.saturating_mul(BYTES_PER_MEGABYTE);
    if size > limit {
        return Err(Error::InputFileTooLarge(
            file_path.display().to_string(),
            size,
            limit,
        ));
    }
    Ok(())
}

/// Reads and decodes an image file no larger than `max_size_mb` megabytes.
pub fn read_image_file(file_path: &Path, max_size_mb: u64) -> Result<Image> {
    let input_file = open_input_file(file_path)?;
    let size = input_file
        .metadata()
        .map_err(|e| {
            Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
        })?
        .len();
    check_input_file_size(file_path, size, max_size_mb)?;
    DecodingImageReader::new(BufReader::new(input_file)).read_image()
}

struct ConversionJob {
    index: usize,
    input_file: PathBuf,
    output_file: PathBuf,
    max_size_mb: u64,
    print_data_url: bool,
}

impl ConversionJob {
    fn run(self, session: &mut Session) -> Result<ConvertedImage> {
        let image = read_image_file(&self.input_file, self.max_size_mb)?;
        let preview = session.render(&image)?;
        preview.save(&self.output_file)?;
        Ok(ConvertedImage {
            width: preview.width(),
            height: preview.height(),
            data_url: self.print_data_url.then(|| preview.data_url()),
            output_file: self.output_file,
        })
    }
}

/// Converts every input file of `arguments` into a duotone PNG.
///
/// Colors are validated before any file is touched. Each worker of the
/// thread pool owns one `Session` and takes files from a shared queue until
/// it is empty; the reports keep the input order.
pub fn convert_to_duotone(arguments: &Arguments) -> Result<Vec<ConversionReport>> {
    let options = DuotoneOptions::try_from(arguments)?;
    let output_directory = &arguments.output_directory;
    fs::create_dir_all(output_directory).map_err(|e| {
        Error::UnableToOpenOutputFileForWriting(output_directory.display().to_string(), e)
    })?;
    let output_name = OutputName::new(&arguments.prefix);
    let is_batch = arguments.input_files.len() > 1;
    let (job_sender, job_receiver) = mpsc::channel();
    for (index, input_file) in arguments.input_files.iter().enumerate() {
        let file_name = output_name.file_name(is_batch.then_some(index + 1));
        let job = ConversionJob {
            index,
            input_file: input_file.clone(),
            output_file: output_directory.join(file_name),
            max_size_mb: arguments.max_size_mb,
            print_data_url: arguments.print_data_url,
        };
        // the receiver is still held here
        let _ = job_sender.send(job);
    }
    drop(job_sender);

    let number_of_workers = arguments
        .number_of_threads
        .clamp(1, arguments.input_files.len().max(1));
    let threadpool = ThreadPool::new(number_of_workers);
    let job_receiver = Arc::new(Mutex::new(job_receiver));
    let (sender, receiver) = mpsc::channel();
    for _ in 0..number_of_workers {
        let job_receiver = Arc::clone(&job_receiver);
        let sender = sender.clone();
        threadpool.execute(move || {
            let mut session = Session::new(options);
            loop {
                let next_job = match job_receiver.lock() {
                    Ok(queue) => queue.recv(),
                    Err(_) => break,
                };
                let Ok(job) = next_job else {
                    break;
                };
                let index = job.index;
                let result = job.run(&mut session);
                // the receiver outlives all workers
                let _ = sender.send((index, result));
            }
        });
    }
    drop(sender);

    let mut results: Vec<Option<Result<ConvertedImage>>> =
        arguments.input_files.iter().map(|_| None).collect();
    for (index, result) in receiver {
        results[index] = Some(result);
    }
    let reports = arguments
        .input_files
        .iter()
        .zip(results)
        .map(|(input_file, result)| ConversionReport {
            input_file: input_file.clone(),
            result: result.unwrap_or_else(|| {
                Err(Error::ConversionJobLost(input_file.display().to_string()))
            }),
        })
        .collect::<Vec<_>>();
    for report in &reports {
        match &report.result {
            Ok(converted) => logger::log_dimensions(
                &format!("Converted '{}'", report.input_file.display()),
                converted.width,
                converted.height,
            ),
            Err(e) => log::error!(
                "Conversion of '{}' failed: {}",
                report.input_file.display(),
                e
            ),
        }
    }
    Ok(reports)
}
