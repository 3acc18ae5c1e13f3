use std::{env::args_os, process::ExitCode};

use duotone_converter::{convert_to_duotone, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    let reports = match convert_to_duotone(&arguments) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut all_successful = true;
    for report in reports {
        match report.result {
            Ok(converted) => {
                println!(
                    "{} -> {}",
                    report.input_file.display(),
                    converted.output_file.display()
                );
                if let Some(data_url) = converted.data_url {
                    println!("{}", data_url);
                }
            }
            Err(e) => {
                all_successful = false;
                eprintln!(
                    "Conversion of {} failed because of: {}",
                    report.input_file.display(),
                    e
                );
            }
        }
    }
    if all_successful {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
