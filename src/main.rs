//! maskgen - high-performance mask-based word generator.
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use maskgen::cli::Args;
use maskgen::generate::{Generator, GeneratorConfig};
use maskgen::output::{open_output, CandidateWriter};
use maskgen::progress::{print_error, print_success, ProgressSink};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = GeneratorConfig::from_args(&args)?;
    let mut generator = Generator::new(config)?;

    // Counting mode never enumerates
    if args.combinations {
        println!("{}", generator.combinations());
        return Ok(());
    }

    let total = generator.combinations();
    let show_progress = args.output_file.is_some() && !args.quiet;

    let out = open_output(args.output_file.as_deref())?;
    let writer = CandidateWriter::new(out);

    let writer = if show_progress {
        let mut sink = ProgressSink::new(writer, total);
        generator.run(&mut sink)?;
        sink.finish()
    } else {
        let mut writer = writer;
        generator.run(&mut writer)?;
        writer
    };

    if let Some(path) = &args.output_file {
        if !args.quiet {
            print_success(&format!(
                "{} candidates appended to {:?}",
                writer.words_written(),
                path
            ));
        }
    }

    if args.stats {
        generator.stats().print_summary(writer.bytes_written());
    }

    Ok(())
}
