//! quizmark CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Mixed-type quiz grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an answer sheet against a quiz
    Grade {
        /// Path to the .toml quiz
        #[arg(long)]
        quiz: PathBuf,

        /// Path to the .toml answer sheet
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, table, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Show the authored answer under each question
        #[arg(long)]
        hints: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Show the correct answer of one question
    Answer {
        /// Path to the .toml quiz
        #[arg(long)]
        quiz: PathBuf,

        /// Question id
        #[arg(long)]
        question: u32,
    },

    /// Create an example quiz and answer sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            quiz,
            answers,
            format,
            hints,
            config,
        } => commands::grade::execute(quiz, answers, format, hints, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Answer { quiz, question } => commands::answer::execute(quiz, question),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
