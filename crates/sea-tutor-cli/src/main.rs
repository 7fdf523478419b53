//! sea-tutor CLI — compose papers, generate questions and check answers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sea-tutor", version, about = "Primary-school maths practice papers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a full practice paper
    Paper {
        /// Paper shape TOML (defaults to the config, then the built-in SEA layout)
        #[arg(long)]
        shape: Option<PathBuf>,

        /// Seed for a reproducible paper
        #[arg(long)]
        seed: Option<u64>,

        /// Paper JSON output file (default: <output_dir>/<paper_id>.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write a printable HTML worksheet
        #[arg(long)]
        html: Option<PathBuf>,

        /// Include the answer key in the HTML worksheet
        #[arg(long)]
        answer_key: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate questions for a single skill
    Generate {
        /// Skill id (see `sea-tutor skills`)
        #[arg(long)]
        skill: String,

        /// Section label echoed into the question
        #[arg(long, default_value = "I")]
        section: String,

        /// Marks per question
        #[arg(long, default_value = "1")]
        marks: u32,

        /// Difficulty 1-4
        #[arg(long, default_value = "1")]
        difficulty: u8,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Number of questions
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Check an answer against an answer spec
    Check {
        /// Answer spec JSON, e.g. '{"type":"fraction","numerator":1,"denominator":2}'
        #[arg(long)]
        answer: String,

        /// The learner's answer text
        #[arg(long)]
        input: String,
    },

    /// List available skills
    Skills,

    /// Validate a paper shape TOML file
    Validate {
        /// Path to paper shape file
        #[arg(long)]
        shape: PathBuf,
    },

    /// Check an answer and append the attempt to the attempt log
    Log {
        /// Learner session id
        #[arg(long)]
        session: String,

        /// Question id
        #[arg(long)]
        question: String,

        /// The learner's answer text
        #[arg(long)]
        input: String,

        /// Answer spec JSON
        #[arg(long)]
        answer: String,

        /// Paper id the question came from
        #[arg(long)]
        paper: Option<String>,

        /// Skill id of the question
        #[arg(long)]
        skill: Option<String>,

        /// Which try this is at the question
        #[arg(long, default_value = "1")]
        attempt: u32,

        /// Highest hint level opened (0 = none)
        #[arg(long, default_value = "0")]
        hint_level: u32,

        /// The worked example was opened
        #[arg(long)]
        used_example: bool,

        /// The tutor was opened
        #[arg(long)]
        used_tutor: bool,

        /// A solution step was shown
        #[arg(long)]
        used_show_step: bool,

        /// The full solution was revealed
        #[arg(long)]
        used_reveal_solution: bool,

        /// Seconds spent on the question
        #[arg(long, default_value = "0")]
        time_spent: u32,

        /// Attempt log file (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize the attempt log
    Stats {
        /// Attempt log file (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and paper shape
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sea_tutor=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Paper {
            shape,
            seed,
            output,
            html,
            answer_key,
            config,
        } => commands::paper::execute(shape, seed, output, html, answer_key, config),
        Commands::Generate {
            skill,
            section,
            marks,
            difficulty,
            seed,
            count,
        } => commands::generate::execute(skill, section, marks, difficulty, seed, count),
        Commands::Check { answer, input } => commands::check::execute(answer, input),
        Commands::Skills => commands::skills::execute(),
        Commands::Validate { shape } => commands::validate::execute(shape),
        Commands::Log {
            session,
            question,
            input,
            answer,
            paper,
            skill,
            attempt,
            hint_level,
            used_example,
            used_tutor,
            used_show_step,
            used_reveal_solution,
            time_spent,
            log,
            config,
        } => commands::log::execute(
            commands::log::LogArgs {
                session,
                question,
                input,
                answer,
                paper,
                skill,
                attempt,
                hint_level,
                used_example,
                used_tutor,
                used_show_step,
                used_reveal_solution,
                time_spent,
            },
            log,
            config,
        ),
        Commands::Stats { log, config } => commands::stats::execute(log, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
