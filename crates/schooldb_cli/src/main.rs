//! SchoolDB CLI
//!
//! Command-line access to a SchoolDB database.
//!
//! # Commands
//!
//! - `student`, `instructor`, `course` - add, edit, remove, show and list records
//! - `enroll` - enroll a student in a course
//! - `export`, `import` - JSON or CSV transfer
//! - `verify` - check relationship consistency
//! - `inspect` - display record counts

mod commands;

use clap::{Args, Parser, Subcommand};
use schooldb_core::{Config, DEFAULT_DB_PATH};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SchoolDB command-line tools.
#[derive(Parser)]
#[command(name = "schooldb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(global = true, short, long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage students
    Student {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Manage instructors
    Instructor {
        #[command(subcommand)]
        action: PersonAction,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },

    /// Enroll a student in a course
    Enroll {
        /// Student ID
        student_id: String,
        /// Course ID
        course_id: String,
    },

    /// Export every record
    Export {
        #[command(subcommand)]
        target: Transfer,
    },

    /// Replace every record with the content of an export
    Import {
        #[command(subcommand)]
        source: Transfer,
    },

    /// Check that every relationship is consistent
    Verify,

    /// Display record counts
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

/// Actions on students or instructors.
#[derive(Subcommand)]
pub(crate) enum PersonAction {
    /// Add a record
    Add(PersonArgs),

    /// Change name, age or email
    Edit {
        /// ID of the record to edit
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New age
        #[arg(long)]
        age: Option<u32>,
        /// New email
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove a record
    Remove {
        /// ID of the record to remove
        id: String,
    },

    /// Show one record
    Show {
        /// ID of the record to show
        id: String,
    },

    /// List every record
    List,
}

/// Fields of a new student or instructor.
#[derive(Args)]
pub(crate) struct PersonArgs {
    /// 9-digit ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Email address
    pub email: String,
}

/// Actions on courses.
#[derive(Subcommand)]
pub(crate) enum CourseAction {
    /// Add a course
    Add {
        /// Course ID, e.g. EECE230
        course_id: String,
        /// Course name
        course_name: String,
        /// ID of the instructor teaching it
        instructor_id: String,
    },

    /// Rename a course or reassign its instructor
    Edit {
        /// Course ID
        course_id: String,
        /// New course name
        #[arg(long)]
        name: Option<String>,
        /// ID of the new instructor
        #[arg(long)]
        instructor: Option<String>,
    },

    /// Remove a course and its enrollments
    Remove {
        /// Course ID
        course_id: String,
    },

    /// Show one course
    Show {
        /// Course ID
        course_id: String,
    },

    /// List every course
    List,
}

/// File formats for export and import.
#[derive(Subcommand)]
pub(crate) enum Transfer {
    /// A single JSON document
    Json {
        /// Path of the JSON file
        path: PathBuf,
    },

    /// Four CSV files in a directory
    Csv {
        /// Directory holding the CSV files
        dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Version = cli.command {
        println!("SchoolDB CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("SchoolDB Core v{}", schooldb_core::VERSION);
        return Ok(());
    }

    tracing::debug!(db = %cli.db.display(), "Opening database");
    let mut manager = Config::new().sqlite(&cli.db).open()?;
    let result = match cli.command {
        Commands::Student { action } => commands::people::run_student(manager.as_mut(), action),
        Commands::Instructor { action } => {
            commands::people::run_instructor(manager.as_mut(), action)
        }
        Commands::Course { action } => commands::course::run(manager.as_mut(), action),
        Commands::Enroll {
            student_id,
            course_id,
        } => commands::enroll::run(manager.as_mut(), &student_id, &course_id),
        Commands::Export { target } => commands::transfer::export(manager.as_ref(), &target),
        Commands::Import { source } => commands::transfer::import(manager.as_mut(), &source),
        Commands::Verify => commands::verify::run(manager.as_ref()),
        Commands::Inspect { format } => commands::inspect::run(manager.as_ref(), &cli.db, &format),
        Commands::Version => Ok(()),
    };
    let closed = manager.close();
    commands::finish(result, closed)
}
