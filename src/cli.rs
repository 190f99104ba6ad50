use clap::{Parser, Subcommand};

use crate::models::Role;
use crate::stats::DEFAULT_TREND_WINDOW;

#[derive(Debug, Parser)]
#[command(name = "learnup", about = "LearnUp school management client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Sign in and store the session token.
    #[command(arg_required_else_help = true)]
    Login {
        /// student, teacher, admin or parent
        role: Role,
        email: String,
        password: String,
    },
    Logout,
    /// List courses, or keep polling them with --watch.
    Courses {
        #[arg(long)]
        watch: bool,
    },
    /// Grade statistics for one student.
    #[command(arg_required_else_help = true)]
    Grades {
        student_id: String,
        #[arg(long, default_value_t = DEFAULT_TREND_WINDOW)]
        window: usize,
    },
    #[command(arg_required_else_help = true)]
    Absences {
        student_id: String,
    },
    Rappels,
}
