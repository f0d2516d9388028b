use super::common::{FieldArgs, ListArgs};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, register and sign out")]
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    #[command(about = "Manage products")]
    Product {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    #[command(about = "Manage clients")]
    Client {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    #[command(about = "Manage sales")]
    Sale {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    #[command(about = "Browse the course catalog")]
    Course {
        #[command(subcommand)]
        command: CourseCommand,
    },

    #[command(about = "Ask the assistant (interactive when no question is given)")]
    Chat {
        question: Option<String>,
    },

    #[command(about = "Sales, inventory and margin summary")]
    Overview {
        #[arg(long, help = "Year to summarize (default: current year)")]
        year: Option<i32>,
    },

    #[command(about = "Render the screen behind a dashboard path, e.g. /product")]
    View { path: String },

    #[command(about = "Show or change configuration")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    #[command(about = "Sign in and remember the session token")]
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "BISOSHI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    #[command(about = "Create an account")]
    Register {
        #[arg(long)]
        ruc: String,

        #[arg(long)]
        company_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "BISOSHI_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        cellphone: String,
    },

    #[command(about = "Forget the session token")]
    Logout,

    #[command(about = "Show whether a session is active")]
    Status,
}

#[derive(Subcommand)]
pub enum ResourceCommand {
    #[command(about = "List records as a paged table")]
    List(ListArgs),

    #[command(about = "Show one record")]
    Show { id: String },

    #[command(about = "Create a record from --field name=value pairs")]
    Create(FieldArgs),

    #[command(about = "Update a record from --field name=value pairs")]
    Update {
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    #[command(about = "Delete one or more records")]
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    #[command(about = "List the form fields accepted by create and update")]
    Fields,
}

#[derive(Subcommand)]
pub enum CourseCommand {
    #[command(about = "List all courses")]
    List,

    #[command(about = "Show a course with its syllabus")]
    Show { id: u32 },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the configuration (secrets masked)")]
    Show,

    #[command(about = "Set a configuration key, e.g. api.base_url")]
    Set { key: String, value: String },

    #[command(about = "Print the configuration file path")]
    Path,
}
