use clap::{Args, Subcommand, ValueEnum};

use crate::api::{ApiResponse, GorestClient};
use crate::cli::utils::output_response;
use crate::cli::OutputFormat;
use crate::types::{Gender, UserId, UserPayload, UserStatus};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List users (GET /users)")]
    List,

    #[command(about = "Show one user (GET /users/{id})")]
    Get {
        #[arg(help = "User ID")]
        id: UserId,
    },

    #[command(about = "Create a user (POST /users)")]
    Create(UserArgs),

    #[command(about = "Replace a user's fields (PUT /users/{id})")]
    Update {
        #[arg(help = "User ID")]
        id: UserId,
        #[command(flatten)]
        user: UserArgs,
    },

    #[command(about = "Delete a user (DELETE /users/{id})")]
    Delete {
        #[arg(help = "User ID")]
        id: UserId,
    },
}

#[derive(Args)]
pub struct UserArgs {
    #[arg(long, help = "Full name")]
    pub name: String,
    #[arg(long, help = "Email address, unique on the service")]
    pub email: String,
    #[arg(long, value_enum, default_value = "male")]
    pub gender: GenderArg,
    #[arg(long, value_enum, default_value = "active")]
    pub status: StatusArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<UserArgs> for UserPayload {
    fn from(args: UserArgs) -> Self {
        UserPayload {
            name: args.name,
            email: args.email,
            gender: match args.gender {
                GenderArg::Male => Gender::Male,
                GenderArg::Female => Gender::Female,
            },
            status: match args.status {
                StatusArg::Active => UserStatus::Active,
                StatusArg::Inactive => UserStatus::Inactive,
            },
        }
    }
}

pub async fn handle(cmd: UserCommands, client: &GorestClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (action, response) = match cmd {
        UserCommands::List => ("List users".to_string(), client.list_users().await?),
        UserCommands::Get { id } => (format!("Get user {}", id), client.get_user(id).await?),
        UserCommands::Create(args) => {
            let payload = UserPayload::from(args);
            ("Create user".to_string(), client.create_user(&payload).await?)
        }
        UserCommands::Update { id, user } => {
            let payload = UserPayload::from(user);
            (format!("Update user {}", id), client.update_user(id, &payload).await?)
        }
        UserCommands::Delete { id } => (format!("Delete user {}", id), client.delete_user(id).await?),
    };

    // Failures are reported once, by the caller printing the returned error
    ensure_success(&action, &response)?;
    output_response(&output_format, &action, &response)
}

fn ensure_success(action: &str, response: &ApiResponse) -> anyhow::Result<()> {
    if response.status.is_success() {
        return Ok(());
    }

    if response.body.is_null() {
        Err(anyhow::anyhow!("{} returned {}", action, response.status))
    } else {
        Err(anyhow::anyhow!("{} returned {}: {}", action, response.status, response.body))
    }
}
