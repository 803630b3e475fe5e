//! User management commands.

use roster::UserRepository;

use crate::backend::{create_store, persist_store};
use crate::cli::{ListArgs, UserAddArgs};
use crate::output::{OutputFormat, print_json, print_user_table};

/// Run the `user add` command
pub async fn add(args: &UserAddArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&args.backend_config).await?;
    let users = UserRepository::new(store.clone());

    let ack = users
        .create_user(&args.email, &args.password, &args.role)
        .await?;
    persist_store(&store, &args.backend_config).await?;

    match format {
        OutputFormat::Human => println!("Created user {} ({})", args.email, ack.inserted_id),
        OutputFormat::Json => print_json(&ack)?,
    }
    Ok(())
}

/// Run the `user list` command
pub async fn list(args: &ListArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&args.backend_config).await?;
    let users = UserRepository::new(store).find_all().await?;

    match format {
        OutputFormat::Human => {
            if users.is_empty() {
                println!("No users found.");
                return Ok(());
            }

            print_user_table(&users);
        }
        OutputFormat::Json => {
            print_json(&users)?;
        }
    }

    Ok(())
}
