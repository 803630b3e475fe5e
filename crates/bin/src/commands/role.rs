//! Role and permission management commands.

use roster::{Document, UserRepository};

use crate::backend::{create_store, persist_store};
use crate::cli::{PermissionAddArgs, RoleAddArgs};
use crate::output::{OutputFormat, print_json};

fn named(name: Option<&str>) -> Document {
    let mut attributes = Document::new();
    if let Some(name) = name {
        attributes.insert("name".to_string(), name.into());
    }
    attributes
}

/// Run the `role add` command
pub async fn add(args: &RoleAddArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&args.backend_config).await?;
    let repo = UserRepository::new(store.clone());

    let ack = repo
        .create_role(
            args.id.as_deref(),
            &args.permissions,
            named(args.name.as_deref()),
        )
        .await?;
    persist_store(&store, &args.backend_config).await?;

    match format {
        OutputFormat::Human => println!(
            "Created role {} granting {} permission(s)",
            ack.inserted_id,
            args.permissions.len()
        ),
        OutputFormat::Json => print_json(&ack)?,
    }
    Ok(())
}

/// Run the `permission add` command
pub async fn add_permission(
    args: &PermissionAddArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&args.backend_config).await?;
    let repo = UserRepository::new(store.clone());

    let ack = repo
        .create_permission(args.id.as_deref(), named(args.name.as_deref()))
        .await?;
    persist_store(&store, &args.backend_config).await?;

    match format {
        OutputFormat::Human => println!("Created permission {}", ack.inserted_id),
        OutputFormat::Json => print_json(&ack)?,
    }
    Ok(())
}
