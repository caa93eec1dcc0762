//! Basic usage example walking through the users and projects resources.
//!
//! This example demonstrates:
//! - Creating a client from `SKYGENESIS_API_KEY` (or the first CLI argument)
//! - Creating, listing, updating and retrieving items
//! - Branching on the error kind
//!
//! Run with `RUST_LOG=skygenesis_async=debug` to see request tracing.

use skygenesis_async::{
    Client, ErrorKind, RequestOptions, SkyGenesisError, Verb,
    types::{ListParams, ProjectCreateParamsBuilder, ProjectUpdateParams, UserCreateParamsBuilder},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn basic_usage(client: &Client) -> Result<(), SkyGenesisError> {
    println!("Creating a new user...");
    let params = UserCreateParamsBuilder::default()
        .email("john.doe@example.com")
        .name("John Doe")
        .role("developer")
        .build()
        .map_err(SkyGenesisError::request)?;
    let user = client.users().create(&params).await?;
    println!("User created: {user:?}");

    println!("\nCreating a new project...");
    let params = ProjectCreateParamsBuilder::default()
        .name("Sample Project")
        .description("A demonstration project")
        .status("active")
        .build()
        .map_err(SkyGenesisError::request)?;
    let project = client.projects().create(&params).await?;
    println!("Project created: {project:?}");

    println!("\nListing users...");
    let users = client.users().list(&ListParams::new().with_limit(5)).await?;
    println!("{} users (more: {})", users.data.len(), users.has_more);

    println!("\nListing projects...");
    let projects = client
        .projects()
        .list(&ListParams::new().with_limit(5))
        .await?;
    println!("{} projects (more: {})", projects.data.len(), projects.has_more);

    println!("\nUpdating project...");
    let update = ProjectUpdateParams {
        name: Some("Updated Sample Project".into()),
        description: Some("An updated demonstration project".into()),
        ..Default::default()
    };
    let project = client.projects().update(&project.id, &update).await?;
    println!("Project updated: {project:?}");

    println!("\nRetrieving user details...");
    let details = client.users().retrieve(&user.id).await?;
    println!("User details: {details:?}");

    Ok(())
}

fn explain(err: &SkyGenesisError) {
    eprintln!("Error occurred: {err}");
    match err.kind() {
        ErrorKind::Authentication => {
            eprintln!("This is an authentication error. Please check your API key.");
        }
        ErrorKind::Validation => {
            let param = err.param().unwrap_or("<unknown>");
            eprintln!("This is a validation error (param: {param}). Please check your request.");
        }
        ErrorKind::Api => {
            let status = err.status_code().unwrap_or_default();
            eprintln!("This is an API error (status: {status}).");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skygenesis_async=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = match std::env::args().nth(1) {
        Some(key) => Client::new(key)?,
        None => Client::from_env()?,
    };

    if let Err(err) = basic_usage(&client).await {
        explain(&err);
    }

    println!("\nError handling with an invalid key...");
    let invalid = Client::new("invalid-key")?;
    match invalid.users().list(&ListParams::default()).await {
        Ok(page) => println!("Unexpectedly listed {} users", page.data.len()),
        Err(err) => {
            println!("Error caught: {} ({})", err.error_type(), err.code());
            println!("Message: {}", err.message());
        }
    }

    println!("\nRaw response of a one-item user list:");
    let raw: serde_json::Value = client
        .request(
            Verb::Get,
            "/users",
            Some(&ListParams::new().with_limit(1)),
            &RequestOptions::new(),
        )
        .await?;
    println!("{raw:#}");

    Ok(())
}
