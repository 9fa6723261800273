//! `recap setup` command - create the Learning Tasks database in Notion

use crate::cli::{Cli, OutputFormat};
use recap_core::config::Config;
use recap_core::error::Result;
use recap_core::notion::learning_tasks_schema;

pub fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let client = config.notion_client()?;
    let parent_page_id = config.parent_page_id()?;

    let database_id =
        client.create_database(parent_page_id, "Learning Tasks", learning_tasks_schema())?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "database_id": database_id }));
        }
        OutputFormat::Human => {
            println!("Database created successfully!");
            println!("Database ID: {}", database_id);
            if !cli.quiet {
                println!();
                println!(
                    "Add this id to your config as notion.tasks_database_id \
                     (or set TASKS_DATABASE_ID)."
                );
            }
        }
    }

    Ok(())
}
