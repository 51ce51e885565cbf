//! `eventdesk entities`: print the admin registry.

use eventdesk_core::prelude::*;

use crate::{
    cli::{EntitiesArgs, EntitiesFormat},
    error::{ServerError, ServerResult},
    output::OutputManager,
};

pub fn execute(args: EntitiesArgs, output: OutputManager) -> ServerResult<()> {
    let registry = builtin_registry().map_err(DeskError::from)?;

    match args.format {
        EntitiesFormat::Json => {
            let entries = registry.entries();
            let json =
                serde_json::to_string_pretty(&entries).map_err(|e| ServerError::IoError {
                    message: format!("Failed to serialise registry: {e}"),
                    source: e.into(),
                })?;
            output.data(&json)?;
        }
        EntitiesFormat::Table => {
            output.header("Registered entities")?;
            output.table(&["KEY", "TITLE", "ENDPOINT", "FIELDS"], &rows(&registry))?;
        }
    }

    Ok(())
}

fn rows(registry: &AdminRegistry) -> Vec<Vec<String>> {
    registry
        .entries()
        .into_iter()
        .map(|e| {
            vec![
                e.key.clone(),
                e.config.title.clone(),
                e.config.endpoint.clone(),
                e.config.schema.names().count().to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_builtin_entity() {
        let registry = builtin_registry().unwrap();
        let rows = rows(&registry);
        assert_eq!(rows.len(), registry.len());
        assert!(rows.iter().any(|r| r[0] == "events" && r[2] == "/events"));
        assert!(rows.iter().any(|r| r[0] == "tags"));
    }
}
