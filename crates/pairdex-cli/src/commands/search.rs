use serde_json::json;

use pairdex_core::{search, PairDirectory};

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &SearchArgs, directory: PairDirectory) -> Result<CommandResult, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    if args.limit == Some(0) {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let resolution = directory.resolve_detailed().await;

    let mut results = search(query, &resolution.pairs);
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    let data = json!({
        "query": query,
        "result_count": results.len(),
        "results": results,
    });

    Ok(CommandResult::ok(data).with_resolution(&resolution))
}
