use serde_json::json;

use pairdex_core::PairDirectory;

use crate::error::CliError;

use super::CommandResult;

pub async fn run(directory: PairDirectory) -> Result<CommandResult, CliError> {
    let resolution = directory.resolve_detailed().await;

    let data = json!({
        "pair_count": resolution.pairs.len(),
        "pairs": &resolution.pairs,
    });

    Ok(CommandResult::ok(data).with_resolution(&resolution))
}
