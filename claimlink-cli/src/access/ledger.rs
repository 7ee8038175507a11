// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::data_dir::get_client_data_dir_path;
use claimlink::local::{LedgerState, LocalLedger};
use color_eyre::{
    eyre::{Context, Result},
    Section,
};
use std::path::{Path, PathBuf};

const LEDGER_FILE_NAME: &str = "local_ledger.json";

/// Where the ledger lives: `custom_path`, or the client data dir.
pub fn ledger_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(get_client_data_dir_path()?.join(LEDGER_FILE_NAME)),
    }
}

/// Loads the ledger at `path`, or an empty one if the file does not exist yet.
pub fn load_ledger(path: &Path) -> Result<LocalLedger> {
    if !path.exists() {
        info!("No local ledger at {path:?}, starting an empty one");
        return Ok(LocalLedger::new());
    }

    let data = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read the local ledger at {path:?}"))?;
    let state: LedgerState = serde_json::from_str(&data)
        .wrap_err("Failed to parse the local ledger")
        .with_suggestion(|| "point --ledger to another file to start from an empty ledger")?;
    debug!(
        "Loaded local ledger with {} accounts and {} links",
        state.accounts.len(),
        state.links.len()
    );
    Ok(LocalLedger::from_state(state))
}

pub async fn save_ledger(ledger: &LocalLedger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(&ledger.state().await)?;
    std::fs::write(path, serialized)
        .wrap_err_with(|| format!("Failed to write the local ledger to {path:?}"))?;
    debug!("Saved local ledger to {path:?}");
    Ok(())
}
