// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use arboard::Clipboard;
use claimlink::ClaimEvent;
use color_eyre::eyre::{eyre, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives a progress bar from the claim events, printing every failed link above it.
/// The returned handle resolves once the claim run has completed or the sender is dropped.
pub fn track_claim_progress(
    mut event_receiver: tokio::sync::mpsc::Receiver<ClaimEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let pb = ProgressBar::new(0);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(err) => warn!("Invalid progress bar template: {err}"),
        }

        while let Some(event) = event_receiver.recv().await {
            match event {
                ClaimEvent::Attempting { total, url, .. } => {
                    pb.set_length(total as u64);
                    pb.set_message(url);
                }
                ClaimEvent::Claimed { .. } => pb.inc(1),
                ClaimEvent::Failed { url, error, .. } => {
                    pb.println(format!("Failed to claim {url}: {error}"));
                    pb.inc(1);
                }
                ClaimEvent::Completed { .. } => {
                    pb.finish_and_clear();
                    break;
                }
            }
        }
    })
}

pub fn copy_to_clipboard(text: String) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| {
        error!("Error opening clipboard: {e:?}");
        eyre!("Failed to copy links. Please try again.")
    })?;
    clipboard.set_text(text).map_err(|e| {
        error!("Error writing to clipboard: {e:?}");
        eyre!("Failed to copy links. Please try again.")
    })?;
    Ok(())
}
