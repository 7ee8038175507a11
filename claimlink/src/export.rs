// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Plain text import and export of link lists, one URL per line.

use crate::link::{GeneratedLink, UploadedLinkList};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "getstashed_links.txt";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("There are no links to export")]
    NoLinks,
    #[error("Could not access link file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn join_links(links: &[GeneratedLink]) -> String {
    links
        .iter()
        .map(GeneratedLink::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes `links` to `path`. When `path` is a directory the file is named
/// [`DEFAULT_EXPORT_FILE_NAME`] inside it. Returns the path written to.
pub fn write_links_file(path: &Path, links: &[GeneratedLink]) -> Result<PathBuf, ExportError> {
    if links.is_empty() {
        return Err(ExportError::NoLinks);
    }
    let path = if path.is_dir() {
        path.join(DEFAULT_EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    std::fs::write(&path, join_links(links)).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!("Wrote {} links to {path:?}", links.len());
    Ok(path)
}

pub fn parse_link_list(text: &str) -> UploadedLinkList {
    UploadedLinkList::parse(text)
}

pub fn read_link_list(path: &Path) -> Result<UploadedLinkList, ExportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let list = parse_link_list(&text);
    debug!("Read {} links from {path:?}", list.len());
    Ok(list)
}
