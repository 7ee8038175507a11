// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::commands::SubCmd;
use claimlink_logging::{LogFormat, LogOutputDest};
use clap::Parser;
use std::path::PathBuf;

// Please do not remove the blank lines in these doc comments.
// They are used for inserting line breaks when the help menu is rendered in the UI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    /// Available sub commands.
    #[clap(subcommand)]
    pub command: SubCmd,

    /// Specify the logging format.
    ///
    /// Valid values are "default" or "json".
    ///
    /// If the argument is not used, the default format will be applied.
    #[clap(long, global = true, value_parser = LogFormat::parse_from_str, verbatim_doc_comment)]
    pub log_format: Option<LogFormat>,

    /// Specify the logging output destination.
    ///
    /// Valid values are "stdout", "data-dir", or a custom path.
    ///
    /// `data-dir` is the default value.
    ///
    /// The data directory location is platform specific:
    ///  - Linux: $HOME/.local/share/claimlink/client/logs
    ///  - macOS: $HOME/Library/Application Support/claimlink/client/logs
    ///  - Windows: C:\Users\<username>\AppData\Roaming\claimlink\client\logs
    #[allow(rustdoc::invalid_html_tags)]
    #[clap(long, global = true, value_parser = LogOutputDest::parse_from_str, verbatim_doc_comment, default_value = "data-dir")]
    pub log_output_dest: LogOutputDest,

    /// Specify the maximum number of uncompressed log files to store.
    ///
    /// This argument is ignored if `log_output_dest` is set to "stdout"
    ///
    /// After reaching this limit, the older files are archived to save space.
    #[clap(long, global = true, verbatim_doc_comment)]
    pub max_log_files: Option<usize>,

    /// Specify the maximum number of archived log files to store.
    ///
    /// This argument is ignored if `log_output_dest` is set to "stdout"
    ///
    /// After reaching this limit, the older archived files are deleted.
    #[clap(long, global = true, verbatim_doc_comment)]
    pub max_archived_log_files: Option<usize>,

    /// Path of the local ledger file.
    ///
    /// Defaults to local_ledger.json in the client data directory.
    #[clap(long, global = true, verbatim_doc_comment)]
    pub ledger: Option<PathBuf>,
}
