// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use std::{
    env,
    ffi::OsStr,
    fmt, io,
    io::Write,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

/// Builds a non-blocking writer into `<dir>/<binary name>.log`.
///
/// - `max_bytes`: size a log can grow to before it is rotated.
/// - `uncompressed_files`: rotated files kept as plain text, must be lower than `max_files`.
/// - `max_files`: total number of files kept; the oldest are deleted.
pub(super) fn file_rotater(
    dir: &PathBuf,
    max_bytes: usize,
    uncompressed_files: usize,
    max_files: usize,
) -> (NonBlocking, WorkerGuard) {
    let binary_name = env::current_exe()
        .map(|path| {
            path.file_stem()
                .unwrap_or(OsStr::new("claimlink"))
                .to_string_lossy()
                .into_owned()
        })
        .unwrap_or_else(|_| "claimlink".to_string());

    let file_appender = FileRotateAppender::make_rotate_appender(
        dir,
        format!("{binary_name}.log"),
        AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::OnRotate(uncompressed_files),
    );

    tracing_appender::non_blocking::NonBlockingBuilder::default()
        // keep every line, a claim run is short lived
        .lossy(false)
        .finish(file_appender)
}

/// Rotating file writer: the newest file keeps its name so it can be followed with `tail -f`.
pub(super) struct FileRotateAppender {
    writer: FileRotate<AppendTimestamp>,
}

impl FileRotateAppender {
    pub(super) fn make_rotate_appender(
        directory: impl AsRef<Path>,
        file_name_prefix: impl AsRef<Path>,
        file_limit: AppendTimestamp,
        max_log_size: ContentLimit,
        compression: Compression,
    ) -> Self {
        let path = directory.as_ref().join(file_name_prefix.as_ref());
        let writer = FileRotate::new(
            path,
            file_limit,
            max_log_size,
            compression,
            #[cfg(unix)]
            None,
        );

        Self { writer }
    }
}

impl Write for FileRotateAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl fmt::Debug for FileRotateAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRotateAppender").finish()
    }
}
