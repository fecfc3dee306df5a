use std::io;

use crate::usecase::services::ingest_service::PickedFile;

/// Runs file IO on the blocking pool so the UI keeps rendering while it waits.
pub async fn run_blocking<F, T>(f: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .unwrap_or_else(|err| Err(io::Error::other(err)))
}

/// One read per file: the whole contents or the error, nothing partial.
pub async fn read_picked_file(file: &PickedFile) -> io::Result<Vec<u8>> {
    let path = file.path.clone();
    run_blocking(move || std::fs::read(path)).await
}
