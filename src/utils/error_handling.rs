use tokio::runtime::Runtime;

/// Creates a lightweight single-threaded Tokio runtime
///
/// Uses current_thread scheduler to avoid thread explosion (default multi-threaded
/// runtime spawns N worker threads where N = CPU cores). Every fetch worker owns
/// one of these for the lifetime of a single request.
///
/// Returns `Ok(Runtime)` if successful, or `Err(String)` with error message
pub fn create_runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create runtime: {}", e))
}
