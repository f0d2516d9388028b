use bisoshi_core::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_resolve_data_dir_explicit_wins() {
    let result = resolve_data_dir(Some("/explicit/data")).unwrap();
    assert_eq!(result, PathBuf::from("/explicit/data"));
}

#[test]
fn test_expand_tilde_uses_home() {
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(expand_tilde("~/x"), PathBuf::from(home).join("x"));
    }
    assert_eq!(expand_tilde("/abs/x"), PathBuf::from("/abs/x"));
}

#[test]
fn test_file_session_store_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FileSessionStore::in_data_dir(temp_dir.path());

    assert_eq!(store.load()?, None);

    store.save("token-123")?;
    assert_eq!(store.load()?.as_deref(), Some("token-123"));

    let session = Session::restore(&store)?;
    assert_eq!(session.bearer().as_deref(), Some("token-123"));

    store.clear()?;
    assert_eq!(store.load()?, None);
    assert!(!Session::restore(&store)?.is_signed_in());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_file_session_store_is_owner_only() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new()?;
    let store = FileSessionStore::in_data_dir(temp_dir.path());
    store.save("token")?;

    let mode = std::fs::metadata(store.path())?.permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    Ok(())
}

#[test]
fn test_memory_session_store() -> Result<()> {
    let store = MemorySessionStore::new();
    store.save("t")?;
    assert_eq!(store.load()?.as_deref(), Some("t"));
    store.clear()?;
    assert_eq!(store.load()?, None);
    Ok(())
}
