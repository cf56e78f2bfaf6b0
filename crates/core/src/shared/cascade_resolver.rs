use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::CASCADE_BASE_URL;

#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write cascade to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Download location of a stock OpenCV cascade.
pub fn cascade_url(name: &str) -> String {
    format!("{CASCADE_BASE_URL}/{name}")
}

/// Resolve a cascade file by name, checking local copies before downloading.
///
/// Resolution order:
/// 1. `search_dirs`, in the order given (user override, then system installs)
/// 2. User cache directory (platform-specific)
/// 3. Download from `url` into the cache
pub fn resolve(
    name: &str,
    url: &str,
    search_dirs: &[PathBuf],
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    let cache_dir = cascade_cache_dir()?;
    resolve_with_cache(name, url, search_dirs, &cache_dir, progress)
}

fn resolve_with_cache(
    name: &str,
    url: &str,
    search_dirs: &[PathBuf],
    cache_dir: &Path,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    if let Some(found) = search_dirs
        .iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
    {
        log::debug!("Using local cascade {}", found.display());
        return Ok(found);
    }

    let cached_path = cache_dir.join(name);
    if cached_path.is_file() {
        log::debug!("Using cached cascade {}", cached_path.display());
        return Ok(cached_path);
    }

    log::info!("Downloading {name} from {url}");
    fs::create_dir_all(cache_dir).map_err(CascadeResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific cascade cache directory.
///
/// - macOS: `~/Library/Application Support/DrowsiGuard/cascades/`
/// - Linux: `$XDG_CACHE_HOME/DrowsiGuard/cascades/` or `~/.cache/DrowsiGuard/cascades/`
/// - Windows: `%LOCALAPPDATA%/DrowsiGuard/cascades/`
pub fn cascade_cache_dir() -> Result<PathBuf, CascadeResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("DrowsiGuard").join("cascades"))
            .ok_or(CascadeResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("DrowsiGuard").join("cascades"))
            .ok_or(CascadeResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), CascadeResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), CascadeResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| CascadeResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let write_err = |source| CascadeResolveError::Write {
        path: temp_path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(temp_path).map_err(write_err)?;
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(temp_path, dest).map_err(|e| CascadeResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BAD_URL: &str = "http://invalid.nonexistent.example.com/cascade.xml";

    #[test]
    fn test_cascade_url_joins_base() {
        assert_eq!(
            cascade_url("haarcascade_eye.xml"),
            format!("{CASCADE_BASE_URL}/haarcascade_eye.xml")
        );
    }

    #[test]
    fn test_resolve_prefers_search_dir_over_cache() {
        let tmp = TempDir::new().unwrap();
        let user_dir = tmp.path().join("user");
        let cache_dir = tmp.path().join("cache");
        fs::create_dir_all(&user_dir).unwrap();
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(user_dir.join("eye.xml"), b"user").unwrap();
        fs::write(cache_dir.join("eye.xml"), b"cached").unwrap();

        let path = resolve_with_cache("eye.xml", BAD_URL, &[user_dir.clone()], &cache_dir, None)
            .unwrap();
        assert_eq!(path, user_dir.join("eye.xml"));
    }

    #[test]
    fn test_resolve_search_dirs_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(second.join("face.xml"), b"second").unwrap();

        let path = resolve_with_cache(
            "face.xml",
            BAD_URL,
            &[first, second.clone()],
            &tmp.path().join("cache"),
            None,
        )
        .unwrap();
        assert_eq!(path, second.join("face.xml"));
    }

    #[test]
    fn test_resolve_falls_back_to_cache() {
        let tmp = TempDir::new().unwrap();
        let cache_dir = tmp.path().join("cache");
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(cache_dir.join("smile.xml"), b"cached").unwrap();

        let path = resolve_with_cache(
            "smile.xml",
            BAD_URL,
            &[tmp.path().join("missing")],
            &cache_dir,
            None,
        )
        .unwrap();
        assert_eq!(path, cache_dir.join("smile.xml"));
    }

    #[test]
    fn test_resolve_ignores_directory_with_cascade_name() {
        let tmp = TempDir::new().unwrap();
        let user_dir = tmp.path().join("user");
        fs::create_dir_all(user_dir.join("eye.xml")).unwrap();
        let cache_dir = tmp.path().join("cache");
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(cache_dir.join("eye.xml"), b"cached").unwrap();

        let path = resolve_with_cache("eye.xml", BAD_URL, &[user_dir], &cache_dir, None).unwrap();
        assert_eq!(path, cache_dir.join("eye.xml"));
    }

    #[test]
    fn test_cascade_cache_dir_returns_path() {
        let dir = cascade_cache_dir();
        assert!(dir.is_ok());
        let path = dir.unwrap();
        assert!(path.to_string_lossy().contains("DrowsiGuard"));
        assert!(path.to_string_lossy().contains("cascades"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cascade.xml");
        let result = download(BAD_URL, &dest, None);
        assert!(matches!(result, Err(CascadeResolveError::Download { .. })));
    }

    #[test]
    fn test_download_atomic_no_partial_on_failure() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cascade.xml");
        let _ = download(BAD_URL, &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn test_resolve_missing_everywhere_reports_download_error() {
        let tmp = TempDir::new().unwrap();
        let cache_dir = tmp.path().join("cache");
        let result = resolve_with_cache("none.xml", BAD_URL, &[], &cache_dir, None);
        assert!(result.is_err());
        assert!(!cache_dir.join("none.xml").exists());
    }
}
