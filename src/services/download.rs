use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{Builder, NamedTempFile};

use crate::config::FallbackTool;
use crate::errors::{PotdError, PotdResult};
use crate::http::HttpFetcher;

/// Size of each read from the response body
pub const CHUNK_SIZE: usize = 8 * 1024;

const TEMP_PREFIX: &str = ".potd-";
const TEMP_SUFFIX: &str = ".part";

/// Saves an image URL to disk. Bytes go to a temporary file next to the
/// destination which is renamed into place only once complete, so a failed
/// download never leaves a truncated image behind.
pub struct FileDownloader {
    fallback: FallbackTool,
    program: PathBuf,
}

impl FileDownloader {
    /// Fall back to `curl` or `wget` looked up on `PATH`
    pub fn new(fallback: FallbackTool) -> Self {
        Self::with_program(fallback, fallback.as_str())
    }

    /// Fall back to a specific executable speaking the `fallback` tool's
    /// command line
    pub fn with_program(fallback: FallbackTool, program: impl Into<PathBuf>) -> Self {
        Self {
            fallback,
            program: program.into(),
        }
    }

    pub fn download(&self, http: &dyn HttpFetcher, url: &str, dest: &Path) -> PotdResult<()> {
        log::info!("Downloading '{}' into '{}'", url, dest.display());

        match self.stream(http, url, dest) {
            Ok(written) => {
                log::debug!("Wrote {} bytes to {}", written, dest.display());
                Ok(())
            }
            Err(e @ PotdError::HttpStatus { .. }) if self.fallback != FallbackTool::None => {
                log::warn!("{}; retrying with {}", e, self.fallback.as_str());
                self.external(url, dest).map_err(|fallback_err| {
                    PotdError::DownloadFailed(format!("{}; {}", e, fallback_err))
                })
            }
            Err(e) => Err(e),
        }
    }

    fn stream(&self, http: &dyn HttpFetcher, url: &str, dest: &Path) -> PotdResult<u64> {
        let mut body = http.open(url)?;
        let mut temp = temp_file_for(dest)?;

        let written = copy_chunked(&mut body, temp.as_file_mut())?;
        temp.persist(dest).map_err(|e| PotdError::Io(e.error))?;

        Ok(written)
    }

    fn external(&self, url: &str, dest: &Path) -> PotdResult<()> {
        let tool = self.program.display();
        let temp = temp_file_for(dest)?.into_temp_path();

        let status = Command::new(&self.program)
            .args(fallback_args(self.fallback, url, &temp))
            .status()
            .map_err(|e| PotdError::DownloadFailed(format!("could not run {}: {}", tool, e)))?;

        if !status.success() {
            return Err(PotdError::DownloadFailed(format!(
                "{} exited with {}",
                tool, status
            )));
        }

        temp.persist(dest).map_err(|e| PotdError::Io(e.error))?;
        Ok(())
    }
}

fn temp_file_for(dest: &Path) -> PotdResult<NamedTempFile> {
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    Ok(Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?)
}

/// Command line for the external downloader writing `url` to `out`
fn fallback_args(tool: FallbackTool, url: &str, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = match tool {
        FallbackTool::Curl => vec![
            "--fail".into(),
            "--silent".into(),
            "--show-error".into(),
            "--location".into(),
            "--output".into(),
        ],
        FallbackTool::Wget => vec!["--quiet".into(), "--output-document".into()],
        FallbackTool::None => return Vec::new(),
    };
    args.push(out.as_os_str().to_owned());
    args.push(url.into());
    args
}

/// Copy `reader` to `writer` through a fixed buffer, whatever the body size
pub fn copy_chunked<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }

    writer.flush()?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpFetcher;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Reader that hands out at most `limit` bytes per call and counts calls
    struct Trickle {
        inner: Cursor<Vec<u8>>,
        limit: usize,
        reads: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            let len = buf.len().min(self.limit);
            self.inner.read(&mut buf[..len])
        }
    }

    /// Reader that fails half way through the body
    struct Broken {
        sent: bool,
    }

    impl Read for Broken {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"));
            }
            self.sent = true;
            let len = buf.len().min(16);
            buf[..len].fill(0xFF);
            Ok(len)
        }
    }

    fn large_payload() -> Vec<u8> {
        (0..3 * 1024 * 1024 + 17).map(|i| (i % 251) as u8).collect()
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(TEMP_PREFIX))
            .collect()
    }

    #[test]
    fn test_copy_chunked_uses_bounded_reads() {
        let payload = large_payload();
        let mut reader = Trickle {
            inner: Cursor::new(payload.clone()),
            limit: usize::MAX,
            reads: 0,
        };
        let mut out = Vec::new();

        let written = copy_chunked(&mut reader, &mut out).unwrap();

        assert_eq!(written, payload.len() as u64);
        assert_eq!(out, payload);
        // Every read is capped by the chunk buffer
        assert!(reader.reads >= payload.len() / CHUNK_SIZE);
    }

    #[test]
    fn test_download_large_payload_is_byte_identical() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("day").join("nasa-1.jpg");
        let payload = large_payload();
        let served = payload.clone();

        let mut http = MockHttpFetcher::new();
        http.expect_open()
            .withf(|url| url == "https://example.com/big.jpg")
            .times(1)
            .returning(move |_| {
                Ok(Box::new(Trickle {
                    inner: Cursor::new(served.clone()),
                    limit: 1000,
                    reads: 0,
                }) as Box<dyn Read>)
            });

        FileDownloader::new(FallbackTool::None)
            .download(&http, "https://example.com/big.jpg", &dest)
            .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), payload);
        assert!(leftovers(dest.parent().unwrap()).is_empty());
    }

    #[test]
    fn test_failed_stream_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("bing-1.jpg");

        let mut http = MockHttpFetcher::new();
        http.expect_open()
            .returning(|_| Ok(Box::new(Broken { sent: false }) as Box<dyn Read>));

        let err = FileDownloader::new(FallbackTool::Curl)
            .download(&http, "https://example.com/a.jpg", &dest)
            .unwrap_err();

        assert!(matches!(err, PotdError::Io(_)));
        assert!(!dest.exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_http_status_without_fallback_is_reported() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ng-1.jpg");

        let mut http = MockHttpFetcher::new();
        http.expect_open().returning(|url| {
            Err(PotdError::HttpStatus {
                url: url.to_string(),
                status: 403,
            })
        });

        let err = FileDownloader::new(FallbackTool::None)
            .download(&http, "https://example.com/a.jpg", &dest)
            .unwrap_err();

        assert!(matches!(err, PotdError::HttpStatus { status: 403, .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_existing_file_is_replaced() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("wiki-1.jpg");
        fs::write(&dest, b"old image").unwrap();

        let mut http = MockHttpFetcher::new();
        http.expect_open()
            .returning(|_| Ok(Box::new(Cursor::new(b"new image".to_vec())) as Box<dyn Read>));

        FileDownloader::new(FallbackTool::None)
            .download(&http, "https://example.com/a.jpg", &dest)
            .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new image");
    }

    fn forbidden(http: &mut MockHttpFetcher) {
        http.expect_open().times(1).returning(|url| {
            Err(PotdError::HttpStatus {
                url: url.to_string(),
                status: 403,
            })
        });
    }

    /// Executable standing in for curl: runs `body` as a shell script
    #[cfg(unix)]
    fn fake_curl(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-curl");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_http_status_falls_back_to_external_tool() {
        let tools = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ng-1.jpg");
        let curl = fake_curl(
            tools.path(),
            r#"while [ $# -gt 0 ]; do
  if [ "$1" = "--output" ]; then printf 'from-curl' > "$2"; exit 0; fi
  shift
done
exit 2"#,
        );

        let mut http = MockHttpFetcher::new();
        forbidden(&mut http);

        FileDownloader::with_program(FallbackTool::Curl, curl)
            .download(&http, "https://example.com/a.jpg", &dest)
            .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"from-curl");
        assert!(leftovers(temp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_both_paths_failing_is_download_failed() {
        let tools = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ng-1.jpg");
        let curl = fake_curl(tools.path(), "echo 'curl: (22) 403' >&2\nexit 22");

        let mut http = MockHttpFetcher::new();
        forbidden(&mut http);

        let err = FileDownloader::with_program(FallbackTool::Curl, curl)
            .download(&http, "https://example.com/a.jpg", &dest)
            .unwrap_err();

        match err {
            PotdError::DownloadFailed(message) => assert!(message.contains("HTTP status 403")),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!dest.exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_missing_fallback_program_is_download_failed() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ng-1.jpg");

        let mut http = MockHttpFetcher::new();
        forbidden(&mut http);

        let err = FileDownloader::with_program(FallbackTool::Wget, temp.path().join("no-such-wget"))
            .download(&http, "https://example.com/a.jpg", &dest)
            .unwrap_err();

        assert!(matches!(err, PotdError::DownloadFailed(_)));
        assert!(!dest.exists());
        assert!(leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_fallback_args() {
        let out = Path::new("/tmp/.potd-x.part");

        let curl = fallback_args(FallbackTool::Curl, "https://e.com/a.jpg", out);
        assert_eq!(curl.first().unwrap(), "--fail");
        assert_eq!(curl[curl.len() - 2].as_os_str(), out.as_os_str());
        assert_eq!(curl.last().unwrap(), "https://e.com/a.jpg");

        let wget = fallback_args(FallbackTool::Wget, "https://e.com/a.jpg", out);
        assert_eq!(
            wget,
            vec![
                OsString::from("--quiet"),
                OsString::from("--output-document"),
                OsString::from("/tmp/.potd-x.part"),
                OsString::from("https://e.com/a.jpg"),
            ]
        );

        assert!(fallback_args(FallbackTool::None, "https://e.com/a.jpg", out).is_empty());
    }
}
