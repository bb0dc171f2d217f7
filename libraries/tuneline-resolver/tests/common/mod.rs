/// Common test utilities: fake resolver scripts run through `/bin/sh`
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tuneline_resolver::ResolverOptions;

/// A shell script standing in for the resolver binary
pub struct FakeResolver {
    pub dir: TempDir,
    pub script: PathBuf,
}

impl FakeResolver {
    /// Write `body` as a script. Every run appends a line to `calls.log`
    /// and writes its arguments, one per line, to `args.txt`.
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fake-resolver.sh");
        let contents = format!(
            "here=$(dirname \"$0\")\necho call >> \"$here/calls.log\"\nprintf '%s\\n' \"$@\" > \"$here/args.txt\"\n{}\n",
            body
        );
        std::fs::write(&script, contents).unwrap();
        Self { dir, script }
    }

    /// Options that run the script with `sh`, so it never needs exec permission
    pub fn options(&self) -> ResolverOptions {
        self.options_with_timeout(Duration::from_secs(10))
    }

    pub fn options_with_timeout(&self, timeout: Duration) -> ResolverOptions {
        ResolverOptions {
            binary_path: PathBuf::from("/bin/sh"),
            extra_args: vec![self.script.to_string_lossy().into_owned()],
            timeout,
            ..ResolverOptions::default()
        }
    }

    pub fn calls(&self) -> usize {
        read_lines(&self.dir.path().join("calls.log")).len()
    }

    pub fn last_args(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("args.txt"))
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Script body printing ten search records, the first lasting 125 seconds
pub const TEN_RESULTS: &str = r#"i=1
while [ $i -le 10 ]; do
  printf '{"id":"lofi%d","url":"https://www.youtube.com/watch?v=lofi%d","title":"Lofi %d","duration":%d,"uploader":"Beats","thumbnails":[{"url":"https://i/%d-big.jpg","width":480},{"url":"https://i/%d.jpg","width":120}]}\n' $i $i $i $((i * 125)) $i $i
  i=$((i + 1))
done
echo"#;
