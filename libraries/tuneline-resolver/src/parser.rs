/// Resolver output parsing
use serde::Deserialize;
use tuneline_core::{Result, SearchResultSet, Track, TrackId, TunelineError};

/// Thumbnail width picked when the resolver offers several sizes
pub const PREFERRED_THUMBNAIL_WIDTH: u32 = 120;

/// One line of `--dump-json --flat-playlist` output, only the fields we read
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    thumbnails: Option<Vec<RawThumbnail>>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    width: Option<f64>,
}

impl RawEntry {
    fn into_track(self) -> Option<Track> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;

        Some(Track {
            id: TrackId::new(id),
            source_ref: self.url.or(self.webpage_url).unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            duration_formatted: format_duration(self.duration.unwrap_or(0.0)),
            channel_name: self.uploader.unwrap_or_default(),
            thumbnail_url: pick_thumbnail(self.thumbnails.unwrap_or_default()),
        })
    }
}

/// Render seconds as `HH:MM:SS`
///
/// Fractions are truncated, negative or non-finite input renders as zero.
/// Hours are not wrapped at 24, so a 25 hour stream reads `25:00:00` rather
/// than the `01:00:00` a time-of-day rendering would give. A record with no
/// duration renders as zero instead of failing the search.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };

    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Prefer the candidate at `PREFERRED_THUMBNAIL_WIDTH`, else the first one
fn pick_thumbnail(candidates: Vec<RawThumbnail>) -> Option<String> {
    let preferred = f64::from(PREFERRED_THUMBNAIL_WIDTH);

    let mut first = None;
    for (i, candidate) in candidates.into_iter().enumerate() {
        let matches = candidate
            .width
            .is_some_and(|w| (w - preferred).abs() < f64::EPSILON);
        if matches && candidate.url.is_some() {
            return candidate.url;
        }
        if i == 0 {
            first = candidate.url;
        }
    }
    first
}

/// Parse search output: one JSON record per line
///
/// Blank lines are tolerated. A single malformed line fails the whole parse.
/// Records without an id cannot be used in playlists and are skipped.
pub fn parse_search_output(output: &str) -> Result<SearchResultSet> {
    let mut tracks = Vec::new();

    for (index, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let entry: RawEntry = serde_json::from_str(line).map_err(|e| {
            tracing::error!("Error parsing resolver output on line {}: {}", index + 1, e);
            TunelineError::parse(format!("line {}: {}", index + 1, e))
        })?;

        match entry.into_track() {
            Some(track) => tracks.push(track),
            None => tracing::warn!("Skipping resolver record without id on line {}", index + 1),
        }
    }

    Ok(tracks)
}

/// Parse stream output: the direct URL, surrounded by whitespace
///
/// When the tool prints several lines (split audio/video formats) the first
/// one is used. It must be an http(s) URL made of visible ASCII, since it
/// ends up in a `Location` header.
pub fn parse_stream_output(output: &str) -> Result<String> {
    let url = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(TunelineError::StreamResolutionEmpty)?;

    if !is_usable_stream_url(url) {
        tracing::error!("Resolver printed an unusable stream URL: {:?}", url);
        return Err(TunelineError::parse("stream URL is not a valid http(s) URL"));
    }

    Ok(url.to_string())
}

fn is_usable_stream_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    rest.is_some_and(|rest| !rest.is_empty()) && url.bytes().all(|b| b.is_ascii_graphic())
}
