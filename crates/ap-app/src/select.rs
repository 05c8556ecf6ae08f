use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use dialoguer::FuzzySelect;
use dialoguer::theme::ColorfulTheme;

/// Container extensions offered by the selection front end.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Audio extensions considered when matching a companion track.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "flac"];

/// Files in `dir` whose extension matches `extensions`, sorted by name.
pub fn media_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("could not list {}", dir.display()))?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| extensions.iter().any(|x| ext.eq_ignore_ascii_case(x)))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Pick the video to play: the lone candidate, or a fuzzy-select prompt.
///
/// # Errors
/// Returns an error when the directory holds no video files or the prompt
/// is cancelled.
pub fn choose_video(dir: &Path) -> Result<PathBuf> {
    let files = media_files(dir, VIDEO_EXTENSIONS)?;
    if files.is_empty() {
        return Err(anyhow!(
            "no video files found in {} (looked for: {})",
            dir.display(),
            VIDEO_EXTENSIONS.join(", ")
        ));
    }
    if files.len() == 1 {
        println!("Using: {}", files[0].display());
        return Ok(files[0].clone());
    }

    let labels: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a video")
        .default(0)
        .items(&labels)
        .interact()
        .context("selection cancelled")?;
    Ok(files[selection].clone())
}

/// Find a companion audio track for `video` in `dir`: a file whose stem
/// matches the video's (case-insensitive), else a lone audio file.
#[must_use]
pub fn match_audio(video: &Path, dir: &Path) -> Option<PathBuf> {
    let candidates = media_files(dir, AUDIO_EXTENSIONS).ok()?;
    if candidates.is_empty() {
        return None;
    }
    let video_stem = video.file_stem()?.to_str()?.to_ascii_lowercase();
    let by_stem = candidates.iter().find(|p| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.eq_ignore_ascii_case(&video_stem))
    });
    match by_stem {
        Some(p) => Some(p.clone()),
        None if candidates.len() == 1 => Some(candidates[0].clone()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn media_files_filters_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "clip.mp4");
        touch(tmp.path(), "clip.MKV");
        touch(tmp.path(), "notes.txt");
        let files = media_files(tmp.path(), VIDEO_EXTENSIONS).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn audio_matched_by_stem() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "apple.mp4");
        touch(tmp.path(), "apple.mp3");
        touch(tmp.path(), "other.wav");
        let audio = match_audio(&tmp.path().join("apple.mp4"), tmp.path()).unwrap();
        assert_eq!(audio.file_name().unwrap(), "apple.mp3");
    }

    #[test]
    fn lone_audio_file_matches_any_video() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "video.mp4");
        touch(tmp.path(), "soundtrack.ogg");
        let audio = match_audio(&tmp.path().join("video.mp4"), tmp.path()).unwrap();
        assert_eq!(audio.file_name().unwrap(), "soundtrack.ogg");
    }

    #[test]
    fn ambiguous_audio_matches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "video.mp4");
        touch(tmp.path(), "a.mp3");
        touch(tmp.path(), "b.mp3");
        assert!(match_audio(&tmp.path().join("video.mp4"), tmp.path()).is_none());
    }
}
