use crate::{Sentence, Transcript, parse_conllu};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

const TEXT_EXTENSION: &str = "txt";
const CONLLU_EXTENSION: &str = "conllu";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input not found: {0}")]
    Missing(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Group {group} has no transcripts in {path}")]
    NoTranscripts { group: String, path: PathBuf },

    #[error("Group {group} has no sentences in {path}")]
    EmptyTranscripts { group: String, path: PathBuf },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Loads a single transcript file.
///
/// `.conllu` files are read as analysed sentences, anything else as one raw sentence per non-empty line.
///
/// # Arguments
/// * `group` - respondent group the transcript belongs to.
/// * `path` - transcript file.
///
/// # Returns
/// * The transcript or a load error.
pub fn load_transcript(group: &str, path: &Path) -> LoadResult<Transcript> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::Missing(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let transcript = if has_extension(path, CONLLU_EXTENSION) {
        let sentences = parse_conllu(&content)
            .into_iter()
            .map(Sentence::Analyzed)
            .collect();
        Transcript::new(group, &source, &content, sentences)
    } else {
        Transcript::from_text(group, &source, &content)
    };

    debug!(
        "Loaded transcript {} of group {} with {} sentences",
        source,
        group,
        transcript.sentences.len()
    );

    Ok(transcript)
}

/// Loads every transcript of a respondent group folder.
///
/// Only `.txt` and `.conllu` files directly inside the folder are read, in file name order.
///
/// # Arguments
/// * `group` - respondent group label.
/// * `dir` - folder holding the group's transcripts.
///
/// # Returns
/// * Non-empty vector of transcripts with at least one sentence in total, or a load error.
pub fn load_group(group: &str, dir: &Path) -> LoadResult<Vec<Transcript>> {
    if !dir.exists() {
        return Err(LoadError::Missing(dir.to_path_buf()));
    }

    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file()
            && (has_extension(&path, TEXT_EXTENSION) || has_extension(&path, CONLLU_EXTENSION))
        {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(LoadError::NoTranscripts {
            group: group.to_string(),
            path: dir.to_path_buf(),
        });
    }

    let transcripts = files
        .iter()
        .map(|path| load_transcript(group, path))
        .collect::<LoadResult<Vec<_>>>()?;

    if transcripts.iter().all(Transcript::is_empty) {
        return Err(LoadError::EmptyTranscripts {
            group: group.to_string(),
            path: dir.to_path_buf(),
        });
    }

    info!(
        "Loaded {} transcripts for group {} from {}",
        transcripts.len(),
        group,
        dir.display()
    );

    Ok(transcripts)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn it_should_load_text_and_conllu_in_name_order() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.txt"), "Druhá věta.\n\n")?;
        fs::write(
            dir.path().join("a.conllu"),
            "1\tStrach\tstrach\tNOUN\n\n",
        )?;
        fs::write(dir.path().join("notes.md"), "ignored")?;

        let transcripts = load_group("bankers", dir.path())?;
        assert_eq!(transcripts.len(), 2);
        assert_eq!(transcripts[0].source, "a.conllu");
        assert!(matches!(transcripts[0].sentences[0], Sentence::Analyzed(_)));
        assert_eq!(
            transcripts[1].sentences,
            vec![Sentence::Raw("Druhá věta.".to_owned())]
        );
        assert!(transcripts.iter().all(|t| t.group == "bankers"));
        Ok(())
    }

    #[test]
    fn it_should_accept_upper_case_extensions() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("INTERVIEW.TXT"), "věta\n")?;
        assert_eq!(load_group("workers", dir.path())?.len(), 1);
        Ok(())
    }

    #[test]
    fn it_should_fail_on_missing_folder() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope");
        assert!(matches!(
            load_group("bankers", &missing),
            Err(LoadError::Missing(_))
        ));
        assert!(matches!(
            load_transcript("bankers", &missing.join("a.txt")),
            Err(LoadError::Missing(_))
        ));
        Ok(())
    }

    #[test]
    fn it_should_fail_on_empty_input() -> Result<()> {
        let dir = tempdir()?;
        assert!(matches!(
            load_group("bankers", dir.path()),
            Err(LoadError::NoTranscripts { .. })
        ));

        fs::write(dir.path().join("a.txt"), "\n   \n")?;
        assert!(matches!(
            load_group("bankers", dir.path()),
            Err(LoadError::EmptyTranscripts { .. })
        ));
        Ok(())
    }
}
