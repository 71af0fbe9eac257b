use crate::config::{LevelConfig, SessionConfig};
use crate::data::format::{parse_import, render_import, render_log};
use crate::engines::generation::population::Generation;
use crate::error::{MarioGaError, Result};
use crate::types::Action;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a session's generations are written and where imports are read from
#[derive(Debug, Clone)]
pub struct GenerationStore {
    log_dir: PathBuf,
    import_dir: PathBuf,
    file_name: String,
    level_id: String,
    time_budget: f64,
}

impl GenerationStore {
    pub fn new(session: &SessionConfig, level: &LevelConfig, session_id: i64) -> Self {
        let directory = level.directory_name();
        Self {
            log_dir: session.logs_dir.join(&directory),
            import_dir: session.imports_dir.join(&directory),
            file_name: with_txt_extension(&session_id.to_string()),
            level_id: level.level_id(),
            time_budget: level.time_budget(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.file_name)
    }

    pub fn import_path(&self) -> PathBuf {
        self.import_dir.join(&self.file_name)
    }

    /// Append the generation to both the log and the import file.
    pub fn persist(&self, generation: &Generation, generation_number: usize) -> Result<()> {
        let log = render_log(generation, generation_number, &self.level_id, self.time_budget);
        append(&self.log_path(), &log)?;

        let import = render_import(generation, generation_number, &self.level_id);
        append(&self.import_path(), &import)?;

        debug!(
            "Generation {} written to {}",
            generation_number,
            self.log_path().display()
        );
        Ok(())
    }

    /// Solutions of the last generation in `<imports>/World_w_Stage_s/<name>`.
    pub fn load_import(&self, name: &str) -> Result<Vec<Vec<Action>>> {
        let path = self.import_dir.join(with_txt_extension(name));
        let text = fs::read_to_string(&path).map_err(|e| {
            MarioGaError::Import(format!("Cannot read {}: {}", path.display(), e))
        })?;
        parse_import(&text)
    }
}

fn with_txt_extension(name: &str) -> String {
    if name.ends_with(".txt") {
        name.to_string()
    } else {
        format!("{}.txt", name)
    }
}

fn append(path: &Path, text: &str) -> Result<()> {
    let wrap = |e: std::io::Error| {
        MarioGaError::Persistence(format!("Cannot write {}: {}", path.display(), e))
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(wrap)?;
    file.write_all(text.as_bytes()).map_err(wrap)?;
    Ok(())
}
