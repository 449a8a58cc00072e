//! Watch mode
//!
//! Re-validates whenever the document or any schema source changes. Each
//! change triggers a fresh, independent run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use notify::{Config as WatcherConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::{check, output};
use crate::config::Config;
use crate::schema::registry::SCHEMA_FILE_SUFFIX;

/// Time to wait for a burst of file events to settle
const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    FileChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Validate once, then again on every relevant change until Ctrl-C
pub async fn watch(config: &Config) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let targets = WatchTargets::from_config(config);

    let filter = targets.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                    event.kind
                {
                    for path in event.paths {
                        if filter.is_relevant(&path) {
                            let _ = tx.send(WatcherEvent::FileChanged(path));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        WatcherConfig::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    for dir in targets.directories() {
        if dir.exists() {
            log::debug!("Watching {}", dir.display());
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        }
    }

    report(config);

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(WatcherEvent::FileChanged(path)) => {
                    log::info!("File changed: {}", path.display());
                    tokio::time::sleep(SETTLE_DELAY).await;
                    while rx.try_recv().is_ok() {}
                    report(config);
                }
                Some(WatcherEvent::WatcherError(e)) => {
                    log::error!("File watcher error: {}", e);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("Stopping watch mode");
                break;
            }
        }
    }

    Ok(())
}

/// Run one validation and print its outcome; load errors do not end watch mode
fn report(config: &Config) {
    match check(config).and_then(|result| {
        let rendered = output::render(&result, config.format)?;
        Ok((result.len(), rendered))
    }) {
        Ok((0, rendered)) => {
            if !rendered.is_empty() {
                println!("{rendered}");
            }
            eprintln!("{}: valid", config.document.display());
        }
        Ok((count, rendered)) => {
            println!("{rendered}");
            eprintln!("{}: {} error(s)", config.document.display(), count);
        }
        Err(e) => log::error!("{:#}", e),
    }
}

/// Files whose changes trigger a new run
#[derive(Debug, Clone)]
struct WatchTargets {
    files: Vec<PathBuf>,
    schema_dirs: Vec<PathBuf>,
}

impl WatchTargets {
    fn from_config(config: &Config) -> Self {
        let mut files = vec![absolute(&config.document)];
        let mut schema_dirs = Vec::new();

        match &config.schema_file {
            Some(path) => files.push(absolute(path)),
            None => {
                schema_dirs.extend(config.schema_dirs.iter().map(|(dir, _)| absolute(dir)));
                if let Some(path) = &config.project_config_path {
                    files.push(absolute(path));
                }
            }
        }

        Self { files, schema_dirs }
    }

    /// Directories to register with the watcher
    fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self
            .files
            .iter()
            .filter_map(|file| file.parent().map(Path::to_path_buf))
            .chain(self.schema_dirs.iter().cloned())
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    fn is_relevant(&self, path: &Path) -> bool {
        if self.files.iter().any(|file| file == path) {
            return true;
        }

        let in_schema_dir = path
            .parent()
            .is_some_and(|parent| self.schema_dirs.iter().any(|dir| dir == parent));
        in_schema_dir
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(SCHEMA_FILE_SUFFIX))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
