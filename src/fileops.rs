//! File operations on content records and their asset directories.
//!
//! Every operation inspects the filesystem before acting and never
//! overwrites an existing destination. Nothing is transactional: a batch
//! of moves runs as independent tasks, and a failed item is reported
//! without undoing or cancelling the others.

use std::{
    fs,
    io::ErrorKind,
    iter,
    path::{Path, PathBuf},
};

use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    frontmatter::replace_title,
    paths::asset_dir_for,
    record::ContentRecord,
    slug::slugify,
};

/// A pending relocation of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOperation {
    /// Current location.
    pub(crate) origin: PathBuf,
    /// Target location.
    pub(crate) destination: PathBuf,
}

impl MoveOperation {
    /// Create a move from `origin` to `destination`.
    pub(crate) fn new(origin: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Return the paired move of the asset directory, if the paths have extensions.
    pub(crate) fn asset(&self) -> Option<Self> {
        Some(Self::new(
            asset_dir_for(&self.origin)?,
            asset_dir_for(&self.destination)?,
        ))
    }
}

/// What happened to a record's asset directory during a move.
#[derive(Debug)]
pub enum AssetOutcome {
    /// No asset directory existed.
    Absent,
    /// The asset directory was moved to this path.
    Moved(PathBuf),
    /// The asset directory exists but could not be moved.
    Failed(Error),
    /// The file move failed, so the asset directory was left in place.
    Skipped,
}

/// Result of moving a record file together with its asset directory.
#[derive(Debug)]
pub struct MoveReport {
    /// The requested file move.
    pub(crate) operation: MoveOperation,
    /// Outcome of the file move.
    pub(crate) file: Result<()>,
    /// Outcome of the asset directory move.
    pub(crate) asset: AssetOutcome,
}

/// Totals for a batch of moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records whose file moved.
    pub(crate) moved: usize,
    /// Items that failed, files and asset directories alike.
    pub(crate) failed: usize,
}

/// Move a single file or directory.
///
/// Fails when the origin is missing or the destination exists; creates
/// the destination's parent directory as needed.
pub async fn move_path(operation: &MoveOperation) -> Result<()> {
    let MoveOperation {
        origin,
        destination,
    } = operation;

    match tokio::fs::symlink_metadata(origin).await {
        Ok(_) => {}
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(Error::PathMissing {
                path: origin.clone(),
            });
        }
        Err(error) => return Err(Error::file_op("inspect", origin, error)),
    }
    if tokio::fs::symlink_metadata(destination).await.is_ok() {
        return Err(Error::PathExists {
            path: destination.clone(),
        });
    }
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|error| Error::file_op("create", parent, error))?;
    }

    tokio::fs::rename(origin, destination)
        .await
        .map_err(|error| Error::FileMove {
            from: origin.clone(),
            to: destination.clone(),
            source: error,
        })
}

/// Move a record file and then its asset directory.
///
/// The asset directory only follows a file that moved.
pub async fn move_with_asset(operation: MoveOperation) -> MoveReport {
    let file = move_path(&operation).await;

    let asset = match operation.asset() {
        // The asset directory stays beside a file that did not move.
        Some(_) if file.is_err() => AssetOutcome::Skipped,
        Some(asset) => {
            if is_dir(&asset.origin).await {
                match move_path(&asset).await {
                    Ok(()) => AssetOutcome::Moved(asset.destination),
                    Err(error) => AssetOutcome::Failed(error),
                }
            } else {
                AssetOutcome::Absent
            }
        }
        None => AssetOutcome::Absent,
    };

    MoveReport {
        operation,
        file,
        asset,
    }
}

/// Run every move as its own task and wait for all of them.
///
/// Failures are logged per item through `diagnostics`.
pub async fn move_batch(
    operations: Vec<MoveOperation>,
    diagnostics: &mut Diagnostics,
) -> BatchSummary {
    let mut tasks = JoinSet::new();
    for operation in operations {
        tasks.spawn(move_with_asset(operation));
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let report = match joined {
            Ok(report) => report,
            Err(error) => {
                summary.failed += 1;
                diagnostics.warn(format!("move task did not complete: {error}"));
                continue;
            }
        };
        record_report(&report, &mut summary, diagnostics);
    }
    summary
}

/// Fold one move report into the batch summary and log it.
fn record_report(report: &MoveReport, summary: &mut BatchSummary, diagnostics: &mut Diagnostics) {
    let operation = &report.operation;
    match &report.file {
        Ok(()) => {
            summary.moved += 1;
            diagnostics.info(format!(
                "{} moved to {}",
                operation.origin.display(),
                operation.destination.display()
            ));
        }
        Err(error) => {
            summary.failed += 1;
            diagnostics.fail_item(&operation.origin, error.to_string());
        }
    }
    match &report.asset {
        AssetOutcome::Absent | AssetOutcome::Skipped => {}
        AssetOutcome::Moved(destination) => {
            diagnostics.info(format!("asset directory moved to {}", destination.display()));
        }
        AssetOutcome::Failed(error) => {
            summary.failed += 1;
            let origin = asset_dir_for(&operation.origin).unwrap_or_else(|| operation.origin.clone());
            diagnostics.fail_item(&origin, error.to_string());
        }
    }
}

/// Result of restoring one exiled entry.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Paths moved back.
    pub(crate) moved: usize,
    /// Entries that could not be restored.
    pub(crate) errors: Vec<Error>,
}

/// Move an entry back into place, merging into directories that already exist.
///
/// Files never overwrite an existing destination; such conflicts are
/// reported and left in the origin.
pub async fn restore_tree(operation: MoveOperation) -> RestoreReport {
    let mut report = RestoreReport::default();
    let mut pending = vec![operation];

    while let Some(operation) = pending.pop() {
        let Ok(destination) = tokio::fs::symlink_metadata(&operation.destination).await else {
            match move_path(&operation).await {
                Ok(()) => report.moved += 1,
                Err(error) => report.errors.push(error),
            }
            continue;
        };

        let mergeable = destination.is_dir() && is_dir(&operation.origin).await;
        if !mergeable {
            report.errors.push(Error::PathExists {
                path: operation.destination,
            });
            continue;
        }
        match child_moves(&operation).await {
            Ok(children) => pending.extend(children),
            Err(error) => report.errors.push(error),
        }
    }
    report
}

/// Restore every entry as its own task and wait for all of them.
pub async fn restore_batch(
    operations: Vec<MoveOperation>,
    diagnostics: &mut Diagnostics,
) -> BatchSummary {
    let mut tasks = JoinSet::new();
    for operation in operations {
        tasks.spawn(async move {
            let origin = operation.origin.clone();
            (origin, restore_tree(operation).await)
        });
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let (origin, report) = match joined {
            Ok(result) => result,
            Err(error) => {
                summary.failed += 1;
                diagnostics.warn(format!("restore task did not complete: {error}"));
                continue;
            }
        };
        summary.moved += report.moved;
        summary.failed += report.errors.len();
        if report.errors.is_empty() {
            diagnostics.info(format!("{} restored", origin.display()));
        }
        for error in report.errors {
            diagnostics.fail_item(&origin, error.to_string());
        }
    }
    summary
}

/// Pair each child of `operation.origin` with the same name under the destination.
async fn child_moves(operation: &MoveOperation) -> Result<Vec<MoveOperation>> {
    let mut entries = tokio::fs::read_dir(&operation.origin)
        .await
        .map_err(|error| Error::file_op("read", &operation.origin, error))?;

    let mut moves = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|error| Error::file_op("read", &operation.origin, error))?
    {
        moves.push(MoveOperation::new(
            entry.path(),
            operation.destination.join(entry.file_name()),
        ));
    }
    Ok(moves)
}

/// Remove empty directories below and including `root`.
///
/// Returns true when `root` itself was removed.
pub fn prune_empty_dirs(root: &Path) -> bool {
    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if entry.file_type().is_dir() {
            // Non-empty directories fail to delete and are kept.
            fs::remove_dir(entry.path()).ok();
        }
    }
    !root.exists()
}

/// Paths removed by `remove_record`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveReport {
    /// Deleted file.
    pub(crate) file: PathBuf,
    /// Deleted asset directory, if one existed.
    pub(crate) asset_dir: Option<PathBuf>,
}

/// Delete a record's file, then its asset directory if present.
pub fn remove_record(record: &ContentRecord) -> Result<RemoveReport> {
    let path = &record.full_source;
    let metadata = fs::metadata(path).map_err(|error| Error::file_op("inspect", path, error))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile { path: path.clone() });
    }
    fs::remove_file(path).map_err(|error| Error::file_op("delete", path, error))?;

    let asset_dir = match asset_dir_for(path) {
        Some(dir) if dir.is_dir() => {
            fs::remove_dir_all(&dir).map_err(|error| Error::file_op("delete", &dir, error))?;
            Some(dir)
        }
        _ => None,
    };

    Ok(RemoveReport {
        file: path.clone(),
        asset_dir,
    })
}

/// Paths changed by `rename_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameReport {
    /// The file move.
    pub(crate) file: MoveOperation,
    /// The asset directory move, if one existed.
    pub(crate) asset: Option<MoveOperation>,
}

/// Compute the file name a record would get when renamed to `new_name`.
pub fn renamed_path(record: &ContentRecord, new_name: &str) -> Result<PathBuf> {
    let slug = slugify(new_name);
    if slug.is_empty() {
        return Err(Error::validation(format!(
            "`{new_name}` does not produce a usable file name."
        )));
    }
    let source = &record.full_source;
    let parent = source.parent().ok_or_else(|| Error::NotAFile {
        path: source.clone(),
    })?;
    let mut destination = parent.join(slug);
    if let Some(extension) = source.extension() {
        destination.set_extension(extension);
    }
    Ok(destination)
}

/// Plan the file and asset moves for renaming a record to `new_name`.
///
/// Fails when either destination already exists; nothing is touched.
pub fn plan_rename(record: &ContentRecord, new_name: &str) -> Result<RenameReport> {
    let file = MoveOperation::new(&record.full_source, renamed_path(record, new_name)?);
    let asset = file.asset().filter(|asset| asset.origin.is_dir());

    for operation in iter::once(&file).chain(asset.as_ref()) {
        if operation.destination != operation.origin && operation.destination.exists() {
            return Err(Error::PathExists {
                path: operation.destination.clone(),
            });
        }
    }
    Ok(RenameReport { file, asset })
}

/// Carry out a rename produced by `plan_rename`.
pub fn apply_rename(plan: &RenameReport) -> Result<()> {
    for operation in iter::once(&plan.file).chain(plan.asset.as_ref()) {
        fs::rename(&operation.origin, &operation.destination).map_err(|error| {
            Error::FileMove {
                from: operation.origin.clone(),
                to: operation.destination.clone(),
                source: error,
            }
        })?;
    }
    Ok(())
}

/// Rename a record's file to the slug of `new_name`, plus its asset directory.
pub fn rename_file(record: &ContentRecord, new_name: &str) -> Result<RenameReport> {
    let plan = plan_rename(record, new_name)?;
    apply_rename(&plan)?;
    Ok(plan)
}

/// Rewrite the `title:` line of a record's file.
///
/// The in-memory record is left as loaded.
pub fn rename_title(record: &ContentRecord, new_title: &str) -> Result<()> {
    let path = &record.full_source;
    let contents = fs::read_to_string(path).map_err(|error| Error::file_op("read", path, error))?;
    let updated =
        replace_title(&contents, new_title).ok_or_else(|| Error::TitleMissing { path: path.clone() })?;
    fs::write(path, updated).map_err(|error| Error::file_op("write", path, error))
}

/// Return true when `path` is a directory.
async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}
