use std::{
    fs,
    path::Path,
    sync::Mutex,
};

use log_tally_engine::{
    AggregateState, NO_ROUTE, Severity,
    config::{Config, ConfigBuilder},
    error::{EngineError, Result},
    progress::ProgressSink,
};

fn config(dir: &Path, threads: usize) -> Config {
    ConfigBuilder::default()
        .log_dir(dir)
        .threads(threads)
        .build()
        .unwrap()
}

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("a.log"),
        "2024-01-01 INFO /api/v1/users request ok\n\
         2024-01-01 DEBUG SELECT * FROM users\n\
         2024-01-01 ERROR /admin/panel crashed\n\
         2024-01-01 something unrelated\n",
    )
    .unwrap();
    fs::write(
        dir.join("b.log"),
        "WARNING /api/v1/users slow\n\
         critical /admin/panel down\n\
         debug select id from sessions\n",
    )
    .unwrap();
    fs::write(dir.join("ignored.txt"), "ERROR /api/v1/never\n").unwrap();
}

fn row(state: &AggregateState, route: &str) -> [usize; 5] {
    Severity::ALL.map(|level| state.table().get_or_zero(route, level))
}

#[test]
fn single_file_example() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("app.log"),
        "2024-01-01 INFO /api/v1/users request ok\n\
         2024-01-01 DEBUG SELECT * FROM users\n\
         2024-01-01 ERROR /admin/panel crashed\n\
         2024-01-01 something unrelated\n",
    )
    .unwrap();

    let state = log_tally_engine::run(&config(dir.path(), 1)).unwrap();

    let routes: Vec<_> = state.table().routes().collect();
    assert_eq!(routes, ["/api/v1/users", NO_ROUTE, "/admin/panel"]);
    assert_eq!(row(&state, "/api/v1/users"), [0, 1, 0, 0, 0]);
    assert_eq!(row(&state, NO_ROUTE), [1, 0, 0, 0, 0]);
    assert_eq!(row(&state, "/admin/panel"), [0, 0, 0, 1, 0]);
    assert_eq!(state.total_lines(), 4);
    assert_eq!(state.db_queries(), 1);
}

#[test]
fn merges_files_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let state = log_tally_engine::run(&config(dir.path(), 1)).unwrap();

    let per_file: Vec<_> = state.file_line_counts().collect();
    assert_eq!(per_file, [4, 3]);
    assert_eq!(state.files()[0].path, dir.path().join("a.log"));
    assert_eq!(state.total_lines(), 7);
    assert_eq!(state.db_queries(), 2);

    assert_eq!(row(&state, "/api/v1/users"), [0, 1, 1, 0, 0]);
    assert_eq!(row(&state, "/admin/panel"), [0, 0, 0, 1, 1]);
    assert_eq!(row(&state, NO_ROUTE), [2, 0, 0, 0, 0]);
    assert_eq!(state.table().get_or_zero("/api/v1/never", Severity::Error), 0);
}

#[test]
fn thread_count_does_not_change_results() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..12 {
        let body: String = (0..=i)
            .map(|n| format!("INFO /api/v1/item{} n={n}\nDEBUG SELECT {n} FROM t\n", i % 3))
            .collect();
        fs::write(dir.path().join(format!("f{i:02}.log")), body).unwrap();
    }

    let sequential = log_tally_engine::run(&config(dir.path(), 1)).unwrap();
    let parallel = log_tally_engine::run(&config(dir.path(), 4)).unwrap();

    assert_eq!(sequential.files(), parallel.files());
    assert_eq!(sequential.db_queries(), parallel.db_queries());
    let seq_rows: Vec<_> = sequential.table().rows().map(|(r, c)| (r.to_string(), *c)).collect();
    let par_rows: Vec<_> = parallel.table().rows().map(|(r, c)| (r.to_string(), *c)).collect();
    assert_eq!(seq_rows, par_rows);
}

#[test]
fn empty_directory_yields_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = log_tally_engine::run(&config(dir.path(), 2)).unwrap();
    assert!(state.is_empty());
    assert!(state.table().is_empty());
    assert_eq!(state.total_lines(), 0);
}

#[test]
fn missing_directory_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let err = log_tally_engine::run(&config(&dir.path().join("missing"), 1)).unwrap_err();
    assert!(matches!(err, EngineError::DirRead { .. }));
    assert!(err.to_string().contains("missing"));
}

#[derive(Default)]
struct RecordingProgress {
    files: Mutex<Vec<String>>,
    completed: Mutex<Option<usize>>,
}

impl ProgressSink for RecordingProgress {
    fn on_file(&self, path: &Path) -> Result<()> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.files.lock().unwrap().push(name);
        Ok(())
    }

    fn on_complete(&self, files: usize) -> Result<()> {
        *self.completed.lock().unwrap() = Some(files);
        Ok(())
    }
}

#[test]
fn progress_reports_files_in_merge_order() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let progress = RecordingProgress::default();
    log_tally_engine::run_with_progress(&config(dir.path(), 3), &progress).unwrap();

    assert_eq!(*progress.files.lock().unwrap(), ["a.log", "b.log"]);
    assert_eq!(*progress.completed.lock().unwrap(), Some(2));
}

struct FailingProgress;

impl ProgressSink for FailingProgress {
    fn on_file(&self, _path: &Path) -> Result<()> {
        Err(EngineError::Progress(std::io::Error::other("closed")))
    }

    fn on_complete(&self, _files: usize) -> Result<()> {
        Ok(())
    }
}

#[test]
fn progress_failure_aborts_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let err = log_tally_engine::run_with_progress(&config(dir.path(), 1), &FailingProgress).unwrap_err();
    assert!(matches!(err, EngineError::Progress(_)));
}
