//! End-to-end pipeline tests over temporary log directories.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use perflab::{pipeline, report, storage};

fn write(path: &Path, body: &str) {
    fs::write(path, body).expect("write test log");
}

#[test]
fn kmeans_sweep_end_to_end() {
    let dir = tempdir().unwrap();
    write(
        &dir.path().join("run_seq.log"),
        "Computation timing = 8.0\nComputation timing = 8.0\n",
    );
    write(
        &dir.path().join("run_t1.log"),
        "Threads = 1\nComputation timing = 8.0\nComputation timing = 8.0\n",
    );
    write(
        &dir.path().join("run_t4.log"),
        "Threads = 4\nComputation timing = 1.0\nComputation timing = 3.0\n",
    );

    let report = pipeline::kmeans(dir.path()).unwrap().expect("results");

    assert_eq!(report.seq_avg, 8.0);
    let threads: Vec<u32> = report.rows.iter().map(|r| r.threads).collect();
    assert_eq!(threads, vec![1, 4]);

    let t1 = &report.rows[0];
    assert!((t1.row.speedup.unwrap() - 1.0).abs() < 1e-12);
    assert!((t1.row.efficiency.unwrap() - 100.0).abs() < 1e-9);

    let t4 = &report.rows[1];
    assert_eq!(t4.row.average, 2.0);
    assert_eq!(t4.row.std_dev, 1.0);
    assert!((t4.row.speedup.unwrap() - 4.0).abs() < 1e-12);
    assert!((t4.row.efficiency.unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn kmeans_missing_sequential_log_is_fatal() {
    let dir = tempdir().unwrap();
    let err = pipeline::kmeans(dir.path()).unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");
}

#[test]
fn kmeans_empty_sequential_log_is_fatal() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("run_seq.log"), "no timings here\n");
    let err = pipeline::kmeans(dir.path()).unwrap_err();
    assert!(
        err.to_string().contains("no sequential timing entries"),
        "{err}"
    );
}

#[test]
fn kmeans_without_thread_logs_reports_no_results() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("run_seq.log"), "Computation timing = 8.0\n");
    // unrelated file names are not picked up
    write(&dir.path().join("notes.log"), "Threads = 2\nComputation timing = 1.0\n");
    assert!(pipeline::kmeans(dir.path()).unwrap().is_none());
}

#[test]
fn kmeans_thread_logs_sort_numerically_not_lexically() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("run_seq.log"), "Computation timing = 8.0\n");
    for t in [16u32, 2, 8] {
        write(
            &dir.path().join(format!("run_t{t}.log")),
            &format!("Threads = {t}\nComputation timing = 1.0\n"),
        );
    }

    let report = pipeline::kmeans(dir.path()).unwrap().unwrap();
    let threads: Vec<u32> = report.rows.iter().map(|r| r.threads).collect();
    assert_eq!(threads, vec![2, 8, 16]);
}

#[test]
fn sobel_run_then_plot_only_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run_results.txt");
    let summary = dir.path().join("execution_times.txt");
    write(
        &input,
        "\
=== Building with -O0 ===
--- sobel_orig (CFLAGS=-O0) ---
Total time = 4.0 seconds
--- sobel_cse (CFLAGS=-O0) ---
Total time = 2.0 seconds
=== Building with -O2 ===
--- sobel_orig (CFLAGS=-O2) ---
Total time = 1.0 seconds
",
    );

    let run_report = pipeline::sobel_from_run_results(&input).unwrap();
    storage::write_summary(&summary, &report::sobel_summary_file(&run_report)).unwrap();

    let plot_report = pipeline::sobel_from_summary(&summary).unwrap();
    assert_eq!(plot_report.variants, run_report.variants);
    for (a, b) in plot_report.table.iter().zip(run_report.table.iter()) {
        for (x, y) in a.iter().zip(b.iter()) {
            match (x, y) {
                (Some(x), Some(y)) => assert!((x - y).abs() < 1e-6),
                (None, None) => {}
                other => panic!("cell mismatch: {other:?}"),
            }
        }
    }
}

#[test]
fn sobel_missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let err = pipeline::sobel_from_run_results(&dir.path().join("run_results.txt")).unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");
}

#[test]
fn sobel_empty_input_reports_no_results() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run_results.txt");
    write(&input, "");
    let err = pipeline::sobel_from_run_results(&input).unwrap_err();
    assert!(err.to_string().contains("no results"), "{err}");
}

#[test]
fn sobel_headers_without_data_report_no_results() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run_results.txt");
    write(&input, "=== Building with -O2 ===\n");
    let err = pipeline::sobel_from_run_results(&input).unwrap_err();
    assert!(err.to_string().contains("no results"), "{err}");
}

#[test]
fn sobel_plot_only_without_summary_points_at_run_mode() {
    let dir = tempdir().unwrap();
    let err = pipeline::sobel_from_summary(&dir.path().join("execution_times.txt")).unwrap_err();
    assert!(err.to_string().contains("sobel run"), "{err}");
}
