//! Command-line output tests
//!
//! Runs the built `make-batch` binary; stdout carries only the archive list.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::ImageDir;
    use std::process::{Command, Output};
    use tempfile::TempDir;

    fn make_batch(images: &ImageDir, out: &TempDir, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_make-batch"))
            .current_dir(out.path())
            .env("RUST_LOG", "batch_manager=debug")
            .args(["--prompt", "Describe this image.", "--batch-size", "2"])
            .arg("--images-dir")
            .arg(images.path())
            .arg("--output-dir")
            .arg(out.path())
            .args(extra)
            .output()
            .expect("run make-batch")
    }

    #[test]
    fn test_quiet_keeps_stdout_empty() {
        let images = ImageDir::with_files(3);
        let out = TempDir::new().unwrap();

        let output = make_batch(&images, &out, &["--quiet"]);
        assert!(output.status.success());
        assert!(
            output.stdout.is_empty(),
            "stdout: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        assert!(out.path().join("batch-00000.tar.gz").exists());
        assert!(out.path().join("batch-00001.tar.gz").exists());
    }

    #[test]
    fn test_each_archive_is_printed_once() {
        let images = ImageDir::with_files(3);
        let out = TempDir::new().unwrap();

        let output = make_batch(&images, &out, &[]);
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("written batch: {}", out.path().join("batch-00000.tar.gz").display()),
                format!("written batch: {}", out.path().join("batch-00001.tar.gz").display()),
            ]
        );
    }
}
