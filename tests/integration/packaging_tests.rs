//! Packaging integration tests
//!
//! A directory of images goes in, batch archives come out.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{ImageDir, manifest, read_archive};
    use batch_manager::core::batch::{
        BatchOptions, EntryOrder, archive_name, write_batches, write_batches_concurrent,
    };
    use batch_manager::utils::error::ManagerError;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_five_images_in_batches_of_two() {
        let images = ImageDir::with_files(5);
        let out = TempDir::new().unwrap();

        let options = BatchOptions::new("Describe this image.").with_output_dir(out.path());
        let summary = crate::assert_ok!(write_batches(&options, images.path(), 2));

        assert!(summary.is_success());
        assert_eq!(
            summary.archives,
            (0..3).map(|i| out.path().join(archive_name(i))).collect::<Vec<_>>()
        );

        let sizes: Vec<usize> = summary
            .archives
            .iter()
            .map(|a| manifest(&read_archive(a)).len())
            .collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_every_image_packaged_exactly_once() {
        let images = ImageDir::with_files(11);
        images.add_subdir("thumbnails");
        let out = TempDir::new().unwrap();

        let options = BatchOptions::new("p")
            .with_output_dir(out.path())
            .with_entry_order(EntryOrder::Native);
        let summary = write_batches(&options, images.path(), 4).unwrap();

        let mut seen = Vec::new();
        let mut ids = HashSet::new();
        for archive in &summary.archives {
            let entries = read_archive(archive);
            let records = manifest(&entries);
            let files: Vec<&str> = entries
                .iter()
                .filter(|e| e.path.starts_with("files/"))
                .map(|e| e.path.as_str())
                .collect();

            // record i points at file entry i of the same archive
            assert_eq!(records.len(), files.len());
            for (record, file) in records.iter().zip(&files) {
                assert_eq!(record.file_reference(), Some(*file));
                assert!(ids.insert(record.custom_id.clone()));
            }
            seen.extend(files.iter().map(|f| f.to_string()));
        }

        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(seen.len(), 11);
        assert_eq!(unique.len(), 11);
    }

    #[test]
    fn test_archive_contents_match_source_files() {
        let images = ImageDir::empty();
        images.add_file("cat.png", b"meow");
        images.add_file("dog.png", b"woof");
        let out = TempDir::new().unwrap();

        let options = BatchOptions::new("What animal is this?")
            .with_model("llava-hf/llava-1.5-7b-hf")
            .with_max_tokens(20)
            .with_output_dir(out.path());
        let summary = write_batches(&options, images.path(), 10).unwrap();
        let entries = read_archive(&summary.archives[0]);

        assert_eq!(entries[0].path, "files/cat.png");
        assert_eq!(entries[0].data, b"meow");
        assert_eq!(entries[1].path, "files/dog.png");
        assert_eq!(entries[1].data, b"woof");
        assert_eq!(entries[2].path, "jobs.jsonl");

        let records = manifest(&entries);
        assert_eq!(records[0].body.model, "llava-hf/llava-1.5-7b-hf");
        assert_eq!(records[0].body.max_tokens, 20);
        assert_eq!(records[1].prompt(), Some("What animal is this?"));
    }

    #[test]
    fn test_manifest_line_format() {
        let images = ImageDir::with_files(1);
        let out = TempDir::new().unwrap();

        let options = BatchOptions::new("p").with_output_dir(out.path());
        let summary = write_batches(&options, images.path(), 1).unwrap();
        let entries = read_archive(&summary.archives[0]);
        let text = String::from_utf8(entries[1].data.clone()).unwrap();

        assert!(text.ends_with('\n'));
        let line: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(line["url"], "/v1/chat/completions");
        assert_eq!(
            line["body"]["messages"][0]["content"][1]["image_url"]["url"],
            "file:files/image_000.jpg"
        );
        assert_eq!(line["custom_id"].as_str().unwrap().len(), 32);
    }

    #[test]
    fn test_empty_directory_produces_nothing() {
        let images = ImageDir::empty();
        images.add_subdir("only-a-directory");
        let out = TempDir::new().unwrap();

        let options = BatchOptions::new("p").with_output_dir(out.path());
        let summary = write_batches(&options, images.path(), 3).unwrap();

        assert!(summary.archives.is_empty());
        assert!(summary.failures.is_empty());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_inputs() {
        let images = ImageDir::with_files(1);
        let options = BatchOptions::new("p");

        let err = crate::assert_err!(write_batches(&options, images.path(), 0));
        assert!(matches!(err, ManagerError::Validation(_)));

        let err = crate::assert_err!(write_batches(
            &options,
            &images.path().join("missing"),
            2
        ));
        assert!(matches!(err, ManagerError::NotFound(_)));
    }

    #[test]
    fn test_failed_batch_does_not_stop_the_run() {
        let images = ImageDir::with_files(4);
        let out = TempDir::new().unwrap();
        // a directory squatting on the second archive name makes that write fail
        std::fs::create_dir(out.path().join(archive_name(1))).unwrap();

        let options = BatchOptions::new("p").with_output_dir(out.path());
        let summary = write_batches(&options, images.path(), 2).unwrap();

        assert_eq!(summary.archives, vec![out.path().join(archive_name(0))]);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].group_index, 1);
        assert_eq!(summary.total(), 2);
        assert!(!summary.is_success());
    }

    #[tokio::test]
    async fn test_concurrent_packaging() {
        let images = ImageDir::with_files(20);
        let out = TempDir::new().unwrap();

        let options = BatchOptions::new("p").with_output_dir(out.path());
        let summary =
            write_batches_concurrent(options, images.path().to_path_buf(), 3, 4)
                .await
                .unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.archives.len(), 7);
        for (i, archive) in summary.archives.iter().enumerate() {
            assert_eq!(archive, &out.path().join(archive_name(i)));
        }

        let total: usize = summary
            .archives
            .iter()
            .map(|a| manifest(&read_archive(a)).len())
            .sum();
        assert_eq!(total, 20);

        let leftovers = std::fs::read_dir(out.path())
            .unwrap()
            .filter(|e| {
                !e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tar.gz")
            })
            .count();
        assert_eq!(leftovers, 0);
    }
}
