//! Configuration integration tests

#[cfg(test)]
mod tests {
    use batch_manager::config::{Config, ManagerConfig};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_then_environment() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"batch_api:\n  base_url: \"http://batch.internal:8000\"\nstorage:\n  default_bucket: \"from-file\"\n",
        )
        .unwrap();

        let from_file = Config::from_file(file.path()).await.unwrap();
        assert_eq!(from_file.batch_api().base_url, "http://batch.internal:8000");

        let env: HashMap<&str, &str> = [("S3_BUCKET_NAME", "from-env"), ("LOG_FORMAT", "json")]
            .into_iter()
            .collect();
        let merged = from_file
            .manager
            .apply_env_with(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(merged.batch_api.base_url, "http://batch.internal:8000");
        assert_eq!(merged.storage.default_bucket, "from-env");
        assert!(merged.logging.json);
    }

    #[tokio::test]
    async fn test_malformed_section_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server: [not, a, map]\n").unwrap();
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[test]
    fn test_bad_environment_values() {
        let result = ManagerConfig::default().apply_env_with(|k| {
            (k == "BATCH_MANAGER_PORT").then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_round_trip_keeps_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        let parsed: ManagerConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.storage.expires_in, 604_800);
        assert_eq!(parsed.packaging.max_tokens, 100);
    }
}
