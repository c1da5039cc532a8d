//! Presigning integration tests
//!
//! Signing is local, so these run without any S3 endpoint.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::test_credentials;
    use batch_manager::StorageClient;
    use batch_manager::config::S3Config;
    use batch_manager::storage::MAX_EXPIRES_IN;
    use chrono::NaiveDateTime;
    use url::Url;

    fn client() -> StorageClient {
        StorageClient::with_credentials(&S3Config::default(), &test_credentials())
    }

    #[tokio::test]
    async fn test_default_presign_contract() {
        let urls = client()
            .generate_presigned_urls("batches", "inputs/batch-00000.tar.gz", None, None)
            .await
            .unwrap();

        assert_eq!(urls.expires_in, MAX_EXPIRES_IN);

        let stamp = urls
            .output_key
            .strip_prefix("outputs/batch-00000.tar.gz/")
            .and_then(|rest| rest.strip_suffix(".tar.gz"))
            .unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok());

        let input = Url::parse(&urls.input_url).unwrap();
        let expires: String = input
            .query_pairs()
            .find(|(k, _)| k == "X-Amz-Expires")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(expires, "604800");
        assert!(input.path().ends_with("inputs/batch-00000.tar.gz"));
    }

    #[tokio::test]
    async fn test_get_and_put_are_signed_separately() {
        let urls = client()
            .generate_presigned_urls("batches", "in.tar.gz", Some("out.tar.gz"), Some(120))
            .await
            .unwrap();

        let signature = |url: &str| {
            Url::parse(url)
                .unwrap()
                .query_pairs()
                .find(|(k, _)| k == "X-Amz-Signature")
                .map(|(_, v)| v.into_owned())
                .unwrap()
        };
        assert_ne!(signature(&urls.input_url), signature(&urls.output_url));
        assert!(urls.input_url.contains("X-Amz-Expires=120"));
        assert!(urls.output_url.contains("X-Amz-Expires=120"));
    }

    #[tokio::test]
    async fn test_presigned_urls_serialize_for_the_dashboard() {
        let urls = client()
            .generate_presigned_urls("batches", "in.tar.gz", Some("out.tar.gz"), Some(60))
            .await
            .unwrap();
        let json = serde_json::to_value(&urls).unwrap();

        for field in ["input_url", "output_url", "input_key", "output_key", "expires_in"] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["output_key"], "out.tar.gz");
    }
}
