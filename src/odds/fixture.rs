//! Demo-mode odds loader reading a local JSON fixture.

use std::path::Path;

use tracing::{debug, instrument};

use super::types::{Match, OddsResponse};
use crate::error::FeedError;

/// Load matches from a fixture file shaped like an odds API response.
#[instrument]
pub async fn load_demo_file(path: &Path) -> Result<Vec<Match>, FeedError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FeedError::DemoFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let matches = parse_demo(&raw).map_err(|e| FeedError::DemoFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(matches = matches.len(), "Loaded demo fixture");
    Ok(matches)
}

/// Parse fixture text into matches.
pub fn parse_demo(raw: &str) -> Result<Vec<Match>, FeedError> {
    let response: OddsResponse =
        serde_json::from_str(raw).map_err(|e| FeedError::ParseError(e.to_string()))?;
    Ok(response.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn loads_fixture_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data": [{{"sport_key": "mma", "teams": ["A", "B"],
                "sites": [{{"site_key": "x", "odds": {{"h2h": [1.5, 2.5]}}}}]}}]}}"#
        )
        .unwrap();

        let matches = load_demo_file(file.path()).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].sport_key, "mma");
    }

    #[tokio::test]
    async fn missing_file_is_a_demo_file_error() {
        let err = load_demo_file(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::DemoFile { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            parse_demo("{ not json"),
            Err(FeedError::ParseError(_))
        ));
    }

    #[test]
    fn missing_data_yields_no_matches() {
        assert!(parse_demo("{}").unwrap().is_empty());
    }
}
