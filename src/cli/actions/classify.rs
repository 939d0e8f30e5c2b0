use crate::gate::routes;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Classification {
    pub path: String,
    pub protected: bool,
}

#[must_use]
pub fn classify_all(paths: &[String]) -> Vec<Classification> {
    paths
        .iter()
        .map(|path| Classification {
            path: path.clone(),
            protected: routes::is_protected(path),
        })
        .collect()
}

/// Handle the classify action
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn handle(paths: &[String]) -> Result<()> {
    let report = classify_all(paths);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_all_keeps_order() {
        let paths = vec![
            "/orders/1".to_string(),
            "/".to_string(),
            "/settings".to_string(),
        ];
        let report = classify_all(&paths);
        assert_eq!(
            report
                .iter()
                .map(|entry| (entry.path.as_str(), entry.protected))
                .collect::<Vec<_>>(),
            vec![("/orders/1", true), ("/", false), ("/settings", true)]
        );
    }
}
