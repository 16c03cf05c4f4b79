// workflow_runner/src/workflow.rs

use crate::errors::{AppError, Result};
use serde_json::Value;
use std::path::Path;
use stepwise::Run;

/// Loads a JSON array of raw step definitions and composes a run from it.
pub fn load_run(path: impl AsRef<Path>, tenant_id: Option<&str>) -> Result<Run> {
  let path = path.as_ref();
  let text = std::fs::read_to_string(path).map_err(|source| AppError::WorkflowFile {
    path: path.display().to_string(),
    source,
  })?;
  let definitions: Vec<Value> = serde_json::from_str(&text)?;

  let mut run = match tenant_id {
    Some(tenant) => Run::with_tenant(tenant),
    None => Run::new(),
  };
  run.extend_raw(&definitions)?;
  tracing::info!(run_id = %run.run_id(), steps = run.len(), file = %path.display(), "Workflow loaded.");
  Ok(run)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn loads_definitions_with_tenant() {
    let file = write_temp(r#"[{"action": "cancel", "token": "t"}, {"action": "send"}]"#);
    let run = load_run(file.path(), Some("acme")).unwrap();
    assert_eq!(run.len(), 2);
    assert_eq!(run.tenant_id(), Some("acme"));
    assert!(run.steps().iter().all(|s| s.meta().tenant_id() == Some("acme")));
  }

  #[test]
  fn reports_the_failing_layer() {
    let not_json = write_temp("steps: []");
    assert!(matches!(load_run(not_json.path(), None), Err(AppError::Json(_))));

    let invalid_step = write_temp(r#"[{"action": "delay"}]"#);
    match load_run(invalid_step.path(), None) {
      Err(AppError::Workflow { source }) => assert_eq!(source.field(), Some("duration")),
      other => panic!("expected workflow error, got {:?}", other.map(|r| r.len())),
    }

    assert!(matches!(
      load_run("/definitely/not/here.json", None),
      Err(AppError::WorkflowFile { .. })
    ));
  }

  #[test]
  fn bundled_workflow_is_valid() {
    let run = load_run(concat!(env!("CARGO_MANIFEST_DIR"), "/workflow.json"), None).unwrap();
    assert_eq!(run.len(), 7);
  }
}
