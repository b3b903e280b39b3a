//! End-to-end pipeline tests: components with real filesystem
//! preconditions, validated through the rule engine before the run, then
//! driven through fetch → transform → bundle.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use grist_core::{Batch, Bundle, Record};
use grist_pipeline::{Action, Bundler, Pipeline, PipelineError, Source};
use grist_rules::{fs, string, OptionRules, RuleRef};

/// Reads every `.json` file in a drop directory, one record per file.
struct DropDirSource {
    dir: PathBuf,
}

impl OptionRules for DropDirSource {
    fn option_rules(&self) -> Vec<RuleRef> {
        let dir = json!(self.dir.to_string_lossy());
        vec![
            RuleRef::with_args(fs::path_exists(), vec![dir.clone()]),
            RuleRef::with_args(fs::path_is_directory(), vec![dir.clone()]),
            RuleRef::with_args(fs::path_is_absolute(), vec![dir]),
        ]
    }
}

#[async_trait]
impl Source for DropDirSource {
    async fn fetch(&self) -> Result<Batch, PipelineError> {
        let mut records = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                let raw = tokio::fs::read_to_string(entry.path()).await?;
                let data = serde_json::from_str(&raw).map_err(|e| PipelineError::Fetch {
                    source_name: self.name().to_string(),
                    reason: format!("invalid JSON in {}: {e}", entry.path().display()),
                })?;
                records.push(Record::new(data));
            }
        }
        // Stable order for assertions — read_dir order is platform-defined.
        records.sort_by(|a, b| a.data.to_string().cmp(&b.data.to_string()));
        Ok(Batch::new(self.name(), records))
    }

    fn name(&self) -> &str {
        "drop-dir"
    }
}

/// Stamps every record with a batch label.
struct LabelAction {
    label: String,
}

impl OptionRules for LabelAction {
    fn option_rules(&self) -> Vec<RuleRef> {
        vec![RuleRef::with_args(
            string::string_is_min_length(),
            vec![json!(self.label), json!(1)],
        )]
    }
}

#[async_trait]
impl Action for LabelAction {
    async fn transform(&self, batch: Batch) -> Result<Batch, PipelineError> {
        let records = batch
            .records
            .into_iter()
            .map(|mut r| {
                r.data["label"] = json!(self.label);
                r
            })
            .collect();
        Ok(Batch::new(self.name(), records))
    }

    fn name(&self) -> &str {
        "label"
    }
}

/// Writes the finished bundle as JSON into an output directory.
struct JsonBundler {
    out_dir: PathBuf,
}

#[async_trait]
impl Bundler for JsonBundler {
    async fn bundle(&self, batches: Vec<Batch>) -> Result<Bundle, PipelineError> {
        let bundle = Bundle::new("drop-bundle", batches);
        let path = self.out_dir.join(format!("{}.json", bundle.id));
        let body = serde_json::to_vec_pretty(&bundle).map_err(|e| PipelineError::Bundle {
            bundler: self.name().to_string(),
            reason: e.to_string(),
        })?;
        tokio::fs::write(&path, body).await?;
        Ok(bundle)
    }

    fn name(&self) -> &str {
        "json-writer"
    }
}

fn seeded_drop_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.json"), r#"{"n": 1}"#).unwrap();
    std::fs::write(dir.path().join("b.json"), r#"{"n": 2}"#).unwrap();
    std::fs::write(dir.path().join("ignored.txt"), "not json").unwrap();
    dir
}

#[tokio::test]
async fn valid_pipeline_runs_end_to_end() {
    let drop_dir = seeded_drop_dir();
    let out_dir = tempfile::tempdir().unwrap();

    let pipeline = Pipeline::builder("drop-to-json")
        .source(Arc::new(DropDirSource {
            dir: drop_dir.path().to_path_buf(),
        }))
        .action(Arc::new(LabelAction {
            label: "nightly".to_string(),
        }))
        .bundler(Arc::new(JsonBundler {
            out_dir: out_dir.path().to_path_buf(),
        }))
        .build()
        .unwrap();

    // Every component's preconditions hold.
    let reports = pipeline.validate().await;
    assert!(reports.iter().all(|r| r.valid()), "reports: {reports:?}");

    let bundle = pipeline.run().await.unwrap();
    assert_eq!(bundle.record_count(), 2);
    let records = &bundle.batches[0].records;
    assert_eq!(records[0].data["n"], json!(1));
    assert_eq!(records[0].data["label"], json!("nightly"));
    assert_eq!(records[1].data["n"], json!(2));

    // The bundler wrote the bundle to disk.
    let written = out_dir.path().join(format!("{}.json", bundle.id));
    let raw = std::fs::read_to_string(written).unwrap();
    let round_trip: Bundle = serde_json::from_str(&raw).unwrap();
    assert_eq!(round_trip.id, bundle.id);
    assert_eq!(round_trip.record_count(), 2);
}

#[tokio::test]
async fn missing_drop_directory_surfaces_every_failed_rule() {
    let out_dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::builder("broken")
        .source(Arc::new(DropDirSource {
            dir: PathBuf::from("/does/not/exist"),
        }))
        .bundler(Arc::new(JsonBundler {
            out_dir: out_dir.path().to_path_buf(),
        }))
        .build()
        .unwrap();

    let err = pipeline.run().await.unwrap_err();
    match err {
        PipelineError::Validation { failures } => {
            // Collect-all: both the existence and the directory-type rule
            // report, not just the first.
            assert_eq!(failures.len(), 2);
            assert!(failures.iter().all(|f| f.component == "drop-dir"));
            assert!(failures[0].reason.contains("does not exist"));
        }
        other => panic!("expected validation failure, got {other}"),
    }
}

#[tokio::test]
async fn component_reports_serialize_for_consumers() {
    let drop_dir = seeded_drop_dir();
    let out_dir = tempfile::tempdir().unwrap();

    let pipeline = Pipeline::builder("serializable")
        .source(Arc::new(DropDirSource {
            dir: drop_dir.path().to_path_buf(),
        }))
        .bundler(Arc::new(JsonBundler {
            out_dir: out_dir.path().to_path_buf(),
        }))
        .build()
        .unwrap();

    let reports = pipeline.validate().await;
    let rendered = serde_json::to_value(&reports).unwrap();

    assert_eq!(rendered[0]["component"], json!("drop-dir"));
    assert_eq!(rendered[0]["options"]["valid"], json!(true));
    // No credentials on a plain source — the field is omitted entirely.
    assert!(rendered[0].get("credentials").is_none());
}
