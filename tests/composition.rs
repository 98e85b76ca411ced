// Composition tests: the whole pipeline with an in-memory analyzer.
//
// Exercises the data flow between modules:
//   BibTeX -> PaperAnalyzer -> results JSON -> counts -> clusters -> CSV
// without network access. Files go to a temporary directory.

use std::collections::HashMap;

use async_trait::async_trait;
use litsynth::analysis::error::AnalysisError;
use litsynth::analysis::paper::PaperInfo;
use litsynth::analysis::results::{read_results, write_results};
use litsynth::analysis::traits::PaperAnalyzer;
use litsynth::bibtex::parse;
use litsynth::pipeline::{aggregate, analyze_entries, summarize, PaperOutcome};

/// Answers from a fixed table keyed by the first word of the abstract.
struct ScriptedAnalyzer {
    answers: HashMap<&'static str, Vec<&'static str>>,
}

impl ScriptedAnalyzer {
    fn new() -> Self {
        let mut answers = HashMap::new();
        answers.insert("Gateway", vec!["OPC UA", "MQTT"]);
        answers.insert("Twin", vec!["OPC-UA", "MQTT", "REST"]);
        answers.insert("Broker", vec!["MQTT", "RESTful", "OPC UA Server"]);
        answers.insert("Robots", vec!["ROS", "REST"]);
        Self { answers }
    }
}

#[async_trait]
impl PaperAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, abstract_text: &str) -> Result<PaperInfo, AnalysisError> {
        let first_word = abstract_text.split_whitespace().next().unwrap_or_default();
        let techs = self
            .answers
            .get(first_word)
            .ok_or(AnalysisError::EmptyResponse)?;
        Ok(PaperInfo {
            evaluation_example: "testbed".to_string(),
            use_case: "integration".to_string(),
            application_domain: "manufacturing".to_string(),
            technology_used: techs.iter().map(|t| t.to_string()).collect(),
        })
    }
}

const BIB: &str = r#"
@article{p1, title = {A}, abstract = {Gateway for legacy PLCs.}}
@article{p2, title = {B}, abstract = {Twin of a \emph{press} line.}}
@article{p3, title = {C}}
@article{p4, title = {D}, abstract = {Broker federation.}}
@article{p5, title = {E}, abstract = {Unrecognized text.}}
@article{p6, title = {F}, abstract = {Robots in the warehouse.}}
"#;

async fn analyzed_papers() -> (Vec<PaperOutcome>, Vec<PaperInfo>) {
    let entries = parse(BIB);
    let outcomes = analyze_entries(&ScriptedAnalyzer::new(), &entries, 2).await;
    let papers = outcomes.iter().filter_map(|o| o.info().cloned()).collect();
    (outcomes, papers)
}

// ============================================================
// Chain: BibTeX -> Analyzer
// ============================================================

#[tokio::test]
async fn failures_are_reported_by_key_and_skipped() {
    let (outcomes, papers) = analyzed_papers().await;

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.info().is_none())
        .map(|o| o.key())
        .collect();
    assert_eq!(failed, vec!["p3", "p5"]);
    assert_eq!(papers.len(), 4);
    assert!(matches!(
        &outcomes[2],
        PaperOutcome::Failed { reason: AnalysisError::MissingAbstract(_), .. }
    ));
}

// ============================================================
// Chain: Analyzer -> Counts -> Clusters -> Report
// ============================================================

#[tokio::test]
async fn analyzed_labels_cluster_into_report() {
    let (_, papers) = analyzed_papers().await;
    let summary = summarize(&papers, 90.0, 3).unwrap();

    // MQTT 3, OPC UA 2 (one hyphenated), REST 2, then singletons
    assert_eq!(summary.labels[0].label, "MQTT");
    assert_eq!(summary.labels[0].count, 3);

    let opc = summary.clusters.get("OPC UA").unwrap();
    assert_eq!(opc.member_labels(), vec!["OPC UA", "OPC UA Server"]);
    assert_eq!(opc.aggregate_frequency(), 3);

    let rest = summary.clusters.get("REST").unwrap();
    assert_eq!(rest.member_labels(), vec!["REST", "RESTful"]);

    let names: Vec<&str> = summary
        .rows
        .iter()
        .map(|r| r.technology_name.as_str())
        .collect();
    assert_eq!(names, vec!["MQTT", "OPC UA", "REST"]);
}

// ============================================================
// Chain: results file -> CSV report
// ============================================================

#[tokio::test]
async fn results_file_round_trips_into_csv() {
    let (_, papers) = analyzed_papers().await;
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("run").join("results.json");

    write_results(&results, &papers).unwrap();
    assert_eq!(read_results(&results).unwrap(), papers);

    let (summary, report) = aggregate::run(&results, 90.0, 3, &dir.path().join("out")).unwrap();
    let csv = std::fs::read_to_string(&report).unwrap();

    assert_eq!(summary.rows.len(), 3);
    assert!(csv.starts_with("Frequency,Technology Name,Matched Synonyms\r\n"));
    assert!(csv.contains("3,MQTT,['MQTT']\r\n"));
    assert!(csv.contains("3,OPC UA,\"['OPC UA', 'OPC UA Server']\"\r\n"));
    assert!(csv.contains("3,REST,\"['REST', 'RESTful']\"\r\n"));
    assert!(!csv.contains("ROS"));
}
