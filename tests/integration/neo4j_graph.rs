use anyhow::Result;
use dialogcurator::config::GraphSettings;
use dialogcurator::curation::enrich_knowledge;
use dialogcurator::error::CurationError;
use dialogcurator::graph::{GraphFactProvider, Neo4jGraph};
use dialogcurator::models::{ProfileRecord, Target, Triple};
use mockito::{Matcher, Server};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

const TX_PATH: &str = "/db/neo4j/tx/commit";

fn settings(url: String) -> GraphSettings {
    GraphSettings {
        enabled: true,
        url,
        password: "secret".into(),
        ..GraphSettings::default()
    }
}

fn rows(rows: &[[&str; 3]]) -> String {
    let data: Vec<_> = rows
        .iter()
        .map(|row| json!({ "row": row, "meta": [null, null, null] }))
        .collect();
    json!({
        "results": [{ "columns": ["s.value", "type(r)", "o.value"], "data": data }],
        "errors": []
    })
    .to_string()
}

#[test]
fn neo4j_rows_collapse_to_one_object_per_edge() -> Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("POST", TX_PATH)
        .match_header("authorization", "Basic bmVvNGo6c2VjcmV0")
        .match_body(Matcher::Regex(r#""subject":"Hero""#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rows(&[
            ["Hero", "Comments", "Stunning colors"],
            ["Hero", "Comments", "Too slow"],
            ["Hero", "Type", "Wuxia"],
        ]))
        .create();

    let graph = Neo4jGraph::new(&settings(server.url()))?;
    let mut rng = StdRng::seed_from_u64(3);
    let facts = graph.query("Hero", &["Comments", "Type"], &mut rng)?;

    mock.assert();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[1], Triple::new("Hero", "Type", "Wuxia"));
    Ok(())
}

#[test]
fn neo4j_errors_become_graph_query_failures() -> Result<()> {
    let mut server = Server::new();
    let _statement_error = server
        .mock("POST", TX_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [],
                "errors": [{ "code": "Neo.ClientError.Statement.SyntaxError", "message": "bad" }]
            })
            .to_string(),
        )
        .create();
    let graph = Neo4jGraph::new(&settings(server.url()))?;
    let err = graph.raw_facts("Hero", &["Comments"]).unwrap_err();
    match err {
        CurationError::GraphQueryFailure { subject, reason } => {
            assert_eq!(subject, "Hero");
            assert!(reason.contains("SyntaxError"));
        }
        other => panic!("unexpected error {other:?}"),
    }

    let mut server = Server::new();
    let _unavailable = server.mock("POST", TX_PATH).with_status(503).create();
    let graph = Neo4jGraph::new(&settings(server.url()))?;
    let err = graph.raw_facts("Hero", &["Comments"]).unwrap_err();
    assert!(matches!(err, CurationError::GraphQueryFailure { .. }));
    Ok(())
}

#[test]
fn enrichment_reads_target_comments_from_neo4j() -> Result<()> {
    let mut server = Server::new();
    let _target = server
        .mock("POST", TX_PATH)
        .match_body(Matcher::Regex(r#""subject":"Hero""#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rows(&[["Hero", "Comments", "A visual feast"]]))
        .create();
    let _persona = server
        .mock("POST", TX_PATH)
        .match_body(Matcher::Regex(r#""subject":"Fearless""#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rows(&[["Fearless", "Type", "Action"]]))
        .create();

    let graph = Neo4jGraph::new(&settings(server.url()))?;
    let profile = ProfileRecord::from_pairs([("Name", "Li Hua"), ("Accepted movies", "Fearless")]);
    let mut knowledge = vec![Triple::new("Hero", "Type", "Wuxia")];
    let mut rng = StdRng::seed_from_u64(3);
    let report = enrich_knowledge(
        &graph,
        &Target::new("Movie recommendation", "Hero"),
        &profile,
        &mut knowledge,
        &mut rng,
    )?;

    assert!(report.target_comment);
    assert_eq!(report.profile_facts, 1);
    assert_eq!(
        knowledge,
        vec![
            Triple::new("Hero", "Type", "Wuxia"),
            Triple::new("Hero", "Comments", "A visual feast"),
            Triple::new("Fearless", "Type", "Action"),
        ]
    );
    Ok(())
}
