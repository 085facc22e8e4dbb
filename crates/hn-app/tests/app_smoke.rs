//! Smoke test for hn-app service layer.

use std::path::PathBuf;

use hn_app::{
    AppError, ExportOptions, export_inp, import_inp, load_project, render_inp, save_project,
    summarize_project, validate_project,
};
use hn_graph::EdgeData;

fn demo_project_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("demos");
    path.push("projects");
    path.push("penstock_surge.json");
    path
}

#[test]
fn load_demo_project() {
    let project = load_project(&demo_project_path()).expect("demo project should load");
    validate_project(&project).expect("demo project should validate");

    let summary = summarize_project(&project);
    assert_eq!(summary.name, "Penstock Surge");
    assert_eq!(summary.node_total(), 5);
    assert_eq!(summary.edge_counts.get("conduit"), Some(&3));
    assert_eq!(summary.edge_counts.get("dummy"), Some(&1));
    assert_eq!(summary.unwired_edges, 0);
    assert_eq!(summary.output_requests, 3);
}

#[test]
fn render_demo_project() {
    let project = load_project(&demo_project_path()).unwrap();
    let text = render_inp(&project, &ExportOptions::default()).unwrap();

    assert!(text.starts_with("c Penstock Surge\n"));
    assert!(text.contains(
        "ELEM UPPER AT 1\nELEM C1 LINK 1 2\n\nJUNCTION AT 2\n\nELEM D1 LINK 2 3\nELEM ST AT 3\nELEM C2 LINK 2 4\nELEM C3 LINK 4 5\nELEM TURB AT 5\n"
    ));
    // node 4 sits between sequentially named C2 and C3 before the boundary
    assert!(text.contains("NODE 1 ELEV 4022.3\nNODE 2 ELEV 3980.0\nNODE 3 ELEV 3980.0\nNODE 5 ELEV 3490.0\n"));
    assert!(!text.contains("NODE 4 ELEV"));

    assert!(text.contains("c Upper reservoir\nRESERVOIR\n ID UPPER\n ELEV 4022.31\n FINISH\n"));
    assert!(text.contains(" ADDEDLOSS\n  CPLUS 0.25\n  CMINUS 0.50\n"));
    assert!(text.contains(" NUMSEG 10\n"));
    assert!(text.contains("CONDUIT ID D1\n DUMMY\n DIAMETER 30\n ADDEDLOSS\n CPLUS 0.1\n CMINUS 0.1\nFINISH\n"));
    assert!(text.contains("SURGETANK\n ID ST SIMPLE\n ELTOP 4100\n"));
    assert!(text.contains("FLOWBC ID TURB QSCHEDULE 1 FINISH"));
    assert!(text.contains(" QSCHEDULE 1 T 0 Q 3000 T 20 Q 0 T 3000 Q 0\n"));
    assert!(text.contains(
        "HISTORY\n NODE 4 Q HEAD\n ELEM ST Q ELEV\n FINISH\nPLOT\n ELEM C2 Q\n FINISH\nDISPLAY\n ALL\n FINISH\n"
    ));
    assert!(text.ends_with("GO\nGOODBYE\n"));
}

#[test]
fn export_then_import_seed() {
    let project = load_project(&demo_project_path()).unwrap();
    let dir = std::env::temp_dir();
    let inp_path = dir.join("hn_app_smoke_penstock.inp");
    export_inp(&project, &inp_path, &ExportOptions::default()).unwrap();

    let seed = import_inp(&inp_path).unwrap();
    assert_eq!(seed.name, "hn_app_smoke_penstock");
    assert_eq!(seed.nodes.len(), 1);
    assert_eq!(seed.nodes[0].label(), "UPPER");
    assert_eq!(seed.nodes[0].data.elevation, Some(4022.31));

    let labels: Vec<&str> = seed.edges.iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["C1", "C2", "C3", "D1"]);
    assert_eq!(seed.unwired_edge_count(), 4);
    match &seed.edges[1].data {
        EdgeData::Conduit(c) => {
            assert_eq!(c.length, 2400.0);
            assert_eq!(c.cplus, Some(0.25));
            assert_eq!(c.cminus, Some(0.5));
        }
        other => panic!("unexpected edge {other:?}"),
    }

    // the seed is a valid project and survives a YAML round trip
    let yaml_path = dir.join("hn_app_smoke_seed.yaml");
    save_project(&yaml_path, &seed).unwrap();
    assert_eq!(load_project(&yaml_path).unwrap(), seed);
}

#[test]
fn unnamed_project_takes_file_stem() {
    let path = std::env::temp_dir().join("hn_app_smoke_unnamed.json");
    std::fs::write(
        &path,
        r#"{ "nodes": [{ "id": "r1", "data": { "type": "reservoir", "label": "R1", "elevation": 10 } }] }"#,
    )
    .unwrap();

    let project = load_project(&path).unwrap();
    assert_eq!(project.name, "hn_app_smoke_unnamed");
    assert_eq!(project.nodes.len(), 1);
    let text = render_inp(&project, &ExportOptions::default()).unwrap();
    assert!(text.starts_with("c hn_app_smoke_unnamed\n"));
}

#[test]
fn import_of_empty_file_fails() {
    let path = std::env::temp_dir().join("hn_app_smoke_empty.inp");
    std::fs::write(&path, "c nothing here\nGO\nGOODBYE\n").unwrap();
    assert!(matches!(
        import_inp(&path),
        Err(AppError::EmptyImport { .. })
    ));
}

#[test]
fn json_shape_is_stable() {
    let project = load_project(&demo_project_path()).unwrap();
    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value["projectName"], "Penstock Surge");
    assert_eq!(value["nodes"][2]["data"]["type"], "surgeTank");
    assert_eq!(value["edges"][1]["data"]["type"], "dummy");
    assert_eq!(value["outputRequests"][2]["elementType"], "edge");
}
