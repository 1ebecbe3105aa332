use std::{
    fs,
    path::{Path, PathBuf},
    process::Output,
};

use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

const FIXTURES: [&str; 3] = ["Debates.xml", "Positions.xml", "Arguments.xml"];

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../support/test-fixtures")
}

/// A scratch directory holding a copy of the Hypernomicon fixtures.
fn workspace() -> anyhow::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for name in FIXTURES {
        fs::copy(fixtures_dir().join(name), dir.path().join(name))?;
    }
    Ok(dir)
}

fn hyper2gojs(dir: &TempDir) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("hyper2gojs")?;
    cmd.current_dir(dir.path());
    for var in [
        "HYPER2GOJS_DEBATE",
        "HYPER2GOJS_DEBATES_XML",
        "HYPER2GOJS_POSITIONS_XML",
        "HYPER2GOJS_ARGUMENTS_XML",
        "HYPER2GOJS_JSON",
        "HYPER2GOJS_HTML",
        "HYPER2GOJS_DEBUG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[test]
fn test_convert_free_will_with_defaults() -> anyhow::Result<()> {
    let dir = workspace()?;
    hyper2gojs(&dir)?.arg("convert").assert().success();

    let doc = read_json(&dir.path().join("hyper2gojs_1.json"))?;
    let ids: Vec<&str> = doc["class"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "p1", "a1"]);
    assert_eq!(
        doc["linkDataArray"],
        json!([
            {"from": "p1", "to": "1", "category": "belongs-to"},
            {"from": "a1", "to": "p1", "category": "opposes", "text": "opposes"}
        ])
    );
    assert!(dir.path().join("blockEditor.html").exists());
    Ok(())
}

#[test]
fn test_convert_unknown_debate_succeeds_with_empty_document() -> anyhow::Result<()> {
    let dir = workspace()?;
    let output = hyper2gojs(&dir)?
        .args(["convert", "--debate", "999", "--no-html"])
        .output()?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("not found"), "{}", stderr(&output));

    let doc = read_json(&dir.path().join("hyper2gojs_999.json"))?;
    assert_eq!(doc, json!({"class": [], "linkDataArray": []}));
    assert!(!dir.path().join("blockEditor.html").exists());
    Ok(())
}

#[test]
fn test_convert_overwrites_json_but_keeps_html() -> anyhow::Result<()> {
    let dir = workspace()?;
    let json_path = dir.path().join("out.json");
    let html_path = dir.path().join("page.html");
    fs::write(&json_path, "old")?;
    fs::write(&html_path, "<html>my page</html>")?;

    hyper2gojs(&dir)?
        .args(["convert", "--json", "out.json", "--html", "page.html"])
        .assert()
        .success();

    assert_eq!(read_json(&json_path)?["class"].as_array().unwrap().len(), 3);
    assert_eq!(fs::read_to_string(&html_path)?, "<html>my page</html>");
    Ok(())
}

#[test]
fn test_convert_is_byte_identical_on_rerun() -> anyhow::Result<()> {
    let dir = workspace()?;
    let json_path = dir.path().join("hyper2gojs_2.json");

    hyper2gojs(&dir)?.args(["convert", "-D", "2"]).assert().success();
    let first = fs::read(&json_path)?;
    hyper2gojs(&dir)?.args(["convert", "-D", "2"]).assert().success();
    assert_eq!(first, fs::read(&json_path)?);
    Ok(())
}

#[test]
fn test_convert_missing_input_fails() -> anyhow::Result<()> {
    let dir = workspace()?;
    fs::remove_file(dir.path().join("Positions.xml"))?;

    let output = hyper2gojs(&dir)?.arg("convert").output()?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Positions.xml"), "{}", stderr(&output));
    assert!(!dir.path().join("hyper2gojs_1.json").exists());
    Ok(())
}

#[test]
fn test_convert_malformed_input_fails() -> anyhow::Result<()> {
    let dir = workspace()?;
    fs::write(dir.path().join("Debates.xml"), "<hypernomicon_data><record")?;

    let output = hyper2gojs(&dir)?.arg("convert").output()?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("malformed XML"), "{}", stderr(&output));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_browser_failure_is_not_fatal() -> anyhow::Result<()> {
    let dir = workspace()?;
    let output = hyper2gojs(&dir)?
        .args(["convert", "--open"])
        .env("BROWSER", "false")
        .output()?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("Unable to open"), "{}", stderr(&output));
    Ok(())
}

#[test]
fn test_convert_stats_json() -> anyhow::Result<()> {
    let dir = workspace()?;
    let output = hyper2gojs(&dir)?
        .args(["convert", "--no-html", "--stats-json"])
        .output()?;
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(stats["debate_found"], json!(true));
    assert_eq!(stats["positions"], json!(1));
    assert_eq!(stats["opposes_links"], json!(1));
    Ok(())
}

#[test]
fn test_debates_listing_json() -> anyhow::Result<()> {
    let dir = workspace()?;
    let output = hyper2gojs(&dir)?.args(["debates", "--json"]).output()?;
    assert!(output.status.success());

    let listing: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(listing[0]["name"], json!("Free Will"));
    assert_eq!(listing[1]["positions"], json!(1));
    Ok(())
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
