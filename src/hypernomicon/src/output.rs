use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::{ConvertError, ConvertResult},
    mapper::BlockEditorModel,
};

/// Block Editor page copied next to the JSON when no page exists yet.
pub const BLOCK_EDITOR_TEMPLATE: &str = include_str!("../templates/blockEditorTemplate.html");

lazy_static::lazy_static! {
    static ref SAVED_MODEL_TEXTAREA: Regex = Regex::new(
        r#"(?s)(<textarea[^>]*[ \t\r\n]id[ \t\r\n]*=[ \t\r\n]*["']mySavedModel["'][^>]*>)(.*?)(</textarea[ \t\r\n]*>)"#
    )
    .expect("textarea pattern is valid");
}

fn serialize_pretty<W: Write>(model: &BlockEditorModel, writer: W) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    model.serialize(&mut ser)
}

/// Pretty JSON with the four-space indent the Block Editor examples use.
pub fn to_json_pretty(model: &BlockEditorModel) -> ConvertResult<String> {
    let mut buf = Vec::new();
    serialize_pretty(model, &mut buf)?;
    String::from_utf8(buf).map_err(|err| {
        ConvertError::Serialize(serde_json::Error::io(io::Error::new(
            io::ErrorKind::InvalidData,
            err,
        )))
    })
}

/// Write `model` to `path`, replacing whatever is there.
pub fn write_json(model: &BlockEditorModel, path: &Path) -> ConvertResult<()> {
    let file = File::create(path).map_err(|err| ConvertError::output_write(path, err))?;
    let mut writer = BufWriter::new(file);
    serialize_pretty(model, &mut writer).map_err(|err| {
        if err.is_io() {
            ConvertError::output_write(path, err.into())
        } else {
            ConvertError::Serialize(err)
        }
    })?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|err| ConvertError::output_write(path, err))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Create the HTML page from the bundled template unless it already exists.
/// Returns true when the page was created.
pub fn materialize_html(path: &Path) -> ConvertResult<bool> {
    if path.exists() {
        debug!("Keeping existing page {}", path.display());
        return Ok(false);
    }
    std::fs::write(path, BLOCK_EDITOR_TEMPLATE).map_err(|err| ConvertError::output_write(path, err))?;
    Ok(true)
}

fn escape_html_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Replace the contents of the page's `mySavedModel` textarea with `model`.
/// Returns false, leaving the page untouched, when there is no such textarea.
pub fn embed_json(model: &BlockEditorModel, html_path: &Path) -> ConvertResult<bool> {
    let html = std::fs::read_to_string(html_path).map_err(|source| ConvertError::Read {
        path: html_path.to_path_buf(),
        source,
    })?;
    if !SAVED_MODEL_TEXTAREA.is_match(&html) {
        warn!(
            "No <textarea id=\"mySavedModel\"> in {}, JSON not embedded",
            html_path.display()
        );
        return Ok(false);
    }

    let json = escape_html_text(&to_json_pretty(model)?);
    let embedded = SAVED_MODEL_TEXTAREA.replacen(&html, 1, |caps: &Captures| {
        format!("{}\n{}\n{}", &caps[1], json, &caps[3])
    });
    std::fs::write(html_path, embedded.as_bytes())
        .map_err(|err| ConvertError::output_write(html_path, err))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mapper::{LinkCategory, LinkData, NodeData};

    fn model() -> BlockEditorModel {
        BlockEditorModel {
            class: vec![NodeData {
                id: "1".to_string(),
                text: "Free <Will> & Fate".to_string(),
                category: "debate".to_string(),
                group: None,
                loc: None,
            }],
            link_data_array: vec![LinkData {
                from: "1".to_string(),
                to: "1".to_string(),
                category: LinkCategory::BelongsTo,
                text: None,
                points: None,
            }],
        }
    }

    #[test]
    fn test_write_json_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale content that is longer than the new document").unwrap();

        write_json(&BlockEditorModel::default(), &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n    \"class\": [],\n    \"linkDataArray\": []\n}\n"
        );
    }

    #[test]
    fn test_write_json_streams_the_same_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut doc = model();
        doc.class[0].text = "Libre albedrío – «Willensfreiheit»".to_string();

        write_json(&doc, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{}\n", to_json_pretty(&doc).unwrap()));
        assert!(written.contains("Libre albedrío"));
    }

    #[test]
    fn test_write_json_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.json");
        let err = write_json(&model(), &path).unwrap_err();
        assert!(matches!(err, ConvertError::OutputWrite { .. }), "{err:?}");
    }

    #[test]
    fn test_materialize_html_keeps_existing_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockEditor.html");

        assert!(materialize_html(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), BLOCK_EDITOR_TEMPLATE);

        std::fs::write(&path, "<html>mine</html>").unwrap();
        assert!(!materialize_html(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>mine</html>");
    }

    #[test]
    fn test_embed_json_into_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockEditor.html");
        materialize_html(&path).unwrap();

        assert!(embed_json(&model(), &path).unwrap());
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Free &lt;Will&gt; &amp; Fate"), "{html}");

        // embedding again replaces rather than appends
        assert!(embed_json(&BlockEditorModel::default(), &path).unwrap());
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(!html.contains("Free &lt;Will&gt;"));
        assert_eq!(html.matches("\"linkDataArray\"").count(), 1);
    }

    #[test]
    fn test_embed_json_without_textarea() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<html><body></body></html>").unwrap();

        assert!(!embed_json(&model(), &path).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<html><body></body></html>"
        );
    }
}
