//! Typed views of the three Hypernomicon record kinds this converter reads.
//!
//! Each kind is populated from its `<record>` element by an explicit mapping
//! function ([`HyperRecord::from_element`]); nothing downstream touches XML.

use std::fmt::Display;

use roxmltree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Debate,
    Position,
    Argument,
}

impl RecordKind {
    /// Value of the `type` attribute on a `<record>` element.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Debate => "debate",
            RecordKind::Position => "position",
            RecordKind::Argument => "argument",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    #[default]
    Supports,
    Opposes,
}

/// Verdict fragments that make a target link an opposition. Position verdicts
/// ("disproves", "refutes") and argument verdicts ("unsound", "invalid",
/// "fails") both land here; any other verdict reads as support.
const OPPOSING_VERDICT_WORDS: &[&str] = &[
    "oppose", "against", "refute", "disprove", "false", "reject", "counter", "unsound",
    "invalid", "fail", "undermine", "rebut", "weaken",
];

impl Stance {
    pub fn from_verdict(verdict: &str) -> Self {
        let verdict = verdict.to_lowercase();
        if OPPOSING_VERDICT_WORDS.iter().any(|w| verdict.contains(w)) {
            Stance::Opposes
        } else {
            Stance::Supports
        }
    }
}

/// One `target_position` / `target_argument` reference of an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub stance: Stance,
    /// Verdict text as written in the export, if any.
    pub verdict: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debate {
    pub id: String,
    pub name: String,
    pub larger_debates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: String,
    pub name: String,
    pub larger_debates: Vec<String>,
    pub larger_positions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub id: String,
    pub name: String,
    pub target_positions: Vec<Target>,
    pub target_arguments: Vec<Target>,
}

/// A record kind that can be read out of a Hypernomicon XML export.
pub trait HyperRecord: Sized {
    const KIND: RecordKind;

    /// Build the record from its `<record>` element; `id` is already validated.
    fn from_element(id: &str, element: Node) -> Self;

    fn id(&self) -> &str;

    fn name(&self) -> &str;
}

impl HyperRecord for Debate {
    const KIND: RecordKind = RecordKind::Debate;

    fn from_element(id: &str, element: Node) -> Self {
        Debate {
            id: id.to_owned(),
            name: child_text(element, "name"),
            larger_debates: child_refs(element, "larger_debate"),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl HyperRecord for Position {
    const KIND: RecordKind = RecordKind::Position;

    fn from_element(id: &str, element: Node) -> Self {
        Position {
            id: id.to_owned(),
            name: child_text(element, "name"),
            larger_debates: child_refs(element, "larger_debate"),
            larger_positions: child_refs(element, "larger_position"),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl HyperRecord for Argument {
    const KIND: RecordKind = RecordKind::Argument;

    fn from_element(id: &str, element: Node) -> Self {
        Argument {
            id: id.to_owned(),
            name: child_text(element, "name"),
            target_positions: targets(element, "target_position", "position_verdict"),
            target_arguments: targets(element, "target_argument", "argument_verdict"),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn child_elements<'a, 'input: 'a>(
    element: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    element
        .children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn element_text(element: Node) -> Option<String> {
    let text: String = element
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn child_text(element: Node, tag: &str) -> String {
    child_elements(element, tag)
        .find_map(element_text)
        .unwrap_or_default()
}

/// Ids of `<tag id="…"/>` reference children, in document order, without duplicates.
fn child_refs(element: Node, tag: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for id in child_elements(element, tag).filter_map(|n| n.attribute("id")) {
        let id = id.trim();
        if !id.is_empty() && !refs.iter().any(|r| r == id) {
            refs.push(id.to_owned());
        }
    }
    refs
}

fn targets(element: Node, tag: &str, verdict_tag: &str) -> Vec<Target> {
    // a verdict written directly on the record applies to targets without their own
    let record_verdict = child_elements(element, verdict_tag).find_map(element_text);

    let mut targets: Vec<Target> = Vec::new();
    for target in child_elements(element, tag) {
        let Some(id) = target.attribute("id").map(str::trim).filter(|id| !id.is_empty()) else {
            continue;
        };
        if targets.iter().any(|t| t.id == id) {
            continue;
        }
        let verdict = target
            .attribute("verdict")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .or_else(|| child_elements(target, verdict_tag).find_map(element_text))
            .or_else(|| record_verdict.clone());
        targets.push(Target {
            id: id.to_owned(),
            stance: verdict.as_deref().map(Stance::from_verdict).unwrap_or_default(),
            verdict,
        });
    }
    targets
}
