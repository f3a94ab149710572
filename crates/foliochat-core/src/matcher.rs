use crate::knowledge::{KnowledgeBase, KnowledgeValue};

/// Hand-coded keyword groups checked after intent and key matching, in
/// priority order. Each group maps to candidate entry names; the first
/// present entry wins.
const KEYWORD_GROUPS: &[(&[&str], &[&str])] = &[
    (&["skill", "technology", "tech stack"], &["skills"]),
    (
        &["project", "work", "portfolio", "built"],
        &["projects", "achievements"],
    ),
    (
        &["achievement", "success", "accomplishment"],
        &["achievements"],
    ),
    (
        &["contact", "reach", "email", "linkedin", "github"],
        &["contact"],
    ),
    (&["about", "who", "experience", "bio"], &["about"]),
    (&["faq", "question"], &["faqs"]),
];

/// Look up a canned reply for an utterance. Strictly ordered fallback
/// strategies, first hit wins; deliberately crude substring matching with
/// no tokenization or ranking. Overlapping keys resolve by declaration
/// order.
pub fn match_utterance(utterance: &str, base: &KnowledgeBase) -> Option<KnowledgeValue> {
    let msg = utterance.trim().to_lowercase();

    // 1. Declared intents, in order.
    for intent in &base.intents {
        if intent
            .patterns
            .iter()
            .any(|pattern| msg.contains(&pattern.to_lowercase()))
        {
            return Some(KnowledgeValue::Scalar(intent.response.clone()));
        }
    }

    // 2. Top-level keys, bidirectional containment.
    for (key, value) in &base.entries {
        let key = key.to_lowercase();
        if msg.contains(&key) || key.contains(&msg) {
            return Some(value.clone());
        }
    }

    // 3. Keyword groups. A group hit ends the match even when the target
    // entry is absent from the document.
    for (keywords, targets) in KEYWORD_GROUPS {
        if keywords.iter().any(|kw| msg.contains(kw)) {
            return targets.iter().find_map(|t| base.get(t)).cloned();
        }
    }

    // 4. Depth-first search of nested values for a leaf containing the
    // utterance. Top-level scalars are only reachable via stage 2.
    for (_, value) in &base.entries {
        if matches!(value, KnowledgeValue::Scalar(_)) {
            continue;
        }
        if let Some(hit) = search_tree(&msg, value) {
            return Some(hit);
        }
    }

    None
}

fn search_tree(msg: &str, value: &KnowledgeValue) -> Option<KnowledgeValue> {
    match value {
        KnowledgeValue::Scalar(text) => text
            .to_lowercase()
            .contains(msg)
            .then(|| KnowledgeValue::Scalar(text.clone())),
        KnowledgeValue::List(items) => items
            .iter()
            .find(|item| item.to_lowercase().contains(msg))
            .map(|item| KnowledgeValue::Scalar(item.clone())),
        KnowledgeValue::Nested(entries) => entries
            .iter()
            .find_map(|(_, child)| search_tree(msg, child)),
    }
}
