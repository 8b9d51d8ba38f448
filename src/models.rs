use serde::{Deserialize, Serialize};

/// The whole persisted document: `{ "nodes": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<NodeOption>,
    #[serde(default)]
    pub is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<SkillLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pros: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cons: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOption {
    pub id: String,
    pub text: String,
    /// Forward reference to another node's id. `None` is a dead end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<String>,
}

/// Skill level for a recommendation. The known levels get their own variants;
/// anything else found in the document is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl From<String> for SkillLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "beginner" => SkillLevel::Beginner,
            "intermediate" => SkillLevel::Intermediate,
            "advanced" => SkillLevel::Advanced,
            _ => SkillLevel::Other(s),
        }
    }
}

impl From<SkillLevel> for String {
    fn from(level: SkillLevel) -> Self {
        match level {
            SkillLevel::Beginner => "beginner".to_string(),
            SkillLevel::Intermediate => "intermediate".to_string(),
            SkillLevel::Advanced => "advanced".to_string(),
            SkillLevel::Other(s) => s,
        }
    }
}

impl SkillLevel {
    pub fn label(&self) -> &str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Video,
    Course,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Article => "Article",
            ResourceKind::Video => "Video",
            ResourceKind::Course => "Course",
        }
    }
}
