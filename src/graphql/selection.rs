use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Query => write!(f, "query"),
            OperationType::Mutation => write!(f, "mutation"),
            OperationType::Subscription => write!(f, "subscription"),
        }
    }
}

/// A directive such as `@skip(if: true)`
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Value)>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// One requested field with its arguments and sub-selections
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionNode {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Vec<(String, Value)>,
    pub directives: Vec<Directive>,
    pub children: Vec<SelectionNode>,
}

impl SelectionNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.push((name.into(), value));
        self
    }

    pub fn with_directive(mut self, name: impl Into<String>, condition: bool) -> Self {
        self.directives.push(Directive {
            name: name.into(),
            arguments: vec![("if".to_string(), Value::Bool(condition))],
        });
        self
    }

    pub fn with_children(mut self, children: Vec<SelectionNode>) -> Self {
        self.children = children;
        self
    }

    /// Key this node's value is stored under in the result
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Evaluate `@skip` and `@include`; no directive means include
    pub fn is_included(&self) -> bool {
        self.directives.iter().all(|d| match d.name.as_str() {
            "skip" => d.argument("if") != Some(&Value::Bool(true)),
            "include" => d.argument("if") != Some(&Value::Bool(false)),
            _ => true,
        })
    }
}

/// A parsed operation ready for resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operation_type: OperationType,
    pub name: Option<String>,
    pub selection_set: Vec<SelectionNode>,
}

/// Included selections of one level, merged by response key.
///
/// The first occurrence keeps its position and arguments; children of later
/// occurrences are appended to it.
pub fn collect_fields(selections: &[SelectionNode]) -> Vec<SelectionNode> {
    let mut collected: Vec<SelectionNode> = Vec::new();

    for selection in selections.iter().filter(|s| s.is_included()) {
        match collected
            .iter_mut()
            .find(|c| c.response_key() == selection.response_key())
        {
            Some(existing) => existing.children.extend(selection.children.iter().cloned()),
            None => collected.push(selection.clone()),
        }
    }

    collected
}
