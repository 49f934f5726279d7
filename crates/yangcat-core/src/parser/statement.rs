//! Statement tree produced by a [`super::StatementParser`]

/// A single YANG statement with its substatements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Statement keyword, possibly prefixed (`oc-ext:openconfig-version`)
    pub keyword: String,
    /// Argument, with quoted parts already concatenated
    pub argument: Option<String>,
    /// Direct substatements in document order
    pub substatements: Vec<Statement>,
}

impl Statement {
    /// Create a statement without substatements
    #[must_use]
    pub fn new(keyword: impl Into<String>, argument: Option<&str>) -> Self {
        Self {
            keyword: keyword.into(),
            argument: argument.map(str::to_string),
            substatements: Vec::new(),
        }
    }

    /// Append a substatement
    #[must_use]
    pub fn with_substatement(mut self, statement: Statement) -> Self {
        self.substatements.push(statement);
        self
    }

    /// The statement argument, if any
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// First direct substatement with the given keyword
    #[must_use]
    pub fn find(&self, keyword: &str) -> Option<&Statement> {
        self.substatements.iter().find(|s| s.keyword == keyword)
    }

    /// All direct substatements with the given keyword
    pub fn find_all<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Statement> + 'a {
        self.substatements
            .iter()
            .filter(move |s| s.keyword == keyword)
    }

    /// Argument of the first direct substatement with the given keyword
    #[must_use]
    pub fn find_arg(&self, keyword: &str) -> Option<&str> {
        self.find(keyword).and_then(Statement::arg)
    }

    /// Whether this is a `submodule` statement
    #[must_use]
    pub fn is_submodule(&self) -> bool {
        self.keyword == "submodule"
    }
}
